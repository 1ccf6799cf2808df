//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::GatewayConfig;

/// Install a fmt subscriber. `RUST_LOG` takes precedence over the configured
/// level; `verbose` forces debug output for this crate.
pub fn init(config: &GatewayConfig, verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    let directive = if verbose { "gateway=debug" } else { config.log_level.as_str() };
    EnvFilter::new(directive)
  });

  // A subscriber may already be installed (tests, embedding applications)
  let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
