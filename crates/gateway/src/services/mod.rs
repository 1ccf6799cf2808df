//! Orchestration over the repositories and the search engine

pub mod sections;
pub mod topics;

pub use sections::SectionService;
pub use topics::TopicService;
