//! Grouping of flat section/topic join rows into nested section responses

use std::collections::HashMap;
use tracing::warn;

use crate::models::{SectionId, SectionResponse, SectionTopicRow};

/// Group rows by section id.
///
/// Sections come out in the order their id first appears, topics in the
/// order their rows appear. The first title seen for a section is kept; a
/// different title on a later row is logged as an integrity warning.
pub fn aggregate(rows: Vec<SectionTopicRow>) -> Vec<SectionResponse> {
  let mut positions: HashMap<SectionId, usize> = HashMap::new();
  let mut responses: Vec<SectionResponse> = Vec::new();

  for row in rows {
    let topic = row.topic_view();

    match positions.get(&row.section_id) {
      Some(&position) => {
        let response = &mut responses[position];
        if response.title != row.section_title {
          warn!(
            section_id = %row.section_id,
            kept_title = %response.title,
            divergent_title = %row.section_title,
            "Section title differs across joined rows, keeping first-seen title"
          );
        }
        response.topics.push(topic);
      }
      None => {
        positions.insert(row.section_id, responses.len());
        responses.push(SectionResponse {
          id: row.section_id,
          title: row.section_title,
          topics: vec![topic],
        });
      }
    }
  }

  responses
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;
  use std::io::{self, Write};
  use std::sync::{Arc, Mutex};
  use uuid::Uuid;

  fn row(section: u128, section_title: &str, topic: u128) -> SectionTopicRow {
    SectionTopicRow {
      section_id: Uuid::from_u128(section),
      section_title: section_title.to_string(),
      topic_id: Uuid::from_u128(1000 + topic),
      topic_title: format!("Topic {topic}"),
      topic_description: format!("About topic {topic}"),
    }
  }

  #[test]
  fn test_groups_in_first_seen_order() {
    let rows = vec![row(1, "Sec A", 1), row(1, "Sec A", 2), row(2, "Sec B", 3)];

    let responses = aggregate(rows);

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].id, Uuid::from_u128(1));
    assert_eq!(responses[0].title, "Sec A");
    let first_topics: Vec<_> = responses[0].topics.iter().map(|t| t.id).collect();
    assert_eq!(first_topics, vec![Uuid::from_u128(1001), Uuid::from_u128(1002)]);
    assert_eq!(responses[1].id, Uuid::from_u128(2));
    assert_eq!(responses[1].topics.len(), 1);
    assert_eq!(responses[1].topics[0].title, "Topic 3");
  }

  #[test]
  fn test_group_order_is_not_by_id() {
    let rows = vec![row(9, "Late", 1), row(3, "Early", 2), row(9, "Late", 3)];

    let ids: Vec<_> = aggregate(rows).iter().map(|r| r.id).collect();

    assert_eq!(ids, vec![Uuid::from_u128(9), Uuid::from_u128(3)]);
  }

  /// Shared sink for formatted log lines
  #[derive(Clone, Default)]
  struct LogBuffer(Arc<Mutex<Vec<u8>>>);

  impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      self.0.lock().unwrap().extend_from_slice(buf);
      Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  impl LogBuffer {
    fn contents(&self) -> String {
      String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
  }

  #[test]
  fn test_first_title_wins_on_divergence() {
    let rows = vec![row(1, "Original", 1), row(1, "Renamed", 2)];
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt().with_writer(move || writer.clone()).with_ansi(false).finish();

    let responses = tracing::subscriber::with_default(subscriber, || aggregate(rows));

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].title, "Original");
    assert_eq!(responses[0].topics.len(), 2);

    let logs = buffer.contents();
    assert!(logs.contains("WARN"));
    assert!(logs.contains(&Uuid::from_u128(1).to_string()));
    assert!(logs.contains("divergent_title=Renamed"));
  }

  #[test]
  fn test_consistent_titles_log_nothing() {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt().with_writer(move || writer.clone()).with_ansi(false).finish();

    tracing::subscriber::with_default(subscriber, || aggregate(vec![row(1, "Same", 1), row(1, "Same", 2)]));

    assert!(buffer.contents().is_empty());
  }

  #[test]
  fn test_empty_rows_give_empty_response() {
    assert!(aggregate(Vec::new()).is_empty());
  }

  proptest! {
    #[test]
    fn prop_groups_partition_rows(pairs in prop::collection::vec((0u128..5, 0u128..50), 0..40)) {
      let rows: Vec<SectionTopicRow> =
        pairs.iter().map(|(section, topic)| row(*section, &format!("Section {section}"), *topic)).collect();

      let responses = aggregate(rows.clone());

      let total: usize = responses.iter().map(|r| r.topics.len()).sum();
      prop_assert_eq!(total, rows.len());

      for response in &responses {
        let expected: Vec<_> =
          rows.iter().filter(|r| r.section_id == response.id).map(|r| r.topic_id).collect();
        let actual: Vec<_> = response.topics.iter().map(|t| t.id).collect();
        prop_assert_eq!(actual, expected);
      }
    }
  }
}
