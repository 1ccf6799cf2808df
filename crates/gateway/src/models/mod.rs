//! Entities, request shapes and views for sections and topics
//!
//! Each conversion between shapes is an explicit function that names its
//! field rules (fresh identities, defaulted classifiers).

pub mod page;
pub mod response;
pub mod section;
pub mod section_topic;
pub mod topic;

use uuid::Uuid;

pub type TopicId = Uuid;
pub type SectionId = Uuid;

pub use page::{Page, PageRequest};
pub use response::{SectionResponse, SectionTopicRow};
pub use section::{NewSection, Section, SectionShort, SectionUpdate};
pub use section_topic::SectionTopic;
pub use topic::{NewTopic, Topic, TopicUpdate, TopicView};
