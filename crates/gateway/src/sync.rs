//! Section membership reconciliation
//!
//! Computes which topic links to drop and which to create so a section's
//! membership matches a desired state, leaving untouched links alone.

use std::collections::HashSet;

use crate::models::TopicId;

/// Links to remove and links to add for one section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipDelta {
  pub to_add: Vec<TopicId>,
  pub to_remove: Vec<TopicId>,
}

impl MembershipDelta {
  pub fn is_empty(&self) -> bool {
    self.to_add.is_empty() && self.to_remove.is_empty()
  }

  /// Membership that results from applying this delta to `current`
  pub fn apply(&self, current: &[TopicId]) -> HashSet<TopicId> {
    let removed: HashSet<&TopicId> = self.to_remove.iter().collect();
    current
      .iter()
      .filter(|id| !removed.contains(id))
      .chain(self.to_add.iter())
      .copied()
      .collect()
  }
}

/// Set differences between the current and desired membership.
///
/// `to_remove = current - desired` and `to_add = desired - current`.
/// Duplicates collapse, and each side keeps the first-seen order of its input.
pub fn diff(current: &[TopicId], desired: &[TopicId]) -> MembershipDelta {
  MembershipDelta { to_add: difference(desired, current), to_remove: difference(current, desired) }
}

fn difference(left: &[TopicId], right: &[TopicId]) -> Vec<TopicId> {
  let excluded: HashSet<&TopicId> = right.iter().collect();
  let mut seen = HashSet::new();

  left.iter().filter(|id| !excluded.contains(id) && seen.insert(**id)).copied().collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;
  use uuid::Uuid;

  fn ids(slots: &[u128]) -> Vec<TopicId> {
    slots.iter().map(|slot| Uuid::from_u128(*slot)).collect()
  }

  #[test]
  fn test_partial_overlap() {
    let current = ids(&[1, 2, 3]);
    let desired = ids(&[2, 4]);

    let delta = diff(&current, &desired);

    assert_eq!(delta.to_add, ids(&[4]));
    assert_eq!(delta.to_remove, ids(&[1, 3]));
  }

  #[test]
  fn test_identical_sets_need_no_changes() {
    let set = ids(&[5, 6, 7]);
    assert!(diff(&set, &set).is_empty());
  }

  #[test]
  fn test_duplicates_collapse_before_differencing() {
    let current = ids(&[1, 1, 2]);
    let desired = ids(&[3, 3, 2, 3]);

    let delta = diff(&current, &desired);

    assert_eq!(delta.to_add, ids(&[3]));
    assert_eq!(delta.to_remove, ids(&[1]));
  }

  #[test]
  fn test_empty_desired_removes_everything() {
    let current = ids(&[1, 2]);
    let delta = diff(&current, &[]);

    assert!(delta.to_add.is_empty());
    assert_eq!(delta.to_remove, current);
  }

  #[test]
  fn test_empty_current_adds_everything() {
    let desired = ids(&[9, 8]);
    let delta = diff(&[], &desired);

    assert_eq!(delta.to_add, desired);
    assert!(delta.to_remove.is_empty());
  }

  fn id_list() -> impl Strategy<Value = Vec<TopicId>> {
    prop::collection::vec(0u128..12, 0..20).prop_map(|slots| ids(&slots))
  }

  proptest! {
    #[test]
    fn prop_applying_delta_yields_desired(current in id_list(), desired in id_list()) {
      let delta = diff(&current, &desired);
      let expected: HashSet<TopicId> = desired.iter().copied().collect();
      prop_assert_eq!(delta.apply(&current), expected);
    }

    #[test]
    fn prop_add_and_remove_are_disjoint(current in id_list(), desired in id_list()) {
      let delta = diff(&current, &desired);
      let added: HashSet<TopicId> = delta.to_add.iter().copied().collect();
      prop_assert!(delta.to_remove.iter().all(|id| !added.contains(id)));
    }

    #[test]
    fn prop_diff_with_itself_is_empty(set in id_list()) {
      prop_assert!(diff(&set, &set).is_empty());
    }
  }
}
