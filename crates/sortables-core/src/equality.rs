#![forbid(unsafe_code)]

//! Structural comparison of two model snapshots.
//!
//! Provisional moves during a drag rebuild containers, so a model that went
//! A → B → A is a different value than the pre-drag snapshot yet describes the
//! same arrangement. Commit suppression therefore compares containers and
//! items element by element.

use std::fmt;

use crate::model::Model;

/// True iff both models have the same containers, in the same order, with
/// the same items in the same order.
#[must_use]
pub fn structurally_equal(a: &Model, b: &Model) -> bool {
    first_difference(a, b).is_none()
}

/// The first place where two models diverge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difference {
    /// The models hold a different number of containers.
    ContainerCount { left: usize, right: usize },
    /// Containers at `index` carry different ids.
    ContainerId { index: usize },
    /// Containers at `index` hold different item sequences.
    Items { index: usize },
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContainerCount { left, right } => {
                write!(f, "container count {left} != {right}")
            }
            Self::ContainerId { index } => write!(f, "container #{index} id differs"),
            Self::Items { index } => write!(f, "container #{index} items differ"),
        }
    }
}

/// Locate the first difference between two models, if any.
#[must_use]
pub fn first_difference(a: &Model, b: &Model) -> Option<Difference> {
    if a.len() != b.len() {
        return Some(Difference::ContainerCount {
            left: a.len(),
            right: b.len(),
        });
    }
    a.containers()
        .iter()
        .zip(b.containers())
        .enumerate()
        .find_map(|(index, (left, right))| {
            if left.id() != right.id() {
                Some(Difference::ContainerId { index })
            } else if left.items() != right.items() {
                Some(Difference::Items { index })
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Container;

    fn two(a: &[&str], b: &[&str]) -> Model {
        Model::new(vec![
            Container::new("A", a.iter().copied()),
            Container::new("B", b.iter().copied()),
        ])
        .unwrap()
    }

    #[test]
    fn equal_after_round_trip_move() {
        let original = two(&["1", "2"], &["3"]);
        let there = original.move_across(0, 1, "1", "3");
        let back = there.move_across(1, 0, "1", "2");
        assert!(structurally_equal(&original, &back));
    }

    #[test]
    fn order_matters() {
        let a = two(&["1", "2"], &[]);
        let b = two(&["2", "1"], &[]);
        assert!(!structurally_equal(&a, &b));
        assert_eq!(
            first_difference(&a, &b),
            Some(Difference::Items { index: 0 })
        );
    }

    #[test]
    fn container_count_reported_first() {
        let a = two(&[], &[]);
        let b = Model::new(vec![Container::new("A", Vec::<String>::new())]).unwrap();
        assert_eq!(
            first_difference(&a, &b),
            Some(Difference::ContainerCount { left: 2, right: 1 })
        );
    }

    #[test]
    fn container_ids_compared() {
        let a = Model::new(vec![Container::new("A", ["1"])]).unwrap();
        let b = Model::new(vec![Container::new("Z", ["1"])]).unwrap();
        assert_eq!(
            first_difference(&a, &b),
            Some(Difference::ContainerId { index: 0 })
        );
        assert_eq!(
            Difference::ContainerId { index: 0 }.to_string(),
            "container #0 id differs"
        );
    }
}
