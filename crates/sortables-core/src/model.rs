#![forbid(unsafe_code)]

//! Containers, items, and the locator.
//!
//! A [`Model`] is an ordered sequence of [`Container`]s, each holding an
//! ordered sequence of item ids. Models are immutable per revision: every
//! move returns a new `Model` and leaves the receiver untouched, so a drag
//! session can hold the pre-drag model as its rollback snapshot.
//!
//! # Invariants
//!
//! 1. Every item id and every container id is unique within one model
//!    (checked by [`Model::new`]).
//! 2. Moves never create or destroy items; the multiset of item ids is
//!    preserved by [`Model::move_within`] and [`Model::move_across`].
//! 3. Container order never changes after construction.
//!
//! # Failure Modes
//!
//! Moves that reference an unknown item or an out-of-range index return an
//! unchanged copy of the model rather than an error.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Place};

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// A labeled, ordered group of items.
///
/// The id doubles as the container's header. An empty id is an unlabeled
/// container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Container {
    id: String,
    items: Vec<String>,
}

impl Container {
    /// Create a container from an id and its items.
    #[must_use]
    pub fn new<I, S>(id: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// The container id (its header).
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the container carries a non-empty header.
    #[inline]
    #[must_use]
    pub fn is_labeled(&self) -> bool {
        !self.id.is_empty()
    }

    /// Items in display order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the container holds no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of `item` within this container.
    #[must_use]
    pub fn index_of(&self, item: &str) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }

    /// Consume the container, returning its id and items.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.id, self.items)
    }
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// The full arrangement of containers and items at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Container>", into = "Vec<Container>")
)]
pub struct Model {
    containers: Vec<Container>,
}

impl Model {
    /// Build a model, rejecting any id used more than once.
    ///
    /// Container ids and item ids share one namespace, so a container named
    /// like an item elsewhere is rejected as well.
    pub fn new(containers: Vec<Container>) -> Result<Self, ModelError> {
        check_unique(&containers)?;
        Ok(Self { containers })
    }

    /// Containers in display order.
    #[inline]
    #[must_use]
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Container at `index`.
    #[inline]
    #[must_use]
    pub fn container(&self, index: usize) -> Option<&Container> {
        self.containers.get(index)
    }

    /// Number of containers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Whether the model has no containers.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Total number of items across all containers.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.containers.iter().map(Container::len).sum()
    }

    /// Iterate every item id, container by container.
    pub fn items(&self) -> impl Iterator<Item = &str> + '_ {
        self.containers
            .iter()
            .flat_map(|container| container.items.iter().map(String::as_str))
    }

    /// Whether `id` names a container or an item.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.locate(id).is_some()
    }

    /// Resolve `id` to the index of its container.
    ///
    /// Container ids are checked first so that hovering a container region
    /// (including an empty one) resolves to that container. Item ids are
    /// checked second.
    #[must_use]
    pub fn locate(&self, id: &str) -> Option<usize> {
        self.containers
            .iter()
            .position(|container| container.id == id)
            .or_else(|| {
                self.containers
                    .iter()
                    .position(|container| container.index_of(id).is_some())
            })
    }

    /// Container index and in-container index of an item.
    ///
    /// Returns `None` for container ids and unknown ids.
    #[must_use]
    pub fn position_of(&self, item: &str) -> Option<(usize, usize)> {
        self.containers
            .iter()
            .enumerate()
            .find_map(|(c, container)| container.index_of(item).map(|i| (c, i)))
    }

    /// Reorder one container by removing the item at `from` and reinserting
    /// it at `to`.
    ///
    /// `to` is an index into the resulting sequence, so moving towards the end
    /// places the item after the element previously at `to`.
    #[must_use]
    pub fn move_within(&self, container: usize, from: usize, to: usize) -> Self {
        let mut next = self.clone();
        let Some(target) = next.containers.get_mut(container) else {
            return next;
        };
        if from >= target.items.len() || to >= target.items.len() || from == to {
            return next;
        }
        let item = target.items.remove(from);
        target.items.insert(to, item);
        next
    }

    /// Move `item` from container `source` into container `target`, placing it
    /// immediately before `before`.
    ///
    /// When `before` is not an item of `target` (for example the target's own
    /// container id) the item is appended.
    #[must_use]
    pub fn move_across(&self, source: usize, target: usize, item: &str, before: &str) -> Self {
        let mut next = self.clone();
        if source == target || target >= next.containers.len() {
            return next;
        }
        let Some(from) = next
            .containers
            .get(source)
            .and_then(|container| container.index_of(item))
        else {
            return next;
        };
        let moved = next.containers[source].items.remove(from);
        let destination = &mut next.containers[target].items;
        let at = destination
            .iter()
            .position(|candidate| candidate == before)
            .unwrap_or(destination.len());
        destination.insert(at, moved);
        next
    }

    /// Consume the model, returning its containers.
    #[must_use]
    pub fn into_containers(self) -> Vec<Container> {
        self.containers
    }
}

/// Reject any id that appears twice across container ids and item ids.
fn check_unique(containers: &[Container]) -> Result<(), ModelError> {
    let mut seen: HashMap<&str, Place> = HashMap::new();
    for (c, container) in containers.iter().enumerate() {
        let places = std::iter::once((container.id(), Place::Container(c))).chain(
            container.items.iter().enumerate().map(move |(index, item)| {
                (
                    item.as_str(),
                    Place::Item {
                        container: c,
                        index,
                    },
                )
            }),
        );
        for (id, place) in places {
            if let Some(first) = seen.insert(id, place) {
                return Err(ModelError::DuplicateId {
                    id: id.to_owned(),
                    first,
                    second: place,
                });
            }
        }
    }
    Ok(())
}

impl TryFrom<Vec<Container>> for Model {
    type Error = ModelError;

    fn try_from(containers: Vec<Container>) -> Result<Self, Self::Error> {
        Self::new(containers)
    }
}

impl From<Model> for Vec<Container> {
    fn from(model: Model) -> Self {
        model.containers
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
