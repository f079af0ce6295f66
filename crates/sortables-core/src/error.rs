#![forbid(unsafe_code)]

//! Construction-time errors for [`Model`](crate::model::Model).
//!
//! The drag state machine itself never fails: unresolvable ids and
//! out-of-order events degrade to no-ops. The only error the core can report
//! is an inbound arrangement that breaks id uniqueness, because the locator
//! would otherwise resolve such ids ambiguously.

use std::fmt;

use thiserror::Error;

/// Where an id was found inside a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Place {
    /// The id of the container at this index.
    Container(usize),
    /// An item inside a container.
    Item { container: usize, index: usize },
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container(index) => write!(f, "container #{index}"),
            Self::Item { container, index } => {
                write!(f, "item #{index} of container #{container}")
            }
        }
    }
}

/// Errors raised while building a [`Model`](crate::model::Model).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The same id appears twice, in any combination of container ids and
    /// item ids.
    #[error("duplicate id {id:?}: used by {first} and {second}")]
    DuplicateId {
        id: String,
        first: Place,
        second: Place,
    },
}
