#![forbid(unsafe_code)]

//! Core: the drag-reorder model and state machine for sortable containers.
//!
//! # Role in Sortables
//! `sortables-core` owns everything with real logic: the arrangement of
//! containers and items, the locator that resolves ids, the structural
//! equality check that suppresses redundant commits, and the state machine
//! that applies drag lifecycle events. It performs no I/O.
//!
//! # Primary responsibilities
//! - **Model**: ordered containers of ordered, globally unique item ids.
//! - **DragState**: `Idle`/`Dragging` transitions with rollback snapshots.
//! - **Equality**: deep comparison of model snapshots.
//! - **Sensors**: pointer, touch, and keyboard activation constraints that
//!   turn raw input into drag events.
//!
//! # How it fits in the system
//! `sortables-bridge` feeds host configuration into a [`Model`], routes input
//! through [`Sensors`] into [`DragState`], and reports
//! [`Transition::Committed`] models back to the host.

pub mod drag;
pub mod equality;
pub mod error;
pub mod model;
pub mod sensor;

pub use drag::{DragEvent, DragSession, DragState, IgnoreReason, Phase, Transition};
pub use equality::{Difference, first_difference, structurally_equal};
pub use error::{ModelError, Place};
pub use model::{Container, Model};
pub use sensor::{Axis, Input, Key, Point, PointerKind, SensorConfig, Sensors};
