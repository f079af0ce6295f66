#![forbid(unsafe_code)]

//! Host bridge for sortable containers.
//!
//! # Role in Sortables
//! `sortables-bridge` is the seam between the drag core and whatever embeds
//! it. It parses and validates the host's arguments, drives a
//! [`SortableWidget`] from raw input, and reports committed arrangements and
//! layout hints through a [`HostBridge`].
//!
//! # Primary responsibilities
//! - **SortableArgs**: the inbound configuration, camelCase on the wire.
//! - **SortRequest**: single-list and multi-container convenience forms.
//! - **HostBridge**: the injected host interface, with an in-memory
//!   [`RecordingBridge`] and a line-delimited [`JsonLinesBridge`].
//! - **SortableView**: class names and style overrides for rendering layers.

pub mod config;
pub mod error;
pub mod host;
pub mod request;
pub mod view;
pub mod widget;
pub mod wire;

pub use config::{ContainerDescription, Direction, SortableArgs};
pub use error::{BridgeError, ConfigError, Result};
pub use host::{HostBridge, RecordingBridge};
pub use request::{SortOutput, SortRequest};
pub use view::{
    BODY_CLASS, CONTAINER_CLASS, ContainerView, HEADER_CLASS, HeaderView, ITEM_CLASS, ItemView,
    SortableView,
};
pub use widget::SortableWidget;
pub use wire::{JsonLinesBridge, OutboundMessage};
