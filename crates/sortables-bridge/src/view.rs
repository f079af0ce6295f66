#![forbid(unsafe_code)]

//! Render-agnostic description of the widget tree.
//!
//! A rendering layer walks a [`SortableView`] and draws it however it likes.
//! Class names match the stylesheet hosts already target, and each node
//! carries the `inLineStyles` entry for its class when one is configured.
//!
//! ```text
//! sortable-component <direction>
//! └── sortable-container            (one per container)
//!     ├── container-header          (labeled containers only)
//!     └── container-body
//!         └── sortable-item [active] [dragging]
//! ```
//!
//! # Invariants
//!
//! - Containers and items appear in model order.
//! - At most one item is marked `active`, and only while a drag is in
//!   progress; the same item is the drag overlay.

use serde::Serialize;
use serde_json::Value;
use sortables_core::Model;

use crate::config::{Direction, SortableArgs};

/// Base class of every item node.
pub const ITEM_CLASS: &str = "btn shadow-none sortable-item";
/// Class of a container node.
pub const CONTAINER_CLASS: &str = "sortable-container";
/// Class of a container's label.
pub const HEADER_CLASS: &str = "container-header";
/// Class of the node wrapping a container's items.
pub const BODY_CLASS: &str = "container-body";

/// The whole widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortableView {
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
    pub direction: Direction,
    pub containers: Vec<ContainerView>,
    /// The item following the pointer during a drag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<ItemView>,
}

/// One container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerView {
    pub class_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
    pub body_class_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_style: Option<Value>,
    pub items: Vec<ItemView>,
}

/// A container label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderView {
    pub class_name: &'static str,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
}

/// One item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    pub id: String,
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
    pub active: bool,
    pub dragging: bool,
    /// Reduced opacity for the in-list placeholder of a dragged item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    pub cursor: &'static str,
}

impl ItemView {
    fn new(id: &str, style: Option<Value>, dragging: bool) -> Self {
        let mut class_name = String::from(ITEM_CLASS);
        if dragging {
            class_name.push_str(" active dragging");
        }
        Self {
            id: id.to_owned(),
            class_name,
            style,
            active: dragging,
            dragging,
            opacity: dragging.then_some(0.5),
            cursor: if dragging { "grabbing" } else { "grab" },
        }
    }
}

impl SortableView {
    /// Describe `model` as configured by `args`, with `active` being dragged.
    #[must_use]
    pub fn build(model: &Model, args: &SortableArgs, active: Option<&str>) -> Self {
        let class_name = format!("sortable-component {}", args.direction.as_str());
        let item_style = args.style_for("sortable-item").cloned();

        let containers = model
            .containers()
            .iter()
            .map(|container| ContainerView {
                class_name: CONTAINER_CLASS,
                header: container.is_labeled().then(|| HeaderView {
                    class_name: HEADER_CLASS,
                    text: container.id().to_owned(),
                    style: args.style_for(HEADER_CLASS).cloned(),
                }),
                style: args.style_for(CONTAINER_CLASS).cloned(),
                body_class_name: BODY_CLASS,
                body_style: args.style_for(BODY_CLASS).cloned(),
                items: container
                    .items()
                    .iter()
                    .map(|item| {
                        ItemView::new(item, item_style.clone(), active == Some(item.as_str()))
                    })
                    .collect(),
            })
            .collect();

        let overlay = active
            .filter(|item| model.position_of(item).is_some())
            .map(|item| ItemView::new(item, None, false));

        Self {
            style: args.style_for(&class_name).cloned(),
            class_name,
            direction: args.direction,
            containers,
            overlay,
        }
    }

    /// Number of item nodes, overlay excluded.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.containers.iter().map(|c| c.items.len()).sum()
    }
}
