#![forbid(unsafe_code)]

//! Inbound widget configuration.
//!
//! [`SortableArgs`] is what the host hands the widget at mount and on every
//! reset. Only `items` affects the drag logic; `direction`, `customStyle`, and
//! `inLineStyles` are carried for rendering layers.
//!
//! ```json
//! {
//!   "items": [
//!     { "header": "todo", "items": ["a", "b"] },
//!     { "header": "done", "items": ["c"] }
//!   ],
//!   "direction": "vertical"
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sortables_core::{Axis, Container, Model};

use crate::error::ConfigError;

/// How items flow inside each container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Horizontal,
    Vertical,
}

impl Direction {
    /// Class-name suffix used by rendering layers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl From<Direction> for Axis {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Horizontal => Axis::Horizontal,
            Direction::Vertical => Axis::Vertical,
        }
    }
}

/// One container as the host describes it.
///
/// A `null` or missing header is an unlabeled container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContainerDescription {
    #[serde(default)]
    pub header: Option<String>,
    pub items: Vec<String>,
}

impl ContainerDescription {
    /// Create a description.
    #[must_use]
    pub fn new<I, S>(header: Option<&str>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.map(str::to_owned),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Arguments the host passes to the widget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortableArgs {
    /// The arrangement to display.
    pub items: Vec<ContainerDescription>,

    /// Item flow direction (rendering and keyboard navigation only).
    #[serde(default)]
    pub direction: Direction,

    /// Extra CSS supplied by the host (rendering only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_style: Option<String>,

    /// Per-class inline style objects (rendering only).
    #[serde(
        default,
        rename = "inLineStyles",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub inline_styles: BTreeMap<String, serde_json::Value>,

    /// Widget identity; a new key means a fresh widget on the host side.
    /// Hosts may use any JSON value here; only equality matters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<serde_json::Value>,
}

impl SortableArgs {
    /// Arguments displaying `items` with default options.
    #[must_use]
    pub fn new(items: Vec<ContainerDescription>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Set the direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the custom CSS.
    #[must_use]
    pub fn with_custom_style(mut self, css: impl Into<String>) -> Self {
        self.custom_style = Some(css.into());
        self
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Build the drag model, enforcing id uniqueness.
    pub fn to_model(&self) -> Result<Model, ConfigError> {
        let containers = self
            .items
            .iter()
            .map(|desc| {
                Container::new(desc.header.clone().unwrap_or_default(), desc.items.clone())
            })
            .collect();
        Ok(Model::new(containers)?)
    }

    /// Describe `model` in the host's shape.
    ///
    /// Headers are taken from the inbound arguments so a `null` header stays
    /// `null` on the way back; container order never changes, so the two zip
    /// one-to-one.
    #[must_use]
    pub fn describe(&self, model: &Model) -> Vec<ContainerDescription> {
        model
            .containers()
            .iter()
            .enumerate()
            .map(|(index, container)| ContainerDescription {
                header: match self.items.get(index) {
                    Some(inbound) => inbound.header.clone(),
                    None => container.is_labeled().then(|| container.id().to_owned()),
                },
                items: container.items().to_vec(),
            })
            .collect()
    }

    /// Inline style override for a class name, if configured.
    #[must_use]
    pub fn style_for(&self, class_name: &str) -> Option<&serde_json::Value> {
        self.inline_styles.get(class_name)
    }
}
