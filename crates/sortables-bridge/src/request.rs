#![forbid(unsafe_code)]

//! Host-side convenience shape for sortable requests.
//!
//! Hosts may ask for a single flat list (optionally with a header) or for
//! several containers. [`SortRequest`] wraps either form into
//! [`SortableArgs`], and [`SortRequest::output`] unwraps the widget's value
//! back into the shape the caller passed in.

use serde::Deserialize;
use serde_json::Value;

use crate::config::{ContainerDescription, Direction, SortableArgs};
use crate::error::ConfigError;

/// What the caller asked to sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortRequest {
    /// One container of plain items.
    Single {
        header: Option<String>,
        items: Vec<String>,
    },
    /// Several containers.
    Multi(Vec<ContainerDescription>),
}

/// The sorted result, in the same shape as the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOutput {
    Single(Vec<String>),
    Multi(Vec<ContainerDescription>),
}

impl SortRequest {
    /// A single unlabeled container.
    #[must_use]
    pub fn single<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Single {
            header: None,
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Several containers.
    #[must_use]
    pub fn multi(containers: Vec<ContainerDescription>) -> Self {
        Self::Multi(containers)
    }

    /// Label a single-container request. No effect on multi requests.
    #[must_use]
    pub fn with_header(mut self, label: impl Into<String>) -> Self {
        if let Self::Single { header, .. } = &mut self {
            *header = Some(label.into());
        }
        self
    }

    /// Validate untyped host input.
    ///
    /// With `multi_containers` false, `items` must be an array of strings and
    /// `header` a string or null. With it true, `items` must be an array of
    /// container objects.
    pub fn from_json(
        items: &Value,
        header: Option<&Value>,
        multi_containers: bool,
    ) -> Result<Self, ConfigError> {
        let Value::Array(entries) = items else {
            return Err(if multi_containers {
                ConfigError::ItemsNotContainers
            } else {
                ConfigError::ItemsNotStrings
            });
        };

        if multi_containers {
            if !entries.iter().all(Value::is_object) {
                return Err(ConfigError::ItemsNotContainers);
            }
            let containers = entries
                .iter()
                .enumerate()
                .map(|(index, entry)| {
                    ContainerDescription::deserialize(entry)
                        .map_err(|source| ConfigError::InvalidContainer { index, source })
                })
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Self::Multi(containers));
        }

        let header = match header {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(ConfigError::HeaderNotString),
        };
        let items = entries
            .iter()
            .map(|entry| entry.as_str().map(str::to_owned))
            .collect::<Option<Vec<_>>>()
            .ok_or(ConfigError::ItemsNotStrings)?;
        Ok(Self::Single { header, items })
    }

    /// Whether this is a multi-container request.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }

    /// The containers this request describes.
    #[must_use]
    pub fn containers(&self) -> Vec<ContainerDescription> {
        match self {
            Self::Single { header, items } => vec![ContainerDescription {
                header: header.clone(),
                items: items.clone(),
            }],
            Self::Multi(containers) => containers.clone(),
        }
    }

    /// Widget arguments for this request.
    #[must_use]
    pub fn to_args(&self, direction: Direction, custom_style: Option<String>) -> SortableArgs {
        SortableArgs {
            direction,
            custom_style,
            ..SortableArgs::new(self.containers())
        }
    }

    /// Unwrap a widget value into the request's shape.
    ///
    /// A single request yields the first container's items (empty if the
    /// value holds no containers).
    #[must_use]
    pub fn output(&self, value: Vec<ContainerDescription>) -> SortOutput {
        match self {
            Self::Single { .. } => SortOutput::Single(
                value
                    .into_iter()
                    .next()
                    .map(|container| container.items)
                    .unwrap_or_default(),
            ),
            Self::Multi(_) => SortOutput::Multi(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn single_list_wraps_into_one_container() {
        let request = SortRequest::from_json(&json!(["a", "b"]), None, false).unwrap();
        assert_eq!(request, SortRequest::single(["a", "b"]));
        assert_eq!(
            request.containers(),
            [ContainerDescription::new(None, ["a", "b"])]
        );
    }

    #[test]
    fn single_with_header() {
        let request = SortRequest::from_json(&json!(["a"]), Some(&json!("todo")), false).unwrap();
        assert_eq!(request, SortRequest::single(["a"]).with_header("todo"));
    }

    #[test]
    fn single_rejects_non_string_header() {
        let err = SortRequest::from_json(&json!(["a"]), Some(&json!(3)), false).unwrap_err();
        assert!(matches!(err, ConfigError::HeaderNotString));
    }

    #[test]
    fn single_rejects_non_string_items() {
        let err = SortRequest::from_json(&json!(["a", {"header": "x"}]), None, false).unwrap_err();
        assert!(matches!(err, ConfigError::ItemsNotStrings));
    }

    #[test]
    fn multi_rejects_plain_strings() {
        let err = SortRequest::from_json(&json!(["a"]), None, true).unwrap_err();
        assert!(matches!(err, ConfigError::ItemsNotContainers));
    }

    #[test]
    fn multi_reports_malformed_container() {
        let err = SortRequest::from_json(&json!([{"header": "A", "items": [1]}]), None, true)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidContainer { index: 0, .. }
        ));
    }

    #[test]
    fn multi_parses_containers() {
        let request = SortRequest::from_json(
            &json!([
                {"header": "container1", "items": ["item3", "item1"]},
                {"header": "container2", "items": ["item6"]}
            ]),
            None,
            true,
        )
        .unwrap();
        assert!(request.is_multi());
        assert_eq!(request.containers().len(), 2);
    }

    #[test]
    fn output_unwraps_single() {
        let request = SortRequest::single(["a", "b"]);
        let value = vec![ContainerDescription::new(None, ["b", "a"])];
        assert_eq!(
            request.output(value),
            SortOutput::Single(vec!["b".into(), "a".into()])
        );
    }

    #[test]
    fn output_keeps_multi() {
        let containers = vec![ContainerDescription::new(Some("A"), ["1"])];
        let request = SortRequest::multi(containers.clone());
        assert_eq!(
            request.output(containers.clone()),
            SortOutput::Multi(containers)
        );
    }

    #[test]
    fn to_args_carries_options() {
        let args = SortRequest::single(["a"]).to_args(Direction::Vertical, Some("css".into()));
        assert_eq!(args.direction, Direction::Vertical);
        assert_eq!(args.custom_style.as_deref(), Some("css"));
        assert_eq!(args.items.len(), 1);
    }
}
