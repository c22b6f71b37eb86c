// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative specifications: a type name plus an open property bag.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{BuildError, BuildResult};

/// An open key/value property bag.
pub type Props = serde_json::Map<String, Value>;

/// A declarative description of a visualization: `{ "type": ..., ...props }`.
///
/// ```
/// use vizspec_core::Spec;
///
/// let spec: Spec = serde_json::from_str(r#"{ "type": "bar", "width": 300 }"#).unwrap();
/// assert_eq!(spec.type_name, "bar");
/// assert_eq!(spec.get("width"), Some(&300.into()));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    /// Name of the registered type that builds this spec.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Every other key.
    #[serde(flatten)]
    pub props: Props,
}

impl Spec {
    /// Creates a spec with no properties.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            props: Props::new(),
        }
    }

    /// Creates a spec from a type name and an existing bag.
    pub fn with_props(type_name: impl Into<String>, props: Props) -> Self {
        Self {
            type_name: type_name.into(),
            props,
        }
    }

    /// Sets a property, returning the updated spec.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Returns a property.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// Converts the spec back into a single JSON object.
    pub fn to_value(&self) -> Value {
        let mut map = self.props.clone();
        map.insert("type".into(), Value::String(self.type_name.clone()));
        Value::Object(map)
    }
}

impl TryFrom<Value> for Spec {
    type Error = BuildError;

    /// Splits a JSON object into its `type` and the remaining properties.
    ///
    /// Anything that is not an object with a string `type` is an [`BuildError::UnknownType`].
    fn try_from(value: Value) -> BuildResult<Self> {
        let Value::Object(mut props) = value else {
            return Err(BuildError::UnknownType(String::new()));
        };
        match props.remove("type") {
            Some(Value::String(type_name)) => Ok(Self { type_name, props }),
            Some(other) => Err(BuildError::UnknownType(other.to_string())),
            None => Err(BuildError::UnknownType(String::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn type_key_is_split_from_the_bag() {
        let spec = Spec::try_from(json!({ "type": "line", "series": [1, 2], "color": "red" }))
            .unwrap();
        assert_eq!(spec.type_name, "line");
        assert_eq!(spec.props.len(), 2);
        assert!(spec.get("type").is_none());
        assert_eq!(spec.to_value()["type"], "line");
    }

    #[test]
    fn missing_or_non_string_type_is_unknown() {
        assert!(matches!(
            Spec::try_from(json!({ "width": 10 })),
            Err(BuildError::UnknownType(name)) if name.is_empty()
        ));
        assert!(matches!(
            Spec::try_from(json!({ "type": 3 })),
            Err(BuildError::UnknownType(name)) if name == "3"
        ));
        assert!(matches!(
            Spec::try_from(json!([1, 2])),
            Err(BuildError::UnknownType(_))
        ));
    }

    #[test]
    fn serde_round_trip_keeps_extra_keys() {
        let spec = Spec::new("scatter").with("radius", 3).with("label", "pts");
        let text = serde_json::to_string(&spec).unwrap();
        let back: Spec = serde_json::from_str(&text).unwrap();
        assert_eq!(back, spec);
    }
}
