// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type definitions: a property schema plus the implementation that builds the type.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::{BuildResult, CoordinateSystem, RenderableVisualization, ResolvedProps, Scale, Spec};

/// Validates a single property value.
pub type PropertyValidator = Arc<dyn Fn(&Value) -> BuildResult<()> + Send + Sync>;

/// Validates a fully resolved property bag.
pub type SchemaValidator = Arc<dyn Fn(&ResolvedProps) -> BuildResult<()> + Send + Sync>;

/// Builds a type from its resolved properties.
pub type Implementation = Arc<dyn Fn(&ResolvedProps) -> BuildResult<BuildOutput> + Send + Sync>;

/// Schema entry for one declared property.
#[derive(Clone, Default)]
pub struct PropertyDef {
    required: bool,
    default: Option<Value>,
    validate: Option<PropertyValidator>,
}

impl fmt::Debug for PropertyDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDef")
            .field("required", &self.required)
            .field("default", &self.default)
            .field("validate", &self.validate.is_some())
            .finish()
    }
}

impl PropertyDef {
    /// A property that must be supplied unless it has a default.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// A property that may be omitted.
    pub fn optional() -> Self {
        Self::default()
    }

    /// Sets the value used when the property is omitted.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets a validator run on supplied values (defaults are trusted).
    #[must_use]
    pub fn with_validator(
        mut self,
        validate: impl Fn(&Value) -> BuildResult<()> + Send + Sync + 'static,
    ) -> Self {
        self.validate = Some(Arc::new(validate));
        self
    }

    /// Whether the property is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The default value, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Runs the validator, if any.
    pub fn check(&self, value: &Value) -> BuildResult<()> {
        match &self.validate {
            Some(validate) => validate(value),
            None => Ok(()),
        }
    }
}

/// A registered visualization type.
#[derive(Clone)]
pub struct TypeDefinition {
    name: String,
    properties: Vec<(String, PropertyDef)>,
    validate: Option<SchemaValidator>,
    implementation: Implementation,
    data_transformation: bool,
}

impl fmt::Debug for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDefinition")
            .field("name", &self.name)
            .field("properties", &self.properties)
            .field("validate", &self.validate.is_some())
            .field("data_transformation", &self.data_transformation)
            .finish_non_exhaustive()
    }
}

impl TypeDefinition {
    /// Creates a definition with an empty schema.
    pub fn new(
        name: impl Into<String>,
        implementation: impl Fn(&ResolvedProps) -> BuildResult<BuildOutput> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            validate: None,
            implementation: Arc::new(implementation),
            data_transformation: false,
        }
    }

    /// Declares a property. Declaration order is kept.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, def: PropertyDef) -> Self {
        self.properties.push((name.into(), def));
        self
    }

    /// Sets a validator run on the fully resolved bag.
    #[must_use]
    pub fn validate(
        mut self,
        validate: impl Fn(&ResolvedProps) -> BuildResult<()> + Send + Sync + 'static,
    ) -> Self {
        self.validate = Some(Arc::new(validate));
        self
    }

    /// Marks the type as a data transformation (it computes a value instead of drawing).
    #[must_use]
    pub fn data_transformation(mut self, flag: bool) -> Self {
        self.data_transformation = flag;
        self
    }

    /// The type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared properties, in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyDef)> {
        self.properties.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// Looks up a declared property.
    pub fn property_def(&self, name: &str) -> Option<&PropertyDef> {
        self.properties
            .iter()
            .find_map(|(n, def)| (n == name).then_some(def))
    }

    /// Whether `name` is declared.
    pub fn declares(&self, name: &str) -> bool {
        self.property_def(name).is_some()
    }

    /// Whether the type is a data transformation.
    pub fn is_data_transformation(&self) -> bool {
        self.data_transformation
    }

    pub(crate) fn schema_validator(&self) -> Option<&SchemaValidator> {
        self.validate.as_ref()
    }

    /// Runs the implementation.
    pub fn implement(&self, props: &ResolvedProps) -> BuildResult<BuildOutput> {
        (self.implementation)(props)
    }
}

/// What an implementation hands back to the builder.
#[derive(Debug)]
pub enum BuildOutput {
    /// A finished node.
    Renderable(RenderableVisualization),
    /// Another spec to build in this one's place.
    Spec(Spec),
    /// A computed value, returned to the caller as is.
    Value(Computed),
}

impl From<RenderableVisualization> for BuildOutput {
    fn from(node: RenderableVisualization) -> Self {
        Self::Renderable(node)
    }
}

impl From<Spec> for BuildOutput {
    fn from(spec: Spec) -> Self {
        Self::Spec(spec)
    }
}

impl From<Computed> for BuildOutput {
    fn from(value: Computed) -> Self {
        Self::Value(value)
    }
}

impl From<Value> for BuildOutput {
    fn from(value: Value) -> Self {
        Self::Value(Computed::Json(value))
    }
}

impl From<Scale> for BuildOutput {
    fn from(scale: Scale) -> Self {
        Self::Value(Computed::Scale(scale))
    }
}

impl From<CoordinateSystem> for BuildOutput {
    fn from(coords: CoordinateSystem) -> Self {
        Self::Value(Computed::Coordinates(coords))
    }
}

/// A non-renderable build result.
#[derive(Clone)]
pub enum Computed {
    /// Plain data.
    Json(Value),
    /// A scale built by the factory.
    Scale(Scale),
    /// A coordinate system.
    Coordinates(CoordinateSystem),
    /// Anything else a collaborator wants to hand back.
    Other(Arc<dyn Any + Send + Sync>),
}

impl fmt::Debug for Computed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(v) => f.debug_tuple("Json").field(v).finish(),
            Self::Scale(s) => f.debug_tuple("Scale").field(s).finish(),
            Self::Coordinates(c) => f.debug_tuple("Coordinates").field(c).finish(),
            Self::Other(_) => f.write_str("Other(..)"),
        }
    }
}

impl Computed {
    /// Returns the JSON value, if that is what this is.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the scale, if that is what this is.
    pub fn as_scale(&self) -> Option<&Scale> {
        match self {
            Self::Scale(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the coordinate system, if that is what this is.
    pub fn as_coordinates(&self) -> Option<&CoordinateSystem> {
        match self {
            Self::Coordinates(c) => Some(c),
            _ => None,
        }
    }

    /// Downcasts an [`Computed::Other`] payload.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Other(any) => any.downcast_ref(),
            _ => None,
        }
    }
}

impl From<Value> for Computed {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<Scale> for Computed {
    fn from(scale: Scale) -> Self {
        Self::Scale(scale)
    }
}

impl From<CoordinateSystem> for Computed {
    fn from(coords: CoordinateSystem) -> Self {
        Self::Coordinates(coords)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn schema_keeps_declaration_order() {
        let def = TypeDefinition::new("axis", |_| Ok(json!(null).into()))
            .property("scale", PropertyDef::required())
            .property("ticks", PropertyDef::optional().with_default(5))
            .property("orient", PropertyDef::optional());
        let names: Vec<_> = def.properties().map(|(n, _)| n).collect();
        assert_eq!(names, ["scale", "ticks", "orient"]);
        assert!(def.declares("ticks"));
        assert!(!def.declares("label"));
        assert_eq!(
            def.property_def("ticks").and_then(PropertyDef::default_value),
            Some(&json!(5))
        );
    }

    #[test]
    fn property_validators_run_on_check() {
        let def = PropertyDef::required().with_validator(|v| {
            if v.is_number() {
                Ok(())
            } else {
                Err(crate::BuildError::validation("width", "expected a number"))
            }
        });
        assert!(def.is_required());
        assert!(def.check(&json!(3)).is_ok());
        assert!(def.check(&json!("3")).is_err());
    }

    #[test]
    fn computed_accessors_match_variants() {
        let value = Computed::from(json!([1, 2]));
        assert_eq!(value.as_json(), Some(&json!([1, 2])));
        assert!(value.as_scale().is_none());

        let other = Computed::Other(Arc::new(42_u32));
        assert_eq!(other.downcast_ref::<u32>(), Some(&42));
        assert!(other.downcast_ref::<i64>().is_none());
    }
}
