// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The type registry.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use log::{debug, warn};

use crate::{BuildError, BuildResult, TypeDefinition, builtin};

/// Maps type names to their definitions.
///
/// A registry is an ordinary value: build sessions and tests each own one, so nothing is shared
/// between them implicitly. Registering a name twice replaces the earlier definition.
#[derive(Clone, Default)]
pub struct Registry {
    types: HashMap<String, Arc<TypeDefinition>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.type_names())
            .finish()
    }
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in computational types (`scale`, `cartesian2d`,
    /// `polar`, `cartesian3d`, `spherical`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for def in builtin::definitions() {
            registry.insert(def);
        }
        registry
    }

    /// Registers `def` under its name, replacing any earlier definition of that name.
    ///
    /// Fails with [`BuildError::InvalidTypeDefinition`] when the name is empty or contains
    /// whitespace, or when the schema declares a property twice.
    pub fn register(&mut self, def: TypeDefinition) -> BuildResult<()> {
        let name = def.name();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(BuildError::InvalidTypeDefinition(format!(
                "type name `{name}` must be non-empty and contain no whitespace"
            )));
        }
        let mut seen: Vec<&str> = Vec::new();
        for (prop, _) in def.properties() {
            if prop.is_empty() {
                return Err(BuildError::InvalidTypeDefinition(format!(
                    "type `{name}` declares a property with an empty name"
                )));
            }
            if seen.contains(&prop) {
                return Err(BuildError::InvalidTypeDefinition(format!(
                    "type `{name}` declares property `{prop}` twice"
                )));
            }
            seen.push(prop);
        }
        self.insert(def);
        Ok(())
    }

    fn insert(&mut self, def: TypeDefinition) {
        let name = def.name().to_owned();
        if self.types.insert(name.clone(), Arc::new(def)).is_some() {
            warn!("type `{name}` re-registered; the earlier definition is replaced");
        } else {
            debug!("registered type `{name}`");
        }
    }

    /// Looks a definition up by name.
    pub fn get(&self, name: &str) -> Option<&Arc<TypeDefinition>> {
        self.types.get(name)
    }

    /// Whether `name` is registered.
    pub fn has(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Removes every definition.
    pub fn reset(&mut self) {
        debug!("registry reset ({} types dropped)", self.types.len());
        self.types.clear();
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{BuildOutput, Computed, PropertyDef};

    fn marker(name: &str, tag: i64) -> TypeDefinition {
        TypeDefinition::new(name, move |_| Ok(json!(tag).into()))
    }

    #[test]
    fn register_get_has_reset() {
        let mut r = Registry::new();
        assert!(r.is_empty());
        r.register(marker("rect", 1)).unwrap();
        r.register(marker("circle", 2)).unwrap();
        assert!(r.has("rect"));
        assert!(!r.has("path"));
        assert_eq!(r.get("circle").map(|d| d.name()), Some("circle"));
        assert_eq!(r.type_names(), ["circle", "rect"]);
        r.reset();
        assert!(r.is_empty());
        assert!(r.get("rect").is_none());
    }

    #[test]
    fn later_registration_replaces_without_merging() {
        let mut r = Registry::new();
        r.register(marker("rect", 1).property("fill", PropertyDef::optional()))
            .unwrap();
        r.register(marker("rect", 2)).unwrap();
        assert_eq!(r.len(), 1);
        let def = r.get("rect").unwrap();
        assert!(!def.declares("fill"));
        match def.implement(&Default::default()).unwrap() {
            BuildOutput::Value(Computed::Json(v)) => assert_eq!(v, json!(2)),
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn invalid_definitions_are_rejected() {
        let mut r = Registry::new();
        for name in ["", "bar chart", " "] {
            assert!(matches!(
                r.register(marker(name, 0)),
                Err(BuildError::InvalidTypeDefinition(_))
            ));
        }
        let dup = marker("text", 0)
            .property("x", PropertyDef::required())
            .property("x", PropertyDef::optional());
        assert!(matches!(
            r.register(dup),
            Err(BuildError::InvalidTypeDefinition(msg)) if msg.contains("`x` twice")
        ));
        assert!(r.is_empty());
    }

    #[test]
    fn builtins_are_preloaded() {
        let r = Registry::with_builtins();
        for name in ["scale", "cartesian2d", "polar", "cartesian3d", "spherical"] {
            assert!(r.has(name), "{name} should be built in");
        }
        assert!(r.get("scale").unwrap().is_data_transformation());
    }
}
