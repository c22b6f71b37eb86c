// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property resolution against a type's schema.

use kurbo::Point;
use log::trace;
use serde_json::Value;

use crate::{BuildError, BuildResult, Props, Spec, TypeDefinition};

/// A property bag after defaulting, required checks and validation.
///
/// Declared properties and pass-through keys are kept apart so the declared contract stays
/// checkable while undeclared keys still reach the implementation untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedProps {
    declared: Props,
    extra: Props,
}

impl ResolvedProps {
    /// Creates a bag from its two halves.
    pub fn new(declared: Props, extra: Props) -> Self {
        Self { declared, extra }
    }

    /// Treats every key of `props` as a pass-through key.
    pub fn undeclared(props: Props) -> Self {
        Self::new(Props::new(), props)
    }

    /// Looks a property up among the declared keys, then the pass-through keys.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.declared.get(name).or_else(|| self.extra.get(name))
    }

    /// Whether the property is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Declared properties.
    pub fn declared(&self) -> &Props {
        &self.declared
    }

    /// Undeclared pass-through keys.
    pub fn extra(&self) -> &Props {
        &self.extra
    }

    /// Overwrites a property in this bag only.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        if self.declared.contains_key(&name) {
            self.declared.insert(name, value.into());
        } else {
            self.extra.insert(name, value.into());
        }
    }

    /// Both halves merged into one bag.
    pub fn to_map(&self) -> Props {
        let mut map = self.extra.clone();
        map.extend(self.declared.iter().map(|(k, v)| (k.clone(), v.clone())));
        map
    }

    /// Turns the bag back into a spec of the given type.
    pub fn into_spec(self, type_name: impl Into<String>) -> Spec {
        let Self {
            mut declared,
            extra,
        } = self;
        for (k, v) in extra {
            declared.entry(k).or_insert(v);
        }
        Spec::with_props(type_name, declared)
    }

    /// A required number.
    pub fn number(&self, name: &str) -> BuildResult<f64> {
        self.number_opt(name)?
            .ok_or_else(|| BuildError::validation(name, "expected a number"))
    }

    /// A number, or `None` when the property is absent or null.
    pub fn number_opt(&self, name: &str) -> BuildResult<Option<f64>> {
        match self.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => v
                .as_f64()
                .map(Some)
                .ok_or_else(|| BuildError::validation(name, "expected a number")),
        }
    }

    /// A boolean, or `fallback` when absent.
    pub fn flag(&self, name: &str, fallback: bool) -> BuildResult<bool> {
        match self.get(name) {
            None | Some(Value::Null) => Ok(fallback),
            Some(v) => v
                .as_bool()
                .ok_or_else(|| BuildError::validation(name, "expected a boolean")),
        }
    }

    /// A required string.
    pub fn text(&self, name: &str) -> BuildResult<&str> {
        self.get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| BuildError::validation(name, "expected a string"))
    }

    /// A `[a, b]` pair of numbers.
    pub fn pair(&self, name: &str) -> BuildResult<(f64, f64)> {
        let [a, b] = self.numbers::<2>(name)?;
        Ok((a, b))
    }

    /// An `[x, y]` point, or `None` when absent.
    pub fn point_opt(&self, name: &str) -> BuildResult<Option<Point>> {
        match self.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => {
                let [x, y] = self.numbers::<2>(name)?;
                Ok(Some(Point::new(x, y)))
            }
        }
    }

    /// An array of exactly `N` numbers.
    pub fn numbers<const N: usize>(&self, name: &str) -> BuildResult<[f64; N]> {
        numbers_from(name, self.get(name))
    }
}

pub(crate) fn numbers_from<const N: usize>(
    name: &str,
    value: Option<&Value>,
) -> BuildResult<[f64; N]> {
    let invalid = || BuildError::validation(name, format!("expected an array of {N} numbers"));
    let items = value.and_then(Value::as_array).ok_or_else(invalid)?;
    if items.len() != N {
        return Err(invalid());
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = item.as_f64().ok_or_else(invalid)?;
    }
    Ok(out)
}

/// Resolves `raw` against `def`'s schema.
///
/// 1. Every declared property takes its supplied value (after its validator passes), else its
///    default, else fails with [`BuildError::MissingRequiredProperty`] when required.
/// 2. Undeclared keys pass through unchanged.
/// 3. The definition's own validator sees the finished bag.
///
/// Validator errors propagate unchanged.
pub fn resolve(def: &TypeDefinition, raw: &Props) -> BuildResult<ResolvedProps> {
    let mut declared = Props::new();
    for (name, prop) in def.properties() {
        if let Some(value) = raw.get(name) {
            prop.check(value)?;
            declared.insert(name.to_owned(), value.clone());
        } else if let Some(default) = prop.default_value() {
            trace!("{}: defaulting `{name}`", def.name());
            declared.insert(name.to_owned(), default.clone());
        } else if prop.is_required() {
            return Err(BuildError::MissingRequiredProperty {
                type_name: def.name().to_owned(),
                property: name.to_owned(),
            });
        }
    }

    let extra: Props = raw
        .iter()
        .filter(|(k, _)| !def.declares(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if !extra.is_empty() {
        trace!("{}: passing through {} undeclared keys", def.name(), extra.len());
    }

    let resolved = ResolvedProps::new(declared, extra);
    if let Some(validate) = def.schema_validator() {
        validate(&resolved)?;
    }
    Ok(resolved)
}
