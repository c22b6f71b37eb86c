// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The builder: turns a spec into a renderable node or a computed value.

use std::sync::Arc;

use log::debug;
use serde_json::Value;
use smallvec::SmallVec;

use crate::resolve::resolve;
use crate::{
    BuildError, BuildOutput, BuildResult, Computed, Registry, RenderableVisualization,
    ResolvedProps, Spec, TypeDefinition,
};

/// Builder configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Maximum number of delegations (an implementation returning another spec) per build.
    pub max_depth: usize,
    /// Fail as soon as a `(type, resolved properties)` pair repeats within one build.
    pub detect_cycles: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_depth: 64,
            detect_cycles: true,
        }
    }
}

impl BuildOptions {
    /// Sets the delegation limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enables or disables repeated-frame detection. The depth limit always applies.
    #[must_use]
    pub fn with_cycle_detection(mut self, detect_cycles: bool) -> Self {
        self.detect_cycles = detect_cycles;
        self
    }
}

/// The result of a build.
#[derive(Debug)]
pub enum Built {
    /// A node ready to render.
    Renderable(RenderableVisualization),
    /// A computed value, such as a scale or a coordinate system.
    Value(Computed),
}

impl Built {
    /// The node, if the build produced one.
    pub fn as_renderable(&self) -> Option<&RenderableVisualization> {
        match self {
            Self::Renderable(node) => Some(node),
            Self::Value(_) => None,
        }
    }

    /// The node, if the build produced one.
    pub fn into_renderable(self) -> Option<RenderableVisualization> {
        match self {
            Self::Renderable(node) => Some(node),
            Self::Value(_) => None,
        }
    }

    /// The computed value, if the build produced one.
    pub fn as_value(&self) -> Option<&Computed> {
        match self {
            Self::Value(value) => Some(value),
            Self::Renderable(_) => None,
        }
    }

    /// The computed value, if the build produced one.
    pub fn into_value(self) -> Option<Computed> {
        match self {
            Self::Value(value) => Some(value),
            Self::Renderable(_) => None,
        }
    }
}

type Frames = SmallVec<[(String, String); 8]>;

/// Builds specs against a registry.
///
/// A build looks the spec's type up, resolves its properties and runs the implementation. When
/// the implementation hands back another spec, that spec is built in its place, so composite
/// types can delegate to simpler ones. Delegation runs in a loop rather than by recursion and is
/// bounded by [`BuildOptions`].
///
/// Errors from resolution, validators and implementations are returned unchanged.
#[derive(Clone, Copy, Debug)]
pub struct Builder<'r> {
    registry: &'r Registry,
    options: BuildOptions,
}

impl<'r> Builder<'r> {
    /// Creates a builder with default options.
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            options: BuildOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// The current options.
    pub fn options(&self) -> BuildOptions {
        self.options
    }

    /// The registry types are looked up in.
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Builds `spec`.
    pub fn build(&self, spec: &Spec) -> BuildResult<Built> {
        let mut frames = Frames::new();
        let mut current = spec.clone();
        loop {
            let def = self
                .registry
                .get(&current.type_name)
                .ok_or_else(|| BuildError::UnknownType(current.type_name.clone()))?;
            let props = resolve(def, &current.props)?;

            let depth = frames.len();
            if depth > self.options.max_depth {
                return Err(BuildError::CyclicBuild {
                    type_name: current.type_name,
                    depth,
                });
            }
            let fingerprint = Value::Object(props.to_map()).to_string();
            if self.options.detect_cycles
                && frames
                    .iter()
                    .any(|(t, f)| *t == current.type_name && *f == fingerprint)
            {
                return Err(BuildError::CyclicBuild {
                    type_name: current.type_name,
                    depth,
                });
            }

            debug!("building `{}` at depth {depth}", current.type_name);
            match def.implement(&props)? {
                BuildOutput::Renderable(node) => {
                    return Ok(Built::Renderable(adopt(node, def, &props)));
                }
                BuildOutput::Value(value) => return Ok(Built::Value(value)),
                BuildOutput::Spec(next) => {
                    debug!("`{}` delegates to `{}`", current.type_name, next.type_name);
                    frames.push((current.type_name, fingerprint));
                    current = next;
                }
            }
        }
    }

    /// Builds a spec given as JSON (`{ "type": ..., ...props }`).
    pub fn build_json(&self, spec: Value) -> BuildResult<Built> {
        self.build(&Spec::try_from(spec)?)
    }
}

/// Builds `spec` against `registry` with default options.
pub fn build_viz(registry: &Registry, spec: &Spec) -> BuildResult<Built> {
    Builder::new(registry).build(spec)
}

/// Attaches the producing definition (unless the node has one) and fills in resolved
/// properties the node did not carry, so `get_property` sees them.
fn adopt(
    mut node: RenderableVisualization,
    def: &Arc<TypeDefinition>,
    props: &ResolvedProps,
) -> RenderableVisualization {
    if node.definition().is_none() {
        node = node.with_definition(Arc::clone(def));
    }
    for (name, value) in props.to_map() {
        if !node.props().contains(&name) {
            node.props_mut().set(name, value);
        }
    }
    node
}
