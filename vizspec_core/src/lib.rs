// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative visualization build pipeline.
//!
//! A [`Spec`] names a registered type and carries an open property bag. Building it:
//! 1. looks the type up in a [`Registry`],
//! 2. resolves the bag against the type's schema (defaults, required checks, validators;
//!    undeclared keys pass through),
//! 3. runs the type's implementation, which returns a [`BuildOutput`]: a
//!    [`RenderableVisualization`], another [`Spec`] to build in its place, or a [`Computed`]
//!    value such as a [`Scale`] or a [`CoordinateSystem`].
//!
//! ```
//! use serde_json::json;
//! use vizspec_core::{Builder, Registry};
//!
//! let registry = Registry::with_builtins();
//! let built = Builder::new(&registry)
//!     .build_json(json!({
//!         "type": "scale",
//!         "kind": "linear",
//!         "domain": [0, 100],
//!         "range": [0, 500],
//!     }))
//!     .unwrap();
//! let scale = built.as_value().and_then(|v| v.as_scale()).unwrap();
//! assert_eq!(scale.scale(&json!(50)).as_f64(), Some(250.0));
//! ```
//!
//! Renderable nodes draw through a [`Renderer`] supplied by the type that built them, to SVG
//! element trees, a [`CanvasContext`], or a [`SceneContainer`], as allowed by their
//! [`Capabilities`].
//!
//! The library logs through the `log` facade and installs no logger.

mod backend;
mod build;
mod builtin;
mod coordinates;
mod definition;
mod error;
mod registry;
mod renderable;
mod resolve;
mod scale;
mod spec;
mod svg;

pub use backend::{
    Backend, CanvasCommand, CanvasContext, Capabilities, Disposable, RecordingCanvas,
    SceneContainer, SceneGraph, SceneObject,
};
pub use build::{BuildOptions, Builder, Built, build_viz};
pub use coordinates::CoordinateSystem;
pub use definition::{
    BuildOutput, Computed, Implementation, PropertyDef, PropertyValidator, SchemaValidator,
    TypeDefinition,
};
pub use error::{BuildError, BuildResult};
pub use registry::Registry;
pub use renderable::{RenderHandle, RenderOutput, RenderTarget, RenderableVisualization, Renderer};
pub use resolve::{ResolvedProps, resolve};
pub use scale::{SCALE_KINDS, Scale, ScaleOptions, ScaleOutput, TypedScale, create_scale};
pub use spec::{Props, Spec};
pub use svg::{SvgContainer, SvgDocument, SvgElement};

pub use vizspec_coord;
pub use vizspec_scale;
