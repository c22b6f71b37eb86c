// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render backends: identifiers, the canvas and 3D scene contexts, and in-memory stand-ins.

use std::fmt;

use kurbo::{Affine, BezPath, Point, Vec2};
use peniko::Brush;
use vizspec_coord::Point3;

/// A rendering backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    /// SVG element trees.
    Svg,
    /// An immediate-mode 2D canvas.
    Canvas,
    /// A retained 3D scene.
    Scene,
}

impl Backend {
    /// Lowercase backend name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Canvas => "canvas",
            Self::Scene => "3d",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which backends a renderable can draw to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Can produce SVG elements.
    pub supports_svg: bool,
    /// Can draw to a 2D canvas.
    pub supports_canvas: bool,
    /// Can populate a 3D scene.
    pub supports_3d: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::FLAT
    }
}

impl Capabilities {
    /// SVG and canvas, no 3D.
    pub const FLAT: Self = Self {
        supports_svg: true,
        supports_canvas: true,
        supports_3d: false,
    };

    /// Every backend.
    pub const ALL: Self = Self {
        supports_svg: true,
        supports_canvas: true,
        supports_3d: true,
    };

    /// No backend; useful as a starting point for `with_*`.
    pub const NONE: Self = Self {
        supports_svg: false,
        supports_canvas: false,
        supports_3d: false,
    };

    /// Sets SVG support.
    #[must_use]
    pub fn with_svg(mut self, yes: bool) -> Self {
        self.supports_svg = yes;
        self
    }

    /// Sets canvas support.
    #[must_use]
    pub fn with_canvas(mut self, yes: bool) -> Self {
        self.supports_canvas = yes;
        self
    }

    /// Sets 3D support.
    #[must_use]
    pub fn with_3d(mut self, yes: bool) -> Self {
        self.supports_3d = yes;
        self
    }

    /// Whether `backend` is supported.
    pub fn supports(&self, backend: Backend) -> bool {
        match backend {
            Backend::Svg => self.supports_svg,
            Backend::Canvas => self.supports_canvas,
            Backend::Scene => self.supports_3d,
        }
    }
}

/// A minimal immediate-mode 2D drawing context.
pub trait CanvasContext {
    /// Pushes the current transform.
    fn save(&mut self);
    /// Pops the transform pushed by the matching [`CanvasContext::save`].
    fn restore(&mut self);
    /// Translates subsequent drawing.
    fn translate(&mut self, offset: Vec2);
    /// Fills a path.
    fn fill_path(&mut self, path: &BezPath, brush: &Brush);
    /// Strokes a path.
    fn stroke_path(&mut self, path: &BezPath, brush: &Brush, width: f64);
    /// Draws text with its anchor at `at`.
    fn fill_text(&mut self, text: &str, at: Point, brush: &Brush);
}

/// A retained 3D scene that renderables add objects to.
pub trait SceneContainer {
    /// Adds a named polyline/point cloud in space and returns its handle.
    fn add_object(&mut self, name: &str, points: Vec<Point3>) -> usize;
    /// Removes an object; returns whether it existed.
    fn remove_object(&mut self, id: usize) -> bool;
}

/// A 3D render result that owns scene resources until disposed.
pub trait Disposable {
    /// Releases the resources. Calling it twice is harmless.
    fn dispose(&mut self);
}

/// A drawing command captured by [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasCommand {
    /// A filled path, already transformed.
    Fill(BezPath, Brush),
    /// A stroked path, already transformed.
    Stroke(BezPath, Brush, f64),
    /// Text at an already transformed position.
    Text(String, Point, Brush),
}

/// A [`CanvasContext`] that records commands with the current translation applied.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    transform: Affine,
    stack: Vec<Affine>,
    commands: Vec<CanvasCommand>,
}

impl RecordingCanvas {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands, in order.
    pub fn commands(&self) -> &[CanvasCommand] {
        &self.commands
    }

    /// Current save depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl CanvasContext for RecordingCanvas {
    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine::translate(offset);
    }

    fn fill_path(&mut self, path: &BezPath, brush: &Brush) {
        self.commands
            .push(CanvasCommand::Fill(self.transform * path.clone(), brush.clone()));
    }

    fn stroke_path(&mut self, path: &BezPath, brush: &Brush, width: f64) {
        self.commands.push(CanvasCommand::Stroke(
            self.transform * path.clone(),
            brush.clone(),
            width,
        ));
    }

    fn fill_text(&mut self, text: &str, at: Point, brush: &Brush) {
        self.commands.push(CanvasCommand::Text(
            text.to_owned(),
            self.transform * at,
            brush.clone(),
        ));
    }
}

/// A named object in a [`SceneGraph`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    /// Handle returned by [`SceneContainer::add_object`].
    pub id: usize,
    /// Caller-supplied name.
    pub name: String,
    /// Points in space.
    pub points: Vec<Point3>,
}

/// An in-memory [`SceneContainer`].
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    next_id: usize,
    objects: Vec<SceneObject>,
}

impl SceneGraph {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Live objects, in insertion order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }
}

impl SceneContainer for SceneGraph {
    fn add_object(&mut self, name: &str, points: Vec<Point3>) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.push(SceneObject {
            id,
            name: name.to_owned(),
            points,
        });
        id
    }

    fn remove_object(&mut self, id: usize) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| o.id != id);
        self.objects.len() != before
    }
}
