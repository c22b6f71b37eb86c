// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderable nodes and the render boundary.

use std::fmt;
use std::sync::Arc;

use log::debug;
use serde_json::Value;

use crate::resolve::resolve;
use crate::{
    Backend, BuildError, BuildResult, CanvasContext, Capabilities, Disposable, Props,
    ResolvedProps, SceneContainer, Spec, SvgContainer, SvgElement, TypeDefinition,
};

/// Draws a [`RenderableVisualization`] to one or more backends.
///
/// Implemented by collaborators (marks, charts). Each method has a default that fails with
/// [`BuildError::UnsupportedBackend`], so a renderer only implements the backends it has.
/// Renderers read everything they need from the node's properties.
pub trait Renderer: Send + Sync {
    /// Produces an SVG element for the node.
    fn render_svg(&self, node: &RenderableVisualization) -> BuildResult<SvgElement> {
        Err(node.unsupported(Backend::Svg))
    }

    /// Draws the node to a canvas; returns whether anything was drawn.
    fn render_canvas(
        &self,
        node: &RenderableVisualization,
        ctx: &mut dyn CanvasContext,
    ) -> BuildResult<bool> {
        let _ = ctx;
        Err(node.unsupported(Backend::Canvas))
    }

    /// Adds the node to a 3D scene; the returned handle removes it again.
    fn render_scene(
        &self,
        node: &RenderableVisualization,
        scene: &mut dyn SceneContainer,
    ) -> BuildResult<Box<dyn Disposable>> {
        let _ = scene;
        Err(node.unsupported(Backend::Scene))
    }
}

/// A built node: its type, resolved properties, supported backends and renderer.
///
/// Nodes are values. Cloning shares only the renderer and the type definition, both of which
/// are immutable, and [`RenderableVisualization::update`] returns a new node.
#[derive(Clone)]
pub struct RenderableVisualization {
    renderable_type: String,
    props: ResolvedProps,
    capabilities: Capabilities,
    renderer: Arc<dyn Renderer>,
    definition: Option<Arc<TypeDefinition>>,
}

impl fmt::Debug for RenderableVisualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderableVisualization")
            .field("renderable_type", &self.renderable_type)
            .field("props", &self.props)
            .field("capabilities", &self.capabilities)
            .field("definition", &self.definition.as_ref().map(|d| d.name()))
            .finish_non_exhaustive()
    }
}

impl RenderableVisualization {
    /// Creates a node supporting SVG and canvas.
    pub fn new(
        renderable_type: impl Into<String>,
        props: ResolvedProps,
        renderer: impl Renderer + 'static,
    ) -> Self {
        Self::from_arc(renderable_type, props, Arc::new(renderer))
    }

    /// Creates a node around a shared renderer.
    pub fn from_arc(
        renderable_type: impl Into<String>,
        props: ResolvedProps,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            renderable_type: renderable_type.into(),
            props,
            capabilities: Capabilities::default(),
            renderer,
            definition: None,
        }
    }

    /// Sets the supported backends.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Attaches the definition used to re-resolve properties on [`RenderableVisualization::update`].
    ///
    /// The builder attaches the definition of the type that produced the node when none is set.
    #[must_use]
    pub fn with_definition(mut self, definition: Arc<TypeDefinition>) -> Self {
        self.definition = Some(definition);
        self
    }

    /// The node's type.
    pub fn renderable_type(&self) -> &str {
        &self.renderable_type
    }

    /// The resolved properties.
    pub fn props(&self) -> &ResolvedProps {
        &self.props
    }

    pub(crate) fn props_mut(&mut self) -> &mut ResolvedProps {
        &mut self.props
    }

    /// Supported backends.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// The definition properties are re-resolved against, if any.
    pub fn definition(&self) -> Option<&Arc<TypeDefinition>> {
        self.definition.as_ref()
    }

    /// A property value, declared or not.
    pub fn get_property(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    /// The node as a spec: its type plus its resolved properties.
    pub fn spec(&self) -> Spec {
        self.props.clone().into_spec(self.renderable_type.clone())
    }

    /// Renders to SVG, appends the element to `container` and returns a copy of it.
    pub fn render_to_svg(&self, container: &mut dyn SvgContainer) -> BuildResult<SvgElement> {
        self.check(Backend::Svg)?;
        let element = self.renderer.render_svg(self)?;
        container.append(element.clone());
        Ok(element)
    }

    /// Draws to a canvas inside a `save`/`restore` pair.
    pub fn render_to_canvas(&self, ctx: &mut dyn CanvasContext) -> BuildResult<bool> {
        self.check(Backend::Canvas)?;
        ctx.save();
        let drawn = self.renderer.render_canvas(self, ctx);
        ctx.restore();
        drawn
    }

    /// Adds the node to a 3D scene.
    pub fn render_to_scene(
        &self,
        scene: &mut dyn SceneContainer,
    ) -> BuildResult<Box<dyn Disposable>> {
        self.check(Backend::Scene)?;
        self.renderer.render_scene(self, scene)
    }

    /// Renders to whichever backend `target` is and returns a handle for updating or cleaning
    /// up the result.
    pub fn render(&self, target: RenderTarget<'_>) -> BuildResult<RenderHandle> {
        let output = match target {
            RenderTarget::Svg(c) => RenderOutput::Svg(self.render_to_svg(c)?),
            RenderTarget::Canvas(c) => RenderOutput::Canvas(self.render_to_canvas(c)?),
            RenderTarget::Scene(c) => RenderOutput::Scene(self.render_to_scene(c)?),
        };
        Ok(RenderHandle {
            node: self.clone(),
            output,
        })
    }

    /// Returns a new node with `patch` shallowly merged over the current properties.
    ///
    /// Top-level keys in `patch` replace existing ones wholesale; nested objects are not merged.
    /// When the node carries a definition, the merged bag is resolved against it again, so
    /// defaults and validators run. The renderer is shared with the new node and the receiver
    /// is left untouched.
    pub fn update(&self, patch: &Props) -> BuildResult<Self> {
        let props = match &self.definition {
            Some(def) => {
                let mut merged = self.props.to_map();
                merged.extend(patch.iter().map(|(k, v)| (k.clone(), v.clone())));
                resolve(def, &merged)?
            }
            None => {
                let mut props = self.props.clone();
                for (k, v) in patch {
                    props.set(k.clone(), v.clone());
                }
                props
            }
        };
        debug!(
            "{}: updated {} properties",
            self.renderable_type,
            patch.len()
        );
        Ok(Self {
            props,
            ..self.clone()
        })
    }

    /// The error for rendering this node to an unsupported backend.
    pub fn unsupported(&self, backend: Backend) -> BuildError {
        BuildError::UnsupportedBackend {
            renderable_type: self.renderable_type.clone(),
            backend,
        }
    }

    fn check(&self, backend: Backend) -> BuildResult<()> {
        if self.capabilities.supports(backend) {
            debug!("rendering `{}` to {backend}", self.renderable_type);
            Ok(())
        } else {
            Err(self.unsupported(backend))
        }
    }
}

/// Where [`RenderableVisualization::render`] draws.
pub enum RenderTarget<'a> {
    /// An SVG container.
    Svg(&'a mut dyn SvgContainer),
    /// A 2D canvas.
    Canvas(&'a mut dyn CanvasContext),
    /// A 3D scene.
    Scene(&'a mut dyn SceneContainer),
}

impl RenderTarget<'_> {
    /// The backend this target belongs to.
    pub fn backend(&self) -> Backend {
        match self {
            Self::Svg(_) => Backend::Svg,
            Self::Canvas(_) => Backend::Canvas,
            Self::Scene(_) => Backend::Scene,
        }
    }
}

impl fmt::Debug for RenderTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RenderTarget({})", self.backend())
    }
}

/// What a render call produced.
pub enum RenderOutput {
    /// The element appended to the SVG container.
    Svg(SvgElement),
    /// Whether anything was drawn to the canvas.
    Canvas(bool),
    /// The handle owning the scene objects.
    Scene(Box<dyn Disposable>),
}

impl fmt::Debug for RenderOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Svg(el) => f.debug_tuple("Svg").field(el).finish(),
            Self::Canvas(drawn) => f.debug_tuple("Canvas").field(drawn).finish(),
            Self::Scene(_) => f.write_str("Scene(..)"),
        }
    }
}

/// A rendered node together with what rendering produced.
#[derive(Debug)]
pub struct RenderHandle {
    node: RenderableVisualization,
    output: RenderOutput,
}

impl RenderHandle {
    /// The node that was rendered.
    pub fn node(&self) -> &RenderableVisualization {
        &self.node
    }

    /// What rendering produced.
    pub fn output(&self) -> &RenderOutput {
        &self.output
    }

    /// The rendered SVG element, for SVG output.
    pub fn element(&self) -> Option<&SvgElement> {
        match &self.output {
            RenderOutput::Svg(el) => Some(el),
            _ => None,
        }
    }

    /// Removes the previous output from `target`, updates the node and renders the new node
    /// there.
    ///
    /// The previous output is released even when the update or the new render fails, so a
    /// failed update leaves nothing behind in `target`.
    pub fn update(self, patch: &Props, mut target: RenderTarget<'_>) -> BuildResult<Self> {
        release(self.output, &mut target);
        self.node.update(patch)?.render(target)
    }

    /// Removes the output from `target`: the SVG element is detached, scene objects are
    /// disposed. Canvas output cannot be taken back.
    pub fn cleanup(self, mut target: RenderTarget<'_>) {
        release(self.output, &mut target);
    }
}

fn release(output: RenderOutput, target: &mut RenderTarget<'_>) {
    match (output, target) {
        (RenderOutput::Svg(element), RenderTarget::Svg(container)) => {
            container.remove(&element);
        }
        (RenderOutput::Scene(mut handle), _) => handle.dispose(),
        _ => {}
    }
}
