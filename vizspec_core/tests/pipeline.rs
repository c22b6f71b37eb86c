// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end builds through a registry of small mark and chart types.

use std::sync::{Arc, Mutex};

use kurbo::{Rect, Shape};
use peniko::{Brush, Color};
use serde_json::{Value, json};
use vizspec_core::vizspec_coord::Point3;
use vizspec_core::{
    Backend, BuildError, BuildOptions, Builder, CanvasCommand, CanvasContext, Capabilities,
    Disposable, PropertyDef, Props, RecordingCanvas, Registry, RenderTarget,
    RenderableVisualization, Renderer, SceneContainer, SceneGraph, Spec, SvgDocument, SvgElement,
    TypeDefinition, build_viz, create_scale,
};

type ReleaseLog = Arc<Mutex<Vec<usize>>>;

fn props(v: Value) -> Props {
    match v {
        Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

fn brush(css: &str) -> Brush {
    let color = peniko::color::parse_color(css)
        .map(|c| c.to_alpha_color())
        .unwrap_or(Color::from_rgba8(0, 0, 0, 255));
    Brush::Solid(color)
}

/// Draws an axis-aligned rectangle from `x`, `y`, `width`, `height` and `fill`.
struct RectRenderer {
    released: ReleaseLog,
}

fn rect_of(node: &RenderableVisualization) -> Result<Rect, BuildError> {
    let p = node.props();
    Ok(Rect::from_origin_size(
        (p.number("x")?, p.number("y")?),
        (p.number("width")?, p.number("height")?),
    ))
}

impl Renderer for RectRenderer {
    fn render_svg(&self, node: &RenderableVisualization) -> Result<SvgElement, BuildError> {
        let r = rect_of(node)?;
        Ok(SvgElement::new("rect")
            .attr("x", r.x0)
            .attr("y", r.y0)
            .attr("width", r.width())
            .attr("height", r.height())
            .fill(&brush(node.props().text("fill")?)))
    }

    fn render_canvas(
        &self,
        node: &RenderableVisualization,
        ctx: &mut dyn CanvasContext,
    ) -> Result<bool, BuildError> {
        let r = rect_of(node)?;
        ctx.fill_path(&r.to_path(0.1), &brush(node.props().text("fill")?));
        Ok(true)
    }

    fn render_scene(
        &self,
        node: &RenderableVisualization,
        scene: &mut dyn SceneContainer,
    ) -> Result<Box<dyn Disposable>, BuildError> {
        let r = rect_of(node)?;
        let id = scene.add_object(
            node.renderable_type(),
            vec![Point3::new(r.x0, r.y0, 0.0), Point3::new(r.x1, r.y1, 0.0)],
        );
        Ok(Box::new(Release {
            id,
            released: Arc::clone(&self.released),
        }))
    }
}

struct Release {
    id: usize,
    released: ReleaseLog,
}

impl Disposable for Release {
    fn dispose(&mut self) {
        if let Ok(mut ids) = self.released.lock() {
            ids.push(self.id);
        }
    }
}

/// Draws its children, laid out by the bar chart type.
struct GroupRenderer {
    children: Vec<RenderableVisualization>,
}

impl Renderer for GroupRenderer {
    fn render_svg(&self, _: &RenderableVisualization) -> Result<SvgElement, BuildError> {
        let mut group = SvgElement::group().attr("class", "bars");
        for child in &self.children {
            child.render_to_svg(&mut group)?;
        }
        Ok(group)
    }

    fn render_canvas(
        &self,
        _: &RenderableVisualization,
        ctx: &mut dyn CanvasContext,
    ) -> Result<bool, BuildError> {
        let mut drawn = false;
        for child in &self.children {
            drawn |= child.render_to_canvas(ctx)?;
        }
        Ok(drawn)
    }
}

fn rect_type(released: ReleaseLog) -> TypeDefinition {
    TypeDefinition::new("rect", move |props| {
        let renderer = RectRenderer {
            released: Arc::clone(&released),
        };
        Ok(RenderableVisualization::new("rect", props.clone(), renderer)
            .with_capabilities(Capabilities::ALL)
            .into())
    })
    .property("x", PropertyDef::optional().with_default(0))
    .property("y", PropertyDef::optional().with_default(0))
    .property(
        "width",
        PropertyDef::required().with_validator(|v| match v.as_f64() {
            Some(w) if w >= 0.0 => Ok(()),
            _ => Err(BuildError::validation("width", "expected a non-negative number")),
        }),
    )
    .property("height", PropertyDef::required())
    .property("fill", PropertyDef::optional().with_default("#4682b4"))
}

fn bar_chart_type() -> TypeDefinition {
    TypeDefinition::new("barChart", |chart| {
        let values = chart
            .get("data")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let (width, height) = (chart.number("width")?, chart.number("height")?);
        let categories: Vec<Value> = (0..values.len()).map(Value::from).collect();
        let x = create_scale(
            "band",
            &props(json!({ "domain": categories, "range": [0, width], "padding": 0.2 })),
        )?;
        let max = values.iter().filter_map(Value::as_f64).fold(0.0, f64::max);
        let y = create_scale(
            "linear",
            &props(json!({ "domain": [0, max], "range": [0, height] })),
        )?;

        let mut marks = Registry::new();
        marks.register(rect_type(ReleaseLog::default()))?;
        let mut children = Vec::new();
        for (i, v) in values.iter().enumerate() {
            let h = y.scale(v).as_f64().unwrap_or(0.0);
            let spec = Spec::new("rect")
                .with("x", x.scale(&json!(i)).as_f64().unwrap_or(0.0))
                .with("y", height - h)
                .with("width", x.bandwidth()?)
                .with("height", h);
            if let Some(node) = build_viz(&marks, &spec)?.into_renderable() {
                children.push(node);
            }
        }
        let group = GroupRenderer { children };
        Ok(RenderableVisualization::new("barChart", chart.clone(), group).into())
    })
    .property("data", PropertyDef::required())
    .property("width", PropertyDef::optional().with_default(300))
    .property("height", PropertyDef::optional().with_default(100))
}

fn chart_type() -> TypeDefinition {
    TypeDefinition::new("chart", |props| {
        let mark = props.text("mark")?.to_owned();
        Ok(props.clone().into_spec(mark).into())
    })
    .property("mark", PropertyDef::required())
}

fn registry_with_log(released: ReleaseLog) -> Registry {
    let mut r = Registry::new();
    r.register(rect_type(released)).unwrap();
    r.register(bar_chart_type()).unwrap();
    r.register(chart_type()).unwrap();
    r
}

fn registry() -> Registry {
    registry_with_log(ReleaseLog::default())
}

fn rect(r: &Registry, width: i32, height: i32) -> RenderableVisualization {
    build_viz(r, &Spec::new("rect").with("width", width).with("height", height))
        .unwrap()
        .into_renderable()
        .unwrap()
}

#[test]
fn missing_required_property_is_reported_by_name() {
    let r = registry();
    let err = build_viz(&r, &Spec::new("rect").with("width", 10)).unwrap_err();
    match err {
        BuildError::MissingRequiredProperty {
            type_name,
            property,
        } => {
            assert_eq!(type_name, "rect");
            assert_eq!(property, "height");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn defaults_and_pass_through_keys_are_readable() {
    let r = registry();
    let node = build_viz(
        &r,
        &Spec::new("rect")
            .with("width", 10)
            .with("height", 5)
            .with("series", "a"),
    )
    .unwrap()
    .into_renderable()
    .unwrap();
    assert_eq!(node.get_property("fill"), Some(&json!("#4682b4")));
    assert_eq!(node.get_property("x"), Some(&json!(0)));
    assert_eq!(node.get_property("series"), Some(&json!("a")));
    assert!(node.props().extra().contains_key("series"));
}

#[test]
fn identical_specs_build_independent_nodes() {
    let r = registry();
    let a = rect(&r, 10, 5);
    let b = rect(&r, 10, 5);
    for (key, value) in a.props().to_map() {
        assert_eq!(b.get_property(&key), Some(&value), "property {key}");
    }

    let a2 = a.update(&props(json!({ "fill": "red" }))).unwrap();
    assert_eq!(a2.get_property("fill"), Some(&json!("red")));
    assert_eq!(a.get_property("fill"), Some(&json!("#4682b4")));
    assert_eq!(b.get_property("fill"), Some(&json!("#4682b4")));
}

#[test]
fn update_runs_validators_and_leaves_the_receiver_alone() {
    let r = registry();
    let node = rect(&r, 10, 5);
    assert!(matches!(
        node.update(&props(json!({ "width": -1 }))),
        Err(BuildError::PropertyValidation { property, .. }) if property == "width"
    ));
    assert_eq!(node.get_property("width"), Some(&json!(10)));
}

#[test]
fn composite_chart_renders_to_svg_and_canvas() {
    let r = registry();
    let node = build_viz(
        &r,
        &Spec::new("chart")
            .with("mark", "barChart")
            .with("data", json!([1, 4, 2, 3])),
    )
    .unwrap()
    .into_renderable()
    .unwrap();
    assert_eq!(node.renderable_type(), "barChart");

    let mut doc = SvgDocument::new(300.0, 100.0);
    let group = node.render_to_svg(&mut doc).unwrap();
    assert_eq!(group.children().len(), 4);
    let xs: Vec<f64> = group
        .children()
        .iter()
        .map(|c| c.attribute("x").unwrap().parse().unwrap())
        .collect();
    let steps: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    assert!(steps.iter().all(|s| (s - steps[0]).abs() < 1e-9));
    assert_eq!(group.children()[1].attribute("height"), Some("100"));
    assert!(doc.to_svg_string().contains(r#"<g class="bars">"#));

    let mut canvas = RecordingCanvas::new();
    assert!(node.render_to_canvas(&mut canvas).unwrap());
    assert_eq!(canvas.commands().len(), 4);
    assert!(
        canvas
            .commands()
            .iter()
            .all(|c| matches!(c, CanvasCommand::Fill(..)))
    );
    assert_eq!(canvas.depth(), 0);

    assert!(matches!(
        node.render(RenderTarget::Scene(&mut SceneGraph::new())),
        Err(BuildError::UnsupportedBackend {
            backend: Backend::Scene,
            ..
        })
    ));
}

#[test]
fn scene_output_is_disposed_on_cleanup() {
    let released = ReleaseLog::default();
    let r = registry_with_log(Arc::clone(&released));
    let node = rect(&r, 2, 3);
    let mut scene = SceneGraph::new();
    let handle = node.render(RenderTarget::Scene(&mut scene)).unwrap();
    assert_eq!(scene.objects().len(), 1);
    let id = scene.objects()[0].id;
    assert_eq!(scene.objects()[0].points[1], Point3::new(2.0, 3.0, 0.0));
    assert!(released.lock().unwrap().is_empty());
    handle.cleanup(RenderTarget::Scene(&mut scene));
    assert_eq!(*released.lock().unwrap(), [id]);
}

#[test]
fn rejected_update_still_releases_the_scene_output() {
    let released = ReleaseLog::default();
    let r = registry_with_log(Arc::clone(&released));
    let node = rect(&r, 2, 3);
    let mut scene = SceneGraph::new();
    let handle = node.render(RenderTarget::Scene(&mut scene)).unwrap();
    let id = scene.objects()[0].id;
    let result = handle.update(
        &props(json!({ "width": "wide" })),
        RenderTarget::Scene(&mut scene),
    );
    assert!(matches!(
        result,
        Err(BuildError::PropertyValidation { property, .. }) if property == "width"
    ));
    assert_eq!(*released.lock().unwrap(), [id]);
}

#[test]
fn svg_handle_update_swaps_the_element() {
    let r = registry();
    let node = rect(&r, 2, 3);
    let mut doc = SvgDocument::new(10.0, 10.0);
    let handle = node.render(RenderTarget::Svg(&mut doc)).unwrap();
    assert_eq!(
        handle.element().and_then(|e| e.attribute("fill")),
        Some("#4682b4")
    );
    let handle = handle
        .update(
            &props(json!({ "fill": "#ff0000" })),
            RenderTarget::Svg(&mut doc),
        )
        .unwrap();
    assert_eq!(doc.elements().len(), 1);
    assert_eq!(doc.elements()[0].attribute("fill"), Some("#ff0000"));
    assert_eq!(node.get_property("fill"), Some(&json!("#4682b4")));
    assert_eq!(handle.node().get_property("fill"), Some(&json!("#ff0000")));
}

#[test]
fn unknown_types_fail_at_any_depth() {
    let r = registry();
    assert!(matches!(
        build_viz(&r, &Spec::new("doesNotExist")),
        Err(BuildError::UnknownType(t)) if t == "doesNotExist"
    ));
    assert!(matches!(
        build_viz(&r, &Spec::new("chart").with("mark", "pie")),
        Err(BuildError::UnknownType(t)) if t == "pie"
    ));
}

#[test]
fn self_delegation_is_rejected() {
    let r = registry();
    let err = Builder::new(&r)
        .with_options(BuildOptions::default())
        .build(&Spec::new("chart").with("mark", "chart"))
        .unwrap_err();
    assert!(matches!(err, BuildError::CyclicBuild { ref type_name, .. } if type_name == "chart"));
    assert_eq!(err.to_string(), "cyclic build of type `chart` at depth 1");
}

#[test]
fn registry_reset_isolates_sessions() {
    let mut r = registry();
    assert!(r.has("rect"));
    r.reset();
    assert!(matches!(
        build_viz(&r, &Spec::new("rect")),
        Err(BuildError::UnknownType(_))
    ));
    assert!(registry().has("rect"));
}
