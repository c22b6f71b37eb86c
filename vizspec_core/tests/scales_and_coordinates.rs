// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales and coordinate systems built through the registry, as layout code consumes them.

use std::f64::consts::FRAC_PI_2;

use approx::assert_abs_diff_eq;
use kurbo::Point;
use serde_json::{Value, json};
use vizspec_core::vizspec_coord::{Point3, SphericalPoint};
use vizspec_core::{
    BuildError, Builder, CoordinateSystem, Props, Registry, Scale, ScaleOutput, create_scale,
};

fn options(v: Value) -> Props {
    match v {
        Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

fn build_scale(spec: Value) -> Scale {
    let registry = Registry::with_builtins();
    let built = Builder::new(&registry).build_json(spec).unwrap();
    built.as_value().and_then(|v| v.as_scale()).unwrap().clone()
}

fn build_coords(spec: Value) -> CoordinateSystem {
    let registry = Registry::with_builtins();
    let built = Builder::new(&registry).build_json(spec).unwrap();
    *built.as_value().and_then(|v| v.as_coordinates()).unwrap()
}

#[test]
fn linear_round_trip() {
    let s = build_scale(json!({
        "type": "scale",
        "kind": "linear",
        "domain": [0, 100],
        "range": [0, 500],
    }));
    assert_eq!(s.scale(&json!(50)), ScaleOutput::Number(250.0));
    assert_eq!(s.invert(&json!(250)).unwrap(), ScaleOutput::Number(50.0));
    for x in 0..=100 {
        let y = s.scale(&json!(x)).to_value();
        let back = s.invert(&y).unwrap().as_f64().unwrap();
        assert_abs_diff_eq!(back, f64::from(x), epsilon = 1e-9);
    }
}

#[test]
fn band_positions_are_uniform() {
    let s = create_scale(
        "band",
        &options(json!({ "domain": ["A", "B", "C", "D"], "range": [0, 300], "padding": 0.2 })),
    )
    .unwrap();
    let xs: Vec<f64> = ["A", "B", "C", "D"]
        .iter()
        .map(|c| s.scale(&json!(c)).as_f64().unwrap())
        .collect();
    let step = xs[1] - xs[0];
    assert!(step > 0.0);
    for pair in xs.windows(2) {
        assert_abs_diff_eq!(pair[1] - pair[0], step, epsilon = 1e-9);
    }
    assert!(s.bandwidth().unwrap() < step);
    assert!(s.scale(&json!("Z")).as_f64().unwrap().is_nan());
    assert_eq!(
        s.invert(&json!(xs[2] + 1.0)).unwrap(),
        ScaleOutput::Value(json!("C"))
    );
}

#[test]
fn ordinal_range_cycles() {
    let s = create_scale(
        "ordinal",
        &options(json!({
            "domain": ["A", "B", "C", "D", "E"],
            "range": ["red", "green", "blue"],
        })),
    )
    .unwrap();
    assert_eq!(s.scale(&json!("D")).to_value(), json!("red"));
    assert_eq!(s.scale(&json!("E")).to_value(), json!("green"));
    assert_eq!(s.scale(&json!("Q")).to_value(), json!("red"));
    assert!(matches!(
        s.invert(&json!("red")),
        Err(BuildError::MethodNotSupported { method: "invert", scale: "ordinal" })
    ));
}

#[test]
fn color_scale_interpolates_stops() {
    let s = create_scale(
        "color",
        &options(json!({ "domain": [0, 1], "range": ["#000000", "#ffffff"] })),
    )
    .unwrap();
    assert_eq!(s.scale(&json!(0)).to_value(), json!("#000000"));
    assert_eq!(s.scale(&json!(1)).to_value(), json!("#ffffff"));
    assert_eq!(s.scale(&json!(2)).to_value(), json!("#ffffff"));
    assert!(s.ticks(5).is_err());
}

#[test]
fn cartesian_round_trip_both_orientations() {
    for flip in [true, false] {
        let coords = build_coords(json!({
            "type": "cartesian2d",
            "width": 400,
            "height": 300,
            "xDomain": [-10, 10],
            "yDomain": [0, 50],
            "flipY": flip,
            "origin": [20, 30],
        }));
        let c = coords.as_cartesian_2d().unwrap();
        assert_eq!(c.is_y_flipped(), flip);
        for p in [
            Point::new(-10.0, 0.0),
            Point::new(3.5, 12.25),
            Point::new(10.0, 50.0),
        ] {
            let back = c.from_screen(c.to_screen(p));
            assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-9);
            assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-9);
        }
        let top = c.to_screen(Point::new(-10.0, 50.0)).y;
        assert_abs_diff_eq!(top, if flip { 30.0 } else { 330.0 }, epsilon = 1e-9);
    }
}

#[test]
fn polar_pie_and_donut_paths() {
    let pie = build_coords(json!({ "type": "polar", "width": 200, "height": 200 }));
    let pie = pie.as_polar().unwrap();
    assert_eq!(pie.outer_radius(), 100.0);
    let d = pie.arc_path(0.0, FRAC_PI_2, 0.0, pie.outer_radius());
    assert!(d.starts_with('M'));
    assert_eq!(d.matches('A').count(), 1);
    assert!(d.ends_with("L100,100Z"), "{d}");

    let donut = build_coords(json!({
        "type": "polar",
        "width": 200,
        "height": 200,
        "innerRadius": 40,
    }));
    let donut = donut.as_polar().unwrap();
    let d = donut.arc_path(0.0, FRAC_PI_2, donut.inner_radius(), donut.outer_radius());
    assert_eq!(d.matches('A').count(), 2);
    assert!(d.ends_with('Z'));

    assert!(matches!(
        Builder::new(&Registry::with_builtins()).build_json(json!({
            "type": "polar",
            "width": 200,
            "height": 200,
            "innerRadius": 80,
            "outerRadius": 50,
        })),
        Err(BuildError::PropertyValidation { property, .. }) if property == "outerRadius"
    ));
}

#[test]
fn cartesian_3d_projects_and_recovers_points() {
    let coords = build_coords(json!({
        "type": "cartesian3d",
        "width": 100,
        "height": 80,
        "depth": 60,
        "projection": "perspective",
        "distance": 500,
        "origin": [10, 10],
    }));
    assert!(coords.is_3d());
    let c = coords.as_cartesian_3d().unwrap();
    let p = Point3::new(0.25, 0.5, 0.75);
    let back = c.from_container_coords(c.to_container_coords(p), p.z);
    assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-9);
    assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-9);
    assert_abs_diff_eq!(back.z, p.z, epsilon = 1e-9);
}

#[test]
fn spherical_equator_round_trip() {
    let coords = build_coords(json!({
        "type": "spherical",
        "radius": 100,
        "origin": [200, 200],
    }));
    let s = coords.as_spherical().unwrap();
    for azimuth in [0.3, 0.5, 0.75, 0.95] {
        let p = SphericalPoint::new(1.0, 0.5, azimuth);
        let back = s.from_screen(s.to_screen(p));
        assert_abs_diff_eq!(back.radius, p.radius, epsilon = 1e-9);
        assert_abs_diff_eq!(back.polar, p.polar, epsilon = 1e-9);
        assert_abs_diff_eq!(back.azimuth, p.azimuth, epsilon = 1e-9);
    }
}

#[test]
fn origin_is_the_one_mutable_setting() {
    let mut coords = build_coords(json!({ "type": "polar", "width": 200, "height": 100 }));
    assert_eq!(coords.origin(), Point::new(100.0, 50.0));
    coords.set_origin(Point::new(0.0, 0.0));
    assert_eq!(coords.origin(), Point::ZERO);
    assert_eq!(coords.as_polar().unwrap().outer_radius(), 50.0);
}
