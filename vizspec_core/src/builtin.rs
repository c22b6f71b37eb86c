// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in computational types: the scale factory and the four coordinate systems.

use std::f64::consts::{PI, TAU};

use serde_json::{Value, json};
use vizspec_coord::{Cartesian2DSpec, Cartesian3D, Polar, Projection, Rotation, Spherical};
use vizspec_scale::ScaleLinear;

use crate::resolve::numbers_from;
use crate::scale::{SCALE_KINDS, create_scale};
use crate::{
    BuildError, BuildResult, CoordinateSystem, PropertyDef, ResolvedProps, TypeDefinition,
};

const PROJECTIONS: [&str; 3] = ["orthographic", "perspective", "isometric"];

pub(crate) fn definitions() -> Vec<TypeDefinition> {
    vec![scale(), cartesian_2d(), polar(), cartesian_3d(), spherical()]
}

fn scale() -> TypeDefinition {
    TypeDefinition::new("scale", |props| {
        Ok(create_scale(props.text("kind")?, &props.to_map())?.into())
    })
    .property(
        "kind",
        PropertyDef::required().with_validator(|v| match v.as_str() {
            Some(kind) if SCALE_KINDS.contains(&kind) => Ok(()),
            Some(kind) => Err(BuildError::InvalidScaleType(kind.to_owned())),
            None => Err(BuildError::InvalidScaleType(v.to_string())),
        }),
    )
    .property("domain", PropertyDef::required().with_validator(array("domain")))
    .property("range", PropertyDef::required().with_validator(array("range")))
    .data_transformation(true)
}

fn cartesian_2d() -> TypeDefinition {
    TypeDefinition::new("cartesian2d", |props| {
        let origin = props.point_opt("origin")?.unwrap_or_default();
        let spec = Cartesian2DSpec::new(
            props.number("width")?,
            props.number("height")?,
            props.pair("xDomain")?,
            props.pair("yDomain")?,
        )
        .with_flip_y(props.flag("flipY", true)?)
        .with_origin(origin);
        Ok(CoordinateSystem::from(spec.instantiate()).into())
    })
    .property("width", PropertyDef::required().with_validator(positive("width")))
    .property("height", PropertyDef::required().with_validator(positive("height")))
    .property("xDomain", PropertyDef::optional().with_default(json!([0, 1])))
    .property("yDomain", PropertyDef::optional().with_default(json!([0, 1])))
    .property("flipY", PropertyDef::optional().with_default(true))
    .property("origin", PropertyDef::optional().with_default(json!([0, 0])))
    .data_transformation(true)
}

fn polar() -> TypeDefinition {
    TypeDefinition::new("polar", |props| {
        let (width, height) = (props.number("width")?, props.number("height")?);
        let outer = props
            .number_opt("outerRadius")?
            .unwrap_or(0.5 * width.min(height));
        let mut coords = Polar::new(width, height)
            .with_radii(props.number("innerRadius")?, outer)
            .with_angles(props.number("startAngle")?, props.number("endAngle")?);
        if let Some(origin) = props.point_opt("origin")? {
            coords = coords.with_origin(origin);
        }
        Ok(CoordinateSystem::from(coords).into())
    })
    .property("width", PropertyDef::required().with_validator(positive("width")))
    .property("height", PropertyDef::required().with_validator(positive("height")))
    .property("innerRadius", PropertyDef::optional().with_default(0))
    .property("outerRadius", PropertyDef::optional())
    .property("startAngle", PropertyDef::optional().with_default(0))
    .property("endAngle", PropertyDef::optional().with_default(TAU))
    .property("origin", PropertyDef::optional())
    .validate(|props| {
        let inner = props.number("innerRadius")?;
        match props.number_opt("outerRadius")? {
            Some(outer) if outer < inner => Err(BuildError::validation(
                "outerRadius",
                "must not be smaller than innerRadius",
            )),
            _ => Ok(()),
        }
    })
    .data_transformation(true)
}

fn cartesian_3d() -> TypeDefinition {
    TypeDefinition::new("cartesian3d", |props| {
        let (w, h, d) = (
            props.number("width")?,
            props.number("height")?,
            props.number("depth")?,
        );
        let coords = Cartesian3D::new(
            w,
            h,
            d,
            ScaleLinear::new(props.pair("xDomain")?, (0.0, w)),
            ScaleLinear::new(props.pair("yDomain")?, (h, 0.0)),
            ScaleLinear::new(props.pair("zDomain")?, (0.0, d)),
        )
        .with_projection(projection(props)?)
        .with_origin(props.point_opt("origin")?.unwrap_or_default());
        Ok(CoordinateSystem::from(coords).into())
    })
    .property("width", PropertyDef::required().with_validator(positive("width")))
    .property("height", PropertyDef::required().with_validator(positive("height")))
    .property("depth", PropertyDef::required().with_validator(positive("depth")))
    .property("xDomain", PropertyDef::optional().with_default(json!([0, 1])))
    .property("yDomain", PropertyDef::optional().with_default(json!([0, 1])))
    .property("zDomain", PropertyDef::optional().with_default(json!([0, 1])))
    .property("projection", projection_property())
    .property("distance", distance_property())
    .property("origin", PropertyDef::optional().with_default(json!([0, 0])))
    .data_transformation(true)
}

fn spherical() -> TypeDefinition {
    TypeDefinition::new("spherical", |props| {
        let radius = props.number("radius")?;
        let [rx, ry, rz] = props.numbers::<3>("rotation")?;
        let coords = Spherical::new(
            ScaleLinear::new(props.pair("radiusDomain")?, (0.0, radius)),
            ScaleLinear::new(props.pair("polarDomain")?, (0.0, PI)),
            ScaleLinear::new(props.pair("azimuthDomain")?, (0.0, TAU)),
        )
        .with_rotation(Rotation::from_euler(rx, ry, rz))
        .with_projection(projection(props)?)
        .with_origin(props.point_opt("origin")?.unwrap_or_default());
        Ok(CoordinateSystem::from(coords).into())
    })
    .property("radius", PropertyDef::required().with_validator(positive("radius")))
    .property("radiusDomain", PropertyDef::optional().with_default(json!([0, 1])))
    .property("polarDomain", PropertyDef::optional().with_default(json!([0, 1])))
    .property("azimuthDomain", PropertyDef::optional().with_default(json!([0, 1])))
    .property("projection", projection_property())
    .property("distance", distance_property())
    .property(
        "rotation",
        PropertyDef::optional()
            .with_default(json!([0, 0, 0]))
            .with_validator(|v| numbers_from::<3>("rotation", Some(v)).map(drop)),
    )
    .property("origin", PropertyDef::optional().with_default(json!([0, 0])))
    .data_transformation(true)
}

fn projection_property() -> PropertyDef {
    PropertyDef::optional()
        .with_default("orthographic")
        .with_validator(|v| match v.as_str() {
            Some(name) if PROJECTIONS.contains(&name) => Ok(()),
            _ => Err(BuildError::validation(
                "projection",
                format!("expected one of {PROJECTIONS:?}, got {v}"),
            )),
        })
}

fn distance_property() -> PropertyDef {
    PropertyDef::optional()
        .with_default(Projection::DEFAULT_DISTANCE)
        .with_validator(positive("distance"))
}

fn projection(props: &ResolvedProps) -> BuildResult<Projection> {
    Ok(match props.text("projection")? {
        "perspective" => Projection::perspective(props.number("distance")?),
        "isometric" => Projection::Isometric,
        _ => Projection::Orthographic,
    })
}

fn positive(name: &'static str) -> impl Fn(&Value) -> BuildResult<()> + Send + Sync {
    move |v| match v.as_f64() {
        Some(n) if n.is_finite() && n > 0.0 => Ok(()),
        _ => Err(BuildError::validation(
            name,
            format!("expected a positive number, got {v}"),
        )),
    }
}

fn array(name: &'static str) -> impl Fn(&Value) -> BuildResult<()> + Send + Sync {
    move |v| {
        if v.is_array() {
            Ok(())
        } else {
            Err(BuildError::validation(name, format!("expected an array, got {v}")))
        }
    }
}
