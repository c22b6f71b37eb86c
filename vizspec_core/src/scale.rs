// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dynamic scale factory: builds a scale from a kind name and a property bag.

use peniko::Color;
use serde::Deserialize;
use serde_json::Value;
use vizspec_scale::{
    ScaleBand, ScaleColor, ScaleContinuous, ScaleError, ScaleLinear, ScaleLinearSpec, ScaleLog,
    ScaleOrdinal, ScaleTime,
};

use crate::{BuildError, BuildResult, Props};

/// Scale kinds understood by [`create_scale`].
pub const SCALE_KINDS: [&str; 6] = ["linear", "band", "ordinal", "color", "log", "time"];

/// Options accepted by [`create_scale`]. Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaleOptions {
    /// Input values: two numbers for continuous and color scales, categories otherwise.
    pub domain: Vec<Value>,
    /// Output values: two numbers, CSS color stops (color), or arbitrary values (ordinal).
    pub range: Vec<Value>,
    /// Band padding for both sides unless overridden (default 0.1), or linear domain padding as a
    /// fraction of the domain span (default 0).
    pub padding: Option<f64>,
    /// Band padding between bands.
    pub padding_inner: Option<f64>,
    /// Band padding outside the first and last band.
    pub padding_outer: Option<f64>,
    /// Clamp continuous or color output to the range.
    pub clamp: Option<bool>,
    /// Round a linear domain out to nice tick values.
    pub nice: Option<bool>,
    /// Log base (default 10).
    pub base: Option<f64>,
    /// Ordinal output for values outside the domain (default: first range entry).
    pub unknown: Option<Value>,
}

/// The typed scale behind a [`Scale`].
#[derive(Clone, Debug, PartialEq)]
pub enum TypedScale {
    /// Linear numeric mapping.
    Linear(ScaleLinear),
    /// Categories to evenly spaced bands.
    Band(ScaleBand<Value>),
    /// Categories to arbitrary values.
    Ordinal(ScaleOrdinal<Value, Value>),
    /// Numbers to interpolated colors.
    Color(ScaleColor),
    /// Logarithmic numeric mapping.
    Log(ScaleLog),
    /// Linear mapping over seconds with time-aware ticks.
    Time(ScaleTime),
}

/// What a [`Scale`] maps an input to.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleOutput {
    /// A position. Band scales produce `NaN` for categories outside the domain.
    Number(f64),
    /// An interpolated color.
    Color(Color),
    /// An arbitrary value (ordinal output, band inversion).
    Value(Value),
}

impl ScaleOutput {
    /// The number, if this is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Converts to JSON. Colors become `#rrggbb`; non-finite numbers become `null`.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::from(*n),
            Self::Color(c) => {
                let c = c.to_rgba8();
                Value::String(format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b))
            }
            Self::Value(v) => v.clone(),
        }
    }
}

/// A scale built at runtime by [`create_scale`].
///
/// `domain()` and `range()` echo the options it was built from. Operations a kind lacks
/// fail with [`BuildError::MethodNotSupported`].
#[derive(Clone, Debug, PartialEq)]
pub struct Scale {
    domain: Vec<Value>,
    range: Vec<Value>,
    typed: TypedScale,
}

impl Scale {
    /// The scale kind, one of [`SCALE_KINDS`].
    pub fn kind(&self) -> &'static str {
        match self.typed {
            TypedScale::Linear(_) => "linear",
            TypedScale::Band(_) => "band",
            TypedScale::Ordinal(_) => "ordinal",
            TypedScale::Color(_) => "color",
            TypedScale::Log(_) => "log",
            TypedScale::Time(_) => "time",
        }
    }

    /// The domain, as supplied.
    pub fn domain(&self) -> &[Value] {
        &self.domain
    }

    /// The range, as supplied.
    pub fn range(&self) -> &[Value] {
        &self.range
    }

    /// The typed scale.
    pub fn typed(&self) -> &TypedScale {
        &self.typed
    }

    /// The continuous scale, for kinds that have one.
    pub fn as_continuous(&self) -> Option<ScaleContinuous> {
        match self.typed {
            TypedScale::Linear(s) => Some(s.into()),
            TypedScale::Log(s) => Some(s.into()),
            TypedScale::Time(s) => Some(s.into()),
            _ => None,
        }
    }

    /// Maps a domain value.
    pub fn scale(&self, value: &Value) -> ScaleOutput {
        let number = || value.as_f64().unwrap_or(f64::NAN);
        match &self.typed {
            TypedScale::Linear(s) => ScaleOutput::Number(s.map(number())),
            TypedScale::Log(s) => ScaleOutput::Number(s.map(number())),
            TypedScale::Time(s) => ScaleOutput::Number(s.map(number())),
            TypedScale::Band(s) => ScaleOutput::Number(s.map(value)),
            TypedScale::Ordinal(s) => ScaleOutput::Value(s.map(value).clone()),
            TypedScale::Color(s) => match value.as_f64() {
                Some(v) => ScaleOutput::Color(s.map(v)),
                None => ScaleOutput::Value(Value::Null),
            },
        }
    }

    /// Maps a range value back into the domain.
    ///
    /// Band scales return the category whose band contains the position (`null` when none
    /// does). Color scales return the domain position of the nearest stop, which is an
    /// approximation.
    pub fn invert(&self, value: &Value) -> BuildResult<ScaleOutput> {
        let number = || value.as_f64().unwrap_or(f64::NAN);
        Ok(match &self.typed {
            TypedScale::Linear(s) => ScaleOutput::Number(s.invert(number())),
            TypedScale::Log(s) => ScaleOutput::Number(s.invert(number())),
            TypedScale::Time(s) => ScaleOutput::Number(s.invert(number())),
            TypedScale::Band(s) => {
                ScaleOutput::Value(s.invert(number()).cloned().unwrap_or(Value::Null))
            }
            TypedScale::Color(s) => {
                let css = value
                    .as_str()
                    .ok_or_else(|| BuildError::validation("value", "expected a CSS color"))?;
                ScaleOutput::Number(s.invert_css(css)?)
            }
            TypedScale::Ordinal(_) => return Err(self.unsupported("invert")),
        })
    }

    /// Tick values: evenly spaced, powers of the base, or nice time steps for continuous kinds,
    /// and the domain itself for band and ordinal scales.
    pub fn ticks(&self, count: usize) -> BuildResult<Vec<Value>> {
        let numbers =
            |ticks: Vec<f64>| -> Vec<Value> { ticks.into_iter().map(Value::from).collect() };
        Ok(match &self.typed {
            TypedScale::Linear(s) => numbers(s.ticks(count)),
            TypedScale::Log(s) => numbers(s.ticks(count)),
            TypedScale::Time(s) => numbers(s.ticks(count)),
            TypedScale::Band(s) => s.ticks().to_vec(),
            TypedScale::Ordinal(s) => s.domain().to_vec(),
            TypedScale::Color(_) => return Err(self.unsupported("ticks")),
        })
    }

    /// Width of each band.
    pub fn bandwidth(&self) -> BuildResult<f64> {
        match &self.typed {
            TypedScale::Band(s) => Ok(s.bandwidth()),
            _ => Err(self.unsupported("bandwidth")),
        }
    }

    fn unsupported(&self, method: &'static str) -> BuildError {
        BuildError::MethodNotSupported {
            method,
            scale: self.kind(),
        }
    }
}

/// Builds a scale of the given kind.
///
/// Fails with [`BuildError::InvalidScaleType`] for an unknown kind,
/// [`BuildError::PropertyValidation`] when the options have the wrong shape, and
/// [`BuildError::InvalidScaleOptions`] when the scale itself rejects them.
pub fn create_scale(kind: &str, options: &Props) -> BuildResult<Scale> {
    if !SCALE_KINDS.contains(&kind) {
        return Err(BuildError::InvalidScaleType(kind.to_owned()));
    }
    let opts: ScaleOptions = serde_json::from_value(Value::Object(options.clone()))
        .map_err(|e| BuildError::validation("options", e.to_string()))?;

    let typed = match kind {
        "linear" => {
            let spec = ScaleLinearSpec::new(numeric_domain(&opts.domain)?)
                .with_nice(opts.nice.unwrap_or(false))
                .with_clamp(opts.clamp.unwrap_or(false))
                .with_padding(opts.padding.unwrap_or(0.0));
            TypedScale::Linear(spec.instantiate(numeric_range(&opts.range)?))
        }
        "band" => {
            let padding = opts.padding.unwrap_or(ScaleBand::<Value>::DEFAULT_PADDING);
            TypedScale::Band(
                ScaleBand::new(opts.domain.clone(), numeric_range(&opts.range)?)
                    .with_padding_inner(opts.padding_inner.unwrap_or(padding))
                    .with_padding_outer(opts.padding_outer.unwrap_or(padding)),
            )
        }
        "ordinal" => {
            let mut scale = ScaleOrdinal::new(opts.domain.clone(), opts.range.clone())?;
            if let Some(unknown) = opts.unknown.clone() {
                scale = scale.with_unknown(unknown);
            }
            TypedScale::Ordinal(scale)
        }
        "color" => {
            let stops = opts
                .range
                .iter()
                .map(|v| {
                    v.as_str().ok_or_else(|| {
                        BuildError::validation("range", "expected CSS color strings")
                    })
                })
                .collect::<BuildResult<Vec<_>>>()?;
            TypedScale::Color(
                ScaleColor::from_css(numeric_domain(&opts.domain)?, &stops)?
                    .with_clamp(opts.clamp.unwrap_or(true)),
            )
        }
        "log" => {
            let domain = numeric_domain(&opts.domain)?;
            if domain.0 <= 0.0 || domain.1 <= 0.0 {
                return Err(ScaleError::NonPositiveLogDomain.into());
            }
            let scale = ScaleLog::new(domain, numeric_range(&opts.range)?);
            TypedScale::Log(match opts.base {
                Some(base) => scale.with_base(base),
                None => scale,
            })
        }
        _ => TypedScale::Time(ScaleTime::new(
            numeric_domain(&opts.domain)?,
            numeric_range(&opts.range)?,
        )),
    };

    Ok(Scale {
        domain: opts.domain,
        range: opts.range,
        typed,
    })
}

fn numeric_domain(values: &[Value]) -> BuildResult<(f64, f64)> {
    if values.is_empty() {
        return Err(ScaleError::EmptyDomain.into());
    }
    numeric_pair("domain", values)
}

fn numeric_range(values: &[Value]) -> BuildResult<(f64, f64)> {
    if values.is_empty() {
        return Err(ScaleError::EmptyRange.into());
    }
    numeric_pair("range", values)
}

fn numeric_pair(name: &str, values: &[Value]) -> BuildResult<(f64, f64)> {
    match values {
        [a, b] => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(BuildError::validation(name, "expected two numbers")),
        },
        _ => Err(BuildError::validation(name, "expected two numbers")),
    }
}
