// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while registering, resolving, building and rendering visualizations.

use thiserror::Error;
use vizspec_scale::ScaleError;

use crate::Backend;

/// Every failure the build pipeline can surface.
///
/// Errors are never caught or downgraded inside the pipeline: whatever a validator,
/// implementation or renderer returns reaches the caller of [`Builder::build`] unchanged.
///
/// [`Builder::build`]: crate::Builder::build
#[derive(Error, Debug)]
pub enum BuildError {
    /// A required property was absent and has no default.
    #[error("type `{type_name}` requires property `{property}`")]
    MissingRequiredProperty {
        /// The type being resolved.
        type_name: String,
        /// The missing property.
        property: String,
    },

    /// The spec names a type that is not registered (or names none at all).
    #[error("unknown visualization type `{0}`")]
    UnknownType(String),

    /// A property value was rejected by a validator.
    #[error("invalid value for property `{property}`: {message}")]
    PropertyValidation {
        /// The offending property.
        property: String,
        /// Why it was rejected.
        message: String,
    },

    /// A type definition could not be registered.
    #[error("invalid type definition: {0}")]
    InvalidTypeDefinition(String),

    /// `create_scale` was asked for a kind it does not know.
    #[error("unknown scale type `{0}`")]
    InvalidScaleType(String),

    /// A scale was asked for an operation its kind does not provide.
    #[error("{scale} scales do not support `{method}`")]
    MethodNotSupported {
        /// The operation, e.g. `invert`.
        method: &'static str,
        /// The scale kind, e.g. `ordinal`.
        scale: &'static str,
    },

    /// A build re-entered a `(type, properties)` frame it was already building, or nested
    /// deeper than the configured limit.
    #[error("cyclic build of type `{type_name}` at depth {depth}")]
    CyclicBuild {
        /// The type whose build closed the cycle.
        type_name: String,
        /// Nesting depth at which it was detected.
        depth: usize,
    },

    /// A renderable was asked to render to a backend it does not support.
    #[error("`{renderable_type}` cannot render to the {backend} backend")]
    UnsupportedBackend {
        /// The renderable's type.
        renderable_type: String,
        /// The requested backend.
        backend: Backend,
    },

    /// Scale options were structurally valid but rejected by the scale.
    #[error("invalid scale options: {0}")]
    InvalidScaleOptions(#[from] ScaleError),

    /// A failure raised by collaborator code inside an implementation or renderer.
    #[error(transparent)]
    Implementation(#[from] anyhow::Error),
}

impl BuildError {
    /// Shorthand for [`BuildError::PropertyValidation`].
    pub fn validation(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PropertyValidation {
            property: property.into(),
            message: message.into(),
        }
    }
}

/// Result alias for the build pipeline.
pub type BuildResult<T> = Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = BuildError::MissingRequiredProperty {
            type_name: "bar".into(),
            property: "data".into(),
        };
        assert_eq!(err.to_string(), "type `bar` requires property `data`");

        let err = BuildError::MethodNotSupported {
            method: "invert",
            scale: "ordinal",
        };
        assert_eq!(err.to_string(), "ordinal scales do not support `invert`");

        let err = BuildError::UnsupportedBackend {
            renderable_type: "surface".into(),
            backend: Backend::Canvas,
        };
        assert_eq!(err.to_string(), "`surface` cannot render to the canvas backend");
    }

    #[test]
    fn collaborator_errors_pass_through_transparently() {
        let err: BuildError = anyhow::anyhow!("series must not be empty").into();
        assert!(matches!(err, BuildError::Implementation(_)));
        assert_eq!(err.to_string(), "series must not be empty");
    }

    #[test]
    fn scale_errors_convert() {
        let err: BuildError = ScaleError::EmptyRange.into();
        assert!(matches!(err, BuildError::InvalidScaleOptions(ScaleError::EmptyRange)));
    }
}
