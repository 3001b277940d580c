//! Errors raised while setting up a render.
//!
//! Rendering a frame never fails; everything here is reported at scene or
//! renderer setup time.

use std::fmt;

use thiserror::Error;

/// Which scene collection a primitive belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Sphere,
    Light,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::Sphere => f.write_str("sphere"),
            PrimitiveKind::Light => f.write_str("light"),
        }
    }
}

/// Errors that can occur while building a scene or a renderer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("{kind} capacity of {capacity} exceeded")]
    CapacityExceeded { kind: PrimitiveKind, capacity: usize },

    #[error("Invalid {kind}: {reason}")]
    InvalidPrimitive { kind: PrimitiveKind, reason: String },

    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Display scale must be at least 1, got {0}")]
    InvalidScale(u32),

    #[error("Buffer size mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for setup operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RenderError::CapacityExceeded {
            kind: PrimitiveKind::Light,
            capacity: 16,
        };
        assert_eq!(err.to_string(), "light capacity of 16 exceeded");

        let err = RenderError::DimensionMismatch {
            expected: (4, 2),
            found: (2, 2),
        };
        assert_eq!(
            err.to_string(),
            "Buffer size mismatch: expected (4, 2), found (2, 2)"
        );
    }
}
