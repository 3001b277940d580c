//! Render configuration.

use glint_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::Color;

/// Offset along the surface normal applied before casting shadow and bounce
/// rays. Smaller values show acne on curved surfaces, larger ones detach
/// shadows from their casters.
pub const DEFAULT_SURFACE_EPSILON: f32 = 1e-3;

/// Background color (`#25A6D9`) returned by rays that miss every sphere.
pub const DEFAULT_BACKGROUND: Color = Vec3::new(37.0 / 255.0, 166.0 / 255.0, 217.0 / 255.0);

/// Surface color before shadowing.
pub const DEFAULT_TINT: Color = Vec3::new(1.0, 0.95, 0.85);

/// How a lit surface point is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shading {
    /// Constant tint times visibility
    #[default]
    Tint,
    /// Normal visualisation `n/2 + 0.5` times visibility
    Normals,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Number of surface interactions traced per sample (1 = direct light only)
    pub max_depth: u32,
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Surface color used by [`Shading::Tint`]
    pub tint: Color,
    pub shading: Shading,
    /// Normal offset for secondary rays
    pub surface_epsilon: f32,
    /// Display block size; only one pixel per `scale x scale` block is traced
    pub scale: u32,
    /// Base seed for the per-pixel generators
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            background: DEFAULT_BACKGROUND,
            tint: DEFAULT_TINT,
            shading: Shading::Tint,
            surface_epsilon: DEFAULT_SURFACE_EPSILON,
            scale: 1,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Check the configuration before a renderer is built from it.
    pub fn validate(&self) -> RenderResult<()> {
        if self.scale == 0 {
            return Err(RenderError::InvalidScale(self.scale));
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if !self.surface_epsilon.is_finite() || self.surface_epsilon < 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "surface_epsilon must be finite and non-negative, got {}",
                self.surface_epsilon
            )));
        }
        if !self.background.is_finite() || !self.tint.is_finite() {
            return Err(RenderError::InvalidConfig(
                "colors must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
