//! Pixel buffers and display conversion.
//!
//! Buffers are row-major with `y` growing upward, matching the pixel
//! coordinates the ray generator uses. Writers that expect the first row at
//! the top have to flip.

use glint_math::Interval;
use rayon::prelude::*;

use crate::error::{RenderError, RenderResult};
use crate::Color;

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * Interval::UNIT.clamp(linear_to_gamma(color.x))) as u8;
    let g = (255.0 * Interval::UNIT.clamp(linear_to_gamma(color.y))) as u8;
    let b = (255.0 * Interval::UNIT.clamp(linear_to_gamma(color.z))) as u8;
    [r, g, b, 255]
}

/// A width x height grid of linear colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Create a buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Fail unless `other` has the same dimensions.
    pub fn check_same_size(&self, other: &ImageBuffer) -> RenderResult<()> {
        if self.dimensions() != other.dimensions() {
            return Err(RenderError::DimensionMismatch {
                expected: self.dimensions(),
                found: other.dimensions(),
            });
        }
        Ok(())
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }
}

/// Number of traced cells along an axis of `extent` output pixels.
#[inline]
pub fn compute_extent(extent: u32, scale: u32) -> u32 {
    extent.div_ceil(scale)
}

/// Output-resolution image built by block-replicating the accumulation grid.
///
/// Output pixel `(i, j)` shows the traced cell anchored at
/// `(i - i % scale, j - j % scale)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayBuffer {
    image: ImageBuffer,
    scale: u32,
}

impl DisplayBuffer {
    /// Create a black display buffer of the given output size.
    pub fn new(width: u32, height: u32, scale: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        if scale == 0 {
            return Err(RenderError::InvalidScale(scale));
        }
        Ok(Self {
            image: ImageBuffer::new(width, height),
            scale,
        })
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Dimensions of the grid this buffer expects from [`Self::present`].
    pub fn compute_dimensions(&self) -> (u32, u32) {
        (
            compute_extent(self.image.width, self.scale),
            compute_extent(self.image.height, self.scale),
        )
    }

    /// Copy `accumulated` into the display, replicating each cell over its block.
    pub fn present(&mut self, accumulated: &ImageBuffer) -> RenderResult<()> {
        let expected = self.compute_dimensions();
        if accumulated.dimensions() != expected {
            return Err(RenderError::DimensionMismatch {
                expected,
                found: accumulated.dimensions(),
            });
        }

        let scale = self.scale as usize;
        let width = self.image.width as usize;
        let cells_per_row = accumulated.width as usize;

        self.image
            .pixels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(j, row)| {
                let cell_row = &accumulated.pixels[(j / scale) * cells_per_row..][..cells_per_row];
                for (i, pixel) in row.iter_mut().enumerate() {
                    *pixel = cell_row[i / scale];
                }
            });

        Ok(())
    }

    pub fn image(&self) -> &ImageBuffer {
        &self.image
    }

    /// Get the output pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.image.get(x, y)
    }

    pub fn width(&self) -> u32 {
        self.image.width
    }

    pub fn height(&self) -> u32 {
        self.image.height
    }
}
