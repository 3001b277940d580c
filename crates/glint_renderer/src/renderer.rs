//! Renderer context.
//!
//! Owns the scene, the per-frame sample buffer, the accumulation buffer and
//! the display buffer. Each call to [`Renderer::render_frame`] traces one
//! sample per cell in parallel, folds it into the running mean, then
//! presents.

use std::time::Instant;

use crate::accumulator::Accumulator;
use crate::buffer::{compute_extent, DisplayBuffer, ImageBuffer};
use crate::error::{RenderError, RenderResult};
use crate::kernel::{render_samples, FrameContext};
use crate::{Camera, RenderConfig, Scene};

/// Progressive renderer for a fixed output size.
pub struct Renderer {
    config: RenderConfig,
    scene: Scene,
    width: u32,
    height: u32,
    samples: ImageBuffer,
    accumulator: Accumulator,
    display: DisplayBuffer,
    /// Frames rendered over the whole session, never reset
    frame: u64,
}

impl Renderer {
    /// Create a renderer with an empty default scene.
    pub fn new(width: u32, height: u32, config: RenderConfig) -> RenderResult<Self> {
        Self::with_scene(width, height, config, Scene::new())
    }

    /// Create a renderer for an existing scene.
    pub fn with_scene(
        width: u32,
        height: u32,
        config: RenderConfig,
        scene: Scene,
    ) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        config.validate()?;

        let display = DisplayBuffer::new(width, height, config.scale)?;
        let cells_x = compute_extent(width, config.scale);
        let cells_y = compute_extent(height, config.scale);

        log::info!(
            "Renderer {}x{} (scale {}, tracing {}x{} cells, depth {})",
            width,
            height,
            config.scale,
            cells_x,
            cells_y,
            config.max_depth
        );

        Ok(Self {
            config,
            scene,
            width,
            height,
            samples: ImageBuffer::new(cells_x, cells_y),
            accumulator: Accumulator::new(cells_x, cells_y),
            display,
            frame: 0,
        })
    }

    /// Add a sphere. Only possible between frames.
    pub fn add_sphere(&mut self, x: f32, y: f32, z: f32, radius: f32) -> RenderResult<usize> {
        let index = self.scene.add_sphere(x, y, z, radius)?;
        self.accumulator.reset();
        Ok(index)
    }

    /// Add a light. Only possible between frames.
    pub fn add_light(&mut self, x: f32, y: f32, z: f32, radius: f32) -> RenderResult<usize> {
        let index = self.scene.add_light(x, y, z, radius)?;
        self.accumulator.reset();
        Ok(index)
    }

    /// Render one frame and return the updated display.
    ///
    /// `moved` discards the accumulated history first, so the returned image
    /// is exactly this frame's samples.
    pub fn render_frame(&mut self, camera: &Camera, moved: bool) -> &DisplayBuffer {
        if moved {
            self.reset();
        }

        self.frame += 1;
        let start = Instant::now();

        let ctx = FrameContext {
            camera,
            scene: &self.scene,
            config: &self.config,
            width: self.width,
            height: self.height,
            frame: self.frame,
        };
        render_samples(&ctx, &mut self.samples);
        let traced = start.elapsed();

        // Sample, accumulation and display sizes are fixed at construction
        if let Err(e) = self
            .accumulator
            .add_frame(&self.samples)
            .and_then(|_| self.display.present(self.accumulator.buffer()))
        {
            log::error!("Frame {} dropped: {}", self.frame, e);
        }

        log::debug!(
            "Frame {} (iteration {}) traced in {:?}, total {:?}",
            self.frame,
            self.accumulator.iterations(),
            traced,
            start.elapsed()
        );

        &self.display
    }

    /// Discard accumulated frames.
    pub fn reset(&mut self) {
        if self.accumulator.iterations() > 0 {
            log::debug!(
                "Accumulation reset after {} iterations",
                self.accumulator.iterations()
            );
        }
        self.accumulator.reset();
    }

    /// Frames averaged since the last reset.
    pub fn iterations(&self) -> u32 {
        self.accumulator.iterations()
    }

    /// Frames rendered since construction.
    pub fn frames_rendered(&self) -> u64 {
        self.frame
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The running mean at compute resolution.
    pub fn accumulation(&self) -> &ImageBuffer {
        self.accumulator.buffer()
    }

    pub fn display(&self) -> &DisplayBuffer {
        &self.display
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
