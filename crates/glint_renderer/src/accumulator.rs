//! Progressive accumulation of per-frame samples.

use std::num::NonZeroU32;

use rayon::prelude::*;

use crate::buffer::ImageBuffer;
use crate::error::RenderResult;

/// Fold one frame of samples into a running mean.
///
/// With `n = frame_index`, every pixel becomes `buffer * (n-1)/n + sample/n`.
/// The first frame copies the samples verbatim so stale contents (including
/// NaN) never leak through a zero weight.
pub fn accumulate(
    buffer: &mut ImageBuffer,
    samples: &ImageBuffer,
    frame_index: NonZeroU32,
) -> RenderResult<()> {
    buffer.check_same_size(samples)?;

    let n = frame_index.get();
    if n == 1 {
        buffer.pixels.copy_from_slice(&samples.pixels);
        return Ok(());
    }

    let n = n as f32;
    let keep = (n - 1.0) / n;
    buffer
        .pixels
        .par_iter_mut()
        .zip(samples.pixels.par_iter())
        .for_each(|(acc, sample)| {
            *acc = *acc * keep + *sample / n;
        });

    Ok(())
}

/// Running average of samples since the last camera move.
#[derive(Debug, Clone)]
pub struct Accumulator {
    buffer: ImageBuffer,
    iterations: u32,
}

impl Accumulator {
    /// Create an empty accumulator.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: ImageBuffer::new(width, height),
            iterations: 0,
        }
    }

    /// Forget all history; the next frame starts a new mean.
    pub fn reset(&mut self) {
        self.iterations = 0;
    }

    /// Add one frame of samples and return the new frame count.
    pub fn add_frame(&mut self, samples: &ImageBuffer) -> RenderResult<u32> {
        let frame_index = NonZeroU32::MIN.saturating_add(self.iterations);
        accumulate(&mut self.buffer, samples, frame_index)?;
        self.iterations = frame_index.get();
        Ok(self.iterations)
    }

    /// Frames averaged since the last reset.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn buffer(&self) -> &ImageBuffer {
        &self.buffer
    }
}
