//! Channel-first image buffer.

use serde::{Deserialize, Serialize};

use crate::error::{PoseTypesError, Result};

/// An image stored as a flat `f32` buffer in CHW (channel-height-width)
/// layout.
///
/// CHW is the layout neural-network inputs expect, so the pipeline keeps
/// images in this form from decode to inference. Pixel values are in
/// `[0, 255]` until the indexer's final normalization divides them into
/// `[0, 1]`.
///
/// All geometric and value transforms (`cropped`, `scaled`, `clamped`)
/// return fresh buffers; an existing `ChwImage` is never mutated through
/// them.
///
/// # Example
///
/// ```
/// use pose_types::ChwImage;
///
/// let image = ChwImage::zeros(3, 4, 8);
/// assert_eq!(image.dims(), (3, 4, 8));
/// assert_eq!(image.len(), 96);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChwImage {
    data: Vec<f32>,
    channels: usize,
    height: usize,
    width: usize,
}

impl ChwImage {
    /// Creates an image from a flat CHW buffer.
    ///
    /// # Errors
    ///
    /// Returns `PoseTypesError::BufferLenMismatch` if `data.len()` is not
    /// `channels * height * width`.
    pub fn new(data: Vec<f32>, channels: usize, height: usize, width: usize) -> Result<Self> {
        if data.len() != channels * height * width {
            return Err(PoseTypesError::buffer_len_mismatch(
                channels,
                height,
                width,
                data.len(),
            ));
        }
        Ok(Self {
            data,
            channels,
            height,
            width,
        })
    }

    /// Creates a zero-filled image.
    #[must_use]
    pub fn zeros(channels: usize, height: usize, width: usize) -> Self {
        Self {
            data: vec![0.0; channels * height * width],
            channels,
            height,
            width,
        }
    }

    /// Returns `(channels, height, width)`.
    #[must_use]
    pub const fn dims(&self) -> (usize, usize, usize) {
        (self.channels, self.height, self.width)
    }

    /// Returns the channel count.
    #[must_use]
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the total buffer length (`channels * height * width`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the flat CHW buffer.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Consumes the image and returns the flat CHW buffer.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Returns the pixels of channel `c` as a contiguous slice.
    ///
    /// # Panics
    ///
    /// Panics if `c >= channels`.
    #[must_use]
    pub fn channel(&self, c: usize) -> &[f32] {
        let plane = self.height * self.width;
        &self.data[c * plane..(c + 1) * plane]
    }

    /// Returns the pixels of channel `c` as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `c >= channels`.
    pub fn channel_mut(&mut self, c: usize) -> &mut [f32] {
        let plane = self.height * self.width;
        &mut self.data[c * plane..(c + 1) * plane]
    }

    /// Returns the value at `(channel, row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of range.
    #[must_use]
    pub fn pixel(&self, c: usize, y: usize, x: usize) -> f32 {
        self.data[(c * self.height + y) * self.width + x]
    }

    /// Returns a copy cropped to `[x0, x1) x [y0, y1)` on every channel.
    ///
    /// # Errors
    ///
    /// Returns `PoseTypesError::InvalidCrop` if the window is empty or
    /// extends past the image bounds.
    pub fn cropped(&self, x0: usize, x1: usize, y0: usize, y1: usize) -> Result<Self> {
        if x0 >= x1 || y0 >= y1 {
            return Err(PoseTypesError::invalid_crop(format!(
                "empty window [{x0}, {x1}) x [{y0}, {y1})"
            )));
        }
        if x1 > self.width || y1 > self.height {
            return Err(PoseTypesError::invalid_crop(format!(
                "window [{x0}, {x1}) x [{y0}, {y1}) exceeds {}x{}",
                self.width, self.height
            )));
        }

        let new_w = x1 - x0;
        let new_h = y1 - y0;
        let mut data = Vec::with_capacity(self.channels * new_h * new_w);
        for c in 0..self.channels {
            let plane = self.channel(c);
            for y in y0..y1 {
                data.extend_from_slice(&plane[y * self.width + x0..y * self.width + x1]);
            }
        }

        Ok(Self {
            data,
            channels: self.channels,
            height: new_h,
            width: new_w,
        })
    }

    /// Returns a copy with every value multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            data: self.data.iter().map(|v| v * factor).collect(),
            channels: self.channels,
            height: self.height,
            width: self.width,
        }
    }

    /// Returns a copy with every value clamped to `[lo, hi]`.
    #[must_use]
    pub fn clamped(&self, lo: f32, hi: f32) -> Self {
        Self {
            data: self.data.iter().map(|v| v.clamp(lo, hi)).collect(),
            channels: self.channels,
            height: self.height,
            width: self.width,
        }
    }
}
