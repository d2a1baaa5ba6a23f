//! Image file decoding into CHW buffers.

use std::path::Path;

use pose_types::ChwImage;

use crate::error::{DatasetError, Result};

/// Decodes an image file into a 3-channel CHW buffer.
///
/// Any input format the `image` crate understands is accepted; the decoded
/// image is converted to RGB. Values are `f32` in `[0, 255]` -- the
/// indexer applies the `[0, 1]` normalization after augmentation.
///
/// # Errors
///
/// Returns `DatasetError::ImageLoad` if the file cannot be read or decoded.
pub fn load_image(path: &Path) -> Result<ChwImage> {
    let decoded = image::open(path)
        .map_err(|e| DatasetError::image_load(path.to_string_lossy(), e.to_string()))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    let (width, height) = (width as usize, height as usize);

    let mut data = vec![0.0f32; 3 * height * width];
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        for c in 0..3 {
            data[(c * height + y) * width + x] = f32::from(pixel[c]);
        }
    }

    ChwImage::new(data, 3, height, width)
        .map_err(|e| DatasetError::image_load(path.to_string_lossy(), e.to_string()))
}
