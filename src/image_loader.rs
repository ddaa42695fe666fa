//! Image decoding into pixel buffers
//!
//! This module is the single entry point for turning an encoded image into a
//! [`PixelBuffer`]. Decoding is delegated to the `image` crate, so every
//! format it is built with (PNG, JPEG, GIF, WebP, TIFF, BMP, ...) works. The
//! format is guessed from the file content, not the extension.
//!
//! ## Design
//!
//! Whatever the source layout (grayscale, 16-bit, with or without alpha),
//! pixels are converted to 8-bit RGBA and then packed into `ArgbColor`. An
//! optional [`TargetSize`] scales the image to fit inside that box,
//! preserving its aspect ratio; otherwise native resolution is kept.

use std::io::Cursor;
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use log::debug;

use crate::buffer::PixelBuffer;
use crate::color::ArgbColor;
use crate::config::TargetSize;
use crate::{ColorError, Result};

/// Load an image from disk into a pixel buffer
///
/// # Arguments
///
/// * `path` - Path to the image file
/// * `target` - Optional box to scale the image into
///
/// # Returns
///
/// A `PixelBuffer` with ARGB and HSV values for every pixel
///
/// # Errors
///
/// Returns `ColorError::ImageLoad` if:
/// - File cannot be opened
/// - Format cannot be recognized
/// - Decoding fails
///
/// Returns `ColorError::InvalidArgument` if the target size has an empty side.
///
/// # Example
///
/// ```rust,no_run
/// use hsv_census::image_loader::load_image;
/// use std::path::Path;
///
/// let buffer = load_image(Path::new("photo.jpg"), None)?;
/// println!("Loaded image: {}x{}", buffer.width(), buffer.height());
/// # Ok::<(), hsv_census::ColorError>(())
/// ```
pub fn load_image(path: &Path, target: Option<TargetSize>) -> Result<PixelBuffer> {
    let reader = ImageReader::open(path)
        .map_err(|e| ColorError::image_load(format!("Failed to open {}", path.display()), e))?
        .with_guessed_format()
        .map_err(|e| {
            ColorError::image_load(format!("Failed to read {}", path.display()), e)
        })?;

    let image = reader
        .decode()
        .map_err(|e| ColorError::image_load(format!("Failed to decode {}", path.display()), e))?;

    debug!(
        "decoded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    from_dynamic_image(&image, target)
}

/// Decode an in-memory encoded image into a pixel buffer
pub fn load_from_memory(bytes: &[u8], target: Option<TargetSize>) -> Result<PixelBuffer> {
    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ColorError::image_load("Failed to read image bytes", e))?
        .decode()
        .map_err(|e| ColorError::image_load("Failed to decode image bytes", e))?;

    debug!(
        "decoded {} bytes ({}x{})",
        bytes.len(),
        image.width(),
        image.height()
    );
    from_dynamic_image(&image, target)
}

/// Convert an already decoded image into a pixel buffer
pub fn from_dynamic_image(image: &DynamicImage, target: Option<TargetSize>) -> Result<PixelBuffer> {
    let rgba = match target {
        Some(size) => {
            if size.width == 0 || size.height == 0 {
                return Err(ColorError::invalid_argument(
                    "target_size",
                    format!("{}x{} has an empty side", size.width, size.height),
                ));
            }
            let resized = image.resize(size.width, size.height, FilterType::Triangle);
            debug!(
                "resampled {}x{} to {}x{}",
                image.width(),
                image.height(),
                resized.width(),
                resized.height()
            );
            resized.to_rgba8()
        }
        None => image.to_rgba8(),
    };

    let (width, height) = rgba.dimensions();
    let pixels = rgba
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            ArgbColor::from_argb(a, r, g, b)
        })
        .collect();

    PixelBuffer::from_argb(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    fn encode_png(image: &DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_from_dynamic_image_keeps_channels() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([10, 20, 30, 40]));
        img.put_pixel(1, 0, Rgba([255, 0, 0, 255]));

        let buffer = from_dynamic_image(&DynamicImage::ImageRgba8(img), None).unwrap();
        assert_eq!(buffer.pixel(0, 0), Some(ArgbColor::from_argb(40, 10, 20, 30)));
        assert_eq!(buffer.pixel(1, 0), Some(ArgbColor::from_rgb(255, 0, 0)));
    }

    #[test]
    fn test_rgb_source_becomes_opaque() {
        let img = RgbImage::from_pixel(3, 2, Rgb([0, 255, 0]));
        let buffer = from_dynamic_image(&DynamicImage::ImageRgb8(img), None).unwrap();
        assert_eq!(buffer.len(), 6);
        assert!(buffer.argb().iter().all(|c| c.a() == 255 && c.g() == 255));
    }

    #[test]
    fn test_target_size_scales_to_fit() {
        let img = RgbImage::from_pixel(40, 20, Rgb([0, 0, 255]));
        let target = TargetSize {
            width: 10,
            height: 10,
        };
        let buffer = from_dynamic_image(&DynamicImage::ImageRgb8(img), Some(target)).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (10, 5));
        assert_eq!(buffer.pixel(4, 2), Some(ArgbColor::from_rgb(0, 0, 255)));
    }

    #[test]
    fn test_empty_target_size_rejected() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        let target = TargetSize {
            width: 0,
            height: 4,
        };
        assert!(matches!(
            from_dynamic_image(&img, Some(target)),
            Err(ColorError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_load_from_memory_png() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(5, 4, Rgb([255, 128, 0])));
        let buffer = load_from_memory(&encode_png(&img), None).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (5, 4));
        assert_eq!(buffer.pixel(2, 3), Some(ArgbColor::from_rgb(255, 128, 0)));
    }

    #[test]
    fn test_garbage_bytes_fail_to_load() {
        let result = load_from_memory(b"definitely not an image", None);
        assert!(matches!(result, Err(ColorError::ImageLoad { .. })));
    }

    #[test]
    fn test_missing_file_fails_to_load() {
        let result = load_image(Path::new("/nonexistent/photo.png"), None);
        assert!(matches!(result, Err(ColorError::ImageLoad { .. })));
    }
}
