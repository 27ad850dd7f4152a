//! Image decoding and feature extraction
//!
//! Produces the feature bundle handed to the quality detector: a resized RGB
//! copy of the upload and an HSV colour histogram of the original.

use std::io::Cursor;

use image::{imageops::FilterType, DynamicImage, ImageError, ImageReader, Limits, RgbImage};

use crate::config::ImageConfig;
use crate::error::{AppError, AppResult};

/// Hue is stored on a 0-179 scale (degrees / 2) so it fits in a byte
const HUE_RANGE: u32 = 180;

/// Floor for the decoder allocation cap, covering decoder working buffers
const MIN_DECODE_ALLOC: u64 = 16 * 1024 * 1024;

/// Features extracted from an uploaded image
#[derive(Debug, Clone)]
pub struct ImageFeatures {
    /// Width of the uploaded image before resizing
    pub width: u32,
    /// Height of the uploaded image before resizing
    pub height: u32,
    /// Upload resized to the configured square target size
    pub resized: RgbImage,
    /// L2-normalised H, S and V histograms, concatenated
    pub color_histogram: Vec<f32>,
}

/// Decodes uploads and extracts [`ImageFeatures`]
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    target_size: u32,
    hist_bins: usize,
    max_dimension: u32,
}

impl ImageProcessor {
    pub fn new(config: &ImageConfig) -> Self {
        Self {
            target_size: config.target_size.max(1),
            hist_bins: config.hist_bins.max(1),
            max_dimension: config.max_dimension.max(1),
        }
    }

    /// Decoder limits derived from `max_dimension`
    fn limits(&self) -> Limits {
        let side = u64::from(self.max_dimension);
        let mut limits = Limits::default();
        limits.max_image_width = Some(self.max_dimension);
        limits.max_image_height = Some(self.max_dimension);
        // Room for one RGBA buffer at the largest accepted size
        limits.max_alloc = Some((side * side * 4).max(MIN_DECODE_ALLOC));
        limits
    }

    /// Decode image bytes, guessing the format from their content
    ///
    /// Images wider or taller than `max_dimension` are rejected from their
    /// header, before any pixel data is decoded.
    pub fn load(&self, data: &[u8]) -> AppResult<DynamicImage> {
        let mut reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| AppError::ImageProcessing(e.to_string()))?;
        reader.limits(self.limits());

        reader.decode().map_err(|e| match e {
            ImageError::Limits(_) => AppError::ImageProcessing(format!(
                "Image exceeds the maximum size of {0}x{0} pixels",
                self.max_dimension
            )),
            other => AppError::ImageProcessing(other.to_string()),
        })
    }

    /// Resize to the target size
    pub fn resize(&self, image: &RgbImage) -> RgbImage {
        image::imageops::resize(image, self.target_size, self.target_size, FilterType::Triangle)
    }

    /// HSV histogram with `hist_bins` bins per channel, each channel L2-normalised
    pub fn color_histogram(&self, image: &RgbImage) -> Vec<f32> {
        let bins = self.hist_bins;
        let mut hue = vec![0f32; bins];
        let mut saturation = vec![0f32; bins];
        let mut value = vec![0f32; bins];

        for pixel in image.pixels() {
            let [r, g, b] = pixel.0;
            let (h, s, v) = rgb_to_hsv(r, g, b);
            hue[bin_index(h, bins)] += 1.0;
            saturation[bin_index(s, bins)] += 1.0;
            value[bin_index(v, bins)] += 1.0;
        }

        let mut histogram = Vec::with_capacity(bins * 3);
        for mut channel in [hue, saturation, value] {
            l2_normalize(&mut channel);
            histogram.extend(channel);
        }
        histogram
    }

    /// Full pipeline: decode, resize and compute the colour histogram
    pub fn extract(&self, data: &[u8]) -> AppResult<ImageFeatures> {
        let original = match self.load(data)? {
            DynamicImage::ImageRgb8(rgb) => rgb,
            other => other.into_rgb8(),
        };

        Ok(ImageFeatures {
            width: original.width(),
            height: original.height(),
            resized: self.resize(&original),
            color_histogram: self.color_histogram(&original),
        })
    }
}

/// Bins span the byte range 0-255 evenly
fn bin_index(value: u8, bins: usize) -> usize {
    (usize::from(value) * bins / 256).min(bins - 1)
}

fn l2_normalize(channel: &mut [f32]) {
    let norm = channel.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        channel.iter_mut().for_each(|x| *x /= norm);
    }
}

/// Convert RGB to 8-bit HSV: hue 0-179, saturation and value 0-255
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (rf, gf, bf) = (f32::from(r), f32::from(g), f32::from(b));
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let saturation = if max > 0.0 { 255.0 * delta / max } else { 0.0 };

    let degrees = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };
    let hue = ((degrees / 2.0).round() as u32) % HUE_RANGE;

    (hue as u8, saturation.round() as u8, max as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn processor() -> ImageProcessor {
        ImageProcessor::new(&ImageConfig::default())
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = DynamicImage::ImageLuma8(image::GrayImage::new(width, height));
        let mut bytes = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_rgb_to_hsv_primaries() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0, 255, 255));
        assert_eq!(rgb_to_hsv(0, 255, 0), (60, 255, 255));
        assert_eq!(rgb_to_hsv(0, 0, 255), (120, 255, 255));
        assert_eq!(rgb_to_hsv(0, 0, 0), (0, 0, 0));
        assert_eq!(rgb_to_hsv(128, 128, 128), (0, 0, 128));
    }

    #[test]
    fn test_histogram_shape_and_norm() {
        let image = RgbImage::from_pixel(10, 10, Rgb([255, 165, 0]));
        let histogram = processor().color_histogram(&image);
        assert_eq!(histogram.len(), 768);

        for channel in histogram.chunks(256) {
            let norm: f32 = channel.iter().map(|x| x * x).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_extract_resizes_and_keeps_dimensions() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(500, 300, Rgb([0, 200, 0])));
        let mut bytes = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let features = processor().extract(&bytes).unwrap();
        assert_eq!((features.width, features.height), (500, 300));
        assert_eq!(features.resized.dimensions(), (224, 224));
        assert_eq!(features.color_histogram.len(), 768);
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = processor().extract(b"This is not an image");
        assert!(matches!(result, Err(AppError::ImageProcessing(_))));
    }

    #[test]
    fn test_custom_bin_count() {
        let processor = ImageProcessor::new(&ImageConfig {
            target_size: 32,
            hist_bins: 16,
            ..ImageConfig::default()
        });
        let image = RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]));
        assert_eq!(processor.color_histogram(&image).len(), 48);
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        // A 12000 pixel side is over the default limit whatever the file size
        for (width, height) in [(12000, 1), (1, 12000)] {
            let result = processor().extract(&png(width, height));
            match result {
                Err(AppError::ImageProcessing(msg)) => assert!(msg.contains("maximum size")),
                other => panic!("expected size rejection for {width}x{height}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_configured_max_dimension() {
        let processor = ImageProcessor::new(&ImageConfig {
            max_dimension: 64,
            ..ImageConfig::default()
        });
        assert!(processor.extract(&png(64, 64)).is_ok());
        assert!(matches!(
            processor.extract(&png(65, 10)),
            Err(AppError::ImageProcessing(_))
        ));
    }

    #[test]
    fn test_grayscale_converted_to_rgb() {
        let features = processor().extract(&png(40, 20)).unwrap();
        assert_eq!((features.width, features.height), (40, 20));
        assert_eq!(features.resized.dimensions(), (224, 224));
    }
}
