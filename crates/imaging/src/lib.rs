//! Image normalization for captured photos.
//!
//! Photos arrive from the capture UI as base64 data-URL strings and can be
//! arbitrarily large. [`normalize`] bounds them: anything wider than the
//! configured maximum is scaled down proportionally and everything is
//! re-encoded as JPEG at a lossy quality, which keeps stored reports at a
//! predictable size. Inputs that cannot be decoded are reported as errors;
//! the materialization pipeline absorbs those and keeps the original value.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::imageops::FilterType;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("not a base64 image data URL")]
    InvalidDataUrl,

    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("image decode failed: {0}")]
    Decode(#[source] image::ImageError),

    #[error("image encode failed: {0}")]
    Encode(#[source] image::ImageError),
}

/// Bounds applied by [`normalize`].
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Images wider than this are scaled down; narrower ones are left alone.
    pub max_width: u32,
    /// JPEG quality of the re-encoded output, 1-100.
    pub quality: u8,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_width: 1024,
            quality: 70,
        }
    }
}

/// Splits a `data:<mime>;base64,<payload>` string into mime type and bytes.
pub fn parse_data_url(data_url: &str) -> Result<(&str, Vec<u8>), ImageError> {
    let rest = data_url.strip_prefix("data:").ok_or(ImageError::InvalidDataUrl)?;
    let (mime, payload) = rest.split_once(";base64,").ok_or(ImageError::InvalidDataUrl)?;
    let bytes = STANDARD.decode(payload.trim())?;
    Ok((mime, bytes))
}

/// Decodes a data-URL image and returns its pixel dimensions.
pub fn dimensions(data_url: &str) -> Result<(u32, u32), ImageError> {
    let (_, bytes) = parse_data_url(data_url)?;
    let decoded = image::load_from_memory(&bytes).map_err(ImageError::Decode)?;
    Ok((decoded.width(), decoded.height()))
}

/// Resizes and recompresses a data-URL image.
///
/// If the decoded image is wider than `opts.max_width`, both dimensions are
/// scaled proportionally so the width equals the maximum; narrower images
/// are never upscaled. The result is always re-encoded as JPEG at
/// `opts.quality` and returned as a `data:image/jpeg;base64,` URL.
pub fn normalize(data_url: &str, opts: &NormalizeOptions) -> Result<String, ImageError> {
    let (mime, bytes) = parse_data_url(data_url)?;
    let decoded = image::load_from_memory(&bytes).map_err(ImageError::Decode)?;

    let (width, height) = (decoded.width(), decoded.height());
    let resized = if width > opts.max_width {
        let scale = opts.max_width as f64 / width as f64;
        let new_height = ((height as f64 * scale).round() as u32).max(1);
        log::debug!(
            "scaling {mime} image {width}x{height} -> {}x{new_height}",
            opts.max_width
        );
        decoded.resize_exact(opts.max_width, new_height, FilterType::Triangle)
    } else {
        decoded
    };

    // JPEG has no alpha channel, so flatten before encoding.
    let flattened = image::DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut out = Vec::new();
    let mut cursor = Cursor::new(&mut out);
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, opts.quality);
    flattened
        .write_with_encoder(encoder)
        .map_err(ImageError::Encode)?;

    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&out)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_data_url(width: u32, height: u32) -> String {
        let pixels = image::RgbImage::from_pixel(width, height, image::Rgb([40, 90, 160]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(pixels)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        format!("data:image/png;base64,{}", STANDARD.encode(&bytes))
    }

    #[test]
    fn test_wide_image_is_scaled_to_max_width() {
        let input = png_data_url(2048, 512);
        let output = normalize(&input, &NormalizeOptions::default()).unwrap();

        assert!(output.starts_with("data:image/jpeg;base64,"));
        let (width, height) = dimensions(&output).unwrap();
        assert_eq!(width, 1024);
        assert_eq!(height, 256);
    }

    #[test]
    fn test_odd_aspect_ratio_rounds_height() {
        let input = png_data_url(1500, 1000);
        let output = normalize(
            &input,
            &NormalizeOptions {
                max_width: 1000,
                quality: 70,
            },
        )
        .unwrap();

        let (width, height) = dimensions(&output).unwrap();
        assert_eq!(width, 1000);
        // 1000 / 1500 * 1000 = 666.66..., rounded.
        assert!((666..=667).contains(&height));
    }

    #[test]
    fn test_narrow_image_keeps_dimensions() {
        let input = png_data_url(640, 480);
        let output = normalize(&input, &NormalizeOptions::default()).unwrap();

        let (width, height) = dimensions(&output).unwrap();
        assert_eq!((width, height), (640, 480));
    }

    #[test]
    fn test_output_is_always_jpeg() {
        let input = png_data_url(10, 10);
        let output = normalize(&input, &NormalizeOptions::default()).unwrap();
        let (mime, _) = parse_data_url(&output).unwrap();
        assert_eq!(mime, "image/jpeg");
    }

    #[test]
    fn test_garbage_payload_is_a_decode_error() {
        let input = format!("data:image/png;base64,{}", STANDARD.encode(b"not an image"));
        assert!(matches!(
            normalize(&input, &NormalizeOptions::default()),
            Err(ImageError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_prefix_is_invalid() {
        assert!(matches!(
            normalize("iVBORw0KGgo=", &NormalizeOptions::default()),
            Err(ImageError::InvalidDataUrl)
        ));
    }

    #[test]
    fn test_bad_base64_is_reported() {
        assert!(matches!(
            normalize("data:image/png;base64,@@@@", &NormalizeOptions::default()),
            Err(ImageError::Base64(_))
        ));
    }
}
