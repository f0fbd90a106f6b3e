//! Frame decoding to an intensity grid

use image::GrayImage;

use crate::error::ScoringError;

/// Decode an encoded still frame (PNG or JPEG) to single-channel intensity
///
/// # Errors
///
/// Returns `ScoringError::DecodingError` for unreadable or empty images
pub fn decode_frame(bytes: &[u8]) -> Result<GrayImage, ScoringError> {
    let decoded = image::load_from_memory(bytes)?;
    let gray = decoded.to_luma8();
    if gray.width() == 0 || gray.height() == 0 {
        return Err(ScoringError::DecodingError("frame has no pixels".to_string()));
    }
    log::debug!("Decoded frame: {}x{}", gray.width(), gray.height());
    Ok(gray)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
    use std::io::Cursor;

    #[test]
    fn test_decode_png_to_luma() {
        let rgb = RgbImage::from_pixel(8, 6, Rgb([255, 255, 255]));
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut bytes, ImageOutputFormat::Png)
            .unwrap();

        let gray = decode_frame(bytes.get_ref()).unwrap();
        assert_eq!(gray.dimensions(), (8, 6));
        assert_eq!(gray.get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn test_garbage_is_decoding_error() {
        assert!(matches!(
            decode_frame(&[1, 2, 3, 4]),
            Err(ScoringError::DecodingError(_))
        ));
    }
}
