//! Intensity histogram equalization

use image::GrayImage;

/// Spread the intensity histogram of a grayscale frame over the full range
///
/// Flat images (a single intensity) are returned unchanged.
pub fn equalize_histogram(image: &GrayImage) -> GrayImage {
    let mut histogram = [0u32; 256];
    for pixel in image.pixels() {
        histogram[pixel.0[0] as usize] += 1;
    }

    let total: u32 = histogram.iter().sum();
    let mut cdf = [0u32; 256];
    let mut running = 0u32;
    for (bin, &count) in histogram.iter().enumerate() {
        running += count;
        cdf[bin] = running;
    }

    let cdf_min = cdf.iter().copied().find(|&c| c > 0).unwrap_or(0);
    if total == 0 || total == cdf_min {
        return image.clone();
    }

    let scale = 255.0 / (total - cdf_min) as f32;
    let mut lut = [0u8; 256];
    for (bin, entry) in lut.iter_mut().enumerate() {
        let value = cdf[bin].saturating_sub(cdf_min) as f32 * scale;
        *entry = value.round().clamp(0.0, 255.0) as u8;
    }

    let mut equalized = image.clone();
    for pixel in equalized.pixels_mut() {
        pixel.0[0] = lut[pixel.0[0] as usize];
    }
    equalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_low_contrast_is_stretched() {
        let image = GrayImage::from_fn(4, 4, |x, _| Luma([100 + x as u8]));
        let equalized = equalize_histogram(&image);
        assert_eq!(equalized.get_pixel(0, 0).0[0], 0);
        assert_eq!(equalized.get_pixel(3, 0).0[0], 255);
    }

    #[test]
    fn test_flat_image_unchanged() {
        let image = GrayImage::from_pixel(3, 3, Luma([42]));
        assert_eq!(equalize_histogram(&image), image);
    }
}
