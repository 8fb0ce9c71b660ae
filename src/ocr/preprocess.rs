//! Предобработка изображения перед OCR
//!
//! Оттенки серого → шумоподавление → выравнивание гистограммы →
//! адаптивная бинаризация.

use image::{DynamicImage, GrayImage};
use imageproc::contrast::{adaptive_threshold, equalize_histogram};
use imageproc::filter::median_filter;

/// Радиус медианного фильтра (окно 3x3)
const DENOISE_RADIUS: u32 = 1;

/// Радиус блока адаптивного порога (окно 11x11)
const THRESHOLD_BLOCK_RADIUS: u32 = 5;

/// Подготовить изображение анкеты к распознаванию.
///
/// Результат того же размера, один канал, пиксели 0 или 255.
pub fn preprocess_image(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    let denoised = median_filter(&gray, DENOISE_RADIUS, DENOISE_RADIUS);
    let equalized = equalize_histogram(&denoised);
    adaptive_threshold(&equalized, THRESHOLD_BLOCK_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_preprocess_keeps_size_and_binarizes() {
        let img = RgbImage::from_fn(40, 30, |x, y| {
            if (x / 5 + y / 5) % 2 == 0 {
                Rgb([250, 240, 230])
            } else {
                Rgb([20, 30, 40])
            }
        });

        let binary = preprocess_image(&DynamicImage::ImageRgb8(img));
        assert_eq!(binary.dimensions(), (40, 30));
        assert!(binary.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }
}
