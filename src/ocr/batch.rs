//! Параллельное сканирование папки
//!
//! Сканер нельзя делить между потоками, поэтому у каждого рабочего потока
//! rayon свой экземпляр со своим движком.

use super::FormScanner;
use crate::error::ScanError;
use crate::scanner::ImageInfo;
use muzloto_common::ScanResult;
use rayon::prelude::*;

/// Отсканировать изображения параллельно.
///
/// `make_scanner` вызывается один раз на рабочий поток и должен вернуть
/// уже инициализированный сканер. Если движок не загрузился, каждое
/// изображение этого потока получает результат с причиной ошибки.
/// Результаты идут в порядке `images`.
pub fn scan_parallel<F>(images: &[ImageInfo], make_scanner: F) -> Vec<ScanResult>
where
    F: Fn() -> Result<FormScanner, ScanError> + Sync + Send,
{
    images
        .par_iter()
        .map_init(make_scanner, |scanner, image| match scanner {
            Ok(scanner) => scanner.scan_image(&image.path),
            Err(e) => ScanResult::failure(e.to_string(), 0.0),
        })
        .collect()
}
