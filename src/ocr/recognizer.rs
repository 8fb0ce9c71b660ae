//! Распознавание текста
//!
//! Движок OCR скрыт за трейтом `TextRecognizer`: в рабочей сборке это
//! Tesseract (feature `tesseract`), в тестах - подставной распознаватель.

use crate::error::ScanError;
use image::GrayImage;

/// Распознаватель текста на подготовленном изображении.
///
/// Движок хранит изменяемое состояние между вызовами, поэтому `&mut self`.
pub trait TextRecognizer {
    /// Распознать текст. Пустая строка, если движок ничего не нашёл.
    fn recognize(&mut self, image: &GrayImage) -> Result<String, ScanError>;
}

/// Параметры загрузки движка
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Папка tessdata; None - путь движка по умолчанию
    pub tessdata_path: Option<String>,
    pub language: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tessdata_path: None,
            language: "rus+eng".into(),
        }
    }
}

/// Фабрика движков: вызывается при каждой инициализации сканера
pub type EngineFactory =
    Box<dyn Fn(&EngineSettings) -> Result<Box<dyn TextRecognizer>, ScanError> + Send + Sync>;

/// Движок по умолчанию
pub fn default_engine(settings: &EngineSettings) -> Result<Box<dyn TextRecognizer>, ScanError> {
    #[cfg(feature = "tesseract")]
    {
        Ok(Box::new(tesseract_engine::TesseractRecognizer::new(settings)?))
    }

    #[cfg(not(feature = "tesseract"))]
    {
        let _ = settings;
        Err(ScanError::EngineInit(
            "сборка без поддержки Tesseract (включите feature \"tesseract\")".into(),
        ))
    }
}

#[cfg(feature = "tesseract")]
pub use tesseract_engine::TesseractRecognizer;

#[cfg(feature = "tesseract")]
mod tesseract_engine {
    use super::{EngineSettings, TextRecognizer};
    use crate::error::ScanError;
    use image::GrayImage;
    use tesseract::{OcrEngineMode, PageSegMode, Tesseract};
    use tracing::debug;

    /// Tesseract, настроенный под анкеты: LSTM, авторазметка страницы,
    /// сохранение пробелов и поиск таблиц.
    pub struct TesseractRecognizer {
        // API Tesseract-крейта потребляет self, поэтому Option
        api: Option<Tesseract>,
    }

    impl TesseractRecognizer {
        pub fn new(settings: &EngineSettings) -> Result<Self, ScanError> {
            let datapath = settings.tessdata_path.as_deref().filter(|p| !p.is_empty());
            debug!(?datapath, language = %settings.language, "инициализация Tesseract");

            let api = Tesseract::new_with_oem(datapath, Some(&settings.language), OcrEngineMode::LstmOnly)
                .map_err(|e| ScanError::EngineInit(e.to_string()))?;

            let mut api = api
                .set_variable("preserve_interword_spaces", "1")
                .and_then(|t| t.set_variable("textord_tabfind_find_tables", "1"))
                .and_then(|t| t.set_variable("textord_tablefind_recognize_tables", "1"))
                .map_err(|e| ScanError::EngineInit(e.to_string()))?;
            api.set_page_seg_mode(PageSegMode::PsmAuto);

            Ok(Self { api: Some(api) })
        }
    }

    impl TextRecognizer for TesseractRecognizer {
        fn recognize(&mut self, image: &GrayImage) -> Result<String, ScanError> {
            let api = self.api.take().ok_or_else(|| {
                ScanError::Internal("движок OCR потерян после предыдущей ошибки".into())
            })?;

            let (width, height) = image.dimensions();
            let mut api = api
                .set_frame(image.as_raw(), width as i32, height as i32, 1, width as i32)
                .map_err(|e| ScanError::Internal(format!("передача изображения в OCR: {}", e)))?;

            let text = api.get_text();
            self.api = Some(api);

            text.map_err(|e| ScanError::Internal(format!("распознавание: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = EngineSettings::default();
        assert_eq!(settings.language, "rus+eng");
        assert!(settings.tessdata_path.is_none());
    }

    #[cfg(not(feature = "tesseract"))]
    #[test]
    fn test_default_engine_without_tesseract() {
        let err = default_engine(&EngineSettings::default()).err().unwrap();
        assert!(matches!(err, ScanError::EngineInit(_)));
    }
}
