//! Сканер анкет
//!
//! Состояния: не инициализирован → инициализирован → сканирование → результат.
//! Движок OCR принадлежит сканеру целиком; повторная инициализация сначала
//! освобождает прежний движок.

use super::preprocess::preprocess_image;
use super::recognizer::{default_engine, EngineFactory, EngineSettings, TextRecognizer};
use crate::error::ScanError;
use muzloto_common::{assemble_result, NormalizeOptions, ScanResult};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct FormScanner {
    factory: EngineFactory,
    engine: Option<Box<dyn TextRecognizer>>,
    language: String,
    options: NormalizeOptions,
}

impl Default for FormScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FormScanner {
    /// Сканер с движком по умолчанию (не инициализирован)
    pub fn new() -> Self {
        Self::with_engine_factory(default_engine)
    }

    /// Сканер с собственной фабрикой движков
    pub fn with_engine_factory<F>(factory: F) -> Self
    where
        F: Fn(&EngineSettings) -> Result<Box<dyn TextRecognizer>, ScanError> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            engine: None,
            language: EngineSettings::default().language,
            options: NormalizeOptions::default(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_options(mut self, options: NormalizeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Загрузить движок OCR.
    ///
    /// Пустой или отсутствующий `tessdata_path` - путь движка по умолчанию.
    /// При ошибке сканер остаётся неинициализированным.
    pub fn try_initialize(&mut self, tessdata_path: Option<&str>) -> Result<(), ScanError> {
        // прежний движок освобождается до загрузки нового
        self.engine = None;

        let settings = EngineSettings {
            tessdata_path: tessdata_path.filter(|p| !p.is_empty()).map(str::to_string),
            language: self.language.clone(),
        };

        let engine = (self.factory)(&settings)?;
        self.engine = Some(engine);
        info!(language = %settings.language, "движок OCR загружен");
        Ok(())
    }

    /// То же, что `try_initialize`, но с результатом true/false
    pub fn initialize(&mut self, tessdata_path: Option<&str>) -> bool {
        match self.try_initialize(tessdata_path) {
            Ok(()) => true,
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// Отсканировать анкету.
    ///
    /// Никогда не паникует и не возвращает ошибку: любой сбой превращается
    /// в результат с `success == false`. Время обработки заполняется всегда.
    pub fn scan_image(&mut self, image_path: impl AsRef<Path>) -> ScanResult {
        let image_path = image_path.as_ref();
        let start = Instant::now();

        let outcome = catch_unwind(AssertUnwindSafe(|| self.run_scan(image_path)));
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match outcome {
            Ok(Ok(mut result)) => {
                result.processing_time_ms = elapsed_ms;
                debug!(path = %image_path.display(), fields = result.fields.len(), elapsed_ms, "анкета разобрана");
                result
            }
            Ok(Err(e)) => {
                warn!(path = %image_path.display(), "{}", e);
                ScanResult::failure(e.to_string(), elapsed_ms)
            }
            Err(panic) => {
                // состояние движка после паники не гарантировано
                self.engine = None;
                let e = ScanError::Internal(panic_message(panic.as_ref()));
                warn!(path = %image_path.display(), "{}", e);
                ScanResult::failure(e.to_string(), elapsed_ms)
            }
        }
    }

    /// Разобрать уже распознанный текст (без OCR)
    pub fn scan_text(&self, raw_text: &str) -> ScanResult {
        assemble_result(raw_text, &self.options)
    }

    fn run_scan(&mut self, image_path: &Path) -> Result<ScanResult, ScanError> {
        let engine = self.engine.as_mut().ok_or(ScanError::NotInitialized)?;

        // 1. Загрузка изображения
        let image = image::open(image_path).map_err(|e| ScanError::ImageLoad {
            path: image_path.display().to_string(),
            reason: e.to_string(),
        })?;
        if image.width() == 0 || image.height() == 0 {
            return Err(ScanError::ImageLoad {
                path: image_path.display().to_string(),
                reason: "пустое изображение".into(),
            });
        }
        debug!(width = image.width(), height = image.height(), "изображение загружено");

        // 2. Предобработка
        let processed = preprocess_image(&image);

        // 3. Распознавание
        let raw_text = engine.recognize(&processed)?;
        debug!(chars = raw_text.chars().count(), "текст распознан");

        // 4. Разбор анкеты и нормализация ответов
        Ok(assemble_result(&raw_text, &self.options))
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("паника: {}", s)
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("паника: {}", s)
    } else {
        "паника при обработке".to_string()
    }
}
