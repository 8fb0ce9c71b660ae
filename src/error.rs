use thiserror::Error;

/// Ошибки конвейера сканирования.
///
/// Наружу не выходят: `FormScanner::scan_image` превращает их в
/// `ScanResult` с `success == false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Сканер не инициализирован")]
    NotInitialized,

    #[error("Не удалось загрузить изображение: {path} ({reason})")]
    ImageLoad { path: String, reason: String },

    #[error("Ошибка инициализации OCR: {0}")]
    EngineInit(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

/// Ошибки приложения (CLI, настройки, журнал)
#[derive(Error, Debug)]
pub enum MuzlotoError {
    #[error("Ошибка настроек: {0}")]
    Config(String),

    #[error("Файл не найден: {0}")]
    FileNotFound(String),

    #[error("Папка не найдена: {0}")]
    FolderNotFound(String),

    #[error("Не найдено изображений в папке: {0}")]
    NoImagesFound(String),

    #[error("Ошибка сканирования: {0}")]
    Scan(#[from] ScanError),

    #[error("Ошибка Excel: {0}")]
    Excel(String),

    #[error("Ошибка разбора JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] muzloto_common::Error),
}

pub type Result<T> = std::result::Result<T, MuzlotoError>;
