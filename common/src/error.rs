//! Типы ошибок

use thiserror::Error;

/// Общий тип ошибки
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel error: {0}")]
    Excel(String),
}

/// Псевдоним Result
pub type Result<T> = std::result::Result<T, Error>;
