//! Muzloto Common Library
//!
//! Схема анкеты, разбор текста OCR и нормализация ответов.
//! Не зависит от OCR-движка: работает с уже распознанным текстом.

pub mod assembler;
pub mod error;
pub mod export;
pub mod ledger;
pub mod normalizer;
pub mod parser;
pub mod schema;
pub mod types;

pub use assembler::assemble_result;
pub use error::{Error, Result};
pub use ledger::{LedgerCell, LedgerRow, LEDGER_COLUMNS, SHEET_NAME};
pub use normalizer::NormalizeOptions;
pub use parser::{parse_form, ParsedForm};
pub use schema::{FieldId, Question, ValueKind, QUESTIONS};
pub use types::{FieldResult, FormAnswers, ScanResult, FIELD_CONFIDENCE, RAW_TEXT_LIMIT};
