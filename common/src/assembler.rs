//! Сборка результата сканирования из распознанного текста

use crate::normalizer::NormalizeOptions;
use crate::parser::parse_form;
use crate::types::{truncate_chars, ScanResult, RAW_TEXT_LIMIT};

/// Разобрать текст OCR и собрать успешный результат.
///
/// Время обработки не заполняется: его проставляет вызывающий.
pub fn assemble_result(raw_text: &str, options: &NormalizeOptions) -> ScanResult {
    let parsed = parse_form(raw_text, options);

    ScanResult {
        success: true,
        error_message: String::new(),
        processing_time_ms: 0.0,
        answers: parsed.answers,
        raw_text: truncate_chars(raw_text, RAW_TEXT_LIMIT).to_string(),
        fields: parsed.fields,
    }
}
