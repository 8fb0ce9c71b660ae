//! Разбор текста анкеты
//!
//! Текст OCR делится на строки, в строках ищутся вопросы из схемы,
//! ответом считается следующая непустая строка, которая сама не является вопросом.

use crate::normalizer::{normalize_value, NormalizeOptions};
use crate::schema::{find_question, is_question_line, FieldId, ValueKind};
use crate::types::{FieldResult, FormAnswers, FIELD_CONFIDENCE};

/// Захваченный ответ до нормализации
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedAnswer {
    pub field: FieldId,
    pub kind: ValueKind,
    pub field_result: FieldResult,
}

/// Итог разбора анкеты
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedForm {
    /// Нормализованные ответы
    pub answers: FormAnswers,
    /// Все найденные вопросы в порядке появления
    pub fields: Vec<FieldResult>,
}

/// Разбить текст на непустые строки
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.trim_end_matches(['\r', '\n']))
        .filter(|line| !line.is_empty())
        .collect()
}

/// Найти вопросы и захватить ответы
///
/// # Arguments
/// * `text` - сырой текст OCR
///
/// # Returns
/// Ответы в порядке появления вопросов. Если вопрос встречается
/// несколько раз, в списке будут все вхождения.
pub fn capture_answers(text: &str) -> Vec<CapturedAnswer> {
    let lines = split_lines(text);
    let mut captured = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        if let Some(question) = find_question(lines[i]) {
            let mut value = String::new();

            // ответ - следующая строка, если это не другой вопрос
            if let Some(next) = lines.get(i + 1).filter(|line| !is_question_line(line)) {
                value = next.to_string();
                i += 1;
            }

            captured.push(CapturedAnswer {
                field: question.field,
                kind: question.kind,
                field_result: FieldResult {
                    name: question.label.to_string(),
                    value,
                    confidence: FIELD_CONFIDENCE,
                },
            });
        }
        i += 1;
    }

    captured
}

/// Разобрать текст анкеты и нормализовать ответы
pub fn parse_form(text: &str, options: &NormalizeOptions) -> ParsedForm {
    let mut parsed = ParsedForm::default();

    for answer in capture_answers(text) {
        // при повторе вопроса побеждает последний ответ
        let normalized = normalize_value(answer.kind, &answer.field_result.value, options);
        parsed.answers.set(answer.field, normalized);
        parsed.fields.push(answer.field_result);
    }

    parsed
}
