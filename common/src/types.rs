//! Типы результата сканирования
//!
//! - FieldResult: найденный на бланке вопрос и его ответ
//! - FormAnswers: 17 нормализованных ответов анкеты
//! - ScanResult: итог одного сканирования (успех или ошибка)

use crate::schema::FieldId;
use serde::{Deserialize, Serialize};

/// Уверенность распознавания поля (эвристика, не вычисляется)
pub const FIELD_CONFIDENCE: f32 = 0.9;

/// Сколько символов сырого текста попадает в результат
pub const RAW_TEXT_LIMIT: usize = 500;

/// Найденный вопрос и захваченный ответ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResult {
    /// Текст вопроса
    pub name: String,
    /// Ответ (следующая строка после вопроса)
    pub value: String,
    pub confidence: f32,
}

/// Ответы анкеты. Отсутствующий ответ - пустая строка.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormAnswers {
    pub date: String,                // 1
    pub table_number: String,        // 2
    pub location: String,            // 3
    pub satisfaction_rating: String, // 4 (1-10)
    pub playlist_rating: String,     // 5 (1-10)
    pub tracks_to_add: String,       // 6
    pub location_rating: String,     // 7 (1-10)
    pub kitchen_rating: String,      // 8 (1-10)
    pub service_rating: String,      // 9 (1-10)
    pub host_rating: String,         // 10 (1-10)
    pub visits_count: String,        // 11
    pub ticket_price: String,        // 12 (варианты)
    pub know_booking: String,        // 13 (Да/Нет)
    pub source_info: String,         // 14
    pub purpose: String,             // 15
    pub improvements: String,        // 16
    pub phone_number: String,        // телефон
}

impl FormAnswers {
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Date => &self.date,
            FieldId::TableNumber => &self.table_number,
            FieldId::Location => &self.location,
            FieldId::SatisfactionRating => &self.satisfaction_rating,
            FieldId::PlaylistRating => &self.playlist_rating,
            FieldId::TracksToAdd => &self.tracks_to_add,
            FieldId::LocationRating => &self.location_rating,
            FieldId::KitchenRating => &self.kitchen_rating,
            FieldId::ServiceRating => &self.service_rating,
            FieldId::HostRating => &self.host_rating,
            FieldId::VisitsCount => &self.visits_count,
            FieldId::TicketPrice => &self.ticket_price,
            FieldId::KnowBooking => &self.know_booking,
            FieldId::SourceInfo => &self.source_info,
            FieldId::Purpose => &self.purpose,
            FieldId::Improvements => &self.improvements,
            FieldId::PhoneNumber => &self.phone_number,
        }
    }

    pub fn set(&mut self, field: FieldId, value: String) {
        let slot = match field {
            FieldId::Date => &mut self.date,
            FieldId::TableNumber => &mut self.table_number,
            FieldId::Location => &mut self.location,
            FieldId::SatisfactionRating => &mut self.satisfaction_rating,
            FieldId::PlaylistRating => &mut self.playlist_rating,
            FieldId::TracksToAdd => &mut self.tracks_to_add,
            FieldId::LocationRating => &mut self.location_rating,
            FieldId::KitchenRating => &mut self.kitchen_rating,
            FieldId::ServiceRating => &mut self.service_rating,
            FieldId::HostRating => &mut self.host_rating,
            FieldId::VisitsCount => &mut self.visits_count,
            FieldId::TicketPrice => &mut self.ticket_price,
            FieldId::KnowBooking => &mut self.know_booking,
            FieldId::SourceInfo => &mut self.source_info,
            FieldId::Purpose => &mut self.purpose,
            FieldId::Improvements => &mut self.improvements,
            FieldId::PhoneNumber => &mut self.phone_number,
        };
        *slot = value;
    }
}

/// Результат сканирования одной анкеты
///
/// Если `success == false`, ответы пустые, а `error_message` содержит причину.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub success: bool,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub processing_time_ms: f64,

    #[serde(flatten)]
    pub answers: FormAnswers,

    /// Первые 500 символов распознанного текста
    #[serde(default)]
    pub raw_text: String,

    #[serde(default)]
    pub fields: Vec<FieldResult>,
}

impl ScanResult {
    /// Результат-ошибка
    pub fn failure(message: impl Into<String>, processing_time_ms: f64) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = "Неизвестная ошибка".to_string();
        }
        Self {
            success: false,
            error_message: message,
            processing_time_ms,
            ..Default::default()
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Обрезать строку до `max` символов (не байт)
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_cyrillic() {
        let text = "Дата".repeat(200);
        let cut = truncate_chars(&text, RAW_TEXT_LIMIT);
        assert_eq!(cut.chars().count(), RAW_TEXT_LIMIT);
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn test_answers_get_set() {
        let mut answers = FormAnswers::default();
        answers.set(FieldId::KnowBooking, "Да".into());
        assert_eq!(answers.get(FieldId::KnowBooking), "Да");
        assert_eq!(answers.know_booking, "Да");
        assert_eq!(answers.get(FieldId::Date), "");
    }

    #[test]
    fn test_failure_has_message() {
        let result = ScanResult::failure("", 1.5);
        assert!(!result.success);
        assert!(!result.error_message.is_empty());
        assert_eq!(result.answers, FormAnswers::default());
    }

    #[test]
    fn test_json_shape_is_flat() {
        let mut result = ScanResult { success: true, ..Default::default() };
        result.answers.table_number = "14".into();
        result.fields.push(FieldResult {
            name: "Номер столика:".into(),
            value: "14".into(),
            confidence: FIELD_CONFIDENCE,
        });

        let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["table_number"], "14");
        assert_eq!(value["phone_number"], "");
        assert_eq!(value["fields"][0]["name"], "Номер столика:");
        assert!(value.get("answers").is_none());
    }
}
