//! Журнал анкет (общий Excel-файл)
//!
//! Определение колонок журнала и построение строк из результатов сканирования.

use crate::types::{truncate_chars, ScanResult, RAW_TEXT_LIMIT};
use serde::{Deserialize, Serialize};

/// Имя листа журнала
pub const SHEET_NAME: &str = "Анкеты";

/// Статус успешно обработанной анкеты
pub const STATUS_SUCCESS: &str = "Успешно";

/// Формат даты заполнения (chrono)
pub const FILLED_AT_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Колонка журнала
#[derive(Debug, Clone, Copy)]
pub struct LedgerColumn {
    pub title: &'static str,
    /// Ширина в единицах Excel
    pub width: f64,
}

/// Колонки журнала в порядке следования
pub const LEDGER_COLUMNS: &[LedgerColumn] = &[
    LedgerColumn { title: "Дата заполнения", width: 15.0 },
    LedgerColumn { title: "Файл анкеты", width: 20.0 },
    LedgerColumn { title: "Дата визита", width: 12.0 },
    LedgerColumn { title: "Номер столика", width: 12.0 },
    LedgerColumn { title: "Место игры", width: 20.0 },
    LedgerColumn { title: "Довольны посещением", width: 20.0 },
    LedgerColumn { title: "Понравился плейлист", width: 20.0 },
    LedgerColumn { title: "Треки для добавления", width: 25.0 },
    LedgerColumn { title: "Понравилась локация", width: 18.0 },
    LedgerColumn { title: "Понравились кухня и бар", width: 22.0 },
    LedgerColumn { title: "Устроил сервис", width: 20.0 },
    LedgerColumn { title: "Понравился ведущий", width: 18.0 },
    LedgerColumn { title: "Количество посещений", width: 20.0 },
    LedgerColumn { title: "Оценка стоимости", width: 25.0 },
    LedgerColumn { title: "Знают о заказе", width: 25.0 },
    LedgerColumn { title: "Источник информации", width: 25.0 },
    LedgerColumn { title: "Цель посещения", width: 30.0 },
    LedgerColumn { title: "Предложения по улучшению", width: 30.0 },
    LedgerColumn { title: "Телефон", width: 18.0 },
    LedgerColumn { title: "Статус обработки", width: 15.0 },
    LedgerColumn { title: "Время обработки (мс)", width: 18.0 },
    LedgerColumn { title: "Сырой текст", width: 40.0 },
    LedgerColumn { title: "Оператор", width: 15.0 },
    LedgerColumn { title: "Комментарий", width: 25.0 },
];

/// Индекс колонки по заголовку
pub fn column_index(title: &str) -> Option<usize> {
    LEDGER_COLUMNS.iter().position(|c| c.title == title)
}

/// Значение ячейки журнала
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerCell {
    Text(String),
    Number(f64),
}

impl LedgerCell {
    pub fn empty() -> Self {
        LedgerCell::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, LedgerCell::Text(s) if s.is_empty())
    }
}

impl std::fmt::Display for LedgerCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerCell::Text(s) => write!(f, "{}", s),
            LedgerCell::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for LedgerCell {
    fn from(s: &str) -> Self {
        LedgerCell::Text(s.to_string())
    }
}

impl From<String> for LedgerCell {
    fn from(s: String) -> Self {
        LedgerCell::Text(s)
    }
}

/// Строка журнала: по одной ячейке на каждую колонку LEDGER_COLUMNS
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    cells: Vec<LedgerCell>,
}

impl Default for LedgerRow {
    fn default() -> Self {
        Self {
            cells: vec![LedgerCell::empty(); LEDGER_COLUMNS.len()],
        }
    }
}

impl LedgerRow {
    /// Строка из ячеек; лишние отбрасываются, недостающие пустые
    pub fn from_cells(mut cells: Vec<LedgerCell>) -> Self {
        cells.resize(LEDGER_COLUMNS.len(), LedgerCell::empty());
        Self { cells }
    }

    /// Строка успешно обработанной анкеты
    pub fn from_scan(
        result: &ScanResult,
        file_name: &str,
        filled_at: &str,
        operator: &str,
        comment: &str,
    ) -> Self {
        let a = &result.answers;
        let raw_text = if result.raw_text.chars().count() > RAW_TEXT_LIMIT {
            format!("{}...", truncate_chars(&result.raw_text, RAW_TEXT_LIMIT))
        } else {
            result.raw_text.clone()
        };
        let elapsed = (result.processing_time_ms * 10.0).round() / 10.0;

        Self::from_cells(vec![
            filled_at.into(),
            file_name.into(),
            a.date.as_str().into(),
            a.table_number.as_str().into(),
            a.location.as_str().into(),
            a.satisfaction_rating.as_str().into(),
            a.playlist_rating.as_str().into(),
            a.tracks_to_add.as_str().into(),
            a.location_rating.as_str().into(),
            a.kitchen_rating.as_str().into(),
            a.service_rating.as_str().into(),
            a.host_rating.as_str().into(),
            a.visits_count.as_str().into(),
            a.ticket_price.as_str().into(),
            a.know_booking.as_str().into(),
            a.source_info.as_str().into(),
            a.purpose.as_str().into(),
            a.improvements.as_str().into(),
            a.phone_number.as_str().into(),
            STATUS_SUCCESS.into(),
            LedgerCell::Number(elapsed),
            raw_text.into(),
            operator.into(),
            comment.into(),
        ])
    }

    /// Строка с ошибкой обработки
    pub fn from_error(file_name: &str, error: &str, filled_at: &str, operator: &str) -> Self {
        let mut row = Self::default();
        row.set("Дата заполнения", filled_at.into());
        row.set("Файл анкеты", file_name.into());
        row.set("Статус обработки", format!("Ошибка: {}", truncate_chars(error, 50)).into());
        row.set("Оператор", operator.into());
        row.set("Комментарий", "Ошибка обработки".into());
        row
    }

    pub fn get(&self, title: &str) -> Option<&LedgerCell> {
        column_index(title).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, title: &str, value: LedgerCell) {
        if let Some(i) = column_index(title) {
            self.cells[i] = value;
        }
    }

    pub fn cells(&self) -> &[LedgerCell] {
        &self.cells
    }

    pub fn is_success(&self) -> bool {
        matches!(self.get("Статус обработки"), Some(LedgerCell::Text(s)) if s == STATUS_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_has_24_columns() {
        assert_eq!(LEDGER_COLUMNS.len(), 24);
        assert_eq!(column_index("Дата заполнения"), Some(0));
        assert_eq!(column_index("Комментарий"), Some(23));
        assert_eq!(column_index("нет такой"), None);
    }

    #[test]
    fn test_row_from_scan() {
        let mut result = ScanResult {
            success: true,
            processing_time_ms: 123.456,
            raw_text: "Дата:\n18.12".into(),
            ..Default::default()
        };
        result.answers.date = "18.12".into();
        result.answers.phone_number = "+79161234567".into();

        let row = LedgerRow::from_scan(&result, "a.jpg", "01.02.2026 10:00", "Иван", "");
        assert_eq!(row.cells().len(), LEDGER_COLUMNS.len());
        assert_eq!(row.get("Файл анкеты"), Some(&LedgerCell::from("a.jpg")));
        assert_eq!(row.get("Дата визита"), Some(&LedgerCell::from("18.12")));
        assert_eq!(row.get("Телефон"), Some(&LedgerCell::from("+79161234567")));
        assert_eq!(row.get("Время обработки (мс)"), Some(&LedgerCell::Number(123.5)));
        assert!(row.is_success());
    }

    #[test]
    fn test_row_from_scan_truncates_raw_text() {
        let result = ScanResult {
            success: true,
            raw_text: "я".repeat(600),
            ..Default::default()
        };
        let row = LedgerRow::from_scan(&result, "a.jpg", "", "", "");
        let raw = row.get("Сырой текст").unwrap().to_string();
        assert_eq!(raw.chars().count(), RAW_TEXT_LIMIT + 3);
        assert!(raw.ends_with("..."));
    }

    #[test]
    fn test_row_from_error() {
        let long_error = "ошибка ".repeat(20);
        let row = LedgerRow::from_error("b.png", &long_error, "01.02.2026 10:00", "Авто");
        let status = row.get("Статус обработки").unwrap().to_string();
        assert_eq!(status.chars().count(), "Ошибка: ".chars().count() + 50);
        assert!(!row.is_success());
        assert!(row.get("Дата визита").unwrap().is_empty());
        assert_eq!(row.get("Комментарий"), Some(&LedgerCell::from("Ошибка обработки")));
    }

    #[test]
    fn test_from_cells_pads() {
        let row = LedgerRow::from_cells(vec!["x".into()]);
        assert_eq!(row.cells().len(), LEDGER_COLUMNS.len());
        assert!(row.cells()[1].is_empty());
    }
}
