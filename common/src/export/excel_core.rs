//! Генерация Excel-журнала (общая библиотека)
//!
//! Оформление: ширина колонок, шапка на синем фоне, тонкие границы,
//! автофильтр и закреплённая строка заголовков.

use crate::error::{Error, Result};
use crate::ledger::{LedgerCell, LedgerRow, LEDGER_COLUMNS};
use rust_xlsxwriter::*;

/// Сгенерировать журнал в буфер
///
/// # Arguments
/// * `sheet_name` - имя листа
/// * `rows` - строки журнала (без заголовка)
pub fn generate_ledger_buffer(sheet_name: &str, rows: &[LedgerRow]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_size(11.0)
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x366092))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Thin);

    let cell_format = Format::new().set_border(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| Error::Excel(format!("Ошибка имени листа: {}", e)))?;

    for (col, column) in LEDGER_COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, column.width)
            .map_err(|e| Error::Excel(format!("Ошибка ширины колонки: {}", e)))?;
        worksheet
            .write_string_with_format(0, col, column.title, &header_format)
            .map_err(|e| Error::Excel(format!("Ошибка записи заголовка: {}", e)))?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let excel_row = idx as u32 + 1;
        for (col, cell) in row.cells().iter().enumerate() {
            let col = col as u16;
            match cell {
                LedgerCell::Text(text) => worksheet
                    .write_string_with_format(excel_row, col, text, &cell_format)
                    .map_err(|e| Error::Excel(format!("Ошибка записи ячейки: {}", e)))?,
                LedgerCell::Number(value) => worksheet
                    .write_number_with_format(excel_row, col, *value, &cell_format)
                    .map_err(|e| Error::Excel(format!("Ошибка записи ячейки: {}", e)))?,
            };
        }
    }

    let last_col = (LEDGER_COLUMNS.len() - 1) as u16;
    worksheet
        .autofilter(0, 0, rows.len() as u32, last_col)
        .map_err(|e| Error::Excel(format!("Ошибка автофильтра: {}", e)))?;
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| Error::Excel(format!("Ошибка закрепления строки: {}", e)))?;

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Excel(format!("Ошибка сохранения Excel: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_empty_ledger() {
        let buffer = generate_ledger_buffer("Анкеты", &[]).unwrap();
        // xlsx - это zip-архив
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_ledger_with_rows() {
        let rows = vec![
            LedgerRow::from_error("a.jpg", "не удалось", "01.01.2026 12:00", "Авто"),
            LedgerRow::from_cells(vec!["x".into(), LedgerCell::Number(1.5)]),
        ];
        let buffer = generate_ledger_buffer("Анкеты", &rows).unwrap();
        assert!(buffer.len() > 100);
    }

    #[test]
    fn test_invalid_sheet_name() {
        let err = generate_ledger_buffer("Анкеты/2026", &[]).unwrap_err();
        assert!(matches!(err, Error::Excel(_)));
        assert!(err.to_string().contains("Ошибка имени листа"));
    }
}
