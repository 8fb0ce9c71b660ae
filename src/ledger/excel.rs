//! Чтение и запись Excel-журнала
//!
//! Существующие строки читаются через calamine (колонки сопоставляются по
//! заголовку), затем файл целиком перезаписывается через rust_xlsxwriter.

use crate::error::{MuzlotoError, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use muzloto_common::export::excel_core::generate_ledger_buffer;
use muzloto_common::ledger::{column_index, LedgerCell, LedgerRow, LEDGER_COLUMNS};
use std::path::Path;
use tracing::debug;

/// Прочитать строки журнала (без заголовка).
///
/// Читается первый лист. Колонки, которых нет в файле, остаются пустыми;
/// неизвестные колонки отбрасываются.
pub fn read_rows(path: &Path) -> Result<Vec<LedgerRow>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| MuzlotoError::Excel(format!("{}: {}", path.display(), e)))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| MuzlotoError::Excel(format!("чтение листа: {}", e)))?,
        None => return Ok(Vec::new()),
    };

    let mut rows = range.rows();
    let header: Vec<Option<usize>> = match rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| column_index(cell.to_string().trim()))
            .collect(),
        None => return Ok(Vec::new()),
    };

    let mut result = Vec::new();
    for row in rows {
        let mut cells = vec![LedgerCell::empty(); LEDGER_COLUMNS.len()];
        for (cell, target) in row.iter().zip(header.iter()) {
            if let Some(idx) = target {
                cells[*idx] = to_ledger_cell(cell);
            }
        }
        result.push(LedgerRow::from_cells(cells));
    }

    debug!(rows = result.len(), path = %path.display(), "журнал прочитан");
    Ok(result)
}

/// Перезаписать журнал целиком
pub fn write_rows(path: &Path, sheet_name: &str, rows: &[LedgerRow]) -> Result<()> {
    let buffer = generate_ledger_buffer(sheet_name, rows)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, buffer)?;
    Ok(())
}

/// Создать пустой журнал с заголовками, если файла нет.
///
/// Возвращает true, если файл был создан.
pub fn ensure_ledger(path: &Path, sheet_name: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    write_rows(path, sheet_name, &[])?;
    Ok(true)
}

/// Добавить строку в журнал.
///
/// Возвращает номер строки в Excel (с 1, строка 1 - заголовок).
pub fn append_row(path: &Path, sheet_name: &str, row: LedgerRow) -> Result<usize> {
    let mut rows = if path.exists() { read_rows(path)? } else { Vec::new() };
    rows.push(row);
    write_rows(path, sheet_name, &rows)?;
    Ok(rows.len() + 1)
}

fn to_ledger_cell(cell: &Data) -> LedgerCell {
    match cell {
        Data::Empty => LedgerCell::empty(),
        Data::String(s) => LedgerCell::Text(s.clone()),
        Data::Float(f) => LedgerCell::Number(*f),
        Data::Int(i) => LedgerCell::Number(*i as f64),
        other => LedgerCell::Text(other.to_string()),
    }
}
