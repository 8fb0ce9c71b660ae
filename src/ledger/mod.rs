//! Журнал обработанных анкет
//!
//! Каждая обработанная анкета (успешная или нет) добавляется строкой
//! в общий Excel-файл. Ведётся статистика текущего сеанса.

pub mod excel;

use crate::error::Result;
use crate::ocr::FormScanner;
use muzloto_common::ledger::{LedgerCell, LedgerRow, FILLED_AT_FORMAT};
use muzloto_common::ScanResult;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Статистика текущего сеанса
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub last_file: Option<String>,
}

/// Статистика по файлу журнала
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerStats {
    pub excel_file: String,
    pub total_records: usize,
    pub successful_records: usize,
    /// Число различных дней в колонке «Дата заполнения»
    pub unique_dates: usize,
}

/// Итог обработки одной анкеты
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub success: bool,
    pub message: String,
    /// Номер строки в Excel
    pub row_number: usize,
    pub excel_file: String,
    pub scan: ScanResult,
}

/// Итог обработки папки
#[derive(Debug, Clone, Default, Serialize)]
pub struct FolderSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub details: Vec<FolderItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FolderItem {
    pub file: String,
    pub success: bool,
    pub message: String,
    pub row: usize,
}

impl FolderSummary {
    pub fn add(&mut self, file: &str, outcome: &ProcessOutcome) {
        self.total += 1;
        if outcome.success {
            self.success += 1;
        } else {
            self.failed += 1;
        }
        self.details.push(FolderItem {
            file: file.to_string(),
            success: outcome.success,
            message: outcome.message.clone(),
            row: outcome.row_number,
        });
    }
}

/// Общий Excel-файл с анкетами
pub struct Ledger {
    path: PathBuf,
    sheet_name: String,
    stats: SessionStats,
}

impl Ledger {
    /// Открыть журнал, создав файл с заголовками при необходимости
    pub fn open(path: impl Into<PathBuf>, sheet_name: impl Into<String>) -> Result<Self> {
        let ledger = Self {
            path: path.into(),
            sheet_name: sheet_name.into(),
            stats: SessionStats::default(),
        };

        if excel::ensure_ledger(&ledger.path, &ledger.sheet_name)? {
            info!(path = %ledger.path.display(), "создан новый файл для анкет");
        }

        Ok(ledger)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session(&self) -> &SessionStats {
        &self.stats
    }

    /// Отсканировать анкету и добавить её в журнал
    pub fn process_image(
        &mut self,
        scanner: &mut FormScanner,
        image_path: &Path,
        operator: &str,
        comment: &str,
    ) -> Result<ProcessOutcome> {
        let scan = if image_path.is_file() {
            scanner.scan_image(image_path)
        } else {
            ScanResult::failure(format!("Файл не найден: {}", image_path.display()), 0.0)
        };

        self.record(image_path, scan, operator, comment)
    }

    /// Записать готовый результат сканирования.
    ///
    /// Неуспешный результат записывается строкой с ошибкой.
    pub fn record(
        &mut self,
        image_path: &Path,
        scan: ScanResult,
        operator: &str,
        comment: &str,
    ) -> Result<ProcessOutcome> {
        self.stats.total += 1;
        self.stats.last_file = Some(image_path.display().to_string());

        let file_name = image_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let filled_at = chrono::Local::now().format(FILLED_AT_FORMAT).to_string();

        let (row, message) = if scan.success {
            let row = LedgerRow::from_scan(&scan, &file_name, &filled_at, operator, comment);
            (row, String::new())
        } else {
            let message = format!("Ошибка сканирования: {}", scan.error_message);
            let row = LedgerRow::from_error(&file_name, &message, &filled_at, operator);
            (row, message)
        };

        let row_number = excel::append_row(&self.path, &self.sheet_name, row)?;

        let message = if scan.success {
            self.stats.success += 1;
            format!("Анкета добавлена в строку {}", row_number)
        } else {
            self.stats.failed += 1;
            warn!(file = %file_name, "{}", message);
            format!("Ошибка: {}", message)
        };

        Ok(ProcessOutcome {
            success: scan.success,
            message,
            row_number,
            excel_file: self.path.display().to_string(),
            scan,
        })
    }

    /// Статистика по всему файлу журнала
    pub fn statistics(&self) -> Result<LedgerStats> {
        let rows = excel::read_rows(&self.path)?;

        let unique_dates: HashSet<String> = rows
            .iter()
            .filter_map(|r| match r.get("Дата заполнения") {
                Some(LedgerCell::Text(s)) => s.split_whitespace().next().map(str::to_string),
                _ => None,
            })
            .collect();

        Ok(LedgerStats {
            excel_file: self.path.display().to_string(),
            total_records: rows.len(),
            successful_records: rows.iter().filter(|r| r.is_success()).count(),
            unique_dates: unique_dates.len(),
        })
    }
}
