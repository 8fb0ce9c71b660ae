//! Выгрузка журнала, общая для CLI и C-библиотеки

#[cfg(feature = "excel")]
pub mod excel_core;
