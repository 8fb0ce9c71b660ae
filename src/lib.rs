pub mod cli;
pub mod config;
pub mod error;
pub mod ffi;
pub mod ledger;
pub mod ocr;
pub mod scanner;
