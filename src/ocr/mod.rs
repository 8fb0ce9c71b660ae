//! Распознавание анкет: предобработка, OCR, сборка результата

pub mod batch;
mod form_scanner;
pub mod preprocess;
pub mod recognizer;

pub use batch::scan_parallel;
pub use form_scanner::FormScanner;
pub use preprocess::preprocess_image;
pub use recognizer::{default_engine, EngineFactory, EngineSettings, TextRecognizer};

#[cfg(feature = "tesseract")]
pub use recognizer::TesseractRecognizer;
