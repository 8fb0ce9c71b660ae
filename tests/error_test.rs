//! Ошибки приложения и сканера

use muzloto_scanner::error::{MuzlotoError, ScanError};
use muzloto_scanner::scanner;
use std::path::Path;
use tempfile::tempdir;

/// Несуществующая папка
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(matches!(result, Err(MuzlotoError::FolderNotFound(_))));
}

/// Пустая папка - не ошибка
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let images = scanner::scan_folder(dir.path()).unwrap();
    assert!(images.is_empty());
}

/// Папка без изображений
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    assert!(scanner::scan_folder(dir.path()).unwrap().is_empty());
}

/// Путь к файлу вместо папки
#[test]
fn test_scan_folder_on_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("anketa.jpg");
    std::fs::write(&file, b"dummy").unwrap();

    assert!(matches!(
        scanner::scan_folder(&file),
        Err(MuzlotoError::FolderNotFound(_))
    ));
}

#[test]
fn test_error_display() {
    let errors = vec![
        MuzlotoError::Config("нет домашней папки".to_string()),
        MuzlotoError::FileNotFound("anketa.jpg".to_string()),
        MuzlotoError::FolderNotFound("/scans".to_string()),
        MuzlotoError::NoImagesFound("/scans".to_string()),
        MuzlotoError::Excel("лист не найден".to_string()),
        MuzlotoError::Scan(ScanError::NotInitialized),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "пустое сообщение: {:?}", err);
    }
}

#[test]
fn test_scan_error_messages() {
    assert_eq!(ScanError::NotInitialized.to_string(), "Сканер не инициализирован");

    let err = ScanError::ImageLoad {
        path: "a.png".into(),
        reason: "формат не поддерживается".into(),
    };
    let display = err.to_string();
    assert!(display.contains("a.png"));
    assert!(display.contains("формат не поддерживается"));
}

#[test]
fn test_scan_error_conversion() {
    let err: MuzlotoError = ScanError::EngineInit("нет rus.traineddata".into()).into();
    assert!(matches!(err, MuzlotoError::Scan(ScanError::EngineInit(_))));
    assert!(err.to_string().contains("rus.traineddata"));
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: MuzlotoError = io_err.into();
    assert!(matches!(err, MuzlotoError::Io(_)));
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: MuzlotoError = json_err.into();
    assert!(matches!(err, MuzlotoError::JsonParse(_)));
}

/// Ошибка common выводится как есть
#[test]
fn test_common_error_transparent() {
    let err: MuzlotoError = muzloto_common::Error::Excel("лист не задан".to_string()).into();
    assert!(matches!(err, MuzlotoError::Common(_)));
    assert_eq!(err.to_string(), "Excel error: лист не задан");
}
