use crate::error::{MuzlotoError, Result};
use muzloto_common::NormalizeOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Переменная окружения с путём к tessdata (приоритетнее файла настроек)
pub const TESSDATA_ENV: &str = "MUZLOTO_TESSDATA";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Папка с *.traineddata; None - путь движка по умолчанию
    pub tessdata_path: Option<String>,
    /// Языки распознавания
    pub language: String,
    /// Общий Excel-файл с анкетами
    pub excel_file: PathBuf,
    pub sheet_name: String,
    /// Считать отметки «+», «v», «x» ответом «Да»
    pub yes_no_marks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tessdata_path: None,
            language: "rus+eng".into(),
            excel_file: PathBuf::from("анкеты_muzloto.xlsx"),
            sheet_name: muzloto_common::SHEET_NAME.into(),
            yes_no_marks: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MuzlotoError::Config("Домашняя папка не найдена".into()))?;
        Ok(home.join(".config").join("muzloto-scanner").join("config.json"))
    }

    /// Путь к tessdata с учётом переменной окружения
    pub fn tessdata(&self) -> Option<String> {
        if let Ok(path) = std::env::var(TESSDATA_ENV) {
            if !path.is_empty() {
                return Some(path);
            }
        }

        self.tessdata_path.clone().filter(|p| !p.is_empty())
    }

    pub fn set_tessdata(&mut self, path: String) -> Result<()> {
        self.tessdata_path = Some(path);
        self.save()
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            yes_no_marks: self.yes_no_marks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.language, "rus+eng");
        assert_eq!(config.sheet_name, "Анкеты");
        assert!(config.yes_no_marks);
        assert!(config.normalize_options().yes_no_marks);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"yes_no_marks": false}"#).unwrap();
        assert!(!config.yes_no_marks);
        assert_eq!(config.language, "rus+eng");
        assert!(config.tessdata_path.is_none());
    }
}
