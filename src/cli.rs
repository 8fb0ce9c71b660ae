use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "muzloto")]
#[command(about = "Сканер анкет Muzloto: OCR и общий Excel-журнал", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Подробный журнал работы
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Excel-файл с анкетами (по умолчанию из настроек)
    #[arg(long, global = true)]
    pub excel: Option<PathBuf>,

    /// Папка с языковыми данными Tesseract
    #[arg(long, global = true)]
    pub tessdata: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Отсканировать одну анкету и добавить её в журнал
    Scan {
        /// Изображение анкеты
        #[arg(required = true)]
        image: PathBuf,

        /// Оператор, обработавший анкету
        #[arg(default_value = "Авто")]
        operator: String,

        /// Комментарий к записи
        #[arg(short, long, default_value = "")]
        comment: String,

        /// Вывести результат в JSON
        #[arg(long)]
        json: bool,

        /// Не записывать в журнал
        #[arg(long)]
        no_ledger: bool,
    },

    /// Обработать все анкеты из папки
    Folder {
        /// Папка со сканами
        #[arg(required = true)]
        folder: PathBuf,

        /// Оператор
        #[arg(default_value = "Пакетная обработка")]
        operator: String,

        /// Распознавать в несколько потоков
        #[arg(short, long)]
        parallel: bool,
    },

    /// Статистика по журналу
    Stats,

    /// Разобрать уже распознанный текст анкеты (без OCR)
    Parse {
        /// Текстовый файл
        #[arg(required = true)]
        input: PathBuf,
    },

    /// Показать или изменить настройки
    Config {
        /// Сохранить путь к tessdata
        #[arg(long)]
        set_tessdata: Option<String>,

        /// Показать настройки
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_defaults() {
        let cli = Cli::try_parse_from(["muzloto", "scan", "anketa.jpg"]).unwrap();
        match cli.command {
            Commands::Scan { operator, .. } => assert_eq!(operator, "Авто"),
            _ => panic!("ожидалась команда scan"),
        }

        let cli = Cli::try_parse_from(["muzloto", "folder", "/scans"]).unwrap();
        match cli.command {
            Commands::Folder { operator, parallel, .. } => {
                assert_eq!(operator, "Пакетная обработка");
                assert!(!parallel);
            }
            _ => panic!("ожидалась команда folder"),
        }
    }

    #[test]
    fn test_explicit_operator() {
        let cli = Cli::try_parse_from(["muzloto", "scan", "a.jpg", "Ольга", "--json"]).unwrap();
        match cli.command {
            Commands::Scan { operator, json, .. } => {
                assert_eq!(operator, "Ольга");
                assert!(json);
            }
            _ => panic!("ожидалась команда scan"),
        }
    }
}
