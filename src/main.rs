use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use muzloto_common::{assemble_result, FieldId, ScanResult, QUESTIONS};
use muzloto_scanner::ledger::{FolderSummary, Ledger};
use muzloto_scanner::{cli, config, error, ocr, scanner};
use cli::{Cli, Commands};
use config::Config;
use error::{MuzlotoError, Result};
use ocr::FormScanner;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;
    let excel_file = cli.excel.clone().unwrap_or_else(|| config.excel_file.clone());
    let tessdata = cli.tessdata.clone().or_else(|| config.tessdata());

    match cli.command {
        Commands::Scan { image, operator, comment, json, no_ledger } => {
            if !json {
                println!("🎵 muzloto - сканирование анкеты\n");
            }

            let mut scanner = build_scanner(&config, tessdata.as_deref())?;

            if no_ledger {
                if !image.is_file() {
                    return Err(MuzlotoError::FileNotFound(image.display().to_string()));
                }
                let result = scanner.scan_image(&image);
                if json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    print_scan(&result);
                }
                return Ok(());
            }

            let mut ledger = Ledger::open(&excel_file, &config.sheet_name)?;
            let outcome = ledger.process_image(&mut scanner, &image, &operator, &comment)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_scan(&outcome.scan);
                if outcome.success {
                    println!("\n✅ {}", outcome.message);
                } else {
                    println!("\n❌ {}", outcome.message);
                }
                println!("📊 Файл: {}", outcome.excel_file);
            }
        }

        Commands::Folder { folder, operator, parallel } => {
            println!("🎵 muzloto - пакетная обработка\n");

            println!("[1/2] Поиск сканов...");
            let images = scanner::scan_folder(&folder)?;
            if images.is_empty() {
                return Err(MuzlotoError::NoImagesFound(folder.display().to_string()));
            }
            println!("✔ Найдено изображений: {}\n", images.len());

            println!("[2/2] Распознавание{}...", if parallel { " (параллельно)" } else { "" });
            let mut ledger = Ledger::open(&excel_file, &config.sheet_name)?;
            let mut summary = FolderSummary::default();
            let pb = progress_bar(images.len() as u64);

            if parallel {
                // движок должен загружаться до запуска потоков
                build_scanner(&config, tessdata.as_deref())?;

                let results = ocr::scan_parallel(&images, || {
                    let mut scanner = FormScanner::new()
                        .with_language(config.language.clone())
                        .with_options(config.normalize_options());
                    scanner.try_initialize(tessdata.as_deref())?;
                    Ok(scanner)
                });

                for (i, (image, scan)) in images.iter().zip(results).enumerate() {
                    pb.set_message(image.file_name.clone());
                    let comment = format!("Пакетная обработка #{}", i + 1);
                    let outcome = ledger.record(&image.path, scan, &operator, &comment)?;
                    summary.add(&image.file_name, &outcome);
                    pb.inc(1);
                }
            } else {
                let mut scanner = build_scanner(&config, tessdata.as_deref())?;
                for (i, image) in images.iter().enumerate() {
                    pb.set_message(image.file_name.clone());
                    let comment = format!("Пакетная обработка #{}", i + 1);
                    let outcome =
                        ledger.process_image(&mut scanner, &image.path, &operator, &comment)?;
                    summary.add(&image.file_name, &outcome);
                    pb.inc(1);
                }
            }
            pb.finish_and_clear();

            for item in summary.details.iter().filter(|d| !d.success) {
                println!("  ❌ {}: {}", item.file, item.message);
            }

            println!("\n✅ Обработка завершена");
            println!("  Всего: {}", summary.total);
            println!("  Успешно: {}", summary.success);
            println!("  С ошибками: {}", summary.failed);
            println!("📊 Файл: {}", ledger.path().display());
        }

        Commands::Stats => {
            let ledger = Ledger::open(&excel_file, &config.sheet_name)?;
            let stats = ledger.statistics()?;

            println!("📊 Статистика журнала:");
            println!("  Файл: {}", stats.excel_file);
            println!("  Всего записей: {}", stats.total_records);
            println!("  Успешных: {}", stats.successful_records);
            println!("  Разных дней заполнения: {}", stats.unique_dates);
        }

        Commands::Parse { input } => {
            if !input.is_file() {
                return Err(MuzlotoError::FileNotFound(input.display().to_string()));
            }
            let text = std::fs::read_to_string(&input)?;
            let result = assemble_result(&text, &config.normalize_options());
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Config { set_tessdata, show } => {
            let mut config = config;

            if let Some(path) = set_tessdata {
                config.set_tessdata(path)?;
                println!("✔ Путь к tessdata сохранён");
            }

            if show {
                println!("Настройки:");
                println!(
                    "  tessdata: {}",
                    config.tessdata().unwrap_or_else(|| "(по умолчанию)".into())
                );
                println!("  Языки: {}", config.language);
                println!("  Excel-файл: {}", config.excel_file.display());
                println!("  Лист: {}", config.sheet_name);
                println!(
                    "  Отметки «+/v/x» как «Да»: {}",
                    if config.yes_no_marks { "да" } else { "нет" }
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "muzloto_scanner=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_scanner(config: &Config, tessdata: Option<&str>) -> Result<FormScanner> {
    let mut scanner = FormScanner::new()
        .with_language(config.language.clone())
        .with_options(config.normalize_options());
    scanner.try_initialize(tessdata)?;
    Ok(scanner)
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

fn print_scan(result: &ScanResult) {
    if !result.success {
        println!("❌ {}", result.error_message);
        return;
    }

    println!("✔ Распознано за {:.1} мс, полей: {}\n", result.processing_time_ms, result.fields.len());
    for question in QUESTIONS.iter() {
        let value = result.answers.get(question.field);
        if !value.is_empty() {
            println!("  {} {}", short_label(question.field, question.label), value);
        }
    }
}

fn short_label(field: FieldId, label: &str) -> String {
    match field {
        FieldId::PhoneNumber => "Телефон:".to_string(),
        _ if label.chars().count() > 40 => format!("{}:", field),
        _ => label.to_string(),
    }
}

