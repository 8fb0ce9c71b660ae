//! Нормализация ответов
//!
//! - Оценки 1-10: первое число 10 или 1-9
//! - Да/Нет: приведение к «Да» / «Нет»
//! - Стоимость билета: один из трёх вариантов бланка
//! - Телефон: извлечение и приведение к +7XXXXXXXXXX

use crate::schema::ValueKind;
use regex::Regex;

/// Варианты ответа о стоимости билета
pub const PRICE_MORE_EXPENSIVE: &str = "можно смело ставить дороже";
pub const PRICE_AFFORDABLE: &str = "доступно";
pub const PRICE_EXPENSIVE: &str = "дорого";

pub const YES: &str = "Да";
pub const NO: &str = "Нет";

/// Настройки нормализации
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Считать отметки «+», «v», «x» ответом «Да».
    ///
    /// Срабатывает на любом тексте с этими символами.
    pub yes_no_marks: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self { yes_no_marks: true }
    }
}

/// Нормализовать ответ по типу поля
pub fn normalize_value(kind: ValueKind, text: &str, options: &NormalizeOptions) -> String {
    match kind {
        ValueKind::FreeText => text.to_string(),
        ValueKind::Rating1to10 => extract_rating(text),
        ValueKind::YesNo => extract_yes_no(text, options.yes_no_marks),
        ValueKind::PriceTier => extract_ticket_price(text),
        ValueKind::Phone => {
            let phone = extract_phone_number(text);
            if phone.is_empty() {
                phone
            } else {
                normalize_phone(&phone)
            }
        }
    }
}

/// Оценка 1-10: первое подходящее число, иначе исходный текст
pub fn extract_rating(text: &str) -> String {
    lazy_static::lazy_static! {
        static ref RATING_RE: Regex = Regex::new(r"10|[1-9]").unwrap();
    }

    match RATING_RE.find(text) {
        Some(m) => m.as_str().to_string(),
        None => text.to_string(),
    }
}

/// Да/Нет без учёта регистра, иначе исходный текст
pub fn extract_yes_no(text: &str, marks: bool) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lower = text.to_lowercase();
    let yes_words = ["да", "yes", "✓"];
    let yes_marks = ["+", "v", "x"];

    let is_yes = yes_words.iter().any(|w| lower.contains(w))
        || (marks && yes_marks.iter().any(|m| lower.contains(m)));
    if is_yes {
        return YES.to_string();
    }

    if lower.contains("нет") || lower.contains("no") {
        return NO.to_string();
    }

    text.to_string()
}

/// Стоимость билета: один из трёх вариантов, иначе исходный текст
pub fn extract_ticket_price(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lower = text.to_lowercase();

    // «дороже» проверяется раньше «дорого»
    if lower.contains(PRICE_MORE_EXPENSIVE) || lower.contains("дороже") {
        PRICE_MORE_EXPENSIVE.to_string()
    } else if lower.contains(PRICE_AFFORDABLE) {
        PRICE_AFFORDABLE.to_string()
    } else if lower.contains(PRICE_EXPENSIVE) {
        PRICE_EXPENSIVE.to_string()
    } else {
        text.to_string()
    }
}

/// Найти российский номер (+7 или 8, затем 3-3-2-2 цифры).
/// Если номера нет, возвращается пустая строка.
pub fn extract_phone_number(text: &str) -> String {
    lazy_static::lazy_static! {
        static ref PHONE_RE: Regex = Regex::new(
            r"(\+7|8)[\s\-(]?([0-9]{3})[\s\-)]?([0-9]{3})[\s\-]?([0-9]{2})[\s\-]?([0-9]{2})"
        ).unwrap();
    }

    PHONE_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Привести номер к виду +7XXXXXXXXXX
pub fn normalize_phone(phone: &str) -> String {
    let mut normalized: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    if normalized.is_empty() {
        return normalized;
    }

    if let Some(rest) = normalized.strip_prefix('8') {
        normalized = format!("+7{}", rest);
    } else if !normalized.starts_with("+7") {
        normalized = format!("+7{}", normalized);
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_rating() {
        assert_eq!(extract_rating("7 баллов"), "7");
        assert_eq!(extract_rating("оценка: 10"), "10");
        assert_eq!(extract_rating("10/10"), "10");
        assert_eq!(extract_rating(""), "");
    }

    #[test]
    fn test_extract_rating_without_digit() {
        assert_eq!(extract_rating("отлично"), "отлично");
        assert_eq!(extract_rating("0"), "0");
    }

    #[test]
    fn test_extract_yes_no() {
        assert_eq!(extract_yes_no("Да, конечно", true), "Да");
        assert_eq!(extract_yes_no("Нет, не знаю", true), "Нет");
        assert_eq!(extract_yes_no("Может быть", true), "Может быть");
        assert_eq!(extract_yes_no("YES", true), "Да");
        assert_eq!(extract_yes_no("No", true), "Нет");
        assert_eq!(extract_yes_no("", true), "");
    }

    #[test]
    fn test_extract_yes_no_marks() {
        assert_eq!(extract_yes_no("[x]", true), "Да");
        assert_eq!(extract_yes_no("+", true), "Да");
        assert_eq!(extract_yes_no("[x]", false), "[x]");
        assert_eq!(extract_yes_no("✓", false), "Да");
    }

    #[test]
    fn test_yes_no_idempotent() {
        for value in [YES, NO, "Может быть"] {
            let once = extract_yes_no(value, true);
            assert_eq!(extract_yes_no(&once, true), once);
        }
    }

    #[test]
    fn test_extract_ticket_price() {
        assert_eq!(extract_ticket_price("Можно смело ставить ДОРОЖЕ"), PRICE_MORE_EXPENSIVE);
        assert_eq!(extract_ticket_price("дороже"), PRICE_MORE_EXPENSIVE);
        assert_eq!(extract_ticket_price("Доступно"), PRICE_AFFORDABLE);
        assert_eq!(extract_ticket_price("дорого"), PRICE_EXPENSIVE);
        assert_eq!(extract_ticket_price("нормально"), "нормально");
    }

    #[test]
    fn test_phone_extract_and_normalize() {
        let opts = NormalizeOptions::default();
        assert_eq!(normalize_value(ValueKind::Phone, "8 916 123 45 67", &opts), "+79161234567");
        assert_eq!(normalize_value(ValueKind::Phone, "+7(916)123-45-67", &opts), "+79161234567");
        assert_eq!(normalize_value(ValueKind::Phone, "тел: 89161234567", &opts), "+79161234567");
        assert_eq!(normalize_value(ValueKind::Phone, "не оставлю", &opts), "");
        assert_eq!(normalize_value(ValueKind::Phone, "123", &opts), "");
    }

    #[test]
    fn test_normalize_phone_prefix() {
        assert_eq!(normalize_phone("+79161234567"), "+79161234567");
        assert_eq!(normalize_phone("9161234567"), "+79161234567");
        assert_eq!(normalize_phone(""), "");
    }

    #[test]
    fn test_normalized_values_are_stable() {
        let opts = NormalizeOptions::default();
        for (kind, text) in [
            (ValueKind::Rating1to10, "8 из 10"),
            (ValueKind::PriceTier, "дороговато, но дороже можно"),
            (ValueKind::Phone, "8-916-123-45-67"),
        ] {
            let once = normalize_value(kind, text, &opts);
            assert_eq!(normalize_value(kind, &once, &opts), once);
        }
    }
}
