//! Схема анкеты Музлото
//!
//! Единственная таблица вопросов: текст вопроса на бланке, идентификатор поля
//! и тип ответа. По ней работают и поиск вопросов в тексте OCR, и нормализация.

use serde::{Deserialize, Serialize};

/// Тип ответа, определяющий нормализацию
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Свободный текст без обработки
    FreeText,
    /// Оценка 1-10
    Rating1to10,
    /// Да/Нет
    YesNo,
    /// Оценка стоимости билета
    PriceTier,
    /// Номер телефона
    Phone,
}

/// Идентификатор поля анкеты
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Date,
    TableNumber,
    Location,
    SatisfactionRating,
    PlaylistRating,
    TracksToAdd,
    LocationRating,
    KitchenRating,
    ServiceRating,
    HostRating,
    VisitsCount,
    TicketPrice,
    KnowBooking,
    SourceInfo,
    Purpose,
    Improvements,
    PhoneNumber,
}

impl FieldId {
    /// Ключ поля в JSON-результате
    pub fn key(&self) -> &'static str {
        match self {
            FieldId::Date => "date",
            FieldId::TableNumber => "table_number",
            FieldId::Location => "location",
            FieldId::SatisfactionRating => "satisfaction_rating",
            FieldId::PlaylistRating => "playlist_rating",
            FieldId::TracksToAdd => "tracks_to_add",
            FieldId::LocationRating => "location_rating",
            FieldId::KitchenRating => "kitchen_rating",
            FieldId::ServiceRating => "service_rating",
            FieldId::HostRating => "host_rating",
            FieldId::VisitsCount => "visits_count",
            FieldId::TicketPrice => "ticket_price",
            FieldId::KnowBooking => "know_booking",
            FieldId::SourceInfo => "source_info",
            FieldId::Purpose => "purpose",
            FieldId::Improvements => "improvements",
            FieldId::PhoneNumber => "phone_number",
        }
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Вопрос анкеты
#[derive(Debug, Clone, Copy)]
pub struct Question {
    /// Текст вопроса, как он напечатан на бланке
    pub label: &'static str,
    pub field: FieldId,
    pub kind: ValueKind,
}

/// Вопросы в порядке следования на бланке.
///
/// Порядок важен: для строки OCR берётся первый совпавший вопрос.
pub const QUESTIONS: &[Question] = &[
    Question { label: "Дата:", field: FieldId::Date, kind: ValueKind::FreeText },
    Question { label: "Номер столика:", field: FieldId::TableNumber, kind: ValueKind::FreeText },
    Question { label: "Место игры:", field: FieldId::Location, kind: ValueKind::FreeText },
    Question {
        label: "Довольны ли вы посещением Музлото?",
        field: FieldId::SatisfactionRating,
        kind: ValueKind::Rating1to10,
    },
    Question {
        label: "Понравился ли вам плейлист?",
        field: FieldId::PlaylistRating,
        kind: ValueKind::Rating1to10,
    },
    Question {
        label: "Какие треки вы бы добавили?",
        field: FieldId::TracksToAdd,
        kind: ValueKind::FreeText,
    },
    Question {
        label: "Понравилась ли вам локация?",
        field: FieldId::LocationRating,
        kind: ValueKind::Rating1to10,
    },
    Question {
        label: "Понравилась ли вам кухня и бар?",
        field: FieldId::KitchenRating,
        kind: ValueKind::Rating1to10,
    },
    Question {
        label: "Устроил ли вас сервис, время подачи?",
        field: FieldId::ServiceRating,
        kind: ValueKind::Rating1to10,
    },
    Question {
        label: "Понравилась ли вам работа ведущего?",
        field: FieldId::HostRating,
        kind: ValueKind::Rating1to10,
    },
    Question {
        label: "Сколько раз вы были на Музлото?",
        field: FieldId::VisitsCount,
        kind: ValueKind::FreeText,
    },
    Question {
        label: "Оцените стоимость игры за билет",
        field: FieldId::TicketPrice,
        kind: ValueKind::PriceTier,
    },
    Question {
        label: "Знаете ли вы, что Музлото можно заказать на корпоратив или день рождения",
        field: FieldId::KnowBooking,
        kind: ValueKind::YesNo,
    },
    Question {
        label: "Откуда вы о нас узнали?",
        field: FieldId::SourceInfo,
        kind: ValueKind::FreeText,
    },
    Question {
        label: "Ради чего вы обычно ходите на подобные вечеринки?",
        field: FieldId::Purpose,
        kind: ValueKind::FreeText,
    },
    Question {
        label: "Что нам стоит улучшить?",
        field: FieldId::Improvements,
        kind: ValueKind::FreeText,
    },
    Question {
        label: "Если вы хотите, чтобы мы с вами связались - оставьте ваш номер телефона.",
        field: FieldId::PhoneNumber,
        kind: ValueKind::Phone,
    },
];

/// Найти вопрос, текст которого содержится в строке
pub fn find_question(line: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| line.contains(q.label))
}

/// Строка содержит текст какого-либо вопроса
pub fn is_question_line(line: &str) -> bool {
    find_question(line).is_some()
}
