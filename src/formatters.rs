//! Display formatting for dates, times, booleans and raw stored values.
//!
//! Every function here is total: input that cannot be parsed comes back as
//! the raw text rather than an error.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde_json::Value;

use crate::document::Language;

const DAYS_ES: [&str; 7] = [
    "lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo",
];
const MONTHS_ES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

fn date_text(date: NaiveDate, language: Language) -> String {
    match language {
        Language::En => date.format("%A, %B %-d, %Y").to_string(),
        Language::Es => format!(
            "{}, {} de {} de {}",
            DAYS_ES[date.weekday().num_days_from_monday() as usize],
            date.day(),
            MONTHS_ES[date.month0() as usize],
            date.year()
        ),
    }
}

fn time_text(time: NaiveTime) -> String {
    let (pm, hour) = time.hour12();
    format!("{}:{:02} {}", hour, time.minute(), if pm { "PM" } else { "AM" })
}

/// `2024-01-01` becomes `Monday, January 1, 2024`.
pub fn format_date(raw: &str, language: Language) -> String {
    parse_date(raw)
        .map(|date| date_text(date, language))
        .unwrap_or_else(|| raw.to_string())
}

/// `14:30:00` becomes `2:30 PM`.
pub fn format_time(raw: &str) -> String {
    parse_time(raw)
        .map(time_text)
        .unwrap_or_else(|| raw.to_string())
}

/// Joins a formatted date and time, tolerating either being absent.
pub fn format_date_and_time(date: Option<&str>, time: Option<&str>, language: Language) -> String {
    let connector = match language {
        Language::En => "at",
        Language::Es => "a las",
    };
    match (date, time) {
        (Some(date), Some(time)) => format!(
            "{} {} {}",
            format_date(date, language),
            connector,
            format_time(time)
        ),
        (Some(date), None) => format_date(date, language),
        (None, Some(time)) => format_time(time),
        (None, None) => String::new(),
    }
}

/// A combined ISO timestamp, formatted as date and time.
pub fn format_date_time(raw: &str, language: Language) -> String {
    match parse_date_time(raw) {
        Some(dt) => {
            let date = dt.date().format("%Y-%m-%d").to_string();
            let time = dt.time().format("%H:%M").to_string();
            format_date_and_time(Some(&date), Some(&time), language)
        }
        None => raw.to_string(),
    }
}

pub fn format_yes_no(value: bool, language: Language) -> String {
    match (value, language) {
        (true, Language::En) => "Yes".to_string(),
        (true, Language::Es) => "Sí".to_string(),
        (false, _) => "No".to_string(),
    }
}

/// Interprets a stored yes/no value. Accepts booleans and their string forms.
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    }
}

/// Renders a raw stored value as plain text. `null` becomes the empty string.
pub fn raw_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
