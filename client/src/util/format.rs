//! pt-BR date display helpers.
//!
//! Inputs are either already-parsed instants or ISO-8601-like strings as
//! stored by the backend. No timezone conversion happens: the wall-clock
//! fields as written are displayed, and an offset-aware instant is shown in
//! its own offset. Strings that cannot be parsed render as `Invalid Date`.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, Weekday};

/// Display string for unparseable input.
pub const INVALID_DATE: &str = "Invalid Date";

/// A timestamp to format: a parsed instant or text to parse.
#[derive(Clone, Copy, Debug)]
pub enum DateInput<'a> {
    Instant(PrimitiveDateTime),
    Text(&'a str),
}

impl From<PrimitiveDateTime> for DateInput<'_> {
    fn from(value: PrimitiveDateTime) -> Self {
        Self::Instant(value)
    }
}

impl From<OffsetDateTime> for DateInput<'_> {
    fn from(value: OffsetDateTime) -> Self {
        Self::Instant(PrimitiveDateTime::new(value.date(), value.time()))
    }
}

impl From<Date> for DateInput<'_> {
    fn from(value: Date) -> Self {
        Self::Instant(PrimitiveDateTime::new(value, Time::MIDNIGHT))
    }
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl DateInput<'_> {
    fn resolve(self) -> Option<PrimitiveDateTime> {
        match self {
            Self::Instant(value) => Some(value),
            Self::Text(raw) => parse_timestamp(raw),
        }
    }
}

/// `DD/MM/YYYY`.
pub fn format_date<'a>(input: impl Into<DateInput<'a>>) -> String {
    let Some(value) = input.into().resolve() else {
        return INVALID_DATE.to_owned();
    };
    value
        .format(format_description!("[day]/[month]/[year]"))
        .unwrap_or_else(|_| INVALID_DATE.to_owned())
}

/// `DD/MM/YYYY HH:MM`.
pub fn format_date_time<'a>(input: impl Into<DateInput<'a>>) -> String {
    let Some(value) = input.into().resolve() else {
        return INVALID_DATE.to_owned();
    };
    value
        .format(format_description!("[day]/[month]/[year] [hour]:[minute]"))
        .unwrap_or_else(|_| INVALID_DATE.to_owned())
}

/// Long form, e.g. `terça-feira, 05 de março de 2024 às 14:30`.
pub fn format_date_time_full<'a>(input: impl Into<DateInput<'a>>) -> String {
    let Some(value) = input.into().resolve() else {
        return INVALID_DATE.to_owned();
    };
    format!(
        "{}, {:02} de {} de {} às {:02}:{:02}",
        weekday_name(value.weekday()),
        value.day(),
        month_name(value.month()),
        value.year(),
        value.hour(),
        value.minute(),
    )
}

/// Parse the timestamp shapes the backend emits into wall-clock fields.
///
/// Accepts `YYYY-MM-DD`, optionally followed by `T` or a space and
/// `HH:MM[:SS[.fff]]`, optionally followed by `Z` or a numeric offset,
/// which is dropped.
fn parse_timestamp(raw: &str) -> Option<PrimitiveDateTime> {
    let raw = raw.trim();
    let (date_part, time_part) = match raw.get(10..11) {
        None => (raw, None),
        Some("T" | " ") => (&raw[..10], Some(&raw[11..])),
        Some(_) => return None,
    };

    let date = Date::parse(date_part, format_description!("[year]-[month]-[day]")).ok()?;
    let Some(time_part) = time_part else {
        return Some(PrimitiveDateTime::new(date, Time::MIDNIGHT));
    };

    let time = parse_wall_time(strip_offset(time_part))?;
    Some(PrimitiveDateTime::new(date, time))
}

fn strip_offset(time_part: &str) -> &str {
    let end = time_part
        .find(['Z', 'z', '+', '-'])
        .unwrap_or(time_part.len());
    time_part[..end].trim_end()
}

fn parse_wall_time(text: &str) -> Option<Time> {
    let with_fraction = format_description!("[hour]:[minute]:[second].[subsecond]");
    let with_seconds = format_description!("[hour]:[minute]:[second]");
    let minutes_only = format_description!("[hour]:[minute]");

    Time::parse(text, with_fraction)
        .or_else(|_| Time::parse(text, with_seconds))
        .or_else(|_| Time::parse(text, minutes_only))
        .ok()
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "segunda-feira",
        Weekday::Tuesday => "terça-feira",
        Weekday::Wednesday => "quarta-feira",
        Weekday::Thursday => "quinta-feira",
        Weekday::Friday => "sexta-feira",
        Weekday::Saturday => "sábado",
        Weekday::Sunday => "domingo",
    }
}

fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "janeiro",
        Month::February => "fevereiro",
        Month::March => "março",
        Month::April => "abril",
        Month::May => "maio",
        Month::June => "junho",
        Month::July => "julho",
        Month::August => "agosto",
        Month::September => "setembro",
        Month::October => "outubro",
        Month::November => "novembro",
        Month::December => "dezembro",
    }
}
