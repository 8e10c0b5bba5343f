//! Cell value parsing for loosely formatted exports

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use common::{Adherence, Direction, Session, TradeResult};

use crate::columns::normalize;

/// Parse a money or price cell.
///
/// Accepts currency symbols and codes (`$`, `EUR`), thousands separators, a
/// leading `+` and accounting negatives such as `(12.50)`. When both `.` and `,`
/// appear, whichever comes last is the decimal separator. A lone comma followed
/// by anything other than three digits is read as a decimal comma. Blank and
/// placeholder cells (`-`, `n/a`) are `Ok(None)`.
pub fn parse_number(raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || matches!(trimmed.to_ascii_lowercase().as_str(), "-" | "n/a" | "na") {
        return Ok(None);
    }

    let (negative, body) = match trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let mut cleaned = numeric_chars(body);

    let last_dot = cleaned.rfind('.');
    let last_comma = cleaned.rfind(',');
    match (last_dot, last_comma) {
        (Some(dot), Some(comma)) if comma > dot => {
            cleaned.retain(|c| c != '.');
            cleaned = cleaned.replace(',', ".");
        }
        (None, Some(_)) if cleaned.matches(',').count() == 1 => {
            let decimals = cleaned.split(',').nth(1).map_or(0, str::len);
            if decimals != 3 {
                cleaned = cleaned.replace(',', ".");
            }
        }
        _ => {}
    }
    cleaned.retain(|c| c != ',');

    let value: f64 = cleaned.parse().map_err(|_| trimmed.to_string())?;
    if !value.is_finite() {
        return Err(trimmed.to_string());
    }
    Ok(Some(if negative { -value.abs() } else { value }))
}

/// Digits, separators and signs of a cell; an exponent marker survives only
/// between a digit and a digit or sign
fn numeric_chars(body: &str) -> String {
    let chars: Vec<char> = body.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(idx, c)| match *c {
            '0'..='9' | '.' | ',' | '-' | '+' => true,
            'e' | 'E' => {
                let after_digit = idx > 0 && chars[idx - 1].is_ascii_digit();
                let before_digit = chars
                    .get(idx + 1)
                    .is_some_and(|n| n.is_ascii_digit() || matches!(n, '+' | '-'));
                after_digit && before_digit
            }
            _ => false,
        })
        .map(|(_, c)| *c)
        .collect()
}

/// Parse a long/short cell (`buy`, `sell limit`, `L`, ...)
#[must_use]
pub fn parse_direction(raw: &str) -> Option<Direction> {
    let value = normalize(raw);
    match value.as_str() {
        "long" | "l" | "b" | "bull" | "bullish" => Some(Direction::Long),
        "short" | "s" | "bear" | "bearish" => Some(Direction::Short),
        v if v.starts_with("buy") => Some(Direction::Long),
        v if v.starts_with("sell") => Some(Direction::Short),
        _ => None,
    }
}

/// Parse a trade result cell
#[must_use]
pub fn parse_result(raw: &str) -> Option<TradeResult> {
    match normalize(raw).as_str() {
        "win" | "w" | "won" | "tp" | "winner" => Some(TradeResult::Win),
        "loss" | "l" | "lost" | "lose" | "sl" | "loser" => Some(TradeResult::Loss),
        "breakeven" | "be" | "even" | "scratch" | "flat" => Some(TradeResult::Breakeven),
        "ongoing" | "open" | "running" | "active" | "live" => Some(TradeResult::Ongoing),
        _ => None,
    }
}

/// Parse a trading session cell
#[must_use]
pub fn parse_session(raw: &str) -> Option<Session> {
    match normalize(raw).as_str() {
        "london" | "ldn" | "lon" | "europe" | "european" => Some(Session::London),
        "newyork" | "ny" | "nyc" | "us" | "american" => Some(Session::NewYork),
        "tokyo" | "tky" | "asia" | "asian" => Some(Session::Tokyo),
        "sydney" | "syd" | "pacific" => Some(Session::Sydney),
        _ => None,
    }
}

/// Parse a plan-adherence cell
#[must_use]
pub fn parse_adherence(raw: &str) -> Option<Adherence> {
    match normalize(raw).as_str() {
        "yes" | "y" | "true" | "1" | "followed" => Some(Adherence::Yes),
        "no" | "n" | "false" | "0" => Some(Adherence::No),
        "partial" | "partially" | "p" | "some" => Some(Adherence::Partial),
        _ => None,
    }
}

/// Parse a date cell using the configured formats.
///
/// Each format is tried as a plain date and then with a trailing time of day;
/// ISO timestamps are accepted as a last resort. The time, when present, is
/// returned separately.
#[must_use]
pub fn parse_date(raw: &str, formats: &[String]) -> Option<(NaiveDate, Option<NaiveTime>)> {
    let raw = raw.trim();
    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some((date, None));
        }
        for time_format in ["%H:%M:%S", "%H:%M"] {
            let full = format!("{format} {time_format}");
            if let Ok(ts) = NaiveDateTime::parse_from_str(raw, &full) {
                return Some((ts.date(), Some(ts.time())));
            }
        }
    }
    common::document::parse_date(raw)
}

/// Parse a time-of-day cell, tolerating full timestamps
#[must_use]
pub fn parse_time(raw: &str, formats: &[String]) -> Option<NaiveTime> {
    common::document::parse_time(raw).or_else(|| parse_date(raw, formats).and_then(|(_, t)| t))
}
