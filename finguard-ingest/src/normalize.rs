//! Field normalizers: raw captured substrings to typed values.
//!
//! Each function is pure and total over its syntactic domain, failing with
//! a [`NormalizeError`] on anything else. A failure is local and
//! recoverable: the enclosing template attempt is demoted to "no match"
//! and the dispatcher moves on to the next candidate.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

/// Kenyan mobile numbers: country prefix plus 9 subscriber digits.
const PHONE_PREFIX: &str = "254";
const PHONE_LEN: usize = 12;

/// A captured substring that does not normalize to its target type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("not a monetary amount: {0:?}")]
    Amount(String),
    #[error("not a recognized timestamp: {0:?}")]
    Timestamp(String),
    #[error("not a local phone number: {0:?}")]
    Phone(String),
}

/// Parse a monetary figure like `5,991.87` or `-30,000.70` into an exact
/// decimal with 2 fractional digits.
///
/// Thousands separators are stripped. Fails on any non-numeric residue
/// (aside from one optional leading sign) and on more than 2 fractional
/// digits.
pub fn amount(raw: &str) -> Result<Decimal, NormalizeError> {
    let cleaned = raw.trim().replace(',', "");
    let digits = cleaned.strip_prefix(['-', '+']).unwrap_or(&cleaned);

    let well_formed = !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().filter(|c| *c == '.').count() <= 1
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.');
    if !well_formed {
        return Err(NormalizeError::Amount(raw.to_string()));
    }

    let mut value =
        Decimal::from_str(&cleaned).map_err(|_| NormalizeError::Amount(raw.to_string()))?;
    if value.scale() > 2 {
        return Err(NormalizeError::Amount(raw.to_string()));
    }
    value.rescale(2);
    Ok(value)
}

/// Parse the mobile-money date and 12-hour time pair, e.g.
/// `("26/08/2025", "04:23 PM")`.
///
/// Fails on impossible calendar values and on hours outside 1-12.
pub fn mpesa_datetime(date: &str, time: &str) -> Result<NaiveDateTime, NormalizeError> {
    let combined = format!("{} {}", date.trim(), time.trim());
    NaiveDateTime::parse_from_str(&combined, "%d/%m/%Y %I:%M %p")
        .map_err(|_| NormalizeError::Timestamp(combined))
}

/// Parse the bank-style date, e.g. `01-Sep-2025`. Bank messages carry no
/// time-of-day, which defaults to midnight.
pub fn bank_date(raw: &str) -> Result<NaiveDateTime, NormalizeError> {
    NaiveDate::parse_from_str(raw.trim(), "%d-%b-%Y")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| NormalizeError::Timestamp(raw.to_string()))
}

/// Validate a counterparty phone number: exactly 12 digits starting with
/// the 254 country prefix.
pub fn phone(raw: &str) -> Result<String, NormalizeError> {
    let trimmed = raw.trim();
    if trimmed.len() == PHONE_LEN
        && trimmed.starts_with(PHONE_PREFIX)
        && trimmed.chars().all(|c| c.is_ascii_digit())
    {
        Ok(trimmed.to_string())
    } else {
        Err(NormalizeError::Phone(raw.to_string()))
    }
}
