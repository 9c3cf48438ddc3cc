//! Lenient field decoders for backend payloads.
//!
//! The marketplace API is loose about scalar types: amounts arrive as numbers
//! or numeric strings, ids as numbers or strings, flags as booleans or 0/1.
//! Everything is normalized here so the decision code only sees typed values.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime, UtcOffset, macros::format_description};

/// A response body that may or may not be wrapped in `{ "data": ... }`.
///
/// An object with a `data` key is always treated as wrapped, so a `data`
/// payload that does not decode is an error rather than a bare default.
#[derive(Debug)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(data) => data,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Envelope<T> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let mut value = Value::deserialize(d)?;

        if let Some(data) = value.as_object_mut().and_then(|body| body.remove("data")) {
            return serde_json::from_value(data)
                .map(|data| Envelope::Wrapped { data })
                .map_err(de::Error::custom);
        }

        serde_json::from_value(value)
            .map(Envelope::Bare)
            .map_err(de::Error::custom)
    }
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

pub(crate) fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(number_from_value))
}

pub(crate) fn number_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    opt_number(d).map(|v| v.unwrap_or_default())
}

pub(crate) fn opt_integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    opt_number(d).map(|v| v.map(|n| n.trunc() as i64))
}

pub(crate) fn opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        _ => None,
    })
}

pub(crate) fn id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    opt_id(d).map(Option::unwrap_or_default)
}

pub(crate) fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

pub(crate) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => matches!(s.trim(), "true" | "1"),
        _ => false,
    })
}

/// Parses the UTC calendar date of an RFC 3339 timestamp, or the date part of
/// `YYYY-MM-DD` and `YYYY-MM-DD HH:MM:SS` (no offset, taken as UTC).
/// Anything unparseable is treated as absent.
pub fn parse_calendar_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(at.to_offset(UtcOffset::UTC).date());
    }

    let format = format_description!("[year]-[month]-[day]");
    raw.get(..10)
        .and_then(|day| Date::parse(day, &format).ok())
}

pub(crate) fn opt_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Date>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value.as_deref().and_then(parse_calendar_date))
}
