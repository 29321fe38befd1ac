//! Field codecs for the loosely typed legacy payloads.
//!
//! Numbers show up as JSON numbers or numeric strings, identifiers as either,
//! and "nothing" as `null`, `""` or `"null"`.

use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

use crate::domain::RateTierId;
use crate::shared::time::parse_wire_opt;

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Text(String),
    Flag(bool),
}

fn is_blank(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s == "null"
}

pub fn decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Loose::Int(n)) => Ok(Some(Decimal::from(n))),
        Some(Loose::Float(f)) => Decimal::try_from(f)
            .map(|d| Some(d.normalize()))
            .map_err(D::Error::custom),
        Some(Loose::Text(s)) if is_blank(&s) => Ok(None),
        Some(Loose::Text(s)) => Decimal::from_str(s.trim())
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid amount '{}': {}", s, e))),
        Some(Loose::Flag(b)) => Err(D::Error::custom(format!(
            "expected an amount, got boolean {}",
            b
        ))),
    }
}

pub fn tier_id_opt<'de, D>(deserializer: D) -> Result<Option<RateTierId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Loose::Int(n)) => Ok(Some(RateTierId::from(n))),
        Some(Loose::Text(s)) if is_blank(&s) => Ok(None),
        Some(Loose::Text(s)) => Ok(Some(RateTierId::new(s))),
        Some(Loose::Float(f)) => Err(D::Error::custom(format!("invalid tier id {}", f))),
        Some(Loose::Flag(b)) => Err(D::Error::custom(format!("invalid tier id {}", b))),
    }
}

pub fn timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_wire_opt(&raw)
        .map_err(D::Error::custom)?
        .ok_or_else(|| D::Error::custom("timestamp is required"))
}

pub fn timestamp_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_wire_opt(&raw).map_err(D::Error::custom),
    }
}

/// Amounts go out as JSON numbers: integers when the value is whole.
pub fn serialize_amount<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let normalized = amount.normalize();
    if normalized.scale() == 0 {
        if let Some(n) = normalized.to_i64() {
            return serializer.serialize_i64(n);
        }
    }
    match normalized.to_f64() {
        Some(f) => serializer.serialize_f64(f),
        None => serializer.serialize_str(&normalized.to_string()),
    }
}
