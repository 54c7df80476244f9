//! Serde adapter for `Duration` settings.
//!
//! # Design
//! - Written as whole seconds.
//! - Read from whole seconds or from duration strings such as `30s`, `1m30s`, or `24h0m0s`,
//!   the form older config files carry. Sub-second remainders round to the nearest second.

#![allow(clippy::redundant_pub_crate)]

use std::fmt;
use std::time::Duration;

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

const NANOS_PER_SEC: u128 = 1_000_000_000;

pub(crate) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(value.as_secs())
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DurationVisitor)
}

struct DurationVisitor;

impl Visitor<'_> for DurationVisitor {
    type Value = Duration;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("whole seconds or a duration string such as `30s` or `24h0m0s`")
    }

    fn visit_u64<E>(self, value: u64) -> Result<Duration, E>
    where
        E: de::Error,
    {
        Ok(Duration::from_secs(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Duration, E>
    where
        E: de::Error,
    {
        u64::try_from(value)
            .map(Duration::from_secs)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }

    fn visit_str<E>(self, value: &str) -> Result<Duration, E>
    where
        E: de::Error,
    {
        parse_duration(value).map_err(|reason| {
            E::custom(format_args!("invalid duration `{value}`: {reason}"))
        })
    }
}

/// Parse a duration string made of `<number><unit>` terms, e.g. `1h30m`, `1.5s`, `250ms`.
///
/// Accepted units are `h`, `m`, `s`, `ms`, `us` (or `µs`), and `ns`. A bare number is
/// taken as seconds.
pub(crate) fn parse_duration(text: &str) -> Result<Duration, &'static str> {
    let text = text.trim();
    let body = text.strip_prefix('+').unwrap_or(text);
    if body.starts_with('-') {
        return Err("negative");
    }
    if body.is_empty() {
        return Err("empty");
    }
    if body.bytes().all(|b| b.is_ascii_digit()) {
        return body
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| "out of range");
    }

    let mut nanos: u128 = 0;
    let mut rest = body;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);
        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);

        if unit.is_empty() {
            return Err("missing unit");
        }
        let scale = unit_nanos(unit).ok_or("unknown unit")?;
        let term = term_nanos(number, scale)?;
        nanos = nanos.checked_add(term).ok_or("out of range")?;
        rest = tail;
    }

    let secs = nanos
        .checked_add(NANOS_PER_SEC / 2)
        .ok_or("out of range")?
        / NANOS_PER_SEC;
    u64::try_from(secs)
        .map(Duration::from_secs)
        .map_err(|_| "out of range")
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

fn term_nanos(number: &str, scale: u128) -> Result<u128, &'static str> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err("missing number");
    }

    let whole = parse_digits(whole)?;
    let mut total = whole.checked_mul(scale).ok_or("out of range")?;

    // Digits past nanosecond precision of the largest unit cannot change the result.
    let fraction = &fraction[..fraction.len().min(18)];
    if !fraction.is_empty() {
        let numerator = parse_digits(fraction)?;
        let exponent = u32::try_from(fraction.len()).map_err(|_| "out of range")?;
        let denominator = 10_u128.pow(exponent);
        let part = numerator.checked_mul(scale).ok_or("out of range")? / denominator;
        total = total.checked_add(part).ok_or("out of range")?;
    }
    Ok(total)
}

fn parse_digits(digits: &str) -> Result<u128, &'static str> {
    if digits.is_empty() {
        return Ok(0);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err("invalid number");
    }
    digits.parse::<u128>().map_err(|_| "out of range")
}
