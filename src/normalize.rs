//! Canonical numbers from heterogeneous price and rating fields.
//!
//! Both normalizers are total. Every input shape they do not recognize
//! resolves to `0.0`, which means "no usable value". A genuine price of zero
//! is indistinguishable from a missing one.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::trace;

use crate::record::RawField;

const PRICE_KEY: &str = "Current Price";
const RATING_KEY: &str = "Overall Rating";
const STAR_PHRASE: &str = "out of 5 stars";
const MAX_RATING: f64 = 5.0;

/// Placeholders the scrapers emit instead of a price
const PRICE_SENTINELS: &[&str] = &["Not Available", "N/A", ""];

/// Placeholders the scrapers emit instead of review details
const RATING_SENTINELS: &[&str] = &["-", "{}", ""];

// Pre-compiled regexes (compile once, use many times)
static STAR_RATING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+\.?\d*)\s+out of 5 stars").expect("Invalid star rating regex")
});

static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("Invalid leading number regex")
});

/// Canonical price of a raw price field, `0.0` when unusable
pub fn normalize_price(raw: &RawField) -> f64 {
    let Some(map) = structured(raw) else {
        trace!(?raw, "price field is not structured");
        return 0.0;
    };

    let price = match map.get(PRICE_KEY) {
        None => return 0.0,
        Some(Value::String(s)) => s.trim(),
        Some(other) => {
            trace!(?other, "price value is not a string");
            return 0.0;
        }
    };

    if PRICE_SENTINELS.contains(&price) {
        return 0.0;
    }

    let cleaned: String = price.chars().filter(|c| *c != '$' && *c != ',').collect();
    match parse_leading_number(&cleaned) {
        Some(value) if value >= 0.0 => value,
        _ => {
            trace!(price, "unparseable price");
            0.0
        }
    }
}

/// Canonical rating of a raw review field, in `[0, 5]`, `0.0` when unusable
///
/// Free text such as "4.2 out of 5 stars, 48 reviews." wins over any
/// structured interpretation of the same string.
pub fn normalize_rating(raw: &RawField) -> f64 {
    if let RawField::Text(text) = raw {
        if RATING_SENTINELS.contains(&text.trim()) {
            return 0.0;
        }

        if text.contains(STAR_PHRASE) {
            if let Some(caps) = STAR_RATING_RE.captures(text) {
                return parse_leading_number(&caps[1]).map_or(0.0, within_scale);
            }
        }
    }

    let Some(map) = structured(raw) else {
        trace!(?raw, "review field is not structured");
        return 0.0;
    };

    match map.get(RATING_KEY) {
        Some(Value::String(s)) => {
            let numerator = s.split('/').next().unwrap_or_default();
            parse_leading_number(numerator).map_or(0.0, within_scale)
        }
        _ => 0.0,
    }
}

/// "$1,234.56" style display form; "Price Not Available" for the sentinel
pub fn format_price(price: f64) -> String {
    if !price.is_finite() || price <= 0.0 {
        return "Price Not Available".to_string();
    }

    let cents = (price * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    match cents % 100 {
        0 => format!("${}", whole),
        c if c % 10 == 0 => format!("${}.{}", whole, c / 10),
        c => format!("${}.{:02}", whole, c),
    }
}

/// One decimal place, e.g. "4.2"
pub fn format_rating(rating: f64) -> String {
    format!("{:.1}", rating)
}

/// Resolve a raw field into an object, decoding JSON text when needed
fn structured(raw: &RawField) -> Option<Cow<'_, Map<String, Value>>> {
    match raw {
        RawField::Structured(map) => Some(Cow::Borrowed(map)),
        RawField::Text(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Some(Cow::Owned(map)),
            _ => None,
        },
        RawField::Absent | RawField::Unsupported(_) => None,
    }
}

/// Parse the longest numeric prefix, ignoring leading whitespace
fn parse_leading_number(s: &str) -> Option<f64> {
    LEADING_NUMBER_RE
        .find(s.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn within_scale(rating: f64) -> f64 {
    if (0.0..=MAX_RATING).contains(&rating) {
        rating
    } else {
        0.0
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
