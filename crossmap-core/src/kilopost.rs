//! Display formatting for positions along a railway line.
//!
//! A kilopost is rendered as whole kilometers, a literal `k`, the remaining
//! meters zero-padded to five characters with one decimal, and a literal `m`:
//! `7123.4` becomes `7k123.4m`.
//!
//! The decomposition is Euclidean, so `kilo * 1000 + meter == value` holds for
//! negative offsets too (`-500` becomes `-1k500.0m`).

use crate::models::Kilopost;

/// Format an optional kilopost cell. Never fails: absent or NaN input gives
/// an empty string, and anything that cannot be decomposed is returned in
/// its default string form.
pub fn format_kilopost(value: Option<&Kilopost>) -> String {
    match value {
        None => String::new(),
        Some(Kilopost::Meters(meters)) => format_meters(*meters),
        Some(Kilopost::Raw(text)) => match text.trim().parse::<f64>() {
            Ok(meters) => format_meters(meters),
            Err(_) => text.clone(),
        },
    }
}

/// Format a distance in meters as `<km>k<meters>m`
pub fn format_meters(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.is_infinite() {
        return value.to_string();
    }

    let mut kilo = (value / 1000.0).floor();
    // `+ 0.0` turns a negative zero remainder into a positive one
    let mut meter = value.rem_euclid(1000.0) + 0.0;
    if meter >= 1000.0 {
        // rem_euclid rounds tiny negative values up to the divisor
        meter = 0.0;
        kilo += 1.0;
    }

    // `{:.0}` keeps the exact integer for offsets beyond the range of i64
    format!("{:.0}k{:05.1}m", kilo + 0.0, meter)
}
