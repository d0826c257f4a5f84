//! # Unit Parsers
//!
//! Converts raw tag strings into numbers. Both parsers are total: anything
//! they cannot read becomes zero, which callers treat as "unknown".

/// Separator between circuits sharing one line, e.g. `"20000;400"`.
const VOLTAGE_SEPARATOR: char = ';';

/// Unit suffixes and their factor to megawatts.
///
/// Longest suffixes first so `"MW"` is never stripped as `"W"`.
const POWER_UNITS: [(&str, f64); 4] = [
    ("GW", 1000.0),
    ("MW", 1.0),
    ("KW", 0.001),
    ("W", 0.000_001),
];

/// Parses a voltage list and returns its highest value in volts.
///
/// Tokens are trimmed and read as signed 32-bit integers; tokens that do
/// not parse, are negative, or exceed `i32::MAX` are skipped. Returns `0`
/// if no token survives.
///
/// ```rust,ignore
/// assert_eq!(parse_max_voltage("20000;400"), 20000);
/// assert_eq!(parse_max_voltage("high"), 0);
/// ```
#[must_use]
pub fn parse_max_voltage(value: &str) -> u32 {
    let max = value
        .split(VOLTAGE_SEPARATOR)
        .filter_map(|token| token.trim().parse::<i32>().ok())
        .filter_map(|volts| u32::try_from(volts).ok())
        .max();
    if max.is_none() {
        tracing::trace!(value, "unreadable voltage");
    }
    max.unwrap_or(0)
}

/// Parses a power output such as `"250 MW"` or `"1.2 gw"` into megawatts.
///
/// The unit is matched case-insensitively at the end of the trimmed value.
/// A missing unit means megawatts. A non-numeric (or non-finite) remainder
/// yields `0.0`.
#[must_use]
pub fn parse_power_output(value: &str) -> f64 {
    let normalized = value.trim().to_uppercase();

    let (number, multiplier) = POWER_UNITS
        .iter()
        .find_map(|&(suffix, multiplier)| {
            normalized
                .strip_suffix(suffix)
                .map(|rest| (rest.trim(), multiplier))
        })
        .unwrap_or((normalized.as_str(), 1.0));

    match number.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => parsed * multiplier,
        _ => {
            tracing::trace!(value, "unreadable power output");
            0.0
        }
    }
}
