//! Parsing helpers shared by every `*Input` type.
//!
//! Both interfaces hand over exactly what the user typed, so every field
//! arrives as a string and is checked here.

use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{AppError, Result};

pub const MAX_CODE_LEN: usize = 32;

/// A trimmed, non-empty string.
pub fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

/// A trimmed string, `None` when blank.
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A whole number inside `range`.
pub fn whole_number<T>(field: &str, value: &str, range: RangeInclusive<T>) -> Result<T>
where
    T: FromStr + PartialOrd + Display + Copy,
{
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    let parsed: T = value
        .parse()
        .map_err(|_| AppError::validation(format!("{field} must be a whole number")))?;
    check_range(field, parsed, range)
}

/// A whole number inside `range`, or `default` when left blank.
pub fn whole_number_or<T>(field: &str, value: &str, range: RangeInclusive<T>, default: T) -> Result<T>
where
    T: FromStr + PartialOrd + Display + Copy,
{
    if value.trim().is_empty() {
        return Ok(default);
    }
    whole_number(field, value, range)
}

/// A finite decimal number strictly greater than zero.
pub fn positive_decimal(field: &str, value: &str) -> Result<f64> {
    let value = value.trim().trim_start_matches('$');
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    let parsed: f64 = value
        .parse()
        .map_err(|_| AppError::validation(format!("{field} must be a number")))?;
    if !parsed.is_finite() || parsed <= 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be greater than zero"
        )));
    }
    Ok(parsed)
}

/// An optional positive decimal; blank means `None`.
pub fn optional_positive_decimal(field: &str, value: Option<&str>) -> Result<Option<f64>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => positive_decimal(field, v).map(Some),
        None => Ok(None),
    }
}

/// A record code such as `M001`: letters, digits, `-` and `_`.
pub fn code(field: &str, value: &str) -> Result<String> {
    let value = required(field, value)?;
    if value.len() > MAX_CODE_LEN {
        return Err(AppError::validation(format!(
            "{field} must be at most {MAX_CODE_LEN} characters"
        )));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::validation(format!(
            "{field} may only contain letters, digits, '-' and '_'"
        )));
    }
    Ok(value)
}

fn check_range<T>(field: &str, value: T, range: RangeInclusive<T>) -> Result<T>
where
    T: PartialOrd + Display + Copy,
{
    if !range.contains(&value) {
        return Err(AppError::validation(format!(
            "{field} must be between {} and {}",
            range.start(),
            range.end()
        )));
    }
    Ok(value)
}

/// Normalize an enum label for lenient matching: "Weight Loss", "weight_loss"
/// and "WEIGHT-LOSS" all become "weightloss".
pub fn normalize_label(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
