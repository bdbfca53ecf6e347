//! Strict decimal coercion for numeric fields reported as text by the OS
//! and by external tools. Malformed input is an error, never a default.

use crate::error::{Error, Result};
use std::str::FromStr;

fn parse<T>(field: &str, text: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.parse::<T>().map_err(|e| Error::Parse {
        field: field.to_string(),
        value: text.to_string(),
        detail: e.to_string(),
    })
}

/// Parse a decimal string into an `i32`. `field` names the value in the error.
pub fn parse_i32(field: &str, text: &str) -> Result<i32> {
    parse(field, text)
}

pub fn parse_i64(field: &str, text: &str) -> Result<i64> {
    parse(field, text)
}

/// Byte counts and other quantities that cannot be negative.
pub fn parse_u64(field: &str, text: &str) -> Result<u64> {
    parse(field, text)
}

/// Finite values only; `NaN` and `inf` parse as f64 but cannot be serialized.
pub fn parse_f64(field: &str, text: &str) -> Result<f64> {
    let value: f64 = parse(field, text)?;
    if !value.is_finite() {
        return Err(Error::Parse {
            field: field.to_string(),
            value: text.to_string(),
            detail: "not a finite number".to_string(),
        });
    }
    Ok(value)
}
