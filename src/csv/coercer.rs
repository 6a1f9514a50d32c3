//! Cell coercion
//!
//! Converts one trimmed cell into the value its column declares. Integer
//! overflow and malformed literals are errors, never silently clamped.

use crate::error::CoerceError;
use crate::types::{ColumnType, TypedValue};
use std::num::IntErrorKind;

/// Convert `raw` to a value of `column_type`
pub fn coerce(raw: &str, column_type: ColumnType) -> Result<TypedValue, CoerceError> {
    match column_type {
        ColumnType::Int32 => parse_int::<i32>(raw, "int32").map(TypedValue::Int32),
        ColumnType::Int64 => parse_int::<i64>(raw, "int64").map(TypedValue::Int64),
        ColumnType::Float => parse_float(raw).map(|v| TypedValue::Float64(f64::from(v))),
        ColumnType::String => Ok(TypedValue::String(raw.to_string())),
        ColumnType::Unsupported(tag) => Err(CoerceError::UnsupportedType(tag)),
    }
}

fn parse_int<T>(raw: &str, expected: &'static str) -> Result<T, CoerceError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    raw.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CoerceError::Overflow {
            raw: raw.to_string(),
            expected,
        },
        _ => CoerceError::Format {
            raw: raw.to_string(),
            expected,
        },
    })
}

fn parse_float(raw: &str) -> Result<f32, CoerceError> {
    let format_error = || CoerceError::Format {
        raw: raw.to_string(),
        expected: "float",
    };

    // f32::from_str also takes "inf" and "NaN"; only numeric literals are allowed here
    if !is_float_literal(raw) {
        return Err(format_error());
    }
    let value: f32 = raw.parse().map_err(|_| format_error())?;
    if value.is_infinite() {
        return Err(format_error());
    }
    Ok(value)
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_float_literal(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut pos = 0;

    let skip_sign = |pos: &mut usize| {
        if matches!(bytes.get(*pos), Some(b'+' | b'-')) {
            *pos += 1;
        }
    };
    let count_digits = |pos: &mut usize| {
        let start = *pos;
        while bytes.get(*pos).is_some_and(u8::is_ascii_digit) {
            *pos += 1;
        }
        *pos - start
    };

    skip_sign(&mut pos);
    let mut mantissa_digits = count_digits(&mut pos);
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        mantissa_digits += count_digits(&mut pos);
    }
    if mantissa_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        skip_sign(&mut pos);
        if count_digits(&mut pos) == 0 {
            return false;
        }
    }

    pos == bytes.len()
}
