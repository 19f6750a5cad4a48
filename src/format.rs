// format.rs
// Declared-type driven coercion of raw cells into JSON values.
//
// The catalog's declared type picks a small fixed dispatch: integer
// families become JSON numbers, boolean families JSON booleans,
// date/time families canonical strings, everything else keeps the raw
// value's natural JSON form. SQL NULL is JSON null in every family.

use crate::db::models::RawValue;
use anyhow::{bail, Result};
use serde_json::Value;

/// Strict (the default) fails the table when a value of a recognized
/// family cannot be coerced; lenient falls back to the value's natural
/// JSON form instead. One code path, switched here, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    Strict,
    Lenient,
}

#[derive(Debug, PartialEq, Eq)]
enum TypeFamily {
    Integer,
    Boolean,
    DateTime,
    Other,
}

/// Classifies a declared type, ignoring case and any parenthesized
/// length suffix ("VARCHAR(20)", "tinyint(1)").
fn family_of(declared_type: &str) -> TypeFamily {
    let base = declared_type
        .split('(')
        .next()
        .unwrap_or(declared_type)
        .trim()
        .to_lowercase();
    match base.as_str() {
        "int" | "integer" | "bigint" | "smallint" | "tinyint" | "mediumint" | "int2" | "int4"
        | "int8" | "serial" | "smallserial" | "bigserial" => TypeFamily::Integer,
        "bit" | "bool" | "boolean" => TypeFamily::Boolean,
        "date" | "datetime" | "datetime2" | "smalldatetime" | "time" | "timestamp"
        | "timestamptz" | "timestamp without time zone" | "timestamp with time zone" => {
            TypeFamily::DateTime
        }
        _ => TypeFamily::Other,
    }
}

/// The raw value as JSON without any declared-type coercion.
fn natural_json(raw: &RawValue) -> Value {
    match raw {
        RawValue::Null => Value::Null,
        RawValue::Bool(b) => Value::Bool(*b),
        RawValue::Int(n) => Value::Number((*n).into()),
        RawValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        RawValue::Text(s) => Value::String(s.clone()),
    }
}

/// Coerces one cell according to the column's declared type.
pub fn format_value(mode: FormatMode, declared_type: &str, raw: &RawValue) -> Result<Value> {
    if matches!(raw, RawValue::Null) {
        return Ok(Value::Null);
    }
    match family_of(declared_type) {
        TypeFamily::Integer => match raw {
            RawValue::Int(n) => Ok(Value::Number((*n).into())),
            RawValue::Bool(b) => Ok(Value::Number(i64::from(*b).into())),
            RawValue::Float(f)
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 =>
            {
                Ok(Value::Number((*f as i64).into()))
            }
            RawValue::Text(s) => match s.trim().parse::<i64>() {
                Ok(n) => Ok(Value::Number(n.into())),
                Err(_) if mode == FormatMode::Lenient => Ok(natural_json(raw)),
                Err(_) => bail!("value {s:?} is not an integer for declared type {declared_type}"),
            },
            _ if mode == FormatMode::Lenient => Ok(natural_json(raw)),
            other => bail!("value {other:?} is not an integer for declared type {declared_type}"),
        },
        TypeFamily::Boolean => match raw {
            RawValue::Bool(b) => Ok(Value::Bool(*b)),
            RawValue::Int(0) => Ok(Value::Bool(false)),
            RawValue::Int(1) => Ok(Value::Bool(true)),
            RawValue::Text(s) => match s.trim().to_lowercase().as_str() {
                "1" | "true" => Ok(Value::Bool(true)),
                "0" | "false" => Ok(Value::Bool(false)),
                _ if mode == FormatMode::Lenient => Ok(natural_json(raw)),
                _ => bail!("value {s:?} is not a boolean for declared type {declared_type}"),
            },
            _ if mode == FormatMode::Lenient => Ok(natural_json(raw)),
            other => bail!("value {other:?} is not a boolean for declared type {declared_type}"),
        },
        TypeFamily::DateTime => match raw {
            // The gateways canonicalize driver-native date/time values
            // to text already; anything textual passes through.
            RawValue::Text(s) => Ok(Value::String(s.clone())),
            _ if mode == FormatMode::Lenient => Ok(natural_json(raw)),
            other => bail!(
                "value {other:?} is not a date/time for declared type {declared_type}"
            ),
        },
        TypeFamily::Other => Ok(natural_json(raw)),
    }
}
