//! TOML to loose option value conversion

use msdf_shader::{OptionValue, RawOptions};

/// Convert a TOML value. Integers and floats both become numbers;
/// datetimes are kept as their string form.
pub fn from_toml_value(value: toml::Value) -> OptionValue {
    match value {
        toml::Value::String(s) => OptionValue::String(s),
        toml::Value::Integer(i) => OptionValue::Number(i as f64),
        toml::Value::Float(f) => OptionValue::Number(f),
        toml::Value::Boolean(b) => OptionValue::Bool(b),
        toml::Value::Datetime(dt) => OptionValue::String(dt.to_string()),
        toml::Value::Array(items) => {
            OptionValue::List(items.into_iter().map(from_toml_value).collect())
        }
        toml::Value::Table(table) => OptionValue::Table(from_toml_table(table)),
    }
}

/// Convert a TOML table into a loose option record
pub fn from_toml_table(table: toml::Table) -> RawOptions {
    table
        .into_iter()
        .map(|(k, v)| (k, from_toml_value(v)))
        .collect()
}

/// Convert a loose value back to TOML. Numbers with no fractional part
/// are written as integers.
pub fn to_toml_value(value: &OptionValue) -> toml::Value {
    match value {
        OptionValue::Bool(b) => toml::Value::Boolean(*b),
        OptionValue::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
            toml::Value::Integer(*n as i64)
        }
        OptionValue::Number(n) => toml::Value::Float(*n),
        OptionValue::String(s) => toml::Value::String(s.clone()),
        OptionValue::List(items) => toml::Value::Array(items.iter().map(to_toml_value).collect()),
        OptionValue::Table(table) => toml::Value::Table(
            table
                .iter()
                .map(|(k, v)| (k.clone(), to_toml_value(v)))
                .collect(),
        ),
    }
}
