use std::collections::HashMap;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::{f64_to_i64_truncated, i64_to_f64_checked},
};

/// A conversion applied by the `cast` builtin.
///
/// Receives the evaluated value and the line of the call.
pub type CastFn = fn(&Value, usize) -> EvalResult<Value>;

/// Builds the default type table installed in every new context.
///
/// # Example
/// ```
/// use dicelang::interpreter::value::{cast::default_types, core::Value};
///
/// let types = default_types();
/// let to_integer = types["Integer"];
///
/// assert_eq!(to_integer(&Value::from("42"), 1).unwrap(), Value::Integer(42));
/// assert!(to_integer(&Value::from("abc"), 1).is_err());
/// ```
#[must_use]
pub fn default_types() -> HashMap<String, CastFn> {
    let table: [(&str, CastFn); 5] = [("Integer", to_integer),
                                      ("Float", to_float),
                                      ("String", to_string),
                                      ("Boolean", to_boolean),
                                      ("List", to_list)];

    table.into_iter().map(|(name, func)| (name.to_string(), func)).collect()
}

fn invalid(value: &Value, target: &str, line: usize) -> RuntimeError {
    RuntimeError::InvalidCast { value: value.to_string(),
                                target: target.to_string(),
                                line }
}

/// Integers pass through, floats truncate toward zero, strings are parsed
/// after trimming, booleans become 0 or 1.
fn to_integer(value: &Value, line: usize) -> EvalResult<Value> {
    match value {
        Value::Integer(n) => Ok(Value::Integer(*n)),
        Value::Float(r) => f64_to_i64_truncated(*r).map(Value::Integer)
                                                    .ok_or_else(|| invalid(value, "Integer", line)),
        Value::Str(s) => s.trim()
                          .parse::<i64>()
                          .map(Value::Integer)
                          .map_err(|_| invalid(value, "Integer", line)),
        Value::Bool(b) => Ok(Value::Integer(i64::from(*b))),
        Value::List(_) => Err(invalid(value, "Integer", line)),
    }
}

fn to_float(value: &Value, line: usize) -> EvalResult<Value> {
    match value {
        Value::Integer(n) => {
            i64_to_f64_checked(*n, invalid(value, "Float", line)).map(Value::Float)
        },
        Value::Float(r) => Ok(Value::Float(*r)),
        Value::Str(s) => s.trim()
                          .parse::<f64>()
                          .map(Value::Float)
                          .map_err(|_| invalid(value, "Float", line)),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::List(_) => Err(invalid(value, "Float", line)),
    }
}

#[allow(clippy::unnecessary_wraps)]
fn to_string(value: &Value, _line: usize) -> EvalResult<Value> {
    Ok(Value::Str(value.to_string()))
}

#[allow(clippy::unnecessary_wraps)]
fn to_boolean(value: &Value, _line: usize) -> EvalResult<Value> {
    Ok(Value::Bool(value.is_truthy()))
}

/// Lists are copied; strings become a list of one-character strings.
fn to_list(value: &Value, line: usize) -> EvalResult<Value> {
    match value {
        Value::List(items) => Ok(Value::list(items.borrow().clone())),
        Value::Str(s) => Ok(Value::list(s.chars().map(|c| Value::Str(c.to_string())).collect())),
        Value::Integer(_) | Value::Float(_) | Value::Bool(_) => Err(invalid(value, "List", line)),
    }
}
