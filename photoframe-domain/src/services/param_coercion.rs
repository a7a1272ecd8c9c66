// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Parameter Coercion
//!
//! Uniformly reads string/int/float/bool values out of a stage's
//! heterogeneous `ParamMap`, with defaults and required-key checks. Every
//! coercion function is total: an absent key or an incompatible runtime
//! type both yield the caller-supplied default rather than an error. Only
//! `validate_required` can fail, and only with `MissingParam`.
//!
//! This keeps each stage's `FromParams` implementation a flat list of
//! `params::get_*(params, "key", default)` calls instead of a hand-rolled
//! match per parameter.

use crate::value_objects::ParamMap;
use crate::PhotoframeError;
use serde_json::Value;

/// Reads a string parameter, falling back to `default` if absent or not a
/// JSON string.
pub fn get_string(params: &ParamMap, key: &str, default: &str) -> String {
    match params.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => default.to_string(),
    }
}

/// Reads an integer parameter. Accepts a JSON integer or a JSON float
/// (truncated toward zero); anything else yields `default`.
pub fn get_int(params: &ParamMap, key: &str, default: i64) -> i64 {
    match params.get(key) {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(f) = n.as_f64() {
                f.trunc() as i64
            } else {
                default
            }
        }
        _ => default,
    }
}

/// Reads a floating-point parameter. Accepts a JSON number or a numeric
/// string; anything else yields `default`.
pub fn get_float(params: &ParamMap, key: &str, default: f64) -> f64 {
    match params.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(default),
        _ => default,
    }
}

/// Reads a boolean parameter. Accepts a JSON bool, or the case-insensitive,
/// trimmed strings `"true"`/`"false"`; anything else yields `default`.
pub fn get_bool(params: &ParamMap, key: &str, default: bool) -> bool {
    match params.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => default,
        },
        _ => default,
    }
}

/// Reads a nested array/object parameter verbatim, for stages (dither's
/// `palette`) whose configuration is itself structured. `None` if absent.
pub fn get_value<'a>(params: &'a ParamMap, key: &str) -> Option<&'a Value> {
    params.get(key)
}

/// Fails with `MissingParam(key)` for the first of `keys` not present in
/// `params`.
pub fn validate_required(params: &ParamMap, keys: &[&str]) -> Result<(), PhotoframeError> {
    for key in keys {
        if !params.contains_key(*key) {
            return Err(PhotoframeError::MissingParam((*key).to_string()));
        }
    }
    Ok(())
}
