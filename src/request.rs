//! Loosely typed entry point for callers that receive arguments as JSON,
//! such as form backends and the `batch` command.
//!
//! ```json
//! {"op": "generate_iban", "value": "370400440532013000", "country_code": "DE", "validate_bban": true}
//! ```

use crate::error::IbanError;
use crate::iban::{Engine, DEFAULT_BBAN_SEPARATOR};
use crate::input::stringify_input;
use crate::report::Reporter;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Valid(bool),
    Text(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Valid(valid) => write!(f, "{valid}"),
            Outcome::Text(text) => f.write_str(text),
        }
    }
}

pub const OPERATIONS: &[&str] = &[
    "validate_bban",
    "validate_iban",
    "format_bban",
    "format_iban",
    "generate_iban",
];

pub fn execute<R: Reporter>(engine: &Engine<R>, request: &Value) -> Result<Outcome, IbanError> {
    let op = stringify_input(request.get("op"), "op")?;
    match op {
        "validate_bban" => {
            let value = raw_value(request)?;
            let country = raw_country_code(request)?;
            engine.validate_bban(value, country).map(Outcome::Valid)
        }
        "validate_iban" => {
            let value = raw_value(request)?;
            engine
                .validate_iban(value, flag(request, "validate_bban"))
                .map(Outcome::Valid)
        }
        "format_bban" => {
            let value = raw_value(request)?;
            let country = raw_country_code(request)?;
            let separator = match request.get("separator") {
                None | Some(Value::Null) => DEFAULT_BBAN_SEPARATOR,
                Some(other) => stringify_input(Some(other), "separator")?,
            };
            engine
                .format_bban(value, country, separator)
                .map(Outcome::Text)
        }
        "format_iban" => {
            let value = raw_value(request)?;
            Ok(Outcome::Text(engine.format_iban(value)))
        }
        "generate_iban" => {
            let value = raw_value(request)?;
            let country = raw_country_code(request)?;
            engine
                .generate_iban(
                    value,
                    country,
                    flag(request, "validate_bban"),
                    flag(request, "format_iban"),
                )
                .map(Outcome::Text)
        }
        other => Err(IbanError::UnknownOperation(other.to_string())),
    }
}

fn raw_value(request: &Value) -> Result<&str, IbanError> {
    stringify_input(request.get("value"), "rawValue")
}

fn raw_country_code(request: &Value) -> Result<&str, IbanError> {
    stringify_input(request.get("country_code"), "rawCountryCode")
}

fn flag(request: &Value, name: &str) -> bool {
    request.get(name).and_then(Value::as_bool).unwrap_or(false)
}
