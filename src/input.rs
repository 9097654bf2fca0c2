use crate::error::IbanError;
use serde_json::Value;

/// Uppercases `raw` and drops everything outside `[0-9A-Z]`.
pub fn normalize(raw: &str) -> String {
    raw.to_uppercase()
        .chars()
        .filter(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit())
        .collect()
}

/// Uppercases a country-code argument without stripping anything and checks
/// it is exactly two letters.
pub fn country_code(raw: &str) -> Result<String, IbanError> {
    let code = raw.to_uppercase();
    if code.len() == 2 && code.bytes().all(|byte| byte.is_ascii_uppercase()) {
        Ok(code)
    } else {
        Err(IbanError::InvalidCountryCodeFormat(code))
    }
}

/// Extracts a string argument from a loosely typed value. `None` stands for
/// an argument that was not supplied at all.
pub fn stringify_input<'a>(raw: Option<&'a Value>, name: &str) -> Result<&'a str, IbanError> {
    match raw {
        Some(Value::String(value)) => Ok(value.as_str()),
        other => Err(IbanError::InvalidArgumentType {
            name: name.to_string(),
            found: type_name(other).to_string(),
        }),
    }
}

fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) | Some(Value::Object(_)) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_strips_separators_and_uppercases() {
        assert_eq!(normalize("be62 5100-0754.7061"), "BE62510007547061");
        assert_eq!(normalize("  "), "");
        assert_eq!(normalize("ÄB1"), "B1");
    }

    #[test]
    fn country_code_is_uppercased_but_not_stripped() {
        assert_eq!(country_code("de").unwrap(), "DE");
        assert_eq!(
            country_code("123a"),
            Err(IbanError::InvalidCountryCodeFormat("123A".to_string()))
        );
        assert_eq!(
            country_code("D-E"),
            Err(IbanError::InvalidCountryCodeFormat("D-E".to_string()))
        );
        assert!(country_code("").is_err());
        assert!(country_code(" DE").is_err());
    }

    #[test]
    fn stringify_input_names_the_actual_type() {
        let value = json!("DE");
        assert_eq!(stringify_input(Some(&value), "rawValue").unwrap(), "DE");

        let cases = [
            (None, "undefined"),
            (Some(json!(null)), "null"),
            (Some(json!([])), "object"),
            (Some(json!({})), "object"),
            (Some(json!(42)), "number"),
            (Some(json!(true)), "boolean"),
        ];
        for (raw, expected) in cases {
            let err = stringify_input(raw.as_ref(), "rawValue").unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Expecting rawValue of type 'string', found: '{expected}'")
            );
        }
    }
}
