//! Validation, formatting and generation of IBANs and BBANs.
//!
//! String arguments are normalized first: uppercased, with everything outside
//! `[0-9A-Z]` removed. Country codes are only uppercased and must then be
//! exactly two letters. Country codes missing from the table are not errors:
//! validation passes, formatting returns the value untouched, and a warning
//! goes to the engine's [`Reporter`].

use crate::checksum;
use crate::country::{self, CountryPattern};
use crate::error::IbanError;
use crate::input::{self, normalize};
use crate::report::{LogReporter, Reporter};

pub const DEFAULT_BBAN_SEPARATOR: &str = "-";

const ISSUES_URL: &str = "https://github.com/EDumdum/iban-js/issues";

#[derive(Debug, Clone, Default)]
pub struct Engine<R = LogReporter> {
    reporter: R,
}

impl Engine<LogReporter> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: Reporter> Engine<R> {
    pub fn with_reporter(reporter: R) -> Self {
        Self { reporter }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Whether `value` has the BBAN structure registered for `country_code`.
    /// Always `true` for countries missing from the table.
    pub fn validate_bban(&self, value: &str, country_code: &str) -> Result<bool, IbanError> {
        let value = normalize(value);
        let code = input::country_code(country_code)?;

        match country::lookup(&code) {
            Some(pattern) => Ok(pattern.matches(&value)),
            None => {
                self.reporter.warn(&unknown_country("validate", &code));
                Ok(true)
            }
        }
    }

    /// Whether the check digits of `value` are correct. With `validate_bban`
    /// set, a BBAN that does not fit its known country short-circuits to
    /// `false` before the checksum is computed.
    pub fn validate_iban(&self, value: &str, validate_bban: bool) -> Result<bool, IbanError> {
        let raw = value;
        let value = normalize(raw);
        if !has_iban_shape(&value) {
            return Err(IbanError::InvalidIbanFormat(raw.to_string()));
        }

        if validate_bban {
            let code = &value[..2];
            let bban = &value[4..];
            match country::lookup(code) {
                None => self.reporter.warn(&unknown_country("validate", code)),
                Some(pattern) if !pattern.matches(bban) => {
                    self.reporter.info(&format!(
                        "Invalid IBAN format: invalid BBAN format for country code '{}'; expecting: '{}', found: '{}'",
                        code,
                        pattern.matcher(),
                        bban
                    ));
                    return Ok(false);
                }
                Some(_) => {}
            }
        }

        checksum::verify(&value)
    }

    /// Splits `value` into the country's display groups joined by `separator`.
    /// Unknown countries get the normalized value back unchanged.
    pub fn format_bban(
        &self,
        value: &str,
        country_code: &str,
        separator: &str,
    ) -> Result<String, IbanError> {
        let value = normalize(value);
        let code = input::country_code(country_code)?;

        let pattern = match country::lookup(&code) {
            Some(pattern) => pattern,
            None => {
                self.reporter.warn(&unknown_country("format", &code));
                return Ok(value);
            }
        };
        ensure_bban(pattern, &value, "format BBAN")?;

        let mut groups = Vec::with_capacity(pattern.group_widths.len());
        let mut offset = 0;
        for width in pattern.group_widths {
            groups.push(&value[offset..offset + width]);
            offset += width;
        }
        Ok(groups.join(separator))
    }

    pub fn format_iban(&self, value: &str) -> String {
        format_iban(value)
    }

    /// Builds `country + check digits + BBAN` from a raw BBAN, optionally
    /// checking the BBAN structure first and printing the result in groups
    /// of four.
    pub fn generate_iban(
        &self,
        value: &str,
        country_code: &str,
        validate_bban: bool,
        format_iban: bool,
    ) -> Result<String, IbanError> {
        let value = normalize(value);
        let code = input::country_code(country_code)?;

        if validate_bban {
            match country::lookup(&code) {
                Some(pattern) => ensure_bban(pattern, &value, "generate IBAN")?,
                None => self.reporter.warn(&unknown_country("validate", &code)),
            }
        }

        let check = checksum::check_digits(&code, &value)?;
        let iban = format!("{code}{check}{value}");
        if format_iban {
            Ok(self::format_iban(&iban))
        } else {
            Ok(iban)
        }
    }
}

/// Normalizes `value` and inserts a space after every fourth character.
pub fn format_iban(value: &str) -> String {
    let value = normalize(value);
    let mut out = String::with_capacity(value.len() + value.len() / 4);
    for (idx, ch) in value.chars().enumerate() {
        if idx > 0 && idx % 4 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

pub fn validate_bban(value: &str, country_code: &str) -> Result<bool, IbanError> {
    Engine::new().validate_bban(value, country_code)
}

pub fn validate_iban(value: &str, validate_bban: bool) -> Result<bool, IbanError> {
    Engine::new().validate_iban(value, validate_bban)
}

/// [`Engine::format_bban`] with the default `-` separator.
pub fn format_bban(value: &str, country_code: &str) -> Result<String, IbanError> {
    Engine::new().format_bban(value, country_code, DEFAULT_BBAN_SEPARATOR)
}

pub fn format_bban_with(
    value: &str,
    country_code: &str,
    separator: &str,
) -> Result<String, IbanError> {
    Engine::new().format_bban(value, country_code, separator)
}

pub fn generate_iban(
    value: &str,
    country_code: &str,
    validate_bban: bool,
    format_iban: bool,
) -> Result<String, IbanError> {
    Engine::new().generate_iban(value, country_code, validate_bban, format_iban)
}

/// `^[A-Z]{2}[0-9]{2}[0-9A-Z]{11,30}$`
fn has_iban_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    (15..=34).contains(&bytes.len())
        && bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..4].iter().all(u8::is_ascii_digit)
        && bytes[4..]
            .iter()
            .all(|byte| byte.is_ascii_uppercase() || byte.is_ascii_digit())
}

fn ensure_bban(
    pattern: &CountryPattern,
    value: &str,
    action: &'static str,
) -> Result<(), IbanError> {
    if pattern.matches(value) {
        return Ok(());
    }
    Err(IbanError::InvalidBbanFormat {
        action,
        country: pattern.code.to_string(),
        pattern: pattern.matcher().to_string(),
        value: value.to_string(),
    })
}

fn unknown_country(action: &str, code: &str) -> String {
    format!(
        "Cannot {action} BBAN for country code '{code}', please ensure that this country code exist or open an issue at {ISSUES_URL}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemoryReporter;
    use log::Level;

    fn engine() -> Engine<MemoryReporter> {
        Engine::with_reporter(MemoryReporter::new())
    }

    #[test]
    fn iban_shape_gate() {
        assert!(has_iban_shape("AT611904300234573201"));
        assert!(has_iban_shape("AB12ABCDEFGHIJK"));
        assert!(!has_iban_shape("AB12ABCDEFGHIJ"));
        assert!(!has_iban_shape(&format!("AB12{}", "1".repeat(31))));
        assert!(!has_iban_shape("1B12ABCDEFGHIJK"));
        assert!(!has_iban_shape("ABC2ABCDEFGHIJK"));
        assert!(!has_iban_shape(""));
    }

    #[test]
    fn validate_bban_unknown_country_warns_and_passes() {
        let engine = engine();
        assert!(engine.validate_bban("117730161111101800000000", "HH").unwrap());
        assert!(engine.reporter().contains(
            Level::Warn,
            "Cannot validate BBAN for country code 'HH', please ensure that this country code exist"
        ));
        assert!(engine.reporter().messages(Level::Info).is_empty());
    }

    #[test]
    fn validate_bban_known_country() {
        let engine = engine();
        assert!(engine.validate_bban("0040-044011624-3", "dk").unwrap());
        assert!(!engine.validate_bban("0040044011624", "DK").unwrap());
        assert!(!engine.validate_bban("A0400440116243", "DK").unwrap());
        assert!(engine.reporter().entries().is_empty());
    }

    #[test]
    fn validate_bban_country_code_is_not_stripped() {
        let err = engine().validate_bban("00400440116243", "D K").unwrap_err();
        assert_eq!(err, IbanError::InvalidCountryCodeFormat("D K".to_string()));
    }

    #[test]
    fn validate_iban_bban_mismatch_short_circuits_with_info() {
        let engine = engine();
        assert!(!engine.validate_iban("DK50A0400440116243", true).unwrap());
        assert!(engine.reporter().contains(
            Level::Info,
            "Invalid IBAN format: invalid BBAN format for country code 'DK'; expecting: '/^[0-9]{14}$/', found: 'A0400440116243'"
        ));
    }

    #[test]
    fn validate_iban_unknown_country_continues_to_checksum() {
        let engine = engine();
        assert!(!engine.validate_iban("HH5000400440116243", true).unwrap());
        assert!(engine.validate_iban("HH81117730161111101800000000", true).unwrap());
        assert_eq!(engine.reporter().messages(Level::Warn).len(), 2);
    }

    #[test]
    fn validate_iban_echoes_raw_input_on_format_error() {
        let err = engine().validate_iban("123a", false).unwrap_err();
        assert_eq!(err, IbanError::InvalidIbanFormat("123a".to_string()));
    }

    #[test]
    fn format_bban_groups() {
        let engine = engine();
        assert_eq!(engine.format_bban("0-0400440-116243", "DK", "-").unwrap(), "0040-044011624-3");
        assert_eq!(
            engine.format_bban("20041010050500013M02606", "FR", "/").unwrap(),
            "20041/01005/0500013M026/06"
        );
        assert_eq!(engine.format_bban("12345600000785", "FI", "").unwrap(), "12345600000785");
    }

    #[test]
    fn format_bban_unknown_country_passes_through() {
        let engine = engine();
        assert_eq!(
            engine.format_bban("1177-3016", "HH", "-").unwrap(),
            "11773016"
        );
        assert!(engine
            .reporter()
            .contains(Level::Warn, "Cannot format BBAN for country code 'HH'"));
    }

    #[test]
    fn generate_iban_with_unknown_country_and_validation() {
        let engine = engine();
        assert_eq!(
            engine.generate_iban("117730161111101800000000", "HH", true, false).unwrap(),
            "HH81117730161111101800000000"
        );
        assert!(engine
            .reporter()
            .contains(Level::Warn, "Cannot validate BBAN for country code 'HH'"));
    }

    #[test]
    fn generate_iban_skips_table_when_not_validating() {
        let engine = engine();
        assert_eq!(
            engine.generate_iban("0444987B543210", "GL", false, false).unwrap(),
            format!(
                "GL{}0444987B543210",
                checksum::check_digits("GL", "0444987B543210").unwrap()
            )
        );
        assert!(engine.reporter().entries().is_empty());
    }

    #[test]
    fn format_iban_chunks() {
        assert_eq!(format_iban("BE62510007547061"), "BE62 5100 0754 7061");
        assert_eq!(format_iban("bg80 bnbg 9661 1020 3456 78"), "BG80 BNBG 9661 1020 3456 78");
        assert_eq!(format_iban("ABC"), "ABC");
        assert_eq!(format_iban("ABCD"), "ABCD");
        assert_eq!(format_iban(""), "");
    }
}
