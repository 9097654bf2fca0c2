/// Pattern every country-code argument must satisfy.
pub const COUNTRY_CODE_FORMAT: &str = "/^[A-Z]{2}$/";

/// Global shape every IBAN must satisfy before any other check runs.
pub const IBAN_FORMAT: &str = "/^[A-Z]{2}[0-9]{2}[0-9A-Z]{11,30}$/";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IbanError {
    #[error("Expecting {name} of type 'string', found: '{found}'")]
    InvalidArgumentType { name: String, found: String },
    #[error("Invalid country code format; expecting: '/^[A-Z]{{2}}$/', found: '{0}'")]
    InvalidCountryCodeFormat(String),
    #[error("Invalid IBAN format; expecting: '/^[A-Z]{{2}}[0-9]{{2}}[0-9A-Z]{{11,30}}$/', found: '{0}'")]
    InvalidIbanFormat(String),
    #[error("Cannot {action}: invalid BBAN format for country code '{country}'; expecting: '{pattern}', found: '{value}'")]
    InvalidBbanFormat {
        action: &'static str,
        country: String,
        pattern: String,
        value: String,
    },
    #[error("invalid character '{0}' in check value input")]
    InvalidCharacter(char),
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
}
