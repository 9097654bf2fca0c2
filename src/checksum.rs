//! ISO/IEC 7064 MOD 97-10 over alphanumeric input.

use crate::error::IbanError;

/// Remainder mod 97 of the decimal numeral obtained by replacing each letter
/// with its value (`A` = 10 ... `Z` = 35). Input must be `[0-9A-Z]` only.
pub fn compute_check_value(value: &str) -> Result<u32, IbanError> {
    let mut remainder: u32 = 0;
    for ch in value.chars() {
        if let Some(d) = ch.to_digit(10) {
            remainder = (remainder * 10 + d) % 97;
        } else if ch.is_ascii_uppercase() {
            let val = ch as u32 - 'A' as u32 + 10;
            remainder = (remainder * 10 + val / 10) % 97;
            remainder = (remainder * 10 + val % 10) % 97;
        } else {
            return Err(IbanError::InvalidCharacter(ch));
        }
    }
    Ok(remainder)
}

/// Two check digits for `bban` under `country`.
pub fn check_digits(country: &str, bban: &str) -> Result<String, IbanError> {
    let remainder = compute_check_value(&format!("{bban}{country}00"))?;
    Ok(format!("{:02}", 98 - remainder))
}

/// Verifies an IBAN already in electronic form: the first four characters
/// move to the end and the remainder must be 1.
pub fn verify(iban: &str) -> Result<bool, IbanError> {
    if iban.len() < 4 || !iban.is_char_boundary(4) {
        return Ok(false);
    }
    let (head, tail) = iban.split_at(4);
    Ok(compute_check_value(&format!("{tail}{head}"))? == 1)
}
