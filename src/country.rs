//! Per-country BBAN structure table (ISO 13616 registry, August 2017 update).
//!
//! Each entry carries the display grouping of the BBAN and a structural
//! matcher built from three character classes. The matcher is a sequence of
//! fixed-width segments and is always matched against the whole value.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// `A-Z`
    Alpha,
    /// `0-9`
    Digit,
    /// `0-9A-Z`
    Alnum,
}

impl CharClass {
    pub fn accepts(self, byte: u8) -> bool {
        match self {
            CharClass::Alpha => byte.is_ascii_uppercase(),
            CharClass::Digit => byte.is_ascii_digit(),
            CharClass::Alnum => byte.is_ascii_uppercase() || byte.is_ascii_digit(),
        }
    }

    pub fn charset(self) -> &'static [u8] {
        match self {
            CharClass::Alpha => b"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            CharClass::Digit => b"0123456789",
            CharClass::Alnum => b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789",
        }
    }

    fn bracket(self) -> &'static str {
        match self {
            CharClass::Alpha => "[A-Z]",
            CharClass::Digit => "[0-9]",
            CharClass::Alnum => "[0-9A-Z]",
        }
    }
}

/// A run of `width` characters drawn from one character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Alpha(usize),
    Digit(usize),
    Alnum(usize),
}

impl Segment {
    pub fn class(self) -> CharClass {
        match self {
            Segment::Alpha(_) => CharClass::Alpha,
            Segment::Digit(_) => CharClass::Digit,
            Segment::Alnum(_) => CharClass::Alnum,
        }
    }

    pub fn width(self) -> usize {
        match self {
            Segment::Alpha(width) | Segment::Digit(width) | Segment::Alnum(width) => width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryPattern {
    pub code: &'static str,
    /// Display grouping; sums to the BBAN length.
    pub group_widths: &'static [usize],
    pub segments: &'static [Segment],
}

impl CountryPattern {
    pub fn bban_length(&self) -> usize {
        self.segments.iter().map(|segment| segment.width()).sum()
    }

    /// Anchored match of a normalized value against the segments.
    pub fn matches(&self, value: &str) -> bool {
        let bytes = value.as_bytes();
        if bytes.len() != self.bban_length() {
            return false;
        }
        let mut offset = 0;
        for segment in self.segments {
            let end = offset + segment.width();
            if !bytes[offset..end]
                .iter()
                .all(|byte| segment.class().accepts(*byte))
            {
                return false;
            }
            offset = end;
        }
        true
    }

    /// The matcher rendered in the regular-expression notation used by
    /// diagnostics, e.g. `/^[A-Z]{4}[0-9]{10}$/`.
    pub fn matcher(&self) -> Matcher {
        Matcher(self.segments)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Matcher(&'static [Segment]);

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/^")?;
        for segment in self.0 {
            write!(f, "{}{{{}}}", segment.class().bracket(), segment.width())?;
        }
        f.write_str("$/")
    }
}

pub fn lookup(code: &str) -> Option<&'static CountryPattern> {
    COUNTRY_PATTERNS
        .binary_search_by(|entry| entry.code.cmp(code))
        .ok()
        .map(|idx| &COUNTRY_PATTERNS[idx])
}

pub fn is_supported(code: &str) -> bool {
    lookup(code).is_some()
}

/// Full IBAN length for a supported country: code, check digits and BBAN.
pub fn iban_length(code: &str) -> Option<usize> {
    lookup(code).map(|entry| entry.bban_length() + 4)
}

pub fn all() -> &'static [CountryPattern] {
    COUNTRY_PATTERNS
}

const fn entry(
    code: &'static str,
    group_widths: &'static [usize],
    segments: &'static [Segment],
) -> CountryPattern {
    CountryPattern {
        code,
        group_widths,
        segments,
    }
}

use Segment::{Alnum as C, Alpha as A, Digit as N};

/// Sorted by code for binary search.
static COUNTRY_PATTERNS: &[CountryPattern] = &[
    entry("AD", &[4, 4, 12], &[N(8), C(12)]),
    entry("AE", &[3, 16], &[N(19)]),
    entry("AL", &[8, 16], &[N(8), C(16)]),
    entry("AT", &[5, 11], &[N(16)]),
    entry("AZ", &[4, 20], &[A(4), C(20)]),
    entry("BA", &[3, 3, 8, 2], &[N(16)]),
    entry("BE", &[3, 7, 2], &[N(12)]),
    entry("BG", &[4, 4, 2, 8], &[A(4), N(4), N(2), C(8)]),
    entry("BH", &[4, 14], &[A(4), C(14)]),
    entry("BR", &[8, 5, 10, 1, 1], &[N(23), A(1), C(1)]),
    entry("BY", &[4, 4, 16], &[C(20), N(4)]),
    entry("CH", &[5, 12], &[N(5), C(12)]),
    entry("CR", &[4, 14], &[N(18)]),
    entry("CY", &[3, 5, 16], &[N(8), C(16)]),
    entry("CZ", &[4, 6, 10], &[N(20)]),
    entry("DE", &[8, 10], &[N(18)]),
    entry("DK", &[4, 9, 1], &[N(14)]),
    entry("DO", &[4, 20], &[C(4), N(20)]),
    entry("EE", &[2, 2, 11, 1], &[N(16)]),
    entry("ES", &[4, 4, 1, 1, 10], &[N(20)]),
    entry("FI", &[3, 11], &[N(14)]),
    entry("FO", &[4, 9, 1], &[N(14)]),
    entry("FR", &[5, 5, 11, 2], &[N(12), C(11)]),
    entry("GB", &[4, 6, 8], &[A(4), N(6), N(8)]),
    entry("GE", &[2, 16], &[A(2), N(16)]),
    entry("GI", &[4, 15], &[A(4), C(15)]),
    entry("GL", &[4, 9, 1], &[N(14)]),
    entry("GR", &[3, 4, 16], &[N(7), C(16)]),
    entry("GT", &[4, 20], &[C(24)]),
    entry("HR", &[7, 10], &[N(17)]),
    entry("HU", &[3, 4, 1, 15, 1], &[N(24)]),
    entry("IE", &[4, 6, 8], &[A(4), N(6), N(8)]),
    entry("IL", &[3, 3, 13], &[N(19)]),
    entry("IQ", &[4, 3, 12], &[A(4), N(3), N(12)]),
    entry("IS", &[4, 2, 6, 10], &[N(22)]),
    entry("IT", &[1, 5, 5, 12], &[A(1), N(5), N(5), C(12)]),
    entry("JO", &[4, 4, 18], &[A(4), N(4), C(18)]),
    entry("KW", &[4, 22], &[A(4), C(22)]),
    entry("KZ", &[3, 13], &[N(3), C(13)]),
    entry("LB", &[4, 20], &[N(4), C(20)]),
    entry("LC", &[4, 24], &[A(4), C(24)]),
    entry("LI", &[5, 12], &[N(5), C(12)]),
    entry("LT", &[5, 11], &[N(16)]),
    entry("LU", &[3, 13], &[N(3), C(13)]),
    entry("LV", &[4, 13], &[A(4), C(13)]),
    entry("MC", &[5, 5, 11, 2], &[N(12), C(11)]),
    entry("MD", &[2, 18], &[C(20)]),
    entry("ME", &[3, 13, 2], &[N(18)]),
    entry("MK", &[3, 10, 2], &[N(5), C(10)]),
    entry("MR", &[5, 5, 11, 2], &[N(23)]),
    entry("MT", &[4, 5, 18], &[A(4), N(5), C(18)]),
    entry("MU", &[4, 2, 2, 12, 3, 3], &[A(7), N(2), N(2), N(12), N(3)]),
    entry("NL", &[4, 10], &[A(4), N(10)]),
    entry("NO", &[4, 6, 1], &[N(11)]),
    entry("PK", &[4, 16], &[A(4), C(16)]),
    entry("PL", &[8, 16], &[N(24)]),
    entry("PS", &[4, 21], &[A(4), C(21)]),
    entry("PT", &[4, 4, 11, 2], &[N(21)]),
    entry("QA", &[4, 21], &[A(4), C(21)]),
    entry("RO", &[4, 16], &[A(4), C(16)]),
    entry("RS", &[3, 13, 2], &[N(18)]),
    entry("SA", &[2, 18], &[N(2), C(18)]),
    entry("SC", &[4, 2, 2, 16, 3], &[A(7), N(2), N(2), N(16)]),
    entry("SE", &[3, 16, 1], &[N(20)]),
    entry("SI", &[5, 8, 2], &[N(15)]),
    entry("SK", &[4, 6, 10], &[N(20)]),
    entry("SM", &[1, 5, 5, 12], &[A(1), N(5), N(5), C(12)]),
    entry("ST", &[4, 4, 11, 2], &[N(21)]),
    entry("SV", &[4, 20], &[A(4), N(20)]),
    entry("TL", &[3, 14, 2], &[N(19)]),
    entry("TN", &[2, 3, 13, 2], &[N(20)]),
    entry("TR", &[5, 1, 16], &[N(6), C(16)]),
    entry("UA", &[6, 19], &[N(6), C(19)]),
    entry("VG", &[4, 16], &[A(4), N(16)]),
    entry("XK", &[4, 10, 2], &[N(16)]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_unique() {
        for window in COUNTRY_PATTERNS.windows(2) {
            assert!(
                window[0].code < window[1].code,
                "country codes not sorted: {} >= {}",
                window[0].code,
                window[1].code
            );
        }
        assert_eq!(COUNTRY_PATTERNS.len(), 75);
    }

    #[test]
    fn group_widths_cover_the_bban() {
        for entry in COUNTRY_PATTERNS {
            let grouped: usize = entry.group_widths.iter().sum();
            assert_eq!(grouped, entry.bban_length(), "width mismatch for {}", entry.code);
            assert!(entry.group_widths.iter().all(|width| *width > 0));
            assert!((11..=30).contains(&entry.bban_length()), "{}", entry.code);
        }
    }

    #[test]
    fn lookup_known_and_unknown() {
        assert_eq!(lookup("DE").map(|entry| entry.bban_length()), Some(18));
        assert_eq!(iban_length("NO"), Some(15));
        assert_eq!(iban_length("MT"), Some(31));
        assert!(lookup("HH").is_none());
        assert!(lookup("de").is_none());
        assert!(!is_supported(""));
    }

    #[test]
    fn matcher_renders_like_a_regex() {
        let bg = lookup("BG").unwrap();
        assert_eq!(bg.matcher().to_string(), "/^[A-Z]{4}[0-9]{4}[0-9]{2}[0-9A-Z]{8}$/");
        let dk = lookup("DK").unwrap();
        assert_eq!(dk.matcher().to_string(), "/^[0-9]{14}$/");
    }

    #[test]
    fn matches_is_anchored() {
        let nl = lookup("NL").unwrap();
        assert!(nl.matches("ABNA0417164300"));
        assert!(!nl.matches("ABNA04171643000"));
        assert!(!nl.matches("ABNA041716430"));
        assert!(!nl.matches("AB1A0417164300"));
        assert!(!nl.matches(""));
    }

    #[test]
    fn alnum_accepts_letters_and_digits_only() {
        assert!(CharClass::Alnum.accepts(b'Z'));
        assert!(CharClass::Alnum.accepts(b'0'));
        assert!(!CharClass::Alnum.accepts(b'a'));
        assert!(!CharClass::Alpha.accepts(b'5'));
        assert!(!CharClass::Digit.accepts(b'-'));
    }
}
