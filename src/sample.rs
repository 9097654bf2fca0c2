//! Random account numbers that satisfy a country's BBAN structure.

use crate::checksum;
use crate::country::{self, CharClass};
use rand::Rng;

pub fn random_chars<R: Rng + ?Sized>(rng: &mut R, class: CharClass, len: usize) -> String {
    let charset = class.charset();
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        let idx = rng.gen_range(0..charset.len());
        out.push(char::from(charset[idx]));
    }
    out
}

/// `None` when `country` is not in the table.
pub fn random_bban<R: Rng + ?Sized>(rng: &mut R, country: &str) -> Option<String> {
    let pattern = country::lookup(country)?;
    let mut out = String::with_capacity(pattern.bban_length());
    for segment in pattern.segments {
        out.push_str(&random_chars(rng, segment.class(), segment.width()));
    }
    Some(out)
}

pub fn random_iban<R: Rng + ?Sized>(rng: &mut R, country: &str) -> Option<String> {
    let bban = random_bban(rng, country)?;
    let check = checksum::check_digits(country, &bban).ok()?;
    Some(format!("{}{}{}", country, check, bban))
}
