//! IBAN and BBAN validation, formatting and generation (ISO 13616) on top of
//! the ISO/IEC 7064 MOD 97-10 checksum.

pub mod checksum;
pub mod country;
pub mod error;
pub mod iban;
pub mod input;
pub mod report;
pub mod request;
pub mod sample;

pub use checksum::compute_check_value;
pub use country::{CharClass, CountryPattern, Segment};
pub use error::IbanError;
pub use iban::{
    format_bban, format_bban_with, format_iban, generate_iban, validate_bban, validate_iban, Engine,
};
pub use report::{LogReporter, MemoryReporter, Reporter};
pub use request::{execute, Outcome};
