//! NMEA 0183 sentence checksum.
//!
//! The checksum is the XOR of every byte strictly between the begin character
//! (`$` or `!`) and the checksum delimiter `*`, rendered as two uppercase hex digits.
use crate::sentence::validator;
use crate::sentence::{ALTERNATIVE_BEGIN_CHAR, BEGIN_CHAR};

/// Separates the sentence body from its checksum.
pub const DELIMITER: char = '*';

/// XOR of the sentence body bytes.
///
/// A leading begin character and any line terminator are skipped and folding stops at the
/// first [DELIMITER], so both a bare body and a complete sentence produce the same value.
#[must_use]
pub fn xor(nmea: &str) -> u8 {
    let body = nmea
        .strip_prefix([BEGIN_CHAR, ALTERNATIVE_BEGIN_CHAR])
        .unwrap_or(nmea);
    validator::strip_terminator(body)
        .bytes()
        .take_while(|b| *b != DELIMITER as u8)
        .fold(0u8, |sum, b| sum ^ b)
}

/// Calculate the checksum of `nmea` as a 2 digit uppercase hex string.
///
/// # Example
/// ```
/// use nmea::checksum;
///
/// assert_eq!(checksum::calculate("$GPBOD,234.9,T,228.8,M,RUSKI,"), "1D");
/// assert_eq!(checksum::calculate("$GPBOD,234.9,T,228.8,M,RUSKI,*00"), "1D");
/// ```
#[must_use]
pub fn calculate(nmea: &str) -> String {
    format!("{:02X}", xor(nmea))
}

/// Index of the checksum delimiter, or `None` if `nmea` carries no checksum section.
#[must_use]
pub fn index(nmea: &str) -> Option<usize> {
    nmea.find(DELIMITER)
}

/// Append a freshly calculated checksum to `nmea`.
///
/// Any existing checksum section (and line terminator) is replaced, so appending is
/// idempotent.
#[must_use]
pub fn append(nmea: &str) -> String {
    let body = match index(nmea) {
        Some(idx) => &nmea[..idx],
        None => nmea.trim_end_matches(['\r', '\n']),
    };
    format!("{body}{DELIMITER}{}", calculate(body))
}

/// Checksum section of `nmea` without the delimiter, if present.
#[must_use]
pub fn extract(nmea: &str) -> Option<&str> {
    index(nmea).map(|idx| nmea[idx + 1..].trim_end_matches(['\r', '\n']))
}

/// True if `nmea` is well-formed and either has no checksum or a matching one.
#[must_use]
pub fn validate(nmea: &str) -> bool {
    validator::is_valid(nmea)
}
