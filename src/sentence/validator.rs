//! Sentence syntax validation.
use std::sync::LazyLock;

use regex::Regex;

use super::ParseOptions;
use crate::checksum;
use crate::prelude::*;

/// Length of the `<CR><LF>` terminator counted against the maximum length.
const TERMINATOR_LEN: usize = 2;

/// Begin char, 5 to 7 character address, comma separated fields free of reserved
/// characters, optional checksum and optional line terminator.
static SENTENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[$!][A-Z0-9]{5,7}(,[\x20\x22\x23\x25-\x29\x2B-\x7E]*)+(\*[0-9A-F]{2})?(\r|\n|\r\n|\n\r)?$",
    )
    .expect("sentence pattern is not valid")
});

/// Strip any line terminator from `nmea`.
pub(crate) fn strip_terminator(nmea: &str) -> &str {
    nmea.trim_end_matches(['\r', '\n'])
}

/// Length of `nmea` as transmitted, i.e., including the line terminator whether or not
/// `nmea` carries one.
fn transmitted_len(nmea: &str) -> usize {
    strip_terminator(nmea).len() + TERMINATOR_LEN
}

/// Check the overall syntax of `nmea` without verifying the checksum value.
#[must_use]
pub fn is_sentence(nmea: &str) -> bool {
    transmitted_len(nmea) <= super::MAX_LENGTH && SENTENCE.is_match(nmea)
}

/// Check syntax and, when a checksum section is present, that it matches the content.
///
/// # Example
/// ```
/// use nmea::sentence::validator;
///
/// assert!(validator::is_valid("$GPBOD,234.9,T,228.8,M,RUSKI,*1D"));
/// assert!(validator::is_valid("$GPBOD,234.9,T,228.8,M,RUSKI,"));
/// assert!(!validator::is_valid("$GPBOD,234.9,T,228.8,M,RUSKI,*00"));
/// ```
#[must_use]
pub fn is_valid(nmea: &str) -> bool {
    check(nmea, &ParseOptions::default()).is_ok()
}

/// Check `nmea` against `options`, describing the first problem found.
///
/// # Errors
/// [Error::MalformedSentence] naming the failed check.
pub fn check(nmea: &str, options: &ParseOptions) -> Result<()> {
    if nmea.is_empty() {
        return Err(Error::MalformedSentence("empty input".to_string()));
    }
    if !nmea.starts_with([super::BEGIN_CHAR, super::ALTERNATIVE_BEGIN_CHAR]) {
        return Err(Error::MalformedSentence(format!(
            "invalid begin char in {nmea:?}"
        )));
    }
    let len = transmitted_len(nmea);
    if len > options.max_length {
        return Err(Error::MalformedSentence(format!(
            "length {len} exceeds maximum of {}",
            options.max_length
        )));
    }
    if !SENTENCE.is_match(nmea) {
        return Err(Error::MalformedSentence(format!("invalid syntax {nmea:?}")));
    }
    match checksum::extract(nmea) {
        Some(sum) => {
            let expected = checksum::calculate(nmea);
            if sum != expected {
                return Err(Error::MalformedSentence(format!(
                    "checksum mismatch, got {sum} expected {expected}"
                )));
            }
        }
        None if options.require_checksum => {
            return Err(Error::MalformedSentence("missing checksum".to_string()));
        }
        None => {}
    }
    Ok(())
}
