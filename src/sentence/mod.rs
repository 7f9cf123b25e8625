//! NMEA 0183 sentences.
//!
//! A [Sentence] is an address (talker id plus sentence id) followed by an ordered list of
//! comma separated fields. Field indices are 0-based and count data fields only; the
//! address is never a field.
//!
//! Construction checks the overall syntax eagerly. Field level problems, such as an empty
//! or non-numeric field, are only reported when that field is read, so a sentence with
//! missing data can still be constructed and partially read.
//!
//! Reference: NMEA 0183 Standard for Interfacing Marine Electronic Devices, v4.11
mod factory;
mod talker;
pub mod validator;

use std::fmt::Display;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::checksum;
use crate::prelude::*;

pub use factory::*;
pub use talker::TalkerId;

/// Begin character of ordinary sentences.
pub const BEGIN_CHAR: char = '$';
/// Begin character of encapsulation sentences, e.g., AIS VDM/VDO.
pub const ALTERNATIVE_BEGIN_CHAR: char = '!';
pub const FIELD_DELIMITER: char = ',';
/// Maximum sentence length, including the `<CR><LF>` terminator.
pub const MAX_LENGTH: usize = 82;

/// Options controlling how raw text is accepted.
#[derive(TypedBuilder, Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject sentences without a checksum section.
    #[builder(default = false)]
    pub require_checksum: bool,
    /// Maximum accepted length, counting the line terminator.
    #[builder(default = MAX_LENGTH)]
    pub max_length: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Address block of `nmea`, i.e., everything between the begin char and the first field
/// delimiter.
pub(crate) fn address(nmea: &str) -> Result<&str> {
    let rest = nmea
        .strip_prefix([BEGIN_CHAR, ALTERNATIVE_BEGIN_CHAR])
        .ok_or_else(|| Error::MalformedSentence(format!("invalid begin char in {nmea:?}")))?;
    let end = rest
        .find(FIELD_DELIMITER)
        .ok_or_else(|| Error::MalformedSentence(format!("no field delimiter in {nmea:?}")))?;
    Ok(&rest[..end])
}

/// Extract the sentence id from a raw sentence, e.g., `BOD` from `$GPBOD,...` or
/// `GRME` from the proprietary `$PGRME,...`.
///
/// # Errors
/// [Error::MalformedSentence] if `nmea` does not start with an address.
pub fn sentence_id_of(nmea: &str) -> Result<&str> {
    let address = address(nmea)?;
    let id = if address.starts_with('P') {
        &address[1..]
    } else {
        address.get(2..).unwrap_or_default()
    };
    if id.is_empty() {
        return Err(Error::MalformedSentence(format!(
            "no sentence id in {nmea:?}"
        )));
    }
    Ok(id)
}

fn is_valid_sentence_id(talker_id: TalkerId, sentence_id: &str) -> bool {
    let address_len = talker_id.as_str().len() + sentence_id.len();
    (5..=7).contains(&address_len)
        && sentence_id
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// Zero pad the magnitude of `value` to `width` digits, keeping the sign ahead of the
/// padding.
fn format_padded(value: i64, width: usize) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{:0width$}", value.unsigned_abs())
}

/// Most fractional digits an `f64` can carry meaningfully.
const MAX_DECIMALS: usize = 17;

/// Render finite `value` with `decimals` fractional digits (at most [MAX_DECIMALS]),
/// rounding half-up, and an integer part zero padded to `width` digits.
fn format_fixed(value: f64, width: usize, decimals: usize) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    let factor = 10f64.powi(i32::try_from(decimals).unwrap_or(0));
    let scaled = value.abs() * factor;
    let magnitude = if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value.abs()
    };
    let text = format!("{magnitude:.decimals$}");
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let sign = if value < 0.0 && magnitude != 0.0 {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}{int_part:0>width$}.{frac}"),
        None => format!("{sign}{int_part:0>width$}"),
    }
}

/// A single NMEA 0183 sentence.
///
/// The sentence exclusively owns its fields, which are mutated in place with the
/// setters. Two sentences are equal if their serialized forms are equal.
///
/// # Example
/// ```
/// use nmea::sentence::{Sentence, TalkerId};
///
/// let bod: Sentence = "$GPBOD,234.9,T,228.8,M,RUSKI,*1D".parse().unwrap();
/// assert_eq!(bod.talker_id(), TalkerId::GP);
/// assert_eq!(bod.sentence_id(), "BOD");
/// assert_eq!(bod.get_double(0).unwrap(), 234.9);
/// assert_eq!(bod.get_string(4).unwrap(), "RUSKI");
/// assert!(bod.get_string(5).is_err());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct Sentence {
    begin_char: char,
    talker_id: TalkerId,
    sentence_id: String,
    fields: Vec<String>,
}

impl Sentence {
    /// Parse `nmea` using default [ParseOptions].
    ///
    /// # Errors
    /// [Error::MalformedSentence] if `nmea` is not a valid sentence,
    /// [Error::UnsupportedTalkerId] if the talker id is unknown.
    pub fn parse(nmea: &str) -> Result<Sentence> {
        Self::parse_with(nmea, &ParseOptions::default())
    }

    /// Parse `nmea` using the provided options.
    ///
    /// # Errors
    /// See [Sentence::parse].
    pub fn parse_with(nmea: &str, options: &ParseOptions) -> Result<Sentence> {
        validator::check(nmea, options)?;
        let talker_id = TalkerId::parse_str(nmea)?;
        let sentence_id = sentence_id_of(nmea)?.to_string();
        let begin_char = if nmea.starts_with(ALTERNATIVE_BEGIN_CHAR) {
            ALTERNATIVE_BEGIN_CHAR
        } else {
            BEGIN_CHAR
        };

        let body = match checksum::index(nmea) {
            Some(idx) => &nmea[..idx],
            None => validator::strip_terminator(nmea),
        };
        let fields = body
            .split(FIELD_DELIMITER)
            .skip(1)
            .map(String::from)
            .collect();

        Ok(Sentence {
            begin_char,
            talker_id,
            sentence_id,
            fields,
        })
    }

    /// Create a `$` sentence with `field_count` empty fields.
    ///
    /// # Errors
    /// [Error::UnsupportedSentenceId] if `sentence_id` cannot form a valid address with
    /// `talker_id`, [Error::InvalidFieldCount] if `field_count` is 0.
    pub fn new(talker_id: TalkerId, sentence_id: &str, field_count: usize) -> Result<Sentence> {
        Self::with_begin_char(BEGIN_CHAR, talker_id, sentence_id, field_count)
    }

    /// Create a sentence with an explicit begin char and `field_count` empty fields.
    ///
    /// # Errors
    /// See [Sentence::new]. Additionally [Error::MalformedSentence] for a begin char other
    /// than [BEGIN_CHAR] or [ALTERNATIVE_BEGIN_CHAR].
    pub fn with_begin_char(
        begin_char: char,
        talker_id: TalkerId,
        sentence_id: &str,
        field_count: usize,
    ) -> Result<Sentence> {
        if !is_valid_sentence_id(talker_id, sentence_id) {
            return Err(Error::UnsupportedSentenceId(sentence_id.to_string()));
        }
        if field_count < 1 {
            return Err(Error::InvalidFieldCount(field_count));
        }
        let mut sentence = Sentence {
            begin_char: BEGIN_CHAR,
            talker_id,
            sentence_id: sentence_id.to_string(),
            fields: vec![String::new(); field_count],
        };
        sentence.set_begin_char(begin_char)?;
        Ok(sentence)
    }

    #[must_use]
    pub fn begin_char(&self) -> char {
        self.begin_char
    }

    /// # Errors
    /// [Error::MalformedSentence] for a begin char other than [BEGIN_CHAR] or
    /// [ALTERNATIVE_BEGIN_CHAR].
    pub fn set_begin_char(&mut self, begin_char: char) -> Result<()> {
        if begin_char != BEGIN_CHAR && begin_char != ALTERNATIVE_BEGIN_CHAR {
            return Err(Error::MalformedSentence(format!(
                "invalid begin char {begin_char:?}"
            )));
        }
        self.begin_char = begin_char;
        Ok(())
    }

    #[must_use]
    pub fn talker_id(&self) -> TalkerId {
        self.talker_id
    }

    pub fn set_talker_id(&mut self, talker_id: TalkerId) {
        self.talker_id = talker_id;
    }

    #[must_use]
    pub fn sentence_id(&self) -> &str {
        &self.sentence_id
    }

    #[must_use]
    pub fn is_proprietary(&self) -> bool {
        self.talker_id == TalkerId::P
    }

    /// True for the AIS encapsulation sentences VDM and VDO.
    #[must_use]
    pub fn is_ais(&self) -> bool {
        crate::ais::AIS_SENTENCE_IDS.contains(&self.sentence_id.as_str())
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    fn field(&self, index: usize) -> Result<&str> {
        self.fields
            .get(index)
            .map(String::as_str)
            .ok_or(Error::IndexOutOfBounds {
                index,
                count: self.fields.len(),
            })
    }

    fn field_mut(&mut self, index: usize) -> Result<&mut String> {
        let count = self.fields.len();
        self.fields
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, count })
    }

    fn parse_error(index: usize, value: &str, reason: impl Display) -> Error {
        Error::Parse {
            index,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Value at `index`, or `None` if the field is empty or does not exist.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<&str> {
        self.fields
            .get(index)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn has_value(&self, index: usize) -> bool {
        self.value(index).is_some()
    }

    /// # Errors
    /// [Error::IndexOutOfBounds] if there is no field at `index`,
    /// [Error::DataNotAvailable] if the field is empty.
    pub fn get_string(&self, index: usize) -> Result<&str> {
        let value = self.field(index)?;
        if value.is_empty() {
            return Err(Error::DataNotAvailable { index });
        }
        Ok(value)
    }

    /// # Errors
    /// As [Sentence::get_string], or [Error::Parse] if the field is not exactly one
    /// character.
    pub fn get_char(&self, index: usize) -> Result<char> {
        let value = self.get_string(index)?;
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Self::parse_error(index, value, "expected a single character")),
        }
    }

    /// # Errors
    /// As [Sentence::get_string], or [Error::Parse] if the field is not an integer.
    pub fn get_int(&self, index: usize) -> Result<i32> {
        let value = self.get_string(index)?;
        value
            .parse()
            .map_err(|err| Self::parse_error(index, value, err))
    }

    /// # Errors
    /// As [Sentence::get_string], or [Error::Parse] if the field is not a finite number.
    pub fn get_double(&self, index: usize) -> Result<f64> {
        let value = self.get_string(index)?;
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => Err(Self::parse_error(index, value, "not a finite number")),
            Err(err) => Err(Self::parse_error(index, value, err)),
        }
    }

    /// # Errors
    /// [Error::IndexOutOfBounds] if there is no field at `index`.
    pub fn set_string(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        *self.field_mut(index)? = value.into();
        Ok(())
    }

    /// # Errors
    /// [Error::IndexOutOfBounds] if there is no field at `index`.
    pub fn set_char(&mut self, index: usize, value: char) -> Result<()> {
        self.set_string(index, value.to_string())
    }

    /// # Errors
    /// [Error::IndexOutOfBounds] if there is no field at `index`.
    pub fn set_int(&mut self, index: usize, value: i32) -> Result<()> {
        self.set_string(index, value.to_string())
    }

    /// Set an integer zero padded to `width` digits, e.g., `7` with width 3 is `"007"` and
    /// `-7` is `"-007"`.
    ///
    /// # Errors
    /// [Error::IndexOutOfBounds] if there is no field at `index`.
    pub fn set_int_padded(&mut self, index: usize, value: i32, width: usize) -> Result<()> {
        self.set_string(index, format_padded(i64::from(value), width))
    }

    /// # Errors
    /// [Error::IndexOutOfBounds] if there is no field at `index`.
    pub fn set_double(&mut self, index: usize, value: f64) -> Result<()> {
        self.set_string(index, value.to_string())
    }

    /// Set a number with `decimals` fractional digits and an integer part zero padded to
    /// `width` digits, e.g., `12.345` with width 3 and 1 decimal is `"012.3"`. Decimals
    /// beyond 17 are clamped.
    ///
    /// # Errors
    /// [Error::IndexOutOfBounds] if there is no field at `index`, [Error::Parse] if
    /// `value` is not finite.
    pub fn set_double_fixed(
        &mut self,
        index: usize,
        value: f64,
        width: usize,
        decimals: usize,
    ) -> Result<()> {
        if !value.is_finite() {
            return Err(Self::parse_error(index, &value.to_string(), "not a finite number"));
        }
        self.set_string(index, format_fixed(value, width, decimals))
    }

    /// Grow or shrink the field list. New fields are empty; truncated fields are
    /// discarded.
    ///
    /// # Errors
    /// [Error::InvalidFieldCount] if `count` is 0.
    pub fn set_field_count(&mut self, count: usize) -> Result<()> {
        if count < 1 {
            return Err(Error::InvalidFieldCount(count));
        }
        self.fields.resize(count, String::new());
        Ok(())
    }

    /// Replace all fields from `first` to the end with `values`, changing the field count
    /// accordingly.
    ///
    /// # Errors
    /// [Error::IndexOutOfBounds] if `first` is beyond the current field count, or
    /// [Error::InvalidFieldCount] if no fields would remain.
    pub fn set_string_values<I, S>(&mut self, first: usize, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if first > self.fields.len() {
            return Err(Error::IndexOutOfBounds {
                index: first,
                count: self.fields.len(),
            });
        }
        let mut fields = self.fields[..first].to_vec();
        fields.extend(values.into_iter().map(Into::into));
        if fields.is_empty() {
            return Err(Error::InvalidFieldCount(0));
        }
        self.fields = fields;
        Ok(())
    }

    /// Empty every field, keeping the field count.
    pub fn reset(&mut self) {
        self.fields.iter_mut().for_each(String::clear);
    }

    /// True if the serialized form of this sentence is a valid sentence.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.to_sentence().is_ok()
    }

    /// Serialize with a fresh checksum, verifying the result against [MAX_LENGTH].
    ///
    /// # Errors
    /// [Error::InvalidResult] if the result is not a valid sentence.
    pub fn to_sentence(&self) -> Result<String> {
        self.to_sentence_with_max(MAX_LENGTH)
    }

    /// Serialize with a fresh checksum, verifying the result against `max_length`.
    ///
    /// # Errors
    /// [Error::InvalidResult] if the result is not a valid sentence, or a field contains a
    /// [FIELD_DELIMITER] and would not parse back as the same field.
    pub fn to_sentence_with_max(&self, max_length: usize) -> Result<String> {
        if let Some(index) = self.fields.iter().position(|f| f.contains(FIELD_DELIMITER)) {
            return Err(Error::InvalidResult(format!(
                "field {index} contains the field delimiter"
            )));
        }
        let nmea = self.to_string();
        let options = ParseOptions::builder()
            .require_checksum(true)
            .max_length(max_length)
            .build();
        validator::check(&nmea, &options).map_err(|err| Error::InvalidResult(err.to_string()))?;
        Ok(nmea)
    }

    fn body(&self) -> String {
        let mut body = format!("{}{}{}", self.begin_char, self.talker_id, self.sentence_id);
        for field in &self.fields {
            body.push(FIELD_DELIMITER);
            body.push_str(field);
        }
        body
    }
}

/// Serialized form with checksum, without verification. See [Sentence::to_sentence].
impl Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body = self.body();
        write!(
            f,
            "{body}{}{}",
            checksum::DELIMITER,
            checksum::calculate(&body)
        )
    }
}

impl FromStr for Sentence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Sentence::parse(s)
    }
}

impl PartialEq for Sentence {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Sentence {}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const BOD: &str = "$GPBOD,234.9,T,228.8,M,RUSKI,*1D";

    #[test]
    fn test_parse() {
        let s = Sentence::parse(BOD).unwrap();

        assert_eq!(s.begin_char(), '$');
        assert_eq!(s.talker_id(), TalkerId::GP);
        assert_eq!(s.sentence_id(), "BOD");
        assert_eq!(s.field_count(), 6);
        assert_eq!(s.get_string(0).unwrap(), "234.9");
        assert_eq!(s.get_char(1).unwrap(), 'T');
        assert_eq!(s.get_string(4).unwrap(), "RUSKI");
        assert_eq!(s.get_string(5), Err(Error::DataNotAvailable { index: 5 }));
        assert!(!s.is_proprietary());
        assert!(!s.is_ais());
    }

    #[test]
    fn test_parse_strips_terminator() {
        let s = Sentence::parse(&format!("{BOD}\r\n")).unwrap();
        assert_eq!(s.field_count(), 6);
        assert_eq!(s.to_string(), BOD);

        let s = Sentence::parse("$GPGLL,,,,,\r\n").unwrap();
        assert_eq!(s.field_count(), 5);
        assert_eq!(s.value(4), None);
    }

    #[test]
    fn test_parse_proprietary() {
        let s = Sentence::parse("$PGRME,15.0,M,45.0,M,25.0,M").unwrap();
        assert_eq!(s.talker_id(), TalkerId::P);
        assert_eq!(s.sentence_id(), "GRME");
        assert!(s.is_proprietary());
        assert_eq!(s.to_string().split('*').next(), Some("$PGRME,15.0,M,45.0,M,25.0,M"));
    }

    #[test]
    fn test_parse_ais() {
        let s = Sentence::parse("!AIVDM,1,1,,A,13u?etPv2;0n:dDPwUM1U1Cb069D,0*24").unwrap();
        assert_eq!(s.begin_char(), '!');
        assert_eq!(s.talker_id(), TalkerId::AI);
        assert!(s.is_ais());
        assert_eq!(s.value(2), None);
        assert_eq!(s.get_string(4).unwrap(), "13u?etPv2;0n:dDPwUM1U1Cb069D");
    }

    #[test_case("GPBOD,234.9"; "no begin char")]
    #[test_case("$GPBOD,234.9,T,228.8,M,RUSKI,*1E"; "bad checksum")]
    #[test_case("$GPBOD"; "no fields")]
    fn test_parse_malformed(nmea: &str) {
        assert!(matches!(
            Sentence::parse(nmea),
            Err(Error::MalformedSentence(_))
        ));
    }

    #[test]
    fn test_parse_unsupported_talker() {
        assert_eq!(
            Sentence::parse("$XXBOD,234.9,T"),
            Err(Error::UnsupportedTalkerId("XX".to_string()))
        );
    }

    #[test]
    fn test_new() {
        let s = Sentence::new(TalkerId::GP, "GLL", 5).unwrap();
        assert_eq!(s.field_count(), 5);
        assert_eq!(s.to_string(), "$GPGLL,,,,,*7C");
        assert_eq!(s.to_sentence().unwrap(), "$GPGLL,,,,,*7C");
    }

    #[test]
    fn test_new_invalid() {
        assert_eq!(
            Sentence::new(TalkerId::GP, "GLL", 0),
            Err(Error::InvalidFieldCount(0))
        );
        assert_eq!(
            Sentence::new(TalkerId::GP, "gll", 1),
            Err(Error::UnsupportedSentenceId("gll".to_string()))
        );
        assert!(Sentence::new(TalkerId::GP, "TOOLONG", 1).is_err());
        assert!(Sentence::with_begin_char('#', TalkerId::GP, "GLL", 1).is_err());
    }

    #[test]
    fn test_get_errors() {
        let mut s = Sentence::new(TalkerId::GP, "XDR", 3).unwrap();
        s.set_string(0, "abc").unwrap();
        s.set_string(1, "1.5").unwrap();

        assert_eq!(
            s.get_string(3),
            Err(Error::IndexOutOfBounds { index: 3, count: 3 })
        );
        assert!(matches!(s.get_char(0), Err(Error::Parse { index: 0, .. })));
        assert!(matches!(s.get_int(0), Err(Error::Parse { index: 0, .. })));
        assert!(matches!(s.get_int(1), Err(Error::Parse { index: 1, .. })));
        assert!(matches!(s.get_double(0), Err(Error::Parse { .. })));
        assert_eq!(s.get_double(1).unwrap(), 1.5);
        assert_eq!(s.get_int(2), Err(Error::DataNotAvailable { index: 2 }));
        assert_eq!(s.get_double(2), Err(Error::DataNotAvailable { index: 2 }));
        assert!(s.has_value(1));
        assert!(!s.has_value(2));
        assert!(!s.has_value(10));
    }

    #[test]
    fn test_get_double_rejects_non_finite() {
        let mut s = Sentence::new(TalkerId::GP, "XDR", 1).unwrap();
        s.set_string(0, "inf").unwrap();
        assert!(matches!(s.get_double(0), Err(Error::Parse { .. })));
    }

    #[test_case(1.5, 1, 400, "1.50000000000000000"; "decimals clamped")]
    #[test_case(12.345, 3, 1, "012.3"; "pads integer part")]
    #[test_case(-12.345, 3, 1, "-012.3"; "sign ahead of padding")]
    #[test_case(1.25, 1, 1, "1.3"; "rounds half up")]
    #[test_case(0.0, 2, 2, "00.00"; "zero")]
    #[test_case(359.96, 3, 1, "360.0"; "rounding carries")]
    #[test_case(1.5, 0, 0, "2"; "no decimals")]
    #[test_case(-0.01, 1, 1, "0.0"; "negative rounds to zero")]
    fn test_set_double_fixed(value: f64, width: usize, decimals: usize, expected: &str) {
        let mut s = Sentence::new(TalkerId::GP, "HDT", 2).unwrap();
        s.set_double_fixed(0, value, width, decimals).unwrap();
        assert_eq!(s.get_string(0).unwrap(), expected);
    }

    #[test]
    fn test_set_double_fixed_rejects_non_finite() {
        let mut s = Sentence::new(TalkerId::GP, "HDT", 2).unwrap();
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                s.set_double_fixed(0, value, 1, 1),
                Err(Error::Parse { index: 0, .. })
            ));
        }
        assert_eq!(s.value(0), None);

        s.set_double_fixed(0, 1e300, 1, 17).unwrap();
        assert!(s.get_double(0).is_ok());
    }

    #[test_case(7, 3, "007"; "positive")]
    #[test_case(-7, 3, "-007"; "negative")]
    #[test_case(1234, 2, "1234"; "wider than width")]
    fn test_set_int_padded(value: i32, width: usize, expected: &str) {
        let mut s = Sentence::new(TalkerId::GP, "GSV", 1).unwrap();
        s.set_int_padded(0, value, width).unwrap();
        assert_eq!(s.get_string(0).unwrap(), expected);
        assert_eq!(s.get_int(0).unwrap(), value);
    }

    #[test]
    fn test_setters() {
        let mut s = Sentence::new(TalkerId::II, "MWV", 5).unwrap();
        s.set_double(0, 45.5).unwrap();
        s.set_char(1, 'R').unwrap();
        s.set_int(2, 12).unwrap();
        s.set_string(3, "N").unwrap();

        assert_eq!(s.get_double(0).unwrap(), 45.5);
        assert_eq!(s.get_char(1).unwrap(), 'R');
        assert_eq!(s.get_int(2).unwrap(), 12);
        assert_eq!(
            s.set_string(5, "A"),
            Err(Error::IndexOutOfBounds { index: 5, count: 5 })
        );
        assert_eq!(s.to_sentence().unwrap().split('*').next(), Some("$IIMWV,45.5,R,12,N,"));
    }

    #[test]
    fn test_set_field_count() {
        let mut s = Sentence::parse(BOD).unwrap();
        s.set_field_count(8).unwrap();
        assert_eq!(s.field_count(), 8);
        assert_eq!(s.get_string(4).unwrap(), "RUSKI");
        assert_eq!(s.value(7), None);

        s.set_field_count(2).unwrap();
        assert_eq!(s.fields(), &["234.9", "T"]);
        assert_eq!(s.set_field_count(0), Err(Error::InvalidFieldCount(0)));
    }

    #[test]
    fn test_set_string_values() {
        let mut s = Sentence::parse(BOD).unwrap();
        s.set_string_values(2, ["1", "2", "3", "4", "5"]).unwrap();
        assert_eq!(s.field_count(), 7);
        assert_eq!(s.fields(), &["234.9", "T", "1", "2", "3", "4", "5"]);

        s.set_string_values(1, Vec::<String>::new()).unwrap();
        assert_eq!(s.fields(), &["234.9"]);

        assert!(matches!(
            s.set_string_values(5, ["x"]),
            Err(Error::IndexOutOfBounds { index: 5, count: 1 })
        ));
        assert_eq!(
            s.set_string_values(0, Vec::<String>::new()),
            Err(Error::InvalidFieldCount(0))
        );
    }

    #[test]
    fn test_reset() {
        let mut s = Sentence::parse(BOD).unwrap();
        s.reset();
        assert_eq!(s.field_count(), 6);
        assert!((0..6).all(|i| !s.has_value(i)));
    }

    #[test]
    fn test_to_sentence_too_long() {
        let mut s = Sentence::new(TalkerId::GP, "TXT", 1).unwrap();
        s.set_string(0, "A".repeat(73)).unwrap();
        assert!(matches!(s.to_sentence(), Err(Error::InvalidResult(_))));
        assert!(!s.is_valid());
        assert!(s.to_sentence_with_max(100).is_ok());
    }

    #[test]
    fn test_to_sentence_reserved_char() {
        let mut s = Sentence::new(TalkerId::GP, "TXT", 1).unwrap();
        s.set_string(0, "A*B").unwrap();
        assert!(matches!(s.to_sentence(), Err(Error::InvalidResult(_))));
    }

    #[test]
    fn test_to_sentence_delimiter_in_field() {
        let mut s = Sentence::new(TalkerId::GP, "TXT", 2).unwrap();
        s.set_string(0, "a,b").unwrap();
        assert!(matches!(s.to_sentence(), Err(Error::InvalidResult(_))));
        assert!(!s.is_valid());

        s.set_string(0, "a").unwrap();
        let again = Sentence::parse(&s.to_sentence().unwrap()).unwrap();
        assert_eq!(again.fields(), &["a", ""]);
    }

    #[test]
    fn test_roundtrip_and_equality() {
        let s = Sentence::parse(BOD).unwrap();
        let again = Sentence::parse(&s.to_sentence().unwrap()).unwrap();
        assert_eq!(s, again);
        assert_eq!(s.fields(), again.fields());

        let mut changed = again.clone();
        changed.set_string(4, "OTHER").unwrap();
        assert_ne!(s, changed);
    }

    #[test]
    fn test_sentence_id_of() {
        assert_eq!(sentence_id_of(BOD).unwrap(), "BOD");
        assert_eq!(sentence_id_of("$PGRME,1").unwrap(), "GRME");
        assert_eq!(sentence_id_of("!AIVDO,1").unwrap(), "VDO");
        assert!(sentence_id_of("$GP,1").is_err());
        assert!(sentence_id_of("$GPBOD").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let s = Sentence::parse(BOD).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let back: Sentence = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
