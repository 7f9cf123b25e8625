use std::any::Any;
use std::fmt::Display;
use std::str::FromStr;

use super::{SixbitPayload, AIS_SENTENCE_IDS, VDO};
use crate::prelude::*;
use crate::sentence::{
    ParseOptions, ParsedSentence, Sentence, SentenceParser, TalkerId, ALTERNATIVE_BEGIN_CHAR,
};

/// Total number of fragments of the message.
pub const FRAGMENT_COUNT: usize = 0;
/// 1-based number of this fragment.
pub const FRAGMENT_NUMBER: usize = 1;
/// Sequential message id, empty for single fragment messages.
pub const MESSAGE_ID: usize = 2;
/// Radio channel, `A` or `B`.
pub const RADIO_CHANNEL: usize = 3;
/// Armored six-bit payload.
pub const PAYLOAD: usize = 4;
/// Number of fill bits at the end of the payload.
pub const FILL_BITS: usize = 5;
pub const FIELD_COUNT: usize = 6;

/// AIS encapsulation sentence, VDM for received messages and VDO for own vessel reports.
///
/// ```text
/// !AIVDM,2,1,3,B,55P5TL01VIaAL@7WKO@mBplU@<PDhh000000001S;AJ::4A80?4i@E53,0*3E
///        | | | |  |                                                      |
///        | | | |  payload                                                fill bits
///        | | | radio channel
///        | | sequential message id
///        | fragment number
///        fragment count
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AisSentence {
    sentence: Sentence,
}

impl AisSentence {
    /// # Errors
    /// Any error from [Sentence::parse], or see [AisSentence::try_from].
    pub fn parse(nmea: &str) -> Result<Self> {
        Self::try_from(Sentence::parse(nmea)?)
    }

    /// # Errors
    /// Any error from [Sentence::parse_with], or see [AisSentence::try_from].
    pub fn parse_with(nmea: &str, options: &ParseOptions) -> Result<Self> {
        Self::try_from(Sentence::parse_with(nmea, options)?)
    }

    /// Empty `!` sentence with all six AIS fields.
    ///
    /// # Errors
    /// [Error::UnsupportedSentenceId] if `sentence_id` is not VDM or VDO.
    pub fn new(talker_id: TalkerId, sentence_id: &str) -> Result<Self> {
        if !AIS_SENTENCE_IDS.contains(&sentence_id) {
            return Err(Error::UnsupportedSentenceId(sentence_id.to_string()));
        }
        Ok(Self {
            sentence: Sentence::with_begin_char(
                ALTERNATIVE_BEGIN_CHAR,
                talker_id,
                sentence_id,
                FIELD_COUNT,
            )?,
        })
    }

    #[must_use]
    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    #[must_use]
    pub fn into_sentence(self) -> Sentence {
        self.sentence
    }

    /// True for VDO, i.e., a report about the own vessel.
    #[must_use]
    pub fn is_own_vessel(&self) -> bool {
        self.sentence.sentence_id() == VDO
    }

    fn parse_field<T>(&self, index: usize) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self.sentence.get_string(index)?;
        value.parse().map_err(|err: T::Err| Error::Parse {
            index,
            value: value.to_string(),
            reason: err.to_string(),
        })
    }

    /// # Errors
    /// [Error::DataNotAvailable] if empty, [Error::Parse] if not a positive integer.
    pub fn number_of_fragments(&self) -> Result<u32> {
        self.parse_field(FRAGMENT_COUNT)
    }

    /// # Errors
    /// [Error::DataNotAvailable] if empty, [Error::Parse] if not a positive integer.
    pub fn fragment_number(&self) -> Result<u32> {
        self.parse_field(FRAGMENT_NUMBER)
    }

    /// Sequential message id, `None` if the field is empty.
    ///
    /// # Errors
    /// [Error::Parse] if present but not an integer.
    pub fn message_id(&self) -> Result<Option<u32>> {
        if self.sentence.has_value(MESSAGE_ID) {
            self.parse_field(MESSAGE_ID).map(Some)
        } else {
            Ok(None)
        }
    }

    #[must_use]
    pub fn radio_channel(&self) -> Option<&str> {
        self.sentence.value(RADIO_CHANNEL)
    }

    /// Armored payload characters.
    ///
    /// # Errors
    /// [Error::DataNotAvailable] if the payload is empty.
    pub fn payload(&self) -> Result<&str> {
        self.sentence.get_string(PAYLOAD)
    }

    /// # Errors
    /// [Error::DataNotAvailable] if empty, [Error::Parse] if not an integer,
    /// [Error::InvalidFillBits] if greater than 5.
    pub fn fill_bits(&self) -> Result<u8> {
        let fill_bits = self.parse_field(FILL_BITS)?;
        if fill_bits > super::sixbit::MAX_FILL_BITS {
            return Err(Error::InvalidFillBits(fill_bits));
        }
        Ok(fill_bits)
    }

    /// Decode the payload of this fragment alone.
    ///
    /// Fill bits are only meaningful on the last fragment; use a
    /// [super::FragmentAssembler] to decode multi fragment messages.
    ///
    /// # Errors
    /// Any error reading the payload or fill bits fields, or decoding the payload.
    pub fn payload_bits(&self) -> Result<SixbitPayload> {
        SixbitPayload::new(self.payload()?, self.fill_bits()?)
    }

    /// True if the message spans more than one sentence.
    #[must_use]
    pub fn is_fragmented(&self) -> bool {
        self.number_of_fragments().is_ok_and(|n| n > 1)
    }

    #[must_use]
    pub fn is_first_fragment(&self) -> bool {
        self.fragment_number().is_ok_and(|n| n == 1)
    }

    #[must_use]
    pub fn is_last_fragment(&self) -> bool {
        match (self.fragment_number(), self.number_of_fragments()) {
            (Ok(number), Ok(count)) => number == count,
            _ => false,
        }
    }

    /// True if `self` and `other` are distinct fragments of the same multi sentence
    /// message.
    ///
    /// Single fragment sentences are never part of a multi sentence message, and
    /// sentences with unreadable fragment fields never match.
    #[must_use]
    pub fn is_part_of_message(&self, other: &AisSentence) -> bool {
        let (Ok(count), Ok(other_count)) = (self.number_of_fragments(), other.number_of_fragments())
        else {
            return false;
        };
        let (Ok(number), Ok(other_number)) = (self.fragment_number(), other.fragment_number())
        else {
            return false;
        };
        let (Ok(id), Ok(other_id)) = (self.message_id(), other.message_id()) else {
            return false;
        };
        self.sentence.sentence_id() == other.sentence.sentence_id()
            && count > 1
            && count == other_count
            && id == other_id
            && self.radio_channel() == other.radio_channel()
            && (1..=count).contains(&number)
            && (1..=count).contains(&other_number)
            && number != other_number
    }

    /// # Errors
    /// [Error::IllegalState] if `number` is not in `1..=count`.
    pub fn set_fragments(&mut self, count: u32, number: u32) -> Result<()> {
        if number == 0 || number > count {
            return Err(Error::IllegalState(format!(
                "fragment number {number} outside 1..={count}"
            )));
        }
        self.sentence.set_string(FRAGMENT_COUNT, count.to_string())?;
        self.sentence.set_string(FRAGMENT_NUMBER, number.to_string())
    }

    /// Set or clear the sequential message id.
    ///
    /// # Errors
    /// [Error::IllegalState] if `id` is not a single digit.
    pub fn set_message_id(&mut self, id: Option<u32>) -> Result<()> {
        match id {
            Some(id) if id > 9 => Err(Error::IllegalState(format!(
                "sequential message id {id} outside 0..=9"
            ))),
            Some(id) => self.sentence.set_string(MESSAGE_ID, id.to_string()),
            None => self.sentence.set_string(MESSAGE_ID, ""),
        }
    }

    /// # Errors
    /// Never in practice; the field always exists.
    pub fn set_radio_channel(&mut self, channel: &str) -> Result<()> {
        self.sentence.set_string(RADIO_CHANNEL, channel)
    }

    /// Set the payload and fill bits fields from `payload`.
    ///
    /// # Errors
    /// Never in practice; the fields always exist.
    pub fn set_payload(&mut self, payload: &SixbitPayload) -> Result<()> {
        self.sentence.set_string(PAYLOAD, payload.payload())?;
        self.sentence
            .set_string(FILL_BITS, payload.fill_bits().to_string())
    }
}

/// Wrap a parsed sentence.
///
/// # Errors
/// [Error::UnsupportedSentenceId] if not VDM or VDO, [Error::MalformedSentence] if the
/// sentence does not have exactly six fields.
impl TryFrom<Sentence> for AisSentence {
    type Error = Error;

    fn try_from(sentence: Sentence) -> Result<Self> {
        if !AIS_SENTENCE_IDS.contains(&sentence.sentence_id()) {
            return Err(Error::UnsupportedSentenceId(
                sentence.sentence_id().to_string(),
            ));
        }
        if sentence.field_count() != FIELD_COUNT {
            return Err(Error::MalformedSentence(format!(
                "{} has {} fields, expected {FIELD_COUNT}",
                sentence.sentence_id(),
                sentence.field_count()
            )));
        }
        Ok(Self { sentence })
    }
}

impl ParsedSentence for AisSentence {
    fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    fn sentence_mut(&mut self) -> &mut Sentence {
        &mut self.sentence
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for AisSentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.sentence, f)
    }
}

impl FromStr for AisSentence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// [SentenceParser] producing [AisSentence]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct AisParser;

impl SentenceParser for AisParser {
    fn begin_char(&self) -> char {
        ALTERNATIVE_BEGIN_CHAR
    }

    fn parse(&self, nmea: &str, options: &ParseOptions) -> Result<Box<dyn ParsedSentence>> {
        Ok(Box::new(AisSentence::parse_with(nmea, options)?))
    }

    fn create(&self, talker_id: TalkerId, sentence_id: &str) -> Result<Box<dyn ParsedSentence>> {
        Ok(Box::new(AisSentence::new(talker_id, sentence_id)?))
    }
}
