#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Raw text does not have the overall shape of a sentence, or its checksum does not
    /// match.
    #[error("malformed sentence: {0}")]
    MalformedSentence(String),
    #[error("unsupported talker id: {0}")]
    UnsupportedTalkerId(String),
    #[error("unsupported sentence id: {0}")]
    UnsupportedSentenceId(String),

    /// Field exists but is empty.
    #[error("data not available at field {index}")]
    DataNotAvailable { index: usize },
    /// Field is present but cannot be converted to the requested type.
    #[error("cannot parse field {index} value {value:?}: {reason}")]
    Parse {
        index: usize,
        value: String,
        reason: String,
    },
    #[error("field index {index} out of bounds for {count} fields")]
    IndexOutOfBounds { index: usize, count: usize },
    #[error("invalid field count: {0}")]
    InvalidFieldCount(usize),

    /// Payload character outside the six-bit armoring alphabet.
    #[error("invalid payload character {character:?} at position {position}")]
    InvalidPayloadCharacter { character: char, position: usize },
    #[error("invalid fill bits {0}, expected 0 to 5")]
    InvalidFillBits(u8),

    /// Serializing a sentence did not produce a valid sentence.
    #[error("invalid result: {0}")]
    InvalidResult(String),
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// A parser could not produce a usable sentence when registered.
    #[error("invalid parser: {0}")]
    InvalidParser(String),
}

pub type Result<T> = std::result::Result<T, Error>;
