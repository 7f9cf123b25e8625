//! Six-bit payload armoring and decoding.
//!
//! AIS binary messages travel inside VDM/VDO sentences as printable characters carrying
//! 6 bits each. Two distinct tables are involved:
//! * transport armoring maps each payload character to a 6-bit value (see [to_binary]
//!   and [armor])
//! * text fields inside the decoded message map 6-bit values to content characters per
//!   ITU-R M.1371 Table 44 (see [to_ascii] and [from_ascii])
use super::BitVector;
use crate::prelude::*;

/// Number of bits carried by each payload character.
pub const BITS_PER_CHAR: usize = 6;
/// Maximum number of fill bits padding the end of a payload.
pub const MAX_FILL_BITS: u8 = 5;
/// Padding character trimmed from the end of decoded text fields.
pub const PADDING: char = '@';

/// True if `c` belongs to the armoring alphabet.
#[must_use]
pub fn is_armored(c: char) -> bool {
    matches!(c, '\x30'..='\x57' | '\x60'..='\x77')
}

/// Six-bit value of the armored payload character `c`, or `None` if `c` is not in the
/// armoring alphabet.
#[must_use]
pub fn to_binary(c: char) -> Option<u8> {
    if !is_armored(c) {
        return None;
    }
    let c = c as u8;
    Some(if c < 0x60 { c - 0x30 } else { c - 0x38 })
}

/// Armored payload character for the low 6 bits of `value`.
#[must_use]
pub fn armor(value: u8) -> char {
    let value = value & 0x3f;
    char::from(if value < 0x28 { value + 0x30 } else { value + 0x38 })
}

/// Content character for the low 6 bits of `value`.
#[must_use]
pub fn to_ascii(value: u8) -> char {
    let value = value & 0x3f;
    char::from(if value < 0x20 { value + 0x40 } else { value })
}

/// Six-bit value of the content character `c`, or `None` if it has no six-bit
/// representation.
#[must_use]
pub fn from_ascii(c: char) -> Option<u8> {
    match c {
        '\x40'..='\x5f' => Some(c as u8 - 0x40),
        '\x20'..='\x3f' => Some(c as u8),
        _ => None,
    }
}

/// Armored six-bit payload and its decoded bits.
///
/// Fill bits pad the end of the payload to a whole number of characters. They remain in
/// [SixbitPayload::bits] but are not part of the addressable [SixbitPayload::len].
///
/// # Example
/// ```
/// use nmea::ais::SixbitPayload;
///
/// let payload = SixbitPayload::new("13u?etPv2;0n:dDPwUM1U1Cb069D", 0).unwrap();
/// assert_eq!(payload.len(), 168);
/// // message type
/// assert_eq!(payload.get_uint(0, 5), 1);
/// // mmsi
/// assert_eq!(payload.get_uint(8, 37), 265_547_250);
/// // rate of turn, 8 bit signed
/// assert_eq!(payload.get_int(42, 49, 8), -8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SixbitPayload {
    payload: String,
    fill_bits: u8,
    bits: BitVector,
}

impl SixbitPayload {
    /// Decode an armored payload.
    ///
    /// # Errors
    /// [Error::InvalidPayloadCharacter] if a character is not in the armoring alphabet,
    /// [Error::InvalidFillBits] if `fill_bits` is greater than [MAX_FILL_BITS].
    pub fn new(payload: &str, fill_bits: u8) -> Result<Self> {
        if fill_bits > MAX_FILL_BITS {
            return Err(Error::InvalidFillBits(fill_bits));
        }
        let mut bits = BitVector::new(payload.chars().count() * BITS_PER_CHAR);
        for (position, character) in payload.chars().enumerate() {
            let value = to_binary(character).ok_or(Error::InvalidPayloadCharacter {
                character,
                position,
            })?;
            let offset = position * BITS_PER_CHAR;
            for bit in 0..BITS_PER_CHAR {
                if value & (0x20 >> bit) != 0 {
                    bits.set(offset + bit);
                }
            }
        }
        Ok(Self {
            payload: payload.to_string(),
            fill_bits,
            bits,
        })
    }

    /// Armor `bits`, padding the last character with fill bits as needed.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_bits(bits: &BitVector) -> Self {
        let num_chars = bits.len().div_ceil(BITS_PER_CHAR);
        let mut padded = BitVector::new(num_chars * BITS_PER_CHAR);
        for idx in (0..bits.len()).filter(|idx| bits.get_bool(*idx)) {
            padded.set(idx);
        }
        let payload = (0..num_chars)
            .map(|i| {
                let from = i * BITS_PER_CHAR;
                armor(padded.get_uint(from, from + BITS_PER_CHAR - 1) as u8)
            })
            .collect();
        Self {
            payload,
            fill_bits: (padded.len() - bits.len()) as u8,
            bits: padded,
        }
    }

    /// Armored payload characters.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    #[must_use]
    pub fn fill_bits(&self) -> u8 {
        self.fill_bits
    }

    /// All decoded bits, including fill bits.
    #[must_use]
    pub fn bits(&self) -> &BitVector {
        &self.bits
    }

    /// Number of message bits, excluding fill bits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len().saturating_sub(usize::from(self.fill_bits))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// # Panics
    /// See [BitVector::get_bool].
    #[must_use]
    pub fn get_bool(&self, index: usize) -> bool {
        self.bits.get_bool(index)
    }

    /// # Panics
    /// See [BitVector::get_uint].
    #[must_use]
    pub fn get_uint(&self, from: usize, to: usize) -> u64 {
        self.bits.get_uint(from, to)
    }

    /// # Panics
    /// See [BitVector::get_int].
    #[must_use]
    pub fn get_int(&self, from: usize, to: usize, width: u32) -> i64 {
        self.bits.get_int(from, to, width)
    }

    /// Decode the text field in `from..=to`, 6 bits per character, with trailing
    /// [PADDING] removed.
    ///
    /// The range should be a multiple of 6 bits; a trailing partial character is ignored.
    ///
    /// # Panics
    /// See [BitVector::get_uint].
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn get_string(&self, from: usize, to: usize) -> String {
        let mut text: String = (from..=to)
            .step_by(BITS_PER_CHAR)
            .take_while(|idx| idx + BITS_PER_CHAR - 1 <= to)
            .map(|idx| to_ascii(self.bits.get_uint(idx, idx + BITS_PER_CHAR - 1) as u8))
            .collect();
        let len = text.trim_end_matches(PADDING).len();
        text.truncate(len);
        text
    }
}
