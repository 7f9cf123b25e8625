use std::fmt::Display;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::*;

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed length bit array.
///
/// Bits are addressed 0-based and ranges are inclusive and read MSB-first, i.e., the bit
/// at `from` is the most significant bit of the value read from `from..=to`.
///
/// Indexing outside the vector is a programming error and panics.
///
/// # Example
/// ```
/// use nmea::ais::BitVector;
///
/// let bits: BitVector = "101101".parse().unwrap();
/// assert_eq!(bits.get_uint(0, 5), 45);
/// assert_eq!(bits.get_uint(2, 3), 3);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBitVector"))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitVector {
    words: Vec<u64>,
    len: usize,
}

/// Unchecked serialized form of a [BitVector].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawBitVector {
    words: Vec<u64>,
    len: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBitVector> for BitVector {
    type Error = Error;

    fn try_from(raw: RawBitVector) -> Result<Self> {
        let expected = raw.len.div_ceil(WORD_BITS);
        if raw.words.len() != expected {
            return Err(Error::IllegalState(format!(
                "{} words for {} bits, expected {expected}",
                raw.words.len(),
                raw.len
            )));
        }
        let used = raw.len % WORD_BITS;
        if used != 0 && raw.words.last().is_some_and(|w| w & (u64::MAX >> used) != 0) {
            return Err(Error::IllegalState(format!(
                "bits set beyond length {}",
                raw.len
            )));
        }
        Ok(Self {
            words: raw.words,
            len: raw.len,
        })
    }
}

impl BitVector {
    /// Create a vector of `len` cleared bits.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn mask(index: usize) -> u64 {
        1 << (WORD_BITS - 1 - index % WORD_BITS)
    }

    fn check_range(&self, from: usize, to: usize) {
        assert!(
            from <= to && to < self.len,
            "bit range {from}..={to} out of bounds for length {}",
            self.len
        );
    }

    /// Set the bit at `index`.
    ///
    /// # Panics
    /// If `index` is not less than the length.
    pub fn set(&mut self, index: usize) {
        assert!(index < self.len, "bit {index} out of bounds for length {}", self.len);
        self.words[index / WORD_BITS] |= Self::mask(index);
    }

    /// # Panics
    /// If `index` is not less than the length.
    #[must_use]
    pub fn get_bool(&self, index: usize) -> bool {
        assert!(index < self.len, "bit {index} out of bounds for length {}", self.len);
        self.words[index / WORD_BITS] & Self::mask(index) != 0
    }

    /// Copy of the bits in `from..=to`.
    ///
    /// # Panics
    /// If the range is empty or out of bounds.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> BitVector {
        self.check_range(from, to);
        let mut out = BitVector::new(to - from + 1);
        for idx in (from..=to).filter(|idx| self.get_bool(*idx)) {
            out.set(idx - from);
        }
        out
    }

    /// Unsigned value of the bits in `from..=to`, MSB-first.
    ///
    /// # Panics
    /// If the range is empty, out of bounds, or wider than 64 bits.
    #[must_use]
    pub fn get_uint(&self, from: usize, to: usize) -> u64 {
        self.check_range(from, to);
        assert!(to - from < WORD_BITS, "bit range {from}..={to} wider than 64 bits");
        (from..=to).fold(0, |acc, idx| (acc << 1) | u64::from(self.get_bool(idx)))
    }

    /// Signed value of the bits in `from..=to`, interpreted as a two's-complement integer
    /// `width` bits wide.
    ///
    /// `width` is the width of the field as defined by the message layout (AIS uses 8,
    /// 17, 18, 27 and 28 bit signed fields) and is not derived from the range.
    ///
    /// # Panics
    /// If the range is invalid (see [BitVector::get_uint]) or `width` is not 1 to 64.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn get_int(&self, from: usize, to: usize, width: u32) -> i64 {
        assert!((1..=64).contains(&width), "invalid signed width {width}");
        let value = i128::from(self.get_uint(from, to));
        if value >= 1i128 << (width - 1) {
            (value - (1i128 << width)) as i64
        } else {
            value as i64
        }
    }
}

/// Parse a string of `0` and `1` characters.
impl FromStr for BitVector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut bits = BitVector::new(s.len());
        for (idx, c) in s.chars().enumerate() {
            match c {
                '1' => bits.set(idx),
                '0' => {}
                _ => {
                    return Err(Error::Parse {
                        index: idx,
                        value: s.to_string(),
                        reason: format!("invalid bit {c:?}"),
                    })
                }
            }
        }
        Ok(bits)
    }
}

impl Display for BitVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for idx in 0..self.len {
            f.write_str(if self.get_bool(idx) { "1" } else { "0" })?;
        }
        Ok(())
    }
}
