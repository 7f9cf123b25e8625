use std::collections::HashMap;

use tracing::{debug, trace, warn};

use super::{AisSentence, SixbitPayload};
use crate::prelude::*;

/// Identifies the fragments of one multi sentence message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MessageKey {
    sentence_id: String,
    message_id: Option<u32>,
    radio_channel: Option<String>,
}

impl MessageKey {
    fn of(fragment: &AisSentence) -> Result<Self> {
        Ok(Self {
            sentence_id: fragment.sentence().sentence_id().to_string(),
            message_id: fragment.message_id()?,
            radio_channel: fragment.radio_channel().map(String::from),
        })
    }
}

/// Joins the fragments of multi sentence AIS messages into a single payload.
///
/// Fragments of each message must be pushed in order, but messages told apart by sentence
/// id, sequential message id and radio channel may interleave. A fragment that does not
/// continue its pending message discards it; a first fragment always starts a new
/// message.
///
/// # Example
/// ```
/// use nmea::ais::{AisSentence, FragmentAssembler};
///
/// let mut assembler = FragmentAssembler::new();
/// let first = AisSentence::parse(
///     "!AIVDM,2,1,3,B,55P5TL01VIaAL@7WKO@mBplU@<PDhh000000001S;AJ::4A80?4i@E53,0*3E",
/// )
/// .unwrap();
/// let second = AisSentence::parse("!AIVDM,2,2,3,B,1@0000000000000,2*55").unwrap();
///
/// assert!(assembler.push(first).unwrap().is_none());
/// let payload = assembler.push(second).unwrap().unwrap();
/// assert_eq!(payload.len(), 424);
/// assert_eq!(payload.get_string(112, 231), "MT.MITCHELL");
/// ```
#[derive(Debug, Default)]
pub struct FragmentAssembler {
    pending: HashMap<MessageKey, Vec<AisSentence>>,
}

impl FragmentAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment, returning the decoded payload once a message is complete.
    ///
    /// Single fragment messages are decoded immediately and leave incomplete messages
    /// untouched.
    ///
    /// # Errors
    /// If the fragment fields cannot be read, or the combined payload cannot be decoded.
    /// The incomplete message the fragment belongs to is discarded in either case.
    pub fn push(&mut self, fragment: AisSentence) -> Result<Option<SixbitPayload>> {
        let count = fragment.number_of_fragments()?;
        if count == 1 {
            return fragment.payload_bits().map(Some);
        }
        let key = MessageKey::of(&fragment)?;
        let result = self.accept(key.clone(), count, fragment);
        if result.is_err() {
            self.pending.remove(&key);
        }
        result
    }

    fn accept(
        &mut self,
        key: MessageKey,
        count: u32,
        fragment: AisSentence,
    ) -> Result<Option<SixbitPayload>> {
        let number = fragment.fragment_number()?;

        if number == 1 {
            if let Some(dropped) = self.pending.insert(key, vec![fragment]) {
                debug!(
                    pending = dropped.len(),
                    "new first fragment, dropping incomplete message"
                );
            }
            trace!(count, "starting message");
            return Ok(None);
        }

        let continues = match self.pending.get(&key).and_then(|parts| parts.last()) {
            Some(last) => {
                last.is_part_of_message(&fragment) && last.fragment_number()? + 1 == number
            }
            None => false,
        };
        if !continues {
            let dropped = self.pending.remove(&key).map_or(0, |parts| parts.len());
            warn!(
                count,
                number,
                pending = dropped,
                "fragment out of sequence, dropping"
            );
            return Ok(None);
        }

        let last = fragment.is_last_fragment();
        let Some(parts) = self.pending.get_mut(&key) else {
            return Ok(None);
        };
        parts.push(fragment);
        if !last {
            return Ok(None);
        }

        let parts = self.pending.remove(&key).unwrap_or_default();
        let mut payload = String::new();
        for part in &parts {
            payload.push_str(part.payload()?);
        }
        let fill_bits = parts.last().map_or(Ok(0), AisSentence::fill_bits)?;
        trace!(count, chars = payload.len(), "message complete");
        SixbitPayload::new(&payload, fill_bits).map(Some)
    }

    /// Number of incomplete messages.
    #[must_use]
    pub fn pending_messages(&self) -> usize {
        self.pending.len()
    }

    /// Number of fragments held across all incomplete messages.
    #[must_use]
    pub fn pending_fragments(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PART1: &str =
        "!AIVDM,2,1,3,B,55P5TL01VIaAL@7WKO@mBplU@<PDhh000000001S;AJ::4A80?4i@E53,0*3E";
    const PART2: &str = "!AIVDM,2,2,3,B,1@0000000000000,2*55";
    const SINGLE: &str = "!AIVDM,1,1,,A,13u?etPv2;0n:dDPwUM1U1Cb069D,0*24";

    fn vdm(nmea: &str) -> AisSentence {
        AisSentence::parse(nmea).unwrap()
    }

    #[test]
    fn test_two_fragments() {
        let mut assembler = FragmentAssembler::new();
        assert_eq!(assembler.push(vdm(PART1)), Ok(None));
        assert_eq!(assembler.pending_fragments(), 1);

        let payload = assembler.push(vdm(PART2)).unwrap().unwrap();
        assert_eq!(assembler.pending_messages(), 0);
        assert_eq!(payload.fill_bits(), 2);
        assert_eq!(payload.len(), 424);
        assert_eq!(payload.get_uint(0, 5), 5);
        assert_eq!(payload.get_uint(8, 37), 369_190_000);
        assert_eq!(payload.get_string(70, 111), "WDA9674");
        assert_eq!(payload.get_string(302, 421), "SEATTLE");
    }

    #[test]
    fn test_single_fragment_yields_immediately() {
        let mut assembler = FragmentAssembler::new();
        let payload = assembler.push(vdm(SINGLE)).unwrap().unwrap();
        assert_eq!(payload.len(), 168);
        assert_eq!(assembler.pending_messages(), 0);
    }

    #[test]
    fn test_single_fragment_between_fragments() {
        let mut assembler = FragmentAssembler::new();
        assert_eq!(assembler.push(vdm(PART1)), Ok(None));

        let single = assembler.push(vdm(SINGLE)).unwrap().unwrap();
        assert_eq!(single.get_uint(0, 5), 1);
        assert_eq!(assembler.pending_fragments(), 1);

        let payload = assembler.push(vdm(PART2)).unwrap().unwrap();
        assert_eq!(payload.get_string(112, 231), "MT.MITCHELL");
        assert_eq!(assembler.pending_messages(), 0);
    }

    #[test]
    fn test_interleaved_messages() {
        let mut assembler = FragmentAssembler::new();
        assert_eq!(assembler.push(vdm(PART1)), Ok(None));
        // same payload, sequential message id 4 on channel A
        assert_eq!(
            assembler.push(vdm(
                "!AIVDM,2,1,4,A,55P5TL01VIaAL@7WKO@mBplU@<PDhh000000001S;AJ::4A80?4i@E53,0"
            )),
            Ok(None)
        );
        assert_eq!(assembler.pending_messages(), 2);

        let first = assembler.push(vdm(PART2)).unwrap().unwrap();
        let second = assembler
            .push(vdm("!AIVDM,2,2,4,A,1@0000000000000,2"))
            .unwrap()
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(assembler.pending_messages(), 0);
    }

    #[test]
    fn test_out_of_sequence_dropped() {
        let mut assembler = FragmentAssembler::new();
        assert_eq!(assembler.push(vdm(PART2)), Ok(None));
        assert_eq!(assembler.pending_messages(), 0);

        // no first fragment for message id 4, message 3 stays pending
        assert_eq!(assembler.push(vdm(PART1)), Ok(None));
        assert_eq!(
            assembler.push(vdm("!AIVDM,2,2,4,B,1@0000000000000,2*52")),
            Ok(None)
        );
        assert_eq!(assembler.pending_messages(), 1);

        // gap in fragment numbers
        assert_eq!(assembler.push(vdm("!AIVDM,3,1,5,B,13u?,0")), Ok(None));
        assert_eq!(assembler.pending_messages(), 2);
        assert_eq!(assembler.push(vdm("!AIVDM,3,3,5,B,13u?,0")), Ok(None));
        assert_eq!(assembler.pending_messages(), 1);

        assert!(assembler.push(vdm(PART2)).unwrap().is_some());
    }

    #[test]
    fn test_first_fragment_restarts() {
        let mut assembler = FragmentAssembler::new();
        assert_eq!(assembler.push(vdm(PART1)), Ok(None));
        assert_eq!(assembler.push(vdm(PART1)), Ok(None));
        assert_eq!(assembler.pending_fragments(), 1);
        assert!(assembler.push(vdm(PART2)).unwrap().is_some());
    }

    #[test]
    fn test_error_clears_pending() {
        let mut assembler = FragmentAssembler::new();
        assert_eq!(assembler.push(vdm(PART1)), Ok(None));
        let bad = vdm("!AIVDM,2,2,3,B,1@00000,9");
        assert_eq!(assembler.push(bad), Err(Error::InvalidFillBits(9)));
        assert_eq!(assembler.pending_messages(), 0);
    }

    #[test]
    fn test_clear() {
        let mut assembler = FragmentAssembler::new();
        assert_eq!(assembler.push(vdm(PART1)), Ok(None));
        assembler.clear();
        assert_eq!(assembler.pending_messages(), 0);
    }
}
