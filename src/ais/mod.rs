//! AIS messages encapsulated in VDM/VDO sentences.
//!
//! An [AisSentence] carries one fragment of a six-bit armored payload. Multi sentence
//! messages are joined with a [FragmentAssembler] and decoded to a [SixbitPayload], whose
//! bits are read as unsigned, two's-complement signed, or six-bit text fields.
//!
//! Reference: ITU-R M.1371-5, Annex 8
mod assembler;
mod bits;
pub mod sixbit;
mod vdm;

pub use assembler::FragmentAssembler;
pub use bits::BitVector;
pub use sixbit::SixbitPayload;
pub use vdm::*;

/// AIS VHF data-link message.
pub const VDM: &str = "VDM";
/// AIS VHF data-link own-vessel report.
pub const VDO: &str = "VDO";
/// Sentence ids carrying AIS payloads.
pub const AIS_SENTENCE_IDS: &[&str] = &[VDM, VDO];
