use derive_more::Display;

use crate::ProcessorId;
use crate::error::{Error, Result};

/// The physical encoding of an [`AffinityMask`].
///
/// Which encoding a platform uses is a compile-time property of the build target. A mask
/// obtained from a get call is valid input only to a set call compiled for the same encoding.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the set of encodings is fixed by the platform model"
)]
pub enum MaskEncoding {
    /// A single unsigned 64-bit word where bit `i` set means processor `i` is included.
    #[display("fixed-width word")]
    FixedWord,

    /// A byte buffer sized to the kernel's affinity structure, with an OS-defined bit layout.
    #[display("byte buffer")]
    ByteBuffer,

    /// An opaque scheduler hint integer. Not a bitmask in any form.
    #[display("opaque tag")]
    OpaqueTag,
}

/// The set of logical processors a thread is permitted to execute on, in one of the three
/// physical encodings used by the supported platforms.
///
/// The two bitmask encodings ([`FixedWord`][Self::FixedWord] and
/// [`ByteBuffer`][Self::ByteBuffer]) describe an ordered set of logical processor indices
/// and support bit-level inspection and mutation. The [`OpaqueTag`][Self::OpaqueTag]
/// encoding is an advisory scheduler hint - equal tags ask the scheduler to colocate
/// threads - and is never interpreted as a bitmask.
///
/// Values are transient: produced fresh on each query and never cached by this crate.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the set of encodings is fixed by the platform model"
)]
pub enum AffinityMask {
    /// Fixed-width encoding; valid only where the OS-reported processor count fits in 64 bits.
    FixedWord(u64),

    /// Variable-width encoding; the buffer is sized to the OS affinity structure and its bit
    /// layout belongs to the OS. Bit-level helpers assume the little-endian bit order used by
    /// the Linux `cpu_set_t` on the targets this crate supports.
    ByteBuffer(Vec<u8>),

    /// Tag encoding used by Mach-based schedulers. Opaque; carries no processor bits.
    OpaqueTag(i64),
}

impl AffinityMask {
    /// The physical encoding of this mask.
    #[must_use]
    pub fn encoding(&self) -> MaskEncoding {
        match self {
            Self::FixedWord(_) => MaskEncoding::FixedWord,
            Self::ByteBuffer(_) => MaskEncoding::ByteBuffer,
            Self::OpaqueTag(_) => MaskEncoding::OpaqueTag,
        }
    }

    /// How many processor bits this mask can represent.
    ///
    /// `None` when the mask is an opaque tag, which has no bit capacity.
    #[must_use]
    pub fn bit_capacity(&self) -> Option<u32> {
        match self {
            Self::FixedWord(_) => Some(u64::BITS),
            Self::ByteBuffer(bytes) => {
                // A buffer longer than half a gigabyte is not a plausible affinity structure,
                // so the saturating conversion never loses real information.
                Some(u32::try_from(bytes.len()).unwrap_or(u32::MAX).saturating_mul(8))
            }
            Self::OpaqueTag(_) => None,
        }
    }

    /// Whether `processor` is included in this mask.
    ///
    /// Bit positions beyond the mask's capacity read as not included. `None` when the mask
    /// is an opaque tag, which cannot answer membership questions.
    #[must_use]
    pub fn contains(&self, processor: ProcessorId) -> Option<bool> {
        match self {
            Self::FixedWord(word) => {
                if processor >= u64::BITS {
                    return Some(false);
                }

                Some((word >> processor) & 1 == 1)
            }
            Self::ByteBuffer(bytes) => bytes
                .get((processor >> 3) as usize)
                .map_or(Some(false), |byte| {
                    Some((byte >> (processor & 7)) & 1 == 1)
                }),
            Self::OpaqueTag(_) => None,
        }
    }

    /// Adds `processor` to the mask.
    ///
    /// Fails with [`Error::InvalidMask`] if the bit position is beyond the mask's capacity
    /// or the mask is an opaque tag.
    pub fn include(&mut self, processor: ProcessorId) -> Result<()> {
        match self {
            Self::FixedWord(word) => {
                if processor >= u64::BITS {
                    return Err(Self::out_of_capacity(processor, u64::BITS));
                }

                *word |= 1 << processor;
                Ok(())
            }
            Self::ByteBuffer(bytes) => {
                let capacity = u32::try_from(bytes.len()).unwrap_or(u32::MAX).saturating_mul(8);

                let Some(byte) = bytes.get_mut((processor >> 3) as usize) else {
                    return Err(Self::out_of_capacity(processor, capacity));
                };

                *byte |= 1 << (processor & 7);
                Ok(())
            }
            Self::OpaqueTag(_) => Err(Self::not_a_bitmask()),
        }
    }

    /// Removes `processor` from the mask.
    ///
    /// Fails with [`Error::InvalidMask`] if the bit position is beyond the mask's capacity
    /// or the mask is an opaque tag.
    pub fn exclude(&mut self, processor: ProcessorId) -> Result<()> {
        match self {
            Self::FixedWord(word) => {
                if processor >= u64::BITS {
                    return Err(Self::out_of_capacity(processor, u64::BITS));
                }

                *word &= !(1 << processor);
                Ok(())
            }
            Self::ByteBuffer(bytes) => {
                let capacity = u32::try_from(bytes.len()).unwrap_or(u32::MAX).saturating_mul(8);

                let Some(byte) = bytes.get_mut((processor >> 3) as usize) else {
                    return Err(Self::out_of_capacity(processor, capacity));
                };

                *byte &= !(1 << (processor & 7));
                Ok(())
            }
            Self::OpaqueTag(_) => Err(Self::not_a_bitmask()),
        }
    }

    /// The processors included in this mask, ascending.
    ///
    /// `None` when the mask is an opaque tag, which carries no processor bits.
    #[must_use]
    pub fn processors(&self) -> Option<Vec<ProcessorId>> {
        let capacity = self.bit_capacity()?;

        Some(
            (0..capacity)
                .filter(|processor| self.contains(*processor) == Some(true))
                .collect(),
        )
    }

    fn out_of_capacity(processor: ProcessorId, capacity: u32) -> Error {
        Error::InvalidMask {
            problem: format!(
                "processor {processor} is beyond the {capacity}-bit capacity of the mask"
            ),
        }
    }

    fn not_a_bitmask() -> Error {
        Error::InvalidMask {
            problem: "an opaque affinity tag carries no processor bits".to_string(),
        }
    }
}
