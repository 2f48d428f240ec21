//! Flat program images handed to a processing unit.

use thiserror::Error;

use crate::memory::{DataUnit, DATA_UNIT_BYTES};

/// Rejection reasons for a program image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The image holds no words.
    #[error("program image is empty")]
    Empty,
    /// The image length is not a whole number of words.
    #[error("program image length {len} is not a multiple of 4 bytes")]
    MisalignedLength {
        /// Image length in bytes.
        len: usize,
    },
    /// The entry offset does not start a word.
    #[error("entry offset {offset} is not a multiple of 4 bytes")]
    MisalignedEntry {
        /// Entry offset in bytes.
        offset: u64,
    },
    /// The entry word lies outside the image.
    #[error("entry word {entry} is outside the {len}-word image")]
    EntryOutOfRange {
        /// Entry word index.
        entry: u64,
        /// Image length in words.
        len: u64,
    },
}

/// Relocated instruction and data image plus its entry word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    words: Vec<DataUnit>,
    entry: u64,
}

impl Program {
    /// Builds a program from a little-endian byte image and an entry offset
    /// in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the image is empty, either value is not
    /// word aligned, or the entry lies outside the image.
    pub fn from_image(bytes: &[u8], entry_offset: u64) -> Result<Self, LoadError> {
        let word_bytes = 4;
        if bytes.is_empty() {
            return Err(LoadError::Empty);
        }
        if bytes.len() % word_bytes != 0 {
            return Err(LoadError::MisalignedLength { len: bytes.len() });
        }
        if entry_offset % DATA_UNIT_BYTES != 0 {
            return Err(LoadError::MisalignedEntry {
                offset: entry_offset,
            });
        }
        let words = bytes
            .chunks_exact(word_bytes)
            .map(|chunk| DataUnit::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Self::from_words(words, entry_offset / DATA_UNIT_BYTES)
    }

    /// Builds a program from words that are already in memory order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Empty`] or [`LoadError::EntryOutOfRange`].
    pub fn from_words(words: Vec<DataUnit>, entry: u64) -> Result<Self, LoadError> {
        if words.is_empty() {
            return Err(LoadError::Empty);
        }
        let len = words.len() as u64;
        if entry >= len {
            return Err(LoadError::EntryOutOfRange { entry, len });
        }
        Ok(Self { words, entry })
    }

    /// Image words.
    #[must_use]
    pub fn words(&self) -> &[DataUnit] {
        &self.words
    }

    /// Image length in words.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.words.len() as u64
    }

    /// Always `false`; empty images are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Entry word index.
    #[must_use]
    pub const fn entry(&self) -> u64 {
        self.entry
    }

    /// Byte address one past the last image word.
    #[must_use]
    pub fn end_address(&self) -> u64 {
        self.len() * DATA_UNIT_BYTES
    }
}

// Stack round trip through a branch ladder; returns with w0 = 5.
const BRANCH_LADDER: [DataUnit; 16] = [
    0xD100_43FF, 0x5280_00A0, 0xB900_0FE0, 0xB940_0FE0, 0x7100_0C1F, 0x5400_0061, 0x5280_0060,
    0x1400_0007, 0xB940_0FE0, 0x7100_141F, 0x5400_0061, 0x5280_00A0, 0x1400_0002, 0x5280_0000,
    0x9100_43FF, 0xD65F_03C0,
];

// Sums 10 down to 1; returns with w0 = 55.
const COUNTDOWN_SUM: [DataUnit; 6] = [
    0x5280_0000, 0x5280_0141, 0x0B01_0000, 0x7100_0421, 0x54FF_FFC1, 0xD65F_03C0,
];

/// Number of bundled sample programs.
pub const SAMPLE_PROGRAM_COUNT: usize = 2;

/// Returns a bundled sample program, entry at word 0.
///
/// Index 0 stores 5 on the stack, reloads it through two compare-and-branch
/// ladders and returns with `X0 = 5`. Index 1 loops ten times and returns
/// with `X0 = 55`.
#[must_use]
pub fn sample_program(index: usize) -> Option<Program> {
    let words: &[DataUnit] = match index {
        0 => &BRANCH_LADDER,
        1 => &COUNTDOWN_SUM,
        _ => return None,
    };
    Some(Program {
        words: words.to_vec(),
        entry: 0,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{sample_program, LoadError, Program, SAMPLE_PROGRAM_COUNT};

    #[test]
    fn byte_images_become_little_endian_words() {
        let program =
            Program::from_image(&[0x1F, 0x20, 0x03, 0xD5, 0xC0, 0x03, 0x5F, 0xD6], 4).expect("valid");
        assert_eq!(program.words(), &[0xD503_201F, 0xD65F_03C0]);
        assert_eq!(program.entry(), 1);
        assert_eq!(program.len(), 2);
        assert_eq!(program.end_address(), 8);
    }

    #[rstest]
    #[case(&[], 0, LoadError::Empty)]
    #[case(&[0; 6], 0, LoadError::MisalignedLength { len: 6 })]
    #[case(&[0; 8], 2, LoadError::MisalignedEntry { offset: 2 })]
    #[case(&[0; 8], 8, LoadError::EntryOutOfRange { entry: 2, len: 2 })]
    fn malformed_images_are_rejected(
        #[case] bytes: &[u8],
        #[case] entry: u64,
        #[case] expected: LoadError,
    ) {
        assert_eq!(Program::from_image(bytes, entry), Err(expected));
    }

    #[test]
    fn samples_are_bundled() {
        for index in 0..SAMPLE_PROGRAM_COUNT {
            let program = sample_program(index).expect("bundled sample");
            assert!(!program.is_empty());
            assert_eq!(program.entry(), 0);
        }
        assert_eq!(sample_program(0).map(|p| p.len()), Some(16));
        assert!(sample_program(SAMPLE_PROGRAM_COUNT).is_none());
    }
}
