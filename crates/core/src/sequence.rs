//! Finite, ordered bit sequences.
//!
//! `BitSequence` is the currency of the whole crate: the engine produces one,
//! the classifier inspects one and the cipher XORs two of them together. It
//! is immutable once built; every transform returns a fresh sequence.

use std::fmt;
use std::str::FromStr;

use crate::bitio::{BitReader, BitWriter};
use crate::error::SequenceError;

/// An ordered, finite sequence of bits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitSequence {
    bits: Vec<bool>,
}

impl BitSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unpack bytes MSB-first, eight bits per byte.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        BitReader::new(bytes).collect()
    }

    /// The lowest `width` bits of `word`, most significant first.
    ///
    /// `from_word(0b1001, 4)` is the sequence `1001`. Widths above 64 are
    /// capped at 64.
    pub fn from_word(word: u64, width: usize) -> Self {
        (0..width.min(64)).rev().map(|shift| (word >> shift) & 1 == 1).collect()
    }

    /// Pack into bytes MSB-first; a partial final byte is zero padded.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BitWriter::with_capacity(self.bits.len());
        for &bit in &self.bits {
            writer.write_bit(bit);
        }
        writer.finish()
    }

    /// Read the sequence as an MSB-first integer.
    ///
    /// Returns `None` when the sequence is longer than 64 bits.
    pub fn to_word(&self) -> Option<u64> {
        if self.bits.len() > 64 {
            return None;
        }
        Some(
            self.bits
                .iter()
                .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit)),
        )
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Number of distinct bit values present: 0 for an empty sequence,
    /// 1 for a constant one, 2 otherwise.
    pub fn distinct_values(&self) -> usize {
        let ones = self.count_ones();
        usize::from(ones > 0) + usize::from(ones < self.bits.len())
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// Leading `len` bits (or the whole sequence if shorter).
    pub fn prefix(&self, len: usize) -> BitSequence {
        self.bits[..len.min(self.bits.len())].iter().copied().collect()
    }

    pub fn into_vec(self) -> Vec<bool> {
        self.bits
    }
}

impl From<Vec<bool>> for BitSequence {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl From<&[bool]> for BitSequence {
    fn from(bits: &[bool]) -> Self {
        Self {
            bits: bits.to_vec(),
        }
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a BitSequence {
    type Item = bool;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, bool>>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter().copied()
    }
}

impl IntoIterator for BitSequence {
    type Item = bool;
    type IntoIter = std::vec::IntoIter<bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.into_iter()
    }
}

/// Renders as a string of `0` and `1` characters.
impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Parses a string of `0` and `1` characters. Whitespace is not accepted.
impl FromStr for BitSequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, found)| match found {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(SequenceError::InvalidBit { position, found }),
            })
            .collect()
    }
}
