//! Bit-level I/O for packing bit sequences into bytes and back.
//!
//! BitWriter and BitReader both operate MSB-first (most significant bit
//! first), which is the order the cipher uses for its 8-bit character codes:
//! the character `'A'` (65) becomes the bits `01000001`.
//!
//! # Padding Rules
//! - BitWriter: pads an incomplete final byte with trailing zeros
//! - BitReader: yields every bit of its buffer (caller tracks the exact count)
//!
//! # Example
//! ```
//! use lfsr_lab_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::with_capacity(4);
//! for bit in [true, false, true, true] {
//!     writer.write_bit(bit);
//! }
//! // Total: 1011 -> padded to 10110000
//!
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b1011_0000]);
//!
//! let bits: Vec<bool> = BitReader::new(&bytes).take(4).collect();
//! assert_eq!(bits, vec![true, false, true, true]);
//! ```

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8 between calls
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a writer that expects roughly `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Finish writing and return the output bytes.
    ///
    /// A trailing partial byte is kept, padded with zeros.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }
}

/// Iterates the bits of a byte buffer, MSB-first.
///
/// Padding bits at the end of the buffer are indistinguishable from data.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Source data
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte), never past `data.len() * 8`
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.bit_position / 8)?;
        let bit = (byte >> (7 - self.bit_position % 8)) & 1 == 1;
        self.bit_position += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.len() * 8 - self.bit_position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitReader<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_all(bits: &[bool]) -> Vec<u8> {
        let mut writer = BitWriter::with_capacity(bits.len());
        for &bit in bits {
            writer.write_bit(bit);
        }
        writer.finish()
    }

    #[test]
    fn test_padding() {
        assert_eq!(write_all(&[true]), vec![0b1000_0000]);
        assert!(write_all(&[]).is_empty());
    }

    #[test]
    fn test_bit_by_bit() {
        let bits = [true, false, true, true, false, false, true, false];
        let bytes = write_all(&bits);
        assert_eq!(bytes, vec![0b1011_0010]);

        let read: Vec<bool> = BitReader::new(&bytes).collect();
        assert_eq!(read, bits);
    }

    #[test]
    fn test_spans_byte_boundary() {
        // 0 1 1111111 1 -> 01111111 11000000
        let mut bits = vec![false];
        bits.extend([true; 9]);
        assert_eq!(write_all(&bits), vec![0b0111_1111, 0b1100_0000]);
    }

    #[test]
    fn test_reader_yields_padding_and_stops() {
        let data = [0b1010_1010, 0x01];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.len(), 16);
        let first: Vec<bool> = reader.by_ref().take(8).collect();
        assert_eq!(first, vec![true, false, true, false, true, false, true, false]);
        assert_eq!(reader.len(), 8);
        assert_eq!(reader.by_ref().filter(|&b| b).count(), 1);
        assert_eq!(reader.next(), None);
        assert_eq!(reader.len(), 0);
    }
}
