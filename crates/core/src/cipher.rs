//! XOR stream cipher over LFSR keystreams.
//!
//! Text is encoded one byte per character (big-endian, 8 bits each), so only
//! code points 0..=255 are representable. Encryption and decryption are the
//! same XOR; `decrypt(encrypt(p, k), k) == p` holds for every encodable `p`
//! and every keystream of `8 * len(p)` bits.
//!
//! The cipher is a teaching device. Anyone holding a short stretch of known
//! plaintext can XOR it back out of the ciphertext, recover the keystream
//! and synthesise the register with [`crate::synthesis::berlekamp_massey`].

use crate::engine::{generate, LfsrConfig};
use crate::error::{CodecError, Result};
use crate::sequence::BitSequence;

/// Plaintext, keystream and ciphertext of one encryption, all the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherResult {
    pub plaintext: BitSequence,
    pub keystream: BitSequence,
    pub ciphertext: BitSequence,
}

impl CipherResult {
    /// Ciphertext reinterpreted as single-byte characters.
    pub fn ciphertext_text(&self) -> Result<String> {
        bits_to_text(&self.ciphertext)
    }

    /// Undo the encryption with the stored keystream.
    pub fn decrypt(&self) -> Result<String> {
        decrypt(&self.ciphertext, &self.keystream)
    }
}

/// Encode each character as its 8-bit code, most significant bit first.
///
/// # Errors
/// `Unencodable` for a character above U+00FF, with its character index.
pub fn text_to_bits(text: &str) -> Result<BitSequence> {
    let bytes = text
        .chars()
        .enumerate()
        .map(|(position, ch)| {
            u8::try_from(u32::from(ch)).map_err(|_| CodecError::Unencodable { ch, position })
        })
        .collect::<std::result::Result<Vec<u8>, _>>()?;
    Ok(BitSequence::from_bytes(&bytes))
}

/// Decode groups of 8 bits back into characters.
///
/// # Errors
/// `MalformedBits` if the bit count is not a multiple of 8.
pub fn bits_to_text(bits: &BitSequence) -> Result<String> {
    if bits.len() % 8 != 0 {
        return Err(CodecError::MalformedBits { len: bits.len() }.into());
    }
    Ok(bits.to_bytes().into_iter().map(char::from).collect())
}

/// Bitwise XOR of two sequences of equal length.
///
/// # Errors
/// `LengthMismatch` when the lengths differ; nothing is truncated or padded.
pub fn xor_transform(data: &BitSequence, keystream: &BitSequence) -> Result<BitSequence> {
    if data.len() != keystream.len() {
        return Err(CodecError::LengthMismatch {
            data: data.len(),
            keystream: keystream.len(),
        }
        .into());
    }
    Ok(data.iter().zip(keystream).map(|(d, k)| d ^ k).collect())
}

pub fn encrypt(plaintext: &str, keystream: &BitSequence) -> Result<BitSequence> {
    xor_transform(&text_to_bits(plaintext)?, keystream)
}

pub fn decrypt(ciphertext: &BitSequence, keystream: &BitSequence) -> Result<String> {
    bits_to_text(&xor_transform(ciphertext, keystream)?)
}

/// Encrypt with a fresh keystream of `8 * len(plaintext)` bits from `config`.
pub fn encrypt_with_config(plaintext: &str, config: &LfsrConfig) -> Result<CipherResult> {
    let plaintext = text_to_bits(plaintext)?;
    let keystream = generate(config, plaintext.len())?;
    let ciphertext = xor_transform(&plaintext, &keystream)?;
    Ok(CipherResult {
        plaintext,
        keystream,
        ciphertext,
    })
}

/// Recover the keystream under a known plaintext prefix.
///
/// Returns `8 * len(known_plaintext)` keystream bits.
///
/// # Errors
/// - `Unencodable` if the known plaintext is not single-byte text
/// - `LengthMismatch` if the ciphertext is shorter than the known plaintext
pub fn recover_keystream(known_plaintext: &str, ciphertext: &BitSequence) -> Result<BitSequence> {
    let known = text_to_bits(known_plaintext)?;
    if ciphertext.len() < known.len() {
        return Err(CodecError::LengthMismatch {
            data: known.len(),
            keystream: ciphertext.len(),
        }
        .into());
    }
    xor_transform(&known, &ciphertext.prefix(known.len()))
}
