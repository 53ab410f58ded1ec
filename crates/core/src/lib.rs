//! lfsr-lab-core: Educational LFSR keystreams, polynomial classification and
//! XOR stream encryption
//!
//! This library provides the core components for a learning-focused system that:
//! - Generates bit sequences from Fibonacci-style linear feedback shift registers
//! - Classifies feedback polynomials by the period of the sequence they produce
//! - Encrypts single-byte text by XOR with an LFSR keystream
//! - Demonstrates why that cipher breaks under known plaintext
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `sequence`: Immutable bit sequences shared by every other module
//! - `bitio`: MSB-first bit packing to and from bytes
//! - `engine`: Register configuration, tap conventions and generation
//! - `classifier`: Period detection and polynomial classification
//! - `cipher`: Text/bit conversion and the XOR codec
//! - `synthesis`: Berlekamp-Massey register recovery
//! - `reference`: Textbook polynomials with their claimed classes
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Pure**: No I/O, no logging, no shared mutable state
//! - **Deterministic**: Randomness is injected, never global
//!
//! # Example
//! ```
//! use lfsr_lab_core::{classify, decrypt, encrypt, generate};
//! use lfsr_lab_core::{ClassificationStrategy, LfsrConfig, PolynomialType, TapConvention};
//!
//! // x^4 + x + 1 from seed 0b1001
//! let config = LfsrConfig::from_seed_word(4, vec![4, 1], 0b1001, TapConvention::TopFeedback)?;
//! let sequence = generate(&config, 45)?;
//! let class = classify(&sequence, 4, ClassificationStrategy::ExactPeriod)?;
//! assert_eq!(class.kind, PolynomialType::Primitive);
//! assert_eq!(class.period, 15);
//!
//! let keystream = generate(&config, 16)?;
//! let ciphertext = encrypt("hi", &keystream)?;
//! assert_eq!(decrypt(&ciphertext, &keystream)?, "hi");
//! # Ok::<(), lfsr_lab_core::Error>(())
//! ```

pub mod bitio;
pub mod cipher;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod reference;
pub mod sequence;
pub mod synthesis;

// Re-export commonly used types
pub use cipher::{
    bits_to_text, decrypt, encrypt, encrypt_with_config, recover_keystream, text_to_bits,
    xor_transform, CipherResult,
};
pub use classifier::{
    analysis_length, analyze, analyze_batch, classify, find_period, state_cycle,
    ClassificationStrategy, PolynomialClassification, PolynomialType, StateCycle,
};
pub use engine::{generate, random_seed, Lfsr, LfsrConfig, LfsrState, TapConvention};
pub use error::{Error, Result};
pub use sequence::BitSequence;
pub use synthesis::{berlekamp_massey, LinearRecurrence};
