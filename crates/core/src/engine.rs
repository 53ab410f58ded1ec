//! Fibonacci-style LFSR engine.
//!
//! A register of `degree` bits is held in one machine word. Reading the word
//! MSB-first gives the register as a bit vector, so the seed vector `1001`
//! and the integer seed `0b1001` describe the same register. Every step
//! emits the least significant bit, shifts right by one and ORs the feedback
//! bit (XOR of the tapped positions) back in at the top.
//!
//! # Tap Conventions
//!
//! The two conventions only differ in how a tap number names a register bit
//! and where the feedback lands:
//!
//! | Convention       | Tap range        | Tapped word bit  | Feedback bit    |
//! |------------------|------------------|------------------|-----------------|
//! | `ShiftPrepend`   | `0..degree`      | `degree - 1 - t` | `degree - 1`    |
//! | `TopFeedback`    | `1..=degree`     | `t - 1`          | `max(taps) - 1` |
//!
//! Under `ShiftPrepend` a tap indexes the state vector: index 0 is the bit
//! that was fed back most recently and index `degree - 1` is the next output.
//! Under `TopFeedback` a tap is a polynomial exponent, so `x^4 + x + 1` is
//! the tap list `[4, 1]`. The index taps `[3, 0]` on a degree-4 register
//! produce exactly the same sequence as the exponent taps `[1, 4]`.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{ConfigError, Result};
use crate::sequence::BitSequence;

/// Widest register the engine supports (one `u64` word).
pub const MAX_DEGREE: usize = 64;

/// How tap numbers in an [`LfsrConfig`] address the register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TapConvention {
    /// Taps are state indices in `0..degree`; the feedback bit is prepended
    /// and the last state bit is emitted.
    #[default]
    ShiftPrepend,
    /// Taps are exponents in `1..=degree`; the feedback bit is placed at
    /// position `max(taps) - 1` of the integer state.
    TopFeedback,
}

impl TapConvention {
    /// Inclusive range of tap numbers valid for a register of `degree` bits.
    pub fn tap_range(self, degree: usize) -> (usize, usize) {
        match self {
            TapConvention::ShiftPrepend => (0, degree.saturating_sub(1)),
            TapConvention::TopFeedback => (1, degree),
        }
    }
}

impl fmt::Display for TapConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TapConvention::ShiftPrepend => f.write_str("shift-prepend"),
            TapConvention::TopFeedback => f.write_str("top-feedback"),
        }
    }
}

impl FromStr for TapConvention {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "shift-prepend" | "prepend" | "index" => Ok(TapConvention::ShiftPrepend),
            "top-feedback" | "exponent" => Ok(TapConvention::TopFeedback),
            other => Err(format!("unknown tap convention: {other}")),
        }
    }
}

/// Immutable, validated register parameters.
///
/// Fields are private so every instance has passed [`LfsrConfig::validate`].
/// An all-zero seed is accepted: it is a legitimate (degenerate) register
/// that emits zeros forever.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LfsrConfig {
    degree: usize,
    taps: Vec<usize>,
    seed: BitSequence,
    convention: TapConvention,
}

impl LfsrConfig {
    /// Build a configuration from a seed vector of exactly `degree` bits.
    ///
    /// # Errors
    /// `InvalidConfig` for a degree outside `1..=64`, an empty or duplicated
    /// tap list, a tap outside the convention's range, or a seed of the
    /// wrong width.
    pub fn new(
        degree: usize,
        taps: Vec<usize>,
        seed: BitSequence,
        convention: TapConvention,
    ) -> Result<Self> {
        Self::validate(degree, &taps, seed.len(), convention)?;
        Ok(Self {
            degree,
            taps,
            seed,
            convention,
        })
    }

    /// Build a configuration from an integer seed read MSB-first, so
    /// `0b1001` on a degree-4 register is the seed vector `1001`.
    ///
    /// # Errors
    /// As [`LfsrConfig::new`]; a seed with bits set above `degree` is a
    /// `SeedLengthMismatch`.
    pub fn from_seed_word(
        degree: usize,
        taps: Vec<usize>,
        seed: u64,
        convention: TapConvention,
    ) -> Result<Self> {
        let seed_bits = (u64::BITS - seed.leading_zeros()) as usize;
        if degree <= MAX_DEGREE && seed_bits > degree {
            return Err(ConfigError::SeedLengthMismatch {
                expected: degree,
                actual: seed_bits,
            }
            .into());
        }
        Self::new(degree, taps, BitSequence::from_word(seed, degree), convention)
    }

    /// Pure validation predicate shared by every constructor.
    ///
    /// Callers that collect raw input (the CLI) may run this before building
    /// anything; the constructors run it again regardless.
    pub fn validate(
        degree: usize,
        taps: &[usize],
        seed_len: usize,
        convention: TapConvention,
    ) -> std::result::Result<(), ConfigError> {
        if degree == 0 || degree > MAX_DEGREE {
            return Err(ConfigError::InvalidDegree {
                degree,
                max: MAX_DEGREE,
            });
        }
        if taps.is_empty() {
            return Err(ConfigError::NoTaps);
        }

        let (min, max) = convention.tap_range(degree);
        let mut seen = 0u64;
        for &tap in taps {
            if tap < min || tap > max {
                return Err(ConfigError::TapOutOfRange { tap, min, max });
            }
            let bit = 1u64 << (tap - min);
            if seen & bit != 0 {
                return Err(ConfigError::DuplicateTap { tap });
            }
            seen |= bit;
        }

        if seed_len != degree {
            return Err(ConfigError::SeedLengthMismatch {
                expected: degree,
                actual: seed_len,
            });
        }
        Ok(())
    }

    /// Number of register stages.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Tap positions as given, read under [`Self::convention`].
    pub fn taps(&self) -> &[usize] {
        &self.taps
    }

    /// Starting state, `degree` bits, MSB-first.
    pub fn seed(&self) -> &BitSequence {
        &self.seed
    }

    /// How the tap numbers map onto register bits.
    pub fn convention(&self) -> TapConvention {
        self.convention
    }

    /// Same register, different starting state.
    ///
    /// # Errors
    /// `SeedLengthMismatch` if `seed` is not `degree` bits wide.
    pub fn reseed(&self, seed: BitSequence) -> Result<Self> {
        Self::new(self.degree, self.taps.clone(), seed, self.convention)
    }

    /// Largest period any register of this degree can reach: `2^degree - 1`.
    pub fn max_period(&self) -> u64 {
        max_period_for(self.degree)
    }

    /// True when the state transition is invertible, i.e. the bit about to
    /// be shifted out feeds back and the feedback lands at the top of the
    /// register. Only then is the output purely periodic from the first bit;
    /// otherwise it may start with a transient.
    pub fn is_nonsingular(&self) -> bool {
        self.tap_mask() & 1 == 1 && self.feedback_shift() as usize == self.degree - 1
    }

    /// Word mask selecting the tapped register bits.
    pub(crate) fn tap_mask(&self) -> u64 {
        self.taps.iter().fold(0u64, |mask, &tap| {
            let bit = match self.convention {
                TapConvention::ShiftPrepend => self.degree - 1 - tap,
                TapConvention::TopFeedback => tap - 1,
            };
            mask | (1u64 << bit)
        })
    }

    /// Word bit that receives the feedback.
    pub(crate) fn feedback_shift(&self) -> u32 {
        let top = match self.convention {
            TapConvention::ShiftPrepend => self.degree,
            TapConvention::TopFeedback => self.taps.iter().copied().max().unwrap_or(1),
        };
        (top - 1) as u32
    }

    /// Seed as a register word. Validation guarantees `degree <= 64`.
    pub(crate) fn seed_word(&self) -> u64 {
        self.seed.to_word().unwrap_or(0)
    }
}

impl fmt::Display for LfsrConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "degree={} taps={:?} seed={} ({})",
            self.degree, self.taps, self.seed, self.convention
        )
    }
}

/// `2^degree - 1`, saturating at `u64::MAX` for degree 64. Degree 0 gives 0.
pub fn max_period_for(degree: usize) -> u64 {
    match degree {
        0 => 0,
        d if d >= 64 => u64::MAX,
        d => (1u64 << d) - 1,
    }
}

/// Draw a uniformly random non-zero seed of `degree` bits.
///
/// The randomness source is injected so seeded generators give reproducible
/// registers.
///
/// # Errors
/// `InvalidDegree` for a degree outside `1..=64`.
pub fn random_seed<R: Rng + ?Sized>(degree: usize, rng: &mut R) -> Result<BitSequence> {
    if degree == 0 || degree > MAX_DEGREE {
        return Err(ConfigError::InvalidDegree {
            degree,
            max: MAX_DEGREE,
        }
        .into());
    }
    let word = rng.gen_range(1..=max_period_for(degree));
    Ok(BitSequence::from_word(word, degree))
}

/// Current register contents during one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LfsrState {
    word: u64,
    degree: usize,
}

impl LfsrState {
    /// Register contents as a bit vector (index 0 first).
    pub fn bits(&self) -> BitSequence {
        BitSequence::from_word(self.word, self.degree)
    }

    pub fn word(&self) -> u64 {
        self.word
    }

    pub fn is_zero(&self) -> bool {
        self.word == 0
    }
}

/// One register run: yields the output bit of every step, forever.
///
/// The register owns its state exclusively; cloning forks the run.
#[derive(Debug, Clone)]
pub struct Lfsr {
    state: LfsrState,
    tap_mask: u64,
    feedback_shift: u32,
}

impl Lfsr {
    /// Start a run from the configuration's seed.
    pub fn new(config: &LfsrConfig) -> Self {
        Self {
            state: LfsrState {
                word: config.seed_word(),
                degree: config.degree(),
            },
            tap_mask: config.tap_mask(),
            feedback_shift: config.feedback_shift(),
        }
    }

    pub fn state(&self) -> LfsrState {
        self.state
    }

    /// Advance one step and return the emitted bit.
    pub fn step(&mut self) -> bool {
        let out = self.state.word & 1 == 1;
        self.state.word = self.successor(self.state.word);
        out
    }

    /// State that follows `word` (no output).
    pub(crate) fn successor(&self, word: u64) -> u64 {
        let feedback = u64::from((word & self.tap_mask).count_ones() & 1);
        (word >> 1) | (feedback << self.feedback_shift)
    }
}

impl Iterator for Lfsr {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        Some(self.step())
    }
}

/// Generate exactly `length` output bits from a fresh run of `config`.
///
/// Deterministic: equal inputs always give equal sequences.
///
/// # Errors
/// `InvalidConfig` if the configuration no longer passes validation.
pub fn generate(config: &LfsrConfig, length: usize) -> Result<BitSequence> {
    LfsrConfig::validate(
        config.degree(),
        config.taps(),
        config.seed().len(),
        config.convention(),
    )?;
    Ok(Lfsr::new(config).take(length).collect())
}
