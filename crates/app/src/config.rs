//! Register configuration for the lfsr-lab application.
//!
//! Turns raw command-line text (degree, taps, seed) into a validated
//! `LfsrConfig`, filling in whatever was left out with randomized defaults
//! that are reproducible from the RNG seed.
//!
//! # Philosophy
//!
//! The tool should work with only a subcommand, using intelligent defaults.
//! The RNG seed is always printed so runs are reproducible.

use anyhow::{bail, Context, Result};
use lfsr_lab_core::engine::MAX_DEGREE;
use lfsr_lab_core::error::ConfigError;
use lfsr_lab_core::{random_seed, BitSequence, LfsrConfig, TapConvention};
use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::cli::RegisterArgs;

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Given,
    Random,
}

impl Source {
    fn label(self) -> &'static str {
        match self {
            Source::Given => "given",
            Source::Random => "random",
        }
    }
}

/// A resolved register plus the provenance of its parts.
#[derive(Debug, Clone)]
pub struct Config {
    pub register: LfsrConfig,
    pub rng_seed: u64,
    pub taps_source: Source,
    pub seed_source: Source,
}

impl Config {
    /// Build a register from raw arguments.
    ///
    /// Missing taps keep the register nonsingular and add a random subset of
    /// the other positions; a missing seed is random and non-zero. Raw input
    /// is checked with `LfsrConfig::validate` before anything is built.
    pub fn from_args(args: &RegisterArgs, rng: &mut ChaCha8Rng, rng_seed: u64) -> Result<Self> {
        let degree = args.degree;
        let convention = args.convention;
        if degree == 0 || degree > MAX_DEGREE {
            return Err(ConfigError::InvalidDegree {
                degree,
                max: MAX_DEGREE,
            })
            .context("invalid register description");
        }

        let (taps, taps_source) = match &args.taps {
            Some(text) => (parse_taps(text)?, Source::Given),
            None => (random_taps(degree, convention, rng), Source::Random),
        };
        let (seed, seed_source) = match &args.seed {
            Some(text) => (parse_seed(text, degree)?, Source::Given),
            None => (
                random_seed(degree, rng).context("cannot draw a seed")?,
                Source::Random,
            ),
        };

        LfsrConfig::validate(degree, &taps, seed.len(), convention)
            .context("invalid register description")?;
        let register = LfsrConfig::new(degree, taps, seed, convention)?;
        debug!("resolved register: {register}");

        Ok(Config {
            register,
            rng_seed,
            taps_source,
            seed_source,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Register ===");
        println!("Degree: {}", self.register.degree());
        println!("Convention: {}", self.register.convention());
        println!("Taps: {:?} ({})", self.register.taps(), self.taps_source.label());
        println!("Seed: {} ({})", self.register.seed(), self.seed_source.label());
        println!("Nonsingular: {}", self.register.is_nonsingular());
        println!("RNG seed: {}", self.rng_seed);
        println!();
    }
}

/// Explicit seed, or milliseconds since the epoch.
pub fn resolve_rng_seed(explicit: Option<u64>) -> u64 {
    explicit.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    })
}

/// Parse a tap list separated by commas and/or whitespace.
pub fn parse_taps(text: &str) -> Result<Vec<usize>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .with_context(|| format!("invalid tap '{part}'"))
        })
        .collect()
}

/// Parse a seed for a register of `degree` bits.
///
/// `0b`/`0x` prefixes give an integer word read MSB-first; anything else is a
/// bit string that must be exactly `degree` long.
pub fn parse_seed(text: &str, degree: usize) -> Result<BitSequence> {
    let text = text.trim();
    let word = if let Some(bin) = text.strip_prefix("0b") {
        Some(u64::from_str_radix(bin, 2).with_context(|| format!("invalid binary seed '{text}'"))?)
    } else if let Some(hex) = text.strip_prefix("0x") {
        Some(u64::from_str_radix(hex, 16).with_context(|| format!("invalid hex seed '{text}'"))?)
    } else {
        None
    };

    match word {
        Some(word) => {
            let width = (u64::BITS - word.leading_zeros()) as usize;
            if width > degree {
                bail!("seed {text} needs {width} bits but the register has {degree}");
            }
            Ok(BitSequence::from_word(word, degree))
        }
        None => text
            .parse()
            .with_context(|| format!("invalid seed bits '{text}'")),
    }
}

/// Taps that keep the register nonsingular, plus each other position with
/// probability one half.
fn random_taps(degree: usize, convention: TapConvention, rng: &mut impl Rng) -> Vec<usize> {
    let (min, max) = convention.tap_range(degree);
    let required = match convention {
        TapConvention::ShiftPrepend => vec![max],
        TapConvention::TopFeedback if degree > 1 => vec![degree, 1],
        TapConvention::TopFeedback => vec![1],
    };

    let mut taps = required.clone();
    taps.extend((min..=max).filter(|t| !required.contains(t) && rng.gen_bool(0.5)));
    taps
}
