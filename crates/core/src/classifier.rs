//! Feedback polynomial classification by period detection.
//!
//! A degree-n register can cycle through at most `2^n - 1` non-zero states,
//! so its output can repeat no slower than that. Reaching the bound means the
//! feedback polynomial is primitive; a period of 1 means the register has
//! collapsed onto a constant.
//!
//! # Strategies
//!
//! - `ExactPeriod`: compare the measured period with `2^n - 1` (primitive),
//!   1 (reducible), anything else (irreducible, non-primitive).
//! - `DistinctValues`: a sequence showing a single bit value is reducible;
//!   with both values it is primitive when the measured period is `2^n - 1`
//!   and irreducible non-primitive otherwise.
//!
//! On register output the two rules agree except for constant sequences at
//! degree 1, where `2^1 - 1 = 1` makes the exact rule call them primitive.
//!
//! # Period Search
//!
//! The search is exact: every candidate `p = 1, 2, ..` below the sequence
//! length is tested against every bit, and a sequence that never repeats
//! reports its own length. Cost is `O(len^2)` in the worst case; on register
//! output a wrong candidate usually fails within a few bits.
//!
//! A singular register can wander for up to `degree` steps before it settles
//! onto its cycle, so [`classify`] drops the first `degree` bits and measures
//! the rest. A settled window of `3 * (2^n - 1) - n` bits is long enough to
//! see every period up to `2^n - 1` repeat.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;

use crate::engine::{self, max_period_for, Lfsr, LfsrConfig, MAX_DEGREE};
use crate::error::{ConfigError, Result, SequenceError};
use crate::sequence::BitSequence;

/// Largest degree [`analyze`] will generate a window for
/// (`3 * (2^24 - 1)` bits is about 50 million).
pub const MAX_ANALYSIS_DEGREE: usize = 24;

/// Polynomial class inferred from the output sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolynomialType {
    /// Maximum-length sequence
    Primitive,
    /// Repeats, but faster than the maximum
    IrreducibleNonPrimitive,
    /// Degenerate sequence
    Reducible,
}

impl fmt::Display for PolynomialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolynomialType::Primitive => f.write_str("Primitive"),
            PolynomialType::IrreducibleNonPrimitive => f.write_str("Irreducible (non-primitive)"),
            PolynomialType::Reducible => f.write_str("Reducible"),
        }
    }
}

/// Classification rule, see the module docs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClassificationStrategy {
    #[default]
    ExactPeriod,
    DistinctValues,
}

impl fmt::Display for ClassificationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationStrategy::ExactPeriod => f.write_str("exact"),
            ClassificationStrategy::DistinctValues => f.write_str("distinct"),
        }
    }
}

impl FromStr for ClassificationStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "exact" | "exact-period" => Ok(ClassificationStrategy::ExactPeriod),
            "distinct" | "distinct-values" => Ok(ClassificationStrategy::DistinctValues),
            other => Err(format!("unknown classification strategy: {other}")),
        }
    }
}

/// Result of classifying one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolynomialClassification {
    pub kind: PolynomialType,
    /// Measured period of the sequence
    pub period: usize,
    /// `2^degree - 1`
    pub max_possible_period: u64,
}

impl PolynomialClassification {
    pub fn is_primitive(&self) -> bool {
        self.kind == PolynomialType::Primitive
    }
}

/// Transient and cycle of a register's state sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateCycle {
    /// Steps before the state first enters its cycle (0 when the seed is on it)
    pub tail: u64,
    /// Number of distinct states on the cycle
    pub period: u64,
}

/// Smallest `p` such that `sequence[i] == sequence[i mod p]` for every `i`.
///
/// A sequence that never repeats reports `len`.
///
/// # Errors
/// `InvalidSequence` if the sequence is empty.
pub fn find_period(sequence: &BitSequence) -> Result<usize> {
    let bits = sequence.as_slice();
    if bits.is_empty() {
        return Err(SequenceError::Empty.into());
    }

    // bits[i] == bits[i - p] for all i >= p is the same as bits[i] == bits[i mod p]
    let period = (1..bits.len())
        .find(|&p| bits[p..].iter().zip(bits).all(|(a, b)| a == b))
        .unwrap_or(bits.len());
    Ok(period)
}

/// Classify a sequence produced by a register of `degree` bits.
///
/// The first `degree` bits are treated as a possible transient and skipped
/// when the sequence is longer than that.
///
/// # Errors
/// - `InvalidSequence` if the sequence is empty
/// - `InvalidConfig` if `degree` is outside `1..=64`
pub fn classify(
    sequence: &BitSequence,
    degree: usize,
    strategy: ClassificationStrategy,
) -> Result<PolynomialClassification> {
    if sequence.is_empty() {
        return Err(SequenceError::Empty.into());
    }
    if degree == 0 || degree > MAX_DEGREE {
        return Err(ConfigError::InvalidDegree {
            degree,
            max: MAX_DEGREE,
        }
        .into());
    }

    let skip = if sequence.len() > degree { degree } else { 0 };
    let settled = BitSequence::from(&sequence.as_slice()[skip..]);
    let period = find_period(&settled)?;
    let max_possible_period = max_period_for(degree);
    let reaches_max = period as u64 == max_possible_period;

    let kind = match strategy {
        ClassificationStrategy::ExactPeriod => {
            if reaches_max {
                PolynomialType::Primitive
            } else if period == 1 {
                PolynomialType::Reducible
            } else {
                PolynomialType::IrreducibleNonPrimitive
            }
        }
        ClassificationStrategy::DistinctValues => match settled.distinct_values() {
            2 if reaches_max => PolynomialType::Primitive,
            2 => PolynomialType::IrreducibleNonPrimitive,
            _ => PolynomialType::Reducible,
        },
    };

    Ok(PolynomialClassification {
        kind,
        period,
        max_possible_period,
    })
}

/// Window length the analyzers generate: `3 * (2^degree - 1)` bits.
///
/// # Errors
/// `InvalidConfig` for a degree outside `1..=24`.
pub fn analysis_length(degree: usize) -> Result<usize> {
    if degree == 0 || degree > MAX_ANALYSIS_DEGREE {
        return Err(ConfigError::InvalidDegree {
            degree,
            max: MAX_ANALYSIS_DEGREE,
        }
        .into());
    }
    Ok(3 * ((1usize << degree) - 1))
}

/// Generate an analysis window for `config` and classify it.
pub fn analyze(
    config: &LfsrConfig,
    strategy: ClassificationStrategy,
) -> Result<PolynomialClassification> {
    let length = analysis_length(config.degree())?;
    let sequence = engine::generate(config, length)?;
    classify(&sequence, config.degree(), strategy)
}

/// Analyze many registers in parallel. Results keep the input order.
pub fn analyze_batch(
    configs: &[LfsrConfig],
    strategy: ClassificationStrategy,
) -> Vec<Result<PolynomialClassification>> {
    configs
        .par_iter()
        .map(|config| analyze(config, strategy))
        .collect()
}

/// Derive the state cycle of a register without sampling a window.
///
/// Walks the state transition with Brent's cycle detection, so memory stays
/// constant. Runtime is proportional to `tail + period`, at most `2^degree`
/// steps. The output sequence's eventual period always divides the state
/// period.
///
/// # Errors
/// `InvalidConfig` for a degree above 24, where the walk could take `2^64`
/// steps.
pub fn state_cycle(config: &LfsrConfig) -> Result<StateCycle> {
    if config.degree() > MAX_ANALYSIS_DEGREE {
        return Err(ConfigError::InvalidDegree {
            degree: config.degree(),
            max: MAX_ANALYSIS_DEGREE,
        }
        .into());
    }

    let lfsr = Lfsr::new(config);
    let start = lfsr.state().word();

    let mut power = 1u64;
    let mut period = 1u64;
    let mut tortoise = start;
    let mut hare = lfsr.successor(start);
    while tortoise != hare {
        if power == period {
            tortoise = hare;
            power *= 2;
            period = 0;
        }
        hare = lfsr.successor(hare);
        period += 1;
    }

    let mut tortoise = start;
    let mut hare = start;
    for _ in 0..period {
        hare = lfsr.successor(hare);
    }
    let mut tail = 0u64;
    while tortoise != hare {
        tortoise = lfsr.successor(tortoise);
        hare = lfsr.successor(hare);
        tail += 1;
    }

    Ok(StateCycle { tail, period })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TapConvention;
    use crate::error::Error;

    fn bits(s: &str) -> BitSequence {
        s.parse().unwrap()
    }

    fn top(taps: Vec<usize>, seed: u64) -> LfsrConfig {
        LfsrConfig::from_seed_word(4, taps, seed, TapConvention::TopFeedback).unwrap()
    }

    #[test]
    fn test_find_period_basic() {
        assert_eq!(find_period(&bits("0000")).unwrap(), 1);
        assert_eq!(find_period(&bits("010101")).unwrap(), 2);
        assert_eq!(find_period(&bits("110110110")).unwrap(), 3);
        assert_eq!(find_period(&bits("1")).unwrap(), 1);
    }

    #[test]
    fn test_find_period_partial_final_cycle() {
        // "110" repeated with a truncated tail still has period 3
        assert_eq!(find_period(&bits("11011011")).unwrap(), 3);
    }

    #[test]
    fn test_find_period_aperiodic_reports_length() {
        assert_eq!(find_period(&bits("0001")).unwrap(), 4);
        assert_eq!(find_period(&bits("10")).unwrap(), 2);
    }

    #[test]
    fn test_find_period_beyond_half_length() {
        // Only the final bit repeats the first, with p = 3
        assert_eq!(find_period(&bits("1001")).unwrap(), 3);
        assert_eq!(find_period(&bits("01100")).unwrap(), 4);
    }

    #[test]
    fn test_find_period_empty() {
        assert_eq!(
            find_period(&BitSequence::new()),
            Err(Error::InvalidSequence(SequenceError::Empty))
        );
    }

    #[test]
    fn test_exact_period_rule() {
        let seq = engine::generate(&top(vec![4, 1], 0b1001), 45).unwrap();
        let c = classify(&seq, 4, ClassificationStrategy::ExactPeriod).unwrap();
        assert_eq!(c.kind, PolynomialType::Primitive);
        assert_eq!(c.period, 15);
        assert_eq!(c.max_possible_period, 15);

        let seq = engine::generate(&top(vec![4, 2], 0b1001), 45).unwrap();
        let c = classify(&seq, 4, ClassificationStrategy::ExactPeriod).unwrap();
        assert_eq!(c.kind, PolynomialType::IrreducibleNonPrimitive);
        assert_eq!(c.period, 7);

        let c = classify(&bits("0000000"), 4, ClassificationStrategy::ExactPeriod).unwrap();
        assert_eq!(c.kind, PolynomialType::Reducible);
        assert_eq!(c.period, 1);
    }

    #[test]
    fn test_distinct_values_rule() {
        let strategy = ClassificationStrategy::DistinctValues;

        let seq = engine::generate(&top(vec![4, 1], 0b1001), 45).unwrap();
        assert_eq!(classify(&seq, 4, strategy).unwrap().kind, PolynomialType::Primitive);

        let seq = engine::generate(&top(vec![4, 3, 2, 1], 0b1001), 45).unwrap();
        let c = classify(&seq, 4, strategy).unwrap();
        assert_eq!(c.kind, PolynomialType::IrreducibleNonPrimitive);
        assert_eq!(c.period, 5);

        // A single distinct value is reducible under this rule
        let c = classify(&bits("1111"), 4, strategy).unwrap();
        assert_eq!(c.kind, PolynomialType::Reducible);
    }

    #[test]
    fn test_strategies_differ_on_degree_one() {
        let seq = bits("111");
        let exact = classify(&seq, 1, ClassificationStrategy::ExactPeriod).unwrap();
        let distinct = classify(&seq, 1, ClassificationStrategy::DistinctValues).unwrap();
        assert_eq!(exact.kind, PolynomialType::Primitive);
        assert_eq!(distinct.kind, PolynomialType::Reducible);
    }

    #[test]
    fn test_classify_rejects_bad_input() {
        assert!(matches!(
            classify(&BitSequence::new(), 4, ClassificationStrategy::ExactPeriod),
            Err(Error::InvalidSequence(SequenceError::Empty))
        ));
        assert!(matches!(
            classify(&bits("01"), 0, ClassificationStrategy::ExactPeriod),
            Err(Error::InvalidConfig(ConfigError::InvalidDegree { degree: 0, .. }))
        ));
    }

    #[test]
    fn test_analysis_length() {
        assert_eq!(analysis_length(4).unwrap(), 45);
        assert_eq!(analysis_length(5).unwrap(), 93);
        assert!(analysis_length(0).is_err());
        assert!(analysis_length(MAX_ANALYSIS_DEGREE + 1).is_err());
    }

    #[test]
    fn test_analyze_degree_five_index_taps() {
        let prepend = |taps: Vec<usize>| {
            LfsrConfig::new(5, taps, bits("10011"), TapConvention::ShiftPrepend).unwrap()
        };
        let strategy = ClassificationStrategy::ExactPeriod;

        // Tapping the output stage makes x^5 + x^2 + 1 maximal
        let c = analyze(&prepend(vec![4, 2]), strategy).unwrap();
        assert_eq!(c.kind, PolynomialType::Primitive);
        assert_eq!(c.period, 31);

        // Index 3 plus index 0 splits into a period-15 cycle
        let c = analyze(&prepend(vec![0, 3]), strategy).unwrap();
        assert_eq!(c.period, 15);
        assert_eq!(c.kind, PolynomialType::IrreducibleNonPrimitive);
    }

    #[test]
    fn test_analyze_batch_keeps_order() {
        let configs = vec![
            top(vec![4, 1], 0b1001),
            top(vec![4, 2], 0b1001),
            top(vec![4, 3, 2, 1], 0b1001),
            top(vec![4, 1], 0),
        ];
        let results = analyze_batch(&configs, ClassificationStrategy::ExactPeriod);
        let periods: Vec<usize> = results.iter().map(|r| r.as_ref().unwrap().period).collect();
        assert_eq!(periods, vec![15, 7, 5, 1]);
        assert_eq!(results[3].as_ref().unwrap().kind, PolynomialType::Reducible);
    }

    #[test]
    fn test_state_cycle_primitive() {
        let cycle = state_cycle(&top(vec![4, 1], 0b1001)).unwrap();
        assert_eq!(cycle, StateCycle { tail: 0, period: 15 });
    }

    #[test]
    fn test_state_cycle_zero_seed() {
        let cycle = state_cycle(&top(vec![4, 1], 0)).unwrap();
        assert_eq!(cycle, StateCycle { tail: 0, period: 1 });
    }

    #[test]
    fn test_state_cycle_with_transient() {
        // Feedback from index 0 only: the register fills with copies of its
        // newest bit, reaching a fixed point after three steps
        let config =
            LfsrConfig::new(4, vec![0], bits("1001"), TapConvention::ShiftPrepend).unwrap();
        let cycle = state_cycle(&config).unwrap();
        assert_eq!(cycle, StateCycle { tail: 3, period: 1 });
    }

    #[test]
    fn test_transient_is_skipped_before_measuring() {
        // Output 1001 then zeros forever: the fixed point, not the window, sets the period
        let config =
            LfsrConfig::new(4, vec![0], bits("1001"), TapConvention::ShiftPrepend).unwrap();
        for strategy in [
            ClassificationStrategy::ExactPeriod,
            ClassificationStrategy::DistinctValues,
        ] {
            let c = analyze(&config, strategy).unwrap();
            assert_eq!(c.period, 1);
            assert_eq!(c.kind, PolynomialType::Reducible);
        }

        // Tail of two states, then a 3-cycle
        let config =
            LfsrConfig::new(4, vec![0, 1], bits("1001"), TapConvention::ShiftPrepend).unwrap();
        let c = analyze(&config, ClassificationStrategy::ExactPeriod).unwrap();
        assert_eq!(c.period, 3);
        assert!(c.period as u64 <= c.max_possible_period);
        assert_eq!(state_cycle(&config).unwrap(), StateCycle { tail: 2, period: 3 });
    }

    #[test]
    fn test_short_sequence_is_not_trimmed() {
        let c = classify(&bits("1001"), 4, ClassificationStrategy::ExactPeriod).unwrap();
        assert_eq!(c.period, 3);
    }

    #[test]
    fn test_state_cycle_rejects_wide_register() {
        let config =
            LfsrConfig::from_seed_word(48, vec![48, 1], 1, TapConvention::TopFeedback).unwrap();
        assert!(matches!(
            state_cycle(&config),
            Err(Error::InvalidConfig(ConfigError::InvalidDegree { degree: 48, max: 24 }))
        ));
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("exact".parse(), Ok(ClassificationStrategy::ExactPeriod));
        assert_eq!("distinct".parse(), Ok(ClassificationStrategy::DistinctValues));
        assert!("fuzzy".parse::<ClassificationStrategy>().is_err());
    }
}
