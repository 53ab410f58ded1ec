//! Reference feedback polynomials used in the classroom material.
//!
//! Each entry records the class the material *claims* for the polynomial.
//! The claims are not always what the register actually does: several tap
//! lists leave out the output stage, so the register is singular and its
//! sequence has a transient or a short cycle. Surveying these entries is the
//! point of the exercise; the claimed class is never used as ground truth.

use crate::classifier::PolynomialType;
use crate::engine::{LfsrConfig, TapConvention};
use crate::error::Result;
use crate::sequence::BitSequence;

/// One textbook register description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferencePolynomial {
    /// Polynomial as written in the material
    pub notation: &'static str,
    pub degree: usize,
    pub taps: &'static [usize],
    pub convention: TapConvention,
    /// Class the material assigns
    pub claimed: PolynomialType,
}

impl ReferencePolynomial {
    /// Register for this polynomial started from `seed`.
    pub fn config(&self, seed: BitSequence) -> Result<LfsrConfig> {
        LfsrConfig::new(self.degree, self.taps.to_vec(), seed, self.convention)
    }
}

/// The seed the exponent-tap examples are run from.
pub const REFERENCE_SEED: u64 = 0b1001;

const REFERENCE: &[ReferencePolynomial] = &[
    // Exponent taps, analysed from seed 0b1001
    ReferencePolynomial {
        notation: "x^4 + x + 1",
        degree: 4,
        taps: &[4, 1],
        convention: TapConvention::TopFeedback,
        claimed: PolynomialType::Primitive,
    },
    ReferencePolynomial {
        notation: "x^4 + x^2 + 1",
        degree: 4,
        taps: &[4, 2],
        convention: TapConvention::TopFeedback,
        claimed: PolynomialType::IrreducibleNonPrimitive,
    },
    ReferencePolynomial {
        notation: "x^4 + x^3 + x^2 + x + 1",
        degree: 4,
        taps: &[4, 3, 2, 1],
        convention: TapConvention::TopFeedback,
        claimed: PolynomialType::Reducible,
    },
    // Index taps, degree 4
    ReferencePolynomial {
        notation: "x^4 + x + 1",
        degree: 4,
        taps: &[0, 1],
        convention: TapConvention::ShiftPrepend,
        claimed: PolynomialType::Primitive,
    },
    ReferencePolynomial {
        notation: "x^4 + x^2 + 1",
        degree: 4,
        taps: &[0, 2],
        convention: TapConvention::ShiftPrepend,
        claimed: PolynomialType::IrreducibleNonPrimitive,
    },
    ReferencePolynomial {
        notation: "x^4 + x^3 + x^2 + x + 1",
        degree: 4,
        taps: &[0, 1, 2, 3],
        convention: TapConvention::ShiftPrepend,
        claimed: PolynomialType::Reducible,
    },
    // Index taps, degree 5
    ReferencePolynomial {
        notation: "x^5 + x^2 + 1",
        degree: 5,
        taps: &[0, 2],
        convention: TapConvention::ShiftPrepend,
        claimed: PolynomialType::Primitive,
    },
    ReferencePolynomial {
        notation: "x^5 + x + 1",
        degree: 5,
        taps: &[0, 1],
        convention: TapConvention::ShiftPrepend,
        claimed: PolynomialType::IrreducibleNonPrimitive,
    },
    ReferencePolynomial {
        notation: "x^5 + x^3 + 1",
        degree: 5,
        taps: &[0, 3],
        convention: TapConvention::ShiftPrepend,
        claimed: PolynomialType::Reducible,
    },
];

/// All reference polynomials, in presentation order.
pub fn reference_polynomials() -> &'static [ReferencePolynomial] {
    REFERENCE
}
