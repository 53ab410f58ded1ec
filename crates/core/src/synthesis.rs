//! Shortest-LFSR synthesis over GF(2).
//!
//! Berlekamp-Massey finds the shortest linear recurrence
//! `s[n] = c[1]*s[n-1] ^ c[2]*s[n-2] ^ .. ^ c[L]*s[n-L]` that reproduces a
//! bit sequence. `L` is the sequence's linear complexity. For a keystream from
//! a degree-n register, `2n` consecutive bits are enough to recover the
//! feedback exactly, which is why an LFSR keystream falls to a known-plaintext
//! attack.

use crate::engine::{LfsrConfig, TapConvention, MAX_DEGREE};
use crate::error::{ConfigError, Result};
use crate::sequence::BitSequence;

/// Shortest recurrence producing a sequence, with its first `L` bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearRecurrence {
    /// `c[1..=L]`; `connection[j - 1]` is the coefficient of `s[n - j]`
    connection: Vec<bool>,
    /// `s[0..L]`
    initial: BitSequence,
}

impl LinearRecurrence {
    /// Length `L` of the shortest generating register.
    pub fn linear_complexity(&self) -> usize {
        self.connection.len()
    }

    /// Connection polynomial coefficients `c[0..=L]`, with `c[0] = 1`.
    pub fn connection_polynomial(&self) -> Vec<bool> {
        std::iter::once(true)
            .chain(self.connection.iter().copied())
            .collect()
    }

    /// Run the recurrence from its initial bits for `length` outputs.
    pub fn generate(&self, length: usize) -> BitSequence {
        let l = self.connection.len();
        let mut out: Vec<bool> = self.initial.iter().take(length).collect();
        while out.len() < length {
            let n = out.len();
            let next = (1..=l)
                .filter(|&j| self.connection[j - 1])
                .fold(false, |acc, j| acc ^ out[n - j]);
            out.push(next);
        }
        out.into()
    }

    /// Express the recurrence as a `ShiftPrepend` register that emits the
    /// synthesised sequence from its first bit.
    ///
    /// Coefficient `c[j]` becomes state index `j - 1`, and the seed holds the
    /// first `L` bits in reverse (the next output sits at the last index).
    ///
    /// # Errors
    /// `InvalidConfig` when the sequence is all zeros (complexity 0), has
    /// complexity above 64, or the recurrence has no feedback taps.
    pub fn to_config(&self) -> Result<LfsrConfig> {
        let degree = self.connection.len();
        if degree == 0 {
            return Err(ConfigError::InvalidDegree {
                degree,
                max: MAX_DEGREE,
            }
            .into());
        }

        let taps: Vec<usize> = self
            .connection
            .iter()
            .enumerate()
            .filter_map(|(j, &c)| c.then_some(j))
            .collect();
        let mut seed = self.initial.clone().into_vec();
        seed.reverse();

        LfsrConfig::new(degree, taps, seed.into(), TapConvention::ShiftPrepend)
    }
}

/// Synthesise the shortest LFSR generating `sequence`.
///
/// An empty or all-zero sequence has linear complexity 0.
pub fn berlekamp_massey(sequence: &BitSequence) -> LinearRecurrence {
    let s = sequence.as_slice();
    let n = s.len();

    // Current and previous connection polynomials, c[0] = b[0] = 1
    let mut c = vec![false; n + 1];
    let mut b = vec![false; n + 1];
    c[0] = true;
    b[0] = true;

    let mut l = 0usize;
    // Index at which the length last changed
    let mut last_change: Option<usize> = None;

    for i in 0..n {
        let discrepancy = (1..=l).fold(s[i], |d, j| d ^ (c[j] & s[i - j]));
        if !discrepancy {
            continue;
        }

        let shift = match last_change {
            Some(m) => i - m,
            None => i + 1,
        };
        let previous = c.clone();
        for j in 0..=(n - shift) {
            if b[j] {
                c[j + shift] ^= true;
            }
        }

        if 2 * l <= i {
            l = i + 1 - l;
            last_change = Some(i);
            b = previous;
        }
    }

    LinearRecurrence {
        connection: c[1..=l].to_vec(),
        initial: sequence.prefix(l),
    }
}
