//! Human-readable output for each subcommand.
//!
//! Everything here goes to stdout; logs stay on stderr.

use lfsr_lab_core::reference::ReferencePolynomial;
use lfsr_lab_core::{
    BitSequence, CipherResult, ClassificationStrategy, LfsrConfig, LinearRecurrence,
    PolynomialClassification, StateCycle,
};

/// Bits shown per line when printing long sequences.
const LINE_WIDTH: usize = 64;

/// One row of the reference survey.
#[derive(Debug, Clone)]
pub struct SurveyRow {
    pub polynomial: ReferencePolynomial,
    pub seed: BitSequence,
    pub outcome: Result<PolynomialClassification, String>,
}

impl SurveyRow {
    /// True when the measured class matches the claimed one.
    pub fn agrees(&self) -> bool {
        matches!(&self.outcome, Ok(c) if c.kind == self.polynomial.claimed)
    }
}

pub fn print_sequence(title: &str, bits: &BitSequence) {
    println!("=== {title} ===");
    println!("Length: {} bits ({} ones)", bits.len(), bits.count_ones());
    let text = bits.to_string();
    for line in text.as_bytes().chunks(LINE_WIDTH) {
        println!("{}", String::from_utf8_lossy(line));
    }
    println!();
}

pub fn print_classification(
    strategy: ClassificationStrategy,
    class: &PolynomialClassification,
    cycle: Option<&StateCycle>,
) {
    println!("=== Classification ({strategy}) ===");
    println!("Type: {}", class.kind);
    println!(
        "Measured period: {} of max {}",
        class.period, class.max_possible_period
    );
    match cycle {
        Some(cycle) => {
            println!("State cycle: {} (after {} transient steps)", cycle.period, cycle.tail);
            if cycle.tail > 0 {
                println!("Note: register is singular, output has a transient before it repeats");
            }
        }
        None => println!("State cycle: not computed for this degree"),
    }
    println!();
}

pub fn print_survey(strategy: ClassificationStrategy, rows: &[SurveyRow]) {
    println!("=== Reference Survey ({strategy}) ===");
    println!(
        "{:<26} {:<14} {:<14} {:<8} {:<28} {:<28} {:>6}",
        "Polynomial", "Convention", "Taps", "Seed", "Claimed", "Measured", "Period"
    );
    for row in rows {
        let p = &row.polynomial;
        let taps = format!("{:?}", p.taps);
        let (measured, period) = match &row.outcome {
            Ok(c) => (c.kind.to_string(), c.period.to_string()),
            Err(e) => (format!("error: {e}"), "-".to_string()),
        };
        let mark = if row.agrees() { "✓" } else { "✗" };
        println!(
            "{:<26} {:<14} {:<14} {:<8} {:<28} {:<28} {:>6} {mark}",
            p.notation,
            p.convention.to_string(),
            taps,
            row.seed.to_string(),
            p.claimed.to_string(),
            measured,
            period
        );
    }

    let agreeing = rows.iter().filter(|r| r.agrees()).count();
    println!();
    println!("Claims confirmed: {agreeing}/{}", rows.len());
    println!();
}

pub fn print_cipher(result: &CipherResult) {
    println!("=== Encryption ===");
    println!("Plaintext bits:  {} bits", result.plaintext.len());
    println!("Keystream:       {}", preview(&result.keystream));
    println!();
    print_sequence("Ciphertext", &result.ciphertext);
}

pub fn print_plaintext(text: &str) {
    println!("=== Plaintext ===");
    println!("{text}");
    println!();
}

pub fn print_recovery(recurrence: &LinearRecurrence, config: &LfsrConfig, known_bits: usize) {
    println!("=== Known-Plaintext Attack ===");
    println!("Known keystream bits: {known_bits}");
    println!("Linear complexity: {}", recurrence.linear_complexity());
    let polynomial: String = recurrence
        .connection_polynomial()
        .iter()
        .map(|&c| if c { '1' } else { '0' })
        .collect();
    println!("Connection polynomial (c0..cL): {polynomial}");
    println!("Recovered register: {config}");
    if 2 * recurrence.linear_complexity() > known_bits {
        println!("✗ Not enough known plaintext to pin the register down; result may be wrong");
    } else {
        println!("✓ Register determined by the known keystream");
    }
    println!();
}

/// First bits of a sequence, with an ellipsis when longer.
fn preview(bits: &BitSequence) -> String {
    if bits.len() <= LINE_WIDTH {
        bits.to_string()
    } else {
        format!("{}...", bits.prefix(LINE_WIDTH))
    }
}
