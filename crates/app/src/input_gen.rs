//! Sample plaintext generation.
//!
//! When `encrypt` gets no `--text`, we make up a short sentence. Every
//! sample starts with the same greeting, which gives the `recover` demo a
//! known plaintext prefix to attack with.

use rand::Rng;

/// Prefix every generated sample starts with.
pub const KNOWN_PREFIX: &str = "Dear Bob, ";

const SUBJECTS: &[&str] = &["the courier", "our agent", "the fleet", "the key", "Alice"];
const VERBS: &[&str] = &["leaves", "arrives", "waits", "reports", "moves"];
const PLACES: &[&str] = &[
    "at the harbour",
    "behind the station",
    "by the old mill",
    "near the bridge",
    "in the square",
];
const TIMES: &[&str] = &["at dawn", "at noon", "tonight", "on Friday", "after the rain"];

/// Generate a sample message, deterministic for a given RNG state.
///
/// Output is plain ASCII and always starts with [`KNOWN_PREFIX`].
pub fn generate_sample_text<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut pick = |words: &[&'static str]| words[rng.gen_range(0..words.len())];
    let subject = pick(SUBJECTS);
    let verb = pick(VERBS);
    let place = pick(PLACES);
    let time = pick(TIMES);
    format!("{KNOWN_PREFIX}{subject} {verb} {place} {time}.")
}
