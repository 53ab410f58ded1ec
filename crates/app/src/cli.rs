use clap::{Args, Parser, Subcommand};
use lfsr_lab_core::{ClassificationStrategy, TapConvention};

#[derive(Parser, Debug)]
#[command(
    name = "lfsr-lab",
    version,
    about = "Educational LFSR keystreams, polynomial classification and stream cipher attacks"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Seed for every random default (time-based when omitted, always printed)
    #[arg(long, global = true)]
    pub rng_seed: Option<u64>,
}

/// Raw register description as typed by the user.
#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    /// Register length in bits
    #[arg(short, long, default_value_t = 4)]
    pub degree: usize,

    /// Tap list such as "0,2" or "4 1"; random when omitted
    #[arg(short, long)]
    pub taps: Option<String>,

    /// Seed bits ("1001") or an integer word ("0b1001", "0x9"); random non-zero when omitted
    #[arg(short, long)]
    pub seed: Option<String>,

    /// How tap numbers address the register: "prepend" (indices) or "top-feedback" (exponents)
    #[arg(long, default_value_t = TapConvention::ShiftPrepend)]
    pub convention: TapConvention,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the output bits of one register run
    Generate {
        #[command(flatten)]
        register: RegisterArgs,

        /// Number of bits to emit
        #[arg(short = 'n', long, default_value_t = 32)]
        length: usize,
    },
    /// Classify a register's feedback polynomial from its output
    Classify {
        #[command(flatten)]
        register: RegisterArgs,

        /// "exact" (period only) or "distinct" (distinct bit values first)
        #[arg(long, default_value_t = ClassificationStrategy::ExactPeriod)]
        strategy: ClassificationStrategy,

        /// Bits to sample (default: 3 * (2^degree - 1))
        #[arg(short = 'n', long)]
        length: Option<usize>,
    },
    /// Classify every built-in reference polynomial and compare with its claimed class
    Survey {
        #[arg(long, default_value_t = ClassificationStrategy::ExactPeriod)]
        strategy: ClassificationStrategy,

        /// Start each register from a random seed instead of 0b1001
        #[arg(long)]
        random_seeds: bool,
    },
    /// XOR single-byte text with a register keystream
    Encrypt {
        #[command(flatten)]
        register: RegisterArgs,

        /// Plaintext (default: a generated sample sentence)
        #[arg(long)]
        text: Option<String>,
    },
    /// Undo `encrypt` given the same register
    Decrypt {
        #[command(flatten)]
        register: RegisterArgs,

        /// Ciphertext bits as printed by `encrypt`
        #[arg(long)]
        ciphertext: String,
    },
    /// Known-plaintext attack: rebuild the register and read the whole message
    Recover {
        /// Ciphertext bits as printed by `encrypt`
        #[arg(long)]
        ciphertext: String,

        /// Plaintext the attacker already knows, aligned with the start of the message
        #[arg(long)]
        known: String,
    },
}
