//! lfsr-lab: command-line front end for the LFSR lab.
//!
//! Generates keystreams, classifies feedback polynomials, surveys the
//! reference table and runs the XOR stream cipher together with the
//! known-plaintext attack that breaks it.

mod cli;
mod config;
mod input_gen;
mod report;

use anyhow::{bail, Context, Result};
use clap::Parser;
use lfsr_lab_core::reference::{reference_polynomials, REFERENCE_SEED};
use lfsr_lab_core::{
    analysis_length, analyze_batch, berlekamp_massey, classify, decrypt, encrypt_with_config,
    generate, random_seed, recover_keystream, state_cycle, BitSequence, ClassificationStrategy,
};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cli::{Cli, Command, RegisterArgs};
use config::Config;
use report::SurveyRow;

fn init_logging(max_level: &str) {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(max_level));
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let rng_seed = config::resolve_rng_seed(cli.rng_seed);
    let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
    debug!("rng seed {rng_seed}");

    match cli.command {
        Command::Generate { register, length } => {
            let config = resolve(&register, &mut rng, rng_seed)?;
            let bits = generate(&config.register, length)?;
            report::print_sequence("Output", &bits);
        }
        Command::Classify {
            register,
            strategy,
            length,
        } => run_classify(&register, strategy, length, &mut rng, rng_seed)?,
        Command::Survey {
            strategy,
            random_seeds,
        } => run_survey(strategy, random_seeds, &mut rng, rng_seed)?,
        Command::Encrypt { register, text } => {
            let config = resolve(&register, &mut rng, rng_seed)?;
            let text = text.unwrap_or_else(|| input_gen::generate_sample_text(&mut rng));
            info!("encrypting {} characters", text.chars().count());

            let result = encrypt_with_config(&text, &config.register)
                .context("plaintext must be single-byte text")?;
            report::print_plaintext(&text);
            report::print_cipher(&result);
        }
        Command::Decrypt {
            register,
            ciphertext,
        } => {
            let config = resolve(&register, &mut rng, rng_seed)?;
            let ciphertext = parse_bits(&ciphertext)?;
            let keystream = generate(&config.register, ciphertext.len())?;
            report::print_plaintext(&decrypt(&ciphertext, &keystream)?);
        }
        Command::Recover { ciphertext, known } => run_recover(&ciphertext, &known)?,
    }

    Ok(())
}

fn resolve(args: &RegisterArgs, rng: &mut ChaCha8Rng, rng_seed: u64) -> Result<Config> {
    let config = Config::from_args(args, rng, rng_seed)?;
    config.print();
    Ok(config)
}

fn parse_bits(text: &str) -> Result<BitSequence> {
    text.trim()
        .parse()
        .context("ciphertext must be a string of 0 and 1")
}

fn run_classify(
    args: &RegisterArgs,
    strategy: ClassificationStrategy,
    length: Option<usize>,
    rng: &mut ChaCha8Rng,
    rng_seed: u64,
) -> Result<()> {
    let config = resolve(args, rng, rng_seed)?;
    let degree = config.register.degree();
    let length = match length {
        Some(length) => length,
        None => analysis_length(degree)
            .with_context(|| format!("pass --length to sample a degree-{degree} register"))?,
    };
    info!("sampling {length} bits");

    let bits = generate(&config.register, length)?;
    let class = classify(&bits, degree, strategy)?;
    let cycle = match state_cycle(&config.register) {
        Ok(cycle) => Some(cycle),
        Err(e) => {
            info!("skipping state cycle: {e}");
            None
        }
    };
    if let Some(cycle) = &cycle {
        if cycle.period % class.period as u64 != 0 {
            warn!(
                "sampled period {} does not divide state cycle {}; window may be too short",
                class.period, cycle.period
            );
        }
    }
    report::print_classification(strategy, &class, cycle.as_ref());
    Ok(())
}

fn run_survey(
    strategy: ClassificationStrategy,
    random_seeds: bool,
    rng: &mut ChaCha8Rng,
    rng_seed: u64,
) -> Result<()> {
    if random_seeds {
        println!("RNG seed: {rng_seed}");
        println!();
    }

    let polynomials = reference_polynomials();
    let mut seeds = Vec::with_capacity(polynomials.len());
    let mut configs = Vec::with_capacity(polynomials.len());
    for poly in polynomials {
        let seed = if random_seeds {
            random_seed(poly.degree, rng)?
        } else {
            BitSequence::from_word(REFERENCE_SEED, poly.degree)
        };
        configs.push(poly.config(seed.clone())?);
        seeds.push(seed);
    }

    info!("analyzing {} reference polynomials", configs.len());
    let rows: Vec<SurveyRow> = analyze_batch(&configs, strategy)
        .into_iter()
        .zip(polynomials.iter().copied().zip(seeds))
        .map(|(outcome, (polynomial, seed))| SurveyRow {
            polynomial,
            seed,
            outcome: outcome.map_err(|e| e.to_string()),
        })
        .collect();

    report::print_survey(strategy, &rows);
    Ok(())
}

fn run_recover(ciphertext: &str, known: &str) -> Result<()> {
    let ciphertext = parse_bits(ciphertext)?;
    let keystream = recover_keystream(known, &ciphertext)
        .context("known plaintext does not fit the ciphertext")?;
    debug!("recovered {} keystream bits", keystream.len());

    let recurrence = berlekamp_massey(&keystream);
    if recurrence.linear_complexity() == 0 {
        bail!("known keystream is all zeros; nothing to synthesise");
    }
    let register = recurrence
        .to_config()
        .context("recovered recurrence is not a usable register")?;
    report::print_recovery(&recurrence, &register, keystream.len());

    let full = generate(&register, ciphertext.len())?;
    report::print_plaintext(&decrypt(&ciphertext, &full)?);
    Ok(())
}
