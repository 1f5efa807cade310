//! Command-line interface for the Heys cipher and its linear-cryptanalysis
//! harness.

#![forbid(unsafe_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use heys_attack::{estimate_bias, rank_last_round_keys, LinearRelation};
use heys_core::{Block, HeysCipher, RoundKeys};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Key bits the tutorial relation constrains: the second and fourth S-boxes
/// of the last round.
const TUTORIAL_KEY_MASK: u16 = 0x0F0F;

/// Heys SPN cipher CLI.
#[derive(Parser)]
#[command(
    name = "heys",
    version,
    author,
    about = "Heys SPN cipher and linear-cryptanalysis toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt blocks under five round keys.
    Encrypt {
        /// Five 16-bit round keys (hex 0x.., binary 0b.., or decimal).
        #[arg(long, num_args = 5, value_name = "KEY")]
        keys: Vec<String>,
        /// Input file of 16-character binary lines; the exhaustive 16-bit
        /// space when omitted.
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Output file (same line format); a plaintext -> ciphertext trace on
        /// stdout when omitted.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Decrypt blocks under five round keys.
    Decrypt {
        /// Five 16-bit round keys (hex 0x.., binary 0b.., or decimal).
        #[arg(long, num_args = 5, value_name = "KEY")]
        keys: Vec<String>,
        /// Input file of 16-character binary lines; the exhaustive 16-bit
        /// space when omitted.
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Output file (same line format); a ciphertext -> plaintext trace on
        /// stdout when omitted.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Generate a known plaintext/ciphertext corpus.
    Gen {
        /// Round keys; generated from the RNG (and printed) when omitted.
        #[arg(long, num_args = 5, value_name = "KEY")]
        keys: Option<Vec<String>>,
        /// Output path for the plaintext lines.
        #[arg(long, value_name = "FILE")]
        plaintexts: PathBuf,
        /// Output path for the ciphertext lines.
        #[arg(long, value_name = "FILE")]
        ciphertexts: PathBuf,
        /// Number of random blocks to draw.
        #[arg(long, default_value_t = 4096, conflicts_with = "exhaustive")]
        count: usize,
        /// Cover all 65536 blocks instead of sampling.
        #[arg(long, default_value_t = false)]
        exhaustive: bool,
        /// Optional RNG seed for reproducible generation.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Estimate the bias of a relation for one guessed last-round key.
    Bias {
        /// Plaintext corpus file.
        #[arg(long, value_name = "FILE")]
        plaintexts: PathBuf,
        /// Ciphertext corpus file.
        #[arg(long, value_name = "FILE")]
        ciphertexts: PathBuf,
        /// Guessed last-round key.
        #[arg(long, value_name = "KEY")]
        guess: String,
        /// Which linear relation to evaluate.
        #[arg(long, value_enum, default_value = "tutorial")]
        relation: RelationKind,
    },
    /// Rank last-round-key candidates by observed bias.
    Attack {
        /// Plaintext corpus file.
        #[arg(long, value_name = "FILE")]
        plaintexts: PathBuf,
        /// Ciphertext corpus file.
        #[arg(long, value_name = "FILE")]
        ciphertexts: PathBuf,
        /// Which linear relation to evaluate.
        #[arg(long, value_enum, default_value = "tutorial")]
        relation: RelationKind,
        /// Key bits to enumerate (guesses outside the mask stay zero).
        #[arg(long, value_name = "MASK", default_value = "0xffff")]
        mask: String,
        /// Number of top candidates to print.
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// End-to-end demo: random keys, exhaustive corpus, masked key recovery.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RelationKind {
    /// Section 3.4 of Heys' tutorial (theoretical bias 1/32).
    Tutorial,
    /// One bit in each last-round S-box.
    FourSbox,
}

impl RelationKind {
    fn to_relation(self) -> LinearRelation {
        match self {
            Self::Tutorial => LinearRelation::heys_tutorial(),
            Self::FourSbox => LinearRelation::four_sbox(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Encrypt {
            keys,
            input,
            output,
        } => cmd_transform(&keys, input.as_deref(), output.as_deref(), true),
        Commands::Decrypt {
            keys,
            input,
            output,
        } => cmd_transform(&keys, input.as_deref(), output.as_deref(), false),
        Commands::Gen {
            keys,
            plaintexts,
            ciphertexts,
            count,
            exhaustive,
            seed,
        } => cmd_gen(
            keys.as_deref(),
            &plaintexts,
            &ciphertexts,
            count,
            exhaustive,
            seed,
        ),
        Commands::Bias {
            plaintexts,
            ciphertexts,
            guess,
            relation,
        } => cmd_bias(&plaintexts, &ciphertexts, &guess, relation),
        Commands::Attack {
            plaintexts,
            ciphertexts,
            relation,
            mask,
            top,
        } => cmd_attack(&plaintexts, &ciphertexts, relation, &mask, top),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn cmd_transform(
    keys: &[String],
    input: Option<&Path>,
    output: Option<&Path>,
    encrypt: bool,
) -> Result<()> {
    let cipher = build_cipher(keys)?;
    let blocks = match input {
        Some(path) => load_corpus(path)?,
        None => (u16::MIN..=u16::MAX).map(Block::new).collect(),
    };
    let transformed: Vec<Block> = blocks
        .iter()
        .map(|block| {
            if encrypt {
                cipher.encrypt(*block)
            } else {
                cipher.decrypt(*block)
            }
        })
        .collect();

    match output {
        Some(path) => write_corpus(path, &transformed)?,
        None => {
            for (from, to) in blocks.iter().zip(transformed.iter()) {
                println!("0x{:04x} -> 0x{:04x}", from.value(), to.value());
            }
        }
    }
    Ok(())
}

fn cmd_gen(
    keys: Option<&[String]>,
    plaintexts_path: &Path,
    ciphertexts_path: &Path,
    count: usize,
    exhaustive: bool,
    seed: Option<u64>,
) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let cipher = match keys {
        Some(words) => build_cipher(words)?,
        None => {
            let generated = RoundKeys::new([
                rng.gen(),
                rng.gen(),
                rng.gen(),
                rng.gen(),
                rng.gen(),
            ]);
            for index in 0..5 {
                println!("round key {}: 0x{:04x}", index + 1, generated.get(index));
            }
            HeysCipher::new(generated)
        }
    };

    let plaintexts: Vec<Block> = if exhaustive {
        (u16::MIN..=u16::MAX).map(Block::new).collect()
    } else {
        (0..count).map(|_| Block::new(rng.gen())).collect()
    };
    let ciphertexts: Vec<Block> = plaintexts.iter().map(|pt| cipher.encrypt(*pt)).collect();

    write_corpus(plaintexts_path, &plaintexts)?;
    write_corpus(ciphertexts_path, &ciphertexts)?;
    println!("wrote {} known pairs", plaintexts.len());
    Ok(())
}

fn cmd_bias(
    plaintexts_path: &Path,
    ciphertexts_path: &Path,
    guess: &str,
    relation: RelationKind,
) -> Result<()> {
    let plaintexts = load_corpus(plaintexts_path)?;
    let ciphertexts = load_corpus(ciphertexts_path)?;
    let guess_key = parse_word(guess)?;
    let guess_cipher = HeysCipher::new(RoundKeys::new([0, 0, 0, 0, guess_key]));
    let bias = estimate_bias(
        &plaintexts,
        &ciphertexts,
        &guess_cipher,
        &relation.to_relation(),
    )?;
    println!("bias: {bias:.8}");
    Ok(())
}

fn cmd_attack(
    plaintexts_path: &Path,
    ciphertexts_path: &Path,
    relation: RelationKind,
    mask: &str,
    top: usize,
) -> Result<()> {
    let plaintexts = load_corpus(plaintexts_path)?;
    let ciphertexts = load_corpus(ciphertexts_path)?;
    let key_mask = parse_word(mask)?;
    let ranked = rank_last_round_keys(
        &plaintexts,
        &ciphertexts,
        &relation.to_relation(),
        key_mask,
    )?;
    for candidate in ranked.iter().take(top) {
        println!(
            "K5 candidate: 0x{:04x}, observed bias: {:.6}",
            candidate.key, candidate.bias
        );
    }
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let keys = RoundKeys::new([rng.gen(), rng.gen(), rng.gen(), rng.gen(), rng.gen()]);
    let cipher = HeysCipher::new(keys);
    println!("K5 is 0x{:04x}", keys.get(4));

    let plaintexts: Vec<Block> = (u16::MIN..=u16::MAX).map(Block::new).collect();
    let ciphertexts: Vec<Block> = plaintexts.iter().map(|pt| cipher.encrypt(*pt)).collect();

    let ranked = rank_last_round_keys(
        &plaintexts,
        &ciphertexts,
        &LinearRelation::heys_tutorial(),
        TUTORIAL_KEY_MASK,
    )?;
    for candidate in ranked.iter().take(5) {
        println!(
            "K5 candidate: 0x{:04x}, observed bias: {:.6}",
            candidate.key, candidate.bias
        );
    }

    let expected = keys.get(4) & TUTORIAL_KEY_MASK;
    if ranked[0].key != expected {
        bail!(
            "demo attack failed: top candidate 0x{:04x} != true masked key 0x{expected:04x}",
            ranked[0].key
        );
    }
    println!("recovered the true masked key bits 0x{expected:04x}");
    Ok(())
}

/// Parses a 16-bit word written as hex (`0x..`), binary (`0b..`), or decimal.
fn parse_word(text: &str) -> Result<u16> {
    let trimmed = text.trim();
    let (digits, radix) = if let Some(rest) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        (rest, 16)
    } else if let Some(rest) = trimmed
        .strip_prefix("0b")
        .or_else(|| trimmed.strip_prefix("0B"))
    {
        (rest, 2)
    } else {
        (trimmed, 10)
    };
    let wide = u32::from_str_radix(digits, radix)
        .with_context(|| format!("parse {trimmed:?} as a 16-bit word"))?;
    let block = Block::try_from(wide)
        .with_context(|| format!("{trimmed:?} exceeds the 16-bit range"))?;
    Ok(block.value())
}

fn build_cipher(keys: &[String]) -> Result<HeysCipher> {
    let mut parsed = Vec::with_capacity(keys.len());
    for key in keys {
        parsed.push(parse_word(key)?);
    }
    let round_keys = RoundKeys::from_slice(&parsed).context("validate round keys")?;
    Ok(HeysCipher::new(round_keys))
}

fn load_corpus(path: &Path) -> Result<Vec<Block>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut blocks = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let block = Block::from_binary_str(line)
            .with_context(|| format!("{}:{}", path.display(), index + 1))?;
        blocks.push(block);
    }
    Ok(blocks)
}

fn write_corpus(path: &Path, blocks: &[Block]) -> Result<()> {
    let mut contents = String::with_capacity(blocks.len() * 17);
    for block in blocks {
        writeln!(contents, "{:016b}", block.value()).expect("writing to a String cannot fail");
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
