//! Command-line interface for the PSN block transform.

#![forbid(unsafe_code)]

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use psn_core::{
    decrypt_text, encrypt_text, select_initial_position_with, Block, KeyTable, Position, Seeds,
};
use psn_keys::{evaluate, shared_subkeys, EndpointProfile, DEMO_SEEDS};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// PSN block transform CLI.
#[derive(Parser)]
#[command(
    name = "psn",
    version,
    about = "Position-rotated 64-bit block transform (not for real secrets)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a key table from a seed triple, or from random seeds if none are given.
    Keygen {
        /// Product base P.
        #[arg(long)]
        p: Option<u64>,
        /// Multiplier Q.
        #[arg(long)]
        q: Option<u64>,
        /// Initial state S.
        #[arg(long)]
        s: Option<u64>,
        /// Number of subkeys to derive.
        #[arg(long, default_value_t = psn_core::DEFAULT_SUBKEYS)]
        count: usize,
        /// Endpoint name stored in the profile.
        #[arg(long, default_value = "endpoint")]
        name: String,
        /// Output path for the serialized profile.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Optional RNG seed for reproducible random seeds.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Report bit balance and duplicates of an endpoint's subkeys.
    Inspect {
        /// Built-in endpoint (`a`/`client-a`, `b`/`server-b`) or path to a saved profile;
        /// a file with one of those names must be given as `./a`.
        #[arg(default_value = "a")]
        keys: KeySource,
    },
    /// List subkeys shared by two endpoints.
    Compare {
        /// First endpoint (`a`, `b`, or profile path; prefix `./` for a file named `a` or `b`).
        #[arg(default_value = "a")]
        left: KeySource,
        /// Second endpoint (`a`, `b`, or profile path; prefix `./` for a file named `a` or `b`).
        #[arg(default_value = "b")]
        right: KeySource,
    },
    /// Encrypt text into hex blocks.
    Enc {
        /// Built-in endpoint (`a`/`client-a`, `b`/`server-b`) or path to a saved profile;
        /// a file with one of those names must be given as `./a`.
        #[arg(long, default_value = "a")]
        keys: KeySource,
        /// Text to encrypt; read one line from stdin when omitted.
        #[arg(long)]
        text: Option<String>,
        /// Position override; derived from the text when omitted.
        #[arg(long)]
        psn: Option<u32>,
        /// Optional RNG seed for the empty-text position fallback.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Decrypt hex blocks back into text.
    Dec {
        /// Built-in endpoint (`a`/`client-a`, `b`/`server-b`) or path to a saved profile;
        /// a file with one of those names must be given as `./a`.
        #[arg(long, default_value = "a")]
        keys: KeySource,
        /// Position the blocks were encrypted with.
        #[arg(long)]
        psn: u32,
        /// Ciphertext blocks as hex, with or without `0x`.
        #[arg(value_name = "BLOCK")]
        blocks: Vec<String>,
    },
    /// Run a local demo: encrypt a message with the demo seeds and decrypt it back.
    Demo {
        /// Message to use; read one line from stdin when omitted.
        #[arg(long)]
        text: Option<String>,
        /// Optional RNG seed for the empty-text position fallback.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Where an endpoint's key table comes from.
///
/// `a`, `client-a`, `b` and `server-b` always name the built-in endpoints.
#[derive(Clone, Debug)]
enum KeySource {
    ClientA,
    ServerB,
    Profile(PathBuf),
}

impl FromStr for KeySource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "a" | "client-a" => KeySource::ClientA,
            "b" | "server-b" => KeySource::ServerB,
            path => KeySource::Profile(PathBuf::from(path)),
        })
    }
}

impl KeySource {
    fn load(&self) -> Result<EndpointProfile> {
        match self {
            KeySource::ClientA => Ok(EndpointProfile::client_a()),
            KeySource::ServerB => Ok(EndpointProfile::server_b()),
            KeySource::Profile(path) => load_profile(path),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Keygen {
            p,
            q,
            s,
            count,
            name,
            out,
            seed,
        } => cmd_keygen(p, q, s, count, name, out.as_ref(), seed),
        Commands::Inspect { keys } => cmd_inspect(&keys),
        Commands::Compare { left, right } => cmd_compare(&left, &right),
        Commands::Enc {
            keys,
            text,
            psn,
            seed,
        } => cmd_enc(&keys, text, psn, seed),
        Commands::Dec { keys, psn, blocks } => cmd_dec(&keys, psn, &blocks),
        Commands::Demo { text, seed } => cmd_demo(text, seed),
    }
}

fn cmd_keygen(
    p: Option<u64>,
    q: Option<u64>,
    s: Option<u64>,
    count: usize,
    name: String,
    out: Option<&PathBuf>,
    seed: Option<u64>,
) -> Result<()> {
    let profile = match (p, q, s) {
        (Some(p), Some(q), Some(s)) => EndpointProfile::derive(name, Seeds::new(p, q, s), count),
        (None, None, None) => EndpointProfile::random(name, &mut seeded_rng(seed), count),
        _ => bail!("--p, --q and --s must be given together"),
    };

    println!("=== KEYS {} ===", profile.name);
    println!("P = {}, Q = {}, S = {}", profile.p, profile.q, profile.s);
    print_subkeys(&profile.table());

    if let Some(out) = out {
        let bytes = profile.to_bytes().context("serialize profile")?;
        fs::write(out, bytes).with_context(|| format!("write {}", out.display()))?;
    }
    Ok(())
}

fn cmd_inspect(keys: &KeySource) -> Result<()> {
    let profile = keys.load()?;
    let report = evaluate(&profile.table());
    println!("=== KEY EVALUATION {} ===", profile.name);
    for stats in &report.subkeys {
        println!(
            "Subkey {}: {:#018x} | Bits 1: {} | Bits 0: {}",
            stats.index, stats.value, stats.ones, stats.zeros
        );
    }
    println!(
        "Duplicates? {}",
        if report.has_duplicates { "YES" } else { "NO" }
    );
    Ok(())
}

fn cmd_compare(left: &KeySource, right: &KeySource) -> Result<()> {
    let left = left.load()?;
    let right = right.load()?;
    let shared = shared_subkeys(&left.table(), &right.table());
    println!("=== COMPARISON {} / {} ===", left.name, right.name);
    if shared.is_empty() {
        println!("No shared subkeys.");
    } else {
        let listed: Vec<String> = shared.iter().map(|k| format!("{k:#018x}")).collect();
        println!("Shared subkeys: {}", listed.join(" "));
    }
    Ok(())
}

fn cmd_enc(
    keys: &KeySource,
    text: Option<String>,
    psn: Option<u32>,
    seed: Option<u64>,
) -> Result<()> {
    let table = checked_table(&keys.load()?)?;
    let text = text_or_stdin(text)?;
    let psn = match psn {
        Some(value) => Position(value),
        None => select_initial_position_with(text.as_bytes(), &mut seeded_rng(seed)),
    };
    let blocks = encrypt_text(&text, &table, psn);
    println!("psn: {psn}");
    println!("blocks: {}", format_blocks(&blocks));
    Ok(())
}

fn cmd_dec(keys: &KeySource, psn: u32, blocks: &[String]) -> Result<()> {
    let table = checked_table(&keys.load()?)?;
    let blocks = blocks
        .iter()
        .map(|b| parse_block_hex(b))
        .collect::<Result<Vec<_>>>()?;
    println!("{}", decrypt_text(&blocks, &table, Position(psn)));
    Ok(())
}

fn cmd_demo(text: Option<String>, seed: Option<u64>) -> Result<()> {
    let table = KeyTable::generate_default(DEMO_SEEDS);
    let message = text_or_stdin(text)?;
    let psn = select_initial_position_with(message.as_bytes(), &mut seeded_rng(seed));

    let ciphertext = encrypt_text(&message, &table, psn);
    let decrypted = decrypt_text(&ciphertext, &table, psn);

    println!("message: {message}");
    println!("message bytes: {}", hex::encode(message.as_bytes()));
    println!("psn: {psn}");
    println!("blocks: {}", format_blocks(&ciphertext));
    println!("decrypted: {decrypted}");
    if decrypted != message {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn print_subkeys(table: &KeyTable) {
    for (i, k) in table.iter().enumerate() {
        println!("Subkey {}: {:#018x}", i + 1, k);
    }
}

fn checked_table(profile: &EndpointProfile) -> Result<KeyTable> {
    if profile.subkeys.is_empty() {
        bail!("profile {} has no subkeys", profile.name);
    }
    if !profile.is_consistent() {
        bail!("profile {} subkeys do not match its seeds", profile.name);
    }
    Ok(profile.table())
}

fn format_blocks(blocks: &[Block]) -> String {
    let listed: Vec<String> = blocks.iter().map(|b| format!("{b:#018x}")).collect();
    listed.join(" ")
}

fn parse_block_hex(hex_str: &str) -> Result<Block> {
    let trimmed = hex_str.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() || digits.len() > 16 {
        bail!("block {hex_str:?} must be 1 to 16 hex digits");
    }
    let padded = format!("{digits:0>16}");
    let bytes = hex::decode(&padded).with_context(|| format!("decode block {hex_str:?}"))?;
    let mut block = [0u8; 8];
    block.copy_from_slice(&bytes);
    Ok(Block::from_be_bytes(block))
}

fn text_or_stdin(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read message from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn load_profile(path: &PathBuf) -> Result<EndpointProfile> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    EndpointProfile::from_bytes(&bytes).context("deserialize profile")
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefixed_and_short_blocks() {
        assert_eq!(parse_block_hex("0x4142000000000000").unwrap(), 0x4142_0000_0000_0000);
        assert_eq!(parse_block_hex("ff").unwrap(), 0xff);
        assert!(parse_block_hex("").is_err());
        assert!(parse_block_hex("0x").is_err());
        assert!(parse_block_hex("zz").is_err());
        assert!(parse_block_hex("11112222333344445").is_err());
        assert_eq!(parse_block_hex("0XFF").unwrap(), 0xff);
        assert!(parse_block_hex("0x0x41").is_err());
    }

    #[test]
    fn key_source_names() {
        assert!(matches!("a".parse::<KeySource>(), Ok(KeySource::ClientA)));
        assert!(matches!("server-b".parse::<KeySource>(), Ok(KeySource::ServerB)));
        assert!(matches!("keys.bin".parse::<KeySource>(), Ok(KeySource::Profile(_))));
        assert!(matches!("./a".parse::<KeySource>(), Ok(KeySource::Profile(_))));
    }

    #[test]
    fn blocks_format_as_padded_hex() {
        assert_eq!(format_blocks(&[1, 0xab]), "0x0000000000000001 0x00000000000000ab");
    }
}
