//! fairdraw-verify
//!
//! Offline verification of provably fair bets: compute commitments and rolls,
//! replay a bet from its seeds, or audit a saved game record once the server
//! seed has been revealed.

use clap::{Parser, Subcommand};
use fairdraw::{
    config::{generate_sample_config, ConfigLoader},
    games::seed_engine::{generate_client_seed, generate_server_seed},
    telemetry::init_tracing,
    format_amount, verify_record, FairdrawConfig, GameParams, GameRecord, GameResult, GameSeed, RevealedSeed,
    Token,
};
use serde::Serialize;
use std::{
    error::Error,
    path::{Path, PathBuf},
};

/// Fairdraw verification CLI
#[derive(Parser)]
#[command(name = "fairdraw-verify")]
#[command(about = "Verify provably fair game outcomes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SHA-256 commitment of a server seed (generates one if omitted)
    Commit {
        #[arg(short, long)]
        server_seed: Option<String>,
    },

    /// Print the hash and roll for one seed triple
    Roll {
        #[arg(short, long)]
        server_seed: String,

        #[arg(short = 'l', long)]
        client_seed: String,

        #[arg(short, long)]
        nonce: u64,
    },

    /// Recompute the outcome of a bet from its seeds
    Replay {
        #[arg(short, long)]
        server_seed: String,

        #[arg(short = 'l', long)]
        client_seed: String,

        #[arg(short, long)]
        nonce: u64,

        /// Stake as a decimal string, e.g. "1.5"
        #[arg(short, long)]
        bet: String,

        /// Token symbol the stake is denominated in
        #[arg(short, long, default_value = "SOL")]
        token: String,

        /// Game parameters as JSON, e.g. '{"game":"dice","target":5000}'
        #[arg(short, long)]
        params: String,
    },

    /// Audit a saved game record against a revealed server seed
    Audit {
        /// Path to a JSON game record
        #[arg(short, long)]
        record: PathBuf,

        #[arg(short, long)]
        server_seed: String,

        /// Last nonce issued before the reveal (defaults to the record's nonce)
        #[arg(long)]
        last_nonce: Option<u64>,
    },

    /// Write a default configuration file
    SampleConfig {
        #[arg(short, long, default_value = "fairdraw.toml")]
        output: PathBuf,
    },
}

#[derive(Serialize)]
struct ReplayReport {
    token: String,
    bet: String,
    payout: String,
    #[serde(flatten)]
    result: GameResult,
}

#[derive(Serialize)]
struct AuditReport<'a> {
    game_id: &'a str,
    nonce: u64,
    verified: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_path(path),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;
    if cli.verbose {
        config.logging.filter = "fairdraw=debug".to_string();
    }
    init_tracing(&config.logging);

    match cli.command {
        Commands::Commit { server_seed } => {
            let generated = server_seed.is_none();
            let server_seed = server_seed.unwrap_or_else(generate_server_seed);
            let mut out = serde_json::json!({
                "commitment": fairdraw::server_seed_commitment(&server_seed),
            });
            if generated {
                out["server_seed"] = server_seed.into();
                out["client_seed"] = generate_client_seed().into();
            }
            print_json(&out)
        }
        Commands::Roll {
            server_seed,
            client_seed,
            nonce,
        } => {
            let result = fairdraw::hash_roll(&GameSeed::new(server_seed, client_seed, nonce))?;
            print_json(&result)
        }
        Commands::Replay {
            server_seed,
            client_seed,
            nonce,
            bet,
            token,
            params,
        } => {
            let token = Token::by_symbol(&token)
                .ok_or_else(|| fairdraw::BetError::UnsupportedToken(token.clone()))?;
            let bet = fairdraw::parse_amount(&bet, token.decimals)?;
            let params: GameParams = serde_json::from_str(&params)?;
            let seed = GameSeed::new(server_seed, client_seed, nonce);

            let result = fairdraw::evaluate(&seed, bet, &params, &config.house)?;
            print_json(&ReplayReport {
                bet: format_amount(bet, token.decimals),
                payout: format_amount(result.payout, token.decimals),
                token: token.symbol,
                result,
            })
        }
        Commands::Audit {
            record,
            server_seed,
            last_nonce,
        } => audit(&config, &record, server_seed, last_nonce),
        Commands::SampleConfig { output } => {
            generate_sample_config(&output.to_string_lossy())?;
            eprintln!("Wrote default configuration to {}", output.display());
            Ok(())
        }
    }
}

fn audit(
    config: &FairdrawConfig,
    path: &Path,
    server_seed: String,
    last_nonce: Option<u64>,
) -> Result<(), Box<dyn Error>> {
    let content = std::fs::read_to_string(path)?;
    let record: GameRecord = serde_json::from_str(&content)?;

    let revealed = RevealedSeed {
        server_seed,
        commitment: record.proof.server_seed_commitment.clone(),
        client_seed: record.proof.client_seed.clone(),
        last_nonce: Some(last_nonce.unwrap_or(record.proof.nonce)),
    };
    verify_record(&record, &revealed, &config.house)?;

    print_json(&AuditReport {
        game_id: &record.game_id,
        nonce: record.proof.nonce,
        verified: true,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
