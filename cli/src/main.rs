//! authsig: look up an account's on-chain keys and verify signatures against them.

use anyhow::Context;
use authsig_authority::{ChainClient, SignatureVerifier, VerifierConfig};
use authsig_crypto::K1Verifier;
use authsig_types::VerificationRequest;
use authsig_utils::{init_logging, LogFormat};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "authsig", about = "Verify signatures against an account's on-chain keys")]
struct Cli {
    /// Path to a TOML configuration file listing the known chains.
    #[arg(long, env = "AUTHSIG_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Defaults to the config file's value.
    #[arg(long, env = "AUTHSIG_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json". Defaults to the config file's value.
    #[arg(long, env = "AUTHSIG_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Per-request deadline for node queries, in seconds.
    #[arg(long, env = "AUTHSIG_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Print the account's full authority as JSON.
    Account {
        #[command(flatten)]
        target: Target,
    },
    /// Print every key authorized for the account, one per line.
    Keys {
        #[command(flatten)]
        target: Target,
    },
    /// Check a signature; exits 0 when valid, 1 when invalid.
    Verify {
        #[command(flatten)]
        target: Target,

        /// Signature text, e.g. "SIG_K1_...".
        #[arg(long)]
        signature: String,

        /// The exact data that was signed.
        #[arg(long)]
        data: String,
    },
}

#[derive(clap::Args, Debug)]
struct Target {
    /// Chain id as listed in the config file.
    #[arg(long, env = "AUTHSIG_CHAIN")]
    chain: String,

    /// Account name.
    #[arg(long)]
    account: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => VerifierConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => VerifierConfig::default(),
    };
    let log_format = apply_overrides(&cli, &mut config)?;

    init_logging(log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!(path = %path.display(), chains = config.chains.len(), "loaded config");
    }

    let verifier = build_verifier(&config)?;

    match cli.command {
        Command::Account { target } => {
            let authority = verifier
                .get_account_info(&target.chain, &target.account)
                .await?;
            println!("{}", serde_json::to_string_pretty(&authority)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Keys { target } => {
            let keys = verifier
                .get_public_keys(&target.chain, &target.account)
                .await?;
            for key in keys.iter() {
                println!("{key}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify {
            target,
            signature,
            data,
        } => {
            let request = VerificationRequest::new(target.chain, target.account, signature, data);
            if verifier.verify_signature(&request).await? {
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("invalid");
                Ok(ExitCode::from(1))
            }
        }
    }
}

/// Layer CLI flags over the file config and settle the log format.
fn apply_overrides(cli: &Cli, config: &mut VerifierConfig) -> anyhow::Result<LogFormat> {
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        config.request_timeout_secs = Some(secs);
    }
    match cli.log_format {
        Some(format) => Ok(format),
        None => config
            .log_format
            .parse()
            .map_err(anyhow::Error::msg)
            .context("invalid log_format in config"),
    }
}

fn build_verifier(config: &VerifierConfig) -> anyhow::Result<SignatureVerifier> {
    let client = match config.request_timeout() {
        Some(timeout) => ChainClient::with_timeout(timeout)?,
        None => ChainClient::new(),
    };
    let registry = Arc::new(config.registry());
    if registry.is_empty() {
        tracing::warn!("no chains configured; every lookup will fail");
    }
    Ok(SignatureVerifier::with_parts(
        registry,
        client,
        K1Verifier::new(),
    ))
}
