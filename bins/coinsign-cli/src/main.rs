//! coinsign: command-line front end for offline transfer signing.
//!
//! Creates and recovers accounts, signs coin transfers into broadcast-ready
//! base64, and inspects encoded transactions. Never talks to the network.

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use coinsign_core::{Codec, Coins, std_sign_bytes};
use coinsign_wallet::config::{
    DEFAULT_ACCOUNT_NUMBER, DEFAULT_CHAIN_ID, DEFAULT_FEE, DEFAULT_GAS, DEFAULT_SEQUENCE,
};
use coinsign_wallet::{TxConfig, create_account, recover_account, send_coins_with};

/// Offline transaction signer.
#[derive(Parser)]
#[command(name = "coinsign")]
#[command(version, about = "Sign coin transfers offline.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account subcommands.
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },
    /// Sign a transfer and print the encoded transaction as base64.
    Send(SendArgs),
    /// Print the JSON form of a base64 encoded transaction.
    Decode(DecodeArgs),
    /// Parse and normalize a coin list such as "10btc,5atom".
    ParseCoins {
        /// Comma-separated coins.
        text: String,
    },
}

#[derive(Subcommand)]
enum KeysAction {
    /// Create a new account from fresh entropy.
    Add {
        /// Local name for the account.
        name: String,
    },
    /// Recover an account from its mnemonic.
    Recover {
        /// Local name for the account.
        name: String,
    },
}

/// Transfer parameters shared by signing and verification.
#[derive(Args, Clone, Debug)]
struct TxArgs {
    /// Chain identifier.
    #[arg(long, env = "COINSIGN_CHAIN_ID", default_value = DEFAULT_CHAIN_ID)]
    chain_id: String,

    /// Account number of the signer.
    #[arg(long, env = "COINSIGN_ACCOUNT_NUMBER", default_value_t = DEFAULT_ACCOUNT_NUMBER)]
    account_number: u64,

    /// Sequence number of the signer.
    #[arg(long, env = "COINSIGN_SEQUENCE", default_value_t = DEFAULT_SEQUENCE)]
    sequence: u64,

    /// Gas limit.
    #[arg(long, env = "COINSIGN_GAS", default_value_t = DEFAULT_GAS)]
    gas: u64,

    /// Fee coin, e.g. "0STAKE". Empty for none.
    #[arg(long, env = "COINSIGN_FEE", default_value = DEFAULT_FEE)]
    fee: String,

    /// Transaction memo.
    #[arg(long, env = "COINSIGN_MEMO", default_value = "")]
    memo: String,
}

impl From<TxArgs> for TxConfig {
    fn from(args: TxArgs) -> Self {
        TxConfig {
            chain_id: args.chain_id,
            account_number: args.account_number,
            sequence: args.sequence,
            gas: args.gas,
            fee: args.fee,
            memo: args.memo,
        }
    }
}

#[derive(Args)]
struct SendArgs {
    /// Sender address (cosmos1...).
    #[arg(long)]
    from: String,

    /// Recipient address (cosmos1...).
    #[arg(long)]
    to: String,

    /// Amount, e.g. "1STAKE" or "10btc,5atom".
    #[arg(long)]
    amount: String,

    /// Mnemonic of the sender. If not provided, will prompt securely.
    #[arg(long)]
    mnemonic: Option<String>,

    #[command(flatten)]
    tx: TxArgs,
}

#[derive(Args)]
struct DecodeArgs {
    /// Base64 encoded transaction.
    tx: String,

    /// Also check every signature against the given transfer parameters.
    #[arg(long)]
    verify: bool,

    #[command(flatten)]
    params: TxArgs,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Keys { action } => match action {
            KeysAction::Add { name } => keys_add(&name),
            KeysAction::Recover { name } => keys_recover(&name),
        },
        Commands::Send(args) => send(args),
        Commands::Decode(args) => decode(args),
        Commands::ParseCoins { text } => parse_coins(&text),
    }
}

/// Create a new account and show its mnemonic once.
fn keys_add(name: &str) -> Result<()> {
    let password = prompt_password("Enter key password")?;
    let password_confirm = prompt_password("Confirm password")?;
    if password != password_confirm {
        bail!("Passwords do not match");
    }

    let info = create_account(name, &password).context("Failed to create account")?;

    println!("\n=== ACCOUNT CREATED ===");
    println!("Name:    {}", info.name);
    println!("Address: {}", info.address);
    println!("PubKey:  {}", info.pub_key);
    println!("\nMNEMONIC (BACKUP THIS, 24 WORDS):");
    println!("  {}", info.mnemonic);
    println!("\nWARNING: This mnemonic will NOT be shown again.");
    println!("Anyone with this mnemonic can sign for the account.");
    Ok(())
}

/// Re-derive an account from a mnemonic.
fn keys_recover(name: &str) -> Result<()> {
    let mnemonic = prompt_password("Enter mnemonic (12 or 24 words)")?;
    let info = recover_account(name, &mnemonic).context("Failed to recover account")?;

    println!("\n=== ACCOUNT RECOVERED ===");
    println!("Name:    {}", info.name);
    println!("Address: {}", info.address);
    println!("PubKey:  {}", info.pub_key);
    Ok(())
}

/// Sign a transfer and print base64 on stdout.
fn send(args: SendArgs) -> Result<()> {
    let mnemonic = match args.mnemonic {
        Some(m) => m,
        None => prompt_password("Enter sender mnemonic")?,
    };
    let config = TxConfig::from(args.tx);
    let encoded = send_coins_with(&args.from, &args.to, &args.amount, &mnemonic, &config)
        .context("Failed to sign transfer")?;
    println!("{encoded}");
    Ok(())
}

/// Decode a transaction, optionally verifying its signatures.
fn decode(args: DecodeArgs) -> Result<()> {
    let bytes = BASE64
        .decode(args.tx.trim())
        .context("Transaction is not valid base64")?;
    let codec = Codec::standard();
    let tx = codec.decode_tx(&bytes).context("Failed to decode transaction")?;
    debug!(bytes = bytes.len(), msgs = tx.msgs.len(), "decoded transaction");

    if args.verify {
        let sign_bytes = std_sign_bytes(
            &args.params.chain_id,
            args.params.account_number,
            args.params.sequence,
            &tx.fee,
            &tx.msgs,
            &tx.memo,
        )
        .context("Failed to rebuild sign bytes")?;
        tx.verify_signatures(&sign_bytes)
            .context("Signature verification failed")?;
        eprintln!("signatures: ok");
    }

    let json = codec.tx_to_json(&tx).context("Failed to render transaction")?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Print the normalized coin set.
fn parse_coins(text: &str) -> Result<()> {
    let coins = Coins::parse(text).with_context(|| format!("Invalid coins: {text:?}"))?;
    println!("{coins}");
    Ok(())
}

/// Prompt for a secret without echoing it.
fn prompt_password(prompt: &str) -> Result<String> {
    rpassword::prompt_password(format!("{}: ", prompt)).context("Failed to read input")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn send_flags_default_to_config_defaults() {
        let cli = Cli::try_parse_from([
            "coinsign", "send", "--from", "a", "--to", "b", "--amount", "1STAKE",
        ])
        .unwrap();
        let Commands::Send(args) = cli.command else {
            panic!("expected send");
        };
        assert!(args.mnemonic.is_none());
        let config = TxConfig::from(args.tx);
        assert_eq!(config.chain_id, DEFAULT_CHAIN_ID);
        assert_eq!(config.gas, DEFAULT_GAS);
        assert_eq!(config.fee, DEFAULT_FEE);
    }

    #[test]
    fn send_flags_override() {
        let cli = Cli::try_parse_from([
            "coinsign", "send", "--from", "a", "--to", "b", "--amount", "1STAKE",
            "--chain-id", "test-1", "--sequence", "9", "--memo", "hi",
        ])
        .unwrap();
        let Commands::Send(args) = cli.command else {
            panic!("expected send");
        };
        let config = TxConfig::from(args.tx);
        assert_eq!(config.chain_id, "test-1");
        assert_eq!(config.sequence, 9);
        assert_eq!(config.memo, "hi");
    }

    #[test]
    fn keys_add_requires_name() {
        assert!(Cli::try_parse_from(["coinsign", "keys", "add"]).is_err());
    }
}
