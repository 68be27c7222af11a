//! `cu-wallet`: command-line access to the Crypto Unifier wallet API.
//!
//! Credentials come from flags, the environment
//! (`CRYPTOUNIFIER_WALLET_KEY`, `CRYPTOUNIFIER_SECRET_KEY`) or a TOML config
//! file, in that order of precedence. The response is printed as pretty JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use cryptounifier::config::{load_config, ClientConfig};
use cryptounifier::observability::logging;
use cryptounifier::{BatchTransferOptions, Destination, TransferOptions, WalletClient};

#[derive(Parser)]
#[command(name = "cu-wallet")]
#[command(about = "Command-line client for the Crypto Unifier wallet API", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API base URL.
    #[arg(short, long)]
    endpoint: Option<String>,

    #[arg(long, env = "CRYPTOUNIFIER_WALLET_KEY", hide_env_values = true)]
    wallet_key: Option<String>,

    #[arg(long, env = "CRYPTOUNIFIER_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Fee and token flags shared by the transfer commands.
#[derive(clap::Args)]
struct FeeArgs {
    #[arg(long, default_value_t = 0)]
    fee_per_byte: u64,

    #[arg(long, default_value = "")]
    token_identifier: String,

    #[arg(long, default_value_t = 18)]
    token_decimals: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the fee of a transfer
    EstimateFee {
        currency: String,
        destination: String,
        amount: f64,
        #[arg(long, default_value = "")]
        payment_id: String,
        #[command(flatten)]
        fees: FeeArgs,
    },
    /// Estimate the fee of a transfer to several destinations
    EstimateFeeMultiple {
        currency: String,
        /// Recipient as <address>:<amount>; repeat for each destination
        #[arg(long = "to", required = true)]
        destinations: Vec<Destination>,
        #[command(flatten)]
        fees: FeeArgs,
    },
    /// Send a transaction
    SendTransaction {
        currency: String,
        destination: String,
        amount: f64,
        #[arg(long, default_value = "")]
        payment_id: String,
        #[command(flatten)]
        fees: FeeArgs,
    },
    /// Send one transaction to several destinations
    SendTransactionMultiple {
        currency: String,
        /// Recipient as <address>:<amount>; repeat for each destination
        #[arg(long = "to", required = true)]
        destinations: Vec<Destination>,
        #[command(flatten)]
        fees: FeeArgs,
    },
    /// Recover the wallet private key
    RecoverPrivateKey { currency: String },
    /// List wallet transactions
    ListTransactions {
        currency: String,
        /// 0 lets the service decide
        #[arg(long, default_value_t = 0)]
        limit: u32,
    },
    /// List deposit addresses
    DepositAddresses { currency: String },
    /// Show blockchain information
    BlockchainInfo { currency: String },
    /// Validate an address
    ValidateAddress { currency: String, address: String },
    /// Show the wallet balance
    Balance {
        currency: String,
        #[arg(long)]
        token_identifier: Option<String>,
    },
}

impl FeeArgs {
    fn transfer(self, payment_id: String) -> TransferOptions {
        TransferOptions {
            fee_per_byte: self.fee_per_byte,
            payment_id,
            token_identifier: self.token_identifier,
            token_decimals: self.token_decimals,
        }
    }

    fn batch(self) -> BatchTransferOptions {
        BatchTransferOptions {
            fee_per_byte: self.fee_per_byte,
            token_identifier: self.token_identifier,
            token_decimals: self.token_decimals,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(endpoint) = cli.endpoint {
        config.client.endpoint = endpoint;
    }
    if let Some(key) = cli.wallet_key {
        config.client.wallet_key = key;
    }
    if let Some(key) = cli.secret_key {
        config.client.secret_key = key;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }

    logging::init(&config.observability.log_level);

    if config.client.wallet_key.is_empty() || config.client.secret_key.is_empty() {
        tracing::warn!("Wallet key or secret key is empty; the API will reject the request");
    }

    let client = WalletClient::from_config(&config)?;
    tracing::debug!(endpoint = client.endpoint(), "Configuration loaded");

    let response = run(&client, cli.command).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn run(client: &WalletClient, command: Commands) -> Value {
    match command {
        Commands::EstimateFee {
            currency,
            destination,
            amount,
            payment_id,
            fees,
        } => {
            client
                .estimate_fee(&currency, &destination, amount, &fees.transfer(payment_id))
                .await
        }
        Commands::EstimateFeeMultiple {
            currency,
            destinations,
            fees,
        } => {
            client
                .estimate_fee_multiple(&currency, &destinations, &fees.batch())
                .await
        }
        Commands::SendTransaction {
            currency,
            destination,
            amount,
            payment_id,
            fees,
        } => {
            client
                .send_transaction(&currency, &destination, amount, &fees.transfer(payment_id))
                .await
        }
        Commands::SendTransactionMultiple {
            currency,
            destinations,
            fees,
        } => {
            client
                .send_transaction_multiple(&currency, &destinations, &fees.batch())
                .await
        }
        Commands::RecoverPrivateKey { currency } => client.recover_private_key(&currency).await,
        Commands::ListTransactions { currency, limit } => {
            client.list_transaction(&currency, limit).await
        }
        Commands::DepositAddresses { currency } => client.deposit_addresses(&currency).await,
        Commands::BlockchainInfo { currency } => client.blockchain_info(&currency).await,
        Commands::ValidateAddress { currency, address } => {
            client.validate_address(&currency, &address).await
        }
        Commands::Balance {
            currency,
            token_identifier,
        } => client.balance(&currency, token_identifier.as_deref()).await,
    }
}
