//! Crypto Unifier wallet API client library.
//!
//! # Architecture Overview
//!
//! ```text
//!   caller ──▶ WalletClient operation ──▶ Params ──▶ request routine ──▶ POST endpoint/<currency>/<action>
//!                                                        │
//!   caller ◀── serde_json::Value (or failure record) ◀───┘
//! ```
//!
//! - `wallet`: client, parameters, request routine, types
//! - `config`: TOML configuration for the CLI and `WalletClient::from_config`
//! - `observability`: logging setup and request metrics

pub mod config;
pub mod observability;
pub mod wallet;

pub use config::schema::ClientConfig;
pub use wallet::{
    BatchTransferOptions, Destination, Params, TransferOptions, WalletClient, WalletError,
};
