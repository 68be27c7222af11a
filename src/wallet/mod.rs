//! Wallet API subsystem.
//!
//! # Data Flow
//! ```text
//! caller
//!     → client.rs (operation → path + Params)
//!     → params.rs (ordered fields, falsy filter)
//!     → request.rs (credentials, form POST, JSON decode)
//!     → serde_json::Value or the failure record
//! ```
//!
//! # Security Constraints
//! - The secret key is never logged nor printed by `Debug`
//! - TLS verification is always on

pub mod client;
pub mod params;
pub mod request;
pub mod types;

pub use client::{WalletClient, WalletClientBuilder};
pub use params::{ParamValue, Params};
pub use types::{
    connection_failed, BatchTransferOptions, Destination, TransferOptions, WalletError,
    WalletResult, DEFAULT_ENDPOINT,
};
