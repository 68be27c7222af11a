//! Wallet API types and error definitions.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;
use thiserror::Error;

/// Default Crypto Unifier API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://cryptounifier.io/api/v1/";

/// Status code of the locally produced failure record.
pub const CONNECTION_FAILED_STATUS: u16 = 503;

/// Message of the locally produced failure record.
pub const CONNECTION_FAILED_MESSAGE: &str = "Connection failed.";

/// Decimal precision assumed for tokens when none is given.
pub const DEFAULT_TOKEN_DECIMALS: u32 = 18;

/// The record returned in place of a response when nothing came back.
pub fn connection_failed() -> Value {
    json!({
        "status": CONNECTION_FAILED_STATUS,
        "message": CONNECTION_FAILED_MESSAGE,
    })
}

/// Errors that can occur while talking to the wallet API.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Endpoint is not a usable base URL.
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// No response was received (DNS, connect, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// A response arrived with an empty body.
    #[error("Empty response body")]
    EmptyResponse,

    /// The response body was not JSON.
    #[error("Response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// A destination could not be parsed from text.
    #[error("Invalid destination '{0}': expected <address>:<amount>")]
    InvalidDestination(String),
}

/// Result type for wallet operations that surface errors.
pub type WalletResult<T> = Result<T, WalletError>;

/// One recipient of a multi-destination transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub destination: String,
    pub amount: f64,
}

impl Destination {
    pub fn new(destination: impl Into<String>, amount: f64) -> Self {
        Self {
            destination: destination.into(),
            amount,
        }
    }
}

impl FromStr for Destination {
    type Err = WalletError;

    /// Parses `<address>:<amount>`. The split is on the last `:` so addresses
    /// carrying a scheme prefix (e.g. `bitcoincash:qp...`) survive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, amount) = s
            .rsplit_once(':')
            .ok_or_else(|| WalletError::InvalidDestination(s.to_string()))?;
        if address.is_empty() {
            return Err(WalletError::InvalidDestination(s.to_string()));
        }
        let amount: f64 = amount
            .trim()
            .parse()
            .map_err(|_| WalletError::InvalidDestination(s.to_string()))?;
        Ok(Self::new(address, amount))
    }
}

/// Optional inputs of single-destination fee estimation and sending.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferOptions {
    /// Fee rate; 0 lets the service pick.
    pub fee_per_byte: u64,
    /// Payment ID for currencies that use one; empty when unused.
    pub payment_id: String,
    /// Token contract / identifier; empty for the native asset.
    pub token_identifier: String,
    pub token_decimals: u32,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            fee_per_byte: 0,
            payment_id: String::new(),
            token_identifier: String::new(),
            token_decimals: DEFAULT_TOKEN_DECIMALS,
        }
    }
}

impl TransferOptions {
    #[must_use]
    pub fn fee_per_byte(mut self, fee: u64) -> Self {
        self.fee_per_byte = fee;
        self
    }

    #[must_use]
    pub fn payment_id(mut self, id: impl Into<String>) -> Self {
        self.payment_id = id.into();
        self
    }

    #[must_use]
    pub fn token(mut self, identifier: impl Into<String>, decimals: u32) -> Self {
        self.token_identifier = identifier.into();
        self.token_decimals = decimals;
        self
    }
}

/// Optional inputs of multi-destination fee estimation and sending.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchTransferOptions {
    pub fee_per_byte: u64,
    pub token_identifier: String,
    pub token_decimals: u32,
}

impl Default for BatchTransferOptions {
    fn default() -> Self {
        Self {
            fee_per_byte: 0,
            token_identifier: String::new(),
            token_decimals: DEFAULT_TOKEN_DECIMALS,
        }
    }
}

impl BatchTransferOptions {
    #[must_use]
    pub fn fee_per_byte(mut self, fee: u64) -> Self {
        self.fee_per_byte = fee;
        self
    }

    #[must_use]
    pub fn token(mut self, identifier: impl Into<String>, decimals: u32) -> Self {
        self.token_identifier = identifier.into();
        self.token_decimals = decimals;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed_record() {
        assert_eq!(
            connection_failed(),
            json!({"status": 503, "message": "Connection failed."})
        );
    }

    #[test]
    fn test_option_defaults() {
        let opts = TransferOptions::default();
        assert_eq!(opts.fee_per_byte, 0);
        assert!(opts.payment_id.is_empty());
        assert!(opts.token_identifier.is_empty());
        assert_eq!(opts.token_decimals, 18);

        let batch = BatchTransferOptions::default();
        assert_eq!(batch.token_decimals, 18);
    }

    #[test]
    fn test_destination_parse() {
        let d: Destination = "addr1:0.5".parse().unwrap();
        assert_eq!(d, Destination::new("addr1", 0.5));

        let d: Destination = "bitcoincash:qpabc:2".parse().unwrap();
        assert_eq!(d.destination, "bitcoincash:qpabc");
        assert_eq!(d.amount, 2.0);

        assert!("no-amount".parse::<Destination>().is_err());
        assert!(":1".parse::<Destination>().is_err());
        assert!("addr:abc".parse::<Destination>().is_err());
    }

    #[test]
    fn test_destinations_json() {
        let list = vec![Destination::new("a", 0.5), Destination::new("b", 1.0)];
        assert_eq!(
            serde_json::to_string(&list).unwrap(),
            r#"[{"destination":"a","amount":0.5},{"destination":"b","amount":1.0}]"#
        );
    }

    #[test]
    fn test_error_display() {
        let err = WalletError::InvalidDestination("x".into());
        assert_eq!(err.to_string(), "Invalid destination 'x': expected <address>:<amount>");
        assert_eq!(WalletError::EmptyResponse.to_string(), "Empty response body");
    }
}
