//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::wallet::types::DEFAULT_ENDPOINT;

/// Root configuration for the wallet client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Endpoint and credentials.
    pub client: ClientSection,

    /// Transport timeouts.
    pub timeouts: TimeoutConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Endpoint and credential settings.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientSection {
    /// API base URL.
    pub endpoint: String,

    /// Public wallet key.
    pub wallet_key: String,

    /// Secret key. Never logged.
    pub secret_key: String,

    /// Optional User-Agent header value.
    pub user_agent: Option<String>,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            wallet_key: String::new(),
            secret_key: String::new(),
            user_agent: None,
        }
    }
}

impl std::fmt::Debug for ClientSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSection")
            .field("endpoint", &self.endpoint)
            .field("wallet_key", &self.wallet_key)
            .field("secret_key", &"[REDACTED]")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Timeout configuration for the HTTP transport. 0 disables a timeout.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            request_secs: 60,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
