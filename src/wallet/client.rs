//! Crypto Unifier wallet API client.
//!
//! # Responsibilities
//! - Hold the endpoint and the credential pair for the client's lifetime
//! - Map each API operation onto its path and form fields
//! - Hand every call to the shared request routine (see `request.rs`)

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::config::schema::ClientConfig;
use crate::wallet::params::Params;
use crate::wallet::types::{
    connection_failed, BatchTransferOptions, Destination, TransferOptions, WalletError, WalletResult,
    DEFAULT_ENDPOINT,
};

/// Client for the Crypto Unifier wallet API.
///
/// Every operation performs a single POST and returns the decoded JSON body.
/// Failures to reach the service come back as the value
/// `{"status": 503, "message": "Connection failed."}` rather than an error.
///
/// # Example
///
/// ```rust,ignore
/// use cryptounifier::WalletClient;
///
/// let client = WalletClient::new("wallet-key", "secret-key");
/// let balance = client.balance("btc", None).await;
/// println!("{balance}");
/// ```
#[derive(Clone)]
pub struct WalletClient {
    http_client: reqwest::Client,
    endpoint: Arc<str>,
    wallet_key: Arc<str>,
    secret_key: Arc<str>,
}

impl std::fmt::Debug for WalletClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletClient")
            .field("endpoint", &self.endpoint)
            .field("wallet_key", &self.wallet_key)
            .field("secret_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl WalletClient {
    /// Create a client against the default endpoint. Keys are stored as given.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized, like `reqwest::Client::new`.
    pub fn new(wallet_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        let wallet_key: String = wallet_key.into();
        let secret_key: String = secret_key.into();
        Self {
            http_client: http_client_builder()
                .build()
                .expect("Failed to build HTTP client"),
            endpoint: DEFAULT_ENDPOINT.into(),
            wallet_key: wallet_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> WalletClientBuilder {
        WalletClientBuilder::default()
    }

    /// Build a client from loaded configuration.
    pub fn from_config(config: &ClientConfig) -> WalletResult<Self> {
        let mut builder = Self::builder()
            .endpoint(config.client.endpoint.clone())
            .wallet_key(config.client.wallet_key.clone())
            .secret_key(config.client.secret_key.clone())
            .connect_timeout_secs(config.timeouts.connect_secs)
            .timeout_secs(config.timeouts.request_secs);
        if let Some(ref user_agent) = config.client.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        builder.build()
    }

    /// Base URL every path is appended to. Always ends with `/`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn wallet_key(&self) -> &str {
        &self.wallet_key
    }

    pub(crate) fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub(crate) fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Estimate the real fee of sending `amount` to `destination`.
    pub async fn estimate_fee(
        &self,
        currency: &str,
        destination: &str,
        amount: f64,
        options: &TransferOptions,
    ) -> Value {
        self.request(
            &format!("{currency}/estimate-fee"),
            transfer_params(destination, amount, options),
        )
        .await
    }

    /// Estimate the real fee of a transfer to several destinations.
    pub async fn estimate_fee_multiple(
        &self,
        currency: &str,
        destinations: &[Destination],
        options: &BatchTransferOptions,
    ) -> Value {
        match batch_params(destinations, options) {
            Ok(params) => {
                self.request(&format!("{currency}/estimate-fee-multiple"), params)
                    .await
            }
            Err(e) => encode_failure(e),
        }
    }

    /// Send `amount` of `currency` to `destination`.
    pub async fn send_transaction(
        &self,
        currency: &str,
        destination: &str,
        amount: f64,
        options: &TransferOptions,
    ) -> Value {
        self.request(
            &format!("{currency}/send-transaction"),
            transfer_params(destination, amount, options),
        )
        .await
    }

    /// Send one transaction paying several destinations.
    pub async fn send_transaction_multiple(
        &self,
        currency: &str,
        destinations: &[Destination],
        options: &BatchTransferOptions,
    ) -> Value {
        match batch_params(destinations, options) {
            Ok(params) => {
                self.request(&format!("{currency}/send-transaction-multiple"), params)
                    .await
            }
            Err(e) => encode_failure(e),
        }
    }

    /// Recover the private key of the wallet for `currency`.
    pub async fn recover_private_key(&self, currency: &str) -> Value {
        self.request(&format!("{currency}/recover-private-key"), Params::new())
            .await
    }

    /// List transactions. A `limit` of 0 leaves the limit to the service.
    pub async fn list_transaction(&self, currency: &str, limit: u32) -> Value {
        let limit = (limit != 0).then_some(limit);
        self.request(
            &format!("{currency}/list-transactions"),
            Params::new().with("limit", limit),
        )
        .await
    }

    pub async fn deposit_addresses(&self, currency: &str) -> Value {
        self.request(&format!("{currency}/deposit-addresses"), Params::new())
            .await
    }

    pub async fn blockchain_info(&self, currency: &str) -> Value {
        self.request(&format!("{currency}/blockchain-info"), Params::new())
            .await
    }

    /// Ask the service whether `address` is valid for `currency`.
    pub async fn validate_address(&self, currency: &str, address: &str) -> Value {
        self.request(
            &format!("{currency}/validate-address"),
            Params::new().with("address", address),
        )
        .await
    }

    /// Balance of the wallet, or of a token held by it.
    pub async fn balance(&self, currency: &str, token_identifier: Option<&str>) -> Value {
        self.request(
            &format!("{currency}/balance"),
            Params::new().with("token_identifier", token_identifier.unwrap_or_default()),
        )
        .await
    }
}

fn transfer_params(destination: &str, amount: f64, options: &TransferOptions) -> Params {
    Params::new()
        .with("destination", destination)
        .with("amount", amount)
        .with("fee_per_byte", options.fee_per_byte)
        .with("payment_id", &options.payment_id)
        .with("token_identifier", &options.token_identifier)
        .with("token_decimals", options.token_decimals)
}

/// `destinations` travels as a single field holding its JSON text.
fn batch_params(
    destinations: &[Destination],
    options: &BatchTransferOptions,
) -> WalletResult<Params> {
    let encoded = serde_json::to_string(destinations)?;
    Ok(Params::new()
        .with("destinations", encoded)
        .with("fee_per_byte", options.fee_per_byte)
        .with("token_identifier", &options.token_identifier)
        .with("token_decimals", options.token_decimals))
}

fn encode_failure(error: WalletError) -> Value {
    tracing::warn!(error = %error, "Could not encode destinations");
    connection_failed()
}

/// Redirects are never followed: one call is one POST.
fn http_client_builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder().redirect(reqwest::redirect::Policy::none())
}

/// Builder for [`WalletClient`].
#[derive(Default)]
pub struct WalletClientBuilder {
    wallet_key: String,
    secret_key: String,
    endpoint: Option<String>,
    connect_timeout_secs: Option<u64>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
    no_proxy: bool,
}

impl std::fmt::Debug for WalletClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletClientBuilder")
            .field("endpoint", &self.endpoint)
            .field("wallet_key", &self.wallet_key)
            .field("secret_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl WalletClientBuilder {
    #[must_use]
    pub fn wallet_key(mut self, key: impl Into<String>) -> Self {
        self.wallet_key = key.into();
        self
    }

    #[must_use]
    pub fn secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = key.into();
        self
    }

    /// Override the base URL. A trailing `/` is added when missing.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Connection establishment timeout. 0 disables it.
    #[must_use]
    pub const fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = Some(secs);
        self
    }

    /// Whole-request timeout. 0 disables it.
    #[must_use]
    pub const fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Ignore system proxy settings (`HTTP_PROXY` and friends).
    #[must_use]
    pub const fn no_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Build the client.
    pub fn build(self) -> WalletResult<WalletClient> {
        let endpoint = normalize_endpoint(
            self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT),
        )?;

        let mut builder = http_client_builder();
        if let Some(secs) = self.connect_timeout_secs.filter(|s| *s > 0) {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.timeout_secs.filter(|s| *s > 0) {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(ref user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if self.no_proxy {
            builder = builder.no_proxy();
        }
        let http_client = builder.build().map_err(WalletError::HttpClient)?;

        tracing::debug!(endpoint = %endpoint, "Wallet client initialized");

        Ok(WalletClient {
            http_client,
            endpoint: endpoint.into(),
            wallet_key: self.wallet_key.into(),
            secret_key: self.secret_key.into(),
        })
    }
}

/// Check that `endpoint` is an absolute http(s) URL and make it end with `/`.
pub(crate) fn normalize_endpoint(endpoint: &str) -> WalletResult<String> {
    let invalid = |reason: String| WalletError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = url::Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }

    let mut normalized = endpoint.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Ok(normalized)
}
