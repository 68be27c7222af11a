//! Shared request routine used by every wallet operation.
//!
//! # Data Flow
//! ```text
//! Params (operation fields)
//!     → retain_truthy (drop "", "0", 0, false, null)
//!     → append wallet_key, secret_key
//!     → form-encode, POST endpoint + path
//!     → response body
//!         empty / no response → {"status": 503, "message": "Connection failed."}
//!         otherwise           → serde_json::Value, returned verbatim
//! ```
//!
//! # Design Decisions
//! - One POST per call; no retries, no status-code branching
//! - Failures on the value channel are normalized, never raised
//! - Credentials never appear in logs

use serde_json::Value;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::observability::metrics;
use crate::wallet::client::WalletClient;
use crate::wallet::params::Params;
use crate::wallet::types::{connection_failed, WalletError, WalletResult};

impl WalletClient {
    /// Send `params` to `path` and return the decoded response.
    ///
    /// Transport failures and empty bodies yield the failure record. A body
    /// that is not JSON yields `Value::Null`.
    pub async fn request(&self, path: &str, params: Params) -> Value {
        match self.try_request(path, params).await {
            Ok(value) => value,
            Err(WalletError::Decode(_)) => Value::Null,
            Err(_) => connection_failed(),
        }
    }

    /// Same round trip as [`request`](Self::request), with failures as typed errors.
    pub async fn try_request(&self, path: &str, params: Params) -> WalletResult<Value> {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!("wallet_request", %request_id, path);

        async move {
            let start = Instant::now();
            let body = self.form_body(params);
            let url = format!("{}{}", self.endpoint(), path);

            let result = self.post(&url, &body).await;
            let outcome = match &result {
                Ok(_) => "ok",
                Err(WalletError::EmptyResponse) => "empty_response",
                Err(WalletError::Decode(_)) => "decode_error",
                Err(_) => "transport_error",
            };
            metrics::record_request(path, outcome, start);

            match &result {
                Ok(_) => tracing::debug!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Wallet request completed"
                ),
                Err(WalletError::Decode(e)) => {
                    tracing::warn!(error = %e, "Wallet API returned a non-JSON body")
                }
                Err(e) => tracing::warn!(error = %e, "Wallet API unreachable"),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Filtered operation fields followed by the credential pair.
    pub(crate) fn form_body(&self, mut params: Params) -> Vec<(String, String)> {
        params.retain_truthy();
        params.insert("wallet_key", self.wallet_key());
        params.insert("secret_key", self.secret_key());
        params.to_form_pairs()
    }

    async fn post(&self, url: &str, body: &[(String, String)]) -> WalletResult<Value> {
        let response = self
            .http_client()
            .post(url)
            .form(body)
            .send()
            .await
            .map_err(WalletError::Transport)?;

        tracing::trace!(status = %response.status(), "Response received");

        let text = response.text().await.map_err(WalletError::Transport)?;
        if text.is_empty() {
            return Err(WalletError::EmptyResponse);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(body: &[(String, String)]) -> Vec<&str> {
        body.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn test_credentials_appended_last() {
        let client = WalletClient::new("pub", "sec");
        let body = client.form_body(Params::new().with("address", "abc"));

        assert_eq!(names(&body), vec!["address", "wallet_key", "secret_key"]);
        assert_eq!(body[1].1, "pub");
        assert_eq!(body[2].1, "sec");
    }

    #[test]
    fn test_credentials_override_caller_fields() {
        let client = WalletClient::new("pub", "sec");
        let body = client.form_body(
            Params::new()
                .with("secret_key", "forged")
                .with("wallet_key", "forged"),
        );

        assert_eq!(
            body,
            vec![
                ("wallet_key".to_string(), "pub".to_string()),
                ("secret_key".to_string(), "sec".to_string()),
            ]
        );
    }

    #[test]
    fn test_credentials_sent_even_when_empty() {
        let client = WalletClient::new("", "");
        let body = client.form_body(Params::new());
        assert_eq!(names(&body), vec!["wallet_key", "secret_key"]);
    }

    #[test]
    fn test_falsy_fields_dropped() {
        let client = WalletClient::new("pub", "sec");
        let body = client.form_body(
            Params::new()
                .with("limit", None::<u32>)
                .with("fee_per_byte", 0u64)
                .with("token_identifier", "")
                .with("token_decimals", 18u32),
        );
        assert_eq!(names(&body), vec!["token_decimals", "wallet_key", "secret_key"]);
    }
}
