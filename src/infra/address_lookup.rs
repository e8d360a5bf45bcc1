//! External postal-code lookup (ViaCEP).
//!
//! Failures never reach the caller as errors: timeouts, transport errors,
//! non-2xx statuses and ViaCEP's `{"erro": true}` all become `None`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::domain::{cep, AddressInfo};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Resolves a CEP to address fields.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Accepts `00000-000` or bare digits.
    async fn lookup(&self, cep: &str) -> Option<AddressInfo>;
}

/// ViaCEP response body. Absent fields stay `None`.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    cep: Option<String>,
    logradouro: Option<String>,
    bairro: Option<String>,
    localidade: Option<String>,
    uf: Option<String>,
    erro: Option<serde_json::Value>,
}

impl ViaCepResponse {
    fn into_info(self) -> Option<AddressInfo> {
        if self.erro.is_some() {
            return None;
        }
        Some(AddressInfo {
            cep: non_empty(self.cep),
            endereco: non_empty(self.logradouro),
            bairro: non_empty(self.bairro),
            cidade: non_empty(self.localidade),
            estado: non_empty(self.uf),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// HTTP client for `{base_url}/{cep}/json/`.
pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(config.cep_lookup_url.clone(), config.cep_lookup_timeout)
    }

    async fn fetch(&self, digits: &str) -> Result<Option<AddressInfo>, reqwest::Error> {
        let url = format!("{}/{}/json/", self.base_url, digits);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            tracing::warn!(
                cep = %digits,
                status = %response.status(),
                "CEP lookup returned non-success status"
            );
            return Ok(None);
        }

        let body: ViaCepResponse = response.json().await?;
        Ok(body.into_info())
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    async fn lookup(&self, raw: &str) -> Option<AddressInfo> {
        let digits = cep::normalize(raw)?;

        match self.fetch(&digits).await {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!(cep = %digits, error = %e, "CEP lookup failed");
                None
            }
        }
    }
}
