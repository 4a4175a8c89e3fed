// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Access token acquisition for the Google Cloud APIs.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::constants::gke;
use crate::error::{Result, StevedoreError};

/// Short-lived bearer credential for the Google Cloud APIs
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: u64,
    pub token_type: String,
}

/// Source of bearer credentials, injectable so tests never touch real infrastructure
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_token(&self) -> Result<AccessToken>;
}

/// Fetches tokens for the default service account from the GCE metadata server.
/// A fresh token is fetched per invocation; nothing is cached.
pub struct MetadataTokenSource {
    http: reqwest::Client,
    token_url: String,
}

impl MetadataTokenSource {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            token_url: gke::METADATA_TOKEN_URL.to_string(),
        }
    }
}

#[async_trait]
impl TokenSource for MetadataTokenSource {
    #[instrument(skip(self))]
    async fn fetch_token(&self) -> Result<AccessToken> {
        let response = self
            .http
            .get(&self.token_url)
            .header("Metadata-Flavor", "Google")
            .query(&[("scopes", gke::CLOUD_PLATFORM_SCOPE)])
            .send()
            .await
            .map_err(|e| {
                StevedoreError::TokenError(format!("Metadata server request failed: {}", e))
            })?;

        let response = response.error_for_status().map_err(|e| {
            StevedoreError::TokenError(format!("Metadata server returned an error: {}", e))
        })?;

        let token: AccessToken = response.json().await.map_err(|e| {
            StevedoreError::TokenError(format!("Failed to decode token response: {}", e))
        })?;

        debug!("Fetched access token, expires in {}s", token.expires_in);
        Ok(token)
    }
}
