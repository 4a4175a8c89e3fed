// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster endpoint resolution and Kubernetes client construction.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::constants::gke;
use crate::error::{Result, StevedoreError};
use crate::gke::auth::TokenSource;

/// Subset of the management API's cluster descriptor
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterDescriptor {
    pub name: Option<String>,
    /// Public IP of the cluster's API server
    pub endpoint: Option<String>,
}

/// Produces an authenticated client for the target cluster.
/// Injectable so the handler can be tested against a mocked API server.
#[async_trait]
pub trait ClusterFactory: Send + Sync {
    async fn connect(&self) -> Result<kube::Client>;
}

/// Resolves a GKE cluster through the management API and builds a client for it
pub struct GkeClusterFactory {
    http: reqwest::Client,
    tokens: Arc<dyn TokenSource>,
    base_url: Url,
    project: String,
    zone: String,
    cluster: String,
    accept_invalid_certs: bool,
}

impl GkeClusterFactory {
    pub fn new(
        http: reqwest::Client,
        tokens: Arc<dyn TokenSource>,
        config: &Config,
    ) -> Result<Self> {
        let base_url = Url::parse(gke::MANAGEMENT_API_BASE).map_err(|e| {
            StevedoreError::ClusterLookupError(format!("Invalid management API base URL: {}", e))
        })?;

        Ok(Self {
            http,
            tokens,
            base_url,
            project: config.project.clone(),
            zone: config.zone.clone(),
            cluster: config.cluster.clone(),
            accept_invalid_certs: config.insecure_skip_tls_verify,
        })
    }

    /// Override the management API base URL, for tests
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    fn cluster_url(&self) -> Result<Url> {
        self.base_url
            .join(&format!(
                "projects/{}/locations/{}/clusters/{}",
                self.project, self.zone, self.cluster
            ))
            .map_err(|e| {
                StevedoreError::ClusterLookupError(format!("Failed to build cluster URL: {}", e))
            })
    }

    /// Resolve the cluster descriptor through the management API
    #[instrument(skip(self, token), fields(cluster = %self.cluster))]
    async fn resolve_cluster(&self, token: &str) -> Result<ClusterDescriptor> {
        let url = self.cluster_url()?;

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                StevedoreError::ClusterLookupError(format!("Management API request failed: {}", e))
            })?;

        let response = response.error_for_status().map_err(|e| {
            StevedoreError::ClusterLookupError(format!("Management API returned an error: {}", e))
        })?;

        response.json().await.map_err(|e| {
            StevedoreError::ClusterLookupError(format!(
                "Failed to decode cluster descriptor: {}",
                e
            ))
        })
    }
}

#[async_trait]
impl ClusterFactory for GkeClusterFactory {
    #[instrument(skip(self), fields(cluster = %self.cluster))]
    async fn connect(&self) -> Result<kube::Client> {
        let token = self.tokens.fetch_token().await?;
        let descriptor = self.resolve_cluster(&token.access_token).await?;

        let Some(endpoint) = descriptor.endpoint.as_deref() else {
            return Err(StevedoreError::ClusterLookupError(format!(
                "Cluster descriptor for {} has no endpoint",
                self.cluster
            )));
        };

        info!("Resolved cluster {} at endpoint {}", self.cluster, endpoint);
        if self.accept_invalid_certs {
            warn!("Certificate verification towards {} is disabled", endpoint);
        }

        build_client(endpoint, &token.access_token, self.accept_invalid_certs)
    }
}

/// Build a Kubernetes client for the given API server endpoint and bearer token
pub fn build_client(
    endpoint: &str,
    token: &str,
    accept_invalid_certs: bool,
) -> Result<kube::Client> {
    let cluster_url = format!("https://{}", endpoint)
        .parse::<http::Uri>()
        .map_err(|e| {
            StevedoreError::ClientBuildError(format!(
                "Invalid cluster endpoint {}: {}",
                endpoint, e
            ))
        })?;

    let mut config = kube::Config::new(cluster_url);
    config.accept_invalid_certs = accept_invalid_certs;
    config.auth_info.token = Some(SecretString::from(token.to_string()));

    kube::Client::try_from(config)
        .map_err(|e| StevedoreError::ClientBuildError(format!("Failed to create client: {}", e)))
}
