// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Cloud project that owns the cluster
    pub project: String,
    /// Compute zone or region the cluster runs in
    pub zone: String,
    /// Name of the GKE cluster hosting the Deployment
    pub cluster: String,
    /// Name of the Deployment to update
    pub deployment: String,
    /// Expected image basename; unset disables the basename check
    pub image: Option<String>,
    /// Name of the container to update within the Deployment's pod template
    pub container: String,
    /// HTTP listen address for the push endpoint
    pub bind_addr: String,
    /// Skip TLS certificate verification towards the cluster endpoint
    pub insecure_skip_tls_verify: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let project = env::var("PROJECT").context("PROJECT environment variable not set")?;
        let zone = env::var("ZONE").context("ZONE environment variable not set")?;
        let cluster = env::var("CLUSTER").context("CLUSTER environment variable not set")?;
        let deployment =
            env::var("DEPLOYMENT").context("DEPLOYMENT environment variable not set")?;
        let container = env::var("CONTAINER").context("CONTAINER environment variable not set")?;
        let image = env::var("IMAGE").ok();
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "[::]:8080".to_string());
        // The GKE endpoint is reached by IP, so certificate verification is off by default
        let insecure_skip_tls_verify: bool = env::var("INSECURE_SKIP_TLS_VERIFY")
            .unwrap_or("true".to_string())
            .parse()
            .unwrap_or(true);

        Ok(Config {
            project,
            zone,
            cluster,
            deployment,
            image,
            container,
            bind_addr,
            insecure_skip_tls_verify,
        })
    }
}
