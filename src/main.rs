// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use stevedore::config::Config;
use stevedore::gke::{GkeClusterFactory, MetadataTokenSource};
use stevedore::server::{self, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Stevedore");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: project={} zone={} cluster={} deployment={} container={}",
        config.project, config.zone, config.cluster, config.deployment, config.container
    );
    match &config.image {
        Some(image) => info!("Accepting builds for image basename {}", image),
        None => info!("IMAGE is not set, accepting builds for any image"),
    }
    if config.insecure_skip_tls_verify {
        warn!("TLS certificate verification towards the cluster endpoint is disabled");
    }

    // Wire up the cluster factory; tokens are fetched fresh per event
    let http = reqwest::Client::new();
    let tokens = Arc::new(MetadataTokenSource::new(http.clone()));
    let factory = Arc::new(GkeClusterFactory::new(http, tokens, &config)?);

    let server_config = ServerConfig {
        bind_addr: config.bind_addr.clone(),
    };
    let state = AppState { config, factory };

    server::run(server_config, state).await
}
