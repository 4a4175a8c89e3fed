// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StevedoreError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to acquire access token: {0}")]
    TokenError(String),

    #[error("Cluster lookup failed: {0}")]
    ClusterLookupError(String),

    #[error("Failed to create cluster client: {0}")]
    ClientBuildError(String),
}

pub type Result<T> = std::result::Result<T, StevedoreError>;
