// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! GKE credential acquisition and cluster client construction.

pub mod auth;
pub mod cluster;

pub use auth::{AccessToken, MetadataTokenSource, TokenSource};
pub use cluster::{build_client, ClusterFactory, GkeClusterFactory};
