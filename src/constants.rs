// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Google Cloud endpoints used to reach the cluster
pub mod gke {
    /// Base URL of the cluster management API
    pub const MANAGEMENT_API_BASE: &str = "https://container.googleapis.com/v1beta1/";
    /// Metadata server endpoint serving default service-account tokens
    pub const METADATA_TOKEN_URL: &str =
        "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";
    /// OAuth scope required by the management API
    pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
}

/// Build status value that allows a rollout to proceed
pub const SUCCESS_STATUS: &str = "SUCCESS";

/// Namespace the target Deployment lives in
pub const TARGET_NAMESPACE: &str = "default";
