// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Build notification handling: validate, resolve the cluster, patch the Deployment.

use tracing::{error, info, instrument};

use crate::config::Config;
use crate::constants::SUCCESS_STATUS;
use crate::deploy::{set_container_image, DeploymentApi, KubeDeployments};
use crate::error::Result;
use crate::event::{decode_notification, PushEnvelope};
use crate::gke::ClusterFactory;
use crate::image::ImageReference;

/// Terminal result of processing one build notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The Deployment was patched with the new image
    Patched { image: ImageReference },
    /// A validation guard rejected the event; no patch was attempted
    Skipped(&'static str),
    /// The final patch call failed; the error was logged and swallowed
    PatchFailed,
}

/// Process one build notification. Every validation failure is a terminal
/// rejection returned as `Skipped`; token and cluster lookup errors propagate.
#[instrument(skip_all)]
pub async fn handle_build_event(
    envelope: &PushEnvelope,
    config: &Config,
    factory: &dyn ClusterFactory,
) -> Result<Outcome> {
    let Some(data) = envelope.message.as_ref().and_then(|m| m.data.as_ref()) else {
        error!("Event has no data payload");
        return Ok(Outcome::Skipped("no data payload"));
    };

    let notification = match decode_notification(data) {
        Ok(notification) => notification,
        Err(e) => {
            error!("Failed to decode build notification: {}", e);
            return Ok(Outcome::Skipped("payload decode failed"));
        }
    };

    if notification.status.as_deref() != Some(SUCCESS_STATUS) {
        error!("Build status was not {}", SUCCESS_STATUS);
        return Ok(Outcome::Skipped("status was not SUCCESS"));
    }

    let Some(results) = notification.results else {
        error!("Build notification has no results");
        return Ok(Outcome::Skipped("no results"));
    };

    let Some(images) = results.images else {
        error!("Build results have no images");
        return Ok(Outcome::Skipped("no images"));
    };

    let image = match images.as_slice() {
        [built] => ImageReference::new(built.name.clone()),
        _ => {
            error!("Expected exactly 1 built image, got {}", images.len());
            return Ok(Outcome::Skipped("not exactly one image"));
        }
    };

    match config.image.as_deref() {
        None => info!("IMAGE is not set, skipping the image basename check"),
        Some(expected) => {
            let basename = image.basename();
            if basename != expected {
                error!("Image basename {} does not match expected {}", basename, expected);
                return Ok(Outcome::Skipped("image basename mismatch"));
            }
        }
    }

    let client = factory.connect().await?;
    let deployments = KubeDeployments::new(client);

    apply_image(&deployments, config, &image).await
}

/// Patch the configured Deployment to run the given image
pub async fn apply_image(
    api: &dyn DeploymentApi,
    config: &Config,
    image: &ImageReference,
) -> Result<Outcome> {
    let Some(mut deployment) = api.get_deployment(&config.deployment).await? else {
        error!("There is no deployment named {}", config.deployment);
        return Ok(Outcome::Skipped("deployment not found"));
    };

    if !set_container_image(&mut deployment, &config.container, image.as_str()) {
        error!("There is no container named {}", config.container);
        return Ok(Outcome::Skipped("container not found"));
    }

    info!("Updating deployment {} to {}", config.deployment, image);

    match api.patch_deployment(&config.deployment, &deployment).await {
        Ok(_) => {
            info!("Deployment {} patched successfully", config.deployment);
            Ok(Outcome::Patched { image: image.clone() })
        }
        Err(e) => {
            error!("Failed to patch deployment {}: {}", config.deployment, e);
            Ok(Outcome::PatchFailed)
        }
    }
}
