// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Deployment read/patch capability and container image mutation.

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use kube::{
    api::{Patch, PatchParams},
    Api, Client,
};
use tracing::{debug, instrument};

use crate::constants::TARGET_NAMESPACE;
use crate::error::Result;

/// The two Deployment operations the rollout needs, substitutable in tests
#[async_trait]
pub trait DeploymentApi: Send + Sync {
    /// Fetch a Deployment by name; a missing Deployment is `None`, not an error
    async fn get_deployment(&self, name: &str) -> Result<Option<Deployment>>;

    /// Submit the mutated Deployment as a strategic merge patch
    async fn patch_deployment(&self, name: &str, deployment: &Deployment) -> Result<Deployment>;
}

/// `DeploymentApi` backed by the cluster's apps/v1 API in the target namespace
pub struct KubeDeployments {
    api: Api<Deployment>,
}

impl KubeDeployments {
    pub fn new(client: Client) -> Self {
        Self {
            api: Api::namespaced(client, TARGET_NAMESPACE),
        }
    }
}

#[async_trait]
impl DeploymentApi for KubeDeployments {
    #[instrument(skip(self))]
    async fn get_deployment(&self, name: &str) -> Result<Option<Deployment>> {
        match self.api.get(name).await {
            Ok(deployment) => Ok(Some(deployment)),
            Err(kube::Error::Api(err)) if err.code == 404 => {
                debug!("Deployment {} not found", name);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, deployment))]
    async fn patch_deployment(&self, name: &str, deployment: &Deployment) -> Result<Deployment> {
        let patched = self
            .api
            .patch(name, &PatchParams::default(), &Patch::Strategic(deployment))
            .await?;
        Ok(patched)
    }
}

/// Set the image of every container with the given name in the Deployment's
/// pod template. Returns whether any container matched.
pub fn set_container_image(deployment: &mut Deployment, container_name: &str, image: &str) -> bool {
    let Some(containers) = deployment
        .spec
        .as_mut()
        .and_then(|spec| spec.template.spec.as_mut())
        .map(|pod| &mut pod.containers)
    else {
        return false;
    };

    let mut found = false;
    for container in containers.iter_mut() {
        if container.name == container_name {
            container.image = Some(image.to_string());
            found = true;
        }
    }
    found
}
