// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HTTP ingress for Pub/Sub push delivery of build notifications.

use actix_web::{post, web, App, HttpResponse, HttpServer, Responder};
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::event::PushEnvelope;
use crate::gke::ClusterFactory;
use crate::handler::handle_build_event;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
}

pub struct AppState {
    pub config: Config,
    pub factory: Arc<dyn ClusterFactory>,
}

/// Receive one pushed build notification. Rejections and patch failures are
/// acknowledged with 204 so the push subscription does not redeliver; token
/// and cluster lookup failures return 500 and leave redelivery to the
/// subscription.
#[post("/")]
async fn receive_event(
    state: web::Data<AppState>,
    envelope: web::Json<PushEnvelope>,
) -> impl Responder {
    match handle_build_event(&envelope, &state.config, state.factory.as_ref()).await {
        Ok(outcome) => {
            info!("Event processed: {:?}", outcome);
            HttpResponse::NoContent().finish()
        }
        Err(e) => {
            error!("Event processing failed: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn run(config: ServerConfig, state: AppState) -> anyhow::Result<()> {
    let state = web::Data::new(state);

    info!("Binding to {}", config.bind_addr);

    HttpServer::new(move || App::new().app_data(state.clone()).service(receive_event))
        .bind(&config.bind_addr)?
        .run()
        .await?;

    Ok(())
}
