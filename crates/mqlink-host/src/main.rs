/*
 * SPDX-FileCopyrightText: Copyright (c) 2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: Apache-2.0
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

// src/main.rs
// Host console application: connect to the broker, subscribe the
// device-to-cloud topic, log everything that arrives, and publish a
// counter status to the cloud-to-device topic every interval until
// Ctrl+C.

use std::sync::Arc;

use clap::Parser;
use mqlink::client::{ClientCredentials, ClientOptions, ClientTlsConfig, MqlinkClient};
use mqlink::QoS;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod config;
mod error;
mod publisher;

use crate::config::{Cli, Config};
use crate::error::HostError;
use crate::publisher::StatusSink;

#[tokio::main]
async fn main() -> Result<(), HostError> {
    // Initialize logging with nice formatting.
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config = Config::from_cli(cli)?;

    // Suffix the client ID with the pid so a restarted host doesn't
    // collide with its own stale broker session.
    let client_id = format!("{}-{}", config.client_id, std::process::id());

    info!(
        "Connecting to {} on port {} as {} ...",
        config.host, config.port, client_id
    );

    let mut options = ClientOptions::default()
        .with_qos(QoS::AtLeastOnce)
        .with_credentials(ClientCredentials {
            username: config.username.clone(),
            password: config.password.clone(),
        });
    if let Some(ca_certificate) = config.ca_certificate.clone() {
        options = options.with_tls_config(ClientTlsConfig {
            ca_certificate,
            client_identity: None,
        });
    }

    let client = MqlinkClient::new(&config.host, config.port, &client_id, Some(options)).await?;

    // Register the inbound handler before connecting so nothing
    // delivered right after the handshake is missed.
    client
        .on_message(|_client, message| async move {
            info!(
                "Message received on {}: {}",
                message.topic,
                message.payload_lossy()
            );
        })
        .await;

    client.connect().await?;
    info!("Connect successful: {}:{}", config.host, config.port);

    client
        .subscribe(&config.inbound_topic, QoS::AtLeastOnce)
        .await?;

    // Ctrl+C flips the cancellation token; the publish loop winds
    // down and we disconnect instead of dying mid-write.
    let cancel = CancellationToken::new();
    let shutdown_cancel = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C signal: {e}");
            return;
        }
        info!("Received Ctrl+C, initiating graceful shutdown");
        shutdown_cancel.cancel();
    });

    let sink: Arc<dyn StatusSink> = client.clone();
    publisher::run_publish_loop(
        sink,
        config.outbound_topic.clone(),
        config.publish_interval,
        cancel,
    )
    .await;

    client.disconnect().await?;
    Ok(())
}
