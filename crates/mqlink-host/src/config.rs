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

// src/config.rs
// Startup configuration for the host. Every connection parameter is
// supplied via flags or environment variables; nothing is hardcoded.
// Validation happens once, before any connection attempt.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::HostError;

#[derive(Parser, Debug)]
#[command(name = "mqlink-host")]
#[command(
    about = "Console host that exchanges messages with a device over an MQTT broker.",
    long_about = None
)]
pub struct Cli {
    // MQTT broker hostname
    #[arg(long, env = "MQLINK_BROKER_HOST")]
    pub host: String,

    // MQTT broker port
    #[arg(long, env = "MQLINK_BROKER_PORT", default_value_t = 8883)]
    pub port: u16,

    // Whether to wrap the broker connection in TLS
    #[arg(
        long,
        env = "MQLINK_USE_TLS",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub use_tls: bool,

    // Broker username
    #[arg(long, env = "MQLINK_USERNAME")]
    pub username: String,

    // Broker password
    #[arg(long, env = "MQLINK_PASSWORD", hide_env_values = true)]
    pub password: String,

    // PEM CA bundle used to verify the broker certificate when TLS
    // is enabled
    #[arg(
        long,
        env = "MQLINK_CA_CERT",
        default_value = "/etc/ssl/certs/ca-certificates.crt"
    )]
    pub ca_cert: PathBuf,

    // Client ID prefix presented to the broker
    #[arg(long, env = "MQLINK_CLIENT_ID", default_value = "mqlink-host")]
    pub client_id: String,

    // Topic carrying device-to-cloud traffic (subscribed)
    #[arg(long, env = "MQLINK_INBOUND_TOPIC", default_value = "lq_d2c")]
    pub inbound_topic: String,

    // Topic carrying cloud-to-device traffic (published)
    #[arg(long, env = "MQLINK_OUTBOUND_TOPIC", default_value = "lq_c2d")]
    pub outbound_topic: String,

    // Seconds between status publishes
    #[arg(long, env = "MQLINK_PUBLISH_INTERVAL_SECS", default_value_t = 10)]
    pub publish_interval_secs: u64,
}

// Config is the validated form of the CLI arguments. Immutable once
// constructed; owned by main for the process lifetime.
#[derive(Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    // ca_certificate is the loaded PEM bundle; None when TLS is off.
    pub ca_certificate: Option<Vec<u8>>,
    pub client_id: String,
    pub inbound_topic: String,
    pub outbound_topic: String,
    pub publish_interval: Duration,
}

impl Config {
    // from_cli validates the raw arguments and loads the CA bundle.
    // Any failure here is terminal before a connection is attempted.
    pub fn from_cli(cli: Cli) -> Result<Self, HostError> {
        if cli.host.trim().is_empty() {
            return Err(HostError::invalid_config("broker host must not be empty"));
        }
        if cli.port == 0 {
            return Err(HostError::invalid_config("broker port must be non-zero"));
        }
        if cli.username.trim().is_empty() {
            return Err(HostError::invalid_config("username must not be empty"));
        }
        if cli.password.is_empty() {
            return Err(HostError::invalid_config("password must not be empty"));
        }
        if cli.client_id.trim().is_empty() {
            return Err(HostError::invalid_config("client ID must not be empty"));
        }
        if cli.inbound_topic.trim().is_empty() {
            return Err(HostError::invalid_config("inbound topic must not be empty"));
        }
        if cli.outbound_topic.trim().is_empty() {
            return Err(HostError::invalid_config("outbound topic must not be empty"));
        }
        if cli.publish_interval_secs == 0 {
            return Err(HostError::invalid_config(
                "publish interval must be at least one second",
            ));
        }

        let ca_certificate = if cli.use_tls {
            let pem = std::fs::read(&cli.ca_cert).map_err(|source| HostError::CaCertRead {
                path: cli.ca_cert.clone(),
                source,
            })?;
            Some(pem)
        } else {
            None
        };

        Ok(Self {
            host: cli.host,
            port: cli.port,
            username: cli.username,
            password: cli.password,
            ca_certificate,
            client_id: cli.client_id,
            inbound_topic: cli.inbound_topic,
            outbound_topic: cli.outbound_topic,
            publish_interval: Duration::from_secs(cli.publish_interval_secs),
        })
    }
}
