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

// src/client/options.rs
// Configuration options for the mqlink client.
use std::sync::Arc;

use rumqttc::QoS;
use tokio::time::Duration;

use crate::auth::{CredentialsProvider, StaticCredentials};

// ClientOptions are optional parameters that can be
// passed to the client, all of which are supposed
// to have default fallbacks.
#[derive(Clone, Debug, Default)]
pub struct ClientOptions {
    // keep_alive sets the keepalive to use for MQTT broker connections.
    // Defaults to DEFAULT_KEEP_ALIVE.
    pub keep_alive: Option<std::time::Duration>,
    // message_channel_capacity is the number of *messages* the underlying
    // async client queue should buffer before no longer reading additional
    // bytes from the wire.
    // Defaults to DEFAULT_MESSAGE_CHANNEL_CAPACITY.
    pub message_channel_capacity: Option<usize>,
    // publish_options is used when no explicit PublishOptions are provided
    // for a given publish call. If this is None, then the default consts
    // are used as fallback.
    pub publish_options: Option<PublishOptions>,
    // client_queue_size sets a limit to the number of inbound messages
    // that can be buffered in our local client queue (between our event
    // loop and message dispatch tasks) before dropping.
    // Defaults to DEFAULT_CLIENT_QUEUE_SIZE.
    pub client_queue_size: Option<usize>,
    // connect_timeout bounds how long connect() waits for the broker's
    // CONNACK before giving up.
    // Defaults to DEFAULT_CONNECT_TIMEOUT.
    pub connect_timeout: Option<std::time::Duration>,
    // credentials_provider is an optional pluggable credentials provider
    // that can dynamically fetch credentials (e.g., tokens).
    pub credentials_provider: Option<Arc<dyn CredentialsProvider>>,
    // tls_config is an optional ClientTlsConfig to provide
    // for using TLS, and optionally, mTLS. This can be used
    // with or without credentials.
    pub tls_config: Option<ClientTlsConfig>,
}

impl ClientOptions {
    // Builder methods that consume and return Self
    pub fn with_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.keep_alive = Some(keep_alive);
        self
    }

    pub fn with_message_channel_capacity(mut self, capacity: usize) -> Self {
        self.message_channel_capacity = Some(capacity);
        self
    }

    pub fn with_qos(mut self, qos: QoS) -> Self {
        // Initialize publish_options if None, then set qos
        let mut pub_opts = self.publish_options.unwrap_or_default();
        pub_opts.qos = Some(qos);
        self.publish_options = Some(pub_opts);
        self
    }

    pub fn with_retain(mut self, retain: bool) -> Self {
        let mut pub_opts = self.publish_options.unwrap_or_default();
        pub_opts.retain = Some(retain);
        self.publish_options = Some(pub_opts);
        self
    }

    pub fn with_publish_options(mut self, publish_options: PublishOptions) -> Self {
        self.publish_options = Some(publish_options);
        self
    }

    pub fn with_client_queue_size(mut self, size: usize) -> Self {
        self.client_queue_size = Some(size);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_tls_config(mut self, tls_config: ClientTlsConfig) -> Self {
        self.tls_config = Some(tls_config);
        self
    }

    /// Set a credentials provider for dynamic credential fetching.
    ///
    /// Use this for token-based authentication where credentials need
    /// to be refreshed.
    pub fn with_credentials_provider(mut self, provider: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials_provider = Some(provider);
        self
    }

    /// Set static credentials for authentication.
    ///
    /// Creates a provider from the given credentials and sets it as the
    /// credentials provider.
    pub fn with_credentials(mut self, credentials: ClientCredentials) -> Self {
        // CredentialsProvider trait is implemented by StaticCredentials.
        let provider =
            StaticCredentials::new(credentials.username.clone(), credentials.password.clone());
        self.credentials_provider = Some(Arc::new(provider));
        self
    }
}

// PublishOptions control per-publish delivery behavior. Unset fields
// fall back to the client-wide options and then to const defaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct PublishOptions {
    pub qos: Option<QoS>,
    pub retain: Option<bool>,
}

// ClientCredentials are used for providing a username
// and password to the MQTT server.
#[derive(Clone, Debug)]
pub struct ClientCredentials {
    pub username: String,
    pub password: String,
}

// ClientTlsConfig is config for using TLS (and optionally
// mTLS) with the MQTT server.
#[derive(Clone, Debug)]
pub struct ClientTlsConfig {
    // ca_certificate is PEM bytes for a CA certificate (or
    // CA certificate bundle); it is intended these were
    // probably loaded from a file, but could have also
    // been provided over the wire.
    pub ca_certificate: Vec<u8>,
    // client_identity is an optional client certificate
    // and private key to do mTLS with the MQTT server.
    pub client_identity: Option<ClientTlsIdentity>,
}

// ClientTlsIdentity is config to negotiate an mTLS
// handshake with the MQTT server.
#[derive(Clone, Debug)]
pub struct ClientTlsIdentity {
    // certificate is PEM bytes for a client certificate.
    pub certificate: Vec<u8>,
    // private_key is PEM bytes for the matching key.
    pub private_key: Vec<u8>,
}
