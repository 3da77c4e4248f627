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

// src/errors.rs
// Error types for error handling throughout the MQTT client library.

use thiserror::Error;

// MqlinkClientError covers all possible error conditions in the
// MQTT client. Each variant provides specific context about what
// went wrong and why, or it should, at least.
#[derive(Error, Debug)]
pub enum MqlinkClientError {
    // ConnectionError occurs when a request to the underlying client
    // fails (publish/subscribe/disconnect while the request channel
    // is unavailable).
    #[error("MQTT connection error: {0}")]
    ConnectionError(#[from] rumqttc::ClientError),
    // TransportError occurs when the network transport itself fails
    // while talking to the broker (DNS resolution, connection refused,
    // TLS handshake, socket I/O).
    #[error("MQTT transport error: {0}")]
    TransportError(#[from] rumqttc::ConnectionError),
    // ConnectRejected occurs when the broker answers the connect
    // handshake with a non-success reason code (bad credentials,
    // broker policy).
    #[error("broker rejected connection: {0}")]
    ConnectRejected(String),
    // ConnectTimeout occurs when no CONNACK arrives within the
    // configured connect timeout.
    #[error("timed out after {0:?} waiting for broker CONNACK")]
    ConnectTimeout(std::time::Duration),
    // AlreadyStartedError occurs when connect() has already
    // been called on the client.
    #[error("already started error: connect() has already been called on the client")]
    AlreadyStartedError,
    // CredentialsError occurs when fetching credentials from a provider fails.
    #[error("credentials provider error: {0}")]
    CredentialsError(String),
}

// Convenience implementations for creating common error types.
impl MqlinkClientError {
    // Create a ConnectRejected error carrying the broker's reason code.
    pub fn connect_rejected(reason: impl Into<String>) -> Self {
        Self::ConnectRejected(reason.into())
    }

    // Create a CredentialsError with a descriptive message.
    pub fn credentials_error(message: impl Into<String>) -> Self {
        Self::CredentialsError(message.into())
    }

    // Check if this error is related to network connectivity.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::ConnectionError(_) | Self::TransportError(_))
    }

    // Check if this error is a broker-side refusal of the connect
    // handshake, as opposed to a transport failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::ConnectRejected(_))
    }
}
