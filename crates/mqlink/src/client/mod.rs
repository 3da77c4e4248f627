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

// src/client/mod.rs
// Client module wiring: the inbound message type handed to handlers,
// the type-erased handler alias, and the public client exports.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

mod core;
mod options;

pub use self::core::MqlinkClient;
pub use options::{
    ClientCredentials, ClientOptions, ClientTlsConfig, ClientTlsIdentity, PublishOptions,
};

// InboundMessage is a message received on a subscribed topic. The
// payload is opaque bytes; no schema is enforced by the client.
#[derive(Clone, Debug)]
pub struct InboundMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl InboundMessage {
    // from_publish copies the incoming PUBLISH packet out of the
    // transport's buffer so the event loop can keep reading.
    pub(crate) fn from_publish(publish: &rumqttc::Publish) -> Self {
        Self {
            topic: publish.topic.clone(),
            payload: publish.payload.to_vec(),
        }
    }

    // payload_lossy renders the payload for display. Inbound payloads
    // are not required to be valid UTF-8.
    pub fn payload_lossy(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

// ErasedHandler is the type-erased form that registered message
// handlers are stored as.
pub(crate) type ErasedHandler = Box<
    dyn Fn(Arc<MqlinkClient>, InboundMessage) -> Pin<Box<dyn Future<Output = ()> + Send>>
        + Send
        + Sync,
>;
