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

// src/publisher.rs
// The periodic status publish loop: one strictly-increasing counter,
// serialized fresh each tick, published to the outbound topic until
// the cancellation token fires.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use mqlink::{MqlinkClient, MqlinkClientError};
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

// StatusMessage is the outbound payload. The wire form is the exact
// text `{ "info": N }` (valid JSON, spacing included) that the device
// side expects. The counter starts at 1 and is not persisted across
// restarts.
pub struct StatusMessage {
    pub info: u64,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ \"info\": {} }}", self.info)
    }
}

// StatusSink is the seam between the publish loop and the MQTT
// client, so the loop can be driven in tests without a broker.
#[async_trait]
pub trait StatusSink: Send + Sync {
    async fn send_status(&self, topic: &str, payload: Vec<u8>) -> Result<(), MqlinkClientError>;
}

#[async_trait]
impl StatusSink for MqlinkClient {
    async fn send_status(&self, topic: &str, payload: Vec<u8>) -> Result<(), MqlinkClientError> {
        // QoS comes from the client-wide publish options (at-least-once
        // for the host).
        self.publish(topic, payload).await
    }
}

// run_publish_loop publishes a StatusMessage on every tick. The first
// publish happens immediately, then one per interval (publish, then
// sleep). A failed publish is reported and the loop keeps going; only
// cancellation ends it.
pub async fn run_publish_loop(
    sink: Arc<dyn StatusSink>,
    topic: String,
    interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut counter: u64 = 0;
    loop {
        tokio::select! {
            // Check cancellation first so a stop request never races
            // an already-due tick.
            biased;

            _ = cancel.cancelled() => {
                info!("Publish loop stopped after {} messages", counter);
                return;
            }
            _ = ticker.tick() => {
                counter += 1;
                let payload = StatusMessage { info: counter }.to_string();

                match sink.send_status(&topic, payload.clone().into_bytes()).await {
                    Ok(()) => info!("Sent: {} to {}", payload, topic),
                    Err(e) => warn!("Publish to {} failed: {}", topic, e),
                }
            }
        }
    }
}
