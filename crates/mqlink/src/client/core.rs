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

// src/client/core.rs
// Main MQTT client implementation: connection lifecycle, inbound
// message queueing, and handler dispatch.
//
// The client wraps rumqttc's AsyncClient/EventLoop pair. connect()
// drives the event loop until the broker's CONNACK arrives and checks
// the reason code, so authentication and transport failures surface as
// errors to the caller instead of being retried internally. After a
// successful handshake, two background tasks take over: one polling
// the event loop and queueing incoming PUBLISH packets, one draining
// the queue into the registered handler.

use std::sync::Arc;

use rumqttc::{
    AsyncClient, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS, TlsConfiguration, Transport,
};
use tokio::sync::{Mutex, RwLock, mpsc};
use tracing::{debug, error, info, warn};

use crate::client::{ClientOptions, ErasedHandler, InboundMessage, PublishOptions};
use crate::errors::MqlinkClientError;

const DEFAULT_KEEP_ALIVE: std::time::Duration = std::time::Duration::from_secs(300);
const DEFAULT_CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);
const DEFAULT_QOS: QoS = QoS::AtLeastOnce;
const DEFAULT_RETAIN: bool = false;
const DEFAULT_MESSAGE_CHANNEL_CAPACITY: usize = 1000;

const DEFAULT_CLIENT_QUEUE_SIZE: usize = 5000;

// MqlinkClient owns one broker connection for the lifetime of the
// process. No pooling, no reconnection: if the transport drops after
// connect(), subsequent operations fail and the caller decides.
pub struct MqlinkClient {
    // client is the underlying MQTT client for actual network
    // communication.
    client: Arc<AsyncClient>,
    // client_id is the client ID that we pass to the
    // underlying rumqttc::AsyncClient. The AsyncClient
    // itself doesn't provide access to it, so we store
    // it here for logging/identification purposes.
    client_id: String,
    // event_loop is stored to be consumed by connect()
    event_loop: Arc<Mutex<Option<EventLoop>>>,
    // client_options holds the optional knobs; None means
    // the const defaults apply everywhere.
    client_options: Option<ClientOptions>,
    // handler is the registered inbound message handler. Inbound
    // payloads are opaque, so there is a single handler rather than
    // a per-type dispatch table.
    handler: Arc<RwLock<Option<ErasedHandler>>>,
}

impl MqlinkClient {
    // new builds the underlying MQTT options (credentials, TLS
    // transport, keepalive) and the AsyncClient/EventLoop pair.
    // Call on_message() and connect() afterwards to begin processing.
    //
    // This is an async function because credentials may need to be
    // fetched from a credentials provider.
    pub async fn new(
        broker_host: &str,
        broker_port: u16,
        client_id: &str,
        client_options: Option<ClientOptions>,
    ) -> Result<Arc<Self>, MqlinkClientError> {
        let mut mqtt_options = MqttOptions::new(client_id, broker_host, broker_port);
        mqtt_options.set_keep_alive(
            client_options
                .as_ref()
                .and_then(|opts| opts.keep_alive)
                .unwrap_or(DEFAULT_KEEP_ALIVE),
        );
        mqtt_options.set_clean_session(false);

        // Fetch credentials from provider if configured.
        if let Some(provider) = client_options
            .as_ref()
            .and_then(|opts| opts.credentials_provider.as_ref())
        {
            let credentials = provider.get_credentials().await?;
            mqtt_options.set_credentials(credentials.username, credentials.password);
        }

        // Switch the transport to TLS when a TLS config is present.
        // The CA bundle (and optional client identity) are PEM bytes
        // already loaded by the caller.
        if let Some(tls) = client_options
            .as_ref()
            .and_then(|opts| opts.tls_config.as_ref())
        {
            mqtt_options.set_transport(Transport::Tls(TlsConfiguration::Simple {
                ca: tls.ca_certificate.clone(),
                alpn: None,
                client_auth: tls
                    .client_identity
                    .as_ref()
                    .map(|identity| (identity.certificate.clone(), identity.private_key.clone())),
            }));
        }

        let (client, event_loop) = AsyncClient::new(
            mqtt_options,
            client_options
                .as_ref()
                .and_then(|opts| opts.message_channel_capacity)
                .unwrap_or(DEFAULT_MESSAGE_CHANNEL_CAPACITY),
        );

        info!("Created MQTT client for {}:{}", broker_host, broker_port);

        Ok(Arc::new(Self {
            client: Arc::new(client),
            client_id: client_id.into(),
            event_loop: Arc::new(Mutex::new(Some(event_loop))),
            client_options,
            handler: Arc::new(RwLock::new(None)),
        }))
    }

    // connect performs the broker handshake and then starts the
    // event_loop for both *listening* AND *sending*.
    //
    // Unlike a bare rumqttc event loop, which connects lazily and
    // retries forever, this waits for the CONNACK and verifies the
    // reason code, so the caller can distinguish:
    // - transport failures (DNS, refused, TLS) -> TransportError
    // - broker refusals (bad credentials, policy) -> ConnectRejected
    // - no answer within the connect timeout -> ConnectTimeout
    pub async fn connect(self: &Arc<Self>) -> Result<(), MqlinkClientError> {
        self.clone().start_internal().await // Clone [the Arc] internally.
    }

    // start_internal does the handshake and then begins message
    // processing with background tasks. This is wrapped by connect,
    // so connect doesn't consume the Arc and the caller can just
    // call client.connect().
    //
    // The two async tasks that get created are:
    // - Event loop task that polls our AsyncClient for events (as in,
    //   new MQTT messages), and puts them into our local message queue.
    // - Dispatch task that reads from the local message queue and
    //   invokes the registered handler for each message.
    async fn start_internal(self: Arc<Self>) -> Result<(), MqlinkClientError> {
        let mut event_loop = self
            .event_loop
            .lock()
            .await
            .take()
            .ok_or(MqlinkClientError::AlreadyStartedError)?;

        // Drive the event loop by hand until the CONNACK arrives.
        // Bounded so an unresponsive broker can't hang us forever.
        let connect_timeout = self
            .client_options
            .as_ref()
            .and_then(|opts| opts.connect_timeout)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT);

        match tokio::time::timeout(connect_timeout, await_connack(&mut event_loop)).await {
            Ok(handshake) => handshake?,
            Err(_) => return Err(MqlinkClientError::ConnectTimeout(connect_timeout)),
        }

        // Create the message queue used between the event loop and
        // dispatch tasks. The client queue size should be >= the
        // message channel capacity.
        let (message_queue_tx, mut message_queue_rx) = mpsc::channel::<InboundMessage>(
            self.client_options
                .as_ref()
                .and_then(|opts| opts.client_queue_size)
                .unwrap_or(DEFAULT_CLIENT_QUEUE_SIZE),
        );

        // Event loop task. This polls our AsyncClient for events (as
        // in, new messages), loads each incoming PUBLISH into an
        // InboundMessage and adds it to our local message queue,
        // freeing up the underlying message channel to continue
        // receiving messages.
        //
        // An event loop error here is terminal for the task: there is
        // no reconnect policy in this client. The error is logged and
        // later publish/subscribe calls will fail.
        tokio::spawn(async move {
            loop {
                match event_loop.poll().await {
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        let msg = InboundMessage::from_publish(&publish);
                        match message_queue_tx.try_send(msg) {
                            Ok(_) => {}
                            Err(mpsc::error::TrySendError::Full(_)) => {
                                warn!(
                                    "Inbound queue full, dropping message from topic: {}",
                                    publish.topic
                                );
                            }
                            Err(mpsc::error::TrySendError::Closed(_)) => {
                                // The receiving end of the channel should only
                                // close if there's been a panic or the
                                // application is shutting down.
                                error!("Inbound message receiver has been dropped");
                                break;
                            }
                        }
                    }
                    Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                        // Requested shutdown; the connection is going
                        // away on purpose, so don't treat the tail end
                        // of the session as an error.
                        debug!("Disconnect sent, stopping event loop");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("MQTT event loop connection error: {:?}", e);
                        break;
                    }
                }
            }
        });

        // Dispatch task. This looks for new InboundMessages that are
        // pushed into our local message queue by the event loop task
        // above, and fires off the registered handler for each one.
        let handler_slot = self.handler.clone();
        let handler_client = self.clone();

        tokio::spawn(async move {
            while let Some(msg) = message_queue_rx.recv().await {
                let handler_guard = handler_slot.read().await;
                match handler_guard.as_ref() {
                    Some(handler) => {
                        handler(handler_client.clone(), msg).await;
                    }
                    None => {
                        warn!("No handler registered; ignoring message on topic '{}'", msg.topic);
                    }
                }
            }
        });

        info!("MQTT client connected and processing messages");
        Ok(())
    }

    // on_message registers the inbound message handler. The handler
    // receives the raw InboundMessage for every message delivered on
    // any subscribed topic; registering again replaces the previous
    // handler.
    pub async fn on_message<F, Fut>(&self, handler: F)
    where
        F: Fn(Arc<MqlinkClient>, InboundMessage) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let type_erased_handler: ErasedHandler =
            Box::new(move |client, message| Box::pin(handler(client, message)));

        let mut handler_guard = self.handler.write().await;
        if handler_guard.replace(type_erased_handler).is_some() {
            warn!("Replacing previously registered inbound message handler");
        }
        info!("Registered inbound message handler");
    }

    // subscribe subscribes to a topic with the specified QoS.
    pub async fn subscribe(&self, topic: &str, qos: QoS) -> Result<(), MqlinkClientError> {
        self.client
            .subscribe(topic, qos)
            .await
            .map_err(MqlinkClientError::ConnectionError)?;

        info!("Subscribed to topic: {} (QoS: {:?})", topic, qos);
        Ok(())
    }

    pub async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), MqlinkClientError> {
        self.publish_with_opts(
            topic,
            self.client_options
                .as_ref()
                .and_then(|opts| opts.publish_options),
            payload,
        )
        .await
    }

    // publish_with_opts sends raw bytes to the specified MQTT topic.
    // This is the low-level publishing method for direct topic control.
    pub async fn publish_with_opts(
        &self,
        topic: &str,
        publish_options: Option<PublishOptions>,
        payload: Vec<u8>,
    ) -> Result<(), MqlinkClientError> {
        // Try to get the QoS and retain from the provided PublishOptions,
        // and if not set, then fall back to the client-wide PublishOptions,
        // and if not set, then fall back to the const defaults for each.
        let qos = publish_options
            .and_then(|opts| opts.qos)
            .or_else(|| {
                self.client_options
                    .as_ref()
                    .and_then(|client_opts| client_opts.publish_options)
                    .and_then(|opts| opts.qos)
            })
            .unwrap_or(DEFAULT_QOS);
        let retain = publish_options
            .and_then(|opts| opts.retain)
            .or_else(|| {
                self.client_options
                    .as_ref()
                    .and_then(|client_opts| client_opts.publish_options)
                    .and_then(|opts| opts.retain)
            })
            .unwrap_or(DEFAULT_RETAIN);

        self.client
            .publish(topic, qos, retain, payload)
            .await
            .map_err(MqlinkClientError::ConnectionError)?;

        debug!("Published message to topic: {}", topic);
        Ok(())
    }

    // disconnect gracefully shuts down the MQTT client connection. Should
    // be called before dropping the client to ensure clean shutdown
    pub async fn disconnect(&self) -> Result<(), MqlinkClientError> {
        self.client
            .disconnect()
            .await
            .map_err(MqlinkClientError::ConnectionError)?;

        info!("MQTT client disconnected");
        Ok(())
    }

    pub fn client_id(&self) -> String {
        self.client_id.clone()
    }
}

// await_connack polls the event loop until the broker answers the
// connect handshake. The event loop validates the CONNACK itself, so
// a CONNACK delivered as an event is always a success; a refusal
// comes back as a ConnectionRefused poll error carrying the broker's
// reason code. Either way the outcome is terminal (no retry).
async fn await_connack(event_loop: &mut EventLoop) -> Result<(), MqlinkClientError> {
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(connack))) => {
                debug!("CONNACK received: {:?}", connack);
                return Ok(());
            }
            // Outgoing CONNECT and keepalive traffic; keep polling.
            Ok(_) => {}
            Err(rumqttc::ConnectionError::ConnectionRefused(code)) => {
                return Err(MqlinkClientError::connect_rejected(format!("{code:?}")));
            }
            Err(e) => return Err(MqlinkClientError::TransportError(e)),
        }
    }
}
