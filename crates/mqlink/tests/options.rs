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

// tests/options.rs
// Unit tests for the ClientOptions builder and its fallback behavior.

use std::time::Duration;

use mqlink::QoS;
use mqlink::client::{ClientOptions, ClientTlsConfig, ClientTlsIdentity, PublishOptions};

#[test]
fn test_default_options_are_all_unset() {
    let options = ClientOptions::default();

    assert!(options.keep_alive.is_none());
    assert!(options.message_channel_capacity.is_none());
    assert!(options.publish_options.is_none());
    assert!(options.client_queue_size.is_none());
    assert!(options.connect_timeout.is_none());
    assert!(options.credentials_provider.is_none());
    assert!(options.tls_config.is_none());
}

#[test]
fn test_builder_sets_every_field() {
    let options = ClientOptions::default()
        .with_keep_alive(Duration::from_secs(60))
        .with_message_channel_capacity(42)
        .with_client_queue_size(128)
        .with_connect_timeout(Duration::from_secs(5))
        .with_qos(QoS::AtLeastOnce)
        .with_retain(true);

    assert_eq!(options.keep_alive, Some(Duration::from_secs(60)));
    assert_eq!(options.message_channel_capacity, Some(42));
    assert_eq!(options.client_queue_size, Some(128));
    assert_eq!(options.connect_timeout, Some(Duration::from_secs(5)));

    let pub_opts = options.publish_options.expect("publish options should be set");
    assert_eq!(pub_opts.qos, Some(QoS::AtLeastOnce));
    assert_eq!(pub_opts.retain, Some(true));
}

#[test]
fn test_with_qos_preserves_existing_retain() {
    // with_qos initializes publish_options on first use and must not
    // clobber a previously set retain flag.
    let options = ClientOptions::default()
        .with_retain(true)
        .with_qos(QoS::ExactlyOnce);

    let pub_opts = options.publish_options.unwrap();
    assert_eq!(pub_opts.retain, Some(true));
    assert_eq!(pub_opts.qos, Some(QoS::ExactlyOnce));
}

#[test]
fn test_with_publish_options_replaces_whole_struct() {
    let options = ClientOptions::default()
        .with_qos(QoS::ExactlyOnce)
        .with_publish_options(PublishOptions {
            qos: Some(QoS::AtMostOnce),
            retain: None,
        });

    let pub_opts = options.publish_options.unwrap();
    assert_eq!(pub_opts.qos, Some(QoS::AtMostOnce));
    assert_eq!(pub_opts.retain, None);
}

#[test]
fn test_tls_config_without_client_identity() {
    let options = ClientOptions::default().with_tls_config(ClientTlsConfig {
        ca_certificate: b"-----BEGIN CERTIFICATE-----".to_vec(),
        client_identity: None,
    });

    let tls = options.tls_config.expect("tls config should be set");
    assert!(tls.ca_certificate.starts_with(b"-----BEGIN"));
    assert!(tls.client_identity.is_none());
}

#[test]
fn test_tls_config_with_client_identity() {
    let options = ClientOptions::default().with_tls_config(ClientTlsConfig {
        ca_certificate: b"ca".to_vec(),
        client_identity: Some(ClientTlsIdentity {
            certificate: b"cert".to_vec(),
            private_key: b"key".to_vec(),
        }),
    });

    let identity = options
        .tls_config
        .and_then(|tls| tls.client_identity)
        .expect("client identity should be set");
    assert_eq!(identity.certificate, b"cert");
    assert_eq!(identity.private_key, b"key");
}
