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

// src/lib.rs
// Main exports for the mqlink MQTT client lifecycle library.

pub mod auth;
pub mod client;
pub mod errors;

// Export some things for convenience.
pub use auth::{CredentialsProvider, StaticCredentials};
pub use client::{
    ClientCredentials, ClientOptions, ClientTlsConfig, ClientTlsIdentity, InboundMessage,
    MqlinkClient, PublishOptions,
};
pub use errors::MqlinkClientError;
pub use rumqttc::QoS;
