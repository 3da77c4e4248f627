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

// src/error.rs
// Host application errors. Returned from main so any failure path
// exits the process with a non-zero status and a printed reason.

use std::path::PathBuf;

use mqlink::MqlinkClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    // InvalidConfig occurs when startup validation of the supplied
    // configuration fails, before any connection attempt.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    // CaCertRead occurs when the CA bundle needed for TLS cannot
    // be read from disk.
    #[error("failed to read CA bundle {}: {source}", path.display())]
    CaCertRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    // Client wraps every client-side MQTT failure (transport errors,
    // broker rejections, timeouts).
    #[error(transparent)]
    Client(#[from] MqlinkClientError),
}

impl HostError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
