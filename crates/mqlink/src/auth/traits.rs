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

//! Traits for pluggable credential providers.

use async_trait::async_trait;

use crate::client::ClientCredentials;
use crate::errors::MqlinkClientError;

/// A provider that can supply MQTT credentials (username + password).
///
/// This trait allows for pluggable authentication mechanisms. Implementations
/// can fetch credentials from various sources (static, token services, Vault,
/// etc.) and handle refresh internally.
///
/// # Example
///
/// ```rust,ignore
/// use mqlink::auth::CredentialsProvider;
/// use mqlink::client::ClientCredentials;
///
/// #[derive(Debug)]
/// struct MyTokenProvider {
///     // ... your token client fields
/// }
///
/// #[async_trait::async_trait]
/// impl CredentialsProvider for MyTokenProvider {
///     async fn get_credentials(&self) -> Result<ClientCredentials, MqlinkClientError> {
///         let token = self.fetch_access_token().await?;
///         Ok(ClientCredentials {
///             username: "token".to_string(),
///             password: token,
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait CredentialsProvider: Send + Sync + std::fmt::Debug {
    /// Get the current credentials for MQTT authentication.
    ///
    /// This method may perform network calls (e.g., to fetch tokens)
    /// and should handle caching and refresh internally.
    async fn get_credentials(&self) -> Result<ClientCredentials, MqlinkClientError>;
}

/// A static credentials provider that never changes.
///
/// Use this for simple username/password authentication without token refresh.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: ClientCredentials,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: ClientCredentials {
                username: username.into(),
                password: password.into(),
            },
        }
    }
}

#[async_trait]
impl CredentialsProvider for StaticCredentials {
    async fn get_credentials(&self) -> Result<ClientCredentials, MqlinkClientError> {
        Ok(self.credentials.clone())
    }
}
