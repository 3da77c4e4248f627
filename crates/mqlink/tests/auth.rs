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

// tests/auth.rs
// Unit tests for authentication functionality: the credentials
// provider trait and the static provider implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mqlink::auth::{CredentialsProvider, StaticCredentials};
use mqlink::client::{ClientCredentials, ClientOptions};
use mqlink::errors::MqlinkClientError;

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// A mock credentials provider for testing.
#[derive(Debug)]
struct MockCredentialsProvider {
    username: String,
    password: String,
    call_count: AtomicUsize,
}

impl MockCredentialsProvider {
    fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            call_count: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialsProvider for MockCredentialsProvider {
    async fn get_credentials(&self) -> Result<ClientCredentials, MqlinkClientError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(ClientCredentials {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}

/// A mock credentials provider that returns errors.
#[derive(Debug)]
struct FailingCredentialsProvider;

#[async_trait]
impl CredentialsProvider for FailingCredentialsProvider {
    async fn get_credentials(&self) -> Result<ClientCredentials, MqlinkClientError> {
        Err(MqlinkClientError::credentials_error(
            "Credentials fetch failed",
        ))
    }
}

// =============================================================================
// StaticCredentials Tests
// =============================================================================

#[tokio::test]
async fn test_static_credentials() {
    let provider = StaticCredentials::new("user", "pass");
    let creds = provider.get_credentials().await.unwrap();

    assert_eq!(creds.username, "user");
    assert_eq!(creds.password, "pass");
}

#[tokio::test]
async fn test_static_credentials_multiple_calls() {
    let provider = StaticCredentials::new("user", "pass");

    // Multiple calls should return the same credentials
    for _ in 0..3 {
        let creds = provider.get_credentials().await.unwrap();
        assert_eq!(creds.username, "user");
        assert_eq!(creds.password, "pass");
    }
}

#[test]
fn test_static_credentials_debug() {
    let provider = StaticCredentials::new("user", "secret");
    let debug_output = format!("{:?}", provider);

    // Should be debuggable
    assert!(debug_output.contains("StaticCredentials"));
}

// =============================================================================
// CredentialsProvider Tests
// =============================================================================

#[tokio::test]
async fn test_mock_credentials_provider() {
    let provider = MockCredentialsProvider::new("host-app", "s3cret");

    let creds = provider.get_credentials().await.unwrap();
    assert_eq!(creds.username, "host-app");
    assert_eq!(creds.password, "s3cret");
    assert_eq!(provider.call_count(), 1);

    // Call again
    let creds2 = provider.get_credentials().await.unwrap();
    assert_eq!(creds2.username, "host-app");
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_failing_credentials_provider() {
    let provider = FailingCredentialsProvider;

    let err = provider.get_credentials().await.unwrap_err();
    match err {
        MqlinkClientError::CredentialsError(msg) => {
            assert!(msg.contains("Credentials fetch failed"));
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn test_provider_as_trait_object() {
    let provider: Arc<dyn CredentialsProvider> =
        Arc::new(MockCredentialsProvider::new("obj", "pw"));

    let creds = provider.get_credentials().await.unwrap();
    assert_eq!(creds.username, "obj");
}

// =============================================================================
// ClientOptions integration
// =============================================================================

#[tokio::test]
async fn test_with_credentials_sets_static_provider() {
    let options = ClientOptions::default().with_credentials(ClientCredentials {
        username: "user".to_string(),
        password: "pass".to_string(),
    });

    let provider = options.credentials_provider.expect("provider should be set");
    let creds = provider.get_credentials().await.unwrap();
    assert_eq!(creds.username, "user");
    assert_eq!(creds.password, "pass");
}

#[tokio::test]
async fn test_with_credentials_provider_is_used_verbatim() {
    let mock = Arc::new(MockCredentialsProvider::new("dyn-user", "dyn-pass"));
    let options = ClientOptions::default().with_credentials_provider(mock.clone());

    let provider = options.credentials_provider.expect("provider should be set");
    let creds = provider.get_credentials().await.unwrap();
    assert_eq!(creds.username, "dyn-user");
    assert_eq!(mock.call_count(), 1);
}
