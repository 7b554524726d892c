//
//  bitbucket-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Library Entry Point
//!
//! [`BitBucket`] holds the consumer credentials and callback URL, runs the OAuth
//! handshake, and hands out authorized clients.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitbucket_client::api::BitBucket;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), bitbucket_client::api::ApiError> {
//! let bitbucket = BitBucket::builder("consumer-key", "consumer-secret", "https://app.example/cb")
//!     .timeout(Duration::from_secs(30))
//!     .build()?;
//!
//! // Step 1 + 2: send the user to `auth.url`, keep `auth.request_token`
//! let auth = bitbucket.authorization_url().await?;
//!
//! // Step 3: exchange the verifier Bitbucket passed to the callback
//! let access = bitbucket.verify_token(&auth.request_token, "verifier").await?;
//!
//! let client = bitbucket.authorized_client(access);
//! let user = client.current_user().await?;
//! println!("{}", user["display_name"]);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::api::cloud::BitBucketClient;
use crate::api::common::DispatchResult;
use crate::api::{ApiUrls, AuthorizedSession, Dispatcher, DEFAULT_API_BASE};
use crate::auth::{
    begin_authorization, exchange_verifier, fetch_request_token, AuthCredential,
    AuthorizationRequest, ConsumerCredentials, TokenPair,
};

/// Builder for [`BitBucket`].
#[derive(Debug, Clone)]
pub struct BitBucketBuilder {
    consumer: ConsumerCredentials,
    callback_url: String,
    base_url: String,
    timeout: Option<Duration>,
    auth: Option<AuthCredential>,
}

impl BitBucketBuilder {
    /// Bounds every HTTP call. Without a timeout, calls may block indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Points the client at another API base (a proxy or a test server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replaces OAuth signing of API calls with `auth`.
    ///
    /// The handshake is always OAuth-signed.
    pub fn auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn build(self) -> DispatchResult<BitBucket> {
        let dispatcher = Dispatcher::new(
            self.consumer,
            ApiUrls::new(&self.base_url),
            self.timeout,
            self.auth,
        )?;
        Ok(BitBucket {
            dispatcher: Arc::new(dispatcher),
            callback_url: self.callback_url,
        })
    }
}

/// The entry point for talking to Bitbucket with OAuth 1.0a.
#[derive(Debug, Clone)]
pub struct BitBucket {
    dispatcher: Arc<Dispatcher>,
    callback_url: String,
}

impl BitBucket {
    pub fn builder(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> BitBucketBuilder {
        BitBucketBuilder {
            consumer: ConsumerCredentials::new(consumer_key, consumer_secret),
            callback_url: callback_url.into(),
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: None,
            auth: None,
        }
    }

    /// Creates an entry point with default settings (Bitbucket Cloud, no timeout).
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> DispatchResult<Self> {
        Self::builder(consumer_key, consumer_secret, callback_url).build()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// Fetches a temporary request token.
    pub async fn request_token(&self) -> DispatchResult<TokenPair> {
        fetch_request_token(&self.dispatcher, &self.callback_url).await
    }

    /// Fetches a request token and returns the URL the user must visit.
    ///
    /// The returned request token must be kept until [`verify_token`](Self::verify_token).
    pub async fn authorization_url(&self) -> DispatchResult<AuthorizationRequest> {
        begin_authorization(&self.dispatcher, &self.callback_url).await
    }

    /// Exchanges the verifier for an access token pair.
    pub async fn verify_token(&self, request_token: &TokenPair, verifier: &str) -> DispatchResult<TokenPair> {
        exchange_verifier(&self.dispatcher, request_token, verifier).await
    }

    /// Returns a client whose requests are signed with `access_token`.
    pub fn authorized_client(&self, access_token: TokenPair) -> BitBucketClient {
        let session = AuthorizedSession::new(Arc::clone(&self.dispatcher), access_token);
        BitBucketClient::new(Arc::new(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_defaults() {
        let bitbucket = BitBucket::new("k", "s", "https://app.example/cb").unwrap();
        assert_eq!(bitbucket.callback_url(), "https://app.example/cb");
        assert_eq!(bitbucket.dispatcher().urls().base(), DEFAULT_API_BASE);
        assert_eq!(bitbucket.dispatcher().consumer(), &ConsumerCredentials::new("k", "s"));
    }

    #[tokio::test]
    async fn test_full_handshake_then_authorized_call() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/oauth/request_token/")
            .with_status(200)
            .with_body("oauth_token=req&oauth_token_secret=req-s")
            .create_async()
            .await;
        server
            .mock("POST", "/oauth/access_token/")
            .with_status(200)
            .with_body("oauth_token=acc&oauth_token_secret=acc-s")
            .create_async()
            .await;
        let user = server
            .mock("GET", "/user")
            .match_header("authorization", mockito::Matcher::Regex("oauth_token=\"acc\"".into()))
            .with_status(200)
            .with_body(r#"{"username": "octo"}"#)
            .create_async()
            .await;

        let bitbucket = BitBucket::builder("k", "s", "oob")
            .base_url(server.url())
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        let auth = bitbucket.authorization_url().await.unwrap();
        assert!(auth.url.ends_with("/oauth/authenticate?oauth_token=req"));

        let access = bitbucket.verify_token(&auth.request_token, "v").await.unwrap();
        assert_eq!(access, TokenPair::new("acc", "acc-s"));

        let client = bitbucket.authorized_client(access);
        assert_eq!(client.current_user().await, Ok(json!({"username": "octo"})));
        user.assert_async().await;
    }
}
