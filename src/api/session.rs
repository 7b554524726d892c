//
//  bitbucket-client
//  api/session.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The authorized session shared by every resource client.
//!
//! A session pairs the dispatcher with one access token. It is created once by
//! [`BitBucket::authorized_client`](crate::api::BitBucket::authorized_client) and
//! handed to each resource client behind an `Arc`, so credentials live in exactly
//! one place.

use std::sync::Arc;

use crate::api::common::DispatchResult;
use crate::api::{ApiUrls, DispatchRequest, Dispatcher};
use crate::auth::TokenPair;

/// Dispatcher plus the access token used to sign requests.
#[derive(Debug)]
pub struct AuthorizedSession {
    dispatcher: Arc<Dispatcher>,
    token: TokenPair,
}

impl AuthorizedSession {
    pub fn new(dispatcher: Arc<Dispatcher>, token: TokenPair) -> Self {
        Self { dispatcher, token }
    }

    pub fn urls(&self) -> &ApiUrls {
        self.dispatcher.urls()
    }

    pub fn token(&self) -> &TokenPair {
        &self.token
    }

    /// Dispatches `request` signed with this session's access token.
    pub async fn dispatch(&self, request: DispatchRequest) -> DispatchResult {
        self.dispatcher.dispatch(&request, Some(&self.token)).await
    }

    /// Like [`dispatch`](Self::dispatch), returning the undecoded body.
    pub async fn dispatch_text(&self, request: DispatchRequest) -> DispatchResult<String> {
        self.dispatcher.dispatch_text(&request, Some(&self.token)).await
    }
}

#[cfg(test)]
pub(crate) fn test_session(base: &str) -> Arc<AuthorizedSession> {
    use crate::auth::ConsumerCredentials;
    use std::time::Duration;

    let dispatcher = Dispatcher::new(
        ConsumerCredentials::new("key", "secret"),
        ApiUrls::new(base),
        Some(Duration::from_secs(5)),
        None,
    )
    .unwrap();
    Arc::new(AuthorizedSession::new(
        Arc::new(dispatcher),
        TokenPair::new("access", "access-secret"),
    ))
}
