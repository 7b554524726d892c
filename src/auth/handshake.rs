//
//  bitbucket-client
//  auth/handshake.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OAuth 1.0a Handshake
//!
//! The three-legged flow that turns consumer credentials into a user access token:
//!
//! 1. **Request token**: signed POST to `oauth/request_token/` carrying the
//!    callback URL; the response body is `oauth_token=...&oauth_token_secret=...`
//! 2. **Authorize**: the caller sends the user to `oauth/authenticate?oauth_token=...`
//!    and keeps the request token pair for step 3
//! 3. **Access token**: signed POST to `oauth/access_token/` with the request token
//!    and the verifier returned to the callback; the response carries the access pair
//!
//! A non-200 answer at step 1 or 3 yields [`ApiError::Rejected`] holding the
//! response body.

use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::common::{ApiError, DispatchResult};
use crate::api::Dispatcher;

use super::{OAuth1Signer, TokenPair};

/// Where to send the user, plus the request token needed to finish the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationRequest {
    /// The authorize URL for the user to visit
    pub url: String,
    /// The temporary request token; pass it to the access-token step
    pub request_token: TokenPair,
}

/// Obtains a temporary request token (step 1).
pub async fn fetch_request_token(dispatcher: &Dispatcher, callback_url: &str) -> DispatchResult<TokenPair> {
    let signer = OAuth1Signer::new(dispatcher.consumer()).with_callback(callback_url);
    let (status, body) = dispatcher
        .post_signed(&dispatcher.urls().request_token(), signer)
        .await?;
    parse_token_response(status, body)
}

/// Obtains a request token and builds the authorize URL for it (steps 1 and 2).
pub async fn begin_authorization(
    dispatcher: &Dispatcher,
    callback_url: &str,
) -> DispatchResult<AuthorizationRequest> {
    let request_token = fetch_request_token(dispatcher, callback_url).await?;
    Ok(AuthorizationRequest {
        url: dispatcher.urls().authenticate(&request_token.token),
        request_token,
    })
}

/// Exchanges a verifier for a durable access token (step 3).
pub async fn exchange_verifier(
    dispatcher: &Dispatcher,
    request_token: &TokenPair,
    verifier: &str,
) -> DispatchResult<TokenPair> {
    let signer = OAuth1Signer::new(dispatcher.consumer())
        .with_token(request_token)
        .with_verifier(verifier);
    let (status, body) = dispatcher
        .post_signed(&dispatcher.urls().access_token(), signer)
        .await?;
    parse_token_response(status, body)
}

fn parse_token_response(status: StatusCode, body: String) -> DispatchResult<TokenPair> {
    if status != StatusCode::OK {
        warn!(%status, "OAuth token request rejected");
        return Err(ApiError::Rejected(body));
    }

    debug!("OAuth token request accepted");
    TokenPair::from_form(&body).ok_or_else(|| {
        ApiError::Decode("token response is missing oauth_token or oauth_token_secret".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ResultTupleExt;
    use crate::api::ApiUrls;
    use crate::auth::ConsumerCredentials;
    use mockito::Matcher;
    use std::time::Duration;

    fn dispatcher(base: &str) -> Dispatcher {
        Dispatcher::new(
            ConsumerCredentials::new("consumer", "consumer-secret"),
            ApiUrls::new(base),
            Some(Duration::from_secs(5)),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_request_token_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth/request_token/")
            .match_header(
                "authorization",
                Matcher::Regex("oauth_callback=\"https%3A%2F%2Fapp.example%2Fcb\"".into()),
            )
            .with_status(200)
            .with_body("oauth_token=abc&oauth_token_secret=xyz")
            .create_async()
            .await;

        let d = dispatcher(&server.url());
        let result = fetch_request_token(&d, "https://app.example/cb").await;

        assert_eq!(result.into_tuple(), (true, Some(TokenPair::new("abc", "xyz")), None));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_token_rejected_returns_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/oauth/request_token/")
            .with_status(401)
            .with_body("Invalid consumer")
            .create_async()
            .await;

        let d = dispatcher(&server.url());
        let result = fetch_request_token(&d, "https://app.example/cb").await;
        assert_eq!(result.into_tuple(), (false, None, Some("Invalid consumer".to_string())));
    }

    #[tokio::test]
    async fn test_incomplete_token_response_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/oauth/request_token/")
            .with_status(200)
            .with_body("oauth_token=abc")
            .create_async()
            .await;

        let d = dispatcher(&server.url());
        let result = fetch_request_token(&d, "https://app.example/cb").await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_begin_authorization_builds_url() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/oauth/request_token/")
            .with_status(200)
            .with_body("oauth_token=req&oauth_token_secret=req-secret")
            .create_async()
            .await;

        let d = dispatcher(&server.url());
        let auth = begin_authorization(&d, "oob").await.unwrap();
        assert_eq!(auth.url, format!("{}/oauth/authenticate?oauth_token=req", server.url()));
        assert_eq!(auth.request_token, TokenPair::new("req", "req-secret"));
    }

    #[tokio::test]
    async fn test_exchange_verifier() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth/access_token/")
            .match_header(
                "authorization",
                Matcher::AllOf(vec![
                    Matcher::Regex("oauth_verifier=\"v123\"".into()),
                    Matcher::Regex("oauth_token=\"req\"".into()),
                ]),
            )
            .with_status(200)
            .with_body("oauth_token=access&oauth_token_secret=access-secret")
            .create_async()
            .await;

        let d = dispatcher(&server.url());
        let pair = exchange_verifier(&d, &TokenPair::new("req", "req-secret"), "v123").await;
        assert_eq!(pair, Ok(TokenPair::new("access", "access-secret")));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_exchange_verifier_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/oauth/access_token/")
            .with_status(400)
            .with_body("verifier mismatch")
            .create_async()
            .await;

        let d = dispatcher(&server.url());
        let result = exchange_verifier(&d, &TokenPair::new("req", "s"), "bad").await;
        assert_eq!(result, Err(ApiError::Rejected("verifier mismatch".to_string())));
    }
}
