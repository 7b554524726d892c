//
//  bitbucket-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credentials and OAuth 1.0a plumbing for talking to Bitbucket.
//!
//! ## Credential Model
//!
//! - **Consumer credentials**: the application's key and secret, registered with
//!   Bitbucket as an OAuth consumer.
//! - **Token pair**: a request token (during the handshake) or an access token
//!   (afterwards), each with its secret.
//! - **Override credential**: an optional [`AuthCredential`] that replaces OAuth
//!   signing entirely (e.g. HTTP Basic with an app password).
//!
//! ## Module Structure
//!
//! - [`oauth`]: RFC 5849 HMAC-SHA1 signer
//! - [`handshake`]: the two-step request-token / access-token exchange
//! - [`keyring`]: persisting access tokens in the system keyring

mod handshake;
mod keyring;
mod oauth;

pub use self::handshake::*;
pub use self::keyring::*;
pub use self::oauth::*;

use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};

/// Application-level OAuth consumer credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerCredentials {
    /// The consumer key issued by Bitbucket
    pub key: String,
    /// The consumer secret issued by Bitbucket
    pub secret: String,
}

impl ConsumerCredentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

/// An OAuth token and its secret.
///
/// The same shape is used for the temporary request token returned by the first
/// handshake step and the durable access token returned by the second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// `oauth_token`
    pub token: String,
    /// `oauth_token_secret`
    pub secret: String,
}

impl TokenPair {
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }

    /// Parses a form-encoded token response body.
    ///
    /// Returns `None` unless both `oauth_token` and `oauth_token_secret` are present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitbucket_client::auth::TokenPair;
    ///
    /// let pair = TokenPair::from_form("oauth_token=abc&oauth_token_secret=xyz").unwrap();
    /// assert_eq!(pair, TokenPair::new("abc", "xyz"));
    /// ```
    pub fn from_form(body: &str) -> Option<Self> {
        let mut token = None;
        let mut secret = None;
        for (key, value) in url::form_urlencoded::parse(body.trim().as_bytes()) {
            match key.as_ref() {
                "oauth_token" if token.is_none() => token = Some(value.into_owned()),
                "oauth_token_secret" if secret.is_none() => secret = Some(value.into_owned()),
                _ => {}
            }
        }
        Some(Self::new(token?, secret?))
    }
}

/// A credential that bypasses OAuth signing.
///
/// When configured on the entry point, every dispatched request uses this
/// credential instead of an OAuth header.
#[derive(Debug, Clone)]
pub enum AuthCredential {
    /// HTTP Basic authentication (username + app password).
    Basic { username: String, password: String },

    /// A pre-issued bearer token.
    Bearer { token: String },
}

impl AuthCredential {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Applies this credential to a reqwest request builder.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
            Self::Bearer { token } => request.bearer_auth(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pair_from_form() {
        let pair = TokenPair::from_form("oauth_token=abc&oauth_token_secret=xyz").unwrap();
        assert_eq!(pair.token, "abc");
        assert_eq!(pair.secret, "xyz");
    }

    #[test]
    fn test_token_pair_decodes_and_ignores_extras() {
        let pair = TokenPair::from_form(
            "oauth_callback_confirmed=true&oauth_token=a%2Bb&oauth_token_secret=c%3Dd\n",
        )
        .unwrap();
        assert_eq!(pair, TokenPair::new("a+b", "c=d"));
    }

    #[test]
    fn test_token_pair_requires_both_fields() {
        assert!(TokenPair::from_form("oauth_token=abc").is_none());
        assert!(TokenPair::from_form("").is_none());
    }
}
