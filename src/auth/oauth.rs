//
//  bitbucket-client
//  auth/oauth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OAuth 1.0a Request Signing
//!
//! This module implements HMAC-SHA1 request signing as described in RFC 5849.
//! Every request sent to Bitbucket (including the two handshake requests) carries
//! an `Authorization: OAuth ...` header produced by [`OAuth1Signer`].
//!
//! ## Signing Steps
//!
//! 1. **Collect parameters**: query parameters, form body fields and the
//!    `oauth_*` protocol parameters
//! 2. **Normalize**: percent-encode every key and value, sort, join with `&`
//! 3. **Base string**: `METHOD&encode(base-uri)&encode(normalized-params)`
//! 4. **Sign**: HMAC-SHA1 keyed with `encode(consumer_secret)&encode(token_secret)`
//! 5. **Header**: emit the protocol parameters plus `oauth_signature`
//!
//! JSON request bodies are not part of the signature.
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_client::auth::{ConsumerCredentials, OAuth1Signer, TokenPair};
//! use url::Url;
//!
//! let consumer = ConsumerCredentials::new("key", "secret");
//! let token = TokenPair::new("token", "token-secret");
//! let url = Url::parse("https://api.bitbucket.org/2.0/user").unwrap();
//!
//! let header = OAuth1Signer::new(&consumer)
//!     .with_token(&token)
//!     .authorization_header("GET", &url, &[]);
//! assert!(header.starts_with("OAuth "));
//! ```

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distr::{Alphanumeric, SampleString};
use sha1::Sha1;
use url::Url;

use super::{ConsumerCredentials, TokenPair};

/// Characters left unescaped by RFC 3986 section 2.3.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const SIGNATURE_METHOD: &str = "HMAC-SHA1";

const OAUTH_VERSION: &str = "1.0";

const NONCE_LENGTH: usize = 32;

/// Percent-encodes a string using the OAuth (RFC 3986) unreserved set.
pub fn oauth_encode(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED).to_string()
}

/// Builds OAuth 1.0a `Authorization` headers for a single request.
///
/// The signer borrows its credentials; construct one per request. Optional
/// protocol parameters are added with the `with_*` builder methods:
///
/// - [`with_token`](Self::with_token): the request or access token pair
/// - [`with_callback`](Self::with_callback): `oauth_callback` (request-token step)
/// - [`with_verifier`](Self::with_verifier): `oauth_verifier` (access-token step)
#[derive(Debug, Clone)]
pub struct OAuth1Signer<'a> {
    consumer: &'a ConsumerCredentials,
    token: Option<&'a TokenPair>,
    callback: Option<&'a str>,
    verifier: Option<&'a str>,
}

impl<'a> OAuth1Signer<'a> {
    pub fn new(consumer: &'a ConsumerCredentials) -> Self {
        Self {
            consumer,
            token: None,
            callback: None,
            verifier: None,
        }
    }

    pub fn with_token(mut self, token: &'a TokenPair) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_callback(mut self, callback: &'a str) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn with_verifier(mut self, verifier: &'a str) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Produces the `Authorization` header value for a request.
    ///
    /// # Parameters
    ///
    /// * `method` - HTTP method, any case
    /// * `url` - The full request URL; its query string is included in the signature
    /// * `form` - Form-encoded body fields (empty for JSON or bodiless requests)
    pub fn authorization_header(&self, method: &str, url: &Url, form: &[(String, String)]) -> String {
        let nonce = Alphanumeric.sample_string(&mut rand::rng(), NONCE_LENGTH);
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.header_with(method, url, form, &nonce, &timestamp)
    }

    pub(crate) fn header_with(
        &self,
        method: &str,
        url: &Url,
        form: &[(String, String)],
        nonce: &str,
        timestamp: &str,
    ) -> String {
        let mut protocol = self.protocol_params(nonce, timestamp);
        let base = self.signature_base_string(method, url, form, &protocol);
        protocol.push(("oauth_signature".to_string(), self.sign(&base)));
        protocol.sort();

        let fields: Vec<String> = protocol
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", oauth_encode(k), oauth_encode(v)))
            .collect();
        format!("OAuth {}", fields.join(", "))
    }

    fn protocol_params(&self, nonce: &str, timestamp: &str) -> Vec<(String, String)> {
        let mut params = vec![
            ("oauth_consumer_key".to_string(), self.consumer.key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
        ];
        if let Some(token) = self.token {
            params.push(("oauth_token".to_string(), token.token.clone()));
        }
        if let Some(callback) = self.callback {
            params.push(("oauth_callback".to_string(), callback.to_string()));
        }
        if let Some(verifier) = self.verifier {
            params.push(("oauth_verifier".to_string(), verifier.to_string()));
        }
        params
    }

    pub(crate) fn signature_base_string(
        &self,
        method: &str,
        url: &Url,
        form: &[(String, String)],
        protocol: &[(String, String)],
    ) -> String {
        let mut encoded: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .chain(form.iter().cloned())
            .chain(protocol.iter().cloned())
            .map(|(k, v)| (oauth_encode(&k), oauth_encode(&v)))
            .collect();
        encoded.sort();

        let normalized = encoded
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "{}&{}&{}",
            method.to_ascii_uppercase(),
            oauth_encode(&base_string_uri(url)),
            oauth_encode(&normalized)
        )
    }

    fn sign(&self, base: &str) -> String {
        let key = format!(
            "{}&{}",
            oauth_encode(&self.consumer.secret),
            self.token.map(|t| oauth_encode(&t.secret)).unwrap_or_default()
        );
        // HMAC accepts keys of any length
        let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC-SHA1 accepts any key length"));
        mac.update(base.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }
}

/// The request URI without query or fragment; default ports are omitted.
fn base_string_uri(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, url.path()),
        None => format!("{}://{}{}", url.scheme(), host, url.path()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photos_url() -> Url {
        Url::parse("http://photos.example.net/photos?file=vacation.jpg&size=original").unwrap()
    }

    #[test]
    fn test_encode_unreserved() {
        assert_eq!(oauth_encode("abc-._~"), "abc-._~");
        assert_eq!(oauth_encode("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(oauth_encode("https://x/"), "https%3A%2F%2Fx%2F");
    }

    #[test]
    fn test_base_string_includes_query_and_sorted_params() {
        let consumer = ConsumerCredentials::new("dpf43f3p2l4k3l03", "kd94hf93k423kf44");
        let token = TokenPair::new("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00");
        let signer = OAuth1Signer::new(&consumer).with_token(&token);
        let protocol = signer.protocol_params("kllo9940pd9333jh", "1191242096");

        let base = signer.signature_base_string("get", &photos_url(), &[], &protocol);
        assert_eq!(
            base,
            "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg\
             %26oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh\
             %26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096\
             %26oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal"
        );
    }

    #[test]
    fn test_known_signature() {
        let consumer = ConsumerCredentials::new("dpf43f3p2l4k3l03", "kd94hf93k423kf44");
        let token = TokenPair::new("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00");
        let header = OAuth1Signer::new(&consumer).with_token(&token).header_with(
            "GET",
            &photos_url(),
            &[],
            "kllo9940pd9333jh",
            "1191242096",
        );
        assert!(header.contains("oauth_signature=\"tR3%2BTy81lMeYAr%2FFid0kMTYa%2FWM%3D\""));
        assert!(header.contains("oauth_token=\"nnch734d00sl2jdk\""));
    }

    #[test]
    fn test_callback_and_form_fields_are_signed() {
        let consumer = ConsumerCredentials::new("key", "secret");
        let url = Url::parse("https://api.bitbucket.org/2.0/oauth/request_token/").unwrap();
        let form = vec![("kind".to_string(), "push".to_string())];
        let header = OAuth1Signer::new(&consumer)
            .with_callback("https://example.com/cb")
            .header_with("POST", &url, &form, "abc", "1");

        assert!(header.contains("oauth_callback=\"https%3A%2F%2Fexample.com%2Fcb\""));
        assert!(header.contains("oauth_signature=\"2aPBnE55lBi3Uu4htyeI3x5qaEQ%3D\""));
        assert!(!header.contains("oauth_token="));
        assert!(!header.contains("kind="));
    }

    #[test]
    fn test_base_uri_keeps_explicit_port() {
        let url = Url::parse("http://127.0.0.1:1234/2.0/user?x=1").unwrap();
        assert_eq!(base_string_uri(&url), "http://127.0.0.1:1234/2.0/user");

        let url = Url::parse("https://API.bitbucket.org:443/2.0/user").unwrap();
        assert_eq!(base_string_uri(&url), "https://api.bitbucket.org/2.0/user");
    }

    #[test]
    fn test_fresh_nonce_per_header() {
        let consumer = ConsumerCredentials::new("key", "secret");
        let url = Url::parse("https://api.bitbucket.org/2.0/user").unwrap();
        let signer = OAuth1Signer::new(&consumer);
        assert_ne!(
            signer.authorization_header("GET", &url, &[]),
            signer.authorization_header("GET", &url, &[])
        );
    }
}
