//
//  bitbucket-client
//  api/dispatch.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Dispatcher
//!
//! The dispatcher signs and sends requests and interprets the responses. It is
//! the only place that touches the network.
//!
//! ## One Dispatch
//!
//! 1. The query parameters are appended to the URL
//! 2. The body is encoded as a form (signed) or as JSON (unsigned)
//! 3. An OAuth 1.0a `Authorization` header is attached, unless an override
//!    [`AuthCredential`] was configured
//! 4. A 2xx body is decoded as JSON (an empty body decodes to `null`)
//! 5. While the decoded page names a `next` URL, that URL is fetched, re-signed,
//!    and its `values` appended (see [`PageAccumulator`]). A `next` URL on
//!    another scheme, host or port fails the dispatch with `ApiError::Decode`
//!
//! ## Failures
//!
//! | Condition | Error | Message |
//! |-----------|-------|---------|
//! | Timeout | `ApiError::Timeout` | `Timeout when contacting BitBucket` |
//! | Other transport failure | `ApiError::Transport` | `Exception when contacting BitBucket: ...` |
//! | Non-2xx | `ApiError::Status` | Reason phrase, or `Error: <code>` |
//!
//! Failed requests are never retried.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::api::common::{ApiError, DispatchResult, PageAccumulator};
use crate::api::{ApiUrls, Fields};
use crate::auth::{AuthCredential, ConsumerCredentials, OAuth1Signer, TokenPair};

/// One logical API request: method, URL, query parameters and body.
///
/// # Example
///
/// ```rust
/// use bitbucket_client::api::{DispatchRequest, Fields};
///
/// let request = DispatchRequest::put("https://api.bitbucket.org/2.0/repositories/t/r/branch-restrictions/1")
///     .json(Fields::new().set("kind", "push"));
/// assert!(request.is_json());
/// ```
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    method: Method,
    url: String,
    params: Vec<(String, String)>,
    body: Fields,
    json_body: bool,
}

impl DispatchRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: Vec::new(),
            body: Fields::new(),
            json_body: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Appends a query parameter.
    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }

    /// Sends `fields` as a form-encoded body.
    pub fn form(mut self, fields: Fields) -> Self {
        self.body = fields;
        self.json_body = false;
        self
    }

    /// Sends `fields` as a JSON object body.
    pub fn json(mut self, fields: Fields) -> Self {
        self.body = fields;
        self.json_body = true;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn body(&self) -> &Fields {
        &self.body
    }

    pub fn is_json(&self) -> bool {
        self.json_body
    }

    /// The URL with query parameters applied.
    fn full_url(&self) -> DispatchResult<Url> {
        let mut url = parse_url(&self.url)?;
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.params);
        }
        Ok(url)
    }
}

fn parse_url(raw: &str) -> DispatchResult<Url> {
    Url::parse(raw).map_err(|e| ApiError::InvalidInput(format!("invalid URL '{raw}': {e}")))
}

/// How a single HTTP request is authenticated.
enum Credential<'a> {
    Signed(OAuth1Signer<'a>),
    Override(&'a AuthCredential),
}

/// Signs, sends and interprets HTTP requests against the Bitbucket API.
#[derive(Debug)]
pub struct Dispatcher {
    http: Client,
    urls: ApiUrls,
    consumer: ConsumerCredentials,
    auth: Option<AuthCredential>,
}

impl Dispatcher {
    /// Creates a dispatcher.
    ///
    /// # Parameters
    ///
    /// * `consumer` - OAuth consumer key and secret
    /// * `urls` - Endpoint builder (determines the API base)
    /// * `timeout` - Bound applied to every underlying HTTP call
    /// * `auth` - Optional credential that replaces OAuth signing for dispatched requests
    pub fn new(
        consumer: ConsumerCredentials,
        urls: ApiUrls,
        timeout: Option<Duration>,
        auth: Option<AuthCredential>,
    ) -> DispatchResult<Self> {
        let mut builder = Client::builder().user_agent(format!("bbc/{}", crate::VERSION));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            http,
            urls,
            consumer,
            auth,
        })
    }

    pub fn urls(&self) -> &ApiUrls {
        &self.urls
    }

    pub fn consumer(&self) -> &ConsumerCredentials {
        &self.consumer
    }

    /// Dispatches `request` signed with `token`, following pagination.
    pub async fn dispatch(&self, request: &DispatchRequest, token: Option<&TokenPair>) -> DispatchResult {
        let mut url = request.full_url()?;
        let origin = url.origin();
        let mut pages = PageAccumulator::new(url.as_str());

        loop {
            debug!(method = %request.method, %url, page = pages.followed() + 1, "Dispatching request");
            let response = self
                .send(&request.method, &url, &request.body, request.json_body, self.credential(token))
                .await
                .inspect_err(|e| warn!(method = %request.method, %url, "Request failed: {e}"))?;
            let payload = read_json(response)
                .await
                .inspect_err(|e| warn!(method = %request.method, %url, "Request failed: {e}"))?;

            match pages.push(payload) {
                Some(next) => {
                    url = parse_url(&next)?;
                    if url.origin() != origin {
                        warn!(method = %request.method, %url, "Refusing to follow next page on another origin");
                        return Err(ApiError::Decode(format!("next page '{next}' is on a different origin")));
                    }
                }
                None => break,
            }
        }

        Ok(pages.finish())
    }

    /// Dispatches `request` and returns the raw response body instead of decoding it.
    pub async fn dispatch_text(
        &self,
        request: &DispatchRequest,
        token: Option<&TokenPair>,
    ) -> DispatchResult<String> {
        let url = request.full_url()?;
        debug!(method = %request.method, %url, "Dispatching raw request");
        let response = self
            .send(&request.method, &url, &request.body, request.json_body, self.credential(token))
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(method = %request.method, %url, %status, "Request failed");
            return Err(ApiError::from_status(status));
        }
        Ok(response.text().await?)
    }

    /// Sends a bodiless, OAuth-signed POST and returns the status and body text.
    ///
    /// Used by the handshake, which interprets the response itself and always
    /// signs, even when an override credential is configured.
    pub(crate) async fn post_signed(
        &self,
        url: &str,
        signer: OAuth1Signer<'_>,
    ) -> DispatchResult<(StatusCode, String)> {
        let url = parse_url(url)?;
        debug!(%url, "Sending signed OAuth request");
        let response = self
            .send(&Method::POST, &url, &Fields::new(), false, Credential::Signed(signer))
            .await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    fn credential<'a>(&'a self, token: Option<&'a TokenPair>) -> Credential<'a> {
        match &self.auth {
            Some(auth) => Credential::Override(auth),
            None => {
                let signer = OAuth1Signer::new(&self.consumer);
                Credential::Signed(match token {
                    Some(token) => signer.with_token(token),
                    None => signer,
                })
            }
        }
    }

    async fn send(
        &self,
        method: &Method,
        url: &Url,
        body: &Fields,
        json_body: bool,
        credential: Credential<'_>,
    ) -> DispatchResult<Response> {
        let form = if json_body { Vec::new() } else { body.to_form() };
        let mut builder = self.http.request(method.clone(), url.clone());

        builder = match credential {
            Credential::Signed(signer) => {
                builder.header(AUTHORIZATION, signer.authorization_header(method.as_str(), url, &form))
            }
            Credential::Override(auth) => auth.apply_to_request(builder),
        };

        if json_body {
            builder = builder.json(body);
        } else if !form.is_empty() {
            builder = builder.form(&form);
        }

        Ok(builder.send().await?)
    }
}

async fn read_json(response: Response) -> DispatchResult<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        debug!(%status, %body, "Non-success response");
        return Err(ApiError::from_status(status));
    }

    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::{ResultTupleExt, TIMEOUT_MESSAGE};
    use mockito::Matcher;
    use serde_json::json;

    fn dispatcher(base: &str) -> Dispatcher {
        Dispatcher::new(
            ConsumerCredentials::new("key", "secret"),
            ApiUrls::new(base),
            Some(Duration::from_millis(500)),
            None,
        )
        .unwrap()
    }

    fn token() -> TokenPair {
        TokenPair::new("tok", "tok-secret")
    }

    #[tokio::test]
    async fn test_get_success_returns_decoded_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/2.0/repositories/team")
            .match_header("authorization", Matcher::Regex("^OAuth .*oauth_token=\"tok\"".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"values":[{"name":"a"}]}"#)
            .create_async()
            .await;

        let d = dispatcher(&format!("{}/2.0", server.url()));
        let url = d.urls().repositories_for_namespace("team");
        let result = d.dispatch(&DispatchRequest::get(url), Some(&token())).await;

        assert_eq!(result.into_tuple(), (true, Some(json!({"values": [{"name": "a"}]})), None));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_not_found_returns_reason() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/2.0/user")
            .with_status(404)
            .with_body("{\"error\": {\"message\": \"nope\"}}")
            .create_async()
            .await;

        let d = dispatcher(&format!("{}/2.0", server.url()));
        let result = d.dispatch(&DispatchRequest::get(d.urls().current_user()), Some(&token())).await;

        assert_eq!(result.into_tuple(), (false, None, Some("Not Found".to_string())));
    }

    #[tokio::test]
    async fn test_non_success_statuses_fail() {
        let mut server = mockito::Server::new_async().await;
        for status in [400usize, 401, 403, 409, 500, 503] {
            let path = format!("/s{status}");
            server.mock("DELETE", path.as_str()).with_status(status).create_async().await;

            let d = dispatcher(&server.url());
            let url = format!("{}{}", server.url(), path);
            let (success, payload, error) = d
                .dispatch(&DispatchRequest::delete(url), Some(&token()))
                .await
                .into_tuple();

            assert!(!success);
            assert!(payload.is_none());
            assert!(!error.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let mut server = mockito::Server::new_async().await;
        server.mock("DELETE", "/r").with_status(204).create_async().await;

        let d = dispatcher(&server.url());
        let result = d
            .dispatch(&DispatchRequest::delete(format!("{}/r", server.url())), None)
            .await;
        assert_eq!(result, Ok(Value::Null));
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/r").with_status(200).with_body("<html>").create_async().await;

        let d = dispatcher(&server.url());
        let result = d.dispatch(&DispatchRequest::get(format!("{}/r", server.url())), None).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_query_params_are_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories")
            .match_query(Matcher::UrlEncoded("role".into(), "member".into()))
            .with_status(200)
            .with_body("{\"values\": []}")
            .create_async()
            .await;

        let d = dispatcher(&server.url());
        let request = DispatchRequest::get(d.urls().repositories()).param("role", "member");
        assert!(d.dispatch(&request, Some(&token())).await.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_json_body_sets_content_type() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/x")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"kind": "push"})))
            .with_status(200)
            .with_body("{\"id\": 1}")
            .create_async()
            .await;

        let d = dispatcher(&server.url());
        let request = DispatchRequest::put(format!("{}/x", server.url()))
            .json(Fields::new().set("kind", "push"));
        assert_eq!(d.dispatch(&request, Some(&token())).await, Ok(json!({"id": 1})));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_form_body_is_url_encoded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/forks")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("name=fork".into()),
                Matcher::Regex("is_private=true".into()),
            ]))
            .with_status(201)
            .with_body("{}")
            .create_async()
            .await;

        let d = dispatcher(&server.url());
        let request = DispatchRequest::post(format!("{}/forks", server.url()))
            .form(Fields::new().set("name", "fork").set("is_private", true));
        assert!(d.dispatch(&request, Some(&token())).await.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_follows_next_pages() {
        let mut server = mockito::Server::new_async().await;
        let page2 = format!("{}/items?page=2", server.url());
        server
            .mock("GET", "/items")
            .match_query(Matcher::Missing)
            .with_status(200)
            .with_body(json!({"values": [1, 2], "page": 1, "next": page2}).to_string())
            .create_async()
            .await;
        let second = server
            .mock("GET", "/items")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_body(json!({"values": [3], "page": 2}).to_string())
            .expect(1)
            .create_async()
            .await;

        let d = dispatcher(&server.url());
        let result = d
            .dispatch(&DispatchRequest::get(format!("{}/items", server.url())), Some(&token()))
            .await;

        assert_eq!(result, Ok(json!({"values": [1, 2, 3], "page": 1})));
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_next_back_to_first_url_is_not_refetched() {
        let mut server = mockito::Server::new_async().await;
        let first = format!("{}/items", server.url());
        let mock = server
            .mock("GET", "/items")
            .with_status(200)
            .with_body(json!({"values": [1], "next": first}).to_string())
            .expect(1)
            .create_async()
            .await;

        let d = dispatcher(&server.url());
        let payload = d.dispatch(&DispatchRequest::get(first.clone()), Some(&token())).await.unwrap();

        assert_eq!(payload["values"], json!([1]));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_next_on_other_origin_is_not_followed() {
        let mut server = mockito::Server::new_async().await;
        let mut elsewhere = mockito::Server::new_async().await;
        server
            .mock("GET", "/items")
            .with_status(200)
            .with_body(json!({"values": [1], "next": format!("{}/items", elsewhere.url())}).to_string())
            .create_async()
            .await;
        let leaked = elsewhere
            .mock("GET", Matcher::Any)
            .with_status(200)
            .with_body(json!({"values": [2]}).to_string())
            .expect(0)
            .create_async()
            .await;

        let d = Dispatcher::new(
            ConsumerCredentials::new("key", "secret"),
            ApiUrls::new(&server.url()),
            None,
            Some(AuthCredential::basic("user", "pass")),
        )
        .unwrap();
        let result = d
            .dispatch(&DispatchRequest::get(format!("{}/items", server.url())), None)
            .await;

        assert!(matches!(result, Err(ApiError::Decode(_))));
        leaked.assert_async().await;
    }

    #[tokio::test]
    async fn test_failure_on_later_page_fails_whole_dispatch() {
        let mut server = mockito::Server::new_async().await;
        let page2 = format!("{}/items?page=2", server.url());
        server
            .mock("GET", "/items")
            .match_query(Matcher::Missing)
            .with_status(200)
            .with_body(json!({"values": [1], "next": page2}).to_string())
            .create_async()
            .await;
        server
            .mock("GET", "/items")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(502)
            .create_async()
            .await;

        let d = dispatcher(&server.url());
        let result = d
            .dispatch(&DispatchRequest::get(format!("{}/items", server.url())), None)
            .await;
        assert_eq!(result.unwrap_err().to_string(), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_read_timeout_yields_sentinel() {
        // Accepts connections but never answers.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let mut held = Vec::new();
            for stream in listener.incoming().flatten() {
                held.push(stream);
            }
        });

        let base = format!("http://{addr}");
        let d = dispatcher(&base);
        for request in [
            DispatchRequest::get(format!("{base}/a")),
            DispatchRequest::post(format!("{base}/b")).json(Fields::new().set("k", "v")),
        ] {
            let (success, payload, error) = d.dispatch(&request, Some(&token())).await.into_tuple();
            assert!(!success);
            assert!(payload.is_none());
            assert_eq!(error.as_deref(), Some(TIMEOUT_MESSAGE));
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let d = dispatcher(&format!("http://{addr}"));
        let result = d.dispatch(&DispatchRequest::get(format!("http://{addr}/x")), None).await;
        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("Exception when contacting BitBucket: "));
    }

    #[tokio::test]
    async fn test_override_credential_replaces_signature() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/user")
            .match_header("authorization", "Basic dXNlcjpwYXNz")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let d = Dispatcher::new(
            ConsumerCredentials::new("key", "secret"),
            ApiUrls::new(&server.url()),
            None,
            Some(AuthCredential::basic("user", "pass")),
        )
        .unwrap();
        assert!(d.dispatch(&DispatchRequest::get(d.urls().current_user()), Some(&token())).await.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_dispatch_text_returns_raw_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/raw/main/README.md")
            .with_status(200)
            .with_body("# hello\n")
            .create_async()
            .await;

        let d = dispatcher(&server.url());
        let text = d
            .dispatch_text(&DispatchRequest::get(format!("{}/raw/main/README.md", server.url())), None)
            .await;
        assert_eq!(text, Ok("# hello\n".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_url_is_local_error() {
        let d = dispatcher("http://localhost");
        let result = d.dispatch(&DispatchRequest::get("not a url"), None).await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }
}
