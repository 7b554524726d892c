//
//  bitbucket-client
//  api/cloud/account.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Top-level, account and namespace clients.

use std::sync::Arc;

use crate::api::common::DispatchResult;
use crate::api::{AuthorizedSession, DispatchRequest};

use super::{RepositoriesClient, RepositoryClient};

/// The root client returned by [`BitBucket::authorized_client`](crate::api::BitBucket::authorized_client).
#[derive(Debug, Clone)]
pub struct BitBucketClient {
    session: Arc<AuthorizedSession>,
}

impl BitBucketClient {
    pub fn new(session: Arc<AuthorizedSession>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<AuthorizedSession> {
        &self.session
    }

    /// Information about the authorized user.
    pub async fn current_user(&self) -> DispatchResult {
        let url = self.session.urls().current_user();
        self.session.dispatch(DispatchRequest::get(url)).await
    }

    /// Every repository the authorized user is a member of.
    pub async fn visible_repositories(&self) -> DispatchResult {
        let url = self.session.urls().repositories();
        self.session
            .dispatch(DispatchRequest::get(url).param("role", "member"))
            .await
    }

    /// A client for the repositories of a user or team.
    pub fn for_namespace(&self, namespace: &str) -> NamespaceClient {
        NamespaceClient {
            session: Arc::clone(&self.session),
            namespace: namespace.to_string(),
        }
    }

    pub fn accounts(&self) -> AccountsClient {
        AccountsClient {
            session: Arc::clone(&self.session),
        }
    }
}

/// Account profile lookups.
#[derive(Debug, Clone)]
pub struct AccountsClient {
    session: Arc<AuthorizedSession>,
}

impl AccountsClient {
    /// The public profile of `account`.
    pub async fn profile(&self, account: &str) -> DispatchResult {
        let url = self.session.urls().account_profile(account);
        self.session.dispatch(DispatchRequest::get(url)).await
    }
}

/// A user or team namespace.
#[derive(Debug, Clone)]
pub struct NamespaceClient {
    session: Arc<AuthorizedSession>,
    namespace: String,
}

impl NamespaceClient {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn repositories(&self) -> RepositoriesClient {
        RepositoriesClient::new(Arc::clone(&self.session), &self.namespace)
    }

    /// Shorthand for `repositories().get(name)`.
    pub fn repository(&self, name: &str) -> RepositoryClient {
        self.repositories().get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::session::test_session;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_visible_repositories_requests_member_role() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories")
            .match_query(Matcher::UrlEncoded("role".into(), "member".into()))
            .with_status(200)
            .with_body(r#"{"values": [{"name": "app"}]}"#)
            .create_async()
            .await;

        let client = BitBucketClient::new(test_session(&server.url()));
        let repos = client.visible_repositories().await.unwrap();
        assert_eq!(repos["values"][0]["name"], "app");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_account_profile() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/octo")
            .with_status(200)
            .with_body(r#"{"username": "octo"}"#)
            .create_async()
            .await;

        let client = BitBucketClient::new(test_session(&server.url()));
        assert_eq!(
            client.accounts().profile("octo").await,
            Ok(json!({"username": "octo"}))
        );
    }

    #[test]
    fn test_namespace_navigation() {
        let client = BitBucketClient::new(test_session("http://localhost"));
        let ns = client.for_namespace("team");
        assert_eq!(ns.namespace(), "team");
        let repo = ns.repository("app");
        assert_eq!(repo.namespace(), "team");
        assert_eq!(repo.repository_name(), "app");
    }
}
