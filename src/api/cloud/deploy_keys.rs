//
//  bitbucket-client
//  api/cloud/deploy_keys.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository deploy keys (read-only SSH access keys).

use crate::api::common::DispatchResult;
use crate::api::{DispatchRequest, Fields};

use super::RepositoryScope;

#[derive(Debug, Clone)]
pub struct DeployKeysClient {
    scope: RepositoryScope,
}

impl DeployKeysClient {
    pub fn new(scope: RepositoryScope) -> Self {
        Self { scope }
    }

    fn collection_url(&self) -> String {
        self.scope
            .session()
            .urls()
            .repository_deploy_keys(self.scope.namespace(), self.scope.repository_name())
    }

    fn key_url(&self, key_id: &str) -> String {
        self.scope.session().urls().repository_deploy_key(
            self.scope.namespace(),
            self.scope.repository_name(),
            key_id,
        )
    }

    pub async fn all(&self) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::get(self.collection_url()))
            .await
    }

    pub async fn get(&self, key_id: &str) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::get(self.key_url(key_id)))
            .await
    }

    /// Adds a public key. `label` is shown in the repository settings.
    pub async fn create(&self, key: &str, label: &str) -> DispatchResult {
        let body = Fields::new().set("key", key).set("label", label);
        self.scope
            .session()
            .dispatch(DispatchRequest::post(self.collection_url()).form(body))
            .await
    }

    pub async fn delete(&self, key_id: &str) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::delete(self.key_url(key_id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::session::test_session;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_create_posts_form() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/repositories/team/app/deploy-keys")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("key".into(), "ssh-ed25519 AAAA".into()),
                Matcher::UrlEncoded("label".into(), "ci".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"pk": 7}"#)
            .create_async()
            .await;

        let keys = DeployKeysClient::new(RepositoryScope::new(
            test_session(&server.url()),
            "team",
            "app",
        ));
        let created = keys.create("ssh-ed25519 AAAA", "ci").await.unwrap();
        assert_eq!(created["pk"], 7);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_missing_key() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/repositories/team/app/deploy-keys/9")
            .with_status(404)
            .create_async()
            .await;

        let keys = DeployKeysClient::new(RepositoryScope::new(
            test_session(&server.url()),
            "team",
            "app",
        ));
        let err = keys.delete("9").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
