//
//  bitbucket-client
//  api/cloud/pipelines.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pipelines, pipelines configuration and repository variables.
//!
//! ## Variables
//!
//! Repository variables are exposed to every pipeline step as environment
//! variables. Secured variables are write-only: Bitbucket never returns their
//! value.
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | list | GET | `pipelines_config/variables/?pagelen=100` |
//! | view | GET | `pipelines_config/variables/{uuid}` |
//! | create | POST | `pipelines_config/variables/` |
//! | update | PUT | `pipelines_config/variables/{uuid}` |
//! | delete | DELETE | `pipelines_config/variables/{uuid}` |
//!
//! The listing asks for the largest page size because the endpoint's default
//! pages omit variables.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_client::api::cloud::{RepositoryClient, VariableUpdate};
//!
//! # async fn example(repo: RepositoryClient) -> Result<(), bitbucket_client::api::ApiError> {
//! let vars = repo.pipelines().variables();
//! let created = vars.create("DEPLOY_TOKEN", "s3cr3t", true).await?;
//!
//! // Rotate the value only
//! let uuid = created["uuid"].as_str().unwrap_or_default();
//! vars.update(uuid, &VariableUpdate { value: Some("n3w".into()), ..Default::default() })
//!     .await?;
//!
//! repo.pipelines().trigger_ref_target("branch", "main").await?;
//! # Ok(())
//! # }
//! ```

use serde_json::json;

use crate::api::common::DispatchResult;
use crate::api::{DispatchRequest, Fields};

use super::RepositoryScope;

/// Page size requested when listing variables.
pub const VARIABLES_PAGELEN: u32 = 100;

/// Pipeline runs of a repository.
#[derive(Debug, Clone)]
pub struct PipelinesClient {
    scope: RepositoryScope,
}

impl PipelinesClient {
    pub fn new(scope: RepositoryScope) -> Self {
        Self { scope }
    }

    /// Starts a pipeline for the head of a ref.
    ///
    /// `ref_type` is `branch` or `tag`.
    pub async fn trigger_ref_target(&self, ref_type: &str, ref_name: &str) -> DispatchResult {
        let url = self
            .scope
            .session()
            .urls()
            .repository_pipelines(self.scope.namespace(), self.scope.repository_name());
        let body = Fields::new().set(
            "target",
            json!({
                "type": "pipeline_ref_target",
                "ref_type": ref_type,
                "ref_name": ref_name,
            }),
        );
        self.scope
            .session()
            .dispatch(DispatchRequest::post(url).json(body))
            .await
    }

    pub fn variables(&self) -> VariablesClient {
        VariablesClient::new(self.scope.clone())
    }
}

/// The repository's pipelines configuration.
#[derive(Debug, Clone)]
pub struct PipelinesConfigClient {
    scope: RepositoryScope,
}

impl PipelinesConfigClient {
    pub fn new(scope: RepositoryScope) -> Self {
        Self { scope }
    }

    fn url(&self) -> String {
        self.scope
            .session()
            .urls()
            .repository_pipelines_config(self.scope.namespace(), self.scope.repository_name())
    }

    pub async fn get(&self) -> DispatchResult {
        self.scope.session().dispatch(DispatchRequest::get(self.url())).await
    }

    /// Enables or disables pipelines for the repository.
    pub async fn update(&self, enabled: bool) -> DispatchResult {
        let body = Fields::new().set("enabled", enabled);
        self.scope
            .session()
            .dispatch(DispatchRequest::put(self.url()).json(body))
            .await
    }

    pub fn variables(&self) -> VariablesClient {
        VariablesClient::new(self.scope.clone())
    }
}

/// A partial variable update; only set fields are sent.
#[derive(Debug, Clone, Default)]
pub struct VariableUpdate {
    pub key: Option<String>,
    pub value: Option<String>,
    pub secured: Option<bool>,
}

impl VariableUpdate {
    fn to_fields(&self) -> Fields {
        Fields::new()
            .optional("key", self.key.clone())
            .optional("value", self.value.clone())
            .optional("secured", self.secured)
    }
}

/// Repository-level pipeline variables.
#[derive(Debug, Clone)]
pub struct VariablesClient {
    scope: RepositoryScope,
}

impl VariablesClient {
    pub fn new(scope: RepositoryScope) -> Self {
        Self { scope }
    }

    fn collection_url(&self) -> String {
        self.scope
            .session()
            .urls()
            .repository_pipelines_config_variables(self.scope.namespace(), self.scope.repository_name())
    }

    fn variable_url(&self, uuid: &str) -> String {
        self.scope.session().urls().repository_pipelines_config_variable(
            self.scope.namespace(),
            self.scope.repository_name(),
            uuid,
        )
    }

    pub async fn all(&self) -> DispatchResult {
        let request = DispatchRequest::get(self.collection_url()).param("pagelen", VARIABLES_PAGELEN);
        self.scope.session().dispatch(request).await
    }

    pub async fn get(&self, uuid: &str) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::get(self.variable_url(uuid)))
            .await
    }

    pub async fn create(&self, key: &str, value: &str, secured: bool) -> DispatchResult {
        let body = Fields::new()
            .set("key", key)
            .set("value", value)
            .set("secured", secured);
        self.scope
            .session()
            .dispatch(DispatchRequest::post(self.collection_url()).json(body))
            .await
    }

    pub async fn update(&self, uuid: &str, update: &VariableUpdate) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::put(self.variable_url(uuid)).json(update.to_fields()))
            .await
    }

    pub async fn delete(&self, uuid: &str) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::delete(self.variable_url(uuid)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::session::test_session;
    use mockito::Matcher;

    fn scope(base: &str) -> RepositoryScope {
        RepositoryScope::new(test_session(base), "team", "app")
    }

    #[tokio::test]
    async fn test_trigger_ref_target_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/repositories/team/app/pipelines/")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "target": {"type": "pipeline_ref_target", "ref_type": "branch", "ref_name": "main"}
            })))
            .with_status(201)
            .with_body(r#"{"build_number": 12}"#)
            .create_async()
            .await;

        let run = PipelinesClient::new(scope(&server.url()))
            .trigger_ref_target("branch", "main")
            .await
            .unwrap();
        assert_eq!(run["build_number"], 12);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_variables_listing_requests_large_pages() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories/team/app/pipelines_config/variables/")
            .match_query(Matcher::UrlEncoded("pagelen".into(), "100".into()))
            .with_status(200)
            .with_body(r#"{"values": [{"key": "A"}]}"#)
            .create_async()
            .await;

        let vars = PipelinesConfigClient::new(scope(&server.url())).variables();
        assert_eq!(vars.all().await.unwrap()["values"][0]["key"], "A");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_variable_create_and_partial_update() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/repositories/team/app/pipelines_config/variables/")
            .match_body(Matcher::Json(json!({"key": "TOKEN", "value": "v1", "secured": true})))
            .with_status(201)
            .with_body(r#"{"uuid": "{v}"}"#)
            .create_async()
            .await;
        let update = server
            .mock("PUT", "/repositories/team/app/pipelines_config/variables/v")
            .match_body(Matcher::Json(json!({"value": "v2"})))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let vars = PipelinesClient::new(scope(&server.url())).variables();
        assert!(vars.create("TOKEN", "v1", true).await.is_ok());
        let change = VariableUpdate {
            value: Some("v2".into()),
            ..Default::default()
        };
        assert!(vars.update("v", &change).await.is_ok());
        create.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_config_toggle() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/repositories/team/app/pipelines_config")
            .match_body(Matcher::Json(json!({"enabled": true})))
            .with_status(200)
            .with_body(r#"{"enabled": true}"#)
            .create_async()
            .await;

        let config = PipelinesConfigClient::new(scope(&server.url()));
        assert_eq!(config.update(true).await, Ok(json!({"enabled": true})));
        mock.assert_async().await;
    }
}
