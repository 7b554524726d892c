//
//  bitbucket-client
//  api/cloud/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository clients.
//!
//! [`RepositoriesClient`] lists and deletes the repositories of a namespace;
//! [`RepositoryClient`] covers one repository's metadata, source browsing,
//! changesets, and hands out the per-resource sub-clients.
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_client::api::cloud::{NamespaceClient, RepositorySettings};
//!
//! # async fn example(team: NamespaceClient) -> Result<(), bitbucket_client::api::ApiError> {
//! let repo = team.repository("backend-service");
//! repo.create(&RepositorySettings {
//!     is_private: Some(true),
//!     language: Some("rust".to_string()),
//!     ..Default::default()
//! })
//! .await?;
//!
//! let readme = repo.raw_path_contents("main", "README.md").await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::Deserialize;

use crate::api::common::{ApiError, DispatchResult, PaginatedResponse};
use crate::api::{AuthorizedSession, DispatchRequest, Fields};

use super::{
    BranchRestrictionsClient, BranchesClient, DeployKeysClient, ForksClient, LinksClient,
    PipelinesClient, PipelinesConfigClient, RepositoryScope, TagsClient, WebhooksClient,
};

/// The minimal view of a listed repository.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositorySummary {
    pub name: String,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub full_name: Option<String>,
}

impl RepositorySummary {
    /// The identifier to use in URLs: the slug when present, else the name.
    pub fn url_name(&self) -> &str {
        self.slug.as_deref().unwrap_or(&self.name)
    }
}

/// The repositories under one namespace.
#[derive(Debug, Clone)]
pub struct RepositoriesClient {
    session: Arc<AuthorizedSession>,
    namespace: String,
}

impl RepositoriesClient {
    pub fn new(session: Arc<AuthorizedSession>, namespace: &str) -> Self {
        Self {
            session,
            namespace: namespace.to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Lists the namespace's repositories (all pages).
    pub async fn all(&self) -> DispatchResult {
        let url = self.session.urls().repositories_for_namespace(&self.namespace);
        self.session.dispatch(DispatchRequest::get(url)).await
    }

    async fn summaries(&self) -> DispatchResult<Vec<RepositorySummary>> {
        let page: PaginatedResponse<RepositorySummary> = serde_json::from_value(self.all().await?)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(page.values)
    }

    /// The URL names (slug, else name) of the namespace's repositories.
    pub async fn names(&self) -> DispatchResult<Vec<String>> {
        Ok(self
            .summaries()
            .await?
            .iter()
            .map(|repo| repo.url_name().to_string())
            .collect())
    }

    /// Lists the namespace's repositories as clients.
    pub async fn clients(&self) -> DispatchResult<Vec<RepositoryClient>> {
        Ok(self
            .summaries()
            .await?
            .iter()
            .map(|repo| self.get(repo.url_name()))
            .collect())
    }

    /// A client for one repository. Performs no I/O.
    pub fn get(&self, repository: &str) -> RepositoryClient {
        RepositoryClient::new(RepositoryScope::new(
            Arc::clone(&self.session),
            &self.namespace,
            repository,
        ))
    }

    /// Deletes a repository.
    pub async fn delete(&self, repository: &str) -> DispatchResult {
        let url = self.session.urls().repository(&self.namespace, repository);
        self.session.dispatch(DispatchRequest::delete(url)).await
    }
}

/// Settings for a new repository; unset fields are omitted from the request.
#[derive(Debug, Clone, Default)]
pub struct RepositorySettings {
    pub scm: Option<String>,
    pub description: Option<String>,
    pub is_private: Option<bool>,
    pub fork_policy: Option<String>,
    pub language: Option<String>,
    pub has_issues: Option<bool>,
    pub has_wiki: Option<bool>,
    /// Project key; sent as `{"key": ...}`
    pub project: Option<String>,
}

impl RepositorySettings {
    pub fn to_fields(&self) -> Fields {
        Fields::new()
            .optional("scm", self.scm.clone())
            .optional("description", self.description.clone())
            .optional("is_private", self.is_private)
            .optional("fork_policy", self.fork_policy.clone())
            .optional("language", self.language.clone())
            .optional("has_issues", self.has_issues)
            .optional("has_wiki", self.has_wiki)
            .optional(
                "project",
                self.project.as_ref().map(|key| serde_json::json!({ "key": key })),
            )
    }
}

/// One repository.
#[derive(Debug, Clone)]
pub struct RepositoryClient {
    scope: RepositoryScope,
}

impl RepositoryClient {
    pub fn new(scope: RepositoryScope) -> Self {
        Self { scope }
    }

    pub fn namespace(&self) -> &str {
        self.scope.namespace()
    }

    pub fn repository_name(&self) -> &str {
        self.scope.repository_name()
    }

    fn urls(&self) -> &crate::api::ApiUrls {
        self.scope.session().urls()
    }

    /// Repository metadata.
    pub async fn info(&self) -> DispatchResult {
        let url = self.urls().repository(self.namespace(), self.repository_name());
        self.scope.session().dispatch(DispatchRequest::get(url)).await
    }

    /// Creates this repository.
    pub async fn create(&self, settings: &RepositorySettings) -> DispatchResult {
        let url = self.urls().repository(self.namespace(), self.repository_name());
        self.scope
            .session()
            .dispatch(DispatchRequest::post(url).json(settings.to_fields()))
            .await
    }

    /// The repository's main branch.
    pub async fn main_branch(&self) -> DispatchResult {
        let url = self.urls().repository_main_branch(self.namespace(), self.repository_name());
        self.scope.session().dispatch(DispatchRequest::get(url)).await
    }

    /// The file manifest at `revision`.
    pub async fn manifest(&self, revision: &str) -> DispatchResult {
        let url = self
            .urls()
            .repository_manifest(self.namespace(), self.repository_name(), revision);
        self.scope.session().dispatch(DispatchRequest::get(url)).await
    }

    /// Metadata for a file, or the listing of a directory, at `revision`.
    pub async fn path_contents(&self, revision: &str, path: &str) -> DispatchResult {
        let url = self.urls().repository_path_contents(
            self.namespace(),
            self.repository_name(),
            revision,
            path,
        );
        self.scope.session().dispatch(DispatchRequest::get(url)).await
    }

    /// The raw bytes of a file at `revision`, as text.
    pub async fn raw_path_contents(&self, revision: &str, path: &str) -> DispatchResult<String> {
        let url = self.urls().repository_path_raw_contents(
            self.namespace(),
            self.repository_name(),
            revision,
            path,
        );
        self.scope.session().dispatch_text(DispatchRequest::get(url)).await
    }

    /// Lists changesets, optionally bounded by `limit` and starting at node `start`.
    pub async fn changesets(&self, limit: Option<u32>, start: Option<&str>) -> DispatchResult {
        let url = self.urls().repository_changesets(self.namespace(), self.repository_name());
        let mut request = DispatchRequest::get(url);
        if let Some(limit) = limit {
            request = request.param("limit", limit);
        }
        if let Some(start) = start {
            request = request.param("start", start);
        }
        self.scope.session().dispatch(request).await
    }

    /// One changeset by node id.
    pub async fn changeset(&self, node: &str) -> DispatchResult {
        let url = self
            .urls()
            .repository_changeset(self.namespace(), self.repository_name(), node);
        self.scope.session().dispatch(DispatchRequest::get(url)).await
    }

    pub fn branches(&self) -> BranchesClient {
        BranchesClient::new(self.scope.clone())
    }

    pub fn tags(&self) -> TagsClient {
        TagsClient::new(self.scope.clone())
    }

    /// Branches and tags in one listing.
    pub async fn branches_and_tags(&self) -> DispatchResult {
        let url = self
            .urls()
            .repository_branches_tags(self.namespace(), self.repository_name());
        self.scope.session().dispatch(DispatchRequest::get(url)).await
    }

    pub fn deploy_keys(&self) -> DeployKeysClient {
        DeployKeysClient::new(self.scope.clone())
    }

    pub fn links(&self) -> LinksClient {
        LinksClient::new(self.scope.clone())
    }

    pub fn webhooks(&self) -> WebhooksClient {
        WebhooksClient::new(self.scope.clone())
    }

    pub fn forks(&self) -> ForksClient {
        ForksClient::new(self.scope.clone())
    }

    pub fn pipelines(&self) -> PipelinesClient {
        PipelinesClient::new(self.scope.clone())
    }

    pub fn pipelines_config(&self) -> PipelinesConfigClient {
        PipelinesConfigClient::new(self.scope.clone())
    }

    pub fn branch_restrictions(&self) -> BranchRestrictionsClient {
        BranchRestrictionsClient::new(self.scope.clone())
    }
}
