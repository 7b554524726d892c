//
//  bitbucket-client
//  api/cloud/forks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository forks.

use serde_json::Value;

use crate::api::common::DispatchResult;
use crate::api::{DispatchRequest, Fields};

use super::RepositoryScope;

/// Options for a new fork. Only `Some` fields are sent.
#[derive(Debug, Clone, Default)]
pub struct ForkSettings {
    /// Namespace that will own the fork.
    pub owner: Option<String>,
    /// Name of the fork.
    pub name: Option<String>,
    pub description: Option<String>,
    pub fork_policy: Option<String>,
    pub language: Option<String>,
    pub mainbranch: Option<String>,
    pub is_private: Option<bool>,
    pub has_issues: Option<bool>,
    pub has_wiki: Option<bool>,
    pub project: Option<Value>,
}

impl ForkSettings {
    pub fn to_fields(&self) -> Fields {
        Fields::new()
            .optional("owner", self.owner.clone())
            .optional("name", self.name.clone())
            .optional("description", self.description.clone())
            .optional("fork_policy", self.fork_policy.clone())
            .optional("language", self.language.clone())
            .optional("mainbranch", self.mainbranch.clone())
            .optional("is_private", self.is_private)
            .optional("has_issues", self.has_issues)
            .optional("has_wiki", self.has_wiki)
            .optional("project", self.project.clone())
    }
}

#[derive(Debug, Clone)]
pub struct ForksClient {
    scope: RepositoryScope,
}

impl ForksClient {
    pub fn new(scope: RepositoryScope) -> Self {
        Self { scope }
    }

    fn url(&self) -> String {
        self.scope
            .session()
            .urls()
            .repository_forks(self.scope.namespace(), self.scope.repository_name())
    }

    /// Lists the repository's forks.
    pub async fn all(&self) -> DispatchResult {
        self.scope.session().dispatch(DispatchRequest::get(self.url())).await
    }

    /// Forks the repository. The request is form-encoded.
    pub async fn create(&self, settings: &ForkSettings) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::post(self.url()).form(settings.to_fields()))
            .await
    }
}
