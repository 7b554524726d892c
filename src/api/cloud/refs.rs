//
//  bitbucket-client
//  api/cloud/refs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branch and tag lookups.

use crate::api::common::DispatchResult;
use crate::api::DispatchRequest;

use super::RepositoryScope;

/// The branches of a repository.
#[derive(Debug, Clone)]
pub struct BranchesClient {
    scope: RepositoryScope,
}

impl BranchesClient {
    pub fn new(scope: RepositoryScope) -> Self {
        Self { scope }
    }

    /// Lists every branch (all pages).
    pub async fn all(&self) -> DispatchResult {
        let url = self
            .scope
            .session()
            .urls()
            .repository_branches(self.scope.namespace(), self.scope.repository_name());
        self.scope.session().dispatch(DispatchRequest::get(url)).await
    }

    pub async fn get(&self, branch: &str) -> DispatchResult {
        let url = self.scope.session().urls().repository_branch(
            self.scope.namespace(),
            self.scope.repository_name(),
            branch,
        );
        self.scope.session().dispatch(DispatchRequest::get(url)).await
    }
}

/// The tags of a repository.
#[derive(Debug, Clone)]
pub struct TagsClient {
    scope: RepositoryScope,
}

impl TagsClient {
    pub fn new(scope: RepositoryScope) -> Self {
        Self { scope }
    }

    /// Lists every tag (all pages).
    pub async fn all(&self) -> DispatchResult {
        let url = self
            .scope
            .session()
            .urls()
            .repository_tags(self.scope.namespace(), self.scope.repository_name());
        self.scope.session().dispatch(DispatchRequest::get(url)).await
    }

    pub async fn get(&self, tag: &str) -> DispatchResult {
        let url = self.scope.session().urls().repository_tag(
            self.scope.namespace(),
            self.scope.repository_name(),
            tag,
        );
        self.scope.session().dispatch(DispatchRequest::get(url)).await
    }
}
