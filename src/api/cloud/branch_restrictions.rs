//
//  bitbucket-client
//  api/cloud/branch_restrictions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branch restrictions (branch permissions and merge checks).
//!
//! A restriction applies one [`RestrictionKind`] to every branch matching a
//! glob `pattern`, optionally exempting `users` and `groups`. Kinds such as
//! `require_approvals_to_merge` also take a numeric `value`.
//!
//! ## Updating from a fetched restriction
//!
//! [`BranchRestrictionsClient::update`] accepts any JSON object, so the output
//! of [`get`](BranchRestrictionsClient::get) can be edited and sent back. Only
//! the keys in [`UPDATEABLE_FIELDS`] are forwarded; read-only members such as
//! `id` and `links` are dropped.
//!
//! ```rust,no_run
//! use bitbucket_client::api::cloud::RepositoryClient;
//!
//! # async fn example(repo: RepositoryClient) -> Result<(), bitbucket_client::api::ApiError> {
//! let restrictions = repo.branch_restrictions();
//! let mut rule = restrictions.get("12").await?;
//! rule["pattern"] = "release/*".into();
//! restrictions.update("12", &rule).await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{ApiError, DispatchResult};
use crate::api::{DispatchRequest, Fields};

use super::RepositoryScope;

/// Keys forwarded by [`BranchRestrictionsClient::update`].
pub const UPDATEABLE_FIELDS: [&str; 5] = ["kind", "pattern", "users", "groups", "value"];

/// The kinds of branch restriction Bitbucket supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionKind {
    RequirePassingBuildsToMerge,
    Force,
    RequireAllDependenciesMerged,
    Push,
    RequireApprovalsToMerge,
    EnforceMergeChecks,
    RestrictMerges,
    ResetPullrequestApprovalsOnChange,
    Delete,
}

impl RestrictionKind {
    pub const ALL: [RestrictionKind; 9] = [
        Self::RequirePassingBuildsToMerge,
        Self::Force,
        Self::RequireAllDependenciesMerged,
        Self::Push,
        Self::RequireApprovalsToMerge,
        Self::EnforceMergeChecks,
        Self::RestrictMerges,
        Self::ResetPullrequestApprovalsOnChange,
        Self::Delete,
    ];

    /// The wire name, e.g. `require_approvals_to_merge`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequirePassingBuildsToMerge => "require_passing_builds_to_merge",
            Self::Force => "force",
            Self::RequireAllDependenciesMerged => "require_all_dependencies_merged",
            Self::Push => "push",
            Self::RequireApprovalsToMerge => "require_approvals_to_merge",
            Self::EnforceMergeChecks => "enforce_merge_checks",
            Self::RestrictMerges => "restrict_merges",
            Self::ResetPullrequestApprovalsOnChange => "reset_pullrequest_approvals_on_change",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for RestrictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RestrictionKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ApiError::InvalidInput(format!("unknown restriction kind '{s}'")))
    }
}

#[derive(Debug, Clone)]
pub struct BranchRestrictionsClient {
    scope: RepositoryScope,
}

impl BranchRestrictionsClient {
    pub fn new(scope: RepositoryScope) -> Self {
        Self { scope }
    }

    fn collection_url(&self) -> String {
        self.scope
            .session()
            .urls()
            .repository_branch_restrictions(self.scope.namespace(), self.scope.repository_name())
    }

    fn restriction_url(&self, id: &str) -> String {
        self.scope.session().urls().repository_branch_restriction(
            self.scope.namespace(),
            self.scope.repository_name(),
            id,
        )
    }

    pub async fn all(&self) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::get(self.collection_url()))
            .await
    }

    pub async fn get(&self, id: &str) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::get(self.restriction_url(id)))
            .await
    }

    /// Creates a restriction on branches matching `pattern`.
    ///
    /// `users` and `groups` default to empty lists; `value` is omitted when `None`.
    pub async fn create(
        &self,
        kind: RestrictionKind,
        pattern: &str,
        users: Option<Vec<Value>>,
        groups: Option<Vec<Value>>,
        value: Option<Value>,
    ) -> DispatchResult {
        let body = Fields::new()
            .set("kind", kind.as_str())
            .set("pattern", pattern)
            .set("users", users.unwrap_or_default())
            .set("groups", groups.unwrap_or_default())
            .optional("value", value);
        self.scope
            .session()
            .dispatch(DispatchRequest::post(self.collection_url()).json(body))
            .await
    }

    /// Updates restriction `id` from a JSON object.
    ///
    /// Keys outside [`UPDATEABLE_FIELDS`] are ignored. A `kind` that is not a
    /// known [`RestrictionKind`] fails with [`ApiError::InvalidInput`] before
    /// any request is sent.
    pub async fn update(&self, id: &str, fields: &Value) -> DispatchResult {
        let body = Fields::select(fields, &UPDATEABLE_FIELDS);
        if let Some(kind) = body.get("kind") {
            let name = kind
                .as_str()
                .ok_or_else(|| ApiError::InvalidInput(format!("restriction kind must be a string, got {kind}")))?;
            name.parse::<RestrictionKind>()?;
        }
        self.scope
            .session()
            .dispatch(DispatchRequest::put(self.restriction_url(id)).json(body))
            .await
    }

    pub async fn delete(&self, id: &str) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::delete(self.restriction_url(id)))
            .await
    }
}
