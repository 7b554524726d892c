//
//  bitbucket-client
//  api/urls.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Endpoint URL builders.
//!
//! Every endpoint is a template under the API base with the namespace,
//! repository slug and resource id substituted verbatim. Identifiers are opaque
//! and not validated here. All builders are pure string functions.
//!
//! ```rust
//! use bitbucket_client::api::ApiUrls;
//!
//! let urls = ApiUrls::default();
//! assert_eq!(
//!     urls.repository_branches("team", "app"),
//!     "https://api.bitbucket.org/2.0/repositories/team/app/branches"
//! );
//! ```

/// Base URL of the Bitbucket Cloud 2.0 API.
pub const DEFAULT_API_BASE: &str = "https://api.bitbucket.org/2.0/";

/// URL builder bound to an API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrls {
    base: String,
}

impl Default for ApiUrls {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ApiUrls {
    /// Creates a builder for `base`; a trailing slash is added when missing.
    pub fn new(base: &str) -> Self {
        let base = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn at(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn repo(&self, namespace: &str, repository: &str, rest: &str) -> String {
        self.at(&format!("repositories/{namespace}/{repository}/{rest}"))
    }

    // OAuth

    pub fn request_token(&self) -> String {
        self.at("oauth/request_token/")
    }

    pub fn authenticate(&self, token: &str) -> String {
        self.at(&format!("oauth/authenticate?oauth_token={token}"))
    }

    pub fn access_token(&self) -> String {
        self.at("oauth/access_token/")
    }

    // Accounts

    pub fn current_user(&self) -> String {
        self.at("user")
    }

    pub fn account_profile(&self, account: &str) -> String {
        self.at(&format!("users/{account}"))
    }

    // Repositories

    pub fn repositories(&self) -> String {
        self.at("repositories")
    }

    pub fn repositories_for_namespace(&self, namespace: &str) -> String {
        self.at(&format!("repositories/{namespace}"))
    }

    pub fn repository(&self, namespace: &str, repository: &str) -> String {
        self.at(&format!("repositories/{namespace}/{repository}"))
    }

    pub fn repository_main_branch(&self, namespace: &str, repository: &str) -> String {
        self.repo(namespace, repository, "main-branch")
    }

    pub fn repository_manifest(&self, namespace: &str, repository: &str, revision: &str) -> String {
        self.repo(namespace, repository, &format!("manifest/{revision}"))
    }

    pub fn repository_path_contents(
        &self,
        namespace: &str,
        repository: &str,
        revision: &str,
        path: &str,
    ) -> String {
        self.repo(namespace, repository, &format!("src/{revision}/{path}"))
    }

    pub fn repository_path_raw_contents(
        &self,
        namespace: &str,
        repository: &str,
        revision: &str,
        path: &str,
    ) -> String {
        self.repo(namespace, repository, &format!("raw/{revision}/{path}"))
    }

    pub fn repository_changesets(&self, namespace: &str, repository: &str) -> String {
        self.repo(namespace, repository, "changesets")
    }

    pub fn repository_changeset(&self, namespace: &str, repository: &str, node: &str) -> String {
        self.repo(namespace, repository, &format!("changesets/{node}"))
    }

    // Refs

    pub fn repository_branches(&self, namespace: &str, repository: &str) -> String {
        self.repo(namespace, repository, "branches")
    }

    pub fn repository_branch(&self, namespace: &str, repository: &str, branch: &str) -> String {
        self.repo(namespace, repository, &format!("refs/branches/{branch}"))
    }

    pub fn repository_tags(&self, namespace: &str, repository: &str) -> String {
        self.repo(namespace, repository, "tags")
    }

    pub fn repository_tag(&self, namespace: &str, repository: &str, tag: &str) -> String {
        self.repo(namespace, repository, &format!("refs/tags/{tag}"))
    }

    pub fn repository_branches_tags(&self, namespace: &str, repository: &str) -> String {
        self.repo(namespace, repository, "branches-tags")
    }

    // Deploy keys, links, webhooks, forks

    pub fn repository_deploy_keys(&self, namespace: &str, repository: &str) -> String {
        self.repo(namespace, repository, "deploy-keys")
    }

    pub fn repository_deploy_key(&self, namespace: &str, repository: &str, key_id: &str) -> String {
        self.repo(namespace, repository, &format!("deploy-keys/{key_id}"))
    }

    pub fn repository_links(&self, namespace: &str, repository: &str) -> String {
        self.repo(namespace, repository, "links")
    }

    pub fn repository_link(&self, namespace: &str, repository: &str, link_id: &str) -> String {
        self.repo(namespace, repository, &format!("links/{link_id}"))
    }

    pub fn repository_webhooks(&self, namespace: &str, repository: &str) -> String {
        self.repo(namespace, repository, "hooks")
    }

    pub fn repository_webhook(&self, namespace: &str, repository: &str, uid: &str) -> String {
        self.repo(namespace, repository, &format!("hooks/{uid}"))
    }

    pub fn repository_forks(&self, namespace: &str, repository: &str) -> String {
        self.repo(namespace, repository, "forks")
    }

    // Pipelines

    pub fn repository_pipelines(&self, namespace: &str, repository: &str) -> String {
        self.repo(namespace, repository, "pipelines/")
    }

    pub fn repository_pipelines_config(&self, namespace: &str, repository: &str) -> String {
        self.repo(namespace, repository, "pipelines_config")
    }

    pub fn repository_pipelines_config_variables(&self, namespace: &str, repository: &str) -> String {
        self.repo(namespace, repository, "pipelines_config/variables/")
    }

    pub fn repository_pipelines_config_variable(
        &self,
        namespace: &str,
        repository: &str,
        uuid: &str,
    ) -> String {
        self.repo(namespace, repository, &format!("pipelines_config/variables/{uuid}"))
    }

    // Branch restrictions

    pub fn repository_branch_restrictions(&self, namespace: &str, repository: &str) -> String {
        self.repo(namespace, repository, "branch-restrictions/")
    }

    pub fn repository_branch_restriction(&self, namespace: &str, repository: &str, id: &str) -> String {
        self.repo(namespace, repository, &format!("branch-restrictions/{id}"))
    }
}
