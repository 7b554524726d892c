//
//  bitbucket-client
//  api/cloud/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud API v2.0 resource clients.
//!
//! Each client is bound to an [`AuthorizedSession`] and, below the namespace
//! level, to a namespace/repository pair. Methods build an endpoint URL, bind
//! the supplied fields and forward to the dispatcher; the payload is returned
//! as decoded JSON.
//!
//! # Navigation
//!
//! ```text
//! BitBucketClient
//! ├── accounts()                 AccountsClient
//! └── for_namespace(ns)          NamespaceClient
//!     └── repositories()         RepositoriesClient
//!         └── get(repo)          RepositoryClient
//!             ├── branches() / tags() / deploy_keys() / links() / webhooks()
//!             ├── forks()
//!             ├── pipelines() / pipelines_config()  → variables()
//!             └── branch_restrictions()
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_client::api::BitBucket;
//! use bitbucket_client::api::cloud::RestrictionKind;
//! use bitbucket_client::auth::TokenPair;
//!
//! # async fn example() -> Result<(), bitbucket_client::api::ApiError> {
//! let client = BitBucket::new("key", "secret", "oob")?
//!     .authorized_client(TokenPair::new("token", "token-secret"));
//!
//! let restrictions = client
//!     .for_namespace("team")
//!     .repository("app")
//!     .branch_restrictions();
//! restrictions.create(RestrictionKind::Push, "main", None, None, None).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::api::AuthorizedSession;

pub mod account;
pub mod branch_restrictions;
pub mod deploy_keys;
pub mod forks;
pub mod links;
pub mod pipelines;
pub mod refs;
pub mod repositories;
pub mod webhooks;

pub use account::*;
pub use branch_restrictions::*;
pub use deploy_keys::*;
pub use forks::*;
pub use links::*;
pub use pipelines::*;
pub use refs::*;
pub use repositories::*;
pub use webhooks::*;

/// The session plus namespace/repository context shared by repository-level clients.
#[derive(Debug, Clone)]
pub struct RepositoryScope {
    session: Arc<AuthorizedSession>,
    namespace: String,
    repository: String,
}

impl RepositoryScope {
    pub fn new(session: Arc<AuthorizedSession>, namespace: &str, repository: &str) -> Self {
        Self {
            session,
            namespace: namespace.to_string(),
            repository: repository.to_string(),
        }
    }

    pub fn session(&self) -> &AuthorizedSession {
        &self.session
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn repository_name(&self) -> &str {
        &self.repository
    }
}
