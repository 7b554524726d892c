//
//  bitbucket-client
//  api/cloud/webhooks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository webhooks.
//!
//! Bitbucket POSTs a JSON payload to the hook's URL whenever one of its
//! subscribed events occurs.
//!
//! | Event | Trigger |
//! |-------|---------|
//! | `repo:push` | Commits pushed |
//! | `repo:fork` | Repository forked |
//! | `pullrequest:created` | PR opened |
//! | `pullrequest:fulfilled` | PR merged |
//! | `pullrequest:rejected` | PR declined |
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_client::api::cloud::{RepositoryClient, WebhookSettings, WebhookUpdate};
//!
//! # async fn example(repo: RepositoryClient) -> Result<(), bitbucket_client::api::ApiError> {
//! let hook = repo
//!     .webhooks()
//!     .create(&WebhookSettings::new("CI", "https://ci.example.com/hook", vec!["repo:push".into()]))
//!     .await?;
//!
//! // Disable it without touching anything else
//! let uuid = hook["uuid"].as_str().unwrap_or_default();
//! repo.webhooks()
//!     .update(uuid, &WebhookUpdate { active: Some(false), ..Default::default() })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::api::common::DispatchResult;
use crate::api::{DispatchRequest, Fields};

use super::RepositoryScope;

/// A new webhook.
#[derive(Debug, Clone)]
pub struct WebhookSettings {
    pub description: String,
    pub url: String,
    pub active: bool,
    pub events: Vec<String>,
}

impl WebhookSettings {
    /// An active hook for `events`.
    pub fn new(description: impl Into<String>, url: impl Into<String>, events: Vec<String>) -> Self {
        Self {
            description: description.into(),
            url: url.into(),
            active: true,
            events,
        }
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .set("description", self.description.as_str())
            .set("url", self.url.as_str())
            .set("active", self.active)
            .set("events", self.events.clone())
    }
}

/// A partial webhook update; only set fields are sent.
#[derive(Debug, Clone, Default)]
pub struct WebhookUpdate {
    pub description: Option<String>,
    pub url: Option<String>,
    pub active: Option<bool>,
    pub events: Option<Vec<String>>,
}

impl WebhookUpdate {
    fn to_fields(&self) -> Fields {
        Fields::new()
            .optional("description", self.description.clone())
            .optional("url", self.url.clone())
            .optional("active", self.active)
            .optional("events", self.events.clone())
    }
}

#[derive(Debug, Clone)]
pub struct WebhooksClient {
    scope: RepositoryScope,
}

impl WebhooksClient {
    pub fn new(scope: RepositoryScope) -> Self {
        Self { scope }
    }

    fn collection_url(&self) -> String {
        self.scope
            .session()
            .urls()
            .repository_webhooks(self.scope.namespace(), self.scope.repository_name())
    }

    fn hook_url(&self, uuid: &str) -> String {
        self.scope.session().urls().repository_webhook(
            self.scope.namespace(),
            self.scope.repository_name(),
            uuid,
        )
    }

    pub async fn all(&self) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::get(self.collection_url()))
            .await
    }

    pub async fn get(&self, uuid: &str) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::get(self.hook_url(uuid)))
            .await
    }

    pub async fn create(&self, settings: &WebhookSettings) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::post(self.collection_url()).json(settings.to_fields()))
            .await
    }

    pub async fn update(&self, uuid: &str, update: &WebhookUpdate) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::put(self.hook_url(uuid)).json(update.to_fields()))
            .await
    }

    pub async fn delete(&self, uuid: &str) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::delete(self.hook_url(uuid)))
            .await
    }
}
