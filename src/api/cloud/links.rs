//
//  bitbucket-client
//  api/cloud/links.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository links: issue-tracker style handlers that turn keys such as
//! `JIRA` into links in commit messages.

use crate::api::common::DispatchResult;
use crate::api::{DispatchRequest, Fields};

use super::RepositoryScope;

#[derive(Debug, Clone)]
pub struct LinksClient {
    scope: RepositoryScope,
}

impl LinksClient {
    pub fn new(scope: RepositoryScope) -> Self {
        Self { scope }
    }

    fn collection_url(&self) -> String {
        self.scope
            .session()
            .urls()
            .repository_links(self.scope.namespace(), self.scope.repository_name())
    }

    fn link_url(&self, link_id: &str) -> String {
        self.scope.session().urls().repository_link(
            self.scope.namespace(),
            self.scope.repository_name(),
            link_id,
        )
    }

    pub async fn all(&self) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::get(self.collection_url()))
            .await
    }

    pub async fn get(&self, link_id: &str) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::get(self.link_url(link_id)))
            .await
    }

    pub async fn create(&self, handler: &str, link_key: &str) -> DispatchResult {
        let body = Fields::new().set("handler", handler).set("link_key", link_key);
        self.scope
            .session()
            .dispatch(DispatchRequest::post(self.collection_url()).form(body))
            .await
    }

    pub async fn update(&self, link_id: &str, handler: &str, link_key: &str) -> DispatchResult {
        let body = Fields::new().set("handler", handler).set("link_key", link_key);
        self.scope
            .session()
            .dispatch(DispatchRequest::put(self.link_url(link_id)).form(body))
            .await
    }

    pub async fn delete(&self, link_id: &str) -> DispatchResult {
        self.scope
            .session()
            .dispatch(DispatchRequest::delete(self.link_url(link_id)))
            .await
    }
}
