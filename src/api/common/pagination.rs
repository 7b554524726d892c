//
//  bitbucket-client
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination for Bitbucket Cloud list responses.
//!
//! Bitbucket Cloud pages carry their items in `values` and a fully-qualified
//! `next` URL when more pages exist:
//!
//! ```json
//! {"pagelen": 10, "values": [...], "next": "https://api.bitbucket.org/2.0/...?page=2"}
//! ```
//!
//! The dispatcher feeds every decoded page into a [`PageAccumulator`], which
//! tells it which URL to fetch next and finally yields one merged payload.
//! [`PaginatedResponse`] is the typed view of such a payload.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// A typed page (or merged set of pages) from Bitbucket Cloud.
///
/// # Example
///
/// ```rust
/// use bitbucket_client::api::common::PaginatedResponse;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Repo {
///     name: String,
/// }
///
/// let json = r#"{"values": [{"name": "a"}], "pagelen": 10}"#;
/// let page: PaginatedResponse<Repo> = serde_json::from_str(json).unwrap();
/// assert_eq!(page.values[0].name, "a");
/// assert!(!page.has_next());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items in this page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// Current page number (1-indexed).
    #[serde(default)]
    pub page: Option<u32>,

    /// Requested page length.
    #[serde(default)]
    pub pagelen: Option<u32>,

    /// Total number of items, when the server reports it.
    #[serde(default)]
    pub size: Option<u32>,

    /// URL of the next page.
    #[serde(default)]
    pub next: Option<String>,

    /// URL of the previous page.
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> PaginatedResponse<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }
}

/// Merges successive pages of one logical request.
///
/// The first page is kept as the result skeleton. `values` from every later
/// page are appended to it, and the `next` member is dropped once at least one
/// continuation was followed. A single page passes through untouched.
///
/// The URL of the first request counts as visited, so a `next` member pointing
/// back at it ends the loop like any other repeated URL.
#[derive(Debug, Default)]
pub struct PageAccumulator {
    first: Option<Value>,
    followed: usize,
    visited: HashSet<String>,
}

impl PageAccumulator {
    /// Starts accumulating the pages of a request first sent to `first_url`.
    pub fn new(first_url: &str) -> Self {
        let mut accumulator = Self::default();
        accumulator.visited.insert(normalize(first_url));
        accumulator
    }

    /// Records a decoded page and returns the URL of the page to fetch next.
    ///
    /// Returns `None` when the page has no `next` member, or when its `next`
    /// URL was already visited.
    pub fn push(&mut self, mut page: Value) -> Option<String> {
        let next = page.get("next").and_then(Value::as_str).map(str::to_owned);

        match self.first.as_mut() {
            None => self.first = Some(page),
            Some(first) => {
                let more = match page.get_mut("values") {
                    Some(Value::Array(values)) => std::mem::take(values),
                    _ => Vec::new(),
                };
                if let Some(Value::Array(values)) = first.get_mut("values") {
                    values.extend(more);
                }
                self.followed += 1;
            }
        }

        let next = next?;
        self.visited.insert(normalize(&next)).then_some(next)
    }

    /// Number of continuation pages merged so far.
    pub fn followed(&self) -> usize {
        self.followed
    }

    /// Returns the merged payload (`null` if no page was pushed).
    pub fn finish(self) -> Value {
        let mut merged = self.first.unwrap_or(Value::Null);
        if self.followed > 0 {
            if let Some(object) = merged.as_object_mut() {
                object.remove("next");
            }
        }
        merged
    }
}

fn normalize(raw: &str) -> String {
    Url::parse(raw).map(String::from).unwrap_or_else(|_| raw.to_owned())
}
