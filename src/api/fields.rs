//
//  bitbucket-client
//  api/fields.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request body fields with partial-update semantics.
//!
//! [`Fields`] collects `name -> value` pairs for a request body. Optional values
//! are only bound when present, so an update sends exactly the fields the caller
//! supplied and nothing else.
//!
//! ```rust
//! use bitbucket_client::api::Fields;
//!
//! let fields = Fields::new()
//!     .set("key", "TOKEN")
//!     .optional("value", None::<String>)
//!     .optional("secured", Some(true));
//!
//! assert!(fields.contains("key"));
//! assert!(!fields.contains("value"));
//! assert_eq!(fields.len(), 2);
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

/// An ordered set of body fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fields(Map<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` unconditionally.
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Binds `name` only when `value` is `Some`.
    pub fn optional<V: Into<Value>>(mut self, name: &str, value: Option<V>) -> Self {
        self.insert_optional(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn insert_optional<V: Into<Value>>(&mut self, name: &str, value: Option<V>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    /// Copies the members of `source` whose names appear in `allowed`.
    ///
    /// Non-object sources yield no fields. Used to turn a previously fetched
    /// resource into an update body.
    pub fn select(source: &Value, allowed: &[&str]) -> Self {
        let mut fields = Self::new();
        if let Some(object) = source.as_object() {
            for name in allowed {
                if let Some(value) = object.get(*name) {
                    fields.insert(name, value.clone());
                }
            }
        }
        fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Flattens the fields into form-encoding pairs.
    ///
    /// Strings are sent verbatim, `null` is dropped, arrays repeat the key once
    /// per element, and everything else uses its JSON text.
    pub fn to_form(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (name, value) in &self.0 {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        if let Some(text) = form_text(item) {
                            pairs.push((name.clone(), text));
                        }
                    }
                }
                other => {
                    if let Some(text) = form_text(other) {
                        pairs.push((name.clone(), text));
                    }
                }
            }
        }
        pairs
    }
}

fn form_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
