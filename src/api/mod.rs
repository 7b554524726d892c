//
//  bitbucket-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Typed access to the Bitbucket Cloud REST API v2.0 over OAuth 1.0a.
//!
//! ## Architecture
//!
//! - [`urls`]: pure endpoint URL builders
//! - [`fields`]: request bodies with partial-update semantics
//! - [`dispatch`]: signs and sends requests, follows pagination, maps failures
//! - [`session`]: the dispatcher plus one access token, shared by resource clients
//! - [`client`]: the [`BitBucket`] entry point and OAuth handshake
//! - [`cloud`]: one client per resource family (repositories, forks, webhooks, ...)
//! - [`common`]: errors, results and pagination types
//!
//! ## Error Handling
//!
//! Every network call returns a [`DispatchResult`]. Failures never panic; they
//! surface as [`ApiError`] values whose `Display` is the error message:
//!
//! - `Timeout`: `Timeout when contacting BitBucket`
//! - `Transport`: `Exception when contacting BitBucket: <detail>`
//! - `Status`: the HTTP reason phrase, or `Error: <code>`

pub mod client;

pub mod cloud;

pub mod common;

pub mod dispatch;

pub mod fields;

pub mod session;

pub mod urls;

pub use client::{BitBucket, BitBucketBuilder};
pub use common::{ApiError, DispatchResult, ResultTupleExt};
pub use dispatch::{DispatchRequest, Dispatcher};
pub use fields::Fields;
pub use session::AuthorizedSession;
pub use urls::{ApiUrls, DEFAULT_API_BASE};
