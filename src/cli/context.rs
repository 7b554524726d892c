//
//  bitbucket-client
//  cli/context.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Resolution of the consumer, access token and target repository shared by
//! every command.
//!
//! Flags (and their environment variables) win over the configuration file.
//! `--repo` accepts either a bare slug or `NAMESPACE/REPO`.

use anyhow::{bail, Context, Result};

use crate::api::cloud::{BitBucketClient, RepositoryClient};
use crate::api::BitBucket;
use crate::auth::{TokenPair, TokenStore};
use crate::config::Config;
use crate::output::OutputWriter;

use super::GlobalOptions;

pub struct CommandContext {
    pub config: Config,
    pub output: OutputWriter,
    global: GlobalOptions,
}

impl CommandContext {
    pub fn load(global: &GlobalOptions) -> Result<Self> {
        Ok(Self::new(Config::load()?, global))
    }

    pub fn new(config: Config, global: &GlobalOptions) -> Self {
        Self {
            config,
            output: OutputWriter::new(global.compact),
            global: global.clone(),
        }
    }

    /// The consumer key and secret, from flags or configuration.
    pub fn consumer(&self) -> Result<(String, String)> {
        let key = self
            .global
            .consumer_key
            .clone()
            .or_else(|| self.config.oauth.consumer_key.clone());
        let secret = self
            .global
            .consumer_secret
            .clone()
            .or_else(|| self.config.oauth.consumer_secret.clone());

        match (key, secret) {
            (Some(key), Some(secret)) => Ok((key, secret)),
            _ => bail!(
                "No OAuth consumer configured. Run `bbc auth login` or set BBC_CONSUMER_KEY and BBC_CONSUMER_SECRET."
            ),
        }
    }

    pub fn bitbucket(&self) -> Result<BitBucket> {
        let (key, secret) = self.consumer()?;
        let mut builder = BitBucket::builder(key, secret, self.config.oauth.callback_url.as_str())
            .base_url(self.config.api.base_url.as_str());
        if let Some(timeout) = self.config.api.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    /// The stored access token for the current consumer.
    pub fn access_token(&self) -> Result<TokenPair> {
        let (key, _) = self.consumer()?;
        TokenStore::new()
            .get(&key)?
            .context("Not logged in. Run `bbc auth login` to authorize.")
    }

    pub fn client(&self) -> Result<BitBucketClient> {
        let token = self.access_token()?;
        Ok(self.bitbucket()?.authorized_client(token))
    }

    /// The target namespace: the `NAMESPACE/` part of the repository when one
    /// is set, otherwise `--namespace` or `defaults.namespace`.
    pub fn namespace(&self) -> Result<String> {
        if self.repo_setting().is_some() {
            return self.resolve().map(|(namespace, _)| namespace);
        }
        self.namespace_setting()
    }

    /// The target namespace and repository slug.
    pub fn resolve(&self) -> Result<(String, String)> {
        let repo = self
            .repo_setting()
            .context("Could not determine repository. Use --repo or set defaults.repository.")?;

        if let Some((namespace, slug)) = repo.split_once('/') {
            if namespace.is_empty() || slug.is_empty() || slug.contains('/') {
                bail!("Invalid repository format '{repo}'. Expected NAMESPACE/REPO or REPO");
            }
            return Ok((namespace.to_string(), slug.to_string()));
        }

        Ok((self.namespace_setting()?, repo))
    }

    fn repo_setting(&self) -> Option<String> {
        self.global
            .repo
            .clone()
            .or_else(|| self.config.defaults.repository.clone())
    }

    fn namespace_setting(&self) -> Result<String> {
        self.global
            .namespace
            .clone()
            .or_else(|| self.config.defaults.namespace.clone())
            .context("Could not determine namespace. Use --namespace or set defaults.namespace.")
    }

    pub fn repository(&self) -> Result<RepositoryClient> {
        let (namespace, slug) = self.resolve()?;
        Ok(self.client()?.for_namespace(&namespace).repository(&slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(global: GlobalOptions, config: Config) -> CommandContext {
        CommandContext::new(config, &global)
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.set("oauth.consumer_key", "from-config").unwrap();
        config.set("oauth.consumer_secret", "config-secret").unwrap();
        let global = GlobalOptions {
            consumer_key: Some("from-flag".into()),
            ..Default::default()
        };

        let (key, secret) = context(global, config).consumer().unwrap();
        assert_eq!(key, "from-flag");
        assert_eq!(secret, "config-secret");
    }

    #[test]
    fn test_missing_consumer() {
        let err = context(GlobalOptions::default(), Config::default())
            .consumer()
            .unwrap_err();
        assert!(err.to_string().contains("No OAuth consumer"));
    }

    #[test]
    fn test_resolve_qualified_repo() {
        let global = GlobalOptions {
            namespace: Some("ignored".into()),
            repo: Some("team/app".into()),
            ..Default::default()
        };
        assert_eq!(
            context(global, Config::default()).resolve().unwrap(),
            ("team".to_string(), "app".to_string())
        );
    }

    #[test]
    fn test_resolve_uses_defaults() {
        let mut config = Config::default();
        config.set("defaults.namespace", "team").unwrap();
        config.set("defaults.repository", "app").unwrap();
        let ctx = context(GlobalOptions::default(), config);
        assert_eq!(ctx.resolve().unwrap(), ("team".to_string(), "app".to_string()));
        assert_eq!(ctx.namespace().unwrap(), "team");
    }

    #[test]
    fn test_resolve_rejects_malformed_repo() {
        let global = GlobalOptions {
            repo: Some("a/b/c".into()),
            ..Default::default()
        };
        assert!(context(global, Config::default()).resolve().is_err());
    }

    #[test]
    fn test_namespace_without_repo() {
        let global = GlobalOptions {
            namespace: Some("team".into()),
            ..Default::default()
        };
        assert_eq!(context(global, Config::default()).namespace().unwrap(), "team");
    }

    #[test]
    fn test_namespace_reports_malformed_repo() {
        let mut config = Config::default();
        config.set("defaults.namespace", "fallback").unwrap();
        let global = GlobalOptions {
            namespace: Some("team".into()),
            repo: Some("a/b/c".into()),
            ..Default::default()
        };

        let err = context(global, config).namespace().unwrap_err();
        assert!(err.to_string().contains("Invalid repository format 'a/b/c'"));
    }
}
