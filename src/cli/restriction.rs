//
//  bitbucket-client
//  cli/restriction.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Branch Restriction Commands
//!
//! ```bash
//! bbc restriction list -R team/app
//! bbc restriction create -R team/app --kind push --pattern main --user octo
//! bbc restriction create -R team/app --kind require_approvals_to_merge --pattern '*' --value 2
//!
//! # Edit a fetched restriction and send it back
//! bbc restriction view 12 -R team/app > rule.json
//! bbc restriction update 12 -R team/app --from-file rule.json
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde_json::{json, Map, Value};

use crate::api::cloud::RestrictionKind;
use crate::interactive::confirm_or_skip;

use super::{CommandContext, GlobalOptions};

#[derive(Args, Debug)]
pub struct RestrictionCommand {
    #[command(subcommand)]
    pub command: RestrictionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RestrictionSubcommand {
    /// List branch restrictions
    #[command(visible_alias = "ls")]
    List,

    /// Show one restriction
    View { id: String },

    /// Create a restriction
    Create(CreateArgs),

    /// Update a restriction
    Update(UpdateArgs),

    /// Delete a restriction
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Restriction kind, e.g. push or require_approvals_to_merge
    #[arg(long)]
    pub kind: String,

    /// Branch glob the restriction applies to
    #[arg(long)]
    pub pattern: String,

    /// Exempt user (repeatable)
    #[arg(long = "user")]
    pub users: Vec<String>,

    /// Exempt group slug (repeatable)
    #[arg(long = "group")]
    pub groups: Vec<String>,

    /// Numeric value for kinds that take one
    #[arg(long)]
    pub value: Option<i64>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: String,

    /// JSON object to start from, e.g. the output of `view`
    #[arg(long)]
    pub from_file: Option<PathBuf>,

    #[arg(long)]
    pub kind: Option<String>,

    #[arg(long)]
    pub pattern: Option<String>,

    #[arg(long)]
    pub value: Option<i64>,
}

impl RestrictionCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = CommandContext::load(global)?;
        let restrictions = ctx.repository()?.branch_restrictions();

        match &self.command {
            RestrictionSubcommand::List => ctx.output.write_json(&restrictions.all().await?),
            RestrictionSubcommand::View { id } => ctx.output.write_json(&restrictions.get(id).await?),
            RestrictionSubcommand::Create(args) => {
                let kind: RestrictionKind = args.kind.parse()?;
                let users = args.users.iter().map(|u| json!({ "username": u })).collect();
                let groups = args.groups.iter().map(|g| json!({ "slug": g })).collect();
                let created = restrictions
                    .create(kind, &args.pattern, Some(users), Some(groups), args.value.map(Value::from))
                    .await?;
                ctx.output.write_json(&created)
            }
            RestrictionSubcommand::Update(args) => {
                let fields = update_fields(args)?;
                ctx.output.write_json(&restrictions.update(&args.id, &fields).await?)
            }
            RestrictionSubcommand::Delete { id, yes } => {
                if !confirm_or_skip(&format!("Delete branch restriction {id}?"), *yes)? {
                    ctx.output.write_warning("Cancelled");
                    return Ok(());
                }
                restrictions.delete(id).await?;
                ctx.output.write_success(&format!("Deleted branch restriction {id}"));
                Ok(())
            }
        }
    }
}

/// Merges `--from-file` with the individual flags; flags win.
fn update_fields(args: &UpdateArgs) -> Result<Value> {
    let mut fields = match &args.from_file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            match serde_json::from_str(&content).context("Expected a JSON object")? {
                Value::Object(map) => map,
                _ => bail!("Expected a JSON object in {}", path.display()),
            }
        }
        None => Map::new(),
    };

    if let Some(kind) = &args.kind {
        fields.insert("kind".into(), Value::from(kind.as_str()));
    }
    if let Some(pattern) = &args.pattern {
        fields.insert("pattern".into(), Value::from(pattern.as_str()));
    }
    if let Some(value) = args.value {
        fields.insert("value".into(), Value::from(value));
    }

    if fields.is_empty() {
        bail!("Nothing to update. Pass --from-file or at least one of --kind, --pattern, --value");
    }
    Ok(Value::Object(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn args(from_file: Option<PathBuf>) -> UpdateArgs {
        UpdateArgs {
            id: "1".into(),
            from_file,
            kind: None,
            pattern: Some("release/*".into()),
            value: None,
        }
    }

    #[test]
    fn test_flags_override_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"id": 1, "kind": "push", "pattern": "main"}"#).unwrap();

        let fields = update_fields(&args(Some(file.path().to_path_buf()))).unwrap();
        assert_eq!(fields, json!({"id": 1, "kind": "push", "pattern": "release/*"}));
    }

    #[test]
    fn test_requires_something_to_update() {
        let mut empty = args(None);
        empty.pattern = None;
        assert!(update_fields(&empty).is_err());
    }
}
