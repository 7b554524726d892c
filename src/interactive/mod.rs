//
//  bitbucket-client
//  interactive/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Terminal prompts used by the CLI (verifier entry, consumer setup,
//! destructive-action confirmation), built on `dialoguer`.

mod prompt;

pub use prompt::*;
