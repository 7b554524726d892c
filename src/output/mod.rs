//
//  bitbucket-client
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Payloads are printed as JSON (pretty by default, one line with
//! `--compact`); status lines go through [`OutputWriter`] and are styled
//! with `console` when the terminal supports color.
//!
//! | Method | Stream | Prefix |
//! |--------|--------|--------|
//! | `write_json` | stdout | none |
//! | `write_success` | stdout | `✓` (green) |
//! | `write_info` | stdout | none |
//! | `write_warning` | stderr | `warning:` (yellow) |
//! | `write_error` | stderr | `error:` (red) |

use std::io::Write;

use console::style;
use serde::Serialize;

pub struct OutputWriter {
    compact: bool,
    color: bool,
}

impl OutputWriter {
    pub fn new(compact: bool) -> Self {
        Self {
            compact,
            color: console::colors_enabled(),
        }
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn write_json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.write_json_to(&mut handle, value)
    }

    pub fn write_json_to<W: Write, T: Serialize>(&self, writer: &mut W, value: &T) -> anyhow::Result<()> {
        if self.compact {
            serde_json::to_writer(&mut *writer, value)?;
        } else {
            serde_json::to_writer_pretty(&mut *writer, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    pub fn write_error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    pub fn write_warning(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    pub fn write_success(&self, msg: &str) {
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

impl Default for OutputWriter {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_json() {
        let writer = OutputWriter::new(false);
        let mut buf = Vec::new();
        writer.write_json_to(&mut buf, &json!({"a": 1})).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\n  \"a\": 1\n}\n");
    }

    #[test]
    fn test_compact_json() {
        let writer = OutputWriter::new(true);
        let mut buf = Vec::new();
        writer.write_json_to(&mut buf, &json!([1, 2])).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[1,2]\n");
    }
}
