// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - shows the effective configuration

use super::{OutputOptions, Outcome};
use crate::config::{self, Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Print the effective configuration with the token redacted
pub fn run(config: &Config, source: Option<&Path>, output: OutputOptions) -> Result<Outcome> {
    let shown = config.redacted();

    if output.json {
        let json =
            serde_json::to_string_pretty(&shown).context("Failed to serialize configuration")?;
        println!("{json}");
        return Ok(Outcome::Done);
    }

    let file = source
        .map(Path::to_path_buf)
        .or_else(config::default_path)
        .filter(|p| p.exists());
    match file {
        Some(path) => println!("# config file: {}", path.display()),
        None => println!("# config file: (none)"),
    }
    print!("{}", toml::to_string_pretty(&shown).context("Failed to render configuration")?);

    Ok(Outcome::Done)
}
