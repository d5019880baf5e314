// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Repopulse CLI - is this repository Live, Stagnant, or Dead?

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use repopulse::commands::{self, classify::ClassifyArgs, OutputOptions, Outcome};
use repopulse::tiers::ActivityTier;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "repopulse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "REPOPULSE_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", global = true)]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a GitHub repository's activity and classify it
    Analyze {
        /// Repository URL (https://github.com/<owner>/<name>) or <owner>/<name>
        url: String,

        /// GitHub token for authentication
        #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Classify signals supplied on the command line, without network access
    Classify {
        /// Repository is archived
        #[arg(long)]
        archived: bool,

        /// Last update time (RFC 3339)
        #[arg(long, value_name = "TIMESTAMP")]
        updated_at: String,

        /// Commits in the last 7 days
        #[arg(long, default_value_t = 0)]
        commits: u64,

        /// Most recent maintainer activity tier (active, some-activity, inactive)
        #[arg(long, value_name = "TIER")]
        maintainer_tier: Option<ActivityTier>,

        /// Evaluate as of this instant (RFC 3339) instead of now
        #[arg(long, value_name = "TIMESTAMP")]
        now: Option<String>,
    },

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    let output = OutputOptions {
        json: cli.json,
        color: !cli.no_color,
    };

    // Execute command
    let outcome = match cli.command {
        Commands::Analyze { url, token } => {
            let config = repopulse::config::load(cli.config.as_deref())?;
            commands::analyze::run(&url, token, config, output).await
        }
        Commands::Classify { archived, updated_at, commits, maintainer_tier, now } => {
            let args = ClassifyArgs { archived, updated_at, commits, maintainer_tier, now };
            commands::classify::run(args, output)
        }
        Commands::Config => {
            let config = repopulse::config::load(cli.config.as_deref())?;
            commands::config::run(&config, cli.config.as_deref(), output)
        }
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    }?;

    if outcome == Outcome::Unclassified {
        std::io::Write::flush(&mut std::io::stdout())?;
        std::process::exit(outcome.exit_code());
    }
    Ok(())
}
