// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod analyze;
pub mod classify;
pub mod completions;
pub mod config;

/// Process exit codes
pub mod exit_codes {
    /// Command completed and produced a status. Errors exit with 1 and clap
    /// usage errors with 2.
    pub const SUCCESS: i32 = 0;
    /// No status predicate matched
    pub const UNCLASSIFIED: i32 = 3;
}

/// What a command run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Finished normally
    Done,
    /// Finished, but the repository could not be classified
    Unclassified,
}

impl Outcome {
    /// Exit code for this outcome
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Done => exit_codes::SUCCESS,
            Self::Unclassified => exit_codes::UNCLASSIFIED,
        }
    }
}

/// Presentation switches shared by every command
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Print JSON instead of text
    pub json: bool,
    /// Colorize text output
    pub color: bool,
}
