// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use arbitrary::Arbitrary;
use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use repopulse::classifier::evaluate;
use repopulse::tiers::{ActivityTier, TierClock};
use repopulse::types::{ActivitySignals, RepoMetadata, RepositorySnapshot, Status};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    json: &'a str,
    commits: u64,
    tier: Option<u8>,
    now_secs: u32,
}

fuzz_target!(|input: Input<'_>| {
    let Ok(meta) = serde_json::from_str::<RepoMetadata>(input.json) else {
        return;
    };
    // Malformed timestamps must surface as errors, never panics.
    let Ok(snapshot) = RepositorySnapshot::from_metadata(&meta) else {
        return;
    };

    let tier = input.tier.map(|t| ActivityTier::ALL[usize::from(t) % 3]);
    let signals = ActivitySignals::new(input.commits, tier);
    let Some(now) = Utc.timestamp_opt(i64::from(input.now_secs), 0).single() else {
        return;
    };

    let status = evaluate(&snapshot, &signals, &TierClock::at(now));
    if meta.archived {
        assert_eq!(status, Some(Status::Dead));
    }
});
