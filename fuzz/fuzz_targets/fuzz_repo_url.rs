// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use libfuzzer_sys::fuzz_target;
use repopulse::github::RepoRef;

fuzz_target!(|data: &str| {
    if let Ok(repo) = RepoRef::parse(data) {
        assert!(!repo.owner.is_empty());
        assert!(!repo.name.is_empty());
        assert!(!repo.owner.contains('/'));
        assert!(!repo.name.contains('/'));
        assert!(!repo.owner.contains('.'));
    }
});
