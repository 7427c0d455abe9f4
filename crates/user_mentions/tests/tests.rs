// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::time::{Duration, Instant};

use speculoos::prelude::*;
use user_mentions::{
    DebouncedSearch, DirectoryError, MentionPicker, StaticDirectory, UserDirectory,
    UserRecord,
};

const RESPONSE: &str = r#"[
    {"id": "@alice:matrix.org", "displayName": "Alice", "avatarUrl": "https://x.org/alice.png"},
    {"id": "@alan:matrix.org", "displayName": "Alan"},
    {"id": "@bob:matrix.org"}
]"#;

struct OfflineDirectory;

impl UserDirectory for OfflineDirectory {
    fn search(&self, _fragment: &str) -> Result<Vec<UserRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("no network".to_owned()))
    }
}

#[test]
fn typing_narrows_the_suggestions() {
    let directory = StaticDirectory::from_json(RESPONSE).unwrap();
    let start = Instant::now();
    let mut search = DebouncedSearch::default();
    let mut picker = MentionPicker::new();

    search.query("a", start);
    search.query("al", start + Duration::from_millis(50));
    assert!(!search.run_due(start + Duration::from_millis(200), &directory));
    assert!(search.run_due(start + Duration::from_secs(1), &directory));

    let names: Vec<&str> = search
        .suggestions()
        .iter()
        .map(UserRecord::mention_name)
        .collect();
    assert_that!(names).is_equal_to(vec!["Alice", "Alan"]);

    picker.previous(search.suggestions().len());
    assert_eq!(
        picker.selected(search.suggestions()).map(|user| user.id.as_str()),
        Some("@alan:matrix.org")
    );
}

#[test]
fn an_unreachable_directory_gives_no_suggestions() {
    let start = Instant::now();
    let mut search = DebouncedSearch::new(Duration::ZERO);
    search.query("al", start);
    assert!(search.run_due(start, &OfflineDirectory));
    assert!(search.suggestions().is_empty());
}

#[test]
fn users_without_a_name_are_mentioned_by_id() {
    let directory = StaticDirectory::from_json(RESPONSE).unwrap();
    let users = directory.search("BOB").unwrap();
    assert_that!(users).has_length(1);
    assert_eq!(users[0].mention_name(), "@bob:matrix.org");
}
