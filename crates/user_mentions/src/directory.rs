// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use thiserror::Error;
use tracing::debug;

use crate::user_record::UserRecord;

/// Suggestions shown for one search, at most.
pub const MAX_SUGGESTIONS: usize = 10;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Directory response is not a list of users: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Directory is unavailable: {0}")]
    Unavailable(String),
}

/// Somewhere users can be looked up by the start of their name.
pub trait UserDirectory {
    fn search(&self, fragment: &str) -> Result<Vec<UserRecord>, DirectoryError>;
}

/// Read the body of a directory reply: a JSON array of user records.
pub fn parse_directory_response(json: &str) -> Result<Vec<UserRecord>, DirectoryError> {
    let users: Vec<UserRecord> = serde_json::from_str(json)?;
    debug!(count = users.len(), "Parsed directory response");
    Ok(users)
}

/// A directory held in memory.
#[derive(Clone, Debug, Default)]
pub struct StaticDirectory {
    users: Vec<UserRecord>,
}

impl StaticDirectory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        parse_directory_response(json).map(Self::new)
    }
}

impl UserDirectory for StaticDirectory {
    fn search(&self, fragment: &str) -> Result<Vec<UserRecord>, DirectoryError> {
        Ok(self
            .users
            .iter()
            .filter(|user| user.matches(fragment))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect())
    }
}
