// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};

/// A user as the directory describes them. Any field the directory leaves
/// out is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            avatar_url: None,
        }
    }

    pub fn with_avatar(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// The name a mention of this user shows: the display name, or the id
    /// when there is none.
    pub fn mention_name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.id
        } else {
            &self.display_name
        }
    }

    /// Whether the user's name or id starts with `fragment`, ignoring case.
    pub fn matches(&self, fragment: &str) -> bool {
        let fragment = fragment.to_lowercase();
        self.display_name.to_lowercase().starts_with(&fragment)
            || self
                .id
                .trim_start_matches('@')
                .to_lowercase()
                .starts_with(&fragment)
    }
}
