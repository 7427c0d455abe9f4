// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};

use crate::dom::parser::{DeserializeOptions, UnknownTagPolicy};
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::persistence::DEFAULT_STORAGE_KEY;
use crate::transforms::MentionSpacing;

/// Tunables of a composer. Every field is optional when deserializing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ComposerConfig {
    pub history_limit: usize,
    pub mention_spacing: MentionSpacing,
    pub unknown_tags: UnknownTagPolicy,
    pub storage_key: String,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            mention_spacing: MentionSpacing::default(),
            unknown_tags: UnknownTagPolicy::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
        }
    }
}

impl ComposerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn deserialize_options(&self) -> DeserializeOptions {
        DeserializeOptions {
            unknown_tags: self.unknown_tags,
        }
    }
}
