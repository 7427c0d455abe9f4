// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::user_record::UserRecord;

/// The highlighted entry of a suggestion list. Moving past either end wraps
/// around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MentionPicker {
    index: usize,
}

impl MentionPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self, count: usize) {
        self.index = if count == 0 || self.index + 1 >= count {
            0
        } else {
            self.index + 1
        };
    }

    pub fn previous(&mut self, count: usize) {
        self.index = match count {
            0 => 0,
            _ if self.index == 0 || self.index >= count => count - 1,
            _ => self.index - 1,
        };
    }

    pub fn selected<'a>(&self, suggestions: &'a [UserRecord]) -> Option<&'a UserRecord> {
        suggestions.get(self.index)
    }

    /// Back to the first entry, as when the suggestions change.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}
