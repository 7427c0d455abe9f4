// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use user_mentions::UserRecord;

use crate::mention_trigger::{mention_trigger, MentionTrigger};
use crate::transforms::insert_mention;
use crate::{ComposerModel, ComposerUpdate, EditorState};

impl ComposerModel {
    /// Insert a mention of `character` at the caret, followed by a space
    /// when the config asks for one.
    pub fn insert_mention(&mut self, character: &str) -> ComposerUpdate {
        let next = insert_mention(&self.state, character, self.config.mention_spacing);
        self.apply_state(next)
    }

    /// Insert a mention of a user picked from the directory.
    pub fn insert_user_mention(&mut self, user: &UserRecord) -> ComposerUpdate {
        self.insert_mention(user.mention_name())
    }

    /// The `@word` being typed at the caret, if any.
    pub fn mention_trigger(&self) -> Option<MentionTrigger> {
        mention_trigger(&self.state)
    }

    /// Replace the typed `@word` with a mention. One undo step brings the
    /// typed text back.
    pub fn insert_mention_at_trigger(
        &mut self,
        trigger: &MentionTrigger,
        character: &str,
    ) -> ComposerUpdate {
        if !self.state.document.is_valid_selection(&trigger.range) {
            return ComposerUpdate::keep();
        }
        let selected = EditorState::with_selection(
            self.state.document.clone(),
            trigger.range.clone(),
        );
        let next = insert_mention(&selected, character, self.config.mention_spacing);
        if next.document == selected.document {
            return ComposerUpdate::keep();
        }
        self.apply_state(next)
    }
}
