// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::{ComposerModel, ComposerUpdate, EditorState};

impl ComposerModel {
    pub fn undo(&mut self) -> ComposerUpdate {
        let current = self.state.clone();
        match self.history.undo(current) {
            Some(previous) => self.restore_snapshot(previous),
            None => ComposerUpdate::keep(),
        }
    }

    pub fn redo(&mut self) -> ComposerUpdate {
        let current = self.state.clone();
        match self.history.redo(current) {
            Some(next) => self.restore_snapshot(next),
            None => ComposerUpdate::keep(),
        }
    }

    fn restore_snapshot(&mut self, state: EditorState) -> ComposerUpdate {
        self.state = state;
        self.persist();
        self.create_update_replace_all()
    }
}
