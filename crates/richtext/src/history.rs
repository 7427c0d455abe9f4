// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::VecDeque;

use crate::editor_state::EditorState;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Snapshots of the states before each document change. The oldest ones
/// are forgotten past `limit`.
#[derive(Clone, Debug)]
pub struct History {
    undo: VecDeque<EditorState>,
    redo: Vec<EditorState>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit,
        }
    }

    /// Remember `previous` as the state to go back to. Anything that was
    /// undone can no longer be redone.
    pub fn record(&mut self, previous: EditorState) {
        self.redo.clear();
        self.push_undo(previous);
    }

    fn push_undo(&mut self, state: EditorState) {
        if self.limit == 0 {
            return;
        }
        self.undo.push_back(state);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
    }

    /// Swap `current` for the last recorded state.
    pub fn undo(&mut self, current: EditorState) -> Option<EditorState> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    pub fn redo(&mut self, current: EditorState) -> Option<EditorState> {
        let next = self.redo.pop()?;
        self.push_undo(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
