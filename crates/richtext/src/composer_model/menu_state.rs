// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::action_state::{ActionState, ComposerAction};
use crate::transforms::{is_block_active, is_link_active, is_mark_active};
use crate::ComposerModel;

impl ComposerModel {
    /// The state of every toolbar button for the current selection.
    pub fn action_states(&self) -> HashMap<ComposerAction, ActionState> {
        ComposerAction::iter()
            .map(|action| (action, self.action_state(action)))
            .collect()
    }

    fn action_state(&self, action: ComposerAction) -> ActionState {
        let has_selection = self.state.valid_selection().is_some();
        match action {
            ComposerAction::Undo => enabled_if(self.history.can_undo()),
            ComposerAction::Redo => enabled_if(self.history.can_redo()),
            _ if !has_selection => ActionState::Disabled,
            ComposerAction::Link => ActionState::reversed_if(is_link_active(&self.state)),
            ComposerAction::Image => ActionState::Enabled,
            _ => {
                if let Some(format) = action.inline_format() {
                    ActionState::reversed_if(is_mark_active(&self.state, format))
                } else if let Some(format) = action.block_format() {
                    ActionState::reversed_if(is_block_active(&self.state, format))
                } else {
                    ActionState::Enabled
                }
            }
        }
    }
}

fn enabled_if(condition: bool) -> ActionState {
    if condition {
        ActionState::Enabled
    } else {
        ActionState::Disabled
    }
}
