// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::HashMap;

use crate::action_state::{ActionState, ComposerAction};
use crate::dom::{Document, Selection};
use crate::user_notice::UserNotice;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentUpdate {
    Keep,
    ReplaceAll {
        document: Document,
        selection: Option<Selection>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuState {
    Keep,
    Update {
        action_states: HashMap<ComposerAction, ActionState>,
    },
}

/// What a host has to redraw after an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposerUpdate {
    pub document_update: DocumentUpdate,
    pub menu_state: MenuState,
    pub notice: Option<UserNotice>,
}

impl ComposerUpdate {
    pub fn keep() -> Self {
        Self {
            document_update: DocumentUpdate::Keep,
            menu_state: MenuState::Keep,
            notice: None,
        }
    }

    pub fn update_menu(action_states: HashMap<ComposerAction, ActionState>) -> Self {
        Self {
            document_update: DocumentUpdate::Keep,
            menu_state: MenuState::Update { action_states },
            notice: None,
        }
    }

    pub fn replace_all(
        document: Document,
        selection: Option<Selection>,
        action_states: HashMap<ComposerAction, ActionState>,
    ) -> Self {
        Self {
            document_update: DocumentUpdate::ReplaceAll {
                document,
                selection,
            },
            menu_state: MenuState::Update { action_states },
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: Option<UserNotice>) -> Self {
        self.notice = notice;
        self
    }

    pub fn replaces_document(&self) -> bool {
        matches!(self.document_update, DocumentUpdate::ReplaceAll { .. })
    }
}
