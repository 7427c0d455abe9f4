// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::hotkeys::{format_for_hotkey, KeyPress};
use crate::transforms::toggle_mark;
use crate::{ComposerModel, ComposerUpdate, InlineFormatType};

impl ComposerModel {
    pub fn bold(&mut self) -> ComposerUpdate {
        self.toggle_mark(InlineFormatType::Bold)
    }

    pub fn italic(&mut self) -> ComposerUpdate {
        self.toggle_mark(InlineFormatType::Italic)
    }

    pub fn underline(&mut self) -> ComposerUpdate {
        self.toggle_mark(InlineFormatType::Underline)
    }

    pub fn inline_code(&mut self) -> ComposerUpdate {
        self.toggle_mark(InlineFormatType::InlineCode)
    }

    pub fn strike_through(&mut self) -> ComposerUpdate {
        self.toggle_mark(InlineFormatType::StrikeThrough)
    }

    pub fn toggle_mark(&mut self, format: InlineFormatType) -> ComposerUpdate {
        let next = toggle_mark(&self.state, format);
        self.apply_state(next)
    }

    /// Toggle the mark bound to `press`. Returns `None` when the key press
    /// is not a formatting hotkey, so the host can handle it.
    pub fn handle_hotkey(&mut self, press: &KeyPress) -> Option<ComposerUpdate> {
        let format = format_for_hotkey(press)?;
        Some(self.toggle_mark(format))
    }
}
