// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::{ClipboardData, EditorPlugin, PluginOutcome, Transition};
use crate::editor_state::EditorState;
use crate::transforms::wrap_link;
use crate::url_detection::is_url;

/// A URL typed or pasted becomes a link.
pub struct LinksPlugin;

impl LinksPlugin {
    fn link(state: &EditorState, text: &str) -> PluginOutcome {
        if is_url(text) {
            PluginOutcome::Handled(Transition::to(wrap_link(state, text)))
        } else {
            PluginOutcome::Pass
        }
    }
}

impl EditorPlugin for LinksPlugin {
    fn name(&self) -> &'static str {
        "links"
    }

    fn on_insert_text(&self, state: &EditorState, text: &str) -> PluginOutcome {
        Self::link(state, text)
    }

    fn on_insert_data(&self, state: &EditorState, data: &ClipboardData) -> PluginOutcome {
        match data.text.as_deref() {
            Some(text) => Self::link(state, text.trim()),
            None => PluginOutcome::Pass,
        }
    }
}
