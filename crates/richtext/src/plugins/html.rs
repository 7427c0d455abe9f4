// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::warn;

use super::{ClipboardData, EditorPlugin, PluginOutcome, Transition};
use crate::dom::parser::{parse_html, DeserializeOptions};
use crate::editor_state::EditorState;
use crate::transforms::insert_fragment;

/// Pastes rich clipboard content as document nodes.
pub struct HtmlPlugin {
    options: DeserializeOptions,
}

impl HtmlPlugin {
    pub fn new(options: DeserializeOptions) -> Self {
        Self { options }
    }
}

impl EditorPlugin for HtmlPlugin {
    fn name(&self) -> &'static str {
        "html"
    }

    fn on_insert_data(&self, state: &EditorState, data: &ClipboardData) -> PluginOutcome {
        let Some(html) = &data.html else {
            return PluginOutcome::Pass;
        };
        match parse_html(html, &self.options) {
            Ok(nodes) if nodes.is_empty() => PluginOutcome::Pass,
            Ok(nodes) => PluginOutcome::Handled(Transition::to(insert_fragment(state, nodes))),
            Err(error) => {
                warn!(%error, "pasted html refused, falling back to text");
                PluginOutcome::Pass
            }
        }
    }
}
