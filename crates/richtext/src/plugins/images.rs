// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::{ClipboardData, EditorPlugin, PluginOutcome, Transition};
use crate::dom::ElementNode;
use crate::editor_state::EditorState;
use crate::transforms::insert_void_element;
use crate::url_detection::{is_image_data_url, is_image_url};

/// Pasted image files, or a pasted image URL, become images.
pub struct ImagesPlugin;

impl EditorPlugin for ImagesPlugin {
    fn name(&self) -> &'static str {
        "images"
    }

    fn on_insert_data(&self, state: &EditorState, data: &ClipboardData) -> PluginOutcome {
        let images: Vec<&str> = data
            .files
            .iter()
            .filter(|file| file.mime_type.starts_with("image/"))
            .map(|file| file.data_url.as_str())
            .filter(|url| is_image_data_url(url))
            .collect();
        if !images.is_empty() {
            let next = images.into_iter().fold(state.clone(), |next, url| {
                insert_void_element(&next, ElementNode::new_image(url))
            });
            return PluginOutcome::Handled(Transition::to(next));
        }
        match data.text.as_deref().map(str::trim) {
            Some(text) if is_image_url(text) => PluginOutcome::Handled(Transition::to(
                insert_void_element(state, ElementNode::new_image(text)),
            )),
            _ => PluginOutcome::Pass,
        }
    }
}
