// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Capabilities layered over the base text handling.
//!
//! Each plugin may claim a typed string or a clipboard payload. Plugins are
//! asked in order and the first one to handle the input wins; when none
//! does, the base behaviour applies.

mod html;
mod images;
mod links;

pub use html::HtmlPlugin;
pub use images::ImagesPlugin;
pub use links::LinksPlugin;

use tracing::debug;

use crate::dom::parser::DeserializeOptions;
use crate::editor_state::EditorState;
use crate::transforms::{insert_break, insert_text};
use crate::user_notice::UserNotice;

/// A file from the clipboard, read as a `data:` URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipboardFile {
    pub mime_type: String,
    pub data_url: String,
}

/// What was pasted or dropped, by flavour.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClipboardData {
    pub html: Option<String>,
    pub text: Option<String>,
    pub files: Vec<ClipboardFile>,
}

impl ClipboardData {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn html(html: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            text: Some(text.into()),
            files: Vec::new(),
        }
    }
}

/// The next state, and anything the user needs to be told about it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: EditorState,
    pub notice: Option<UserNotice>,
}

impl Transition {
    pub fn to(state: EditorState) -> Self {
        Self {
            state,
            notice: None,
        }
    }

    pub fn refused(state: &EditorState, notice: UserNotice) -> Self {
        Self {
            state: state.clone(),
            notice: Some(notice),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PluginOutcome {
    Handled(Transition),
    Pass,
}

pub trait EditorPlugin {
    fn name(&self) -> &'static str;

    fn on_insert_text(&self, _state: &EditorState, _text: &str) -> PluginOutcome {
        PluginOutcome::Pass
    }

    fn on_insert_data(
        &self,
        _state: &EditorState,
        _data: &ClipboardData,
    ) -> PluginOutcome {
        PluginOutcome::Pass
    }
}

pub struct PluginChain {
    plugins: Vec<Box<dyn EditorPlugin>>,
}

impl PluginChain {
    pub fn empty() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Html, then images, then links.
    pub fn standard(options: DeserializeOptions) -> Self {
        Self::empty()
            .with(HtmlPlugin::new(options))
            .with(ImagesPlugin)
            .with(LinksPlugin)
    }

    pub fn with(mut self, plugin: impl EditorPlugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    pub fn insert_text(&self, state: &EditorState, text: &str) -> Transition {
        for plugin in &self.plugins {
            if let PluginOutcome::Handled(transition) = plugin.on_insert_text(state, text) {
                debug!(plugin = plugin.name(), "text handled");
                return transition;
            }
        }
        Transition::to(insert_text(state, text))
    }

    pub fn insert_data(&self, state: &EditorState, data: &ClipboardData) -> Transition {
        for plugin in &self.plugins {
            if let PluginOutcome::Handled(transition) = plugin.on_insert_data(state, data) {
                debug!(plugin = plugin.name(), "data handled");
                return transition;
            }
        }
        match &data.text {
            Some(text) => Transition::to(insert_plain_text(state, text)),
            None => Transition::to(state.clone()),
        }
    }
}

/// Insert pasted text line by line, each line break splitting the block.
pub(crate) fn insert_plain_text(state: &EditorState, text: &str) -> EditorState {
    let mut next = state.clone();
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            next = insert_break(&next);
        }
        next = insert_text(&next, line.trim_end_matches('\r'));
    }
    next
}

#[cfg(test)]
mod test {
    use speculoos::prelude::*;

    use super::*;
    use crate::dom::{Document, ElementNode, Node, Selection};

    fn empty_state() -> EditorState {
        EditorState::caret_at_end(Document::default())
    }

    struct Shout;

    impl EditorPlugin for Shout {
        fn name(&self) -> &'static str {
            "shout"
        }

        fn on_insert_text(&self, state: &EditorState, text: &str) -> PluginOutcome {
            PluginOutcome::Handled(Transition::to(insert_text(state, &text.to_uppercase())))
        }
    }

    #[test]
    fn the_standard_order() {
        assert_eq!(
            PluginChain::standard(DeserializeOptions::default()).names(),
            vec!["html", "images", "links"]
        );
    }

    #[test]
    fn the_first_plugin_to_handle_wins() {
        let chain = PluginChain::empty().with(Shout).with(LinksPlugin);
        let next = chain.insert_text(&empty_state(), "https://x.y");
        assert_eq!(next.state.document.to_plain_text(), "HTTPS://X.Y");
    }

    #[test]
    fn plain_text_falls_back_to_typing() {
        let chain = PluginChain::empty();
        let next = chain.insert_text(&empty_state(), "hi");
        assert_eq!(next.state.document.to_plain_text(), "hi");
        assert_that!(next.notice).is_none();
    }

    #[test]
    fn pasted_lines_become_blocks() {
        let chain = PluginChain::empty();
        let next = chain.insert_data(&empty_state(), &ClipboardData::text("one\r\ntwo\nthree"));
        assert_eq!(next.state.document.children().len(), 3);
        assert_eq!(next.state.document.to_plain_text(), "one\ntwo\nthree");
        assert_that!(next.state.selection)
            .is_equal_to(Some(Selection::caret(vec![2, 0], 5)));
    }

    #[test]
    fn nothing_to_paste() {
        let state = EditorState::caret_at_end(Document::from_blocks(vec![
            ElementNode::new_paragraph(vec![Node::text("a")]),
        ]));
        let next = PluginChain::empty().insert_data(&state, &ClipboardData::default());
        assert_that!(next.state).is_equal_to(state);
    }
}
