// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::{debug, warn};

use crate::composer_config::ComposerConfig;
use crate::composer_update::ComposerUpdate;
use crate::dom::normalize::normalize_document;
use crate::dom::parser::parse_html;
use crate::dom::{Document, HtmlParseError, Selection, ToHtml, ToTree};
use crate::editor_state::EditorState;
use crate::history::History;
use crate::persistence::{load_document, save_document, KeyValueStore};
use crate::plugins::{PluginChain, Transition};

pub struct ComposerModel {
    pub(crate) state: EditorState,
    pub(crate) history: History,
    pub(crate) plugins: PluginChain,
    pub(crate) config: ComposerConfig,
    pub(crate) store: Option<Box<dyn KeyValueStore>>,
}

impl ComposerModel {
    pub fn new() -> Self {
        Self::with_config(ComposerConfig::default())
    }

    pub fn with_config(config: ComposerConfig) -> Self {
        Self::from_document(Document::default(), config)
    }

    /// Start editing `document`, with the caret at its end.
    pub fn from_document(mut document: Document, config: ComposerConfig) -> Self {
        normalize_document(&mut document);
        Self {
            state: EditorState::caret_at_end(document),
            history: History::new(config.history_limit),
            plugins: PluginChain::standard(config.deserialize_options()),
            config,
            store: None,
        }
    }

    pub fn from_html(html: &str, config: ComposerConfig) -> Result<Self, HtmlParseError> {
        let nodes = parse_html(html, &config.deserialize_options())?;
        let mut document = Document::new(nodes);
        normalize_document(&mut document);
        Ok(Self::from_document(document, config))
    }

    /// Pick up the document saved in `store`. When nothing readable is
    /// there, `initial` is used instead. Later changes are saved back.
    pub fn restore_from_store(
        store: Box<dyn KeyValueStore>,
        initial: Document,
        config: ComposerConfig,
    ) -> Self {
        let document = match load_document(&*store, &config.storage_key) {
            Ok(Some(document)) => document,
            Ok(None) => initial,
            Err(error) => {
                warn!(%error, key = %config.storage_key, "Saved document is unreadable");
                initial
            }
        };
        Self {
            state: EditorState::caret_at_end(document),
            history: History::new(config.history_limit),
            plugins: PluginChain::standard(config.deserialize_options()),
            config,
            store: Some(store),
        }
    }

    /// Replace the plugins consulted for typed and pasted input.
    pub fn set_plugins(&mut self, plugins: PluginChain) {
        self.plugins = plugins;
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn document(&self) -> &Document {
        &self.state.document
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.state.selection.as_ref()
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Move the selection. Pending marks are dropped.
    pub fn select(&mut self, selection: Selection) -> ComposerUpdate {
        if !self.state.document.is_valid_selection(&selection) {
            debug!(?selection, "Ignoring a selection outside the document");
            return ComposerUpdate::keep();
        }
        self.state.selection = Some(selection);
        self.state.marks = None;
        self.create_update_menu()
    }

    /// Move to the state a rule produced. A changed document is recorded in
    /// the history and saved.
    pub(crate) fn apply(&mut self, transition: Transition) -> ComposerUpdate {
        let Transition { state, notice } = transition;
        if state.document == self.state.document {
            let moved = state.selection != self.state.selection || state.marks != self.state.marks;
            self.state = state;
            let update = if moved {
                self.create_update_menu()
            } else {
                ComposerUpdate::keep()
            };
            return update.with_notice(notice);
        }

        #[cfg(feature = "assert-invariants")]
        state.document.assert_invariants();

        let previous = std::mem::replace(&mut self.state, state);
        self.history.record(previous);
        self.persist();
        self.create_update_replace_all().with_notice(notice)
    }

    pub(crate) fn apply_state(&mut self, state: EditorState) -> ComposerUpdate {
        self.apply(Transition::to(state))
    }

    /// Save the document. Failures are logged and otherwise ignored.
    pub(crate) fn persist(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        if let Err(error) =
            save_document(&mut **store, &self.config.storage_key, &self.state.document)
        {
            warn!(%error, key = %self.config.storage_key, "Could not save the document");
        }
    }

    pub(crate) fn create_update_replace_all(&self) -> ComposerUpdate {
        ComposerUpdate::replace_all(
            self.state.document.clone(),
            self.state.selection.clone(),
            self.action_states(),
        )
    }

    pub(crate) fn create_update_menu(&self) -> ComposerUpdate {
        ComposerUpdate::update_menu(self.action_states())
    }

    pub fn get_content_as_html(&self) -> String {
        self.state.document.to_html()
    }

    pub fn get_content_as_plain_text(&self) -> String {
        self.state.document.to_plain_text()
    }

    pub fn to_tree(&self) -> String {
        self.state.document.to_tree()
    }
}

impl Default for ComposerModel {
    fn default() -> Self {
        Self::new()
    }
}
