// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! A tree of blocks, inline elements and formatted text runs, the rules that
//! edit it around a selection, and a composer that ties the rules to undo
//! history, clipboard plugins and persistence.

mod action_state;
mod block_format;
mod composer_config;
mod composer_model;
mod composer_update;
pub mod dom;
mod editor_state;
mod history;
mod hotkeys;
mod inline_format_type;
mod link_action;
mod mention_trigger;
pub mod persistence;
pub mod plugins;
pub mod transforms;
mod url_detection;
mod user_notice;

pub use crate::action_state::{ActionState, ComposerAction};
pub use crate::block_format::{BlockFormat, UnknownBlockFormat};
pub use crate::composer_config::ComposerConfig;
pub use crate::composer_model::ComposerModel;
pub use crate::composer_update::{ComposerUpdate, DocumentUpdate, MenuState};
pub use crate::dom::parser::{parse_html, DeserializeOptions, UnknownTagPolicy};
pub use crate::dom::{
    classify, Alignment, Document, DomHandle, ElementAttributes, ElementKind,
    ElementNode, HtmlParseError, MarkSet, Node, NodeClass, Point, Selection,
    TextRun, ToHtml, ToTree,
};
pub use crate::editor_state::EditorState;
pub use crate::history::{History, DEFAULT_HISTORY_LIMIT};
pub use crate::hotkeys::{format_for_hotkey, HotkeyParseError, KeyPress};
pub use crate::inline_format_type::InlineFormatType;
pub use crate::link_action::LinkAction;
pub use crate::mention_trigger::{mention_trigger, MentionTrigger};
pub use crate::persistence::{
    FileStore, KeyValueStore, MemoryStore, PersistenceError, StoreError,
    DEFAULT_STORAGE_KEY,
};
pub use crate::plugins::{
    ClipboardData, ClipboardFile, EditorPlugin, PluginChain, PluginOutcome,
    Transition,
};
pub use crate::transforms::MentionSpacing;
pub use crate::url_detection::{is_image_data_url, is_image_url, is_url};
pub use crate::user_notice::UserNotice;

pub use user_mentions::UserRecord;
