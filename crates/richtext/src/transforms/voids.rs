// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::text::insert_text;
use super::tree_ops::{insert_block_node, insert_inline_nodes};
use super::{collapse_by_deleting, finish, prepare};
use crate::dom::layout::{Affinity, SelectionLocations};
use crate::dom::{ElementNode, Node};
use crate::editor_state::EditorState;

/// Whether a space is typed after an inserted mention.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MentionSpacing {
    #[default]
    None,
    TrailingSpace,
}

/// Insert a void element at the caret. Inline voids go into the run at the
/// caret and the caret ends up just after them. Block voids go between the
/// halves of the current block and the caret moves to the next block.
pub fn insert_void_element(state: &EditorState, element: ElementNode) -> EditorState {
    if !element.is_void() {
        return state.clone();
    }
    let state = collapse_by_deleting(state);
    let Some(prepared) = prepare(&state) else {
        return state;
    };
    let mut document = prepared.document;
    let kind = element.kind();

    if element.is_inline() {
        let Some(at) = insert_inline_nodes(&mut document, &prepared.anchor, vec![element.into()])
        else {
            return state;
        };
        debug!(%kind, at, "inline void inserted");
        return finish(
            document,
            SelectionLocations::collapsed(at + 1),
            Some(Affinity::Forward),
        );
    }

    let Some(at) = insert_block_node(&mut document, prepared.locations.anchor, element.into())
    else {
        return state;
    };
    let is_last = document
        .children()
        .last()
        .and_then(Node::as_element)
        .is_some_and(ElementNode::is_void);
    if is_last {
        document
            .children_mut()
            .push(ElementNode::new_paragraph(vec![Node::text("")]).into());
    }
    debug!(%kind, at, "block void inserted");
    finish(
        document,
        SelectionLocations::collapsed(at + 2),
        Some(Affinity::Forward),
    )
}

/// Insert a mention of `character` at the caret.
pub fn insert_mention(
    state: &EditorState,
    character: &str,
    spacing: MentionSpacing,
) -> EditorState {
    let next = insert_void_element(state, ElementNode::new_mention(character));
    match spacing {
        MentionSpacing::TrailingSpace if next != *state => insert_text(&next, " "),
        _ => next,
    }
}
