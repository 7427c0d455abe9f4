// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::debug;

use super::tree_ops::{insert_block_nodes, insert_inline_nodes, is_empty_text_block};
use super::{collapse_by_deleting, finish, prepare};
use crate::dom::layout::{Affinity, Layout, SelectionLocations};
use crate::dom::normalize::normalize_fragment;
use crate::dom::{Document, Node};
use crate::editor_state::EditorState;

/// Paste `nodes` at the caret. Inline content goes into the run at the
/// caret. Blocks go between the halves of the current block, or replace it
/// when it is empty.
pub fn insert_fragment(state: &EditorState, nodes: Vec<Node>) -> EditorState {
    let nodes = normalize_fragment(nodes);
    if nodes.is_empty() {
        return state.clone();
    }
    let state = collapse_by_deleting(state);
    let Some(prepared) = prepare(&state) else {
        return state;
    };
    let mut document = prepared.document;

    if nodes.iter().all(Node::is_inline) {
        let len: usize = nodes.iter().map(Node::inline_len).sum();
        let Some(at) = insert_inline_nodes(&mut document, &prepared.anchor, nodes) else {
            return state;
        };
        debug!(len, at, "inline fragment inserted");
        return finish(
            document,
            SelectionLocations::collapsed(at + len),
            Some(Affinity::Backward),
        );
    }

    let len = Layout::of(&Document::new(nodes.clone())).len();
    let at = prepared.locations.anchor;
    let Some(block) = Layout::of(&document).block_at(at).cloned() else {
        return state;
    };
    let start = if is_empty_text_block(&block) {
        document
            .replace_node_with(&block.handle, nodes)
            .then_some(block.start)
    } else {
        insert_block_nodes(&mut document, at, nodes)
    };
    let Some(start) = start else {
        return state;
    };
    debug!(start, len, "block fragment inserted");
    finish(
        document,
        SelectionLocations::collapsed(start + len),
        Some(Affinity::Backward),
    )
}
