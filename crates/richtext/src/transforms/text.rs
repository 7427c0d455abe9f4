// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::debug;

use super::tree_ops::{delete_range, insert_inline_nodes, split_block_at};
use super::{collapse_by_deleting, finish, prepare};
use crate::dom::layout::{Affinity, Layout, SelectionLocations};
use crate::dom::{ElementNode, Node, TextRun};
use crate::editor_state::EditorState;

/// Type `text` at the caret, replacing an expanded selection. Pending marks
/// give the text a run of its own.
pub fn insert_text(state: &EditorState, text: &str) -> EditorState {
    if text.is_empty() {
        return state.clone();
    }
    let state = collapse_by_deleting(state);
    let Some(prepared) = prepare(&state) else {
        return state;
    };
    let mut document = prepared.document;
    let mut at = prepared.locations.anchor;
    let mut point = prepared.anchor;

    // Text can't go inside a void: move to the run after it.
    if document.void_ancestor(&point.path).is_some() {
        at += 1;
        match Layout::of(&document).point_at(at, Affinity::Forward) {
            Some(after) if document.void_ancestor(&after.path).is_none() => point = after,
            _ => return state,
        }
    }

    let Some(run_marks) = document.lookup_text(&point.path).map(|run| run.marks) else {
        return state;
    };
    match state.marks {
        Some(marks) if marks != run_marks => {
            let node = Node::Text(TextRun::with_marks(text, marks));
            if insert_inline_nodes(&mut document, &point, vec![node]).is_none() {
                return state;
            }
        }
        _ => {
            if let Some(run) = document.lookup_text_mut(&point.path) {
                run.insert_str(point.offset, text);
            }
        }
    }
    let len = text.chars().count();
    debug!(len, at, "text inserted");
    finish(
        document,
        SelectionLocations::collapsed(at + len),
        Some(Affinity::Backward),
    )
}

/// Remove the content of an expanded selection.
pub fn delete_fragment(state: &EditorState) -> EditorState {
    let Some(prepared) = prepare(state) else {
        return state.clone();
    };
    if prepared.locations.is_collapsed() {
        return state.clone();
    }
    let mut document = prepared.document;
    let (start, end) = (prepared.locations.start(), prepared.locations.end());
    delete_range(&mut document, start, end);
    debug!(start, end, "fragment deleted");
    finish(
        document,
        SelectionLocations::collapsed(start),
        Some(Affinity::Backward),
    )
}

/// Split the block at the caret. The caret moves to the start of the new
/// block.
pub fn insert_break(state: &EditorState) -> EditorState {
    let state = collapse_by_deleting(state);
    let Some(prepared) = prepare(&state) else {
        return state;
    };
    let mut document = prepared.document;
    let at = prepared.locations.anchor;
    let Some(block) = Layout::of(&document).block_at(at).cloned() else {
        return state;
    };

    if block.is_void {
        let paragraph = ElementNode::new_paragraph(vec![Node::text("")]);
        if !document.insert_node(&block.handle.next_sibling(), paragraph.into()) {
            return state;
        }
        return finish(
            document,
            SelectionLocations::collapsed(block.end + 1),
            Some(Affinity::Forward),
        );
    }

    if split_block_at(&mut document, at).is_none() {
        return state;
    }
    debug!(at, "block split");
    finish(
        document,
        SelectionLocations::collapsed(at + 1),
        Some(Affinity::Forward),
    )
}
