// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::debug;

use super::{finish, prepare};
use crate::dom::layout::{split_text_at_location, Layout, LeafSpan};
use crate::dom::MarkSet;
use crate::editor_state::EditorState;
use crate::InlineFormatType;

/// The marks text typed at the caret would get: the pending marks if any
/// were toggled, otherwise those of the run the caret is in.
pub fn current_marks(state: &EditorState) -> MarkSet {
    if let Some(marks) = state.marks {
        return marks;
    }
    state
        .valid_selection()
        .and_then(|selection| state.document.lookup_text(&selection.anchor.path))
        .map(|text| text.marks)
        .unwrap_or_default()
}

fn overlapping(layout: &Layout, start: usize, end: usize) -> Vec<&LeafSpan> {
    layout
        .leaves
        .iter()
        .filter(|leaf| !leaf.is_void)
        .filter(|leaf| leaf.end.min(end) > leaf.start.max(start))
        .collect()
}

pub fn is_mark_active(state: &EditorState, format: InlineFormatType) -> bool {
    let Some(selection) = state.valid_selection() else {
        return false;
    };
    if selection.is_collapsed() {
        return current_marks(state).contains(&format);
    }
    let layout = Layout::of(&state.document);
    let Some((start, end)) = layout.range_of(selection) else {
        return false;
    };
    let leaves = overlapping(&layout, start, end);
    !leaves.is_empty()
        && leaves.iter().all(|leaf| {
            state
                .document
                .lookup_text(&leaf.handle)
                .is_some_and(|text| text.marks.contains(&format))
        })
}

/// Toggle `format` over the selection. At a collapsed caret only the pending
/// marks change.
pub fn toggle_mark(state: &EditorState, format: InlineFormatType) -> EditorState {
    let Some(prepared) = prepare(state) else {
        return state.clone();
    };
    let active = is_mark_active(state, format);

    if prepared.locations.is_collapsed() {
        let mut marks = current_marks(state);
        marks.set(&format, !active);
        debug!(%format, enabled = !active, "pending mark toggled");
        return EditorState {
            marks: Some(marks),
            ..state.clone()
        };
    }

    let mut document = prepared.document;
    let (start, end) = (prepared.locations.start(), prepared.locations.end());
    split_text_at_location(&mut document, start);
    split_text_at_location(&mut document, end);

    let layout = Layout::of(&document);
    for leaf in overlapping(&layout, start, end) {
        if let Some(text) = document.lookup_text_mut(&leaf.handle) {
            text.marks.set(&format, !active);
        }
    }
    debug!(%format, enabled = !active, start, end, "mark toggled");
    finish(document, prepared.locations, None)
}
