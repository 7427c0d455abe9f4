// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Mutation rules.
//!
//! Every rule takes the current [`EditorState`] by reference and returns the
//! next one. A rule never fails: with no selection, or a selection pointing
//! outside the document, it hands back an unchanged copy of the state. The
//! returned document is always normalized.

mod blocks;
mod fragment;
mod links;
mod marks;
mod text;
mod tree_ops;
mod voids;

pub use blocks::{is_block_active, toggle_block};
pub use fragment::insert_fragment;
pub use links::{active_link_url, insert_link, is_link_active, unwrap_link, wrap_link};
pub use marks::{current_marks, is_mark_active, toggle_mark};
pub use text::{delete_fragment, insert_break, insert_text};
pub use voids::{insert_mention, insert_void_element, MentionSpacing};

use crate::dom::layout::{Affinity, SelectionLocations};
use crate::dom::normalize::normalize_document;
use crate::dom::{Document, Point};
use crate::editor_state::EditorState;

/// What a rule works on: a private copy of the document, the caret or
/// anchor as a point, and the selection measured in locations.
pub(crate) struct Prepared {
    pub document: Document,
    pub anchor: Point,
    pub locations: SelectionLocations,
}

pub(crate) fn prepare(state: &EditorState) -> Option<Prepared> {
    let selection = state.valid_selection()?;
    let locations = SelectionLocations::capture(&state.document, selection)?;
    Some(Prepared {
        document: state.document.clone(),
        anchor: selection.anchor.clone(),
        locations,
    })
}

/// Normalize the edited document and restore the selection from locations.
/// Pending marks do not survive a change to the document.
pub(crate) fn finish(
    mut document: Document,
    locations: SelectionLocations,
    affinity: Option<Affinity>,
) -> EditorState {
    normalize_document(&mut document);
    let selection = match affinity {
        Some(affinity) => locations.restore_with(&document, affinity),
        None => locations.restore(&document),
    };
    #[cfg(any(test, feature = "assert-invariants"))]
    document.assert_invariants();
    EditorState {
        document,
        selection,
        marks: None,
    }
}

/// An expanded selection is removed first by the rules that insert at a
/// caret.
pub(crate) fn collapse_by_deleting(state: &EditorState) -> EditorState {
    match state.valid_selection() {
        Some(selection) if !selection.is_collapsed() => delete_fragment(state),
        _ => state.clone(),
    }
}
