// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};

use crate::dom::{Document, MarkSet, Selection};

/// Everything a rule reads and produces: the document, where the user's
/// selection is, and the marks toggled at a collapsed caret that the next
/// typed text will carry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    pub document: Document,
    pub selection: Option<Selection>,
    pub marks: Option<MarkSet>,
}

impl EditorState {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            selection: None,
            marks: None,
        }
    }

    pub fn with_selection(document: Document, selection: Selection) -> Self {
        Self {
            document,
            selection: Some(selection),
            marks: None,
        }
    }

    /// The selection, if there is one and it points into the document.
    pub fn valid_selection(&self) -> Option<&Selection> {
        self.selection
            .as_ref()
            .filter(|selection| self.document.is_valid_selection(selection))
    }

    /// A caret at the very end of the document.
    pub fn caret_at_end(document: Document) -> Self {
        let selection = document.end_point().map(Selection::collapsed);
        Self {
            document,
            selection,
            marks: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dom::{ElementNode, Node, Point};

    #[test]
    fn a_selection_outside_the_document_is_not_valid() {
        let mut state = EditorState::caret_at_end(Document::default());
        assert_eq!(state.valid_selection(), Some(&Selection::caret(vec![0, 0], 0)));

        state.selection = Some(Selection::collapsed(Point::at(vec![3, 0], 0)));
        assert_eq!(state.valid_selection(), None);
    }

    #[test]
    fn an_offset_past_the_run_is_not_valid() {
        let document = Document::from_blocks(vec![ElementNode::new_paragraph(
            vec![Node::text("ab")],
        )]);
        let state =
            EditorState::with_selection(document, Selection::caret(vec![0, 0], 3));
        assert_eq!(state.valid_selection(), None);
    }
}
