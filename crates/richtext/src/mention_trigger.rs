// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::dom::nodes::text_node::byte_index;
use crate::dom::{Point, Selection};
use crate::editor_state::EditorState;

static TRIGGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@(\w+)$").expect("valid mention trigger regex"));

/// An `@word` typed right before the caret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentionTrigger {
    /// From the `@` to the caret.
    pub range: Selection,
    /// The word after the `@`.
    pub search: String,
}

/// Look for `@word` ending at a collapsed caret. The word must be followed
/// by whitespace or by the end of the run.
pub fn mention_trigger(state: &EditorState) -> Option<MentionTrigger> {
    let selection = state.valid_selection()?;
    if !selection.is_collapsed() {
        return None;
    }
    let caret = &selection.anchor;
    let run = state.document.lookup_text(&caret.path)?;
    let split = byte_index(&run.text, caret.offset);
    let (before, after) = run.text.split_at(split);

    if !after.chars().next().map_or(true, char::is_whitespace) {
        return None;
    }

    let (word_start, word) = before.split_word_bound_indices().last()?;
    let at_sign = before[..word_start].strip_suffix('@')?;
    let candidate = &before[at_sign.len()..];
    let search = TRIGGER.captures(candidate)?.get(1)?.as_str().to_owned();

    let start = caret.offset - word.chars().count() - 1;
    Some(MentionTrigger {
        range: Selection::new(
            Point::new(caret.path.clone(), start),
            caret.clone(),
        ),
        search,
    })
}

#[cfg(test)]
mod test {
    use speculoos::prelude::*;

    use super::*;
    use crate::dom::{Document, ElementNode, Node};

    fn state(text: &str, offset: usize) -> EditorState {
        EditorState::with_selection(
            Document::from_blocks(vec![ElementNode::new_paragraph(vec![
                Node::text(text),
            ])]),
            Selection::caret(vec![0, 0], offset),
        )
    }

    #[test]
    fn a_word_after_an_at_sign_triggers() {
        let trigger = mention_trigger(&state("hi @bo", 6));
        assert_that!(trigger).is_equal_to(Some(MentionTrigger {
            range: Selection::new(Point::at(vec![0, 0], 3), Point::at(vec![0, 0], 6)),
            search: String::from("bo"),
        }));
    }

    #[test]
    fn the_word_must_end_at_whitespace() {
        assert!(mention_trigger(&state("@bob x", 4)).is_some());
        assert!(mention_trigger(&state("@bobx", 4)).is_none());
    }

    #[test]
    fn no_trigger_without_the_at_sign_or_word() {
        assert!(mention_trigger(&state("hi bob", 6)).is_none());
        assert!(mention_trigger(&state("hi @", 4)).is_none());
        assert!(mention_trigger(&state("a@b", 3)).is_some());
    }

    #[test]
    fn non_ascii_words_count_in_characters() {
        let trigger = mention_trigger(&state("é @zoë", 6));
        assert_that!(trigger.map(|t| (t.range.anchor.offset, t.search)))
            .is_equal_to(Some((2, String::from("zoë"))));
    }
}
