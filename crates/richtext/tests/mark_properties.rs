// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use proptest::prelude::*;
use richtext::{
    ComposerConfig, ComposerModel, Document, ElementNode, InlineFormatType,
    MarkSet, Node, Point, Selection, TextRun,
};

const FORMATS: [InlineFormatType; 5] = [
    InlineFormatType::Bold,
    InlineFormatType::Italic,
    InlineFormatType::Underline,
    InlineFormatType::InlineCode,
    InlineFormatType::StrikeThrough,
];

fn marks_from_bits(bits: u8) -> MarkSet {
    FORMATS
        .iter()
        .enumerate()
        .filter(|(i, _)| bits & (1 << i) != 0)
        .fold(MarkSet::default(), |marks, (_, format)| marks.with(*format))
}

fn per_char_marks(document: &Document) -> Vec<(char, MarkSet)> {
    document
        .leaf_handles()
        .iter()
        .filter_map(|handle| document.lookup_text(handle))
        .flat_map(|run| run.text.chars().map(move |c| (c, run.marks)))
        .collect()
}

fn runs() -> impl Strategy<Value = Vec<(String, u8)>> {
    prop::collection::vec(("[a-z]{1,4}", 0u8..32), 1..6)
}

proptest! {
    /// Toggling a mark twice gives back the marks the runs started with, as
    /// long as the mark was either on every selected run or on none.
    #[test]
    fn toggling_a_mark_twice_restores_the_runs(
        runs in runs(),
        format_index in 0usize..5,
        uniform in any::<bool>(),
    ) {
        let format = FORMATS[format_index];
        let children: Vec<Node> = runs
            .into_iter()
            .map(|(text, bits)| {
                let mut marks = marks_from_bits(bits);
                marks.set(&format, uniform);
                TextRun::with_marks(text, marks).into()
            })
            .collect();
        let document = Document::from_blocks(vec![ElementNode::new_paragraph(children)]);
        let mut model = ComposerModel::from_document(document, ComposerConfig::default());
        let before = per_char_marks(model.document());

        let start = model.document().start_point().unwrap();
        let end = model.document().end_point().unwrap();
        model.select(Selection::new(start, end));
        model.toggle_mark(format);
        model.toggle_mark(format);

        prop_assert_eq!(per_char_marks(model.document()), before);
        prop_assert!(model.document().check_invariants().is_ok());
    }

    /// Toggling within a single run only touches the selected characters.
    #[test]
    fn toggling_part_of_a_run_leaves_the_rest_alone(
        text in "[a-z]{2,10}",
        cut in 0usize..10,
        format_index in 0usize..5,
    ) {
        let format = FORMATS[format_index];
        let len = text.chars().count();
        let split = cut % len;
        let document = Document::from_blocks(vec![ElementNode::new_paragraph(vec![
            Node::text(text.clone()),
        ])]);
        let mut model = ComposerModel::from_document(document, ComposerConfig::default());
        model.select(Selection::new(Point::at(vec![0, 0], split), Point::at(vec![0, 0], len)));
        model.toggle_mark(format);

        let marks = per_char_marks(model.document());
        prop_assert_eq!(marks.len(), len);
        for (index, (_, run_marks)) in marks.iter().enumerate() {
            prop_assert_eq!(run_marks.contains(&format), index >= split);
        }
        let text_after: String = marks.iter().map(|(c, _)| *c).collect();
        prop_assert_eq!(text_after, text);
    }
}
