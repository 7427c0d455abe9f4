// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::debug;

use super::{finish, prepare};
use crate::block_format::BlockFormat;
use crate::dom::layout::Layout;
use crate::dom::{Document, DomHandle, ElementKind, ElementNode, Node};
use crate::editor_state::EditorState;

/// Every non-void text block intersecting `[start, end]`.
fn touched_blocks(document: &Document, start: usize, end: usize) -> Vec<DomHandle> {
    Layout::of(document)
        .blocks_touching(start, end)
        .into_iter()
        .filter(|block| !block.is_void)
        .map(|block| block.handle.clone())
        .collect()
}

fn is_active_on(document: &Document, blocks: &[DomHandle], format: BlockFormat) -> bool {
    !blocks.is_empty()
        && blocks.iter().all(|handle| {
            let Some(element) = document.lookup_element(handle) else {
                return false;
            };
            match format {
                BlockFormat::Align(align) => element.align() == Some(align),
                BlockFormat::Kind(kind) if kind.is_list_container() => {
                    element.kind() == ElementKind::ListItem
                        && document
                            .lookup_element(&handle.parent_handle())
                            .is_some_and(|parent| parent.kind() == kind)
                }
                BlockFormat::Kind(kind) => element.kind() == kind,
            }
        })
}

pub fn is_block_active(state: &EditorState, format: BlockFormat) -> bool {
    let Some(selection) = state.valid_selection() else {
        return false;
    };
    let Some((start, end)) = Layout::of(&state.document).range_of(selection) else {
        return false;
    };
    is_active_on(
        &state.document,
        &touched_blocks(&state.document, start, end),
        format,
    )
}

/// Toggle a block format over every block the selection touches.
pub fn toggle_block(state: &EditorState, format: BlockFormat) -> EditorState {
    if let BlockFormat::Kind(kind) = format {
        if kind.is_inline() || kind.is_void() {
            return state.clone();
        }
    }
    let Some(prepared) = prepare(state) else {
        return state.clone();
    };
    let mut document = prepared.document;
    let (start, end) = (prepared.locations.start(), prepared.locations.end());

    let touched = touched_blocks(&document, start, end);
    if touched.is_empty() {
        return state.clone();
    }
    let active = is_active_on(&document, &touched, format);

    match format {
        BlockFormat::Align(align) => {
            let align = (!active).then_some(align);
            for handle in &touched {
                if let Some(element) = document.lookup_element_mut(handle) {
                    element.set_align(align);
                }
            }
        }
        BlockFormat::Kind(kind) => {
            unwrap_list_containers(&mut document, start, end);
            let touched = touched_blocks(&document, start, end);
            let new_kind = if active {
                ElementKind::Paragraph
            } else if kind.is_list_container() {
                ElementKind::ListItem
            } else {
                kind
            };
            for handle in &touched {
                if let Some(element) = document.lookup_element_mut(handle) {
                    element.set_kind(new_kind);
                }
            }
            if !active && kind.is_list_container() {
                wrap_blocks(&mut document, &touched, kind);
            }
        }
    }
    debug!(%format, was_active = active, "block toggled");
    finish(document, prepared.locations, None)
}

/// The deepest list container enclosing `handle`.
fn enclosing_list(document: &Document, handle: &DomHandle) -> Option<DomHandle> {
    let mut current = handle.parent_handle();
    while current.has_parent() {
        if document
            .lookup_element(&current)
            .is_some_and(ElementNode::is_list_container)
        {
            return Some(current);
        }
        current = current.parent_handle();
    }
    None
}

/// Lift touched blocks out of their list containers. Items before and after
/// the touched ones stay behind in lists of their own. Lifted items holding a
/// block void give the void back.
fn unwrap_list_containers(document: &mut Document, start: usize, end: usize) {
    loop {
        let touched = touched_blocks(document, start, end);
        let Some(list) = touched
            .iter()
            .find_map(|handle| enclosing_list(document, handle))
        else {
            return;
        };
        let depth = list.depth();
        let indices: Vec<usize> = touched
            .iter()
            .filter(|handle| list.is_ancestor_of(handle))
            .map(|handle| handle.raw()[depth])
            .collect();
        let (Some(&first), Some(&last)) = (indices.iter().min(), indices.iter().max())
        else {
            return;
        };
        let Some(element) = document.lookup_element(&list).cloned() else {
            return;
        };

        let mut items = element.children().to_vec();
        let after: Vec<Node> = items.split_off(last + 1);
        let lifted: Vec<Node> = items.split_off(first);
        let before = items;

        let mut replacement = Vec::new();
        if !before.is_empty() {
            replacement.push(element.clone_with_children(before).into());
        }
        replacement.extend(lifted.into_iter().flat_map(dissolve_void_item));
        if !after.is_empty() {
            replacement.push(element.clone_with_children(after).into());
        }
        if !document.replace_node_with(&list, replacement) {
            return;
        }
    }
}

/// A list item wrapping block content, which only happens for block voids,
/// is replaced by that content.
fn dissolve_void_item(node: Node) -> Vec<Node> {
    match node {
        Node::Element(element)
            if element.kind() == ElementKind::ListItem && !element.has_inline_content() =>
        {
            element.take_children()
        }
        node => vec![node],
    }
}

/// Wrap the touched blocks in new containers of `kind`. Each run of
/// consecutive siblings gets its own container, so blocks under different
/// parents or on either side of a block void end up in separate lists.
fn wrap_blocks(document: &mut Document, blocks: &[DomHandle], kind: ElementKind) {
    let mut runs: Vec<(DomHandle, usize, usize)> = Vec::new();
    for handle in blocks {
        let parent = handle.parent_handle();
        let index = handle.index_in_parent();
        match runs.last_mut() {
            Some((run_parent, _, to)) if *run_parent == parent && *to + 1 == index => {
                *to = index;
            }
            _ => runs.push((parent, index, index)),
        }
    }
    // Later runs first, so the paths of earlier ones stay valid.
    for (parent, from, to) in runs.into_iter().rev() {
        let Some(children) = document.children_at_mut(&parent) else {
            continue;
        };
        if to >= children.len() {
            continue;
        }
        let wrapped: Vec<Node> = children.drain(from..=to).collect();
        children.insert(from, ElementNode::new_list(kind, wrapped).into());
    }
}

#[cfg(test)]
mod test {
    use indoc::indoc;
    use speculoos::prelude::*;

    use super::*;
    use crate::dom::{Alignment, ToTree};
    use crate::transforms::test_utils::{caret, doc, p, select, tx};

    fn li(text: &str) -> Node {
        ElementNode::new_list_item(vec![tx(text)]).into()
    }

    fn list(kind: ElementKind, items: Vec<Node>) -> Node {
        ElementNode::new_list(kind, items).into()
    }

    #[test]
    fn toggling_a_heading_on_and_off() {
        let state = caret(doc(vec![p(vec![tx("ab")])]), vec![0, 0], 1);
        let format = BlockFormat::Kind(ElementKind::HeadingOne);

        let on = toggle_block(&state, format);
        assert!(is_block_active(&on, format));
        assert_that!(on.document.children()[0].as_element().map(ElementNode::kind))
            .is_equal_to(Some(ElementKind::HeadingOne));

        let off = toggle_block(&on, format);
        assert!(!is_block_active(&off, format));
        assert_that!(off.document).is_equal_to(state.document.clone());
    }

    #[test]
    fn paragraphs_become_a_list() {
        let state = select(
            doc(vec![p(vec![tx("a")]), p(vec![tx("b")]), p(vec![tx("c")])]),
            (vec![0, 0], 0),
            (vec![1, 0], 1),
        );
        let format = BlockFormat::Kind(ElementKind::BulletedList);
        let next = toggle_block(&state, format);
        assert_eq!(
            next.document.to_tree(),
            indoc! {r#"
                document
                ├>bulleted-list
                │ ├>list-item
                │ │ └>"a"
                │ └>list-item
                │   └>"b"
                └>paragraph
                  └>"c"
            "#}
        );
        assert!(is_block_active(&next, format));
    }

    #[test]
    fn unlisting_a_middle_item_splits_the_list() {
        let state = caret(
            doc(vec![list(
                ElementKind::NumberedList,
                vec![li("a"), li("b"), li("c")],
            )]),
            vec![0, 1, 0],
            0,
        );
        let next = toggle_block(&state, BlockFormat::Kind(ElementKind::NumberedList));
        assert_eq!(
            next.document.to_tree(),
            indoc! {r#"
                document
                ├>numbered-list
                │ └>list-item
                │   └>"a"
                ├>paragraph
                │ └>"b"
                └>numbered-list
                  └>list-item
                    └>"c"
            "#}
        );
        assert_eq!(next.document.to_plain_text(), "a\nb\nc");
    }

    #[test]
    fn switching_list_kind_rewraps_the_items() {
        let state = select(
            doc(vec![list(ElementKind::NumberedList, vec![li("a"), li("b")])]),
            (vec![0, 0, 0], 0),
            (vec![0, 1, 0], 1),
        );
        let format = BlockFormat::Kind(ElementKind::BulletedList);
        let next = toggle_block(&state, format);
        assert_that!(next.document).is_equal_to(doc(vec![list(
            ElementKind::BulletedList,
            vec![li("a"), li("b")],
        )]));
    }

    #[test]
    fn alignment_is_unanimous() {
        let state = select(
            doc(vec![
                ElementNode::new_paragraph(vec![tx("a")])
                    .with_align(Alignment::Center)
                    .into(),
                p(vec![tx("b")]),
            ]),
            (vec![0, 0], 0),
            (vec![1, 0], 1),
        );
        let format = BlockFormat::Align(Alignment::Center);
        assert!(!is_block_active(&state, format));

        let next = toggle_block(&state, format);
        assert!(is_block_active(&next, format));
        let again = toggle_block(&next, format);
        assert!(again.document.children().iter().all(|node| {
            node.as_element().is_some_and(|element| element.align().is_none())
        }));
    }

    #[test]
    fn a_block_starting_at_the_selection_end_is_not_touched() {
        // "ab" | "cd", selecting up to the start of "cd".
        let state = select(
            doc(vec![p(vec![tx("ab")]), p(vec![tx("cd")])]),
            (vec![0, 0], 0),
            (vec![1, 0], 0),
        );
        let next = toggle_block(&state, BlockFormat::Kind(ElementKind::BlockQuote));
        assert_that!(next.document.children()[1].as_element().map(ElementNode::kind))
            .is_equal_to(Some(ElementKind::Paragraph));
    }

    #[test]
    fn blocks_at_different_depths_get_a_list_each() {
        let quote: Node =
            ElementNode::new_quote(vec![p(vec![tx("a")])]).into();
        let state = select(
            doc(vec![quote.clone(), p(vec![tx("b")])]),
            (vec![0, 0, 0], 0),
            (vec![1, 0], 1),
        );
        let format = BlockFormat::Kind(ElementKind::NumberedList);

        let on = toggle_block(&state, format);
        assert_eq!(
            on.document.to_tree(),
            indoc! {r#"
                document
                ├>block-quote
                │ └>numbered-list
                │   └>list-item
                │     └>"a"
                └>numbered-list
                  └>list-item
                    └>"b"
            "#}
        );
        assert!(is_block_active(&on, format));

        let off = toggle_block(&on, format);
        assert!(!is_block_active(&off, format));
        assert_that!(off.document).is_equal_to(doc(vec![quote, p(vec![tx("b")])]));
    }

    #[test]
    fn images_stay_out_of_toggled_lists() {
        let image: Node = ElementNode::new_image("https://x.org/cat.png").into();
        let original = doc(vec![p(vec![tx("a")]), image.clone(), p(vec![tx("b")])]);
        let state = select(original.clone(), (vec![0, 0], 0), (vec![2, 0], 1));
        let format = BlockFormat::Kind(ElementKind::BulletedList);

        let on = toggle_block(&state, format);
        assert_that!(on.document.clone()).is_equal_to(doc(vec![
            list(ElementKind::BulletedList, vec![li("a")]),
            image,
            list(ElementKind::BulletedList, vec![li("b")]),
        ]));
        assert!(is_block_active(&on, format));

        let off = toggle_block(&on, format);
        assert_that!(off.document).is_equal_to(original);
    }

    #[test]
    fn unlisting_gives_back_images_held_by_items() {
        let image = ElementNode::new_image("https://x.org/cat.png");
        let state = select(
            doc(vec![list(
                ElementKind::BulletedList,
                vec![
                    li("a"),
                    ElementNode::new_list_item(vec![image.clone().into()]).into(),
                    li("b"),
                ],
            )]),
            (vec![0, 0, 0], 0),
            (vec![0, 2, 0], 1),
        );
        let off = toggle_block(&state, BlockFormat::Kind(ElementKind::BulletedList));
        assert_that!(off.document).is_equal_to(doc(vec![
            p(vec![tx("a")]),
            image.into(),
            p(vec![tx("b")]),
        ]));
    }

    #[test]
    fn inline_kinds_do_nothing() {
        let state = caret(doc(vec![p(vec![tx("ab")])]), vec![0, 0], 1);
        assert_that!(toggle_block(&state, BlockFormat::Kind(ElementKind::Link)))
            .is_equal_to(state);
    }
}
