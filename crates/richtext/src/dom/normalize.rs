// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Restores the structural invariants of a document after a rule has run.
//!
//! Normalization never adds or removes characters or voids, it only moves
//! runs around, merges them, and adds or drops empty runs. Locations taken
//! before normalizing stay valid afterwards.

use tracing::trace;

use super::element_kind::ElementKind;
use super::nodes::{ElementNode, Node, TextRun};
use super::Document;

pub(crate) fn normalize_document(document: &mut Document) {
    let children =
        normalize_blocks(std::mem::take(document.children_mut()), None);
    *document.children_mut() = if children.is_empty() {
        Document::default().into_children()
    } else {
        children
    };
}

/// Normalize content about to be inserted. Inline content stays inline,
/// anything else comes back as a list of valid blocks. Content without
/// characters or voids comes back empty.
pub(crate) fn normalize_fragment(nodes: Vec<Node>) -> Vec<Node> {
    if nodes.iter().all(Node::is_inline) {
        let inline = normalize_inline(nodes);
        if inline.iter().any(Node::has_content) {
            inline
        } else {
            Vec::new()
        }
    } else {
        normalize_blocks(nodes, None)
    }
}

/// Normalize a sequence of siblings that should all be blocks. Runs of
/// inline siblings are wrapped in a copy of `wrapper`, or a paragraph.
fn normalize_blocks(nodes: Vec<Node>, wrapper: Option<&ElementNode>) -> Vec<Node> {
    let mut blocks = Vec::new();
    let mut inline = Vec::new();
    for node in nodes {
        match node {
            Node::Element(element) if element.is_block() => {
                wrap_inline_group(std::mem::take(&mut inline), wrapper, &mut blocks);
                blocks.extend(normalize_block(element));
            }
            node => inline.push(node),
        }
    }
    wrap_inline_group(inline, wrapper, &mut blocks);
    wrap_stray_list_items(blocks)
}

/// List items found outside of a list join the list just before them, or a
/// new bulleted list.
fn wrap_stray_list_items(blocks: Vec<Node>) -> Vec<Node> {
    let mut wrapped: Vec<Node> = Vec::with_capacity(blocks.len());
    for block in blocks {
        let is_item = block
            .as_element()
            .is_some_and(|element| element.kind() == ElementKind::ListItem);
        if !is_item {
            wrapped.push(block);
            continue;
        }
        match wrapped.last_mut().and_then(Node::as_element_mut) {
            Some(list) if list.is_list_container() => {
                list.children_mut().push(block)
            }
            _ => wrapped.push(
                ElementNode::new_list(ElementKind::BulletedList, vec![block])
                    .into(),
            ),
        }
    }
    wrapped
}

fn wrap_inline_group(
    group: Vec<Node>,
    wrapper: Option<&ElementNode>,
    blocks: &mut Vec<Node>,
) {
    if group.iter().all(is_blank_text) {
        return;
    }
    let children = normalize_inline(group);
    let block = match wrapper {
        Some(wrapper) => wrapper.clone_with_children(children),
        None => ElementNode::new_paragraph(children),
    };
    blocks.push(block.into());
}

fn is_blank_text(node: &Node) -> bool {
    node.as_text().is_some_and(|text| text.text.trim().is_empty())
}

fn normalize_block(mut element: ElementNode) -> Vec<Node> {
    if element.is_void() {
        element.set_children(vec![Node::Text(TextRun::empty())]);
        return vec![element.into()];
    }
    let children = std::mem::take(element.children_mut());
    if element.is_list_container() {
        element.set_children(normalize_list_items(children));
        return vec![element.into()];
    }
    if !children.iter().any(Node::is_block) {
        element.set_children(normalize_inline(children));
        return vec![element.into()];
    }
    if element.kind().holds_only_inline() {
        trace!(kind = %element.kind(), "dissolving block holding other blocks");
        return normalize_blocks(children, Some(&element));
    }
    let children = normalize_blocks(children, None);
    element.set_children(if children.is_empty() {
        vec![Node::Text(TextRun::empty())]
    } else {
        children
    });
    vec![element.into()]
}

fn normalize_list_items(children: Vec<Node>) -> Vec<Node> {
    fn collect(children: Vec<Node>, items: &mut Vec<Node>) {
        let mut inline = Vec::new();
        for child in children {
            let Node::Element(mut element) = child else {
                inline.push(child);
                continue;
            };
            if element.is_inline() {
                inline.push(element.into());
                continue;
            }
            let group = std::mem::take(&mut inline);
            if !group.iter().all(is_blank_text) {
                items.push(
                    ElementNode::new_list_item(normalize_inline(group)).into(),
                );
            }
            if element.is_list_container() {
                collect(element.take_children(), items);
            } else if element.is_void() {
                let item =
                    ElementNode::new_list_item(vec![Node::Element(element)]);
                items.extend(normalize_block(item));
            } else {
                element.set_kind(ElementKind::ListItem);
                items.extend(normalize_block(element));
            }
        }
        if !inline.iter().all(is_blank_text) {
            items.push(ElementNode::new_list_item(normalize_inline(inline)).into());
        }
    }

    let mut items = Vec::new();
    collect(children, &mut items);
    if items.is_empty() {
        items.push(
            ElementNode::new_list_item(vec![Node::Text(TextRun::empty())])
                .into(),
        );
    }
    items
}

/// Normalize the content of a text block or inline element: merged runs,
/// inline elements padded by runs, never empty.
fn normalize_inline(nodes: Vec<Node>) -> Vec<Node> {
    let mut merged = Vec::new();
    collect_inline(nodes, &mut merged);
    pad_inline_elements(merged)
}

fn collect_inline(nodes: Vec<Node>, out: &mut Vec<Node>) {
    for node in nodes {
        match node {
            Node::Text(run) => push_text(out, run),
            Node::Element(mut element) if element.is_void() => {
                if element.is_inline() {
                    element.set_children(vec![Node::Text(TextRun::empty())]);
                    out.push(element.into());
                } else {
                    trace!(kind = %element.kind(), "dropping block void inside inline content");
                }
            }
            Node::Element(element) if element.is_block() => {
                collect_inline(element.take_children(), out)
            }
            Node::Element(mut element) => {
                let children =
                    normalize_inline(std::mem::take(element.children_mut()));
                if children.iter().any(Node::has_content) {
                    element.set_children(children);
                    out.push(element.into());
                }
            }
        }
    }
}

/// Append a run, merging it into the previous one when the marks agree.
/// Empty runs are dropped, padding puts back the ones that are needed.
fn push_text(out: &mut Vec<Node>, run: TextRun) {
    if run.is_empty() {
        return;
    }
    if let Some(Node::Text(previous)) = out.last_mut() {
        if previous.marks == run.marks {
            previous.text.push_str(&run.text);
            return;
        }
    }
    out.push(Node::Text(run));
}

fn pad_inline_elements(nodes: Vec<Node>) -> Vec<Node> {
    let mut padded = Vec::with_capacity(nodes.len() + 2);
    for node in nodes {
        if node.is_element() && !padded.last().is_some_and(Node::is_text) {
            padded.push(Node::Text(TextRun::empty()));
        }
        padded.push(node);
    }
    if !padded.last().is_some_and(Node::is_text) {
        padded.push(Node::Text(TextRun::empty()));
    }
    padded
}

#[cfg(test)]
mod test {
    use speculoos::prelude::*;

    use super::*;
    use crate::dom::nodes::MarkSet;
    use crate::dom::Alignment;
    use crate::InlineFormatType;

    fn tx(text: &str) -> Node {
        Node::text(text)
    }

    fn bold(text: &str) -> Node {
        Node::Text(TextRun::with_marks(
            text,
            MarkSet::default().with(InlineFormatType::Bold),
        ))
    }

    fn p(children: Vec<Node>) -> Node {
        ElementNode::new_paragraph(children).into()
    }

    fn normalized(children: Vec<Node>) -> Vec<Node> {
        let mut document = Document::new(children);
        normalize_document(&mut document);
        document.assert_invariants();
        document.into_children()
    }

    #[test]
    fn an_empty_document_gets_one_empty_paragraph() {
        assert_that!(normalized(vec![])).is_equal_to(vec![p(vec![tx("")])]);
    }

    #[test]
    fn adjacent_runs_with_equal_marks_are_merged() {
        assert_that!(normalized(vec![p(vec![
            tx("a"),
            tx(""),
            tx("b"),
            bold("c"),
            bold("d"),
        ])]))
        .is_equal_to(vec![p(vec![tx("ab"), bold("cd")])]);
    }

    #[test]
    fn inline_elements_are_padded_with_empty_runs() {
        let mention: Node = ElementNode::new_mention("x").into();
        assert_that!(normalized(vec![p(vec![mention.clone(), mention.clone()])]))
            .is_equal_to(vec![p(vec![
                tx(""),
                mention.clone(),
                tx(""),
                mention,
                tx(""),
            ])]);
    }

    #[test]
    fn empty_links_are_removed() {
        let link = ElementNode::new_link("https://a.b", vec![tx("")]);
        assert_that!(normalized(vec![p(vec![tx("a"), link.into(), tx("b")])]))
            .is_equal_to(vec![p(vec![tx("ab")])]);
    }

    #[test]
    fn blocks_inside_links_are_flattened() {
        let link = ElementNode::new_link(
            "https://a.b",
            vec![p(vec![tx("in")]), p(vec![tx("side")])],
        );
        assert_that!(normalized(vec![p(vec![link.into()])])).is_equal_to(vec![
            p(vec![
                tx(""),
                ElementNode::new_link("https://a.b", vec![tx("inside")]).into(),
                tx(""),
            ]),
        ]);
    }

    #[test]
    fn voids_hold_exactly_one_empty_run() {
        let mut image = ElementNode::new_image("https://a.b/c.png");
        image.set_children(vec![tx("junk"), tx("more")]);
        assert_that!(normalized(vec![image.into()]))
            .is_equal_to(vec![ElementNode::new_image("https://a.b/c.png").into()]);
    }

    #[test]
    fn top_level_inline_content_is_wrapped_and_blank_content_dropped() {
        assert_that!(normalized(vec![
            tx("loose"),
            p(vec![tx("x")]),
            tx("  \n "),
            p(vec![tx("y")]),
        ]))
        .is_equal_to(vec![
            p(vec![tx("loose")]),
            p(vec![tx("x")]),
            p(vec![tx("y")]),
        ]);
    }

    #[test]
    fn lists_hold_only_items() {
        let list = ElementNode::new_list(
            ElementKind::BulletedList,
            vec![
                p(vec![tx("a")]),
                ElementNode::new_list(
                    ElementKind::NumberedList,
                    vec![ElementNode::new_list_item(vec![tx("b")]).into()],
                )
                .into(),
                tx("c"),
            ],
        );
        let item = |text| -> Node { ElementNode::new_list_item(vec![tx(text)]).into() };
        assert_that!(normalized(vec![list.into()])).is_equal_to(vec![
            ElementNode::new_list(
                ElementKind::BulletedList,
                vec![item("a"), item("b"), item("c")],
            )
            .into(),
        ]);
    }

    #[test]
    fn an_empty_list_gets_an_empty_item() {
        let list = ElementNode::new_list(ElementKind::NumberedList, vec![]);
        assert_that!(normalized(vec![list.into()])).is_equal_to(vec![
            ElementNode::new_list(
                ElementKind::NumberedList,
                vec![ElementNode::new_list_item(vec![tx("")]).into()],
            )
            .into(),
        ]);
    }

    #[test]
    fn a_paragraph_holding_blocks_is_split_around_them() {
        let paragraph = ElementNode::new_paragraph(vec![
            tx("before"),
            ElementNode::new_image("https://a.b/c.png").into(),
            tx("after"),
        ])
        .with_align(Alignment::Center);
        assert_that!(normalized(vec![paragraph.into()])).is_equal_to(vec![
            ElementNode::new_paragraph(vec![tx("before")])
                .with_align(Alignment::Center)
                .into(),
            ElementNode::new_image("https://a.b/c.png").into(),
            ElementNode::new_paragraph(vec![tx("after")])
                .with_align(Alignment::Center)
                .into(),
        ]);
    }

    #[test]
    fn a_quote_may_hold_paragraphs() {
        let quote = ElementNode::new_quote(vec![p(vec![tx("a")]), tx("b")]);
        assert_that!(normalized(vec![quote.into()])).is_equal_to(vec![
            ElementNode::new_quote(vec![p(vec![tx("a")]), p(vec![tx("b")])])
                .into(),
        ]);
    }

    #[test]
    fn stray_list_items_are_gathered_into_a_list() {
        let item = |text| -> Node { ElementNode::new_list_item(vec![tx(text)]).into() };
        assert_that!(normalized(vec![item("a"), item("b"), p(vec![tx("c")])]))
            .is_equal_to(vec![
                ElementNode::new_list(
                    ElementKind::BulletedList,
                    vec![item("a"), item("b")],
                )
                .into(),
                p(vec![tx("c")]),
            ]);
    }

    #[test]
    fn blank_fragments_normalize_to_nothing() {
        assert_that!(normalize_fragment(vec![tx(""), tx("")])).is_empty();
        assert_that!(normalize_fragment(vec![tx("a"), tx("b")]))
            .is_equal_to(vec![tx("ab")]);
    }
}
