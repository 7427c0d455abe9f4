// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Structural edits shared by the rules. None of these normalize: the rule
//! calling them does that once it is done.

use crate::dom::layout::{split_text_at_location, Affinity, BlockSpan, Layout};
use crate::dom::{Document, DomHandle, ElementNode, Node, Point};

/// Insert `nodes` one after the other, the first one landing at `handle`.
pub(crate) fn insert_nodes_at(
    document: &mut Document,
    handle: &DomHandle,
    nodes: Vec<Node>,
) -> bool {
    let mut at = handle.clone();
    for node in nodes {
        if !document.insert_node(&at, node) {
            return false;
        }
        at = at.next_sibling();
    }
    true
}

/// Insert inline nodes at `point`, splitting the run there. Inside an inline
/// void the nodes go after the void. Inside a block void they go into a new
/// paragraph after it.
///
/// Returns the location the inserted nodes start at.
pub(crate) fn insert_inline_nodes(
    document: &mut Document,
    point: &Point,
    nodes: Vec<Node>,
) -> Option<usize> {
    let location = Layout::of(document).location_of(point)?;

    if let Some(void) = document.void_ancestor(&point.path) {
        let inline = document.lookup_element(&void)?.is_inline();
        return if inline {
            insert_nodes_at(document, &void.next_sibling(), nodes)
                .then_some(location + 1)
        } else {
            document
                .insert_node(
                    &void.next_sibling(),
                    ElementNode::new_paragraph(nodes).into(),
                )
                .then_some(location + 2)
        };
    }

    let len = document.lookup_text(&point.path)?.char_len();
    let offset = point.offset.min(len);
    let at = if offset == 0 {
        point.path.clone()
    } else {
        document.split_text(&point.path, offset);
        point.path.next_sibling()
    };
    insert_nodes_at(document, &at, nodes).then_some(location)
}

/// Move every child of `parent` from `index` onwards into a copy of it,
/// placed right after it. Returns the handle of the copy.
fn split_element_at(
    document: &mut Document,
    parent: &DomHandle,
    index: usize,
) -> Option<DomHandle> {
    let element = document.lookup_element_mut(parent)?;
    let tail = if index < element.children().len() {
        element.children_mut().split_off(index)
    } else {
        Vec::new()
    };
    let copy = element.clone_with_children(tail);
    let sibling = parent.next_sibling();
    document.insert_node(&sibling, copy.into()).then_some(sibling)
}

/// Split the text block holding `location` in two, through any inline
/// elements enclosing the location. Returns the handle of the second half.
pub(crate) fn split_block_at(
    document: &mut Document,
    location: usize,
) -> Option<DomHandle> {
    split_text_at_location(document, location);
    let layout = Layout::of(document);
    let block = layout.block_at(location)?.clone();
    if block.is_void {
        return None;
    }
    let point = layout.point_at(location, Affinity::Forward)?;
    let leaf = document
        .void_ancestor(&point.path)
        .unwrap_or_else(|| point.path.clone());
    if !block.handle.is_ancestor_of(&leaf) {
        return None;
    }
    let starts_here = point.offset == 0;

    let mut index = if starts_here {
        leaf.index_in_parent()
    } else {
        leaf.index_in_parent() + 1
    };
    let mut current = leaf.parent_handle();
    loop {
        let second = split_element_at(document, &current, index)?;
        if current == block.handle {
            return Some(second);
        }
        index = second.index_in_parent();
        current = current.parent_handle();
    }
}

/// Insert a block node at `location`: after a void, before or after a text
/// block at its edges, otherwise between the halves of the split block.
///
/// Returns the location the inserted block starts at.
pub(crate) fn insert_block_node(
    document: &mut Document,
    location: usize,
    node: Node,
) -> Option<usize> {
    insert_block_nodes(document, location, vec![node])
}

pub(crate) fn insert_block_nodes(
    document: &mut Document,
    location: usize,
    nodes: Vec<Node>,
) -> Option<usize> {
    let block = Layout::of(document).block_at(location)?.clone();
    let (at, start) = if block.is_void || location == block.end {
        (block.handle.next_sibling(), block.end + 1)
    } else if location == block.start {
        (block.handle.clone(), block.start)
    } else {
        (split_block_at(document, location)?, location + 1)
    };
    insert_nodes_at(document, &at, nodes).then_some(start)
}

/// True for a text block with no characters and no voids.
pub(crate) fn is_empty_text_block(block: &BlockSpan) -> bool {
    !block.is_void && block.start == block.end
}

/// Remove everything between `start` and `end`. Blocks in between go
/// entirely and what is left of the last text block joins the first one.
/// Block voids only go when the range covers them.
pub(crate) fn delete_range(document: &mut Document, start: usize, end: usize) {
    if start >= end {
        return;
    }
    split_text_at_location(document, start);
    split_text_at_location(document, end);

    let layout = Layout::of(document);
    let (Some(first), Some(last)) =
        (layout.block_at(start).cloned(), layout.block_at(end).cloned())
    else {
        return;
    };

    let covered_leaves = |block: &BlockSpan| -> Vec<DomHandle> {
        layout
            .leaves
            .iter()
            .filter(|leaf| block.start <= leaf.start && leaf.end <= block.end)
            .filter(|leaf| start <= leaf.start && leaf.end <= end)
            .filter(|leaf| leaf.start < leaf.end)
            .map(|leaf| {
                if leaf.is_void {
                    leaf.handle.parent_handle()
                } else {
                    leaf.handle.clone()
                }
            })
            .collect()
    };
    let fully_covered =
        |block: &BlockSpan| start <= block.start && block.end <= end;

    if first.handle == last.handle {
        if first.is_void {
            if fully_covered(&first) {
                document.remove_node_and_empty_ancestors(&first.handle);
            }
        } else {
            for handle in covered_leaves(&first).iter().rev() {
                document.remove_node(handle);
            }
        }
        return;
    }

    // Work from the end of the document backwards so earlier handles stay
    // valid.
    let mut carried = Vec::new();
    if last.is_void {
        if fully_covered(&last) {
            document.remove_node_and_empty_ancestors(&last.handle);
        }
    } else {
        for handle in covered_leaves(&last).iter().rev() {
            document.remove_node(handle);
        }
        if !first.is_void {
            carried = document
                .remove_node(&last.handle)
                .and_then(|node| match node {
                    Node::Element(element) => Some(element.take_children()),
                    Node::Text(_) => None,
                })
                .unwrap_or_default();
            remove_empty_ancestors(document, &last.handle);
        }
    }

    let middle: Vec<DomHandle> = layout
        .blocks
        .iter()
        .filter(|block| first.end < block.start && block.end < last.start)
        .map(|block| block.handle.clone())
        .collect();
    for handle in middle.iter().rev() {
        document.remove_node_and_empty_ancestors(handle);
    }

    if first.is_void {
        if fully_covered(&first) {
            document.remove_node_and_empty_ancestors(&first.handle);
        }
    } else {
        for handle in covered_leaves(&first).iter().rev() {
            document.remove_node(handle);
        }
        if let Some(element) = document.lookup_element_mut(&first.handle) {
            element.children_mut().extend(carried);
        }
    }
}

fn remove_empty_ancestors(document: &mut Document, handle: &DomHandle) {
    let mut parent = handle.parent_handle();
    while parent.has_parent()
        && document.children_at(&parent).is_some_and(<[Node]>::is_empty)
    {
        document.remove_node(&parent);
        parent = parent.parent_handle();
    }
}
