// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::BTreeSet;

use tracing::debug;

use super::tree_ops::insert_inline_nodes;
use super::{finish, prepare};
use crate::dom::layout::{split_text_at_location, Affinity, Layout, SelectionLocations};
use crate::dom::{Document, DomHandle, ElementKind, ElementNode, Node, Selection};
use crate::editor_state::EditorState;

/// Links enclosing any run between the selection's start and end points,
/// in document order.
fn link_handles(document: &Document, selection: &Selection) -> Vec<DomHandle> {
    let (start, end) = (&selection.start().path, &selection.end().path);
    let mut links = BTreeSet::new();
    for leaf in document.leaf_handles() {
        if &leaf < start || &leaf > end {
            continue;
        }
        let mut current = leaf.parent_handle();
        while current.has_parent() {
            if document
                .lookup_element(&current)
                .is_some_and(|element| element.kind() == ElementKind::Link)
            {
                links.insert(current.clone());
            }
            current = current.parent_handle();
        }
    }
    links.into_iter().collect()
}

pub fn is_link_active(state: &EditorState) -> bool {
    state
        .valid_selection()
        .is_some_and(|selection| !link_handles(&state.document, selection).is_empty())
}

/// The url of the first link the selection is in.
pub fn active_link_url(state: &EditorState) -> Option<String> {
    let selection = state.valid_selection()?;
    let handle = link_handles(&state.document, selection).into_iter().next()?;
    state
        .document
        .lookup_element(&handle)
        .and_then(ElementNode::url)
        .map(str::to_owned)
}

/// Replace every link the selection touches with its children.
pub fn unwrap_link(state: &EditorState) -> EditorState {
    let Some(selection) = state.valid_selection() else {
        return state.clone();
    };
    let links = link_handles(&state.document, selection);
    if links.is_empty() {
        return state.clone();
    }
    let Some(prepared) = prepare(state) else {
        return state.clone();
    };
    let mut document = prepared.document;
    // Descendants sort after their ancestors, so going backwards keeps the
    // remaining handles valid.
    for handle in links.iter().rev() {
        let children = document
            .lookup_element(handle)
            .map(|element| element.children().to_vec())
            .unwrap_or_default();
        document.replace_node_with(handle, children);
    }
    debug!(count = links.len(), "links removed");
    finish(document, prepared.locations, None)
}

/// Link the selection to `url`. A collapsed caret gets a new link showing
/// the url itself, with the caret placed after it.
pub fn wrap_link(state: &EditorState, url: &str) -> EditorState {
    let state = if is_link_active(state) {
        unwrap_link(state)
    } else {
        state.clone()
    };
    let Some(prepared) = prepare(&state) else {
        return state;
    };
    let mut document = prepared.document;

    if prepared.locations.is_collapsed() {
        let link = ElementNode::new_link(url, vec![Node::text(url)]);
        let len = url.chars().count();
        let Some(at) = insert_inline_nodes(&mut document, &prepared.anchor, vec![link.into()])
        else {
            return state;
        };
        debug!(url, "link inserted");
        return finish(
            document,
            SelectionLocations::collapsed(at + len),
            Some(Affinity::Forward),
        );
    }

    let (start, end) = (prepared.locations.start(), prepared.locations.end());
    split_text_at_location(&mut document, start);
    split_text_at_location(&mut document, end);

    let layout = Layout::of(&document);
    let blocks: Vec<_> = layout
        .blocks_touching(start, end)
        .into_iter()
        .filter(|block| !block.is_void)
        .cloned()
        .collect();
    for block in blocks.iter().rev() {
        let Some(element) = document.lookup_element_mut(&block.handle) else {
            continue;
        };
        let mut position = block.start;
        let mut covered = Vec::new();
        let mut has_content = false;
        for (index, child) in element.children().iter().enumerate() {
            let child_start = position;
            position += child.inline_len();
            if start <= child_start && position <= end {
                covered.push(index);
                has_content |= position > child_start;
            }
        }
        let (Some(&from), Some(&to)) = (covered.first(), covered.last()) else {
            continue;
        };
        if !has_content {
            continue;
        }
        let children = element.children_mut();
        let wrapped: Vec<Node> = children.drain(from..=to).collect();
        children.insert(from, ElementNode::new_link(url, wrapped).into());
    }
    debug!(url, start, end, "selection linked");
    finish(
        document,
        SelectionLocations::collapsed(end),
        Some(Affinity::Backward),
    )
}

/// Link the selection, if there is one.
pub fn insert_link(state: &EditorState, url: &str) -> EditorState {
    if state.valid_selection().is_none() {
        return state.clone();
    }
    wrap_link(state, url)
}
