// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};

use super::nodes::{ElementNode, Node, TextRun};
use super::{DomHandle, Point, Selection};
use crate::dom::element_kind::ElementKind;

/// The whole editable content: an ordered list of top-level blocks.
///
/// Serialized as the bare list of nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    children: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::from_blocks(vec![ElementNode::new_paragraph(vec![Node::Text(
            TextRun::empty(),
        )])])
    }
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn from_blocks(blocks: Vec<ElementNode>) -> Self {
        Self::new(blocks.into_iter().map(Node::Element).collect())
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn into_children(self) -> Vec<Node> {
        self.children
    }

    pub fn lookup_node(&self, handle: &DomHandle) -> Option<&Node> {
        let (first, rest) = handle.raw().split_first()?;
        let mut node = self.children.get(*first)?;
        for index in rest {
            node = match node {
                Node::Element(element) => element.children().get(*index)?,
                Node::Text(_) => return None,
            };
        }
        Some(node)
    }

    pub fn lookup_node_mut(&mut self, handle: &DomHandle) -> Option<&mut Node> {
        let (first, rest) = handle.raw().split_first()?;
        let mut node = self.children.get_mut(*first)?;
        for index in rest {
            node = match node {
                Node::Element(element) => {
                    element.children_mut().get_mut(*index)?
                }
                Node::Text(_) => return None,
            };
        }
        Some(node)
    }

    pub fn lookup_element(&self, handle: &DomHandle) -> Option<&ElementNode> {
        self.lookup_node(handle).and_then(Node::as_element)
    }

    pub fn lookup_element_mut(
        &mut self,
        handle: &DomHandle,
    ) -> Option<&mut ElementNode> {
        self.lookup_node_mut(handle).and_then(Node::as_element_mut)
    }

    pub fn lookup_text(&self, handle: &DomHandle) -> Option<&TextRun> {
        self.lookup_node(handle).and_then(Node::as_text)
    }

    pub fn lookup_text_mut(&mut self, handle: &DomHandle) -> Option<&mut TextRun> {
        self.lookup_node_mut(handle).and_then(Node::as_text_mut)
    }

    /// The children of the node at `handle`. The root handle gives the
    /// top-level blocks.
    pub(crate) fn children_at(&self, handle: &DomHandle) -> Option<&[Node]> {
        if handle.is_root() {
            Some(&self.children)
        } else {
            self.lookup_element(handle).map(ElementNode::children)
        }
    }

    pub(crate) fn children_at_mut(
        &mut self,
        handle: &DomHandle,
    ) -> Option<&mut Vec<Node>> {
        if handle.is_root() {
            Some(&mut self.children)
        } else {
            self.lookup_element_mut(handle).map(ElementNode::children_mut)
        }
    }

    /// Insert `node` so that it ends up at `handle`.
    pub(crate) fn insert_node(&mut self, handle: &DomHandle, node: Node) -> bool {
        if handle.is_root() {
            return false;
        }
        let index = handle.index_in_parent();
        match self.children_at_mut(&handle.parent_handle()) {
            Some(children) if index <= children.len() => {
                children.insert(index, node);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn remove_node(&mut self, handle: &DomHandle) -> Option<Node> {
        if handle.is_root() {
            return None;
        }
        let index = handle.index_in_parent();
        let children = self.children_at_mut(&handle.parent_handle())?;
        (index < children.len()).then(|| children.remove(index))
    }

    /// Replace the node at `handle` with `nodes`, in place.
    pub(crate) fn replace_node_with(
        &mut self,
        handle: &DomHandle,
        nodes: Vec<Node>,
    ) -> bool {
        if handle.is_root() {
            return false;
        }
        let index = handle.index_in_parent();
        match self.children_at_mut(&handle.parent_handle()) {
            Some(children) if index < children.len() => {
                children.splice(index..=index, nodes);
                true
            }
            _ => false,
        }
    }

    /// Remove the node, then every ancestor left without children.
    pub(crate) fn remove_node_and_empty_ancestors(&mut self, handle: &DomHandle) {
        if self.remove_node(handle).is_none() {
            return;
        }
        let mut parent = handle.parent_handle();
        while parent.has_parent()
            && self.children_at(&parent).is_some_and(<[Node]>::is_empty)
        {
            self.remove_node(&parent);
            parent = parent.parent_handle();
        }
    }

    /// Split the run at `handle` in two at `offset` characters. Does nothing
    /// at either edge of the run.
    pub(crate) fn split_text(&mut self, handle: &DomHandle, offset: usize) -> bool {
        let Some(text) = self.lookup_text(handle) else {
            return false;
        };
        if offset == 0 || offset >= text.char_len() {
            return false;
        }
        let (left, right) = text.split_at(offset);
        self.replace_node_with(handle, vec![Node::Text(left), Node::Text(right)])
    }

    /// Handles of every text run in document order, void children included.
    pub fn leaf_handles(&self) -> Vec<DomHandle> {
        fn collect(nodes: &[Node], parent: &DomHandle, out: &mut Vec<DomHandle>) {
            for (index, node) in nodes.iter().enumerate() {
                let handle = parent.child_handle(index);
                match node {
                    Node::Text(_) => out.push(handle),
                    Node::Element(element) => {
                        collect(element.children(), &handle, out)
                    }
                }
            }
        }
        let mut handles = Vec::new();
        collect(&self.children, &DomHandle::root(), &mut handles);
        handles
    }

    /// The handle of the nearest void element enclosing `handle`.
    pub(crate) fn void_ancestor(&self, handle: &DomHandle) -> Option<DomHandle> {
        let mut current = handle.parent_handle();
        while current.has_parent() {
            if self.lookup_element(&current).is_some_and(ElementNode::is_void) {
                return Some(current);
            }
            current = current.parent_handle();
        }
        None
    }

    pub fn is_valid_point(&self, point: &Point) -> bool {
        self.lookup_text(&point.path)
            .is_some_and(|text| point.offset <= text.char_len())
    }

    pub fn is_valid_selection(&self, selection: &Selection) -> bool {
        self.is_valid_point(&selection.anchor)
            && self.is_valid_point(&selection.focus)
    }

    pub fn start_point(&self) -> Option<Point> {
        self.leaf_handles()
            .into_iter()
            .next()
            .map(|handle| Point::new(handle, 0))
    }

    pub fn end_point(&self) -> Option<Point> {
        let handle = self.leaf_handles().pop()?;
        let offset = self.lookup_text(&handle).map_or(0, TextRun::char_len);
        Some(Point::new(handle, offset))
    }

    /// Text of the document, one line per text block. Mentions are written
    /// as `@character`.
    pub fn to_plain_text(&self) -> String {
        fn inline_text(nodes: &[Node], out: &mut String) {
            for node in nodes {
                match node {
                    Node::Text(text) => out.push_str(&text.text),
                    Node::Element(element)
                        if element.kind() == ElementKind::Mention =>
                    {
                        out.push('@');
                        out.push_str(element.character().unwrap_or_default());
                    }
                    Node::Element(element) => inline_text(element.children(), out),
                }
            }
        }
        fn blocks(nodes: &[Node], lines: &mut Vec<String>) {
            for node in nodes {
                let Node::Element(element) = node else {
                    continue;
                };
                if element.has_inline_content() || element.is_void() {
                    let mut line = String::new();
                    inline_text(element.children(), &mut line);
                    lines.push(line);
                } else {
                    blocks(element.children(), lines);
                }
            }
        }
        let mut lines = Vec::new();
        blocks(&self.children, &mut lines);
        lines.join("\n")
    }

    /// Check the structural invariants every rule must leave behind.
    pub fn check_invariants(&self) -> Result<(), String> {
        fn check_inline(nodes: &[Node], path: &DomHandle) -> Result<(), String> {
            for (index, node) in nodes.iter().enumerate() {
                let handle = path.child_handle(index);
                if let Node::Element(element) = node {
                    if element.is_block() {
                        return Err(format!("block inside inline content at {handle:?}"));
                    }
                    let prev_is_text = index > 0 && nodes[index - 1].is_text();
                    let next_is_text = nodes.get(index + 1).is_some_and(Node::is_text);
                    if !prev_is_text || !next_is_text {
                        return Err(format!("inline element not padded by text at {handle:?}"));
                    }
                    check_element(element, &handle)?;
                }
            }
            Ok(())
        }
        fn check_element(element: &ElementNode, path: &DomHandle) -> Result<(), String> {
            if element.children().is_empty() {
                return Err(format!("element without children at {path:?}"));
            }
            if element.is_void() {
                return match element.children() {
                    [Node::Text(text)] if text.is_empty() => Ok(()),
                    _ => Err(format!("void without a single empty run at {path:?}")),
                };
            }
            if element.is_list_container()
                && !element.children().iter().all(|child| {
                    child
                        .as_element()
                        .is_some_and(|e| e.kind() == ElementKind::ListItem)
                })
            {
                return Err(format!("list holding a non-item at {path:?}"));
            }
            if element.is_inline() || element.has_inline_content() {
                check_inline(element.children(), path)
            } else {
                for (index, child) in element.children().iter().enumerate() {
                    let handle = path.child_handle(index);
                    match child {
                        Node::Element(child) if child.is_block() => {
                            check_element(child, &handle)?
                        }
                        _ => {
                            return Err(format!("inline content among blocks at {handle:?}"))
                        }
                    }
                }
                Ok(())
            }
        }

        if self.children.is_empty() {
            return Err(String::from("document is empty"));
        }
        for (index, node) in self.children.iter().enumerate() {
            let handle = DomHandle::from_raw(vec![index]);
            match node {
                Node::Element(element) if element.is_block() => {
                    check_element(element, &handle)?
                }
                _ => return Err(format!("top-level node is not a block at {handle:?}")),
            }
        }
        Ok(())
    }

    #[cfg(any(test, feature = "assert-invariants"))]
    pub fn assert_invariants(&self) {
        if let Err(problem) = self.check_invariants() {
            panic!("Document invariant broken: {problem}\n{self:#?}");
        }
    }
}
