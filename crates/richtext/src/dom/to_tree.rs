// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::nodes::{ElementAttributes, ElementNode, Node, TextRun};
use super::Document;

/// A human-readable rendering of the tree, for debugging and tests.
pub trait ToTree {
    fn to_tree(&self) -> String {
        self.to_tree_display(&[])
    }

    /// `continuing` holds the depths whose vertical guide line is still
    /// running below this node.
    fn to_tree_display(&self, continuing: &[usize]) -> String;
}

fn tree_line(description: &str, depth: usize, continuing: &[usize]) -> String {
    let mut line = String::new();
    for level in 0..depth {
        if continuing.contains(&level) {
            line.push_str("│ ");
        } else {
            line.push_str("  ");
        }
    }
    line.push_str(if continuing.contains(&depth) {
        "├>"
    } else {
        "└>"
    });
    line.push_str(description);
    line.push('\n');
    line
}

fn children_tree(children: &[Node], depth: usize, continuing: &[usize]) -> String {
    let mut out = String::new();
    for (index, child) in children.iter().enumerate() {
        let mut positions = continuing.to_vec();
        if index + 1 < children.len() {
            positions.push(depth);
        }
        out.push_str(&child.tree_at(depth, &positions));
    }
    out
}

impl Node {
    fn tree_at(&self, depth: usize, continuing: &[usize]) -> String {
        match self {
            Node::Element(element) => element.tree_at(depth, continuing),
            Node::Text(text) => tree_line(&text.describe(), depth, continuing),
        }
    }
}

impl TextRun {
    fn describe(&self) -> String {
        let marks: Vec<&'static str> =
            self.marks.active().map(<&'static str>::from).collect();
        if marks.is_empty() {
            format!("{:?}", self.text)
        } else {
            format!("{:?} [{}]", self.text, marks.join(", "))
        }
    }
}

impl ElementNode {
    fn describe(&self) -> String {
        let kind = self.kind();
        match self.attributes() {
            ElementAttributes::Block { align: Some(align) } => {
                format!("{kind} align={align}")
            }
            ElementAttributes::Block { align: None } => kind.to_string(),
            ElementAttributes::Link { url } | ElementAttributes::Image { url } => {
                format!("{kind} url={url:?}")
            }
            ElementAttributes::Mention { character } => {
                format!("{kind} character={character:?}")
            }
        }
    }

    fn tree_at(&self, depth: usize, continuing: &[usize]) -> String {
        let mut out = tree_line(&self.describe(), depth, continuing);
        if !self.is_void() {
            out.push_str(&children_tree(self.children(), depth + 1, continuing));
        }
        out
    }
}

impl ToTree for Document {
    fn to_tree_display(&self, continuing: &[usize]) -> String {
        let mut out = String::from("document\n");
        out.push_str(&children_tree(self.children(), 0, continuing));
        out
    }
}

impl ToTree for ElementNode {
    fn to_tree_display(&self, continuing: &[usize]) -> String {
        self.tree_at(0, continuing)
    }
}
