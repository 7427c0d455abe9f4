// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dom::classification::NodeClass;
use crate::dom::element_kind::{Alignment, ElementKind};
use crate::dom::nodes::{Node, TextRun};

/// Attributes an element carries, shaped by its kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementAttributes {
    Block { align: Option<Alignment> },
    Link { url: String },
    Image { url: String },
    Mention { character: String },
}

impl ElementAttributes {
    pub fn default_for(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Link => Self::Link { url: String::new() },
            ElementKind::Image => Self::Image { url: String::new() },
            ElementKind::Mention => Self::Mention {
                character: String::new(),
            },
            _ => Self::Block { align: None },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawElement", into = "RawElement")]
pub struct ElementNode {
    kind: ElementKind,
    attributes: ElementAttributes,
    children: Vec<Node>,
}

impl ElementNode {
    pub fn new(kind: ElementKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            attributes: ElementAttributes::default_for(kind),
            children,
        }
    }

    pub fn new_paragraph(children: Vec<Node>) -> Self {
        Self::new(ElementKind::Paragraph, children)
    }

    pub fn new_quote(children: Vec<Node>) -> Self {
        Self::new(ElementKind::BlockQuote, children)
    }

    pub fn new_code_block(children: Vec<Node>) -> Self {
        Self::new(ElementKind::CodeBlock, children)
    }

    pub fn new_list(kind: ElementKind, items: Vec<Node>) -> Self {
        debug_assert!(kind.is_list_container());
        Self::new(kind, items)
    }

    pub fn new_list_item(children: Vec<Node>) -> Self {
        Self::new(ElementKind::ListItem, children)
    }

    pub fn new_link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind: ElementKind::Link,
            attributes: ElementAttributes::Link { url: url.into() },
            children,
        }
    }

    pub fn new_image(url: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Image,
            attributes: ElementAttributes::Image { url: url.into() },
            children: vec![Node::Text(TextRun::empty())],
        }
    }

    pub fn new_mention(character: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Mention,
            attributes: ElementAttributes::Mention {
                character: character.into(),
            },
            children: vec![Node::Text(TextRun::empty())],
        }
    }

    pub fn with_align(mut self, align: Alignment) -> Self {
        self.set_align(Some(align));
        self
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn attributes(&self) -> &ElementAttributes {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn take_children(self) -> Vec<Node> {
        self.children
    }

    pub fn set_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    /// A copy of this element's kind and attributes holding `children`.
    pub(crate) fn clone_with_children(&self, children: Vec<Node>) -> Self {
        Self {
            kind: self.kind,
            attributes: self.attributes.clone(),
            children,
        }
    }

    pub fn align(&self) -> Option<Alignment> {
        match &self.attributes {
            ElementAttributes::Block { align } => *align,
            _ => None,
        }
    }

    /// Returns false when this element is not a block and so cannot be
    /// aligned.
    pub fn set_align(&mut self, align: Option<Alignment>) -> bool {
        if let ElementAttributes::Block { align: current } = &mut self.attributes
        {
            *current = align;
            true
        } else {
            false
        }
    }

    pub fn url(&self) -> Option<&str> {
        match &self.attributes {
            ElementAttributes::Link { url } | ElementAttributes::Image { url } => {
                Some(url)
            }
            _ => None,
        }
    }

    pub fn character(&self) -> Option<&str> {
        match &self.attributes {
            ElementAttributes::Mention { character } => Some(character),
            _ => None,
        }
    }

    /// Change kind, keeping the alignment when moving between block kinds.
    pub fn set_kind(&mut self, kind: ElementKind) {
        if self.kind == kind {
            return;
        }
        let align = self.align();
        self.kind = kind;
        self.attributes = ElementAttributes::default_for(kind);
        self.set_align(align);
    }

    pub fn class(&self) -> NodeClass {
        self.kind.class()
    }

    pub fn is_void(&self) -> bool {
        self.kind.is_void()
    }

    pub fn is_inline(&self) -> bool {
        self.kind.is_inline()
    }

    pub fn is_block(&self) -> bool {
        self.kind.is_block()
    }

    pub fn is_list_container(&self) -> bool {
        self.kind.is_list_container()
    }

    /// True when the children are text and inline elements, i.e. this block
    /// directly holds a line of text.
    pub fn has_inline_content(&self) -> bool {
        self.children.first().map_or(true, Node::is_inline)
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

/// The stored shape of an element: a `type` tag, optional attributes and
/// the children.
#[derive(Serialize, Deserialize)]
struct RawElement {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    align: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    character: Option<String>,
    children: Vec<Node>,
}

impl From<RawElement> for ElementNode {
    fn from(raw: RawElement) -> Self {
        // Unknown kinds render as a plain paragraph, so they load as one
        let kind = raw
            .kind
            .as_deref()
            .and_then(|kind| ElementKind::from_str(kind).ok())
            .unwrap_or(ElementKind::Paragraph);
        let attributes = match kind {
            ElementKind::Link => ElementAttributes::Link {
                url: raw.url.unwrap_or_default(),
            },
            ElementKind::Image => ElementAttributes::Image {
                url: raw.url.unwrap_or_default(),
            },
            ElementKind::Mention => ElementAttributes::Mention {
                character: raw.character.unwrap_or_default(),
            },
            _ => ElementAttributes::Block { align: raw.align },
        };
        Self {
            kind,
            attributes,
            children: raw.children,
        }
    }
}

impl From<ElementNode> for RawElement {
    fn from(element: ElementNode) -> Self {
        let mut raw = RawElement {
            kind: Some(element.kind.to_string()),
            align: None,
            url: None,
            character: None,
            children: element.children,
        };
        match element.attributes {
            ElementAttributes::Block { align } => raw.align = align,
            ElementAttributes::Link { url } | ElementAttributes::Image { url } => {
                raw.url = Some(url)
            }
            ElementAttributes::Mention { character } => {
                raw.character = Some(character)
            }
        }
        raw
    }
}

#[cfg(test)]
mod test {
    use indoc::indoc;

    use super::*;

    fn tx(text: &str) -> Node {
        Node::Text(TextRun::new(text))
    }

    #[test]
    fn changing_between_blocks_keeps_alignment() {
        let mut element = ElementNode::new_paragraph(vec![tx("a")])
            .with_align(Alignment::Center);
        element.set_kind(ElementKind::HeadingTwo);
        assert_eq!(element.kind(), ElementKind::HeadingTwo);
        assert_eq!(element.align(), Some(Alignment::Center));
    }

    #[test]
    fn inline_elements_cannot_be_aligned() {
        let mut link = ElementNode::new_link("https://a.b", vec![tx("a")]);
        assert!(!link.set_align(Some(Alignment::Right)));
        assert_eq!(link.align(), None);
        assert_eq!(link.url(), Some("https://a.b"));
    }

    #[test]
    fn voids_are_created_with_one_empty_run() {
        let mention = ElementNode::new_mention("thaokv");
        assert_eq!(mention.children(), &[Node::Text(TextRun::empty())]);
        assert_eq!(mention.character(), Some("thaokv"));
    }

    #[test]
    fn serializes_as_a_typed_object() {
        let element = ElementNode::new_paragraph(vec![tx("hi")])
            .with_align(Alignment::Justify);
        assert_eq!(
            serde_json::to_string(&element).unwrap(),
            r#"{"type":"paragraph","align":"justify","children":[{"text":"hi"}]}"#
        );
    }

    #[test]
    fn unknown_or_missing_types_load_as_paragraphs() {
        let json = indoc! {r#"
            [
                {"type": "marquee", "children": [{"text": "a"}]},
                {"children": [{"text": "b"}]}
            ]
        "#};
        let elements: Vec<ElementNode> = serde_json::from_str(json).unwrap();
        assert!(elements
            .iter()
            .all(|e| e.kind() == ElementKind::Paragraph));
    }

    #[test]
    fn mentions_keep_their_character_through_serde() {
        let json = r#"{"type":"mention","character":"ntdat104","children":[{"text":""}]}"#;
        let element: ElementNode = serde_json::from_str(json).unwrap();
        assert_eq!(element, ElementNode::new_mention("ntdat104"));
        assert_eq!(serde_json::to_string(&element).unwrap(), json);
    }
}
