// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};

use crate::dom::nodes::{ElementNode, TextRun};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(ElementNode),
    Text(TextRun),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextRun::new(text))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }

    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextRun> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementNode> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Text runs and inline elements.
    pub fn is_inline(&self) -> bool {
        match self {
            Self::Text(_) => true,
            Self::Element(element) => element.is_inline(),
        }
    }

    /// Elements that are not inline, block-level voids included.
    pub fn is_block(&self) -> bool {
        !self.is_inline()
    }

    pub fn text_content(&self) -> String {
        match self {
            Self::Text(text) => text.text.clone(),
            Self::Element(element) => element.text_content(),
        }
    }

    /// True if the node holds any characters or any void.
    pub(crate) fn has_content(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Element(element) if element.is_void() => true,
            Self::Element(element) => {
                element.children().iter().any(Node::has_content)
            }
        }
    }

    /// Length of an inline node in locations: one per character, one per
    /// void.
    pub(crate) fn inline_len(&self) -> usize {
        match self {
            Self::Text(text) => text.char_len(),
            Self::Element(element) if element.is_void() => 1,
            Self::Element(element) => {
                element.children().iter().map(Node::inline_len).sum()
            }
        }
    }
}

impl From<ElementNode> for Node {
    fn from(element: ElementNode) -> Self {
        Self::Element(element)
    }
}

impl From<TextRun> for Node {
    fn from(text: TextRun) -> Self {
        Self::Text(text)
    }
}
