// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use html5ever::QualName;
use once_cell::sync::Lazy;

use super::{paqual_name, PaDomHandle, PaNodeContainer, PaNodeText};

static EMPTY_NAME: Lazy<QualName> = Lazy::new(|| paqual_name(""));

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PaDomNode {
    Container(PaNodeContainer),
    Document(PaNodeContainer),
    Text(PaNodeText),
    /// Comments and processing instructions. They are created on request of
    /// the parser but never attached to the tree.
    Comment,
}

impl PaDomNode {
    pub(crate) fn name(&self) -> &QualName {
        match self {
            PaDomNode::Container(node) | PaDomNode::Document(node) => &node.name,
            PaDomNode::Text(_) | PaDomNode::Comment => &EMPTY_NAME,
        }
    }

    pub(crate) fn children(&self) -> Option<&Vec<PaDomHandle>> {
        match self {
            PaDomNode::Container(node) | PaDomNode::Document(node) => {
                Some(&node.children)
            }
            PaDomNode::Text(_) | PaDomNode::Comment => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<PaDomHandle>> {
        match self {
            PaDomNode::Container(node) | PaDomNode::Document(node) => {
                Some(&mut node.children)
            }
            PaDomNode::Text(_) | PaDomNode::Comment => None,
        }
    }
}
