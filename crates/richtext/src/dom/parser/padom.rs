// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use html5ever::tree_builder::ElementFlags;
use html5ever::{Attribute, QualName};

use super::{paqual_name, PaDomNode, PaNodeContainer};

/// Index of a node inside a [PaDom].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct PaDomHandle(pub(crate) usize);

/// The arena html5ever builds into while parsing.
///
/// Parents refer to their children by handle and every node is owned by
/// the arena. Nodes detached during parsing stay in `nodes` but are no
/// longer reachable from the document, so walks from the document never
/// see them.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PaDom {
    pub(crate) nodes: Vec<PaDomNode>,
    pub(crate) document_handle: PaDomHandle,
}

impl PaDom {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![PaDomNode::Document(PaNodeContainer {
                name: paqual_name(""),
                attrs: Vec::new(),
                children: Vec::new(),
            })],
            document_handle: PaDomHandle(0),
        }
    }

    pub(crate) fn add_node(&mut self, node: PaDomNode) -> PaDomHandle {
        self.nodes.push(node);
        PaDomHandle(self.nodes.len() - 1)
    }

    pub(crate) fn get_node(&self, handle: &PaDomHandle) -> &PaDomNode {
        &self.nodes[handle.0]
    }

    pub(crate) fn get_mut_node(&mut self, handle: &PaDomHandle) -> &mut PaDomNode {
        &mut self.nodes[handle.0]
    }

    pub(crate) fn document_handle(&self) -> &PaDomHandle {
        &self.document_handle
    }

    pub(crate) fn get_document(&self) -> &PaDomNode {
        self.get_node(&self.document_handle)
    }

    pub(crate) fn create_element(
        &mut self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> PaDomHandle {
        self.add_node(PaDomNode::Container(PaNodeContainer {
            name,
            attrs: attrs
                .into_iter()
                .map(|attr| {
                    (attr.name.local.as_ref().to_owned(), attr.value.to_string())
                })
                .collect(),
            children: Vec::new(),
        }))
    }

    /// The node whose children include `handle`, if it is attached.
    pub(crate) fn parent_of(&self, handle: &PaDomHandle) -> Option<PaDomHandle> {
        self.nodes
            .iter()
            .position(|node| {
                node.children().is_some_and(|children| children.contains(handle))
            })
            .map(PaDomHandle)
    }
}
