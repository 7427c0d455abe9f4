// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! HTML import: html5ever builds a [PaDom] arena, which is then walked to
//! produce document nodes.

mod padom;
mod padom_creation_error;
mod padom_creator;
mod padom_node;
mod panode_container;
mod panode_text;
pub mod parse;

pub(crate) use padom::{PaDom, PaDomHandle};
pub(crate) use padom_creation_error::PaDomCreationError;
pub(crate) use padom_creator::PaDomCreator;
pub(crate) use padom_node::PaDomNode;
pub(crate) use panode_container::PaNodeContainer;
pub(crate) use panode_text::PaNodeText;
pub use parse::{parse_html, DeserializeOptions, UnknownTagPolicy};

use html5ever::{LocalName, Namespace, QualName};

const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

pub(crate) fn paqual_name(name: &str) -> QualName {
    QualName::new(
        None,
        Namespace::from(XHTML_NAMESPACE),
        LocalName::from(name),
    )
}
