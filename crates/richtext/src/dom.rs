// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

pub mod classification;
pub mod document;
pub mod dom_creation_error;
pub mod dom_handle;
pub mod element_kind;
pub(crate) mod layout;
pub mod nodes;
pub(crate) mod normalize;
pub mod parser;
pub mod range;
pub mod to_html;
pub mod to_tree;

pub use classification::{classify, NodeClass};
pub use document::Document;
pub use dom_creation_error::HtmlParseError;
pub use dom_handle::DomHandle;
pub use element_kind::{Alignment, ElementKind};
pub use nodes::{ElementAttributes, ElementNode, MarkSet, Node, TextRun};
pub use range::{Point, Selection};
pub use to_html::ToHtml;
pub use to_tree::ToTree;
