// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

pub mod dom_node;
pub mod element_node;
pub mod text_node;

pub use dom_node::Node;
pub use element_node::{ElementAttributes, ElementNode};
pub use text_node::{MarkSet, TextRun};
