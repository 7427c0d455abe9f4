// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use thiserror::Error;

/// Why markup could not be turned into document nodes. Malformed markup is
/// not an error: html5ever always recovers a tree from it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HtmlParseError {
    #[error("The parsed markup has no document node")]
    NoDocument,
    #[error("Node `{0}` is not supported")]
    UnknownTag(String),
}
