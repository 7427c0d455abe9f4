// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

/// What the link button would do for the current selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkAction {
    /// Nothing is selected: the link text has to be supplied too.
    CreateWithText,
    /// Link the selected content.
    Create,
    /// The selection is in a link with this url.
    Edit(String),
    Disabled,
}
