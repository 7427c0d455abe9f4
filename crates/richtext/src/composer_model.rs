// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The stateful front of the editor.
//!
//! [`ComposerModel`] owns the current [`EditorState`](crate::EditorState),
//! runs one rule per user action and reports what changed as a
//! [`ComposerUpdate`](crate::ComposerUpdate). Document changes are recorded
//! in the undo history and written to the store, if there is one.

mod base;
mod format_blocks;
mod format_marks;
mod insert_data;
mod links;
mod mentions;
mod menu_state;
mod text_ops;
mod undo_redo;
mod voids;

pub use base::ComposerModel;
