// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Looking up users to mention: the directory records, the debounced search
//! that drives the suggestion list, and keyboard navigation through it.

mod debounced_search;
mod directory;
mod mention_picker;
mod user_record;

pub use crate::debounced_search::{
    DebouncedSearch, SearchRequest, SearchTicket, DEFAULT_DEBOUNCE,
};
pub use crate::directory::{
    parse_directory_response, DirectoryError, StaticDirectory, UserDirectory,
    MAX_SUGGESTIONS,
};
pub use crate::mention_picker::MentionPicker;
pub use crate::user_record::UserRecord;
