// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use thiserror::Error;

/// Something the user should be told about because their action was
/// refused. The document is left as it was.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum UserNotice {
    #[error("URL is not an image")]
    NotAnImageUrl { url: String },
    #[error("File is not an image")]
    NotAnImageFile { mime_type: String },
}
