// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// A mark that can be carried by a text run.
///
/// Variants are declared in the order their tags nest when rendered to HTML,
/// outermost first.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    IntoStaticStr,
    PartialEq,
)]
#[strum(serialize_all = "lowercase")]
pub enum InlineFormatType {
    Bold,
    #[strum(serialize = "code")]
    InlineCode,
    Italic,
    Underline,
    StrikeThrough,
}

impl InlineFormatType {
    pub(crate) fn tag(&self) -> &'static str {
        match self {
            Self::Bold => "strong",
            Self::InlineCode => "code",
            Self::Italic => "em",
            Self::Underline => "u",
            Self::StrikeThrough => "del",
        }
    }
}
