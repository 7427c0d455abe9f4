// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::classification::{classify, is_inline, is_void, NodeClass};

/// Every kind of element the document can hold.
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
    PartialEq,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ElementKind {
    Paragraph,
    HeadingOne,
    HeadingTwo,
    HeadingThree,
    HeadingFour,
    HeadingFive,
    HeadingSix,
    #[strum(to_string = "block-quote", serialize = "quote")]
    BlockQuote,
    #[strum(to_string = "code-block", serialize = "code")]
    CodeBlock,
    NumberedList,
    BulletedList,
    ListItem,
    Link,
    Image,
    Mention,
}

impl ElementKind {
    pub fn class(&self) -> NodeClass {
        classify(*self)
    }

    pub fn is_void(&self) -> bool {
        is_void(*self)
    }

    pub fn is_inline(&self) -> bool {
        is_inline(*self)
    }

    pub fn is_block(&self) -> bool {
        !self.is_inline()
    }

    pub fn is_list_container(&self) -> bool {
        matches!(self, Self::NumberedList | Self::BulletedList)
    }

    /// Block kinds whose children are always inline content. When one of
    /// these ends up holding blocks it is dissolved during normalization.
    pub(crate) fn holds_only_inline(&self) -> bool {
        matches!(
            self,
            Self::Paragraph
                | Self::HeadingOne
                | Self::HeadingTwo
                | Self::HeadingThree
                | Self::HeadingFour
                | Self::HeadingFive
                | Self::HeadingSix
                | Self::CodeBlock
        )
    }

    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Self::HeadingOne => Some(1),
            Self::HeadingTwo => Some(2),
            Self::HeadingThree => Some(3),
            Self::HeadingFour => Some(4),
            Self::HeadingFive => Some(5),
            Self::HeadingSix => Some(6),
            _ => None,
        }
    }

    pub fn from_heading_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::HeadingOne),
            2 => Some(Self::HeadingTwo),
            3 => Some(Self::HeadingThree),
            4 => Some(Self::HeadingFour),
            5 => Some(Self::HeadingFive),
            6 => Some(Self::HeadingSix),
            _ => None,
        }
    }
}

/// Horizontal alignment of a block.
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
    PartialEq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}
