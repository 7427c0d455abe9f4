// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use strum_macros::{AsRefStr, Display, EnumIter};

use crate::block_format::BlockFormat;
use crate::dom::{Alignment, ElementKind};
use crate::InlineFormatType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionState {
    Enabled,
    Reversed,
    Disabled,
}

impl ActionState {
    pub(crate) fn reversed_if(active: bool) -> Self {
        if active {
            Self::Reversed
        } else {
            Self::Enabled
        }
    }
}

/// Every toolbar button.
#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumIter, Eq, Hash, PartialEq)]
#[strum(serialize_all = "kebab-case")]
pub enum ComposerAction {
    Bold,
    Italic,
    Underline,
    InlineCode,
    StrikeThrough,
    HeadingOne,
    HeadingTwo,
    Quote,
    CodeBlock,
    OrderedList,
    UnorderedList,
    AlignLeft,
    AlignCenter,
    AlignRight,
    AlignJustify,
    Link,
    Image,
    Undo,
    Redo,
}

impl ComposerAction {
    pub fn inline_format(&self) -> Option<InlineFormatType> {
        match self {
            Self::Bold => Some(InlineFormatType::Bold),
            Self::Italic => Some(InlineFormatType::Italic),
            Self::Underline => Some(InlineFormatType::Underline),
            Self::InlineCode => Some(InlineFormatType::InlineCode),
            Self::StrikeThrough => Some(InlineFormatType::StrikeThrough),
            _ => None,
        }
    }

    pub fn block_format(&self) -> Option<BlockFormat> {
        let format = match self {
            Self::HeadingOne => BlockFormat::Kind(ElementKind::HeadingOne),
            Self::HeadingTwo => BlockFormat::Kind(ElementKind::HeadingTwo),
            Self::Quote => BlockFormat::Kind(ElementKind::BlockQuote),
            Self::CodeBlock => BlockFormat::Kind(ElementKind::CodeBlock),
            Self::OrderedList => BlockFormat::Kind(ElementKind::NumberedList),
            Self::UnorderedList => BlockFormat::Kind(ElementKind::BulletedList),
            Self::AlignLeft => BlockFormat::Align(Alignment::Left),
            Self::AlignCenter => BlockFormat::Align(Alignment::Center),
            Self::AlignRight => BlockFormat::Align(Alignment::Right),
            Self::AlignJustify => BlockFormat::Align(Alignment::Justify),
            _ => return None,
        };
        Some(format)
    }
}
