// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The single table deciding how every element kind behaves in the tree.
//!
//! Void elements have no editable content of their own and are never split.
//! Inline elements flow inside a block's text. Everything else is a block.

use super::element_kind::ElementKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeClass {
    Block,
    Inline,
    Void,
}

struct KindTraits {
    void: bool,
    inline: bool,
}

const BLOCK: KindTraits = KindTraits {
    void: false,
    inline: false,
};

const fn traits(kind: ElementKind) -> KindTraits {
    match kind {
        ElementKind::Image => KindTraits {
            void: true,
            inline: false,
        },
        ElementKind::Mention => KindTraits {
            void: true,
            inline: true,
        },
        ElementKind::Link => KindTraits {
            void: false,
            inline: true,
        },
        ElementKind::Paragraph
        | ElementKind::HeadingOne
        | ElementKind::HeadingTwo
        | ElementKind::HeadingThree
        | ElementKind::HeadingFour
        | ElementKind::HeadingFive
        | ElementKind::HeadingSix
        | ElementKind::BlockQuote
        | ElementKind::CodeBlock
        | ElementKind::NumberedList
        | ElementKind::BulletedList
        | ElementKind::ListItem => BLOCK,
    }
}

/// Void wins over inline, so a mention classifies as [NodeClass::Void].
pub fn classify(kind: ElementKind) -> NodeClass {
    let traits = traits(kind);
    if traits.void {
        NodeClass::Void
    } else if traits.inline {
        NodeClass::Inline
    } else {
        NodeClass::Block
    }
}

pub fn is_void(kind: ElementKind) -> bool {
    traits(kind).void
}

pub fn is_inline(kind: ElementKind) -> bool {
    traits(kind).inline
}
