// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::InlineFormatType;

/// The marks carried by a [TextRun]. An absent mark is `false`, and only
/// present marks are written when serialized.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct MarkSet {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl MarkSet {
    pub fn contains(&self, format: &InlineFormatType) -> bool {
        match format {
            InlineFormatType::Bold => self.bold,
            InlineFormatType::InlineCode => self.code,
            InlineFormatType::Italic => self.italic,
            InlineFormatType::Underline => self.underline,
            InlineFormatType::StrikeThrough => self.strikethrough,
        }
    }

    pub fn set(&mut self, format: &InlineFormatType, value: bool) {
        let flag = match format {
            InlineFormatType::Bold => &mut self.bold,
            InlineFormatType::InlineCode => &mut self.code,
            InlineFormatType::Italic => &mut self.italic,
            InlineFormatType::Underline => &mut self.underline,
            InlineFormatType::StrikeThrough => &mut self.strikethrough,
        };
        *flag = value;
    }

    pub fn with(mut self, format: InlineFormatType) -> Self {
        self.set(&format, true);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The marks that are present, in rendering order.
    pub fn active(&self) -> impl Iterator<Item = InlineFormatType> + '_ {
        InlineFormatType::iter().filter(move |format| self.contains(format))
    }
}

/// A leaf of the document: a string and the marks applied to all of it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(flatten)]
    pub marks: MarkSet,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: MarkSet::default(),
        }
    }

    pub fn with_marks(text: impl Into<String>, marks: MarkSet) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Length in characters. Every offset into a run counts characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Split into two runs with the same marks at `offset` characters.
    pub(crate) fn split_at(&self, offset: usize) -> (TextRun, TextRun) {
        let at = byte_index(&self.text, offset);
        (
            Self::with_marks(&self.text[..at], self.marks),
            Self::with_marks(&self.text[at..], self.marks),
        )
    }

    pub(crate) fn insert_str(&mut self, offset: usize, text: &str) {
        let at = byte_index(&self.text, offset);
        self.text.insert_str(at, text);
    }
}

/// Byte index of the character at `char_offset`, clamped to the end.
pub(crate) fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}
