// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::str::FromStr;

use thiserror::Error;

use crate::InlineFormatType;

/// A key press with its modifiers. `mod` is the platform's command key:
/// either control or meta matches it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    fn has_mod(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HotkeyParseError {
    #[error("hotkey has no key")]
    MissingKey,
    #[error("`{0}` is not a modifier")]
    UnknownModifier(String),
}

impl FromStr for KeyPress {
    type Err = HotkeyParseError;

    /// Parses `mod+b`, `ctrl+shift+x`, `cmd+``.
    fn from_str(hotkey: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = hotkey.split('+').collect();
        let key = parts.pop().filter(|key| !key.is_empty());
        let Some(key) = key else {
            return Err(HotkeyParseError::MissingKey);
        };
        let mut press = KeyPress::new(key.to_lowercase());
        for modifier in parts {
            match modifier.to_lowercase().as_str() {
                "mod" | "ctrl" | "control" => press.ctrl = true,
                "cmd" | "meta" => press.meta = true,
                "alt" | "option" => press.alt = true,
                "shift" => press.shift = true,
                other => return Err(HotkeyParseError::UnknownModifier(other.to_owned())),
            }
        }
        Ok(press)
    }
}

const HOTKEYS: &[(&str, InlineFormatType)] = &[
    ("b", InlineFormatType::Bold),
    ("i", InlineFormatType::Italic),
    ("u", InlineFormatType::Underline),
    ("`", InlineFormatType::InlineCode),
];

/// The mark a key press toggles, if it is one of the formatting hotkeys.
pub fn format_for_hotkey(press: &KeyPress) -> Option<InlineFormatType> {
    if !press.has_mod() || press.alt || press.shift {
        return None;
    }
    HOTKEYS
        .iter()
        .find(|(key, _)| press.key.eq_ignore_ascii_case(key))
        .map(|(_, format)| *format)
}
