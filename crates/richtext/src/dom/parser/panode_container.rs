// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use html5ever::QualName;
use regex::Regex;

use super::PaDomHandle;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PaNodeContainer {
    pub(crate) name: QualName,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<PaDomHandle>,
}

impl PaNodeContainer {
    pub(crate) fn tag(&self) -> &str {
        self.name.local.as_ref()
    }

    pub(crate) fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _v)| n == name)
            .map(|(_n, v)| v.as_str())
    }

    /// True if the inline style declares `name: value`, ignoring case and
    /// whitespace around the declaration.
    pub(crate) fn contains_style(&self, name: &str, value: &str) -> bool {
        self.get_attr("style")
            .map(|v| {
                Regex::new(&format!(
                    r"(?i)(^|;)\s*{}\s*:\s*{}\s*(;|$)",
                    regex::escape(name),
                    regex::escape(value)
                ))
                .map(|re| re.is_match(v))
                .unwrap_or(false)
            })
            .unwrap_or(false)
    }

    /// The value of one declaration of the inline style, trimmed and
    /// lowercased.
    pub(crate) fn style_value(&self, name: &str) -> Option<String> {
        self.get_attr("style")?.split(';').find_map(|declaration| {
            let (key, value) = declaration.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_ascii_lowercase())
        })
    }
}
