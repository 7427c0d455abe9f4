// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::dom::{Alignment, ElementKind};

/// What a block toggle applies: an alignment, or a block kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockFormat {
    Kind(ElementKind),
    Align(Alignment),
}

impl BlockFormat {
    pub fn is_alignment(&self) -> bool {
        matches!(self, Self::Align(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::Kind(kind) if kind.is_list_container())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("`{0}` is not a block format")]
pub struct UnknownBlockFormat(pub String);

impl FromStr for BlockFormat {
    type Err = UnknownBlockFormat;

    /// Alignment names take precedence. Inline and void kinds are not
    /// block formats.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if let Ok(align) = Alignment::from_str(name) {
            return Ok(Self::Align(align));
        }
        match ElementKind::from_str(name) {
            Ok(kind) if !kind.is_inline() && !kind.is_void() => Ok(Self::Kind(kind)),
            _ => Err(UnknownBlockFormat(name.to_owned())),
        }
    }
}

impl fmt::Display for BlockFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => write!(f, "{kind}"),
            Self::Align(align) => write!(f, "{align}"),
        }
    }
}

impl From<ElementKind> for BlockFormat {
    fn from(kind: ElementKind) -> Self {
        Self::Kind(kind)
    }
}

impl From<Alignment> for BlockFormat {
    fn from(align: Alignment) -> Self {
        Self::Align(align)
    }
}
