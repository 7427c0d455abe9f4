// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};

use super::DomHandle;

/// A character offset inside the text run at `path`.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub struct Point {
    pub path: DomHandle,
    pub offset: usize,
}

impl Point {
    pub fn new(path: DomHandle, offset: usize) -> Self {
        Self { path, offset }
    }

    pub fn at(path: Vec<usize>, offset: usize) -> Self {
        Self::new(DomHandle::from_raw(path), offset)
    }
}

/// Where the selection was started (`anchor`) and where it currently ends
/// (`focus`). The focus may come before the anchor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    pub fn caret(path: Vec<usize>, offset: usize) -> Self {
        Self::collapsed(Point::at(path, offset))
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn is_backward(&self) -> bool {
        self.focus < self.anchor
    }

    pub fn start(&self) -> &Point {
        std::cmp::min(&self.anchor, &self.focus)
    }

    pub fn end(&self) -> &Point {
        std::cmp::max(&self.anchor, &self.focus)
    }
}
