// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::block_format::BlockFormat;
use crate::dom::{Alignment, ElementKind};
use crate::transforms::toggle_block;
use crate::{ComposerModel, ComposerUpdate};

impl ComposerModel {
    pub fn toggle_block(&mut self, format: BlockFormat) -> ComposerUpdate {
        let next = toggle_block(&self.state, format);
        self.apply_state(next)
    }

    pub fn ordered_list(&mut self) -> ComposerUpdate {
        self.toggle_block(BlockFormat::Kind(ElementKind::NumberedList))
    }

    pub fn unordered_list(&mut self) -> ComposerUpdate {
        self.toggle_block(BlockFormat::Kind(ElementKind::BulletedList))
    }

    pub fn quote(&mut self) -> ComposerUpdate {
        self.toggle_block(BlockFormat::Kind(ElementKind::BlockQuote))
    }

    pub fn code_block(&mut self) -> ComposerUpdate {
        self.toggle_block(BlockFormat::Kind(ElementKind::CodeBlock))
    }

    pub fn align(&mut self, align: Alignment) -> ComposerUpdate {
        self.toggle_block(BlockFormat::Align(align))
    }
}
