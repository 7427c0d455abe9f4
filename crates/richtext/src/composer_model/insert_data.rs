// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::plugins::ClipboardData;
use crate::{ComposerModel, ComposerUpdate};

impl ComposerModel {
    /// Paste or drop `data` over the selection.
    pub fn insert_data(&mut self, data: &ClipboardData) -> ComposerUpdate {
        let transition = self.plugins.insert_data(&self.state, data);
        self.apply(transition)
    }
}
