// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::debug;

use crate::dom::ElementNode;
use crate::plugins::Transition;
use crate::transforms::insert_void_element;
use crate::url_detection::{is_image_data_url, is_image_url};
use crate::{ComposerModel, ComposerUpdate, UserNotice};

impl ComposerModel {
    /// Insert an image block. URLs that do not point at an image are
    /// refused with a notice and the document stays as it is.
    pub fn insert_image(&mut self, url: &str) -> ComposerUpdate {
        if !is_image_url(url) {
            debug!(url, "Refusing a non image url");
            let notice = UserNotice::NotAnImageUrl {
                url: url.to_owned(),
            };
            return self.apply(Transition::refused(&self.state, notice));
        }
        let next = insert_void_element(&self.state, ElementNode::new_image(url));
        self.apply_state(next)
    }

    /// Insert an image read from a file as a data URL.
    pub fn insert_image_data(&mut self, mime_type: &str, data_url: &str) -> ComposerUpdate {
        if !mime_type.starts_with("image/") || !is_image_data_url(data_url) {
            let notice = UserNotice::NotAnImageFile {
                mime_type: mime_type.to_owned(),
            };
            return self.apply(Transition::refused(&self.state, notice));
        }
        let next = insert_void_element(&self.state, ElementNode::new_image(data_url));
        self.apply_state(next)
    }
}
