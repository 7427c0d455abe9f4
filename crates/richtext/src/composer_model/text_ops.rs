// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::transforms::{delete_fragment, insert_break};
use crate::{ComposerModel, ComposerUpdate};

impl ComposerModel {
    /// Type `text` over the selection. Plugins get the first look at it.
    pub fn replace_text(&mut self, text: &str) -> ComposerUpdate {
        let transition = self.plugins.insert_text(&self.state, text);
        self.apply(transition)
    }

    pub fn enter(&mut self) -> ComposerUpdate {
        let next = insert_break(&self.state);
        self.apply_state(next)
    }

    pub fn delete_selection(&mut self) -> ComposerUpdate {
        let next = delete_fragment(&self.state);
        self.apply_state(next)
    }
}

#[cfg(test)]
mod test {
    use speculoos::prelude::*;

    use super::*;
    use crate::dom::{Point, Selection};
    use crate::ComposerConfig;

    #[test]
    fn typing_and_splitting_paragraphs() {
        let mut model = ComposerModel::new();
        model.replace_text("ab");
        model.enter();
        model.replace_text("cd");
        assert_eq!(model.get_content_as_html(), "<p>ab</p><p>cd</p>");
        assert_that!(model.selection()).is_equal_to(Some(&Selection::caret(vec![1, 0], 2)));
    }

    #[test]
    fn typing_a_url_links_it() {
        let mut model = ComposerModel::new();
        model.replace_text("https://matrix.org");
        assert_eq!(
            model.get_content_as_html(),
            r#"<p><a href="https://matrix.org">https://matrix.org</a></p>"#
        );
    }

    #[test]
    fn deleting_across_blocks_merges_them() {
        let mut model =
            ComposerModel::from_html("<p>abc</p><p>def</p>", ComposerConfig::default()).unwrap();
        model.select(Selection::new(Point::at(vec![0, 0], 1), Point::at(vec![1, 0], 2)));
        let update = model.delete_selection();
        assert!(update.replaces_document());
        assert_eq!(model.get_content_as_html(), "<p>af</p>");
    }

    #[test]
    fn deleting_a_collapsed_selection_changes_nothing() {
        let mut model = ComposerModel::from_html("<p>abc</p>", ComposerConfig::default()).unwrap();
        let update = model.delete_selection();
        assert!(!update.replaces_document());
    }
}
