// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::ElementKind;
use crate::transforms::{active_link_url, insert_link, unwrap_link};
use crate::{ComposerModel, ComposerUpdate, LinkAction};

impl ComposerModel {
    /// Link the selection to `url`, or insert `url` as a linked text at the
    /// caret.
    pub fn set_link(&mut self, url: &str) -> ComposerUpdate {
        let next = insert_link(&self.state, url);
        self.apply_state(next)
    }

    pub fn remove_links(&mut self) -> ComposerUpdate {
        let next = unwrap_link(&self.state);
        self.apply_state(next)
    }

    /// What a link button would do for the current selection.
    pub fn get_link_action(&self) -> LinkAction {
        let Some(selection) = self.state.valid_selection() else {
            return LinkAction::Disabled;
        };
        let document = &self.state.document;
        let in_mention = document
            .void_ancestor(&selection.focus.path)
            .and_then(|handle| document.lookup_element(&handle))
            .is_some_and(|element| element.kind() == ElementKind::Mention);
        if in_mention {
            return LinkAction::Disabled;
        }
        if let Some(url) = active_link_url(&self.state) {
            return LinkAction::Edit(url);
        }
        if selection.is_collapsed() {
            LinkAction::CreateWithText
        } else {
            LinkAction::Create
        }
    }
}

#[cfg(test)]
mod test {
    use speculoos::prelude::*;

    use super::*;
    use crate::dom::{Point, Selection};
    use crate::ComposerConfig;

    fn model(html: &str) -> ComposerModel {
        ComposerModel::from_html(html, ComposerConfig::default()).unwrap()
    }

    #[test]
    fn link_action_follows_the_selection() {
        let mut model = model(r#"<p>ab<a href="https://x.org">cd</a></p>"#);
        assert_that!(model.get_link_action()).is_equal_to(LinkAction::CreateWithText);

        model.select(Selection::new(Point::at(vec![0, 0], 0), Point::at(vec![0, 0], 1)));
        assert_that!(model.get_link_action()).is_equal_to(LinkAction::Create);

        model.select(Selection::caret(vec![0, 1, 0], 1));
        assert_that!(model.get_link_action())
            .is_equal_to(LinkAction::Edit("https://x.org".to_owned()));
    }

    #[test]
    fn link_action_is_disabled_inside_a_mention() {
        let mut model = model("<p>a</p>");
        model.insert_mention("bob");
        model.select(Selection::caret(vec![0, 1, 0], 0));
        assert_that!(model.get_link_action()).is_equal_to(LinkAction::Disabled);
    }

    #[test]
    fn set_and_remove_links() {
        let mut model = model("<p>abc</p>");
        model.select(Selection::new(Point::at(vec![0, 0], 0), Point::at(vec![0, 0], 3)));
        model.set_link("https://matrix.org");
        assert_eq!(
            model.get_content_as_html(),
            r#"<p><a href="https://matrix.org">abc</a></p>"#
        );
        model.remove_links();
        assert_eq!(model.get_content_as_html(), "<p>abc</p>");
    }
}
