// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use indoc::indoc;
use richtext::{
    parse_html, ActionState, ClipboardData, ComposerAction, ComposerConfig,
    ComposerModel, DeserializeOptions, Document, DocumentUpdate, FileStore,
    KeyValueStore, LinkAction, MemoryStore, Point, Selection, ToHtml,
    UserNotice, UserRecord,
};
use speculoos::prelude::*;
use user_mentions::{DebouncedSearch, MentionPicker, StaticDirectory};

fn model(html: &str) -> ComposerModel {
    ComposerModel::from_html(html, ComposerConfig::default()).unwrap()
}

fn select(model: &mut ComposerModel, anchor: (Vec<usize>, usize), focus: (Vec<usize>, usize)) {
    model.select(Selection::new(
        Point::at(anchor.0, anchor.1),
        Point::at(focus.0, focus.1),
    ));
}

#[test]
fn can_instantiate_a_model_and_call_methods() {
    let mut model = ComposerModel::new();
    model.replace_text("foo");
    select(&mut model, (vec![0, 0], 1), (vec![0, 0], 2));

    let update = model.bold();

    let DocumentUpdate::ReplaceAll { document, selection } = update.document_update else {
        panic!("Expected to receive a ReplaceAll response");
    };
    assert_eq!(document.to_html(), "<p>f<strong>o</strong>o</p>");
    assert_that!(selection)
        .is_equal_to(Some(Selection::new(Point::at(vec![0, 1], 0), Point::at(vec![0, 1], 1))));
}

#[test]
fn bolding_twice_restores_plain_text() {
    let mut model = model("<p>ab</p>");
    select(&mut model, (vec![0, 0], 0), (vec![0, 0], 2));
    model.bold();
    assert_eq!(
        model.to_tree(),
        indoc! {r#"
            document
            └>paragraph
              └>"ab" [bold]
        "#}
    );
    model.bold();
    assert_eq!(model.get_content_as_html(), "<p>ab</p>");
}

#[test]
fn a_collapsed_link_is_its_own_url() {
    let mut model = model("<p>see </p>");
    model.set_link("https://example.com");
    assert_eq!(
        model.get_content_as_html(),
        r#"<p>see <a href="https://example.com">https://example.com</a></p>"#
    );
    assert_that!(model.get_link_action()).is_equal_to(LinkAction::CreateWithText);

    model.replace_text("!");
    assert_eq!(model.get_content_as_plain_text(), "see https://example.com!");
}

#[test]
fn html_survives_a_round_trip() {
    let html = indoc! {r#"
        <h1>Title</h1>
        <p style="text-align:center;">Some <strong>bold</strong> and <em>italic</em></p>
        <ul><li>one</li><li>two</li></ul>
        <blockquote>quoted <a href="https://matrix.org">link</a></blockquote>
        <img src="https://x.org/cat.png" />
        <p>Hi <span data-type="mention" data-character="bob">@bob</span></p>
    "#};
    let first = model(html);
    let second = model(&first.get_content_as_html());
    assert_that!(second.document()).is_equal_to(first.document());
    assert!(first.document().check_invariants().is_ok());
}

#[test]
fn editing_a_document_keeps_it_valid() {
    let mut model = ComposerModel::new();
    model.replace_text("Shopping");
    model.enter();
    model.unordered_list();
    model.replace_text("eggs");
    model.enter();
    model.replace_text("milk");
    model.insert_mention("alice");
    assert!(model.document().check_invariants().is_ok());

    assert_eq!(
        model.get_content_as_html(),
        concat!(
            "<p>Shopping</p>",
            "<ul><li>eggs</li><li>milk<span data-type=\"mention\" data-character=\"alice\">@alice</span></li></ul>",
        )
    );
}

#[test]
fn rejected_images_leave_the_document_alone() {
    let mut model = model("<p>a</p>");
    let before = model.document().clone();
    let update = model.insert_image("https://x.org/readme.txt");
    assert_that!(update.notice).is_equal_to(Some(UserNotice::NotAnImageUrl {
        url: "https://x.org/readme.txt".to_owned(),
    }));
    assert_that!(model.document()).is_equal_to(&before);
    let states = model.action_states();
    assert_that!(states.get(&ComposerAction::Undo)).is_equal_to(Some(&ActionState::Disabled));
}

#[test]
fn pasted_html_goes_through_the_import() {
    let mut model = model("<p>ab</p>");
    select(&mut model, (vec![0, 0], 1), (vec![0, 0], 1));
    model.insert_data(&ClipboardData::html("<p>x</p><p>y</p>", "x\ny"));
    assert_eq!(model.get_content_as_html(), "<p>a</p><p>x</p><p>y</p><p>b</p>");
}

#[test]
fn documents_are_saved_after_every_change() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    let mut model = ComposerModel::restore_from_store(
        Box::new(store),
        Document::default(),
        ComposerConfig::default(),
    );
    model.replace_text("remember me");
    model.bold();

    let reopened = FileStore::open(dir.path()).unwrap();
    assert_that!(reopened.get("content").unwrap()).is_some();
    let restored = ComposerModel::restore_from_store(
        Box::new(reopened),
        Document::default(),
        ComposerConfig::default(),
    );
    assert_eq!(restored.get_content_as_plain_text(), "remember me");
    assert_that!(restored.document()).is_equal_to(model.document());
}

#[test]
fn the_storage_key_comes_from_the_config() {
    let config = ComposerConfig::from_json(r#"{"storage-key": "draft"}"#).unwrap();
    let mut model =
        ComposerModel::restore_from_store(Box::new(MemoryStore::new()), Document::default(), config);
    model.replace_text("x");
    assert_eq!(model.config().storage_key, "draft");
}

#[test]
fn parsed_fragments_can_be_inspected() {
    let nodes = parse_html("<b>a</b>b", &DeserializeOptions::default()).unwrap();
    assert_that!(nodes).has_length(2);
}

#[test]
fn picking_a_user_from_the_directory() {
    let directory = StaticDirectory::new(vec![
        UserRecord::new("@alice:matrix.org", "Alice"),
        UserRecord::new("@alfred:matrix.org", "Alfred"),
    ]);
    let mut model = ComposerModel::new();
    model.replace_text("Hello @al");
    let trigger = model.mention_trigger().unwrap();

    let now = std::time::Instant::now();
    let mut search = DebouncedSearch::new(std::time::Duration::ZERO);
    search.query(&trigger.search, now);
    assert!(search.run_due(now, &directory));

    let mut picker = MentionPicker::new();
    picker.next(search.suggestions().len());
    let user = picker.selected(search.suggestions()).unwrap();
    model.insert_mention_at_trigger(&trigger, user.mention_name());

    assert_eq!(model.get_content_as_plain_text(), "Hello @Alfred");
}
