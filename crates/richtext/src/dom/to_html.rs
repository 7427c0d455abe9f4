// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Rendering a document to markup the HTML deserializer reads back into an
//! equivalent document.

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::element_kind::ElementKind;
use super::nodes::{ElementNode, Node, TextRun};
use super::Document;

#[derive(Clone, Copy, Debug, Default)]
pub struct ToHtmlState {
    /// Newlines inside a code block are kept as they are instead of being
    /// written as line breaks.
    pub in_code_block: bool,
}

pub trait ToHtml {
    fn fmt_html(&self, buf: &mut String, state: &mut ToHtmlState);

    fn to_html(&self) -> String {
        let mut buf = String::new();
        self.fmt_html(&mut buf, &mut ToHtmlState::default());
        buf
    }
}

impl ToHtml for Document {
    fn fmt_html(&self, buf: &mut String, state: &mut ToHtmlState) {
        self.children().fmt_html(buf, state)
    }
}

/// Neighbouring runs that share their outer marks are written inside one
/// pair of tags, so `<strong>a<em>b</em></strong>` comes back out as it went
/// in.
impl ToHtml for [Node] {
    fn fmt_html(&self, buf: &mut String, state: &mut ToHtmlState) {
        let mut open: Vec<&'static str> = Vec::new();
        for node in self {
            match node {
                Node::Text(run) if run.is_empty() => {}
                Node::Text(run) => {
                    let tags: Vec<&'static str> =
                        run.marks.active().map(|mark| mark.tag()).collect();
                    let shared = open
                        .iter()
                        .zip(&tags)
                        .take_while(|(have, want)| have == want)
                        .count();
                    close_tags(buf, &mut open, shared);
                    for tag in &tags[shared..] {
                        open_tag(buf, tag);
                        open.push(tag);
                    }
                    run.write_text(buf, state);
                }
                Node::Element(element) => {
                    close_tags(buf, &mut open, 0);
                    element.fmt_html(buf, state);
                }
            }
        }
        close_tags(buf, &mut open, 0);
    }
}

impl ToHtml for Node {
    fn fmt_html(&self, buf: &mut String, state: &mut ToHtmlState) {
        match self {
            Node::Element(element) => element.fmt_html(buf, state),
            Node::Text(text) => text.fmt_html(buf, state),
        }
    }
}

impl ToHtml for TextRun {
    fn fmt_html(&self, buf: &mut String, state: &mut ToHtmlState) {
        if self.is_empty() {
            return;
        }
        let mut open: Vec<&'static str> = Vec::new();
        for tag in self.marks.active().map(|mark| mark.tag()) {
            open_tag(buf, tag);
            open.push(tag);
        }
        self.write_text(buf, state);
        close_tags(buf, &mut open, 0);
    }
}

impl TextRun {
    fn write_text(&self, buf: &mut String, state: &ToHtmlState) {
        if state.in_code_block {
            buf.push_str(&encode_text(&self.text));
            return;
        }
        for (index, line) in self.text.split('\n').enumerate() {
            if index > 0 {
                buf.push_str("<br />");
            }
            buf.push_str(&encode_text(line));
        }
    }
}

fn open_tag(buf: &mut String, tag: &str) {
    buf.push('<');
    buf.push_str(tag);
    buf.push('>');
}

/// Close open mark tags, innermost first, until `keep` remain.
fn close_tags(buf: &mut String, open: &mut Vec<&'static str>, keep: usize) {
    while open.len() > keep {
        let Some(tag) = open.pop() else {
            break;
        };
        buf.push_str("</");
        buf.push_str(tag);
        buf.push('>');
    }
}

impl ToHtml for ElementNode {
    fn fmt_html(&self, buf: &mut String, state: &mut ToHtmlState) {
        match self.kind() {
            ElementKind::Image => {
                buf.push_str("<img src=\"");
                buf.push_str(&encode_double_quoted_attribute(
                    self.url().unwrap_or_default(),
                ));
                buf.push_str("\" />");
            }
            ElementKind::Mention => {
                let character = self.character().unwrap_or_default();
                buf.push_str("<span data-type=\"mention\" data-character=\"");
                buf.push_str(&encode_double_quoted_attribute(character));
                buf.push_str("\">@");
                buf.push_str(&encode_text(character));
                buf.push_str("</span>");
            }
            ElementKind::Link => {
                buf.push_str("<a href=\"");
                buf.push_str(&encode_double_quoted_attribute(
                    self.url().unwrap_or_default(),
                ));
                buf.push_str("\">");
                self.children().fmt_html(buf, state);
                buf.push_str("</a>");
            }
            ElementKind::CodeBlock => {
                open_block(buf, "pre", self);
                buf.push_str("<code>");
                let was_in_code_block = state.in_code_block;
                state.in_code_block = true;
                self.children().fmt_html(buf, state);
                state.in_code_block = was_in_code_block;
                buf.push_str("</code></pre>");
            }
            kind => {
                let tag = block_tag(kind);
                open_block(buf, tag, self);
                self.children().fmt_html(buf, state);
                buf.push_str("</");
                buf.push_str(tag);
                buf.push('>');
            }
        }
    }
}

fn block_tag(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::HeadingOne => "h1",
        ElementKind::HeadingTwo => "h2",
        ElementKind::HeadingThree => "h3",
        ElementKind::HeadingFour => "h4",
        ElementKind::HeadingFive => "h5",
        ElementKind::HeadingSix => "h6",
        ElementKind::BlockQuote => "blockquote",
        ElementKind::CodeBlock => "pre",
        ElementKind::NumberedList => "ol",
        ElementKind::BulletedList => "ul",
        ElementKind::ListItem => "li",
        ElementKind::Link => "a",
        ElementKind::Image => "img",
        ElementKind::Mention => "span",
        ElementKind::Paragraph => "p",
    }
}

fn open_block(buf: &mut String, tag: &str, element: &ElementNode) {
    buf.push('<');
    buf.push_str(tag);
    if let Some(align) = element.align() {
        buf.push_str(" style=\"text-align:");
        buf.push_str(align.as_ref());
        buf.push_str(";\"");
    }
    buf.push('>');
}

#[cfg(test)]
mod test {
    use speculoos::prelude::*;

    use super::*;
    use crate::dom::nodes::MarkSet;
    use crate::dom::Alignment;
    use crate::InlineFormatType;

    fn tx(text: &str) -> Node {
        Node::text(text)
    }

    #[test]
    fn marks_nest_in_a_fixed_order() {
        let run = TextRun::with_marks(
            "x",
            MarkSet::default()
                .with(InlineFormatType::StrikeThrough)
                .with(InlineFormatType::Bold)
                .with(InlineFormatType::Italic),
        );
        assert_that!(run.to_html())
            .is_equal_to(String::from("<strong><em><del>x</del></em></strong>"));
    }

    #[test]
    fn shared_outer_marks_stay_open_across_runs() {
        let bold = MarkSet::default().with(InlineFormatType::Bold);
        let paragraph = ElementNode::new_paragraph(vec![
            tx("X"),
            TextRun::with_marks("Y", bold).into(),
            TextRun::with_marks("ZZ", bold.with(InlineFormatType::Italic)).into(),
            TextRun::with_marks("0", bold).into(),
            tx("1"),
        ]);
        assert_that!(paragraph.to_html()).is_equal_to(String::from(
            "<p>X<strong>Y<em>ZZ</em>0</strong>1</p>",
        ));
    }

    #[test]
    fn marks_close_around_inline_elements() {
        let bold = MarkSet::default().with(InlineFormatType::Bold);
        let paragraph = ElementNode::new_paragraph(vec![
            TextRun::with_marks("a", bold).into(),
            ElementNode::new_link("https://x.org", vec![TextRun::with_marks("b", bold).into()])
                .into(),
            TextRun::with_marks("c", bold).into(),
        ]);
        assert_that!(paragraph.to_html()).is_equal_to(String::from(
            "<p><strong>a</strong><a href=\"https://x.org\"><strong>b</strong></a><strong>c</strong></p>",
        ));
    }

    #[test]
    fn paragraphs_carry_alignment_and_line_breaks() {
        let paragraph = ElementNode::new_paragraph(vec![tx("a\nb")])
            .with_align(Alignment::Right);
        assert_that!(paragraph.to_html()).is_equal_to(String::from(
            "<p style=\"text-align:right;\">a<br />b</p>",
        ));
    }

    #[test]
    fn code_blocks_keep_newlines() {
        let code = ElementNode::new_code_block(vec![tx("fn a() {\n}")]);
        assert_that!(code.to_html())
            .is_equal_to(String::from("<pre><code>fn a() {\n}</code></pre>"));
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let doc = Document::from_blocks(vec![ElementNode::new_paragraph(vec![
            tx("1 < 2 & "),
            ElementNode::new_link("https://a.b/?q=\"x\"&y", vec![tx("l")]).into(),
            tx(""),
        ])]);
        assert_that!(doc.to_html()).is_equal_to(String::from(
            "<p>1 &lt; 2 &amp; <a href=\"https://a.b/?q=&quot;x&quot;&amp;y\">l</a></p>",
        ));
    }

    #[test]
    fn voids_render_without_their_empty_run() {
        let doc = Document::from_blocks(vec![
            ElementNode::new_paragraph(vec![
                tx("Hi "),
                ElementNode::new_mention("thaokv").into(),
                tx(""),
            ]),
            ElementNode::new_image("https://x.y/cat.png"),
            ElementNode::new_list(
                ElementKind::BulletedList,
                vec![ElementNode::new_list_item(vec![tx("one")]).into()],
            ),
        ]);
        assert_that!(doc.to_html()).is_equal_to(String::from(concat!(
            "<p>Hi <span data-type=\"mention\" data-character=\"thaokv\">@thaokv</span></p>",
            "<img src=\"https://x.y/cat.png\" />",
            "<ul><li>one</li></ul>",
        )));
    }
}
