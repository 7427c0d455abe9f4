// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{PaDom, PaDomCreator, PaDomNode, PaNodeContainer};
use crate::dom::dom_creation_error::HtmlParseError;
use crate::dom::element_kind::{Alignment, ElementKind};
use crate::dom::nodes::{ElementNode, MarkSet, Node, TextRun};
use crate::dom::normalize::normalize_fragment;
use crate::InlineFormatType;

static META_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<meta[^>]*>").expect("valid meta regex"));
static SURROUNDING_INDENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*\n\s*)+|(\s*\n\s*)+$").expect("valid indent regex")
});
static INTERNAL_INDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\n\s*").expect("valid indent regex"));

/// What happens to elements whose tag has no counterpart in the document
/// model.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownTagPolicy {
    /// Keep the content, as if the tag was not there.
    #[default]
    PassThrough,
    /// Leave out the element and everything inside it.
    Drop,
    /// Refuse the whole markup.
    Reject,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeserializeOptions {
    pub unknown_tags: UnknownTagPolicy,
}

/// Parse markup into normalized nodes, ready to be inserted into a
/// document. Inline-only markup gives inline nodes, anything else gives
/// blocks.
pub fn parse_html(
    html: &str,
    options: &DeserializeOptions,
) -> Result<Vec<Node>, HtmlParseError> {
    let html = META_TAG.replace_all(html, "");
    let padom = match PaDomCreator::parse(&html) {
        Ok(padom) => padom,
        Err(error) => {
            debug!(errors = ?error.parse_errors, "Recovered from malformed html");
            error.dom
        }
    };
    let nodes = HtmlDeserializer::new(options).deserialize(&padom)?;
    Ok(normalize_fragment(nodes))
}

pub(crate) struct HtmlDeserializer<'a> {
    options: &'a DeserializeOptions,
    current_path: Vec<ElementKind>,
}

impl<'a> HtmlDeserializer<'a> {
    pub(crate) fn new(options: &'a DeserializeOptions) -> Self {
        Self {
            options,
            current_path: Vec::new(),
        }
    }

    /// Convert a [PaDom] into document nodes, without normalizing them.
    ///
    /// Only nodes reachable from the document are visited, so garbage left
    /// in the arena by the parser never shows up.
    pub(crate) fn deserialize(
        &mut self,
        padom: &PaDom,
    ) -> Result<Vec<Node>, HtmlParseError> {
        let PaDomNode::Document(document) = padom.get_document() else {
            return Err(HtmlParseError::NoDocument);
        };
        let mut nodes = Vec::new();
        self.convert(padom, document, MarkSet::default(), &mut nodes)?;
        Ok(nodes)
    }

    fn in_code_block(&self) -> bool {
        self.current_path.contains(&ElementKind::CodeBlock)
    }

    /// Convert every child of `panode`, appending the results to `out`.
    fn convert(
        &mut self,
        padom: &PaDom,
        panode: &PaNodeContainer,
        marks: MarkSet,
        out: &mut Vec<Node>,
    ) -> Result<(), HtmlParseError> {
        let is_only_child = panode.children.len() == 1;
        for child_handle in &panode.children {
            match padom.get_node(child_handle) {
                PaDomNode::Container(child) => {
                    self.convert_container(padom, child, marks, out)?
                }
                PaDomNode::Text(text) => {
                    self.convert_text(&text.content, marks, is_only_child, out)
                }
                PaDomNode::Document(_) | PaDomNode::Comment => {}
            }
        }
        Ok(())
    }

    fn convert_container(
        &mut self,
        padom: &PaDom,
        child: &PaNodeContainer,
        marks: MarkSet,
        out: &mut Vec<Node>,
    ) -> Result<(), HtmlParseError> {
        let tag = child.tag();
        match tag {
            "br" => out.push(Node::Text(TextRun::with_marks("\n", marks))),
            "html" | "body" => self.convert(padom, child, marks, out)?,
            "b" | "strong" => self.convert(
                padom,
                child,
                marks.with(InlineFormatType::Bold),
                out,
            )?,
            "em" | "i" => self.convert(
                padom,
                child,
                marks.with(InlineFormatType::Italic),
                out,
            )?,
            "u" => self.convert(
                padom,
                child,
                marks.with(InlineFormatType::Underline),
                out,
            )?,
            "s" | "del" | "strike" => self.convert(
                padom,
                child,
                marks.with(InlineFormatType::StrikeThrough),
                out,
            )?,
            "code" => {
                // The `code` inside `pre` is part of the code block markup
                let marks = if self.in_code_block() {
                    marks
                } else {
                    marks.with(InlineFormatType::InlineCode)
                };
                self.convert(padom, child, marks, out)?
            }
            "span" if child.get_attr("data-type") == Some("mention") => {
                let character = child.get_attr("data-character").unwrap_or_default();
                out.push(ElementNode::new_mention(character).into());
            }
            "span" => {
                self.convert(padom, child, span_marks(child, marks), out)?
            }
            "a" => {
                let children =
                    self.convert_element_children(padom, child, ElementKind::Link, marks)?;
                let url = child.get_attr("href").unwrap_or_default();
                out.push(ElementNode::new_link(url, children).into());
            }
            "img" => {
                let url = child.get_attr("src").unwrap_or_default();
                out.push(ElementNode::new_image(url).into());
            }
            "head" | "script" | "style" | "template" | "title" => {
                trace!(tag, "Skipping non-content element");
            }
            _ => match block_kind(tag) {
                Some(kind) => {
                    let children =
                        self.convert_element_children(padom, child, kind, marks)?;
                    let mut element = ElementNode::new(kind, children);
                    element.set_align(alignment(child));
                    out.push(element.into());
                }
                None => self.convert_unknown(padom, child, marks, out)?,
            },
        }
        Ok(())
    }

    fn convert_element_children(
        &mut self,
        padom: &PaDom,
        child: &PaNodeContainer,
        kind: ElementKind,
        marks: MarkSet,
    ) -> Result<Vec<Node>, HtmlParseError> {
        self.current_path.push(kind);
        let mut children = Vec::new();
        let result = self.convert(padom, child, marks, &mut children);
        self.current_path.pop();
        result?;
        if children.is_empty() {
            children.push(Node::Text(TextRun::empty()));
        }
        Ok(children)
    }

    fn convert_unknown(
        &mut self,
        padom: &PaDom,
        child: &PaNodeContainer,
        marks: MarkSet,
        out: &mut Vec<Node>,
    ) -> Result<(), HtmlParseError> {
        match self.options.unknown_tags {
            UnknownTagPolicy::PassThrough => {
                trace!(tag = child.tag(), "Passing through unknown element");
                self.convert(padom, child, marks, out)
            }
            UnknownTagPolicy::Drop => {
                trace!(tag = child.tag(), "Dropping unknown element");
                Ok(())
            }
            UnknownTagPolicy::Reject => {
                Err(HtmlParseError::UnknownTag(child.tag().to_owned()))
            }
        }
    }

    fn convert_text(
        &self,
        text: &str,
        marks: MarkSet,
        is_only_child: bool,
        out: &mut Vec<Node>,
    ) {
        if self.in_code_block() {
            out.push(Node::Text(TextRun::with_marks(text, marks)));
            return;
        }
        if is_only_child && text == "\u{A0}" {
            return;
        }
        let text = SURROUNDING_INDENT.replace_all(text, "");
        let text = INTERNAL_INDENT.replace_all(&text, " ");
        if !text.is_empty() {
            out.push(Node::Text(TextRun::with_marks(text, marks)));
        }
    }
}

fn block_kind(tag: &str) -> Option<ElementKind> {
    match tag {
        "p" => Some(ElementKind::Paragraph),
        "blockquote" => Some(ElementKind::BlockQuote),
        "pre" => Some(ElementKind::CodeBlock),
        "ol" => Some(ElementKind::NumberedList),
        "ul" => Some(ElementKind::BulletedList),
        "li" => Some(ElementKind::ListItem),
        _ => tag
            .strip_prefix('h')
            .and_then(|level| level.parse::<u8>().ok())
            .and_then(ElementKind::from_heading_level),
    }
}

fn alignment(element: &PaNodeContainer) -> Option<Alignment> {
    element
        .style_value("text-align")
        .and_then(|value| Alignment::from_str(&value).ok())
}

/// Marks declared through the inline style of a `span`, as word processors
/// write them.
fn span_marks(span: &PaNodeContainer, mut marks: MarkSet) -> MarkSet {
    if span.contains_style("font-weight", "bold")
        || span.contains_style("font-weight", "700")
    {
        marks.set(&InlineFormatType::Bold, true);
    }
    if span.contains_style("font-style", "italic") {
        marks.set(&InlineFormatType::Italic, true);
    }
    if span.contains_style("text-decoration", "underline") {
        marks.set(&InlineFormatType::Underline, true);
    }
    if span.contains_style("text-decoration", "line-through") {
        marks.set(&InlineFormatType::StrikeThrough, true);
    }
    marks
}

#[cfg(test)]
mod test {
    use indoc::indoc;
    use speculoos::prelude::*;
    use speculoos::{AssertionFailure, Spec};

    use super::*;
    use crate::dom::normalize::normalize_document;
    use crate::dom::{Document, ToHtml, ToTree};

    fn parse_document(html: &str) -> Document {
        let nodes = parse_html(html, &DeserializeOptions::default()).unwrap();
        let mut document = Document::new(nodes);
        normalize_document(&mut document);
        document.assert_invariants();
        document
    }

    trait Roundtrips<T> {
        fn roundtrips(&self);
    }

    impl<'s, T> Roundtrips<T> for Spec<'s, T>
    where
        T: AsRef<str>,
    {
        fn roundtrips(&self) {
            let subject = self.subject.as_ref();
            let output = parse_document(subject).to_html();
            if output != subject {
                AssertionFailure::from_spec(self)
                    .with_expected(String::from(subject))
                    .with_actual(output)
                    .fail();
            }
        }
    }

    #[test]
    fn parse_paragraphs() {
        assert_that!("<p>foo</p><p>A paragraph</p><p>bar</p>").roundtrips();
    }

    #[test]
    fn parse_formatting() {
        assert_that!("<p><strong>sdfds</strong></p>").roundtrips();
        assert_that!("<p>before <strong> within </strong> after</p>")
            .roundtrips();
        assert_that!("<p>X<strong>Y<em>ZZ</em>0</strong>1</p>").roundtrips();
    }

    #[test]
    fn parse_links_mentions_and_images() {
        assert_that!(r#"<p><a href="http://example.com"><strong>ZZ</strong></a></p>"#)
            .roundtrips();
        assert_that!(r#"<p>Hi <span data-type="mention" data-character="bob">@bob</span></p>"#)
            .roundtrips();
        assert_that!(r#"<p>a</p><img src="https://x.y/cat.png" /><p></p>"#)
            .roundtrips();
    }

    #[test]
    fn parse_blocks() {
        assert_that!("<h2>Title</h2><blockquote>A quote</blockquote>").roundtrips();
        assert_that!("<blockquote><p>A quote</p></blockquote>").roundtrips();
        assert_that!("<ol><li>one</li><li>two</li></ol><ul><li>three</li></ul>")
            .roundtrips();
        assert_that!("<p>foo</p><pre><code>Some\ncode</code></pre><p>bar</p>")
            .roundtrips();
        assert_that!(r#"<h1 style="text-align:center;">a</h1>"#).roundtrips();
    }

    #[test]
    fn parse_line_breaks() {
        assert_that!("<p>a<br />b</p>").roundtrips();
        assert_that!("<p><strong>a<br />b</strong></p>").roundtrips();
    }

    #[test]
    fn inline_markup_is_wrapped_in_a_paragraph() {
        assert_that!(parse_document("some <i>text</i>").to_html())
            .is_equal_to(String::from("<p>some <em>text</em></p>"));
    }

    #[test]
    fn inner_code_of_a_pre_is_not_a_mark() {
        let document = parse_document("<pre><code><b>Test\nCode</b></code></pre>");
        assert_that!(document.to_tree()).is_equal_to(String::from(indoc! {r#"
            document
            └>code-block
              └>"Test\nCode" [bold]
        "#}));
    }

    #[test]
    fn spans_carry_marks_through_their_style() {
        let html = r#"<span style="font-weight:700;">b</span><span style="font-style: italic; text-decoration: underline">iu</span>"#;
        assert_that!(parse_document(html).to_html()).is_equal_to(String::from(
            "<p><strong>b</strong><em><u>iu</u></em></p>",
        ));
    }

    #[test]
    fn indentation_between_blocks_is_dropped() {
        let html = indoc! {"
            <ul>
                <li>one</li>
                <li>two
                    halves</li>
            </ul>
        "};
        assert_that!(parse_document(html).to_html()).is_equal_to(String::from(
            "<ul><li>one</li><li>two halves</li></ul>",
        ));
    }

    #[test]
    fn meta_tags_and_comments_are_stripped() {
        let html = r#"<meta charset="utf-8"><!--StartFragment--><b>x</b><!--EndFragment-->"#;
        assert_that!(parse_document(html).to_html())
            .is_equal_to(String::from("<p><strong>x</strong></p>"));
    }

    #[test]
    fn a_lone_nbsp_paragraph_is_empty() {
        assert_that!(parse_document("<p>&nbsp;</p>").to_html())
            .is_equal_to(String::from("<p></p>"));
    }

    #[test]
    fn unknown_tags_pass_through_by_default() {
        assert_that!(parse_document("<div><font>kept</font></div>").to_html())
            .is_equal_to(String::from("<p>kept</p>"));
    }

    #[test]
    fn unknown_tags_can_be_dropped_or_rejected() {
        let drop = DeserializeOptions {
            unknown_tags: UnknownTagPolicy::Drop,
        };
        let nodes = parse_html("<p>a<font>gone</font></p>", &drop).unwrap();
        assert_that!(nodes).is_equal_to(vec![
            ElementNode::new_paragraph(vec![Node::text("a")]).into(),
        ]);

        let reject = DeserializeOptions {
            unknown_tags: UnknownTagPolicy::Reject,
        };
        assert_that!(parse_html("<p><font>x</font></p>", &reject))
            .is_equal_to(Err(HtmlParseError::UnknownTag(String::from("font"))));
    }

    #[test]
    fn empty_elements_get_an_empty_run() {
        let padom = match PaDomCreator::parse("<p></p><a href=\"u\"></a>") {
            Ok(padom) => padom,
            Err(error) => error.dom,
        };
        let nodes = HtmlDeserializer::new(&DeserializeOptions::default())
            .deserialize(&padom)
            .unwrap();
        assert_that!(nodes).is_equal_to(vec![
            ElementNode::new_paragraph(vec![Node::text("")]).into(),
            ElementNode::new_link("u", vec![Node::text("")]).into(),
        ]);
    }
}
