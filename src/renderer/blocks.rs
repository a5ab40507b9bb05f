//! Format-neutral layout blocks.
//!
//! Every back end walks the same block list, and every run of text in it
//! has already been through [`scan_styled_spans`], so red styling is
//! identical across PDF, DOCX and HTML.

use crate::document::{Alignment, DocumentModel, Element, Formatting, Section, TextPart};
use crate::renderer::styles::*;
use crate::styled::scan_styled_spans;

/// A styled run of text. May contain `\n` line breaks.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub red: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub size: f32,
    pub alignment: Alignment,
    pub space_before: f32,
    pub space_after: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    /// A bold label next to its value.
    InfoRow { label: Vec<Run>, value: Vec<Run> },
    Spacer(f32),
    PageBreak,
}

#[derive(Debug, Clone, Copy, Default)]
struct Style {
    bold: bool,
    italic: bool,
    red: bool,
}

const PLAIN: Style = Style { bold: false, italic: false, red: false };
const BOLD: Style = Style { bold: true, italic: false, red: false };

/// Splits `text` on `{red}` spans into runs with the base style applied.
fn runs(text: &str, style: Style) -> Vec<Run> {
    scan_styled_spans(text)
        .into_iter()
        .map(|segment| Run {
            text: segment.text,
            bold: style.bold,
            italic: style.italic,
            red: style.red || segment.red,
        })
        .collect()
}

fn style_of(formatting: &[Formatting]) -> Style {
    Style {
        bold: formatting.contains(&Formatting::Bold),
        italic: formatting.contains(&Formatting::Italic),
        red: false,
    }
}

fn paragraph(runs: Vec<Run>, size: f32, alignment: Alignment, before: f32, after: f32) -> Block {
    Block::Paragraph(Paragraph {
        runs,
        size,
        alignment,
        space_before: before,
        space_after: after,
    })
}

fn body(runs: Vec<Run>) -> Block {
    paragraph(runs, BODY, Alignment::Left, 0.0, AFTER_PARAGRAPH)
}

fn labelled(label: &str, text: &str, label_style: Style) -> Vec<Run> {
    let mut all = runs(label, label_style);
    all.extend(runs(&format!(" {text}"), PLAIN));
    all
}

fn parts(parts: &[TextPart]) -> Vec<Run> {
    parts
        .iter()
        .flat_map(|part| runs(&part.text, style_of(&part.formatting)))
        .collect()
}

/// Lays out one element.
pub fn element_block(element: &Element) -> Block {
    let red = Style { red: true, ..PLAIN };
    match element {
        Element::EventTitle { text } => {
            paragraph(runs(text, BOLD), EVENT_TITLE, Alignment::Center, 0.0, SPACING_LARGE)
        }
        Element::EventDateTime { text } => {
            paragraph(runs(text, PLAIN), EVENT_DATE_TIME, Alignment::Center, 0.0, SPACING_LARGE)
        }
        Element::SectionTitle { text } => paragraph(
            runs(text, BOLD),
            SECTION_TITLE,
            Alignment::Left,
            SPACING_MEDIUM,
            SPACING_SMALL,
        ),
        Element::ReadingTitle { text } => paragraph(
            runs(text, Style { bold: true, ..red }),
            READING_TITLE,
            Alignment::Left,
            SPACING_MEDIUM,
            SPACING_SMALL,
        ),
        Element::Pericope { text } => paragraph(
            runs(text, Style { bold: true, italic: true, red: true }),
            PERICOPE,
            Alignment::Left,
            0.0,
            SPACING_SMALL,
        ),
        Element::ReaderName { text } => paragraph(
            runs(text, Style { bold: true, ..red }),
            BODY,
            Alignment::Left,
            0.0,
            SPACING_MEDIUM,
        ),
        Element::Introduction { text } | Element::Conclusion { text } => {
            body(runs(text, BOLD))
        }
        Element::ReadingText { text } | Element::PriestDialogue { text } => body(runs(text, PLAIN)),
        Element::Text { text, formatting, alignment } => paragraph(
            runs(text, style_of(formatting)),
            BODY,
            *alignment,
            0.0,
            AFTER_PARAGRAPH,
        ),
        Element::Response { label, text } => paragraph(
            labelled(label, text, BOLD),
            BODY,
            Alignment::Left,
            SPACING_SMALL,
            AFTER_PARAGRAPH,
        ),
        Element::Petition { label, text } => {
            body(labelled(label, text, Style { bold: true, ..red }))
        }
        Element::MultiPartText { parts: p } => body(parts(p)),
        Element::InfoRow { label, value } => Block::InfoRow {
            label: runs(label, BOLD),
            value: runs(value, PLAIN),
        },
        Element::Spacer { size } => Block::Spacer(spacer_height(*size)),
    }
}

/// Lays out one section. A blank section yields no blocks at all.
pub fn section_blocks(section: &Section) -> Vec<Block> {
    if section.is_blank() {
        return Vec::new();
    }
    let heading = section.title.as_deref().map(|title| {
        paragraph(
            runs(title, BOLD),
            SECTION_HEADING,
            Alignment::Center,
            SPACING_MEDIUM,
            SPACING_MEDIUM,
        )
    });
    heading
        .into_iter()
        .chain(section.elements.iter().map(element_block))
        .collect()
}

/// Lays out a whole document, placing page breaks between sections.
///
/// Breaks never lead or trail the document and never repeat.
pub fn document_blocks(document: &DocumentModel) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut pending_break = false;
    for section in document.visible_sections() {
        if (section.page_break_before || pending_break) && !blocks.is_empty() {
            blocks.push(Block::PageBreak);
        }
        blocks.extend(section_blocks(section));
        pending_break = section.page_break_after;
    }
    blocks
}

/// Plain text of a run list, tags already removed.
pub fn plain_text(runs: &[Run]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}
