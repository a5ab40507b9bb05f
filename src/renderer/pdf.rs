//! PDF back end.
//!
//! Layout happens in two steps: blocks are wrapped and positioned onto pages
//! as [`PlacedText`], then each page becomes one lopdf content stream using
//! the base-14 Helvetica family.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::config::PageSettings;
use crate::document::{Alignment, DocumentModel};
use crate::error::{Error, Result};
use crate::renderer::blocks::{document_blocks, Block, Paragraph, Run};
use crate::renderer::styles::{BODY, LINE_HEIGHT, RED_RGB};
use crate::renderer::{DocumentRenderer, OutputFormat};

/// Share of the content width given to info row labels.
const LABEL_COLUMN: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl Font {
    const ALL: [Font; 4] = [Font::Regular, Font::Bold, Font::Italic, Font::BoldItalic];

    fn of(run: &Run) -> Self {
        match (run.bold, run.italic) {
            (false, false) => Font::Regular,
            (true, false) => Font::Bold,
            (false, true) => Font::Italic,
            (true, true) => Font::BoldItalic,
        }
    }

    fn key(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Italic => "F3",
            Font::BoldItalic => "F4",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Italic => "Helvetica-Oblique",
            Font::BoldItalic => "Helvetica-BoldOblique",
        }
    }

    fn is_bold(self) -> bool {
        matches!(self, Font::Bold | Font::BoldItalic)
    }
}

/// A run of text positioned on a page, baseline origin in PDF coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub font: Font,
    pub red: bool,
    pub text: String,
}

pub type Page = Vec<PlacedText>;

/// Approximate Helvetica advance width in em units.
fn char_width(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '\'' | '|' | '.' | ',' | ':' | ';' | '!' => 0.24,
        ' ' | 'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' => 0.32,
        'm' | 'w' | 'M' | 'W' | '@' => 0.86,
        'A'..='Z' => 0.68,
        _ => 0.54,
    }
}

fn text_width(text: &str, size: f32, font: Font) -> f32 {
    let factor = if font.is_bold() { 1.06 } else { 1.0 };
    text.chars().map(char_width).sum::<f32>() * size * factor
}

/// Encodes text for a WinAnsiEncoding font. Unmappable characters become `?`.
fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '€' => 0x80,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            c if (c as u32) <= 0xff => c as u8,
            _ => b'?',
        })
        .collect()
}

#[derive(Debug)]
struct Piece {
    text: String,
    font: Font,
    red: bool,
}

#[derive(Debug, Default)]
struct Line {
    pieces: Vec<Piece>,
    width: f32,
}

impl Line {
    fn push(&mut self, text: &str, font: Font, red: bool, size: f32) {
        self.width += text_width(text, size, font);
        match self.pieces.last_mut() {
            Some(last) if last.font == font && last.red == red => last.text.push_str(text),
            _ => self.pieces.push(Piece { text: text.to_string(), font, red }),
        }
    }

    fn finish(mut self, size: f32) -> Self {
        if let Some(last) = self.pieces.last_mut() {
            let trimmed = last.text.trim_end().len();
            let trailing: String = last.text[trimmed..].to_string();
            self.width -= text_width(&trailing, size, last.font);
            last.text.truncate(trimmed);
        }
        self.pieces.retain(|p| !p.text.is_empty());
        self
    }
}

/// Greedy word wrap of styled runs into lines no wider than `max_width`.
fn wrap(runs: &[Run], size: f32, max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::default();

    for run in runs {
        let font = Font::of(run);
        for (index, segment) in run.text.split('\n').enumerate() {
            if index > 0 {
                lines.push(std::mem::take(&mut line).finish(size));
            }
            for word in segment.split_inclusive(' ') {
                let word_width = text_width(word.trim_end(), size, font);
                if !line.pieces.is_empty() && line.width + word_width > max_width {
                    lines.push(std::mem::take(&mut line).finish(size));
                }
                let word = if line.pieces.is_empty() { word.trim_start() } else { word };
                if !word.is_empty() {
                    line.push(word, font, run.red, size);
                }
            }
        }
    }
    if !line.pieces.is_empty() || lines.is_empty() {
        lines.push(line.finish(size));
    }
    lines
}

struct Layout<'a> {
    page: &'a PageSettings,
    pages: Vec<Page>,
    current: Page,
    y: f32,
}

impl<'a> Layout<'a> {
    fn new(page: &'a PageSettings) -> Self {
        Self {
            page,
            pages: Vec::new(),
            current: Vec::new(),
            y: page.height - page.margin,
        }
    }

    fn top(&self) -> f32 {
        self.page.height - self.page.margin
    }

    fn content_width(&self) -> f32 {
        self.page.width - 2.0 * self.page.margin
    }

    /// Starts a fresh page. An empty current page is reused, never emitted.
    fn break_page(&mut self) {
        if !self.current.is_empty() {
            self.pages.push(std::mem::take(&mut self.current));
        }
        self.y = self.top();
    }

    /// Moves to a new page when `height` does not fit below the cursor.
    fn reserve(&mut self, height: f32) {
        if self.y - height < self.page.margin && !self.current.is_empty() {
            self.break_page();
        }
    }

    fn advance(&mut self, amount: f32) {
        if self.y < self.top() {
            self.y -= amount;
        }
    }

    fn place_line(&mut self, line: &Line, x: f32, size: f32) {
        let mut x = x;
        for piece in &line.pieces {
            self.current.push(PlacedText {
                x,
                y: self.y,
                size,
                font: piece.font,
                red: piece.red,
                text: piece.text.clone(),
            });
            x += text_width(&piece.text, size, piece.font);
        }
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        self.advance(paragraph.space_before);
        let width = self.content_width();
        let line_height = paragraph.size * LINE_HEIGHT;
        for line in wrap(&paragraph.runs, paragraph.size, width) {
            self.reserve(line_height);
            self.y -= line_height;
            let offset = match paragraph.alignment {
                Alignment::Center => (width - line.width).max(0.0) / 2.0,
                Alignment::Right => (width - line.width).max(0.0),
                Alignment::Left | Alignment::Justify => 0.0,
            };
            self.place_line(&line, self.page.margin + offset, paragraph.size);
        }
        self.y -= paragraph.space_after;
    }

    fn info_row(&mut self, label: &[Run], value: &[Run]) {
        let label_width = self.content_width() * LABEL_COLUMN;
        let value_width = self.content_width() - label_width;
        let label_lines = wrap(label, BODY, label_width);
        let value_lines = wrap(value, BODY, value_width);
        let line_height = BODY * LINE_HEIGHT;

        let rows = label_lines.len().max(value_lines.len());
        for row in 0..rows {
            self.reserve(line_height);
            self.y -= line_height;
            if let Some(line) = label_lines.get(row) {
                self.place_line(line, self.page.margin, BODY);
            }
            if let Some(line) = value_lines.get(row) {
                self.place_line(line, self.page.margin + label_width, BODY);
            }
        }
        self.y -= BODY * (LINE_HEIGHT - 1.0);
    }

    fn spacer(&mut self, height: f32) {
        self.y -= height;
        if self.y < self.page.margin {
            self.break_page();
        }
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// PDF renderer backed by lopdf.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    page: PageSettings,
}

impl PdfRenderer {
    pub fn new(page: PageSettings) -> Self {
        Self { page }
    }

    /// Positions every block of `document` onto pages.
    ///
    /// A document without visible content still yields a single empty page.
    pub fn layout(&self, document: &DocumentModel) -> Vec<Page> {
        let mut layout = Layout::new(&self.page);
        for block in document_blocks(document) {
            match block {
                Block::Paragraph(paragraph) => layout.paragraph(&paragraph),
                Block::InfoRow { label, value } => layout.info_row(&label, &value),
                Block::Spacer(height) => layout.spacer(height),
                Block::PageBreak => layout.break_page(),
            }
        }
        layout.finish()
    }

    fn page_content(page: &Page) -> Content {
        let mut operations = Vec::new();
        for text in page {
            let (r, g, b) = if text.red { RED_RGB } else { (0.0, 0.0, 0.0) };
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec![text.font.key().into(), text.size.into()]));
            operations.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
            operations.push(Operation::new("Td", vec![text.x.into(), text.y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(to_win_ansi(&text.text), StringFormat::Literal)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        Content { operations }
    }

    fn fonts(document: &mut Document) -> ObjectId {
        let mut fonts = lopdf::Dictionary::new();
        for font in Font::ALL {
            let id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.key(), id);
        }
        document.add_object(dictionary! { "Font" => fonts })
    }
}

impl DocumentRenderer for PdfRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn render(&self, model: &DocumentModel) -> Result<Vec<u8>> {
        let pages = self.layout(model);

        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = Self::fonts(&mut document);

        let mut page_ids: Vec<Object> = Vec::with_capacity(pages.len());
        for page in &pages {
            let content = Self::page_content(page)
                .encode()
                .map_err(|e| Error::render("PDF", e))?;
            let content_id = document.add_object(Stream::new(dictionary! {}, content));
            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    self.page.width.into(),
                    self.page.height.into(),
                ],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            page_ids.push(page_id.into());
        }

        let count = page_ids.len() as i64;
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => page_ids,
                "Count" => count,
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = document.add_object(dictionary! {
            "Title" => Object::String(to_win_ansi(&model.title), StringFormat::Literal),
            "Producer" => Object::string_literal("ordo"),
        });
        document.trailer.set("Root", catalog_id);
        document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        document
            .save_to(&mut bytes)
            .map_err(|e| Error::render("PDF", e))?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Run {
        Run { text: text.to_string(), bold: false, italic: false, red: false }
    }

    #[test]
    fn test_wrap_breaks_long_text() {
        let text = "The Lord be with you. ".repeat(20);
        let lines = wrap(&[run(&text)], BODY, 200.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.width <= 200.0 + 0.01));
    }

    #[test]
    fn test_wrap_honours_line_breaks() {
        let lines = wrap(&[run("first\nsecond")], BODY, 500.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].pieces[0].text, "second");
    }

    #[test]
    fn test_win_ansi_bullet() {
        assert_eq!(to_win_ansi("• ñ"), vec![0x95, b' ', 0xf1]);
    }
}
