//! DOCX back end: a minimal WordprocessingML package written with `zip`.
//!
//! Consecutive info rows are grouped into one borderless two-column table.

use std::io::{self, Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::PageSettings;
use crate::document::{Alignment, DocumentModel};
use crate::error::{Error, Result};
use crate::renderer::blocks::{document_blocks, Block, Paragraph, Run};
use crate::renderer::styles::{half_points, red_hex, twips, BODY};
use crate::renderer::{DocumentRenderer, OutputFormat};

const FONT: &str = "Helvetica";
const LABEL_COLUMN: f32 = 0.3;

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

type Attrs<'a> = &'a [(&'a str, &'a str)];

/// Word document renderer.
#[derive(Debug, Clone)]
pub struct DocxRenderer {
    page: PageSettings,
}

fn justification(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
        Alignment::Justify => "both",
    }
}

fn open<W: Write>(xml: &mut Writer<W>, name: &str, attrs: Attrs) -> io::Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name).with_attributes(attrs.iter().copied())))
}

fn close<W: Write>(xml: &mut Writer<W>, name: &str) -> io::Result<()> {
    xml.write_event(Event::End(BytesEnd::new(name)))
}

fn empty<W: Write>(xml: &mut Writer<W>, name: &str, attrs: Attrs) -> io::Result<()> {
    xml.write_event(Event::Empty(BytesStart::new(name).with_attributes(attrs.iter().copied())))
}

fn declaration<W: Write>(xml: &mut Writer<W>) -> io::Result<()> {
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
}

fn finish_part(xml: Writer<Vec<u8>>) -> Result<String> {
    String::from_utf8(xml.into_inner()).map_err(|e| Error::render("DOCX", e))
}

fn write_run<W: Write>(xml: &mut Writer<W>, run: &Run, size: f32) -> io::Result<()> {
    open(xml, "w:r", &[])?;
    open(xml, "w:rPr", &[])?;
    empty(xml, "w:rFonts", &[("w:ascii", FONT), ("w:hAnsi", FONT), ("w:cs", FONT)])?;
    if run.bold {
        empty(xml, "w:b", &[])?;
    }
    if run.italic {
        empty(xml, "w:i", &[])?;
    }
    if run.red {
        empty(xml, "w:color", &[("w:val", red_hex())])?;
    }
    empty(xml, "w:sz", &[("w:val", half_points(size).to_string().as_str())])?;
    close(xml, "w:rPr")?;
    for (index, line) in run.text.split('\n').enumerate() {
        if index > 0 {
            empty(xml, "w:br", &[])?;
        }
        open(xml, "w:t", &[("xml:space", "preserve")])?;
        xml.write_event(Event::Text(BytesText::new(line)))?;
        close(xml, "w:t")?;
    }
    close(xml, "w:r")
}

fn write_spacing<W: Write>(xml: &mut Writer<W>, before: u32, after: u32) -> io::Result<()> {
    let (before, after) = (before.to_string(), after.to_string());
    empty(xml, "w:spacing", &[("w:before", before.as_str()), ("w:after", after.as_str())])
}

fn write_paragraph<W: Write>(xml: &mut Writer<W>, paragraph: &Paragraph) -> io::Result<()> {
    open(xml, "w:p", &[])?;
    open(xml, "w:pPr", &[])?;
    write_spacing(xml, twips(paragraph.space_before), twips(paragraph.space_after))?;
    empty(xml, "w:jc", &[("w:val", justification(paragraph.alignment))])?;
    close(xml, "w:pPr")?;
    for run in &paragraph.runs {
        write_run(xml, run, paragraph.size)?;
    }
    close(xml, "w:p")
}

fn write_cell<W: Write>(xml: &mut Writer<W>, runs: &[Run], width: u32) -> io::Result<()> {
    open(xml, "w:tc", &[])?;
    open(xml, "w:tcPr", &[])?;
    empty(xml, "w:tcW", &[("w:w", width.to_string().as_str()), ("w:type", "dxa")])?;
    close(xml, "w:tcPr")?;
    open(xml, "w:p", &[])?;
    open(xml, "w:pPr", &[])?;
    write_spacing(xml, 0, 0)?;
    close(xml, "w:pPr")?;
    for run in runs {
        write_run(xml, run, BODY)?;
    }
    close(xml, "w:p")?;
    close(xml, "w:tc")
}

fn write_borders<W: Write>(xml: &mut Writer<W>) -> io::Result<()> {
    open(xml, "w:tblBorders", &[])?;
    for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        empty(xml, edge, &[("w:val", "nil")])?;
    }
    close(xml, "w:tblBorders")
}

/// Builds the `[Content_Types].xml` part.
fn content_types() -> Result<String> {
    let mut xml = Writer::new(Vec::new());
    let write = |xml: &mut Writer<Vec<u8>>| -> io::Result<()> {
        declaration(xml)?;
        open(xml, "Types", &[("xmlns", TYPES_NS)])?;
        empty(
            xml,
            "Default",
            &[
                ("Extension", "rels"),
                ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
            ],
        )?;
        empty(xml, "Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
        empty(
            xml,
            "Override",
            &[
                ("PartName", "/word/document.xml"),
                (
                    "ContentType",
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
                ),
            ],
        )?;
        close(xml, "Types")
    };
    write(&mut xml).map_err(|e| Error::render("DOCX", e))?;
    finish_part(xml)
}

/// Builds the `_rels/.rels` part.
fn root_relationships() -> Result<String> {
    let mut xml = Writer::new(Vec::new());
    let write = |xml: &mut Writer<Vec<u8>>| -> io::Result<()> {
        declaration(xml)?;
        open(xml, "Relationships", &[("xmlns", RELS_NS)])?;
        empty(
            xml,
            "Relationship",
            &[("Id", "rId1"), ("Type", OFFICE_DOCUMENT), ("Target", "word/document.xml")],
        )?;
        close(xml, "Relationships")
    };
    write(&mut xml).map_err(|e| Error::render("DOCX", e))?;
    finish_part(xml)
}

impl DocxRenderer {
    pub fn new(page: PageSettings) -> Self {
        Self { page }
    }

    fn columns(&self) -> (u32, u32) {
        let content = self.page.width - 2.0 * self.page.margin;
        let label = twips(content * LABEL_COLUMN);
        (label, twips(content) - label)
    }

    fn write_table<W: Write>(
        &self,
        xml: &mut Writer<W>,
        rows: &[(&[Run], &[Run])],
    ) -> io::Result<()> {
        let (label_width, value_width) = self.columns();
        open(xml, "w:tbl", &[])?;
        open(xml, "w:tblPr", &[])?;
        empty(xml, "w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
        write_borders(xml)?;
        close(xml, "w:tblPr")?;
        open(xml, "w:tblGrid", &[])?;
        empty(xml, "w:gridCol", &[("w:w", label_width.to_string().as_str())])?;
        empty(xml, "w:gridCol", &[("w:w", value_width.to_string().as_str())])?;
        close(xml, "w:tblGrid")?;
        for (label, value) in rows {
            open(xml, "w:tr", &[])?;
            write_cell(xml, label, label_width)?;
            write_cell(xml, value, value_width)?;
            close(xml, "w:tr")?;
        }
        close(xml, "w:tbl")
    }

    fn write_section_properties<W: Write>(&self, xml: &mut Writer<W>) -> io::Result<()> {
        let width = twips(self.page.width).to_string();
        let height = twips(self.page.height).to_string();
        let margin = twips(self.page.margin).to_string();
        let margin = margin.as_str();
        open(xml, "w:sectPr", &[])?;
        empty(xml, "w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
        empty(
            xml,
            "w:pgMar",
            &[
                ("w:top", margin),
                ("w:right", margin),
                ("w:bottom", margin),
                ("w:left", margin),
                ("w:header", "0"),
                ("w:footer", "0"),
                ("w:gutter", "0"),
            ],
        )?;
        close(xml, "w:sectPr")
    }

    fn write_body<W: Write>(
        &self,
        xml: &mut Writer<W>,
        document: &DocumentModel,
    ) -> io::Result<()> {
        let blocks = document_blocks(document);
        declaration(xml)?;
        open(xml, "w:document", &[("xmlns:w", WORD_NS)])?;
        open(xml, "w:body", &[])?;

        let mut rows: Vec<(&[Run], &[Run])> = Vec::new();
        for block in &blocks {
            if let Block::InfoRow { label, value } = block {
                rows.push((label.as_slice(), value.as_slice()));
                continue;
            }
            if !rows.is_empty() {
                self.write_table(xml, &rows)?;
                rows.clear();
            }
            match block {
                Block::Paragraph(paragraph) => write_paragraph(xml, paragraph)?,
                Block::Spacer(height) => {
                    open(xml, "w:p", &[])?;
                    open(xml, "w:pPr", &[])?;
                    write_spacing(xml, 0, twips(*height))?;
                    close(xml, "w:pPr")?;
                    close(xml, "w:p")?;
                }
                Block::PageBreak => {
                    open(xml, "w:p", &[])?;
                    open(xml, "w:r", &[])?;
                    empty(xml, "w:br", &[("w:type", "page")])?;
                    close(xml, "w:r")?;
                    close(xml, "w:p")?;
                }
                Block::InfoRow { .. } => {}
            }
        }
        if !rows.is_empty() {
            self.write_table(xml, &rows)?;
        }

        self.write_section_properties(xml)?;
        close(xml, "w:body")?;
        close(xml, "w:document")
    }

    /// Builds the `word/document.xml` part.
    pub fn document_xml(&self, document: &DocumentModel) -> Result<String> {
        let mut xml = Writer::new(Vec::new());
        self.write_body(&mut xml, document)
            .map_err(|e| Error::render("DOCX", e))?;
        finish_part(xml)
    }
}

impl DocumentRenderer for DocxRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Docx
    }

    fn render(&self, document: &DocumentModel) -> Result<Vec<u8>> {
        let parts = [
            ("[Content_Types].xml", content_types()?),
            ("_rels/.rels", root_relationships()?),
            ("word/document.xml", self.document_xml(document)?),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, content) in parts {
            zip.start_file(name, options)
                .map_err(|e| Error::render("DOCX", e))?;
            zip.write_all(content.as_bytes())
                .map_err(|e| Error::render("DOCX", e))?;
        }
        let cursor = zip.finish().map_err(|e| Error::render("DOCX", e))?;
        Ok(cursor.into_inner())
    }
}
