use std::io::{Cursor, Read};

use ordo::config::PageSettings;
use ordo::document::{DocumentModel, Element, Language, Section, SpacerSize};
use ordo::renderer::pdf::Font;
use ordo::renderer::{
    renderer_for, DocumentRenderer, DocxRenderer, HtmlRenderer, OutputFormat, PdfRenderer,
};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;

fn document(sections: Vec<Section>) -> DocumentModel {
    DocumentModel {
        id: "0f8fad5b-d9cb-469f-a165-70867728950e".to_string(),
        document_type: "wedding".to_string(),
        language: Language::En,
        template_id: "wedding-full-script-english".to_string(),
        title: "Maria Lopez & John Smith".to_string(),
        subtitle: None,
        sections,
    }
}

fn gospel() -> Section {
    Section::new(
        "gospel",
        vec![
            Element::ReadingTitle { text: "GOSPEL".to_string() },
            Element::PriestDialogue {
                text: "{red}Priest:{/red} The Lord be with you.".to_string(),
            },
        ],
    )
}

fn summary() -> Section {
    Section::new(
        "summary",
        vec![
            Element::info_row("Bride:", "Maria Lopez"),
            Element::info_row("Groom:", "John Smith"),
            Element::text("Rehearsal at six."),
        ],
    )
}

#[test]
fn test_blank_section_renders_nothing() {
    let blank = document(vec![Section::new("notes", vec![]).titled("Wedding Notes")]);

    let pages = PdfRenderer::new(PageSettings::default()).layout(&blank);
    assert_eq!(pages.len(), 1);
    assert!(pages[0].is_empty());

    let xml = DocxRenderer::new(PageSettings::default()).document_xml(&blank).unwrap();
    assert!(!xml.contains("Wedding Notes"));

    let html = HtmlRenderer.to_html(&blank);
    assert!(!html.contains("Wedding Notes"));
}

#[test]
fn test_red_text_is_red_in_every_format() {
    let model = document(vec![gospel()]);

    let pages = PdfRenderer::new(PageSettings::default()).layout(&model);
    let priest = pages[0].iter().find(|t| t.text.contains("Priest:")).unwrap();
    assert!(priest.red);
    let response = pages[0].iter().find(|t| t.text.contains("The Lord")).unwrap();
    assert!(!response.red);
    let title = pages[0].iter().find(|t| t.text == "GOSPEL").unwrap();
    assert!(title.red);
    assert_eq!(title.font, Font::Bold);

    let xml = DocxRenderer::new(PageSettings::default()).document_xml(&model).unwrap();
    assert!(xml.contains(r#"<w:color w:val="c41e3a"/>"#));

    let html = HtmlRenderer.to_html(&model);
    assert!(html.contains(r#"<span class="liturgy-red">Priest:</span>"#));
    assert!(!html.contains("{red}"));
}

#[test]
fn test_page_breaks_between_sections() {
    let mut breaking = gospel();
    breaking.page_break_before = true;
    let model = document(vec![summary(), breaking]);

    let pages = PdfRenderer::new(PageSettings::default()).layout(&model);
    assert_eq!(pages.len(), 2);
    assert!(pages[1].iter().any(|t| t.text == "GOSPEL"));

    let xml = DocxRenderer::new(PageSettings::default()).document_xml(&model).unwrap();
    assert_eq!(xml.matches(r#"<w:br w:type="page"/>"#).count(), 1);

    let html = HtmlRenderer.to_html(&model);
    assert_eq!(html.matches("page-break\"").count(), 1);
}

#[test]
fn test_overflowing_spacers_do_not_leave_a_blank_page() {
    let mut elements = vec![Element::text("Prelude")];
    elements.extend((0..60).map(|_| Element::spacer(SpacerSize::Large)));
    let mut breaking = gospel();
    breaking.page_break_before = true;
    let model = document(vec![Section::new("music", elements), breaking]);

    let pages = PdfRenderer::new(PageSettings::default()).layout(&model);
    assert_eq!(pages.len(), 2);
    assert!(pages.iter().all(|page| !page.is_empty()));
    assert!(pages[1].iter().any(|t| t.text == "GOSPEL"));
}

#[test]
fn test_leading_page_break_is_dropped() {
    let mut breaking = gospel();
    breaking.page_break_before = true;
    let model = document(vec![breaking]);

    let pages = PdfRenderer::new(PageSettings::default()).layout(&model);
    assert_eq!(pages.len(), 1);
    let xml = DocxRenderer::new(PageSettings::default()).document_xml(&model).unwrap();
    assert!(!xml.contains(r#"w:type="page""#));
}

#[test]
fn test_docx_xml_is_well_formed() {
    let model = document(vec![
        summary(),
        gospel().with_page_break_before(),
        Section::new(
            "notes",
            vec![Element::text("Bread & wine <offertory>\nthen \"Amen\"")],
        ),
    ]);
    let xml = DocxRenderer::new(PageSettings::default()).document_xml(&model).unwrap();
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
    assert!(xml.contains("Bread &amp; wine &lt;offertory&gt;"));

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().check_end_names = true;
    let mut depth = 0usize;
    let mut texts = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            XmlEvent::Start(_) => depth += 1,
            XmlEvent::End(_) => depth -= 1,
            XmlEvent::Text(text) => texts.push(text.unescape().unwrap().into_owned()),
            XmlEvent::Eof => break,
            _ => {}
        }
    }
    assert_eq!(depth, 0);
    assert!(texts.iter().any(|t| t == "then \"Amen\""));
}

#[test]
fn test_info_rows_become_one_table() {
    let xml = DocxRenderer::new(PageSettings::default())
        .document_xml(&document(vec![summary()]))
        .unwrap();
    assert_eq!(xml.matches("<w:tbl>").count(), 1);
    assert_eq!(xml.matches("<w:tr>").count(), 2);
    assert!(xml.contains("Maria Lopez"));

    let pages = PdfRenderer::new(PageSettings::default()).layout(&document(vec![summary()]));
    let label = pages[0].iter().find(|t| t.text == "Bride:").unwrap();
    let value = pages[0].iter().find(|t| t.text == "Maria Lopez").unwrap();
    assert_eq!(label.y, value.y);
    assert!(label.x < value.x);
}

#[test]
fn test_long_text_flows_onto_new_pages() {
    let elements = (0..200)
        .map(|i| Element::text(format!("Line {i} of a long reading.")))
        .collect();
    let model = document(vec![Section::new("long", elements)]);

    let page = PageSettings::default();
    let pages = PdfRenderer::new(page.clone()).layout(&model);
    assert!(pages.len() > 1);
    for text in pages.iter().flatten() {
        assert!(text.y >= page.margin);
        assert!(text.y <= page.height - page.margin);
    }
}

#[test]
fn test_pdf_bytes() {
    let bytes = PdfRenderer::new(PageSettings::default())
        .render(&document(vec![summary(), gospel()]))
        .unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7"));

    let empty = PdfRenderer::new(PageSettings::default())
        .render(&document(vec![]))
        .unwrap();
    assert!(empty.starts_with(b"%PDF"));
}

#[test]
fn test_docx_package() {
    let bytes = DocxRenderer::new(PageSettings::default())
        .render(&document(vec![summary()]))
        .unwrap();
    assert!(bytes.starts_with(b"PK"));

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(
        names,
        vec!["[Content_Types].xml", "_rels/.rels", "word/document.xml"]
    );

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    assert!(xml.contains("John Smith"));
}

#[test]
fn test_html_escapes_text() {
    let model = document(vec![Section::new(
        "notes",
        vec![Element::text("Bread & wine <offertory>")],
    )]);
    let html = HtmlRenderer.to_html(&model);
    assert!(html.contains("Bread &amp; wine &lt;offertory&gt;"));
    assert!(html.starts_with("<!DOCTYPE html>"));
}

#[test]
fn test_renderer_for_each_format() {
    let page = PageSettings::default();
    for format in [OutputFormat::Pdf, OutputFormat::Docx, OutputFormat::Html] {
        assert_eq!(renderer_for(format, &page).format(), format);
    }
    assert_eq!(OutputFormat::Docx.extension(), "docx");
    assert_eq!(OutputFormat::Pdf.content_type(), "application/pdf");
}
