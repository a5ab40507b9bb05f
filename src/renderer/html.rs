//! HTML preview back end. Produces one self-contained page.

use quick_xml::escape::escape;

use crate::document::{Alignment, DocumentModel};
use crate::error::Result;
use crate::renderer::blocks::{document_blocks, Block, Run};
use crate::renderer::styles::red_hex;
use crate::renderer::{DocumentRenderer, OutputFormat};

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

fn write_runs(html: &mut String, runs: &[Run]) {
    for run in runs {
        let mut text = escape(run.text.as_str()).replace('\n', "<br>");
        if run.italic {
            text = format!("<em>{text}</em>");
        }
        if run.bold {
            text = format!("<strong>{text}</strong>");
        }
        if run.red {
            text = format!(r#"<span class="liturgy-red">{text}</span>"#);
        }
        html.push_str(&text);
    }
}

fn text_align(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
        Alignment::Justify => "justify",
    }
}

impl HtmlRenderer {
    /// Renders the document as an HTML string.
    pub fn to_html(&self, document: &DocumentModel) -> String {
        let mut html = format!(
            r#"<!DOCTYPE html><html lang="{}"><head><meta charset="utf-8"><title>{}</title><style>body{{font-family:Helvetica,Arial,sans-serif;max-width:40em;margin:2em auto}}.liturgy-red{{color:#{}}}.info-row{{display:flex}}.info-row .label{{width:30%;font-weight:bold}}.page-break{{break-after:page;border:0}}</style></head><body>"#,
            document.language.code(),
            escape(document.title.as_str()),
            red_hex(),
        );
        for block in document_blocks(document) {
            match block {
                Block::Paragraph(p) => {
                    html.push_str(&format!(
                        r#"<p style="font-size:{}pt;text-align:{};margin:{}pt 0 {}pt 0">"#,
                        p.size,
                        text_align(p.alignment),
                        p.space_before,
                        p.space_after
                    ));
                    write_runs(&mut html, &p.runs);
                    html.push_str("</p>");
                }
                Block::InfoRow { label, value } => {
                    html.push_str(r#"<div class="info-row"><span class="label">"#);
                    write_runs(&mut html, &label);
                    html.push_str(r#"</span><span class="value">"#);
                    write_runs(&mut html, &value);
                    html.push_str("</span></div>");
                }
                Block::Spacer(height) => {
                    html.push_str(&format!(r#"<div style="height:{height}pt"></div>"#))
                }
                Block::PageBreak => html.push_str(r#"<hr class="page-break">"#),
            }
        }
        html.push_str("</body></html>");
        html
    }
}

impl DocumentRenderer for HtmlRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn render(&self, document: &DocumentModel) -> Result<Vec<u8>> {
        Ok(self.to_html(document).into_bytes())
    }
}
