//! Markdown bridge: converts substituted section text into document elements.
//!
//! Only block structure is interpreted. A paragraph that is entirely strong or
//! emphasized carries that formatting; mixed inline styles are flattened. The
//! `{red}` span tags are plain text to markdown and survive untouched.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::document::{Element, Formatting, SpacerSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Paragraph,
    Heading,
    Item,
}

#[derive(Default)]
struct Run {
    text: String,
    strong: bool,
    emphasis: bool,
}

#[derive(Default)]
struct Collector {
    elements: Vec<Element>,
    runs: Vec<Run>,
    blocks: Vec<Block>,
    strong: usize,
    emphasis: usize,
}

impl Collector {
    fn push_text(&mut self, text: &str) {
        self.runs.push(Run {
            text: text.to_string(),
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
        });
    }

    fn start(&mut self, block: Block) {
        // Loose list items wrap their text in paragraphs; those belong to the item.
        if block == Block::Paragraph && self.blocks.last() == Some(&Block::Item) {
            if !self.runs.is_empty() {
                self.push_text("\n");
            }
            return;
        }
        self.flush();
        self.blocks.push(block);
    }

    fn finish(&mut self, block: Block) {
        if self.blocks.last() != Some(&block) {
            return;
        }
        self.flush();
        self.blocks.pop();
    }

    /// Emits the pending runs as the innermost open block.
    fn flush(&mut self) {
        let Some(&block) = self.blocks.last() else {
            return;
        };
        let runs = std::mem::take(&mut self.runs);
        let text: String = runs.iter().map(|r| r.text.as_str()).collect();
        let text = text.trim().to_string();
        if text.is_empty() {
            return;
        }

        let visible = || runs.iter().filter(|r| !r.text.trim().is_empty());
        let mut formatting = Vec::new();
        if visible().all(|r| r.strong) {
            formatting.push(Formatting::Bold);
        }
        if visible().all(|r| r.emphasis) {
            formatting.push(Formatting::Italic);
        }

        self.elements.push(match block {
            Block::Heading => Element::section_title(text),
            Block::Paragraph => Element::styled_text(text, formatting),
            Block::Item => Element::styled_text(format!("• {text}"), formatting),
        });
    }
}

/// Converts markdown `text` into elements in document order.
pub fn markdown_to_elements(text: &str) -> Vec<Element> {
    let mut collector = Collector::default();

    for event in Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Start(Tag::Heading { .. }) => collector.start(Block::Heading),
            Event::End(TagEnd::Heading(_)) => collector.finish(Block::Heading),
            Event::Start(Tag::Paragraph) => collector.start(Block::Paragraph),
            Event::End(TagEnd::Paragraph) => collector.finish(Block::Paragraph),
            Event::Start(Tag::Item) => collector.start(Block::Item),
            Event::End(TagEnd::Item) => collector.finish(Block::Item),
            Event::Start(Tag::Strong) => collector.strong += 1,
            Event::End(TagEnd::Strong) => collector.strong = collector.strong.saturating_sub(1),
            Event::Start(Tag::Emphasis) => collector.emphasis += 1,
            Event::End(TagEnd::Emphasis) => {
                collector.emphasis = collector.emphasis.saturating_sub(1)
            }
            Event::Text(text) | Event::Code(text) | Event::InlineHtml(text) | Event::Html(text) => {
                if collector.blocks.is_empty() {
                    collector.start(Block::Paragraph);
                    collector.push_text(&text);
                    collector.finish(Block::Paragraph);
                } else {
                    collector.push_text(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => collector.push_text("\n"),
            Event::Rule => collector.elements.push(Element::spacer(SpacerSize::Medium)),
            _ => {}
        }
    }

    collector.elements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_items_are_bulleted() {
        let elements = markdown_to_elements("- Bride\n- Groom");
        assert_eq!(elements, vec![Element::text("• Bride"), Element::text("• Groom")]);
    }

    #[test]
    fn test_mixed_inline_styles_are_flattened() {
        let elements = markdown_to_elements("Welcome **all** guests");
        assert_eq!(elements, vec![Element::text("Welcome all guests")]);
    }

    #[test]
    fn test_nested_list_items_stay_separate() {
        let elements = markdown_to_elements("- Bride\n  - Maid of honor\n- Groom");
        assert_eq!(
            elements,
            vec![
                Element::text("• Bride"),
                Element::text("• Maid of honor"),
                Element::text("• Groom"),
            ]
        );
    }

    #[test]
    fn test_outer_item_text_after_nested_list() {
        let text = "1. Entrance\n   - Ushers\n\n   Then the bride\n2. Vows";
        let elements = markdown_to_elements(text);
        assert_eq!(
            elements,
            vec![
                Element::text("• Entrance"),
                Element::text("• Ushers"),
                Element::text("• Then the bride"),
                Element::text("• Vows"),
            ]
        );
    }

    #[test]
    fn test_loose_list_items_keep_bullets() {
        let elements = markdown_to_elements("- Bride\n\n- Groom");
        assert_eq!(elements, vec![Element::text("• Bride"), Element::text("• Groom")]);
    }
}
