//! The abstract document model shared by every content builder and renderer.
//!
//! Element order is render order. Nothing in here is sorted or merged after
//! construction; renderers walk it as is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output language of a document. Selected by template id, never guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formatting {
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacerSize {
    Small,
    Medium,
    Large,
}

/// One labelled part of a multi-part line, e.g. "Priest:" followed by text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPart {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formatting: Vec<Formatting>,
}

impl TextPart {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), formatting: Vec::new() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self { text: text.into(), formatting: vec![Formatting::Bold] }
    }
}

/// A single renderable element. Text may carry `{red}...{/red}` spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Element {
    EventTitle { text: String },
    EventDateTime { text: String },
    SectionTitle { text: String },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        formatting: Vec<Formatting>,
        #[serde(default)]
        alignment: Alignment,
    },
    InfoRow { label: String, value: String },
    PriestDialogue { text: String },
    ReadingTitle { text: String },
    Pericope { text: String },
    ReaderName { text: String },
    Introduction { text: String },
    ReadingText { text: String },
    Conclusion { text: String },
    /// A labelled intention read aloud, e.g. "Reader:" and its text.
    Petition { label: String, text: String },
    /// A labelled reply, e.g. "People:" and "Lord, hear our prayer."
    Response { label: String, text: String },
    MultiPartText { parts: Vec<TextPart> },
    Spacer { size: SpacerSize },
}

impl Element {
    pub fn text(text: impl Into<String>) -> Self {
        Element::Text {
            text: text.into(),
            formatting: Vec::new(),
            alignment: Alignment::Left,
        }
    }

    pub fn styled_text(text: impl Into<String>, formatting: Vec<Formatting>) -> Self {
        Element::Text {
            text: text.into(),
            formatting,
            alignment: Alignment::Left,
        }
    }

    pub fn section_title(text: impl Into<String>) -> Self {
        Element::SectionTitle { text: text.into() }
    }

    pub fn info_row(label: impl Into<String>, value: impl Into<String>) -> Self {
        Element::InfoRow { label: label.into(), value: value.into() }
    }

    pub fn response(label: impl Into<String>, text: impl Into<String>) -> Self {
        Element::Response { label: label.into(), text: text.into() }
    }

    pub fn spacer(size: SpacerSize) -> Self {
        Element::Spacer { size }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub page_break_before: bool,
    #[serde(default)]
    pub page_break_after: bool,
    pub elements: Vec<Element>,
}

impl Section {
    pub fn new(id: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            id: id.into(),
            title: None,
            page_break_before: false,
            page_break_after: false,
            elements,
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_page_break_before(mut self) -> Self {
        self.page_break_before = true;
        self
    }

    pub fn with_page_break_after(mut self) -> Self {
        self.page_break_after = true;
        self
    }

    /// A section with no elements renders to nothing, title included.
    pub fn is_blank(&self) -> bool {
        self.elements.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentModel {
    pub id: String,
    pub document_type: String,
    pub language: Language,
    pub template_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub sections: Vec<Section>,
}

impl DocumentModel {
    /// Sections that render to at least one block.
    pub fn visible_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| !s.is_blank())
    }
}
