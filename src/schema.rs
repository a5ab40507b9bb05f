//! Event-type schema: the declared fields of an event type and the scripts
//! authored against them.
//!
//! Everything here is authored outside ordo and handed in whole, usually as a
//! JSON or YAML bundle (see [`crate::config::load_bundle`]).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::PROPERTY_NAME_PATTERN;

static PROPERTY_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(PROPERTY_NAME_PATTERN).expect("property name pattern compiles"));

/// Returns true when `name` is a valid slug-form property name.
pub fn is_valid_property_name(name: &str) -> bool {
    PROPERTY_NAME_RE.is_match(name)
}

/// The closed set of field types an event type can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Person,
    Group,
    Location,
    ListItem,
    Document,
    Text,
    RichText,
    Content,
    Petition,
    CalendarEvent,
    Date,
    Time,
    DateTime,
    Number,
    YesNo,
    Spacer,
}

impl FieldKind {
    /// Kinds whose stored value is an id that must be looked up.
    pub fn needs_lookup(self) -> bool {
        matches!(
            self,
            FieldKind::Person
                | FieldKind::Group
                | FieldKind::Location
                | FieldKind::ListItem
                | FieldKind::Document
                | FieldKind::Content
                | FieldKind::Petition
                | FieldKind::CalendarEvent
        )
    }

    pub fn is_spacer(self) -> bool {
        self == FieldKind::Spacer
    }
}

/// A single declared field of an event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub property_name: String,
    #[serde(alias = "name")]
    pub display_name: String,
    #[serde(alias = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Custom list the values of a `list_item` field are drawn from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    /// Category tags used to filter content pickers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_tags: Option<Vec<String>>,
    /// Marks the calendar-event field used for the document header.
    #[serde(default)]
    pub is_primary: bool,
}

impl FieldDefinition {
    pub fn new(property_name: &str, display_name: &str, kind: FieldKind) -> Self {
        Self {
            property_name: property_name.to_string(),
            display_name: display_name.to_string(),
            kind,
            required: false,
            list_id: None,
            filter_tags: None,
            is_primary: false,
        }
    }
}

/// A named, orderable block of placeholder-bearing text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub page_break_before: bool,
    #[serde(default)]
    pub page_break_after: bool,
}

/// An ordered document template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Script {
    /// Sections sorted by their `order`, keeping authored order for ties.
    pub fn ordered_sections(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }
}

/// A user-defined event type: its fields in display order plus its scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventType {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub scripts: Vec<Script>,
}

impl EventType {
    pub fn field(&self, property_name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.property_name == property_name)
    }

    pub fn script(&self, name: &str) -> Option<&Script> {
        self.scripts.iter().find(|s| s.name == name)
    }

    /// The calendar-event field flagged primary, or the first one declared.
    pub fn primary_calendar_field(&self) -> Option<&FieldDefinition> {
        let mut calendar = self
            .fields
            .iter()
            .filter(|f| f.kind == FieldKind::CalendarEvent);
        let first = calendar.clone().next();
        calendar.find(|f| f.is_primary).or(first)
    }
}
