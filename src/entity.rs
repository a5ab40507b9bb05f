//! Resolved records a field value can point at.
//!
//! [`Entity`] is the closed union handed from the resolver to substitution and
//! the content builders, so both sides pattern-match instead of probing fields.

use serde::{Deserialize, Serialize};

use crate::document::Language;
use crate::formatters::{format_date, format_date_and_time, format_time};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    Male,
    Female,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl Person {
    pub fn new(id: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            id: id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }

    /// Stored full name, or first and last name joined.
    pub fn display_name(&self) -> String {
        match &self.full_name {
            Some(full) if !full.trim().is_empty() => full.clone(),
            _ => [self.first_name.trim(), self.last_name.trim()]
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Location {
    pub fn named(id: &str, name: &str) -> Self {
        Self { id: id.to_string(), name: name.to_string(), ..Default::default() }
    }

    /// Street, city and state joined with commas, skipping missing parts.
    pub fn address(&self) -> String {
        [&self.street, &self.city, &self.state]
            .iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Name followed by the address in parentheses when one is known.
    pub fn name_with_address(&self) -> String {
        let address = self.address();
        if address.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, address)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentFile {
    pub id: String,
    pub file_name: String,
}

/// A reusable piece of authored text, e.g. a reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Petition {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl CalendarEvent {
    pub fn date_time_text(&self, language: Language) -> String {
        format_date_and_time(
            self.start_date.as_deref(),
            self.start_time.as_deref(),
            language,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Person(Person),
    Group(Group),
    Location(Location),
    ListItem(ListItem),
    Document(DocumentFile),
    Content(Content),
    Petition(Petition),
    CalendarEvent(CalendarEvent),
}

impl Entity {
    pub fn id(&self) -> &str {
        match self {
            Entity::Person(p) => &p.id,
            Entity::Group(g) => &g.id,
            Entity::Location(l) => &l.id,
            Entity::ListItem(i) => &i.id,
            Entity::Document(d) => &d.id,
            Entity::Content(c) => &c.id,
            Entity::Petition(p) => &p.id,
            Entity::CalendarEvent(e) => &e.id,
        }
    }

    /// The well-known display projection of each kind.
    pub fn display(&self, language: Language) -> String {
        match self {
            Entity::Person(p) => p.display_name(),
            Entity::Group(g) => g.name.clone(),
            Entity::Location(l) => l.name.clone(),
            Entity::ListItem(i) => i.value.clone(),
            Entity::Document(d) => d.file_name.clone(),
            Entity::Content(c) => c.title.clone(),
            Entity::Petition(p) => p.text.clone(),
            Entity::CalendarEvent(e) => e
                .start_date
                .as_deref()
                .map(|d| format_date(d, language))
                .unwrap_or_default(),
        }
    }

    /// Resolves a dotted sub-path such as `full_name` or `location`.
    ///
    /// Unknown paths fall back to [`Entity::display`].
    pub fn attribute(&self, path: &str, language: Language) -> String {
        let value = match (self, path) {
            (Entity::Person(p), "full_name") => Some(p.display_name()),
            (Entity::Person(p), "first_name") => Some(p.first_name.clone()),
            (Entity::Person(p), "last_name") => Some(p.last_name.clone()),
            (Entity::Person(_), "sex") => Some(String::new()),
            (Entity::Content(c), "title") => Some(c.title.clone()),
            (Entity::Content(c), "body") => Some(c.body.clone()),
            (Entity::Location(l), "name") => Some(l.name.clone()),
            (Entity::Location(l), "street") => Some(l.street.clone().unwrap_or_default()),
            (Entity::Location(l), "city") => Some(l.city.clone().unwrap_or_default()),
            (Entity::Location(l), "state") => Some(l.state.clone().unwrap_or_default()),
            (Entity::Location(l), "address") => Some(l.address()),
            (Entity::CalendarEvent(e), "date") => {
                Some(e.start_date.as_deref().map(|d| format_date(d, language)).unwrap_or_default())
            }
            (Entity::CalendarEvent(e), "time") => {
                Some(e.start_time.as_deref().map(format_time).unwrap_or_default())
            }
            (Entity::CalendarEvent(e), "location") => {
                Some(e.location.as_ref().map(|l| l.name.clone()).unwrap_or_default())
            }
            _ => None,
        };
        value.unwrap_or_else(|| self.display(language))
    }

    /// The discriminator used by gendered placeholders.
    pub fn sex(&self) -> Option<Sex> {
        match self {
            Entity::Person(p) => p.sex,
            _ => None,
        }
    }

    pub fn as_person(&self) -> Option<&Person> {
        match self {
            Entity::Person(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_calendar_event(&self) -> Option<&CalendarEvent> {
        match self {
            Entity::CalendarEvent(e) => Some(e),
            _ => None,
        }
    }
}
