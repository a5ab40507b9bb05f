//! Placeholder substitution over script text.
//!
//! Substitution never fails. Whatever cannot be resolved degrades to the raw
//! stored value, then to the empty string, so scripts stay renderable while
//! data entry is still incomplete.

use serde::{Deserialize, Serialize};

use crate::document::Language;
use crate::entity::Sex;
use crate::formatters::{
    as_bool, format_date, format_date_time, format_time, format_yes_no, raw_to_string,
};
use crate::parser::{scan, Conditional, PlaceholderToken};
use crate::resolver::{ResolvedField, ResolvedFields};
use crate::schema::FieldKind;

/// Host organization data behind the `parish.*` built-ins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parish {
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl Parish {
    /// "City, State", or whichever of the two is present.
    pub fn city_state(&self) -> String {
        match (non_empty(&self.city), non_empty(&self.state)) {
            (Some(city), Some(state)) => format!("{city}, {state}"),
            (Some(part), None) | (None, Some(part)) => part.to_string(),
            (None, None) => String::new(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Replaces placeholders using resolved fields and host context.
#[derive(Debug, Clone)]
pub struct Substituter<'a> {
    fields: &'a ResolvedFields,
    parish: Option<&'a Parish>,
    language: Language,
}

impl<'a> Substituter<'a> {
    pub fn new(fields: &'a ResolvedFields) -> Self {
        Self { fields, parish: None, language: Language::En }
    }

    pub fn with_parish(mut self, parish: Option<&'a Parish>) -> Self {
        self.parish = parish;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Substitutes every placeholder in `text`, keeping all other bytes as is.
    pub fn substitute(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;
        for (range, token) in scan(text) {
            output.push_str(&text[cursor..range.start]);
            output.push_str(&self.replacement(&token));
            cursor = range.end;
        }
        output.push_str(&text[cursor..]);
        output
    }

    fn replacement(&self, token: &PlaceholderToken) -> String {
        if token.is_builtin {
            return self.builtin(&token.reference());
        }
        let field = self.fields.get(&token.property_name);
        match &token.conditional {
            Some(conditional) => choose(field, conditional).to_string(),
            None => field
                .map(|f| self.value(f, token.path.as_deref()))
                .unwrap_or_default(),
        }
    }

    fn builtin(&self, reference: &str) -> String {
        let Some(parish) = self.parish else {
            return String::new();
        };
        match reference {
            "parish.name" => parish.name.clone(),
            "parish.city" => parish.city.clone().unwrap_or_default(),
            "parish.state" => parish.state.clone().unwrap_or_default(),
            "parish.city_state" => parish.city_state(),
            _ => String::new(),
        }
    }

    fn value(&self, field: &ResolvedField, path: Option<&str>) -> String {
        if let Some(entity) = &field.resolved_value {
            return match path {
                Some(path) => entity.attribute(path, self.language),
                None => entity.display(self.language),
            };
        }
        format_raw(field.kind, &field.raw_value, self.language)
    }
}

/// Formats an unresolved stored value according to its field kind.
pub fn format_raw(kind: FieldKind, raw: &serde_json::Value, language: Language) -> String {
    let text = raw_to_string(raw);
    if text.is_empty() {
        return text;
    }
    match kind {
        FieldKind::Date => format_date(&text, language),
        FieldKind::Time => format_time(&text),
        FieldKind::DateTime => format_date_time(&text, language),
        FieldKind::YesNo => as_bool(raw)
            .map(|b| format_yes_no(b, language))
            .unwrap_or(text),
        _ => text,
    }
}

/// Picks a conditional branch. Anything undetermined takes the second one.
fn choose<'c>(field: Option<&ResolvedField>, conditional: &'c Conditional) -> &'c str {
    let first = field.is_some_and(|field| match &field.resolved_value {
        Some(entity) => entity.sex() == Some(Sex::Male),
        None => field.kind == FieldKind::YesNo && as_bool(&field.raw_value) == Some(true),
    });
    if first {
        &conditional.if_true
    } else {
        &conditional.if_false
    }
}

/// Substitutes `text` with no host context, in English.
pub fn substitute(text: &str, fields: &ResolvedFields) -> String {
    Substituter::new(fields).substitute(text)
}
