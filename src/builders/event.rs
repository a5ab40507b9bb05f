//! The generic event document, driven entirely by the event type's fields.
//!
//! Fields are walked in declared order: spacers become spacer elements,
//! calendar-event fields feed the cover header, everything else with a value
//! becomes an info row.

use once_cell::sync::Lazy;

use crate::builders::{tr, Record, Registry, Template};
use crate::document::{DocumentModel, Element, Language, Section, SpacerSize};
use crate::entity::{CalendarEvent, Entity};
use crate::formatters::{format_date, format_time};
use crate::resolver::{ResolvedField, ResolvedFields};
use crate::schema::{EventType, FieldKind};
use crate::substitute::format_raw;

/// An event instance: its type plus resolved field values.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub id: String,
    pub event_type: EventType,
    pub fields: ResolvedFields,
}

impl EventRecord {
    pub fn new(id: impl Into<String>, event_type: EventType, fields: ResolvedFields) -> Self {
        Self { id: id.into(), event_type, fields }
    }

    /// The resolved primary calendar event, if one is declared and found.
    pub fn primary_event(&self) -> Option<&CalendarEvent> {
        let field = self.event_type.primary_calendar_field()?;
        self.fields
            .get(&field.property_name)?
            .resolved_value
            .as_ref()?
            .as_calendar_event()
    }
}

impl Record for EventRecord {
    const DOCUMENT_TYPE: &'static str = "event";

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self, language: Language) -> String {
        match language {
            Language::En => format!("{} Script", self.event_type.name),
            Language::Es => format!("Guion de {}", self.event_type.name),
        }
    }

    fn subtitle(&self, language: Language) -> Option<String> {
        self.primary_event()
            .map(|e| e.date_time_text(language))
            .filter(|text| !text.is_empty())
    }

    fn entity_type_name(&self) -> String {
        self.event_type.name.clone()
    }
}

/// Display text of a field value, `None` when nothing is stored.
pub fn display_value(field: &ResolvedField, language: Language) -> Option<String> {
    match &field.resolved_value {
        Some(Entity::CalendarEvent(event)) => Some(event.date_time_text(language)),
        Some(entity) => Some(entity.display(language)),
        None if field.raw_value.is_null() => None,
        None => Some(format_raw(field.kind, &field.raw_value, language)),
    }
    .filter(|text| !text.is_empty())
}

fn cover_section(record: &EventRecord, language: Language) -> Section {
    let l = |en, es| tr(language, en, es);
    let event = record.primary_event();

    let elements: Vec<Element> = [
        Some(Element::EventTitle { text: record.event_type.name.clone() }),
        event
            .and_then(|e| e.start_date.as_deref())
            .map(|d| Element::info_row(l("Date", "Fecha"), format_date(d, language))),
        event
            .and_then(|e| e.start_time.as_deref())
            .map(|t| Element::info_row(l("Time", "Hora"), format_time(t))),
        event
            .and_then(|e| e.location.as_ref())
            .filter(|loc| !loc.name.is_empty())
            .map(|loc| Element::info_row(l("Location", "Lugar"), loc.name.clone())),
        Some(Element::spacer(SpacerSize::Large)),
    ]
    .into_iter()
    .flatten()
    .collect();

    Section::new("cover-page", elements)
}

fn details_section(record: &EventRecord, language: Language) -> Section {
    let elements = record
        .event_type
        .fields
        .iter()
        .filter_map(|field| match field.kind {
            FieldKind::Spacer => Some(Element::spacer(SpacerSize::Medium)),
            FieldKind::CalendarEvent => None,
            _ => record
                .fields
                .get(&field.property_name)
                .and_then(|resolved| display_value(resolved, language))
                .map(|value| Element::info_row(field.display_name.clone(), value)),
        })
        .collect();

    Section::new("custom-fields", elements).titled(tr(language, "Details", "Detalles"))
}

fn full_script(record: &EventRecord, language: Language) -> Vec<Section> {
    vec![cover_section(record, language), details_section(record, language)]
}

pub static EVENT_TEMPLATES: Lazy<Registry<EventRecord>> = Lazy::new(|| {
    Registry::new(
        "event",
        Template::new(
            "event-full-script-english",
            "Event Script (English)",
            Language::En,
            full_script,
        ),
        vec![Template::new(
            "event-full-script-spanish",
            "Guion del evento (Español)",
            Language::Es,
            full_script,
        )],
    )
});

pub fn build_event(record: &EventRecord, template_id: Option<&str>) -> DocumentModel {
    EVENT_TEMPLATES.build(record, template_id)
}
