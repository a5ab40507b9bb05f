//! Baptism summaries.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::builders::shared::{
    event_date_row, event_location_row, name_with_phone, person_row, text_row, titled_group,
};
use crate::builders::{tr, Record, Registry, Template};
use crate::document::{DocumentModel, Element, Language, Section};
use crate::entity::{CalendarEvent, Person};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Baptism {
    pub id: String,
    pub child: Option<Person>,
    pub mother: Option<Person>,
    pub father: Option<Person>,
    pub sponsor_1: Option<Person>,
    pub sponsor_2: Option<Person>,
    pub presider: Option<Person>,
    pub baptism_event: Option<CalendarEvent>,
    pub note: Option<String>,
}

impl Record for Baptism {
    const DOCUMENT_TYPE: &'static str = "baptism";

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self, language: Language) -> String {
        match &self.child {
            Some(child) => format!(
                "{} {}",
                tr(language, "Baptism of", "Bautismo de"),
                child.display_name()
            ),
            None => tr(language, "Baptism", "Bautismo").to_string(),
        }
    }

    fn subtitle(&self, language: Language) -> Option<String> {
        self.baptism_event
            .as_ref()
            .map(|e| e.date_time_text(language))
            .filter(|text| !text.is_empty())
    }
}

fn summary(b: &Baptism, language: Language) -> Vec<Section> {
    let l = |en, es| tr(language, en, es);

    let header: Vec<Element> = [
        Some(Element::EventTitle { text: b.title(language) }),
        b.subtitle(language).map(|text| Element::EventDateTime { text }),
    ]
    .into_iter()
    .flatten()
    .collect();

    let baptism = titled_group(
        l("Baptism", "Bautismo"),
        vec![
            person_row(l("Child:", "Niño(a):"), b.child.as_ref()),
            event_date_row(l("Date & Time:", "Fecha y hora:"), b.baptism_event.as_ref(), language),
            event_location_row(l("Location:", "Lugar:"), b.baptism_event.as_ref()),
            person_row(l("Presider:", "Celebrante:"), b.presider.as_ref()),
        ],
    );

    let parents = titled_group(
        l("Parents", "Padres"),
        vec![
            b.mother
                .as_ref()
                .map(|p| Element::info_row(l("Mother:", "Madre:"), name_with_phone(p))),
            b.father
                .as_ref()
                .map(|p| Element::info_row(l("Father:", "Padre:"), name_with_phone(p))),
        ],
    );

    let godparents = titled_group(
        l("Godparents", "Padrinos"),
        vec![
            person_row(l("Godparent:", "Padrino/Madrina:"), b.sponsor_1.as_ref()),
            person_row(l("Godparent:", "Padrino/Madrina:"), b.sponsor_2.as_ref()),
        ],
    );

    let notes = titled_group(l("Notes", "Notas"), vec![text_row(l("Note:", "Nota:"), &b.note)]);

    [
        Section::new("summary", header.into_iter().chain(baptism).collect()),
        Section::new("parents", parents),
        Section::new("godparents", godparents),
        Section::new("notes", notes),
    ]
    .into_iter()
    .filter(|s| !s.is_blank())
    .collect()
}

pub static BAPTISM_TEMPLATES: Lazy<Registry<Baptism>> = Lazy::new(|| {
    Registry::new(
        "baptism",
        Template::new("baptism-summary-english", "Summary (English)", Language::En, summary),
        vec![Template::new(
            "baptism-summary-spanish",
            "Resumen (Español)",
            Language::Es,
            summary,
        )],
    )
});

pub fn build_baptism(baptism: &Baptism, template_id: Option<&str>) -> DocumentModel {
    BAPTISM_TEMPLATES.build(baptism, template_id)
}
