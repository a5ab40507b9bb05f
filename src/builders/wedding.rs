//! Wedding scripts.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::builders::shared::{
    announcements_section, event_date_row, event_location_row, non_blank, person_row,
    petitions_reader, petitions_section, psalm_section, reading_section, text_row, titled_group,
    Reading, ReadingConfig,
};
use crate::builders::{tr, Record, Registry, Template};
use crate::document::{DocumentModel, Element, Language, Section};
use crate::entity::{CalendarEvent, Person};

/// A wedding with its people, events and liturgy choices resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wedding {
    pub id: String,
    pub bride: Option<Person>,
    pub groom: Option<Person>,
    pub coordinator: Option<Person>,
    pub presider: Option<Person>,
    pub lead_musician: Option<Person>,
    pub witness_1: Option<Person>,
    pub witness_2: Option<Person>,
    pub wedding_event: Option<CalendarEvent>,
    pub reception_event: Option<CalendarEvent>,
    pub rehearsal_event: Option<CalendarEvent>,
    pub rehearsal_dinner_event: Option<CalendarEvent>,
    pub first_reading: Option<Reading>,
    pub first_reader: Option<Person>,
    pub psalm: Option<Reading>,
    pub psalm_reader: Option<Person>,
    pub psalm_is_sung: bool,
    pub second_reading: Option<Reading>,
    pub second_reader: Option<Person>,
    pub gospel_reading: Option<Reading>,
    pub petitions: Option<String>,
    pub petition_reader: Option<Person>,
    pub petitions_read_by_second_reader: bool,
    pub announcements: Option<String>,
    pub notes: Option<String>,
}

impl Wedding {
    fn petitions_reader(&self) -> Option<&Person> {
        petitions_reader(
            self.petitions_read_by_second_reader,
            self.second_reader.as_ref(),
            self.petition_reader.as_ref(),
        )
    }
}

impl Record for Wedding {
    const DOCUMENT_TYPE: &'static str = "wedding";

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self, language: Language) -> String {
        match (&self.bride, &self.groom) {
            (Some(bride), Some(groom)) => {
                format!("{} & {}", bride.display_name(), groom.display_name())
            }
            _ => tr(language, "Wedding", "Boda").to_string(),
        }
    }

    fn subtitle(&self, language: Language) -> Option<String> {
        let text = self
            .wedding_event
            .as_ref()
            .filter(|e| e.start_date.is_some() && e.start_time.is_some())
            .map(|e| e.date_time_text(language))
            .unwrap_or_else(|| {
                tr(language, "Missing Date and Time", "Falta fecha y hora").to_string()
            });
        Some(text)
    }
}

fn header(wedding: &Wedding, language: Language) -> Vec<Element> {
    vec![
        Element::EventTitle { text: wedding.title(language) },
        Element::EventDateTime { text: wedding.subtitle(language).unwrap_or_default() },
    ]
}

fn summary_section(w: &Wedding, language: Language) -> Section {
    let l = |en, es| tr(language, en, es);

    let rehearsal = titled_group(
        l("Rehearsal", "Ensayo"),
        vec![
            event_date_row(
                l("Rehearsal Date & Time:", "Fecha y hora del ensayo:"),
                w.rehearsal_event.as_ref(),
                language,
            ),
            event_location_row(
                l("Rehearsal Location:", "Lugar del ensayo:"),
                w.rehearsal_event.as_ref(),
            ),
            event_location_row(
                l("Rehearsal Dinner Location:", "Lugar de la cena de ensayo:"),
                w.rehearsal_dinner_event.as_ref(),
            ),
        ],
    );

    let ceremony = std::iter::once(Element::section_title(l("Wedding", "Boda"))).chain(
        [
            person_row(l("Bride:", "Novia:"), w.bride.as_ref()),
            person_row(l("Groom:", "Novio:"), w.groom.as_ref()),
            person_row(l("Coordinator:", "Coordinador(a):"), w.coordinator.as_ref()),
            person_row(l("Presider:", "Celebrante:"), w.presider.as_ref()),
            person_row(l("Lead Musician:", "Músico principal:"), w.lead_musician.as_ref()),
            event_location_row(
                l("Wedding Location:", "Lugar de la boda:"),
                w.wedding_event.as_ref(),
            ),
            event_location_row(
                l("Reception Location:", "Lugar de la recepción:"),
                w.reception_event.as_ref(),
            ),
            person_row(l("Best Man:", "Padrino:"), w.witness_1.as_ref()),
            person_row(l("Maid/Matron of Honor:", "Madrina:"), w.witness_2.as_ref()),
            text_row(l("Wedding Note:", "Nota de la boda:"), &w.notes),
        ]
        .into_iter()
        .flatten(),
    );

    let pericope = |r: &Option<Reading>| {
        r.as_ref()
            .map(|r| r.pericope.clone().unwrap_or_default())
            .filter(|p| !p.is_empty())
    };
    let psalm_choice = if w.psalm_is_sung {
        Some(Element::info_row(l("Psalm Choice:", "Salmo:"), l("Sung", "Cantado")))
    } else {
        person_row(l("Psalm Lector:", "Lector del salmo:"), w.psalm_reader.as_ref())
    };

    let liturgy_title = Element::section_title(l("Sacred Liturgy", "Sagrada Liturgia"));
    let liturgy = std::iter::once(liturgy_title).chain(
        [
            text_row(l("First Reading:", "Primera lectura:"), &pericope(&w.first_reading)),
            person_row(
                l("First Reading Lector:", "Lector de la primera lectura:"),
                w.first_reader.as_ref(),
            ),
            text_row(l("Psalm:", "Salmo:"), &pericope(&w.psalm)),
            psalm_choice,
            text_row(l("Second Reading:", "Segunda lectura:"), &pericope(&w.second_reading)),
            person_row(
                l("Second Reading Lector:", "Lector de la segunda lectura:"),
                w.second_reader.as_ref(),
            ),
            text_row(l("Gospel Reading:", "Evangelio:"), &pericope(&w.gospel_reading)),
            person_row(l("Petitions Read By:", "Peticiones leídas por:"), w.petitions_reader()),
            non_blank(&w.petitions).map(|p| {
                Element::info_row(l("Additional Petitions:", "Peticiones adicionales:"), p)
            }),
        ]
        .into_iter()
        .flatten(),
    );

    let elements = header(w, language)
        .into_iter()
        .chain(rehearsal)
        .chain(ceremony)
        .chain(liturgy)
        .collect();
    Section::new("summary", elements)
}

fn liturgy_sections(w: &Wedding, language: Language) -> Vec<Section> {
    let l = |en, es| tr(language, en, es);
    let thanks = l("Thanks be to God.", "Te alabamos, Señor.");

    [
        Some(Section::new("readings-header", header(w, language))),
        reading_section(
            ReadingConfig {
                id: "first-reading",
                title: l("FIRST READING", "PRIMERA LECTURA"),
                reading: w.first_reading.as_ref(),
                reader: w.first_reader.as_ref(),
                response: Some(thanks),
                gospel: false,
                page_break_before: false,
            },
            language,
        ),
        psalm_section(w.psalm.as_ref(), w.psalm_reader.as_ref(), w.psalm_is_sung, language),
        reading_section(
            ReadingConfig {
                id: "second-reading",
                title: l("SECOND READING", "SEGUNDA LECTURA"),
                reading: w.second_reading.as_ref(),
                reader: w.second_reader.as_ref(),
                response: Some(thanks),
                gospel: false,
                page_break_before: true,
            },
            language,
        ),
        reading_section(
            ReadingConfig {
                id: "gospel",
                title: l("GOSPEL", "EVANGELIO"),
                reading: w.gospel_reading.as_ref(),
                reader: w.presider.as_ref(),
                response: None,
                gospel: true,
                page_break_before: true,
            },
            language,
        ),
        petitions_section(w.petitions.as_deref(), w.petitions_reader(), language),
        announcements_section(w.announcements.as_deref(), language),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn full_script(w: &Wedding, language: Language) -> Vec<Section> {
    std::iter::once(summary_section(w, language))
        .chain(liturgy_sections(w, language))
        .collect()
}

fn summary_only(w: &Wedding, language: Language) -> Vec<Section> {
    vec![summary_section(w, language)]
}

pub static WEDDING_TEMPLATES: Lazy<Registry<Wedding>> = Lazy::new(|| {
    Registry::new(
        "wedding",
        Template::new(
            "wedding-full-script-english",
            "Full Ceremony Script (English)",
            Language::En,
            full_script,
        ),
        vec![
            Template::new(
                "wedding-full-script-spanish",
                "Guion completo de la ceremonia (Español)",
                Language::Es,
                full_script,
            ),
            Template::new(
                "wedding-summary-english",
                "Summary (English)",
                Language::En,
                summary_only,
            ),
        ],
    )
});

pub fn build_wedding(wedding: &Wedding, template_id: Option<&str>) -> DocumentModel {
    WEDDING_TEMPLATES.build(wedding, template_id)
}
