//! Funeral scripts.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::builders::shared::{
    announcements_section, event_date_row, event_location_row, name_with_phone, person_row,
    petitions_reader, petitions_section, psalm_section, reading_section, text_row, titled_group,
    Reading, ReadingConfig,
};
use crate::builders::{tr, Record, Registry, Template};
use crate::document::{DocumentModel, Element, Language, Section};
use crate::entity::{CalendarEvent, Person};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Funeral {
    pub id: String,
    pub deceased: Option<Person>,
    pub family_contact: Option<Person>,
    pub coordinator: Option<Person>,
    pub presider: Option<Person>,
    pub homilist: Option<Person>,
    pub lead_musician: Option<Person>,
    pub cantor: Option<Person>,
    pub funeral_event: Option<CalendarEvent>,
    pub funeral_meal_event: Option<CalendarEvent>,
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
    pub note: Option<String>,
}

impl Funeral {
    /// The homilist, only when someone other than the presider preaches.
    fn distinct_homilist(&self) -> Option<&Person> {
        self.homilist
            .as_ref()
            .filter(|h| self.presider.as_ref().map_or(true, |p| p.id != h.id))
    }
}

impl Record for Funeral {
    const DOCUMENT_TYPE: &'static str = "funeral";

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self, language: Language) -> String {
        match &self.deceased {
            Some(deceased) => format!(
                "{} {}",
                tr(language, "Funeral Liturgy for", "Liturgia funeral por"),
                deceased.display_name()
            ),
            None => tr(language, "Funeral", "Funeral").to_string(),
        }
    }

    fn subtitle(&self, language: Language) -> Option<String> {
        self.funeral_event
            .as_ref()
            .map(|e| e.date_time_text(language))
            .filter(|text| !text.is_empty())
    }
}

fn summary_section(f: &Funeral, language: Language) -> Section {
    let l = |en, es| tr(language, en, es);

    let header = [
        Some(Element::EventTitle { text: f.title(language) }),
        f.subtitle(language).map(|text| Element::EventDateTime { text }),
    ];

    let information = titled_group(
        l("Funeral Information", "Información del funeral"),
        vec![
            person_row(l("Deceased:", "Difunto(a):"), f.deceased.as_ref()),
            f.family_contact.as_ref().map(|p| {
                Element::info_row(l("Family Contact:", "Contacto familiar:"), name_with_phone(p))
            }),
            person_row(l("Coordinator:", "Coordinador(a):"), f.coordinator.as_ref()),
            event_date_row(
                l("Funeral Date & Time:", "Fecha y hora:"),
                f.funeral_event.as_ref(),
                language,
            ),
            event_location_row(
                l("Funeral Location:", "Lugar del funeral:"),
                f.funeral_event.as_ref(),
            ),
            event_date_row(
                l("Funeral Meal:", "Comida del funeral:"),
                f.funeral_meal_event.as_ref(),
                language,
            ),
            event_location_row(
                l("Funeral Meal Location:", "Lugar de la comida:"),
                f.funeral_meal_event.as_ref(),
            ),
            text_row(l("Note:", "Nota:"), &f.note),
        ],
    );

    let ministers = titled_group(
        l("Ministers", "Ministros"),
        vec![
            person_row(l("Presider:", "Celebrante:"), f.presider.as_ref()),
            person_row(l("Homilist:", "Homilista:"), f.distinct_homilist()),
            person_row(l("Lead Musician:", "Músico principal:"), f.lead_musician.as_ref()),
            person_row(l("Cantor:", "Cantor:"), f.cantor.as_ref()),
            person_row(
                l("First Reading Lector:", "Lector de la primera lectura:"),
                f.first_reader.as_ref(),
            ),
            person_row(
                l("Second Reading Lector:", "Lector de la segunda lectura:"),
                f.second_reader.as_ref(),
            ),
            person_row(l("Petitions Read By:", "Peticiones leídas por:"), petitions_reader_of(f)),
        ],
    );

    let elements = header
        .into_iter()
        .flatten()
        .chain(information)
        .chain(ministers)
        .collect();
    Section::new("summary", elements)
}

fn petitions_reader_of(f: &Funeral) -> Option<&Person> {
    petitions_reader(
        f.petitions_read_by_second_reader,
        f.second_reader.as_ref(),
        f.petition_reader.as_ref(),
    )
}

fn full_script(f: &Funeral, language: Language) -> Vec<Section> {
    let l = |en, es| tr(language, en, es);
    let thanks = l("Thanks be to God.", "Te alabamos, Señor.");

    [
        Some(summary_section(f, language)),
        reading_section(
            ReadingConfig {
                id: "first-reading",
                title: l("FIRST READING", "PRIMERA LECTURA"),
                reading: f.first_reading.as_ref(),
                reader: f.first_reader.as_ref(),
                response: Some(thanks),
                gospel: false,
                page_break_before: true,
            },
            language,
        ),
        psalm_section(f.psalm.as_ref(), f.psalm_reader.as_ref(), f.psalm_is_sung, language),
        reading_section(
            ReadingConfig {
                id: "second-reading",
                title: l("SECOND READING", "SEGUNDA LECTURA"),
                reading: f.second_reading.as_ref(),
                reader: f.second_reader.as_ref(),
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
                reading: f.gospel_reading.as_ref(),
                reader: f.presider.as_ref(),
                response: None,
                gospel: true,
                page_break_before: true,
            },
            language,
        ),
        petitions_section(f.petitions.as_deref(), petitions_reader_of(f), language),
        announcements_section(f.announcements.as_deref(), language),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub static FUNERAL_TEMPLATES: Lazy<Registry<Funeral>> = Lazy::new(|| {
    Registry::new(
        "funeral",
        Template::new(
            "funeral-full-script-english",
            "Full Funeral Script (English)",
            Language::En,
            full_script,
        ),
        vec![Template::new(
            "funeral-full-script-spanish",
            "Guion completo del funeral (Español)",
            Language::Es,
            full_script,
        )],
    )
});

pub fn build_funeral(funeral: &Funeral, template_id: Option<&str>) -> DocumentModel {
    FUNERAL_TEMPLATES.build(funeral, template_id)
}
