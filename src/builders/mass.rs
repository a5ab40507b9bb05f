//! Mass scripts: summary, order of the rites, petitions.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::builders::shared::{
    event_date_row, location_row, non_blank, person_row, petitions_section, titled_group,
};
use crate::builders::{tr, Record, Registry, Template};
use crate::document::{DocumentModel, Element, Formatting, Language, Section, SpacerSize};
use crate::entity::{CalendarEvent, Person};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mass {
    pub id: String,
    pub event: Option<CalendarEvent>,
    pub liturgical_event_name: Option<String>,
    pub presider: Option<Person>,
    pub homilist: Option<Person>,
    pub pre_mass_announcement_person: Option<Person>,
    pub lead_musician: Option<Person>,
    pub cantor: Option<Person>,
    /// Who the Mass is offered for.
    pub mass_intention: Option<String>,
    pub announcements: Option<String>,
    pub petitions: Option<String>,
    pub petition_reader: Option<Person>,
}

impl Mass {
    fn distinct_homilist(&self) -> Option<&Person> {
        self.homilist
            .as_ref()
            .filter(|h| self.presider.as_ref().map_or(true, |p| p.id != h.id))
    }

    fn preacher(&self) -> Option<&Person> {
        self.homilist.as_ref().or(self.presider.as_ref())
    }
}

impl Record for Mass {
    const DOCUMENT_TYPE: &'static str = "mass";

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self, language: Language) -> String {
        match non_blank(&self.liturgical_event_name) {
            Some(name) => name.to_string(),
            None => tr(language, "Mass", "Misa").to_string(),
        }
    }

    fn subtitle(&self, language: Language) -> Option<String> {
        self.event
            .as_ref()
            .map(|e| e.date_time_text(language))
            .filter(|text| !text.is_empty())
    }
}

fn rubric(text: &str) -> Element {
    Element::styled_text(format!("{{red}}[{text}]{{/red}}"), vec![Formatting::Italic])
}

fn priest(language: Language, text: &str) -> Element {
    Element::PriestDialogue {
        text: format!("{{red}}{}{{/red}} {}", tr(language, "Priest:", "Sacerdote:"), text),
    }
}

fn people(language: Language, text: &str) -> Element {
    Element::response(tr(language, "People:", "Pueblo:"), text)
}

fn summary_section(m: &Mass, language: Language) -> Section {
    let l = |en, es| tr(language, en, es);

    let header = [
        Some(Element::EventTitle { text: m.title(language) }),
        m.subtitle(language).map(|text| Element::EventDateTime { text }),
    ];

    let information = titled_group(
        l("Mass Information", "Información de la Misa"),
        vec![
            event_date_row(l("Date & Time:", "Fecha y hora:"), m.event.as_ref(), language),
            location_row(
                l("Location:", "Lugar:"),
                m.event.as_ref().and_then(|e| e.location.as_ref()),
            ),
            non_blank(&m.liturgical_event_name).map(|name| {
                Element::info_row(l("Liturgical Event:", "Celebración litúrgica:"), name)
            }),
            non_blank(&m.mass_intention).map(|name| {
                Element::info_row(l("Mass Intention:", "Intención de la Misa:"), name)
            }),
        ],
    );

    let ministers = titled_group(
        l("Ministers", "Ministros"),
        vec![
            person_row(l("Presider:", "Celebrante:"), m.presider.as_ref()),
            person_row(l("Homilist:", "Homilista:"), m.distinct_homilist()),
            person_row(
                l("Pre-Mass Announcements:", "Anuncios antes de la Misa:"),
                m.pre_mass_announcement_person.as_ref(),
            ),
            person_row(l("Lead Musician:", "Músico principal:"), m.lead_musician.as_ref()),
            person_row(l("Cantor:", "Cantor:"), m.cantor.as_ref()),
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

fn introductory_rites(m: &Mass, language: Language) -> Section {
    let l = |en, es| tr(language, en, es);

    let announcements: Vec<Element> =
        if m.announcements.is_some() || m.pre_mass_announcement_person.is_some() {
            [
                Some(Element::ReadingTitle { text: l("Announcements", "Anuncios").to_string() }),
                m.pre_mass_announcement_person
                    .as_ref()
                    .map(|p| Element::ReaderName { text: p.display_name() }),
                non_blank(&m.announcements).map(|t| Element::ReadingText { text: t.to_string() }),
            ]
            .into_iter()
            .flatten()
            .collect()
        } else {
            Vec::new()
        };

    let opening = vec![
        Element::section_title(l("INTRODUCTORY RITES", "RITOS INICIALES")),
        rubric(l(
            "The priest and ministers enter in procession",
            "El sacerdote y los ministros entran en procesión",
        )),
        Element::ReadingTitle { text: l("Entrance Hymn", "Canto de entrada").to_string() },
        rubric(l(
            "The entrance hymn is sung as the procession enters",
            "Se canta el canto de entrada durante la procesión",
        )),
        Element::ReadingTitle { text: l("Greeting", "Saludo").to_string() },
        priest(
            language,
            l(
                "In the name of the Father, and of the Son, and of the Holy Spirit.",
                "En el nombre del Padre, y del Hijo, y del Espíritu Santo.",
            ),
        ),
        people(language, l("Amen.", "Amén.")),
        priest(
            language,
            l(
                "The grace of our Lord Jesus Christ, and the love of God, and the communion of the Holy Spirit be with you all.",
                "La gracia de nuestro Señor Jesucristo, el amor del Padre y la comunión del Espíritu Santo estén con todos ustedes.",
            ),
        ),
        people(language, l("And with your spirit.", "Y con tu espíritu.")),
    ];

    let closing = vec![
        Element::ReadingTitle { text: l("Penitential Act", "Acto penitencial").to_string() },
        priest(
            language,
            l(
                "Brothers and sisters, let us acknowledge our sins, and so prepare ourselves to celebrate the sacred mysteries.",
                "Hermanos, para celebrar dignamente estos sagrados misterios, reconozcamos nuestros pecados.",
            ),
        ),
        rubric(l("Brief pause for silence", "Breve pausa en silencio")),
        Element::ReadingTitle { text: "Gloria".to_string() },
        rubric(l("The Gloria is sung or said", "Se canta o se dice el Gloria")),
        Element::ReadingTitle { text: l("Collect", "Oración colecta").to_string() },
        priest(language, l("Let us pray.", "Oremos.")),
        rubric(l(
            "The priest says the Collect of the day",
            "El sacerdote dice la oración colecta del día",
        )),
    ];

    Section::new(
        "introductory-rites",
        opening.into_iter().chain(announcements).chain(closing).collect(),
    )
    .with_page_break_before()
}

fn liturgy_of_the_word(m: &Mass, language: Language) -> Section {
    let l = |en, es| tr(language, en, es);

    let homily: Vec<Element> = [
        Some(Element::ReadingTitle { text: l("Homily", "Homilía").to_string() }),
        m.preacher().map(|p| Element::ReaderName { text: p.display_name() }),
        Some(rubric(l("Homily", "Homilía"))),
    ]
    .into_iter()
    .flatten()
    .collect();

    let readings = vec![
        Element::section_title(l("LITURGY OF THE WORD", "LITURGIA DE LA PALABRA")),
        Element::ReadingTitle { text: l("First Reading", "Primera lectura").to_string() },
        rubric(l(
            "The first reading is proclaimed from the Lectionary",
            "Se proclama la primera lectura del Leccionario",
        )),
        Element::ReadingTitle { text: l("Responsorial Psalm", "Salmo responsorial").to_string() },
        rubric(l(
            "The responsorial psalm is sung or recited",
            "Se canta o se recita el salmo responsorial",
        )),
        Element::ReadingTitle { text: l("Second Reading", "Segunda lectura").to_string() },
        rubric(l(
            "The second reading is proclaimed from the Lectionary",
            "Se proclama la segunda lectura del Leccionario",
        )),
        Element::ReadingTitle {
            text: l("Gospel Acclamation", "Aclamación antes del Evangelio").to_string(),
        },
        rubric(l("All stand", "Todos se ponen de pie")),
        people(language, l("Alleluia, alleluia.", "Aleluya, aleluya.")),
        Element::ReadingTitle { text: l("Gospel", "Evangelio").to_string() },
        priest(language, l("The Lord be with you.", "El Señor esté con ustedes.")),
        people(language, l("And with your spirit.", "Y con tu espíritu.")),
        rubric(l("The Gospel is proclaimed", "Se proclama el Evangelio")),
        Element::spacer(SpacerSize::Medium),
    ];

    Section::new("liturgy", readings.into_iter().chain(homily).collect()).with_page_break_before()
}

fn full_script(m: &Mass, language: Language) -> Vec<Section> {
    [
        Some(summary_section(m, language)),
        Some(introductory_rites(m, language)),
        Some(liturgy_of_the_word(m, language)),
        petitions_section(m.petitions.as_deref(), m.petition_reader.as_ref(), language),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub static MASS_TEMPLATES: Lazy<Registry<Mass>> = Lazy::new(|| {
    Registry::new(
        "mass",
        Template::new("mass-english", "Full Script (English)", Language::En, full_script),
        vec![Template::new(
            "mass-spanish",
            "Guion completo (Español)",
            Language::Es,
            full_script,
        )],
    )
});

pub fn build_mass(mass: &Mass, template_id: Option<&str>) -> DocumentModel {
    MASS_TEMPLATES.build(mass, template_id)
}
