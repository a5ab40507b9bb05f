//! Section builders reused across the liturgical domains.

use serde::{Deserialize, Serialize};

use crate::builders::tr;
use crate::document::{Element, Language, Section, SpacerSize};
use crate::entity::{CalendarEvent, Location, Person};

/// A scripture reading as stored in the content library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pericope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
}

/// What a reading section is built from.
pub struct ReadingConfig<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub reading: Option<&'a Reading>,
    pub reader: Option<&'a Person>,
    /// The people's reply after the reading, if any.
    pub response: Option<&'a str>,
    /// Adds the gospel dialogue and acclamations.
    pub gospel: bool,
    pub page_break_before: bool,
}

pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn people(language: Language) -> &'static str {
    tr(language, "People:", "Pueblo:")
}

fn reader_label(language: Language) -> &'static str {
    tr(language, "Reader:", "Lector:")
}

/// The people's response to each petition.
pub fn petition_response(language: Language) -> &'static str {
    tr(language, "Lord, hear our prayer.", "Te rogamos, óyenos.")
}

pub fn person_row(label: &str, person: Option<&Person>) -> Option<Element> {
    person.map(|p| Element::info_row(label, p.display_name()))
}

/// "First Last (phone)" when a phone number is on file.
pub fn name_with_phone(person: &Person) -> String {
    match person.phone_number.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        Some(phone) => format!("{} ({})", person.display_name(), phone),
        None => person.display_name(),
    }
}

pub fn text_row(label: &str, value: &Option<String>) -> Option<Element> {
    non_blank(value).map(|v| Element::info_row(label, v))
}

pub fn location_row(label: &str, location: Option<&Location>) -> Option<Element> {
    location.map(|l| Element::info_row(label, l.name_with_address()))
}

pub fn event_date_row(
    label: &str,
    event: Option<&CalendarEvent>,
    language: Language,
) -> Option<Element> {
    event
        .map(|e| e.date_time_text(language))
        .filter(|text| !text.is_empty())
        .map(|text| Element::info_row(label, text))
}

pub fn event_location_row(label: &str, event: Option<&CalendarEvent>) -> Option<Element> {
    location_row(label, event.and_then(|e| e.location.as_ref()))
}

/// Drops a heading when nothing follows it.
pub fn titled_group(title: &str, rows: Vec<Option<Element>>) -> Vec<Element> {
    let rows: Vec<Element> = rows.into_iter().flatten().collect();
    if rows.is_empty() {
        return rows;
    }
    std::iter::once(Element::section_title(title)).chain(rows).collect()
}

/// A reading with its title, pericope, reader, text and responses.
///
/// Returns `None` when no reading is selected.
pub fn reading_section(config: ReadingConfig<'_>, language: Language) -> Option<Section> {
    let reading = config.reading?;
    let gospel = config.gospel;
    let response = config.response;

    let elements: Vec<Element> = [
        Some(Element::ReadingTitle { text: config.title.to_string() }),
        Some(Element::Pericope {
            text: non_blank(&reading.pericope)
                .unwrap_or(tr(language, "No pericope", "Sin cita"))
                .to_string(),
        }),
        config.reader.map(|r| Element::ReaderName { text: r.display_name() }),
        gospel.then(|| Element::PriestDialogue {
            text: tr(
                language,
                "{red}Priest:{/red} The Lord be with you.",
                "{red}Sacerdote:{/red} El Señor esté con ustedes.",
            )
            .to_string(),
        }),
        gospel.then(|| {
            Element::response(
                people(language),
                tr(language, "And with your spirit.", "Y con tu espíritu."),
            )
        }),
        gospel.then(|| {
            Element::response(
                people(language),
                tr(language, "Glory to you, O Lord.", "Gloria a ti, Señor."),
            )
        }),
        non_blank(&reading.introduction).map(|t| Element::Introduction { text: t.to_string() }),
        Some(Element::ReadingText {
            text: non_blank(&reading.text)
                .unwrap_or(tr(language, "No reading text", "Sin texto"))
                .to_string(),
        }),
        non_blank(&reading.conclusion).map(|t| Element::Conclusion { text: t.to_string() }),
        response.map(|r| Element::response(people(language), r)),
        gospel.then(|| {
            Element::response(
                people(language),
                tr(language, "Praise to you, Lord Jesus Christ.", "Gloria a ti, Señor Jesús."),
            )
        }),
    ]
    .into_iter()
    .flatten()
    .collect();

    let section = Section::new(config.id, elements);
    Some(if config.page_break_before {
        section.with_page_break_before()
    } else {
        section
    })
}

/// The responsorial psalm. A sung psalm names no reader.
pub fn psalm_section(
    psalm: Option<&Reading>,
    reader: Option<&Person>,
    is_sung: bool,
    language: Language,
) -> Option<Section> {
    let psalm = psalm?;
    let reader_name = if is_sung {
        Some(tr(language, "Sung", "Cantado").to_string())
    } else {
        reader.map(Person::display_name)
    };

    let elements: Vec<Element> = [
        Some(Element::ReadingTitle { text: tr(language, "Psalm", "Salmo").to_string() }),
        Some(Element::Pericope {
            text: non_blank(&psalm.pericope)
                .unwrap_or(tr(language, "No pericope", "Sin cita"))
                .to_string(),
        }),
        reader_name.map(|text| Element::ReaderName { text }),
        non_blank(&psalm.introduction).map(|t| Element::Introduction { text: t.to_string() }),
        Some(Element::ReadingText {
            text: non_blank(&psalm.text)
                .unwrap_or(tr(language, "No psalm text", "Sin texto del salmo"))
                .to_string(),
        }),
        non_blank(&psalm.conclusion).map(|t| Element::Conclusion { text: t.to_string() }),
    ]
    .into_iter()
    .flatten()
    .collect();

    Some(Section::new("psalm", elements).with_page_break_before())
}

/// Chooses who reads the petitions.
pub fn petitions_reader<'a>(
    read_by_second_reader: bool,
    second_reader: Option<&'a Person>,
    petition_reader: Option<&'a Person>,
) -> Option<&'a Person> {
    match (read_by_second_reader, second_reader) {
        (true, Some(second)) => Some(second),
        _ => petition_reader,
    }
}

/// The prayers of the faithful, one petition per non-blank line.
pub fn petitions_section(
    petitions: Option<&str>,
    reader: Option<&Person>,
    language: Language,
) -> Option<Section> {
    let petitions = petitions.map(str::trim).filter(|p| !p.is_empty())?;
    let response = petition_response(language);

    let header = [
        Some(Element::ReadingTitle { text: tr(language, "Petitions", "Peticiones").to_string() }),
        reader.map(|r| Element::ReaderName { text: r.display_name() }),
        Some(Element::spacer(SpacerSize::Medium)),
        Some(Element::Petition {
            label: reader_label(language).to_string(),
            text: match language {
                Language::En => format!("The response is \"{response}\" [Pause]"),
                Language::Es => format!("La respuesta es \"{response}\" [Pausa]"),
            },
        }),
    ];

    let lines = petitions
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .flat_map(|line| {
            let line = line.strip_suffix('.').unwrap_or(line);
            [
                Element::Petition {
                    label: reader_label(language).to_string(),
                    text: match language {
                        Language::En => format!("{line}, let us pray to the Lord."),
                        Language::Es => format!("{line}, roguemos al Señor."),
                    },
                },
                Element::response(people(language), response),
            ]
        });

    let elements = header.into_iter().flatten().chain(lines).collect();
    Some(
        Section::new("petitions", elements)
            .with_page_break_before()
            .with_page_break_after(),
    )
}

pub fn announcements_section(announcements: Option<&str>, language: Language) -> Option<Section> {
    let text = announcements.map(str::trim).filter(|a| !a.is_empty())?;
    Some(Section::new(
        "announcements",
        vec![
            Element::section_title(tr(language, "Announcements", "Anuncios")),
            Element::ReadingText { text: text.to_string() },
        ],
    ))
}
