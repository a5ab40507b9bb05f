//! Mass intention summaries.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::builders::shared::{
    event_date_row, event_location_row, name_with_phone, non_blank, text_row,
};
use crate::builders::{tr, Record, Registry, Template};
use crate::document::{DocumentModel, Element, Language, Section};
use crate::entity::{CalendarEvent, Person};
use crate::formatters::format_date;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassIntention {
    pub id: String,
    pub mass_offered_for: Option<String>,
    pub requested_by: Option<Person>,
    /// The Mass the intention is scheduled for.
    pub calendar_event: Option<CalendarEvent>,
    pub date_requested: Option<String>,
    pub stipend_in_cents: Option<i64>,
    pub status: Option<String>,
    pub note: Option<String>,
}

impl Record for MassIntention {
    const DOCUMENT_TYPE: &'static str = "mass-intention";

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self, language: Language) -> String {
        match non_blank(&self.mass_offered_for) {
            Some(offered_for) => format!(
                "{} {}",
                tr(language, "Mass Intention for", "Intención de Misa por"),
                offered_for
            ),
            None => tr(language, "Mass Intention", "Intención de Misa").to_string(),
        }
    }

    fn subtitle(&self, language: Language) -> Option<String> {
        self.calendar_event
            .as_ref()
            .map(|e| e.date_time_text(language))
            .filter(|text| !text.is_empty())
    }
}

fn format_stipend(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, (cents % 100).abs())
}

fn summary(m: &MassIntention, language: Language) -> Vec<Section> {
    let l = |en, es| tr(language, en, es);

    let rows = [
        Some(Element::EventTitle { text: m.title(language) }),
        m.subtitle(language).map(|text| Element::EventDateTime { text }),
        Some(Element::section_title(l("Intention Details", "Detalles de la intención"))),
        text_row(l("Offered For:", "Ofrecida por:"), &m.mass_offered_for),
        m.requested_by
            .as_ref()
            .map(|p| Element::info_row(l("Requested By:", "Solicitada por:"), name_with_phone(p))),
        non_blank(&m.date_requested).map(|d| {
            Element::info_row(
                l("Date Requested:", "Fecha de solicitud:"),
                format_date(d, language),
            )
        }),
        event_date_row(
            l("Scheduled Mass:", "Misa programada:"),
            m.calendar_event.as_ref(),
            language,
        ),
        event_location_row(l("Location:", "Lugar:"), m.calendar_event.as_ref()),
        m.stipend_in_cents
            .map(|c| Element::info_row(l("Stipend:", "Estipendio:"), format_stipend(c))),
        text_row(l("Status:", "Estado:"), &m.status),
        text_row(l("Note:", "Nota:"), &m.note),
    ];

    vec![Section::new("summary", rows.into_iter().flatten().collect())]
}

pub static MASS_INTENTION_TEMPLATES: Lazy<Registry<MassIntention>> = Lazy::new(|| {
    Registry::new(
        "mass-intention",
        Template::new(
            "mass-intention-summary-english",
            "Summary (English)",
            Language::En,
            summary,
        ),
        vec![Template::new(
            "mass-intention-summary-spanish",
            "Resumen (Español)",
            Language::Es,
            summary,
        )],
    )
});

pub fn build_mass_intention(intention: &MassIntention, template_id: Option<&str>) -> DocumentModel {
    MASS_INTENTION_TEMPLATES.build(intention, template_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_stipend() {
        assert_eq!(format_stipend(1500), "$15.00");
        assert_eq!(format_stipend(1005), "$10.05");
    }
}
