//! Documents built from authored event scripts.
//!
//! Each script section is substituted, read as markdown and emitted as one
//! document section headed by the section name.

use log::debug;

use crate::builders::event::EventRecord;
use crate::builders::Record;
use crate::document::{DocumentModel, Language, Section};
use crate::markdown::markdown_to_elements;
use crate::schema::Script;
use crate::substitute::{Parish, Substituter};

/// Builds the document for `script` over the resolved fields of `record`.
///
/// # Arguments
/// * `record` - Event type and resolved field values
/// * `script` - One of the event type's scripts
/// * `parish` - Host context for the `parish.*` placeholders
/// * `language` - Formatting language for dates and labels
///
/// # Returns
/// * `DocumentModel` - One section per script section, in section order
pub fn build_script_document(
    record: &EventRecord,
    script: &Script,
    parish: Option<&Parish>,
    language: Language,
) -> DocumentModel {
    let substituter = Substituter::new(&record.fields)
        .with_parish(parish)
        .with_language(language);

    let sections = script
        .ordered_sections()
        .into_iter()
        .enumerate()
        .map(|(index, section)| {
            let text = substituter.substitute(&section.content);
            Section {
                id: format!("section-{}", index + 1),
                title: Some(section.name.clone()),
                page_break_before: section.page_break_before,
                page_break_after: section.page_break_after,
                elements: markdown_to_elements(&text),
            }
        })
        .collect::<Vec<_>>();

    debug!(
        "Built script '{}' for '{}' with {} sections",
        script.name,
        record.event_type.name,
        sections.len()
    );

    DocumentModel {
        id: record.id.clone(),
        document_type: "event-script".to_string(),
        language,
        template_id: script.name.clone(),
        title: record.title(language),
        subtitle: record.subtitle(language),
        sections,
    }
}
