use ordo::builders::baptism::{build_baptism, Baptism};
use ordo::builders::catalog;
use ordo::builders::event::{build_event, EventRecord};
use ordo::builders::mass_intention::MassIntention;
use ordo::builders::script::build_script_document;
use ordo::builders::shared::Reading;
use ordo::builders::wedding::{build_wedding, Wedding, WEDDING_TEMPLATES};
use ordo::builders::{DomainRecord, Record};
use ordo::document::{Element, Language, SpacerSize};
use ordo::entity::{CalendarEvent, Entity, Location, Person};
use ordo::resolver::{ResolvedField, ResolvedFields};
use ordo::schema::{EventType, FieldKind};
use ordo::substitute::Parish;
use serde_json::{json, Value};

fn couple() -> Wedding {
    Wedding {
        id: "0f8fad5b-d9cb-469f-a165-70867728950e".to_string(),
        bride: Some(Person::new("p1", "Maria", "Lopez")),
        groom: Some(Person::new("p2", "John", "Smith")),
        ..Default::default()
    }
}

fn section_ids(sections: &[ordo::document::Section]) -> Vec<&str> {
    sections.iter().map(|s| s.id.as_str()).collect()
}

#[test]
fn test_unknown_template_falls_back_to_default() {
    let wedding = couple();
    let unknown = build_wedding(&wedding, Some("wedding-full-script-klingon"));
    let absent = build_wedding(&wedding, None);

    assert_eq!(unknown.template_id, "wedding-full-script-english");
    assert_eq!(absent.template_id, "wedding-full-script-english");
    assert_eq!(unknown, absent);
}

#[test]
fn test_template_selects_language() {
    let wedding = Wedding::default();
    let document = build_wedding(&wedding, Some("wedding-full-script-spanish"));
    assert_eq!(document.language, Language::Es);
    assert_eq!(document.title, "Boda");
    assert_eq!(document.subtitle.as_deref(), Some("Falta fecha y hora"));
}

#[test]
fn test_build_is_deterministic() {
    let mut wedding = couple();
    wedding.petitions = Some("For the couple\nFor their families".to_string());
    wedding.first_reading = Some(Reading {
        pericope: Some("Ruth 1:16-17".to_string()),
        text: Some("Wherever you go, I will go.".to_string()),
        ..Default::default()
    });

    assert_eq!(build_wedding(&wedding, None), build_wedding(&wedding, None));
}

#[test]
fn test_missing_data_omits_sections() {
    let document = build_wedding(&couple(), None);
    assert_eq!(section_ids(&document.sections), vec!["summary", "readings-header"]);

    let mut wedding = couple();
    wedding.gospel_reading = Some(Reading {
        pericope: Some("John 15:9-12".to_string()),
        ..Default::default()
    });
    wedding.announcements = Some("Reception follows in the hall.".to_string());
    let document = build_wedding(&wedding, None);
    assert_eq!(
        section_ids(&document.sections),
        vec!["summary", "readings-header", "gospel", "announcements"]
    );
    assert!(document.sections[2].page_break_before);
}

#[test]
fn test_summary_skips_absent_people() {
    let document = build_wedding(&couple(), Some("wedding-summary-english"));
    let summary = &document.sections[0];

    assert!(summary.elements.contains(&Element::info_row("Bride:", "Maria Lopez")));
    assert!(!summary
        .elements
        .iter()
        .any(|e| matches!(e, Element::InfoRow { label, .. } if label == "Presider:")));
    // No rehearsal data, so no rehearsal heading either.
    assert!(!summary.elements.contains(&Element::section_title("Rehearsal")));
}

#[test]
fn test_petitions_read_by_second_reader() {
    let mut wedding = couple();
    wedding.petitions = Some("For the couple".to_string());
    wedding.second_reader = Some(Person::new("p5", "Ana", "Cruz"));
    wedding.petition_reader = Some(Person::new("p6", "Luis", "Vega"));
    wedding.petitions_read_by_second_reader = true;

    let document = build_wedding(&wedding, None);
    let petitions = document.sections.iter().find(|s| s.id == "petitions").unwrap();
    assert!(petitions
        .elements
        .contains(&Element::ReaderName { text: "Ana Cruz".to_string() }));
    assert!(petitions
        .elements
        .contains(&Element::response("People:", "Lord, hear our prayer.")));
}

#[test]
fn test_blank_baptism_sections_are_dropped() {
    let baptism = Baptism {
        id: "b1".to_string(),
        child: Some(Person::new("c1", "Sofia", "Lopez")),
        ..Default::default()
    };
    let document = build_baptism(&baptism, Some("no-such-template"));
    assert_eq!(document.template_id, "baptism-summary-english");
    assert_eq!(section_ids(&document.sections), vec!["summary"]);
}

#[test]
fn test_catalog_lists_defaults_first() {
    let catalog = catalog();
    let defaults: Vec<(&str, &str)> = catalog
        .iter()
        .map(|(domain, templates)| (*domain, templates[0].0))
        .collect();
    assert_eq!(
        defaults,
        vec![
            ("wedding", "wedding-full-script-english"),
            ("funeral", "funeral-full-script-english"),
            ("baptism", "baptism-summary-english"),
            ("mass", "mass-english"),
            ("mass-intention", "mass-intention-summary-english"),
            ("event", "event-full-script-english"),
        ]
    );
    assert_eq!(WEDDING_TEMPLATES.templates().count(), 3);
}

#[test]
fn test_domain_record_from_json() {
    let record: DomainRecord = serde_json::from_value(json!({
        "domain": "mass-intention",
        "id": "abc",
        "mass_offered_for": "John Doe"
    }))
    .unwrap();
    assert_eq!(record.entity_type_name(), "MassIntention");
    assert_eq!(record.build(None).template_id, "mass-intention-summary-english");
    assert_eq!(MassIntention::default().entity_type_name(), "MassIntention");
}

fn quinceanera() -> EventRecord {
    let event_type: EventType = serde_json::from_value(json!({
        "name": "Quinceañera",
        "fields": [
            { "property_name": "celebration", "name": "Celebration", "type": "calendar_event", "is_primary": true },
            { "property_name": "quinceanera", "name": "Quinceañera", "type": "person" },
            { "property_name": "gap", "name": "", "type": "spacer" },
            { "property_name": "theme", "name": "Theme", "type": "text" },
            { "property_name": "court_size", "name": "Court Size", "type": "number" }
        ],
        "scripts": [{
            "name": "Ceremony",
            "sections": [
                { "name": "Blessing", "content": "{red}Priest:{/red} Let us pray for {{quinceanera}}.", "order": 2, "page_break_before": true },
                { "name": "Welcome", "content": "# Welcome\n\nWelcome to {{parish.name}}.\n\n- {{theme}}", "order": 1 }
            ]
        }]
    }))
    .unwrap();

    let celebration = CalendarEvent {
        id: "e1".to_string(),
        start_date: Some("2024-06-15".to_string()),
        start_time: Some("14:30:00".to_string()),
        location: Some(Location::named("l1", "St. Anne")),
    };
    let fields: ResolvedFields = [
        ResolvedField {
            property_name: "celebration".to_string(),
            kind: FieldKind::CalendarEvent,
            raw_value: json!("e1"),
            resolved_value: Some(Entity::CalendarEvent(celebration)),
        },
        ResolvedField {
            property_name: "quinceanera".to_string(),
            kind: FieldKind::Person,
            raw_value: json!("p1"),
            resolved_value: Some(Entity::Person(Person::new("p1", "Sofia", "Lopez"))),
        },
        ResolvedField::raw("theme", FieldKind::Text, json!("Garden")),
        ResolvedField::raw("court_size", FieldKind::Number, Value::Null),
    ]
    .into_iter()
    .map(|f| (f.property_name.clone(), f))
    .collect();

    EventRecord::new("7d444840-9dc0-11d1-b245-5ffdce74fad2", event_type, fields)
}

#[test]
fn test_generic_event_follows_declared_order() {
    let document = build_event(&quinceanera(), None);
    assert_eq!(document.title, "Quinceañera Script");
    assert_eq!(
        document.subtitle.as_deref(),
        Some("Saturday, June 15, 2024 at 2:30 PM")
    );

    let cover = &document.sections[0];
    assert_eq!(
        cover.elements,
        vec![
            Element::EventTitle { text: "Quinceañera".to_string() },
            Element::info_row("Date", "Saturday, June 15, 2024"),
            Element::info_row("Time", "2:30 PM"),
            Element::info_row("Location", "St. Anne"),
            Element::spacer(SpacerSize::Large),
        ]
    );

    let details = &document.sections[1];
    assert_eq!(details.title.as_deref(), Some("Details"));
    assert_eq!(
        details.elements,
        vec![
            Element::info_row("Quinceañera", "Sofia Lopez"),
            Element::spacer(SpacerSize::Medium),
            Element::info_row("Theme", "Garden"),
        ]
    );
}

#[test]
fn test_script_document_orders_and_substitutes_sections() {
    let record = quinceanera();
    let script = record.event_type.script("Ceremony").unwrap().clone();
    let parish = Parish { name: "St. Anne".to_string(), ..Default::default() };

    let document = build_script_document(&record, &script, Some(&parish), Language::En);

    assert_eq!(document.document_type, "event-script");
    assert_eq!(document.template_id, "Ceremony");
    let titles: Vec<&str> = document
        .sections
        .iter()
        .filter_map(|s| s.title.as_deref())
        .collect();
    assert_eq!(titles, vec!["Welcome", "Blessing"]);
    assert!(!document.sections[0].page_break_before);
    assert!(document.sections[1].page_break_before);

    assert_eq!(
        document.sections[0].elements,
        vec![
            Element::section_title("Welcome"),
            Element::text("Welcome to St. Anne."),
            Element::text("• Garden"),
        ]
    );
    assert_eq!(
        document.sections[1].elements,
        vec![Element::text("{red}Priest:{/red} Let us pray for Sofia Lopez.")]
    );
}
