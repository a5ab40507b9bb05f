use std::collections::HashSet;

use ordo::schema::EventType;
use ordo::validator::{
    format_report, format_summary, validate_all, validate_event_type, ValidationContext,
    ValidationError, ValidationWarning,
};
use serde_json::json;

fn event_type(fields: serde_json::Value, content: &str) -> EventType {
    serde_json::from_value(json!({
        "name": "Wedding",
        "fields": fields,
        "scripts": [{
            "name": "Ceremony",
            "sections": [{ "name": "Welcome", "content": content, "order": 0 }]
        }]
    }))
    .unwrap()
}

fn bride() -> serde_json::Value {
    json!([{ "property_name": "bride", "name": "Bride", "type": "person" }])
}

fn none() -> HashSet<String> {
    HashSet::new()
}

#[test]
fn test_valid_dotted_reference() {
    let schema = event_type(bride(), "Hello {{bride.full_name}}");
    let report = validate_event_type(&schema, &none(), &none());
    assert!(report.is_valid);
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
}

#[test]
fn test_unknown_placeholder() {
    let schema = event_type(bride(), "Hello {{brdie}}");
    let report = validate_event_type(&schema, &none(), &none());
    assert!(!report.is_valid);
    assert_eq!(
        report.errors,
        vec![ValidationError::UnknownPlaceholder {
            script_name: "Ceremony".to_string(),
            section_name: "Welcome".to_string(),
            property_name: "brdie".to_string(),
        }]
    );
    // The declared field is now unused as well.
    assert_eq!(
        report.warnings,
        vec![ValidationWarning::UnusedField { property_name: "bride".to_string() }]
    );
}

#[test]
fn test_builtins_never_unknown() {
    let schema = event_type(bride(), "{{bride}} at {{parish.name}}, {{parish.city_state}}");
    let report = validate_event_type(&schema, &none(), &none());
    assert!(report.is_valid);
}

#[test]
fn test_unused_field_and_spacer() {
    let fields = json!([
        { "property_name": "bride", "name": "Bride", "type": "person" },
        { "property_name": "groom", "name": "Groom", "type": "person" },
        { "property_name": "gap", "name": "Gap", "type": "spacer" }
    ]);
    let schema = event_type(fields, "{{bride}}");
    let report = validate_event_type(&schema, &none(), &none());
    assert!(report.is_valid);
    assert_eq!(
        report.warnings,
        vec![ValidationWarning::UnusedField { property_name: "groom".to_string() }]
    );
}

#[test]
fn test_gendered_reference_counts_as_used() {
    let fields = json!([{ "property_name": "deceased", "name": "Deceased", "type": "person" }]);
    let schema = event_type(fields, "We pray for {{deceased.sex|him|her}}.");
    let report = validate_event_type(&schema, &none(), &none());
    assert!(report.is_valid);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_required_not_used_replaces_unused() {
    let fields = json!([
        { "property_name": "bride", "name": "Bride", "type": "person", "required": true }
    ]);
    let schema = event_type(fields, "No placeholders.");
    let report = validate_event_type(&schema, &none(), &none());
    assert_eq!(
        report.warnings,
        vec![ValidationWarning::RequiredNotUsed { property_name: "bride".to_string() }]
    );
}

#[test]
fn test_filter_tags_and_list_ids() {
    let fields = json!([
        {
            "property_name": "first_reading",
            "name": "First Reading",
            "type": "content",
            "filter_tags": ["wedding", "weding"]
        },
        { "property_name": "song", "name": "Song", "type": "list_item", "list_id": "missing" }
    ]);
    let schema = event_type(fields, "{{first_reading}} {{song}}");
    let tags: HashSet<String> = ["wedding".to_string()].into();
    let report = validate_event_type(&schema, &tags, &none());

    assert!(!report.is_valid);
    assert_eq!(
        report.errors,
        vec![
            ValidationError::InvalidFilterTag {
                field: "first_reading".to_string(),
                tag: "weding".to_string(),
            },
            ValidationError::InvalidListReference {
                field: "song".to_string(),
                list_id: "missing".to_string(),
            },
        ]
    );
}

#[test]
fn test_extra_warnings_keep_report_valid() {
    let fields = json!([
        { "property_name": "Bride", "name": "Bride", "type": "person" },
        { "property_name": "ceremony", "name": "Ceremony", "type": "calendar_event" }
    ]);
    let schema = event_type(fields, "{{Bride}} {{ceremony.date}}");
    let report = validate_event_type(&schema, &none(), &none());
    assert!(report.is_valid);
    assert_eq!(
        report.warnings,
        vec![
            ValidationWarning::InvalidPropertyName { property_name: "Bride".to_string() },
            ValidationWarning::MissingPrimaryCalendarEvent {
                property_name: "ceremony".to_string(),
            },
        ]
    );
}

#[test]
fn test_missing_primary_names_first_calendar_field() {
    let fields = json!([
        { "property_name": "rehearsal", "name": "Rehearsal", "type": "calendar_event" },
        { "property_name": "ceremony", "name": "Ceremony", "type": "calendar_event" }
    ]);
    let schema = event_type(fields, "{{rehearsal.date}} {{ceremony.date}}");
    let report = validate_event_type(&schema, &none(), &none());

    let warning = serde_json::to_value(&report.warnings).unwrap();
    assert_eq!(
        warning,
        json!([{ "type": "missing_primary_calendar_event", "property_name": "rehearsal" }])
    );
    assert_eq!(
        report.warnings[0].to_string(),
        "No calendar event field is marked as primary (field: \"rehearsal\")"
    );
}

#[test]
fn test_report_serialization_shape() {
    let schema = event_type(bride(), "{{brdie}}");
    let report = validate_event_type(&schema, &none(), &none());
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value,
        json!({
            "is_valid": false,
            "errors": [{
                "type": "unknown_placeholder",
                "script_name": "Ceremony",
                "section_name": "Welcome",
                "property_name": "brdie"
            }],
            "warnings": [{ "type": "unused_field", "property_name": "bride" }]
        })
    );
}

#[test]
fn test_validate_all_counts() {
    let clean = event_type(bride(), "{{bride}}");
    let warned = event_type(bride(), "nothing");
    let broken = event_type(bride(), "{{bride}} {{groom}}");

    let summary = validate_all(&[clean, warned, broken], &ValidationContext::default());
    assert_eq!(summary.total, 3);
    assert_eq!(summary.with_errors, 1);
    assert_eq!(summary.with_warnings, 1);
    assert_eq!(summary.clean, 1);
    assert!(!summary.all_valid);

    let text = format_report(&summary);
    assert!(text.contains("✓ Wedding (1 fields, 1 scripts)"));
    assert!(text.contains("⚠ Wedding"));
    assert!(text.contains("✗ Wedding"));
    assert!(text.contains("has invalid placeholder: groom"));
    assert!(format_summary(&summary).contains("✗ 1 event type(s) have errors"));
}

#[test]
fn test_validate_all_empty_batch() {
    let summary = validate_all(&[], &ValidationContext::default());
    assert_eq!(summary.total, 0);
    assert!(summary.all_valid);
    assert!(format_summary(&summary).contains("✓ All event types passed validation"));
}
