//! Static validation of event types.
//!
//! Cross-checks every placeholder in every script section against the declared
//! fields, and every declared resource reference against what the parish has.
//! Nothing is resolved here: the report depends only on authored text.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::constants::BUILTIN_PLACEHOLDERS;
use crate::parser::extract;
use crate::schema::{is_valid_property_name, EventType, FieldKind};

/// A broken reference. Any error makes the event type invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationError {
    UnknownPlaceholder {
        script_name: String,
        section_name: String,
        property_name: String,
    },
    InvalidFilterTag {
        #[serde(rename = "property_name")]
        field: String,
        #[serde(rename = "invalid_value")]
        tag: String,
    },
    InvalidListReference {
        #[serde(rename = "property_name")]
        field: String,
        #[serde(rename = "invalid_value")]
        list_id: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownPlaceholder {
                script_name,
                section_name,
                property_name,
            } => write!(
                f,
                "Script \"{script_name}\" section \"{section_name}\" has invalid placeholder: {property_name}"
            ),
            ValidationError::InvalidFilterTag { field, tag } => {
                write!(f, "Field \"{field}\" has invalid filter_tag: \"{tag}\"")
            }
            ValidationError::InvalidListReference { field, list_id } => {
                write!(f, "Field \"{field}\" has invalid list_id: \"{list_id}\"")
            }
        }
    }
}

/// Advisory findings. Warnings never affect validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationWarning {
    UnusedField { property_name: String },
    RequiredNotUsed { property_name: String },
    InvalidPropertyName { property_name: String },
    MissingPrimaryCalendarEvent { property_name: String },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::UnusedField { property_name } => write!(
                f,
                "Field is defined but not used in any script (field: \"{property_name}\")"
            ),
            ValidationWarning::RequiredNotUsed { property_name } => write!(
                f,
                "Required field is not used in any script (field: \"{property_name}\")"
            ),
            ValidationWarning::InvalidPropertyName { property_name } => write!(
                f,
                "Property name should be lowercase letters, digits and underscores (field: \"{property_name}\")"
            ),
            ValidationWarning::MissingPrimaryCalendarEvent { property_name } => write!(
                f,
                "No calendar event field is marked as primary (field: \"{property_name}\")"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// Resources of the parish that field definitions may point at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationContext {
    #[serde(default)]
    pub filter_tags: HashSet<String>,
    #[serde(default)]
    pub list_ids: HashSet<String>,
}

/// Validates one event type.
///
/// # Arguments
/// * `schema` - The event type with its fields and scripts
/// * `valid_filter_tags` - Category slugs that exist
/// * `valid_list_ids` - Custom list ids that exist
///
/// # Returns
/// * `ValidationReport` - Errors and warnings; `is_valid` iff there are no errors
pub fn validate_event_type(
    schema: &EventType,
    valid_filter_tags: &HashSet<String>,
    valid_list_ids: &HashSet<String>,
) -> ValidationReport {
    let mut valid_property_names: HashSet<&str> = schema
        .fields
        .iter()
        .map(|f| f.property_name.as_str())
        .collect();
    valid_property_names.extend(BUILTIN_PLACEHOLDERS);

    let mut errors = Vec::new();
    let mut used: HashSet<String> = HashSet::new();

    for script in &schema.scripts {
        for section in &script.sections {
            for token in extract(section.content.as_str()) {
                if token.is_builtin {
                    continue;
                }
                if !valid_property_names.contains(token.property_name.as_str()) {
                    errors.push(ValidationError::UnknownPlaceholder {
                        script_name: script.name.clone(),
                        section_name: section.name.clone(),
                        property_name: token.property_name.clone(),
                    });
                }
                used.insert(token.property_name);
            }
        }
    }

    for field in &schema.fields {
        for tag in field.filter_tags.iter().flatten() {
            if !valid_filter_tags.contains(tag) {
                errors.push(ValidationError::InvalidFilterTag {
                    field: field.property_name.clone(),
                    tag: tag.clone(),
                });
            }
        }
        if let Some(list_id) = &field.list_id {
            if !valid_list_ids.contains(list_id) {
                errors.push(ValidationError::InvalidListReference {
                    field: field.property_name.clone(),
                    list_id: list_id.clone(),
                });
            }
        }
    }

    let mut warnings = Vec::new();
    for field in &schema.fields {
        if !is_valid_property_name(&field.property_name) {
            warnings.push(ValidationWarning::InvalidPropertyName {
                property_name: field.property_name.clone(),
            });
        }
        if field.kind.is_spacer() || used.contains(&field.property_name) {
            continue;
        }
        let property_name = field.property_name.clone();
        warnings.push(if field.required {
            ValidationWarning::RequiredNotUsed { property_name }
        } else {
            ValidationWarning::UnusedField { property_name }
        });
    }

    let calendar_fields: Vec<_> = schema
        .fields
        .iter()
        .filter(|f| f.kind == FieldKind::CalendarEvent)
        .collect();
    if let Some(first) = calendar_fields.first() {
        if !calendar_fields.iter().any(|f| f.is_primary) {
            warnings.push(ValidationWarning::MissingPrimaryCalendarEvent {
                property_name: first.property_name.clone(),
            });
        }
    }

    debug!(
        "Validated event type '{}': {} errors, {} warnings",
        schema.name,
        errors.len(),
        warnings.len()
    );

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// The report of a single event type within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventTypeReport {
    pub name: String,
    pub field_count: usize,
    pub script_count: usize,
    #[serde(flatten)]
    pub report: ValidationReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub event_types: Vec<EventTypeReport>,
    pub total: usize,
    pub with_errors: usize,
    /// Valid event types that still carry warnings.
    pub with_warnings: usize,
    pub clean: usize,
    pub all_valid: bool,
}

impl EventTypeReport {
    pub fn new(event_type: &EventType, context: &ValidationContext) -> Self {
        Self {
            name: event_type.name.clone(),
            field_count: event_type.fields.len(),
            script_count: event_type.scripts.len(),
            report: validate_event_type(event_type, &context.filter_tags, &context.list_ids),
        }
    }
}

impl Summary {
    /// Aggregates independent per-type reports.
    pub fn from_reports(reports: Vec<EventTypeReport>) -> Self {
        let with_errors = reports.iter().filter(|r| !r.report.is_valid).count();
        let with_warnings = reports
            .iter()
            .filter(|r| r.report.is_valid && !r.report.warnings.is_empty())
            .count();

        Summary {
            total: reports.len(),
            with_errors,
            with_warnings,
            clean: reports.len() - with_errors - with_warnings,
            all_valid: with_errors == 0,
            event_types: reports,
        }
    }
}

/// Validates every event type independently and aggregates the counts.
pub fn validate_all(event_types: &[EventType], context: &ValidationContext) -> Summary {
    Summary::from_reports(
        event_types
            .iter()
            .map(|event_type| EventTypeReport::new(event_type, context))
            .collect(),
    )
}

/// Formats a batch summary as a plain-text report for the terminal.
pub fn format_report(summary: &Summary) -> String {
    let mut lines: Vec<String> = vec![
        "Event Type Validation Report".to_string(),
        "============================".to_string(),
        String::new(),
    ];

    for event_type in &summary.event_types {
        let report = &event_type.report;
        let icon = match (report.is_valid, report.warnings.is_empty()) {
            (false, _) => '✗',
            (true, false) => '⚠',
            (true, true) => '✓',
        };
        lines.push(format!(
            "{icon} {} ({} fields, {} scripts)",
            event_type.name, event_type.field_count, event_type.script_count
        ));

        if !report.errors.is_empty() {
            lines.push("  ✗ ERRORS:".to_string());
            lines.extend(report.errors.iter().map(|e| format!("    - {e}")));
        }
        if !report.warnings.is_empty() {
            lines.push("  ⚠ WARNINGS:".to_string());
            lines.extend(report.warnings.iter().map(|w| format!("    - {w}")));
        }
        if report.is_valid && report.warnings.is_empty() {
            lines.push("  ✓ All placeholders resolve to valid fields".to_string());
            lines.push("  ✓ All references are valid".to_string());
        }
        lines.push(String::new());
    }

    lines.push(format_summary(summary));
    lines.join("\n")
}

/// Formats only the totals of a batch.
pub fn format_summary(summary: &Summary) -> String {
    let verdict = if summary.all_valid {
        "✓ All event types passed validation".to_string()
    } else {
        format!("✗ {} event type(s) have errors", summary.with_errors)
    };
    [
        "Summary".to_string(),
        "-------".to_string(),
        format!("Total event types: {}", summary.total),
        format!("  With errors: {}", summary.with_errors),
        format!("  With warnings only: {}", summary.with_warnings),
        format!("  Clean: {}", summary.clean),
        String::new(),
        verdict,
    ]
    .join("\n")
}
