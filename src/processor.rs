//! The render entrypoint: resolve field values, build a document, encode it.
//!
//! Everything before encoding is infallible. Only a missing script or a
//! back-end failure stops an export.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::builders::event::{build_event, EventRecord};
use crate::builders::script::build_script_document;
use crate::builders::DomainRecord;
use crate::config::{Bundle, Settings};
use crate::constants::SHORT_ID_LEN;
use crate::document::DocumentModel;
use crate::error::{Error, Result};
use crate::renderer::{renderer_for, Artifact, OutputFormat};
use crate::resolver::{EntityLookup, Resolver};
use crate::substitute::Parish;

/// Replaces characters that are unsafe in file names with `-`.
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// `<EntityTypeName>-<TemplateOrScriptName>-<shortId>.<ext>`
///
/// # Arguments
/// * `entity_type_name` - Event type or domain name, e.g. `Wedding`
/// * `name` - Script name or template id
/// * `entity_id` - Record id; only the first characters are used
/// * `format` - Output format, for the extension
pub fn artifact_filename(
    entity_type_name: &str,
    name: &str,
    entity_id: &str,
    format: OutputFormat,
) -> String {
    let short_id: String = entity_id.chars().take(SHORT_ID_LEN).collect();
    format!(
        "{}-{}-{}.{}",
        sanitize(entity_type_name),
        sanitize(name),
        sanitize(&short_id),
        format.extension()
    )
}

/// What to render for a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// One of the event type's authored scripts, by name.
    Script(&'a str),
    /// A registered template id; unknown or absent ids use the domain default.
    Template(Option<&'a str>),
}

/// Runs exports with one set of host settings.
pub struct Processor<'a> {
    settings: &'a Settings,
}

impl<'a> Processor<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Resolves the bundle's stored values into an event record.
    ///
    /// Lookup failures and timeouts leave individual fields unresolved.
    pub async fn resolve(&self, bundle: &Bundle, lookup: &dyn EntityLookup) -> EventRecord {
        let resolver = Resolver::new(lookup, self.settings.lookup_timeout());
        let fields = resolver
            .resolve(&bundle.event_type.fields, &bundle.values)
            .await;
        EventRecord::new(bundle.id.clone(), bundle.event_type.clone(), fields)
    }

    /// Encodes a built document and names the artifact.
    ///
    /// # Errors
    /// * `Error::RenderError` if the back end fails
    pub fn export(
        &self,
        document: &DocumentModel,
        entity_type_name: &str,
        format: OutputFormat,
    ) -> Result<Artifact> {
        let renderer = renderer_for(format, &self.settings.page);
        let bytes = renderer.render(document)?;
        let filename =
            artifact_filename(entity_type_name, &document.template_id, &document.id, format);
        info!("Rendered {} ({} bytes)", filename, bytes.len());
        Ok(Artifact {
            filename,
            content_type: format.content_type().to_string(),
            bytes,
        })
    }

    /// Renders one authored script of an event.
    ///
    /// # Errors
    /// * `Error::NotFound` if the event type has no script named `script_name`
    /// * `Error::RenderError` if the back end fails
    pub fn render_script(
        &self,
        record: &EventRecord,
        script_name: &str,
        parish: Option<&Parish>,
        format: OutputFormat,
    ) -> Result<Artifact> {
        let script = record.event_type.script(script_name).ok_or_else(|| Error::NotFound {
            kind: "Script".to_string(),
            id: script_name.to_string(),
        })?;
        let parish = parish.or(self.settings.parish.as_ref());
        let document = build_script_document(record, script, parish, self.settings.language);
        self.export(&document, &record.event_type.name, format)
    }

    /// Renders a domain record with one of its registered templates.
    pub fn render_record(
        &self,
        record: &DomainRecord,
        template_id: Option<&str>,
        format: OutputFormat,
    ) -> Result<Artifact> {
        let document = record.build(template_id);
        self.export(&document, &record.entity_type_name(), format)
    }

    /// Full pipeline for a bundle: resolve, build, encode.
    ///
    /// A template target renders the bundle's domain record when it carries
    /// one, and the generic event document otherwise.
    pub async fn render_bundle(
        &self,
        bundle: &Bundle,
        lookup: &dyn EntityLookup,
        target: Target<'_>,
        format: OutputFormat,
    ) -> Result<Artifact> {
        match (target, &bundle.record) {
            (Target::Template(template_id), Some(record)) => {
                self.render_record(record, template_id, format)
            }
            (Target::Template(template_id), None) => {
                let record = self.resolve(bundle, lookup).await;
                let document = build_event(&record, template_id);
                self.export(&document, &record.event_type.name, format)
            }
            (Target::Script(name), _) => {
                let record = self.resolve(bundle, lookup).await;
                self.render_script(&record, name, bundle.parish.as_ref(), format)
            }
        }
    }
}

/// Writes an artifact to `path`, or to its own file name inside `dir`.
///
/// # Returns
/// * `Result<PathBuf>` - Where the artifact was written
pub fn write_artifact(artifact: &Artifact, path: Option<&Path>, dir: &Path) -> Result<PathBuf> {
    let target = match path {
        Some(path) => path.to_path_buf(),
        None => dir.join(&artifact.filename),
    };
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, &artifact.bytes)?;
    debug!("Wrote {}", target.display());
    Ok(target)
}
