//! Content builders: turn a domain record into a [`DocumentModel`].
//!
//! Each domain owns a [`Registry`] mapping template ids to pure builder
//! functions. A builder returns the sections for its record and appends a
//! section or element only when the data behind it exists.

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::document::{DocumentModel, Language, Section};

pub mod baptism;
pub mod event;
pub mod funeral;
pub mod mass;
pub mod mass_intention;
pub mod script;
pub mod shared;
pub mod wedding;

/// A domain record a document can be built from.
pub trait Record {
    /// Document type tag, e.g. `wedding`.
    const DOCUMENT_TYPE: &'static str;

    fn id(&self) -> &str;

    fn title(&self, language: Language) -> String;

    fn subtitle(&self, _language: Language) -> Option<String> {
        None
    }

    /// Name used for exported file names, e.g. `MassIntention`.
    fn entity_type_name(&self) -> String {
        Self::DOCUMENT_TYPE
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                chars
                    .next()
                    .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                    .unwrap_or_default()
            })
            .collect()
    }
}

/// Builds the ordered sections of a document for one record.
pub type BuildFn<R> = fn(&R, Language) -> Vec<Section>;

/// A registered template: id, human name, language and builder.
pub struct Template<R> {
    pub id: &'static str,
    pub name: &'static str,
    pub language: Language,
    pub build: BuildFn<R>,
}

impl<R> Clone for Template<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Template<R> {}

impl<R> Template<R> {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        language: Language,
        build: BuildFn<R>,
    ) -> Self {
        Self { id, name, language, build }
    }
}

/// Template id to builder map for a single domain.
///
/// The default template is always present, so lookups never come back empty.
pub struct Registry<R> {
    domain: &'static str,
    default: Template<R>,
    templates: IndexMap<&'static str, Template<R>>,
}

impl<R: Record> Registry<R> {
    pub fn new(domain: &'static str, default: Template<R>, others: Vec<Template<R>>) -> Self {
        let templates = std::iter::once(default)
            .chain(others)
            .map(|t| (t.id, t))
            .collect();
        Self { domain, default, templates }
    }

    pub fn domain(&self) -> &'static str {
        self.domain
    }

    pub fn default_template(&self) -> &Template<R> {
        &self.default
    }

    pub fn get(&self, template_id: &str) -> Option<&Template<R>> {
        self.templates.get(template_id)
    }

    /// Registered templates in registration order, default first.
    pub fn templates(&self) -> impl Iterator<Item = &Template<R>> {
        self.templates.values()
    }

    /// The template for `template_id`, or the domain default.
    pub fn resolve(&self, template_id: Option<&str>) -> &Template<R> {
        match template_id {
            Some(id) => self.get(id).unwrap_or_else(|| {
                debug!(
                    "Unknown {} template '{}', using '{}'",
                    self.domain, id, self.default.id
                );
                &self.default
            }),
            None => &self.default,
        }
    }

    /// Builds the document for `record` with the resolved template.
    pub fn build(&self, record: &R, template_id: Option<&str>) -> DocumentModel {
        let template = self.resolve(template_id);
        debug!("Building {} document with '{}'", self.domain, template.id);
        DocumentModel {
            id: record.id().to_string(),
            document_type: R::DOCUMENT_TYPE.to_string(),
            language: template.language,
            template_id: template.id.to_string(),
            title: record.title(template.language),
            subtitle: record.subtitle(template.language),
            sections: (template.build)(record, template.language),
        }
    }
}

/// Picks the English or Spanish variant of a fixed label.
pub(crate) fn tr(language: Language, en: &'static str, es: &'static str) -> &'static str {
    match language {
        Language::En => en,
        Language::Es => es,
    }
}

/// A record of one of the fixed liturgical domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "kebab-case")]
pub enum DomainRecord {
    Wedding(wedding::Wedding),
    Funeral(funeral::Funeral),
    Baptism(baptism::Baptism),
    Mass(mass::Mass),
    MassIntention(mass_intention::MassIntention),
}

impl DomainRecord {
    pub fn id(&self) -> &str {
        match self {
            DomainRecord::Wedding(r) => r.id(),
            DomainRecord::Funeral(r) => r.id(),
            DomainRecord::Baptism(r) => r.id(),
            DomainRecord::Mass(r) => r.id(),
            DomainRecord::MassIntention(r) => r.id(),
        }
    }

    pub fn entity_type_name(&self) -> String {
        match self {
            DomainRecord::Wedding(r) => r.entity_type_name(),
            DomainRecord::Funeral(r) => r.entity_type_name(),
            DomainRecord::Baptism(r) => r.entity_type_name(),
            DomainRecord::Mass(r) => r.entity_type_name(),
            DomainRecord::MassIntention(r) => r.entity_type_name(),
        }
    }

    /// Builds with the domain's registry; unknown ids use the domain default.
    pub fn build(&self, template_id: Option<&str>) -> DocumentModel {
        match self {
            DomainRecord::Wedding(r) => wedding::build_wedding(r, template_id),
            DomainRecord::Funeral(r) => funeral::build_funeral(r, template_id),
            DomainRecord::Baptism(r) => baptism::build_baptism(r, template_id),
            DomainRecord::Mass(r) => mass::build_mass(r, template_id),
            DomainRecord::MassIntention(r) => mass_intention::build_mass_intention(r, template_id),
        }
    }
}

/// Every registered template id, grouped by domain.
pub fn catalog() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    fn ids<R: Record>(registry: &Registry<R>) -> (&'static str, Vec<(&'static str, &'static str)>) {
        (
            registry.domain(),
            registry.templates().map(|t| (t.id, t.name)).collect(),
        )
    }
    vec![
        ids(&wedding::WEDDING_TEMPLATES),
        ids(&funeral::FUNERAL_TEMPLATES),
        ids(&baptism::BAPTISM_TEMPLATES),
        ids(&mass::MASS_TEMPLATES),
        ids(&mass_intention::MASS_INTENTION_TEMPLATES),
        ids(&event::EVENT_TEMPLATES),
    ]
}
