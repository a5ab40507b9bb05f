//! Entity resolution: turns stored field values (mostly ids) into records.
//!
//! The only part of ordo that performs I/O. One batched call per entity kind is
//! issued, all kinds concurrently, each bounded by a timeout. A failed or slow
//! batch degrades its fields to unresolved; resolution as a whole never fails.

use async_trait::async_trait;
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use crate::entity::{
    CalendarEvent, Content, DocumentFile, Entity, Group, ListItem, Location, Person, Petition,
};
use crate::error::Result;
use crate::schema::{FieldDefinition, FieldKind};

/// A field value after resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedField {
    pub property_name: String,
    pub kind: FieldKind,
    pub raw_value: Value,
    pub resolved_value: Option<Entity>,
}

impl ResolvedField {
    /// A field whose value needs no lookup, or whose lookup found nothing.
    pub fn raw(property_name: &str, kind: FieldKind, raw_value: Value) -> Self {
        Self {
            property_name: property_name.to_string(),
            kind,
            raw_value,
            resolved_value: None,
        }
    }
}

/// Resolved fields keyed by property name, in declared field order.
pub type ResolvedFields = IndexMap<String, ResolvedField>;

/// Batched read access to the data layer.
///
/// Every method receives the unique ids of one kind and returns the records
/// it found; missing ids are simply absent from the result.
#[async_trait]
pub trait EntityLookup: Send + Sync {
    async fn people(&self, ids: &[String]) -> Result<Vec<Person>>;
    async fn groups(&self, ids: &[String]) -> Result<Vec<Group>>;
    async fn locations(&self, ids: &[String]) -> Result<Vec<Location>>;
    async fn list_items(&self, ids: &[String]) -> Result<Vec<ListItem>>;
    async fn documents(&self, ids: &[String]) -> Result<Vec<DocumentFile>>;
    async fn contents(&self, ids: &[String]) -> Result<Vec<Content>>;
    async fn petitions(&self, ids: &[String]) -> Result<Vec<Petition>>;
    async fn calendar_events(&self, ids: &[String]) -> Result<Vec<CalendarEvent>>;
}

/// Resolves field values against an [`EntityLookup`].
pub struct Resolver<'a> {
    lookup: &'a dyn EntityLookup,
    timeout: Duration,
}

impl<'a> Resolver<'a> {
    pub fn new(lookup: &'a dyn EntityLookup, timeout: Duration) -> Self {
        Self { lookup, timeout }
    }

    /// Resolves `values` for the declared `fields`.
    ///
    /// # Arguments
    /// * `fields` - Field definitions in display order
    /// * `values` - Stored values keyed by property name
    ///
    /// # Returns
    /// * `ResolvedFields` - One entry per non-spacer field, in declared order
    pub async fn resolve(
        &self,
        fields: &[FieldDefinition],
        values: &IndexMap<String, Value>,
    ) -> ResolvedFields {
        let mut ids: HashMap<FieldKind, Vec<String>> = HashMap::new();
        for field in fields.iter().filter(|f| f.kind.needs_lookup()) {
            let id = values
                .get(&field.property_name)
                .and_then(|v| lookup_id(field.kind, v));
            if let Some(id) = id {
                let batch = ids.entry(field.kind).or_default();
                if !batch.contains(&id) {
                    batch.push(id);
                }
            }
        }

        let batch = |kind: FieldKind| ids.get(&kind).map(Vec::as_slice).unwrap_or(&[]);
        let lookup = self.lookup;
        let timeout = self.timeout;

        macro_rules! fetch_kind {
            ($kind:expr, $method:ident, $wrap:expr) => {
                fetch($kind, batch($kind), timeout, lookup.$method(batch($kind)), $wrap)
            };
        }

        let (people, groups, locations, list_items, documents, contents, petitions, events) =
            tokio::join!(
                fetch_kind!(FieldKind::Person, people, Entity::Person),
                fetch_kind!(FieldKind::Group, groups, Entity::Group),
                fetch_kind!(FieldKind::Location, locations, Entity::Location),
                fetch_kind!(FieldKind::ListItem, list_items, Entity::ListItem),
                fetch_kind!(FieldKind::Document, documents, Entity::Document),
                fetch_kind!(FieldKind::Content, contents, Entity::Content),
                fetch_kind!(FieldKind::Petition, petitions, Entity::Petition),
                fetch_kind!(FieldKind::CalendarEvent, calendar_events, Entity::CalendarEvent),
            );

        let found: HashMap<(FieldKind, String), Entity> = [
            people, groups, locations, list_items, documents, contents, petitions, events,
        ]
        .into_iter()
        .flatten()
        .collect();

        let mut resolved = ResolvedFields::new();
        for field in fields.iter().filter(|f| !f.kind.is_spacer()) {
            let raw_value = values.get(&field.property_name).cloned().unwrap_or(Value::Null);
            let resolved_value = lookup_id(field.kind, &raw_value)
                .and_then(|id| found.get(&(field.kind, id)).cloned());
            if field.kind.needs_lookup() && resolved_value.is_none() && !raw_value.is_null() {
                debug!("Field '{}' left unresolved", field.property_name);
            }
            resolved.insert(
                field.property_name.clone(),
                ResolvedField {
                    property_name: field.property_name.clone(),
                    kind: field.kind,
                    raw_value,
                    resolved_value,
                },
            );
        }
        resolved
    }
}

/// The id to look up for a stored value, if the kind needs one.
///
/// Content values that are not UUIDs are legacy inline text and stay raw.
fn lookup_id(kind: FieldKind, value: &Value) -> Option<String> {
    if !kind.needs_lookup() {
        return None;
    }
    let id = value.as_str()?.trim();
    if id.is_empty() {
        return None;
    }
    if kind == FieldKind::Content && uuid::Uuid::parse_str(id).is_err() {
        return None;
    }
    Some(id.to_string())
}

async fn fetch<T, F>(
    kind: FieldKind,
    ids: &[String],
    timeout: Duration,
    call: F,
    wrap: fn(T) -> Entity,
) -> Vec<((FieldKind, String), Entity)>
where
    F: Future<Output = Result<Vec<T>>>,
{
    if ids.is_empty() {
        return Vec::new();
    }
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(records)) => records
            .into_iter()
            .map(wrap)
            .map(|entity| ((kind, entity.id().to_string()), entity))
            .collect(),
        Ok(Err(err)) => {
            warn!("Lookup of {kind:?} records {ids:?} failed: {err}");
            Vec::new()
        }
        Err(_) => {
            warn!("Lookup of {kind:?} records {ids:?} timed out after {timeout:?}");
            Vec::new()
        }
    }
}

/// In-memory [`EntityLookup`] backed by the records of a bundle file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticLookup {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub list_items: Vec<ListItem>,
    #[serde(default)]
    pub documents: Vec<DocumentFile>,
    #[serde(default)]
    pub contents: Vec<Content>,
    #[serde(default)]
    pub petitions: Vec<Petition>,
    #[serde(default)]
    pub calendar_events: Vec<CalendarEvent>,
}

fn pick<T: Clone>(records: &[T], ids: &[String], id_of: fn(&T) -> &str) -> Vec<T> {
    records
        .iter()
        .filter(|r| ids.iter().any(|id| id == id_of(r)))
        .cloned()
        .collect()
}

#[async_trait]
impl EntityLookup for StaticLookup {
    async fn people(&self, ids: &[String]) -> Result<Vec<Person>> {
        Ok(pick(&self.people, ids, |r| r.id.as_str()))
    }

    async fn groups(&self, ids: &[String]) -> Result<Vec<Group>> {
        Ok(pick(&self.groups, ids, |r| r.id.as_str()))
    }

    async fn locations(&self, ids: &[String]) -> Result<Vec<Location>> {
        Ok(pick(&self.locations, ids, |r| r.id.as_str()))
    }

    async fn list_items(&self, ids: &[String]) -> Result<Vec<ListItem>> {
        Ok(pick(&self.list_items, ids, |r| r.id.as_str()))
    }

    async fn documents(&self, ids: &[String]) -> Result<Vec<DocumentFile>> {
        Ok(pick(&self.documents, ids, |r| r.id.as_str()))
    }

    async fn contents(&self, ids: &[String]) -> Result<Vec<Content>> {
        Ok(pick(&self.contents, ids, |r| r.id.as_str()))
    }

    async fn petitions(&self, ids: &[String]) -> Result<Vec<Petition>> {
        Ok(pick(&self.petitions, ids, |r| r.id.as_str()))
    }

    async fn calendar_events(&self, ids: &[String]) -> Result<Vec<CalendarEvent>> {
        Ok(pick(&self.calendar_events, ids, |r| r.id.as_str()))
    }
}
