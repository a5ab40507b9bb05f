//! ordo turns user-authored liturgical event types into printable scripts.
//! It extracts and validates `{{placeholders}}` in script text, resolves field
//! values against parish records, builds a format-neutral document model and
//! renders it to PDF, DOCX or HTML.

/// Content builders and per-domain template registries
pub mod builders;

/// Command-line interface module for the ordo binary
pub mod cli;

/// Settings and bundle loading
/// Supports JSON and YAML formats (ordo.json, ordo.yml, ordo.yaml)
pub mod config;

pub mod constants;

/// Abstract document model shared by builders and renderers
pub mod document;

pub mod entity;

/// Error types and handling for ordo
pub mod error;

/// Date, time and yes/no formatting in English and Spanish
pub mod formatters;

pub mod logger;

/// Markdown to document elements
pub mod markdown;

/// Placeholder extraction from script text
pub mod parser;

/// Render entrypoint: resolve, build, encode, name
pub mod processor;

/// PDF, DOCX and HTML back ends
pub mod renderer;

/// Batched, concurrent entity resolution
pub mod resolver;

/// Event type, field and script definitions
pub mod schema;

/// The `{red}` inline span scanner
pub mod styled;

/// Placeholder substitution
pub mod substitute;

/// Placeholder and reference validation of event types
pub mod validator;
