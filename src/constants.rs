//! Common constants used throughout ordo.

/// Supported settings file names, tried in order.
pub const CONFIG_FILES: [&str; 3] = ["ordo.json", "ordo.yml", "ordo.yaml"];

/// Placeholders that are always available without a field declaration.
pub const BUILTIN_PLACEHOLDERS: [&str; 4] =
    ["parish.name", "parish.city", "parish.state", "parish.city_state"];

/// Slug form every property name must follow.
pub const PROPERTY_NAME_PATTERN: &str = "^[a-z][a-z0-9_]*$";

/// Liturgical red, as a hex RGB string without the leading '#'.
pub const LITURGY_RED: &str = "c41e3a";

/// Number of characters of an entity id used in export file names.
pub const SHORT_ID_LEN: usize = 8;

pub const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 5000;

/// Page geometry in PDF points (US Letter).
pub const DEFAULT_PAGE_WIDTH: f32 = 612.0;
pub const DEFAULT_PAGE_HEIGHT: f32 = 792.0;
pub const DEFAULT_PAGE_MARGIN: f32 = 60.0;
