//! Domain Entities
//!
//! - `ComposeDocument` - a parsed Compose file
//! - `Service` / `ConfigReference` - services and the configs they mount
//! - `ConfigEntry` - a top-level config definition

mod compose;

pub use compose::{
    ComposeDocument, ConfigEntry, ConfigReference, DocumentError, Service, CONFIGS_KEY,
    SERVICES_KEY,
};
