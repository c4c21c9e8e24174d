//! Asset system
//!
//! Design-time defaults for placing things quickly:
//! - Object templates: per-type default size/color/properties, total
//!   over the closed type enum
//! - Prefabs: curated type + properties + components bundles for the
//!   browsable asset library
//! - Environment presets: one-click world settings bundles
//!
//! Template application is always a non-destructive merge: explicit
//! fields override, property bags merge key-wise with the caller
//! winning.

mod prefab;
mod preset;
mod template;

pub use prefab::{builtin_prefabs, prefabs_in_category, search_prefabs, AssetCategory, Prefab};
pub use preset::{environment_preset, preset_label};
pub use template::{merge_properties, template, ObjectTemplate};
