//! Magic command payloads
//!
//! The structured shapes returned by the external command interpreter.
//! Two formats are accepted:
//! - The current format: `{spawn?, settings?, message?}`
//! - The legacy scene-script format:
//!   `{title?, initialObjects, settings?, timeline?}`
//!
//! Spawn entries carry their type as a plain string, not the closed
//! `ObjectType` enum: an unknown tag must skip that one entry with a
//! warning instead of failing the whole payload parse.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::world::SettingsPatch;

/// The current interpreter output shape
///
/// Any combination of the three fields is valid; a payload with only
/// `message` is a pure notification.
#[derive(Debug, Clone, Deserialize)]
pub struct MagicCommand {
    #[serde(default)]
    pub spawn: Option<Vec<SpawnSpec>>,
    #[serde(default)]
    pub settings: Option<SettingsPatch>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One object to spawn
///
/// Everything except the type tag is optional; defaults come from the
/// type's template (`scale` multiplies the template size, a missing
/// `position` rests the object on the ground plane at the world origin).
#[derive(Debug, Clone, Deserialize)]
pub struct SpawnSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub position: Option<[f32; 3]>,
    #[serde(default)]
    pub scale: Option<[f32; 3]>,
    #[serde(default)]
    pub rotation: Option<[f32; 3]>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub components: Option<Vec<ComponentSpec>>,
}

fn default_enabled() -> bool {
    true
}

/// A component carried by a spawn entry
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub props: Map<String, Value>,
}

/// The legacy scene-orchestration script shape
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyScript {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "initialObjects")]
    pub initial_objects: Vec<LegacySpawn>,
    #[serde(default)]
    pub settings: Option<SettingsPatch>,
    /// Accepted for compatibility; orchestration runs renderer-side and
    /// is not part of the document
    #[serde(default)]
    pub timeline: Option<Value>,
}

/// One object in a legacy script
///
/// Legacy scripts size objects as `scale x 40` world units and carry no
/// properties or components.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacySpawn {
    #[serde(rename = "type")]
    pub kind: String,
    pub position: [f32; 3],
    pub scale: [f32; 3],
    #[serde(default)]
    pub rotation: Option<[f32; 3]>,
    #[serde(default)]
    pub color: Option<String>,
}

/// What a successfully ingested command did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MagicOutcome {
    /// User-visible notification from the interpreter, if any
    pub message: Option<String>,
    /// Number of objects actually spawned
    pub spawned: usize,
    /// Type tags that were skipped (unknown object or component types)
    pub skipped: Vec<String>,
    /// Whether a settings merge was applied
    pub settings_applied: bool,
}

impl MagicOutcome {
    /// True when some entries were skipped and a non-fatal warning
    /// should be surfaced
    pub fn has_warnings(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// External command interpreter boundary
///
/// Turns a free-text instruction into the structured payload consumed by
/// `ingest_command`. The real implementation is a hosted model call and
/// lives outside this crate; from the editor's point of view the call is
/// asynchronous I/O whose failure surfaces as a transient notification.
/// A later call supersedes an earlier in-flight one (caller-side
/// abandonment); the document merge itself stays synchronous.
pub trait CommandInterpreter {
    fn interpret(&self, instruction: &str) -> Result<Value, InterpreterError>;
}

/// Failure from the external interpreter call
///
/// Never rolls anything back: no mutation has happened yet when the
/// interpreter fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterError(pub String);

impl std::fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "interpreter call failed: {}", self.0)
    }
}

impl std::error::Error for InterpreterError {}

/// A command payload that could not be applied
///
/// Raised only for whole-payload failures; per-entry problems degrade to
/// skip-and-warn in the outcome instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MagicError {
    /// The payload does not parse as either accepted shape. Nothing was
    /// mutated.
    InvalidPayload(String),
}

impl std::fmt::Display for MagicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MagicError::InvalidPayload(msg) => write!(f, "invalid command payload: {}", msg),
        }
    }
}

impl std::error::Error for MagicError {}
