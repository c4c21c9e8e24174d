//! Game persistence adapter
//!
//! Maps a `GameDesign` to one JSON record in the `games` collection and
//! mirrors it into the local snapshot cache, so a reload can recover
//! work in progress without the record store. Loads run a validation
//! pass so a corrupt or hostile blob never becomes the live document.
//!
//! An I/O failure is surfaced to the caller and never rolls back the
//! in-memory document; local state stays the source of truth and the
//! user retries the save independently.

use serde_json::Value;
use tracing::{info, warn};

use super::local::SnapshotStore;
use super::records::{Query, RecordStore, SortOrder};
use super::{StorageError, StorageHandle};
use crate::world::{now_millis, GameDesign};

/// Collection holding one record per saved game
pub const GAMES_COLLECTION: &str = "games";
/// Snapshot key caching the in-progress document
pub const CURRENT_GAME_KEY: &str = "current_game";
/// Snapshot key caching the saved-games list
pub const GAMES_KEY: &str = "games";

/// Validation limits to prevent resource exhaustion from hostile blobs
pub mod limits {
    /// Maximum number of objects in a document
    pub const MAX_OBJECTS: usize = 4096;
    /// Maximum components on one object
    pub const MAX_COMPONENTS: usize = 64;
    /// Maximum length for short strings (colors, tags)
    pub const MAX_STRING_LEN: usize = 256;
    /// Maximum length for title/description
    pub const MAX_TEXT_LEN: usize = 4096;
    /// Maximum coordinate magnitude
    pub const MAX_COORD: f32 = 1_000_000.0;
}

/// Error type for persistence operations
#[derive(Debug)]
pub enum GameStoreError {
    /// Backend failure (record store or snapshot store)
    Storage(StorageError),
    /// Serialization/deserialization error
    Serde(String),
    /// A loaded blob failed the validation pass
    Validation(String),
    /// No record with the requested id
    NotFound(String),
}

impl std::fmt::Display for GameStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStoreError::Storage(e) => write!(f, "storage error: {}", e),
            GameStoreError::Serde(msg) => write!(f, "serialization error: {}", msg),
            GameStoreError::Validation(msg) => write!(f, "validation error: {}", msg),
            GameStoreError::NotFound(id) => write!(f, "game not found: {}", id),
        }
    }
}

impl std::error::Error for GameStoreError {}

impl From<StorageError> for GameStoreError {
    fn from(e: StorageError) -> Self {
        GameStoreError::Storage(e)
    }
}

/// Check if a float is valid (not NaN or infinite, within bounds)
fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

/// Validate a document before it becomes the live document
///
/// Checks id uniqueness, coordinate sanity, and string lengths. Loaded
/// blobs come from storage the user controls only indirectly, so this
/// runs on every load path.
pub fn validate_design(design: &GameDesign) -> Result<(), GameStoreError> {
    if design.title.len() > limits::MAX_TEXT_LEN {
        return Err(GameStoreError::Validation("title too long".to_string()));
    }
    if design.description.len() > limits::MAX_TEXT_LEN {
        return Err(GameStoreError::Validation("description too long".to_string()));
    }
    if design.objects.len() > limits::MAX_OBJECTS {
        return Err(GameStoreError::Validation(format!(
            "too many objects ({} > {})",
            design.objects.len(),
            limits::MAX_OBJECTS
        )));
    }

    let mut seen_ids = std::collections::HashSet::new();
    for (idx, obj) in design.objects.iter().enumerate() {
        let context = format!("object[{}]", idx);

        if !seen_ids.insert(obj.id) {
            return Err(GameStoreError::Validation(format!(
                "{}: duplicate object id {}",
                context, obj.id
            )));
        }

        for (name, value) in [
            ("x", obj.x),
            ("y", obj.y),
            ("z", obj.z.unwrap_or(0.0)),
            ("width", obj.width),
            ("height", obj.height),
            ("depth", obj.depth.unwrap_or(0.0)),
        ] {
            if !is_valid_float(value) {
                return Err(GameStoreError::Validation(format!(
                    "{}: invalid {} = {}",
                    context, name, value
                )));
            }
        }
        if let Some(rotation) = obj.rotation {
            if rotation.iter().any(|r| !r.is_finite()) {
                return Err(GameStoreError::Validation(format!(
                    "{}: invalid rotation",
                    context
                )));
            }
        }
        if obj.color.len() > limits::MAX_STRING_LEN {
            return Err(GameStoreError::Validation(format!(
                "{}: color too long",
                context
            )));
        }

        if obj.components.len() > limits::MAX_COMPONENTS {
            return Err(GameStoreError::Validation(format!(
                "{}: too many components ({} > {})",
                context,
                obj.components.len(),
                limits::MAX_COMPONENTS
            )));
        }
        let mut seen_components = std::collections::HashSet::new();
        for comp in &obj.components {
            if !seen_components.insert(comp.id) {
                return Err(GameStoreError::Validation(format!(
                    "{}: duplicate component id {}",
                    context, comp.id
                )));
            }
        }
    }

    Ok(())
}

/// Resolve a fire-and-poll handle on the synchronous adapter path
///
/// The in-process backends always resolve immediately; a pending result
/// from an async backend is reported as a storage error rather than
/// blocking the editor.
fn ready<T>(handle: StorageHandle<T>) -> Result<T, GameStoreError> {
    match handle.take() {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(GameStoreError::Storage(e)),
        None => Err(GameStoreError::Storage(StorageError::Other(
            "backend operation still pending".to_string(),
        ))),
    }
}

/// The persistence adapter: record store + snapshot cache
pub struct GameStore {
    records: Box<dyn RecordStore>,
    snapshots: Box<dyn SnapshotStore>,
}

impl GameStore {
    pub fn new(records: Box<dyn RecordStore>, snapshots: Box<dyn SnapshotStore>) -> GameStore {
        GameStore { records, snapshots }
    }

    /// Save a document: stamp `updatedAt`, upsert the record, refresh
    /// the snapshot cache. Returns the stamped document, which the
    /// caller adopts as the live document.
    pub fn save(&self, design: &GameDesign) -> Result<GameDesign, GameStoreError> {
        let mut stamped = design.clone();
        stamped.updated_at = now_millis();

        let blob = serde_json::to_value(&stamped).map_err(|e| GameStoreError::Serde(e.to_string()))?;

        let exists = ready(self.records.get(GAMES_COLLECTION, &stamped.id))?.is_some();
        if exists {
            ready(self.records.update(GAMES_COLLECTION, &stamped.id, blob))?;
        } else {
            ready(self.records.insert(GAMES_COLLECTION, blob))?;
        }

        self.cache_current(&stamped)?;
        self.refresh_games_cache()?;

        info!(id = %stamped.id, title = %stamped.title, "game saved");
        Ok(stamped)
    }

    /// Publish a document: set `isPublished` and save
    pub fn deploy(&self, design: &GameDesign) -> Result<GameDesign, GameStoreError> {
        let mut published = design.clone();
        published.is_published = true;
        let stamped = self.save(&published)?;
        info!(id = %stamped.id, "game deployed");
        Ok(stamped)
    }

    /// Load a document by id, validating the blob
    pub fn load(&self, id: &str) -> Result<GameDesign, GameStoreError> {
        let record = ready(self.records.get(GAMES_COLLECTION, id))?
            .ok_or_else(|| GameStoreError::NotFound(id.to_string()))?;
        let design: GameDesign =
            serde_json::from_value(record).map_err(|e| GameStoreError::Serde(e.to_string()))?;
        validate_design(&design)?;
        Ok(design)
    }

    /// All saved games, most recently updated first
    ///
    /// Records that fail to parse or validate are skipped with a
    /// warning; one bad blob must not hide the rest of the library.
    pub fn list(&self) -> Result<Vec<GameDesign>, GameStoreError> {
        let query = Query::new().order_by("updatedAt", SortOrder::Descending);
        let records = ready(self.records.list(GAMES_COLLECTION, &query))?;

        let mut games = Vec::new();
        for record in records {
            match serde_json::from_value::<GameDesign>(record) {
                Ok(design) => match validate_design(&design) {
                    Ok(()) => games.push(design),
                    Err(e) => warn!(error = %e, "skipping invalid saved game"),
                },
                Err(e) => warn!(error = %e, "skipping unparseable saved game"),
            }
        }
        Ok(games)
    }

    /// Number of saved games
    pub fn count(&self) -> Result<usize, GameStoreError> {
        ready(self.records.count(GAMES_COLLECTION, &Query::new()))
    }

    /// Cache the in-progress document under `current_game`
    ///
    /// Called on every document change so a reload recovers unsaved
    /// work.
    pub fn cache_current(&self, design: &GameDesign) -> Result<(), GameStoreError> {
        let blob =
            serde_json::to_string(design).map_err(|e| GameStoreError::Serde(e.to_string()))?;
        ready(self.snapshots.set(CURRENT_GAME_KEY, &blob))
    }

    /// Recover the cached in-progress document, if any
    ///
    /// A corrupt cache entry is discarded with a warning rather than
    /// surfaced; the cache is advisory.
    pub fn load_current(&self) -> Result<Option<GameDesign>, GameStoreError> {
        let Some(blob) = ready(self.snapshots.get(CURRENT_GAME_KEY))? else {
            return Ok(None);
        };
        match serde_json::from_str::<GameDesign>(&blob) {
            Ok(design) => match validate_design(&design) {
                Ok(()) => Ok(Some(design)),
                Err(e) => {
                    warn!(error = %e, "discarding invalid current-game cache");
                    Ok(None)
                }
            },
            Err(e) => {
                warn!(error = %e, "discarding corrupt current-game cache");
                Ok(None)
            }
        }
    }

    /// Mirror the saved-games list into the snapshot cache
    fn refresh_games_cache(&self) -> Result<(), GameStoreError> {
        let records = ready(self.records.list(GAMES_COLLECTION, &Query::new()))?;
        let blob = serde_json::to_string(&Value::Array(records))
            .map_err(|e| GameStoreError::Serde(e.to_string()))?;
        ready(self.snapshots.set(GAMES_KEY, &blob))
    }
}

/// Serialize a document for file download: pretty-printed JSON plus a
/// filename slug derived from the title
///
/// Always the whole document; there is no partial export.
pub fn export_design(design: &GameDesign) -> Result<(String, String), GameStoreError> {
    let json = serde_json::to_string_pretty(design)
        .map_err(|e| GameStoreError::Serde(e.to_string()))?;

    let slug: Vec<&str> = design.title.split_whitespace().collect();
    let slug = slug.join("-").to_lowercase();
    let name = if slug.is_empty() { "untitled".to_string() } else { slug };

    Ok((format!("{}.json", name), json))
}
