//! The scene document
//!
//! `GameDesign` is the complete serializable state of one game being
//! edited: metadata, the placed objects, the (legacy) logic rules, and
//! the world settings. The scene-store operations here are pure: no
//! operation mutates a previously returned document, each returns a new
//! value. That keeps identity-based change detection cheap and makes
//! history snapshotting safe.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::object::{GameObject, ObjectPatch};
use super::settings::{CameraMode, Environment, GameSettings, Gravity, GroundType, SettingsPatch, Weather};

/// Current time in milliseconds since the epoch
///
/// Used for document ids and the created/updated stamps.
pub(crate) fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Document mode, fixed for the document's lifetime once chosen
///
/// Determines which object fields are meaningful and which placement
/// rules apply. The two coordinate conventions are fully isolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "2d")]
    TwoD,
    #[serde(rename = "3d")]
    ThreeD,
}

/// Legacy trigger kinds (see `GameLogic`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogicTrigger {
    OnStart,
    OnUpdate,
    OnCollision,
    OnTriggerEnter,
    OnTriggerExit,
    OnInteract,
    OnPointsReached,
    OnTimer,
}

/// Legacy action kinds (see `GameLogic`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogicAction {
    Message,
    Teleport,
    Spawn,
    Destroy,
    Win,
    Lose,
    Score,
    ChangeWeather,
    ChangeTime,
    PlayEffect,
}

/// Legacy trigger/action rule
///
/// Superseded by per-object `properties.triggerType`/`actionType`.
/// Carried for document compatibility only; nothing in this crate
/// evaluates these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLogic {
    pub id: u64,
    pub trigger: LogicTrigger,
    pub action: LogicAction,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "targetId")]
    pub target_id: Option<u64>,
    #[serde(default)]
    pub params: Map<String, Value>,
}

fn default_false() -> bool {
    false
}

/// The root document: the complete state of one game being edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDesign {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_at: u64,
    pub updated_at: u64,
    #[serde(default = "default_false")]
    pub is_published: bool,
    pub mode: GameMode,
    /// Insertion order is z-order / render order in 2D, arbitrary in 3D
    #[serde(default)]
    pub objects: Vec<GameObject>,
    /// Legacy rules, inert (see `GameLogic`)
    #[serde(default)]
    pub logic: Vec<GameLogic>,
    pub settings: GameSettings,
}

impl GameDesign {
    /// Default 2D document ("My 2D Adventure")
    pub fn new_2d() -> GameDesign {
        let now = now_millis();
        GameDesign {
            id: format!("game-{}", now),
            title: "My 2D Adventure".to_string(),
            description: "A brand new 2D platformer".to_string(),
            created_at: now,
            updated_at: now,
            is_published: false,
            mode: GameMode::TwoD,
            objects: Vec::new(),
            logic: Vec::new(),
            settings: GameSettings {
                gravity: Gravity::Scalar(0.8),
                jump_force: 12.0,
                move_speed: 5.0,
                background_color: "#0f172a".to_string(),
                viewport_width: 800,
                viewport_height: 600,
                skybox: None,
                fog_color: None,
                fog_density: None,
                ambient_light_intensity: None,
                weather: None,
                ground_type: None,
                environment: None,
                time_of_day: None,
                day_night_cycle: None,
                physics_enabled: None,
                camera_mode: None,
                camera_distance: None,
                win_condition: None,
                win_value: None,
                lose_condition: None,
                lose_value: None,
                rendering: None,
            },
        }
    }

    /// Default 3D document ("My 3D World")
    pub fn new_3d() -> GameDesign {
        let now = now_millis();
        GameDesign {
            id: format!("game-{}", now),
            title: "My 3D World".to_string(),
            description: "An immersive 3D experience".to_string(),
            created_at: now,
            updated_at: now,
            is_published: false,
            mode: GameMode::ThreeD,
            objects: Vec::new(),
            logic: Vec::new(),
            settings: GameSettings {
                gravity: Gravity::Vector([0.0, -9.81, 0.0]),
                jump_force: 5.0,
                move_speed: 10.0,
                background_color: "#000000".to_string(),
                viewport_width: 1280,
                viewport_height: 720,
                skybox: Some("sunset".to_string()),
                fog_color: None,
                fog_density: None,
                ambient_light_intensity: Some(0.5),
                weather: Some(Weather::None),
                ground_type: Some(GroundType::Grass),
                environment: Some(Environment::Empty),
                time_of_day: Some(12.0),
                day_night_cycle: Some(false),
                physics_enabled: Some(true),
                camera_mode: Some(CameraMode::ThirdPerson),
                camera_distance: Some(10.0),
                win_condition: None,
                win_value: None,
                lose_condition: None,
                lose_value: None,
                rendering: None,
            },
        }
    }

    /// Default document for the given mode
    pub fn new_for_mode(mode: GameMode) -> GameDesign {
        match mode {
            GameMode::TwoD => GameDesign::new_2d(),
            GameMode::ThreeD => GameDesign::new_3d(),
        }
    }

    /// True for 3D documents
    pub fn is_3d(&self) -> bool {
        self.mode == GameMode::ThreeD
    }

    /// Look up an object by id
    pub fn object(&self, id: u64) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Append an object, returning the new document
    ///
    /// The id must not already exist in the document. Ids are generated
    /// by this crate, so a collision is a programmer error, not a
    /// runtime condition.
    pub fn add_object(&self, object: GameObject) -> GameDesign {
        debug_assert!(
            self.object(object.id).is_none(),
            "duplicate object id {}",
            object.id
        );
        let mut next = self.clone();
        next.objects.push(object);
        next
    }

    /// Shallow-merge a patch over the object with the given id
    ///
    /// An absent id leaves the document unchanged (the returned value is
    /// equal to `self`).
    pub fn update_object(&self, id: u64, patch: &ObjectPatch) -> GameDesign {
        let mut next = self.clone();
        if let Some(obj) = next.objects.iter_mut().find(|o| o.id == id) {
            *obj = patch.apply_to(obj);
        }
        next
    }

    /// Remove the object with the given id
    ///
    /// The component cascade is implicit: components live inside the
    /// object. Absent ids are a no-op.
    pub fn remove_object(&self, id: u64) -> GameDesign {
        let mut next = self.clone();
        next.objects.retain(|o| o.id != id);
        next
    }

    /// Shallow-merge a settings patch (nested rendering merge included)
    pub fn update_settings(&self, patch: &SettingsPatch) -> GameDesign {
        let mut next = self.clone();
        next.settings = self.settings.apply(patch);
        next
    }
}
