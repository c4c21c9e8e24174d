//! World module - the scene document and its object model
//!
//! The in-memory authoritative `GameDesign` document:
//! - Placed objects with open property bags and behavior components
//! - Typed world settings with partial-update merge semantics
//! - Pure scene-store operations (every mutation returns a new document)

mod component;
mod design;
mod object;
mod settings;

pub use component::{ComponentType, GameComponent};
pub use design::{GameDesign, GameLogic, GameMode, LogicAction, LogicTrigger};
pub use object::{generate_id, GameObject, ObjectPatch, ObjectType};
pub use settings::{
    BloomSettings, CameraMode, Environment, GameSettings, Gravity, GroundType, LoseCondition,
    RenderingPatch, RenderingSettings, SettingsPatch, SsaoSettings, SsrSettings, Tonemapping,
    VignetteSettings, Weather, WinCondition,
};

pub(crate) use design::now_millis;
