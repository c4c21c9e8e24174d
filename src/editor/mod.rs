//! Scene editor
//!
//! The placement and transform engine plus its supporting state:
//! - `SceneEditor`: the service owning the live document, selection,
//!   tools, and the undo history
//! - `History`: bounded whole-document snapshot stack
//! - `ViewportCamera`: 3D view state (never part of the document)

mod camera;
mod history;
mod state;

pub use camera::ViewportCamera;
pub use history::{History, MAX_ENTRIES};
pub use state::{EditorTool, SceneEditor, TransformMode, DUPLICATE_OFFSET, GRID_CELL, RESET_SIZE};
