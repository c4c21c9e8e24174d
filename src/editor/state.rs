//! Editor state and interaction
//!
//! `SceneEditor` owns the live document, the undo history, the current
//! selection, and the active tool, and translates interaction events
//! (canvas clicks, gizmo drags, hotkeys) into scene-store mutations.
//! Every undoable operation records the resulting document exactly once;
//! live drag previews are applied without recording and commit once on
//! release.
//!
//! The service runs single-threaded: callers hold `&mut SceneEditor`,
//! which is the mutual-exclusion boundary between the interaction layer
//! and the magic command pipeline.

use tracing::{debug, info};

use super::camera::ViewportCamera;
use super::history::History;
use crate::asset::{template, Prefab};
use crate::magic::{ingest_command, MagicError, MagicOutcome};
use crate::session::{AccessError, Session};
use crate::world::{
    ComponentType, GameDesign, GameMode, GameObject, ObjectPatch, ObjectType, SettingsPatch,
};

/// Grid cell size for snap-to-grid, in world units
pub const GRID_CELL: f32 = 50.0;
/// Position offset applied to duplicated objects so the copy is visible
pub const DUPLICATE_OFFSET: f32 = 20.0;
/// Canonical object size restored by reset-scale (a 40-unit cube)
pub const RESET_SIZE: f32 = 40.0;

const MIN_ZOOM: f32 = 0.2;
const MAX_ZOOM: f32 = 2.0;
const ZOOM_STEP: f32 = 0.1;

/// Active placement tool
///
/// `Place` is a 2D-only mode: the next canvas click instantiates the
/// type. In 3D, selecting a type adds the object immediately instead of
/// entering a placement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorTool {
    Select,
    Place(ObjectType),
}

/// Gizmo mode for the selected object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformMode {
    Translate,
    Rotate,
    Scale,
}

/// The editor service: live document + history + view state
pub struct SceneEditor {
    design: GameDesign,
    history: History,
    selection: Option<u64>,
    tool: EditorTool,
    transform_mode: TransformMode,
    zoom: f32,
    show_grid: bool,
    snap_to_grid: bool,
    camera: ViewportCamera,
    dragging: bool,
}

impl SceneEditor {
    /// Mount the editor for a session
    ///
    /// The Game Maker is an admin tool; non-admin sessions are refused.
    /// This is a precondition check only, the session plays no further
    /// part in editing.
    pub fn open(session: &Session, design: GameDesign) -> Result<SceneEditor, AccessError> {
        session.require_admin()?;
        Ok(SceneEditor::new(design))
    }

    /// Create an editor over a document
    ///
    /// Records the document once so the history has a defined floor:
    /// undo never goes past the loaded/default state.
    pub fn new(design: GameDesign) -> SceneEditor {
        let mut history = History::new();
        history.record(&design);
        info!(id = %design.id, title = %design.title, "editor opened");
        SceneEditor {
            design,
            history,
            selection: None,
            tool: EditorTool::Select,
            transform_mode: TransformMode::Translate,
            zoom: 1.0,
            show_grid: true,
            snap_to_grid: false,
            camera: ViewportCamera::default(),
            dragging: false,
        }
    }

    /// Replace the document (project switch), preserving view state
    pub fn load(&mut self, design: GameDesign) {
        info!(id = %design.id, "document loaded");
        self.design = design;
        self.history = History::new();
        self.history.record(&self.design);
        self.selection = None;
        self.tool = EditorTool::Select;
        self.dragging = false;
    }

    // ────────────────────────────────────────────────────────────────
    // Accessors
    // ────────────────────────────────────────────────────────────────

    pub fn design(&self) -> &GameDesign {
        &self.design
    }

    pub fn selection(&self) -> Option<u64> {
        self.selection
    }

    /// The selected object, re-derived from the current object list
    ///
    /// A stale selection id (object deleted elsewhere) yields `None`.
    pub fn selected_object(&self) -> Option<&GameObject> {
        self.selection.and_then(|id| self.design.object(id))
    }

    pub fn tool(&self) -> EditorTool {
        self.tool
    }

    pub fn transform_mode(&self) -> TransformMode {
        self.transform_mode
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    pub fn camera(&self) -> &ViewportCamera {
        &self.camera
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ────────────────────────────────────────────────────────────────
    // Tool and view state (no document mutation, never recorded)
    // ────────────────────────────────────────────────────────────────

    /// Change the active tool
    ///
    /// In 2D, `Place(kind)` arms the next canvas click. In 3D there is
    /// no placement mode: the object is added immediately and its id is
    /// returned.
    pub fn set_tool(&mut self, tool: EditorTool) -> Option<u64> {
        match (self.design.mode, tool) {
            (GameMode::ThreeD, EditorTool::Place(kind)) => Some(self.add_object_3d(kind)),
            _ => {
                self.tool = tool;
                None
            }
        }
    }

    pub fn set_transform_mode(&mut self, mode: TransformMode) {
        self.transform_mode = mode;
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    pub fn toggle_snap(&mut self) {
        self.snap_to_grid = !self.snap_to_grid;
    }

    // ────────────────────────────────────────────────────────────────
    // Selection
    // ────────────────────────────────────────────────────────────────

    /// Select an object by id
    ///
    /// Hidden and unknown objects are not selectable; the call degrades
    /// to a no-op, keeping the previous selection.
    pub fn select(&mut self, id: u64) {
        match self.design.object(id) {
            Some(obj) if obj.visible => {
                self.selection = Some(id);
                self.tool = EditorTool::Select;
            }
            _ => {}
        }
    }

    /// Clear the selection (click on empty canvas)
    pub fn deselect(&mut self) {
        self.selection = None;
    }

    /// Drop a selection whose object no longer exists or is hidden
    fn revalidate_selection(&mut self) {
        if let Some(id) = self.selection {
            let valid = self.design.object(id).map(|o| o.visible).unwrap_or(false);
            if !valid {
                self.selection = None;
            }
        }
    }

    // ────────────────────────────────────────────────────────────────
    // Placement
    // ────────────────────────────────────────────────────────────────

    /// Handle a 2D canvas click at pixel coordinates
    ///
    /// In place mode: converts pixels to document space at the current
    /// zoom, instantiates the armed type centered on the click point,
    /// records, selects the new object, and reverts to the select tool.
    /// Returns the new object's id. In select mode (or in 3D) the click
    /// is not a placement and `None` is returned.
    pub fn canvas_click(&mut self, pixel_x: f32, pixel_y: f32) -> Option<u64> {
        if self.design.mode != GameMode::TwoD {
            return None;
        }
        let EditorTool::Place(kind) = self.tool else {
            return None;
        };

        let doc_x = pixel_x / self.zoom;
        let doc_y = pixel_y / self.zoom;

        let tpl = template(kind);
        let object = tpl.spawn_2d(
            (doc_x - tpl.width / 2.0).round(),
            (doc_y - tpl.height / 2.0).round(),
        );
        let id = object.id;
        debug!(%kind, x = object.x, y = object.y, "placed 2d object");

        self.design = self.design.add_object(object);
        self.history.record(&self.design);
        self.selection = Some(id);
        self.tool = EditorTool::Select;
        Some(id)
    }

    /// Add an object immediately at the 3D default spawn point (world
    /// origin, resting on the ground plane) and select it
    pub fn add_object_3d(&mut self, kind: ObjectType) -> u64 {
        let object = template(kind).spawn_3d_grounded();
        let id = object.id;
        debug!(%kind, "added 3d object");

        self.design = self.design.add_object(object);
        self.history.record(&self.design);
        self.selection = Some(id);
        self.tool = EditorTool::Select;
        id
    }

    /// Instantiate a prefab from the asset library and select it
    pub fn place_prefab(&mut self, prefab: &Prefab) -> u64 {
        let object = prefab.instantiate(self.design.mode);
        let id = object.id;
        info!(name = prefab.name, "placed prefab");

        self.design = self.design.add_object(object);
        self.history.record(&self.design);
        self.selection = Some(id);
        id
    }

    // ────────────────────────────────────────────────────────────────
    // Transform drags
    // ────────────────────────────────────────────────────────────────

    /// Apply a live drag preview to the selection
    ///
    /// Not recorded and not snapped: the preview tracks the pointer
    /// smoothly. Call `end_drag` with the final values on release.
    pub fn drag_update(&mut self, patch: &ObjectPatch) {
        let Some(id) = self.selection else {
            return;
        };
        self.design = self.design.update_object(id, patch);
        self.dragging = true;
    }

    /// Commit a finished drag: one update, one history record
    ///
    /// Grid snapping, when enabled, rounds each committed position
    /// coordinate independently to the nearest grid cell. The live
    /// preview is never snapped, only the committed value.
    pub fn end_drag(&mut self, patch: &ObjectPatch) {
        let Some(id) = self.selection else {
            return;
        };
        let mut patch = patch.clone();
        if self.snap_to_grid {
            patch.x = patch.x.map(|v| snap(v, GRID_CELL));
            patch.y = patch.y.map(|v| snap(v, GRID_CELL));
            patch.z = patch.z.map(|v| snap(v, GRID_CELL));
        }
        self.design = self.design.update_object(id, &patch);
        self.history.record(&self.design);
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    // ────────────────────────────────────────────────────────────────
    // Keyboard operations on the selection
    // ────────────────────────────────────────────────────────────────

    /// Commit an edit to the selected object (property panel commits,
    /// color changes, etc). One update, one record.
    pub fn update_selected(&mut self, patch: &ObjectPatch) {
        let Some(id) = self.selection else {
            return;
        };
        self.design = self.design.update_object(id, patch);
        self.history.record(&self.design);
    }

    /// Place the selection's base on the ground plane (`y = height/2`)
    pub fn snap_to_ground(&mut self) {
        let Some(obj) = self.selected_object() else {
            return;
        };
        let patch = ObjectPatch {
            y: Some(obj.height / 2.0),
            ..ObjectPatch::default()
        };
        self.update_selected(&patch);
    }

    /// Reset the selection's position to the origin
    pub fn reset_position(&mut self) {
        let Some(obj) = self.selected_object() else {
            return;
        };
        let patch = if obj.is_3d() {
            ObjectPatch::at_3d(0.0, 0.0, 0.0)
        } else {
            ObjectPatch::at(0.0, 0.0)
        };
        self.update_selected(&patch);
    }

    /// Reset the selection's rotation to zero (3D only)
    pub fn reset_rotation(&mut self) {
        let Some(obj) = self.selected_object() else {
            return;
        };
        if !obj.is_3d() {
            return;
        }
        self.update_selected(&ObjectPatch::rotation([0.0, 0.0, 0.0]));
    }

    /// Reset the selection's size to the canonical 40-unit cube
    pub fn reset_scale(&mut self) {
        let Some(obj) = self.selected_object() else {
            return;
        };
        let depth = obj.is_3d().then_some(RESET_SIZE);
        self.update_selected(&ObjectPatch::size(RESET_SIZE, RESET_SIZE, depth));
    }

    /// Duplicate the selection and select the copy
    ///
    /// The copy gets a fresh id and is offset by a fixed delta on two
    /// axes so it is visibly distinct: x/z in 3D, x/y in 2D.
    pub fn duplicate_selected(&mut self) -> Option<u64> {
        let original = self.selected_object()?;
        let mut copy = original.duplicate();
        copy.x += DUPLICATE_OFFSET;
        match copy.z {
            Some(z) => copy.z = Some(z + DUPLICATE_OFFSET),
            None => copy.y += DUPLICATE_OFFSET,
        }
        let id = copy.id;

        self.design = self.design.add_object(copy);
        self.history.record(&self.design);
        self.selection = Some(id);
        Some(id)
    }

    /// Delete the selection and clear it
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selection else {
            return;
        };
        self.design = self.design.remove_object(id);
        self.history.record(&self.design);
        self.selection = None;
    }

    /// Hide the selection (`visible = false`) and clear it
    ///
    /// Hidden objects stay in the document but drop out of rendering and
    /// picking.
    pub fn hide_selected(&mut self) {
        let Some(id) = self.selection else {
            return;
        };
        self.design = self
            .design
            .update_object(id, &ObjectPatch::visibility(false));
        self.history.record(&self.design);
        self.selection = None;
    }

    /// Restore `visible = true` on every object, regardless of prior
    /// state. No-op (and no history entry) when nothing is hidden.
    pub fn unhide_all(&mut self) {
        if self.design.objects.iter().all(|o| o.visible) {
            return;
        }
        let mut next = self.design.clone();
        for obj in &mut next.objects {
            obj.visible = true;
        }
        self.design = next;
        self.history.record(&self.design);
    }

    // ────────────────────────────────────────────────────────────────
    // Components on the selection
    // ────────────────────────────────────────────────────────────────

    /// Attach a component of the given type to the selection
    pub fn attach_component(&mut self, kind: ComponentType) {
        let Some(obj) = self.selected_object() else {
            return;
        };
        let updated = obj.attach_component(kind);
        let patch = ObjectPatch::components(updated.components);
        self.update_selected(&patch);
    }

    /// Detach a component from the selection
    pub fn detach_component(&mut self, component_id: u64) {
        let Some(obj) = self.selected_object() else {
            return;
        };
        let updated = obj.detach_component(component_id);
        let patch = ObjectPatch::components(updated.components);
        self.update_selected(&patch);
    }

    /// Toggle a component's enabled flag on the selection
    pub fn set_component_enabled(&mut self, component_id: u64, enabled: bool) {
        let Some(obj) = self.selected_object() else {
            return;
        };
        let updated = obj.set_component_enabled(component_id, enabled);
        let patch = ObjectPatch::components(updated.components);
        self.update_selected(&patch);
    }

    // ────────────────────────────────────────────────────────────────
    // Settings
    // ────────────────────────────────────────────────────────────────

    /// Commit a settings change from the world panel
    pub fn update_settings(&mut self, patch: &SettingsPatch) {
        self.design = self.design.update_settings(patch);
        self.history.record(&self.design);
    }

    // ────────────────────────────────────────────────────────────────
    // Undo / redo
    // ────────────────────────────────────────────────────────────────

    /// Step the history cursor back; the restored snapshot becomes the
    /// live document. Never itself recorded.
    pub fn undo(&mut self) {
        if let Some(design) = self.history.undo() {
            self.design = design;
            self.revalidate_selection();
        }
    }

    /// Step the history cursor forward. Never itself recorded.
    pub fn redo(&mut self) {
        if let Some(design) = self.history.redo() {
            self.design = design;
            self.revalidate_selection();
        }
    }

    // ────────────────────────────────────────────────────────────────
    // Camera
    // ────────────────────────────────────────────────────────────────

    /// Focus the viewport camera on the selection (3D only)
    ///
    /// Camera state only: the document is untouched and nothing is
    /// recorded.
    pub fn focus_selected(&mut self) {
        if self.design.mode != GameMode::ThreeD {
            return;
        }
        let Some(obj) = self.selected_object() else {
            return;
        };
        let point = [obj.x, obj.y, obj.z.unwrap_or(0.0)];
        self.camera.focus_on(point);
    }

    // ────────────────────────────────────────────────────────────────
    // Magic commands
    // ────────────────────────────────────────────────────────────────

    /// Merge an interpreter payload into the document in one atomic,
    /// history-recorded step
    ///
    /// A malformed payload fails the whole command: no mutation, no
    /// history entry. Valid payloads record exactly once, even when some
    /// spawn entries were skipped.
    pub fn apply_magic(&mut self, payload: &serde_json::Value) -> Result<MagicOutcome, MagicError> {
        let (design, outcome) = ingest_command(&self.design, payload)?;
        self.design = design;
        self.history.record(&self.design);
        Ok(outcome)
    }
}

/// Round a coordinate to the nearest multiple of the grid cell
fn snap(value: f32, cell: f32) -> f32 {
    (value / cell).round() * cell
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_2d() -> SceneEditor {
        SceneEditor::new(GameDesign::new_2d())
    }

    fn editor_3d() -> SceneEditor {
        SceneEditor::new(GameDesign::new_3d())
    }

    #[test]
    fn test_place_coin_and_undo() {
        let mut editor = editor_2d();
        editor.set_tool(EditorTool::Place(ObjectType::Coin));

        let id = editor.canvas_click(100.0, 100.0).unwrap();
        let obj = editor.design().object(id).unwrap();
        assert_eq!(obj.kind, ObjectType::Coin);
        // Centered on the click: coin template is 20x20
        assert_eq!(obj.x, 90.0);
        assert_eq!(obj.y, 90.0);
        assert_eq!(editor.selection(), Some(id));
        assert_eq!(editor.tool(), EditorTool::Select);

        editor.undo();
        assert!(editor.design().objects.is_empty());
        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn test_canvas_click_respects_zoom() {
        let mut editor = editor_2d();
        editor.zoom_out(); // 0.9
        editor.zoom_out(); // 0.8
        editor.set_tool(EditorTool::Place(ObjectType::Coin));

        let id = editor.canvas_click(80.0, 80.0).unwrap();
        let obj = editor.design().object(id).unwrap();
        // 80px at zoom 0.8 is 100 document units
        assert_eq!(obj.x, 90.0);
        assert_eq!(obj.y, 90.0);
    }

    #[test]
    fn test_select_tool_click_places_nothing() {
        let mut editor = editor_2d();
        assert_eq!(editor.canvas_click(50.0, 50.0), None);
        assert!(editor.design().objects.is_empty());
    }

    #[test]
    fn test_3d_place_tool_adds_immediately() {
        let mut editor = editor_3d();
        let id = editor.set_tool(EditorTool::Place(ObjectType::Tree)).unwrap();

        let obj = editor.design().object(id).unwrap();
        assert_eq!(obj.x, 0.0);
        assert_eq!(obj.y, 100.0); // tree height 200, resting on the ground
        assert_eq!(obj.z, Some(0.0));
        assert_eq!(editor.selection(), Some(id));
        // No lingering placement mode
        assert_eq!(editor.tool(), EditorTool::Select);
    }

    #[test]
    fn test_duplicate_offset_3d() {
        let mut editor = editor_3d();
        let id = editor.add_object_3d(ObjectType::Crate);
        editor.end_drag(&ObjectPatch::at_3d(10.0, 0.0, 5.0));

        let copy_id = editor.duplicate_selected().unwrap();
        let original = editor.design().object(id).unwrap();
        let copy = editor.design().object(copy_id).unwrap();

        assert_ne!(copy.id, original.id);
        assert_eq!(copy.x, 30.0);
        assert_eq!(copy.y, original.y);
        assert_eq!(copy.z, Some(25.0));
        assert_eq!(copy.kind, original.kind);
        assert_eq!(copy.color, original.color);
        assert_eq!(copy.components, original.components);
        assert_eq!(editor.selection(), Some(copy_id));
    }

    #[test]
    fn test_duplicate_offset_2d_stays_planar() {
        let mut editor = editor_2d();
        editor.set_tool(EditorTool::Place(ObjectType::Crate));
        editor.canvas_click(100.0, 100.0);

        let copy_id = editor.duplicate_selected().unwrap();
        let copy = editor.design().object(copy_id).unwrap();
        assert!(copy.z.is_none());
        assert_eq!(copy.x, 75.0 + 20.0);
        assert_eq!(copy.y, 75.0 + 20.0);
    }

    #[test]
    fn test_drag_preview_not_recorded_commit_once() {
        let mut editor = editor_3d();
        editor.add_object_3d(ObjectType::Rock);
        let len_before = editor.history().len();

        // Live preview frames
        for i in 1..=10 {
            editor.drag_update(&ObjectPatch::at_3d(i as f32, 0.0, 0.0));
        }
        assert!(editor.is_dragging());
        assert_eq!(editor.history().len(), len_before);

        editor.end_drag(&ObjectPatch::at_3d(10.0, 0.0, 0.0));
        assert!(!editor.is_dragging());
        assert_eq!(editor.history().len(), len_before + 1);
    }

    #[test]
    fn test_snap_applies_to_commit_only() {
        let mut editor = editor_3d();
        let id = editor.add_object_3d(ObjectType::Crate);
        editor.toggle_snap();

        editor.drag_update(&ObjectPatch::at_3d(123.0, 48.0, 77.0));
        let preview = editor.design().object(id).unwrap();
        // Preview stays smooth
        assert_eq!(preview.x, 123.0);

        editor.end_drag(&ObjectPatch::at_3d(123.0, 48.0, 77.0));
        let committed = editor.design().object(id).unwrap();
        assert_eq!(committed.x, 100.0);
        assert_eq!(committed.y, 50.0);
        assert_eq!(committed.z, Some(100.0));
    }

    #[test]
    fn test_snap_to_ground_and_resets() {
        let mut editor = editor_3d();
        let id = editor.add_object_3d(ObjectType::Character);
        editor.end_drag(&ObjectPatch::at_3d(10.0, 500.0, 10.0));

        editor.snap_to_ground();
        assert_eq!(editor.design().object(id).unwrap().y, 40.0);

        editor.reset_position();
        let obj = editor.design().object(id).unwrap();
        assert_eq!((obj.x, obj.y, obj.z), (0.0, 0.0, Some(0.0)));

        editor.update_selected(&ObjectPatch::rotation([1.0, 2.0, 3.0]));
        editor.reset_rotation();
        assert_eq!(
            editor.design().object(id).unwrap().rotation,
            Some([0.0, 0.0, 0.0])
        );

        editor.reset_scale();
        let obj = editor.design().object(id).unwrap();
        assert_eq!((obj.width, obj.height, obj.depth), (40.0, 40.0, Some(40.0)));
    }

    #[test]
    fn test_hide_and_unhide_all() {
        let mut editor = editor_3d();
        let a = editor.add_object_3d(ObjectType::Coin);
        let b = editor.add_object_3d(ObjectType::Rock);

        editor.select(a);
        editor.hide_selected();
        assert_eq!(editor.selection(), None);

        let hidden = editor.design().object(a).unwrap();
        assert!(!hidden.visible);
        // Still present in the document
        assert_eq!(editor.design().objects.len(), 2);

        // Hidden objects are not selectable
        editor.select(a);
        assert_eq!(editor.selection(), None);
        editor.select(b);
        assert_eq!(editor.selection(), Some(b));

        editor.unhide_all();
        assert!(editor.design().objects.iter().all(|o| o.visible));

        // A second unhide-all changes nothing and records nothing
        let len = editor.history().len();
        editor.unhide_all();
        assert_eq!(editor.history().len(), len);
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut editor = editor_3d();
        let id = editor.add_object_3d(ObjectType::Barrel);
        editor.delete_selected();
        assert!(editor.design().object(id).is_none());
        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn test_stale_selection_operations_are_noops() {
        let mut editor = editor_3d();
        editor.add_object_3d(ObjectType::Coin);
        editor.delete_selected();

        let len = editor.history().len();
        // All selection-driven operations degrade silently
        editor.snap_to_ground();
        editor.duplicate_selected();
        editor.hide_selected();
        editor.attach_component(ComponentType::Movement);
        assert_eq!(editor.history().len(), len);
    }

    #[test]
    fn test_undo_redo_not_recorded() {
        let mut editor = editor_3d();
        editor.add_object_3d(ObjectType::Coin);
        editor.add_object_3d(ObjectType::Rock);
        let len = editor.history().len();

        editor.undo();
        editor.redo();
        editor.undo();
        assert_eq!(editor.history().len(), len);
    }

    #[test]
    fn test_undo_drops_stale_selection() {
        let mut editor = editor_3d();
        editor.add_object_3d(ObjectType::Coin);
        let b = editor.add_object_3d(ObjectType::Rock);
        assert_eq!(editor.selection(), Some(b));

        // Undo removes the rock; the selection must not dangle
        editor.undo();
        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn test_attach_component_records_once() {
        let mut editor = editor_3d();
        let id = editor.add_object_3d(ObjectType::Enemy);
        let len = editor.history().len();

        editor.attach_component(ComponentType::Ai);
        assert_eq!(editor.history().len(), len + 1);

        let obj = editor.design().object(id).unwrap();
        assert_eq!(obj.components.len(), 1);
        assert_eq!(obj.components[0].kind, ComponentType::Ai);

        let comp_id = obj.components[0].id;
        editor.set_component_enabled(comp_id, false);
        assert!(!editor.design().object(id).unwrap().components[0].enabled);

        editor.detach_component(comp_id);
        assert!(editor.design().object(id).unwrap().components.is_empty());
    }

    #[test]
    fn test_zoom_clamps() {
        let mut editor = editor_2d();
        for _ in 0..30 {
            editor.zoom_in();
        }
        assert!((editor.zoom() - 2.0).abs() < 1e-6);
        for _ in 0..30 {
            editor.zoom_out();
        }
        assert!((editor.zoom() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_focus_only_in_3d() {
        let mut editor = editor_2d();
        editor.set_tool(EditorTool::Place(ObjectType::Coin));
        editor.canvas_click(400.0, 300.0);
        let before = editor.camera().clone();
        editor.focus_selected();
        assert_eq!(editor.camera(), &before);

        let mut editor = editor_3d();
        editor.add_object_3d(ObjectType::Tree);
        let before = editor.camera().clone();
        editor.focus_selected();
        assert_ne!(editor.camera(), &before);
    }

    #[test]
    fn test_place_prefab_records_and_selects() {
        let mut editor = editor_3d();
        let prefab = crate::asset::builtin_prefabs()
            .into_iter()
            .find(|p| p.name == "Treasure Chest")
            .unwrap();
        let id = editor.place_prefab(&prefab);

        let obj = editor.design().object(id).unwrap();
        assert_eq!(obj.kind, ObjectType::Chest);
        assert_eq!(obj.components.len(), 1);
        assert_eq!(editor.selection(), Some(id));
    }
}
