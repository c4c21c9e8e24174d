//! Placed objects
//!
//! A `GameObject` is one placed entity in a scene: position, size,
//! appearance, an open property bag, and attached behavior components.
//! Objects are identified by a stable u64 id; the id is the key for all
//! updates, selection, and deletion, never the position.

use std::sync::atomic::{AtomicU64, Ordering};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::component::{ComponentType, GameComponent};

/// Counter for generating unique object ids
static OBJECT_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a stable unique id for an object or component
///
/// Uses a combination of atomic counter, random value, and timestamp to
/// ensure uniqueness both within a session and across separate launches.
/// Ids are never reused for the lifetime of a document.
pub fn generate_id() -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let counter = OBJECT_ID_COUNTER.fetch_add(1, Ordering::SeqCst);
    let random_bits: u64 = rand::random();

    let mut hasher = DefaultHasher::new();
    counter.hash(&mut hasher);
    random_bits.hash(&mut hasher);

    // Include timestamp for cross-session uniqueness (counter resets per
    // launch and the random seed may collide)
    if let Ok(time) = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
        time.as_nanos().hash(&mut hasher);
    }

    hasher.finish()
}

/// The closed set of placeable object types
///
/// Every type has a template entry (see `asset::template`), so template
/// lookup is total over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Player,
    Platform,
    Enemy,
    Goal,
    Coin,
    Hazard,
    Trigger,
    Light,
    Model,
    Character,
    Car,
    House,
    Tree,
    Building,
    Fence,
    Rock,
    Crate,
    Lamp,
    Particle,
    Flower,
    Bush,
    Mushroom,
    Skyscraper,
    Bridge,
    Fountain,
    Bench,
    Barrel,
    Chest,
}

impl ObjectType {
    /// All object types, in palette order
    pub const ALL: [ObjectType; 28] = [
        ObjectType::Player,
        ObjectType::Platform,
        ObjectType::Enemy,
        ObjectType::Goal,
        ObjectType::Coin,
        ObjectType::Hazard,
        ObjectType::Trigger,
        ObjectType::Light,
        ObjectType::Model,
        ObjectType::Character,
        ObjectType::Car,
        ObjectType::House,
        ObjectType::Tree,
        ObjectType::Building,
        ObjectType::Fence,
        ObjectType::Rock,
        ObjectType::Crate,
        ObjectType::Lamp,
        ObjectType::Particle,
        ObjectType::Flower,
        ObjectType::Bush,
        ObjectType::Mushroom,
        ObjectType::Skyscraper,
        ObjectType::Bridge,
        ObjectType::Fountain,
        ObjectType::Bench,
        ObjectType::Barrel,
        ObjectType::Chest,
    ];

    /// The serialized tag for this type (lowercase name)
    pub fn tag(&self) -> &'static str {
        match self {
            ObjectType::Player => "player",
            ObjectType::Platform => "platform",
            ObjectType::Enemy => "enemy",
            ObjectType::Goal => "goal",
            ObjectType::Coin => "coin",
            ObjectType::Hazard => "hazard",
            ObjectType::Trigger => "trigger",
            ObjectType::Light => "light",
            ObjectType::Model => "model",
            ObjectType::Character => "character",
            ObjectType::Car => "car",
            ObjectType::House => "house",
            ObjectType::Tree => "tree",
            ObjectType::Building => "building",
            ObjectType::Fence => "fence",
            ObjectType::Rock => "rock",
            ObjectType::Crate => "crate",
            ObjectType::Lamp => "lamp",
            ObjectType::Particle => "particle",
            ObjectType::Flower => "flower",
            ObjectType::Bush => "bush",
            ObjectType::Mushroom => "mushroom",
            ObjectType::Skyscraper => "skyscraper",
            ObjectType::Bridge => "bridge",
            ObjectType::Fountain => "fountain",
            ObjectType::Bench => "bench",
            ObjectType::Barrel => "barrel",
            ObjectType::Chest => "chest",
        }
    }

    /// Parse a serialized tag back into a type
    ///
    /// Returns `None` for tags outside the closed set. Used by the magic
    /// command pipeline, where an unknown tag skips the entry rather than
    /// failing the whole payload.
    pub fn parse(tag: &str) -> Option<ObjectType> {
        ObjectType::ALL.iter().copied().find(|t| t.tag() == tag)
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

fn default_visible() -> bool {
    true
}

/// One placed entity in a scene
///
/// Coordinate conventions differ by document mode and must not be mixed:
/// - 2D: `x`/`y` are canvas pixel units at zoom 1, origin top-left of
///   the play-field; `z`, `depth`, and `rotation` are absent.
/// - 3D: `x`/`y`/`z` are world units, origin at world center, `y` up.
///
/// Positions are always absolute document-space values. Grid snapping
/// and relative offsets are applied by the editor before they land here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    /// Unique within the document, stable for the object's lifetime
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ObjectType,
    pub x: f32,
    pub y: f32,
    /// Present only in 3D documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    pub width: f32,
    pub height: f32,
    /// Present only in 3D documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f32>,
    /// 3-axis rotation, 3D only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 3]>,
    /// Free-form color value (hex string in practice)
    pub color: String,
    /// Open key-value bag; seeded from the type template at creation,
    /// free to diverge afterwards (no schema enforced on edits)
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Attached behaviors, in attach order
    #[serde(default)]
    pub components: Vec<GameComponent>,
    /// Hidden objects render nothing and are not selectable, but stay in
    /// the document
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl GameObject {
    /// True when this object carries 3D placement data
    pub fn is_3d(&self) -> bool {
        self.z.is_some()
    }

    /// Look up a component by id
    pub fn component(&self, id: u64) -> Option<&GameComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Return a copy with a freshly created component of the given type
    /// appended
    ///
    /// The component gets a new id, `enabled = true`, and props seeded
    /// from the per-type default table.
    pub fn attach_component(&self, kind: ComponentType) -> GameObject {
        let mut next = self.clone();
        next.components.push(GameComponent::new(kind));
        next
    }

    /// Return a copy with the given component removed
    ///
    /// Unknown component ids are a no-op (the copy equals the original).
    pub fn detach_component(&self, component_id: u64) -> GameObject {
        let mut next = self.clone();
        next.components.retain(|c| c.id != component_id);
        next
    }

    /// Return a copy with one component's enabled flag replaced
    pub fn set_component_enabled(&self, component_id: u64, enabled: bool) -> GameObject {
        let mut next = self.clone();
        for comp in &mut next.components {
            if comp.id == component_id {
                comp.enabled = enabled;
            }
        }
        next
    }

    /// Deep-copy this object under a fresh id
    ///
    /// Component ids are kept: they only need to be unique within the
    /// owning object, and the copy carries the whole list.
    pub fn duplicate(&self) -> GameObject {
        let mut copy = self.clone();
        copy.id = generate_id();
        copy
    }
}

/// A shallow partial update for a single object
///
/// Present fields replace the object's current value; absent fields are
/// untouched. `properties` and `components` replace the whole bag/list
/// when present, matching the shallow-merge contract.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ObjectPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub depth: Option<f32>,
    pub rotation: Option<[f32; 3]>,
    pub color: Option<String>,
    pub visible: Option<bool>,
    pub properties: Option<Map<String, Value>>,
    pub components: Option<Vec<GameComponent>>,
}

impl ObjectPatch {
    /// Patch that moves an object in the 2D plane
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch that moves an object in 3D space
    pub fn at_3d(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            ..Self::default()
        }
    }

    /// Patch that replaces the rotation
    pub fn rotation(rotation: [f32; 3]) -> Self {
        Self {
            rotation: Some(rotation),
            ..Self::default()
        }
    }

    /// Patch that replaces the size
    pub fn size(width: f32, height: f32, depth: Option<f32>) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            depth,
            ..Self::default()
        }
    }

    /// Patch that replaces the visibility flag
    pub fn visibility(visible: bool) -> Self {
        Self {
            visible: Some(visible),
            ..Self::default()
        }
    }

    /// Patch that replaces the component list
    pub fn components(components: Vec<GameComponent>) -> Self {
        Self {
            components: Some(components),
            ..Self::default()
        }
    }

    /// Apply this patch to an object, producing the merged copy
    pub fn apply_to(&self, obj: &GameObject) -> GameObject {
        let mut next = obj.clone();
        if let Some(x) = self.x {
            next.x = x;
        }
        if let Some(y) = self.y {
            next.y = y;
        }
        if let Some(z) = self.z {
            next.z = Some(z);
        }
        if let Some(width) = self.width {
            next.width = width;
        }
        if let Some(height) = self.height {
            next.height = height;
        }
        if let Some(depth) = self.depth {
            next.depth = Some(depth);
        }
        if let Some(rotation) = self.rotation {
            next.rotation = Some(rotation);
        }
        if let Some(color) = &self.color {
            next.color = color.clone();
        }
        if let Some(visible) = self.visible {
            next.visible = visible;
        }
        if let Some(properties) = &self.properties {
            next.properties = properties.clone();
        }
        if let Some(components) = &self.components {
            next.components = components.clone();
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate_id()));
        }
    }

    #[test]
    fn test_type_tag_roundtrip() {
        for kind in ObjectType::ALL {
            assert_eq!(ObjectType::parse(kind.tag()), Some(kind));
        }
        assert_eq!(ObjectType::parse("nonexistent"), None);
    }

    #[test]
    fn test_serde_uses_lowercase_type_tag() {
        let json = serde_json::to_value(ObjectType::Skyscraper).unwrap();
        assert_eq!(json, serde_json::json!("skyscraper"));
    }

    #[test]
    fn test_attach_detach_component() {
        let obj = test_object();
        let with_comp = obj.attach_component(ComponentType::Movement);
        assert_eq!(with_comp.components.len(), 1);
        assert!(with_comp.components[0].enabled);
        // Original is untouched
        assert!(obj.components.is_empty());

        let comp_id = with_comp.components[0].id;
        let without = with_comp.detach_component(comp_id);
        assert!(without.components.is_empty());

        // Detaching an unknown id is a no-op
        let unchanged = with_comp.detach_component(comp_id ^ 1);
        assert_eq!(unchanged, with_comp);
    }

    #[test]
    fn test_duplicate_gets_fresh_id() {
        let obj = test_object();
        let copy = obj.duplicate();
        assert_ne!(copy.id, obj.id);
        assert_eq!(copy.kind, obj.kind);
        assert_eq!(copy.color, obj.color);
    }

    #[test]
    fn test_patch_is_shallow() {
        let mut obj = test_object();
        obj.properties
            .insert("health".into(), serde_json::json!(100));

        let patched = ObjectPatch::at(5.0, 7.0).apply_to(&obj);
        assert_eq!(patched.x, 5.0);
        assert_eq!(patched.y, 7.0);
        // Untouched fields survive
        assert_eq!(patched.color, obj.color);
        assert_eq!(patched.properties, obj.properties);
    }

    fn test_object() -> GameObject {
        GameObject {
            id: generate_id(),
            kind: ObjectType::Crate,
            x: 0.0,
            y: 0.0,
            z: None,
            width: 50.0,
            height: 50.0,
            depth: None,
            rotation: None,
            color: "#92400e".to_string(),
            properties: Map::new(),
            components: Vec::new(),
            visible: true,
        }
    }
}
