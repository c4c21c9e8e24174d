//! Object templates
//!
//! Per-type default fields (size, color, starting properties) used when
//! an object is newly placed. Lookup is a match over the closed
//! `ObjectType` enum, so it is total by construction: every type has an
//! entry and lookup never fails.
//!
//! Template application is a non-destructive merge: explicit
//! caller-supplied fields override template defaults, and caller
//! property bags merge key-wise over the template's (caller wins).

use serde_json::{json, Map, Value};

use crate::world::{generate_id, GameMode, GameObject, ObjectType};

/// Default fields for one object type
#[derive(Debug, Clone)]
pub struct ObjectTemplate {
    pub kind: ObjectType,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub color: &'static str,
    pub properties: Map<String, Value>,
}

/// Merge a caller property bag over template defaults, caller keys
/// winning on conflict
pub fn merge_properties(defaults: &Map<String, Value>, overrides: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = defaults.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

fn props(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Template lookup, total over the closed type enumeration
pub fn template(kind: ObjectType) -> ObjectTemplate {
    let (width, height, depth, color, properties) = match kind {
        ObjectType::Player => (
            40.0, 40.0, 40.0, "#3b82f6",
            json!({ "health": 100, "lives": 3, "mass": 1 }),
        ),
        ObjectType::Platform => (
            100.0, 20.0, 100.0, "#475569",
            json!({ "friction": 0.8, "static": true }),
        ),
        ObjectType::Enemy => (
            40.0, 40.0, 40.0, "#ef4444",
            json!({ "damage": 10, "patrol": true, "speed": 2 }),
        ),
        ObjectType::Goal => (
            50.0, 50.0, 50.0, "#fbbf24",
            json!({ "nextLevel": true, "interactionRadius": 2 }),
        ),
        ObjectType::Coin => (
            20.0, 20.0, 20.0, "#fbbf24",
            json!({ "value": 10, "rotate": true }),
        ),
        ObjectType::Hazard => (
            40.0, 40.0, 40.0, "#991b1b",
            json!({ "damage": 100 }),
        ),
        ObjectType::Trigger => (
            50.0, 50.0, 50.0, "#10b981",
            json!({ "onEnter": "none", "invisible": true }),
        ),
        ObjectType::Light => (
            10.0, 10.0, 10.0, "#fff",
            json!({ "intensity": 1, "range": 10, "type": "point" }),
        ),
        ObjectType::Model => (
            50.0, 50.0, 50.0, "#8b5cf6",
            json!({ "modelUrl": "", "scale": 1 }),
        ),
        ObjectType::Character => (
            40.0, 80.0, 40.0, "#ec4899",
            json!({ "npc": true, "dialogue": "Hello!", "speed": 2 }),
        ),
        ObjectType::Car => (
            80.0, 40.0, 160.0, "#ef4444",
            json!({ "drivable": true, "speed": 20 }),
        ),
        ObjectType::House => (
            400.0, 300.0, 400.0, "#92400e",
            json!({ "interior": false }),
        ),
        ObjectType::Tree => (
            100.0, 200.0, 100.0, "#15803d",
            json!({ "type": "pine" }),
        ),
        ObjectType::Building => (
            600.0, 1200.0, 600.0, "#475569",
            json!({ "floors": 5 }),
        ),
        ObjectType::Fence => (
            100.0, 50.0, 10.0, "#78350f",
            json!({ "length": 100 }),
        ),
        ObjectType::Rock => (
            60.0, 40.0, 60.0, "#57534e",
            json!({ "scale": 1 }),
        ),
        ObjectType::Crate => (
            50.0, 50.0, 50.0, "#92400e",
            json!({ "physics": true, "mass": 2 }),
        ),
        ObjectType::Lamp => (
            20.0, 250.0, 20.0, "#1e293b",
            json!({ "lightColor": "#fbbf24", "lightIntensity": 2 }),
        ),
        ObjectType::Particle => (
            10.0, 10.0, 10.0, "#fff",
            json!({ "system": "fire", "active": true }),
        ),
        ObjectType::Flower => (
            20.0, 20.0, 20.0, "#f472b6",
            json!({ "type": "rose" }),
        ),
        ObjectType::Bush => (
            60.0, 40.0, 60.0, "#166534",
            json!({ "density": 1 }),
        ),
        ObjectType::Mushroom => (
            15.0, 15.0, 15.0, "#ef4444",
            json!({ "toxic": false }),
        ),
        ObjectType::Skyscraper => (
            400.0, 2000.0, 400.0, "#64748b",
            json!({ "glass": true }),
        ),
        ObjectType::Bridge => (
            200.0, 20.0, 1000.0, "#475569",
            json!({ "length": 50 }),
        ),
        ObjectType::Fountain => (
            150.0, 100.0, 150.0, "#60a5fa",
            json!({ "waterHeight": 2 }),
        ),
        ObjectType::Bench => (
            120.0, 40.0, 40.0, "#78350f",
            json!({ "seats": 3 }),
        ),
        ObjectType::Barrel => (
            40.0, 60.0, 40.0, "#92400e",
            json!({ "explosive": true }),
        ),
        ObjectType::Chest => (
            60.0, 40.0, 40.0, "#fbbf24",
            json!({ "loot": "coins" }),
        ),
    };

    ObjectTemplate {
        kind,
        width,
        height,
        depth,
        color,
        properties: props(properties),
    }
}

impl ObjectTemplate {
    /// Spawn a 2D object at the given document-space position
    ///
    /// The caller (placement engine) has already converted pixels to
    /// document space and centered on the click point.
    pub fn spawn_2d(&self, x: f32, y: f32) -> GameObject {
        GameObject {
            id: generate_id(),
            kind: self.kind,
            x,
            y,
            z: None,
            width: self.width,
            height: self.height,
            depth: None,
            rotation: None,
            color: self.color.to_string(),
            properties: self.properties.clone(),
            components: Vec::new(),
            visible: true,
        }
    }

    /// Spawn a 3D object at the given world position
    pub fn spawn_3d(&self, x: f32, y: f32, z: f32) -> GameObject {
        GameObject {
            id: generate_id(),
            kind: self.kind,
            x,
            y,
            z: Some(z),
            width: self.width,
            height: self.height,
            depth: Some(self.depth),
            rotation: Some([0.0, 0.0, 0.0]),
            color: self.color.to_string(),
            properties: self.properties.clone(),
            components: Vec::new(),
            visible: true,
        }
    }

    /// Spawn a 3D object at the world origin, resting on the ground
    /// plane (vertical coordinate = half the height)
    pub fn spawn_3d_grounded(&self) -> GameObject {
        self.spawn_3d(0.0, self.height / 2.0, 0.0)
    }

    /// Spawn at the mode's default position: ground-rested origin in 3D,
    /// document origin in 2D
    pub fn spawn_default(&self, mode: GameMode) -> GameObject {
        match mode {
            GameMode::TwoD => self.spawn_2d(0.0, 0.0),
            GameMode::ThreeD => self.spawn_3d_grounded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_total_over_all_types() {
        for kind in ObjectType::ALL {
            let tpl = template(kind);
            assert_eq!(tpl.kind, kind);
            assert!(tpl.width > 0.0 && tpl.height > 0.0 && tpl.depth > 0.0);
            assert!(!tpl.color.is_empty());
        }
    }

    #[test]
    fn test_known_template_values() {
        let coin = template(ObjectType::Coin);
        assert_eq!((coin.width, coin.height, coin.depth), (20.0, 20.0, 20.0));
        assert_eq!(coin.color, "#fbbf24");
        assert_eq!(coin.properties.get("value"), Some(&json!(10)));

        let skyscraper = template(ObjectType::Skyscraper);
        assert_eq!(skyscraper.height, 2000.0);
    }

    #[test]
    fn test_instantiation_idempotent_except_id() {
        let tpl = template(ObjectType::Tree);
        let a = tpl.spawn_3d_grounded();
        let b = tpl.spawn_3d_grounded();
        assert_ne!(a.id, b.id);

        let mut b_with_a_id = b.clone();
        b_with_a_id.id = a.id;
        assert_eq!(a, b_with_a_id);
    }

    #[test]
    fn test_grounded_spawn_rests_on_ground() {
        let obj = template(ObjectType::Character).spawn_3d_grounded();
        assert_eq!(obj.x, 0.0);
        assert_eq!(obj.y, 40.0); // height 80, half on either side of the base
        assert_eq!(obj.z, Some(0.0));
    }

    #[test]
    fn test_2d_spawn_has_no_depth_axis() {
        let obj = template(ObjectType::Platform).spawn_2d(10.0, 20.0);
        assert!(obj.z.is_none());
        assert!(obj.depth.is_none());
        assert!(obj.rotation.is_none());
    }

    #[test]
    fn test_merge_properties_caller_wins() {
        let tpl = template(ObjectType::Enemy);
        let mut overrides = Map::new();
        overrides.insert("damage".into(), json!(50));
        overrides.insert("boss".into(), json!(true));

        let merged = merge_properties(&tpl.properties, &overrides);
        assert_eq!(merged.get("damage"), Some(&json!(50)));
        assert_eq!(merged.get("boss"), Some(&json!(true)));
        // Template keys not overridden survive
        assert_eq!(merged.get("patrol"), Some(&json!(true)));
    }
}
