//! Prefab catalog
//!
//! Curated combinations of type + size + properties + starter
//! components, shown in the browsable asset library. Placing a prefab
//! instantiates it through the template merge: prefab fields override
//! the type template's defaults, prefab properties merge over the
//! template bag, and component ids are freshly generated.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::template::{merge_properties, template};
use crate::world::{generate_id, ComponentType, GameComponent, GameMode, GameObject, ObjectType};

/// Asset library categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Characters,
    Nature,
    Urban,
    Props,
    Interactive,
    Vfx,
}

/// A named, curated object configuration
#[derive(Debug, Clone)]
pub struct Prefab {
    pub name: &'static str,
    pub kind: ObjectType,
    pub category: AssetCategory,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub color: &'static str,
    pub properties: Map<String, Value>,
    /// Starter components as (type, props); ids are assigned at
    /// instantiation time
    pub components: Vec<(ComponentType, Map<String, Value>)>,
    pub description: &'static str,
}

fn bag(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// The built-in prefab catalog, in library order
pub fn builtin_prefabs() -> Vec<Prefab> {
    vec![
        Prefab {
            name: "Hero Player",
            kind: ObjectType::Player,
            category: AssetCategory::Characters,
            width: 1.0,
            height: 2.0,
            depth: 1.0,
            color: "#3b82f6",
            properties: bag(json!({ "health": 100, "speed": 5 })),
            components: vec![(ComponentType::Movement, bag(json!({ "speed": 5 })))],
            description: "A ready-to-move player character",
        },
        Prefab {
            name: "Patrolling Guard",
            kind: ObjectType::Enemy,
            category: AssetCategory::Characters,
            width: 1.0,
            height: 2.0,
            depth: 1.0,
            color: "#ef4444",
            properties: bag(json!({ "damage": 20 })),
            components: vec![(
                ComponentType::Ai,
                bag(json!({ "behavior": "patrol", "speed": 2 })),
            )],
            description: "An enemy that walks a patrol route",
        },
        Prefab {
            name: "Pine Tree",
            kind: ObjectType::Tree,
            category: AssetCategory::Nature,
            width: 2.0,
            height: 5.0,
            depth: 2.0,
            color: "#15803d",
            properties: bag(json!({ "type": "pine" })),
            components: Vec::new(),
            description: "A tall evergreen",
        },
        Prefab {
            name: "Large Rock",
            kind: ObjectType::Rock,
            category: AssetCategory::Nature,
            width: 3.0,
            height: 2.0,
            depth: 3.0,
            color: "#57534e",
            properties: bag(json!({ "physics": true, "mass": 500 })),
            components: Vec::new(),
            description: "A heavy boulder",
        },
        Prefab {
            name: "Bush",
            kind: ObjectType::Bush,
            category: AssetCategory::Nature,
            width: 1.5,
            height: 1.0,
            depth: 1.5,
            color: "#166534",
            properties: Map::new(),
            components: Vec::new(),
            description: "Low ground cover",
        },
        Prefab {
            name: "Modern House",
            kind: ObjectType::House,
            category: AssetCategory::Urban,
            width: 10.0,
            height: 8.0,
            depth: 10.0,
            color: "#92400e",
            properties: Map::new(),
            components: Vec::new(),
            description: "A simple residential building",
        },
        Prefab {
            name: "Street Lamp",
            kind: ObjectType::Lamp,
            category: AssetCategory::Urban,
            width: 0.5,
            height: 4.0,
            depth: 0.5,
            color: "#1e293b",
            properties: bag(json!({ "lightIntensity": 2, "lightColor": "#fbbf24" })),
            components: Vec::new(),
            description: "A warm street light",
        },
        Prefab {
            name: "Explosive Barrel",
            kind: ObjectType::Barrel,
            category: AssetCategory::Props,
            width: 0.8,
            height: 1.2,
            depth: 0.8,
            color: "#ef4444",
            properties: bag(json!({ "explosive": true, "damage": 100 })),
            components: vec![(
                ComponentType::Physics,
                bag(json!({ "mass": 10, "friction": 0.5 })),
            )],
            description: "Handle with care",
        },
        Prefab {
            name: "Treasure Chest",
            kind: ObjectType::Chest,
            category: AssetCategory::Props,
            width: 1.0,
            height: 0.8,
            depth: 0.8,
            color: "#fbbf24",
            properties: bag(json!({ "loot": "gold", "locked": false })),
            components: vec![(
                ComponentType::Interaction,
                bag(json!({ "radius": 2, "message": "Open Chest" })),
            )],
            description: "An interactable loot chest",
        },
    ]
}

/// Prefabs filtered by category
pub fn prefabs_in_category(category: AssetCategory) -> Vec<Prefab> {
    builtin_prefabs()
        .into_iter()
        .filter(|p| p.category == category)
        .collect()
}

/// Prefabs whose name contains the query, case-insensitive
pub fn search_prefabs(query: &str) -> Vec<Prefab> {
    let needle = query.to_lowercase();
    builtin_prefabs()
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

impl Prefab {
    /// Instantiate this prefab at the mode's default spawn position
    ///
    /// 3D: world origin, resting on the ground plane. 2D: document
    /// origin. Prefab properties merge over the type template's
    /// defaults; components get fresh ids.
    pub fn instantiate(&self, mode: GameMode) -> GameObject {
        let tpl = template(self.kind);
        let is_3d = mode == GameMode::ThreeD;

        GameObject {
            id: generate_id(),
            kind: self.kind,
            x: 0.0,
            y: if is_3d { self.height / 2.0 } else { 0.0 },
            z: is_3d.then_some(0.0),
            width: self.width,
            height: self.height,
            depth: is_3d.then_some(self.depth),
            rotation: is_3d.then_some([0.0, 0.0, 0.0]),
            color: self.color.to_string(),
            properties: merge_properties(&tpl.properties, &self.properties),
            components: self
                .components
                .iter()
                .map(|(kind, props)| GameComponent::with_props(*kind, props.clone()))
                .collect(),
            visible: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_expected_entries() {
        let prefabs = builtin_prefabs();
        assert_eq!(prefabs.len(), 9);
        assert!(prefabs.iter().any(|p| p.name == "Hero Player"));
        assert!(prefabs.iter().any(|p| p.name == "Treasure Chest"));
    }

    #[test]
    fn test_category_filter() {
        let nature = prefabs_in_category(AssetCategory::Nature);
        assert_eq!(nature.len(), 3);
        assert!(nature.iter().all(|p| p.category == AssetCategory::Nature));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let hits = search_prefabs("BARREL");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Explosive Barrel");
    }

    #[test]
    fn test_instantiate_merges_template_properties() {
        let guard = builtin_prefabs()
            .into_iter()
            .find(|p| p.name == "Patrolling Guard")
            .unwrap();
        let obj = guard.instantiate(GameMode::ThreeD);

        // Prefab key wins over the enemy template's damage of 10
        assert_eq!(obj.properties.get("damage"), Some(&json!(20)));
        // Template keys the prefab does not override survive
        assert_eq!(obj.properties.get("patrol"), Some(&json!(true)));

        assert_eq!(obj.components.len(), 1);
        assert_eq!(obj.components[0].kind, ComponentType::Ai);
        assert_eq!(obj.components[0].prop_f32("speed", 0.0), 2.0);

        // Rests on the ground at the origin
        assert_eq!(obj.y, 1.0);
        assert_eq!(obj.z, Some(0.0));
    }

    #[test]
    fn test_instantiate_component_ids_fresh() {
        let hero = &builtin_prefabs()[0];
        let a = hero.instantiate(GameMode::ThreeD);
        let b = hero.instantiate(GameMode::ThreeD);
        assert_ne!(a.components[0].id, b.components[0].id);
    }
}
