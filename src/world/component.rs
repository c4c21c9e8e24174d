//! Behavior components
//!
//! Components are attachable behavior modules on an object (ECS-lite:
//! plain props consumed by the renderer, no update scheduling of their
//! own). A disabled component is inert but keeps its configured props so
//! behavior can be toggled without losing configuration.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::object::generate_id;

/// The closed set of attachable component types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Movement,
    Ai,
    Interaction,
    Physics,
    Health,
    Inventory,
    Weapon,
}

impl ComponentType {
    /// All component types, in menu order
    pub const ALL: [ComponentType; 7] = [
        ComponentType::Movement,
        ComponentType::Ai,
        ComponentType::Interaction,
        ComponentType::Physics,
        ComponentType::Health,
        ComponentType::Inventory,
        ComponentType::Weapon,
    ];

    /// The serialized tag for this type
    pub fn tag(&self) -> &'static str {
        match self {
            ComponentType::Movement => "movement",
            ComponentType::Ai => "ai",
            ComponentType::Interaction => "interaction",
            ComponentType::Physics => "physics",
            ComponentType::Health => "health",
            ComponentType::Inventory => "inventory",
            ComponentType::Weapon => "weapon",
        }
    }

    /// Parse a serialized tag back into a type
    pub fn parse(tag: &str) -> Option<ComponentType> {
        ComponentType::ALL.iter().copied().find(|t| t.tag() == tag)
    }

    /// Default props seeded when a component of this type is attached
    ///
    /// The shape of the bag depends on the type; the bag is free to
    /// diverge after edits.
    pub fn default_props(&self) -> Map<String, Value> {
        let value = match self {
            ComponentType::Movement => json!({
                "speed": 2,
                "pattern": "patrol",
                "distance": 5,
            }),
            ComponentType::Ai => json!({
                "behavior": "patrol",
                "speed": 1,
            }),
            ComponentType::Interaction => json!({
                "radius": 2,
                "message": "Interact",
            }),
            ComponentType::Physics => json!({
                "mass": 1,
                "friction": 0.5,
            }),
            ComponentType::Health | ComponentType::Inventory | ComponentType::Weapon => json!({}),
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

fn default_enabled() -> bool {
    true
}

/// An attached behavior on a `GameObject`
///
/// Components have no independent lifecycle: created when attached,
/// destroyed only when explicitly removed or when the owning object is
/// deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameComponent {
    /// Unique within the owning object's component list
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub props: Map<String, Value>,
}

impl GameComponent {
    /// Create a component with a fresh id and the type's default props
    pub fn new(kind: ComponentType) -> Self {
        Self {
            id: generate_id(),
            kind,
            enabled: true,
            props: kind.default_props(),
        }
    }

    /// Create a component with explicit props (fresh id, enabled)
    ///
    /// Used by prefabs and the magic pipeline, where the caller supplies
    /// props that already went through the template merge.
    pub fn with_props(kind: ComponentType, props: Map<String, Value>) -> Self {
        Self {
            id: generate_id(),
            kind,
            enabled: true,
            props,
        }
    }

    /// Read a numeric prop, falling back when absent or non-numeric
    pub fn prop_f32(&self, key: &str, fallback: f32) -> f32 {
        self.props
            .get(key)
            .and_then(Value::as_f64)
            .map(|v| v as f32)
            .unwrap_or(fallback)
    }

    /// Read a string prop
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_props_by_type() {
        let movement = GameComponent::new(ComponentType::Movement);
        assert_eq!(movement.prop_f32("speed", 0.0), 2.0);
        assert_eq!(movement.prop_str("pattern"), Some("patrol"));
        assert_eq!(movement.prop_f32("distance", 0.0), 5.0);

        let interaction = GameComponent::new(ComponentType::Interaction);
        assert_eq!(interaction.prop_f32("radius", 0.0), 2.0);
        assert_eq!(interaction.prop_str("message"), Some("Interact"));

        let physics = GameComponent::new(ComponentType::Physics);
        assert_eq!(physics.prop_f32("mass", 0.0), 1.0);
        assert_eq!(physics.prop_f32("friction", 0.0), 0.5);

        let health = GameComponent::new(ComponentType::Health);
        assert!(health.props.is_empty());
    }

    #[test]
    fn test_component_ids_unique() {
        let a = GameComponent::new(ComponentType::Ai);
        let b = GameComponent::new(ComponentType::Ai);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_enabled_defaults_true_on_deserialize() {
        let comp: GameComponent = serde_json::from_value(json!({
            "id": 7,
            "type": "weapon",
        }))
        .unwrap();
        assert!(comp.enabled);
        assert!(comp.props.is_empty());
    }

    #[test]
    fn test_tag_roundtrip() {
        for kind in ComponentType::ALL {
            assert_eq!(ComponentType::parse(kind.tag()), Some(kind));
        }
        assert_eq!(ComponentType::parse("teleport"), None);
    }
}
