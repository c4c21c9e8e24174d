//! Renderer-facing runtime lookups
//!
//! Pure, read-only helpers the scene renderer consumes every frame.
//! Nothing here writes back into the document: continuous visual
//! behavior (patrol oscillation, floating pickups, the day/night clock)
//! is a function of component props and elapsed time, recomputed per
//! frame and discarded.

use crate::world::{ComponentType, GameComponent, ObjectType};

/// Physics collision shape for an object type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsShape {
    Box,
    Sphere,
    Cylinder,
}

/// Fixed physics-shape lookup
///
/// Preserved from the original as-is, visual shape notwithstanding
/// (a rock is a physics sphere but renders box-like).
pub fn physics_shape(kind: ObjectType) -> PhysicsShape {
    match kind {
        ObjectType::Coin | ObjectType::Barrel => PhysicsShape::Cylinder,
        ObjectType::Player | ObjectType::Rock => PhysicsShape::Sphere,
        _ => PhysicsShape::Box,
    }
}

/// Per-frame position offset driven by a movement component
///
/// `patrol` oscillates along x, `float` bobs along y. Disabled or
/// non-movement components contribute nothing. The offset is purely
/// visual: the document position never changes.
pub fn motion_offset(component: &GameComponent, elapsed: f32) -> Option<[f32; 3]> {
    if component.kind != ComponentType::Movement || !component.enabled {
        return None;
    }

    let speed = component.prop_f32("speed", 2.0);
    match component.prop_str("pattern") {
        Some("patrol") => {
            let distance = component.prop_f32("distance", 5.0);
            Some([(elapsed * speed).sin() * distance, 0.0, 0.0])
        }
        Some("float") => {
            let y = (elapsed * speed).sin() * 0.5 + 2.0;
            Some([0.0, y, 0.0])
        }
        _ => None,
    }
}

/// Interaction radius for the editor's radius gizmo
///
/// Present only for enabled interaction components.
pub fn interaction_radius(component: &GameComponent) -> Option<f32> {
    if component.kind != ComponentType::Interaction || !component.enabled {
        return None;
    }
    Some(component.prop_f32("radius", 2.0))
}

/// Advance the day/night clock
///
/// One-tenth of an hour per elapsed second, wrapping at 24.
pub fn advance_time_of_day(time_of_day: f32, delta: f32) -> f32 {
    (time_of_day + delta * 0.1) % 24.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movement(pattern: &str, speed: f32, distance: f32) -> GameComponent {
        let mut comp = GameComponent::new(ComponentType::Movement);
        comp.props.insert("pattern".into(), json!(pattern));
        comp.props.insert("speed".into(), json!(speed));
        comp.props.insert("distance".into(), json!(distance));
        comp
    }

    #[test]
    fn test_physics_shape_table() {
        assert_eq!(physics_shape(ObjectType::Coin), PhysicsShape::Cylinder);
        assert_eq!(physics_shape(ObjectType::Barrel), PhysicsShape::Cylinder);
        assert_eq!(physics_shape(ObjectType::Player), PhysicsShape::Sphere);
        assert_eq!(physics_shape(ObjectType::Rock), PhysicsShape::Sphere);
        assert_eq!(physics_shape(ObjectType::House), PhysicsShape::Box);
        assert_eq!(physics_shape(ObjectType::Crate), PhysicsShape::Box);
    }

    #[test]
    fn test_patrol_oscillates_x() {
        let comp = movement("patrol", 1.0, 5.0);
        let at_zero = motion_offset(&comp, 0.0).unwrap();
        assert_eq!(at_zero, [0.0, 0.0, 0.0]);

        let quarter = motion_offset(&comp, std::f32::consts::FRAC_PI_2).unwrap();
        assert!((quarter[0] - 5.0).abs() < 1e-4);
        assert_eq!(quarter[1], 0.0);
    }

    #[test]
    fn test_float_bobs_around_two() {
        let comp = movement("float", 1.0, 5.0);
        let at_zero = motion_offset(&comp, 0.0).unwrap();
        assert!((at_zero[1] - 2.0).abs() < 1e-4);

        let peak = motion_offset(&comp, std::f32::consts::FRAC_PI_2).unwrap();
        assert!((peak[1] - 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_disabled_component_is_inert() {
        let mut comp = movement("patrol", 1.0, 5.0);
        comp.enabled = false;
        assert!(motion_offset(&comp, 1.0).is_none());
    }

    #[test]
    fn test_non_movement_has_no_offset() {
        let comp = GameComponent::new(ComponentType::Interaction);
        assert!(motion_offset(&comp, 1.0).is_none());
        assert_eq!(interaction_radius(&comp), Some(2.0));
    }

    #[test]
    fn test_time_of_day_wraps() {
        let advanced = advance_time_of_day(23.9, 2.0);
        assert!(advanced < 0.2);
        assert!((advance_time_of_day(12.0, 1.0) - 12.1).abs() < 1e-4);
    }
}
