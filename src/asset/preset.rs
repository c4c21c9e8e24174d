//! Environment presets
//!
//! Named bundles of world-level settings (skybox, ground, weather, fog,
//! lighting) applied in one step, either from the world panel or from a
//! magic command. Explicit settings keys always win over the preset's
//! values (see `SettingsPatch::overlaid_on`).

use crate::world::{CameraMode, Environment, GroundType, SettingsPatch, Weather};

/// Display label for a preset, shown in the environment picker
pub fn preset_label(env: Environment) -> Option<&'static str> {
    match env {
        Environment::Empty => Some("Empty Plain"),
        Environment::Forest => Some("Deep Forest"),
        Environment::City => Some("Metro City"),
        Environment::Desert => Some("Sand Dunes"),
        Environment::Arctic => Some("Arctic Waste"),
        Environment::Ocean => Some("Open Ocean"),
        Environment::Jungle => Some("Tropical Jungle"),
        Environment::Volcano => Some("Volcanic Peak"),
        Environment::Mountains => None,
    }
}

fn preset(
    skybox: &str,
    ground_type: GroundType,
    weather: Weather,
    fog_density: f32,
    ambient: f32,
    fog_color: &str,
) -> SettingsPatch {
    SettingsPatch {
        skybox: Some(skybox.to_string()),
        ground_type: Some(ground_type),
        weather: Some(weather),
        fog_density: Some(fog_density),
        ambient_light_intensity: Some(ambient),
        fog_color: Some(fog_color.to_string()),
        camera_mode: Some(CameraMode::ThirdPerson),
        physics_enabled: Some(true),
        ..SettingsPatch::default()
    }
}

/// The settings bundle for a named environment
///
/// `Mountains` has no preset: selecting it only records the environment
/// name. All presets use third-person camera and enabled physics.
pub fn environment_preset(env: Environment) -> Option<SettingsPatch> {
    match env {
        Environment::Empty => Some(preset("sunset", GroundType::Grass, Weather::None, 0.0, 0.5, "#000000")),
        Environment::Forest => Some(preset("forest", GroundType::Grass, Weather::None, 0.01, 0.4, "#064e3b")),
        Environment::City => Some(preset("city", GroundType::Concrete, Weather::None, 0.005, 0.6, "#334155")),
        Environment::Desert => Some(preset("dawn", GroundType::Sand, Weather::None, 0.002, 0.8, "#78350f")),
        Environment::Arctic => Some(preset("night", GroundType::Snow, Weather::Snow, 0.02, 0.3, "#f8fafc")),
        Environment::Ocean => Some(preset("sunset", GroundType::Water, Weather::Rain, 0.01, 0.5, "#0c4a6e")),
        Environment::Jungle => Some(preset("forest", GroundType::Grass, Weather::Rain, 0.015, 0.45, "#065f46")),
        Environment::Volcano => Some(preset("night", GroundType::Dirt, Weather::Storm, 0.025, 0.3, "#450a0a")),
        Environment::Mountains => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arctic_preset_values() {
        let arctic = environment_preset(Environment::Arctic).unwrap();
        assert_eq!(arctic.skybox.as_deref(), Some("night"));
        assert_eq!(arctic.ground_type, Some(GroundType::Snow));
        assert_eq!(arctic.weather, Some(Weather::Snow));
        assert_eq!(arctic.fog_density, Some(0.02));
        assert_eq!(arctic.ambient_light_intensity, Some(0.3));
        assert_eq!(arctic.fog_color.as_deref(), Some("#f8fafc"));
    }

    #[test]
    fn test_mountains_has_no_preset() {
        assert!(environment_preset(Environment::Mountains).is_none());
        assert!(preset_label(Environment::Mountains).is_none());
    }

    #[test]
    fn test_every_preset_enables_physics() {
        for env in [
            Environment::Empty,
            Environment::Forest,
            Environment::City,
            Environment::Desert,
            Environment::Arctic,
            Environment::Ocean,
            Environment::Jungle,
            Environment::Volcano,
        ] {
            let p = environment_preset(env).unwrap();
            assert_eq!(p.physics_enabled, Some(true));
            assert_eq!(p.camera_mode, Some(CameraMode::ThirdPerson));
        }
    }
}
