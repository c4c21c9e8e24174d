//! World settings
//!
//! The per-document configuration record: physics, camera, environment
//! and weather presets, win/lose conditions, and post-processing
//! toggles. Settings are a flat record except for the nested
//! `rendering` sub-records, each independently enabled with their own
//! parameters.
//!
//! Mutation goes through `SettingsPatch`: present fields replace, absent
//! fields survive, and the `rendering` patch merges one level deeper so
//! that replacing `bloom` leaves `ssao`/`vignette` alone.

use serde::{Deserialize, Serialize};

/// Gravity is a scalar in 2D documents and a 3-vector in 3D documents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Gravity {
    Scalar(f32),
    Vector([f32; 3]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    None,
    Rain,
    Snow,
    Sun,
    Storm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroundType {
    Grass,
    Snow,
    Sand,
    Concrete,
    Dirt,
    Water,
}

/// Named environments; most map to a settings preset (see
/// `asset::preset`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Empty,
    City,
    Forest,
    Jungle,
    Mountains,
    Ocean,
    Desert,
    Arctic,
    Volcano,
}

impl Environment {
    /// Parse a serialized tag back into an environment
    pub fn parse(tag: &str) -> Option<Environment> {
        match tag {
            "empty" => Some(Environment::Empty),
            "city" => Some(Environment::City),
            "forest" => Some(Environment::Forest),
            "jungle" => Some(Environment::Jungle),
            "mountains" => Some(Environment::Mountains),
            "ocean" => Some(Environment::Ocean),
            "desert" => Some(Environment::Desert),
            "arctic" => Some(Environment::Arctic),
            "volcano" => Some(Environment::Volcano),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CameraMode {
    FirstPerson,
    ThirdPerson,
    TopDown,
    Orbit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WinCondition {
    ReachGoal,
    CollectAll,
    ScoreLimit,
    Timer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoseCondition {
    HealthZero,
    FallOff,
    Timer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tonemapping {
    None,
    Linear,
    Reinhard,
    Cineon,
    Aces,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloomSettings {
    pub enabled: bool,
    pub intensity: f32,
    pub threshold: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SsaoSettings {
    pub enabled: bool,
    pub intensity: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VignetteSettings {
    pub enabled: bool,
    pub offset: f32,
    pub darkness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SsrSettings {
    pub enabled: bool,
}

/// Post-processing sub-records
///
/// Each sub-record is independently present and independently replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderingSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloom: Option<BloomSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssao: Option<SsaoSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vignette: Option<VignetteSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssr: Option<SsrSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tonemapping: Option<Tonemapping>,
}

/// The document's settings record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub gravity: Gravity,
    pub jump_force: f32,
    pub move_speed: f32,
    pub background_color: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    // 3D-specific, absent in 2D documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skybox: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fog_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fog_density: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambient_light_intensity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_type: Option<GroundType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    /// Hour of day, 0-24
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_night_cycle: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physics_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_mode: Option<CameraMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_distance: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_condition: Option<WinCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_value: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lose_condition: Option<LoseCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lose_value: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendering: Option<RenderingSettings>,
}

impl GameSettings {
    /// Apply a patch, producing the merged copy
    ///
    /// Present patch fields replace; the rendering patch replaces only
    /// the sub-records it carries.
    pub fn apply(&self, patch: &SettingsPatch) -> GameSettings {
        let mut next = self.clone();
        if let Some(gravity) = patch.gravity {
            next.gravity = gravity;
        }
        if let Some(jump_force) = patch.jump_force {
            next.jump_force = jump_force;
        }
        if let Some(move_speed) = patch.move_speed {
            next.move_speed = move_speed;
        }
        if let Some(background_color) = &patch.background_color {
            next.background_color = background_color.clone();
        }
        if let Some(viewport_width) = patch.viewport_width {
            next.viewport_width = viewport_width;
        }
        if let Some(viewport_height) = patch.viewport_height {
            next.viewport_height = viewport_height;
        }
        if let Some(skybox) = &patch.skybox {
            next.skybox = Some(skybox.clone());
        }
        if let Some(fog_color) = &patch.fog_color {
            next.fog_color = Some(fog_color.clone());
        }
        if let Some(fog_density) = patch.fog_density {
            next.fog_density = Some(fog_density);
        }
        if let Some(ambient) = patch.ambient_light_intensity {
            next.ambient_light_intensity = Some(ambient);
        }
        if let Some(weather) = patch.weather {
            next.weather = Some(weather);
        }
        if let Some(ground_type) = patch.ground_type {
            next.ground_type = Some(ground_type);
        }
        if let Some(environment) = patch.environment {
            next.environment = Some(environment);
        }
        if let Some(time_of_day) = patch.time_of_day {
            next.time_of_day = Some(time_of_day);
        }
        if let Some(day_night_cycle) = patch.day_night_cycle {
            next.day_night_cycle = Some(day_night_cycle);
        }
        if let Some(physics_enabled) = patch.physics_enabled {
            next.physics_enabled = Some(physics_enabled);
        }
        if let Some(camera_mode) = patch.camera_mode {
            next.camera_mode = Some(camera_mode);
        }
        if let Some(camera_distance) = patch.camera_distance {
            next.camera_distance = Some(camera_distance);
        }
        if let Some(win_condition) = patch.win_condition {
            next.win_condition = Some(win_condition);
        }
        if let Some(win_value) = patch.win_value {
            next.win_value = Some(win_value);
        }
        if let Some(lose_condition) = patch.lose_condition {
            next.lose_condition = Some(lose_condition);
        }
        if let Some(lose_value) = patch.lose_value {
            next.lose_value = Some(lose_value);
        }
        if let Some(rendering_patch) = &patch.rendering {
            let mut rendering = next.rendering.unwrap_or_default();
            if let Some(bloom) = rendering_patch.bloom {
                rendering.bloom = Some(bloom);
            }
            if let Some(ssao) = rendering_patch.ssao {
                rendering.ssao = Some(ssao);
            }
            if let Some(vignette) = rendering_patch.vignette {
                rendering.vignette = Some(vignette);
            }
            if let Some(ssr) = rendering_patch.ssr {
                rendering.ssr = Some(ssr);
            }
            if let Some(tonemapping) = rendering_patch.tonemapping {
                rendering.tonemapping = Some(tonemapping);
            }
            next.rendering = Some(rendering);
        }
        next
    }
}

/// Rendering portion of a settings patch
///
/// A present sub-record replaces that sub-record wholesale; absent
/// siblings are preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloom: Option<BloomSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssao: Option<SsaoSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vignette: Option<VignetteSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssr: Option<SsrSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tonemapping: Option<Tonemapping>,
}

/// A partial settings update
///
/// Used by the editor's world panel, by environment presets, and by the
/// magic command pipeline. Unknown keys in incoming payloads are
/// ignored; present keys must have the right shape or the payload fails
/// to parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<Gravity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump_force: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skybox: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fog_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fog_density: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambient_light_intensity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_type: Option<GroundType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_night_cycle: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physics_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_mode: Option<CameraMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_distance: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_condition: Option<WinCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_value: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lose_condition: Option<LoseCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lose_value: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendering: Option<RenderingPatch>,
}

impl SettingsPatch {
    /// Overlay this patch on a base patch
    ///
    /// Fields present here win; absent fields fall back to the base.
    /// Used for environment preset expansion, where explicit keys always
    /// beat the preset's values. The rendering patches merge one level
    /// deep, like `GameSettings::apply`.
    pub fn overlaid_on(&self, base: &SettingsPatch) -> SettingsPatch {
        let rendering = match (&self.rendering, &base.rendering) {
            (Some(top), Some(bottom)) => Some(RenderingPatch {
                bloom: top.bloom.or(bottom.bloom),
                ssao: top.ssao.or(bottom.ssao),
                vignette: top.vignette.or(bottom.vignette),
                ssr: top.ssr.or(bottom.ssr),
                tonemapping: top.tonemapping.or(bottom.tonemapping),
            }),
            (Some(top), None) => Some(top.clone()),
            (None, Some(bottom)) => Some(bottom.clone()),
            (None, None) => None,
        };

        SettingsPatch {
            gravity: self.gravity.or(base.gravity),
            jump_force: self.jump_force.or(base.jump_force),
            move_speed: self.move_speed.or(base.move_speed),
            background_color: self
                .background_color
                .clone()
                .or_else(|| base.background_color.clone()),
            viewport_width: self.viewport_width.or(base.viewport_width),
            viewport_height: self.viewport_height.or(base.viewport_height),
            skybox: self.skybox.clone().or_else(|| base.skybox.clone()),
            fog_color: self.fog_color.clone().or_else(|| base.fog_color.clone()),
            fog_density: self.fog_density.or(base.fog_density),
            ambient_light_intensity: self
                .ambient_light_intensity
                .or(base.ambient_light_intensity),
            weather: self.weather.or(base.weather),
            ground_type: self.ground_type.or(base.ground_type),
            environment: self.environment.or(base.environment),
            time_of_day: self.time_of_day.or(base.time_of_day),
            day_night_cycle: self.day_night_cycle.or(base.day_night_cycle),
            physics_enabled: self.physics_enabled.or(base.physics_enabled),
            camera_mode: self.camera_mode.or(base.camera_mode),
            camera_distance: self.camera_distance.or(base.camera_distance),
            win_condition: self.win_condition.or(base.win_condition),
            win_value: self.win_value.or(base.win_value),
            lose_condition: self.lose_condition.or(base.lose_condition),
            lose_value: self.lose_value.or(base.lose_value),
            rendering,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_3d() -> GameSettings {
        GameSettings {
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
        }
    }

    #[test]
    fn test_patch_replaces_only_present_fields() {
        let settings = settings_3d();
        let patch = SettingsPatch {
            weather: Some(Weather::Snow),
            ..SettingsPatch::default()
        };
        let merged = settings.apply(&patch);
        assert_eq!(merged.weather, Some(Weather::Snow));
        assert_eq!(merged.ground_type, Some(GroundType::Grass));
        assert_eq!(merged.jump_force, 5.0);
    }

    #[test]
    fn test_rendering_merge_preserves_siblings() {
        let mut settings = settings_3d();
        settings.rendering = Some(RenderingSettings {
            bloom: None,
            ssao: Some(SsaoSettings {
                enabled: true,
                intensity: 1.0,
                radius: 0.4,
            }),
            vignette: Some(VignetteSettings {
                enabled: false,
                offset: 1.0,
                darkness: 1.1,
            }),
            ssr: None,
            tonemapping: None,
        });

        let patch = SettingsPatch {
            rendering: Some(RenderingPatch {
                bloom: Some(BloomSettings {
                    enabled: true,
                    intensity: 1.5,
                    threshold: 0.9,
                }),
                ..RenderingPatch::default()
            }),
            ..SettingsPatch::default()
        };

        let merged = settings.apply(&patch);
        let rendering = merged.rendering.unwrap();
        assert!(rendering.bloom.unwrap().enabled);
        // Siblings untouched
        assert_eq!(rendering.ssao, settings.rendering.as_ref().unwrap().ssao);
        assert_eq!(
            rendering.vignette,
            settings.rendering.as_ref().unwrap().vignette
        );
    }

    #[test]
    fn test_overlay_explicit_wins() {
        let preset = SettingsPatch {
            ground_type: Some(GroundType::Snow),
            weather: Some(Weather::Snow),
            ambient_light_intensity: Some(0.3),
            ..SettingsPatch::default()
        };
        let explicit = SettingsPatch {
            ambient_light_intensity: Some(0.9),
            ..SettingsPatch::default()
        };

        let combined = explicit.overlaid_on(&preset);
        assert_eq!(combined.ground_type, Some(GroundType::Snow));
        assert_eq!(combined.weather, Some(Weather::Snow));
        assert_eq!(combined.ambient_light_intensity, Some(0.9));
    }

    #[test]
    fn test_gravity_serde_shapes() {
        let scalar: Gravity = serde_json::from_str("0.8").unwrap();
        assert_eq!(scalar, Gravity::Scalar(0.8));

        let vector: Gravity = serde_json::from_str("[0.0, -9.81, 0.0]").unwrap();
        assert_eq!(vector, Gravity::Vector([0.0, -9.81, 0.0]));
    }

    #[test]
    fn test_patch_parses_camel_case_payload() {
        let patch: SettingsPatch = serde_json::from_value(serde_json::json!({
            "groundType": "snow",
            "ambientLightIntensity": 0.9,
            "cameraMode": "thirdPerson",
            "unknownKey": 42,
        }))
        .unwrap();
        assert_eq!(patch.ground_type, Some(GroundType::Snow));
        assert_eq!(patch.ambient_light_intensity, Some(0.9));
        assert_eq!(patch.camera_mode, Some(CameraMode::ThirdPerson));
    }
}
