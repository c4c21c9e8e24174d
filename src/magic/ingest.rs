//! Command ingestion
//!
//! Deterministically merges an interpreter payload into the document.
//! The merge is atomic with respect to history: the caller records the
//! returned document exactly once, and a malformed payload produces no
//! document at all.
//!
//! Failure handling per entry vs per payload:
//! - Unknown object/component type tags skip that entry and surface a
//!   non-fatal warning in the outcome.
//! - A payload that parses as neither accepted shape fails the whole
//!   command with no mutation.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::command::{
    ComponentSpec, LegacyScript, LegacySpawn, MagicCommand, MagicError, MagicOutcome, SpawnSpec,
};
use crate::asset::{environment_preset, merge_properties, template};
use crate::world::{
    generate_id, ComponentType, GameComponent, GameDesign, GameMode, GameObject, ObjectType,
    SettingsPatch,
};

/// Object size used by legacy scripts for a scale of 1.0
const LEGACY_UNIT_SIZE: f32 = 40.0;

/// Merge a raw interpreter payload into the document
///
/// Returns the merged document and an outcome describing what happened.
/// The input document is never modified; on error nothing is produced.
/// Format selection: any of `spawn`/`settings`/`message` picks the
/// current format, otherwise `initialObjects` picks the legacy script
/// path.
pub fn ingest_command(
    design: &GameDesign,
    payload: &Value,
) -> Result<(GameDesign, MagicOutcome), MagicError> {
    let fields = payload
        .as_object()
        .ok_or_else(|| MagicError::InvalidPayload("payload is not an object".to_string()))?;

    if fields.contains_key("spawn") || fields.contains_key("settings") || fields.contains_key("message") {
        let command: MagicCommand = serde_json::from_value(payload.clone())
            .map_err(|e| MagicError::InvalidPayload(e.to_string()))?;
        Ok(apply_command(design, command))
    } else if fields.contains_key("initialObjects") {
        let script: LegacyScript = serde_json::from_value(payload.clone())
            .map_err(|e| MagicError::InvalidPayload(e.to_string()))?;
        Ok(apply_legacy_script(design, script))
    } else {
        Err(MagicError::InvalidPayload(
            "neither a magic command nor a scene script".to_string(),
        ))
    }
}

fn apply_command(design: &GameDesign, command: MagicCommand) -> (GameDesign, MagicOutcome) {
    let mut next = design.clone();
    let mut outcome = MagicOutcome {
        message: command.message,
        ..MagicOutcome::default()
    };

    if let Some(specs) = command.spawn {
        for spec in specs {
            let Some(kind) = ObjectType::parse(&spec.kind) else {
                warn!(tag = %spec.kind, "skipping spawn entry with unknown object type");
                outcome.skipped.push(spec.kind);
                continue;
            };
            // Spawn order in the payload is the order in the document
            next.objects
                .push(resolve_spawn(design.mode, kind, &spec, &mut outcome));
            outcome.spawned += 1;
        }
    }

    if let Some(patch) = command.settings {
        next.settings = next.settings.apply(&expand_environment(&patch));
        outcome.settings_applied = true;
    }

    debug!(
        spawned = outcome.spawned,
        skipped = outcome.skipped.len(),
        settings = outcome.settings_applied,
        "magic command applied"
    );
    (next, outcome)
}

fn apply_legacy_script(design: &GameDesign, script: LegacyScript) -> (GameDesign, MagicOutcome) {
    let mut next = design.clone();
    let mut outcome = MagicOutcome::default();

    if let Some(title) = script.title {
        next.title = title;
    }

    for spec in script.initial_objects {
        let Some(kind) = ObjectType::parse(&spec.kind) else {
            warn!(tag = %spec.kind, "skipping legacy entry with unknown object type");
            outcome.skipped.push(spec.kind);
            continue;
        };
        next.objects.push(resolve_legacy_spawn(design.mode, kind, &spec));
        outcome.spawned += 1;
    }

    if let Some(patch) = script.settings {
        next.settings = next.settings.apply(&expand_environment(&patch));
        outcome.settings_applied = true;
    }

    if script.timeline.is_some() {
        // Orchestration timelines drive the renderer, not the document
        debug!("legacy script timeline ignored");
    }

    (next, outcome)
}

/// Expand a named environment preset under the explicit settings keys
///
/// Explicit keys always win over the preset's values. Environments
/// without a preset (or no environment at all) pass the patch through.
fn expand_environment(patch: &SettingsPatch) -> SettingsPatch {
    match patch.environment.and_then(environment_preset) {
        Some(preset) => patch.overlaid_on(&preset),
        None => patch.clone(),
    }
}

/// Build a spawned object from its entry and the type template
///
/// Final size multiplies the entry's scale against the template size; a
/// missing position rests the object on the ground plane at the world
/// origin. Properties and components merge over template defaults with
/// the entry winning on conflicts.
fn resolve_spawn(
    mode: GameMode,
    kind: ObjectType,
    spec: &SpawnSpec,
    outcome: &mut MagicOutcome,
) -> GameObject {
    let tpl = template(kind);
    let is_3d = mode == GameMode::ThreeD;

    let scale = spec.scale.unwrap_or([1.0, 1.0, 1.0]);
    let width = scale[0] * tpl.width;
    let height = scale[1] * tpl.height;
    let depth = scale[2] * tpl.depth;

    let (x, y, z) = match spec.position {
        Some([px, py, pz]) => (px, py, pz),
        None => (0.0, height / 2.0, 0.0),
    };

    let properties = match &spec.properties {
        Some(overrides) => merge_properties(&tpl.properties, overrides),
        None => tpl.properties.clone(),
    };

    let components = resolve_components(spec.components.as_deref().unwrap_or(&[]), outcome);

    GameObject {
        id: generate_id(),
        kind,
        x,
        y,
        z: is_3d.then_some(z),
        width,
        height,
        depth: is_3d.then_some(depth),
        rotation: if is_3d {
            Some(spec.rotation.unwrap_or([0.0, 0.0, 0.0]))
        } else {
            None
        },
        color: spec
            .color
            .clone()
            .unwrap_or_else(|| tpl.color.to_string()),
        properties,
        components,
        visible: true,
    }
}

fn resolve_components(specs: &[ComponentSpec], outcome: &mut MagicOutcome) -> Vec<GameComponent> {
    let mut components = Vec::new();
    for spec in specs {
        let Some(kind) = ComponentType::parse(&spec.kind) else {
            warn!(tag = %spec.kind, "skipping component with unknown type");
            outcome.skipped.push(spec.kind.clone());
            continue;
        };
        // Spec props merge over the per-type defaults, spec keys winning
        let props = merge_properties(&kind.default_props(), &spec.props);
        components.push(GameComponent {
            id: generate_id(),
            kind,
            enabled: spec.enabled,
            props,
        });
    }
    components
}

/// Build an object from a legacy script entry: `scale x 40` sizing, no
/// properties, no components
fn resolve_legacy_spawn(mode: GameMode, kind: ObjectType, spec: &LegacySpawn) -> GameObject {
    let is_3d = mode == GameMode::ThreeD;
    let [px, py, pz] = spec.position;

    GameObject {
        id: generate_id(),
        kind,
        x: px,
        y: py,
        z: is_3d.then_some(pz),
        width: spec.scale[0] * LEGACY_UNIT_SIZE,
        height: spec.scale[1] * LEGACY_UNIT_SIZE,
        depth: is_3d.then_some(spec.scale[2] * LEGACY_UNIT_SIZE),
        rotation: if is_3d {
            Some(spec.rotation.unwrap_or([0.0, 0.0, 0.0]))
        } else {
            None
        },
        color: spec
            .color
            .clone()
            .unwrap_or_else(|| "#ffffff".to_string()),
        properties: Map::new(),
        components: Vec::new(),
        visible: true,
    }
}
