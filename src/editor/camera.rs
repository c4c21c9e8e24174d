//! Viewport camera
//!
//! Camera state for the 3D viewport. This is editor view state, not part
//! of the scene document: focus moves never touch the document and are
//! never recorded in history.

/// Smoothing factor per focus step for the look-at target
const FOCUS_LERP: f32 = 0.1;
/// Beyond this distance the camera itself is relocated toward the focus
const FOCUS_DISTANCE_THRESHOLD: f32 = 1000.0;
/// Distance at which a relocated camera settles from the focus point
const FOCUS_STANDOFF: f32 = 500.0;

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn length(v: [f32; 3]) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn lerp(from: [f32; 3], to: [f32; 3], t: f32) -> [f32; 3] {
    [
        from[0] + (to[0] - from[0]) * t,
        from[1] + (to[1] - from[1]) * t,
        from[2] + (to[2] - from[2]) * t,
    ]
}

/// Orbit-style viewport camera: a position and a look-at target
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportCamera {
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            position: [500.0, 500.0, 500.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

impl ViewportCamera {
    /// Smoothly pull the look-at target toward a focus point
    ///
    /// The target lerps toward the point. If the camera sits farther
    /// than the focus threshold, it is also relocated along the current
    /// line of sight to a fixed standoff distance, so focusing a distant
    /// object brings it into a useful working range.
    pub fn focus_on(&mut self, point: [f32; 3]) {
        self.target = lerp(self.target, point, FOCUS_LERP);

        let offset = sub(self.position, point);
        let distance = length(offset);
        if distance > FOCUS_DISTANCE_THRESHOLD {
            let scale = FOCUS_STANDOFF / distance;
            self.position = [
                point[0] + offset[0] * scale,
                point[1] + offset[1] * scale,
                point[2] + offset[2] * scale,
            ];
        }
    }

    /// Place the camera at the configured viewing distance, looking at
    /// the world origin (used when nothing is selected)
    pub fn apply_distance(&mut self, distance: f32) {
        self.position = [distance, distance, distance];
        self.target = [0.0, 0.0, 0.0];
    }

    /// Distance from the camera to its target
    pub fn distance_to_target(&self) -> f32 {
        length(sub(self.position, self.target))
    }
}
