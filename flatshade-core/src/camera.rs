/// Camera placement and keyboard fly controls
use serde::{Deserialize, Serialize};

use crate::math::{normalize, wrap_degrees, Mat4, Vec3, FORWARD, UP};
use crate::transform::Transform;

/// Distance moved per fly-control step
pub const MOVE_STEP: f32 = 0.1;

/// Angle turned per fly-control step, in degrees
pub const TURN_STEP: f32 = 1.0;

/// Which way a camera's orientation is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    EulerAngles,
    DirectionVector,
}

/// Camera orientation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Orientation {
    /// Rotations about X, Y and Z in degrees, applied to the +Z forward axis
    EulerAngles { angles: Vec3 },
    /// Raw look direction, added to the position to form the look-at target
    DirectionVector { direction: Vec3 },
}

/// A single fly-control step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    RollLeft,
    RollRight,
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub orientation: Orientation,
}

impl Camera {
    /// Camera at the origin looking down +Z
    pub fn new(mode: CameraMode) -> Self {
        let orientation = match mode {
            CameraMode::EulerAngles => Orientation::EulerAngles { angles: Vec3::zeros() },
            CameraMode::DirectionVector => Orientation::DirectionVector { direction: FORWARD },
        };
        Self {
            position: Vec3::zeros(),
            orientation,
        }
    }

    pub fn mode(&self) -> CameraMode {
        match self.orientation {
            Orientation::EulerAngles { .. } => CameraMode::EulerAngles,
            Orientation::DirectionVector { .. } => CameraMode::DirectionVector,
        }
    }

    /// Look direction; unnormalized in direction-vector mode
    pub fn direction(&self) -> Vec3 {
        match self.orientation {
            Orientation::EulerAngles { angles } => {
                let rotation = Transform::rotation_xyz(&angles.map(f32::to_radians));
                (rotation * FORWARD.push(0.0)).xyz()
            }
            Orientation::DirectionVector { direction } => direction,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.position + self.direction()
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Mat4 {
        Transform::look_at(&self.position, &self.target(), &UP)
    }

    /// Apply one fly-control step
    pub fn apply(&mut self, movement: Movement) {
        let position = &mut self.position;
        match &mut self.orientation {
            Orientation::EulerAngles { angles } => *position = fly(*position, angles, movement),
            Orientation::DirectionVector { direction } => nudge(position, direction, movement),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraMode::EulerAngles)
    }
}

/// Fly along the camera's own axes; returns the new position
fn fly(position: Vec3, angles: &mut Vec3, movement: Movement) -> Vec3 {
    let rotation = Transform::rotation_xyz(&angles.map(f32::to_radians));
    let forward = normalize(&(rotation * FORWARD.push(0.0)).xyz());
    let up = normalize(&(UP - forward * UP.dot(&forward)));
    let right = up.cross(&forward);

    match movement {
        Movement::Forward => position + forward * MOVE_STEP,
        Movement::Backward => position - forward * MOVE_STEP,
        Movement::Right => position + right * MOVE_STEP,
        Movement::Left => position - right * MOVE_STEP,
        Movement::Up => position + up * MOVE_STEP,
        Movement::Down => position - up * MOVE_STEP,
        turn => {
            match turn {
                // Positive X rotation tips +Z towards -Y
                Movement::PitchUp => angles.x = wrap_degrees(angles.x - TURN_STEP),
                Movement::PitchDown => angles.x = wrap_degrees(angles.x + TURN_STEP),
                Movement::YawLeft => angles.y = wrap_degrees(angles.y - TURN_STEP),
                Movement::YawRight => angles.y = wrap_degrees(angles.y + TURN_STEP),
                Movement::RollLeft => angles.z = wrap_degrees(angles.z - TURN_STEP),
                Movement::RollRight => angles.z = wrap_degrees(angles.z + TURN_STEP),
                _ => {}
            }
            position
        }
    }
}

/// Nudge world-space components independently
fn nudge(position: &mut Vec3, direction: &mut Vec3, movement: Movement) {
    match movement {
        Movement::Forward => position.z += MOVE_STEP,
        Movement::Backward => position.z -= MOVE_STEP,
        Movement::Right => position.x += MOVE_STEP,
        Movement::Left => position.x -= MOVE_STEP,
        Movement::Up => position.y += MOVE_STEP,
        Movement::Down => position.y -= MOVE_STEP,
        Movement::PitchUp => direction.y += MOVE_STEP,
        Movement::PitchDown => direction.y -= MOVE_STEP,
        Movement::YawLeft => direction.x -= MOVE_STEP,
        Movement::YawRight => direction.x += MOVE_STEP,
        Movement::RollLeft => direction.z -= MOVE_STEP,
        Movement::RollRight => direction.z += MOVE_STEP,
    }
}
