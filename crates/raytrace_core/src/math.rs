//! View-angle math for forward-projected traces

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Euler view angles in degrees (engine convention: +pitch looks down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewAngles {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl ViewAngles {
    /// Create from pitch/yaw/roll in degrees
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Unit vector pointing along the view direction.
    ///
    /// Roll does not affect the forward axis.
    pub fn forward(self) -> Vec3 {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        Vec3::new(cp * cy, cp * sy, -sp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_level_gaze() {
        let fwd = ViewAngles::new(0.0, 0.0, 0.0).forward();
        assert_relative_eq!(fwd.x, 1.0);
        assert_relative_eq!(fwd.y, 0.0);
        assert_relative_eq!(fwd.z, 0.0);
    }

    #[test]
    fn test_forward_yaw_quarter_turn() {
        let fwd = ViewAngles::new(0.0, 90.0, 0.0).forward();
        assert_relative_eq!(fwd.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(fwd.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_forward_pitch_down() {
        let fwd = ViewAngles::new(90.0, 0.0, 0.0).forward();
        assert_relative_eq!(fwd.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_forward_is_unit_length() {
        let fwd = ViewAngles::new(33.0, -120.0, 45.0).forward();
        assert_relative_eq!(fwd.length(), 1.0, epsilon = 1e-6);
    }
}
