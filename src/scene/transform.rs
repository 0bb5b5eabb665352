use glam::{Mat4, Quat, Vec3};
use serde::Serialize;

/// Local transform of a scene node
///
/// Rotation is stored as Euler angles in radians applied X, then Y, then Z
/// (matrix `Rx * Ry * Rz`), so per-axis spin increments stay independent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_rotation_x(self.rotation.x)
            * Quat::from_rotation_y(self.rotation.y)
            * Quat::from_rotation_z(self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_matrix() {
        assert_eq!(Transform::IDENTITY.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translation_then_rotation() {
        let t = Transform::at(Vec3::new(1.0, 2.0, 3.0)).with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let p = t.matrix().transform_point3(Vec3::X);
        // +X rotated a quarter turn about Y lands on -Z
        assert!(p.distance(Vec3::new(1.0, 2.0, 2.0)) < 1e-5);
    }

    #[test]
    fn euler_order_is_x_then_y_then_z() {
        let t = Transform::default().with_rotation(Vec3::new(FRAC_PI_2, 0.0, FRAC_PI_2));
        // Rx * Rz applied to +X: Rz takes it to +Y, Rx takes +Y to +Z
        let p = t.matrix().transform_vector3(Vec3::X);
        assert!(p.distance(Vec3::Z) < 1e-5);
    }

    #[test]
    fn scale_applies_per_axis() {
        let t = Transform::default().with_scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(t.matrix().transform_point3(Vec3::ONE), Vec3::new(2.0, 3.0, 4.0));
    }
}
