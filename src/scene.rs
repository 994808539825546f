use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::lighting::{DirectionalLight, LightingRig, PointLight};

/// Transform component for positioning objects in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::identity()
        }
    }

    /// Get the model matrix for this transform
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Inverse-transpose of the model matrix, for transforming normals under
    /// non-uniform scale
    pub fn normal_matrix(&self) -> Mat4 {
        self.model_matrix().inverse().transpose()
    }

    /// Set rotation from Euler angles (pitch, yaw, roll in radians)
    pub fn set_euler_rotation(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.rotation = Quat::from_euler(glam::EulerRot::YXZ, yaw, pitch, roll);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Either kind of light, as placed in a scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneLight {
    Directional(DirectionalLight),
    Point(PointLight),
}

/// Scene node carrying a light in its local frame
#[derive(Debug, Clone, Copy)]
pub struct LightNode {
    pub light: SceneLight,
    pub transform: Transform,
}

impl LightNode {
    pub fn new(light: SceneLight, transform: Transform) -> Self {
        Self { light, transform }
    }

    /// World space light.
    ///
    /// Directional lights are rotated by the node rotation (scale and translation
    /// are ignored) and renormalized. Point lights are moved to the node position.
    pub fn world_light(&self) -> SceneLight {
        match self.light {
            SceneLight::Directional(mut light) => {
                light.direction = (self.transform.rotation * light.direction).normalize();
                SceneLight::Directional(light)
            }
            SceneLight::Point(mut light) => {
                light.position = self.transform.position;
                SceneLight::Point(light)
            }
        }
    }

    /// Add this node's world space light to a rig
    pub fn add_to(&self, rig: &mut LightingRig) {
        match self.world_light() {
            SceneLight::Directional(light) => rig.add_directional_light(light),
            SceneLight::Point(light) => rig.add_point_light(light),
        }
    }
}
