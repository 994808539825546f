use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use tracing::{debug, warn};

use crate::core::phong::{compute_phong_lighting, SurfaceSample};
use crate::error::LightingError;
use crate::material::PhongMaterial;

/// Capacity of the directional light buffer bound to the fragment stage
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;
/// Capacity of the point light buffer bound to the fragment stage
pub const MAX_POINT_LIGHTS: usize = 8;

/// Directional light (parallel rays, like sunlight)
///
/// Layout matches the shader struct, where every vec3 occupies a 16 byte slot:
/// direction @0, color @16, intensity @32, 48 bytes total.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DirectionalLight {
    /// Direction the light travels, pointing away from the source
    pub direction: Vec3,
    pub _pad0: f32,
    pub color: Vec3,
    pub _pad1: f32,
    pub intensity: f32,
    pub _pad2: [f32; 3],
}

impl DirectionalLight {
    /// Create a directional light. The direction is normalized on construction
    /// (a zero direction stays zero and fails [`DirectionalLight::validate`]).
    pub fn new(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            color,
            intensity,
            ..Self::zeroed()
        }
    }

    /// White light with unit intensity
    pub fn white(direction: Vec3) -> Self {
        Self::new(direction, Vec3::ONE, 1.0)
    }

    pub fn validate(&self) -> Result<(), LightingError> {
        if self.direction.length_squared() == 0.0 {
            return Err(LightingError::ZeroDirection);
        }
        if self.intensity < 0.0 {
            return Err(LightingError::NegativeIntensity(self.intensity));
        }
        Ok(())
    }
}

/// Point light (emits in all directions from a position, like a lightbulb)
///
/// Layout: position @0, color @16, intensity @32, radius @36, 48 bytes total.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointLight {
    /// World space position
    pub position: Vec3,
    pub _pad0: f32,
    pub color: Vec3,
    pub _pad1: f32,
    pub intensity: f32,
    /// Maximum distance the light affects
    pub radius: f32,
    pub _pad2: [f32; 2],
}

impl PointLight {
    pub const DEFAULT_RADIUS: f32 = 10.0;

    pub fn new(position: Vec3, color: Vec3, intensity: f32, radius: f32) -> Self {
        Self {
            position,
            color,
            intensity,
            radius,
            ..Self::zeroed()
        }
    }

    /// White light with unit intensity and the default radius
    pub fn white(position: Vec3) -> Self {
        Self::new(position, Vec3::ONE, 1.0, Self::DEFAULT_RADIUS)
    }

    pub fn validate(&self) -> Result<(), LightingError> {
        if !(self.radius > 0.0) {
            return Err(LightingError::NonPositiveRadius(self.radius));
        }
        if self.intensity < 0.0 {
            return Err(LightingError::NegativeIntensity(self.intensity));
        }
        Ok(())
    }
}

/// Per-frame lighting uniform
///
/// Layout: directional_light_count @0, point_light_count @4, ambient_color @16,
/// 32 bytes total.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightingUniform {
    pub directional_light_count: u32,
    pub point_light_count: u32,
    pub _pad0: [u32; 2],
    pub ambient_color: Vec3,
    pub _pad1: f32,
}

impl LightingUniform {
    pub fn new(directional_light_count: u32, point_light_count: u32, ambient_color: Vec3) -> Self {
        Self {
            directional_light_count,
            point_light_count,
            ambient_color,
            ..Self::zeroed()
        }
    }
}

/// CPU-side light set for one frame.
///
/// Lights are kept in insertion order. Adding past capacity evicts the oldest
/// light so the most recent ones are always the ones uploaded.
#[derive(Debug, Clone)]
pub struct LightingRig {
    directional_lights: Vec<DirectionalLight>,
    point_lights: Vec<PointLight>,
    ambient_color: Vec3,
}

impl Default for LightingRig {
    fn default() -> Self {
        Self::new()
    }
}

impl LightingRig {
    pub const DEFAULT_AMBIENT: Vec3 = Vec3::new(0.2, 0.2, 0.2);

    pub fn new() -> Self {
        Self {
            directional_lights: Vec::with_capacity(MAX_DIRECTIONAL_LIGHTS + 1),
            point_lights: Vec::with_capacity(MAX_POINT_LIGHTS + 1),
            ambient_color: Self::DEFAULT_AMBIENT,
        }
    }

    pub fn ambient_color(&self) -> Vec3 {
        self.ambient_color
    }

    pub fn set_ambient_color(&mut self, color: Vec3) {
        self.ambient_color = color;
    }

    pub fn directional_lights(&self) -> &[DirectionalLight] {
        &self.directional_lights
    }

    pub fn point_lights(&self) -> &[PointLight] {
        &self.point_lights
    }

    pub fn add_directional_light(&mut self, light: DirectionalLight) {
        self.directional_lights.push(light);
        if self.directional_lights.len() > MAX_DIRECTIONAL_LIGHTS {
            let evicted = self.directional_lights.remove(0);
            warn!(
                "Directional light capacity ({}) exceeded, dropping oldest light {:?}",
                MAX_DIRECTIONAL_LIGHTS, evicted.direction
            );
        }
    }

    pub fn add_point_light(&mut self, light: PointLight) {
        self.point_lights.push(light);
        if self.point_lights.len() > MAX_POINT_LIGHTS {
            let evicted = self.point_lights.remove(0);
            warn!(
                "Point light capacity ({}) exceeded, dropping oldest light at {:?}",
                MAX_POINT_LIGHTS, evicted.position
            );
        }
    }

    pub fn clear(&mut self) {
        self.directional_lights.clear();
        self.point_lights.clear();
    }

    /// Uniform block for the current light set
    pub fn uniform(&self) -> LightingUniform {
        LightingUniform::new(
            self.directional_lights.len() as u32,
            self.point_lights.len() as u32,
            self.ambient_color,
        )
    }

    /// Fixed-capacity directional buffer, unused slots zeroed
    pub fn directional_buffer(&self) -> [DirectionalLight; MAX_DIRECTIONAL_LIGHTS] {
        let mut buffer = [DirectionalLight::zeroed(); MAX_DIRECTIONAL_LIGHTS];
        buffer[..self.directional_lights.len()].copy_from_slice(&self.directional_lights);
        buffer
    }

    /// Fixed-capacity point buffer, unused slots zeroed
    pub fn point_buffer(&self) -> [PointLight; MAX_POINT_LIGHTS] {
        let mut buffer = [PointLight::zeroed(); MAX_POINT_LIGHTS];
        buffer[..self.point_lights.len()].copy_from_slice(&self.point_lights);
        buffer
    }

    /// Snapshot of all three buffers as upload-ready bytes
    pub fn upload_data(&self) -> LightingUpload {
        let upload = LightingUpload {
            directional: self.directional_buffer(),
            point: self.point_buffer(),
            uniform: self.uniform(),
        };
        debug!(
            "Prepared lighting upload: {} directional, {} point",
            upload.uniform.directional_light_count, upload.uniform.point_light_count
        );
        upload
    }

    /// Shade one surface sample against the current light set
    pub fn shade(&self, surface: &SurfaceSample, material: &PhongMaterial) -> Vec3 {
        let uniform = self.uniform();
        compute_phong_lighting(
            surface,
            material,
            &self.directional_lights,
            uniform.directional_light_count,
            &self.point_lights,
            uniform.point_light_count,
            &uniform,
        )
    }
}

/// The three buffers bound to the fragment stage for one frame
#[derive(Debug, Clone, Copy)]
pub struct LightingUpload {
    pub directional: [DirectionalLight; MAX_DIRECTIONAL_LIGHTS],
    pub point: [PointLight; MAX_POINT_LIGHTS],
    pub uniform: LightingUniform,
}

impl LightingUpload {
    pub fn directional_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.directional)
    }

    pub fn point_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.point)
    }

    pub fn uniform_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.uniform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn test_gpu_layouts() {
        assert_eq!(size_of::<DirectionalLight>(), 48);
        assert_eq!(offset_of!(DirectionalLight, color), 16);
        assert_eq!(offset_of!(DirectionalLight, intensity), 32);

        assert_eq!(size_of::<PointLight>(), 48);
        assert_eq!(offset_of!(PointLight, color), 16);
        assert_eq!(offset_of!(PointLight, intensity), 32);
        assert_eq!(offset_of!(PointLight, radius), 36);

        assert_eq!(size_of::<LightingUniform>(), 32);
        assert_eq!(offset_of!(LightingUniform, point_light_count), 4);
        assert_eq!(offset_of!(LightingUniform, ambient_color), 16);
    }

    #[test]
    fn test_directional_new_normalizes() {
        let light = DirectionalLight::white(Vec3::new(0.0, -3.0, 0.0));
        assert!((light.direction - Vec3::NEG_Y).length() < 1e-6);
        assert!(light.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            DirectionalLight::white(Vec3::ZERO).validate(),
            Err(LightingError::ZeroDirection)
        );
        assert_eq!(
            PointLight::new(Vec3::ZERO, Vec3::ONE, 1.0, 0.0).validate(),
            Err(LightingError::NonPositiveRadius(0.0))
        );
        assert_eq!(
            PointLight::new(Vec3::ZERO, Vec3::ONE, -1.0, 5.0).validate(),
            Err(LightingError::NegativeIntensity(-1.0))
        );
    }

    #[test]
    fn test_rig_evicts_oldest() {
        let mut rig = LightingRig::new();
        for i in 0..(MAX_POINT_LIGHTS + 2) {
            rig.add_point_light(PointLight::white(Vec3::new(i as f32, 0.0, 0.0)));
        }

        assert_eq!(rig.point_lights().len(), MAX_POINT_LIGHTS);
        assert_eq!(rig.point_lights()[0].position.x, 2.0);
        assert_eq!(rig.point_lights()[MAX_POINT_LIGHTS - 1].position.x, 9.0);
        assert_eq!(rig.uniform().point_light_count, MAX_POINT_LIGHTS as u32);
    }

    #[test]
    fn test_buffers_are_padded_with_zeroed_lights() {
        let mut rig = LightingRig::new();
        rig.add_directional_light(DirectionalLight::white(Vec3::NEG_Y));

        let upload = rig.upload_data();
        assert_eq!(upload.directional[0].direction, Vec3::NEG_Y);
        assert_eq!(upload.directional[1], DirectionalLight::zeroed());
        assert_eq!(upload.point[0], PointLight::zeroed());
        assert_eq!(upload.uniform.directional_light_count, 1);
        assert_eq!(upload.uniform.point_light_count, 0);
        assert_eq!(upload.uniform.ambient_color, LightingRig::DEFAULT_AMBIENT);

        assert_eq!(upload.directional_bytes().len(), 48 * MAX_DIRECTIONAL_LIGHTS);
        assert_eq!(upload.point_bytes().len(), 48 * MAX_POINT_LIGHTS);
        assert_eq!(upload.uniform_bytes().len(), 32);
    }
}
