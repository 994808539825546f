//! Blinn-Phong shading
//!
//! Final color = ambient + sum over lights of (diffuse + specular), clamped to [0, 1].
//!
//! - Ambient: `k_a * ambient_color`, present even on surfaces facing away from every light
//! - Diffuse (Lambertian): `k_d * light * max(dot(N, L), 0)`
//! - Specular (Blinn-Phong): `k_s * light * max(dot(N, H), 0)^shininess`, where `H` is the
//!   normalized half-vector between the to-light and to-view directions
//!
//! Every function here is pure. Nothing is validated: a zero light direction or a
//! zero point light radius yields NaN/Inf (see [`crate::error::LightingError`] for the
//! optional checks callers may run up front).

use glam::Vec3;

use crate::core::lighting::{
    DirectionalLight, LightingUniform, PointLight, MAX_DIRECTIONAL_LIGHTS, MAX_POINT_LIGHTS,
};
use crate::material::PhongMaterial;

/// Extra gain applied to the specular term of directional lights only
pub const DIRECTIONAL_SPECULAR_BOOST: f32 = 1.2;

/// One shaded surface point
///
/// `normal` and `view_dir` must already be unit length; they are used as given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    /// World space position
    pub position: Vec3,
    /// World space surface normal
    pub normal: Vec3,
    /// Direction from the surface towards the eye
    pub view_dir: Vec3,
}

impl SurfaceSample {
    pub fn new(position: Vec3, normal: Vec3, view_dir: Vec3) -> Self {
        Self {
            position,
            normal,
            view_dir,
        }
    }

    /// Build a sample from an eye position, normalizing the interpolated normal
    pub fn from_eye(position: Vec3, normal: Vec3, eye: Vec3) -> Self {
        Self {
            position,
            normal: normal.normalize(),
            view_dir: (eye - position).normalize(),
        }
    }
}

/// Diffuse + specular contribution of a single directional light (unclamped)
pub fn compute_directional_light(
    normal: Vec3,
    view_dir: Vec3,
    light: &DirectionalLight,
    material_diffuse: Vec3,
    material_specular: Vec3,
    shininess: f32,
) -> Vec3 {
    // Stored direction points away from the source
    let light_dir = (-light.direction).normalize();

    let diff = normal.dot(light_dir).max(0.0);
    let diffuse = diff * material_diffuse * light.color * light.intensity;

    let half = (light_dir + view_dir).normalize();
    let spec = normal.dot(half).max(0.0).powf(shininess);
    let specular =
        spec * material_specular * light.color * light.intensity * DIRECTIONAL_SPECULAR_BOOST;

    diffuse + specular
}

/// Distance falloff of a point light: `1 / (1 + (d / r)^2)`.
///
/// Equals 1 at the source and 0.5 at the radius; the hard cutoff beyond the
/// radius lives in [`compute_point_light`].
pub fn point_light_attenuation(distance: f32, radius: f32) -> f32 {
    let ratio = distance / radius;
    1.0 / (1.0 + ratio * ratio)
}

/// Diffuse + specular contribution of a single point light (unclamped)
pub fn compute_point_light(
    position: Vec3,
    normal: Vec3,
    view_dir: Vec3,
    light: &PointLight,
    material_diffuse: Vec3,
    material_specular: Vec3,
    shininess: f32,
) -> Vec3 {
    let light_vec = light.position - position;
    let distance = light_vec.length();

    if distance > light.radius {
        return Vec3::ZERO;
    }

    let light_dir = light_vec.normalize();
    let attenuation = point_light_attenuation(distance, light.radius);

    let diff = normal.dot(light_dir).max(0.0);
    let diffuse = diff * material_diffuse * light.color * light.intensity * attenuation;

    let half = (light_dir + view_dir).normalize();
    let spec = normal.dot(half).max(0.0).powf(shininess);
    let specular = spec * material_specular * light.color * light.intensity * attenuation;

    diffuse + specular
}

/// Full Blinn-Phong lighting for one surface sample.
///
/// Only the first `min(count, capacity)` lights of each slice are used, and
/// iteration also stops at the end of the slice. Per-light results are summed
/// unclamped; the final color is clamped component-wise to [0, 1].
pub fn compute_phong_lighting(
    surface: &SurfaceSample,
    material: &PhongMaterial,
    directional_lights: &[DirectionalLight],
    directional_light_count: u32,
    point_lights: &[PointLight],
    point_light_count: u32,
    lighting_uniform: &LightingUniform,
) -> Vec3 {
    let ambient = material.ambient * lighting_uniform.ambient_color;

    let dir_count = (directional_light_count as usize).min(MAX_DIRECTIONAL_LIGHTS);
    let directional: Vec3 = directional_lights
        .iter()
        .take(dir_count)
        .map(|light| {
            compute_directional_light(
                surface.normal,
                surface.view_dir,
                light,
                material.diffuse,
                material.specular,
                material.shininess,
            )
        })
        .sum();

    let pt_count = (point_light_count as usize).min(MAX_POINT_LIGHTS);
    let point: Vec3 = point_lights
        .iter()
        .take(pt_count)
        .map(|light| {
            compute_point_light(
                surface.position,
                surface.normal,
                surface.view_dir,
                light,
                material.diffuse,
                material.specular,
                material.shininess,
            )
        })
        .sum();

    (ambient + directional + point).clamp(Vec3::ZERO, Vec3::ONE)
}
