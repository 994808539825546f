//! Blinn-Phong lighting helpers: shader-compatible light records, per-light
//! contribution functions, and the composer that sums ambient, diffuse and
//! specular terms over up to 4 directional and 8 point lights.

pub mod core;
pub mod error;
pub mod material;
pub mod material_library;
pub mod scene;
pub mod config;
pub mod render;

pub use crate::core::{
    compute_directional_light, compute_phong_lighting, compute_point_light, DirectionalLight,
    LightingRig, LightingUniform, PointLight, SurfaceSample, MAX_DIRECTIONAL_LIGHTS,
    MAX_POINT_LIGHTS,
};
pub use error::LightingError;
pub use material::PhongMaterial;
