use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::LightingError;

/// Blinn-Phong material coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhongMaterial {
    /// Ambient reflectance (k_a)
    pub ambient: Vec3,
    /// Diffuse reflectance (k_d)
    pub diffuse: Vec3,
    /// Specular reflectance (k_s)
    pub specular: Vec3,
    /// Specular exponent, typically 1-128 (higher = smaller, sharper highlight)
    pub shininess: f32,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            ambient: Vec3::splat(0.1),
            diffuse: Vec3::new(1.0, 0.0, 0.0),
            specular: Vec3::ONE,
            shininess: 32.0,
        }
    }
}

impl PhongMaterial {
    pub fn new(ambient: Vec3, diffuse: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// Glossy red with a white highlight
    pub fn red() -> Self {
        Self {
            ambient: Vec3::new(0.1, 0.0, 0.0),
            ..Self::default()
        }
    }

    /// Rough surface with a faint, wide highlight
    pub fn matte(color: Vec3) -> Self {
        Self {
            ambient: color * 0.1,
            diffuse: color,
            specular: Vec3::splat(0.05),
            shininess: 4.0,
        }
    }

    /// Plastic-like surface with a white highlight
    pub fn plastic(color: Vec3) -> Self {
        Self {
            ambient: color * 0.1,
            diffuse: color,
            specular: Vec3::splat(0.8),
            shininess: 32.0,
        }
    }

    /// Metal-like surface: dark diffuse, tinted tight highlight
    pub fn metallic(color: Vec3) -> Self {
        Self {
            ambient: color * 0.05,
            diffuse: color * 0.3,
            specular: color,
            shininess: 128.0,
        }
    }

    pub fn validate(&self) -> Result<(), LightingError> {
        if !(self.shininess > 0.0) {
            return Err(LightingError::NonPositiveShininess(self.shininess));
        }
        Ok(())
    }
}
