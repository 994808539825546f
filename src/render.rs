//! CPU shading pass.
//!
//! Every pixel is an independent invocation of the lighting composer, so rows
//! are shaded in parallel with no coordination beyond the shared, read-only
//! light set.

use anyhow::Result;
use glam::Vec3;
use image::{Rgb, RgbImage};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::core::camera::OrbitCamera;
use crate::core::lighting::LightingRig;
use crate::core::phong::SurfaceSample;
use crate::material::PhongMaterial;

/// Analytic sphere used as the demo surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Distance along `dir` (unit length) to the nearest hit in front of `origin`
    pub fn intersect(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let oc = origin - self.center;
        let b = oc.dot(dir);
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let near = -b - root;
        if near > 0.0 {
            return Some(near);
        }
        let far = -b + root;
        (far > 0.0).then_some(far)
    }

    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center) / self.radius
    }
}

/// Linear RGB color buffer, row-major with the origin at the top-left
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32, clear_color: Vec3) -> Self {
        Self {
            width,
            height,
            pixels: vec![clear_color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    pub fn pixels(&self) -> &[Vec3] {
        &self.pixels
    }

    /// Quantize to 8 bits per channel, clamping out-of-range values
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let color = self.pixel(x, y).clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
            Rgb([
                color.x.round() as u8,
                color.y.round() as u8,
                color.z.round() as u8,
            ])
        })
    }

    pub fn save(&self, path: &str) -> Result<()> {
        self.to_rgb_image().save(path)?;
        info!("Wrote {}x{} image to {}", self.width, self.height, path);
        Ok(())
    }
}

/// Everything needed to render one lit sphere
pub struct SphereScene {
    pub camera: OrbitCamera,
    pub sphere: Sphere,
    pub material: PhongMaterial,
    pub rig: LightingRig,
    pub background: Vec3,
}

/// Ray cast the sphere through every pixel center and shade the hits.
///
/// A zero width or height yields an empty framebuffer.
pub fn render_sphere(scene: &SphereScene, width: u32, height: u32) -> Framebuffer {
    let mut framebuffer = Framebuffer::new(width, height, scene.background);
    if framebuffer.pixels.is_empty() {
        return framebuffer;
    }
    let rays = scene.camera.screen_rays(width as f32, height as f32);
    let eye = scene.camera.position();

    debug!(
        "Shading {}x{} pixels ({} directional, {} point lights)",
        width,
        height,
        scene.rig.directional_lights().len(),
        scene.rig.point_lights().len()
    );

    framebuffer
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                let dir = rays.ray(x as f32 + 0.5, y as f32 + 0.5);
                if let Some(t) = scene.sphere.intersect(eye, dir) {
                    let position = eye + dir * t;
                    let surface =
                        SurfaceSample::from_eye(position, scene.sphere.normal_at(position), eye);
                    *pixel = scene.rig.shade(&surface, &scene.material);
                }
            }
        });

    framebuffer
}

/// Shade an arbitrary batch of samples in parallel, preserving order
pub fn shade_samples(
    samples: &[SurfaceSample],
    material: &PhongMaterial,
    rig: &LightingRig,
) -> Vec<Vec3> {
    samples
        .par_iter()
        .map(|surface| rig.shade(surface, material))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lighting::DirectionalLight;

    fn lit_scene() -> SphereScene {
        let mut rig = LightingRig::new();
        rig.add_directional_light(DirectionalLight::white(Vec3::NEG_Z));
        SphereScene {
            camera: OrbitCamera::new(Vec3::ZERO, 4.0),
            sphere: Sphere::new(Vec3::ZERO, 1.0),
            material: PhongMaterial::red(),
            rig,
            background: Vec3::new(0.0, 0.0, 1.0),
        }
    }

    #[test]
    fn test_sphere_intersection() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        let t = sphere.intersect(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).unwrap();
        assert!((t - 4.0).abs() < 1e-6);
        assert!(sphere.intersect(Vec3::new(0.0, 2.0, 5.0), Vec3::NEG_Z).is_none());
        // Origin inside the sphere hits the far side
        let t = sphere.intersect(Vec3::ZERO, Vec3::X).unwrap();
        assert!((t - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_render_hits_and_misses() {
        let scene = lit_scene();
        let framebuffer = render_sphere(&scene, 64, 48);

        assert_eq!(framebuffer.pixel(0, 0), scene.background);

        // Center pixel faces the camera and the light head on
        let center = framebuffer.pixel(32, 24);
        assert!(center.x > 0.9, "center {:?}", center);
        for channel in center.to_array() {
            assert!((0.0..=1.0).contains(&channel));
        }
    }

    #[test]
    fn test_zero_sized_render_is_empty() {
        let scene = lit_scene();
        for (width, height) in [(0, 48), (64, 0), (0, 0)] {
            let framebuffer = render_sphere(&scene, width, height);
            assert!(framebuffer.pixels().is_empty());
            assert_eq!((framebuffer.width(), framebuffer.height()), (width, height));
        }
    }

    #[test]
    fn test_shade_samples_matches_serial() {
        let scene = lit_scene();
        let samples: Vec<SurfaceSample> = (0..32)
            .map(|i| {
                let angle = i as f32 * 0.1;
                let normal = Vec3::new(angle.sin(), 0.0, angle.cos());
                SurfaceSample::new(normal, normal, Vec3::Z)
            })
            .collect();

        let parallel = shade_samples(&samples, &scene.material, &scene.rig);
        let serial: Vec<Vec3> = samples
            .iter()
            .map(|s| scene.rig.shade(s, &scene.material))
            .collect();
        assert_eq!(parallel, serial);
    }

    #[test]
    fn test_image_quantization() {
        let mut framebuffer = Framebuffer::new(2, 1, Vec3::new(2.0, -1.0, 0.5));
        framebuffer.pixels[1] = Vec3::ONE;
        let image = framebuffer.to_rgb_image();
        assert_eq!(image.get_pixel(0, 0), &Rgb([255, 0, 128]));
        assert_eq!(image.get_pixel(1, 0), &Rgb([255, 255, 255]));
    }
}
