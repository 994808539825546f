use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::core::lighting::{DirectionalLight, LightingRig, PointLight};
use crate::error::LightingError;
use crate::scene::SceneLight;

/// Complete demo scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(with = "vec3_serde")]
    pub ambient_color: Vec3,
    pub lights: Vec<LightConfigData>,
    /// Name looked up in the material library
    pub material: String,
    pub camera: CameraConfigData,
    pub render: RenderConfigData,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ambient_color: LightingRig::DEFAULT_AMBIENT,
            lights: vec![
                LightConfigData::Directional {
                    direction: Vec3::new(-0.5, -1.0, -0.3),
                    color: Vec3::ONE,
                    intensity: 0.8,
                },
                LightConfigData::Point {
                    position: Vec3::new(2.0, 1.5, 2.0),
                    color: Vec3::new(1.0, 0.85, 0.6),
                    intensity: 1.0,
                    radius: 8.0,
                },
            ],
            material: "Red".to_string(),
            camera: CameraConfigData::default(),
            render: RenderConfigData::default(),
        }
    }
}

impl SceneConfig {
    /// Load configuration from JSON file
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading scene config {}", path))?;
        let config: SceneConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing scene config {}", path))?;
        info!("Loaded scene config from {} ({} lights)", path, config.lights.len());
        Ok(config)
    }

    /// Save configuration to JSON file with pretty formatting
    pub fn save(&self, path: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration, or fall back to the defaults.
    ///
    /// A default file is written only when none exists; an unreadable one is kept as is.
    pub fn load_or_default(path: &str) -> Self {
        if !Path::new(path).exists() {
            let config = Self::default();
            info!("No scene config at {}, writing defaults", path);
            if let Err(err) = config.save(path) {
                warn!("Failed to write default scene config: {:#}", err);
            }
            return config;
        }

        Self::load(path).unwrap_or_else(|err| {
            warn!("Using default scene config: {:#}", err);
            Self::default()
        })
    }

    /// Validate every light and collect them into a rig.
    ///
    /// Lights past capacity evict earlier ones, same as adding them by hand.
    pub fn build_rig(&self) -> Result<LightingRig, LightingError> {
        let mut rig = LightingRig::new();
        rig.set_ambient_color(self.ambient_color);

        for light in &self.lights {
            match light.to_scene_light() {
                SceneLight::Directional(light) => {
                    light.validate()?;
                    rig.add_directional_light(light);
                }
                SceneLight::Point(light) => {
                    light.validate()?;
                    rig.add_point_light(light);
                }
            }
        }

        Ok(rig)
    }
}

/// Light entry (serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightConfigData {
    Directional {
        #[serde(with = "vec3_serde")]
        direction: Vec3,
        #[serde(with = "vec3_serde")]
        color: Vec3,
        intensity: f32,
    },
    Point {
        #[serde(with = "vec3_serde")]
        position: Vec3,
        #[serde(with = "vec3_serde")]
        color: Vec3,
        intensity: f32,
        radius: f32,
    },
}

impl LightConfigData {
    pub fn to_scene_light(&self) -> SceneLight {
        match *self {
            LightConfigData::Directional {
                direction,
                color,
                intensity,
            } => SceneLight::Directional(DirectionalLight::new(direction, color, intensity)),
            LightConfigData::Point {
                position,
                color,
                intensity,
                radius,
            } => SceneLight::Point(PointLight::new(position, color, intensity, radius)),
        }
    }
}

/// Orbit camera configuration (serializable, angles in degrees)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfigData {
    #[serde(with = "vec3_serde")]
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub fov: f32,
}

impl Default for CameraConfigData {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 20.0,
            pitch: 15.0,
            distance: 4.0,
            fov: 60.0,
        }
    }
}

/// Software render settings (serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfigData {
    pub width: u32,
    pub height: u32,
    #[serde(with = "vec3_serde")]
    pub background_color: Vec3,
    #[serde(with = "vec3_serde")]
    pub sphere_center: Vec3,
    pub sphere_radius: f32,
}

impl RenderConfigData {
    /// Reject targets with no pixels and degenerate spheres
    pub fn validate(&self) -> Result<(), LightingError> {
        if self.width == 0 || self.height == 0 {
            return Err(LightingError::EmptyViewport {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.sphere_radius > 0.0) {
            return Err(LightingError::NonPositiveSphereRadius(self.sphere_radius));
        }
        Ok(())
    }
}

impl Default for RenderConfigData {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            background_color: Vec3::new(0.05, 0.05, 0.08),
            sphere_center: Vec3::ZERO,
            sphere_radius: 1.0,
        }
    }
}

/// Custom serialization for Vec3
mod vec3_serde {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Vec3Data {
        x: f32,
        y: f32,
        z: f32,
    }

    pub fn serialize<S>(vec: &Vec3, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Vec3Data {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec3, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = Vec3Data::deserialize(deserializer)?;
        Ok(Vec3::new(data.x, data.y, data.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds() {
        let config = SceneConfig::default();
        let rig = config.build_rig().unwrap();
        assert_eq!(rig.directional_lights().len(), 1);
        assert_eq!(rig.point_lights().len(), 1);
        assert_eq!(rig.ambient_color(), config.ambient_color);
    }

    #[test]
    fn test_invalid_light_rejected() {
        let config = SceneConfig {
            lights: vec![LightConfigData::Point {
                position: Vec3::ZERO,
                color: Vec3::ONE,
                intensity: 1.0,
                radius: 0.0,
            }],
            ..SceneConfig::default()
        };
        assert_eq!(config.build_rig().unwrap_err(), LightingError::NonPositiveRadius(0.0));
    }

    #[test]
    fn test_light_json_shape() {
        let json = r#"{
            "type": "directional",
            "direction": { "x": 0.0, "y": -2.0, "z": 0.0 },
            "color": { "x": 1.0, "y": 1.0, "z": 1.0 },
            "intensity": 1.0
        }"#;
        let light: LightConfigData = serde_json::from_str(json).unwrap();
        match light.to_scene_light() {
            SceneLight::Directional(light) => assert_eq!(light.direction, Vec3::NEG_Y),
            other => panic!("unexpected light {:?}", other),
        }
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scene.json");
        let path = path.to_str().unwrap();

        let config = SceneConfig::default();
        config.save(path).unwrap();
        let loaded = SceneConfig::load(path).unwrap();

        assert_eq!(loaded.lights, config.lights);
        assert_eq!(loaded.material, config.material);
        assert_eq!(loaded.render.width, config.render.width);
    }

    #[test]
    fn test_render_settings_validated() {
        assert!(RenderConfigData::default().validate().is_ok());

        let zero_width = RenderConfigData {
            width: 0,
            ..RenderConfigData::default()
        };
        assert_eq!(
            zero_width.validate(),
            Err(LightingError::EmptyViewport {
                width: 0,
                height: 480
            })
        );

        let flat_sphere = RenderConfigData {
            sphere_radius: 0.0,
            ..RenderConfigData::default()
        };
        assert_eq!(
            flat_sphere.validate(),
            Err(LightingError::NonPositiveSphereRadius(0.0))
        );
    }

    #[test]
    fn test_load_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let path = path.to_str().unwrap();

        let missing = SceneConfig::load(path).unwrap_err();
        assert!(format!("{:#}", missing).contains(path), "{:#}", missing);

        fs::write(path, "not json").unwrap();
        let malformed = SceneConfig::load(path).unwrap_err();
        assert!(format!("{:#}", malformed).contains(path), "{:#}", malformed);
    }

    #[test]
    fn test_missing_config_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("scene.json");
        let path = path.to_str().unwrap();

        let config = SceneConfig::load_or_default(path);
        assert_eq!(SceneConfig::load(path).unwrap().lights, config.lights);
    }

    #[test]
    fn test_malformed_config_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let path = path.to_str().unwrap();

        // Half-edited file with a trailing comma
        let edited = r#"{ "material": "Gold", }"#;
        fs::write(path, edited).unwrap();

        let config = SceneConfig::load_or_default(path);
        assert_eq!(config.material, SceneConfig::default().material);
        assert_eq!(fs::read_to_string(path).unwrap(), edited);
    }
}
