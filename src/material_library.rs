use crate::material::PhongMaterial;
use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Material library containing named materials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialLibrary {
    pub materials: HashMap<String, PhongMaterial>,
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        let mut materials = HashMap::new();

        materials.insert("Default".to_string(), PhongMaterial::default());
        materials.insert("Red".to_string(), PhongMaterial::red());
        materials.insert(
            "Metal".to_string(),
            PhongMaterial::metallic(Vec3::new(0.8, 0.8, 0.8)),
        );
        materials.insert(
            "Plastic".to_string(),
            PhongMaterial::plastic(Vec3::new(0.2, 0.4, 0.9)),
        );
        materials.insert(
            "Matte".to_string(),
            PhongMaterial::matte(Vec3::new(0.8, 0.8, 0.8)),
        );

        Self { materials }
    }
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load material library from JSON file
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading material library {}", path))?;
        let library: MaterialLibrary = serde_json::from_str(&content)
            .with_context(|| format!("parsing material library {}", path))?;
        for (name, material) in &library.materials {
            material
                .validate()
                .with_context(|| format!("material '{}' in {}", name, path))?;
        }
        info!("Loaded {} materials from {}", library.materials.len(), path);
        Ok(library)
    }

    /// Save material library to JSON file
    pub fn save(&self, path: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load the material library, or fall back to the defaults.
    ///
    /// Defaults are written to disk only when no file exists yet; a file that
    /// fails to parse or validate is left untouched.
    pub fn load_or_default(path: &str) -> Self {
        if !Path::new(path).exists() {
            let library = Self::default();
            info!("No material library at {}, writing defaults", path);
            if let Err(err) = library.save(path) {
                warn!("Failed to write default material library: {:#}", err);
            }
            return library;
        }

        Self::load(path).unwrap_or_else(|err| {
            warn!("Using default material library, {} not loaded: {:#}", path, err);
            Self::default()
        })
    }

    pub fn get(&self, name: &str) -> Option<&PhongMaterial> {
        self.materials.get(name)
    }

    /// Look up a material, falling back to the default one
    pub fn get_or_default(&self, name: &str) -> PhongMaterial {
        self.get(name).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold() -> PhongMaterial {
        PhongMaterial::metallic(Vec3::new(1.0, 0.8, 0.3))
    }

    #[test]
    fn test_unknown_name_falls_back() {
        let library = MaterialLibrary::new();
        assert_eq!(library.get_or_default("Nope"), PhongMaterial::default());
        assert_eq!(library.get_or_default("Red"), PhongMaterial::red());
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("materials.json");
        let path = path.to_str().unwrap();

        let mut library = MaterialLibrary::new();
        library.materials.insert("Gold".to_string(), gold());
        library.save(path).unwrap();

        let loaded = MaterialLibrary::load(path).unwrap();
        assert_eq!(loaded.materials, library.materials);
    }

    #[test]
    fn test_load_rejects_invalid_material() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        let path = path.to_str().unwrap();

        let mut library = MaterialLibrary::new();
        library.materials.insert(
            "Broken".to_string(),
            PhongMaterial {
                shininess: -1.0,
                ..PhongMaterial::default()
            },
        );
        library.save(path).unwrap();

        let err = MaterialLibrary::load(path).unwrap_err();
        assert!(format!("{:#}", err).contains("Broken"), "{:#}", err);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("materials.json");
        let path = path.to_str().unwrap();

        let library = MaterialLibrary::load_or_default(path);
        assert_eq!(library.materials, MaterialLibrary::default().materials);
        assert_eq!(MaterialLibrary::load(path).unwrap().materials, library.materials);
    }

    #[test]
    fn test_invalid_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("materials.json");
        let path = path.to_str().unwrap();

        let mut library = MaterialLibrary::new();
        library.materials.insert("Gold".to_string(), gold());
        library.materials.insert(
            "Broken".to_string(),
            PhongMaterial {
                shininess: 0.0,
                ..PhongMaterial::default()
            },
        );
        library.save(path).unwrap();
        let before = fs::read_to_string(path).unwrap();

        let fallback = MaterialLibrary::load_or_default(path);
        assert!(fallback.get("Gold").is_none());

        // The user's edits survive on disk
        let after = fs::read_to_string(path).unwrap();
        assert_eq!(after, before);
        assert!(after.contains("Gold"));
    }

    #[test]
    fn test_malformed_json_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("materials.json");
        fs::write(&path, "{ \"materials\": ").unwrap();

        let library = MaterialLibrary::load_or_default(path.to_str().unwrap());
        assert_eq!(library.materials, MaterialLibrary::default().materials);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"materials\": ");
    }
}
