use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::constants::*;
use crate::error::SettingsError;
use crate::world::noise::NoiseParameters;
use crate::world::particles::ParticleConfig;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ViewerSettings {
    pub camera: CameraSettings,
    pub terrain: TerrainSettings,
    pub culling: CullingSettings,
    pub particles: ParticleConfig,
    pub loader: LoaderSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CameraSettings {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub move_speed: f32, // units per millisecond
    pub mouse_sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: CAMERA_DEFAULT_FOV,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            move_speed: CAMERA_MOVE_SPEED,
            mouse_sensitivity: 1.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TerrainSettings {
    pub plane_size: f32,
    pub cell_size: f32,
    pub noise: NoiseParameters,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            plane_size: DEFAULT_TERRAIN_CUBE_SIZE,
            cell_size: DEFAULT_TERRAIN_CELL_SIZE,
            noise: NoiseParameters::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CullingSettings {
    /// Edge length of each octant cube around the camera.
    pub cube_size: f32,
}

impl Default for CullingSettings {
    fn default() -> Self {
        Self {
            cube_size: DEFAULT_TERRAIN_CUBE_SIZE,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoaderSettings {
    /// How long a blocking caller waits for a load to finish.
    pub result_timeout_secs: u64,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            result_timeout_secs: 60,
        }
    }
}

pub fn save_settings<P: AsRef<Path>>(path: P, settings: &ViewerSettings) -> Result<(), SettingsError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, settings)?;
    writer.flush()?;
    Ok(())
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<ViewerSettings, SettingsError> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::new(file);
    let settings = bincode::deserialize_from(&mut reader)?;
    Ok(settings)
}

/// Missing or unreadable settings fall back to defaults.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> ViewerSettings {
    let path = path.as_ref();
    match load_settings(path) {
        Ok(settings) => settings,
        Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings at {}, using defaults", path.display());
            ViewerSettings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to load settings from {}: {}", path.display(), e);
            ViewerSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("objview_settings_{}_{}.bin", name, std::process::id()))
    }

    #[test]
    fn test_defaults_use_constants() {
        let settings = ViewerSettings::default();
        assert_eq!(settings.camera.fov, CAMERA_DEFAULT_FOV);
        assert_eq!(settings.camera.far, CAMERA_FAR);
        assert_eq!(settings.terrain.cell_size, DEFAULT_TERRAIN_CELL_SIZE);
        assert_eq!(settings.particles.count, DEFAULT_PARTICLE_COUNT);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut settings = ViewerSettings::default();
        settings.camera.mouse_sensitivity = 0.25;
        settings.terrain.noise.seed = -12;
        settings.particles.seed = 99;

        save_settings(&path, &settings).unwrap();
        let loaded = load_settings(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_settings(temp_path("missing")).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
        assert_eq!(load_or_default(temp_path("missing")), ViewerSettings::default());
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let path = temp_path("garbage");
        std::fs::write(&path, [0xffu8; 3]).unwrap();
        assert!(matches!(load_settings(&path), Err(SettingsError::Encoding(_))));
        assert_eq!(load_or_default(&path), ViewerSettings::default());
        let _ = std::fs::remove_file(&path);
    }
}
