// TOML configuration.
//
// Every section and field has a default, so an empty file (or no file at
// all) gives the stock look.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::{DEFAULT_DISTANCE, DEFAULT_FOV_DEGREES};
use crate::error::{Error, Result};
use crate::palette::{COLOR_COUNT, Palette};
use crate::trail::{FIELD_SIZE, MAX_AGE, RADIUS_FRACTION, TrailSettings};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub palette: PaletteConfig,
    pub camera: CameraConfig,
    pub trail: TrailConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Render buffer is the window size divided by this (1 = full resolution)
    pub render_scale: u32,
    /// Stop shading while the window is not focused
    pub pause_when_inactive: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Touch Gradient".to_string(),
            width: 1280,
            height: 720,
            render_scale: 2,
            pause_when_inactive: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Six `#RRGGBB` strings; the built-in scheme when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    pub speed: f32,
    pub intensity: f32,
    pub grain_intensity: f32,
    pub gradient_size: f32,
    pub color1_weight: f32,
    pub color2_weight: f32,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        let p = Palette::default();
        Self {
            colors: None,
            speed: p.speed,
            intensity: p.intensity,
            grain_intensity: p.grain_intensity,
            gradient_size: p.gradient_size,
            color1_weight: p.color1_weight,
            color2_weight: p.color2_weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { fov_degrees: DEFAULT_FOV_DEGREES, distance: DEFAULT_DISTANCE }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub size: usize,
    pub max_age: u32,
    pub radius_fraction: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self { size: FIELD_SIZE, max_age: MAX_AGE, radius_fraction: RADIUS_FRACTION }
    }
}

impl TrailConfig {
    pub fn settings(&self) -> TrailSettings {
        TrailSettings {
            size: self.size,
            max_age: self.max_age,
            radius_fraction: self.radius_fraction,
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("parse: {e}")))
    }

    /// Palette built from the `[palette]` section. Colours must be valid hex.
    pub fn palette(&self) -> Result<Palette> {
        let cfg = &self.palette;
        let mut palette = Palette::default();
        if let Some(colors) = &cfg.colors {
            if colors.len() != COLOR_COUNT {
                return Err(Error::Config(format!(
                    "palette.colors needs {COLOR_COUNT} entries, got {}",
                    colors.len()
                )));
            }
            for (i, hex) in colors.iter().enumerate() {
                palette.set_color_hex(i, hex)?;
            }
        }
        use crate::palette::Param::*;
        for (param, value) in [
            (Speed, cfg.speed),
            (Intensity, cfg.intensity),
            (GrainIntensity, cfg.grain_intensity),
            (GradientSize, cfg.gradient_size),
            (Color1Weight, cfg.color1_weight),
            (Color2Weight, cfg.color2_weight),
        ] {
            palette.set_param(param, value);
        }
        Ok(palette)
    }
}
