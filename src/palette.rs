// Colour palette and scalar parameters of the gradient, all tunable at runtime.
//
// Setters never fail on numeric input: colours are clamped into [0,1] and
// non-finite values are dropped with a warning, so a bad value from a tuning
// panel can't break the picture.

use glam::Vec3;
use log::warn;

use crate::error::{Error, Result};

pub const COLOR_COUNT: usize = 6;

/// Scalar parameters a tuning surface may change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Param {
    Speed,
    Intensity,
    GrainIntensity,
    GradientSize,
    Color1Weight,
    Color2Weight,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub colors: [Vec3; COLOR_COUNT],
    /// Time multiplier for every moving centre
    pub speed: f32,
    /// Overall brightness applied before the clamp
    pub intensity: f32,
    pub grain_intensity: f32,
    /// Radius of each moving centre's influence (uv units)
    pub gradient_size: f32,
    pub color1_weight: f32,
    pub color2_weight: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [
                // warm
                Vec3::new(1.0, 0.5, 0.2),
                Vec3::new(1.0, 0.3, 0.4),
                // purple / magenta
                Vec3::new(0.8, 0.3, 0.8),
                Vec3::new(0.9, 0.2, 0.6),
                // cyan / blue
                Vec3::new(0.2, 0.9, 0.9),
                Vec3::new(0.3, 0.7, 1.0),
            ],
            speed: 1.0,
            intensity: 1.1,
            grain_intensity: 0.12,
            gradient_size: 0.55,
            color1_weight: 1.2,
            color2_weight: 1.3,
        }
    }
}

impl Palette {
    /// Set palette slot `index` (0-based). Channels are clamped to [0,1].
    pub fn set_color(&mut self, index: usize, rgb: [f32; 3]) -> Result<()> {
        let slot = self.colors.get_mut(index).ok_or(Error::PaletteIndex(index))?;
        if rgb.iter().any(|c| !c.is_finite()) {
            warn!("ignoring non-finite colour {rgb:?} for slot {index}");
            return Ok(());
        }
        *slot = Vec3::from_array(rgb).clamp(Vec3::ZERO, Vec3::ONE);
        Ok(())
    }

    pub fn set_color_hex(&mut self, index: usize, hex: &str) -> Result<()> {
        let rgb = hex_to_rgb(hex)?;
        self.set_color(index, rgb)
    }

    pub fn color(&self, index: usize) -> Option<Vec3> {
        self.colors.get(index).copied()
    }

    pub fn set_param(&mut self, param: Param, value: f32) {
        if !value.is_finite() {
            warn!("ignoring non-finite value {value} for {param:?}");
            return;
        }
        *self.param_mut(param) = value;
    }

    pub fn param(&self, param: Param) -> f32 {
        match param {
            Param::Speed => self.speed,
            Param::Intensity => self.intensity,
            Param::GrainIntensity => self.grain_intensity,
            Param::GradientSize => self.gradient_size,
            Param::Color1Weight => self.color1_weight,
            Param::Color2Weight => self.color2_weight,
        }
    }

    fn param_mut(&mut self, param: Param) -> &mut f32 {
        match param {
            Param::Speed => &mut self.speed,
            Param::Intensity => &mut self.intensity,
            Param::GrainIntensity => &mut self.grain_intensity,
            Param::GradientSize => &mut self.gradient_size,
            Param::Color1Weight => &mut self.color1_weight,
            Param::Color2Weight => &mut self.color2_weight,
        }
    }

    /// Upper-case `#RRGGBB` for every slot.
    pub fn hex_colors(&self) -> [String; COLOR_COUNT] {
        self.colors.map(|c| rgb_to_hex(c.to_array()).to_uppercase())
    }

    /// Human readable dump of the scheme, one line per colour plus an array literal.
    pub fn export_text(&self) -> String {
        let hex = self.hex_colors();
        let lines: Vec<String> =
            hex.iter().enumerate().map(|(i, c)| format!("Color {}: {}", i + 1, c)).collect();
        let quoted: Vec<String> = hex.iter().map(|c| format!("\"{c}\"")).collect();
        format!("Color Scheme:\n{}\n\nHex Array: [{}]", lines.join("\n"), quoted.join(", "))
    }
}

/// `[0.5, 0.0, 1.0]` -> `"#8000ff"`.
pub fn rgb_to_hex(rgb: [f32; 3]) -> String {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parse `#RRGGBB` (the `#` is optional, case-insensitive) into [0,1] channels.
pub fn hex_to_rgb(hex: &str) -> Result<[f32; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidHex(hex.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| Error::InvalidHex(hex.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}
