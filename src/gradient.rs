// The animated colour field, as plain functions of `(uv, time, palette)`.
//
// `GradientFrame` folds everything that only depends on time and palette
// (centre positions, pulsing weights, layer rotations) into one value per
// frame, so shading a pixel is just distances and blends.

use glam::{Vec2, Vec3};

use crate::palette::Palette;
use crate::types::TouchSample;

/// How far the trail direction pushes the sampling coordinate.
pub const WARP_STRENGTH: f32 = 0.65;
/// Brightness added toward white before renormalising, see [`boost_saturation`].
pub const SATURATION_LIFT: f32 = 0.08;
const LAYER_RADIUS: f32 = 0.8;
const LAYER_WEIGHT: f32 = 0.4;

#[derive(Clone, Copy)]
enum Wave {
    Sin,
    Cos,
}

impl Wave {
    #[inline]
    fn at(self, x: f32) -> f32 {
        match self {
            Wave::Sin => x.sin(),
            Wave::Cos => x.cos(),
        }
    }
}

/// Orbit of one moving centre: `0.5 + wave(t * speed * freq) * amp` per axis.
struct Orbit {
    x: (Wave, f32, f32),
    y: (Wave, f32, f32),
}

/// Brightness pulse `0.5 + 0.5 * wave(t * speed * freq)`, palette slot, fixed weight.
struct Pulse {
    wave: Wave,
    freq: f32,
    slot: usize,
    weight: f32,
}

use Wave::{Cos, Sin};

#[rustfmt::skip]
const ORBITS: [Orbit; 10] = [
    Orbit { x: (Sin, 0.30, 0.50), y: (Cos, 0.40, 0.50) },
    Orbit { x: (Cos, 0.50, 0.60), y: (Sin, 0.35, 0.60) },
    Orbit { x: (Sin, 0.25, 0.40), y: (Cos, 0.60, 0.50) },
    Orbit { x: (Cos, 0.45, 0.45), y: (Sin, 0.30, 0.45) },
    Orbit { x: (Sin, 0.55, 0.50), y: (Cos, 0.50, 0.40) },
    Orbit { x: (Cos, 0.40, 0.55), y: (Sin, 0.60, 0.55) },
    Orbit { x: (Sin, 0.38, 0.35), y: (Cos, 0.52, 0.48) },
    Orbit { x: (Cos, 0.58, 0.42), y: (Sin, 0.48, 0.38) },
    Orbit { x: (Sin, 0.42, 0.50), y: (Cos, 0.58, 0.35) },
    Orbit { x: (Cos, 0.48, 0.38), y: (Sin, 0.65, 0.50) },
];

// Weight 1.0 on the first two is replaced by the palette's color1/color2 weights.
#[rustfmt::skip]
const PULSES: [Pulse; 10] = [
    Pulse { wave: Sin, freq: 1.0,  slot: 0, weight: 1.0 },
    Pulse { wave: Cos, freq: 1.2,  slot: 1, weight: 1.0 },
    Pulse { wave: Sin, freq: 0.8,  slot: 2, weight: 1.0 },
    Pulse { wave: Cos, freq: 1.1,  slot: 3, weight: 1.0 },
    Pulse { wave: Sin, freq: 0.9,  slot: 4, weight: 1.0 },
    Pulse { wave: Cos, freq: 1.3,  slot: 5, weight: 1.0 },
    Pulse { wave: Sin, freq: 1.1,  slot: 0, weight: 0.8 },
    Pulse { wave: Cos, freq: 0.95, slot: 1, weight: 0.7 },
    Pulse { wave: Sin, freq: 1.2,  slot: 2, weight: 0.8 },
    Pulse { wave: Cos, freq: 1.4,  slot: 3, weight: 0.7 },
];

/// GLSL `smoothstep`. Degenerate edges behave like a step at `edge0`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Position of centre `i` (0..10) at time `t`.
pub fn center(i: usize, time: f32, speed: f32) -> Vec2 {
    let o = &ORBITS[i];
    let axis = |(wave, freq, amp): (Wave, f32, f32)| 0.5 + wave.at(time * speed * freq) * amp;
    Vec2::new(axis(o.x), axis(o.y))
}

/// Everything about the colour field that is constant across one frame.
pub struct GradientFrame {
    time: f32,
    radius: f32,
    intensity: f32,
    grain_intensity: f32,
    centers: [Vec2; 10],
    /// palette colour * pulse * weight, per centre
    tints: [Vec3; 10],
    rotations: [Vec2; 2],
    layers: [(Vec3, Vec3); 2],
}

impl GradientFrame {
    pub fn new(palette: &Palette, time: f32) -> Self {
        let speed = palette.speed;
        let c = &palette.colors;
        let centers = std::array::from_fn(|i| center(i, time, speed));
        let tints = std::array::from_fn(|i| {
            let p = &PULSES[i];
            let weight = match i {
                0 => palette.color1_weight,
                1 => palette.color2_weight,
                _ => p.weight,
            };
            let pulse = 0.5 + 0.5 * p.wave.at(time * speed * p.freq);
            c[p.slot] * pulse * weight
        });
        let angle = |a: f32| Vec2::from_angle(a);
        Self {
            time,
            radius: palette.gradient_size,
            intensity: palette.intensity,
            grain_intensity: palette.grain_intensity,
            centers,
            tints,
            rotations: [angle(time * speed * 0.15), angle(-time * speed * 0.1)],
            layers: [(c[0], c[2]), (c[1], c[4])],
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Summed centre contributions plus the two rotating layers, clamped to [0,1].
    pub fn color_at(&self, uv: Vec2) -> Vec3 {
        let mut color = Vec3::ZERO;
        for (center, tint) in self.centers.iter().zip(&self.tints) {
            let influence = 1.0 - smoothstep(0.0, self.radius, uv.distance(*center));
            color += *tint * influence;
        }

        let offset = uv - Vec2::splat(0.5);
        for (rot, (a, b)) in self.rotations.iter().zip(&self.layers) {
            let radial = rot.rotate(offset).length();
            let influence = 1.0 - smoothstep(0.0, LAYER_RADIUS, radial);
            color += a.lerp(*b, influence) * LAYER_WEIGHT;
        }

        (color * self.intensity).clamp(Vec3::ZERO, Vec3::ONE)
    }

    /// Final colour of one surface point given its trail sample.
    pub fn shade(&self, uv: Vec2, touch: TouchSample, resolution: Vec2) -> Vec3 {
        let uv = warp(uv, touch, self.time);
        let mut color = self.color_at(uv);
        color += Vec3::splat(grain(uv, resolution, self.time) * self.grain_intensity);
        boost_saturation(color)
    }
}

/// Push `uv` along the trail direction, then add the two concentric ripples.
pub fn warp(uv: Vec2, touch: TouchSample, time: f32) -> Vec2 {
    let i = touch.intensity;
    let uv = uv + Vec2::new(touch.vx, touch.vy) * WARP_STRENGTH * i;
    let dist = uv.distance(Vec2::splat(0.5));
    let ripple = (dist * 16.0 - time * 2.3).sin() * 0.035 * i;
    let wave = (dist * 12.0 - time * 1.8).sin() * 0.028 * i;
    uv + Vec2::splat(ripple + wave)
}

/// Film grain in [-1, 1] from a sine hash of the pixel position and time.
pub fn grain(uv: Vec2, resolution: Vec2, time: f32) -> f32 {
    let p = uv * resolution * 0.25 + Vec2::splat(time);
    fract(p.dot(Vec2::new(12.9898, 78.233)).sin() * 43758.5453) * 2.0 - 1.0
}

/// Lift the colour toward grey by a fraction of its brightness, renormalise,
/// and rescale to `|c| / sqrt(3)`, then clamp. A black input stays black.
pub fn boost_saturation(color: Vec3) -> Vec3 {
    let brightness = color.length() / 3f32.sqrt();
    let lifted = (color + Vec3::splat(brightness * SATURATION_LIFT)).normalize_or_zero();
    (lifted * brightness).clamp(Vec3::ZERO, Vec3::ONE)
}

/// One-shot version of [`GradientFrame::color_at`].
pub fn gradient_color(uv: Vec2, time: f32, palette: &Palette) -> Vec3 {
    GradientFrame::new(palette, time).color_at(uv)
}

/// One-shot version of [`GradientFrame::shade`].
pub fn shade(uv: Vec2, time: f32, palette: &Palette, resolution: Vec2, touch: TouchSample) -> Vec3 {
    GradientFrame::new(palette, time).shade(uv, touch, resolution)
}
