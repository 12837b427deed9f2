// Pointer trail accumulation.
//
// Every pointer move appends a `Sample`; every frame `TrailBuffer::tick`
// ages and advects the samples, prunes the expired ones and redraws the
// `FieldGrid` from scratch. The grid is what the renderer reads.

use glam::Vec2;

use crate::brush::Brush;
use crate::types::FieldGrid;

/// Texels per side of the field grid.
pub const FIELD_SIZE: usize = 64;
/// Ticks a sample lives for.
pub const MAX_AGE: u32 = 64;
/// Disc radius as a fraction of the grid size.
pub const RADIUS_FRACTION: f32 = 0.15;
/// Quadratic gain from squared pointer delta to force.
pub const FORCE_GAIN: f32 = 18_000.0;
/// Force saturates here so fast flicks do not blow out the intensity.
pub const MAX_FORCE: f32 = 2.0;
/// Fraction of the lifetime spent easing in.
const EASE_IN_FRACTION: f32 = 0.3;

/// One recorded pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Normalised surface position, y up. Moves along (vx, vy) as the sample ages.
    pub x: f32,
    pub y: f32,
    /// Ticks since creation
    pub age: u32,
    /// Strength in [0, MAX_FORCE], derived from pointer speed
    pub force: f32,
    /// Unit direction of motion at creation, or zero
    pub vx: f32,
    pub vy: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct TrailSettings {
    pub size: usize,
    pub max_age: u32,
    pub radius_fraction: f32,
}

impl Default for TrailSettings {
    fn default() -> Self {
        Self { size: FIELD_SIZE, max_age: MAX_AGE, radius_fraction: RADIUS_FRACTION }
    }
}

/// Fade curve for a sample of the given age: sine ease-in over the first 30%
/// of the lifetime, then a quadratic ease-out that reaches 0 at `max_age`.
pub fn age_intensity(age: u32, max_age: u32) -> f32 {
    ease(age as f32, max_age as f32)
}

/// [`age_intensity`] over a continuous age.
pub fn ease(age: f32, max_age: f32) -> f32 {
    let rise = max_age * EASE_IN_FRACTION;
    if age < rise {
        (age / rise * std::f32::consts::FRAC_PI_2).sin()
    } else {
        let t = 1.0 - (age - rise) / (max_age - rise);
        -t * (t - 2.0)
    }
}

/// Force for a pointer delta: `min((dx² + dy²) * 18000, 2)`.
#[inline]
pub fn force_for_delta(dx: f32, dy: f32) -> f32 {
    ((dx * dx + dy * dy) * FORCE_GAIN).min(MAX_FORCE)
}

pub struct TrailBuffer {
    size: usize,
    max_age: u32,
    speed: f32,
    brush: Brush,
    trail: Vec<Sample>,
    last: Option<Vec2>,
    field: FieldGrid,
}

impl TrailBuffer {
    pub fn new(settings: TrailSettings) -> Self {
        let size = settings.size.max(1);
        let max_age = settings.max_age.max(1);
        Self {
            size,
            max_age,
            speed: 1.0 / max_age as f32,
            brush: Brush::new(settings.radius_fraction * size as f32),
            trail: Vec::new(),
            last: None,
            field: FieldGrid::new(size),
        }
    }

    /// Record a pointer position (normalised, y up).
    ///
    /// The first ever point gets zero force and direction. A point equal to the
    /// previous one is dropped and leaves the last position untouched.
    /// Returns whether a sample was appended.
    pub fn add_sample(&mut self, point: Vec2) -> bool {
        let (mut force, mut vx, mut vy) = (0.0, 0.0, 0.0);
        if let Some(last) = self.last {
            let dx = point.x - last.x;
            let dy = point.y - last.y;
            if dx == 0.0 && dy == 0.0 {
                return false;
            }
            let d = (dx * dx + dy * dy).sqrt();
            vx = dx / d;
            vy = dy / d;
            force = force_for_delta(dx, dy);
        }
        self.last = Some(point);
        self.trail.push(Sample { x: point.x, y: point.y, age: 0, force, vx, vy });
        true
    }

    /// Advance every sample by one tick and redraw the field grid.
    pub fn tick(&mut self) {
        self.field.clear();
        let max_age = self.max_age;
        // newest first; removal by index stays valid walking backwards
        for i in (0..self.trail.len()).rev() {
            let s = &mut self.trail[i];
            let f = s.force * self.speed * (1.0 - s.age as f32 / max_age as f32);
            s.x += s.vx * f;
            s.y += s.vy * f;
            s.age += 1;
            if s.age > max_age {
                self.trail.remove(i);
            } else {
                let s = *s;
                self.draw_sample(&s);
            }
        }
    }

    fn draw_sample(&mut self, s: &Sample) {
        let w = self.size as f32;
        let cx = s.x * w;
        let cy = (1.0 - s.y) * w;
        let intensity = age_intensity(s.age, self.max_age) * s.force;
        self.brush.dab(&mut self.field, cx, cy, s.vx, s.vy, intensity);
    }

    /// Grid produced by the last tick.
    pub fn field(&self) -> &FieldGrid {
        &self.field
    }

    pub fn samples(&self) -> &[Sample] {
        &self.trail
    }

    pub fn last(&self) -> Option<Vec2> {
        self.last
    }

    pub fn max_age(&self) -> u32 {
        self.max_age
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new(TrailSettings::default())
    }
}
