// Software rendition of the gradient surface.
//
// The renderer owns the animation clock, the palette and the view geometry.
// Each `FieldRenderer::draw` shades every pixel of a `FrameBuffer`
// from the trail field handed to it.

use glam::Vec2;
use log::debug;

use crate::camera::{PerspectiveCamera, PlaneGeometry};
use crate::gradient::GradientFrame;
use crate::palette::Palette;
use crate::types::{FieldGrid, FrameBuffer, pack_rgb};

/// Largest time step the clock takes in one frame, in seconds.
pub const MAX_FRAME_DT: f32 = 0.1;
/// Colour of any pixel the plane does not cover.
pub const BACKGROUND: u32 = 0x000A_0A15;

pub struct FieldRenderer {
    palette: Palette,
    time: f32,
    resolution: Vec2,
    camera: PerspectiveCamera,
    plane: PlaneGeometry,
}

impl FieldRenderer {
    /// `width`/`height` are the viewport size in pixels.
    pub fn new(palette: Palette, mut camera: PerspectiveCamera, width: u32, height: u32) -> Self {
        camera.set_viewport(width, height);
        Self {
            palette,
            time: 0.0,
            resolution: Vec2::new(width as f32, height as f32),
            plane: PlaneGeometry::covering(&camera),
            camera,
        }
    }

    /// Advance the clock. Negative or oversized steps are clamped to [0, MAX_FRAME_DT].
    pub fn update(&mut self, dt: f32) {
        if dt.is_finite() {
            self.time += dt.clamp(0.0, MAX_FRAME_DT);
        }
    }

    /// New viewport size: rebuild the plane and update the grain resolution.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
        self.plane = PlaneGeometry::covering(&self.camera);
        self.resolution = Vec2::new(width as f32, height as f32);
        debug!(
            "resize {}x{} -> plane {:.3}x{:.3}",
            width, height, self.plane.width, self.plane.height
        );
    }

    /// Shade `out` from the current clock, palette and trail field.
    ///
    /// `out` may be smaller than the viewport; it is treated as a downscaled
    /// image of the whole viewport.
    pub fn draw(&self, field: &FieldGrid, out: &mut FrameBuffer) {
        let frame = GradientFrame::new(&self.palette, self.time);
        let (lo, hi) = self.plane.ndc_bounds(&self.camera);
        let span = hi - lo;
        let (w, h) = (out.width as f32, out.height as f32);

        for py in 0..out.height {
            let ndc_y = 1.0 - (py as f32 + 0.5) / h * 2.0;
            let row = py * out.width;
            for px in 0..out.width {
                let ndc = Vec2::new((px as f32 + 0.5) / w * 2.0 - 1.0, ndc_y);
                let uv = (ndc - lo) / span;
                out.pixels[row + px] = if (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y) {
                    let touch = field.sample(uv.x, uv.y);
                    let c = frame.shade(uv, touch, self.resolution);
                    pack_rgb(c.x, c.y, c.z)
                } else {
                    BACKGROUND
                };
            }
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Viewport size in pixels, as used by the grain.
    pub fn resolution(&self) -> Vec2 {
        self.resolution
    }

    pub fn plane(&self) -> PlaneGeometry {
        self.plane
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Tuning access; changes show up on the next draw.
    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }
}
