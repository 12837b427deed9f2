// Soft round brush that deposits one trail sample into the field grid.
// The disc is opaque at its centre and fades to nothing one blur width past its edge.

use crate::gradient::smoothstep;
use crate::types::{FieldGrid, Texel};

#[derive(Clone, Copy, Debug)]
pub struct Brush {
    /// Disc radius in texels
    pub radius: f32,
    /// Width of the soft rim on each side of the disc edge, in texels
    pub blur: f32,
}

impl Brush {
    /// A brush whose glow spreads one full radius past the disc edge.
    pub fn new(radius: f32) -> Self {
        Self { radius, blur: radius }
    }

    /// Coverage in [0,1] at distance `d` (texels) from the disc centre.
    #[inline]
    pub fn coverage(&self, d: f32) -> f32 {
        1.0 - smoothstep(self.radius - self.blur, self.radius + self.blur, d)
    }

    /// Distance beyond which coverage is exactly zero.
    #[inline]
    pub fn reach(&self) -> f32 {
        self.radius + self.blur
    }

    /// Composite a sample centred at grid position (cx, cy) over the grid.
    ///
    /// Direction is written as straight colour and intensity as alpha, using
    /// source-over; an untouched texel takes the sample's direction exactly.
    pub fn dab(&self, grid: &mut FieldGrid, cx: f32, cy: f32, vx: f32, vy: f32, intensity: f32) {
        if intensity <= 0.0 || grid.size == 0 {
            return;
        }
        let n = grid.size as i32;
        let reach = self.reach();
        // Scan just the bounding box
        let x0 = ((cx - reach - 0.5).floor() as i32).max(0);
        let x1 = ((cx + reach - 0.5).ceil() as i32).min(n - 1);
        let y0 = ((cy - reach - 0.5).floor() as i32).max(0);
        let y1 = ((cy + reach - 0.5).ceil() as i32).min(n - 1);
        let src = Texel::encode(vx, vy, 1.0);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                let a = (intensity * self.coverage(d)).clamp(0.0, 1.0);
                if a <= 0.0 {
                    continue;
                }

                let idx = y as usize * grid.size + x as usize;
                let dst = grid.texels[idx];
                let keep = dst.b * (1.0 - a);
                let out_a = a + keep;
                grid.texels[idx] = Texel {
                    r: (src.r * a + dst.r * keep) / out_a,
                    g: (src.g * a + dst.g * keep) / out_a,
                    b: out_a,
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_is_opaque_at_centre_and_gone_past_reach() {
        let brush = Brush::new(9.6);
        assert_eq!(brush.coverage(0.0), 1.0);
        assert!((brush.coverage(9.6) - 0.5).abs() < 1e-6);
        assert_eq!(brush.coverage(brush.reach()), 0.0);
        assert_eq!(brush.coverage(brush.reach() + 3.0), 0.0);
    }

    #[test]
    fn coverage_decays_monotonically() {
        let brush = Brush::new(9.6);
        let mut prev = brush.coverage(0.0);
        for i in 1..=40 {
            let c = brush.coverage(i as f32 * 0.5);
            assert!(c <= prev);
            prev = c;
        }
    }

    #[test]
    fn dab_on_empty_grid_keeps_exact_direction() {
        let mut grid = FieldGrid::new(64);
        Brush::new(9.6).dab(&mut grid, 32.0, 32.0, 1.0, 0.0, 1.0);
        let s = grid.texel(31, 31).decode();
        assert!((s.vx - 1.0).abs() < 1e-5);
        assert!(s.vy.abs() < 1e-5);
        assert!(s.intensity > 0.99);
        // far corner untouched
        assert_eq!(grid.texel(0, 0), Texel::ZERO);
    }

    #[test]
    fn stacked_dabs_never_exceed_unit_alpha() {
        let mut grid = FieldGrid::new(16);
        let brush = Brush::new(3.0);
        for _ in 0..10 {
            brush.dab(&mut grid, 8.0, 8.0, 0.0, 1.0, 2.0);
        }
        assert!(grid.texels.iter().all(|t| t.b <= 1.0 + 1e-6));
    }

    #[test]
    fn dab_near_edge_stays_in_bounds() {
        let mut grid = FieldGrid::new(8);
        Brush::new(4.0).dab(&mut grid, -1.0, 9.0, 1.0, 1.0, 1.0);
        assert!(grid.texel(0, 7).b > 0.0);
    }
}
