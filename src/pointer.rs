// Turns window-space pointer and touch coordinates into normalised surface
// points (0..1, y up) and feeds them to the trail.

use glam::Vec2;

use crate::trail::TrailBuffer;

#[derive(Clone, Copy, Debug)]
pub struct PointerSampler {
    width: f32,
    height: f32,
}

impl PointerSampler {
    pub fn new(width: u32, height: u32) -> Self {
        let mut s = Self { width: 1.0, height: 1.0 };
        s.set_viewport(width, height);
        s
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width.max(1) as f32;
        self.height = height.max(1) as f32;
    }

    /// Client pixel position (origin top-left) to surface space (origin bottom-left).
    pub fn normalize(&self, client_x: f32, client_y: f32) -> Vec2 {
        Vec2::new(client_x / self.width, 1.0 - client_y / self.height)
    }

    /// Returns whether the trail accepted a new sample.
    pub fn pointer_move(&self, trail: &mut TrailBuffer, client_x: f32, client_y: f32) -> bool {
        trail.add_sample(self.normalize(client_x, client_y))
    }

    /// Only the first touch point counts; an empty touch list is ignored.
    pub fn touch_move(&self, trail: &mut TrailBuffer, touches: &[Vec2]) -> bool {
        match touches.first() {
            Some(t) => self.pointer_move(trail, t.x, t.y),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_y() {
        let s = PointerSampler::new(200, 100);
        assert_eq!(s.normalize(50.0, 25.0), Vec2::new(0.25, 0.75));
        assert_eq!(s.normalize(0.0, 100.0), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn uses_first_touch_only() {
        let s = PointerSampler::new(100, 100);
        let mut trail = TrailBuffer::default();
        assert!(!s.touch_move(&mut trail, &[]));
        assert!(s.touch_move(&mut trail, &[Vec2::new(25.0, 75.0), Vec2::new(80.0, 20.0)]));
        assert_eq!(trail.last(), Some(Vec2::new(0.25, 0.25)));
    }
}
