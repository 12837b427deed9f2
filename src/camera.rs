// Perspective camera and the full-viewport plane it looks at.
// The plane is sized from the camera so it exactly fills the view at its distance;
// after a resize the plane is rebuilt for the new aspect ratio.

use glam::{Vec2, Vec3};

pub const DEFAULT_FOV_DEGREES: f32 = 45.0;
pub const DEFAULT_DISTANCE: f32 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewSize {
    pub width: f32,
    pub height: f32,
}

/// Camera on the +z axis looking down -z at the origin.
#[derive(Clone, Copy, Debug)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Distance from the plane (camera z)
    pub distance: f32,
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, distance: f32) -> Self {
        Self { fov_degrees, aspect, distance }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = aspect_of(width, height);
    }

    /// World-space size of the visible region at the plane (z = 0).
    pub fn view_size(&self) -> ViewSize {
        let half_fov = self.fov_degrees.to_radians() * 0.5;
        let height = (self.distance * half_fov.tan() * 2.0).abs();
        ViewSize { width: height * self.aspect, height }
    }

    /// Project a world point to normalised device coordinates ([-1,1], y up).
    pub fn project(&self, p: Vec3) -> Vec2 {
        let depth = self.distance - p.z;
        let f = 1.0 / (self.fov_degrees.to_radians() * 0.5).tan();
        Vec2::new(p.x * f / (self.aspect * depth), p.y * f / depth)
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(DEFAULT_FOV_DEGREES, 1.0, DEFAULT_DISTANCE)
    }
}

/// Viewport aspect ratio; a zero height counts as one pixel.
pub fn aspect_of(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

/// Single-quad plane centred on the origin in the z = 0 plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneGeometry {
    pub width: f32,
    pub height: f32,
}

impl PlaneGeometry {
    /// A plane that exactly covers what `camera` sees.
    pub fn covering(camera: &PerspectiveCamera) -> Self {
        let ViewSize { width, height } = camera.view_size();
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Screen footprint of the plane in NDC: (bottom-left, top-right).
    /// Surface uv (0,0) is the bottom-left corner, (1,1) the top-right one.
    pub fn ndc_bounds(&self, camera: &PerspectiveCamera) -> (Vec2, Vec2) {
        let half = Vec3::new(self.width * 0.5, self.height * 0.5, 0.0);
        (camera.project(-half), camera.project(half))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_height_follows_fov_and_distance() {
        let cam = PerspectiveCamera::new(90.0, 2.0, 10.0);
        let v = cam.view_size();
        assert!((v.height - 20.0).abs() < 1e-4);
        assert!((v.width - 40.0).abs() < 1e-4);
    }

    #[test]
    fn covering_plane_fills_ndc() {
        let mut cam = PerspectiveCamera::default();
        cam.set_viewport(1280, 720);
        let plane = PlaneGeometry::covering(&cam);
        let (lo, hi) = plane.ndc_bounds(&cam);
        assert!((lo - Vec2::splat(-1.0)).abs().max_element() < 1e-5);
        assert!((hi - Vec2::splat(1.0)).abs().max_element() < 1e-5);
    }

    #[test]
    fn zero_height_viewport_does_not_divide_by_zero() {
        assert_eq!(aspect_of(640, 0), 640.0);
    }
}
