// Host loop context: one explicitly constructed value owning the trail, the
// pointer sampler, the renderer and the frame clock.
//
// A window (or a test) drives it through `App::handle` for input and
// `App::render` once per animation frame.

use std::time::Instant;

use glam::Vec2;
use log::{debug, info};

use crate::camera::PerspectiveCamera;
use crate::config::AppConfig;
use crate::error::Result;
use crate::pointer::PointerSampler;
use crate::renderer::{FieldRenderer, MAX_FRAME_DT};
use crate::trail::TrailBuffer;
use crate::types::FrameBuffer;

/// Input the host forwards to the app. Positions are window pixels, origin top-left.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    PointerMove { x: f32, y: f32 },
    TouchMove { touches: Vec<Vec2> },
    TouchStart,
    Click,
    Resize { width: u32, height: u32 },
    VisibilityChanged { hidden: bool },
}

/// Seconds elapsed since the previous call.
pub trait FrameClock {
    fn delta(&mut self) -> f32;
}

/// Wall clock.
pub struct SystemClock {
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

/// Fixed step, for headless rendering and tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedStep(pub f32);

impl FrameClock for FixedStep {
    fn delta(&mut self) -> f32 {
        self.0
    }
}

pub struct App<C: FrameClock = SystemClock> {
    trail: TrailBuffer,
    sampler: PointerSampler,
    renderer: FieldRenderer,
    clock: C,
    frame: FrameBuffer,
    viewport: (u32, u32),
    render_scale: u32,
    hidden: bool,
    wake_armed: bool,
    frames: u64,
}

impl<C: FrameClock> App<C> {
    /// Build everything from config and render the first frame straight away,
    /// so the surface is never blank.
    pub fn new(config: &AppConfig, clock: C) -> Result<Self> {
        let (width, height) = (config.window.width.max(1), config.window.height.max(1));
        let render_scale = config.window.render_scale.max(1);
        let camera = PerspectiveCamera::new(config.camera.fov_degrees, 1.0, config.camera.distance);
        let renderer = FieldRenderer::new(config.palette()?, camera, width, height);
        let (fw, fh) = scaled(width, height, render_scale);

        let mut app = Self {
            trail: TrailBuffer::new(config.trail.settings()),
            sampler: PointerSampler::new(width, height),
            renderer,
            clock,
            frame: FrameBuffer::new(fw, fh),
            viewport: (width, height),
            render_scale,
            hidden: false,
            wake_armed: true,
            frames: 0,
        };
        info!("surface {width}x{height}, render buffer {fw}x{fh}");
        app.render();
        Ok(app)
    }

    /// One animation frame: age the trail, advance the clock, shade the surface.
    pub fn render(&mut self) {
        let dt = self.clock.delta().min(MAX_FRAME_DT);
        self.trail.tick();
        self.renderer.update(dt);
        self.renderer.draw(self.trail.field(), &mut self.frame);
        self.frames += 1;
    }

    /// React to one host event. Returns true if it caused an immediate render.
    pub fn handle(&mut self, event: HostEvent) -> bool {
        match event {
            // a hidden surface gets no pointer input; nothing would age those samples
            HostEvent::PointerMove { .. } | HostEvent::TouchMove { .. } if self.hidden => false,
            HostEvent::PointerMove { x, y } => {
                self.sampler.pointer_move(&mut self.trail, x, y);
                self.wake()
            }
            HostEvent::TouchMove { touches } => {
                self.sampler.touch_move(&mut self.trail, &touches);
                false
            }
            HostEvent::TouchStart | HostEvent::Click => self.wake(),
            HostEvent::Resize { width, height } => {
                self.resize(width, height);
                false
            }
            HostEvent::VisibilityChanged { hidden } => {
                self.hidden = hidden;
                if hidden {
                    debug!("surface hidden");
                    self.wake_armed = true;
                    false
                } else {
                    debug!("surface visible again");
                    self.render();
                    true
                }
            }
        }
    }

    /// First interaction after start, or after the surface was hidden, repaints
    /// once; the hook is then spent until the next hide.
    fn wake(&mut self) -> bool {
        if self.hidden || !self.wake_armed {
            return false;
        }
        self.wake_armed = false;
        self.render();
        true
    }

    fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if (width, height) == self.viewport {
            return;
        }
        self.viewport = (width, height);
        self.sampler.set_viewport(width, height);
        self.renderer.on_resize(width, height);
        let (fw, fh) = scaled(width, height, self.render_scale);
        self.frame.resize(fw, fh);
    }

    /// Latest shaded frame (internal resolution).
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    pub fn renderer(&self) -> &FieldRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut FieldRenderer {
        &mut self.renderer
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Frames rendered since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

fn scaled(width: u32, height: u32, scale: u32) -> (usize, usize) {
    (((width / scale).max(1)) as usize, ((height / scale).max(1)) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.window.width = 64;
        cfg.window.height = 48;
        cfg.window.render_scale = 2;
        cfg
    }

    fn app() -> App<FixedStep> {
        App::new(&small_config(), FixedStep(1.0 / 60.0)).unwrap()
    }

    #[test]
    fn renders_on_construction() {
        let app = app();
        assert_eq!(app.frames(), 1);
        assert_eq!((app.frame().width, app.frame().height), (32, 24));
        assert!(app.frame().pixels.iter().any(|&p| p != 0));
    }

    #[test]
    fn first_interaction_wakes_once() {
        let mut app = app();
        assert!(app.handle(HostEvent::Click));
        assert!(!app.handle(HostEvent::TouchStart));
        assert!(!app.handle(HostEvent::PointerMove { x: 3.0, y: 4.0 }));
        assert_eq!(app.frames(), 2);
    }

    #[test]
    fn pointer_wake_sees_the_new_sample() {
        let mut app = app();
        assert!(app.handle(HostEvent::PointerMove { x: 32.0, y: 24.0 }));
        // sample was added before the wake-up frame aged it
        assert_eq!(app.trail().samples().len(), 1);
        assert_eq!(app.trail().samples()[0].age, 1);
    }

    #[test]
    fn becoming_visible_renders_immediately() {
        let mut app = app();
        assert!(!app.handle(HostEvent::VisibilityChanged { hidden: true }));
        assert!(app.is_hidden());
        assert!(app.handle(HostEvent::VisibilityChanged { hidden: false }));
        assert!(!app.is_hidden());
        assert_eq!(app.frames(), 2);
    }

    #[test]
    fn hidden_surface_ignores_pointer_input() {
        let mut app = app();
        app.handle(HostEvent::VisibilityChanged { hidden: true });
        for i in 0..500 {
            let x = (i % 60) as f32 + 1.0;
            assert!(!app.handle(HostEvent::PointerMove { x, y: 10.0 + (i / 60) as f32 }));
            app.handle(HostEvent::TouchMove { touches: vec![Vec2::new(x, 5.0)] });
        }
        assert!(!app.handle(HostEvent::Click));
        assert!(app.trail().samples().is_empty());
        assert_eq!(app.frames(), 1);

        app.handle(HostEvent::VisibilityChanged { hidden: false });
        assert!(app.trail().samples().is_empty());
        app.handle(HostEvent::PointerMove { x: 3.0, y: 4.0 });
        assert_eq!(app.trail().samples().len(), 1);
    }

    #[test]
    fn wake_hook_rearms_after_hide() {
        let mut app = app();
        assert!(app.handle(HostEvent::Click));
        assert!(!app.handle(HostEvent::Click));
        app.handle(HostEvent::VisibilityChanged { hidden: true });
        app.handle(HostEvent::VisibilityChanged { hidden: false });
        let frames = app.frames();
        assert!(app.handle(HostEvent::TouchStart));
        assert!(!app.handle(HostEvent::Click));
        assert_eq!(app.frames(), frames + 1);
    }

    #[test]
    fn large_clock_gaps_are_clamped() {
        let mut app = App::new(&small_config(), FixedStep(3.0)).unwrap();
        app.render();
        assert!((app.renderer().time() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn resize_reallocates_the_frame() {
        let mut app = app();
        app.handle(HostEvent::Resize { width: 200, height: 100 });
        assert_eq!(app.viewport(), (200, 100));
        assert_eq!((app.frame().width, app.frame().height), (100, 50));
        assert_eq!(app.renderer().resolution(), Vec2::new(200.0, 100.0));
    }

    #[test]
    fn empty_touch_is_ignored() {
        let mut app = app();
        app.handle(HostEvent::TouchMove { touches: vec![] });
        assert!(app.trail().samples().is_empty());
        app.handle(HostEvent::TouchMove { touches: vec![Vec2::new(10.0, 10.0)] });
        assert_eq!(app.trail().samples().len(), 1);
    }
}
