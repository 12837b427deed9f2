use glam::Vec2;
use touch_gradient::types::{FieldGrid, FrameBuffer};
use touch_gradient::{App, AppConfig, FixedStep, HostEvent, TrailBuffer};

// ── Helpers ──────────────────────────────────────────────────────

fn config(width: u32, height: u32, scale: u32) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.window.width = width;
    cfg.window.height = height;
    cfg.window.render_scale = scale;
    cfg
}

fn app(width: u32, height: u32) -> App<FixedStep> {
    App::new(&config(width, height, 4), FixedStep(1.0 / 60.0)).unwrap()
}

// ── 1. Trail from a short horizontal drag ────────────────────────

#[test]
fn horizontal_drag_leaves_rightward_trail() {
    let mut trail = TrailBuffer::default();
    for x in [0.5, 0.52, 0.54] {
        trail.add_sample(Vec2::new(x, 0.5));
        trail.tick();
    }

    let moving: Vec<_> = trail.samples().iter().filter(|s| s.force > 0.0).collect();
    assert_eq!(trail.samples().len(), 3);
    assert_eq!(moving.len(), 2);
    for s in &moving {
        assert!((s.vx - 1.0).abs() < 1e-5);
        assert!(s.vy.abs() < 1e-5);
    }

    let touch = trail.field().sample(0.52, 0.5);
    assert!(touch.intensity > 0.05, "intensity {}", touch.intensity);
    assert!((touch.vx - 1.0).abs() < 1e-3);
    assert!(touch.vy.abs() < 1e-3);
    // nothing reaches the far left edge
    assert_eq!(trail.field().sample(0.0, 0.5).intensity, 0.0);
}

#[test]
fn trail_fades_out_completely() {
    let mut trail = TrailBuffer::default();
    for x in [0.5, 0.52, 0.54] {
        trail.add_sample(Vec2::new(x, 0.5));
        trail.tick();
    }
    let mut totals = Vec::new();
    for _ in 0..80 {
        trail.tick();
        totals.push(trail.field().texels.iter().map(|t| t.b).sum::<f32>());
    }
    let peak = totals.iter().cloned().fold(0.0, f32::max);
    let peak_at = totals.iter().position(|&t| t == peak).unwrap();
    assert!(peak > 0.0);
    // still rising right after the drag, gone long before the end
    assert!(peak_at > 0);
    assert_eq!(*totals.last().unwrap(), 0.0);
    assert!(trail.samples().is_empty());
    assert!(trail.field().is_clear());
}

// ── 2. Same drag driven through the host context ─────────────────

#[test]
fn pointer_events_reach_the_trail_and_the_picture() {
    let mut app = app(100, 100);
    app.handle(HostEvent::PointerMove { x: 50.0, y: 50.0 });
    app.render();
    app.handle(HostEvent::PointerMove { x: 52.0, y: 50.0 });
    app.render();
    app.handle(HostEvent::PointerMove { x: 54.0, y: 50.0 });

    let samples = app.trail().samples();
    assert_eq!(samples.len(), 3);
    assert_eq!(samples.iter().filter(|s| s.force > 0.0).count(), 2);
    app.render();

    let (w, h) = (app.frame().width, app.frame().height);
    let mut with_trail = FrameBuffer::new(w, h);
    let mut without = FrameBuffer::new(w, h);
    app.renderer().draw(app.trail().field(), &mut with_trail);
    app.renderer().draw(&FieldGrid::new(64), &mut without);
    assert_ne!(with_trail.pixels, without.pixels);
}

#[test]
fn repeated_pointer_position_adds_nothing() {
    let mut app = app(100, 100);
    app.handle(HostEvent::PointerMove { x: 10.0, y: 10.0 });
    app.handle(HostEvent::PointerMove { x: 10.0, y: 10.0 });
    app.handle(HostEvent::PointerMove { x: 10.0, y: 10.0 });
    assert_eq!(app.trail().samples().len(), 1);
}

// ── 3. Resize ────────────────────────────────────────────────────

#[test]
fn resize_rebuilds_geometry_for_new_aspect() {
    let mut app = app(320, 240);
    app.handle(HostEvent::Resize { width: 800, height: 600 });
    let plane = app.renderer().plane();
    assert!((plane.width / plane.height - 800.0 / 600.0).abs() < 1e-5);

    app.handle(HostEvent::Resize { width: 1920, height: 1080 });
    let plane = app.renderer().plane();
    assert!((plane.width / plane.height - 16.0 / 9.0).abs() < 1e-5);
    assert_eq!(app.renderer().resolution(), Vec2::new(1920.0, 1080.0));
    assert_eq!((app.frame().width, app.frame().height), (480, 270));
}

#[test]
fn pointer_mapping_follows_resize() {
    let mut app = app(100, 100);
    app.handle(HostEvent::Resize { width: 400, height: 200 });
    app.handle(HostEvent::PointerMove { x: 100.0, y: 50.0 });
    assert_eq!(app.trail().last(), Some(Vec2::new(0.25, 0.75)));
}

// ── 4. Tuning ────────────────────────────────────────────────────

#[test]
fn palette_tuning_takes_effect_next_frame() {
    let mut app = app(64, 64);
    let before = app.frame().pixels.clone();
    let palette = app.renderer_mut().palette_mut();
    for i in 0..6 {
        palette.set_color(i, [0.0, 0.0, 0.0]).unwrap();
    }
    palette.grain_intensity = 0.0;
    app.render();
    assert!(app.frame().pixels.iter().all(|&p| p == 0));
    assert_ne!(before, app.frame().pixels);
}
