// Desktop host for the gradient background.
// • Move the mouse: the gradient bends and ripples along your trail.
// • E prints the colour scheme. ESC quits.
// • With --snapshot the frames are rendered headless and the last one saved as PNG.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{debug, info};

use touch_gradient::draw::Drawer;
use touch_gradient::snapshot::{save_field_png, save_frame_png};
use touch_gradient::{App, AppConfig, FixedStep, HostEvent, Result, SystemClock};

#[derive(Parser, Debug)]
#[command(name = "touch-gradient")]
#[command(version, about = "Animated gradient background that follows the pointer", long_about = None)]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Shade at 1/N of the window resolution
    #[arg(long)]
    render_scale: Option<u32>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Render headless and write the last frame to this PNG
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Frames to render in headless mode
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Drag a synthetic pointer across the middle during headless rendering
    #[arg(long)]
    swipe: bool,

    /// Also write the trail field grid after headless rendering
    #[arg(long)]
    dump_field: Option<PathBuf>,

    /// Print the colour scheme and exit
    #[arg(long)]
    print_palette: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(w) = args.width {
        config.window.width = w;
    }
    if let Some(h) = args.height {
        config.window.height = h;
    }
    if let Some(s) = args.render_scale {
        config.window.render_scale = s;
    }

    if args.print_palette {
        println!("{}", config.palette()?.export_text());
        return Ok(());
    }

    if args.snapshot.is_some() || args.dump_field.is_some() {
        return run_headless(&config, &args);
    }
    run_window(&config)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run_headless(config: &AppConfig, args: &Args) -> Result<()> {
    let mut app = App::new(config, FixedStep(1.0 / 60.0))?;
    let (w, h) = app.viewport();
    let frames = args.frames.max(1);
    let swipe_frames = swipe_length(frames);

    for i in 0..frames {
        if args.swipe && i < swipe_frames {
            let t = i as f32 / swipe_frames.max(1) as f32;
            let x = w as f32 * (0.2 + 0.6 * t);
            let y = h as f32 * (0.5 + 0.1 * (t * std::f32::consts::TAU).sin());
            app.handle(HostEvent::PointerMove { x, y });
        }
        app.render();
    }
    info!("rendered {} frames headless, t = {:.2}s", app.frames(), app.renderer().time());

    if let Some(path) = &args.snapshot {
        save_frame_png(app.frame(), path)?;
        info!("frame written to {}", path.display());
    }
    if let Some(path) = &args.dump_field {
        save_field_png(app.trail().field(), path)?;
        info!("trail field written to {}", path.display());
    }
    Ok(())
}

/// A left-to-right drag across the first two thirds of the run.
fn swipe_length(frames: u32) -> u32 {
    frames / 3 * 2
}

fn run_window(config: &AppConfig) -> Result<()> {
    let win = &config.window;
    let mut drawer = Drawer::new(&win.title, win.width as usize, win.height as usize)?;
    let mut app = App::new(config, SystemClock::new())?;

    let mut last_mouse: Option<(f32, f32)> = None;
    let mut was_active = true;

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let (w, h) = drawer.size();
        app.handle(HostEvent::Resize { width: w as u32, height: h as u32 });

        if win.pause_when_inactive {
            let active = drawer.is_active();
            if active != was_active {
                app.handle(HostEvent::VisibilityChanged { hidden: !active });
                was_active = active;
            }
        }

        if let Some(pos) = drawer.mouse_pos() {
            if last_mouse != Some(pos) {
                app.handle(HostEvent::PointerMove { x: pos.0, y: pos.1 });
                last_mouse = Some(pos);
            }
        }
        if drawer.clicked() {
            app.handle(HostEvent::Click);
        }
        if drawer.export_pressed() {
            println!("{}", app.renderer().palette().export_text());
        }

        if app.is_hidden() {
            drawer.idle();
            continue;
        }
        app.render();
        drawer.present(app.frame())?;

        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            debug!("FPS: {:.1}", frames_this_second as f32 / secs);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_covers_two_thirds_without_overflow() {
        assert_eq!(swipe_length(120), 80);
        assert_eq!(swipe_length(1), 0);
        assert_eq!(swipe_length(u32::MAX), u32::MAX / 3 * 2);
    }
}
