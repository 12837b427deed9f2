// Pointer-reactive animated gradient background.
//
// Pointer moves leave a decaying trail (`trail::TrailBuffer`) that is
// redrawn into a small direction/intensity grid every frame; the
// `renderer::FieldRenderer` uses that grid to warp an animated
// multi-centre colour gradient. `app::App` ties the two to a frame clock.

pub mod app;
pub mod brush;
pub mod camera;
pub mod config;
pub mod draw;
pub mod error;
pub mod gradient;
pub mod palette;
pub mod pointer;
pub mod renderer;
pub mod snapshot;
pub mod trail;
pub mod types;

pub use app::{App, FixedStep, FrameClock, HostEvent, SystemClock};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use palette::{Palette, Param};
pub use renderer::FieldRenderer;
pub use trail::{Sample, TrailBuffer};
