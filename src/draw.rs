// Window for the desktop host: shows the shaded frame and reports the
// pointer, the mouse button, focus and size.

use crate::error::Error;
use crate::types::FrameBuffer;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, ScaleMode, Window, WindowOptions};

pub struct Drawer {
    window: Window,
    mouse_was_down: bool,
}

impl Drawer {
    /// Resizable window; smaller frame buffers are stretched to fill it.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions {
            resize: true,
            scale_mode: ScaleMode::Stretch,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window, mouse_was_down: false })
    }

    /// Push the pixels for this frame to the screen (also pumps window events).
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// Pump events without drawing (used while paused).
    pub fn idle(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// E prints the colour scheme.
    pub fn export_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::E, KeyRepeat::No)
    }

    /// Pointer position in window pixels, or None when outside the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    /// True once per left-button press.
    pub fn clicked(&mut self) -> bool {
        let down = self.window.get_mouse_down(MouseButton::Left);
        let clicked = down && !self.mouse_was_down;
        self.mouse_was_down = down;
        clicked
    }

    /// Focus stands in for page visibility.
    pub fn is_active(&mut self) -> bool {
        self.window.is_active()
    }

    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }
}
