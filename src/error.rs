// One error type for the whole crate. Every variant states *where* things went wrong.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Pushing a frame to the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// Reading or parsing the TOML config failed
    #[error("Config error: {0}")]
    Config(String),

    /// A colour string was not `#RRGGBB`
    #[error("Invalid hex colour: {0:?}")]
    InvalidHex(String),

    /// Palette slots are numbered 0..6
    #[error("Palette index {0} out of range (expected 0..6)")]
    PaletteIndex(usize),

    /// Encoding or writing a PNG snapshot failed
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
