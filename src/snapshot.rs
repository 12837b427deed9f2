// PNG export of a rendered frame or of the trail field.
// Useful to inspect the output without a window (headless mode).

use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::error::{Error, Result};
use crate::types::{FieldGrid, FrameBuffer, unpack_rgb};

/// 0x00RRGGBB pixels -> 8-bit RGB image.
pub fn frame_to_image(fb: &FrameBuffer) -> RgbImage {
    ImageBuffer::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let (r, g, b) = unpack_rgb(fb.get(x as usize, y as usize));
        Rgb([r, g, b])
    })
}

/// Field texels as stored (R, G = encoded direction, B = intensity), top row first.
pub fn field_to_image(field: &FieldGrid) -> RgbImage {
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    ImageBuffer::from_fn(field.size as u32, field.size as u32, |x, y| {
        let t = field.texel(x as usize, y as usize);
        Rgb([q(t.r), q(t.g), q(t.b)])
    })
}

pub fn save_frame_png(fb: &FrameBuffer, path: impl AsRef<Path>) -> Result<()> {
    save(&frame_to_image(fb), path.as_ref())
}

pub fn save_field_png(field: &FieldGrid, path: impl AsRef<Path>) -> Result<()> {
    save(&field_to_image(field), path.as_ref())
}

fn save(img: &RgbImage, path: &Path) -> Result<()> {
    img.save(path).map_err(|e| Error::Snapshot(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Texel;

    #[test]
    fn frame_pixels_map_one_to_one() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.pixels[4] = 0x00FF_8000; // (1, 1)
        let img = frame_to_image(&fb);
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(1, 1), &Rgb([0xFF, 0x80, 0x00]));
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn field_channels_are_quantised() {
        let mut field = FieldGrid::new(2);
        field.texels[1] = Texel::encode(1.0, -1.0, 0.5);
        let img = field_to_image(&field);
        assert_eq!(img.get_pixel(1, 0), &Rgb([0, 255, 128]));
    }

    #[test]
    fn unwritable_path_is_a_snapshot_error() {
        let fb = FrameBuffer::new(1, 1);
        let err = save_frame_png(&fb, "/nonexistent-dir/for/sure/out.png").unwrap_err();
        assert!(matches!(err, Error::Snapshot(_)));
    }
}
