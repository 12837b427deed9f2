// Core buffer types shared by the trail, the renderer and the window.

/// Packed 0x00RRGGBB pixels, row-major, row 0 at the top (what minifb expects).
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Reallocate for a new size. Contents are reset to black.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, 0);
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }
}

/// Pack a linear [0,1] RGB triple into 0x00RRGGBB (no gamma, like a raw fragment output).
#[inline]
pub fn pack_rgb(r: f32, g: f32, b: f32) -> u32 {
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    (q(r) << 16) | (q(g) << 8) | q(b)
}

/// Split 0x00RRGGBB into its 8-bit channels.
#[inline]
pub fn unpack_rgb(px: u32) -> (u8, u8, u8) {
    (((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
}

/// One trail-field texel. Channels hold the encoded direction and the intensity:
/// `r = (1 - vx) / 2`, `g = (1 - vy) / 2`, `b = intensity`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Texel {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Direction and strength recovered from a texel, ready for the warp.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchSample {
    pub vx: f32,
    pub vy: f32,
    pub intensity: f32,
}

impl Texel {
    pub const ZERO: Texel = Texel { r: 0.0, g: 0.0, b: 0.0 };

    pub fn encode(vx: f32, vy: f32, intensity: f32) -> Self {
        Self { r: (1.0 - vx) * 0.5, g: (1.0 - vy) * 0.5, b: intensity }
    }

    pub fn decode(self) -> TouchSample {
        TouchSample {
            vx: -(self.r * 2.0 - 1.0),
            vy: -(self.g * 2.0 - 1.0),
            intensity: self.b,
        }
    }
}

/// Square raster backing the pointer trail. Row 0 is the top row, like a 2D canvas.
#[derive(Clone)]
pub struct FieldGrid {
    pub size: usize,
    pub texels: Vec<Texel>,
}

impl FieldGrid {
    pub fn new(size: usize) -> Self {
        Self { size, texels: vec![Texel::ZERO; size * size] }
    }

    pub fn clear(&mut self) {
        self.texels.fill(Texel::ZERO);
    }

    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> Texel {
        self.texels[y * self.size + x]
    }

    pub fn is_clear(&self) -> bool {
        self.texels.iter().all(|t| *t == Texel::ZERO)
    }

    /// Bilinear lookup at surface uv (v points up), clamped to the edge texels.
    pub fn sample(&self, u: f32, v: f32) -> TouchSample {
        let n = self.size;
        if n == 0 {
            return TouchSample::default();
        }
        let max = (n - 1) as f32;
        // texel centres sit at (i + 0.5) / n
        let fx = (u * n as f32 - 0.5).clamp(0.0, max);
        let fy = ((1.0 - v) * n as f32 - 0.5).clamp(0.0, max);
        let x0 = fx.floor() as usize;
        let y0 = fy.floor() as usize;
        let x1 = (x0 + 1).min(n - 1);
        let y1 = (y0 + 1).min(n - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let lerp = |a: Texel, b: Texel, t: f32| Texel {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
        };
        let top = lerp(self.texel(x0, y0), self.texel(x1, y0), tx);
        let bottom = lerp(self.texel(x0, y1), self.texel(x1, y1), tx);
        lerp(top, bottom, ty).decode()
    }
}
