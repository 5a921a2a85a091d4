// File: crates/stockchart-core/src/canvas.rs
// Summary: Fixed-size RGBA8 pixel buffer with bounds-checked writes and raster primitives.
// Notes:
// - Every primitive funnels through `set_pixel`/`blend_pixel`, which drop writes outside
//   the buffer. Scale math may hand us coordinates far off-canvas for extreme data.

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self([r, g, b, 255]) }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self { Self([r, g, b, a]) }
    pub const fn alpha(&self) -> u8 { self.0[3] }
}

/// Dash pattern period for `draw_dashed_line`: `DASH_ON` painted steps then the rest blank.
const DASH_PERIOD: u64 = 10;
const DASH_ON: u64 = 5;

pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelCanvas {
    /// Allocate a `width`×`height` buffer filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        let len = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(len * 4);
        for _ in 0..len {
            pixels.extend_from_slice(&background.0);
        }
        Self { width, height, pixels }
    }

    /// Wrap an existing tightly packed RGBA8 buffer. Returns `None` on a size mismatch.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    /// Tightly packed RGBA8 rows, top to bottom.
    pub fn as_raw(&self) -> &[u8] { &self.pixels }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        let i = self.index(x, y)?;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[i..i + 4]);
        Some(Rgba(px))
    }

    /// Overwrite one pixel. Out-of-range coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&color.0);
        }
    }

    /// Source-over composite of `color` onto one pixel. Out-of-range coordinates are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        let a = color.alpha() as u32;
        if a == 255 {
            return self.set_pixel(x, y, color);
        }
        if a == 0 {
            return;
        }
        if let Some(i) = self.index(x, y) {
            let dst = &mut self.pixels[i..i + 4];
            for c in 0..3 {
                let blended = (color.0[c] as u32 * a + dst[c] as u32 * (255 - a) + 127) / 255;
                dst[c] = blended as u8;
            }
            dst[3] = (a + dst[3] as u32 * (255 - a) / 255).min(255) as u8;
        }
    }

    /// Integer Bresenham line, endpoints inclusive, 8-connected in every octant.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba) {
        let (w, h) = (self.width, self.height);
        walk_line(x1, y1, x2, y2, w, h, |x, y, _| self.blend_pixel(x, y, color));
    }

    /// Same path as `draw_line`, painting 5 steps and skipping 5.
    pub fn draw_dashed_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba) {
        let (w, h) = (self.width, self.height);
        walk_line(x1, y1, x2, y2, w, h, |x, y, step| {
            if step % DASH_PERIOD < DASH_ON {
                self.blend_pixel(x, y, color);
            }
        });
    }

    /// Parallel copies of `draw_line` offset by `-t/2..=t/2` across the dominant axis.
    pub fn draw_thick_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, thickness: i32, color: Rgba) {
        let half = thickness.max(1) / 2;
        let mostly_horizontal = (x2 as i64 - x1 as i64).abs() > (y2 as i64 - y1 as i64).abs();
        for t in -half..=half {
            if mostly_horizontal {
                self.draw_line(x1, y1.saturating_add(t), x2, y2.saturating_add(t), color);
            } else {
                self.draw_line(x1.saturating_add(t), y1, x2.saturating_add(t), y2, color);
            }
        }
    }

    /// Axis-aligned fill. Non-positive sizes draw nothing.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        if w <= 0 || h <= 0 {
            return;
        }
        // Clip to the buffer first so huge rectangles stay cheap.
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + w as i64).min(self.width as i64);
        let y1 = (y as i64 + h as i64).min(self.height as i64);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px as i32, py as i32, color);
            }
        }
    }

    /// Filled disc: every pixel with `dx² + dy² <= r²`.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: Rgba) {
        if r < 0 {
            return;
        }
        let r2 = r as i64 * r as i64;
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx as i64 * dx as i64 + dy as i64 * dy as i64) <= r2 {
                    self.blend_pixel(cx.saturating_add(dx), cy.saturating_add(dy), color);
                }
            }
        }
    }
}

/// Walk the line from (x1, y1) to (x2, y2), calling `plot(x, y, step)` for every step
/// whose major-axis coordinate falls inside a `width`×`height` buffer.
///
/// Step `k` advances the major axis by `k` and the minor axis by `k·d/len` rounded half
/// away from zero, which yields the same 8-connected path as Bresenham's midpoint walk.
/// Because each step is computed directly, off-canvas stretches are skipped rather than
/// walked and the slope is exact for any i32 endpoints. `step` counts from (x1, y1), so
/// dash phase does not depend on clipping.
fn walk_line(x1: i32, y1: i32, x2: i32, y2: i32, width: u32, height: u32, mut plot: impl FnMut(i32, i32, u64)) {
    let (x1, y1, x2, y2) = (x1 as i64, y1 as i64, x2 as i64, y2 as i64);
    let (dx, dy) = (x2 - x1, y2 - y1);
    let x_major = dx.abs() >= dy.abs();
    let (a1, da, b1, db, limit) = if x_major {
        (x1, dx, y1, dy, width as i64)
    } else {
        (y1, dy, x1, dx, height as i64)
    };
    let len = da.abs();
    if len == 0 {
        plot(x1 as i32, y1 as i32, 0);
        return;
    }
    let sa = da.signum();
    // steps whose major coordinate lies in 0..limit
    let (lo, hi) = if sa > 0 { (-a1, limit - 1 - a1) } else { (a1 - (limit - 1), a1) };
    let (k_lo, k_hi) = (lo.max(0), hi.min(len));
    if k_lo > k_hi {
        return;
    }
    let (len2, mag2) = (2 * len as i128, 2 * db.unsigned_abs() as i128);
    for k in k_lo..=k_hi {
        let minor = ((k as i128 * mag2 + len as i128) / len2) as i64 * db.signum();
        let a = a1 + sa * k;
        let b = b1 + minor;
        let (x, y) = if x_major { (a, b) } else { (b, a) };
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            plot(x, y, k as u64);
        }
    }
}
