//! Software surfaces and frame composition helpers.
//!
//! Frames are plain `0x00RRGGBB` pixel buffers composed on the CPU. Title
//! text arrives as a pre-rendered alpha mask (glyph rasterisation is a
//! content-loading concern) and is tinted at composite time, which is what
//! makes the yellow-highlight fade a pure colour blend.

/// Horizontal scroll speed of the title text, in pixels per second.
pub const SCROLL_SPEED_PX: f64 = 160.0;
/// Duration of the yellow-highlight fade after a tool reset, in seconds.
pub const HIGHLIGHT_FADE_SECS: f64 = 0.5;
/// Title colour while the post-reset highlight is active.
pub const TITLE_HIGHLIGHT: u32 = 0x00FF_CD00;
/// Steady title colour.
pub const TITLE_STEADY: u32 = 0x00FF_FFFF;
/// Fixed placement of the description panel.
pub const DESCRIPTION_X: i32 = 10;
pub const DESCRIPTION_Y: i32 = 73;

/// An owned RGB pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: usize,
    height: usize,
    data: Vec<u32>,
}

impl Surface {
    /// Creates a black surface of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0)
    }

    /// Creates a surface filled with a solid colour.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self {
            width,
            height,
            data: vec![color; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn fill(&mut self, color: u32) {
        self.data.fill(color);
    }

    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.data[y * self.width + x]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        self.data[y * self.width + x] = color;
    }

    /// Copies `src` onto this surface at `(x, y)`, clipping at the borders.
    pub fn blit(&mut self, src: &Surface, x: i32, y: i32) {
        for (sy, dy) in clipped_span(src.height, y, self.height) {
            for (sx, dx) in clipped_span(src.width, x, self.width) {
                self.data[dy * self.width + dx] = src.data[sy * src.width + sx];
            }
        }
    }

    /// Replaces this surface's pixels with `src`'s. Mismatched dimensions
    /// degrade to a clipped blit at the origin.
    pub fn copy_from(&mut self, src: &Surface) {
        if self.width == src.width && self.height == src.height {
            self.data.copy_from_slice(&src.data);
        } else {
            self.blit(src, 0, 0);
        }
    }
}

/// Pre-rendered text raster: per-pixel coverage with no colour of its own.
#[derive(Debug, Clone)]
pub struct GlyphMask {
    width: usize,
    height: usize,
    alpha: Vec<u8>,
}

impl GlyphMask {
    /// Builds a mask from raw coverage values; `alpha` must hold
    /// `width * height` entries.
    pub fn from_alpha(width: usize, height: usize, alpha: Vec<u8>) -> Self {
        debug_assert_eq!(alpha.len(), width * height);
        Self {
            width,
            height,
            alpha,
        }
    }

    /// A fully opaque rectangular mask.
    pub fn solid(width: usize, height: usize) -> Self {
        Self::from_alpha(width, height, vec![255; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn alpha_at(&self, x: usize, y: usize) -> u8 {
        self.alpha[y * self.width + x]
    }
}

/// Composites a tinted mask onto `dst` at `(x, y)` with alpha blending,
/// clipping at the borders.
pub fn blit_mask(dst: &mut Surface, mask: &GlyphMask, x: i32, y: i32, color: u32) {
    for (sy, dy) in clipped_span(mask.height, y, dst.height) {
        for (sx, dx) in clipped_span(mask.width, x, dst.width) {
            let a = mask.alpha[sy * mask.width + sx];
            if a == 0 {
                continue;
            }
            let under = dst.data[dy * dst.width + dx];
            dst.data[dy * dst.width + dx] = if a == 255 {
                color
            } else {
                lerp_color(under, color, a as f32 / 255.0)
            };
        }
    }
}

/// Linear per-channel blend from `a` to `b`; `t` is clamped to `[0, 1]`.
pub fn lerp_color(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |shift: u32| -> u32 {
        let ca = ((a >> shift) & 0xFF) as f32;
        let cb = ((b >> shift) & 0xFF) as f32;
        ((ca + (cb - ca) * t) as u32) << shift
    };
    channel(16) | channel(8) | channel(0)
}

/// Horizontal position of the scrolling title at time `now`.
///
/// The scroll span is `title_width + frame_width / 2`, so the title leaves a
/// half-frame gap before re-entering from the right.
pub fn scroll_x(now: f64, title_width: usize, frame_width: usize) -> i32 {
    let span = (title_width + frame_width / 2) as f64;
    frame_width as i32 - ((now * SCROLL_SPEED_PX) % span) as i32
}

/// Position of the wraparound ghost copy, if it would still be partly
/// on-screen.
pub fn ghost_x(x: i32, title_width: usize, frame_width: usize) -> Option<i32> {
    let gx = x - title_width as i32 - (frame_width / 2) as i32;
    (gx + title_width as i32 > 0).then_some(gx)
}

/// Iterator over `(src, dst)` index pairs for one axis of a clipped blit.
fn clipped_span(src_len: usize, offset: i32, dst_len: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..src_len).filter_map(move |s| {
        let d = offset + s as i32;
        (d >= 0 && (d as usize) < dst_len).then_some((s, d as usize))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blit_clips_at_all_borders() {
        let mut dst = Surface::new(4, 4);
        let src = Surface::filled(3, 3, 0xABCDEF);
        dst.blit(&src, -1, -1);
        dst.blit(&src, 3, 3);
        assert_eq!(dst.pixel(0, 0), 0xABCDEF);
        assert_eq!(dst.pixel(1, 1), 0xABCDEF);
        assert_eq!(dst.pixel(2, 2), 0);
        assert_eq!(dst.pixel(3, 3), 0xABCDEF);
    }

    #[test]
    fn mask_blit_tints_covered_pixels_only() {
        let mut dst = Surface::new(4, 2);
        let mut alpha = vec![0u8; 8];
        alpha[0] = 255;
        alpha[1] = 128;
        let mask = GlyphMask::from_alpha(4, 2, alpha);
        blit_mask(&mut dst, &mask, 0, 0, 0x00FF_FFFF);
        assert_eq!(dst.pixel(0, 0), 0x00FF_FFFF);
        assert_ne!(dst.pixel(1, 0), 0);
        assert_ne!(dst.pixel(1, 0), 0x00FF_FFFF);
        assert_eq!(dst.pixel(2, 0), 0);
    }

    #[test]
    fn color_blend_is_monotonic_and_saturates() {
        let mut last = 0;
        for step in 0..=10 {
            let t = step as f32 / 10.0;
            let c = lerp_color(TITLE_HIGHLIGHT, TITLE_STEADY, t);
            let blue = c & 0xFF;
            assert!(blue >= last, "blue channel must not decrease");
            last = blue;
        }
        assert_eq!(lerp_color(TITLE_HIGHLIGHT, TITLE_STEADY, 1.0), TITLE_STEADY);
        assert_eq!(lerp_color(TITLE_HIGHLIGHT, TITLE_STEADY, 7.5), TITLE_STEADY);
    }

    #[test]
    fn ghost_copy_appears_iff_past_half_frame() {
        let title_w = 50;
        let frame_w = 240;
        // x == frame_w/2 leaves the ghost exactly off-screen.
        assert_eq!(ghost_x(120, title_w, frame_w), None);
        assert_eq!(ghost_x(121, title_w, frame_w), Some(121 - 50 - 120));
        assert_eq!(ghost_x(0, title_w, frame_w), None);
    }

    #[test]
    fn scroll_position_wraps_within_span() {
        let title_w = 50;
        let frame_w = 240;
        let span = (title_w + frame_w / 2) as i32;
        for step in 0..400 {
            let now = step as f64 * 0.01;
            let x = scroll_x(now, title_w, frame_w);
            assert!(x > frame_w as i32 - span && x <= frame_w as i32);
        }
    }
}
