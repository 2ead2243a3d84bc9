use image::{Rgb, RgbImage, Rgba, RgbaImage};

use crate::font::{TextMask, TextRenderer};

/// The literal every icon carries.
pub const ICON_TEXT: &str = "ZEN";

pub const BACKGROUND: [u8; 3] = [0xFF, 0x00, 0x00];
pub const TEXT_COLOR: [u8; 3] = [0xFF, 0xFF, 0xFF];
pub const SHADOW_COLOR: [u8; 3] = [0xCC, 0x00, 0x00];

/// Master icon geometry.
pub const MASTER_SIZE: u32 = 1024;
pub const MASTER_FONT_PX: u32 = 380;
pub const MASTER_CORNER_RADIUS: u32 = 180;
const MASTER_TEXT_LIFT: i32 = 30;
const MASTER_SHADOW_OFFSET: i32 = 8;

/// Extension icons only get a shadow where it stays legible.
pub const SHADOW_MIN_SIZE: u32 = 48;

/// Render the 1024x1024 master icon: centered text with a shadow on
/// the solid background, squared off with a rounded-corner alpha mask.
pub fn generate_master_icon(renderer: &mut TextRenderer) -> RgbaImage {
    let mut img = RgbImage::from_pixel(MASTER_SIZE, MASTER_SIZE, Rgb(BACKGROUND));
    let mask = renderer.render(ICON_TEXT, MASTER_FONT_PX);
    let x = (MASTER_SIZE as i32 - mask.width as i32) / 2;
    let y = (MASTER_SIZE as i32 - mask.height as i32) / 2 - MASTER_TEXT_LIFT;
    blit_mask(
        &mut img,
        &mask,
        x + MASTER_SHADOW_OFFSET,
        y + MASTER_SHADOW_OFFSET,
        SHADOW_COLOR,
    );
    blit_mask(&mut img, &mask, x, y, TEXT_COLOR);
    round_corners(&img, MASTER_CORNER_RADIUS)
}

/// Render one extension icon. Same centering rule as the master, but
/// opaque RGB output and no rounded corners; the shadow is skipped
/// below [`SHADOW_MIN_SIZE`].
pub fn generate_extension_icon(renderer: &mut TextRenderer, size: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(size, size, Rgb(BACKGROUND));
    let mask = renderer.render(ICON_TEXT, (size as f32 * 0.37) as u32);
    let x = (size as i32 - mask.width as i32) / 2;
    let y = (size as i32 - mask.height as i32) / 2 - (size as f32 * 0.03) as i32;
    if size >= SHADOW_MIN_SIZE {
        let off = ((size as f32 * 0.008) as i32).max(1);
        blit_mask(&mut img, &mask, x + off, y + off, SHADOW_COLOR);
    }
    blit_mask(&mut img, &mask, x, y, TEXT_COLOR);
    img
}

/// Alpha-blend a coverage mask onto the canvas at (left, top),
/// clipping at the edges.
fn blit_mask(img: &mut RgbImage, mask: &TextMask, left: i32, top: i32, color: [u8; 3]) {
    for my in 0..mask.height {
        for mx in 0..mask.width {
            let a = mask.coverage[(my * mask.width + mx) as usize];
            if a == 0 {
                continue;
            }
            let px = left + mx as i32;
            let py = top + my as i32;
            if px < 0 || py < 0 || px >= img.width() as i32 || py >= img.height() as i32 {
                continue;
            }
            let p = img.get_pixel_mut(px as u32, py as u32);
            p.0[0] = blend(p.0[0], color[0], a);
            p.0[1] = blend(p.0[1], color[1], a);
            p.0[2] = blend(p.0[2], color[2], a);
        }
    }
}

#[inline]
fn blend(dst: u8, src: u8, a: u8) -> u8 {
    let a = a as u32;
    ((src as u32 * a + dst as u32 * (255 - a) + 127) / 255) as u8
}

/// Copy the canvas into an RGBA image whose alpha is 255 inside the
/// rounded rectangle and 0 outside.
fn round_corners(img: &RgbImage, radius: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let mut out = RgbaImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let Rgb([r, g, b]) = *img.get_pixel(x, y);
            let a = if in_rounded_rect(x, y, w, h, radius) { 255 } else { 0 };
            out.put_pixel(x, y, Rgba([r, g, b, a]));
        }
    }
    out
}

fn in_rounded_rect(x: u32, y: u32, w: u32, h: u32, radius: u32) -> bool {
    let r = radius as i64;
    let x = x as i64;
    let y = y as i64;
    let cx = if x < r {
        r
    } else if x > w as i64 - 1 - r {
        w as i64 - 1 - r
    } else {
        return true;
    };
    let cy = if y < r {
        r
    } else if y > h as i64 - 1 - r {
        h as i64 - 1 - r
    } else {
        return true;
    };
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= r * r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_icon_dimensions_and_corners() {
        let mut renderer = TextRenderer::builtin();
        let img = generate_master_icon(&mut renderer);
        assert_eq!(img.dimensions(), (MASTER_SIZE, MASTER_SIZE));
        let last = MASTER_SIZE - 1;
        for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
            assert_eq!(img.get_pixel(x, y).0[3], 0);
        }
        // Inside the rounded region the canvas is opaque and the
        // background color is intact away from the text.
        assert_eq!(img.get_pixel(MASTER_SIZE / 2, MASTER_SIZE / 2).0[3], 255);
        assert_eq!(img.get_pixel(MASTER_SIZE / 2, 40).0, [0xFF, 0x00, 0x00, 0xFF]);
    }

    #[test]
    fn test_rounded_region_boundary() {
        assert!(in_rounded_rect(512, 512, 1024, 1024, 180));
        assert!(in_rounded_rect(180, 180, 1024, 1024, 180));
        assert!(!in_rounded_rect(0, 0, 1024, 1024, 180));
        // Corner diagonal: (53,53) is just inside the arc, (52,52)
        // just outside.
        assert!(in_rounded_rect(53, 53, 1024, 1024, 180));
        assert!(!in_rounded_rect(52, 52, 1024, 1024, 180));
    }

    #[test]
    fn test_extension_icon_shadow_rule() {
        let mut renderer = TextRenderer::builtin();
        let small = generate_extension_icon(&mut renderer, 16);
        assert_eq!(small.dimensions(), (16, 16));
        assert!(!small.pixels().any(|p| p.0 == SHADOW_COLOR));

        let large = generate_extension_icon(&mut renderer, 128);
        assert_eq!(large.dimensions(), (128, 128));
        assert!(large.pixels().any(|p| p.0 == SHADOW_COLOR));

        let medium = generate_extension_icon(&mut renderer, 48);
        assert!(medium.pixels().any(|p| p.0 == SHADOW_COLOR));
    }

    #[test]
    fn test_extension_text_is_centered() {
        let mut renderer = TextRenderer::builtin();
        let size = 128u32;
        let img = generate_extension_icon(&mut renderer, size);

        let mut min_x = size;
        let mut max_x = 0;
        let mut min_y = size;
        let mut max_y = 0;
        for (x, y, p) in img.enumerate_pixels() {
            if p.0 != TEXT_COLOR {
                continue;
            }
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        assert!(min_x < max_x, "no text pixels found");

        let left = min_x as i32;
        let right = (size - 1 - max_x) as i32;
        assert!((left - right).abs() <= 1, "left {} right {}", left, right);

        // Vertical centering modulo the deliberate upward lift.
        let lift = (size as f32 * 0.03) as i32;
        let top = min_y as i32 + lift;
        let bottom = (size - 1 - max_y) as i32 - lift;
        assert!((top - bottom).abs() <= 1, "top {} bottom {}", top, bottom);
    }

    #[test]
    fn test_master_text_is_centered() {
        let mut renderer = TextRenderer::builtin();
        let img = generate_master_icon(&mut renderer);

        let mut min_x = MASTER_SIZE;
        let mut max_x = 0;
        for (x, _, p) in img.enumerate_pixels() {
            if p.0 == [0xFF, 0xFF, 0xFF, 0xFF] {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
            }
        }
        let left = min_x as i32;
        let right = (MASTER_SIZE - 1 - max_x) as i32;
        assert!((left - right).abs() <= 1, "left {} right {}", left, right);
    }
}
