use std::fs;

use cosmic_text::{
    Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache, Weight,
};

use crate::logger::log_line;

/// Ordered font candidates: the macOS fonts the icons were designed
/// with, then common Linux/Windows fallbacks.
pub const FONT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFCompact.ttf",
    "/System/Library/Fonts/SFNS.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A tightly cropped text coverage buffer. `coverage[y * width + x]`
/// holds the text opacity at that pixel; the edges of the buffer touch
/// ink on all four sides.
pub struct TextMask {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

impl TextMask {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

enum Backend {
    System {
        font_system: FontSystem,
        swash: SwashCache,
        family: String,
    },
    Builtin,
}

/// Renders text into coverage masks using the first loadable candidate
/// font, falling back to the built-in bitmap font.
pub struct TextRenderer {
    backend: Backend,
}

impl TextRenderer {
    /// Probe the candidate list in order. Never fails: a host without
    /// any of the candidate fonts gets the built-in font.
    pub fn probe() -> Self {
        for path in FONT_CANDIDATES {
            let Ok(data) = fs::read(path) else { continue };
            match load_system_font(data) {
                Some((font_system, family)) => {
                    log_line(&format!("Font loaded: {} ({})", family, path));
                    return Self {
                        backend: Backend::System {
                            font_system,
                            swash: SwashCache::new(),
                            family,
                        },
                    };
                }
                None => log_line(&format!("Font rejected: {}", path)),
            }
        }
        log_line("No candidate font found, using builtin font");
        Self::builtin()
    }

    /// Built-in bitmap font only. Deterministic on every host.
    pub fn builtin() -> Self {
        Self {
            backend: Backend::Builtin,
        }
    }

    /// Family name of the probed font, if one loaded.
    pub fn family(&self) -> Option<&str> {
        match &self.backend {
            Backend::System { family, .. } => Some(family),
            Backend::Builtin => None,
        }
    }

    /// Render `text` at roughly `font_px` pixels tall and crop the
    /// result to its ink bounding box.
    pub fn render(&mut self, text: &str, font_px: u32) -> TextMask {
        let raster = match &mut self.backend {
            Backend::System {
                font_system,
                swash,
                family,
            } => raster_system(font_system, swash, family, text, font_px),
            Backend::Builtin => raster_builtin(text, font_px),
        };
        crop_to_ink(raster)
    }
}

fn load_system_font(data: Vec<u8>) -> Option<(FontSystem, String)> {
    let mut font_system = FontSystem::new();
    let before = font_system.db().faces().count();
    font_system.db_mut().load_font_data(data);
    let family = font_system
        .db()
        .faces()
        .nth(before)
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone())?;
    Some((font_system, family))
}

fn raster_system(
    font_system: &mut FontSystem,
    swash: &mut SwashCache,
    family: &str,
    text: &str,
    font_px: u32,
) -> TextMask {
    // Generous scratch canvas; cropped to ink afterwards.
    let width = (text.chars().count().max(1) as u32 + 2) * font_px;
    let height = font_px * 3;
    let mut coverage = vec![0u8; (width * height) as usize];

    let metrics = Metrics::new(font_px as f32, font_px as f32 * 1.2);
    let mut buffer = Buffer::new(font_system, metrics);
    buffer.set_size(font_system, Some(width as f32), Some(height as f32));
    let attrs = Attrs::new().family(Family::Name(family)).weight(Weight::BOLD);
    buffer.set_text(font_system, text, attrs, Shaping::Advanced);
    buffer.shape_until_scroll(font_system, false);
    buffer.draw(font_system, swash, Color::rgb(255, 255, 255), |x, y, w, h, color| {
        let alpha = color.a();
        if alpha == 0 {
            return;
        }
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                let px = x + dx;
                let py = y + dy;
                if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                    continue;
                }
                let idx = (py as u32 * width + px as u32) as usize;
                coverage[idx] = coverage[idx].max(alpha);
            }
        }
    });

    TextMask {
        width,
        height,
        coverage,
    }
}

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

// 5x7 uppercase bitmap glyphs, one byte per row, low 5 bits used.
fn builtin_glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        _ => return None,
    };
    Some(rows)
}

fn raster_builtin(text: &str, font_px: u32) -> TextMask {
    // Integer upscale of the 5x7 glyphs to approximate font_px.
    let scale = (font_px / (GLYPH_HEIGHT + 1)).max(1);
    let advance = (GLYPH_WIDTH + 1) * scale;
    let width = text.chars().count().max(1) as u32 * advance;
    let height = GLYPH_HEIGHT * scale;
    let mut coverage = vec![0u8; (width * height) as usize];

    for (i, c) in text.chars().enumerate() {
        let Some(rows) = builtin_glyph(c) else { continue };
        let left = i as u32 * advance;
        for (gy, row) in rows.iter().enumerate() {
            for gx in 0..GLYPH_WIDTH {
                if row & (1 << (GLYPH_WIDTH - 1 - gx)) == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        let px = left + gx * scale + sx;
                        let py = gy as u32 * scale + sy;
                        coverage[(py * width + px) as usize] = 255;
                    }
                }
            }
        }
    }

    TextMask {
        width,
        height,
        coverage,
    }
}

fn crop_to_ink(mask: TextMask) -> TextMask {
    let mut min_x = mask.width;
    let mut min_y = mask.height;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut any = false;
    for y in 0..mask.height {
        for x in 0..mask.width {
            if mask.coverage[(y * mask.width + x) as usize] == 0 {
                continue;
            }
            any = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }
    if !any {
        return TextMask {
            width: 0,
            height: 0,
            coverage: Vec::new(),
        };
    }
    let width = max_x - min_x + 1;
    let height = max_y - min_y + 1;
    let mut coverage = vec![0u8; (width * height) as usize];
    for y in 0..height {
        for x in 0..width {
            coverage[(y * width + x) as usize] =
                mask.coverage[((min_y + y) * mask.width + (min_x + x)) as usize];
        }
    }
    TextMask {
        width,
        height,
        coverage,
    }
}
