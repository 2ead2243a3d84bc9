use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::logger::log_line;

/// Master icon location; `genicon` writes it, `mkiconset` reads it.
pub const MASTER_ICON_PATH: &str = "assets/AppIcon.appiconset/icon-1024.png";

/// Extension icon output directory.
pub const EXTENSION_DIR: &str = "assets/extension";

/// Extension icon sizes.
pub const EXTENSION_SIZES: &[u32] = &[16, 48, 128];

/// iOS app-icon slots derived from the master (filename, pixel size).
pub const APPICON_VARIANTS: &[(&str, u32)] = &[
    ("icon-20@2x.png", 40),
    ("icon-20@3x.png", 60),
    ("icon-29@2x.png", 58),
    ("icon-29@3x.png", 87),
    ("icon-40@2x.png", 80),
    ("icon-40@3x.png", 120),
    ("icon-60@2x.png", 120),
    ("icon-60@3x.png", 180),
    ("icon-20.png", 20),
    ("icon-20@2x-ipad.png", 40),
    ("icon-29.png", 29),
    ("icon-29@2x-ipad.png", 58),
    ("icon-40.png", 40),
    ("icon-40@2x-ipad.png", 80),
    ("icon-76.png", 76),
    ("icon-76@2x.png", 152),
    ("icon-83.5@2x.png", 167),
];

/// Load the master icon. A missing or unreadable master is fatal for
/// the resizer, so the error propagates to the caller.
pub fn load_master(path: &Path) -> Result<RgbaImage, String> {
    let img = image::open(path)
        .map_err(|e| format!("failed to read master icon {}: {}", path.display(), e))?;
    Ok(img.to_rgba8())
}

/// Resize the master into every variant slot under `out_dir`.
/// Returns the written paths in table order.
pub fn resize_variants(master: &RgbaImage, out_dir: &Path) -> Result<Vec<PathBuf>, String> {
    fs::create_dir_all(out_dir)
        .map_err(|e| format!("failed to create {}: {}", out_dir.display(), e))?;
    let mut written = Vec::with_capacity(APPICON_VARIANTS.len());
    for (name, size) in APPICON_VARIANTS {
        let resized = imageops::resize(master, *size, *size, FilterType::Lanczos3);
        let path = out_dir.join(name);
        resized
            .save(&path)
            .map_err(|e| format!("failed to save {}: {}", path.display(), e))?;
        written.push(path);
    }
    log_line(&format!(
        "Resized master into {} variants under {}",
        written.len(),
        out_dir.display()
    ));
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_table() {
        assert_eq!(APPICON_VARIANTS.len(), 17);
        assert!(APPICON_VARIANTS.contains(&("icon-60@3x.png", 180)));
        assert!(APPICON_VARIANTS.contains(&("icon-83.5@2x.png", 167)));
        assert!(APPICON_VARIANTS.iter().all(|(name, _)| name.ends_with(".png")));
    }
}
