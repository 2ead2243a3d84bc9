use std::fs;
use std::path::Path;

use zenicons::font::TextRenderer;
use zenicons::{icon, iconset, logger};

fn main() {
    let mut renderer = TextRenderer::probe();
    let out_dir = Path::new(iconset::EXTENSION_DIR);
    fs::create_dir_all(out_dir).expect("create extension icon dir");

    for &size in iconset::EXTENSION_SIZES {
        let img = icon::generate_extension_icon(&mut renderer, size);
        let out = out_dir.join(format!("icon-{}.png", size));
        if let Err(e) = img.save(&out) {
            logger::log_error("failed to save extension icon", &e);
            panic!("failed to save {}: {}", out.display(), e);
        }
        println!("Wrote {} ({}x{})", out.display(), size, size);
    }
}
