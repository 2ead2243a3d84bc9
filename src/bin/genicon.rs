use std::fs;
use std::path::Path;

use zenicons::font::TextRenderer;
use zenicons::{icon, iconset, logger};

fn main() {
    let mut renderer = TextRenderer::probe();
    match renderer.family() {
        Some(family) => println!("Using font: {}", family),
        None => println!("No candidate font found, using builtin font"),
    }

    let img = icon::generate_master_icon(&mut renderer);
    let out = Path::new(iconset::MASTER_ICON_PATH);
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent).expect("create icon output dir");
    }
    if let Err(e) = img.save(out) {
        logger::log_error("failed to save master icon", &e);
        panic!("failed to save {}: {}", out.display(), e);
    }
    logger::log_line(&format!("Master icon written to {}", out.display()));
    println!("Wrote {} ({}x{})", out.display(), icon::MASTER_SIZE, icon::MASTER_SIZE);
}
