use std::path::Path;

use zenicons::iconset;

fn main() {
    // The master must exist; there is no way to regenerate it here.
    let master_path = Path::new(iconset::MASTER_ICON_PATH);
    let master = iconset::load_master(master_path).unwrap_or_else(|e| panic!("{}", e));

    let out_dir = master_path.parent().expect("master path has a parent dir");
    let written = iconset::resize_variants(&master, out_dir).unwrap_or_else(|e| panic!("{}", e));

    for (path, (_, size)) in written.iter().zip(iconset::APPICON_VARIANTS) {
        println!("Wrote {} ({}x{})", path.display(), size, size);
    }
    println!("Iconset written to {}", out_dir.display());
}
