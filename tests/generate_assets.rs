use std::env;
use std::fs;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use zenicons::font::TextRenderer;
use zenicons::{icon, iconset};

fn temp_dir(tag: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("zenicons-test-{}-{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[test]
fn master_to_variants_roundtrip() {
    let dir = temp_dir("variants");
    let master_path = dir.join("icon-1024.png");

    let mut renderer = TextRenderer::builtin();
    let master = icon::generate_master_icon(&mut renderer);
    master.save(&master_path).expect("save master");

    let loaded = iconset::load_master(&master_path).expect("load master");
    assert_eq!(loaded.dimensions(), (icon::MASTER_SIZE, icon::MASTER_SIZE));

    let written = iconset::resize_variants(&loaded, &dir).expect("resize variants");
    assert_eq!(written.len(), 17);

    for (path, (name, size)) in written.iter().zip(iconset::APPICON_VARIANTS) {
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(*name));
        let img = image::open(path).expect("open variant").to_rgba8();
        assert_eq!(img.dimensions(), (*size, *size), "{}", name);
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_master_is_fatal() {
    let dir = temp_dir("missing");
    let err = iconset::load_master(&dir.join("icon-1024.png")).unwrap_err();
    assert!(err.contains("failed to read master icon"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn regeneration_is_byte_identical() {
    let dir = temp_dir("determinism");

    let mut digests = Vec::new();
    for run in 0..2 {
        let mut renderer = TextRenderer::builtin();
        let path = dir.join(format!("master-{}.png", run));
        icon::generate_master_icon(&mut renderer)
            .save(&path)
            .expect("save master");
        digests.push(sha256_hex(&fs::read(&path).expect("read master")));
    }
    assert_eq!(digests[0], digests[1]);

    let mut digests = Vec::new();
    for run in 0..2 {
        let mut renderer = TextRenderer::builtin();
        let path = dir.join(format!("ext-{}.png", run));
        icon::generate_extension_icon(&mut renderer, 48)
            .save(&path)
            .expect("save extension icon");
        digests.push(sha256_hex(&fs::read(&path).expect("read extension icon")));
    }
    assert_eq!(digests[0], digests[1]);

    let _ = fs::remove_dir_all(&dir);
}
