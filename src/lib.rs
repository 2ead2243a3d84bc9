//! Procedural icon asset generation: a 1024x1024 master app icon,
//! the resized iOS app-icon variants derived from it, and the
//! browser-extension icons.

pub mod font;
pub mod icon;
pub mod iconset;
pub mod logger;
