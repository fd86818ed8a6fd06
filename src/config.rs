// Every tunable of the overlay in one place.
// Visual: moving these numbers moves the paws/mat around in the window.

use crate::types::{DisplaySize, Point, Quad};
use std::path::PathBuf;

/// Environment variable that points at a different `images/` directory.
pub const ASSETS_ENV: &str = "BONGO_CAT_ASSETS";
/// Environment variable that starts the overlay with debug shapes visible.
pub const DEBUG_ENV: &str = "BONGO_CAT_DEBUG";

#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    pub window_width: usize,
    pub window_height: usize,
    pub target_fps: usize,
    pub assets_dir: PathBuf,
    /// Mousepad corners in overlay space, clockwise from top-left.
    pub mat: Quad,
    /// Where the mouse paw is rooted on the body.
    pub right_anchor: Point,
    /// Where the keyboard paw sprite is drawn (top-left corner).
    pub left_anchor: Point,
    pub max_reach: f32,
    /// Used when the display size cannot be queried.
    pub fallback_display: DisplaySize,
    pub debug_overlay: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Bongo Cat Stream Overlay".to_string(),
            window_width: 800,
            window_height: 600,
            target_fps: 60,
            assets_dir: PathBuf::from("images"),
            mat: Quad::from_pixels([(175, 316), (-8, 248), (74, 184), (266, 229)]),
            right_anchor: Point::new(350.0, 250.0),
            left_anchor: Point::new(280.0, 320.0),
            max_reach: 150.0,
            fallback_display: DisplaySize { width: 1920.0, height: 1080.0 },
            debug_overlay: false,
        }
    }
}

impl Config {
    /// Defaults plus the `BONGO_CAT_*` environment overrides.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(ASSETS_ENV).filter(|d| !d.trim().is_empty()) {
            config.assets_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup(DEBUG_ENV) {
            config.debug_overlay = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        config
    }
}
