// Loads the overlay artwork once at startup.
// Visual: `images/mousebg.png` is the cat + desk; the rest are paws and the mouse.
// Any optional sprite that fails to load is drawn as an outline instead.

use crate::error::Error;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const BACKGROUND: &str = "mousebg.png";
pub const LEFT_PAW_DOWN: &str = "left.png";
pub const LEFT_PAW_UP: &str = "up.png";
pub const RIGHT_PAW: &str = "right.png";
pub const MOUSE: &str = "mouse.png";

/// Decoded sprite, straight (non-premultiplied) RGBA.
pub struct Sprite {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<[u8; 4]>,
}

impl Sprite {
    pub fn from_image(img: RgbaImage) -> Self {
        let (w, h) = img.dimensions();
        Self {
            width: w as usize,
            height: h as usize,
            rgba: img.pixels().map(|p| p.0).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let img = image::open(path)
            .map_err(|source| Error::AssetLoad { path: path.to_path_buf(), source })?
            .to_rgba8();
        Ok(Self::from_image(img))
    }
}

pub enum SpriteSlot {
    Loaded(Sprite),
    Missing,
}

impl SpriteSlot {
    /// Load an optional sprite; failures are logged and turned into `Missing`.
    pub fn load_optional(path: &Path) -> Self {
        match Sprite::load(path) {
            Ok(sprite) => Self::Loaded(sprite),
            Err(e) => {
                warn!("{e}; drawing a placeholder instead");
                Self::Missing
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

pub struct SpriteSet {
    pub background: Sprite,
    pub left_down: SpriteSlot,
    pub left_up: SpriteSlot,
    pub right: SpriteSlot,
    pub mouse: SpriteSlot,
}

impl SpriteSet {
    /// The background is required; everything else may be missing.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let path = |name: &str| -> PathBuf { dir.join(name) };

        let background = Sprite::load(&path(BACKGROUND))?;
        let set = Self {
            background,
            left_down: SpriteSlot::load_optional(&path(LEFT_PAW_DOWN)),
            left_up: SpriteSlot::load_optional(&path(LEFT_PAW_UP)),
            right: SpriteSlot::load_optional(&path(RIGHT_PAW)),
            mouse: SpriteSlot::load_optional(&path(MOUSE)),
        };

        let loaded = [&set.left_down, &set.left_up, &set.right, &set.mouse]
            .iter()
            .filter(|slot| slot.is_loaded())
            .count();
        info!("sprites loaded from {}: background + {loaded}/4 paws/mouse", dir.display());
        Ok(set)
    }
}
