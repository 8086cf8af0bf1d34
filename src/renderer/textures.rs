//! Texture registry keyed by logical name, plus procedural stand-in images
//!
//! Loading image files is the host's job. The host registers RGBA pixels
//! under a `TextureKey`; any key left empty draws untextured.

use std::collections::{HashMap, HashSet};

use crate::assets::TextureKey;
use crate::error::GameError;

/// Tightly packed RGBA8 pixels
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// Wrap pixels after checking the byte count
    pub fn new(key: TextureKey, width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, GameError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected || expected == 0 {
            return Err(GameError::TextureSize {
                name: key.name(),
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self { width, height, rgba })
    }
}

/// Handles by key, owned by the renderer
#[derive(Debug)]
pub struct TextureRegistry<T> {
    textures: HashMap<TextureKey, T>,
    warned: HashSet<TextureKey>,
}

impl<T> Default for TextureRegistry<T> {
    fn default() -> Self {
        Self {
            textures: HashMap::new(),
            warned: HashSet::new(),
        }
    }
}

impl<T> TextureRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: TextureKey, texture: T) {
        if self.textures.insert(key, texture).is_some() {
            log::debug!("Replaced texture '{}'", key.name());
        } else {
            log::info!("Registered texture '{}'", key.name());
        }
        self.warned.remove(&key);
    }

    pub fn get(&self, key: TextureKey) -> Option<&T> {
        self.textures.get(&key)
    }

    /// Look up a texture for drawing; a miss is logged once per key
    pub fn resolve(&mut self, key: TextureKey) -> Option<&T> {
        if !self.textures.contains_key(&key) && self.warned.insert(key) {
            log::warn!("Texture '{}' not loaded, drawing untextured", key.name());
        }
        self.textures.get(&key)
    }

    pub fn contains(&self, key: TextureKey) -> bool {
        self.textures.contains_key(&key)
    }

    /// Whether a draw asking for `key` samples a texture or uses its flat colour
    pub fn is_textured(&self, key: Option<TextureKey>) -> bool {
        key.is_some_and(|k| self.contains(k))
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

fn pixel(rgba: &mut Vec<u8>, c: [f32; 3]) {
    rgba.extend(c.iter().map(|v| (v.clamp(0.0, 1.0) * 255.0) as u8));
    rgba.push(255);
}

/// A small generated image for `key`, so the game looks right without assets
pub fn procedural_image(key: TextureKey, size: u32) -> TextureImage {
    let size = size.max(2);
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);

    for y in 0..size {
        for x in 0..size {
            let u = x as f32 / size as f32;
            let v = y as f32 / size as f32;
            let color = match key {
                TextureKey::Player => {
                    // Two-tone stripes so rolling is visible
                    if ((u * 4.0) as u32) % 2 == 0 {
                        [0.95, 0.95, 0.95]
                    } else {
                        [0.2, 0.5, 0.9]
                    }
                }
                TextureKey::Ground => {
                    let checker = ((u * 8.0) as u32 + (v * 8.0) as u32) % 2 == 0;
                    if checker {
                        [0.35, 0.35, 0.38]
                    } else {
                        [0.3, 0.3, 0.33]
                    }
                }
                TextureKey::LaneBorder => [0.95, 0.95, 0.95],
                TextureKey::SmallBarrier
                | TextureKey::LargeBarrier
                | TextureKey::FloatingBarrier => {
                    // Hazard stripes
                    if (((u + v) * 6.0) as u32) % 2 == 0 {
                        [0.95, 0.75, 0.1]
                    } else {
                        [0.15, 0.15, 0.15]
                    }
                }
                TextureKey::Hole => {
                    let d = ((u - 0.5).powi(2) + (v - 0.5).powi(2)).sqrt();
                    let shade = (d * 1.2).min(0.6);
                    [shade, shade, shade]
                }
                TextureKey::Sky => {
                    let t = 1.0 - v;
                    [0.4 + 0.3 * t, 0.6 + 0.25 * t, 1.0]
                }
            };
            pixel(&mut rgba, color);
        }
    }

    TextureImage {
        width: size,
        height: size,
        rgba,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_size_is_checked() {
        assert!(TextureImage::new(TextureKey::Sky, 2, 2, vec![0; 16]).is_ok());
        let err = TextureImage::new(TextureKey::Sky, 2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            GameError::TextureSize { name: "sky", expected: 16, actual: 15 }
        ));
    }

    #[test]
    fn test_missing_texture_degrades_to_none() {
        let mut registry: TextureRegistry<u32> = TextureRegistry::new();
        registry.insert(TextureKey::Ground, 7);
        assert_eq!(registry.resolve(TextureKey::Ground), Some(&7));
        assert_eq!(registry.resolve(TextureKey::Hole), None);
        assert_eq!(registry.resolve(TextureKey::Hole), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_textured_flag_follows_registration() {
        let mut registry: TextureRegistry<u32> = TextureRegistry::new();
        registry.insert(TextureKey::Player, 1);

        assert!(registry.is_textured(Some(TextureKey::Player)));
        // Requested but never registered: flat colour for that draw only
        assert!(!registry.is_textured(Some(TextureKey::Hole)));
        // Coins and lives never ask for a texture
        assert!(!registry.is_textured(None));

        registry.insert(TextureKey::Hole, 2);
        assert!(registry.is_textured(Some(TextureKey::Hole)));
    }

    #[test]
    fn test_procedural_images_cover_every_key() {
        for key in TextureKey::ALL {
            let image = procedural_image(key, 16);
            assert_eq!(image.rgba.len(), 16 * 16 * 4);
            assert!(TextureImage::new(key, image.width, image.height, image.rgba).is_ok());
        }
    }
}
