//! Sprite identity and best-effort image preloading
//!
//! The simulation only ever sees [`SpriteId`] and [`SpriteCatalog`]; actual
//! image elements stay on the platform side. Loading is best-effort: a sprite
//! that fails to load is logged and skipped, and its entities render as
//! silhouettes.

use std::collections::HashSet;

/// Identity of a drawable image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player,
    Monster1,
    Monster2,
    Monster3,
    Coin,
}

impl SpriteId {
    pub const ALL: [SpriteId; 5] = [
        SpriteId::Player,
        SpriteId::Monster1,
        SpriteId::Monster2,
        SpriteId::Monster3,
        SpriteId::Coin,
    ];

    /// Sprite for a monster variant (1..=3)
    pub fn monster(variant: u8) -> Self {
        match variant {
            1 => SpriteId::Monster1,
            2 => SpriteId::Monster2,
            _ => SpriteId::Monster3,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            SpriteId::Player => "assets/images/player.png",
            SpriteId::Monster1 => "assets/images/monster1.png",
            SpriteId::Monster2 => "assets/images/monster2.png",
            SpriteId::Monster3 => "assets/images/monster3.png",
            SpriteId::Coin => "assets/images/coin.png",
        }
    }
}

/// The set of sprites that actually loaded, handed to the simulation
#[derive(Debug, Clone, Default)]
pub struct SpriteCatalog {
    loaded: HashSet<SpriteId>,
}

impl SpriteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog claiming every sprite is available
    pub fn full() -> Self {
        Self {
            loaded: SpriteId::ALL.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, id: SpriteId) {
        self.loaded.insert(id);
    }

    pub fn has(&self, id: SpriteId) -> bool {
        self.loaded.contains(&id)
    }
}

#[cfg(target_arch = "wasm32")]
pub use store::ImageStore;

/// Loaded image elements, wasm only
#[cfg(target_arch = "wasm32")]
mod store {
    use super::{SpriteCatalog, SpriteId};
    use std::collections::HashMap;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlImageElement;

    pub struct ImageStore {
        images: HashMap<SpriteId, HtmlImageElement>,
    }

    impl ImageStore {
        /// Load every sprite, swallowing individual failures. Never rejects
        /// as a whole.
        pub async fn load_all() -> Self {
            let mut images = HashMap::new();
            for id in SpriteId::ALL {
                match load_image(id.path()).await {
                    Some(img) => {
                        images.insert(id, img);
                    }
                    None => log::warn!("failed to load image: {}", id.path()),
                }
            }
            log::info!("loaded {}/{} images", images.len(), SpriteId::ALL.len());
            Self { images }
        }

        pub fn get(&self, id: SpriteId) -> Option<&HtmlImageElement> {
            self.images.get(&id)
        }

        pub fn catalog(&self) -> SpriteCatalog {
            let mut catalog = SpriteCatalog::new();
            for id in self.images.keys() {
                catalog.insert(*id);
            }
            catalog
        }
    }

    /// Resolve to the element on load, or `None` on error
    async fn load_image(path: &str) -> Option<HtmlImageElement> {
        let img = HtmlImageElement::new().ok()?;
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            img.set_onload(Some(&resolve));
            img.set_onerror(Some(&reject));
        });
        img.set_src(path);
        match JsFuture::from(promise).await {
            Ok(_) => Some(img),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monster_variants_map_to_distinct_sprites() {
        assert_eq!(SpriteId::monster(1), SpriteId::Monster1);
        assert_eq!(SpriteId::monster(2), SpriteId::Monster2);
        assert_eq!(SpriteId::monster(3), SpriteId::Monster3);
    }

    #[test]
    fn catalog_tracks_loaded_sprites() {
        let mut catalog = SpriteCatalog::new();
        assert!(!catalog.has(SpriteId::Coin));

        catalog.insert(SpriteId::Coin);
        assert!(catalog.has(SpriteId::Coin));
        assert!(!catalog.has(SpriteId::Player));

        assert!(SpriteId::ALL.into_iter().all(|id| SpriteCatalog::full().has(id)));
    }
}
