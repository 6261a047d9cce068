//! Seam to the sprite-atlas collaborator.

use std::sync::Mutex;

use crate::template::SpriteDescriptor;

/// Receiver for sprite descriptors produced during area loading.
///
/// Implementations are called directly from the loader thread, concurrently
/// with whatever per-tick work they do themselves; `Send + Sync` is part of
/// the contract.
pub trait AtlasSink: Send + Sync {
    fn add_atlas_object(&self, sprite: SpriteDescriptor);
}

/// Atlas sink that accumulates descriptors in memory. Used by the dump CLI
/// and by callers that pack the atlas after loading finishes.
#[derive(Debug, Default)]
pub struct CollectingAtlas {
    objects: Mutex<Vec<SpriteDescriptor>>,
}

impl CollectingAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return everything collected so far.
    pub fn take(&self) -> Vec<SpriteDescriptor> {
        std::mem::take(&mut *self.objects.lock().unwrap())
    }
}

impl AtlasSink for CollectingAtlas {
    fn add_atlas_object(&self, sprite: SpriteDescriptor) {
        self.objects.lock().unwrap().push(sprite);
    }
}
