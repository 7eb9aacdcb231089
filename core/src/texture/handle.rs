//! Shared texture handle with change notifications.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use super::types::TextureRegion;

/// Receives a callback whenever a subscribed [`Texture`] changes.
pub trait TextureListener: Send + Sync {
    /// Called after `texture` has been updated with a new region.
    fn on_texture_changed(&self, texture: &Texture);
}

struct TextureShared {
    label: Option<String>,
    region: RwLock<TextureRegion>,
    // Weak so a texture never keeps its meshes alive
    listeners: Mutex<Vec<Weak<dyn TextureListener>>>,
}

/// A shared, updatable texture description.
///
/// Cloning produces another handle to the same texture. Updating the region
/// through any handle notifies every subscribed listener.
#[derive(Clone)]
pub struct Texture {
    shared: Arc<TextureShared>,
}

impl Texture {
    /// Create a texture with the given region.
    pub fn new(region: TextureRegion) -> Self {
        Self {
            shared: Arc::new(TextureShared {
                label: None,
                region: RwLock::new(region),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Create a labelled texture.
    pub fn with_label(region: TextureRegion, label: impl Into<String>) -> Self {
        Self {
            shared: Arc::new(TextureShared {
                label: Some(label.into()),
                region: RwLock::new(region),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.shared.label.as_deref()
    }

    /// Get a copy of the current region.
    pub fn region(&self) -> TextureRegion {
        *self.shared.region.read()
    }

    /// Get the frame width in pixels.
    pub fn width(&self) -> f32 {
        self.shared.region.read().width
    }

    /// Get the frame height in pixels.
    pub fn height(&self) -> f32 {
        self.shared.region.read().height
    }

    /// Replace the region and notify listeners.
    pub fn update(&self, region: TextureRegion) {
        *self.shared.region.write() = region;
        log::debug!(
            "Texture {:?}: updated to {}x{} (atlas frame: {})",
            self.label(),
            region.width,
            region.height,
            region.is_atlas_frame()
        );
        self.notify();
    }

    /// Subscribe a listener to change notifications.
    pub fn subscribe(&self, listener: Weak<dyn TextureListener>) {
        self.shared.listeners.lock().push(listener);
    }

    /// Remove a previously subscribed listener.
    ///
    /// Returns `true` if the listener was subscribed.
    pub fn unsubscribe(&self, listener: &Weak<dyn TextureListener>) -> bool {
        let target = listener.as_ptr() as *const ();
        let mut listeners = self.shared.listeners.lock();
        let before = listeners.len();
        listeners.retain(|w| w.as_ptr() as *const () != target);
        listeners.len() != before
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        let mut listeners = self.shared.listeners.lock();
        listeners.retain(|w| w.strong_count() > 0);
        listeners.len()
    }

    /// Check whether two handles refer to the same texture.
    pub fn ptr_eq(a: &Texture, b: &Texture) -> bool {
        Arc::ptr_eq(&a.shared, &b.shared)
    }

    fn notify(&self) {
        // Listeners are called outside the lock so they may (un)subscribe.
        let live: Vec<Arc<dyn TextureListener>> = {
            let mut listeners = self.shared.listeners.lock();
            listeners.retain(|w| w.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };

        log::trace!(
            "Texture {:?}: notifying {} listener(s)",
            self.label(),
            live.len()
        );

        for listener in live {
            listener.on_texture_changed(self);
        }
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("label", &self.shared.label)
            .field("region", &*self.shared.region.read())
            .field("listeners", &self.shared.listeners.lock().len())
            .finish()
    }
}
