use std::collections::HashSet;
use std::sync::Mutex;

use super::contact::ContactId;

/// Contacts the user starred. Ids of deleted contacts may linger; they
/// never match a rendered contact.
pub trait FavoriteStore: Send + Sync {
    /// Flips membership of `id` and returns whether it is now a favorite.
    fn toggle(&self, id: ContactId) -> bool;
    fn contains(&self, id: ContactId) -> bool;
    fn snapshot(&self) -> HashSet<ContactId>;
}

/// Session-lifetime store, empty at start and never persisted.
#[derive(Default)]
pub struct MemoryFavorites {
    ids: Mutex<HashSet<ContactId>>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoriteStore for MemoryFavorites {
    fn toggle(&self, id: ContactId) -> bool {
        let mut ids = self.ids.lock().unwrap_or_else(|e| e.into_inner());
        if ids.remove(&id) {
            return false;
        }
        ids.insert(id);
        true
    }

    fn contains(&self, id: ContactId) -> bool {
        self.ids.lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&id)
    }

    fn snapshot(&self) -> HashSet<ContactId> {
        self.ids.lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
