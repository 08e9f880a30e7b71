//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the per-screen view-models it owns.

use crate::config::Config;
use reading_tutor_core::{
    ports::KeyValueStore, profile::ProfileFormModel, reader::PaginatedReaderModel,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// The key-value store is owned here and handed to the profile model; nothing
/// else touches storage.
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn KeyValueStore>,
    pub profile: Mutex<ProfileFormModel>,
    pub readers: Mutex<ReaderSessions>,
}

impl AppState {
    /// Builds the state. The profile starts in its loading state and is loaded
    /// the first time the profile screen is requested.
    pub fn new(config: Arc<Config>, store: Arc<dyn KeyValueStore>) -> Self {
        let profile = ProfileFormModel::new(store.clone(), config.profile_storage_key.clone());
        let readers = ReaderSessions::new(config.max_open_readers);
        Self {
            config,
            store,
            profile: Mutex::new(profile),
            readers: Mutex::new(readers),
        }
    }
}

//=========================================================================================
// ReaderSessions (Open Reader Views)
//=========================================================================================

struct OpenReader {
    reader: PaginatedReaderModel,
    last_used: u64,
}

/// Open reader views keyed by session id, bounded in number.
///
/// Clients are not required to close a reader, so opening one past the limit
/// closes the session that was used least recently.
pub struct ReaderSessions {
    capacity: usize,
    clock: u64,
    open: HashMap<Uuid, OpenReader>,
}

impl ReaderSessions {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            clock: 0,
            open: HashMap::new(),
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Adds a reader, returning the id of the session closed to make room.
    pub fn insert(&mut self, session_id: Uuid, reader: PaginatedReaderModel) -> Option<Uuid> {
        let full = self.open.len() >= self.capacity;
        let evicted = if full && !self.open.contains_key(&session_id) {
            self.open
                .iter()
                .min_by_key(|(_, open)| open.last_used)
                .map(|(id, _)| *id)
        } else {
            None
        };
        if let Some(id) = evicted {
            self.open.remove(&id);
        }

        let last_used = self.tick();
        self.open.insert(session_id, OpenReader { reader, last_used });
        evicted
    }

    /// Looks up a reader and marks it as just used.
    pub fn get_mut(&mut self, session_id: &Uuid) -> Option<&mut PaginatedReaderModel> {
        let now = self.tick();
        self.open.get_mut(session_id).map(|open| {
            open.last_used = now;
            &mut open.reader
        })
    }

    pub fn remove(&mut self, session_id: &Uuid) -> Option<PaginatedReaderModel> {
        self.open.remove(session_id).map(|open| open.reader)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reading_tutor_core::catalog;

    fn reader() -> PaginatedReaderModel {
        PaginatedReaderModel::new(catalog::document(1).unwrap())
    }

    #[test]
    fn least_recently_used_session_is_closed_at_capacity() {
        let mut sessions = ReaderSessions::new(2);
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        assert_eq!(sessions.insert(a, reader()), None);
        assert_eq!(sessions.insert(b, reader()), None);
        assert!(sessions.get_mut(&a).is_some());

        assert_eq!(sessions.insert(c, reader()), Some(b));
        assert_eq!(sessions.len(), 2);
        assert!(sessions.get_mut(&b).is_none());
        assert!(sessions.get_mut(&a).is_some());
        assert!(sessions.get_mut(&c).is_some());
    }

    #[test]
    fn zero_capacity_still_holds_one_session() {
        let mut sessions = ReaderSessions::new(0);
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        sessions.insert(a, reader());
        assert_eq!(sessions.insert(b, reader()), Some(a));
        assert_eq!(sessions.remove(&b).map(|r| r.current_page()), Some(1));
        assert!(sessions.is_empty());
    }
}
