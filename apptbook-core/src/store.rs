//! Owner name to appointment book mapping.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::appointment::Appointment;
use crate::book::AppointmentBook;
use crate::error::{ApptBookError, ApptBookResult};

/// Demonstration owner registered at server startup.
pub const SEED_OWNER: &str = "PreCannedOwner";

/// Appointment books keyed by owner name.
///
/// One lock covers the whole map. Writers (`add`, `clear_all`, a creating
/// `get_or_create`) are exclusive; readers share the lock and get cloned
/// snapshots, so nothing outside ever sees a book mid-update.
#[derive(Debug, Default)]
pub struct OwnerStore {
    books: RwLock<HashMap<String, AppointmentBook>>,
}

impl OwnerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding one empty book for `owner`.
    pub fn with_seed_owner(owner: &str) -> Self {
        let store = Self::new();
        store.get_or_create(owner);
        store
    }

    /// Snapshot of `owner`'s book, registering an empty one on first use.
    pub fn get_or_create(&self, owner: &str) -> AppointmentBook {
        if let Some(book) = self.read().get(owner) {
            return book.clone();
        }

        self.write()
            .entry(owner.to_string())
            .or_insert_with(|| {
                debug!(owner, "creating appointment book");
                AppointmentBook::new(owner)
            })
            .clone()
    }

    /// Add to `owner`'s book, creating it if needed.
    pub fn add(&self, owner: &str, appointment: Appointment) {
        let mut books = self.write();
        let book = books
            .entry(owner.to_string())
            .or_insert_with(|| AppointmentBook::new(owner));
        book.add(appointment);
        debug!(owner, count = book.len(), "added appointment");
    }

    /// Snapshot of an existing book; unknown owners are not registered.
    pub fn find(&self, owner: &str) -> ApptBookResult<AppointmentBook> {
        self.read()
            .get(owner)
            .cloned()
            .ok_or_else(|| ApptBookError::NotFound(owner.to_string()))
    }

    /// Registered owner names, sorted.
    pub fn owners(&self) -> Vec<String> {
        let mut owners: Vec<String> = self.read().keys().cloned().collect();
        owners.sort();
        owners
    }

    /// Drop every book, seed owner included.
    pub fn clear_all(&self) {
        let mut books = self.write();
        debug!(count = books.len(), "clearing all appointment books");
        books.clear();
    }

    // Every mutation is a single map call, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, AppointmentBook>> {
        self.books.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, AppointmentBook>> {
        self.books.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::time_codec::TimeCodec;

    fn appt(description: &str) -> Appointment {
        Appointment::new(&TimeCodec::default(), description, "3/1/2024 9:00 AM", "3/1/2024 9:30 AM")
            .unwrap()
    }

    #[test]
    fn test_seed_owner_starts_empty() {
        let store = OwnerStore::with_seed_owner(SEED_OWNER);
        assert_eq!(store.owners(), [SEED_OWNER]);
        assert!(store.find(SEED_OWNER).unwrap().is_empty());
    }

    #[test]
    fn test_get_or_create_registers_owner() {
        let store = OwnerStore::new();
        assert!(store.find("Alice").is_err());

        let book = store.get_or_create("Alice");
        assert_eq!(book.owner(), "Alice");
        assert!(book.is_empty());
        assert!(store.find("Alice").is_ok());
    }

    #[test]
    fn test_add_creates_book_and_appends() {
        let store = OwnerStore::new();
        store.add("Alice", appt("one"));
        store.add("Alice", appt("two"));
        store.add("Bob", appt("three"));

        assert_eq!(store.get_or_create("Alice").len(), 2);
        assert_eq!(store.get_or_create("Bob").len(), 1);
        assert_eq!(store.owners(), ["Alice", "Bob"]);
    }

    #[test]
    fn test_snapshot_does_not_change_store() {
        let store = OwnerStore::new();
        let mut snapshot = store.get_or_create("Alice");
        snapshot.add(appt("local only"));

        assert!(store.get_or_create("Alice").is_empty());
    }

    #[test]
    fn test_find_unknown_owner_is_not_found() {
        let store = OwnerStore::new();
        let err = store.find("Nobody").unwrap_err();
        assert!(matches!(err, ApptBookError::NotFound(ref owner) if owner == "Nobody"));
        assert!(store.owners().is_empty());
    }

    #[test]
    fn test_clear_all_then_get_or_create_is_empty() {
        let store = OwnerStore::with_seed_owner(SEED_OWNER);
        store.add("Alice", appt("one"));

        store.clear_all();

        assert!(store.owners().is_empty());
        assert!(store.find(SEED_OWNER).is_err());
        assert!(store.get_or_create("Alice").is_empty());
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let store = Arc::new(OwnerStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for j in 0..25 {
                        store.add("shared", appt(&format!("{i}-{j}")));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get_or_create("shared").len(), 200);
    }
}
