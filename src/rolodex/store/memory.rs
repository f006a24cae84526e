use super::{to_json, DataStore, Loaded};
use crate::contacts::ContactStore;
use crate::error::{RolodexError, Result};

/// Keeps the serialized book in memory, so tests exercise the same JSON path
/// as the file store without touching disk.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: Option<String>,
    fail_saves: bool,
    saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from raw stored text, valid or not.
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            ..Self::default()
        }
    }

    /// Makes every save fail with an I/O error.
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl DataStore for InMemoryStore {
    fn load(&self) -> Loaded {
        match &self.data {
            Some(text) => Loaded::from_json(text),
            None => Loaded::fresh(),
        }
    }

    fn save(&mut self, contacts: &ContactStore) -> Result<()> {
        if self.fail_saves {
            return Err(RolodexError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "in-memory store is read-only",
            )));
        }
        self.data = Some(to_json(contacts)?);
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::NewContact;

    pub struct StoreFixture {
        pub contacts: ContactStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                contacts: ContactStore::new(),
            }
        }

        pub fn with_contacts(mut self, count: usize) -> Self {
            for i in 0..count {
                let contact = NewContact::new(format!("Contact {}", i + 1), "5550000000");
                self.contacts.create(contact, false).unwrap();
            }
            self
        }

        pub fn with_contact(mut self, name: &str, group: &str) -> Self {
            let contact = NewContact::new(name, "5551234567").group(group);
            self.contacts.create(contact, false).unwrap();
            self
        }

        /// An `InMemoryStore` already holding the fixture's contacts.
        pub fn into_backend(self) -> InMemoryStore {
            let mut store = InMemoryStore::new();
            store.save(&self.contacts).unwrap();
            store.saves = 0;
            store
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;
    use crate::store::LoadStatus;

    #[test]
    fn round_trips_contacts() {
        let contacts = StoreFixture::new()
            .with_contact("Alice", "Friends")
            .with_contact("Bob", "Work")
            .contacts;

        let mut store = InMemoryStore::new();
        store.save(&contacts).unwrap();
        let loaded = store.load();

        assert_eq!(loaded.status, LoadStatus::Loaded(2));
        assert_eq!(loaded.contacts, contacts);
    }

    #[test]
    fn empty_book_round_trips() {
        let mut store = InMemoryStore::new();
        store.save(&ContactStore::new()).unwrap();
        assert_eq!(store.data(), Some("{}"));
        assert_eq!(store.load().status, LoadStatus::Loaded(0));
    }

    #[test]
    fn garbage_loads_as_corrupt() {
        let store = InMemoryStore::with_data("[1, 2, 3]");
        let loaded = store.load();
        assert!(matches!(loaded.status, LoadStatus::Corrupt { .. }));
        assert!(loaded.contacts.is_empty());
    }

    #[test]
    fn malformed_records_pass_through() {
        let store = InMemoryStore::with_data(r#"{"Eve": {"phone": "12"}}"#);
        let loaded = store.load();
        assert_eq!(loaded.status, LoadStatus::Loaded(1));
        assert_eq!(loaded.contacts.get("Eve").unwrap().phone, "12");
    }

    #[test]
    fn failing_store_reports_io_error() {
        let mut store = InMemoryStore::failing();
        let err = store.save(&ContactStore::new()).unwrap_err();
        assert!(matches!(err, RolodexError::Io(_)));
        assert_eq!(store.save_count(), 0);
    }
}
