//! # Storage Layer
//!
//! The persistence gateway for the contact book. The [`DataStore`] trait hides
//! where the book lives so the API and its tests do not care.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one JSON file
//! - [`memory::InMemoryStore`]: keeps a serialized copy in memory, for tests
//!
//! ## Load policy
//!
//! Loading never fails. A missing file is a fresh start; a file that cannot be
//! read, or is not a JSON object, yields an empty book and a
//! [`LoadStatus::Corrupt`] the caller can report. Individual records are not
//! validated: see [`Contact`](crate::model::Contact) for how odd ones are read.
//! Saving, on the other hand, returns its errors: the API decides to log them
//! and carry on.
//!
//! ## Storage Format
//!
//! ```text
//! {
//!   "Alice": {
//!     "phone": "5551234567",
//!     "email": "a@b.com",
//!     "group": "Other",
//!     "createdAt": "2024-05-01T09:00:00+00:00",
//!     "updatedAt": "2024-05-01T09:00:00+00:00"
//!   }
//! }
//! ```

use crate::contacts::ContactStore;
use crate::error::Result;

pub mod fs;
pub mod memory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing stored yet.
    Missing,
    /// Stored data was read; holds the number of records.
    Loaded(usize),
    /// Stored data exists but could not be read or parsed.
    Corrupt { reason: String },
}

#[derive(Debug)]
pub struct Loaded {
    pub contacts: ContactStore,
    pub status: LoadStatus,
}

impl Loaded {
    pub fn fresh() -> Self {
        Self {
            contacts: ContactStore::new(),
            status: LoadStatus::Missing,
        }
    }

    pub fn corrupt(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!(%reason, "contact data is unreadable, starting with an empty book");
        Self {
            contacts: ContactStore::new(),
            status: LoadStatus::Corrupt { reason },
        }
    }

    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str::<ContactStore>(text) {
            Ok(contacts) => Self {
                status: LoadStatus::Loaded(contacts.len()),
                contacts,
            },
            Err(e) => Self::corrupt(e.to_string()),
        }
    }
}

pub fn to_json(contacts: &ContactStore) -> Result<String> {
    Ok(serde_json::to_string_pretty(contacts)?)
}

/// Where the contact book is kept between runs.
pub trait DataStore {
    /// Read the whole book. Never fails; see [`LoadStatus`].
    fn load(&self) -> Loaded;

    /// Replace whatever is stored with `contacts`.
    fn save(&mut self, contacts: &ContactStore) -> Result<()>;

    /// Human-readable location, used in messages.
    fn location(&self) -> String;
}
