//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every rolodex operation, whatever the UI.
//!
//! It owns the in-memory [`ContactStore`] and the storage backend, and it adds
//! the one rule the commands do not know about: **every command that changes
//! the book is followed by exactly one save**. A failed save does not turn into
//! an error; it is logged and reported as a warning message so the session can
//! keep going with what it has in memory.
//!
//! ## Generic Over DataStore
//!
//! `RolodexApi<S: DataStore>` is generic over the storage backend:
//! - Production: `RolodexApi<FileStore>`
//! - Testing: `RolodexApi<InMemoryStore>`
//!
//! ## Testing Strategy
//!
//! API tests check dispatch and the save-after-mutation rule. Command logic is
//! tested in the command modules; storage in the store modules.

use crate::commands;
use crate::contacts::ContactStore;
use crate::error::Result;
use crate::model::{ContactUpdate, NewContact};
use crate::report::DEFAULT_RECENT_DAYS;
use crate::store::{DataStore, LoadStatus};
use chrono::{DateTime, Utc};

pub struct RolodexApi<S: DataStore> {
    backend: S,
    contacts: ContactStore,
    load_status: LoadStatus,
    recent_days: i64,
}

impl<S: DataStore> RolodexApi<S> {
    /// Loads the book from `backend`. Never fails; check [`Self::load_status`].
    pub fn open(backend: S) -> Self {
        let loaded = backend.load();
        match &loaded.status {
            LoadStatus::Loaded(count) => {
                tracing::info!(location = %backend.location(), count, "opened contact book")
            }
            LoadStatus::Missing => {
                tracing::info!(location = %backend.location(), "starting a new contact book")
            }
            LoadStatus::Corrupt { .. } => {}
        }
        Self {
            backend,
            contacts: loaded.contacts,
            load_status: loaded.status,
            recent_days: DEFAULT_RECENT_DAYS,
        }
    }

    pub fn with_recent_days(mut self, days: i64) -> Self {
        self.recent_days = days;
        self
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Messages describing how the book was loaded, for the UI to show once.
    pub fn load_messages(&self) -> Vec<commands::CmdMessage> {
        match &self.load_status {
            LoadStatus::Missing => vec![commands::CmdMessage::info(
                "No existing contacts file found. Starting fresh.",
            )],
            LoadStatus::Corrupt { reason } => vec![commands::CmdMessage::warning(format!(
                "Error reading contacts file ({}). Starting fresh.",
                reason
            ))],
            LoadStatus::Loaded(_) => Vec::new(),
        }
    }

    pub fn contacts(&self) -> &ContactStore {
        &self.contacts
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn add_contact(&mut self, new: NewContact, overwrite: bool) -> Result<commands::CmdResult> {
        let result = commands::create::run(&mut self.contacts, new, overwrite)?;
        Ok(self.persist(result))
    }

    pub fn search(&self, query: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.contacts, query)
    }

    pub fn update_contact(
        &mut self,
        name: &str,
        update: ContactUpdate,
    ) -> Result<commands::CmdResult> {
        let result = commands::update::run(&mut self.contacts, name, update)?;
        Ok(self.persist(result))
    }

    pub fn delete_contact(&mut self, name: &str) -> Result<commands::CmdResult> {
        let result = commands::delete::run(&mut self.contacts, name)?;
        Ok(self.persist(result))
    }

    pub fn list(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.contacts)
    }

    pub fn export_csv(&self, filename: Option<&str>) -> Result<commands::CmdResult> {
        commands::export::run(&self.contacts, filename)
    }

    pub fn stats(&self) -> Result<commands::CmdResult> {
        self.stats_at(Utc::now())
    }

    pub fn stats_at(&self, now: DateTime<Utc>) -> Result<commands::CmdResult> {
        commands::stats::run(&self.contacts, now, self.recent_days)
    }

    /// Unconditional save, used when the session ends.
    pub fn save(&mut self) -> commands::CmdResult {
        self.persist(commands::CmdResult::default().modified())
    }

    fn persist(&mut self, mut result: commands::CmdResult) -> commands::CmdResult {
        if !result.modified {
            return result;
        }
        let location = self.backend.location();
        match self.backend.save(&self.contacts) {
            Ok(()) => {
                tracing::info!(%location, count = self.contacts.len(), "contacts saved");
                result.add_message(commands::CmdMessage::info(format!(
                    "Contacts saved to {}",
                    location
                )));
            }
            Err(e) => {
                tracing::warn!(%location, error = %e, "failed to save contacts");
                result.add_message(commands::CmdMessage::warning(format!(
                    "Error saving contacts to {}: {}",
                    location, e
                )));
            }
        }
        result
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
pub use crate::contacts::UpdateReport;
