use crate::contacts::UpdateReport;
use crate::model::Contact;
use crate::report::Stats;
use std::path::PathBuf;

pub mod create;
pub mod delete;
pub mod export;
pub mod list;
pub mod search;
pub mod stats;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Contacts touched by a mutation, or returned by a query, in name order.
    pub contacts: Vec<(String, Contact)>,
    pub update: Option<UpdateReport>,
    pub stats: Option<Stats>,
    pub export_path: Option<PathBuf>,
    /// Whether the command changed the book and it needs saving.
    pub modified: bool,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_contacts(mut self, contacts: Vec<(String, Contact)>) -> Self {
        self.contacts = contacts;
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn modified(mut self) -> Self {
        self.modified = true;
        self
    }
}
