//! # Rolodex Architecture
//!
//! Rolodex is a **personal contact directory** library with a small CLI client.
//! The library never touches the terminal; the binary in `main.rs`/`cli/` does.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - clap subcommands and the interactive menu                │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the book and the storage backend                    │
//! │  - One save after every command that changed the book       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per user action, returns `CmdResult`          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (contacts.rs, validate.rs, report.rs)                 │
//! │  - ContactStore: the name → record map and its invariants   │
//! │  - Pure field validation and read-only summaries            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait                                          │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure model
//!
//! Nothing in the library ends a session. Validation and lookup failures are
//! [`error::RolodexError`] values the caller branches on. A missing or corrupt
//! data file loads as an empty book with a [`store::LoadStatus`] saying which.
//! A failed save becomes a warning message on the command's result.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Per-action logic returning `CmdResult`
//! - [`contacts`]: `ContactStore`, the in-memory book
//! - [`model`]: `Contact`, `NewContact`, `ContactUpdate`
//! - [`validate`]: Phone, email and name checks
//! - [`report`]: Group counts and recency statistics
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: `rolodex.json` configuration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod contacts;
pub mod error;
pub mod model;
pub mod report;
pub mod store;
pub mod validate;
