//! # CLI Behavior
//!
//! This is **one possible UI client** for rolodex, not the application itself.
//!
//! ### Naked Execution (`rolodex`)
//!
//! Running `rolodex` with no arguments opens the interactive menu, the same as
//! `rolodex shell`. Every other subcommand runs one action and exits.
//!
//! ### Where data lives
//!
//! 1. `--file PATH` if given
//! 2. with `--global`, the `data_file` name inside the per-user data directory
//! 3. otherwise `data_file` from `rolodex.json` (default `contacts_data.json`)
//!    relative to the working directory

mod commands;
mod print;
mod setup;
mod shell;

pub use commands::run;
