use crate::commands::{CmdMessage, CmdResult};
use crate::contacts::ContactStore;
use crate::error::{RolodexError, Result};

/// Removes the contact outright. Confirmation is the caller's job.
pub fn run(contacts: &mut ContactStore, name: &str) -> Result<CmdResult> {
    let name = name.trim();
    let removed = contacts.get(name);
    if !contacts.delete(name) {
        return Err(RolodexError::NotFound(name.to_string()));
    }
    tracing::debug!(%name, "deleted contact");

    let mut result = CmdResult::default()
        .with_contacts(removed.map(|c| (name.to_string(), c)).into_iter().collect())
        .modified();
    result.add_message(CmdMessage::success(format!(
        "Contact '{}' deleted successfully!",
        name
    )));
    Ok(result)
}
