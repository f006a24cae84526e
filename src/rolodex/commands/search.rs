use crate::commands::{CmdMessage, CmdResult};
use crate::contacts::ContactStore;
use crate::error::Result;

pub fn run(contacts: &ContactStore, query: &str) -> Result<CmdResult> {
    let matches = contacts.find(query.trim());
    let mut result = CmdResult::default();
    if matches.is_empty() {
        result.add_message(CmdMessage::info("No contacts found."));
    } else {
        result.add_message(CmdMessage::info(format!(
            "Found {} contact(s)",
            matches.len()
        )));
    }
    Ok(result.with_contacts(matches))
}
