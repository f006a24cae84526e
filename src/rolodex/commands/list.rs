use crate::commands::{CmdMessage, CmdResult};
use crate::contacts::ContactStore;
use crate::error::Result;

pub fn run(contacts: &ContactStore) -> Result<CmdResult> {
    let all = contacts.all();
    let mut result = CmdResult::default();
    if all.is_empty() {
        result.add_message(CmdMessage::info("No contacts to display."));
    }
    Ok(result.with_contacts(all))
}
