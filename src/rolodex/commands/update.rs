use crate::commands::{CmdMessage, CmdResult};
use crate::contacts::ContactStore;
use crate::error::Result;
use crate::model::{ContactUpdate, Field};

pub fn run(contacts: &mut ContactStore, name: &str, update: ContactUpdate) -> Result<CmdResult> {
    let report = contacts.update(name, update)?;
    let mut result = CmdResult::default();

    for (field, err) in &report.rejected {
        result.add_message(CmdMessage::warning(format!(
            "Invalid {}, keeping current: {}",
            field, err
        )));
    }

    if report.changed() {
        tracing::debug!(name = %report.name, applied = ?report.applied, "updated contact");
        result.add_message(CmdMessage::success(format!(
            "Contact '{}' updated ({}).",
            report.name,
            join_fields(&report.applied)
        )));
        result.modified = true;
    } else {
        result.add_message(CmdMessage::info(format!(
            "No changes made to '{}'.",
            report.name
        )));
    }

    result.contacts = vec![(report.name.clone(), report.contact.clone())];
    result.update = Some(report);
    Ok(result)
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
