use crate::commands::{CmdMessage, CmdResult};
use crate::contacts::ContactStore;
use crate::error::Result;
use crate::model::NewContact;

pub fn run(contacts: &mut ContactStore, new: NewContact, overwrite: bool) -> Result<CmdResult> {
    let name = new.name.trim().to_string();
    let replaced = overwrite && contacts.contains(&name);
    let contact = contacts.create(new, overwrite)?;
    tracing::debug!(%name, replaced, "created contact");

    let verb = if replaced { "replaced" } else { "added" };
    let mut result = CmdResult::default()
        .with_contacts(vec![(name.clone(), contact)])
        .modified();
    result.add_message(CmdMessage::success(format!(
        "Contact '{}' {} successfully!",
        name, verb
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RolodexError;

    #[test]
    fn adds_contact_and_marks_modified() {
        let mut contacts = ContactStore::new();
        let result = run(
            &mut contacts,
            NewContact::new(" Alice ", "555-123-4567").email("a@b.com"),
            false,
        )
        .unwrap();

        assert!(result.modified);
        assert_eq!(result.contacts[0].0, "Alice");
        assert_eq!(result.contacts[0].1.phone, "5551234567");
        assert!(result.messages[0].content.contains("added"));
        assert_eq!(contacts.len(), 1);
    }

    #[test]
    fn overwrite_reports_replacement() {
        let mut contacts = ContactStore::new();
        run(&mut contacts, NewContact::new("Alice", "5551234567"), false).unwrap();
        let result = run(&mut contacts, NewContact::new("Alice", "5559876543"), true).unwrap();
        assert!(result.messages[0].content.contains("replaced"));
    }

    #[test]
    fn invalid_phone_is_an_error() {
        let mut contacts = ContactStore::new();
        let err = run(&mut contacts, NewContact::new("Bob", "123"), false).unwrap_err();
        assert!(matches!(err, RolodexError::InvalidPhone(_)));
    }
}
