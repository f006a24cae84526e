use crate::commands::{CmdMessage, CmdResult};
use crate::contacts::ContactStore;
use crate::error::{RolodexError, Result};
use crate::model::Contact;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_EXPORT_FILE: &str = "contacts_export.csv";

const HEADER: [&str; 7] = [
    "Name",
    "Phone",
    "Email",
    "Address",
    "Group",
    "Created At",
    "Updated At",
];

pub fn run(contacts: &ContactStore, filename: Option<&str>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if contacts.is_empty() {
        result.add_message(CmdMessage::info("No contacts to export."));
        return Ok(result);
    }

    let path = export_path(filename);
    let file = File::create(&path).map_err(RolodexError::Io)?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, &contacts.all())?;
    writer.flush().map_err(RolodexError::Io)?;

    tracing::info!(path = %path.display(), count = contacts.len(), "exported contacts");
    result.add_message(CmdMessage::success(format!(
        "Contacts exported to {}",
        path.display()
    )));
    result.export_path = Some(path);
    Ok(result)
}

/// Blank input falls back to the default name; `.csv` is appended when missing.
pub fn export_path(filename: Option<&str>) -> PathBuf {
    let name = filename
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_EXPORT_FILE);
    let path = Path::new(name);
    if name.ends_with(".csv") {
        path.to_path_buf()
    } else {
        PathBuf::from(format!("{}.csv", name))
    }
}

fn write_csv<W: Write>(mut writer: W, rows: &[(String, Contact)]) -> Result<()> {
    write_row(&mut writer, &HEADER)?;
    for (name, contact) in rows {
        let created = contact.created_at.to_rfc3339();
        let updated = contact.updated_at.to_rfc3339();
        write_row(
            &mut writer,
            &[
                name.as_str(),
                contact.phone.as_str(),
                contact.email.as_deref().unwrap_or(""),
                contact.address.as_deref().unwrap_or(""),
                contact.group.as_str(),
                created.as_str(),
                updated.as_str(),
            ],
        )?;
    }
    Ok(())
}

fn write_row<W: Write>(writer: &mut W, fields: &[&str]) -> Result<()> {
    let line = fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",");
    writer
        .write_all(format!("{}\r\n", line).as_bytes())
        .map_err(RolodexError::Io)
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewContact;

    #[test]
    fn writes_header_and_sorted_rows() {
        let mut contacts = ContactStore::new();
        contacts
            .create(NewContact::new("Zed", "5550000000"), false)
            .unwrap();
        contacts
            .create(
                NewContact::new("Amy", "555-111-2222")
                    .email("amy@example.com")
                    .address("1 Main St, Springfield")
                    .group("Work"),
                false,
            )
            .unwrap();

        let mut buf = Vec::new();
        write_csv(&mut buf, &contacts.all()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.split("\r\n").collect();

        assert_eq!(lines[0], "Name,Phone,Email,Address,Group,Created At,Updated At");
        assert!(lines[1].starts_with("Amy,5551112222,amy@example.com,\"1 Main St, Springfield\",Work,"));
        assert!(lines[2].starts_with("Zed,5550000000,,,Other,"));
        assert_eq!(lines[3], "");
    }

    #[test]
    fn escapes_quotes_and_newlines() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn export_path_defaults_and_extension() {
        assert_eq!(export_path(None), PathBuf::from(DEFAULT_EXPORT_FILE));
        assert_eq!(export_path(Some("  ")), PathBuf::from(DEFAULT_EXPORT_FILE));
        assert_eq!(export_path(Some("backup")), PathBuf::from("backup.csv"));
        assert_eq!(export_path(Some("out.csv")), PathBuf::from("out.csv"));
    }

    #[test]
    fn empty_book_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.csv");
        let result = run(&ContactStore::new(), target.to_str()).unwrap();
        assert!(result.export_path.is_none());
        assert!(!target.exists());
    }

    #[test]
    fn exports_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("book");
        let mut contacts = ContactStore::new();
        contacts
            .create(NewContact::new("Amy", "5551112222"), false)
            .unwrap();

        let result = run(&contacts, target.to_str()).unwrap();
        let written = result.export_path.unwrap();
        assert_eq!(written, dir.path().join("book.csv"));
        let text = std::fs::read_to_string(written).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
