use super::{to_json, DataStore, Loaded};
use crate::contacts::ContactStore;
use crate::error::{RolodexError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_DATA_FILE: &str = "contacts_data.json";

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(RolodexError::Io)?;
            }
        }
        Ok(())
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl DataStore for FileStore {
    fn load(&self) -> Loaded {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no contact file yet");
                return Loaded::fresh();
            }
            Err(e) => return Loaded::corrupt(e.to_string()),
        };

        let loaded = Loaded::from_json(&text);
        tracing::debug!(path = %self.path.display(), status = ?loaded.status, "loaded contacts");
        loaded
    }

    fn save(&mut self, contacts: &ContactStore) -> Result<()> {
        self.ensure_parent()?;
        let content = to_json(contacts)?;

        // Write beside the target, then rename over it.
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());
        let tmp = self
            .path
            .with_file_name(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));
        fs::write(&tmp, content).map_err(RolodexError::Io)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(RolodexError::Io(e));
        }

        tracing::debug!(path = %self.path.display(), count = contacts.len(), "saved contacts");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewContact;
    use crate::store::LoadStatus;

    #[test]
    fn missing_file_is_a_fresh_start() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("contacts.json"));
        let loaded = store.load();
        assert_eq!(loaded.status, LoadStatus::Missing);
        assert!(loaded.contacts.is_empty());
    }

    #[test]
    fn save_creates_parent_dirs_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("contacts.json");
        let mut store = FileStore::new(&path);

        let mut contacts = ContactStore::new();
        contacts
            .create(NewContact::new("Alice", "5551234567"), false)
            .unwrap();
        store.save(&contacts).unwrap();

        assert!(path.exists());
        let entries: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn unparsable_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        fs::write(&path, "{ not json").unwrap();

        let loaded = FileStore::new(&path).load();
        assert!(matches!(loaded.status, LoadStatus::Corrupt { .. }));
        assert!(loaded.contacts.is_empty());
    }

    #[test]
    fn directory_in_place_of_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = FileStore::new(dir.path()).load();
        assert!(matches!(loaded.status, LoadStatus::Corrupt { .. }));
    }

    #[test]
    fn save_into_a_directory_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        let err = store.save(&ContactStore::new()).unwrap_err();
        assert!(matches!(err, RolodexError::Io(_)));
    }
}
