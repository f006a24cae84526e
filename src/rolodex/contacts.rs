//! # Contact Store
//!
//! The in-memory mapping from contact name to [`Contact`]. Every mutation goes
//! through the methods here, which is where the record invariants live:
//!
//! - names are trimmed, non-empty, case-sensitive and unique
//! - phones written through `create`/`update` are validated and normalized
//! - `updated_at >= created_at`, and `created_at` never moves
//!
//! Reads hand out clones, so nothing outside the store holds a reference into
//! a record across a mutation. The map is a `BTreeMap`, which keeps listings
//! and the serialized file in name order.
//!
//! The store knows nothing about files. Persistence lives in [`crate::store`].

use crate::error::{RolodexError, Result};
use crate::model::{Contact, ContactUpdate, Field, NewContact, DEFAULT_GROUP};
use crate::validate::{normalize_name, validate_email, validate_phone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactStore {
    records: BTreeMap<String, Contact>,
}

/// Outcome of a partial update: each supplied field lands in exactly one of
/// `applied`, `unchanged` or `rejected`.
#[derive(Debug)]
pub struct UpdateReport {
    pub name: String,
    pub applied: Vec<Field>,
    pub unchanged: Vec<Field>,
    pub rejected: Vec<(Field, RolodexError)>,
    pub contact: Contact,
}

impl UpdateReport {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name.trim())
    }

    pub fn get(&self, name: &str) -> Option<Contact> {
        self.records.get(name.trim()).cloned()
    }

    pub fn create(&mut self, new: NewContact, overwrite: bool) -> Result<Contact> {
        self.create_at(new, overwrite, Utc::now())
    }

    pub(crate) fn create_at(
        &mut self,
        new: NewContact,
        overwrite: bool,
        now: DateTime<Utc>,
    ) -> Result<Contact> {
        let name = normalize_name(&new.name)?;
        if !overwrite && self.records.contains_key(&name) {
            return Err(RolodexError::AlreadyExists(name));
        }

        let phone = validate_phone(&new.phone)?;
        let email = non_blank(new.email);
        if let Some(email) = &email {
            if !validate_email(email) {
                return Err(RolodexError::InvalidEmail(email.clone()));
            }
        }
        let address = non_blank(new.address);
        let group = non_blank(new.group).unwrap_or_else(|| DEFAULT_GROUP.to_string());

        let contact = Contact::new(phone, email, address, group, now);
        self.records.insert(name, contact.clone());
        Ok(contact)
    }

    /// Case-insensitive substring match against names, in name order.
    pub fn find(&self, query: &str) -> Vec<(String, Contact)> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|(name, _)| name.to_lowercase().contains(&needle))
            .map(|(name, contact)| (name.clone(), contact.clone()))
            .collect()
    }

    pub fn update(&mut self, name: &str, update: ContactUpdate) -> Result<UpdateReport> {
        self.update_at(name, update, Utc::now())
    }

    /// Applies each supplied field on its own. A bad phone does not stop a
    /// good address from landing; `updated_at` moves only if something did.
    pub(crate) fn update_at(
        &mut self,
        name: &str,
        update: ContactUpdate,
        now: DateTime<Utc>,
    ) -> Result<UpdateReport> {
        let key = name.trim();
        let contact = self
            .records
            .get_mut(key)
            .ok_or_else(|| RolodexError::NotFound(key.to_string()))?;

        let mut report = UpdateReport {
            name: key.to_string(),
            applied: Vec::new(),
            unchanged: Vec::new(),
            rejected: Vec::new(),
            contact: contact.clone(),
        };

        if let Some(raw) = non_blank(update.phone) {
            match validate_phone(&raw) {
                Ok(phone) if phone == contact.phone => report.unchanged.push(Field::Phone),
                Ok(phone) => {
                    contact.phone = phone;
                    report.applied.push(Field::Phone);
                }
                Err(e) => report.rejected.push((Field::Phone, e)),
            }
        }

        if let Some(email) = non_blank(update.email) {
            if !validate_email(&email) {
                report
                    .rejected
                    .push((Field::Email, RolodexError::InvalidEmail(email)));
            } else if contact.email.as_deref() == Some(email.as_str()) {
                report.unchanged.push(Field::Email);
            } else {
                contact.email = Some(email);
                report.applied.push(Field::Email);
            }
        }

        if let Some(address) = non_blank(update.address) {
            if contact.address.as_deref() == Some(address.as_str()) {
                report.unchanged.push(Field::Address);
            } else {
                contact.address = Some(address);
                report.applied.push(Field::Address);
            }
        }

        if let Some(group) = non_blank(update.group) {
            if contact.group == group {
                report.unchanged.push(Field::Group);
            } else {
                contact.group = group;
                report.applied.push(Field::Group);
            }
        }

        if report.changed() {
            // Records loaded from disk may carry odd timestamps; never go backwards.
            contact.updated_at = now.max(contact.created_at);
        }
        report.contact = contact.clone();
        Ok(report)
    }

    pub fn delete(&mut self, name: &str) -> bool {
        self.records.remove(name.trim()).is_some()
    }

    pub fn all(&self) -> Vec<(String, Contact)> {
        self.records
            .iter()
            .map(|(name, contact)| (name.clone(), contact.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Contact)> {
        self.records.iter()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
