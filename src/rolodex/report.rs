//! Read-only summaries over the contact book.

use crate::contacts::ContactStore;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

pub const DEFAULT_RECENT_DAYS: i64 = 7;

pub fn group_counts(contacts: &ContactStore) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for (_, contact) in contacts.iter() {
        *counts.entry(contact.group.clone()).or_insert(0) += 1;
    }
    counts
}

/// Records whose `updated_at` is strictly after `now - window`. A window
/// reaching past the earliest representable time counts every record.
pub fn recently_updated_count(contacts: &ContactStore, now: DateTime<Utc>, window: Duration) -> usize {
    let Some(cutoff) = now.checked_sub_signed(window) else {
        return contacts.len();
    };
    contacts
        .iter()
        .filter(|(_, contact)| contact.updated_at > cutoff)
        .count()
}

fn window(days: i64) -> Duration {
    Duration::try_days(days).unwrap_or(Duration::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub groups: BTreeMap<String, usize>,
    pub recently_updated: usize,
    pub window_days: i64,
}

impl Stats {
    pub fn compute(contacts: &ContactStore, now: DateTime<Utc>, window_days: i64) -> Self {
        Self {
            total: contacts.len(),
            groups: group_counts(contacts),
            recently_updated: recently_updated_count(contacts, now, window(window_days)),
            window_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContactUpdate, NewContact};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn book() -> ContactStore {
        let mut contacts = ContactStore::new();
        let entries = [
            ("Alice", "Friends", 1),
            ("Bob", "Work", 3),
            ("Carol", "Work", 10),
            ("Dan", "", 30),
        ];
        for (name, group, days_ago) in entries {
            contacts
                .create_at(
                    NewContact::new(name, "5551234567").group(group),
                    false,
                    now() - Duration::days(days_ago),
                )
                .unwrap();
        }
        contacts
    }

    #[test]
    fn counts_groups() {
        let counts = group_counts(&book());
        assert_eq!(counts.get("Work"), Some(&2));
        assert_eq!(counts.get("Friends"), Some(&1));
        assert_eq!(counts.get("Other"), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), 4);
    }

    #[test]
    fn counts_recent_updates_within_window() {
        let mut contacts = book();
        assert_eq!(recently_updated_count(&contacts, now(), Duration::days(7)), 2);

        contacts
            .update_at(
                "Dan",
                ContactUpdate::default().group("Family"),
                now() - Duration::hours(2),
            )
            .unwrap();
        assert_eq!(recently_updated_count(&contacts, now(), Duration::days(7)), 3);
    }

    #[test]
    fn window_boundary_is_exclusive() {
        let mut contacts = ContactStore::new();
        contacts
            .create_at(
                NewContact::new("Edge", "5551234567"),
                false,
                now() - Duration::days(7),
            )
            .unwrap();
        assert_eq!(recently_updated_count(&contacts, now(), Duration::days(7)), 0);
    }

    #[test]
    fn stats_on_empty_book() {
        let stats = Stats::compute(&ContactStore::new(), now(), DEFAULT_RECENT_DAYS);
        assert_eq!(stats.total, 0);
        assert!(stats.groups.is_empty());
        assert_eq!(stats.recently_updated, 0);
    }

    #[test]
    fn stats_summarize_book() {
        let stats = Stats::compute(&book(), now(), 14);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.recently_updated, 3);
        assert_eq!(stats.window_days, 14);
    }

    #[test]
    fn huge_window_counts_everything() {
        let stats = Stats::compute(&book(), now(), 1_000_000_000);
        assert_eq!(stats.recently_updated, 4);
        assert_eq!(
            recently_updated_count(&book(), now(), Duration::MAX),
            4
        );
    }
}
