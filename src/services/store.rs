use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{CompetitionRecord, UserProfile};

/// Read-only lookup of user profiles.
///
/// Route handlers only ever see this trait, so the seeded in-memory map
/// below can be swapped for a real persistence layer without touching them.
pub trait UserStore: Send + Sync {
    fn get(&self, user_id: &str) -> Option<UserProfile>;
}

/// Read-only lookup of a user's competition history.
pub trait CompetitionStore: Send + Sync {
    /// Returns the user's records, empty when the user has none.
    /// An unknown user is not an error here.
    fn list_for_user(&self, user_id: &str) -> Vec<CompetitionRecord>;
}

pub struct InMemoryUserStore {
    users: HashMap<String, UserProfile>,
}

impl InMemoryUserStore {
    pub fn new(users: HashMap<String, UserProfile>) -> Self {
        Self { users }
    }

    /// Store pre-loaded with the fixture account the frontend expects.
    pub fn seeded() -> Self {
        let mut users = HashMap::new();
        users.insert(
            "current-user-id".to_string(),
            UserProfile {
                username: "JohnDoe".to_string(),
                balance: 10000.75,
                email: "john@example.com".to_string(),
                join_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            },
        );
        Self::new(users)
    }
}

impl UserStore for InMemoryUserStore {
    fn get(&self, user_id: &str) -> Option<UserProfile> {
        self.users.get(user_id).cloned()
    }
}

pub struct InMemoryCompetitionStore {
    entries: HashMap<String, Vec<CompetitionRecord>>,
}

impl InMemoryCompetitionStore {
    pub fn new(entries: HashMap<String, Vec<CompetitionRecord>>) -> Self {
        Self { entries }
    }

    pub fn seeded() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            "current-user-id".to_string(),
            vec![
                CompetitionRecord {
                    id: "1".to_string(),
                    name: "Weekly Challenge #5".to_string(),
                    start_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2025, 5, 7).unwrap(),
                    rank: 3,
                    performance: 7.2,
                },
                CompetitionRecord {
                    id: "2".to_string(),
                    name: "Monthly Investor".to_string(),
                    start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
                    rank: 12,
                    performance: 4.8,
                },
            ],
        );
        Self::new(entries)
    }
}

impl CompetitionStore for InMemoryCompetitionStore {
    fn list_for_user(&self, user_id: &str) -> Vec<CompetitionRecord> {
        self.entries.get(user_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_user_lookup() {
        let store = InMemoryUserStore::seeded();

        let user = store.get("current-user-id").unwrap();
        assert_eq!(user.username, "JohnDoe");
        assert_eq!(user.balance, 10000.75);

        assert!(store.get("unknown-id").is_none());
    }

    #[test]
    fn test_seeded_competition_history() {
        let store = InMemoryCompetitionStore::seeded();

        let records = store.list_for_user("current-user-id");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].rank, 3);
        assert_eq!(records[1].name, "Monthly Investor");
    }

    #[test]
    fn test_unknown_user_has_empty_history() {
        let store = InMemoryCompetitionStore::seeded();
        assert!(store.list_for_user("unknown-id").is_empty());
    }
}
