use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A user profile as served by `/api/users/{user_id}`.
///
/// Deliberately carries no credential material: one upstream data source
/// leaked a `password` field into this payload, which is a defect, not a
/// contract. The type not having the field makes the leak unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub balance: f64,
    pub email: String,
    pub join_date: NaiveDate,
}
