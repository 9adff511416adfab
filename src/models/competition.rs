use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One entry in a user's competition history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionRecord {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rank: u32,
    /// Percentage return over the competition window.
    pub performance: f64,
}
