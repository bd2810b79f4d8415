use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Transient id for a patient that has not been created server-side yet.
/// Downstream screens treat it as "create, never update/delete".
pub const PLACEHOLDER_ID: i64 = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<NaiveDate>,
}

impl Patient {
    /// New, not-yet-persisted patient. The backend assigns the real id
    /// on create.
    pub fn new(first_name: &str, last_name: &str, birth_date: NaiveDate) -> Self {
        Self {
            id: PLACEHOLDER_ID,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birth_date,
            symptoms: None,
            recovery_days: None,
            prescription: None,
            visit_date: None,
        }
    }

    /// True while the patient only exists client-side.
    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_ID
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
