use serde::{Deserialize, Serialize};

/// Medical report as stored by the backend. Append-only from the
/// client's perspective: no edit or delete endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub patient_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<i64>,
    pub content: String,
}

/// Create payload for `POST /api/reports`. A report always references
/// exactly one patient and optionally one appointment.
#[derive(Debug, Clone, Serialize)]
pub struct NewReport {
    pub patient_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<i64>,
    pub content: String,
}

impl NewReport {
    pub fn for_patient(patient_id: i64, content: &str) -> Self {
        Self {
            patient_id,
            appointment_id: None,
            content: content.to_string(),
        }
    }

    pub fn for_appointment(patient_id: i64, appointment_id: i64, content: &str) -> Self {
        Self {
            patient_id,
            appointment_id: Some(appointment_id),
            content: content.to_string(),
        }
    }
}
