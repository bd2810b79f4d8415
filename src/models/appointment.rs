use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::{AppointmentStatus, AppointmentType};

/// Backend datetime format: `"YYYY-MM-DD HH:MM:SS"`, no timezone.
pub(crate) mod wire_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,
    pub patient_name: String,
    #[serde(with = "wire_datetime")]
    pub appointment_date: NaiveDateTime,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nurse_id: Option<i64>,
}

/// Create payload for `POST /api/appointments`. Nurse-authored;
/// appointments always enter the lifecycle as `pending`.
#[derive(Debug, Clone, Serialize)]
pub struct NewAppointment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,
    pub patient_name: String,
    #[serde(with = "wire_datetime")]
    pub appointment_date: NaiveDateTime,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub nurse_id: i64,
}

impl NewAppointment {
    pub fn new(
        nurse_id: i64,
        patient_id: Option<i64>,
        patient_name: &str,
        appointment_date: NaiveDateTime,
        appointment_type: AppointmentType,
    ) -> Self {
        Self {
            patient_id,
            patient_name: patient_name.to_string(),
            appointment_date,
            appointment_type,
            status: AppointmentStatus::Pending,
            nurse_id,
        }
    }
}
