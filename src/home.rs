//! Dashboard data assembly: the two independent fetches a dashboard
//! mount issues. They share no mutable state, and a failure of one must
//! not block rendering the other's data.

use crate::api::{ApiError, AppointmentsGateway, PatientsGateway};
use crate::models::{dedup_by_id, Appointment, Patient};

/// Everything a role dashboard needs on mount. Errors are carried
/// alongside the data so the screen can render what arrived and show an
/// inline message for what did not.
pub struct DashboardData {
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub patients_error: Option<ApiError>,
    pub appointments_error: Option<ApiError>,
}

impl DashboardData {
    pub fn has_errors(&self) -> bool {
        self.patients_error.is_some() || self.appointments_error.is_some()
    }
}

/// Fetch patients and appointments, deduplicating each list by id.
pub fn load_dashboard<P: PatientsGateway, A: AppointmentsGateway>(
    patients: &P,
    appointments: &A,
) -> DashboardData {
    let (patients, patients_error) = match patients.list() {
        Ok(list) => (dedup_by_id(list, |p| p.id), None),
        Err(e) => {
            tracing::warn!(error = %e, "Patients fetch failed");
            (Vec::new(), Some(e))
        }
    };

    let (appointments, appointments_error) = match appointments.list() {
        Ok(list) => (dedup_by_id(list, |a| a.id), None),
        Err(e) => {
            tracing::warn!(error = %e, "Appointments fetch failed");
            (Vec::new(), Some(e))
        }
    };

    DashboardData {
        patients,
        appointments,
        patients_error,
        appointments_error,
    }
}
