use serde::Serialize;

use super::client::{role_prefix, ApiClient};
use super::ApiError;
use crate::models::{Appointment, AppointmentStatus, NewAppointment, Role};

/// Appointment resource contract.
pub trait AppointmentsGateway {
    fn list(&self) -> Result<Vec<Appointment>, ApiError>;
    fn create(&self, new: &NewAppointment) -> Result<Appointment, ApiError>;
    /// Full-payload update (nurse edit flow: rename, reschedule,
    /// change type); returns the appointment as the server persisted it.
    fn update(&self, appointment: &Appointment) -> Result<Appointment, ApiError>;
    /// Status-only update; returns the appointment as the server
    /// persisted it.
    fn set_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiError>;
    /// Deletes every appointment not in `pending` state, server-side.
    fn clear_non_pending(&self) -> Result<(), ApiError>;
}

/// `PUT /api/appointments/{id}` body when only the status changes.
#[derive(Serialize)]
struct StatusUpdate {
    status: AppointmentStatus,
}

/// Real gateway over the clinic backend.
pub struct ApiAppointments<'a> {
    client: &'a ApiClient,
    prefix: &'static str,
}

impl<'a> ApiAppointments<'a> {
    pub fn new(client: &'a ApiClient, role: Role) -> Self {
        Self {
            client,
            prefix: role_prefix(role),
        }
    }
}

impl AppointmentsGateway for ApiAppointments<'_> {
    fn list(&self) -> Result<Vec<Appointment>, ApiError> {
        self.client
            .get_list(&format!("{}/appointments", self.prefix))
    }

    fn create(&self, new: &NewAppointment) -> Result<Appointment, ApiError> {
        self.client.post("/api/appointments", new)
    }

    fn update(&self, appointment: &Appointment) -> Result<Appointment, ApiError> {
        self.client
            .put(&format!("/api/appointments/{}", appointment.id), appointment)
    }

    fn set_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiError> {
        self.client
            .put(&format!("/api/appointments/{id}"), &StatusUpdate { status })
    }

    fn clear_non_pending(&self) -> Result<(), ApiError> {
        self.client
            .delete(&format!("{}/appointments/clear-non-pending", self.prefix))
    }
}

/// In-memory gateway for tests and offline development.
pub struct MockAppointments {
    items: std::sync::Mutex<Vec<Appointment>>,
    fail: std::sync::atomic::AtomicBool,
}

impl MockAppointments {
    pub fn with_items(items: Vec<Appointment>) -> Self {
        Self {
            items: std::sync::Mutex::new(items),
            fail: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with a network error.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, std::sync::atomic::Ordering::Relaxed);
    }

    /// Server-side view of an appointment, for asserting reconciliation.
    pub fn stored(&self, id: i64) -> Option<Appointment> {
        self.items.lock().unwrap().iter().find(|a| a.id == id).cloned()
    }

    fn check_fail(&self) -> Result<(), ApiError> {
        if self.fail.load(std::sync::atomic::Ordering::Relaxed) {
            Err(ApiError::Network("mock failure".into()))
        } else {
            Ok(())
        }
    }
}

impl AppointmentsGateway for MockAppointments {
    fn list(&self) -> Result<Vec<Appointment>, ApiError> {
        self.check_fail()?;
        Ok(self.items.lock().unwrap().clone())
    }

    fn create(&self, new: &NewAppointment) -> Result<Appointment, ApiError> {
        self.check_fail()?;
        let mut items = self.items.lock().unwrap();
        let id = items.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let created = Appointment {
            id,
            patient_id: new.patient_id,
            patient_name: new.patient_name.clone(),
            appointment_date: new.appointment_date,
            appointment_type: new.appointment_type,
            status: new.status,
            notes: None,
            nurse_id: Some(new.nurse_id),
        };
        items.push(created.clone());
        Ok(created)
    }

    fn update(&self, appointment: &Appointment) -> Result<Appointment, ApiError> {
        self.check_fail()?;
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|a| a.id == appointment.id) {
            Some(existing) => {
                *existing = appointment.clone();
                Ok(existing.clone())
            }
            None => Err(ApiError::NotFound(format!(
                "appointment {}",
                appointment.id
            ))),
        }
    }

    fn set_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiError> {
        self.check_fail()?;
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|a| a.id == id) {
            Some(appt) => {
                appt.status = status;
                Ok(appt.clone())
            }
            None => Err(ApiError::NotFound(format!("appointment {id}"))),
        }
    }

    fn clear_non_pending(&self) -> Result<(), ApiError> {
        self.check_fail()?;
        self.items
            .lock()
            .unwrap()
            .retain(|a| a.status == AppointmentStatus::Pending);
        Ok(())
    }
}
