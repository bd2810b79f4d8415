//! Appointment status workflow over a cached list.
//!
//! Lifecycle: `pending → done` and `pending → cancelled`, both terminal.
//! Writes are confirmation-first: the cache is only touched after the
//! backend confirms, and the cached entity is replaced with the
//! server-returned one rather than a locally-guessed merge. On any
//! gateway failure the cache is left as it was so the user can retry.

use crate::api::{ApiError, AppointmentsGateway};
use crate::models::filters::{self, SortOrder, StatusFilter};
use crate::models::{dedup_by_id, Appointment, AppointmentStatus, NewAppointment};

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Appointment {id} is not in the cached list")]
    UnknownAppointment { id: i64 },
    #[error("Appointment {id} is {status}; only pending appointments can transition")]
    NotPending {
        id: i64,
        status: AppointmentStatus,
    },
    #[error("{0} is not a terminal status")]
    InvalidTarget(AppointmentStatus),
    #[error(transparent)]
    Gateway(#[from] ApiError),
}

/// Cached appointment list plus the transition rules over it.
pub struct AppointmentWorkflow<G: AppointmentsGateway> {
    gateway: G,
    cache: Vec<Appointment>,
}

impl<G: AppointmentsGateway> AppointmentWorkflow<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            cache: Vec::new(),
        }
    }

    /// The cached list, possibly stale until the next `refresh`.
    pub fn appointments(&self) -> &[Appointment] {
        &self.cache
    }

    /// Re-fetch from the backend, collapsing duplicate ids (last-seen
    /// wins). On failure the previous cache is kept.
    pub fn refresh(&mut self) -> Result<(), WorkflowError> {
        let fetched = self.gateway.list()?;
        self.cache = dedup_by_id(fetched, |a| a.id);
        Ok(())
    }

    /// Create a new appointment (enters the lifecycle as `pending`) and
    /// cache the server-assigned entity.
    pub fn create(&mut self, new: &NewAppointment) -> Result<Appointment, WorkflowError> {
        let created = self.gateway.create(new)?;
        self.cache.push(created.clone());
        Ok(created)
    }

    /// Transition an appointment to a terminal status.
    ///
    /// Only valid from `pending`; a terminal appointment is rejected
    /// here even if a screen left its buttons clickable. The cached
    /// entity is replaced with what the server persisted.
    pub fn apply_status(
        &mut self,
        id: i64,
        target: AppointmentStatus,
    ) -> Result<Appointment, WorkflowError> {
        if !target.is_terminal() {
            return Err(WorkflowError::InvalidTarget(target));
        }
        let current = self
            .cache
            .iter()
            .find(|a| a.id == id)
            .ok_or(WorkflowError::UnknownAppointment { id })?;
        if current.status != AppointmentStatus::Pending {
            return Err(WorkflowError::NotPending {
                id,
                status: current.status,
            });
        }

        let confirmed = self.gateway.set_status(id, target)?;
        if let Some(slot) = self.cache.iter_mut().find(|a| a.id == id) {
            *slot = confirmed.clone();
        }
        tracing::info!(id, status = %confirmed.status, "Appointment status applied");
        Ok(confirmed)
    }

    /// Delete every non-pending appointment server-side, then drop them
    /// from the cache. Destructive and non-undoable: screens must ask
    /// for explicit confirmation before calling this. Returns how many
    /// entries were removed locally.
    pub fn clear_non_pending(&mut self) -> Result<usize, WorkflowError> {
        self.gateway.clear_non_pending()?;
        let before = self.cache.len();
        self.cache
            .retain(|a| a.status == AppointmentStatus::Pending);
        let removed = before - self.cache.len();
        tracing::info!(removed, "Cleared non-pending appointments");
        Ok(removed)
    }

    /// Cached appointments matching a status filter. Pure transform.
    pub fn filtered(&self, filter: StatusFilter) -> Vec<&Appointment> {
        filters::filter_by_status(&self.cache, filter)
    }

    /// Cached appointments sorted by date. Pure transform.
    pub fn sorted_by_date(&self, order: SortOrder) -> Vec<&Appointment> {
        filters::sort_by_date(&self.cache, order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockAppointments;
    use crate::models::AppointmentType;
    use chrono::NaiveDate;

    fn appt(id: i64, status: AppointmentStatus) -> Appointment {
        Appointment {
            id,
            patient_id: None,
            patient_name: format!("Patient {id}"),
            appointment_date: NaiveDate::from_ymd_opt(2026, 9, 4)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            appointment_type: AppointmentType::Checkup,
            status,
            notes: None,
            nurse_id: None,
        }
    }

    fn workflow_with(
        items: Vec<Appointment>,
    ) -> AppointmentWorkflow<MockAppointments> {
        let mut workflow = AppointmentWorkflow::new(MockAppointments::with_items(items));
        workflow.refresh().unwrap();
        workflow
    }

    #[test]
    fn pending_transitions_to_done() {
        let mut workflow = workflow_with(vec![appt(1, AppointmentStatus::Pending)]);
        let confirmed = workflow.apply_status(1, AppointmentStatus::Done).unwrap();
        assert_eq!(confirmed.status, AppointmentStatus::Done);
        // the cache slot is the server-side row, field for field
        assert_eq!(
            workflow.appointments()[0],
            workflow.gateway.stored(1).unwrap()
        );
    }

    #[test]
    fn terminal_appointment_is_rejected_not_retransitioned() {
        let mut workflow = workflow_with(vec![appt(1, AppointmentStatus::Done)]);
        let err = workflow
            .apply_status(1, AppointmentStatus::Cancelled)
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::NotPending {
                id: 1,
                status: AppointmentStatus::Done,
            }
        ));
        // never reverts, never re-transitions
        assert_eq!(workflow.appointments()[0].status, AppointmentStatus::Done);
    }

    #[test]
    fn pending_is_not_a_valid_target() {
        let mut workflow = workflow_with(vec![appt(1, AppointmentStatus::Pending)]);
        assert!(matches!(
            workflow.apply_status(1, AppointmentStatus::Pending),
            Err(WorkflowError::InvalidTarget(AppointmentStatus::Pending))
        ));
    }

    #[test]
    fn unknown_id_is_rejected_before_any_request() {
        let mut workflow = workflow_with(vec![]);
        assert!(matches!(
            workflow.apply_status(42, AppointmentStatus::Done),
            Err(WorkflowError::UnknownAppointment { id: 42 })
        ));
    }

    #[test]
    fn gateway_failure_leaves_cache_pending_for_retry() {
        let mut workflow = workflow_with(vec![appt(1, AppointmentStatus::Pending)]);
        workflow.gateway.set_fail(true);

        let err = workflow.apply_status(1, AppointmentStatus::Done).unwrap_err();
        assert!(matches!(err, WorkflowError::Gateway(ApiError::Network(_))));
        // no optimistic mutation happened
        assert_eq!(
            workflow.appointments()[0].status,
            AppointmentStatus::Pending
        );

        workflow.gateway.set_fail(false);
        workflow.apply_status(1, AppointmentStatus::Done).unwrap();
        assert_eq!(workflow.appointments()[0].status, AppointmentStatus::Done);
    }

    #[test]
    fn cache_takes_server_entity_not_a_local_merge() {
        // gateway that annotates the entity on update, as a backend
        // trigger might
        struct AnnotatingGateway(MockAppointments);
        impl AppointmentsGateway for AnnotatingGateway {
            fn list(&self) -> Result<Vec<Appointment>, ApiError> {
                self.0.list()
            }
            fn create(&self, new: &NewAppointment) -> Result<Appointment, ApiError> {
                self.0.create(new)
            }
            fn update(&self, appointment: &Appointment) -> Result<Appointment, ApiError> {
                self.0.update(appointment)
            }
            fn set_status(
                &self,
                id: i64,
                status: AppointmentStatus,
            ) -> Result<Appointment, ApiError> {
                let mut confirmed = self.0.set_status(id, status)?;
                confirmed.notes = Some("closed by backend".into());
                Ok(confirmed)
            }
            fn clear_non_pending(&self) -> Result<(), ApiError> {
                self.0.clear_non_pending()
            }
        }

        let gateway =
            AnnotatingGateway(MockAppointments::with_items(vec![appt(
                1,
                AppointmentStatus::Pending,
            )]));
        let mut workflow = AppointmentWorkflow::new(gateway);
        workflow.refresh().unwrap();

        workflow.apply_status(1, AppointmentStatus::Done).unwrap();
        assert_eq!(
            workflow.appointments()[0].notes.as_deref(),
            Some("closed by backend")
        );
    }

    #[test]
    fn clear_non_pending_never_removes_pending() {
        let mut workflow = workflow_with(vec![
            appt(1, AppointmentStatus::Pending),
            appt(2, AppointmentStatus::Done),
            appt(3, AppointmentStatus::Cancelled),
            appt(4, AppointmentStatus::Pending),
        ]);
        let removed = workflow.clear_non_pending().unwrap();
        assert_eq!(removed, 2);
        assert!(workflow
            .appointments()
            .iter()
            .all(|a| a.status == AppointmentStatus::Pending));
        assert_eq!(workflow.appointments().len(), 2);
    }

    #[test]
    fn clear_non_pending_failure_leaves_cache_untouched() {
        let mut workflow = workflow_with(vec![
            appt(1, AppointmentStatus::Pending),
            appt(2, AppointmentStatus::Done),
        ]);
        workflow.gateway.set_fail(true);
        assert!(workflow.clear_non_pending().is_err());
        assert_eq!(workflow.appointments().len(), 2);
    }

    #[test]
    fn refresh_collapses_duplicate_ids_keeping_last_seen() {
        let mut stale = appt(1, AppointmentStatus::Pending);
        stale.notes = Some("stale".into());
        let mut fresh = appt(1, AppointmentStatus::Pending);
        fresh.notes = Some("fresh".into());

        let workflow = workflow_with(vec![stale, appt(2, AppointmentStatus::Pending), fresh]);
        assert_eq!(workflow.appointments().len(), 2);
        assert_eq!(
            workflow.appointments()[0].notes.as_deref(),
            Some("fresh")
        );
    }

    #[test]
    fn filter_and_sort_are_pure_over_the_cache() {
        let workflow = workflow_with(vec![
            appt(1, AppointmentStatus::Pending),
            appt(2, AppointmentStatus::Cancelled),
            appt(3, AppointmentStatus::Done),
        ]);
        let cancelled =
            workflow.filtered(StatusFilter::Only(AppointmentStatus::Cancelled));
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].id, 2);
        // the cache itself is untouched
        assert_eq!(workflow.appointments().len(), 3);

        let newest_first = workflow.sorted_by_date(SortOrder::Descending);
        assert_eq!(newest_first.len(), 3);
    }
}
