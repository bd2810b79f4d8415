//! Per-role view routing: a finite set of named screens, a static
//! allow-list per role, and two hand-off slots carrying the selected
//! patient/appointment into the next screen as value snapshots.
//!
//! Leaving a screen clears the slots it consumed, so a stale selection
//! can never leak into an unrelated screen later. The dashboard is both
//! the initial view and where every back/cancel action lands.

use crate::models::{Appointment, Patient, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Dashboard,
    PatientsList,
    PatientDetail,
    AddPatient,
    EditPatient,
    AddAppointment,
    Report,
    StaffManagement,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::PatientsList => "patients_list",
            Self::PatientDetail => "patient_detail",
            Self::AddPatient => "add_patient",
            Self::EditPatient => "edit_patient",
            Self::AddAppointment => "add_appointment",
            Self::Report => "report",
            Self::StaffManagement => "staff_management",
        }
    }

    /// Which hand-off slots this screen consumes: (patient, appointment).
    fn consumes(self) -> (bool, bool) {
        match self {
            Self::PatientDetail | Self::EditPatient => (true, false),
            Self::Report => (true, true),
            _ => (false, false),
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static allow-list: which views a role can reach at all. Not dynamic
/// permission computation.
pub fn allowed_views(role: Role) -> &'static [View] {
    match role {
        Role::Admin => &[
            View::Dashboard,
            View::PatientsList,
            View::PatientDetail,
            View::StaffManagement,
        ],
        Role::Doctor => &[
            View::Dashboard,
            View::PatientsList,
            View::PatientDetail,
            View::Report,
        ],
        Role::Nurse => &[
            View::Dashboard,
            View::PatientsList,
            View::AddPatient,
            View::AddAppointment,
            View::PatientDetail,
            View::EditPatient,
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    #[error("View {view} is not reachable for role {role}")]
    NotReachable { role: Role, view: View },
}

/// One router instance per authenticated session.
pub struct ViewRouter {
    role: Role,
    current: View,
    selected_patient: Option<Patient>,
    selected_appointment: Option<Appointment>,
}

impl ViewRouter {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            current: View::Dashboard,
            selected_patient: None,
            selected_appointment: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn selected_patient(&self) -> Option<&Patient> {
        self.selected_patient.as_ref()
    }

    pub fn selected_appointment(&self) -> Option<&Appointment> {
        self.selected_appointment.as_ref()
    }

    /// Navigate without a hand-off payload.
    pub fn go_to(&mut self, target: View) -> Result<View, RouterError> {
        self.transition(target, None, None)
    }

    /// Select a patient from a table and open their detail screen.
    pub fn select_patient(&mut self, patient: Patient) -> Result<View, RouterError> {
        self.transition(View::PatientDetail, Some(patient), None)
    }

    /// Open the edit form for a patient (nurse flow).
    pub fn edit_patient(&mut self, patient: Patient) -> Result<View, RouterError> {
        self.transition(View::EditPatient, Some(patient), None)
    }

    /// Open report authoring for a patient and/or appointment (doctor
    /// flow). At least one must be provided or the guard sends the
    /// router back to the dashboard.
    pub fn open_report(
        &mut self,
        patient: Option<Patient>,
        appointment: Option<Appointment>,
    ) -> Result<View, RouterError> {
        self.transition(View::Report, patient, appointment)
    }

    /// Back/cancel: always returns to the dashboard.
    pub fn back(&mut self) -> View {
        self.clear_consumed();
        self.current = View::Dashboard;
        View::Dashboard
    }

    fn transition(
        &mut self,
        target: View,
        patient: Option<Patient>,
        appointment: Option<Appointment>,
    ) -> Result<View, RouterError> {
        if !allowed_views(self.role).contains(&target) {
            return Err(RouterError::NotReachable {
                role: self.role,
                view: target,
            });
        }

        // leaving the current screen drops the selections it consumed
        self.clear_consumed();

        // incoming hand-off payload
        if let Some(p) = patient {
            self.selected_patient = Some(p);
        }
        if let Some(a) = appointment {
            self.selected_appointment = Some(a);
        }

        // guard: a consuming screen entered without its selection is an
        // error state — land on the dashboard instead of rendering a
        // broken form
        if !self.guard_satisfied(target) {
            tracing::warn!(view = %target, "Entered without a selection, returning to dashboard");
            self.selected_patient = None;
            self.selected_appointment = None;
            self.current = View::Dashboard;
            return Ok(View::Dashboard);
        }

        self.current = target;
        Ok(target)
    }

    fn guard_satisfied(&self, target: View) -> bool {
        match target {
            View::Report => {
                self.selected_patient.is_some() || self.selected_appointment.is_some()
            }
            View::PatientDetail | View::EditPatient => self.selected_patient.is_some(),
            _ => true,
        }
    }

    fn clear_consumed(&mut self) {
        let (patient, appointment) = self.current.consumes();
        if patient {
            self.selected_patient = None;
        }
        if appointment {
            self.selected_appointment = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{AppointmentStatus, AppointmentType};
    use chrono::NaiveDate;

    fn patient() -> Patient {
        let mut p = Patient::new(
            "Arta",
            "Berisha",
            NaiveDate::from_ymd_opt(1990, 5, 14).unwrap(),
        );
        p.id = 7;
        p
    }

    fn appointment() -> Appointment {
        Appointment {
            id: 4,
            patient_id: Some(7),
            patient_name: "Arta Berisha".into(),
            appointment_date: NaiveDate::from_ymd_opt(2026, 9, 4)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            appointment_type: AppointmentType::Checkup,
            status: AppointmentStatus::Pending,
            notes: None,
            nurse_id: None,
        }
    }

    #[test]
    fn initial_view_is_dashboard() {
        let router = ViewRouter::new(Role::Nurse);
        assert_eq!(router.current(), View::Dashboard);
        assert!(router.selected_patient().is_none());
        assert!(router.selected_appointment().is_none());
    }

    #[test]
    fn nurse_allow_list_is_exactly_six_views() {
        let views = allowed_views(Role::Nurse);
        assert_eq!(
            views,
            &[
                View::Dashboard,
                View::PatientsList,
                View::AddPatient,
                View::AddAppointment,
                View::PatientDetail,
                View::EditPatient,
            ]
        );
        assert!(!views.contains(&View::Report));
        assert!(!views.contains(&View::StaffManagement));
    }

    #[test]
    fn nurse_cannot_reach_report_authoring() {
        let mut router = ViewRouter::new(Role::Nurse);
        let err = router.open_report(Some(patient()), None).unwrap_err();
        assert_eq!(
            err,
            RouterError::NotReachable {
                role: Role::Nurse,
                view: View::Report,
            }
        );
        // failed transition leaves the router untouched
        assert_eq!(router.current(), View::Dashboard);
        assert!(router.selected_patient().is_none());
    }

    #[test]
    fn report_without_any_selection_redirects_to_dashboard() {
        let mut router = ViewRouter::new(Role::Doctor);
        let landed = router.go_to(View::Report).unwrap();
        assert_eq!(landed, View::Dashboard);
        assert_eq!(router.current(), View::Dashboard);
    }

    #[test]
    fn report_with_appointment_only_is_allowed() {
        let mut router = ViewRouter::new(Role::Doctor);
        let landed = router.open_report(None, Some(appointment())).unwrap();
        assert_eq!(landed, View::Report);
        assert_eq!(router.selected_appointment().unwrap().id, 4);
    }

    #[test]
    fn leaving_report_clears_both_slots() {
        let mut router = ViewRouter::new(Role::Doctor);
        router
            .open_report(Some(patient()), Some(appointment()))
            .unwrap();
        router.back();
        assert_eq!(router.current(), View::Dashboard);
        assert!(router.selected_patient().is_none());
        assert!(router.selected_appointment().is_none());
    }

    #[test]
    fn selection_survives_detail_to_edit_handoff() {
        let mut router = ViewRouter::new(Role::Nurse);
        router.go_to(View::PatientsList).unwrap();
        router.select_patient(patient()).unwrap();
        assert_eq!(router.current(), View::PatientDetail);

        // edit re-hands the same patient forward
        let p = router.selected_patient().unwrap().clone();
        router.edit_patient(p).unwrap();
        assert_eq!(router.current(), View::EditPatient);
        assert_eq!(router.selected_patient().unwrap().id, 7);

        // leaving the edit screen drops it
        router.back();
        assert!(router.selected_patient().is_none());
    }

    #[test]
    fn patient_detail_without_selection_redirects_to_dashboard() {
        let mut router = ViewRouter::new(Role::Nurse);
        router.go_to(View::PatientsList).unwrap();
        let landed = router.go_to(View::PatientDetail).unwrap();
        assert_eq!(landed, View::Dashboard);
    }

    #[test]
    fn stale_selection_does_not_leak_into_later_screens() {
        let mut router = ViewRouter::new(Role::Nurse);
        router.select_patient(patient()).unwrap();
        router.go_to(View::AddAppointment).unwrap();
        // PatientDetail consumed the slot; AddAppointment starts clean
        assert!(router.selected_patient().is_none());
    }

    #[test]
    fn admin_reaches_staff_management_but_doctor_does_not() {
        let mut admin = ViewRouter::new(Role::Admin);
        assert_eq!(
            admin.go_to(View::StaffManagement).unwrap(),
            View::StaffManagement
        );

        let mut doctor = ViewRouter::new(Role::Doctor);
        assert!(doctor.go_to(View::StaffManagement).is_err());
    }
}
