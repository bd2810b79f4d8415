//! Pure, stateless transforms over cached entity lists. No server
//! round-trip: screens re-apply these on every render.

use super::appointment::Appointment;
use super::enums::AppointmentStatus;
use super::patient::Patient;

/// Status filter for the appointment table: `all | pending | done | cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AppointmentStatus),
}

impl StatusFilter {
    pub fn matches(self, status: AppointmentStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => status == wanted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Appointments matching the status filter, in cache order.
pub fn filter_by_status(
    appointments: &[Appointment],
    filter: StatusFilter,
) -> Vec<&Appointment> {
    appointments
        .iter()
        .filter(|a| filter.matches(a.status))
        .collect()
}

/// Appointments sorted by date. Stable, so same-day entries keep their
/// cache order.
pub fn sort_by_date(appointments: &[Appointment], order: SortOrder) -> Vec<&Appointment> {
    let mut sorted: Vec<&Appointment> = appointments.iter().collect();
    sorted.sort_by(|a, b| match order {
        SortOrder::Ascending => a.appointment_date.cmp(&b.appointment_date),
        SortOrder::Descending => b.appointment_date.cmp(&a.appointment_date),
    });
    sorted
}

/// Case-insensitive substring search over patient full names.
/// An empty query matches everyone (the search bar starts blank).
pub fn search_patients<'a>(patients: &'a [Patient], query: &str) -> Vec<&'a Patient> {
    let needle = query.trim().to_lowercase();
    patients
        .iter()
        .filter(|p| needle.is_empty() || p.full_name().to_lowercase().contains(&needle))
        .collect()
}
