pub mod appointment;
pub mod enums;
pub mod filters;
pub mod patient;
pub mod report;
pub mod staff;
pub mod user;

pub use appointment::{Appointment, NewAppointment};
pub use enums::{AppointmentStatus, AppointmentType, InvalidEnum, Role};
pub use patient::{Patient, PLACEHOLDER_ID};
pub use report::{NewReport, Report};
pub use staff::{NewStaff, Staff};
pub use user::User;

/// Collapse duplicate ids in a list response, keeping the last-seen entry
/// at the first-seen position. The backend can return the same row twice
/// across merged or paginated queries.
pub fn dedup_by_id<T>(items: Vec<T>, id_of: impl Fn(&T) -> i64) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        let id = id_of(&item);
        match out.iter().position(|existing| id_of(existing) == id) {
            Some(pos) => out[pos] = item,
            None => out.push(item),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn dedup_keeps_last_seen_entry() {
        let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let mut first = Patient::new("Arta", "Berisha", date);
        first.id = 5;
        let mut stale = first.clone();
        stale.symptoms = Some("old record".into());
        let mut fresh = first.clone();
        fresh.symptoms = Some("updated record".into());
        let mut other = Patient::new("Blerim", "Hoti", date);
        other.id = 6;

        let deduped = dedup_by_id(vec![stale, other, fresh], |p| p.id);
        assert_eq!(deduped.len(), 2);
        // last-seen value wins, first-seen position kept
        assert_eq!(deduped[0].id, 5);
        assert_eq!(deduped[0].symptoms.as_deref(), Some("updated record"));
        assert_eq!(deduped[1].id, 6);
    }

    #[test]
    fn dedup_without_duplicates_is_identity() {
        let items = vec![1i64, 2, 3];
        assert_eq!(dedup_by_id(items, |x| *x), vec![1, 2, 3]);
    }
}
