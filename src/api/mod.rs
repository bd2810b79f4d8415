//! Remote entity gateway: one typed contract per backend resource over a
//! shared HTTP client. All persistence and business rules live in the
//! backend; this layer only moves JSON and maps failures into the error
//! taxonomy below. No retries — one attempt per user-triggered action.

pub mod appointments;
pub mod client;
pub mod patients;
pub mod reports;
pub mod staff;

pub use appointments::{ApiAppointments, AppointmentsGateway, MockAppointments};
pub use client::ApiClient;
pub use patients::{ApiPatients, MockPatients, PatientsGateway};
pub use reports::{ApiReports, MockReports, ReportsGateway};
pub use staff::{ApiStaff, MockStaff, StaffGateway};

/// Gateway failure taxonomy. Screens catch these at the boundary and
/// render an inline message; nothing propagates as a panic.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("Not authenticated or credentials rejected")]
    Auth,
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error (status {0})")]
    Server(u16),
    #[error("Response parsing failed: {0}")]
    ResponseParsing(String),
}
