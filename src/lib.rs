//! Klinika — client-side core for a role-based clinic management
//! front-end (admin, doctor, nurse) over a remote REST backend.
//!
//! The backend owns all persistence and business rules; this crate owns
//! the client's recurring design problems:
//!
//! - [`session`]: durable login state (`{user, token}`), restored on
//!   startup, cleared on logout.
//! - [`api`]: one typed gateway per resource over a shared HTTP client,
//!   with a fixed error taxonomy and no retries.
//! - [`router`]: per-role view transition table with hand-off slots for
//!   the selected patient/appointment.
//! - [`workflow`]: appointment status lifecycle with confirmation-first
//!   reconciliation against the backend.
//! - [`home`]: dashboard data assembly with partial-failure tolerance.

pub mod api;
pub mod config;
pub mod home;
pub mod models;
pub mod router;
pub mod session;
pub mod workflow;

use tracing_subscriber::EnvFilter;

/// Initialize tracing. `RUST_LOG` overrides the crate default filter.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
