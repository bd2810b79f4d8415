use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Klinika";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default clinic backend when `KLINIKA_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Single-attempt request timeout. There is no retry policy, so a hung
/// request must not leave a screen loading forever.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Base URL of the clinic backend, overridable via environment.
pub fn api_base_url() -> String {
    std::env::var("KLINIKA_API_URL")
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Get the application data directory
/// ~/Klinika/ on all platforms (user-visible, holds the session file)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Klinika")
}

/// Durable session file — the desktop analog of the browser's
/// localStorage slot for `{user, token}`.
pub fn session_file() -> PathBuf {
    app_data_dir().join("session.json")
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Klinika"));
    }

    #[test]
    fn session_file_under_app_data() {
        let file = session_file();
        assert!(file.starts_with(app_data_dir()));
        assert!(file.ends_with("session.json"));
    }

    #[test]
    fn default_api_url_has_no_trailing_slash() {
        assert!(!api_base_url().ends_with('/'));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }
}
