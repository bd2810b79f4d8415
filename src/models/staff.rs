use serde::{Deserialize, Serialize};

use super::enums::Role;

/// Staff member managed through the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Create payload for `POST /api/admin/staff`.
#[derive(Debug, Clone, Serialize)]
pub struct NewStaff {
    pub name: String,
    pub email: String,
    pub role: Role,
}
