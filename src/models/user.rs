use serde::{Deserialize, Serialize};

use super::enums::Role;

/// Authenticated identity as returned by `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub role: Role,
}
