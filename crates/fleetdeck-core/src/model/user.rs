use serde::{Deserialize, Serialize};

/// The authenticated user. Serializable because the session store
/// persists it alongside the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: String,
    pub name: Option<String>,
    pub is_active: bool,
}
