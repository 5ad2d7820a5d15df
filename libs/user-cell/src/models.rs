use serde::{Deserialize, Serialize};

/// A portal account, keyed by email. Regular patients carry no role; admins
/// carry the "admin" marker set through the admin grant route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalUser {
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl PortalUser {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Database {
            message: err.to_string(),
        }
    }
}
