use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

/// Claims carried by portal access tokens. The email doubles as the user key
/// in the users table, so no separate subject id is issued.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub email: String,
    pub iat: Option<u64>,
    pub exp: Option<u64>,
}

/// The authenticated caller, extracted from a verified token and stored in
/// request extensions by the auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub email: String,
}
