use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============ Authentication ============

/// Identity of the signed-in user, as resolved from the bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserInfo {
    pub uid: String,
}

impl UserInfo {
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}
