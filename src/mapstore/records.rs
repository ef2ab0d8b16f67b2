//! Record types for the identity mapping document.
//!
//! Field spellings (`userarn`, `rolearn`, `username`, `groups`) match the
//! source resource format and must not change.

use serde::{Deserialize, Serialize};

/// Maps an IAM user identity to an in-cluster identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserMapping {
    /// ARN of the IAM user. Lookup key; case-insensitive.
    #[serde(rename = "userarn")]
    pub user_arn: String,

    /// Identity the user maps to. Opaque to the store.
    #[serde(default)]
    pub username: String,

    /// Group claims attached to the mapped identity. Opaque to the store.
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Maps an IAM role identity to an in-cluster identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoleMapping {
    /// ARN of the IAM role. Lookup key; case-insensitive.
    #[serde(rename = "rolearn")]
    pub role_arn: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub groups: Vec<String>,
}
