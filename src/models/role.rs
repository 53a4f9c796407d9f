use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles a principal can hold on a collection. Only `Owner` carries
/// semantics in this service; the others exist for the wider system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum Role {
    Owner,
    Contributor,
    Viewer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Owner => write!(f, "Owner"),
            Role::Contributor => write!(f, "Contributor"),
            Role::Viewer => write!(f, "Viewer"),
        }
    }
}

/// A grant of `role` to `principal_id` on `collection_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub collection_id: Uuid,
    pub principal_id: Uuid,
    pub role: Role,
    pub granted_at: String,
}

impl RoleAssignment {
    pub fn new(collection_id: Uuid, principal_id: Uuid, role: Role) -> Self {
        Self {
            collection_id,
            principal_id,
            role,
            granted_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn owner(collection_id: Uuid, principal_id: Uuid) -> Self {
        Self::new(collection_id, principal_id, Role::Owner)
    }
}
