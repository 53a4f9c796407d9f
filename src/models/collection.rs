use chrono::Utc;
use uuid::Uuid;

/// A named container of ideas, owned (possibly jointly) by one or more
/// principals. Joint ownership is tracked through role assignments; the
/// `principal_id` here is whoever created the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub id: Uuid,
    pub principal_id: Uuid,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Collection {
    pub fn new(id: Uuid, principal_id: Uuid, name: String) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id,
            principal_id,
            name,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Caller-supplied fields for a collection about to be created. The owning
/// principal is never part of this; the service records the caller.
#[derive(Debug, Clone, Default)]
pub struct NewCollection {
    pub id: Option<Uuid>,
    pub name: String,
}
