pub mod sqlite;

pub use sqlite::{SqliteCollectionStore, SqliteRoleAssignmentStore};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Collection, RoleAssignment};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Persistence for collections. Lookups are scoped to what the given
/// principal is allowed to see; removal is scoped to what it owns.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Every collection visible to `principal`. Order is unspecified.
    async fn get_collections(&self, principal: Uuid) -> Result<Vec<Collection>, StoreError>;

    /// The collection `id` if it is visible to `principal`.
    async fn get_collection(
        &self,
        principal: Uuid,
        id: Uuid,
    ) -> Result<Option<Collection>, StoreError>;

    /// Upserts the collection and returns the persisted form. Concurrent
    /// stores of the same id must not fail; last write wins on the name.
    async fn store_collection(&self, collection: Collection) -> Result<Collection, StoreError>;

    /// Removes `id` if `principal` owns it. Returns whether anything was
    /// deleted.
    async fn remove_collection(&self, id: Uuid, principal: Uuid) -> Result<bool, StoreError>;
}

/// Persistence for principal-to-collection role grants.
#[async_trait]
pub trait RoleAssignmentStore: Send + Sync {
    async fn get_role_assignment(
        &self,
        collection_id: Uuid,
        principal_id: Uuid,
    ) -> Result<Option<RoleAssignment>, StoreError>;

    async fn get_role_assignments(
        &self,
        collection_id: Uuid,
    ) -> Result<Vec<RoleAssignment>, StoreError>;

    /// Upserts the grant for its `(collection, principal)` pair.
    async fn store_role_assignment(
        &self,
        assignment: RoleAssignment,
    ) -> Result<RoleAssignment, StoreError>;

    async fn remove_role_assignment(
        &self,
        principal_id: Uuid,
        collection_id: Uuid,
    ) -> Result<(), StoreError>;
}
