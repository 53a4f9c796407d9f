use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Collection, NewCollection, Role, RoleAssignment};
use crate::store::{CollectionStore, RoleAssignmentStore};

/// Name given to the default collection provisioned for every principal.
pub const DEFAULT_COLLECTION_NAME: &str = "Your Ideas";

/// All collection business logic, behind the two store traits. Handlers
/// translate between wire views and these monomorphic operations, so the
/// ownership rules exist in exactly one place no matter how many view
/// versions are mounted.
#[derive(Clone)]
pub struct CollectionAccessService {
    collections: Arc<dyn CollectionStore>,
    roles: Arc<dyn RoleAssignmentStore>,
}

impl CollectionAccessService {
    pub fn new(collections: Arc<dyn CollectionStore>, roles: Arc<dyn RoleAssignmentStore>) -> Self {
        Self { collections, roles }
    }

    /// Every collection visible to the caller. Provisions the caller's
    /// default collection first, so the result is never empty.
    pub async fn list(&self, caller: Uuid) -> Result<Vec<Collection>, AppError> {
        self.get_or_create_default(caller).await?;

        Ok(self.collections.get_collections(caller).await?)
    }

    /// A single collection. A missing id, or the caller's own id, addresses
    /// the caller's default collection, which is created on demand and so
    /// never yields NotFound.
    pub async fn get(&self, caller: Uuid, id: Option<Uuid>) -> Result<Collection, AppError> {
        let id = id.unwrap_or(caller);
        if id == caller {
            return self.get_or_create_default(caller).await;
        }

        self.collections
            .get_collection(caller, id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Creates a collection owned by the caller. The payload may suggest an
    /// id; it may not pick the owning principal.
    pub async fn add(&self, caller: Uuid, input: NewCollection) -> Result<Collection, AppError> {
        if input.name.is_empty() {
            return Err(AppError::Validation("Name is required"));
        }

        let id = input.id.filter(|id| !id.is_nil()).unwrap_or_else(Uuid::new_v4);
        let collection = Collection::new(id, caller, input.name);

        let added = self.collections.store_collection(collection).await?;
        self.roles
            .store_role_assignment(RoleAssignment::owner(added.id, caller))
            .await?;

        Ok(added)
    }

    /// Deletes a collection and the caller's role assignment on it.
    ///
    /// An owner may not delete a collection unless some other principal also
    /// holds Owner on it. A caller with no role assignment at all skips that
    /// guard and falls through to the store, whose removal is independently
    /// scoped to owners, so a principal with no claim gets NotFound.
    pub async fn delete(&self, caller: Uuid, id: Uuid) -> Result<(), AppError> {
        let assignment = self.roles.get_role_assignment(id, caller).await?;
        if assignment.is_some_and(|a| a.role == Role::Owner) {
            let assignments = self.roles.get_role_assignments(id).await?;
            let other_owner = assignments
                .iter()
                .any(|a| a.principal_id != caller && a.role == Role::Owner);
            if !other_owner {
                return Err(AppError::Conflict(
                    "Cannot delete a collection with no other owner",
                ));
            }
        }

        if !self.collections.remove_collection(id, caller).await? {
            return Err(AppError::NotFound);
        }

        self.roles.remove_role_assignment(caller, id).await?;

        Ok(())
    }

    /// The caller's default collection, created (along with its Owner role
    /// assignment) the first time the caller is seen. Its id equals the
    /// caller's own principal id, so it can always be addressed without a
    /// lookup table.
    pub async fn get_or_create_default(&self, caller: Uuid) -> Result<Collection, AppError> {
        if let Some(collection) = self.collections.get_collection(caller, caller).await? {
            return Ok(collection);
        }

        let collection = self
            .collections
            .store_collection(Collection::new(
                caller,
                caller,
                DEFAULT_COLLECTION_NAME.to_string(),
            ))
            .await?;
        self.roles
            .store_role_assignment(RoleAssignment::owner(caller, caller))
            .await?;

        Ok(collection)
    }
}
