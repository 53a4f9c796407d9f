use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use super::{CollectionStore, RoleAssignmentStore, StoreError};
use crate::models::{Collection, Role, RoleAssignment};

/// UUIDs are stored in their 32-character lowercase hex form.
fn uuid_column(id: Uuid) -> String {
    id.simple().to_string()
}

fn parse_uuid_column(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw).map_err(|_| StoreError::Corrupt(format!("invalid uuid in row: {raw}")))
}

#[derive(FromRow)]
struct CollectionRow {
    id: String,
    principal_id: String,
    name: String,
    created_at: String,
    updated_at: String,
}

impl CollectionRow {
    fn into_model(self) -> Result<Collection, StoreError> {
        Ok(Collection {
            id: parse_uuid_column(&self.id)?,
            principal_id: parse_uuid_column(&self.principal_id)?,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(FromRow)]
struct RoleAssignmentRow {
    collection_id: String,
    principal_id: String,
    role: Role,
    granted_at: String,
}

impl RoleAssignmentRow {
    fn into_model(self) -> Result<RoleAssignment, StoreError> {
        Ok(RoleAssignment {
            collection_id: parse_uuid_column(&self.collection_id)?,
            principal_id: parse_uuid_column(&self.principal_id)?,
            role: self.role,
            granted_at: self.granted_at,
        })
    }
}

pub struct SqliteCollectionStore {
    db: SqlitePool,
}

impl SqliteCollectionStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CollectionStore for SqliteCollectionStore {
    async fn get_collections(&self, principal: Uuid) -> Result<Vec<Collection>, StoreError> {
        let rows: Vec<CollectionRow> = sqlx::query_as(
            r#"
            SELECT * FROM collections
            WHERE principal_id = ?
               OR id IN (SELECT collection_id FROM role_assignments WHERE principal_id = ?)
            ORDER BY name
            "#,
        )
        .bind(uuid_column(principal))
        .bind(uuid_column(principal))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(CollectionRow::into_model).collect()
    }

    async fn get_collection(
        &self,
        principal: Uuid,
        id: Uuid,
    ) -> Result<Option<Collection>, StoreError> {
        let row: Option<CollectionRow> = sqlx::query_as(
            r#"
            SELECT * FROM collections
            WHERE id = ?
              AND (principal_id = ?
                   OR id IN (SELECT collection_id FROM role_assignments WHERE principal_id = ?))
            "#,
        )
        .bind(uuid_column(id))
        .bind(uuid_column(principal))
        .bind(uuid_column(principal))
        .fetch_optional(&self.db)
        .await?;

        row.map(CollectionRow::into_model).transpose()
    }

    async fn store_collection(&self, collection: Collection) -> Result<Collection, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO collections (id, principal_id, name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET principal_id = excluded.principal_id,
                                          name = excluded.name,
                                          updated_at = excluded.updated_at
            "#,
        )
        .bind(uuid_column(collection.id))
        .bind(uuid_column(collection.principal_id))
        .bind(&collection.name)
        .bind(&collection.created_at)
        .bind(&collection.updated_at)
        .execute(&self.db)
        .await?;

        let row: CollectionRow = sqlx::query_as("SELECT * FROM collections WHERE id = ?")
            .bind(uuid_column(collection.id))
            .fetch_one(&self.db)
            .await?;

        row.into_model()
    }

    async fn remove_collection(&self, id: Uuid, principal: Uuid) -> Result<bool, StoreError> {
        // Removal requires ownership: either the principal created the
        // collection or it holds an Owner role assignment on it.
        let result = sqlx::query(
            r#"
            DELETE FROM collections
            WHERE id = ?
              AND (principal_id = ?
                   OR id IN (SELECT collection_id FROM role_assignments
                             WHERE principal_id = ? AND role = 'Owner'))
            "#,
        )
        .bind(uuid_column(id))
        .bind(uuid_column(principal))
        .bind(uuid_column(principal))
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub struct SqliteRoleAssignmentStore {
    db: SqlitePool,
}

impl SqliteRoleAssignmentStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleAssignmentStore for SqliteRoleAssignmentStore {
    async fn get_role_assignment(
        &self,
        collection_id: Uuid,
        principal_id: Uuid,
    ) -> Result<Option<RoleAssignment>, StoreError> {
        let row: Option<RoleAssignmentRow> = sqlx::query_as(
            "SELECT * FROM role_assignments WHERE collection_id = ? AND principal_id = ?",
        )
        .bind(uuid_column(collection_id))
        .bind(uuid_column(principal_id))
        .fetch_optional(&self.db)
        .await?;

        row.map(RoleAssignmentRow::into_model).transpose()
    }

    async fn get_role_assignments(
        &self,
        collection_id: Uuid,
    ) -> Result<Vec<RoleAssignment>, StoreError> {
        let rows: Vec<RoleAssignmentRow> =
            sqlx::query_as("SELECT * FROM role_assignments WHERE collection_id = ?")
                .bind(uuid_column(collection_id))
                .fetch_all(&self.db)
                .await?;

        rows.into_iter().map(RoleAssignmentRow::into_model).collect()
    }

    async fn store_role_assignment(
        &self,
        assignment: RoleAssignment,
    ) -> Result<RoleAssignment, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO role_assignments (collection_id, principal_id, role, granted_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(collection_id, principal_id) DO UPDATE SET role = excluded.role
            "#,
        )
        .bind(uuid_column(assignment.collection_id))
        .bind(uuid_column(assignment.principal_id))
        .bind(assignment.role.to_string())
        .bind(&assignment.granted_at)
        .execute(&self.db)
        .await?;

        Ok(assignment)
    }

    async fn remove_role_assignment(
        &self,
        principal_id: Uuid,
        collection_id: Uuid,
    ) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM role_assignments WHERE principal_id = ? AND collection_id = ?")
            .bind(uuid_column(principal_id))
            .bind(uuid_column(collection_id))
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
