//! User repository - the SQLite-backed credential store.

use crate::repositories::{now, timestamp};
use crate::Result as DbErrorResult;

use shop_core::{
    CoreError, CredentialStore, Identity, IdentityPatch, NewIdentity,
    Result as CoreErrorResult,
};

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const SELECT_USER: &str = r#"
    SELECT id, email, name, password_hash, created_at, updated_at
    FROM users
"#;

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user. A taken email surfaces as `DbError::Conflict`.
    pub async fn create(&self, new_identity: &NewIdentity) -> DbErrorResult<Identity> {
        let (created_at, ts) = now();

        let result = sqlx::query(
            r#"
                INSERT INTO users (email, name, password_hash, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new_identity.email)
        .bind(&new_identity.name)
        .bind(&new_identity.password_hash)
        .bind(ts)
        .bind(ts)
        .execute(&self.pool)
        .await?;

        Ok(Identity {
            id: result.last_insert_rowid(),
            email: new_identity.email.clone(),
            name: new_identity.name.clone(),
            password_hash: new_identity.password_hash.clone(),
            created_at,
            updated_at: created_at,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<Identity>> {
        let row = sqlx::query(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(identity_from_row).transpose()
    }

    /// Exact, case-sensitive lookup.
    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<Identity>> {
        let row = sqlx::query(&format!("{SELECT_USER} WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(identity_from_row).transpose()
    }

    pub async fn find_all(&self) -> DbErrorResult<Vec<Identity>> {
        let rows = sqlx::query(&format!("{SELECT_USER} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(identity_from_row).collect()
    }

    /// Apply a partial update. Returns `None` when the user does not exist.
    pub async fn update(&self, id: i64, patch: &IdentityPatch) -> DbErrorResult<Option<Identity>> {
        let (_, ts) = now();

        let result = sqlx::query(
            r#"
                UPDATE users
                SET email = COALESCE(?, email),
                    name = COALESCE(?, name),
                    password_hash = COALESCE(?, password_hash),
                    updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(patch.email.as_deref())
        .bind(patch.name.as_deref())
        .bind(patch.password_hash.as_deref())
        .bind(ts)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Returns `false` when nothing was deleted.
    pub async fn delete(&self, id: i64) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn create_identity(&self, new_identity: NewIdentity) -> CoreErrorResult<Identity> {
        Ok(self.create(&new_identity).await?)
    }

    async fn find_by_email(&self, email: &str) -> CoreErrorResult<Option<Identity>> {
        Ok(UserRepository::find_by_email(self, email).await?)
    }

    async fn find_by_id(&self, id: i64) -> CoreErrorResult<Option<Identity>> {
        Ok(UserRepository::find_by_id(self, id).await?)
    }

    async fn update_identity(&self, id: i64, patch: IdentityPatch) -> CoreErrorResult<Identity> {
        self.update(id, &patch)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "User",
                id,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    async fn delete_identity(&self, id: i64) -> CoreErrorResult<()> {
        if self.delete(id).await? {
            Ok(())
        } else {
            Err(CoreError::NotFound {
                entity: "User",
                id,
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}

fn identity_from_row(row: &SqliteRow) -> DbErrorResult<Identity> {
    Ok(Identity {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        password_hash: row.try_get("password_hash")?,
        created_at: timestamp(row.try_get("created_at")?, "users.created_at")?,
        updated_at: timestamp(row.try_get("updated_at")?, "users.updated_at")?,
    })
}

