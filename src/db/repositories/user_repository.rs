use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};
use time::OffsetDateTime;

use crate::db::error::DatabaseError;
use crate::db::models::{Role, User};

pub struct UserRepository;

impl UserRepository {
    pub async fn create(
        tx: &mut Transaction<'_, Sqlite>,
        email: Option<&str>,
        username: Option<&str>,
        password_hash: &str,
        role: Role,
    ) -> Result<User, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, username, password_hash, role, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, email, username, password_hash, role, created_at
            "#,
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&mut **tx)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(pool: &SqlitePool, user_id: i64) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, username, password_hash, role, created_at FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Looks the user up by either unique handle; login accepts both.
    pub async fn find_by_identifier(
        pool: &SqlitePool,
        identifier: &str,
    ) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, username, password_hash, role, created_at
            FROM users
            WHERE email = ? OR username = ?
            "#,
        )
        .bind(identifier)
        .bind(identifier)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn username_exists(pool: &SqlitePool, username: &str) -> Result<bool, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn any_exists(pool: &SqlitePool) -> Result<bool, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM users")
            .fetch_one(pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn count_with_role(pool: &SqlitePool, role: Role) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM users WHERE role = ?")
            .bind(role)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn list(
        pool: &SqlitePool,
        role: Option<Role>,
        search: Option<&str>,
    ) -> Result<Vec<User>, DatabaseError> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, email, username, password_hash, role, created_at FROM users WHERE 1 = 1",
        );
        if let Some(role) = role {
            builder.push(" AND role = ").push_bind(role);
        }
        if let Some(search) = search {
            let pattern = format!("%{}%", search.trim());
            builder
                .push(" AND (email LIKE ")
                .push_bind(pattern.clone())
                .push(" OR username LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        builder.push(" ORDER BY id ASC");

        let users = builder.build_query_as::<User>().fetch_all(pool).await?;
        Ok(users)
    }

    pub async fn delete(pool: &SqlitePool, user_id: i64) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
