use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use voyra_core::repository::{RepoError, RepoResult, UserRepository};
use voyra_core::user::{Role, User};
use voyra_shared::Masked;

use crate::convert_rows;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepoError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            name: row.name,
            email: Masked::new(row.email),
            phone: row.phone.map(Masked::new),
            role: row.role.parse()?,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert_user(&self, user: &User) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, phone, role, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(user.email.expose())
        .bind(user.phone.as_ref().map(|p| p.expose().as_str()))
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn list_users(&self, role: Option<Role>) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT * FROM users WHERE ($1::TEXT IS NULL OR role = $1) ORDER BY created_at DESC",
        )
        .bind(role.map(|r| r.as_str()))
        .fetch_all(&self.pool)
        .await?;
        convert_rows(rows)
    }

    async fn set_user_active(&self, id: Uuid, is_active: bool) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>("UPDATE users SET is_active = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(is_active)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn count_users(&self, role: Option<Role>) -> RepoResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE ($1::TEXT IS NULL OR role = $1)")
            .bind(role.map(|r| r.as_str()))
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count)?)
    }
}
