use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str =
    "id, email, name, password_hash, refresh_token, email_confirmed, created_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, UserError> {
        let column = |e: sqlx::Error| UserError::DatabaseError(e.to_string());

        Ok(User {
            id: UserId(row.try_get("id").map_err(column)?),
            email: EmailAddress::new(row.try_get("email").map_err(column)?)?,
            name: row.try_get("name").map_err(column)?,
            password_hash: row.try_get("password_hash").map_err(column)?,
            refresh_token: row.try_get("refresh_token").map_err(column)?,
            email_confirmed: row.try_get("email_confirmed").map_err(column)?,
            created_at: row.try_get("created_at").map_err(column)?,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (email, name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.email.as_str())
        .bind(user.name.as_deref())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return UserError::EmailAlreadyExists(user.email.to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Self::row_to_user(&row)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1
            "#
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn update_refresh_token(
        &self,
        id: UserId,
        token: Option<String>,
    ) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $2
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn replace_refresh_token(
        &self,
        id: UserId,
        expected: &str,
        replacement: Option<String>,
    ) -> Result<bool, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $3
            WHERE id = $1 AND refresh_token = $2
            "#,
        )
        .bind(id.0)
        .bind(expected)
        .bind(replacement)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }

    async fn confirm_email(&self, id: UserId) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email_confirmed = TRUE
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
