use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::auth::{
  AuthError, Email, PasswordHash, User, errors::RepositoryError, ports::UserRepository,
};

const USER_COLUMNS: &str = "id, name, email, address, phone_number, password_hash, \
                            created_at, updated_at, deleted_at";

#[derive(Debug, FromRow)]
struct UserRecord {
  id: Uuid,
  name: String,
  email: String,
  address: Option<String>,
  phone_number: Option<String>,
  password_hash: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
  deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserRecord> for User {
  type Error = AuthError;

  fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
    Ok(User {
      id: record.id,
      name: record.name,
      email: Email::new(record.email)?,
      address: record.address,
      phone_number: record.phone_number,
      password_hash: PasswordHash::from_hash(record.password_hash)?,
      created_at: record.created_at,
      updated_at: record.updated_at,
      deleted_at: record.deleted_at,
    })
  }
}

pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: &User) -> Result<User, AuthError> {
    let record = sqlx::query_as::<_, UserRecord>(&format!(
      r#"
            INSERT INTO users (
                id, name, email, address, phone_number, password_hash,
                created_at, updated_at, deleted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {USER_COLUMNS}
            "#,
    ))
    .bind(user.id)
    .bind(&user.name)
    .bind(user.email.as_str())
    .bind(&user.address)
    .bind(&user.phone_number)
    .bind(user.password_hash.as_str())
    .bind(user.created_at)
    .bind(user.updated_at)
    .bind(user.deleted_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      if let sqlx::Error::Database(db_err) = &e {
        // PostgreSQL unique violation code
        if db_err.code().as_deref() == Some("23505") {
          return AuthError::EmailAlreadyExists;
        }
      }
      AuthError::Repository(RepositoryError::from(e))
    })?;

    record.try_into()
  }

  async fn update(&self, user: &User) -> Result<User, AuthError> {
    let record = sqlx::query_as::<_, UserRecord>(&format!(
      r#"
            UPDATE users
            SET name = $2, address = $3, phone_number = $4,
                password_hash = $5, updated_at = $6, deleted_at = $7
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#,
    ))
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.address)
    .bind(&user.phone_number)
    .bind(user.password_hash.as_str())
    .bind(user.updated_at)
    .bind(user.deleted_at)
    .fetch_one(&self.pool)
    .await?;

    record.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let record = sqlx::query_as::<_, UserRecord>(&format!(
      r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    record.map(|r| r.try_into()).transpose()
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let record = sqlx::query_as::<_, UserRecord>(&format!(
      r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            "#,
    ))
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await?;

    record.map(|r| r.try_into()).transpose()
  }
}
