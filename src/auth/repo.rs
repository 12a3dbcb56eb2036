use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::User;

/// Keyed user collection: lookup by email plus whole-record writes. The row
/// is the unit of atomicity; the unique email key is what stops concurrent
/// signups from both landing.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn create(&self, user: &User) -> anyhow::Result<()>;
    async fn update(&self, user: &User) -> anyhow::Result<()>;
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, otp, otp_expiry, bookings, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn create(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, otp, otp_expiry, bookings, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.otp)
        .bind(user.otp_expiry)
        .bind(&user.bookings)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .context("insert user")?;
        Ok(())
    }

    async fn update(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET username = $2, password_hash = $3, otp = $4, otp_expiry = $5, bookings = $6
            WHERE email = $1
            "#,
        )
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.otp)
        .bind(user.otp_expiry)
        .bind(&user.bookings)
        .execute(&self.pool)
        .await
        .context("update user")?;
        Ok(())
    }
}

/// In-memory user map for tests and local fakes, keyed by email like the
/// real collection.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().expect("user store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mutate a stored record in place, e.g. to age an OTP in tests.
    /// Returns false if no user has that email.
    pub fn with_user_mut(&self, email: &str, f: impl FnOnce(&mut User)) -> bool {
        let mut users = self.users.lock().expect("user store lock");
        match users.get_mut(email) {
            Some(user) => {
                f(user);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.users.lock().expect("user store lock").get(email).cloned())
    }

    async fn create(&self, user: &User) -> anyhow::Result<()> {
        let mut users = self.users.lock().expect("user store lock");
        if users.contains_key(&user.email) {
            anyhow::bail!("duplicate key: users.email = {}", user.email);
        }
        users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> anyhow::Result<()> {
        let mut users = self.users.lock().expect("user store lock");
        match users.get_mut(&user.email) {
            Some(slot) => {
                *slot = user.clone();
                Ok(())
            }
            None => anyhow::bail!("no user with email {}", user.email),
        }
    }
}
