use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// City a turf can be looked up in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct City {
    pub name: String,
}

/// Read-only city collection.
#[async_trait]
pub trait CityStore: Send + Sync {
    /// Case-insensitive substring search; an empty filter matches everything.
    async fn search(&self, name_filter: &str) -> anyhow::Result<Vec<City>>;
}

pub struct PgCityStore {
    pool: PgPool,
}

impl PgCityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityStore for PgCityStore {
    async fn search(&self, name_filter: &str) -> anyhow::Result<Vec<City>> {
        let cities = sqlx::query_as::<_, City>(
            r#"
            SELECT name
            FROM cities
            WHERE name ILIKE '%' || $1 || '%'
            ORDER BY name
            "#,
        )
        .bind(name_filter)
        .fetch_all(&self.pool)
        .await
        .context("search cities")?;
        Ok(cities)
    }
}

/// In-memory city list for tests.
pub struct MemoryCityStore {
    cities: Vec<City>,
}

impl MemoryCityStore {
    pub fn new(names: &[&str]) -> Self {
        Self {
            cities: names
                .iter()
                .map(|n| City { name: (*n).to_string() })
                .collect(),
        }
    }
}

#[async_trait]
impl CityStore for MemoryCityStore {
    async fn search(&self, name_filter: &str) -> anyhow::Result<Vec<City>> {
        let needle = name_filter.to_lowercase();
        Ok(self
            .cities
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
