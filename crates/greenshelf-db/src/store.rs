//! The repository handlers talk to: Postgres when configured, memory otherwise.

use greenshelf_core::{AppConfig, Brand, BrandInput, CertificationCount};
use sqlx::PgPool;

use crate::{brands, connect_pool_from_config, memory::MemoryStore, ping, run_migrations, DbError};

/// One page of brands and the total brand count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandPage {
    pub brands: Vec<Brand>,
    pub total: i64,
}

/// Brand persistence backend, selected once at startup.
#[derive(Debug, Clone)]
pub enum BrandStore {
    Postgres(PgPool),
    Memory(MemoryStore),
}

impl BrandStore {
    #[must_use]
    pub fn backend(&self) -> &'static str {
        match self {
            BrandStore::Postgres(_) => "postgres",
            BrandStore::Memory(_) => "memory",
        }
    }

    /// Newest-first page of brands with sorted certification names.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidPage`] when `limit < 1` or `offset < 0`, or
    /// [`DbError::Sqlx`] if a query fails.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<BrandPage, DbError> {
        if limit < 1 || offset < 0 {
            return Err(DbError::InvalidPage { limit, offset });
        }

        match self {
            BrandStore::Postgres(pool) => {
                let (rows, total) = brands::list_brands(pool, limit, offset).await?;
                Ok(BrandPage {
                    brands: rows.into_iter().map(Brand::from).collect(),
                    total,
                })
            }
            BrandStore::Memory(memory) => {
                let (brands, total) = memory.list(limit, offset).await;
                Ok(BrandPage { brands, total })
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Brand>, DbError> {
        match self {
            BrandStore::Postgres(pool) => Ok(brands::get_brand(pool, id).await?.map(Brand::from)),
            BrandStore::Memory(memory) => Ok(memory.get(id).await),
        }
    }

    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails.
    pub async fn certification_counts(&self) -> Result<Vec<CertificationCount>, DbError> {
        match self {
            BrandStore::Postgres(pool) => brands::certification_counts(pool).await,
            BrandStore::Memory(memory) => Ok(memory.certification_counts().await),
        }
    }

    /// Atomically create a brand and its certification links.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if any statement fails; nothing is persisted then.
    pub async fn create(&self, input: &BrandInput) -> Result<Brand, DbError> {
        match self {
            BrandStore::Postgres(pool) => Ok(brands::create_brand(pool, input).await?.into()),
            BrandStore::Memory(memory) => Ok(memory.create(input).await),
        }
    }

    /// Atomically replace a brand's fields and certification set.
    /// `None` when the brand does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if any statement fails; nothing is persisted then.
    pub async fn update(&self, id: i64, input: &BrandInput) -> Result<Option<Brand>, DbError> {
        match self {
            BrandStore::Postgres(pool) => {
                Ok(brands::update_brand(pool, id, input).await?.map(Brand::from))
            }
            BrandStore::Memory(memory) => Ok(memory.update(id, input).await),
        }
    }

    /// Remove a brand. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let removed = match self {
            BrandStore::Postgres(pool) => brands::delete_brand(pool, id).await?,
            BrandStore::Memory(memory) => memory.delete(id).await,
        };
        if !removed {
            tracing::debug!(brand_id = id, "delete requested for unknown brand");
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the database ping fails.
    pub async fn health_check(&self) -> Result<(), DbError> {
        match self {
            BrandStore::Postgres(pool) => Ok(ping(pool).await?),
            BrandStore::Memory(_) => Ok(()),
        }
    }
}

/// Build the store described by the config.
///
/// With a database URL this connects and applies pending migrations; without
/// one it returns a memory store holding the sample catalog.
///
/// # Errors
///
/// Returns [`DbError`] if connecting or migrating fails.
pub async fn open_store(config: &AppConfig) -> Result<BrandStore, DbError> {
    if config.database_url.is_none() {
        tracing::warn!("DATABASE_URL not set; serving the in-memory sample catalog");
        return Ok(BrandStore::Memory(MemoryStore::with_samples()));
    }

    let pool = connect_pool_from_config(config).await?;
    let applied = run_migrations(&pool).await?;
    tracing::info!(applied, "database migrations complete");
    Ok(BrandStore::Postgres(pool))
}

/// Insert the sample catalog through [`BrandStore::create`].
///
/// Returns the number of brands inserted.
///
/// # Errors
///
/// Returns [`DbError`] on the first failed insert.
pub async fn seed_sample_brands(store: &BrandStore) -> Result<usize, DbError> {
    let samples = greenshelf_core::sample_brands();
    for input in &samples {
        let brand = store.create(input).await?;
        tracing::debug!(brand_id = brand.id, name = %brand.name, "seeded brand");
    }
    Ok(samples.len())
}
