//! Database operations for `brands`, `certifications` and `brand_certifications`.

use chrono::{DateTime, Utc};
use greenshelf_core::{Brand, BrandInput, CertificationCount};
use sqlx::{PgConnection, PgPool};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A `brands` row joined with its aggregated certification names.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BrandRow {
    pub id: i64,
    pub name: String,
    pub summary: String,
    pub packaging: String,
    pub price_tier: String,
    pub website: Option<String>,
    pub country: Option<String>,
    pub image_url: Option<String>,
    pub certifications: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<BrandRow> for Brand {
    fn from(row: BrandRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            summary: row.summary,
            packaging: row.packaging,
            price_tier: row.price_tier,
            website: row.website,
            country: row.country,
            image_url: row.image_url,
            certifications: row.certifications,
            created_at: row.created_at,
        }
    }
}

// Certification names sort by byte order so Postgres and the memory store agree.
const BRAND_SELECT: &str = "SELECT b.id, b.name, b.summary, b.packaging, b.price_tier, \
            b.website, b.country, b.image_url, b.created_at, \
            COALESCE( \
                array_agg(c.name ORDER BY c.name COLLATE \"C\") FILTER (WHERE c.name IS NOT NULL), \
                '{}'::text[] \
            ) AS certifications \
     FROM brands b \
     LEFT JOIN brand_certifications bc ON bc.brand_id = b.id \
     LEFT JOIN certifications c ON c.id = bc.certification_id";

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns one page of brands, newest first, plus the total brand count.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if a query fails.
pub async fn list_brands(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<(Vec<BrandRow>, i64), DbError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brands")
        .fetch_one(pool)
        .await?;

    let rows = sqlx::query_as::<_, BrandRow>(&format!(
        "{BRAND_SELECT} \
         GROUP BY b.id \
         ORDER BY b.created_at DESC, b.id DESC \
         LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((rows, total))
}

/// Returns a single brand with its certifications, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_brand(pool: &PgPool, id: i64) -> Result<Option<BrandRow>, DbError> {
    let row = sqlx::query_as::<_, BrandRow>(&format!(
        "{BRAND_SELECT} \
         WHERE b.id = $1 \
         GROUP BY b.id"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Number of distinct brands per certification, most common first.
///
/// Certifications without any brand are omitted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn certification_counts(pool: &PgPool) -> Result<Vec<CertificationCount>, DbError> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT c.name, COUNT(DISTINCT bc.brand_id) AS brand_count \
         FROM certifications c \
         JOIN brand_certifications bc ON bc.certification_id = c.id \
         GROUP BY c.name \
         ORDER BY brand_count DESC, c.name COLLATE \"C\"",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(name, count)| CertificationCount { name, count })
        .collect())
}

/// Inserts a brand and links its certifications in one transaction.
///
/// Any failure rolls back the brand row together with every association.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails.
pub async fn create_brand(pool: &PgPool, input: &BrandInput) -> Result<BrandRow, DbError> {
    let mut tx = pool.begin().await?;

    let (id, image_url, created_at): (i64, Option<String>, DateTime<Utc>) = sqlx::query_as(
        "INSERT INTO brands (name, summary, packaging, price_tier, website, country) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id, image_url, created_at",
    )
    .bind(&input.name)
    .bind(&input.summary)
    .bind(&input.packaging)
    .bind(&input.price_tier)
    .bind(&input.website)
    .bind(&input.country)
    .fetch_one(&mut *tx)
    .await?;

    let certifications = input.certification_set();
    link_certifications(&mut tx, id, &certifications).await?;

    tx.commit().await?;

    Ok(BrandRow {
        id,
        name: input.name.clone(),
        summary: input.summary.clone(),
        packaging: input.packaging.clone(),
        price_tier: input.price_tier.clone(),
        website: input.website.clone(),
        country: input.country.clone(),
        image_url,
        certifications,
        created_at,
    })
}

/// Replaces every editable field of a brand and its whole certification set.
///
/// Returns `None` (after rolling back) when no brand has this id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails; nothing is persisted in that case.
pub async fn update_brand(
    pool: &PgPool,
    id: i64,
    input: &BrandInput,
) -> Result<Option<BrandRow>, DbError> {
    let mut tx = pool.begin().await?;

    let updated: Option<(Option<String>, DateTime<Utc>)> = sqlx::query_as(
        "UPDATE brands \
         SET name = $1, summary = $2, packaging = $3, price_tier = $4, website = $5, country = $6 \
         WHERE id = $7 \
         RETURNING image_url, created_at",
    )
    .bind(&input.name)
    .bind(&input.summary)
    .bind(&input.packaging)
    .bind(&input.price_tier)
    .bind(&input.website)
    .bind(&input.country)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some((image_url, created_at)) = updated else {
        tx.rollback().await?;
        return Ok(None);
    };

    sqlx::query("DELETE FROM brand_certifications WHERE brand_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let certifications = input.certification_set();
    link_certifications(&mut tx, id, &certifications).await?;

    tx.commit().await?;

    Ok(Some(BrandRow {
        id,
        name: input.name.clone(),
        summary: input.summary.clone(),
        packaging: input.packaging.clone(),
        price_tier: input.price_tier.clone(),
        website: input.website.clone(),
        country: input.country.clone(),
        image_url,
        certifications,
        created_at,
    }))
}

/// Deletes a brand. Its associations cascade; certification rows stay.
///
/// Returns whether a row was removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn delete_brand(pool: &PgPool, id: i64) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM brands WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Insert a certification by name or return the id of the existing row.
///
/// The no-op `DO UPDATE` makes `RETURNING` yield the id on conflict too.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn upsert_certification(conn: &mut PgConnection, name: &str) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO certifications (name) \
         VALUES ($1) \
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
         RETURNING id",
    )
    .bind(name)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

async fn link_certifications(
    conn: &mut PgConnection,
    brand_id: i64,
    names: &[String],
) -> Result<(), DbError> {
    for name in names {
        let certification_id = upsert_certification(&mut *conn, name).await?;
        sqlx::query(
            "INSERT INTO brand_certifications (brand_id, certification_id) \
             VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(brand_id)
        .bind(certification_id)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
