//! Live integration tests for the Postgres brand store using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated database from the sqlx test harness.
//! They need a reachable Postgres in `DATABASE_URL`.

use greenshelf_core::BrandInput;
use greenshelf_db::{seed_sample_brands, BrandStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn brand_input(name: &str, certs: &[&str]) -> BrandInput {
    BrandInput {
        name: name.to_string(),
        summary: "Plastic-free personal care essentials".to_string(),
        packaging: "Compostable paper".to_string(),
        price_tier: "$$".to_string(),
        website: Some(format!("https://{}.example.com", name.to_lowercase())),
        country: Some("Canada".to_string()),
        certifications: certs.iter().map(ToString::to_string).collect(),
    }
}

async fn certification_rows(pool: &sqlx::PgPool, name: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM certifications WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("count certifications '{name}' failed: {e}"))
}

async fn table_rows(pool: &sqlx::PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("count {table} failed: {e}"))
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn create_then_get_returns_input_fields(pool: sqlx::PgPool) {
    let store = BrandStore::Postgres(pool);
    let input = brand_input("Ethique", &["Vegan", "B Corp", "Vegan"]);

    let created = store.create(&input).await.expect("create");
    let fetched = store
        .get_by_id(created.id)
        .await
        .expect("get")
        .expect("brand exists");

    assert_eq!(fetched.name, input.name);
    assert_eq!(fetched.summary, input.summary);
    assert_eq!(fetched.packaging, input.packaging);
    assert_eq!(fetched.price_tier, input.price_tier);
    assert_eq!(fetched.website, input.website);
    assert_eq!(fetched.country, input.country);
    assert_eq!(fetched.certifications, vec!["B Corp", "Vegan"]);
    assert_eq!(fetched.certifications, created.certifications);
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_unknown_brand_is_none(pool: sqlx::PgPool) {
    let store = BrandStore::Postgres(pool);
    assert!(store.get_by_id(999_999).await.expect("get").is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn shared_certification_is_stored_once(pool: sqlx::PgPool) {
    let store = BrandStore::Postgres(pool.clone());
    store
        .create(&brand_input("Ethique", &["Leaping Bunny"]))
        .await
        .expect("create first");
    store
        .create(&brand_input("Plaine", &["Leaping Bunny"]))
        .await
        .expect("create second");

    assert_eq!(certification_rows(&pool, "Leaping Bunny").await, 1);

    let counts = store.certification_counts().await.expect("counts");
    let bunny = counts
        .iter()
        .find(|c| c.name == "Leaping Bunny")
        .expect("count row");
    assert_eq!(bunny.count, 2);
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn list_pages_newest_first_with_total(pool: sqlx::PgPool) {
    let store = BrandStore::Postgres(pool);
    seed_sample_brands(&store).await.expect("seed");

    let page = store.list(6, 0).await.expect("list");
    assert_eq!(page.total, 3);
    assert_eq!(page.brands.len(), 3);
    assert_eq!(page.brands[0].name, "Youth To The People");

    let empty = store.list(6, 10).await.expect("list past end");
    assert!(empty.brands.is_empty());
    assert_eq!(empty.total, 3);
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn update_replaces_certification_set(pool: sqlx::PgPool) {
    let store = BrandStore::Postgres(pool);
    let created = store
        .create(&brand_input("Ethique", &["A", "B"]))
        .await
        .expect("create");

    let mut replacement = brand_input("Ethique Bars", &["C"]);
    replacement.website = None;
    let updated = store
        .update(created.id, &replacement)
        .await
        .expect("update")
        .expect("brand exists");
    assert_eq!(updated.certifications, vec!["C"]);

    let fetched = store
        .get_by_id(created.id)
        .await
        .expect("get")
        .expect("brand exists");
    assert_eq!(fetched.name, "Ethique Bars");
    assert!(fetched.website.is_none());
    assert_eq!(fetched.certifications, vec!["C"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_unknown_brand_is_none(pool: sqlx::PgPool) {
    let store = BrandStore::Postgres(pool.clone());
    let result = store
        .update(424_242, &brand_input("Ghost", &["Phantom Cert"]))
        .await
        .expect("update");
    assert!(result.is_none());
    // Rolled back: the certification upsert never ran.
    assert_eq!(certification_rows(&pool, "Phantom Cert").await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn delete_keeps_shared_certifications(pool: sqlx::PgPool) {
    let store = BrandStore::Postgres(pool.clone());
    let first = store
        .create(&brand_input("Ethique", &["Vegan", "Solo"]))
        .await
        .expect("create first");
    store
        .create(&brand_input("Plaine", &["Vegan"]))
        .await
        .expect("create second");

    store.delete(first.id).await.expect("delete");

    assert!(store.get_by_id(first.id).await.expect("get").is_none());
    let page = store.list(6, 0).await.expect("list");
    assert_eq!(page.total, 1);

    let counts = store.certification_counts().await.expect("counts");
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].name, "Vegan");
    assert_eq!(counts[0].count, 1);

    // Orphaned certifications are retained.
    assert_eq!(certification_rows(&pool, "Solo").await, 1);
}

// ---------------------------------------------------------------------------
// Atomicity
// ---------------------------------------------------------------------------

// Postgres rejects NUL bytes in text, so this certification fails mid-transaction.
const UNSTORABLE_CERT: &str = "Zero\0Waste";

#[sqlx::test(migrations = "../../migrations")]
async fn failed_create_leaves_no_rows(pool: sqlx::PgPool) {
    let store = BrandStore::Postgres(pool.clone());

    let result = store
        .create(&brand_input("Nul", &["Fine", UNSTORABLE_CERT]))
        .await;
    assert!(result.is_err());

    assert_eq!(table_rows(&pool, "brands").await, 0);
    assert_eq!(table_rows(&pool, "certifications").await, 0);
    assert_eq!(table_rows(&pool, "brand_certifications").await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn failed_update_keeps_previous_brand_and_associations(pool: sqlx::PgPool) {
    let store = BrandStore::Postgres(pool.clone());
    let created = store
        .create(&brand_input("Ethique", &["B Corp", "Vegan"]))
        .await
        .expect("create");

    let result = store
        .update(
            created.id,
            &brand_input("Ethique Renamed", &["Fine", UNSTORABLE_CERT]),
        )
        .await;
    assert!(result.is_err());

    let fetched = store
        .get_by_id(created.id)
        .await
        .expect("get")
        .expect("brand exists");
    assert_eq!(fetched.name, "Ethique");
    assert_eq!(fetched.certifications, vec!["B Corp", "Vegan"]);

    assert_eq!(table_rows(&pool, "brands").await, 1);
    assert_eq!(table_rows(&pool, "certifications").await, 2);
    assert_eq!(table_rows(&pool, "brand_certifications").await, 2);
    assert_eq!(certification_rows(&pool, "Fine").await, 0);
}
