//! In-process brand store used when no database is configured.
//!
//! Mirrors the Postgres semantics (ordering, certification dedupe, counts) so
//! handlers behave the same in either mode. Data is lost on restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use greenshelf_core::{sample_brands, Brand, BrandInput, CertificationCount};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    brands: Vec<Brand>,
    last_id: i64,
}

/// Shared, lock-guarded brand list. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the demo catalog, listed in catalog order.
    #[must_use]
    pub fn with_samples() -> Self {
        let now = Utc::now();
        let mut state = MemoryState::default();
        for (minutes_ago, input) in (1_i64..).zip(sample_brands()) {
            state.last_id += 1;
            let created_at = now - Duration::minutes(minutes_ago);
            state
                .brands
                .push(Brand::from_input(state.last_id, &input, created_at));
        }
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Newest-first page and total count. Offsets past the end yield an empty page.
    pub async fn list(&self, limit: i64, offset: i64) -> (Vec<Brand>, i64) {
        let state = self.state.read().await;
        let mut brands: Vec<&Brand> = state.brands.iter().collect();
        brands.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(0);
        let page = brands.into_iter().skip(skip).take(take).cloned().collect();

        (page, total_count(state.brands.len()))
    }

    pub async fn get(&self, id: i64) -> Option<Brand> {
        let state = self.state.read().await;
        state.brands.iter().find(|brand| brand.id == id).cloned()
    }

    pub async fn certification_counts(&self) -> Vec<CertificationCount> {
        let state = self.state.read().await;
        let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
        for brand in &state.brands {
            // `certifications` is already deduplicated per brand.
            for name in &brand.certifications {
                *counts.entry(name.as_str()).or_insert(0) += 1;
            }
        }

        let mut counts: Vec<CertificationCount> = counts
            .into_iter()
            .map(|(name, count)| CertificationCount {
                name: name.to_string(),
                count,
            })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        counts
    }

    pub async fn create(&self, input: &BrandInput) -> Brand {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let brand = Brand::from_input(state.last_id, input, Utc::now());
        state.brands.push(brand.clone());
        brand
    }

    pub async fn update(&self, id: i64, input: &BrandInput) -> Option<Brand> {
        let mut state = self.state.write().await;
        let brand = state.brands.iter_mut().find(|brand| brand.id == id)?;
        brand.apply(input);
        Some(brand.clone())
    }

    pub async fn delete(&self, id: i64) -> bool {
        let mut state = self.state.write().await;
        let before = state.brands.len();
        state.brands.retain(|brand| brand.id != id);
        state.brands.len() != before
    }
}

fn total_count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}
