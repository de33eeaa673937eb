use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Price tiers offered by the submission form, cheapest first.
pub const PRICE_TIERS: [&str; 3] = ["$", "$$", "$$$"];

/// A catalog entry as read back from a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub summary: String,
    pub packaging: String,
    pub price_tier: String,
    pub website: Option<String>,
    pub country: Option<String>,
    pub image_url: Option<String>,
    /// Sorted, duplicate-free certification names.
    pub certifications: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Brand {
    /// Build a brand from a write payload. Certifications are normalized.
    #[must_use]
    pub fn from_input(id: i64, input: &BrandInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name.clone(),
            summary: input.summary.clone(),
            packaging: input.packaging.clone(),
            price_tier: input.price_tier.clone(),
            website: input.website.clone(),
            country: input.country.clone(),
            image_url: None,
            certifications: input.certification_set(),
            created_at,
        }
    }

    /// Overwrite every editable field with the payload. `id`, `image_url` and
    /// `created_at` are kept.
    pub fn apply(&mut self, input: &BrandInput) {
        self.name.clone_from(&input.name);
        self.summary.clone_from(&input.summary);
        self.packaging.clone_from(&input.packaging);
        self.price_tier.clone_from(&input.price_tier);
        self.website.clone_from(&input.website);
        self.country.clone_from(&input.country);
        self.certifications = input.certification_set();
    }
}

/// Validated payload for creating or replacing a brand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandInput {
    pub name: String,
    pub summary: String,
    pub packaging: String,
    pub price_tier: String,
    pub website: Option<String>,
    pub country: Option<String>,
    pub certifications: Vec<String>,
}

impl BrandInput {
    /// Certification names as they will be stored: trimmed, deduplicated, sorted.
    #[must_use]
    pub fn certification_set(&self) -> Vec<String> {
        normalize_certifications(&self.certifications)
    }
}

/// Number of distinct brands holding a certification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificationCount {
    pub name: String,
    pub count: i64,
}

/// Trim, drop blanks, dedupe (case-sensitive) and sort certification names.
#[must_use]
pub fn normalize_certifications<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .map(ToOwned::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The demo catalog served when no database is configured.
#[must_use]
pub fn sample_brands() -> Vec<BrandInput> {
    let sample = |name: &str, summary: &str, certifications: [&str; 2], packaging: &str| {
        BrandInput {
            name: name.to_string(),
            summary: summary.to_string(),
            packaging: packaging.to_string(),
            price_tier: "$$".to_string(),
            website: None,
            country: None,
            certifications: certifications.iter().map(ToString::to_string).collect(),
        }
    };

    vec![
        sample(
            "Biossance",
            "Lab-grown squalane skincare backed by EWG verification and Responsible Care commitments.",
            ["EWG Verified", "Leaping Bunny"],
            "Sugarcane biopolymer, refill pouches",
        ),
        sample(
            "ILIA Beauty",
            "Weightless color cosmetics disclosing recycled aluminum percentages and funding take-back programs.",
            ["B Corp", "Leaping Bunny"],
            "Recycled aluminum, mail-back recycling",
        ),
        sample(
            "Youth To The People",
            "Superfood-powered cleansers brewed weekly in California with transparent supplier maps.",
            ["Climate Neutral", "Vegan"],
            "Glass bottles, FSC cartons",
        ),
    ]
}

#[cfg(test)]
#[path = "brands_test.rs"]
mod tests;
