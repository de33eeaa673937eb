//! Server-side checks for submitted brand forms.
//!
//! [`BrandForm`] holds the raw values exactly as entered so a rejected form can
//! be re-rendered; [`validate`] is pure and never touches a store.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::brands::{Brand, BrandInput};

static WEBSITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://[a-z0-9_.-]+(\.[a-z0-9_.-]+)+(/\S*)?$")
        .expect("valid website regex")
});

/// Field name to message. Empty means the form is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, &'static str>);

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }
}

/// A brand form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandForm {
    pub name: String,
    pub summary: String,
    pub packaging: String,
    pub price_tier: String,
    pub website: String,
    pub country: String,
    /// Raw `certifications` values; each may itself be comma-separated.
    pub certifications: Vec<String>,
}

impl BrandForm {
    /// Collect urlencoded key/value pairs. `certifications` may repeat; unknown
    /// keys are ignored and a repeated scalar keeps its last value.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "name" => form.name = value,
                "summary" => form.summary = value,
                "packaging" => form.packaging = value,
                "price_tier" => form.price_tier = value,
                "website" => form.website = value,
                "country" => form.country = value,
                "certifications" | "certifications[]" => form.certifications.push(value),
                _ => {}
            }
        }
        form
    }

    /// Pre-fill an edit form from a stored brand.
    #[must_use]
    pub fn from_brand(brand: &Brand) -> Self {
        Self {
            name: brand.name.clone(),
            summary: brand.summary.clone(),
            packaging: brand.packaging.clone(),
            price_tier: brand.price_tier.clone(),
            website: brand.website.clone().unwrap_or_default(),
            country: brand.country.clone().unwrap_or_default(),
            certifications: brand.certifications.clone(),
        }
    }

    /// Every certification name entered, split on commas, trimmed, blanks dropped.
    #[must_use]
    pub fn certification_list(&self) -> Vec<String> {
        self.certifications
            .iter()
            .flat_map(|raw| raw.split(','))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }

    /// The certifications as a single comma-separated string for a text input.
    #[must_use]
    pub fn certifications_text(&self) -> String {
        self.certification_list().join(", ")
    }

    /// Convert into a write payload. Call after [`validate`] returned no errors.
    #[must_use]
    pub fn into_input(self) -> BrandInput {
        let certifications = self.certification_list();
        BrandInput {
            name: self.name.trim().to_string(),
            summary: self.summary.trim().to_string(),
            packaging: self.packaging.trim().to_string(),
            price_tier: self.price_tier.trim().to_string(),
            website: non_blank(&self.website),
            country: non_blank(&self.country),
            certifications,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Check a submitted brand form.
#[must_use]
pub fn validate(form: &BrandForm) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if form.name.trim().chars().count() < 2 {
        errors.insert("name", "Brand name must be at least 2 characters.");
    }
    if form.summary.trim().chars().count() < 10 {
        errors.insert("summary", "Summary should be at least 10 characters.");
    }
    let website = form.website.trim();
    if !website.is_empty() && !WEBSITE_RE.is_match(website) {
        errors.insert(
            "website",
            "Website must be a valid URL starting with http(s).",
        );
    }
    if form.price_tier.trim().is_empty() {
        errors.insert("price_tier", "Select a price tier.");
    }

    errors
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
