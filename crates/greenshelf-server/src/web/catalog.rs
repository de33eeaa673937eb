//! Read-only pages: `GET /` and `GET /browse`.

use axum::{
    extract::{Query, State},
    response::Html,
};
use greenshelf_core::{
    page_count, page_offset, parse_page, resolve_image, Brand, BROWSE_PAGE_SIZE, HOME_TEASER_SIZE,
};
use serde::Deserialize;

use super::{AppState, WebError};
use crate::views::{self, catalog::BrowsePage};

#[derive(Debug, Deserialize)]
pub(in crate::web) struct BrowseParams {
    // Kept as a string so malformed values fall back to page 1 instead of a 400.
    page: Option<String>,
}

fn with_images(brands: Vec<Brand>) -> Vec<Brand> {
    brands.into_iter().map(resolve_image).collect()
}

/// GET /: newest brands teaser.
pub(in crate::web) async fn home(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let page = state.store.list(HOME_TEASER_SIZE, 0).await?;
    let brands = with_images(page.brands);
    Ok(Html(views::catalog::home(&brands)))
}

/// GET /browse?page=N: paginated catalog plus certification counts.
pub(in crate::web) async fn browse(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> Result<Html<String>, WebError> {
    let page = parse_page(params.page.as_deref());
    let offset = page_offset(page, BROWSE_PAGE_SIZE);

    let listing = state.store.list(BROWSE_PAGE_SIZE, offset).await?;
    let cert_counts = state.store.certification_counts().await?;
    let brands = with_images(listing.brands);

    Ok(Html(views::catalog::browse(&BrowsePage {
        brands: &brands,
        page,
        page_count: page_count(listing.total, BROWSE_PAGE_SIZE),
        cert_counts: &cert_counts,
    })))
}
