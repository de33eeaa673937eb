//! Brand write handlers: submit, edit, delete.

use axum::{
    extract::{rejection::FormRejection, Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use greenshelf_core::{validate, BrandForm, ValidationErrors};

use super::{AppState, WebError};
use crate::views::{self, BRAND_NOT_FOUND_MESSAGE, NOT_FOUND_MESSAGE};

/// Raw urlencoded pairs; `certifications` may repeat.
type FormPairs = Form<Vec<(String, String)>>;

const AFTER_WRITE: &str = "/browse";

fn read_form(body: Result<FormPairs, FormRejection>) -> Result<BrandForm, WebError> {
    let Form(pairs) = body.map_err(WebError::UnreadableForm)?;
    Ok(BrandForm::from_pairs(pairs))
}

fn parse_brand_id(raw: &str) -> Result<i64, WebError> {
    raw.parse::<i64>()
        .map_err(|_| WebError::NotFound(NOT_FOUND_MESSAGE))
}

/// GET /submit: blank creation form.
pub(in crate::web) async fn new_brand() -> Html<String> {
    Html(views::form::submit_page(
        &BrandForm::default(),
        &ValidationErrors::default(),
    ))
}

/// POST /submit: validate and create.
pub(in crate::web) async fn create_brand(
    State(state): State<AppState>,
    body: Result<FormPairs, FormRejection>,
) -> Result<Response, WebError> {
    let form = read_form(body)?;
    let errors = validate(&form);
    if !errors.is_empty() {
        tracing::debug!(fields = errors.len(), "rejected brand submission");
        return Ok((
            StatusCode::BAD_REQUEST,
            Html(views::form::submit_page(&form, &errors)),
        )
            .into_response());
    }

    let brand = state.store.create(&form.into_input()).await?;
    tracing::info!(brand_id = brand.id, name = %brand.name, "brand created");
    Ok(Redirect::to(AFTER_WRITE).into_response())
}

/// GET /brands/{id}/edit: form pre-filled from the stored brand.
pub(in crate::web) async fn edit_brand(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let id = parse_brand_id(&id)?;
    let brand = state
        .store
        .get_by_id(id)
        .await?
        .ok_or(WebError::NotFound(BRAND_NOT_FOUND_MESSAGE))?;

    Ok(Html(views::form::edit_page(
        id,
        &BrandForm::from_brand(&brand),
        &ValidationErrors::default(),
    )))
}

/// POST /brands/{id}/edit: validate and replace.
pub(in crate::web) async fn update_brand(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<FormPairs, FormRejection>,
) -> Result<Response, WebError> {
    let id = parse_brand_id(&id)?;
    let form = read_form(body)?;
    let errors = validate(&form);
    if !errors.is_empty() {
        tracing::debug!(brand_id = id, fields = errors.len(), "rejected brand edit");
        return Ok((
            StatusCode::BAD_REQUEST,
            Html(views::form::edit_page(id, &form, &errors)),
        )
            .into_response());
    }

    let brand = state
        .store
        .update(id, &form.into_input())
        .await?
        .ok_or(WebError::NotFound(BRAND_NOT_FOUND_MESSAGE))?;
    tracing::info!(brand_id = brand.id, "brand updated");
    Ok(Redirect::to(AFTER_WRITE).into_response())
}

/// POST /brands/{id}/delete
pub(in crate::web) async fn delete_brand(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, WebError> {
    let id = parse_brand_id(&id)?;
    state.store.delete(id).await?;
    tracing::info!(brand_id = id, "brand deleted");
    Ok(Redirect::to(AFTER_WRITE))
}
