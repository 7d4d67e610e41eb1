//! Edit handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use litforge_common::db::LiteratureEdit;
use litforge_common::errors::AppError;
use serde::Deserialize;
use tracing::{info, instrument};
use validator::{Validate, ValidationError};

use crate::error::PageResult;
use crate::{views, AppState};

#[derive(Debug, Deserialize)]
pub struct PickerQuery {
    pub id: Option<i64>,
}

/// Fields posted by the edit form
#[derive(Debug, Deserialize, Validate)]
pub struct EditForm {
    #[validate(custom(function = "not_blank"))]
    pub title: String,

    #[validate(custom(function = "not_blank"))]
    pub authors: String,

    #[serde(default)]
    pub publication_date: String,

    #[serde(default)]
    pub location: String,

    #[serde(default, rename = "abstract")]
    pub abstract_text: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub outline: String,
}

impl From<EditForm> for LiteratureEdit {
    fn from(form: EditForm) -> Self {
        Self {
            title: normalize_newlines(form.title),
            authors: normalize_newlines(form.authors),
            publication_date: normalize_newlines(form.publication_date),
            location: normalize_newlines(form.location),
            abstract_text: normalize_newlines(form.abstract_text),
            summary: normalize_newlines(form.summary),
            outline: normalize_newlines(form.outline),
        }
    }
}

/// Browsers submit textarea line breaks as CRLF; records store LF
fn normalize_newlines(value: String) -> String {
    if value.contains('\r') {
        value.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        value
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Record picker; a selected id goes straight to its edit form
pub async fn picker(
    State(state): State<AppState>,
    Query(query): Query<PickerQuery>,
) -> PageResult<Response> {
    if let Some(id) = query.id {
        return Ok(Redirect::to(&format!("/literature/{}/edit", id)).into_response());
    }

    let records = state.repo.list_literature().await?;
    Ok(views::edit_picker(&records).into_response())
}

/// Edit form pre-filled with the current values
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> PageResult<Html<String>> {
    let record = state
        .repo
        .find_literature_by_id(id)
        .await?
        .ok_or(AppError::LiteratureNotFound { id })?;

    Ok(views::edit_form(id, &LiteratureEdit::from(&record), None))
}

/// Save every editable field at once
#[instrument(skip(state, form))]
pub async fn save(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<EditForm>,
) -> PageResult<Response> {
    if let Err(errors) = form.validate() {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        let message = format!("{} must not be empty", fields.join(" and "));

        AppError::Validation {
            message: message.clone(),
            field: fields.first().cloned(),
        }
        .log();

        let values = LiteratureEdit::from(form);
        return Ok((
            StatusCode::BAD_REQUEST,
            views::edit_form(id, &values, Some(&message)),
        )
            .into_response());
    }

    let updated = state
        .repo
        .update_literature(id, form.into())
        .await?
        .ok_or(AppError::LiteratureNotFound { id })?;

    info!(id, title = %updated.title, "Literature updated");

    Ok(views::edit_saved(&updated).into_response())
}
