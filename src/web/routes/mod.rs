pub mod gurus;
pub mod report;
pub mod settings;

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::warn;

use crate::error::StorageError;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub offer_reset: bool,
}

pub(crate) fn render<T: Template>(status: StatusCode, template: &T) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            warn!("Template render failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub(crate) fn storage_error_response(context: &str, err: &StorageError) -> Response {
    warn!("{} failed: {}", context, err);
    let (title, message) = if err.is_corrupt_data() {
        (
            "Stored Data Unreadable",
            "The data saved for this session could not be read. Resetting the session clears it.",
        )
    } else {
        (
            "Storage Unavailable",
            "Session storage could not be reached. Please try again.",
        )
    };
    render(
        StatusCode::INTERNAL_SERVER_ERROR,
        &ErrorTemplate {
            title: title.to_string(),
            message: message.to_string(),
            offer_reset: err.is_corrupt_data(),
        },
    )
}
