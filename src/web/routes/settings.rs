use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;

use crate::models::AppSettings;
use crate::web::middleware::session::BrowserSession;
use crate::web::routes::storage_error_response;
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MockDataForm {
    pub enabled: bool,
}

pub async fn mock_data_handler(
    Extension(session): Extension<BrowserSession>,
    State(state): State<AppState>,
    Form(form): Form<MockDataForm>,
) -> Response {
    let storage = state.storage_for(&session);
    let settings = AppSettings {
        use_mock_data: form.enabled,
    };
    match storage.save_settings(&settings).await {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => storage_error_response("Mock data toggle", &e),
    }
}

pub async fn clear_session_handler(
    Extension(session): Extension<BrowserSession>,
    State(state): State<AppState>,
) -> Response {
    let storage = state.storage_for(&session);
    match storage.clear_all().await {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => storage_error_response("Session reset", &e),
    }
}
