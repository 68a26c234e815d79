use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Extension,
};

use crate::services::guru_directory_service::{
    self, DirectoryPageData, DirectoryQuery, GuruDetailQuery, GuruDetailView,
};
use crate::web::middleware::session::BrowserSession;
use crate::web::routes::{render, storage_error_response, ErrorTemplate};
use crate::web::state::AppState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page: DirectoryPageData,
}

pub async fn index_handler(
    Extension(session): Extension<BrowserSession>,
    Query(query): Query<DirectoryQuery>,
    State(state): State<AppState>,
) -> Response {
    let storage = state.storage_for(&session);
    match guru_directory_service::build_directory_page(&storage, &query).await {
        Ok(page) => render(StatusCode::OK, &IndexTemplate { page }),
        Err(e) => storage_error_response("Guru directory load", &e),
    }
}

// Fragment re-rendered on every keystroke by assets/search.js.
#[derive(Template)]
#[template(path = "guru_results.html")]
pub struct GuruResultsTemplate {
    pub page: DirectoryPageData,
}

pub async fn search_results_handler(
    Extension(session): Extension<BrowserSession>,
    Query(query): Query<DirectoryQuery>,
    State(state): State<AppState>,
) -> Response {
    let storage = state.storage_for(&session);
    match guru_directory_service::build_directory_page(&storage, &query).await {
        Ok(page) => render(StatusCode::OK, &GuruResultsTemplate { page }),
        Err(e) => storage_error_response("Guru search", &e),
    }
}

#[derive(Template)]
#[template(path = "guru.html")]
pub struct GuruDetailTemplate {
    pub guru: GuruDetailView,
}

pub async fn guru_detail_handler(
    Extension(session): Extension<BrowserSession>,
    Path(guru_id): Path<String>,
    Query(query): Query<GuruDetailQuery>,
    State(state): State<AppState>,
) -> Response {
    let storage = state.storage_for(&session);
    let view = match guru_directory_service::load_guru_detail_view(&storage, &guru_id, &query)
        .await
    {
        Ok(v) => v,
        Err(e) => return storage_error_response(&format!("Guru detail load for {}", guru_id), &e),
    };

    let Some(view) = view else {
        return render(
            StatusCode::NOT_FOUND,
            &ErrorTemplate {
                title: "Guru Not Found".to_string(),
                message: "The guru you're looking for doesn't exist.".to_string(),
                offer_reset: false,
            },
        );
    };

    render(StatusCode::OK, &GuruDetailTemplate { guru: view })
}
