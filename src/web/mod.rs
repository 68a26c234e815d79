pub mod middleware;
pub mod routes;
pub mod state;

use axum::{
    routing::{get, get_service, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::web::routes::{gurus, report, settings};
use crate::web::state::AppState;

pub fn router(state: AppState) -> Router {
    let pages = Router::new()
        .route("/", get(gurus::index_handler))
        .route("/gurus/search", get(gurus::search_results_handler))
        .route("/gurus/:guru_id", get(gurus::guru_detail_handler))
        .route(
            "/report",
            get(report::report_form_handler).post(report::submit_report_handler),
        )
        .route("/settings/mock-data", post(settings::mock_data_handler))
        .route("/session/clear", post(settings::clear_session_handler))
        .layer(axum::middleware::from_fn(
            middleware::session::ensure_session,
        ));

    let assets_dir = state.config.assets_dir.clone();

    Router::new()
        .merge(pages)
        .nest_service("/assets", get_service(ServeDir::new(assets_dir)))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
