use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
    Extension, Form,
};
use tracing::warn;

use crate::error::StorageError;
use crate::services::report_form_service::{
    self, ReportFormPageData, ReportFormQuery, ReportSubmissionForm, ReportSuccessView,
    SubmitReportError,
};
use crate::services::storage_service::StorageService;
use crate::web::middleware::session::BrowserSession;
use crate::web::routes::{render, storage_error_response};
use crate::web::state::AppState;

const SUBMIT_FAILED_MESSAGE: &str =
    "There was an error submitting your report. Please try again.";

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportFormTemplate {
    pub form: ReportFormPageData,
}

#[derive(Template)]
#[template(path = "report_success.html")]
pub struct ReportSuccessTemplate {
    pub success: ReportSuccessView,
}

async fn render_form(
    storage: &StorageService,
    status: StatusCode,
    values: ReportSubmissionForm,
    error: Option<String>,
) -> Response {
    match report_form_service::build_report_form_page(storage, values, error).await {
        Ok(form) => render(status, &ReportFormTemplate { form }),
        Err(e) => storage_error_response("Report form load", &e),
    }
}

pub async fn report_form_handler(
    Extension(session): Extension<BrowserSession>,
    Query(query): Query<ReportFormQuery>,
    State(state): State<AppState>,
) -> Response {
    let storage = state.storage_for(&session);
    let preselected = query.guru_id.filter(|id| !id.trim().is_empty());
    render_form(
        &storage,
        StatusCode::OK,
        ReportSubmissionForm::blank(preselected),
        None,
    )
    .await
}

pub async fn submit_report_handler(
    Extension(session): Extension<BrowserSession>,
    State(state): State<AppState>,
    Form(form): Form<ReportSubmissionForm>,
) -> Response {
    let storage = state.storage_for(&session);

    let (status, message) = match report_form_service::submit_report(&storage, &form).await {
        Ok(report) => {
            let success = ReportSuccessView {
                guru_id: report.guru_id,
                redirect_delay_secs: state.config.report_redirect_delay_secs,
            };
            return render(StatusCode::OK, &ReportSuccessTemplate { success });
        }
        Err(SubmitReportError::Invalid(e)) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        Err(SubmitReportError::Storage(StorageError::UnknownGuru(id))) => {
            warn!("Report submitted for unknown guru {}", id);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                "The selected guru does not exist. Please choose another.".to_string(),
            )
        }
        Err(SubmitReportError::Storage(e)) => {
            warn!("Report submission failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                SUBMIT_FAILED_MESSAGE.to_string(),
            )
        }
    };

    render_form(&storage, status, form, Some(message)).await
}
