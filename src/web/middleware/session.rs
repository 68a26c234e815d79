use axum::{extract::Request, http::header, middleware::Next, response::Response};
use cookie::{Cookie, SameSite};
use http::HeaderValue;
use tracing::{debug, warn};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "hh_session";

/// Identifies the browser session whose documents a request may touch.
#[derive(Clone, Debug)]
pub struct BrowserSession {
    pub id: String,
}

fn session_id_from_cookies(request: &Request) -> Option<String> {
    let prefix = format!("{}=", SESSION_COOKIE);
    request
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|hv| hv.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .map(str::trim)
        .find_map(|c| c.strip_prefix(prefix.as_str()))
        .filter(|id| Uuid::parse_str(id).is_ok())
        .map(str::to_string)
}

// No Max-Age/Expires: the browser drops the cookie, and with it the
// session, when it closes.
fn session_cookie(session_id: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, session_id);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

pub async fn ensure_session(mut request: Request, next: Next) -> Response {
    let existing = session_id_from_cookies(&request);
    let is_new = existing.is_none();
    let session_id = existing.unwrap_or_else(|| Uuid::new_v4().to_string());
    if is_new {
        debug!(session_id = %session_id, "starting browser session");
    }

    request.extensions_mut().insert(BrowserSession {
        id: session_id.clone(),
    });
    let mut response = next.run(request).await;

    if is_new {
        match HeaderValue::from_str(&session_cookie(session_id).to_string()) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!("Session cookie not encodable: {}", e),
        }
    }
    response
}
