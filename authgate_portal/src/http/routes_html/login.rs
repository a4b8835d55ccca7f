use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use crate::app_state::AppState;
use crate::http::HtmlTemplate;
use crate::session;

/// Render the login form
///
/// Every render is a fresh form session: a new session cookie is issued and
/// the guard of the previously rendered form (if any) is torn down, like the
/// in-browser form discards its attempt state on reload.
pub async fn handler(State(app_state): State<AppState>,
                     headers: HeaderMap,
) -> Result<Response, StatusCode> {

    let mut html = HtmlTemplate::new();

    // tear down the previous form session
    if let Some(old_token) = session::from_headers(&headers) {
        if app_state.guards.guard_for(&old_token).await.is_locked().await {
            html.message_warning("There were too many failed login attempts recently.".to_string());
        }
        app_state.guards.remove(&old_token).await;
    }
    app_state.guards.prune().await;

    // new form session
    let token = session::generate_token();

    html.include_css("/rsc/css/login.css");
    html.include_js("/rsc/js/login.js");

    html.push_body("<div class=\"BgBox\">");
    html.push_body("<h2>Login</h2>");
    html.push_body("<div>");
    html.push_body("<label for=\"LoginEmail\">Email</label>");
    html.push_body("<input id=\"LoginEmail\" type=\"email\" placeholder=\"Email\" required/>");
    html.push_body("</div>");
    html.push_body("<div>");
    html.push_body("<label for=\"LoginPassword\">Password</label>");
    html.push_body("<input id=\"LoginPassword\" type=\"password\" placeholder=\"Password\" required/>");
    html.push_body("<p class=\"PasswordRequirements\">");
    html.push_body("Password must have at least 8 characters, including upper case, lower case, digit and special character.");
    html.push_body("</p>");
    html.push_body("</div>");
    html.push_body("<p id=\"LoginError\" class=\"MessageError\" hidden></p>");
    html.push_body("<button id=\"LoginButton\" type=\"button\">Login</button>");
    html.push_body("</div>");

    let mut response = html.into_response();
    response.headers_mut().insert(SET_COOKIE, session::build_cookie(&token).parse().unwrap());
    Ok(response)
}
