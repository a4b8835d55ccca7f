use axum::http::{header, HeaderMap};
use rand::RngCore;

/// Create a fresh form-session token
///
/// The token only correlates a rendered login form with its attempt guard,
/// it carries no authentication value.
pub fn generate_token() -> String {
    let mut raw: [u8; 16] = [0; 16];
    rand::thread_rng().fill_bytes(&mut raw);
    hex::encode(raw)
}

/// Extract the form-session token from the request cookies
pub fn from_headers(headers: &HeaderMap) -> Option<String> {
    let re = regex::Regex::new(r"login_session=([0-9a-f]+)").unwrap();
    for cookie_header in headers.get_all(header::COOKIE) {
        if let Ok(cookie_string) = cookie_header.to_str() {
            if let Some(captures) = re.captures(cookie_string) {
                if let Some(token) = captures.get(1) {
                    return Some(token.as_str().to_string());
                }
            }
        }
    }
    None
}

/// Cookie value that can be directly sent as http SET_COOKIE header
/// Session-scoped on purpose, guard state shall not survive the browser session.
pub fn build_cookie(token: &str) -> String {
    format!("login_session={}; HttpOnly; SameSite=Strict; Secure; Path=/;", token)
}
