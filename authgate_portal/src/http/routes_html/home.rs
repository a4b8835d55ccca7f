use axum::http::StatusCode;
use axum::response::IntoResponse;
use crate::http::HtmlTemplate;

pub async fn handler() -> Result<impl IntoResponse, StatusCode> {
    let mut template = HtmlTemplate::new();
    template.push_body("<h2>Welcome</h2>");
    template.push_body("<p>Please <a href=\"/html/login\">login</a> to continue.</p>");
    Ok(template)
}
