use axum::response::{Html, IntoResponse, Response};
use axum::{routing, Router};
use crate::app_state::AppState;

pub mod routes_html;
pub mod routes_rest_v0;

pub enum FrontendMessage {
    Success(String),
    Warning(String),
    Error(String),
}

impl FrontendMessage {

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html += match self {
            Self::Success(_) => "<div class=\"MessageSuccess\">",
            Self::Warning(_) => "<div class=\"MessageWarning\">",
            Self::Error(_) => "<div class=\"MessageError\">",
        };
        html += match self {
            Self::Success(msg) | Self::Warning(msg) | Self::Error(msg) => msg,
        };
        html += "</div>";
        html
    }
}


pub struct HtmlTemplate {
    html_body: String,
    css_files: Vec<&'static str>,
    js_files: Vec<&'static str>,
    messages: Vec<FrontendMessage>,
}

impl HtmlTemplate {

    pub fn new() -> Self {
        HtmlTemplate {
            html_body: "".to_string(),
            css_files: Vec::new(),
            js_files: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Adding a string to the HTML body
    pub fn push_body(&mut self, body: &str) {
        self.html_body += body;
    }

    /// request a CSS file to be additionally loaded
    pub fn include_css(&mut self, file_path: &'static str) {
        self.css_files.push(file_path)
    }

    /// request a javascript file to be additionally loaded
    pub fn include_js(&mut self, file_path: &'static str) {
        self.js_files.push(file_path)
    }

    pub fn message_warning(&mut self, message: String) {
        self.messages.push(FrontendMessage::Warning(message));
    }
}

impl IntoResponse for HtmlTemplate {

    fn into_response(self) -> Response {
        let mut html = String::new();

        html += "<!DOCTYPE html>\n";
        html += "<html>\n";
        html += "  <head>\n";
        html += "    <meta charset=\"UTF-8\">\n";
        html += "    <meta name=\"color-scheme\" content=\"dark light\">\n";
        html += "    <title>Authgate</title>\n";
        html += "    <link rel=\"icon\" href=\"/rsc/img/favicon.svg\" sizes=\"any\" type=\"image/svg+xml\">\n";
        html += "    <link rel=\"stylesheet\" href=\"/rsc/css/main.css\">\n";
        for css_file in &self.css_files {
            html += "    <link rel=\"stylesheet\" href=\"";
            html += css_file;
            html += "\">\n";
        }
        for js_file in &self.js_files {
            html += "    <script type=\"module\" src=\"";
            html += js_file;
            html += "\" defer></script>\n";
        }
        html += "  </head>\n";

        // html body
        html += "  <body><div>\n";

        // navigation
        html += "    <nav>\n";
        html += "      <div id=\"NavbarHome\"><a href=\"/\">Authgate</a></div>\n";
        html += "      <div class=\"NavbarLogin\">\n";
        html += "          <a href=\"/html/login\">Login</a>\n";
        html += "      </div>\n";
        html += "    </nav>\n";

        // messages
        html += "    <messages>";
        for message in &self.messages {
            html += &message.to_html();
        }
        html += "</messages>\n";

        // content
        html += "    <main>\n";
        html += &self.html_body;
        html += "    </main>\n";

        // footer
        html.push_str("    <footer>\n");
        html.push_str("    </footer>\n");

        // html finish
        html.push_str("  </div></body>\n");
        html.push_str("</html>\n");

        Html(html).into_response()
    }
}


pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", routing::get(routes_html::home::handler))
        .route("/html/login", routing::get(routes_html::login::handler))
        .route("/api/v0/login", routing::post(routes_rest_v0::login::handler))
        .route("/rsc/*filepath", routing::get(authgate_lib::http::route_handler_static_resources))
        .with_state(app_state)
}
