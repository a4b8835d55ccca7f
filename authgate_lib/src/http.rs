use std::net::{SocketAddr, ToSocketAddrs};
use axum::extract::{Host, Path};
use axum::handler::HandlerWithoutStateExt;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Redirect};
use rust_embed::RustEmbed;

/// Background service that redirects plain http requests to the https port
///
/// Implementation from:
/// https://github.com/tokio-rs/axum/blob/main/examples/tls-rustls/src/main.rs
pub async fn http2https_background_service(url_http: String, url_https: String) {

    let addr_http: SocketAddr = match url_http.to_socket_addrs().ok().and_then(|mut x| x.next()) {
        Some(addr) => addr,
        None => {
            log::error!("cannot resolve http url '{}', no http-to-https forwarding", url_http);
            return;
        },
    };
    let addr_https: SocketAddr = match url_https.to_socket_addrs().ok().and_then(|mut x| x.next()) {
        Some(addr) => addr,
        None => {
            log::error!("cannot resolve https url '{}', no http-to-https forwarding", url_https);
            return;
        },
    };

    fn make_https(host: String, uri: Uri, port_http: u16, port_https: u16) -> Result<Uri, axum::BoxError> {
        let mut parts = uri.into_parts();

        parts.scheme = Some(axum::http::uri::Scheme::HTTPS);

        if parts.path_and_query.is_none() {
            parts.path_and_query = Some("/".parse().unwrap());
        }

        let https_host = host.replace(&port_http.to_string(), &port_https.to_string());
        parts.authority = Some(https_host.parse()?);

        Ok(Uri::from_parts(parts)?)
    }

    let redirect = move |Host(host): Host, uri: Uri| async move {
        match make_https(host, uri, addr_http.port(), addr_https.port()) {
            Ok(uri) => Ok(Redirect::permanent(&uri.to_string())),
            Err(_) => {
                Err(StatusCode::BAD_REQUEST)
            }
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr_http).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("cannot bind http forwarding server on {}: {}", addr_http, e);
            return;
        },
    };
    log::info!("starting HTTP-to-HTTPS forwarding server on {}", addr_http);
    if let Err(e) = axum::serve(listener, redirect.into_make_service()).await {
        log::error!("HTTP-to-HTTPS forwarding server failed: {}", e);
    }
}


#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../rsc"]
struct Resources;

/// axum route handler for static resources in the /rsc project directory
///
/// Integrate like: Router::new().route("/rsc/*filepath", routing::get(route_handler_static_resources))
pub async fn route_handler_static_resources(Path(filepath): Path<String>) -> Result<impl IntoResponse, StatusCode> {
    let file_content = Resources::get(&filepath).ok_or_else(|| {
        log::debug!("static resource '{}' not found", filepath);
        StatusCode::NOT_FOUND
    })?;

    // find content-type
    let mime_type: &'static str;
    if      filepath.ends_with(".css")   { mime_type = "text/css" }
    else if filepath.ends_with(".js")    { mime_type = "application/javascript" }
    else if filepath.ends_with(".png")   { mime_type = "image/png" }
    else if filepath.ends_with(".svg")   { mime_type = "image/svg+xml" }
    else if filepath.ends_with(".ico")   { mime_type = "image/x-icon" }
    else if filepath.ends_with(".woff2") { mime_type = "font/woff2" }
    else {
        return Err(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    // return file
    Ok((StatusCode::OK,
        [(header::CONTENT_TYPE, mime_type)],
        file_content.data))
}
