//! Static file routes
//!
//! Files (MIME type, `Last-Modified`, conditional and range requests) are
//! served by `warp::fs::dir`; directory listings and trailing-slash
//! redirects come from [`directory_listing`]. Rejections are turned into
//! small HTML error pages.

use log::{info, warn};
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::constants::ACCESS_LOG_TARGET;
use crate::handlers::listing::directory_listing;

/// Build the complete filter chain serving `root`
pub fn static_routes(
    root: PathBuf,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone + Send + Sync + 'static {
    let listing = warp::get()
        .or(warp::head())
        .unify()
        .and(warp::path::full())
        .and(optional_query())
        .and(with_root(Arc::new(root.clone())))
        .and_then(directory_listing);

    let files = warp::fs::dir(root);

    listing
        .or(files)
        .recover(handle_rejection)
        .with(warp::log::custom(log_request))
}

// Raw query string, if the request has one
fn optional_query() -> impl Filter<Extract = (Option<String>,), Error = Infallible> + Clone {
    warp::query::raw()
        .map(|query: String| Some(query))
        .or(warp::any().map(|| None))
        .unify()
}

// Helper function to include the served root in request handlers
fn with_root(root: Arc<PathBuf>) -> impl Filter<Extract = (Arc<PathBuf>,), Error = Infallible> + Clone {
    warp::any().map(move || root.clone())
}

/// Map rejections to HTML error pages
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "File not found")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::NOT_IMPLEMENTED, "Unsupported method")
    } else {
        warn!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };

    Ok(error_page(status, message))
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let body = format!(
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Error response</title>\n</head>\n<body>\n<h1>Error response</h1>\n\
         <p>Error code: {}</p>\n<p>Message: {}.</p>\n</body>\n</html>\n",
        status.as_u16(),
        message
    );
    warp::reply::with_status(warp::reply::html(body), status).into_response()
}

fn log_request(request: warp::log::Info<'_>) {
    let remote = request
        .remote_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());

    info!(
        target: ACCESS_LOG_TARGET,
        "{} \"{} {} {:?}\" {} {:?}",
        remote,
        request.method(),
        request.path(),
        request.version(),
        request.status().as_u16(),
        request.elapsed()
    );
}
