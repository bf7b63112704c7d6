//! Development HTTP server.
//!
//! Routes are re-enumerated on every request so edits to posts and assets
//! show up on the next refresh without a rebuild. Not meant for
//! production traffic.

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use std::fs;
use std::sync::Arc;
use thiserror::Error;
use tidemark_config::SiteConfig;
use tidemark_site::{Route, SiteError, minify_css, render_page, routes};
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind dev server: {0}")]
    Bind(std::io::Error),
    #[error("dev server stopped: {0}")]
    Serve(std::io::Error),
}

/// Runs the dev server until the process is stopped.
pub async fn serve(config: SiteConfig) -> Result<(), ServerError> {
    let state = Arc::new(config);
    let app = Router::new()
        .fallback(get(handle))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", state.port))
        .await
        .map_err(ServerError::Bind)?;
    info!(port = state.port, "dev server listening");

    axum::serve(listener, app).await.map_err(ServerError::Serve)
}

async fn handle(State(config): State<Arc<SiteConfig>>, uri: Uri) -> Response {
    match respond(&config, uri.path()) {
        Ok(Some(response)) => response,
        Ok(None) => (StatusCode::NOT_FOUND, "404:(").into_response(),
        Err(err) => {
            error!(path = uri.path(), %err, "request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// Resolves one request path against a fresh route listing.
fn respond(config: &SiteConfig, path: &str) -> Result<Option<Response>, SiteError> {
    for route in routes(config)? {
        if route.path() != path {
            continue;
        }

        return Ok(Some(match route {
            Route::Static { file, .. } => {
                if file.extension().is_some_and(|ext| ext == "css") {
                    let css = minify_css(&fs::read_to_string(&file)?);
                    ([(header::CONTENT_TYPE, "text/css")], css).into_response()
                } else {
                    fs::read(&file)?.into_response()
                }
            }
            Route::Post { file, .. } => {
                let template = fs::read_to_string(&config.template)?;
                let markdown = fs::read_to_string(&file)?;
                Html(render_page(&template, &markdown)?).into_response()
            }
            Route::Index { .. } => Html(fs::read_to_string(&config.template)?).into_response(),
        }));
    }

    Ok(None)
}
