use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::web::config::ViewerConfig;

/// Largest session body the viewer may post back
pub const MAX_SESSION_BODY_SIZE: usize = 16 * 1024 * 1024; // 16MB

/// Requests handled at the same time before new ones wait
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Long enough for igv.js range requests on large alignment files
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const INDEX_TEMPLATE: &str = include_str!("templates/index.html");

/// Shared application state, immutable once the server is running
pub struct AppState {
    pub config: ViewerConfig,

    /// Directory holding the staged files, served as static content
    pub static_root: PathBuf,

    /// Viewer page with the configuration already embedded
    page: String,
}

impl AppState {
    /// Build the state and render the viewer page for `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn new(config: ViewerConfig, static_root: impl Into<PathBuf>) -> serde_json::Result<Self> {
        let page = render_index(&config)?;
        Ok(Self {
            config,
            static_root: static_root.into(),
            page,
        })
    }
}

/// Where and how to listen
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub open: bool,
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}

/// Fill the page template with the viewer configuration
fn render_index(config: &ViewerConfig) -> serde_json::Result<String> {
    Ok(INDEX_TEMPLATE
        .replace("__IGV_CONFIG__", &config.to_embedded_json()?)
        .replace("__IGV_VERSION__", &config.igv_version))
}

/// Run the web server until it is stopped
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(state: AppState, options: ServeOptions) -> anyhow::Result<()> {
    // Multi-threaded runtime, requests are spread over worker threads
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(state, options).await })
}

/// Route group of the viewer: the page and its small JSON API
pub fn viewer_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/config", get(config_handler))
        .route(
            "/api/session",
            get(session_handler).post(save_session_handler),
        )
}

/// Create the application router with all routes and middleware configured.
///
/// Anything not matched by the viewer routes is looked up in the static root,
/// so staged files are reachable by their base name.
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_root);

    viewer_routes()
        .fallback_service(static_files)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    REQUEST_TIMEOUT,
                ))
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                .layer(DefaultBodyLimit::max(MAX_SESSION_BODY_SIZE)),
        )
}

async fn run_server(state: AppState, options: ServeOptions) -> anyhow::Result<()> {
    tracing::info!("Serving files from {}", state.static_root.display());
    let app = create_router(Arc::new(state));

    let listener = TcpListener::bind((options.host.as_str(), options.port)).await?;
    let addr = listener.local_addr()?;
    println!("Starting igv-tool web server at http://{addr}");

    if options.open {
        let url = browser_url(&options.host, addr.port());
        if let Err(e) = open::that(&url) {
            tracing::warn!("Failed to open {}: {}", url, e);
        }
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// URL a local browser can reach, wildcard bind addresses map to localhost
fn browser_url(host: &str, port: u16) -> String {
    let host = match host {
        "0.0.0.0" | "::" | "[::]" => "localhost",
        other => other,
    };
    format!("http://{host}:{port}")
}

/// Viewer page
async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.clone())
}

async fn config_handler(State(state): State<Arc<AppState>>) -> Json<ViewerConfig> {
    Json(state.config.clone())
}

/// Session the viewer starts from
async fn session_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.config.session {
        Some(session) => Json(session.clone()).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            create_safe_error_response("no_session", "No session is configured", None),
        ),
    }
}

/// Save the session posted by the viewer to the `--dump-session` path (Galaxy only)
async fn save_session_handler(
    State(state): State<Arc<AppState>>,
    Json(session): Json<serde_json::Value>,
) -> Response {
    let Some(path) = state.config.dump_session.as_deref().filter(|_| state.config.gxit) else {
        return error_response(
            StatusCode::NOT_FOUND,
            create_safe_error_response(
                "session_saving_disabled",
                "Saving sessions is not enabled on this server",
                None,
            ),
        );
    };

    if !session.is_object() {
        return error_response(
            StatusCode::BAD_REQUEST,
            create_safe_error_response(
                "invalid_session",
                "A session must be a JSON object",
                None,
            ),
        );
    }

    match write_posted_session(&session, path).await {
        Ok(()) => {
            tracing::info!("Saved session to {}", path.display());
            Json(serde_json::json!({ "saved": true })).into_response()
        }
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            create_safe_error_response(
                "session_write_failed",
                "Unable to save the session",
                Some(&format!("{}: {e}", path.display())),
            ),
        ),
    }
}

async fn write_posted_session(session: &serde_json::Value, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(session)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
