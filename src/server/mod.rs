//! Preview server
//!
//! Renders every page on request from freshly fetched CMS content, so edits
//! in the CMS show up on reload without regenerating the site.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::ContentType;
use crate::error::PageError;
use crate::generator::{Generator, Route};
use crate::Folio;

/// Server state
struct ServerState {
    generator: Generator,
}

/// Start the preview server
pub async fn start(folio: &Folio, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState {
        generator: Generator::new(folio)?,
    });

    let app = router(state, &folio.static_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<ServerState>, static_dir: &std::path::Path) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/:section", get(section_handler))
        .route("/:section/", get(section_handler))
        .route("/:section/:first", get(single_handler))
        .route("/:section/:first/", get(single_handler))
        .route("/:section/:category/:slug", get(nested_handler))
        .route("/:section/:category/:slug/", get(nested_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    let generator = &state.generator;
    let home = generator.fetcher().fetch_home().await;
    let page = generator.render_home(&home, &mut generator.home_rng());
    respond(generator, page)
}

async fn section_handler(
    State(state): State<Arc<ServerState>>,
    Path(section): Path<String>,
) -> Response {
    render(&state.generator, &section, Route::Intro).await
}

/// `/{section}/{x}/`: a category for categorized sections, else a slug
async fn single_handler(
    State(state): State<Arc<ServerState>>,
    Path((section, first)): Path<(String, String)>,
) -> Response {
    let route = match ContentType::from_section(&section) {
        Some(ct) if ct.is_categorized() => Route::Category(first),
        _ => Route::Article {
            category: None,
            slug: first,
        },
    };
    render(&state.generator, &section, route).await
}

async fn nested_handler(
    State(state): State<Arc<ServerState>>,
    Path((section, category, slug)): Path<(String, String, String)>,
) -> Response {
    let route = Route::Article {
        category: Some(category),
        slug,
    };
    render(&state.generator, &section, route).await
}

async fn fallback_handler(State(state): State<Arc<ServerState>>) -> Response {
    not_found(&state.generator, None)
}

async fn render(generator: &Generator, section: &str, route: Route) -> Response {
    let Some(content_type) = ContentType::from_section(section) else {
        return not_found(generator, None);
    };
    let section = generator.fetcher().fetch_section(content_type).await;
    respond(generator, generator.render_route(&section, &route))
}

fn respond(generator: &Generator, page: Result<String, PageError>) -> Response {
    match page {
        Ok(html) => Html(html).into_response(),
        Err(e) if e.is_not_found() => {
            tracing::debug!("{}", e);
            not_found(generator, Some(e.to_string().as_str()))
        }
        Err(e) => {
            tracing::error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn not_found(generator: &Generator, message: Option<&str>) -> Response {
    match generator.render_not_found(message) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
