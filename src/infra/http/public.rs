use std::sync::Arc;

use askama::Template;
use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use metrics::counter;
use tower::{Layer, ServiceExt, util::MapRequest};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::{
    application::{blog::BlogService, chrome::ChromeService, error::HttpError},
    domain::error::DomainError,
    infra::{
        assets::{AssetRoot, StaticAssets},
        telemetry::PAGE_RENDER_TOTAL,
    },
    presentation::views::{
        AboutTemplate, ContactTemplate, IndexTemplate, LayoutChrome, LayoutContext,
        PostDetailContext, PostTemplate, render_not_found_response, render_template_response,
    },
};

use super::middleware::{fold_route_case, log_responses, set_request_context};

/// The router behind path normalization, which has to run before routing.
pub type App = NormalizePath<MapRequest<Router, fn(Request<Body>) -> Request<Body>>>;

#[derive(Clone)]
pub struct HttpState {
    pub blog: Arc<BlogService>,
    pub chrome: Arc<ChromeService>,
    pub assets: Arc<StaticAssets>,
}

fn build_router(state: HttpState) -> Router {
    let pages = Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .route("/contact", get(contact))
        .route("/post", get(sample_post))
        .route("/post/{slug}", get(post_detail))
        .route("/_health", get(health));

    let static_routes = Router::new()
        .route("/css/{*path}", get(serve_css))
        .route("/js/{*path}", get(serve_js))
        .route("/assets/{*path}", get(serve_assets));

    pages
        .merge(static_routes)
        .fallback(fallback_router)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

/// Routes accept a trailing slash (`/about/`, `/post/`) and any case in the
/// route name (`/About`).
pub fn build_app(state: HttpState) -> App {
    let router = build_router(state)
        .map_request(fold_route_case as fn(Request<Body>) -> Request<Body>);
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

fn render_page<T: Template>(name: &'static str, template: T) -> Response {
    counter!(PAGE_RENDER_TOTAL, "template" => name).increment(1);
    render_template_response(template, StatusCode::OK)
}

async fn index(State(state): State<HttpState>) -> Response {
    let chrome = state.chrome.load("/");
    let content = state.blog.index_context();
    let view = LayoutContext::new(chrome, content);
    render_page("index", IndexTemplate { view })
}

async fn about(State(state): State<HttpState>) -> Response {
    let chrome = state.chrome.load("/about").with_title("About");
    render_page(
        "about",
        AboutTemplate {
            view: LayoutContext::new(chrome, ()),
        },
    )
}

async fn contact(State(state): State<HttpState>) -> Response {
    let chrome = state.chrome.load("/contact").with_title("Contact");
    render_page(
        "contact",
        ContactTemplate {
            view: LayoutContext::new(chrome, ()),
        },
    )
}

async fn sample_post(State(state): State<HttpState>) -> Response {
    let chrome = state.chrome.load("/post");

    match state.blog.sample_post() {
        Ok(content) => render_post(chrome, content),
        Err(DomainError::Empty { .. }) | Err(DomainError::NotFound { .. }) => {
            render_not_found_response(chrome)
        }
    }
}

async fn post_detail(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    const SOURCE: &str = "infra::http::public::post_detail";

    match state.blog.post_detail(&slug) {
        Ok(content) => render_post(state.chrome.load(""), content),
        Err(err) => HttpError::from_error(SOURCE, StatusCode::NOT_FOUND, "Post not found", &err)
            .into_response(),
    }
}

fn render_post(chrome: LayoutChrome, content: PostDetailContext) -> Response {
    let meta = chrome
        .meta
        .clone()
        .with_content(content.title.clone(), content.teaser.clone());
    let view = LayoutContext::new(chrome.with_meta(meta), content);
    render_page("post", PostTemplate { view })
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn serve_css(State(state): State<HttpState>, Path(path): Path<String>) -> Response {
    state.assets.serve(AssetRoot::Css, &path).await
}

async fn serve_js(State(state): State<HttpState>, Path(path): Path<String>) -> Response {
    state.assets.serve(AssetRoot::Js, &path).await
}

async fn serve_assets(State(state): State<HttpState>, Path(path): Path<String>) -> Response {
    state.assets.serve(AssetRoot::Assets, &path).await
}

/// Anything unrouted is looked up in the public directory before falling back to 404.
async fn fallback_router(State(state): State<HttpState>, request: Request<Body>) -> Response {
    let path = request.uri().path();

    match state.assets.read(AssetRoot::Public, path).await {
        Ok(Some(asset)) => asset.into_response(),
        Ok(None) => render_not_found_response(state.chrome.load(path)),
        Err(err) => HttpError::from_error(
            "infra::http::public::fallback_router",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to read static file",
            &err,
        )
        .into_response(),
    }
}
