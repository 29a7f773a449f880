#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
};
use chrono_tz::Tz;
use http_body_util::BodyExt;
use tower::ServiceExt;

use slate::application::{blog::BlogService, chrome::ChromeService};
use slate::config::{SiteSettings, StaticSettings};
use slate::domain::{catalog::PostCatalog, entities::RawPost};
use slate::infra::{
    assets::StaticAssets,
    http::{App, HttpState, build_app},
};

pub fn raw_post(title: &str, created_at: i64, content: &str) -> RawPost {
    RawPost {
        title: title.to_string(),
        image: format!("/assets/{created_at}.jpg"),
        author: "Ada Park".to_string(),
        created_at,
        teaser: format!("Teaser for {title}"),
        content: content.to_string(),
    }
}

pub fn two_posts() -> Vec<RawPost> {
    vec![
        raw_post(
            "Hello, World!",
            1_704_067_200,
            "The very first post.\n\nIt has two paragraphs.",
        ),
        raw_post(
            "Second Thoughts",
            1_706_745_600,
            "Second post body lives here.",
        ),
    ]
}

pub fn site() -> SiteSettings {
    SiteSettings {
        title: "Test Blog".to_string(),
        description: "A blog under test.".to_string(),
        footer: "Test footer".to_string(),
        timezone: Tz::UTC,
    }
}

pub fn static_settings(root: &Path) -> StaticSettings {
    StaticSettings {
        public_dir: root.join("public"),
        css_dir: root.join("css"),
        js_dir: root.join("js"),
        assets_dir: root.join("assets"),
    }
}

pub fn router(posts: Vec<RawPost>, static_root: &Path) -> App {
    let catalog = PostCatalog::from_raw(posts, site().timezone);
    router_for_catalog(catalog, static_root)
}

pub fn router_for_catalog(catalog: PostCatalog, static_root: &Path) -> App {
    let site = site();
    let state = HttpState {
        blog: Arc::new(BlogService::new(Arc::new(catalog))),
        chrome: Arc::new(ChromeService::new(&site)),
        assets: Arc::new(StaticAssets::new(&static_settings(static_root))),
    };
    build_app(state)
}

pub async fn get(app: &App, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.clone()
        .oneshot(request)
        .await
        .expect("router should respond")
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.expect("collect body").to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
