//! Disk-backed static asset serving.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use axum::{
    body::Body,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use mime_guess::Mime;
use tracing::error;

use crate::{application::error::ErrorReport, config::StaticSettings};

/// Directory roots for the static surfaces of the site.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    public_dir: PathBuf,
    css_dir: PathBuf,
    js_dir: PathBuf,
    assets_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetRoot {
    Public,
    Css,
    Js,
    Assets,
}

impl AssetRoot {
    fn source(self) -> &'static str {
        match self {
            AssetRoot::Public => "infra::assets::serve_public",
            AssetRoot::Css => "infra::assets::serve_css",
            AssetRoot::Js => "infra::assets::serve_js",
            AssetRoot::Assets => "infra::assets::serve_assets",
        }
    }
}

impl StaticAssets {
    pub fn new(settings: &StaticSettings) -> Self {
        Self {
            public_dir: settings.public_dir.clone(),
            css_dir: settings.css_dir.clone(),
            js_dir: settings.js_dir.clone(),
            assets_dir: settings.assets_dir.clone(),
        }
    }

    fn root(&self, root: AssetRoot) -> &Path {
        match root {
            AssetRoot::Public => &self.public_dir,
            AssetRoot::Css => &self.css_dir,
            AssetRoot::Js => &self.js_dir,
            AssetRoot::Assets => &self.assets_dir,
        }
    }

    /// Read an asset from `root`. Returns `Ok(None)` when the path is rejected
    /// or no such file exists.
    pub async fn read(&self, root: AssetRoot, path: &str) -> Result<Option<Asset>, std::io::Error> {
        let Some(relative) = sanitize_path(path) else {
            return Ok(None);
        };

        let full_path = self.root(root).join(&relative);
        match tokio::fs::read(&full_path).await {
            Ok(contents) => Ok(Some(Asset {
                contents: Bytes::from(contents),
                mime: mime_guess::from_path(&relative).first_or_octet_stream(),
            })),
            Err(err) if is_missing(&err) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Serve an asset, mapping misses to 404 and read failures to 500.
    pub async fn serve(&self, root: AssetRoot, path: &str) -> Response {
        let source = root.source();
        match self.read(root, path).await {
            Ok(Some(asset)) => asset.into_response(),
            Ok(None) => not_found_response(source),
            Err(err) => {
                error!(
                    target = source,
                    path = %path,
                    error = %err,
                    "failed to read static asset"
                );
                let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
                ErrorReport::from_error(source, StatusCode::INTERNAL_SERVER_ERROR, &err)
                    .attach(&mut response);
                response
            }
        }
    }
}

fn is_missing(err: &std::io::Error) -> bool {
    // Directories and dangling paths both count as misses.
    matches!(
        err.kind(),
        ErrorKind::NotFound | ErrorKind::IsADirectory | ErrorKind::NotADirectory
    )
}

fn sanitize_path(path: &str) -> Option<String> {
    let candidate = path.trim_start_matches('/');

    if candidate.is_empty()
        || candidate.ends_with('/')
        || candidate.contains("..")
        || candidate.contains('\\')
        || candidate.contains('\0')
    {
        // Avoid directory traversal and disallow directory listings.
        return None;
    }

    Some(candidate.to_string())
}

fn not_found_response(source: &'static str) -> Response {
    let mut response = StatusCode::NOT_FOUND.into_response();
    ErrorReport::from_message(source, StatusCode::NOT_FOUND, "Static asset not found")
        .attach(&mut response);
    response
}

#[derive(Debug)]
pub struct Asset {
    contents: Bytes,
    mime: Mime,
}

impl IntoResponse for Asset {
    fn into_response(self) -> Response {
        let len = self.contents.len();
        let mut response = Response::new(Body::from(self.contents));
        *response.status_mut() = StatusCode::OK;

        let headers = response.headers_mut();
        if let Ok(value) = HeaderValue::from_str(self.mime.as_ref()) {
            headers.insert(header::CONTENT_TYPE, value);
        }
        if let Ok(value) = HeaderValue::from_str(&len.to_string()) {
            headers.insert(header::CONTENT_LENGTH, value);
        }
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600"),
        );

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets_in(dir: &Path) -> StaticAssets {
        StaticAssets::new(&StaticSettings {
            public_dir: dir.join("public"),
            css_dir: dir.join("css"),
            js_dir: dir.join("js"),
            assets_dir: dir.join("assets"),
        })
    }

    #[test]
    fn sanitize_path_rejects_traversal_and_directories() {
        assert_eq!(sanitize_path("/style.css").as_deref(), Some("style.css"));
        assert_eq!(sanitize_path("img/a.png").as_deref(), Some("img/a.png"));
        assert!(sanitize_path("").is_none());
        assert!(sanitize_path("img/").is_none());
        assert!(sanitize_path("../secret").is_none());
        assert!(sanitize_path("a/../../b").is_none());
        assert!(sanitize_path("a\\b").is_none());
    }

    #[tokio::test]
    async fn read_returns_file_with_guessed_mime() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir_all(dir.path().join("css")).expect("css dir");
        std::fs::write(dir.path().join("css/style.css"), "body{}").expect("write css");

        let assets = assets_in(dir.path());
        let asset = assets
            .read(AssetRoot::Css, "style.css")
            .await
            .expect("read")
            .expect("asset present");

        assert_eq!(asset.contents.as_ref(), b"body{}");
        assert_eq!(asset.mime.essence_str(), "text/css");
    }

    #[tokio::test]
    async fn read_treats_missing_files_and_directories_as_misses() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir_all(dir.path().join("assets/nested")).expect("nested dir");

        let assets = assets_in(dir.path());
        assert!(
            assets
                .read(AssetRoot::Assets, "nope.png")
                .await
                .expect("read")
                .is_none()
        );
        assert!(
            assets
                .read(AssetRoot::Assets, "nested")
                .await
                .expect("read")
                .is_none()
        );
    }

    #[tokio::test]
    async fn serve_sets_caching_headers() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir_all(dir.path().join("js")).expect("js dir");
        std::fs::write(dir.path().join("js/app.js"), "console.log(1);").expect("write js");

        let response = assets_in(dir.path()).serve(AssetRoot::Js, "app.js").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=3600"
        );
        assert_eq!(response.headers().get(header::CONTENT_LENGTH).unwrap(), "15");
    }

    #[tokio::test]
    async fn serve_missing_asset_is_not_found_with_report() {
        let dir = tempfile::tempdir().expect("temp dir");
        let response = assets_in(dir.path())
            .serve(AssetRoot::Public, "favicon.ico")
            .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let report = response.extensions().get::<ErrorReport>().expect("report");
        assert_eq!(report.source, "infra::assets::serve_public");
    }
}
