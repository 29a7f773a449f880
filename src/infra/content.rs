//! Posts file loading.
//!
//! The posts file is a JSON array of [`RawPost`] records read once before the
//! server starts. Any failure here is fatal to startup.

use std::path::Path;

use chrono_tz::Tz;
use tracing::{info, warn};

use crate::domain::{catalog::PostCatalog, entities::RawPost};

use super::error::InfraError;

/// Read and parse the posts file at `path`.
pub async fn load_posts(path: &Path) -> Result<Vec<RawPost>, InfraError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| InfraError::content(path, err.to_string()))?;

    parse_posts(&bytes).map_err(|message| InfraError::content(path, message))
}

/// Parse posts from raw JSON bytes.
pub fn parse_posts(bytes: &[u8]) -> Result<Vec<RawPost>, String> {
    serde_json::from_slice(bytes).map_err(|err| format!("malformed posts file: {err}"))
}

/// Load the posts file and build the catalog, logging slug collisions.
pub async fn load_catalog(path: &Path, zone: Tz) -> Result<PostCatalog, InfraError> {
    let posts = load_posts(path).await?;
    let catalog = PostCatalog::from_raw(posts, zone);

    info!(
        target = "slate::content",
        path = %path.display(),
        posts = catalog.len(),
        timezone = %zone,
        "loaded posts"
    );

    if catalog.is_empty() {
        warn!(
            target = "slate::content",
            path = %path.display(),
            "posts file is empty; /post will respond with 404"
        );
    }

    for collision in catalog.duplicate_slugs() {
        warn!(
            target = "slate::content",
            slug = %collision.slug,
            positions = ?collision.positions,
            "multiple posts share a slug; only the first is reachable by slug"
        );
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const TWO_POSTS: &str = r#"[
        {
            "title": "Hello, World!",
            "image": "/assets/hello.jpg",
            "author": "Ada",
            "createdAt": 1704067200,
            "teaser": "Saying hello.",
            "content": "First body."
        },
        {
            "title": "Second Thoughts",
            "image": "/assets/second.jpg",
            "author": "Grace",
            "createdAt": 1706745600,
            "teaser": "Thinking again.",
            "content": "Second body.",
            "draft": false
        }
    ]"#;

    #[test]
    fn parse_posts_reads_camel_case_fields() {
        let posts = parse_posts(TWO_POSTS.as_bytes()).expect("posts");
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].created_at, 1_704_067_200);
        assert_eq!(posts[1].author, "Grace");
    }

    #[test]
    fn parse_posts_rejects_missing_fields() {
        let err = parse_posts(br#"[{"title": "No body"}]"#).expect_err("must fail");
        assert!(err.starts_with("malformed posts file"), "{err}");
    }

    #[test]
    fn parse_posts_rejects_non_array_documents() {
        assert!(parse_posts(br#"{"title": "Lonely"}"#).is_err());
        assert!(parse_posts(b"not json").is_err());
    }

    #[tokio::test]
    async fn load_catalog_enriches_posts_in_order() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(TWO_POSTS.as_bytes()).expect("write posts");

        let catalog = load_catalog(file.path(), Tz::UTC).await.expect("catalog");
        let slugs: Vec<_> = catalog.posts().iter().map(|post| post.slug.as_str()).collect();
        assert_eq!(slugs, vec!["hello-world", "second-thoughts"]);
        assert_eq!(catalog.posts()[0].formatted_date, "January 1, 2024");
        assert_eq!(catalog.posts()[1].formatted_date, "February 1, 2024");
    }

    #[tokio::test]
    async fn load_posts_reports_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.json");

        let err = load_posts(&path).await.expect_err("missing file must fail");
        match err {
            InfraError::Content { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
