//! Ordered, immutable index of enriched posts.
//!
//! The catalog is built once at startup and shared read-only between request
//! handlers. Lookups are linear scans over a small collection; when two titles
//! collapse to the same slug the earliest post in source order wins.

use std::collections::HashMap;

use chrono_tz::Tz;

use super::entities::{EnrichedPost, RawPost};
use super::error::DomainError;
use super::posts::enrich;

const ENTITY: &str = "post";

#[derive(Debug, Clone, Default)]
pub struct PostCatalog {
    posts: Vec<EnrichedPost>,
}

/// A slug shared by more than one post, with the source positions that produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCollision {
    pub slug: String,
    pub positions: Vec<usize>,
}

impl PostCatalog {
    pub fn new(posts: Vec<EnrichedPost>) -> Self {
        Self { posts }
    }

    pub fn from_raw(posts: Vec<RawPost>, zone: Tz) -> Self {
        Self::new(enrich(posts, zone))
    }

    pub fn posts(&self) -> &[EnrichedPost] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// First post whose slug equals `slug`, in source order.
    pub fn find_by_slug(&self, slug: &str) -> Result<&EnrichedPost, DomainError> {
        self.posts
            .iter()
            .find(|post| post.slug == slug)
            .ok_or_else(|| DomainError::not_found(ENTITY))
    }

    /// First post in source order.
    pub fn first(&self) -> Result<&EnrichedPost, DomainError> {
        self.posts.first().ok_or_else(|| DomainError::empty(ENTITY))
    }

    /// Slugs produced by more than one post, ordered by first occurrence.
    pub fn duplicate_slugs(&self) -> Vec<SlugCollision> {
        let mut positions: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut order = Vec::new();

        for (index, post) in self.posts.iter().enumerate() {
            let entry = positions.entry(post.slug.as_str()).or_default();
            if entry.is_empty() {
                order.push(post.slug.as_str());
            }
            entry.push(index);
        }

        order
            .into_iter()
            .filter_map(|slug| {
                let indexes = positions.remove(slug)?;
                (indexes.len() > 1).then(|| SlugCollision {
                    slug: slug.to_string(),
                    positions: indexes,
                })
            })
            .collect()
    }
}
