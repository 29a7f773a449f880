//! Read-only queries over the post catalog, shaped for the public pages.

use std::sync::Arc;

use metrics::counter;

use crate::domain::{
    catalog::PostCatalog, entities::EnrichedPost, error::DomainError, posts::paragraphs,
    slug::is_slug,
};
use crate::infra::telemetry::POST_LOOKUP_TOTAL;
use crate::presentation::views::{IndexContext, PostCard, PostDetailContext};

#[derive(Clone)]
pub struct BlogService {
    catalog: Arc<PostCatalog>,
}

impl BlogService {
    pub fn new(catalog: Arc<PostCatalog>) -> Self {
        Self { catalog }
    }

    /// Listing of every post in source order.
    pub fn index_context(&self) -> IndexContext {
        let posts: Vec<PostCard> = self.catalog.posts().iter().map(post_card).collect();
        IndexContext {
            post_count: posts.len(),
            has_posts: !posts.is_empty(),
            posts,
        }
    }

    /// Detail view for the first post matching `slug`.
    pub fn post_detail(&self, slug: &str) -> Result<PostDetailContext, DomainError> {
        let result = if is_slug(slug) {
            self.catalog.find_by_slug(slug)
        } else {
            Err(DomainError::not_found("post"))
        };

        let outcome = if result.is_ok() { "hit" } else { "miss" };
        counter!(POST_LOOKUP_TOTAL, "outcome" => outcome).increment(1);

        result.map(post_detail_context)
    }

    /// Detail view for the first post in source order.
    pub fn sample_post(&self) -> Result<PostDetailContext, DomainError> {
        self.catalog.first().map(post_detail_context)
    }
}

fn post_card(post: &EnrichedPost) -> PostCard {
    PostCard {
        slug: post.slug.clone(),
        href: post_href(&post.slug),
        title: post.title.clone(),
        teaser: post.teaser.clone(),
        image: post.image.clone(),
        author: post.author.clone(),
        published: post.formatted_date.clone(),
    }
}

fn post_detail_context(post: &EnrichedPost) -> PostDetailContext {
    PostDetailContext {
        slug: post.slug.clone(),
        title: post.title.clone(),
        image: post.image.clone(),
        author: post.author.clone(),
        published: post.formatted_date.clone(),
        teaser: post.teaser.clone(),
        paragraphs: paragraphs(&post.content),
    }
}

pub fn post_href(slug: &str) -> String {
    format!("/post/{slug}")
}
