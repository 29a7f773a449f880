use serde::Deserialize;

/// A post exactly as stored in the posts file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    pub title: String,
    pub image: String,
    pub author: String,
    /// Unix timestamp in seconds.
    pub created_at: i64,
    pub teaser: String,
    pub content: String,
}

/// A [`RawPost`] carrying its derived display fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedPost {
    pub title: String,
    pub image: String,
    pub author: String,
    pub created_at: i64,
    pub teaser: String,
    pub content: String,
    pub formatted_date: String,
    pub slug: String,
}

impl EnrichedPost {
    pub fn from_raw(raw: RawPost, formatted_date: String, slug: String) -> Self {
        let RawPost {
            title,
            image,
            author,
            created_at,
            teaser,
            content,
        } = raw;

        Self {
            title,
            image,
            author,
            created_at,
            teaser,
            content,
            formatted_date,
            slug,
        }
    }
}
