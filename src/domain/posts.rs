use chrono_tz::Tz;
use time::{Date, OffsetDateTime, format_description::FormatItem, macros::format_description};

use crate::util::timezone::localized_date;

use super::entities::{EnrichedPost, RawPost};
use super::slug::slugify;

pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");

/// Label used when a timestamp cannot be represented as a calendar date.
pub const INVALID_DATE_LABEL: &str = "Invalid Date";

pub fn format_human_date(date: Date) -> String {
    date.format(HUMAN_DATE_FORMAT)
        .unwrap_or_else(|_| INVALID_DATE_LABEL.to_string())
}

/// Format unix seconds as a long-form calendar date in `zone`.
pub fn format_timestamp(seconds: i64, zone: Tz) -> String {
    OffsetDateTime::from_unix_timestamp(seconds)
        .ok()
        .and_then(|instant| localized_date(instant, zone))
        .map(format_human_date)
        .unwrap_or_else(|| INVALID_DATE_LABEL.to_string())
}

pub fn enrich_post(post: RawPost, zone: Tz) -> EnrichedPost {
    let formatted_date = format_timestamp(post.created_at, zone);
    let slug = slugify(&post.title);
    EnrichedPost::from_raw(post, formatted_date, slug)
}

/// Derive display metadata for every post, keeping source order.
pub fn enrich(posts: Vec<RawPost>, zone: Tz) -> Vec<EnrichedPost> {
    posts
        .into_iter()
        .map(|post| enrich_post(post, zone))
        .collect()
}

/// Split post content into display paragraphs on blank lines.
pub fn paragraphs(content: &str) -> Vec<String> {
    content
        .replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Month, macros::date};

    fn raw(title: &str, created_at: i64) -> RawPost {
        RawPost {
            title: title.to_string(),
            image: "/assets/cover.jpg".to_string(),
            author: "Ada".to_string(),
            created_at,
            teaser: "teaser".to_string(),
            content: "content".to_string(),
        }
    }

    #[test]
    fn format_human_date_uses_long_month_without_padding() {
        assert_eq!(format_human_date(date!(2024 - 01 - 05)), "January 5, 2024");
        let date = Date::from_calendar_date(2023, Month::November, 21).expect("date");
        assert_eq!(format_human_date(date), "November 21, 2023");
    }

    #[test]
    fn format_timestamp_interprets_seconds_in_utc() {
        assert_eq!(format_timestamp(0, Tz::UTC), "January 1, 1970");
        // 2024-03-15T12:00:00Z
        assert_eq!(format_timestamp(1_710_504_000, Tz::UTC), "March 15, 2024");
    }

    #[test]
    fn format_timestamp_honours_zone() {
        // 2024-01-01T03:00:00Z is still December 31 in New York.
        let seconds = 1_704_078_000;
        assert_eq!(format_timestamp(seconds, Tz::UTC), "January 1, 2024");
        assert_eq!(
            format_timestamp(seconds, Tz::America__New_York),
            "December 31, 2023"
        );
    }

    #[test]
    fn format_timestamp_out_of_range_is_labelled() {
        assert_eq!(format_timestamp(i64::MAX, Tz::UTC), INVALID_DATE_LABEL);
    }

    #[test]
    fn enrich_preserves_length_and_order() {
        let input = vec![
            raw("First Post", 0),
            raw("Second: The Sequel", 86_400),
            raw("Third!", 172_800),
        ];
        let output = enrich(input.clone(), Tz::UTC);

        assert_eq!(output.len(), input.len());
        for (source, enriched) in input.iter().zip(&output) {
            assert_eq!(enriched.title, source.title);
            assert_eq!(enriched.created_at, source.created_at);
            assert_eq!(enriched.slug, slugify(&source.title));
            assert_eq!(
                enriched.formatted_date,
                format_timestamp(source.created_at, Tz::UTC)
            );
        }
        assert_eq!(output[1].slug, "second-the-sequel");
        assert_eq!(output[2].formatted_date, "January 3, 1970");
    }

    #[test]
    fn enrich_empty_input() {
        assert!(enrich(Vec::new(), Tz::UTC).is_empty());
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let blocks = paragraphs("One line.\n\nTwo\nlines.\r\n\r\n\n\nThree.");
        assert_eq!(blocks, vec!["One line.", "Two\nlines.", "Three."]);
        assert!(paragraphs("   ").is_empty());
    }
}
