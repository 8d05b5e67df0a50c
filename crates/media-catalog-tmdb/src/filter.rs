use media_catalog_models::{MediaItem, MediaType};
use serde_json::Value;

/// Terms that flag a result as adult-oriented even when the provider's
/// `adult` flag is unset. Matched against title and overview, lowercased.
const ADULT_KEYWORDS: [&str; 14] = [
    "porn", "xxx", "adult", "erotic", "nude", "nudity", "sex", "sexual", "explicit", "mature",
    "nsfw", "18+", "x-rated", "hardcore",
];

/// Genres the catalog never surfaces.
const EXCLUDED_GENRE_IDS: [i64; 1] = [10752];

const OLDEST_RELEASE_YEAR: i32 = 1950;

/// Multi search mixes in result kinds and content the provider-side
/// parameters cannot exclude; this is the second line of defense applied to
/// each result after the fetch.
pub fn is_catalog_safe(item: &MediaItem) -> bool {
    // People and other non-title kinds have no place in the catalog.
    if item.media_type == MediaType::Unknown {
        return false;
    }

    if item
        .fields
        .get("adult")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        return false;
    }

    let title = item.title().unwrap_or("").to_lowercase();
    if ADULT_KEYWORDS.iter().any(|keyword| title.contains(keyword)) {
        return false;
    }

    let overview = item.overview().unwrap_or("").to_lowercase();
    if ADULT_KEYWORDS
        .iter()
        .any(|keyword| overview.contains(keyword))
    {
        return false;
    }

    if let Some(genre_ids) = item.fields.get("genre_ids").and_then(Value::as_array) {
        if genre_ids
            .iter()
            .filter_map(Value::as_i64)
            .any(|id| EXCLUDED_GENRE_IDS.contains(&id))
        {
            return false;
        }
    }

    if let Some(year) = item.year() {
        if year > 0 && year < OLDEST_RELEASE_YEAR {
            return false;
        }
    }

    true
}

pub fn filter_catalog(items: Vec<MediaItem>) -> Vec<MediaItem> {
    items.into_iter().filter(is_catalog_safe).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_catalog_models::MediaItem;
    use serde_json::json;

    fn clean_movie() -> MediaItem {
        MediaItem::new(603, MediaType::Movie)
            .with_field("title", json!("The Matrix"))
            .with_field("overview", json!("A computer hacker learns the truth."))
            .with_field("release_date", json!("1999-03-30"))
            .with_field("genre_ids", json!([28, 878]))
            .with_field("adult", json!(false))
    }

    #[test]
    fn test_clean_results_pass() {
        assert!(is_catalog_safe(&clean_movie()));
    }

    #[test]
    fn test_non_title_kinds_are_dropped() {
        let person = MediaItem::new(1158, MediaType::Unknown).with_field("name", json!("Al Pacino"));
        assert!(!is_catalog_safe(&person));
    }

    #[test]
    fn test_adult_flag_is_dropped() {
        let item = clean_movie().with_field("adult", json!(true));
        assert!(!is_catalog_safe(&item));
    }

    #[test]
    fn test_keyword_in_title_or_overview_is_dropped() {
        let by_title = clean_movie().with_field("title", json!("Explicit Confessions"));
        let by_overview =
            clean_movie().with_field("overview", json!("An NSFW look behind the curtain."));
        assert!(!is_catalog_safe(&by_title));
        assert!(!is_catalog_safe(&by_overview));
    }

    #[test]
    fn test_excluded_genre_is_dropped() {
        let item = clean_movie().with_field("genre_ids", json!([18, 10752]));
        assert!(!is_catalog_safe(&item));
    }

    #[test]
    fn test_releases_before_1950_are_dropped() {
        let old = clean_movie().with_field("release_date", json!("1949-12-01"));
        let boundary = clean_movie().with_field("release_date", json!("1950-01-01"));
        let undated = MediaItem::new(42, MediaType::Movie).with_field("title", json!("No Date"));
        assert!(!is_catalog_safe(&old));
        assert!(is_catalog_safe(&boundary));
        assert!(is_catalog_safe(&undated));
    }

    #[test]
    fn test_filter_catalog_keeps_order() {
        let items = vec![
            clean_movie(),
            clean_movie().with_field("adult", json!(true)),
            MediaItem::new(2, MediaType::Tv)
                .with_field("name", json!("Lost"))
                .with_field("first_air_date", json!("2004-09-22")),
        ];
        let kept = filter_catalog(items);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].title(), Some("The Matrix"));
        assert_eq!(kept[1].title(), Some("Lost"));
    }
}
