/// Shown when a result carries no artwork of its own.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/6/65/No-Image-Placeholder.svg/1665px-No-Image-Placeholder.svg.png";

pub const DEFAULT_POSTER_SIZE: &str = "w500";

/// Full image URL for a provider path like `/q6y0Go1tsGEsmtFryDOJo3dEmqu.jpg`.
pub fn image_url(image_base_url: &str, size: &str, path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() => {
            format!("{}/{}{}", image_base_url.trim_end_matches('/'), size, path)
        }
        _ => PLACEHOLDER_IMAGE_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_joins_base_size_and_path() {
        assert_eq!(
            image_url(
                "https://image.tmdb.org/t/p",
                DEFAULT_POSTER_SIZE,
                Some("/q6y0Go1tsGEsmtFryDOJo3dEmqu.jpg")
            ),
            "https://image.tmdb.org/t/p/w500/q6y0Go1tsGEsmtFryDOJo3dEmqu.jpg"
        );
    }

    #[test]
    fn test_missing_path_falls_back_to_placeholder() {
        assert_eq!(
            image_url("https://image.tmdb.org/t/p", "w500", None),
            PLACEHOLDER_IMAGE_URL
        );
        assert_eq!(
            image_url("https://image.tmdb.org/t/p", "w500", Some("")),
            PLACEHOLDER_IMAGE_URL
        );
    }
}
