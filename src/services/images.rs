/// Image asset resolution
///
/// The catalog returns relative path segments; full URLs are built by string
/// concatenation against a fixed base plus a size bucket.
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Image size buckets in use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W92,
    W185,
    W200,
    W300,
    W500,
    Original,
}

impl ImageSize {
    fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W92 => "w92",
            ImageSize::W185 => "w185",
            ImageSize::W200 => "w200",
            ImageSize::W300 => "w300",
            ImageSize::W500 => "w500",
            ImageSize::Original => "original",
        }
    }
}

/// Builds a fully-qualified image URL from a relative path segment
///
/// An absent path means the entity has no artwork, so there is no URL.
pub fn image_url(path: Option<&str>, size: ImageSize) -> Option<String> {
    path.map(|p| format!("{}{}{}", IMAGE_BASE_URL, size.as_str(), p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_concatenates_base_size_and_path() {
        let url = image_url(Some("/matrix.jpg"), ImageSize::W500);
        assert_eq!(
            url,
            Some("https://image.tmdb.org/t/p/w500/matrix.jpg".to_string())
        );
    }

    #[test]
    fn test_image_url_absent_path_yields_none() {
        assert_eq!(image_url(None, ImageSize::W92), None);
    }

    #[test]
    fn test_all_size_buckets() {
        let sizes = [
            (ImageSize::W92, "w92"),
            (ImageSize::W185, "w185"),
            (ImageSize::W200, "w200"),
            (ImageSize::W300, "w300"),
            (ImageSize::W500, "w500"),
            (ImageSize::Original, "original"),
        ];

        for (size, segment) in sizes {
            let url = image_url(Some("/x.jpg"), size).unwrap();
            assert_eq!(url, format!("https://image.tmdb.org/t/p/{}/x.jpg", segment));
        }
    }
}
