use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, LINK};

static NEXT_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<([^>]+)>;\s*rel="next""#).expect("valid link pattern"));

/// Returns the `rel="next"` target of a `Link` header, if present.
pub fn next_link(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| {
            NEXT_LINK
                .captures(value)
                .map(|captures| captures[1].to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers_with_link(link: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(LINK, HeaderValue::from_str(link).unwrap());
        headers
    }

    #[test]
    fn picks_next_among_other_relations() {
        let headers = headers_with_link(
            "<https://canvas.example.edu/api/v1/courses/7/users?page=1&per_page=10>; rel=\"current\",\
             <https://canvas.example.edu/api/v1/courses/7/users?page=2&per_page=10>; rel=\"next\",\
             <https://canvas.example.edu/api/v1/courses/7/users?page=1&per_page=10>; rel=\"first\"",
        );
        assert_eq!(
            next_link(&headers).as_deref(),
            Some("https://canvas.example.edu/api/v1/courses/7/users?page=2&per_page=10")
        );
    }

    #[test]
    fn last_page_has_no_next() {
        let headers = headers_with_link(
            "<https://canvas.example.edu/api/v1/courses/7/users?page=3>; rel=\"current\",\
             <https://canvas.example.edu/api/v1/courses/7/users?page=1>; rel=\"first\",\
             <https://canvas.example.edu/api/v1/courses/7/users?page=3>; rel=\"last\"",
        );
        assert_eq!(next_link(&headers), None);
    }

    #[test]
    fn missing_header_has_no_next() {
        assert_eq!(next_link(&HeaderMap::new()), None);
    }
}
