// Validation functions for opensearch-description
// Syntactic checks shared by endpoints, images and the source loader

use crate::error::{DescriptionError, DescriptionResult};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// `type/subtype`, ASCII word characters and '-' only, '+' allowed in the subtype.
static MIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-A-Za-z0-9_]+/[-A-Za-z0-9_+]+$").expect("MIME pattern is a valid regex")
});

/// Check if a string looks like a MIME type (`text/html`, `application/rss+xml`)
pub fn is_mime_type(value: &str) -> bool {
    MIME_PATTERN.is_match(value)
}

/// Validate a MIME-typed attribute (`type` on Url/Image, `parameters:enctype` on Url)
///
/// Returns Ok(()) if valid, Err(InvalidAttributeSyntax) naming the attribute if not
pub fn validate_mime_type(attribute: &str, value: &str) -> DescriptionResult<()> {
    if !is_mime_type(value) {
        return Err(DescriptionError::invalid_attribute(attribute, value));
    }
    Ok(())
}

/// Validate that a string is a URI reference
///
/// Absolute URIs are parsed as-is; relative references are resolved against a
/// placeholder base so that only their syntax is checked.
pub fn validate_uri(attribute: &str, value: &str) -> DescriptionResult<()> {
    let invalid = || DescriptionError::invalid_attribute(attribute, value);

    if value.trim().is_empty() || value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    match Url::parse(value) {
        Ok(_) => Ok(()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse("http://localhost/").map_err(|_| invalid())?;
            base.join(value).map(|_| ()).map_err(|_| invalid())
        }
        Err(_) => Err(invalid()),
    }
}

/// Validate that a description source URL has a fetchable scheme (http or https only)
pub fn validate_source_url(url_str: &str) -> DescriptionResult<Url> {
    let url = url_str
        .parse::<Url>()
        .map_err(|_| DescriptionError::Fetch(format!("Invalid URL format: {}", url_str)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(DescriptionError::Fetch(format!(
                "Only http:// and https:// URLs are allowed, got {}://",
                other
            )))
        }
    }

    if url.host_str().is_none() {
        return Err(DescriptionError::Fetch("URL must have a host".to_string()));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_valid() {
        assert!(is_mime_type("text/html"));
        assert!(is_mime_type("application/rss+xml"));
        assert!(is_mime_type("application/x-suggestions+json"));
        assert!(is_mime_type("image/x-icon"));
        assert!(is_mime_type("application/x-www-form-urlencoded"));
    }

    #[test]
    fn test_mime_type_invalid() {
        assert!(!is_mime_type("text html"));
        assert!(!is_mime_type("text/"));
        assert!(!is_mime_type("/html"));
        assert!(!is_mime_type("text/html; charset=utf-8"));
        assert!(!is_mime_type("image+png/x"));
        assert!(!is_mime_type("texte/htmlé"));
    }

    #[test]
    fn test_validate_mime_type_names_attribute() {
        let err = validate_mime_type("parameters:enctype", "multipart form").unwrap_err();
        assert_eq!(
            err,
            DescriptionError::invalid_attribute("parameters:enctype", "multipart form")
        );
    }

    #[test]
    fn test_validate_uri() {
        assert!(validate_uri("Image", "http://example.com/icon.png").is_ok());
        assert!(validate_uri("Image", "data:image/x-icon;base64,AAAB").is_ok());
        assert!(validate_uri("Image", "/favicon.ico").is_ok());
        assert!(validate_uri("Image", "").is_err());
        assert!(validate_uri("Image", "http://exa mple.com/").is_err());
        assert!(validate_uri("Image", "http://[::1").is_err());
    }

    #[test]
    fn test_validate_source_url() {
        assert!(validate_source_url("https://example.com/opensearch.xml").is_ok());

        let result = validate_source_url("file:///etc/passwd");
        assert!(result.unwrap_err().to_string().contains("Only http://"));

        assert!(validate_source_url("not a url").is_err());
    }
}
