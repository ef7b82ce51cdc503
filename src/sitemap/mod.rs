//! Sitemap discovery: document fetching, XML parsing, and tree traversal.

pub mod fetcher;
pub mod parser;
pub mod walker;

use crate::error::ConfigError;
use url::Url;

/// Turn a user-supplied site or sitemap URL into the canonical entry point.
///
/// URLs already ending in `/sitemap.xml` pass through unchanged. Otherwise
/// the conventional path is appended when `default_sitemap` is on; with it
/// off, a non-sitemap input is a configuration error.
pub fn normalize_entry_url(input: &str, default_sitemap: bool) -> Result<Url, ConfigError> {
    let mut u = Url::parse(input).map_err(|_| ConfigError::InvalidUrl(input.to_string()))?;
    if u.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(input.to_string()));
    }
    if u.path().ends_with("/sitemap.xml") {
        return Ok(u);
    }
    if !default_sitemap {
        return Err(ConfigError::MissingSitemapSuffix);
    }
    let mut path = u.path().to_string();
    if !path.ends_with('/') {
        path.push('/');
    }
    path.push_str("sitemap.xml");
    u.set_path(&path);
    Ok(u)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_default_sitemap() {
        let u = normalize_entry_url("https://example.com", true).unwrap();
        assert_eq!(u.as_str(), "https://example.com/sitemap.xml");

        let u = normalize_entry_url("https://example.com/de", true).unwrap();
        assert_eq!(u.as_str(), "https://example.com/de/sitemap.xml");
    }

    #[test]
    fn test_existing_sitemap_passes_through() {
        let u = normalize_entry_url("https://example.com/sub/sitemap.xml", false).unwrap();
        assert_eq!(u.as_str(), "https://example.com/sub/sitemap.xml");
    }

    #[test]
    fn test_missing_suffix_without_default_is_fatal() {
        let err = normalize_entry_url("https://example.com/page", false);
        assert!(matches!(err, Err(ConfigError::MissingSitemapSuffix)));
    }

    #[test]
    fn test_invalid_url_is_fatal() {
        assert!(matches!(
            normalize_entry_url("not a url", true),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            normalize_entry_url("mailto:user@example.com", true),
            Err(ConfigError::InvalidUrl(_))
        ));
    }
}
