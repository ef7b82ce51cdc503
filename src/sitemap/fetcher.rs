//! Fetch one sitemap document over HTTP, gunzipping when needed.

use super::parser::{parse_sitemap, SitemapNode};
use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use reqwest::header::CONTENT_TYPE;
use std::io::Read;

/// Retrieves and parses sitemap documents.
///
/// Every error here is a skip signal for the walker: one bad sitemap file
/// must not abort the whole run.
pub struct SitemapFetcher {
    client: reqwest::Client,
}

impl SitemapFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub async fn fetch_and_parse(&self, url: &str) -> Result<SitemapNode> {
        let xml = self.fetch_text_maybe_gzip(url).await?;
        if !xml.trim_start().starts_with('<') {
            bail!("body of {url} is not XML");
        }
        Ok(parse_sitemap(&xml))
    }

    /// GET the document and transparently decompress gzip bodies.
    ///
    /// Gzip is detected by the `.gz` URL suffix, a gzip content-type, or
    /// the 0x1f 0x8b magic bytes.
    async fn fetch_text_maybe_gzip(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let status = resp.status();
        if !status.is_success() {
            bail!("GET {url} returned {status}");
        }
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();
        let bytes = resp
            .bytes()
            .await
            .with_context(|| format!("reading body of {url}"))?;

        if url.ends_with(".gz") || content_type.contains("gzip") || is_gzip(&bytes) {
            let mut decoder = GzDecoder::new(bytes.as_ref());
            let mut out = Vec::new();
            decoder
                .read_to_end(&mut out)
                .with_context(|| format!("gunzipping {url}"))?;
            Ok(String::from_utf8_lossy(&out).into_owned())
        } else {
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_gzip_magic() {
        assert!(is_gzip(&[0x1f, 0x8b, 0x08]));
        assert!(!is_gzip(b"<urlset>"));
        assert!(!is_gzip(&[0x1f]));
    }
}
