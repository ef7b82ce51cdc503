//! Parse sitemap XML into a typed node.

use quick_xml::events::Event;
use quick_xml::Reader;

/// One fetched sitemap document, classified by its root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapNode {
    /// `<sitemapindex>`: links to other sitemap documents.
    Index(Vec<String>),
    /// `<urlset>`: page URLs.
    Pages(Vec<String>),
    /// Anything else; the walker skips these.
    Unrecognized,
}

/// Classify a document and collect every `<loc>` under its entries.
///
/// Event-based collection means a single-entry sitemap yields a one-element
/// list; there is no singleton-vs-list collapse to undo.
pub fn parse_sitemap(xml: &str) -> SitemapNode {
    #[derive(PartialEq, Clone, Copy)]
    enum Root {
        Unknown,
        Index,
        Urlset,
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut root = Root::Unknown;
    let mut in_entry = false;
    let mut in_loc = false;
    let mut locs = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.local_name();
                match (root, name.as_ref()) {
                    (Root::Unknown, b"sitemapindex") => root = Root::Index,
                    (Root::Unknown, b"urlset") => root = Root::Urlset,
                    (Root::Unknown, _) => return SitemapNode::Unrecognized,
                    (Root::Index, b"sitemap") | (Root::Urlset, b"url") => in_entry = true,
                    (_, b"loc") if in_entry => in_loc = true,
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) if in_loc => {
                let text = e.unescape().unwrap_or_default();
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    locs.push(trimmed.to_string());
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"loc" => in_loc = false,
                    b"sitemap" | b"url" => in_entry = false,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            // Malformed XML reads the same as an unrecognized document.
            Err(_) => return SitemapNode::Unrecognized,
            _ => {}
        }
        buf.clear();
    }

    match root {
        Root::Index => SitemapNode::Index(locs),
        Root::Urlset => SitemapNode::Pages(locs),
        Root::Unknown => SitemapNode::Unrecognized,
    }
}
