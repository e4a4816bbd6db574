//! Mapping MIME types to file name extensions.
//!
//! The mapping is best-effort: it covers the subtypes commonly found in web crawls and returns no
//! extension for anything else. It is a pure function of its input, so the encoder and decoder
//! always derive the same side file names from the same `Content-Type`.

use mime::Mime;

#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// The subtype must equal the string.
    Exact(&'static str),
    /// The subtype must start with the string.
    Prefix(&'static str),
}

impl Pattern {
    fn matches(self, subtype: &str) -> bool {
        match self {
            Pattern::Exact(s) => subtype == s,
            Pattern::Prefix(s) => subtype.starts_with(s),
        }
    }
}

use Pattern::{Exact, Prefix};

/// Recognized subtypes and their extensions. The first matching entry wins, so longer prefixes
/// come before shorter ones that would also match.
static EXTENSIONS: &[(Pattern, &str)] = &[
    (Exact("jpeg"), ".jpg"),
    (Exact("jpg"), ".jpg"),
    (Exact("pjpeg"), ".jpg"),
    (Exact("png"), ".png"),
    (Exact("gif"), ".gif"),
    (Exact("webp"), ".webp"),
    (Exact("bmp"), ".bmp"),
    (Exact("tiff"), ".tif"),
    (Exact("avif"), ".avif"),
    (Exact("x-icon"), ".ico"),
    (Exact("vnd.microsoft.icon"), ".ico"),
    (Exact("svg+xml"), ".svg"),
    (Prefix("html"), ".html"),
    (Prefix("xhtml+xml"), ".xhtml"),
    (Prefix("css"), ".css"),
    (Prefix("javascript"), ".js"),
    (Prefix("x-javascript"), ".js"),
    (Prefix("ecmascript"), ".js"),
    (Prefix("ld+json"), ".jsonld"),
    (Prefix("json"), ".json"),
    (Prefix("rss+xml"), ".rss"),
    (Prefix("atom+xml"), ".atom"),
    (Prefix("xml"), ".xml"),
    (Prefix("plain"), ".txt"),
    (Prefix("csv"), ".csv"),
    (Exact("pdf"), ".pdf"),
    (Exact("zip"), ".zip"),
    (Exact("gzip"), ".gz"),
    (Exact("x-gzip"), ".gz"),
    (Prefix("octet-stream"), ".bin"),
    (Exact("wasm"), ".wasm"),
    (Exact("woff2"), ".woff2"),
    (Exact("font-woff2"), ".woff2"),
    (Exact("woff"), ".woff"),
    (Exact("font-woff"), ".woff"),
    (Exact("ttf"), ".ttf"),
    (Exact("x-font-ttf"), ".ttf"),
    (Exact("otf"), ".otf"),
    (Exact("mp4"), ".mp4"),
    (Exact("webm"), ".webm"),
    (Exact("ogg"), ".ogg"),
];

/// Map a lower-cased MIME subtype (the part after `/`) to a file name extension, including the
/// leading dot. Unrecognized subtypes map to the empty string.
///
/// ```
/// # use warccodec::extension::extension_for_subtype;
/// assert_eq!(extension_for_subtype("jpeg"), ".jpg");
/// assert_eq!(extension_for_subtype("html"), ".html");
/// assert_eq!(extension_for_subtype("x-unheard-of"), "");
/// ```
pub fn extension_for_subtype(subtype: &str) -> &'static str {
    EXTENSIONS
        .iter()
        .find(|(pattern, _)| pattern.matches(subtype))
        .map(|&(_, ext)| ext)
        .unwrap_or("")
}

/// Extract the lower-cased subtype from a `Content-Type` value such as
/// `" text/html; charset=utf-8"`.
///
/// Surrounding whitespace and any parameters are dropped. Returns `None` if the value has no `/`.
pub fn mime_subtype(content_type: &[u8]) -> Option<String> {
    let value = String::from_utf8_lossy(content_type);
    let value = value.trim();

    if let Ok(parsed) = value.parse::<Mime>() {
        if let Some((_, subtype)) = parsed.essence_str().split_once('/') {
            return Some(subtype.to_ascii_lowercase());
        }
    }

    // mime is strict about token characters; fall back to a plain split
    let (_, rest) = value.split_once('/')?;
    let subtype = rest.split(';').next().unwrap_or("").trim();
    Some(subtype.to_ascii_lowercase())
}

/// The extension for a raw `Content-Type` value, or `""` if it has none.
pub fn extension_for_content_type(content_type: &[u8]) -> &'static str {
    mime_subtype(content_type)
        .map(|subtype| extension_for_subtype(&subtype))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_entries_map_as_documented() {
        let expected = [
            ("jpeg", ".jpg"),
            ("png", ".png"),
            ("gif", ".gif"),
            ("svg+xml", ".svg"),
            ("x-icon", ".ico"),
            ("html", ".html"),
            ("css", ".css"),
            ("javascript", ".js"),
            ("json", ".json"),
            ("ld+json", ".jsonld"),
            ("xml", ".xml"),
            ("plain", ".txt"),
            ("pdf", ".pdf"),
            ("octet-stream", ".bin"),
            ("woff2", ".woff2"),
            ("woff", ".woff"),
        ];
        for (subtype, ext) in expected.iter() {
            assert_eq!(extension_for_subtype(subtype), *ext, "subtype {}", subtype);
        }
    }

    #[test]
    fn every_table_entry_is_reachable() {
        for (pattern, ext) in EXTENSIONS {
            let subtype = match pattern {
                Exact(s) | Prefix(s) => *s,
            };
            assert_eq!(extension_for_subtype(subtype), *ext, "subtype {}", subtype);
        }
    }

    #[test]
    fn prefixes_match_longer_subtypes() {
        assert_eq!(extension_for_subtype("html5"), ".html");
        assert_eq!(extension_for_subtype("octet-stream-ish"), ".bin");
        assert_eq!(extension_for_subtype("plain-text"), ".txt");
        // Exact entries do not
        assert_eq!(extension_for_subtype("jpeg2000"), "");
    }

    #[test]
    fn unknown_subtypes_have_no_extension() {
        assert_eq!(extension_for_subtype(""), "");
        assert_eq!(extension_for_subtype("vnd.example.nonsense"), "");
        assert_eq!(extension_for_subtype("HTML"), "");
    }

    #[test]
    fn subtype_extraction() {
        assert_eq!(mime_subtype(b" text/html"), Some("html".into()));
        assert_eq!(
            mime_subtype(b" Text/HTML; charset=UTF-8"),
            Some("html".into())
        );
        assert_eq!(mime_subtype(b"image/svg+xml"), Some("svg+xml".into()));
        assert_eq!(
            mime_subtype(b" application/http; msgtype=response"),
            Some("http".into())
        );
        assert_eq!(mime_subtype(b"text/html ;charset=\"broken"), Some("html".into()));
        assert_eq!(mime_subtype(b"garbage"), None);
    }

    #[test]
    fn content_type_to_extension() {
        assert_eq!(extension_for_content_type(b" image/jpeg"), ".jpg");
        assert_eq!(extension_for_content_type(b"text/plain; charset=utf-8"), ".txt");
        assert_eq!(extension_for_content_type(b"application/warc-fields"), "");
        assert_eq!(extension_for_content_type(b""), "");
    }
}
