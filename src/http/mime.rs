//! Content negotiation against the fixed set of media types the server can
//! produce.

use std::fmt;

/// Media types known to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    TextHtml,
    TextCss,
    TextJavascript,
    ImagePng,
    OctetStream,
    ApplicationJson,
}

/// Supported types in negotiation order. Ties are broken by position here.
pub const SUPPORTED: [MediaType; 6] = [
    MediaType::TextHtml,
    MediaType::TextCss,
    MediaType::TextJavascript,
    MediaType::ImagePng,
    MediaType::OctetStream,
    MediaType::ApplicationJson,
];

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::TextHtml => "text/html",
            MediaType::TextCss => "text/css",
            MediaType::TextJavascript => "text/javascript",
            MediaType::ImagePng => "image/png",
            MediaType::OctetStream => "application/octet-stream",
            MediaType::ApplicationJson => "application/json",
        }
    }

    /// Whether files of this type can be served from the resource root.
    pub fn is_servable(&self) -> bool {
        !matches!(self, MediaType::OctetStream)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an `Accept` header.
#[derive(Debug, Clone, PartialEq)]
pub struct MimePreference {
    pub mime_type: String,
    pub quality: f32,
}

impl MimePreference {
    /// Parses `type/subtype[;q=N]`. A missing or unreadable quality is
    /// treated as 1.0 and 0.0 respectively.
    pub fn parse(entry: &str) -> Self {
        match entry.split_once(";q=") {
            Some((mime, q)) => Self {
                mime_type: mime.to_string(),
                quality: q.trim().parse::<f32>().unwrap_or(0.0).clamp(0.0, 1.0),
            },
            None => Self {
                mime_type: entry.to_string(),
                quality: 1.0,
            },
        }
    }

    pub fn matches(&self, media: MediaType) -> bool {
        let pattern = self.mime_type.as_str();
        pattern == media.as_str()
            || (pattern == "image/*" && media.as_str().starts_with("image/"))
            || pattern == "*/*"
    }
}

/// Splits an `Accept` value into preferences, keeping header order.
pub fn parse_accept(header: &str) -> Vec<MimePreference> {
    header
        .split(',')
        .map(|entry| entry.trim_start_matches(' '))
        .filter(|entry| !entry.is_empty())
        .map(MimePreference::parse)
        .collect()
}

/// Picks the best supported type for an `Accept` header.
///
/// An absent header counts as `*/*`. A candidate only replaces the current
/// best when its quality is strictly greater, so among equal qualities the
/// earliest accept entry wins, and within it the earliest supported type.
pub fn negotiate(accept: Option<&str>) -> Option<MediaType> {
    let preferences = parse_accept(accept.unwrap_or("*/*"));

    let mut best = None;
    let mut best_quality = 0.0f32;

    for pref in &preferences {
        for media in SUPPORTED {
            if pref.matches(media) && pref.quality > best_quality {
                best = Some(media);
                best_quality = pref.quality;
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_defaults_to_one() {
        let pref = MimePreference::parse("text/html");
        assert_eq!(pref.mime_type, "text/html");
        assert_eq!(pref.quality, 1.0);
    }

    #[test]
    fn garbage_quality_is_zero() {
        let pref = MimePreference::parse("text/html;q=abc");
        assert_eq!(pref.quality, 0.0);
    }

    #[test]
    fn parse_accept_skips_leading_spaces_and_empties() {
        let prefs = parse_accept("text/html, image/png;q=0.5,,");
        assert_eq!(prefs.len(), 2);
        assert_eq!(prefs[1].mime_type, "image/png");
        assert_eq!(prefs[1].quality, 0.5);
    }

    #[test]
    fn image_wildcard_matches_only_images() {
        let pref = MimePreference::parse("image/*");
        assert!(pref.matches(MediaType::ImagePng));
        assert!(!pref.matches(MediaType::TextHtml));
    }
}
