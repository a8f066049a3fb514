// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image loading boundary.
//!
//! Framecrop does not fetch or decode images itself. [`LoadRequest`] tells the
//! host what to load and how; the host reports back with a [`LoadOutcome`].
//! A failed fetch degrades to using the original URL directly; once natural
//! dimensions are known both outcomes are handled identically.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use framecrop_geometry::NaturalSize;

/// MIME type fetched bytes are labelled with in data URLs.
pub const DATA_URL_MIME: &str = "image/jpeg";

/// Scheme, host and port of a URL, as compared for cross-origin checks.
///
/// Ports are compared as written: an omitted port differs from an explicit
/// default port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Origin {
    /// Scheme including the trailing colon, lowercased, e.g. `https:`.
    pub scheme: String,
    /// Host name, lowercased.
    pub host: String,
    /// Explicit port, if any.
    pub port: Option<u16>,
}

impl Origin {
    /// Builds an origin from parts.
    pub fn new(scheme: &str, host: &str, port: Option<u16>) -> Self {
        let mut scheme = scheme.to_ascii_lowercase();
        if !scheme.ends_with(':') {
            scheme.push(':');
        }
        Self {
            scheme,
            host: host.to_ascii_lowercase(),
            port,
        }
    }

    /// Extracts the origin of an absolute `http:` or `https:` URL.
    ///
    /// Relative URLs and other schemes have no origin and return `None`.
    pub fn parse(url: &str) -> Option<Self> {
        let (scheme, rest) = url.split_once("://")?;
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return None;
        }
        let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
        let authority = authority.rsplit_once('@').map_or(authority, |(_, a)| a);
        let (host, port) = if let Some(bracketed) = authority.strip_prefix('[') {
            // IPv6 literal: `[addr]` optionally followed by `:port`.
            let (addr, after) = bracketed.split_once(']')?;
            let host = &authority[..addr.len() + 2];
            match after {
                "" | ":" => (host, None),
                _ => (host, Some(after.strip_prefix(':')?.parse().ok()?)),
            }
        } else {
            match authority.split_once(':') {
                Some((host, "")) => (host, None),
                Some((host, port)) => (host, Some(port.parse().ok()?)),
                None => (authority, None),
            }
        };
        if host.is_empty() {
            return None;
        }
        Some(Self::new(scheme, host, port))
    }
}

/// `crossorigin` mode the host should set on the image element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrossOrigin {
    /// Request without credentials.
    Anonymous,
}

impl CrossOrigin {
    /// Attribute value for the image element.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
        }
    }
}

/// What the host should load for a widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    /// URL to fetch and display.
    pub url: String,
    /// Whether the bytes should be fetched first; `false` for `data:` URLs.
    pub fetch: bool,
    /// Cross-origin mode, when the image lives on another origin.
    pub cross_origin: Option<CrossOrigin>,
}

impl LoadRequest {
    /// Plans the load of `image_url`.
    ///
    /// With `check_cross_origin`, an image whose origin differs from
    /// `page_origin` is requested anonymously with a `timestamp=now_millis`
    /// query parameter to bypass cached non-CORS responses.
    pub fn resolve(
        image_url: &str,
        check_cross_origin: bool,
        page_origin: Option<&Origin>,
        now_millis: u64,
    ) -> Self {
        if is_data_url(image_url) {
            return Self {
                url: image_url.to_owned(),
                fetch: false,
                cross_origin: None,
            };
        }
        if check_cross_origin && is_cross_origin(image_url, page_origin) {
            return Self {
                url: add_timestamp(image_url, now_millis),
                fetch: true,
                cross_origin: Some(CrossOrigin::Anonymous),
            };
        }
        Self {
            url: image_url.to_owned(),
            fetch: true,
            cross_origin: None,
        }
    }
}

/// Result of the host's load.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    /// The image loaded; `bytes` holds the fetched payload when there was one.
    Loaded {
        /// Natural image size.
        natural: NaturalSize,
        /// Fetched bytes, to be inlined as a data URL.
        bytes: Option<Vec<u8>>,
    },
    /// The fetch failed and the original URL was displayed directly.
    Degraded {
        /// URL used as the image source.
        raw_url: String,
        /// Natural image size.
        natural: NaturalSize,
    },
}

impl LoadOutcome {
    /// Natural image size, whichever way the image loaded.
    #[must_use]
    pub fn natural(&self) -> NaturalSize {
        match self {
            Self::Loaded { natural, .. } | Self::Degraded { natural, .. } => *natural,
        }
    }

    /// Returns `true` when the fetch failed and the raw URL is in use.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Returns `true` for inline `data:` URLs.
#[must_use]
pub fn is_data_url(url: &str) -> bool {
    url.starts_with("data:")
}

/// Returns `true` when `url` is absolute and its origin differs from the page.
///
/// Relative URLs are same-origin. Without a page origin every absolute URL is
/// treated as cross-origin.
#[must_use]
pub fn is_cross_origin(url: &str, page_origin: Option<&Origin>) -> bool {
    match (Origin::parse(url), page_origin) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(origin), Some(page)) => origin != *page,
    }
}

/// Appends `timestamp=<millis>` as a query parameter.
#[must_use]
pub fn add_timestamp(url: &str, millis: u64) -> String {
    let sign = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sign}timestamp={millis}")
}

/// Inlines `bytes` as a base64 `data:image/jpeg` URL.
#[must_use]
pub fn encode_data_url(bytes: &[u8]) -> String {
    format!("data:{DATA_URL_MIME};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Origin {
        Origin::new("https", "app.example.com", None)
    }

    #[test]
    fn parses_origins() {
        assert_eq!(
            Origin::parse("HTTPS://User@CDN.example.com:8443/a.jpg?x=1"),
            Some(Origin::new("https:", "cdn.example.com", Some(8443)))
        );
        assert_eq!(
            Origin::parse("http://example.com#frag"),
            Some(Origin::new("http", "example.com", None))
        );
        assert_eq!(Origin::parse("/images/a.jpg"), None);
        assert_eq!(Origin::parse("ftp://example.com/a.jpg"), None);
        assert_eq!(Origin::parse("https://example.com:notaport/"), None);
        assert_eq!(
            Origin::parse("https://[::1]:8443/a.jpg"),
            Some(Origin::new("https", "[::1]", Some(8443)))
        );
        assert_eq!(
            Origin::parse("http://[2001:DB8::1]/a.jpg"),
            Some(Origin::new("http", "[2001:db8::1]", None))
        );
        assert_eq!(Origin::parse("https://[::1/a.jpg"), None);
        assert_eq!(Origin::parse("https://[::1]x/a.jpg"), None);
    }

    #[test]
    fn cross_origin_comparison() {
        let page = page();
        assert!(!is_cross_origin("https://app.example.com/a.jpg", Some(&page)));
        assert!(is_cross_origin("http://app.example.com/a.jpg", Some(&page)));
        assert!(is_cross_origin("https://app.example.com:444/a.jpg", Some(&page)));
        assert!(is_cross_origin("https://cdn.example.com/a.jpg", Some(&page)));
        assert!(!is_cross_origin("a.jpg", Some(&page)));
        assert!(is_cross_origin("https://cdn.example.com/a.jpg", None));
        assert!(is_cross_origin("https://[::1]:8443/a.jpg", Some(&page)));

        let local = Origin::new("https", "[::1]", Some(8443));
        assert!(!is_cross_origin("https://[::1]:8443/a.jpg", Some(&local)));
    }

    #[test]
    fn ipv6_images_are_cache_busted() {
        let page = page();
        let req = LoadRequest::resolve("https://[2001:db8::1]/a.jpg", true, Some(&page), 9);
        assert_eq!(req.cross_origin, Some(CrossOrigin::Anonymous));
        assert_eq!(req.url, "https://[2001:db8::1]/a.jpg?timestamp=9");
    }

    #[test]
    fn timestamp_uses_correct_separator() {
        assert_eq!(add_timestamp("a.jpg", 5), "a.jpg?timestamp=5");
        assert_eq!(add_timestamp("a.jpg?v=2", 5), "a.jpg?v=2&timestamp=5");
    }

    #[test]
    fn data_urls_are_not_fetched() {
        let req = LoadRequest::resolve("data:image/png;base64,AAAA", true, None, 1);
        assert!(!req.fetch);
        assert_eq!(req.cross_origin, None);
        assert_eq!(req.url, "data:image/png;base64,AAAA");
    }

    #[test]
    fn cross_origin_requests_are_anonymous_and_cache_busted() {
        let page = page();
        let req = LoadRequest::resolve("https://cdn.example.com/a.jpg", true, Some(&page), 42);
        assert_eq!(req.url, "https://cdn.example.com/a.jpg?timestamp=42");
        assert_eq!(req.cross_origin.map(CrossOrigin::as_str), Some("anonymous"));

        let unchecked = LoadRequest::resolve("https://cdn.example.com/a.jpg", false, Some(&page), 42);
        assert_eq!(unchecked.url, "https://cdn.example.com/a.jpg");
        assert_eq!(unchecked.cross_origin, None);
        assert!(unchecked.fetch);
    }

    #[test]
    fn data_url_encoding_pads() {
        assert_eq!(encode_data_url(b""), "data:image/jpeg;base64,");
        assert_eq!(encode_data_url(b"M"), "data:image/jpeg;base64,TQ==");
        assert_eq!(encode_data_url(b"Ma"), "data:image/jpeg;base64,TWE=");
        assert_eq!(encode_data_url(b"Man"), "data:image/jpeg;base64,TWFu");
    }

    #[test]
    fn outcomes_expose_natural_size() {
        let natural = NaturalSize::new(10.0, 20.0);
        let degraded = LoadOutcome::Degraded {
            raw_url: "a.jpg".into(),
            natural,
        };
        assert!(degraded.is_degraded());
        assert_eq!(degraded.natural(), natural);
        let loaded = LoadOutcome::Loaded {
            natural,
            bytes: None,
        };
        assert!(!loaded.is_degraded());
    }
}
