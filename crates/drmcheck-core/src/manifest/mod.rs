//! Manifest type detection, DRM marker rules, and fetching for HLS and DASH

pub mod dash;
mod fetch;
pub mod hls;

pub use fetch::HttpFetcher;

use crate::{ManifestType, Result};
use async_trait::async_trait;
use url::Url;

/// Source of manifest bodies
#[async_trait]
pub trait ManifestFetcher: Send + Sync {
    /// Fetch the full manifest body as text. One attempt, no retries.
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// Detect manifest type from the URL path extension.
///
/// Query strings and fragments are ignored; matching is case-insensitive.
pub fn detect_manifest_type(url: &Url) -> ManifestType {
    let path = url.path().to_lowercase();
    if path.ends_with(".mpd") {
        ManifestType::Mpd
    } else if path.ends_with(".m3u8") {
        ManifestType::M3u8
    } else {
        ManifestType::Unknown
    }
}

/// Apply the DRM marker rule for a manifest type
pub fn detect_drm(manifest_type: ManifestType, body: &str) -> bool {
    match manifest_type {
        ManifestType::Mpd => dash::has_content_protection(body),
        ManifestType::M3u8 => hls::has_encryption_key(body),
        ManifestType::Unknown | ManifestType::None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_hls() {
        let url = Url::parse("https://example.com/master.m3u8").unwrap();
        assert_eq!(detect_manifest_type(&url), ManifestType::M3u8);
    }

    #[test]
    fn test_detect_dash() {
        let url = Url::parse("https://example.com/manifest.mpd").unwrap();
        assert_eq!(detect_manifest_type(&url), ManifestType::Mpd);
    }

    #[test]
    fn test_detect_ignores_query_and_case() {
        let url = Url::parse("https://cdn.example.com/live/Channel.MPD?token=abc.m3u8#x").unwrap();
        assert_eq!(detect_manifest_type(&url), ManifestType::Mpd);
    }

    #[test]
    fn test_detect_unknown() {
        let url = Url::parse("https://example.com/stream.ism/manifest").unwrap();
        assert_eq!(detect_manifest_type(&url), ManifestType::Unknown);
    }

    #[test]
    fn test_unknown_never_drm() {
        assert!(!detect_drm(ManifestType::Unknown, "<ContentProtection #EXT-X-KEY:METHOD=AES-128"));
    }
}
