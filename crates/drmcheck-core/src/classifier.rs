//! Manifest classifier - one URL in, one verdict out

use crate::{
    manifest::{detect_drm, detect_manifest_type, HttpFetcher, ManifestFetcher},
    AuditConfig, Error, ManifestType, Result, Verdict,
};
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};
use url::Url;

/// Classifies manifest URLs by type and DRM signaling.
///
/// Holds no state between calls other than the fetcher; cheap to clone.
#[derive(Clone)]
pub struct ManifestClassifier {
    fetcher: Arc<dyn ManifestFetcher>,
}

impl ManifestClassifier {
    pub fn new(fetcher: Arc<dyn ManifestFetcher>) -> Self {
        Self { fetcher }
    }

    /// Classifier backed by [`HttpFetcher`]
    pub fn http(config: &AuditConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpFetcher::new(config)?)))
    }

    /// Classify a single URL. Never fails: transport errors become part of
    /// the returned verdict.
    #[instrument(skip(self))]
    pub async fn classify(&self, url: &str) -> Verdict {
        let url = url.trim();
        if url.is_empty() {
            return Verdict::not_checked();
        }

        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                let err = Error::InvalidUrl {
                    url: url.to_string(),
                    reason: e.to_string(),
                };
                warn!(error = %err, "Manifest URL rejected");
                return Verdict::failed(ManifestType::Unknown, err.to_string());
            }
        };

        let manifest_type = detect_manifest_type(&parsed);

        match self.fetcher.fetch(&parsed).await {
            Ok(body) => {
                let drm_found = detect_drm(manifest_type, &body);
                debug!(%manifest_type, drm_found, "Manifest classified");
                Verdict::classified(manifest_type, drm_found)
            }
            Err(e) if e.is_transport() => {
                warn!(%manifest_type, code = e.error_code(), error = %e, "Manifest fetch failed");
                Verdict::failed(manifest_type, e.to_string())
            }
            Err(e) => {
                error!(%manifest_type, code = e.error_code(), error = %e, "Fetcher returned a non-transport error");
                Verdict::failed(manifest_type, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DrmStatus;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticFetcher {
        body: Result<&'static str>,
        calls: AtomicUsize,
    }

    impl StaticFetcher {
        fn ok(body: &'static str) -> Arc<Self> {
            Arc::new(Self { body: Ok(body), calls: AtomicUsize::new(0) })
        }

        fn timeout() -> Arc<Self> {
            Arc::new(Self {
                body: Err(Error::ConnectionTimeout { url: "test".into() }),
                calls: AtomicUsize::new(0),
            })
        }

        fn broken(message: &str) -> Arc<Self> {
            Arc::new(Self {
                body: Err(Error::Internal(message.into())),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ManifestFetcher for StaticFetcher {
        async fn fetch(&self, url: &Url) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.body {
                Ok(body) => Ok(body.to_string()),
                Err(Error::Internal(message)) => Err(Error::Internal(message.clone())),
                Err(_) => Err(Error::ConnectionTimeout { url: url.to_string() }),
            }
        }
    }

    #[tokio::test]
    async fn test_empty_url_skips_fetch() {
        let fetcher = StaticFetcher::ok("<ContentProtection");
        let classifier = ManifestClassifier::new(fetcher.clone());

        assert_eq!(classifier.classify("").await, Verdict::not_checked());
        assert_eq!(classifier.classify("   ").await, Verdict::not_checked());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_mpd_with_protection() {
        let fetcher = StaticFetcher::ok(r#"<MPD><ContentProtection foo="bar"></MPD>"#);
        let classifier = ManifestClassifier::new(fetcher.clone());

        let verdict = classifier.classify("https://cdn.example.com/live/channel.mpd").await;
        assert_eq!(verdict, Verdict::classified(ManifestType::Mpd, true));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_m3u8_refined_rule() {
        let encrypted = ManifestClassifier::new(StaticFetcher::ok(
            "#EXTM3U\n#EXT-X-KEY:METHOD=AES-128,URI=\"k\"\n",
        ));
        let verdict = encrypted.classify("https://cdn.example.com/index.m3u8").await;
        assert_eq!(verdict, Verdict::classified(ManifestType::M3u8, true));

        let clear = ManifestClassifier::new(StaticFetcher::ok("#EXTM3U\n#EXT-X-KEY:METHOD=NONE\n"));
        let verdict = clear.classify("https://cdn.example.com/index.m3u8").await;
        assert_eq!(verdict, Verdict::classified(ManifestType::M3u8, false));
    }

    #[tokio::test]
    async fn test_unknown_type_is_fetched_but_not_inspected() {
        let fetcher = StaticFetcher::ok("<ContentProtection");
        let classifier = ManifestClassifier::new(fetcher.clone());

        let verdict = classifier.classify("https://cdn.example.com/stream.ism/manifest").await;
        assert_eq!(verdict, Verdict::classified(ManifestType::Unknown, false));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_becomes_error_verdict() {
        let classifier = ManifestClassifier::new(StaticFetcher::timeout());

        let verdict = classifier.classify("https://slow.example.com/a.mpd").await;
        assert!(verdict.checked());
        assert!(!verdict.drm_found());
        assert_eq!(verdict.manifest_type(), ManifestType::Mpd);
        assert!(verdict.error().unwrap().contains("timeout"));
    }

    #[tokio::test]
    async fn test_non_transport_error_still_becomes_verdict() {
        let classifier = ManifestClassifier::new(StaticFetcher::broken("decoder gone"));

        let verdict = classifier.classify("https://cdn.example.com/index.m3u8").await;
        assert_eq!(verdict.status(), DrmStatus::Error);
        assert_eq!(verdict.manifest_type(), ManifestType::M3u8);
        assert_eq!(verdict.error(), Some("Internal error: decoder gone"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_error_without_fetch() {
        let fetcher = StaticFetcher::ok("");
        let classifier = ManifestClassifier::new(fetcher.clone());

        let verdict = classifier.classify("not a url.mpd").await;
        assert!(verdict.checked());
        assert_eq!(verdict.manifest_type(), ManifestType::Unknown);
        assert!(verdict.error().is_some());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }
}
