//! DASH (MPD) content protection detection

/// Element that carries DRM signaling in an MPD
pub const CONTENT_PROTECTION_TAG: &str = "<ContentProtection";

/// True if the MPD body declares a `ContentProtection` element.
///
/// Case-sensitive substring match; the document is not parsed as XML.
pub fn has_content_protection(body: &str) -> bool {
    body.contains(CONTENT_PROTECTION_TAG)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDEVINE_MPD: &str = r#"<?xml version="1.0"?>
<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" type="static">
  <Period>
    <AdaptationSet mimeType="video/mp4">
      <ContentProtection schemeIdUri="urn:mpeg:dash:mp4protection:2011" value="cenc"/>
      <ContentProtection schemeIdUri="urn:uuid:edef8ba9-79d6-4ace-a3c8-27dcd51d21ed"/>
    </AdaptationSet>
  </Period>
</MPD>"#;

    #[test]
    fn test_protected_mpd() {
        assert!(has_content_protection(WIDEVINE_MPD));
        assert!(has_content_protection(r#"<ContentProtection foo="bar">"#));
    }

    #[test]
    fn test_clear_mpd() {
        let body = r#"<MPD><Period><AdaptationSet mimeType="video/mp4"/></Period></MPD>"#;
        assert!(!has_content_protection(body));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!has_content_protection("<contentprotection schemeIdUri=\"x\"/>"));
    }
}
