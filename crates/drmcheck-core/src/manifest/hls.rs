//! HLS (M3U8) encryption detection

/// Key tag announcing segment encryption
pub const KEY_TAG: &str = "#EXT-X-KEY";

/// Key tag that explicitly disables encryption
pub const KEY_METHOD_NONE: &str = "#EXT-X-KEY:METHOD=NONE";

/// True if the playlist carries an `EXT-X-KEY` tag and no explicit
/// `METHOD=NONE` key.
///
/// A playlist with any `METHOD=NONE` key is reported clear even if other
/// key tags are present.
pub fn has_encryption_key(body: &str) -> bool {
    body.contains(KEY_TAG) && !body.contains(KEY_METHOD_NONE)
}
