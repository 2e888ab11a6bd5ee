//! Core types for DRM auditing

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Manifest Types
// ============================================================================

/// Manifest type, derived from the URL path suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ManifestType {
    /// No URL was given
    #[default]
    None,
    /// URL present but not a recognized manifest extension
    Unknown,
    /// DASH media presentation description
    Mpd,
    /// HLS playlist
    M3u8,
}

impl ManifestType {
    /// Label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            ManifestType::None => "-",
            ManifestType::Unknown => "UNKNOWN",
            ManifestType::Mpd => "MPD",
            ManifestType::M3u8 => "M3U8",
        }
    }
}

impl fmt::Display for ManifestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Verdicts
// ============================================================================

/// Classification outcome for a single manifest URL.
///
/// Exactly one of three states holds: not checked, failed (error present),
/// or classified. Fields are only set through the constructors, and
/// deserialization rejects any other combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawVerdict")]
pub struct Verdict {
    checked: bool,
    #[serde(rename = "type")]
    manifest_type: ManifestType,
    drm_found: bool,
    error: Option<String>,
}

/// Wire shape of a [`Verdict`] before its invariants are checked
#[derive(Deserialize)]
struct RawVerdict {
    checked: bool,
    #[serde(rename = "type")]
    manifest_type: ManifestType,
    drm_found: bool,
    error: Option<String>,
}

impl TryFrom<RawVerdict> for Verdict {
    type Error = &'static str;

    fn try_from(raw: RawVerdict) -> std::result::Result<Self, Self::Error> {
        if !raw.checked
            && (raw.manifest_type != ManifestType::None || raw.drm_found || raw.error.is_some())
        {
            return Err("an unchecked verdict carries no type, DRM flag or error");
        }
        if raw.error.is_some() && raw.drm_found {
            return Err("a failed verdict cannot report DRM");
        }
        Ok(Self {
            checked: raw.checked,
            manifest_type: raw.manifest_type,
            drm_found: raw.drm_found,
            error: raw.error,
        })
    }
}

impl Verdict {
    /// Verdict for an empty URL
    pub fn not_checked() -> Self {
        Self {
            checked: false,
            manifest_type: ManifestType::None,
            drm_found: false,
            error: None,
        }
    }

    /// Verdict for a successfully fetched manifest
    pub fn classified(manifest_type: ManifestType, drm_found: bool) -> Self {
        Self {
            checked: true,
            manifest_type,
            drm_found,
            error: None,
        }
    }

    /// Verdict for a failed fetch. The error overrides any classification.
    pub fn failed(manifest_type: ManifestType, error: impl Into<String>) -> Self {
        Self {
            checked: true,
            manifest_type,
            drm_found: false,
            error: Some(error.into()),
        }
    }

    /// False iff the source URL was empty
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Type derived from the URL path
    pub fn manifest_type(&self) -> ManifestType {
        self.manifest_type
    }

    /// True iff DRM markers matched the rule for the manifest type
    pub fn drm_found(&self) -> bool {
        self.drm_found
    }

    /// Transport failure message
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Collapse the verdict into its display status
    pub fn status(&self) -> DrmStatus {
        if !self.checked {
            DrmStatus::NotApplicable
        } else if self.error.is_some() {
            DrmStatus::Error
        } else if self.drm_found {
            DrmStatus::Protected
        } else {
            DrmStatus::Clear
        }
    }
}

/// Display status of a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrmStatus {
    NotApplicable,
    Error,
    Protected,
    Clear,
}

impl DrmStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DrmStatus::NotApplicable => "-",
            DrmStatus::Error => "ERROR",
            DrmStatus::Protected => "YES",
            DrmStatus::Clear => "NO",
        }
    }
}

impl fmt::Display for DrmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Rows
// ============================================================================

/// One input record: ordered (column, value) pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    /// Value of a column, if present
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Column names in input order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// (column, value) pairs in input order
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Which of the two designated URL columns a task targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlSlot {
    Primary,
    Timeshift,
}

impl UrlSlot {
    pub const ALL: [UrlSlot; 2] = [UrlSlot::Primary, UrlSlot::Timeshift];
}

/// Verdict for one designated column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnVerdict {
    /// Column name as it appears in the input
    pub column: String,
    pub verdict: Verdict,
}

/// Both verdicts for one input row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowResult {
    /// 0-based position of the row in the input
    pub index: usize,
    pub primary: ColumnVerdict,
    pub timeshift: ColumnVerdict,
}

impl RowResult {
    /// Verdict keyed by column name
    pub fn get(&self, column: &str) -> Option<&Verdict> {
        [&self.primary, &self.timeshift]
            .into_iter()
            .find(|cv| cv.column == column)
            .map(|cv| &cv.verdict)
    }

    /// Verdict by slot
    pub fn slot(&self, slot: UrlSlot) -> &ColumnVerdict {
        match slot {
            UrlSlot::Primary => &self.primary,
            UrlSlot::Timeshift => &self.timeshift,
        }
    }

    /// Both verdicts, primary first
    pub fn verdicts(&self) -> [&ColumnVerdict; 2] {
        [&self.primary, &self.timeshift]
    }
}
