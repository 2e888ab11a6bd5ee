//! DRM Check Core - Content-protection audit for streaming manifests
//!
//! This crate provides the core functionality for auditing manifest URLs:
//! - Manifest type detection from the URL path (DASH `.mpd`, HLS `.m3u8`)
//! - DRM marker rules for DASH `ContentProtection` and HLS `EXT-X-KEY`
//! - Per-URL classification that turns transport failures into data
//! - Concurrent dispatch over a fixed worker pool with ordered results
//! - Progress tracking with elapsed/ETA estimates
//! - CSV ingestion and HTML/JSON report rendering
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        DRM Check Core                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐         ┌──────────────┐                      │
//! │  │  CSV Input   │────────▶│  Dispatcher  │◀──── AuditConfig     │
//! │  └──────────────┘         └──────┬───────┘                      │
//! │                                  │                              │
//! │                 ┌────────────────┼────────────────┐             │
//! │                 │                │                │             │
//! │          ┌──────┴──────┐  ┌──────┴──────┐  ┌──────┴──────┐      │
//! │          │ Classifier  │  │ Classifier  │  │  Progress   │      │
//! │          │  (worker)   │  │  (worker)   │  │  Tracker    │      │
//! │          └──────┬──────┘  └──────┬──────┘  └─────────────┘      │
//! │                 │                │                              │
//! │          ┌──────┴────────────────┴──────┐  ┌──────────────┐     │
//! │          │  ManifestFetcher (HTTP/mock) │  │    Report    │     │
//! │          └──────────────────────────────┘  │   Renderer   │     │
//! │                                            └──────────────┘     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod manifest;
pub mod classifier;
pub mod progress;
pub mod dispatcher;
pub mod input;
pub mod report;

pub use error::{Error, Result};
pub use types::*;
pub use config::AuditConfig;
pub use manifest::{detect_drm, detect_manifest_type, HttpFetcher, ManifestFetcher};
pub use classifier::ManifestClassifier;
pub use progress::{format_clock, NoProgress, ProgressEvent, ProgressSink, ProgressTracker};
pub use dispatcher::Dispatcher;
pub use input::{read_rows, read_rows_from};
pub use report::{render_html, render_json, ReportOptions, Summary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library with default configuration
pub fn init() {
    tracing::info!(version = VERSION, "DRM Check Core initialized");
}
