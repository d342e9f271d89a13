//! # Saatmishaali Export
//!
//! Everything that happens after a card is on screen.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐  rendered()   ┌──────────────┐  PNG bytes  ┌──────────────┐
//! │ RenderSurface│ ────────────▶ │ CardExporter │ ──────────▶ │ DownloadSink │
//! │ scene + frame│  (snapshot)   │ SVG → pixmap │             │ save(file)   │
//! └──────────────┘               └──────────────┘             └──────────────┘
//!
//! ┌──────────────┐   payload     ┌──────────────┐  fallback   ┌──────────────┐
//! │   Artifact   │ ────────────▶ │ NativeShare  │ ──────────▶ │  Clipboard   │
//! └──────────────┘               └──────────────┘             └──────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod error;
pub mod export;
pub mod filename;
pub mod pipeline;
pub mod share;
pub mod surface;

pub use download::{DirectoryDownloads, DownloadSink};
pub use error::{RenderError, RenderResult};
pub use export::{CardExporter, ExportConfig};
pub use filename::export_filename;
pub use pipeline::ExportPipeline;
pub use share::{
    compose_share_payload, Clipboard, NativeShare, ShareError, ShareOutcome, SharePayload, Sharer,
};
pub use surface::RenderSurface;
