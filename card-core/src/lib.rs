//! # Saatmishaali Card Core
//!
//! Core logic shared by the generation client, the export pipeline and the
//! command-line host.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 card-core                   │
//! ├─────────────────────────────────────────────┤
//! │  Categories      │  Generation State        │
//! │  - Authors       │  - Idle / Pending        │
//! │  - Meme styles   │  - Ready / Failed        │
//! │  - Mode profile  │  - Request tickets       │
//! ├─────────────────────────────────────────────┤
//! │  Scene Graph     │  Card Layout             │
//! │  - Elements      │  - Quote card            │
//! │  - Revisions     │  - Meme card             │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod artifact;
pub mod card;
pub mod category;
pub mod element;
pub mod error;
pub mod generator;
pub mod mode;
pub mod notice;
pub mod scene;
pub mod state;

pub use artifact::{Artifact, MemeArtifact, QuoteArtifact};
pub use card::{layout_card, CardStyle};
pub use category::{AuthorCategory, Category, MemeCategory, Mode};
pub use element::{Element, ElementId, ElementKind, FontWeight, TextAlign, Transform};
pub use error::{CardError, CardResult, ExportError, GenerationError};
pub use generator::Generator;
pub use mode::ModeDescriptor;
pub use notice::{Notice, Notifier};
pub use scene::Scene;
pub use state::{GenerationState, Phase, RequestTicket};

/// Product tag used in filenames, share text and the card footer.
pub const PRODUCT_NAME: &str = "Saatmishaali AI";

/// Card core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
