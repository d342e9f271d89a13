//! # Saatmishaali Gemini Client
//!
//! Sends one schema-constrained `generateContent` request per user action
//! and turns the answer into an [`card_core::Artifact`].
//!
//! ```text
//! Category ──▶ ModeDescriptor ──▶ GenerateContentRequest ──▶ Gemini
//!                                                             │
//! Artifact ◀── parse_payload ◀── candidate text ◀─────────────┘
//! ```
//!
//! Failures map onto [`card_core::GenerationError`]: no text is
//! `EmptyResponse`, a non-conforming payload is `MalformedResponse`,
//! everything on the wire is `TransportFailure`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod client;
mod wire;

pub use client::{ClientError, GeminiClient, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use wire::GenerateContentRequest;
