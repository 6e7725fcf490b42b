//! # Lexis Lookup
//!
//! Turns the senses of a word into a single [`LookupResult`] and renders it.
//!
//! ## Architecture
//!
//! ```text
//! word ──> Lexicon::lookup ──┬── senses ──> aggregate ──> LookupResult ──> render (JSON | tables)
//!                            │
//!                            └── none ────> suggest ───> NotFound { suggestions }
//! ```
//!
//! The database is reached only through [`lexis_wordnet::Lexicon`], so any
//! source of senses can drive the pipeline.

mod aggregate;
mod error;
mod render;
mod resolve;
mod result;
mod suggest;
#[cfg(feature = "tables")]
mod table;

pub use aggregate::{aggregate, Aggregator};
pub use error::{LookupError, Result};
pub use render::{ensure_renderable, render, render_json, OutputMode, TableCapability};
pub use resolve::{resolve, NotFound, Resolution};
pub use result::{Category, LookupResult};
pub use suggest::{
    similarity, suggest, SuggestConfig, DEFAULT_SUGGESTION_CUTOFF, DEFAULT_SUGGESTION_LIMIT,
};
#[cfg(feature = "tables")]
pub use table::render_tables;
