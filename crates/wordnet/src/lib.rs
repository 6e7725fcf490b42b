//! # Lexis WordNet
//!
//! Read-only access to a Princeton WordNet database in its native file format
//! (`index.*`, `data.*`, `*.exc`).
//!
//! ## Architecture
//!
//! ```text
//! dict/
//!   │
//!   ├──> index.{noun,verb,adj,adv}   lemma -> synset offsets (parsed at open)
//!   ├──> *.exc                       irregular inflections (parsed at open)
//!   └──> data.{noun,verb,adj,adv}    kept in memory, records parsed on demand
//!          │
//!          └──> Sense { lemmas, definition, examples, relations }
//! ```
//!
//! Consumers depend on the [`Lexicon`] trait only; [`WordNetDatabase`] is the
//! file-backed implementation.

mod database;
mod error;
mod frames;
mod lexicon;
mod morphy;
mod parse;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
mod types;

pub use database::{missing_files, WordNetDatabase, EXCEPTION_FILES, REQUIRED_FILES};
pub use error::{Result, WordNetError};
pub use frames::frame_sentence;
pub use lexicon::Lexicon;
pub use types::{Lemma, PartOfSpeech, Pointer, RelatedLemma, RelatedSense, Sense, SenseId};
