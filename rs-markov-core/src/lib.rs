//! Variable-order Markov chain library.
//!
//! This crate provides:
//! - Markov chains over any equality-comparable symbol type
//! - Conditional probability and possibility queries
//! - Weighted random sampling and sequence generation with a seedable source
//! - A word-level generator over several text corpora
//!
//! Low-level helpers (file I/O) are kept internal.

/// Core chain models and generation logic.
pub mod model;

/// Text tokenization into training symbols.
pub mod corpus;

/// Errors of the loading and generation surfaces.
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::MarkovError;
pub use model::{GenerationInput, Generator, MarkovChain, MarkovState, RandomSequence, StartSeed};
