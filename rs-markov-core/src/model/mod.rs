//! Top-level module for the Markov chain system.
//!
//! This module provides:
//! - Single observations of a chain (`MarkovState`)
//! - The variable-order chain itself (`MarkovChain`)
//! - Generation configuration (`GenerationInput`)
//! - A high-level multi-corpus interface (`Generator`)

/// Variable-order Markov chain: training, queries and weighted sampling.
pub mod chain;

/// High-level interface generating word sequences from several corpora.
///
/// Exposes corpus loading, weighted corpus selection, and sequence
/// generation with seed control.
pub mod generator;

/// Generation configuration used by `Generator`.
///
/// Stores the sequence length, start seed, random seed, and normalized
/// corpus selection probabilities.
pub mod generation_input;

/// One (context, successor, probability) record of a chain.
pub mod state;

pub use chain::{MarkovChain, RandomSequence};
pub use generation_input::{GenerationInput, StartSeed};
pub use generator::Generator;
pub use state::MarkovState;
