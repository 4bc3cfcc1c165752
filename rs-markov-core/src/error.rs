use std::io;
use std::path::PathBuf;

/// Errors raised at the edges of the crate (corpus loading, generation setup).
///
/// The chain itself never fails: degenerate inputs degrade to empty results.
#[derive(thiserror::Error, Debug)]
pub enum MarkovError {
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	#[error("Expected a directory, got: {}", .0.display())]
	NotADirectory(PathBuf),

	#[error("Invalid corpus path: {}", .0.display())]
	InvalidPath(PathBuf),

	#[error("Corpus {0} already loaded")]
	DuplicateCorpus(String),

	#[error("Corpus {0} not found")]
	UnknownCorpus(String),

	#[error("No corpus available for generation")]
	NoCorpus,

	#[error("Corpus {0} is too short to build a chain")]
	EmptyChain(String),

	#[error("Seed has {found} symbols, chain degree is {expected}")]
	SeedLength { expected: usize, found: usize },

	#[error("Intensity must be a finite value >= 0.0, got {0}")]
	InvalidIntensity(f32),
}
