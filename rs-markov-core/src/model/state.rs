use serde::{Deserialize, Serialize};

/// Represents a single observation in a Markov chain.
///
/// A `MarkovState` binds a fixed-length context (the `degree` symbols seen
/// just before) to one successor observed right after that context, together
/// with the empirical probability of that successor given the context.
///
/// Conceptually, this is one weighted edge of the chain: the training pass
/// creates one record per training position, so a context seen several times
/// produces several records.
///
/// ## Invariants
/// - `probability` is in `[0.0, 1.0]` once the statistics pass has run
/// - Records sharing the same `(context, successor)` pair carry the same probability
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MarkovState<T> {
	/// Window of prior symbols that must be reached for `successor` to be considered.
	context: Vec<T>,
	/// Symbol observed immediately after `context`.
	successor: T,
	/// P(successor | context).
	/// Stays at 0.0 until the owning chain computes it.
	probability: f64,
}

impl<T> MarkovState<T> {
	/// Creates a new state with a probability of 0.0.
	///
	/// The context length is not checked against any chain degree.
	pub fn new(context: Vec<T>, successor: T) -> Self {
		Self::with_probability(context, successor, 0.0)
	}

	/// Creates a new state with a known probability.
	pub fn with_probability(context: Vec<T>, successor: T, probability: f64) -> Self {
		Self {
			context,
			successor,
			probability,
		}
	}

	pub fn context(&self) -> &[T] {
		&self.context
	}

	pub fn successor(&self) -> &T {
		&self.successor
	}

	pub fn probability(&self) -> f64 {
		self.probability
	}

	pub(crate) fn set_probability(&mut self, probability: f64) {
		self.probability = probability;
	}
}

impl<T: PartialEq> MarkovState<T> {
	/// Returns `true` if this state was observed after `context`.
	///
	/// Comparison is element-wise, so contexts of different lengths never match.
	pub fn matches(&self, context: &[T]) -> bool {
		self.context.as_slice() == context
	}
}
