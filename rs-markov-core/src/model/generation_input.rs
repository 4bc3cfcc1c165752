use std::collections::BTreeMap;

use crate::error::MarkovError;

/// Strategy used to select the starting context when generating a sequence.
///
/// # Variants
/// - `Random`: start from the context of a random state of the chosen chain.
/// - `Custom(Vec<T>)`: start from the given context. Its length must equal
///   the chain degree.
#[derive(PartialEq, Clone, Debug)]
pub enum StartSeed<T> {
	Random,
	Custom(Vec<T>),
}

/// Input parameters for generating sequences from one of several chains.
///
/// `GenerationInput` contains both **configuration parameters** (sequence
/// length, start seed, random seed) and **corpus selection weights**
/// (intensity and normalized probabilities).
///
/// # Invariants
/// - `corpus_intensity` keys are fixed and correspond to loaded corpora
/// - `corpus_probability` is always normalized, or uniform if all intensities are zero
#[derive(Clone, Debug)]
pub struct GenerationInput<T> {
	/// Number of symbols generated after the first one.
	pub count: usize,

	/// Starting context.
	pub start_seed: StartSeed<T>,

	/// Seed for the random source. `None` draws from the OS on every generation.
	rng_seed: Option<u64>,

	/// User-adjustable corpus intensities (not normalized).
	corpus_intensity: BTreeMap<String, f32>,

	/// Normalized probabilities derived from `corpus_intensity`.
	corpus_probability: BTreeMap<String, f32>,
}

impl<T> GenerationInput<T> {
	/// Creates a new `GenerationInput` from a set of corpus intensities.
	///
	/// # Visibility
	/// - `pub(crate)` so that corpus names always come from a `Generator`.
	pub(crate) fn new(corpus_intensity: BTreeMap<String, f32>) -> Self {
		let mut generation_input = Self {
			count: 10,
			start_seed: StartSeed::Random,
			rng_seed: None,
			corpus_intensity,
			corpus_probability: BTreeMap::new(),
		};

		generation_input.normalize();
		generation_input
	}

	/// Normalizes `corpus_intensity` into `corpus_probability`.
	fn normalize(&mut self) {
		// f64 so that large finite intensities cannot overflow the sum
		let sum: f64 = self.corpus_intensity.values().map(|&i| i as f64).sum();

		self.corpus_probability.clear();

		if sum > 0.0 {
			for (corpus, intensity) in &self.corpus_intensity {
				self.corpus_probability.insert(corpus.clone(), (*intensity as f64 / sum) as f32);
			}
		} else if !self.corpus_intensity.is_empty() {
			let uniform = 1.0 / self.corpus_intensity.len() as f32;
			for corpus in self.corpus_intensity.keys() {
				self.corpus_probability.insert(corpus.clone(), uniform);
			}
		}
	}

	pub fn rng_seed(&self) -> Option<u64> {
		self.rng_seed
	}

	/// Makes every generation with this input reproducible.
	pub fn set_rng_seed(&mut self, seed: u64) {
		self.rng_seed = Some(seed);
	}

	/// Goes back to OS-seeded generation.
	pub fn clear_rng_seed(&mut self) {
		self.rng_seed = None;
	}

	/// Returns an iterator over normalized corpus probabilities, ordered by name.
	pub fn corpus_probability(&self) -> impl Iterator<Item = (&str, f32)> {
		self.corpus_probability.iter().map(|(k, v)| (k.as_str(), *v))
	}

	/// Sets the intensity of a specific corpus and renormalizes.
	///
	/// # Errors
	/// - `UnknownCorpus` if the corpus does not exist.
	/// - `InvalidIntensity` if the value is negative or not finite.
	pub fn set_corpus_intensity(&mut self, corpus: &str, intensity: f32) -> Result<(), MarkovError> {
		if !intensity.is_finite() || intensity < 0.0 {
			return Err(MarkovError::InvalidIntensity(intensity));
		}
		let Some(current) = self.corpus_intensity.get_mut(corpus) else {
			return Err(MarkovError::UnknownCorpus(corpus.to_owned()));
		};
		*current = intensity;
		self.normalize();
		Ok(())
	}
}
