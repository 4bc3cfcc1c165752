use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::corpus;
use crate::error::MarkovError;
use crate::io;
use crate::model::chain::MarkovChain;
use crate::model::generation_input::{GenerationInput, StartSeed};

/// Extension of corpus files picked up by `Generator::from_folder`.
pub const CORPUS_EXTENSION: &str = "txt";

/// High-level generator managing one word-level chain per corpus.
///
/// # Responsibilities
/// - Load corpora from disk or memory and train a chain for each
/// - Provide weighted corpus selection using `GenerationInput` probabilities
/// - Generate word sequences with seed control
#[derive(Debug)]
pub struct Generator {
	degree: usize,
	chains: BTreeMap<String, MarkovChain<String>>,
}

impl Generator {
	/// Creates an empty generator whose chains will use `degree` words of context.
	pub fn new(degree: usize) -> Self {
		Self {
			degree,
			chains: BTreeMap::new(),
		}
	}

	/// Creates a generator by loading every `.txt` corpus in a directory.
	///
	/// # Behavior
	/// - Both `"folder"` and `"folder/"` are accepted, `"."` is the working directory.
	/// - The corpus name is the file name without extension.
	/// - Subdirectories are ignored.
	///
	/// # Errors
	/// - `NotADirectory` if the path does not exist or is not a directory.
	/// - `Io` if a corpus cannot be read.
	pub fn from_folder<P: AsRef<Path>>(folder: P, degree: usize) -> Result<Self, MarkovError> {
		let mut generator = Self::new(degree);

		let string_path = folder
			.as_ref()
			.to_str()
			.ok_or_else(|| MarkovError::InvalidPath(folder.as_ref().to_path_buf()))?;
		let folder = io::normalize_folder(string_path);

		if !folder.is_dir() {
			return Err(MarkovError::NotADirectory(folder));
		}

		for path in io::list_files(&folder, CORPUS_EXTENSION)? {
			generator.load_corpus(&path)?;
		}

		debug!("Loaded {} corpora from {}", generator.chains.len(), folder.display());
		Ok(generator)
	}

	/// Loads a corpus file, named after its stem.
	fn load_corpus(&mut self, path: &Path) -> Result<(), MarkovError> {
		let name = io::get_filename(path)?;
		trace!("Loading corpus {} from {}", name, path.display());
		let text = io::read_file(path)?;
		self.add_corpus(&name, &text)
	}

	/// Trains a chain on `text` and registers it under `name`.
	///
	/// # Errors
	/// Returns `DuplicateCorpus` if the name is already taken.
	pub fn add_corpus(&mut self, name: &str, text: &str) -> Result<(), MarkovError> {
		if self.chains.contains_key(name) {
			return Err(MarkovError::DuplicateCorpus(name.to_owned()));
		}

		let chain = MarkovChain::new(&corpus::words(text), self.degree);
		debug!("Corpus {} trained with {} states", name, chain.len());
		self.chains.insert(name.to_owned(), chain);
		Ok(())
	}

	pub fn degree(&self) -> usize {
		self.degree
	}

	/// Returns the loaded corpus names, sorted.
	pub fn corpus_names(&self) -> Vec<String> {
		self.chains.keys().cloned().collect()
	}

	/// Returns the chain trained for `name`.
	pub fn chain(&self, name: &str) -> Option<&MarkovChain<String>> {
		self.chains.get(name)
	}

	/// Creates a new `GenerationInput` with default intensity for all corpora.
	pub fn make_generation_input(&self) -> GenerationInput<String> {
		GenerationInput::new(self.chains.keys().map(|name| (name.clone(), 0.0)).collect())
	}

	/// Picks a corpus name, weighted by the input probabilities.
	///
	/// Each candidate gets the key `u^(1/weight)` with `u` uniform in `[0, 1)`;
	/// the highest key wins. Corpora with a zero weight are never picked.
	pub fn pick_corpus<R: Rng + ?Sized>(&self, generation_input: &GenerationInput<String>, rng: &mut R) -> Option<String> {
		generation_input
			.corpus_probability()
			.filter(|(name, weight)| *weight > 0.0 && self.chains.contains_key(*name))
			.map(|(name, weight)| {
				let u: f64 = rng.random();
				(name, u.powf(1.0 / weight as f64))
			})
			.max_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(name, _)| name.to_owned())
	}

	/// Generates `count + 1` words from a weighted random corpus.
	///
	/// # Errors
	/// - `NoCorpus` if nothing can be picked.
	/// - `EmptyChain` if the picked corpus was too short to train on.
	/// - `SeedLength` if a custom seed does not match the degree.
	pub fn generate(&self, generation_input: &GenerationInput<String>) -> Result<Vec<String>, MarkovError> {
		let mut rng = match generation_input.rng_seed() {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};

		let name = self.pick_corpus(generation_input, &mut rng).ok_or(MarkovError::NoCorpus)?;
		let chain = self.chains.get(&name).ok_or_else(|| MarkovError::UnknownCorpus(name.clone()))?;
		if chain.is_empty() {
			return Err(MarkovError::EmptyChain(name));
		}

		let seed = match &generation_input.start_seed {
			StartSeed::Random => chain
				.random_state_with(&mut rng)
				.map(<[String]>::to_vec)
				.ok_or_else(|| MarkovError::EmptyChain(name.clone()))?,
			StartSeed::Custom(seed) => {
				if seed.len() != chain.degree() {
					return Err(MarkovError::SeedLength {
						expected: chain.degree(),
						found: seed.len(),
					});
				}
				seed.iter().map(|word| word.to_lowercase()).collect()
			}
		};

		trace!("Generating {} words from corpus {}", generation_input.count + 1, name);
		Ok(chain.select_random_sequence_with(&seed, generation_input.count, &mut rng).collect())
	}
}
