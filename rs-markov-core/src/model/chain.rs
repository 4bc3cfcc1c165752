use std::fmt;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::state::MarkovState;

/// Represents a variable-order Markov chain over symbols of type `T`.
///
/// The `MarkovChain` stores one `MarkovState` per training position: the
/// `degree` symbols preceding the position (the context) and the symbol found
/// at the position (the successor). Probabilities are computed empirically
/// from those records.
///
/// # Responsibilities
/// - Build the chain from one or more training sequences
/// - Answer probability and possibility queries for a context
/// - Sample successors proportionally to their probability
/// - Generate sequences by feeding each sampled symbol back into the context
///
/// # Invariants
/// - `states` only grows, in training order
/// - For a given context, probabilities summed once per distinct successor equal 1.0
/// - Identical `(context, successor)` records are kept and share a probability
///
/// # Randomness
/// Each chain owns a `StdRng`. Chains built with a seed (`new_seeded`,
/// `with_degree_seeded`) or reseeded with `reseed` generate reproducibly.
/// Every sampling operation also exists as a `_with` variant taking any
/// caller-supplied `Rng`, borrowing the chain immutably.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MarkovChain<T> {
	/// Context length used by the last training pass.
	degree: usize,

	/// Every observed (context, successor) record, in training order.
	states: Vec<MarkovState<T>>,

	/// Random source for sampling. Not serialized; a restored chain is reseeded from the OS.
	#[serde(skip, default = "os_rng")]
	rng: StdRng,
}

fn os_rng() -> StdRng {
	StdRng::from_os_rng()
}

impl<T: Clone + PartialEq> MarkovChain<T> {
	/// Creates a chain and immediately trains it on `dataset`.
	///
	/// # Notes
	/// - Training is quadratic in the number of states; large datasets take a while.
	/// - A dataset not longer than `degree` produces an empty chain.
	pub fn new(dataset: &[T], degree: usize) -> Self {
		let mut chain = Self::with_degree(degree);
		chain.append_chain(dataset, degree);
		chain
	}

	/// Same as `new`, with a reproducible random source.
	pub fn new_seeded(dataset: &[T], degree: usize, seed: u64) -> Self {
		let mut chain = Self::with_degree_seeded(degree, seed);
		chain.append_chain(dataset, degree);
		chain
	}

	/// Creates an empty chain awaiting training.
	pub fn with_degree(degree: usize) -> Self {
		Self::from_rng(degree, os_rng())
	}

	/// Creates an empty chain with a reproducible random source.
	pub fn with_degree_seeded(degree: usize, seed: u64) -> Self {
		Self::from_rng(degree, StdRng::seed_from_u64(seed))
	}

	fn from_rng(degree: usize, rng: StdRng) -> Self {
		Self {
			degree,
			states: Vec::new(),
			rng,
		}
	}

	/// Returns the degree of the last training pass.
	pub fn degree(&self) -> usize {
		self.degree
	}

	/// Returns every state, in training order.
	pub fn states(&self) -> &[MarkovState<T>] {
		&self.states
	}

	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Replaces the chain's random source with one seeded from `seed`.
	pub fn reseed(&mut self, seed: u64) {
		self.rng = StdRng::seed_from_u64(seed);
	}

	/// Appends the statistics of `dataset` to the chain.
	///
	/// # Behavior
	/// - Pass 1: for every position `i` with a full context behind it, records
	///   `dataset[i..i + degree]` followed by `dataset[i + degree]`.
	/// - Pass 2: recomputes the probability of *every* state, old and new, as
	///   the share of records with the same context that also have the same successor.
	///
	/// # Notes
	/// - The chain degree becomes `degree`, even if earlier passes used another one.
	/// - Inputs too short to hold a context are ignored.
	pub fn append_chain(&mut self, dataset: &[T], degree: usize) {
		self.degree = degree;

		let before = self.states.len();
		if dataset.len() > degree {
			for i in 0..dataset.len() - degree {
				let context = dataset[i..i + degree].to_vec();
				let successor = dataset[i + degree].clone();
				self.states.push(MarkovState::new(context, successor));
			}
		}

		self.assign_probabilities();

		debug!(
			"Appended {} states of degree {} ({} total)",
			self.states.len() - before,
			degree,
			self.states.len()
		);
	}

	/// Sets each state's probability to
	/// `count(same context and successor) / count(same context)`.
	fn assign_probabilities(&mut self) {
		let probabilities: Vec<f64> = self
			.states
			.iter()
			.map(|state| {
				let mut occurrences = 0usize;
				let mut hits = 0usize;
				for other in &self.states {
					if other.context() == state.context() {
						occurrences += 1;
						if other.successor() == state.successor() {
							hits += 1;
						}
					}
				}
				// occurrences >= 1, the state always matches itself
				hits as f64 / occurrences as f64
			})
			.collect();

		for (state, probability) in self.states.iter_mut().zip(probabilities) {
			state.set_probability(probability);
		}
	}

	/// Returns the probability that `context` is followed by `successor`.
	///
	/// The first state matching both the context and the successor wins.
	/// Returns 0.0 if the pair was never observed.
	pub fn probability_of(&self, context: &[T], successor: &T) -> f64 {
		self.states
			.iter()
			.find(|state| state.matches(context) && state.successor() == successor)
			.map_or(0.0, MarkovState::probability)
	}

	/// Returns every state recorded after `context`, in training order.
	pub fn possibilities(&self, context: &[T]) -> Vec<&MarkovState<T>> {
		possibilities(&self.states, context)
	}

	/// Returns the possibilities of `context`, most likely first.
	///
	/// Equal probabilities keep their training order.
	pub fn by_likely(&self, context: &[T]) -> Vec<&MarkovState<T>> {
		by_likely(&self.states, context)
	}

	/// Picks a successor of `context` using the chain's random source.
	///
	/// See `select_random_with`.
	pub fn select_random(&mut self, context: &[T]) -> Option<T> {
		sample(&self.states, context, &mut self.rng)
	}

	/// Picks a successor of `context`, weighted by probability.
	///
	/// A uniform draw in `[0, 1)` is consumed by the `by_likely` states until it
	/// drops to zero or below. If the possibilities run out first (unknown
	/// context, rounding), the successor of a random state from the whole
	/// chain is returned instead.
	///
	/// Returns `None` only if the chain has no states.
	pub fn select_random_with<R: Rng + ?Sized>(&self, context: &[T], rng: &mut R) -> Option<T> {
		sample(&self.states, context, rng)
	}

	/// Returns the context of a random state using the chain's random source.
	pub fn random_state(&mut self) -> Option<&[T]> {
		let index = random_index(self.states.len(), &mut self.rng)?;
		Some(self.states[index].context())
	}

	/// Returns the context of a uniformly chosen state, or `None` on an empty chain.
	pub fn random_state_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&[T]> {
		let index = random_index(self.states.len(), rng)?;
		Some(self.states[index].context())
	}

	/// Generates `count + 1` symbols starting from `seed`, using the chain's random source.
	pub fn select_random_sequence(&mut self, seed: &[T], count: usize) -> RandomSequence<'_, T, StdRng> {
		RandomSequence::new(&self.states, seed.to_vec(), count, &mut self.rng)
	}

	/// Generates `count + 1` symbols starting from `seed`.
	///
	/// The first symbol follows `seed`. Each next symbol follows `seed[1..]`
	/// with the symbol just emitted appended. The seed itself never moves, so
	/// for a degree above 1 the window keeps the seed's tail.
	///
	/// The sequence is lazy and draws fresh randomness as it goes; iterating
	/// twice gives different results unless the generator is reseeded.
	pub fn select_random_sequence_with<'a, R: Rng + ?Sized>(
		&'a self,
		seed: &[T],
		count: usize,
		rng: &'a mut R,
	) -> RandomSequence<'a, T, R> {
		RandomSequence::new(&self.states, seed.to_vec(), count, rng)
	}

	/// Same as `select_random_sequence`, starting from a random state chosen once.
	pub fn select_random_sequence_from_random_state(&mut self, count: usize) -> RandomSequence<'_, T, StdRng> {
		let seed = self.random_state().map(<[T]>::to_vec).unwrap_or_default();
		RandomSequence::new(&self.states, seed, count, &mut self.rng)
	}

	/// Same as `select_random_sequence_with`, starting from a random state chosen once.
	pub fn select_random_sequence_from_random_state_with<'a, R: Rng + ?Sized>(
		&'a self,
		count: usize,
		rng: &'a mut R,
	) -> RandomSequence<'a, T, R> {
		let seed = self.random_state_with(rng).map(<[T]>::to_vec).unwrap_or_default();
		RandomSequence::new(&self.states, seed, count, rng)
	}
}

/// Lists, one per line, each state's context followed by `| ` and its successor.
///
/// Meant for inspection only.
impl<T: fmt::Display> fmt::Display for MarkovChain<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for state in &self.states {
			for symbol in state.context() {
				write!(f, "{} ", symbol)?;
			}
			writeln!(f, "| {}", state.successor())?;
		}
		Ok(())
	}
}

fn possibilities<'a, T: PartialEq>(states: &'a [MarkovState<T>], context: &[T]) -> Vec<&'a MarkovState<T>> {
	states.iter().filter(|state| state.matches(context)).collect()
}

fn by_likely<'a, T: PartialEq>(states: &'a [MarkovState<T>], context: &[T]) -> Vec<&'a MarkovState<T>> {
	let mut likely = possibilities(states, context);
	// sort_by is stable
	likely.sort_by(|a, b| b.probability().total_cmp(&a.probability()));
	likely
}

fn random_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
	if len == 0 {
		return None;
	}
	Some(rng.random_range(0..len))
}

fn sample<T, R>(states: &[MarkovState<T>], context: &[T], rng: &mut R) -> Option<T>
where
	T: Clone + PartialEq,
	R: Rng + ?Sized,
{
	let mut p: f64 = rng.random();

	for state in by_likely(states, context) {
		p -= state.probability();
		if p <= 0.0 {
			return Some(state.successor().clone());
		}
	}

	trace!("Possibilities exhausted with {} left, falling back to a random state", p);
	let index = random_index(states.len(), rng)?;
	Some(states[index].successor().clone())
}

/// Lazy sequence returned by the `select_random_sequence*` family.
///
/// Yields `count + 1` symbols, or nothing if the chain is empty.
pub struct RandomSequence<'a, T, R: ?Sized> {
	states: &'a [MarkovState<T>],
	/// `seed[1..]`, the fixed prefix of every window after the first.
	tail: Vec<T>,
	window: Vec<T>,
	remaining: usize,
	rng: &'a mut R,
}

impl<'a, T: Clone, R: ?Sized> RandomSequence<'a, T, R> {
	fn new(states: &'a [MarkovState<T>], seed: Vec<T>, count: usize, rng: &'a mut R) -> Self {
		Self {
			states,
			tail: seed.get(1..).map(<[T]>::to_vec).unwrap_or_default(),
			window: seed,
			remaining: count.saturating_add(1),
			rng,
		}
	}

	/// Returns the context the next symbol will be drawn from.
	pub fn window(&self) -> &[T] {
		&self.window
	}
}

impl<T, R> Iterator for RandomSequence<'_, T, R>
where
	T: Clone + PartialEq,
	R: Rng + ?Sized,
{
	type Item = T;

	fn next(&mut self) -> Option<T> {
		if self.remaining == 0 {
			return None;
		}

		let Some(symbol) = sample(self.states, &self.window, self.rng) else {
			self.remaining = 0;
			return None;
		};
		self.remaining -= 1;

		// Next window is seed[1..] followed by the symbol just emitted
		if !self.window.is_empty() {
			self.window.clear();
			self.window.extend_from_slice(&self.tail);
			self.window.push(symbol.clone());
		}

		Some(symbol)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		if self.states.is_empty() {
			(0, Some(0))
		} else {
			(self.remaining, Some(self.remaining))
		}
	}
}
