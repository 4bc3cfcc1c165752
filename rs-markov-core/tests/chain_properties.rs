use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::{MarkovChain, MarkovState};

/// Folds arbitrary bytes into a small alphabet so that contexts repeat.
fn small_alphabet(dataset: &[u8]) -> Vec<u8> {
	dataset.iter().map(|b| b % 4).collect()
}

/// Index of a state in the chain, by identity.
fn position(chain: &MarkovChain<u8>, state: &MarkovState<u8>) -> usize {
	chain
		.states()
		.iter()
		.position(|s| std::ptr::eq(s, state))
		.expect("state belongs to the chain")
}

#[quickcheck]
fn state_count_matches_degree(dataset: Vec<u8>, degree: u8) -> bool {
	let degree = (degree % 8) as usize;
	let chain = MarkovChain::new(&dataset, degree);
	chain.len() == dataset.len().saturating_sub(degree)
}

#[quickcheck]
fn probabilities_sum_to_one_per_context(dataset: Vec<u8>, degree: u8) -> bool {
	let dataset = small_alphabet(&dataset);
	let chain = MarkovChain::new(&dataset, (degree % 3) as usize);

	chain.states().iter().all(|state| {
		let mut seen: Vec<u8> = Vec::new();
		let mut total = 0.0;
		for possibility in chain.possibilities(state.context()) {
			if !seen.contains(possibility.successor()) {
				seen.push(*possibility.successor());
				total += possibility.probability();
			}
		}
		(total - 1.0_f64).abs() < 1e-9
	})
}

#[quickcheck]
fn sequence_length_is_count_plus_one(dataset: Vec<u8>, degree: u8, count: u8, seed: u64) -> TestResult {
	let degree = (degree % 3) as usize;
	if dataset.len() <= degree {
		return TestResult::discard();
	}

	let dataset = small_alphabet(&dataset);
	let mut chain = MarkovChain::new_seeded(&dataset, degree, seed);
	let start = dataset[..degree].to_vec();
	let count = count as usize;

	TestResult::from_bool(
		chain.select_random_sequence(&start, count).count() == count + 1
			&& chain.select_random_sequence_from_random_state(count).count() == count + 1,
	)
}

#[quickcheck]
fn by_likely_is_a_stable_descending_permutation(dataset: Vec<u8>, degree: u8) -> bool {
	let dataset = small_alphabet(&dataset);
	let chain = MarkovChain::new(&dataset, (degree % 3) as usize);

	chain.states().iter().all(|state| {
		let possibilities = chain.possibilities(state.context());
		let likely = chain.by_likely(state.context());

		let same_members = likely.len() == possibilities.len()
			&& likely.iter().all(|l| possibilities.iter().any(|p| std::ptr::eq(*l, *p)));
		let ordered = likely.windows(2).all(|pair| {
			let (a, b) = (pair[0], pair[1]);
			a.probability() > b.probability()
				|| (a.probability() == b.probability() && position(&chain, a) < position(&chain, b))
		});

		same_members && ordered && likely == chain.by_likely(state.context())
	})
}

#[quickcheck]
fn selection_stays_within_observed_successors(dataset: Vec<u8>, seed: u64) -> TestResult {
	if dataset.len() < 2 {
		return TestResult::discard();
	}

	let dataset = small_alphabet(&dataset);
	let chain = MarkovChain::new(&dataset, 1);
	let mut rng = StdRng::seed_from_u64(seed);

	let context = [dataset[0]];
	let symbol = chain.select_random_with(&context, &mut rng).expect("chain is not empty");
	TestResult::from_bool(chain.possibilities(&context).iter().any(|s| *s.successor() == symbol))
}

#[test_log::test]
fn unseen_context_falls_back_without_failing() {
	let mut chain = MarkovChain::new_seeded(&[1, 2, 3, 1, 2, 4], 2, 99);
	let successors = [3, 1, 2, 4];
	for _ in 0..100 {
		let symbol = chain.select_random(&[9, 9]).expect("chain is not empty");
		assert!(successors.contains(&symbol));
	}
}

#[test_log::test]
fn chain_survives_serialization() {
	let chain = MarkovChain::new(&[0, 1, 2, 3, 2, 4, 5, 6, 0, 1, 7, 8, 9, 10], 2);
	let bytes = postcard::to_stdvec(&chain).expect("serialization");
	let restored: MarkovChain<i32> = postcard::from_bytes(&bytes).expect("deserialization");

	assert_eq!(restored.degree(), 2);
	assert_eq!(restored.states(), chain.states());
	assert_eq!(restored.probability_of(&[0, 1], &7), 0.5);
}
