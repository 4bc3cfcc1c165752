use log::info;
use rs_markov_core::corpus;
use rs_markov_core::model::chain::MarkovChain;
use rs_markov_core::model::generation_input::StartSeed;
use rs_markov_core::model::generator::Generator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // A chain over plain integers, trained on a single sequence.
    // The seed makes every run print the same thing.
    let dataset = [0, 1, 2, 3, 2, 4, 5, 6, 0, 1, 7, 8, 9, 10];
    let mut numbers = MarkovChain::new_seeded(&dataset, 1, 2024);
    print!("{}", numbers);

    println!("P(3 | 2) = {}", numbers.probability_of(&[2], &3));
    for state in numbers.by_likely(&[1]) {
        println!("1 -> {} ({})", state.successor(), state.probability());
    }

    let walk: Vec<i32> = numbers.select_random_sequence(&[0], 8).collect();
    println!("Walk from 0: {:?}", walk);

    // Unknown contexts fall back to any observed successor
    println!("After 42: {:?}", numbers.select_random(&[42]));

    // A character-level chain, extended in two passes
    let mut letters = MarkovChain::with_degree(2);
    letters.append_chain(&corpus::chars("abracadabra"), 2);
    letters.append_chain(&corpus::chars("cadabra abracadabra"), 2);
    let spell: String = letters.select_random_sequence_from_random_state(15).collect();
    info!("Trained {} letter states", letters.len());
    println!("Spell: {}", spell);

    // Load all corpora from the "data" directory (.txt files), two words of context
    let generator = Generator::from_folder("./data", 2)?;
    println!("Corpora: {:?}", generator.corpus_names());

    let mut input = generator.make_generation_input();

    // Number of words generated after the first one
    input.count = 12;

    // Start seed can be set to
    // 'Random' to start from a random context of the chosen corpus
    // 'Custom' to start from a given context (as many words as the degree)
    input.start_seed = StartSeed::Random;

    // Set the intensity for each corpus (not normalized; will be computed in 'corpus_probability')
    input.set_corpus_intensity("sea", 100.0)?;
    input.set_corpus_intensity("forest", 50.0)?;

    // Attempting to set intensity for a non-existent corpus
    match input.set_corpus_intensity("unknown", 1.0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{}", e),
    }

    for (name, prob) in input.corpus_probability() {
        println!("{}: {}", name, prob);
    }

    // Generate 5 lines using the input settings
    for i in 0..5 {
        println!("Generated line {}: {}", i + 1, corpus::join_words(&generator.generate(&input)?));
    }

    // Same seed, same line
    input.set_rng_seed(7);
    input.start_seed = StartSeed::Custom(vec!["the".to_owned(), "tide".to_owned()]);
    input.set_corpus_intensity("forest", 0.0)?;
    println!("Seeded: {}", corpus::join_words(&generator.generate(&input)?));

    Ok(())
}
