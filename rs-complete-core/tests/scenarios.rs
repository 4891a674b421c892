use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_complete_core::model::token_table::{is_prime, next_prime};
use rs_complete_core::model::{Model, build_model, extend_model, walk};

const BOUNDARY: &str = "[]";

fn tokens(items: &[&str]) -> Vec<String> {
	items.iter().map(|s| (*s).to_owned()).collect()
}

fn successor_counts(model: &Model<String>, value: &str) -> HashMap<Option<String>, usize> {
	let mut counts = HashMap::new();
	for successor in model.find_node(value).expect("node should exist").successors() {
		*counts.entry(model.resolve(*successor).cloned()).or_insert(0) += 1;
	}
	counts
}

fn collect(model: &Model<String>, seed: &str, rng_seed: u64) -> Vec<String> {
	model
		.walk_with_rng(seed, StdRng::seed_from_u64(rng_seed))
		.cloned()
		.collect()
}

#[test]
fn two_sentences_sharing_a_start() {
	let model = build_model(
		tokens(&["hello", "world", ".", "[]", "hello", "there", ".", "[]"]),
		BOUNDARY,
	);

	let counts = successor_counts(&model, "hello");
	assert_eq!(counts.len(), 2);
	assert_eq!(counts.get(&Some("world".to_owned())), Some(&1));
	assert_eq!(counts.get(&Some("there".to_owned())), Some(&1));

	let mut outcomes = HashMap::new();
	for seed in 0..200 {
		let walked = collect(&model, "hello", seed);
		assert!(
			walked == ["hello", "world", "."] || walked == ["hello", "there", "."],
			"unexpected walk {walked:?}"
		);
		*outcomes.entry(walked[1].clone()).or_insert(0) += 1;
	}
	assert_eq!(outcomes.len(), 2);
}

#[test]
fn sampling_converges_to_even_split() {
	let model = build_model(tokens(&["a", "b", "[]", "a", "c", "[]"]), BOUNDARY);

	let mut rng = StdRng::seed_from_u64(2024);
	let draws = 4000;
	let mut b_count = 0;
	for _ in 0..draws {
		let walked: Vec<&String> = model.walk_with_rng("a", &mut rng).collect();
		match walked[1].as_str() {
			"b" => b_count += 1,
			"c" => (),
			other => panic!("unexpected token {other}"),
		}
		assert_eq!(walked.len(), 2);
	}

	// Expected 2000
	assert!((1800..2200).contains(&b_count), "got {b_count}");
}

#[test]
fn one_word_sentence_with_terminator() {
	let model = build_model(tokens(&["x", ".", "[]"]), BOUNDARY);
	assert_eq!(collect(&model, "x", 0), ["x", "."]);
}

#[test]
fn empty_input_gives_empty_walks() {
	let model = build_model(Vec::<String>::new(), BOUNDARY);
	assert!(model.is_empty());
	assert_eq!(walk(&model, "anything").count(), 0);
}

#[test]
fn only_boundaries_give_empty_model() {
	let model = build_model(tokens(&["[]", "[]", "[]"]), BOUNDARY);
	assert!(model.is_empty());
	assert_eq!(walk(&model, BOUNDARY).count(), 0);
}

#[test]
fn single_token_sentence_emits_once() {
	let model = build_model(tokens(&["solo", "[]"]), BOUNDARY);
	assert_eq!(collect(&model, "solo", 7), ["solo"]);
}

#[test]
fn extending_repeats_observations() {
	let input = tokens(&["a", "b", "c", "[]"]);
	let mut model = build_model(input.clone(), BOUNDARY);
	extend_model(&mut model, input, BOUNDARY);

	assert_eq!(successor_counts(&model, "a"), HashMap::from([(Some("b".to_owned()), 2)]));
	for seed in 0..20 {
		assert_eq!(collect(&model, "a", seed), ["a", "b", "c"]);
	}
}

#[test]
fn training_twice_doubles_every_successor_list() {
	let input = tokens(&[
		"the", "cat", "sat", "on", "the", "mat.", "[]", "the", "dog", "sat", "[]", "[]", "on", "the", "cat", "again",
	]);
	let once = build_model(input.clone(), BOUNDARY);
	let mut twice = build_model(input.clone(), BOUNDARY);
	extend_model(&mut twice, input, BOUNDARY);

	assert_eq!(once.len(), twice.len());
	for node in once.nodes() {
		let first = successor_counts(&once, node.value());
		let second = successor_counts(&twice, node.value());
		let doubled: HashMap<Option<String>, usize> =
			first.into_iter().map(|(k, v)| (k, v * 2)).collect();
		assert_eq!(second, doubled, "successors of {}", node.value());
	}
}

#[test]
fn successor_count_matches_observed_transitions() {
	let input = tokens(&["a", "b", "[]", "a", "[]", "[]", "b", "a", "b"]);
	let model = build_model(input, BOUNDARY);

	// a -> b, a -> [], a -> [], a -> b
	assert_eq!(model.find_node("a").map(|n| n.successors().len()), Some(4));
	// b -> [], b -> a
	assert_eq!(model.find_node("b").map(|n| n.successors().len()), Some(2));
}

#[test]
fn long_chain_grows_the_table_and_walks_in_order() {
	let count = 2000;
	let input: Vec<String> = (0..count).map(|i| format!("token_{i}")).collect();
	let model = build_model(input.clone(), BOUNDARY);

	let mut expected_capacity = 101;
	for size in 1..=count {
		if size > expected_capacity / 2 {
			expected_capacity = next_prime(4 * size);
		}
	}

	assert_eq!(model.len(), count);
	assert_eq!(model.capacity(), expected_capacity);
	assert!(is_prime(model.capacity()));
	assert!(model.len() <= model.capacity() / 2);

	assert_eq!(collect(&model, "token_0", 11), input);
	assert!(model.find_node("token_1999").map(|n| n.successors().is_empty()).unwrap_or(false));
}

#[test]
fn every_distinct_token_has_one_node() {
	let input = tokens(&["x", "y", "x", "z", "[]", "y", "y", "[]", "z"]);
	let model = build_model(input, BOUNDARY);

	let mut values: Vec<&String> = model.nodes().map(|n| n.value()).collect();
	values.sort();
	assert_eq!(values, ["x", "y", "z"]);
	assert!(model.find_node(BOUNDARY).is_none());
}
