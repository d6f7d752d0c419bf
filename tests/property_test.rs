//! Property checks over random corpora and pattern tables.

use motif_dict::{
    codec::{parse_dictionary, render_dictionary},
    compute::{
        Corpus, OccurrenceEncoder, delta_decode, delta_encode, extract_alphabet,
        evolution::{PatternRng, discover, fitness},
        produce_residual, reconstruct,
    },
    schema::{DiscoveryConfig, MAX_PATTERN_LEN, MIN_PATTERN_LEN, Pattern},
};
use proptest::prelude::*;

fn table_strategy() -> impl Strategy<Value = Vec<Pattern>> {
    prop::collection::vec("[AB ]{2,4}", 1..6)
        .prop_map(|strings| strings.iter().map(|s| s.parse().unwrap()).collect())
}

proptest! {
    #[test]
    fn alphabet_lists_each_symbol_once_in_order(text in "[ACGT \n\r]{1,200}") {
        prop_assume!(text.chars().any(|c| c != '\n' && c != '\r'));
        let alphabet = extract_alphabet(&text).unwrap();

        let mut expected = Vec::new();
        for c in text.chars() {
            if c != '\n' && c != '\r' && !expected.contains(&c) {
                expected.push(c);
            }
        }
        prop_assert_eq!(alphabet.symbols(), expected.as_slice());
    }

    #[test]
    fn deltas_rebuild_increasing_offsets(mut offsets in prop::collection::vec(0u64..10_000, 0..50)) {
        offsets.sort_unstable();
        offsets.dedup();

        let deltas = delta_encode(&offsets);
        prop_assert!(deltas.iter().skip(1).all(|&d| d > 0));
        prop_assert_eq!(delta_decode(&deltas), offsets);
    }

    #[test]
    fn claimed_spans_never_overlap(text in "[AB \n]{0,150}", table in table_strategy()) {
        let mut corpus = Corpus::new(&text);
        let mut encoder = OccurrenceEncoder::new(&mut corpus);
        let entries = encoder.encode_table(&table);
        let masked = encoder.masked();

        let covered: usize = entries.iter().map(|e| e.covered_symbols()).sum();
        prop_assert_eq!(covered, masked);
        prop_assert_eq!(corpus.masked_count(), masked);
        prop_assert!(masked <= corpus.len());
    }

    #[test]
    fn residual_and_dictionary_rebuild_corpus(text in "[AB \n]{0,150}", table in table_strategy()) {
        let mut corpus = Corpus::new(&text);
        let entries = OccurrenceEncoder::new(&mut corpus).encode_table(&table);
        let residual = produce_residual(&corpus);

        let dictionary = render_dictionary(&entries);
        let parsed = parse_dictionary(&dictionary, &table).unwrap();
        prop_assert_eq!(&parsed, &entries);
        prop_assert_eq!(reconstruct(&residual, &parsed).unwrap(), text);
    }

    #[test]
    fn discovered_patterns_are_well_formed(text in "[ACGT]{1,80}", seed in any::<u64>()) {
        let alphabet = extract_alphabet(&text).unwrap();
        let corpus = Corpus::new(&text);
        let config = DiscoveryConfig::default();

        let result = discover(&config, &alphabet, &corpus, &mut PatternRng::new(seed));

        prop_assert_eq!(result.table.len(), config.table_capacity);
        prop_assert_eq!(result.accepted.len(), config.table_capacity);
        for pattern in &result.table {
            prop_assert!((MIN_PATTERN_LEN..=MAX_PATTERN_LEN).contains(&pattern.len()));
            prop_assert!(pattern.is_over(&alphabet));
        }
    }

    #[test]
    fn extra_occurrence_never_lowers_fitness(text in "[AB]{0,100}", pattern in "[AB]{2,4}") {
        let pattern: Pattern = pattern.parse().unwrap();
        let planted = format!("{text}X{pattern}");

        let before = fitness(&pattern, &Corpus::new(&text), &[]);
        let after = fitness(&pattern, &Corpus::new(&planted), &[]);
        prop_assert!(after >= before, "{} < {}", after, before);
        prop_assert!(after > 0.0);
    }

    #[test]
    fn longer_pattern_with_same_count_never_scores_lower(short in "[AB]{2,3}", copies in 1usize..20) {
        let long = format!("{short}C");
        let text = format!("{long}X").repeat(copies);
        let corpus = Corpus::new(&text);
        let short: Pattern = short.parse().unwrap();
        let long: Pattern = long.parse().unwrap();

        prop_assert_eq!(corpus.count_occurrences(short.symbols()), copies);
        prop_assert_eq!(corpus.count_occurrences(long.symbols()), copies);
        prop_assert!(fitness(&long, &corpus, &[]) >= fitness(&short, &corpus, &[]));
    }

    #[test]
    fn related_table_entries_halve_fitness(text in "[AB]{0,100}", pattern in "[AB]{2,4}") {
        let corpus = Corpus::new(&text);
        let pattern: Pattern = pattern.parse().unwrap();

        let alone = fitness(&pattern, &corpus, &[]);
        let penalized = fitness(&pattern, &corpus, std::slice::from_ref(&pattern));
        prop_assert!((penalized - alone * 0.5).abs() < 1e-9);
        prop_assert!(alone >= 0.0);
    }
}
