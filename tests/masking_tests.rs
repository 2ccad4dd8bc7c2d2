use reader::masking::{mask_generation_line, MaskDifficulty};
use rstest::rstest;
use std::collections::HashSet;

const SENTENCE: &str = "We discussed entropy with Alice and NASA in 2026.";

fn tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

fn mask_count(token: &str) -> usize {
    token.chars().filter(|&c| c == '_').count()
}

#[rstest]
#[case(MaskDifficulty::Normal, 2, 1)]
#[case(MaskDifficulty::Hard, 3, 2)]
fn test_exemptions_and_budgets(
    #[case] difficulty: MaskDifficulty,
    #[case] discussed_masks: usize,
    #[case] entropy_masks: usize,
) {
    for seed in 0..8u64 {
        let masked = mask_generation_line(SENTENCE, difficulty, seed, 0);
        let original = tokens(SENTENCE);
        let out = tokens(&masked);
        assert_eq!(out.len(), original.len());

        for kept in [0, 3, 4, 5, 6, 7, 8] {
            assert_eq!(out[kept], original[kept], "seed {} token {}", seed, kept);
        }

        assert_eq!(mask_count(out[1]), discussed_masks, "{}", out[1]);
        assert_eq!(mask_count(out[2]), entropy_masks, "{}", out[2]);

        // first and last letters stay visible
        assert!(out[1].starts_with('d') && out[1].ends_with('d'));
        assert!(out[2].starts_with('e') && out[2].ends_with('y'));
    }
}

#[rstest]
#[case(MaskDifficulty::Normal, 0)]
#[case(MaskDifficulty::Hard, 1)]
fn test_three_letter_words(#[case] difficulty: MaskDifficulty, #[case] masks: usize) {
    let line = "the sun melted ice after war";
    for seed in 0..4u64 {
        let masked = mask_generation_line(line, difficulty, seed, 0);
        let out = tokens(&masked);
        assert_eq!(out[0], "the");
        for (i, word) in [(1, "sun"), (3, "ice"), (5, "war")] {
            assert_eq!(mask_count(out[i]), masks, "seed {}: {}", seed, masked);
            if masks == 0 {
                assert_eq!(out[i], word);
            }
        }
    }
    assert_eq!(mask_generation_line("sun", MaskDifficulty::Hard, 0, 0), "s_n");
}

#[test]
fn test_masking_is_deterministic() {
    for seed in [0u64, 1, 42, u64::MAX] {
        let a = mask_generation_line(SENTENCE, MaskDifficulty::Hard, seed, 3);
        let b = mask_generation_line(SENTENCE, MaskDifficulty::Hard, seed, 3);
        assert_eq!(a, b);
    }
}

#[test]
fn test_seed_and_line_index_change_the_mask() {
    let by_seed: HashSet<String> = (0..12u64)
        .map(|seed| mask_generation_line(SENTENCE, MaskDifficulty::Normal, seed, 0))
        .collect();
    assert!(by_seed.len() > 1);

    let by_line: HashSet<String> = (0..12usize)
        .map(|line| mask_generation_line(SENTENCE, MaskDifficulty::Normal, 7, line))
        .collect();
    assert!(by_line.len() > 1);
}

#[test]
fn test_no_adjacent_masks_on_hard() {
    let line = "Considerable uncertainty surrounded the extraordinarily complicated negotiations";
    for seed in 0..24u64 {
        let masked = mask_generation_line(line, MaskDifficulty::Hard, seed, 1);
        assert!(!masked.contains("__"), "seed {}: {}", seed, masked);
        for (orig, out) in tokens(line).iter().zip(tokens(&masked)) {
            let letters = orig.chars().filter(|c| c.is_alphabetic()).count();
            let cap = (letters as f64 * 0.40).floor() as usize;
            assert!(mask_count(out) <= cap.max(1), "{} -> {}", orig, out);
        }
    }
}

#[test]
fn test_heading_line_masks_lone_capitalised_words() {
    let masked = mask_generation_line("The Rise of Ada Lovelace", MaskDifficulty::Normal, 5, 0);
    let out = tokens(&masked);
    assert_eq!(out[0], "The");
    assert_ne!(out[1], "Rise");
    assert_eq!(mask_count(out[1]), 1);
    assert_eq!(out[2], "of");
    assert_eq!(out[3], "Ada");
    assert_eq!(out[4], "Lovelace");
}

#[test]
fn test_sentence_initial_capitals_are_not_names() {
    let masked = mask_generation_line("Entropy rises slowly.", MaskDifficulty::Normal, 2, 0);
    assert_ne!(tokens(&masked)[0], "Entropy");
}

#[test]
fn test_internal_capitals_are_always_names() {
    let masked = mask_generation_line("McDonald opened stores", MaskDifficulty::Hard, 2, 0);
    assert_eq!(tokens(&masked)[0], "McDonald");
}

#[rstest]
#[case("we go to an ox")]
#[case("")]
#[case("   ")]
#[case("1984 2001 3.14")]
fn test_nothing_to_mask(#[case] line: &str) {
    assert_eq!(mask_generation_line(line, MaskDifficulty::Hard, 11, 0), line);
}

#[test]
fn test_punctuation_and_hyphens_survive() {
    let line = "\"Remarkable,\" she said; the state-of-the-art machinery (finally) worked!";
    let masked = mask_generation_line(line, MaskDifficulty::Hard, 4, 0);

    let strip = |s: &str| -> String { s.chars().filter(|c| !c.is_alphabetic() && *c != '_').collect() };
    assert_eq!(strip(&masked), strip(line));
    assert_eq!(masked.chars().count(), line.chars().count());
    assert!(masked.contains("-of-the-"));

    let compound = mask_generation_line("a sun-dried tomato", MaskDifficulty::Hard, 4, 0);
    assert!(compound.starts_with("a s_n-"), "{}", compound);
}
