use reader::error::ReaderError;
use reader::recall::{
    build_remaining_miss_stats, chunk_key, consume_recall_tokens, evaluate_word, is_detail_chunk,
    plan_scaffold_miss_continue, plan_scaffold_recall_submission,
    plan_scaffold_recall_transition, ConsumeRecallInput, ForfeitSet, RecallStats,
    RecallSubmission, RecallTransitionInput, ScaffoldRecallPlan, ScaffoldTransition,
};
use reader::tokenizer::{tokenize_recall, tokenize_rsvp, Chunk};
use rstest::rstest;

fn stats(total: u32, exact: u32, known: u32, detail_total: u32, detail_known: u32) -> RecallStats {
    RecallStats {
        total_words: total,
        exact_matches: exact,
        known_words: known,
        detail_total,
        detail_known,
    }
}

fn transition(is_known: bool, is_drill: bool, current_index: usize) -> RecallTransitionInput {
    RecallTransitionInput {
        is_known,
        is_exact: is_known,
        is_detail: true,
        is_drill,
        current_index,
        chunk_count: 3,
    }
}

#[test]
fn test_known_detail_word_advances() {
    let plan = plan_scaffold_recall_transition(transition(true, false, 0));
    assert_eq!(
        plan,
        ScaffoldTransition::Advance {
            next_index: 1,
            stats_delta: stats(1, 1, 1, 1, 1),
        }
    );
}

#[test]
fn test_last_chunk_finishes() {
    let plan = plan_scaffold_recall_transition(transition(true, false, 2));
    assert_eq!(
        plan,
        ScaffoldTransition::Finish {
            stats_delta: stats(1, 1, 1, 1, 1),
        }
    );
}

#[test]
fn test_miss_outside_drill_reprompts() {
    assert_eq!(
        plan_scaffold_recall_transition(transition(false, false, 1)),
        ScaffoldTransition::ShowMiss
    );
}

#[test]
fn test_drill_miss_advances_with_failure() {
    assert_eq!(
        plan_scaffold_recall_transition(transition(false, true, 1)),
        ScaffoldTransition::Advance {
            next_index: 2,
            stats_delta: stats(1, 0, 0, 1, 0),
        }
    );
}

#[test]
fn test_known_but_inexact() {
    let mut input = transition(true, false, 0);
    input.is_exact = false;
    input.is_detail = false;
    assert_eq!(
        plan_scaffold_recall_transition(input),
        ScaffoldTransition::Advance {
            next_index: 1,
            stats_delta: stats(1, 0, 1, 0, 0),
        }
    );
}

#[test]
fn test_chunk_keys() {
    let chunks = tokenize_recall("The cat sat.");
    let keys: Vec<String> = chunks
        .chunks
        .iter()
        .enumerate()
        .map(|(i, c)| chunk_key(c, i))
        .collect();
    assert_eq!(keys, vec!["0:0:0", "0:0:4", "0:0:8"]);

    let stream = tokenize_rsvp("The cat");
    assert_eq!(chunk_key(&stream[1], 1), "fallback:1");
}

#[rstest]
#[case("brown", "brown", true, true)]
#[case("Brown.", "brown", true, false)]
#[case("brown", "brwn", true, false)]
#[case("brown", "borwn", true, false)]
#[case("cat", "cot", false, false)]
#[case("don't", "don’t", true, true)]
#[case("brown", "", false, false)]
fn test_evaluate_word(
    #[case] expected: &str,
    #[case] typed: &str,
    #[case] known: bool,
    #[case] exact: bool,
) {
    let verdict = evaluate_word(expected, typed, false);
    assert_eq!(verdict.known, known, "{} vs {}", expected, typed);
    assert_eq!(verdict.exact, exact, "{} vs {}", expected, typed);
}

#[test]
fn test_detail_words_need_exact_spelling() {
    assert!(!evaluate_word("Lovelace", "Lovelase", true).known);
    assert!(evaluate_word("Lovelace", "lovelace", true).known);
    assert!(!evaluate_word("1843", "1834", true).known);
}

#[test]
fn test_detail_classification() {
    let chunks = tokenize_recall("Alice met Bob in 1999. Then NASA called.").chunks;
    let details: Vec<bool> = (0..chunks.len())
        .map(|i| is_detail_chunk(&chunks, i))
        .collect();
    // Alice and Then are sentence-initial
    assert_eq!(
        details,
        vec![false, false, true, false, true, false, true, false]
    );
}

fn cat_chunks() -> Vec<Chunk> {
    tokenize_recall("The cat sat.").chunks
}

#[test]
fn test_submission_advances_on_known_word() {
    let chunks = cat_chunks();
    let plan = plan_scaffold_recall_submission(RecallSubmission {
        chunks: &chunks,
        current_index: 1,
        typed: "cat",
        is_drill: false,
    })
    .unwrap();

    match plan {
        ScaffoldRecallPlan::Advance {
            next_index,
            stats_delta,
            scored,
        } => {
            assert_eq!(next_index, 2);
            assert_eq!(stats_delta, stats(1, 1, 1, 0, 0));
            assert_eq!(scored.key, "0:0:4");
            assert!(scored.correct);
        }
        other => panic!("expected advance, got {:?}", other),
    }
}

#[test]
fn test_submission_on_last_word_finishes() {
    let chunks = cat_chunks();
    let plan = plan_scaffold_recall_submission(RecallSubmission {
        chunks: &chunks,
        current_index: 2,
        typed: "sat",
        is_drill: false,
    })
    .unwrap();

    match plan {
        ScaffoldRecallPlan::Finish { final_word } => {
            assert_eq!(final_word.text, "sat.");
            assert_eq!(final_word.stats_delta, stats(1, 1, 1, 0, 0));
            assert!(final_word.scored().correct);
        }
        other => panic!("expected finish, got {:?}", other),
    }
}

#[test]
fn test_wrong_submission_shows_miss() {
    let chunks = cat_chunks();
    let plan = plan_scaffold_recall_submission(RecallSubmission {
        chunks: &chunks,
        current_index: 1,
        typed: " dog ",
        is_drill: true,
    })
    .unwrap();

    match plan {
        ScaffoldRecallPlan::ShowMiss { miss } => {
            assert_eq!(miss.index, 1);
            assert_eq!(miss.actual, "cat");
            assert_eq!(miss.predicted, "dog");
            assert!(!miss.is_detail);
        }
        other => panic!("expected miss, got {:?}", other),
    }
}

#[test]
fn test_submission_out_of_range() {
    let chunks = cat_chunks();
    let err = plan_scaffold_recall_submission(RecallSubmission {
        chunks: &chunks,
        current_index: 3,
        typed: "x",
        is_drill: false,
    })
    .unwrap_err();
    assert!(matches!(err, ReaderError::Sequencing(_)));
}

fn miss_at(chunks: &[Chunk], index: usize) -> reader::recall::RecallMiss {
    match plan_scaffold_recall_submission(RecallSubmission {
        chunks,
        current_index: index,
        typed: "wrong",
        is_drill: true,
    }) {
        Ok(ScaffoldRecallPlan::ShowMiss { miss }) => miss,
        other => panic!("expected miss, got {:?}", other),
    }
}

#[test]
fn test_miss_continue_in_drill() {
    let chunks = cat_chunks();

    let middle = plan_scaffold_miss_continue(&miss_at(&chunks, 1), chunks.len(), true).unwrap();
    match middle {
        ScaffoldRecallPlan::Advance {
            next_index,
            stats_delta,
            scored,
        } => {
            assert_eq!(next_index, 2);
            assert_eq!(stats_delta, stats(1, 0, 0, 0, 0));
            assert!(!scored.correct);
        }
        other => panic!("expected advance, got {:?}", other),
    }

    let last = plan_scaffold_miss_continue(&miss_at(&chunks, 2), chunks.len(), true).unwrap();
    match last {
        ScaffoldRecallPlan::Finish { final_word } => {
            assert!(!final_word.correct);
            assert_eq!(final_word.stats_delta.total_words, 1);
        }
        other => panic!("expected finish, got {:?}", other),
    }
}

#[test]
fn test_miss_continue_outside_drill_is_sequencing_error() {
    let chunks = cat_chunks();
    let err = plan_scaffold_miss_continue(&miss_at(&chunks, 1), chunks.len(), false).unwrap_err();
    assert!(matches!(err, ReaderError::Sequencing(_)));
}

fn quick_fox() -> Vec<Chunk> {
    tokenize_recall("the quick brown fox").chunks
}

#[test]
fn test_consume_tokens_in_order() {
    let chunks = quick_fox();
    let forfeited = ForfeitSet::default();
    let result = consume_recall_tokens(ConsumeRecallInput {
        chunks: &chunks,
        start_index: 0,
        tokens: &["the", "quick", "brwn"],
        stats: RecallStats::default(),
        forfeited_word_keys: &forfeited,
    });

    assert_eq!(result.next_index, 3);
    assert_eq!(result.stats, stats(3, 2, 3, 0, 0));
    assert_eq!(result.scored_words.len(), 3);
    assert!(result.scored_words.iter().all(|w| w.correct && !w.forfeited));
}

#[test]
fn test_consume_with_forfeit() {
    let chunks = quick_fox();
    let forfeited: ForfeitSet = ["0:0:4".to_string()].into_iter().collect();
    let result = consume_recall_tokens(ConsumeRecallInput {
        chunks: &chunks,
        start_index: 0,
        tokens: &["the", "quick", "brwn"],
        stats: RecallStats::default(),
        forfeited_word_keys: &forfeited,
    });

    assert_eq!(result.stats, stats(3, 1, 2, 0, 0));
    let quick = &result.scored_words[1];
    assert_eq!(quick.text, "quick");
    assert!(quick.forfeited);
    assert!(!quick.correct);
}

#[test]
fn test_consume_ignores_extra_tokens_and_resumes() {
    let chunks = quick_fox();
    let forfeited = ForfeitSet::default();
    let first = consume_recall_tokens(ConsumeRecallInput {
        chunks: &chunks,
        start_index: 0,
        tokens: &["the", "quick"],
        stats: RecallStats::default(),
        forfeited_word_keys: &forfeited,
    });
    let second = consume_recall_tokens(ConsumeRecallInput {
        chunks: &chunks,
        start_index: first.next_index,
        tokens: &["brown", "fox", "jumps", "over"],
        stats: first.stats,
        forfeited_word_keys: &forfeited,
    });

    assert_eq!(second.next_index, 4);
    assert_eq!(second.scored_words.len(), 2);
    assert_eq!(second.stats, stats(4, 4, 4, 0, 0));

    let past_end = consume_recall_tokens(ConsumeRecallInput {
        chunks: &chunks,
        start_index: 10,
        tokens: &["x"],
        stats: second.stats,
        forfeited_word_keys: &forfeited,
    });
    assert_eq!(past_end.next_index, 10);
    assert!(past_end.scored_words.is_empty());
    assert_eq!(past_end.stats, second.stats);
}

#[test]
fn test_remaining_misses() {
    let chunks = tokenize_recall("We met Alice today.").chunks;
    let base = stats(1, 1, 1, 0, 0);
    let result = build_remaining_miss_stats(&chunks, 1, base);
    assert_eq!(result, stats(4, 1, 1, 1, 0));
    assert!(result.is_consistent());

    assert_eq!(build_remaining_miss_stats(&chunks, 4, base), base);
    assert_eq!(build_remaining_miss_stats(&chunks, 9, base), base);
}

#[test]
fn test_stats_fold() {
    let deltas = [
        RecallStats::for_word(true, true, false),
        RecallStats::for_word(true, false, true),
        RecallStats::miss(true),
    ];
    let total: RecallStats = deltas.iter().copied().sum();
    assert_eq!(total, stats(3, 1, 2, 2, 1));

    let mut running = RecallStats::default();
    for d in deltas.iter().rev() {
        running += *d;
    }
    assert_eq!(running, total);
}
