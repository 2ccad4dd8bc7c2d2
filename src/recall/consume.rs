use super::matching::{evaluate_word, is_detail_chunk};
use super::stats::{apply_stats_delta, RecallStats};
use super::word::{chunk_key, ScoredWord};
use crate::tokenizer::Chunk;
use fnv::FnvHashSet;

/// Position keys whose credit is zeroed. Owned by the caller across calls.
pub type ForfeitSet = FnvHashSet<String>;

#[derive(Debug, Clone, Copy)]
pub struct ConsumeRecallInput<'a> {
    pub chunks: &'a [Chunk],
    pub start_index: usize,
    pub tokens: &'a [&'a str],
    pub stats: RecallStats,
    pub forfeited_word_keys: &'a ForfeitSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumeRecallResult {
    pub stats: RecallStats,
    pub next_index: usize,
    pub scored_words: Vec<ScoredWord>,
}

/// Bulk scoring for free-typed input: one token per remaining chunk, in order.
///
/// Extra tokens past the last chunk are ignored. A forfeited key still
/// counts towards the totals but never earns credit.
pub fn consume_recall_tokens(input: ConsumeRecallInput<'_>) -> ConsumeRecallResult {
    let ConsumeRecallInput {
        chunks,
        start_index,
        tokens,
        mut stats,
        forfeited_word_keys,
    } = input;

    let remaining = chunks.len().saturating_sub(start_index);
    let mut scored_words = Vec::with_capacity(remaining.min(tokens.len()));

    for (offset, typed) in tokens.iter().take(remaining).enumerate() {
        let index = start_index + offset;
        let chunk = &chunks[index];
        let key = chunk_key(chunk, index);
        let is_detail = is_detail_chunk(chunks, index);
        let forfeited = forfeited_word_keys.contains(&key);

        let verdict = evaluate_word(&chunk.text, typed, is_detail);
        let known = verdict.known && !forfeited;
        let exact = verdict.exact && !forfeited;

        stats = apply_stats_delta(stats, RecallStats::for_word(known, exact, is_detail));
        scored_words.push(ScoredWord {
            key,
            text: chunk.text.clone(),
            correct: known,
            forfeited,
        });
    }

    ConsumeRecallResult {
        stats,
        next_index: start_index + scored_words.len(),
        scored_words,
    }
}

/// Stats after abandoning at `current_index`: every remaining chunk is a miss.
pub fn build_remaining_miss_stats(
    chunks: &[Chunk],
    current_index: usize,
    stats: RecallStats,
) -> RecallStats {
    (current_index..chunks.len())
        .map(|i| RecallStats::miss(is_detail_chunk(chunks, i)))
        .fold(stats, apply_stats_delta)
}
