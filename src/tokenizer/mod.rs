pub mod flow;
pub mod orp;
pub mod types;

pub use self::flow::{flow_text_into_lines, word_spans};
pub use self::orp::orp_index;
pub use self::types::{
    is_break_chunk, Chunk, LineType, SaccadeInfo, SaccadeLine, SaccadePage, Tokenized,
};

use crate::config::FlowParams;
use tracing::debug;

/// One chunk per non-blank line at the default 80-char / 10-line layout.
pub fn tokenize_saccade(text: &str) -> Tokenized {
    tokenize_saccade_with(text, &FlowParams::default())
}

/// One chunk per word at the default 80-char / 10-line layout.
pub fn tokenize_recall(text: &str) -> Tokenized {
    tokenize_recall_with(text, &FlowParams::default())
}

pub fn tokenize_saccade_with(text: &str, params: &FlowParams) -> Tokenized {
    build_pages(text, params, |line, page_index, line_index| {
        vec![Chunk {
            text: line.text.clone(),
            word_count: line.text.split_whitespace().count(),
            orp_index: 0,
            saccade: Some(SaccadeInfo {
                page_index,
                line_index,
                start_char: 0,
                end_char: line.text.chars().count(),
            }),
        }]
    })
}

pub fn tokenize_recall_with(text: &str, params: &FlowParams) -> Tokenized {
    build_pages(text, params, |line, page_index, line_index| {
        word_spans(&line.text)
            .into_iter()
            .map(|(start_char, end_char, word)| Chunk {
                text: word.to_string(),
                word_count: 1,
                orp_index: orp_index(word),
                saccade: Some(SaccadeInfo {
                    page_index,
                    line_index,
                    start_char,
                    end_char,
                }),
            })
            .collect()
    })
}

/// Free-floating word stream for RSVP display: one chunk per word, with a
/// break chunk between paragraphs. Heading markers are dropped.
pub fn tokenize_rsvp(text: &str) -> Vec<Chunk> {
    let normalized = flow::normalize_sentence_spacing(text);
    let mut chunks = Vec::new();

    for block in flow::split_blocks(&normalized) {
        if !chunks.is_empty() {
            chunks.push(Chunk::break_marker());
        }

        for raw_line in block.lines() {
            let line = match flow::parse_heading(raw_line) {
                Some((_, heading)) => heading,
                None => raw_line,
            };
            for word in line.split_whitespace() {
                chunks.push(Chunk {
                    text: word.to_string(),
                    word_count: 1,
                    orp_index: orp_index(word),
                    saccade: None,
                });
            }
        }
    }

    debug!("RSVP stream: {} chunks", chunks.len());
    chunks
}

fn build_pages<F>(text: &str, params: &FlowParams, mut chunk_line: F) -> Tokenized
where
    F: FnMut(&SaccadeLine, usize, usize) -> Vec<Chunk>,
{
    let lines = flow_text_into_lines(text, params.line_width.max(1));
    let per_page = params.lines_per_page.max(1);

    let mut pages = Vec::with_capacity(lines.len().div_ceil(per_page));
    let mut chunks = Vec::new();

    for (page_index, page_lines) in lines.chunks(per_page).enumerate() {
        let mut line_chunks = Vec::with_capacity(page_lines.len());
        for (line_index, line) in page_lines.iter().enumerate() {
            let produced = if line.is_blank() {
                Vec::new()
            } else {
                chunk_line(line, page_index, line_index)
            };
            chunks.extend(produced.iter().cloned());
            line_chunks.push(produced);
        }
        pages.push(SaccadePage {
            lines: page_lines.to_vec(),
            line_chunks,
        });
    }

    debug!(
        "Tokenized {} lines into {} pages / {} chunks",
        lines.len(),
        pages.len(),
        chunks.len()
    );

    Tokenized { pages, chunks }
}
