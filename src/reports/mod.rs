use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use reader::corpus::{Tier, TieredCorpus};
use reader::recall::{RecallStats, ScoredWord};
use reader::tokenizer::{Chunk, LineType, Tokenized};
use reader::training::TrainingScoreResult;
use strum::IntoEnumIterator;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// `m:ss.s` for reading times.
pub fn format_duration(ms: f64) -> String {
    let total_secs = ms / 1000.0;
    let minutes = (total_secs / 60.0).floor();
    format!("{}:{:04.1}", minutes as u64, total_secs - minutes * 60.0)
}

pub fn print_page_summary(tokenized: &Tokenized) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Page").add_attribute(Attribute::Bold),
        Cell::new("Line"),
        Cell::new("Type"),
        Cell::new("Chunks").fg(Color::Cyan),
        Cell::new("Text"),
    ]);
    align_right(&mut table, 0..=3);

    for (page_index, page) in tokenized.pages.iter().enumerate() {
        for (line_index, (line, chunks)) in page.lines.iter().zip(&page.line_chunks).enumerate() {
            let kind = match line.line_type {
                LineType::Heading => Cell::new(format!("h{}", line.level.unwrap_or(1)))
                    .fg(Color::Yellow),
                other => Cell::new(other.to_string()),
            };
            table.add_row(vec![
                Cell::new(page_index),
                Cell::new(line_index),
                kind,
                Cell::new(chunks.len()).fg(Color::Cyan),
                Cell::new(&line.text),
            ]);
        }
    }
    println!("{}", table);
}

pub fn print_chunk_preview(chunks: &[&Chunk]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Chunk"),
        Cell::new("ORP"),
    ]);
    align_right(&mut table, 2..=2);

    for (i, chunk) in chunks.iter().enumerate() {
        let cell = if chunk.is_break() {
            Cell::new(&chunk.text).fg(Color::DarkGrey)
        } else {
            Cell::new(&chunk.text)
        };
        table.add_row(vec![Cell::new(i), cell, Cell::new(chunk.orp_index)]);
    }
    println!("{}", table);
}

pub fn print_timing_table(rows: &[(usize, &str, f64)]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Chunk"),
        Cell::new("ms").fg(Color::Cyan),
    ]);
    align_right(&mut table, 2..=2);

    for (index, text, ms) in rows {
        table.add_row(vec![
            Cell::new(index),
            Cell::new(text),
            Cell::new(format!("{:.0}", ms)).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_recall_report(words: &[ScoredWord]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Word"),
        Cell::new("Result"),
    ]);

    for word in words {
        let result = if word.forfeited {
            Cell::new("forfeited").fg(Color::Yellow)
        } else if word.correct {
            Cell::new("ok").fg(Color::Green)
        } else {
            Cell::new("miss").fg(Color::Red)
        };
        table.add_row(vec![Cell::new(&word.key), Cell::new(&word.text), result]);
    }
    println!("\n{}", table);
}

pub fn print_score_summary(stats: &RecallStats, score: &TrainingScoreResult, next_wpm: u32) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new("Known").fg(Color::Green),
        Cell::new("Exact"),
        Cell::new("Detail"),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Next WPM").add_attribute(Attribute::Bold),
    ]);
    align_right(&mut table, 0..=5);

    table.add_row(vec![
        Cell::new(stats.total_words),
        Cell::new(stats.known_words).fg(Color::Green),
        Cell::new(stats.exact_matches),
        Cell::new(format!("{}/{}", stats.detail_known, stats.detail_total)),
        Cell::new(format!("{}%", score.score_percent)).fg(Color::Cyan),
        Cell::new(next_wpm).add_attribute(Attribute::Bold),
    ]);
    println!("\n{}", table);
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

pub fn print_tier_summary(tiers: &TieredCorpus) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Tier").add_attribute(Attribute::Bold),
        Cell::new("Units"),
        Cell::new("Words (mean)"),
        Cell::new("Words (max)"),
        Cell::new("FK (mean)").fg(Color::Cyan),
    ]);
    align_right(&mut table, 1..=4);

    for tier in Tier::iter() {
        let rows = tiers.tier(tier);
        let words_mean = mean(rows.iter().map(|r| r.words as f64));
        let words_max = rows.iter().map(|r| r.words).max();
        let fk_mean = mean(rows.iter().map(|r| r.fk_grade));

        table.add_row(vec![
            Cell::new(tier).add_attribute(Attribute::Bold),
            Cell::new(rows.len()),
            Cell::new(words_mean.map_or("-".to_string(), |m| format!("{:.0}", m))),
            Cell::new(words_max.map_or("-".to_string(), |m| m.to_string())),
            Cell::new(fk_mean.map_or("-".to_string(), |m| format!("{:.1}", m))).fg(Color::Cyan),
        ]);
    }
    println!("\nTier summary:\n{}", table);
}
