use reader::corpus::metrics::{count_syllables, count_words, flesch_kincaid_grade};
use reader::corpus::{
    assign_tiers, build_records, build_work_units, chunk_section, load_manifest, load_work_text,
    normalize_text, split_sections, to_paragraphs, write_tiers, ChunkPolicy, CorpusPolicy,
    Section, SplitMode, Tier, UnitRecord, WorkEntry, WorkSource,
};
use reader::error::ReaderError;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const RIVER: &str = "The river ran past the mill and the old wheel turned slowly.";
const VILLAGE: &str = "A quiet village waited beneath enormous mountains during the long winter.";

fn paragraph(sentence: &str) -> String {
    vec![sentence; 3].join(" ")
}

fn work_text(sentence: &str) -> String {
    vec![paragraph(sentence); 3].join("\n\n")
}

fn small_policy() -> CorpusPolicy {
    CorpusPolicy {
        target_words: 60,
        max_words: 100,
        min_words: 10,
        min_section_words: 5,
        min_unit_words: 20,
    }
}

fn file_work(id: &str, author: &str, title: &str, path: &str) -> WorkEntry {
    WorkEntry {
        id: id.to_string(),
        author: author.to_string(),
        title: title.to_string(),
        source: WorkSource::File { path: path.into() },
        domain: "Prose".to_string(),
        unit_type: "prose".to_string(),
        tags: vec!["fiction".to_string()],
        split_mode: SplitMode::None,
    }
}

fn record(author: &str, fk_grade: f64) -> UnitRecord {
    UnitRecord {
        title: format!("{} unit {}", author, fk_grade),
        text: "text".to_string(),
        domain: "Prose".to_string(),
        fk_grade,
        words: 1000,
        sentences: 50,
        author: author.to_string(),
        work_title: "Work".to_string(),
        work_id: "1".to_string(),
        unit_type: "prose".to_string(),
        tags: Vec::new(),
        section: "Full text".to_string(),
        pct_poly: 0.0,
        factual_burden: 0.0,
    }
}

#[test]
fn test_normalize_strips_boilerplate_and_spacing() {
    let raw = "\u{feff}Header junk\r\n*** START OF THE PROJECT GUTENBERG EBOOK TEST ***\r\n\
               Hello   world.\r\n\r\n\r\n\r\nSecond\tpara.\r\n\
               *** END OF THE PROJECT GUTENBERG EBOOK TEST ***\r\nLicense";
    assert_eq!(normalize_text(raw), "Hello world.\n\nSecond para.");
}

#[test]
fn test_paragraphs_join_wrapped_lines() {
    let paragraphs = to_paragraphs("one\ntwo\n\n\nthree\n  \nfour");
    assert_eq!(paragraphs, vec!["one two", "three", "four"]);
}

#[test]
fn test_metrics() {
    assert_eq!(count_words("It's a dog's life, 42 times."), 5);
    assert_eq!(count_syllables("make"), 1);
    assert_eq!(count_syllables("banana"), 3);
    assert!((flesch_kincaid_grade("The cat sat.") - -2.62).abs() < 1e-9);
    assert_eq!(flesch_kincaid_grade(""), 0.0);
}

fn owned(paragraphs: &[&str]) -> Vec<String> {
    paragraphs.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_sections_follow_headings() {
    let paragraphs = owned(&[
        "Some lead words here for intro",
        "CHAPTER I",
        "body words one two three four",
        "CHAPTER II",
        "more body words here now",
        "THE END",
        "a b c d e f",
    ]);
    let sections = split_sections(&paragraphs, SplitMode::Headings, 3);
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Introduction", "CHAPTER I", "CHAPTER II"]);
    assert_eq!(sections[1].paragraphs, vec!["body words one two three four"]);
}

#[test]
fn test_sections_fall_back_to_full_text() {
    let paragraphs = owned(&["just some prose.", "and more prose."]);
    for mode in [SplitMode::Headings, SplitMode::None] {
        let sections = split_sections(&paragraphs, mode, 1);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Full text");
        assert_eq!(sections[0].paragraphs.len(), 2);
    }

    // every heading body is too short
    let short = owned(&["CHAPTER I", "tiny.", "CHAPTER II", "also tiny."]);
    let sections = split_sections(&short, SplitMode::Headings, 50);
    assert_eq!(sections[0].title, "Full text");
}

#[test]
fn test_chunking_merges_short_tail() {
    let section = Section {
        title: "Full text".to_string(),
        paragraphs: owned(&[
            "six plain words in this paragraph.",
            "six more words in another one.",
            "IV",
            "three short words.",
        ]),
    };
    let policy = ChunkPolicy {
        target_words: 10,
        max_words: 20,
        min_words: 5,
    };
    let units = chunk_section(&section, &policy);
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].0, "Full text");
    assert_eq!(
        units[0].1,
        "six plain words in this paragraph.\n\nsix more words in another one.\n\nthree short words."
    );
}

#[test]
fn test_chunking_splits_oversized_paragraph() {
    let long = vec!["One two three four five."; 6].join(" ");
    let section = Section {
        title: "Part".to_string(),
        paragraphs: vec![long],
    };
    let policy = ChunkPolicy {
        target_words: 10,
        max_words: 12,
        min_words: 1,
    };
    let units = chunk_section(&section, &policy);
    assert_eq!(units.len(), 3);
    assert!(units.iter().all(|(_, text)| count_words(text) == 10));
}

#[test]
fn test_policy_validation() {
    let mut policy = CorpusPolicy::default();
    assert!(policy.validate().is_ok());

    policy.max_words = 9000;
    assert!(matches!(policy.validate(), Err(ReaderError::Config(_))));

    policy.max_words = 500;
    policy.target_words = 600;
    assert!(matches!(policy.validate(), Err(ReaderError::Config(_))));
}

#[test]
fn test_manifest_parsing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    fs::write(
        &path,
        r#"{"works": [
            {"id": 1342, "author": "Jane Austen", "title": "Pride and Prejudice",
             "source": {"type": "gutenberg", "id": 1342}},
            {"id": "notes", "author": "Me", "title": "Notes",
             "source": {"type": "file", "path": "notes.txt"},
             "tags": ["local"], "split_mode": "none", "domain": "Essay"}
        ]}"#,
    )
    .unwrap();

    let works = load_manifest(&path).unwrap();
    assert_eq!(works.len(), 2);
    assert_eq!(works[0].id, "1342");
    assert_eq!(works[0].domain, "Prose");
    assert_eq!(works[0].unit_type, "prose");
    assert_eq!(works[0].split_mode, SplitMode::Headings);
    assert_eq!(works[0].source, WorkSource::Gutenberg { id: 1342 });
    assert_eq!(works[1].id, "notes");
    assert_eq!(works[1].split_mode, SplitMode::None);
    assert_eq!(works[1].domain, "Essay");
}

#[test]
fn test_sources_resolve_locally() {
    let dir = tempdir().unwrap();
    let cache = dir.path().join("cache");
    fs::create_dir(&cache).unwrap();
    fs::write(cache.join("gutenberg-11.txt"), "cached text").unwrap();
    fs::write(dir.path().join("local.txt"), b"caf\xe9 bytes").unwrap();

    let mut work = file_work("a", "Author", "Local", "local.txt");
    let text = load_work_text(&work, dir.path(), &cache).unwrap();
    assert!(text.starts_with("caf"));
    assert!(text.ends_with(" bytes"));

    work.source = WorkSource::Gutenberg { id: 11 };
    assert_eq!(load_work_text(&work, dir.path(), &cache).unwrap(), "cached text");

    work.source = WorkSource::Gutenberg { id: 12 };
    assert!(matches!(
        load_work_text(&work, dir.path(), &cache),
        Err(ReaderError::Source(_))
    ));

    work.source = WorkSource::Url {
        url: "https://example.org/book.txt".to_string(),
    };
    assert!(matches!(
        load_work_text(&work, dir.path(), &cache),
        Err(ReaderError::Source(_))
    ));
}

#[test]
fn test_work_units_carry_metadata() {
    let work = file_work("7", "Ann Author", "Work One", "unused.txt");
    let units = build_work_units(&work, &work_text(RIVER), &small_policy());

    assert_eq!(units.len(), 2);
    assert_eq!(units[0].title, "Ann Author - Work One - Full text (1)");
    assert_eq!(units[1].title, "Ann Author - Work One - Full text (2)");
    assert_eq!(units[0].words, 72);
    assert_eq!(units[1].words, 36);
    assert_eq!(units[0].sentences, 6);
    assert_eq!(units[0].work_id, "7");
    assert_eq!(units[0].tags, vec!["fiction"]);

    assert!(build_work_units(&work, "   \n\n ", &small_policy()).is_empty());
}

#[test]
fn test_tiers_split_per_author() {
    let tiers = assign_tiers(vec![
        record("A", 9.0),
        record("B", 5.0),
        record("A", 3.0),
        record("C", 7.0),
        record("A", 6.0),
        record("B", 4.0),
    ]);

    let fk = |rows: &[UnitRecord]| rows.iter().map(|r| (r.author.clone(), r.fk_grade)).collect::<Vec<_>>();
    assert_eq!(fk(tiers.tier(Tier::Easy)), vec![("A".to_string(), 3.0)]);
    assert_eq!(
        fk(tiers.tier(Tier::Medium)),
        vec![("A".to_string(), 6.0), ("B".to_string(), 4.0)]
    );
    assert_eq!(
        fk(tiers.tier(Tier::Hard)),
        vec![
            ("A".to_string(), 9.0),
            ("B".to_string(), 5.0),
            ("C".to_string(), 7.0)
        ]
    );
    assert_eq!(tiers.len(), 6);
}

#[test]
fn test_small_corpus_is_all_hard() {
    let tiers = assign_tiers(vec![record("A", 1.0), record("A", 2.0)]);
    assert!(tiers.easy.is_empty());
    assert!(tiers.medium.is_empty());
    assert_eq!(tiers.hard.len(), 2);
}

fn write_fixture(dir: &Path) -> std::path::PathBuf {
    fs::write(dir.join("one.txt"), work_text(RIVER)).unwrap();
    fs::write(dir.join("two.txt"), work_text(VILLAGE)).unwrap();
    let manifest = dir.join("manifest.json");
    fs::write(
        &manifest,
        r#"{"works": [
            {"id": 1, "author": "Ann", "title": "One",
             "source": {"type": "file", "path": "one.txt"}, "split_mode": "none"},
            {"id": 2, "author": "Bo", "title": "Two",
             "source": {"type": "file", "path": "two.txt"}, "split_mode": "none"}
        ]}"#,
    )
    .unwrap();
    manifest
}

#[test]
fn test_build_and_write_tiers() {
    let dir = tempdir().unwrap();
    let manifest = write_fixture(dir.path());
    let works = load_manifest(&manifest).unwrap();

    let records = build_records(&works, dir.path(), dir.path(), &small_policy(), None).unwrap();
    assert_eq!(records.len(), 4);
    // manifest order is kept without a shuffle seed
    assert_eq!(records[0].author, "Ann");
    assert_eq!(records[3].author, "Bo");

    let tiers = assign_tiers(records);
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();
    let written = write_tiers(&out, "corpus-prose", &tiers).unwrap();
    assert_eq!(written.len(), 3);
    assert_eq!(written[0].1, out.join("corpus-prose-easy.jsonl"));

    let hard = fs::read_to_string(out.join("corpus-prose-hard.jsonl")).unwrap();
    let rows: Vec<serde_json::Value> = hard
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert!(row["fk_grade"].is_number());
        assert!(row["work_title"].is_string());
        assert!(row.get("pct_poly").is_none());
        assert!(row.get("factual_burden").is_none());
    }
}

#[test]
fn test_seeded_shuffle_is_reproducible() {
    let dir = tempdir().unwrap();
    let manifest = write_fixture(dir.path());
    let works = load_manifest(&manifest).unwrap();

    let titles = |seed| -> Vec<String> {
        build_records(&works, dir.path(), dir.path(), &small_policy(), Some(seed))
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect()
    };
    assert_eq!(titles(42), titles(42));
    assert_eq!(titles(42).len(), 4);
}

#[test]
fn test_missing_source_fails_build() {
    let dir = tempdir().unwrap();
    let mut work = file_work("g", "Author", "Gone", "unused.txt");
    work.source = WorkSource::Gutenberg { id: 999 };
    let result = build_records(&[work], dir.path(), dir.path(), &small_policy(), None);
    assert!(matches!(result, Err(ReaderError::Source(_))));
}

#[test]
fn test_empty_corpus_is_not_written() {
    let dir = tempdir().unwrap();
    let tiers = assign_tiers(Vec::new());
    assert!(matches!(
        write_tiers(dir.path(), "corpus", &tiers),
        Err(ReaderError::Validation(_))
    ));
}
