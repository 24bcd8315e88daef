//! End-to-end: demo corpus CSV -> indices -> documents on disk -> search engine

use demo_corpus::{DEMO_CSV, DEMO_VERSES, PSALM_REFRAIN};
use gematria::bounds::{BoundsDocument, DEFAULT_MAX_EXAMPLES};
use gematria::corpus::{read_csv, CorpusRecord};
use gematria::indexer::build_indices;
use gematria::normalize::{normalize, tokens};
use gematria::stats::ValueRange;
use gematria::store::{load_json, save_json};
use gematria::{DocumentPaths, GematriaError, Index, SearchEngine, Stats, UnitKind};

fn demo_records() -> Vec<CorpusRecord> {
    read_csv(DEMO_CSV.as_bytes()).expect("demo corpus parses")
}

/// Build and persist every document, as the CLI does
fn persist_demo(dir: &std::path::Path) -> DocumentPaths {
    let records = demo_records();
    let indices = build_indices(&records);
    let paths = DocumentPaths::in_dir(dir);

    save_json(&paths.word_index, &indices.words).unwrap();
    save_json(&paths.verse_index, &indices.verses).unwrap();
    let bounds = BoundsDocument::build(&indices.words, &indices.verses, DEFAULT_MAX_EXAMPLES).unwrap();
    save_json(&paths.bounds, &bounds).unwrap();
    let stats = Stats::from_indices(&indices.words, &indices.verses).unwrap();
    save_json(&paths.stats, &stats).unwrap();
    paths
}

#[test]
fn test_demo_csv_parses_every_verse() {
    let records = demo_records();
    assert_eq!(records.len(), DEMO_VERSES.len());
    assert_eq!(records[0].reference(), "Genesis 1:1");
    assert_eq!(records[0].section.as_deref(), Some("Torah"));
    assert_eq!(records.last().unwrap().reference(), "Song of Songs 2:1");
}

#[test]
fn test_word_index_accounts_for_every_token() {
    let records = demo_records();
    let indices = build_indices(&records);

    let token_count: usize = records
        .iter()
        .map(|r| tokens(&normalize(&r.text)).count())
        .sum();
    assert_eq!(indices.words.total_occurrences(), token_count);

    for (key, entry) in indices.words.iter() {
        assert_eq!(entry.count(), entry.occurrences().len(), "count drift for {}", key);
        assert_eq!(entry.first_occurrence(), &entry.occurrences()[0]);
        assert_eq!(entry.value(), gematria::gematria::value(key));
    }
}

#[test]
fn test_refrain_merges_into_one_verse_entry() {
    let indices = build_indices(&demo_records());
    let entry = indices.verses.get(&normalize(PSALM_REFRAIN)).unwrap();

    assert_eq!(entry.count(), 3);
    assert_eq!(entry.value(), 408);
    let refs: Vec<&str> = entry.occurrences().iter().map(|o| o.reference.as_str()).collect();
    assert_eq!(refs, vec!["Psalms 118:1", "Psalms 118:29", "Psalms 136:1"]);
    let orders: Vec<u64> = entry.occurrences().iter().map(|o| o.order_index).collect();
    assert!(orders.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(entry.raw_text(), Some(PSALM_REFRAIN));
}

#[test]
fn test_bounds_properties() {
    let indices = build_indices(&demo_records());
    let bounds = BoundsDocument::build(&indices.words, &indices.verses, DEFAULT_MAX_EXAMPLES).unwrap();

    for (_, entry) in indices.words.iter() {
        assert!(bounds.word.min <= entry.value() && entry.value() <= bounds.word.max);
    }
    for example in &bounds.word.lowest_examples {
        assert_eq!(indices.words.get(example).unwrap().value(), bounds.word.min);
    }
    assert!(bounds.word.lowest_examples.len() <= DEFAULT_MAX_EXAMPLES);
    assert!(bounds.word.highest_examples.len() <= DEFAULT_MAX_EXAMPLES);

    assert_eq!(bounds.word.min, 13);
    assert_eq!(bounds.word.lowest_examples, vec!["אחד"]);
    assert_eq!(bounds.word.max, 1056);
    assert_eq!(bounds.word.highest_examples, vec!["שושנת"]);

    assert_eq!(bounds.verse.min, 408);
    assert_eq!(bounds.verse.lowest_examples, vec!["Psalms 118:1"]);
    assert_eq!(bounds.verse.max, 3546);
    assert_eq!(bounds.verse.highest_examples, vec!["Genesis 1:2"]);
}

#[test]
fn test_documents_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let paths = persist_demo(dir.path());
    let indices = build_indices(&demo_records());

    let words: Index = load_json(&paths.word_index).unwrap();
    let verses: Index = load_json(&paths.verse_index).unwrap();
    assert_eq!(words, indices.words);
    assert_eq!(verses, indices.verses);
    assert_eq!(
        words.keys().collect::<Vec<_>>(),
        indices.words.keys().collect::<Vec<_>>(),
        "document order must match build order"
    );

    let bounds: BoundsDocument = load_json(&paths.bounds).unwrap();
    let stats: Stats = load_json(&paths.stats).unwrap();
    assert_eq!(stats.words.range, ValueRange::from(&bounds.word));
    assert_eq!(stats.verses.range, ValueRange::from(&bounds.verse));
    assert_eq!(stats.words.unique, Some(words.len()));
    assert_eq!(stats.verses.total_occurrences, Some(DEMO_VERSES.len()));
}

#[test]
fn test_search_bereshit_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let paths = persist_demo(dir.path());
    let engine = SearchEngine::open(&paths).unwrap();

    let result = engine.search(913);
    assert_eq!(result.query, 913);
    assert_eq!(result.total_results, result.results.len());

    let word_hits: Vec<_> = result.results.iter().filter(|h| h.kind == UnitKind::Word).collect();
    assert_eq!(word_hits.len(), 1);
    assert_eq!(word_hits[0].text, "בראשית");
    assert_eq!(word_hits[0].value, 913);
    assert_eq!(word_hits[0].source.reference, "Genesis 1:1");
    assert_eq!(word_hits[0].source.section.as_deref(), Some("Torah"));
}

#[test]
fn test_search_returns_every_occurrence() {
    let dir = tempfile::tempdir().unwrap();
    let engine = SearchEngine::open(&persist_demo(dir.path())).unwrap();

    // Elohim: twice in Genesis 1:4, once in each other verse of the chapter
    let result = engine.search(86);
    let orders: Vec<u64> = result
        .results
        .iter()
        .filter(|h| h.text == "אלהימ")
        .map(|h| h.source.verse_index)
        .collect();
    assert_eq!(orders, vec![1, 2, 3, 4, 4, 5]);
}

#[test]
fn test_hits_follow_index_then_occurrence_order() {
    let dir = tempfile::tempdir().unwrap();
    let engine = SearchEngine::open(&persist_demo(dir.path())).unwrap();

    // "yom" (Genesis 1:5, twice) is indexed before "ladonai" (the refrain)
    let result = engine.search(56);
    let hits: Vec<(&str, &str)> = result
        .results
        .iter()
        .map(|h| (h.text.as_str(), h.source.reference.as_str()))
        .collect();
    assert_eq!(
        hits,
        vec![
            ("יומ", "Genesis 1:5"),
            ("יומ", "Genesis 1:5"),
            ("ליהוה", "Psalms 118:1"),
            ("ליהוה", "Psalms 118:29"),
            ("ליהוה", "Psalms 136:1"),
        ]
    );
}

#[test]
fn test_verse_search_reports_multi_word_book() {
    let dir = tempfile::tempdir().unwrap();
    let engine = SearchEngine::open(&persist_demo(dir.path())).unwrap();

    let result = engine.search(2473);
    assert_eq!(result.total_results, 1);
    let hit = &result.results[0];
    assert_eq!(hit.kind, UnitKind::Verse);
    assert_eq!(hit.source.book, "Song of Songs");
    assert_eq!(hit.source.chapter, 2);
    assert_eq!(hit.source.verse, 1);
    assert_eq!(hit.source.verse_index, 9);
}

#[test]
fn test_values_outside_ranges_return_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let engine = SearchEngine::open(&persist_demo(dir.path())).unwrap();
    assert_eq!(engine.search(0).total_results, 0);
    assert_eq!(engine.search(12).total_results, 0);
    assert_eq!(engine.search(999_999).total_results, 0);
}

#[test]
fn test_stats_from_persisted_bounds_answer_the_same() {
    let dir = tempfile::tempdir().unwrap();
    let paths = persist_demo(dir.path());
    let full = SearchEngine::open(&paths).unwrap();

    let bounds: BoundsDocument = load_json(&paths.bounds).unwrap();
    save_json(&paths.stats, &Stats::from(&bounds)).unwrap();
    let from_bounds = SearchEngine::open(&paths).unwrap();

    for value in [0, 13, 56, 86, 408, 913, 2473, 3546, 999_999] {
        assert_eq!(from_bounds.search(value), full.search(value), "query {}", value);
    }
}

#[test]
fn test_open_fails_on_missing_document() {
    let dir = tempfile::tempdir().unwrap();
    let paths = persist_demo(dir.path());
    std::fs::remove_file(&paths.stats).unwrap();
    assert!(matches!(SearchEngine::open(&paths), Err(GematriaError::StoreError(_))));
}

#[test]
fn test_open_fails_on_tampered_index() {
    let dir = tempfile::tempdir().unwrap();
    let paths = persist_demo(dir.path());
    let text = std::fs::read_to_string(&paths.word_index).unwrap();
    std::fs::write(&paths.word_index, text.replacen("\"gematria\": 913", "\"gematria\": 914", 1)).unwrap();

    let err = SearchEngine::open(&paths).unwrap_err();
    assert!(matches!(
        err,
        GematriaError::InvalidIndex { kind: UnitKind::Word, ref key, .. } if key == "בראשית"
    ));
}

#[test]
fn test_malformed_corpus_aborts_build() {
    let mut csv = DEMO_CSV.clone();
    csv.push_str("Ketuvim,Psalms,not-a-number,2,הַלְלוּ\n");
    assert!(read_csv(csv.as_bytes()).is_err());
}
