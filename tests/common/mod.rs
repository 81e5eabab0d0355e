#![allow(dead_code)]

use keysweep::classifier::MovementClassifier;
use keysweep::config::{ScoreMode, ScoringWeights};
use keysweep::corpus::CorpusStats;
use keysweep::layout::Layout;
use keysweep::scorer::Scorer;
use std::fs;
use std::path::Path;

/// Builds a corpus from `(sequence, count)` pairs, routed by length.
pub fn corpus(entries: &[(&str, u64)]) -> CorpusStats {
    let mut stats = CorpusStats::default();
    for (seq, count) in entries {
        stats.insert(seq, *count);
    }
    stats
}

pub fn layout(text: &str) -> Layout {
    Layout::parse(text).expect("test layout should parse")
}

pub fn scorer(mode: ScoreMode) -> Scorer {
    Scorer::new(
        MovementClassifier::standard(),
        ScoringWeights::default(),
        mode,
    )
}

/// A small English-ish corpus over the qwerty letters.
pub fn sample_corpus() -> CorpusStats {
    CorpusStats::from_text(
        "the quick brown fox jumps over the lazy dog while the wizard quietly \
         judges every sphinx of black quartz. a stranger who never learned to type \
         with ten fingers hunts and pecks through the long evening, pressing the \
         same keys again and again until the letters blur together into one",
    )
}

/// Writes a corpus directory `dir/name/{monograms,bigrams,trigrams}.json`.
pub fn write_corpus_dir(dir: &Path, name: &str, stats: &CorpusStats) {
    stats
        .write_json(dir.join(name))
        .expect("failed to write corpus fixture");
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
