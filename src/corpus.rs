use crate::error::{KeySweepError, KsResult};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

const TABLE_FILES: [(&str, usize); 3] = [
    ("monograms.json", 1),
    ("bigrams.json", 2),
    ("trigrams.json", 3),
];

/// Frequency tables for 1, 2 and 3 character sequences (lowercase, space included).
/// Loaded once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub monograms: HashMap<String, u64>,
    pub bigrams: HashMap<String, u64>,
    pub trigrams: HashMap<String, u64>,
}

impl CorpusStats {
    /// Adds `count` to the table matching the sequence length, saturating at
    /// `u64::MAX`. Returns false for sequences that are not 1-3 characters long.
    pub fn insert(&mut self, seq: &str, count: u64) -> bool {
        let key = seq.to_lowercase();
        let table = match key.chars().count() {
            1 => &mut self.monograms,
            2 => &mut self.bigrams,
            3 => &mut self.trigrams,
            _ => return false,
        };
        let entry = table.entry(key).or_default();
        *entry = entry.saturating_add(count);
        true
    }

    fn table_mut(&mut self, n: usize) -> &mut HashMap<String, u64> {
        match n {
            1 => &mut self.monograms,
            2 => &mut self.bigrams,
            _ => &mut self.trigrams,
        }
    }

    fn table(&self, n: usize) -> &HashMap<String, u64> {
        match n {
            1 => &self.monograms,
            2 => &self.bigrams,
            _ => &self.trigrams,
        }
    }

    /// Parses one `{ "seq": count }` table, keeping only keys of length `n`.
    pub fn parse_table(json: &str, n: usize) -> KsResult<HashMap<String, u64>> {
        let raw: HashMap<String, u64> = serde_json::from_str(json)?;
        let mut table: HashMap<String, u64> = HashMap::with_capacity(raw.len());
        let mut skipped = 0;

        for (seq, count) in raw {
            let key = seq.to_lowercase();
            if key.chars().count() != n {
                skipped += 1;
                continue;
            }
            // Keys differing only in case merge into one entry.
            let entry = table.entry(key).or_insert(0);
            *entry = entry.checked_add(count).ok_or_else(|| {
                KeySweepError::Validation(format!("count for '{}' overflows u64", seq))
            })?;
        }

        if skipped > 0 {
            debug!("   Skipped {} entries that are not {}-grams", skipped, n);
        }
        Ok(table)
    }

    /// Reads a tab separated `ngram<TAB>count` file. Header rows and rows with
    /// unparsable counts are skipped.
    pub fn from_tsv_reader<R: Read>(reader: R) -> KsResult<CorpusStats> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        let mut stats = CorpusStats::default();
        let mut lines_read = 0;
        let mut skipped = 0;

        for result in rdr.records() {
            lines_read += 1;
            let rec = match result {
                Ok(rec) => rec,
                Err(e) => {
                    warn!("   ⚠️  [Row {}] TSV Parse Error: {}", lines_read, e);
                    skipped += 1;
                    continue;
                }
            };
            if rec.len() < 2 {
                skipped += 1;
                continue;
            }

            // Keep spaces inside the sequence, they are legitimate keys.
            let seq = rec[0].trim_matches(|c: char| c == '\r' || c == '\n');
            if seq.is_empty() {
                skipped += 1;
                continue;
            }

            let raw_count = rec[1].trim();
            let count = match raw_count.parse::<u64>() {
                Ok(v) => v,
                Err(_) => match raw_count.parse::<f64>() {
                    Ok(v) if v.is_finite() && v >= 0.0 => v.round() as u64,
                    _ => {
                        skipped += 1;
                        continue;
                    }
                },
            };

            if !stats.insert(seq, count) {
                skipped += 1;
            }
        }

        debug!(
            "   -> Scanned {} lines ({} skipped). Loaded: {} 1-grams, {} 2-grams, {} 3-grams.",
            lines_read,
            skipped,
            stats.monograms.len(),
            stats.bigrams.len(),
            stats.trigrams.len()
        );
        Ok(stats)
    }

    /// Counts every 1, 2 and 3 character window of `text`, lowercased, with each run
    /// of whitespace folded into a single space.
    pub fn from_text(text: &str) -> CorpusStats {
        let mut chars: Vec<char> = Vec::with_capacity(text.len());
        for c in text.chars().flat_map(char::to_lowercase) {
            if c.is_whitespace() {
                if chars.last() != Some(&' ') {
                    chars.push(' ');
                }
            } else if !c.is_control() {
                chars.push(c);
            }
        }

        let mut stats = CorpusStats::default();
        for n in 1..=3 {
            let table = stats.table_mut(n);
            for window in chars.windows(n) {
                *table.entry(window.iter().collect()).or_default() += 1;
            }
        }
        stats
    }

    /// Writes `monograms.json`, `bigrams.json` and `trigrams.json` into `dir`.
    pub fn write_json<P: AsRef<Path>>(&self, dir: P) -> KsResult<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        for (file, n) in TABLE_FILES {
            let path = dir.join(file);
            let out = File::create(&path)?;
            serde_json::to_writer_pretty(out, self.table(n))?;
            debug!("   Wrote {}", path.display());
        }
        Ok(())
    }
}

/// Loads `dir/name/{monograms,bigrams,trigrams}.json`.
///
/// A missing table file only empties that table; a missing corpus directory or
/// malformed JSON is an error.
pub fn load_corpus<P: AsRef<Path>>(dir: P, name: &str) -> KsResult<CorpusStats> {
    let root = dir.as_ref().join(name);
    if !root.is_dir() {
        return Err(KeySweepError::CorpusNotFound(format!(
            "'{}' (no directory at '{}')",
            name,
            root.display()
        )));
    }

    info!("📚 Loading Corpus: {}", root.display());
    let mut stats = CorpusStats::default();

    for (file, n) in TABLE_FILES {
        let path = root.join(file);
        if !path.is_file() {
            warn!("⚠️  Corpus table '{}' not found, using an empty table.", path.display());
            continue;
        }
        let content = fs::read_to_string(&path)?;
        *stats.table_mut(n) = CorpusStats::parse_table(&content, n)?;
    }

    debug!(
        "   -> Loaded: {} 1-grams, {} 2-grams, {} 3-grams.",
        stats.monograms.len(),
        stats.bigrams.len(),
        stats.trigrams.len()
    );
    Ok(stats)
}

/// Loads a corpus from a JSON table directory, a `.tsv` n-gram file or a `.txt`
/// raw text file.
pub fn load_corpus_path<P: AsRef<Path>>(path: P) -> KsResult<CorpusStats> {
    let path = path.as_ref();
    if path.is_dir() {
        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        return load_corpus(parent, &name);
    }
    if !path.is_file() {
        return Err(KeySweepError::CorpusNotFound(path.display().to_string()));
    }

    info!("📚 Loading Corpus: {}", path.display());
    match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") => CorpusStats::from_tsv_reader(File::open(path)?),
        Some("txt") => Ok(CorpusStats::from_text(&fs::read_to_string(path)?)),
        _ => Err(KeySweepError::Config(format!(
            "Unsupported corpus file '{}' (expected a directory, .tsv or .txt)",
            path.display()
        ))),
    }
}
