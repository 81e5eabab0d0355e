pub mod eval;
pub mod ngrams;
pub mod optimize;

use keysweep::corpus::{load_corpus, load_corpus_path, CorpusStats};
use keysweep::error::KsResult;
use std::path::Path;

/// Resolves `--corpus`: a name under the corpus directory first, then a literal path
/// (JSON table directory, `.tsv` or `.txt`).
pub fn resolve_corpus(corpus_dir: &Path, name: &str) -> KsResult<CorpusStats> {
    let literal = Path::new(name);
    if !corpus_dir.join(name).is_dir() && literal.exists() {
        return load_corpus_path(literal);
    }
    load_corpus(corpus_dir, name)
}
