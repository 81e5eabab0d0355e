use clap::Args;
use keysweep::corpus::load_corpus_path;
use keysweep::error::KsResult;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct NgramsArgs {
    /// Raw text (`.txt`) or n-gram counts (`.tsv`) to convert.
    pub input: PathBuf,

    /// Directory receiving monograms.json, bigrams.json and trigrams.json.
    #[arg(short, long)]
    pub out: PathBuf,
}

pub fn run(args: NgramsArgs) -> KsResult<()> {
    let stats = load_corpus_path(&args.input)?;
    stats.write_json(&args.out)?;
    info!(
        "📝 Wrote {} 1-grams, {} 2-grams, {} 3-grams to {}",
        stats.monograms.len(),
        stats.bigrams.len(),
        stats.trigrams.len(),
        args.out.display()
    );
    Ok(())
}
