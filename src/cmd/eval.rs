use crate::reports;
use clap::Args;
use keysweep::config::Config;
use keysweep::error::KsResult;
use keysweep::layout::load_layout;
use keysweep::scorer::{Metrics, Scorer};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct EvalArgs {
    #[command(flatten)]
    pub config: Config,

    /// Layout name or file.
    pub layout: String,

    #[arg(short, long)]
    pub corpus: String,

    /// Print the metrics as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    layout: &'a str,
    score: f64,
    metrics: &'a Metrics,
}

pub fn run(
    args: EvalArgs,
    scorer: Arc<Scorer>,
    layouts_dir: &Path,
    corpus_dir: &Path,
) -> KsResult<()> {
    let layout = load_layout(layouts_dir, &args.layout)?;
    let corpus = super::resolve_corpus(corpus_dir, &args.corpus)?;

    let metrics = scorer.evaluate(&layout, &corpus);
    let score = scorer.score(&metrics);

    if args.json {
        let report = JsonReport {
            layout: &layout.name,
            score,
            metrics: &metrics,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    reports::print_layout_grid(&layout);
    reports::print_metrics_report(&layout.name, score, &metrics);
    Ok(())
}
