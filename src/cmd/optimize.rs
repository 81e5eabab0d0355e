use crate::reports;
use clap::Args;
use keysweep::config::Config;
use keysweep::error::KsResult;
use keysweep::layout::{load_layout, Layout};
use keysweep::optimizer::{OptimizationOptions, Optimizer, ProgressCallback, SwapRecord};
use keysweep::scorer::Scorer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub config: Config,

    /// Layout name or file to start from.
    pub layout: String,

    #[arg(short, long)]
    pub corpus: String,

    /// Also write the optimized layout definition to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_progress(&self, swap: &SwapRecord, _layout: &Layout) -> bool {
        debug!(
            "   ⚡ {} '{}' <-> '{}' ({:.4})",
            swap.position, swap.from, swap.to, swap.score_after
        );
        true
    }
}

pub fn run(
    args: OptimizeArgs,
    scorer: Arc<Scorer>,
    layouts_dir: &Path,
    corpus_dir: &Path,
) -> KsResult<()> {
    let layout = load_layout(layouts_dir, &args.layout)?;
    let corpus = super::resolve_corpus(corpus_dir, &args.corpus)?;

    let options = OptimizationOptions::from(&args.config);
    let optimizer = Optimizer::new(scorer.clone(), options);
    let report = optimizer.run(&layout, &corpus, LogProgress);

    let mut optimized = report.layout.clone();
    optimized.name = format!("{}-opt", layout.name);

    let before = (
        layout.name.clone(),
        scorer.evaluate(&layout, &corpus),
        report.initial_score,
    );
    let after = (
        optimized.name.clone(),
        scorer.evaluate(&optimized, &corpus),
        report.final_score,
    );

    reports::print_layout_grid(&layout);
    reports::print_layout_grid(&optimized);
    reports::print_before_after(&before, &after);
    reports::print_swap_log(&report.swaps);

    info!(
        "📊 {} candidates evaluated in {:.2?}",
        report.candidates_evaluated, report.elapsed
    );
    println!("\n{}", optimized);

    if let Some(path) = &args.output {
        std::fs::write(path, optimized.to_string())?;
        info!("💾 Saved layout to {}", path.display());
    }
    Ok(())
}
