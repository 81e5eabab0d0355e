use super::{Candidate, Incumbent};
use crate::config::Config;
use crate::corpus::CorpusStats;
use crate::geometry::Position;
use crate::layout::{Layout, SPACE};
use crate::scorer::{IndexedCorpus, Scorer};
use rayon::prelude::*;
use rayon::ThreadPool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct OptimizationOptions {
    /// 0 lets rayon pick (all cores).
    pub num_threads: usize,
    pub full_rescore: bool,
}

impl From<&Config> for OptimizationOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            num_threads: cfg.search.threads,
            full_rescore: cfg.search.full_rescore,
        }
    }
}

/// One committed swap.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRecord {
    pub position: Position,
    pub from: char,
    pub to: char,
    pub score_before: f64,
    pub score_after: f64,
}

#[derive(Debug, Clone)]
pub struct SweepReport {
    pub initial_score: f64,
    pub final_score: f64,
    pub layout: Layout,
    pub swaps: Vec<SwapRecord>,
    pub candidates_evaluated: usize,
    pub elapsed: Duration,
    /// False when a callback stopped the sweep early.
    pub completed: bool,
}

/// A trait for receiving updates during the sweep.
/// Boolean return value indicates if the sweep should continue (true) or abort (false).
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, swap: &SwapRecord, layout: &Layout) -> bool;
}

impl<T: ProgressCallback + ?Sized> ProgressCallback for &T {
    fn on_progress(&self, swap: &SwapRecord, layout: &Layout) -> bool {
        (**self).on_progress(swap, layout)
    }
}

pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _swap: &SwapRecord, _layout: &Layout) -> bool {
        true
    }
}

/// Single-pass greedy improver: every position is offered its best swap once.
pub struct Optimizer {
    scorer: Arc<Scorer>,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(scorer: Arc<Scorer>, options: OptimizationOptions) -> Self {
        Self { scorer, options }
    }

    pub fn optimize(&self, layout: &Layout, corpus: &CorpusStats) -> Layout {
        self.run(layout, corpus, NoProgress).layout
    }

    pub fn run<CB: ProgressCallback>(
        &self,
        layout: &Layout,
        corpus: &CorpusStats,
        callback: CB,
    ) -> SweepReport {
        let indexed = IndexedCorpus::new(corpus, layout.valid_keys());
        let pool = self.build_pool();
        let full_rescore = self.options.full_rescore;

        let mut incumbent = Incumbent::new(&self.scorer, &indexed, layout.clone());
        let initial_score = incumbent.score;
        let mut swaps = Vec::new();
        let mut candidates_evaluated = 0;
        let mut completed = true;
        let start = Instant::now();

        info!(
            "🔍 Sweeping '{}' ({} keys, {} mode)",
            layout.name,
            layout.key_count(),
            if full_rescore { "full" } else { "delta" }
        );

        for pos in Position::all() {
            let Some(c) = incumbent.layout.char_at(pos) else {
                continue;
            };
            if c == SPACE {
                continue;
            }

            // A. Evaluate every swap partner in parallel; collect keeps row-major order.
            let targets: Vec<char> = incumbent
                .layout
                .keyed_chars()
                .into_iter()
                .filter(|&t| t != c)
                .collect();
            candidates_evaluated += targets.len();

            let evaluate = || -> Vec<Candidate> {
                targets
                    .par_iter()
                    .map(|&t| incumbent.try_swap(c, t, full_rescore))
                    .collect()
            };
            let candidates = match &pool {
                Some(pool) => pool.install(evaluate),
                None => evaluate(),
            };

            // B. First strictly better candidate wins ties; the incumbent counts as first.
            let mut best: Option<Candidate> = None;
            let mut best_score = incumbent.score;
            for cand in candidates {
                if cand.score < best_score {
                    best_score = cand.score;
                    best = Some(cand);
                }
            }

            let Some(best) = best else {
                continue;
            };

            // C. Commit
            let record = SwapRecord {
                position: pos,
                from: c,
                to: best.target,
                score_before: incumbent.score,
                score_after: best.score,
            };
            incumbent.commit(c, &best);
            debug!(
                "   {} '{}' <-> '{}': {:.4} -> {:.4}",
                pos, record.from, record.to, record.score_before, record.score_after
            );

            let keep_going = callback.on_progress(&record, &incumbent.layout);
            swaps.push(record);
            if !keep_going {
                completed = false;
                break;
            }
        }

        let elapsed = start.elapsed();
        info!(
            "✅ Sweep done: {} swaps, score {:.4} -> {:.4} ({:.2?})",
            swaps.len(),
            initial_score,
            incumbent.score,
            elapsed
        );

        SweepReport {
            initial_score,
            final_score: incumbent.score,
            layout: incumbent.layout,
            swaps,
            candidates_evaluated,
            elapsed,
            completed,
        }
    }

    fn build_pool(&self) -> Option<ThreadPool> {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.num_threads)
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!(
                    "⚠️  Could not build thread pool ({}), evaluating on the global pool.",
                    e
                );
                None
            }
        }
    }
}
