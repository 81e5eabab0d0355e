pub mod runner;

pub use self::runner::{
    NoProgress, OptimizationOptions, Optimizer, ProgressCallback, SwapRecord, SweepReport,
};
use crate::layout::Layout;
use crate::scorer::engine::{tally, tally_touching};
use crate::scorer::{IndexedCorpus, Scorer, Tally};

/// The layout the sweep currently holds, with its tally and score cached so a
/// candidate swap only re-tallies the n-grams it touches.
pub struct Incumbent<'a> {
    scorer: &'a Scorer,
    corpus: &'a IndexedCorpus,

    pub layout: Layout,
    pub tally: Tally,
    pub score: f64,
}

/// Outcome of trying one swap against the incumbent.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub target: char,
    pub tally: Tally,
    pub score: f64,
}

impl<'a> Incumbent<'a> {
    pub fn new(scorer: &'a Scorer, corpus: &'a IndexedCorpus, layout: Layout) -> Self {
        let tally = tally(&layout, &scorer.classifier, corpus);
        let score = scorer.score_tally(&tally);
        Self {
            scorer,
            corpus,
            layout,
            tally,
            score,
        }
    }

    /// Tally of the layout with `a` and `b` exchanged, from the n-grams touching them.
    #[inline(always)]
    pub fn calc_delta(&self, a: char, b: char) -> Tally {
        let classifier = &self.scorer.classifier;
        let swapped = self.layout.swapped(a, b);

        let before = tally_touching(&self.layout, classifier, self.corpus, a, b);
        let after = tally_touching(&swapped, classifier, self.corpus, a, b);

        let mut next = self.tally;
        next -= before;
        next += after;
        next
    }

    /// Tally of the layout with `a` and `b` exchanged, rescanning the whole corpus.
    pub fn calc_full(&self, a: char, b: char) -> Tally {
        let swapped = self.layout.swapped(a, b);
        tally(&swapped, &self.scorer.classifier, self.corpus)
    }

    pub fn try_swap(&self, a: char, b: char, full_rescore: bool) -> Candidate {
        let tally = if full_rescore {
            self.calc_full(a, b)
        } else {
            self.calc_delta(a, b)
        };
        Candidate {
            target: b,
            tally,
            score: self.scorer.score_tally(&tally),
        }
    }

    /// Applies a swap previously evaluated by [`Incumbent::try_swap`].
    pub fn commit(&mut self, a: char, candidate: &Candidate) {
        if self.layout.swap(a, candidate.target) {
            self.tally = candidate.tally;
            self.score = candidate.score;
        }
    }
}
