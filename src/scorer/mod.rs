pub mod engine;
pub mod index;
pub mod types;

pub use self::index::IndexedCorpus;
pub use self::types::{Count, Metrics, Tally};
use crate::classifier::MovementClassifier;
use crate::config::{Config, ScoreMode, ScoringWeights};
use crate::corpus::CorpusStats;
use crate::layout::Layout;

/// Turns a layout and a corpus into [`Metrics`] and a scalar score (lower is better).
#[derive(Debug, Clone)]
pub struct Scorer {
    pub classifier: MovementClassifier,
    pub weights: ScoringWeights,
    pub mode: ScoreMode,
}

impl Scorer {
    pub fn new(classifier: MovementClassifier, weights: ScoringWeights, mode: ScoreMode) -> Self {
        Self {
            classifier,
            weights,
            mode,
        }
    }

    pub fn from_config(classifier: MovementClassifier, config: &Config) -> Self {
        Self::new(classifier, config.weights.clone(), config.search.score_mode)
    }

    /// Metrics of `layout` over every n-gram of `corpus` typeable on it.
    pub fn evaluate(&self, layout: &Layout, corpus: &CorpusStats) -> Metrics {
        let indexed = IndexedCorpus::new(corpus, layout.valid_keys());
        self.metrics(layout, &indexed)
    }

    /// Same as [`Scorer::evaluate`] against a corpus already indexed for the layout's keys.
    pub fn metrics(&self, layout: &Layout, indexed: &IndexedCorpus) -> Metrics {
        Metrics::from(&self.tally(layout, indexed))
    }

    pub fn tally(&self, layout: &Layout, indexed: &IndexedCorpus) -> Tally {
        engine::tally(layout, &self.classifier, indexed)
    }

    pub fn score(&self, m: &Metrics) -> f64 {
        match self.mode {
            ScoreMode::Sfb => m.sfb,
            ScoreMode::Weighted => {
                let w = &self.weights;
                let imbalance = if m.left_hand + m.right_hand > 0.0 {
                    (m.right_hand - 50.0).abs()
                } else {
                    0.0
                };

                m.sfb * w.weight_sfb
                    + m.sfs * w.weight_sfs
                    + m.redirect * w.weight_redirect
                    + m.bad_redirect * w.weight_bad_redirect
                    + imbalance * w.weight_imbalance
                    - m.roll_in * w.bonus_roll_in
                    - m.roll_out * w.bonus_roll_out
                    - m.alternate * w.bonus_alternate
            }
        }
    }

    #[inline]
    pub fn score_tally(&self, t: &Tally) -> f64 {
        self.score(&Metrics::from(t))
    }

    pub fn score_layout(&self, layout: &Layout, corpus: &CorpusStats) -> f64 {
        self.score(&self.evaluate(layout, corpus))
    }
}
