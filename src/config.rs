use crate::error::{KeySweepError, KsResult};
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub weights: ScoringWeights,
}

/// What the optimizer minimizes.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMode {
    /// Same-finger bigram percentage only.
    Sfb,
    /// Weighted sum over every metric.
    #[default]
    Weighted,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Worker threads for candidate evaluation (0 = all cores).
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    #[arg(long, value_enum, default_value_t = ScoreMode::Weighted)]
    pub score_mode: ScoreMode,

    /// Re-scan the whole corpus for every candidate instead of scoring the delta.
    #[arg(long, default_value_t = false)]
    pub full_rescore: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            threads: 0,
            score_mode: ScoreMode::Weighted,
            full_rescore: false,
        }
    }
}

/// Weights of the scalar score. Every metric is a percentage, so weights are
/// per percentage point. Bonuses are subtracted.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    // === Same Finger ===
    #[arg(long, default_value_t = 1.0)]
    pub weight_sfb: f64,
    #[arg(long, default_value_t = 0.25)]
    pub weight_sfs: f64,

    // === Redirects ===
    #[arg(long, default_value_t = 0.2)]
    pub weight_redirect: f64,
    #[arg(long, default_value_t = 0.5)]
    pub weight_bad_redirect: f64,

    // === Flow ===
    #[arg(long, default_value_t = 0.05)]
    pub bonus_roll_in: f64,
    #[arg(long, default_value_t = 0.02)]
    pub bonus_roll_out: f64,
    #[arg(long, default_value_t = 0.0)]
    pub bonus_alternate: f64,

    // === Balance ===
    /// Applied to the distance of the right hand share from 50 %.
    #[arg(long, default_value_t = 0.05)]
    pub weight_imbalance: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            weight_sfb: 1.0,
            weight_sfs: 0.25,
            weight_redirect: 0.2,
            weight_bad_redirect: 0.5,
            bonus_roll_in: 0.05,
            bonus_roll_out: 0.02,
            bonus_alternate: 0.0,
            weight_imbalance: 0.05,
        }
    }
}

impl ScoringWeights {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KsResult<Self> {
        let path = path.as_ref();
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path)?)?;
        // A bare array would otherwise fill the fields positionally.
        if !value.is_object() {
            return Err(KeySweepError::Config(format!(
                "Weights file '{}' must contain a JSON object",
                path.display()
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Copies every weight given explicitly on the command line over `self`.
    pub fn merge_from_cli(&mut self, cli_weights: &ScoringWeights, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli_weights.$field;
                }
            };
        }

        update_if_present!(weight_sfb);
        update_if_present!(weight_sfs);
        update_if_present!(weight_redirect);
        update_if_present!(weight_bad_redirect);
        update_if_present!(bonus_roll_in);
        update_if_present!(bonus_roll_out);
        update_if_present!(bonus_alternate);
        update_if_present!(weight_imbalance);
    }
}
