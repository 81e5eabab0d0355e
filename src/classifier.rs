use crate::error::KsResult;
use crate::geometry::{Finger, Hand};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, info, warn};

/// Finger assigned to a classifier code that names no known finger.
const FALLBACK_FINGER: Finger = Finger::LeftIndex;

/// Qualitative movement category of a finger triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize)]
pub enum Movement {
    #[strum(serialize = "sfb")]
    Sfb,
    #[strum(to_string = "alt", serialize = "alternate")]
    Alternate,
    #[strum(to_string = "roll-in", serialize = "roll_in")]
    RollIn,
    #[strum(to_string = "roll-out", serialize = "roll_out")]
    RollOut,
    #[strum(to_string = "oneh-in", serialize = "oneh_in")]
    OneHandIn,
    #[strum(to_string = "oneh-out", serialize = "oneh_out")]
    OneHandOut,
    #[strum(serialize = "redirect")]
    Redirect,
    #[strum(to_string = "bad-redirect", serialize = "bad_redirect")]
    BadRedirect,
    #[strum(to_string = "dsfb-red", serialize = "dsfb_red")]
    DsfbRedirect,
    #[strum(to_string = "dsfb-alt", serialize = "dsfb_alt")]
    DsfbAlternate,
}

pub type FingerTriple = (Finger, Finger, Finger);

/// Exact-match table from canonical finger triples to movements. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct MovementClassifier {
    table: HashMap<FingerTriple, Movement>,
}

impl MovementClassifier {
    pub fn from_map(table: HashMap<FingerTriple, Movement>) -> Self {
        let table = table
            .into_iter()
            .map(|((a, b, c), m)| (canonical((a, b, c)), m))
            .collect();
        Self { table }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// `None` means unclassified, which is a normal outcome.
    #[inline]
    pub fn classify(&self, f1: Finger, f2: Finger, f3: Finger) -> Option<Movement> {
        self.table.get(&canonical((f1, f2, f3))).copied()
    }

    /// Degenerate two-finger case: only same-finger detection applies.
    #[inline]
    pub fn classify_bigram(f1: Finger, f2: Finger) -> Option<Movement> {
        if f1.canonicalize_for_lookup() == f2.canonicalize_for_lookup() {
            Some(Movement::Sfb)
        } else {
            None
        }
    }

    /// Parses `{ "LPLRLM": "roll-in", ... }`.
    ///
    /// Keys that are not six characters long and unknown labels are skipped; a
    /// finger code that names no finger falls back to the left index.
    pub fn from_json_str(json: &str) -> KsResult<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        let mut table = HashMap::with_capacity(raw.len());

        for (code, label) in raw {
            let Some(triple) = parse_code(&code) else {
                warn!("⚠️  Skipping classifier key '{}': expected 6 characters", code);
                continue;
            };
            let Ok(movement) = Movement::from_str(label.trim()) else {
                warn!(
                    "⚠️  Skipping classifier key '{}': unknown category '{}'",
                    code, label
                );
                continue;
            };
            table.insert(canonical(triple), movement);
        }

        debug!("   Classifier table has {} entries", table.len());
        Ok(Self { table })
    }

    pub fn from_reader<R: Read>(mut reader: R) -> KsResult<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_json_str(&content)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> KsResult<Self> {
        let path = path.as_ref();
        info!("🧭 Loading Classifier: {}", path.display());
        Self::from_reader(File::open(path)?)
    }

    /// Builds the table for every triple of the eight non-thumb fingers.
    pub fn standard() -> Self {
        let fingers: Vec<Finger> = Finger::iter().filter(|f| !f.is_thumb()).collect();
        let mut table = HashMap::with_capacity(fingers.len().pow(3));

        for &f1 in &fingers {
            for &f2 in &fingers {
                for &f3 in &fingers {
                    table.insert((f1, f2, f3), standard_movement(f1, f2, f3));
                }
            }
        }
        Self { table }
    }
}

/// Uses the table at `path` when given, the built-in table otherwise.
pub fn load_classifier(path: Option<&Path>) -> KsResult<MovementClassifier> {
    match path {
        Some(p) => MovementClassifier::load(p),
        None => {
            debug!("   Using built-in movement table");
            Ok(MovementClassifier::standard())
        }
    }
}

fn canonical((a, b, c): FingerTriple) -> FingerTriple {
    (
        a.canonicalize_for_lookup(),
        b.canonicalize_for_lookup(),
        c.canonicalize_for_lookup(),
    )
}

fn parse_code(code: &str) -> Option<FingerTriple> {
    let chars: Vec<char> = code.trim().chars().collect();
    if chars.len() != 6 {
        return None;
    }
    let finger = |i: usize| -> Finger {
        let sym: String = chars[i..i + 2].iter().collect::<String>().to_uppercase();
        Finger::from_str(&sym).unwrap_or_else(|_| {
            warn!(
                "⚠️  Unknown finger code '{}' in '{}', using {}",
                sym, code, FALLBACK_FINGER
            );
            FALLBACK_FINGER
        })
    };
    Some((finger(0), finger(2), finger(4)))
}

/// Direction of travel between two fingers of one hand, relative to the index.
fn direction(from: Finger, to: Finger) -> Ordering {
    match (from.reach(), to.reach()) {
        // Inward (toward the index) is Less.
        (Some(a), Some(b)) => b.cmp(&a),
        _ => Ordering::Equal,
    }
}

fn roll(from: Finger, to: Finger) -> Movement {
    match direction(from, to) {
        Ordering::Less => Movement::RollIn,
        _ => Movement::RollOut,
    }
}

fn standard_movement(f1: Finger, f2: Finger, f3: Finger) -> Movement {
    if f1 == f2 || f2 == f3 {
        return Movement::Sfb;
    }

    let (h1, h2, h3): (Hand, Hand, Hand) = (f1.hand(), f2.hand(), f3.hand());

    if h1 != h2 && h2 != h3 {
        return if f1 == f3 {
            Movement::DsfbAlternate
        } else {
            Movement::Alternate
        };
    }

    if h1 == h2 && h2 == h3 {
        if f1 == f3 {
            return Movement::DsfbRedirect;
        }
        let first = direction(f1, f2);
        let second = direction(f2, f3);
        return if first == second {
            match first {
                Ordering::Less => Movement::OneHandIn,
                _ => Movement::OneHandOut,
            }
        } else if [f1, f2, f3].iter().any(|f| f.is_index()) {
            Movement::Redirect
        } else {
            Movement::BadRedirect
        };
    }

    // Two keys on one hand, one on the other.
    if h1 == h2 {
        roll(f1, f2)
    } else {
        roll(f2, f3)
    }
}
