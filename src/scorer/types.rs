use crate::classifier::Movement;
use serde::Serialize;
use std::ops::{AddAssign, SubAssign};

/// Accumulated n-gram count. Wider than a single corpus count so sums of `u64`
/// entries never overflow.
pub type Count = u128;

/// Raw counts behind a [`Metrics`] record.
///
/// The three `total_*` fields are the eligible denominators. They depend only on the
/// layout's key set, so they stay constant across swaps and a swap can be applied
/// as `tally -= before; tally += after` over the n-grams it touches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub total_bigrams: Count,
    pub sfb: Count,

    pub total_trigrams: Count,
    pub sfs: Count,
    pub trigram_sfb: Count,
    pub alternate: Count,
    pub roll_in: Count,
    pub roll_out: Count,
    pub oneh_in: Count,
    pub oneh_out: Count,
    pub redirect: Count,
    pub bad_redirect: Count,
    pub dsfb_red: Count,
    pub dsfb_alt: Count,
    pub unclassified: Count,

    pub total_chars: Count,
    pub left_hand: Count,
    pub right_hand: Count,
}

impl Tally {
    pub fn bucket_mut(&mut self, movement: Option<Movement>) -> &mut Count {
        match movement {
            Some(Movement::Sfb) => &mut self.trigram_sfb,
            Some(Movement::Alternate) => &mut self.alternate,
            Some(Movement::RollIn) => &mut self.roll_in,
            Some(Movement::RollOut) => &mut self.roll_out,
            Some(Movement::OneHandIn) => &mut self.oneh_in,
            Some(Movement::OneHandOut) => &mut self.oneh_out,
            Some(Movement::Redirect) => &mut self.redirect,
            Some(Movement::BadRedirect) => &mut self.bad_redirect,
            Some(Movement::DsfbRedirect) => &mut self.dsfb_red,
            Some(Movement::DsfbAlternate) => &mut self.dsfb_alt,
            None => &mut self.unclassified,
        }
    }
}

macro_rules! tally_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Tally {
            fn $method(&mut self, rhs: Tally) {
                self.total_bigrams $op rhs.total_bigrams;
                self.sfb $op rhs.sfb;
                self.total_trigrams $op rhs.total_trigrams;
                self.sfs $op rhs.sfs;
                self.trigram_sfb $op rhs.trigram_sfb;
                self.alternate $op rhs.alternate;
                self.roll_in $op rhs.roll_in;
                self.roll_out $op rhs.roll_out;
                self.oneh_in $op rhs.oneh_in;
                self.oneh_out $op rhs.oneh_out;
                self.redirect $op rhs.redirect;
                self.bad_redirect $op rhs.bad_redirect;
                self.dsfb_red $op rhs.dsfb_red;
                self.dsfb_alt $op rhs.dsfb_alt;
                self.unclassified $op rhs.unclassified;
                self.total_chars $op rhs.total_chars;
                self.left_hand $op rhs.left_hand;
                self.right_hand $op rhs.right_hand;
            }
        }
    };
}

tally_op!(AddAssign, add_assign, +=);
tally_op!(SubAssign, sub_assign, -=);

/// Percentages (0-100) of each eligible total.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    // Bigrams
    pub sfb: f64,

    // Trigrams
    pub sfs: f64,
    pub dsfb_red: f64,
    pub dsfb_alt: f64,
    pub trigram_sfb: f64,
    pub alternate: f64,
    pub roll_in: f64,
    pub roll_out: f64,
    pub oneh_in: f64,
    pub oneh_out: f64,
    pub redirect: f64,
    pub bad_redirect: f64,
    pub unclassified: f64,

    // Monograms
    pub left_hand: f64,
    pub right_hand: f64,
}

impl Metrics {
    /// Every field with its report label, in display order.
    pub fn fields(&self) -> [(&'static str, f64); 15] {
        [
            ("SFB", self.sfb),
            ("SFS", self.sfs),
            ("SFS (redirect)", self.dsfb_red),
            ("SFS (alternate)", self.dsfb_alt),
            ("Trigram SFB", self.trigram_sfb),
            ("Alternate", self.alternate),
            ("Roll In", self.roll_in),
            ("Roll Out", self.roll_out),
            ("One-hand In", self.oneh_in),
            ("One-hand Out", self.oneh_out),
            ("Redirect", self.redirect),
            ("Bad Redirect", self.bad_redirect),
            ("Unclassified", self.unclassified),
            ("Left Hand", self.left_hand),
            ("Right Hand", self.right_hand),
        ]
    }
}

#[inline]
pub fn percent(count: Count, total: Count) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

impl From<&Tally> for Metrics {
    fn from(t: &Tally) -> Self {
        let tri = |n: Count| percent(n, t.total_trigrams);
        let right_hand = percent(t.right_hand, t.total_chars);
        let left_hand = if t.total_chars == 0 {
            0.0
        } else {
            100.0 - right_hand
        };

        Metrics {
            sfb: percent(t.sfb, t.total_bigrams),
            sfs: tri(t.sfs),
            dsfb_red: tri(t.dsfb_red),
            dsfb_alt: tri(t.dsfb_alt),
            trigram_sfb: tri(t.trigram_sfb),
            alternate: tri(t.alternate),
            roll_in: tri(t.roll_in),
            roll_out: tri(t.roll_out),
            oneh_in: tri(t.oneh_in),
            oneh_out: tri(t.oneh_out),
            redirect: tri(t.redirect),
            bad_redirect: tri(t.bad_redirect),
            unclassified: tri(t.unclassified),
            left_hand,
            right_hand,
        }
    }
}
