use super::index::{IndexedCorpus, Ngram};
use super::types::{Count, Tally};
use crate::classifier::MovementClassifier;
use crate::geometry::Hand;
use crate::layout::Layout;

/// Full Path: tallies every eligible n-gram of `corpus` on `layout`.
pub fn tally(layout: &Layout, classifier: &MovementClassifier, corpus: &IndexedCorpus) -> Tally {
    let mut t = Tally {
        total_bigrams: corpus.total_bigrams,
        total_trigrams: corpus.total_trigrams,
        total_chars: corpus.total_chars,
        ..Tally::default()
    };

    // 1. Bigrams
    for g in &corpus.bigrams {
        add_bigram(layout, g, &mut t);
    }

    // 2. Trigrams
    for g in &corpus.trigrams {
        add_trigram(layout, classifier, g, &mut t);
    }

    // 3. Hands
    for g in &corpus.monograms {
        add_monogram(layout, g, &mut t);
    }
    t
}

/// Delta Path: the share of the tally contributed by n-grams containing `a` or `b`.
///
/// Totals are left at zero since a swap never changes them. For a swap of `a` and
/// `b`, `full - touching(before) + touching(after)` equals the full tally of the
/// swapped layout.
pub fn tally_touching(
    layout: &Layout,
    classifier: &MovementClassifier,
    corpus: &IndexedCorpus,
    a: char,
    b: char,
) -> Tally {
    let mut t = Tally::default();

    for g in corpus.bigrams_touching(a, b) {
        add_bigram(layout, g, &mut t);
    }
    for g in corpus.trigrams_touching(a, b) {
        add_trigram(layout, classifier, g, &mut t);
    }
    for c in if a == b { vec![a] } else { vec![a, b] } {
        if let Some(g) = corpus.monogram(c) {
            add_monogram(layout, g, &mut t);
        }
    }
    t
}

#[inline(always)]
fn add_bigram(layout: &Layout, g: &Ngram<2>, t: &mut Tally) {
    let [c1, c2] = g.keys;
    let (Some(f1), Some(f2)) = (layout.finger_of(c1), layout.finger_of(c2)) else {
        return;
    };
    if f1 == f2 {
        t.sfb += Count::from(g.count);
    }
}

#[inline(always)]
fn add_trigram(layout: &Layout, classifier: &MovementClassifier, g: &Ngram<3>, t: &mut Tally) {
    let [c1, c2, c3] = g.keys;
    let (Some(f1), Some(f2), Some(f3)) = (
        layout.finger_of(c1),
        layout.finger_of(c2),
        layout.finger_of(c3),
    ) else {
        return;
    };

    let count = Count::from(g.count);
    *t.bucket_mut(classifier.classify(f1, f2, f3)) += count;

    // Skipgrams count too (f1 == f3 around a different middle finger).
    if f1 == f2 || f2 == f3 || f1 == f3 {
        t.sfs += count;
    }
}

#[inline(always)]
fn add_monogram(layout: &Layout, g: &Ngram<1>, t: &mut Tally) {
    match layout.hand_of(g.keys[0]) {
        Some(Hand::Left) => t.left_hand += Count::from(g.count),
        Some(Hand::Right) => t.right_hand += Count::from(g.count),
        None => {}
    }
}
