mod common;

use keysweep::classifier::MovementClassifier;
use keysweep::config::{ScoreMode, ScoringWeights};
use keysweep::corpus::CorpusStats;
use keysweep::layouts::{get_all_layouts, KnownLayout};
use keysweep::scorer::{IndexedCorpus, Metrics, Scorer};

const EPS: f64 = 1e-9;

#[test]
fn test_same_finger_bigrams_are_all_sfb() {
    // 'a' and 'b' share the left pinky column.
    let layout = common::layout("t:\na\nb\n");
    let corpus = common::corpus(&[("ab", 10), ("ba", 5), ("cc", 100)]);
    let scorer = common::scorer(ScoreMode::Sfb);

    let indexed = IndexedCorpus::new(&corpus, layout.valid_keys());
    let tally = scorer.tally(&layout, &indexed);
    assert_eq!(tally.total_bigrams, 15);
    assert_eq!(tally.sfb, 15);

    let m = scorer.evaluate(&layout, &corpus);
    assert!((m.sfb - 100.0).abs() < EPS);
}

#[test]
fn test_sfb_is_not_halved() {
    let layout = common::layout("t:\na\nb\nc | d\n");
    let corpus = common::corpus(&[("ab", 1), ("ba", 1), ("cd", 2)]);
    let m = common::scorer(ScoreMode::Sfb).evaluate(&layout, &corpus);

    // Both directions count in full against the same denominator.
    assert!((m.sfb - 50.0).abs() < EPS);
}

#[test]
fn test_hand_balance() {
    let layout = common::layout("t:\na | b\n");
    let corpus = common::corpus(&[("a", 30), ("b", 70)]);
    let m = common::scorer(ScoreMode::Weighted).evaluate(&layout, &corpus);

    assert!((m.right_hand - 70.0).abs() < EPS);
    assert!((m.left_hand - 30.0).abs() < EPS);
}

#[test]
fn test_space_counts_for_the_right_hand() {
    let layout = common::layout("t:\na | b\n");
    let corpus = common::corpus(&[(" ", 50), ("a", 50)]);
    let m = common::scorer(ScoreMode::Weighted).evaluate(&layout, &corpus);

    assert!((m.right_hand - 50.0).abs() < EPS);
}

#[test]
fn test_ineligible_ngrams_are_excluded_from_totals() {
    let layout = common::layout("t:\na\nb\n");
    let corpus = common::corpus(&[
        ("aa", 99), // repeat
        ("a ", 50), // space
        ("a€", 40), // not on the layout
        ("ab", 10),
        ("ab ", 7),
        ("abx", 3),
        ("€", 1000),
        ("a", 10),
    ]);
    let scorer = common::scorer(ScoreMode::Weighted);
    let indexed = IndexedCorpus::new(&corpus, layout.valid_keys());
    let tally = scorer.tally(&layout, &indexed);

    assert_eq!(tally.total_bigrams, 10);
    assert_eq!(tally.total_trigrams, 0);
    assert_eq!(tally.total_chars, 10);
}

#[test]
fn test_trigram_buckets() {
    let layout = KnownLayout::Qwerty.layout().unwrap();
    let corpus = common::corpus(&[("qwq", 1), ("qaz", 1), ("qwe", 2)]);
    let m = common::scorer(ScoreMode::Weighted).evaluate(&layout, &corpus);

    // qwq: LP LR LP, qaz: LP LP LP, qwe: LP LR LM
    assert!((m.dsfb_red - 25.0).abs() < EPS);
    assert!((m.trigram_sfb - 25.0).abs() < EPS);
    assert!((m.oneh_in - 50.0).abs() < EPS);
    // Skipgram and plain repeat both count as same-finger.
    assert!((m.sfs - 50.0).abs() < EPS);
    assert!(m.unclassified.abs() < EPS);
}

#[test]
fn test_unmapped_triples_are_unclassified() {
    let layout = KnownLayout::Qwerty.layout().unwrap();
    let corpus = common::corpus(&[("qwe", 3), ("jkl", 1)]);
    let scorer = Scorer::new(
        MovementClassifier::default(),
        ScoringWeights::default(),
        ScoreMode::Weighted,
    );
    let m = scorer.evaluate(&layout, &corpus);

    assert!((m.unclassified - 100.0).abs() < EPS);
    assert!(m.oneh_in.abs() < EPS);
}

#[test]
fn test_empty_corpus_yields_zero_metrics() {
    let layout = KnownLayout::Semimak.layout().unwrap();
    let scorer = common::scorer(ScoreMode::Weighted);
    let m = scorer.evaluate(&layout, &CorpusStats::default());

    assert_eq!(m, Metrics::default());
    assert_eq!(scorer.score(&m), 0.0);
}

#[test]
fn test_score_modes() {
    let layout = KnownLayout::Qwerty.layout().unwrap();
    let corpus = common::sample_corpus();

    let sfb = common::scorer(ScoreMode::Sfb);
    let m = sfb.evaluate(&layout, &corpus);
    assert_eq!(sfb.score(&m), m.sfb);

    let weighted = common::scorer(ScoreMode::Weighted);
    let w = ScoringWeights::default();
    let expected = m.sfb * w.weight_sfb
        + m.sfs * w.weight_sfs
        + m.redirect * w.weight_redirect
        + m.bad_redirect * w.weight_bad_redirect
        + (m.right_hand - 50.0).abs() * w.weight_imbalance
        - m.roll_in * w.bonus_roll_in
        - m.roll_out * w.bonus_roll_out
        - m.alternate * w.bonus_alternate;
    assert!((weighted.score(&m) - expected).abs() < EPS);
    assert!((weighted.score_layout(&layout, &corpus) - expected).abs() < EPS);
}

#[test]
fn test_evaluate_is_pure() {
    let layout = KnownLayout::Dvorak.layout().unwrap();
    let corpus = common::sample_corpus();
    let (layout_before, corpus_before) = (layout.clone(), corpus.clone());
    let scorer = common::scorer(ScoreMode::Weighted);

    let first = scorer.evaluate(&layout, &corpus);
    let second = scorer.evaluate(&layout, &corpus);

    assert_eq!(first, second);
    assert_eq!(layout, layout_before);
    assert_eq!(corpus, corpus_before);
}

#[test]
fn test_metrics_are_percentages_on_real_layouts() {
    let corpus = common::sample_corpus();
    let scorer = common::scorer(ScoreMode::Weighted);

    for known in get_all_layouts() {
        let m = scorer.evaluate(&known.layout().unwrap(), &corpus);
        for (label, value) in m.fields() {
            assert!(
                (0.0..=100.0 + EPS).contains(&value),
                "{} {} = {}",
                known,
                label,
                value
            );
        }

        let buckets = m.trigram_sfb
            + m.alternate
            + m.roll_in
            + m.roll_out
            + m.oneh_in
            + m.oneh_out
            + m.redirect
            + m.bad_redirect
            + m.dsfb_red
            + m.dsfb_alt
            + m.unclassified;
        assert!((buckets - 100.0).abs() < 1e-6, "{}: {}", known, buckets);
        assert!((m.left_hand + m.right_hand - 100.0).abs() < 1e-6);
    }
}

#[test]
fn test_colemak_beats_qwerty_on_sfb() {
    let corpus = common::sample_corpus();
    let scorer = common::scorer(ScoreMode::Sfb);
    let qwerty = scorer.score_layout(&KnownLayout::Qwerty.layout().unwrap(), &corpus);
    let colemak = scorer.score_layout(&KnownLayout::Colemak.layout().unwrap(), &corpus);

    assert!(colemak < qwerty, "colemak {} vs qwerty {}", colemak, qwerty);
}

#[test]
fn test_counts_near_u64_max_do_not_overflow() {
    let layout = KnownLayout::Qwerty.layout().unwrap();
    let corpus = common::corpus(&[
        ("a", u64::MAX - 5),
        ("p", 10),
        ("aq", u64::MAX),
        ("qa", u64::MAX),
        ("th", 1),
        ("the", u64::MAX),
        ("and", u64::MAX),
    ]);
    let scorer = common::scorer(ScoreMode::Weighted);

    let indexed = IndexedCorpus::new(&corpus, layout.valid_keys());
    let tally = scorer.tally(&layout, &indexed);
    assert_eq!(tally.total_chars, u64::MAX as u128 + 5);
    assert_eq!(tally.total_bigrams, 2 * u64::MAX as u128 + 1);
    assert_eq!(tally.sfb, 2 * u64::MAX as u128);
    assert_eq!(tally.total_trigrams, 2 * u64::MAX as u128);

    let m = scorer.evaluate(&layout, &corpus);
    for (label, value) in m.fields() {
        assert!((0.0..=100.0 + EPS).contains(&value), "{} = {}", label, value);
    }
    assert!(m.left_hand > 99.9);
    assert!(m.sfb > 99.9);
    assert!(scorer.score(&m).is_finite());
}
