use crate::corpus::CorpusStats;
use super::types::Count;
use crate::layout::SPACE;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ngram<const N: usize> {
    pub keys: [char; N],
    pub count: u64,
}

impl<const N: usize> Ngram<N> {
    fn from_entry(seq: &str, count: u64) -> Option<Self> {
        let mut keys = [SPACE; N];
        let mut chars = seq.chars();
        for slot in keys.iter_mut() {
            *slot = chars.next()?;
        }
        if chars.next().is_some() {
            return None;
        }
        Some(Ngram { keys, count })
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.keys.contains(&c)
    }
}

/// Corpus tables filtered to one key set, with every n-gram indexed by the
/// characters it contains.
///
/// Eligibility only depends on the key set, so a single index serves every layout
/// that is a permutation of the same keys.
#[derive(Debug, Clone, Default)]
pub struct IndexedCorpus {
    pub monograms: Vec<Ngram<1>>,
    pub bigrams: Vec<Ngram<2>>,
    pub trigrams: Vec<Ngram<3>>,

    pub total_chars: Count,
    pub total_bigrams: Count,
    pub total_trigrams: Count,

    monogram_refs: HashMap<char, usize>,
    bigram_refs: HashMap<char, Vec<usize>>,
    trigram_refs: HashMap<char, Vec<usize>>,
}

impl IndexedCorpus {
    pub fn new(corpus: &CorpusStats, valid_keys: &HashSet<char>) -> Self {
        let valid = |keys: &[char]| keys.iter().all(|c| valid_keys.contains(c));

        let mut monograms: Vec<Ngram<1>> = corpus
            .monograms
            .iter()
            .filter_map(|(s, &n)| Ngram::<1>::from_entry(s, n))
            .filter(|g| valid(&g.keys[..]))
            .collect();

        // A repeat ("ee") is not a same-finger bigram and is left out entirely.
        let mut bigrams: Vec<Ngram<2>> = corpus
            .bigrams
            .iter()
            .filter_map(|(s, &n)| Ngram::<2>::from_entry(s, n))
            .filter(|g| valid(&g.keys[..]) && !g.contains(SPACE) && g.keys[0] != g.keys[1])
            .collect();

        let mut trigrams: Vec<Ngram<3>> = corpus
            .trigrams
            .iter()
            .filter_map(|(s, &n)| Ngram::<3>::from_entry(s, n))
            .filter(|g| valid(&g.keys[..]) && !g.contains(SPACE))
            .collect();

        monograms.sort_unstable_by_key(|g| g.keys);
        bigrams.sort_unstable_by_key(|g| g.keys);
        trigrams.sort_unstable_by_key(|g| g.keys);

        let monogram_refs = monograms
            .iter()
            .enumerate()
            .map(|(i, g)| (g.keys[0], i))
            .collect();

        Self {
            total_chars: sum_counts(&monograms),
            total_bigrams: sum_counts(&bigrams),
            total_trigrams: sum_counts(&trigrams),
            bigram_refs: build_refs(&bigrams),
            trigram_refs: build_refs(&trigrams),
            monogram_refs,
            monograms,
            bigrams,
            trigrams,
        }
    }

    pub fn monogram(&self, c: char) -> Option<&Ngram<1>> {
        self.monogram_refs.get(&c).map(|&i| &self.monograms[i])
    }

    /// Every bigram containing `a` or `b`, each exactly once.
    pub fn bigrams_touching(&self, a: char, b: char) -> impl Iterator<Item = &Ngram<2>> {
        touching(&self.bigram_refs, &self.bigrams, a, b)
    }

    /// Every trigram containing `a` or `b`, each exactly once.
    pub fn trigrams_touching(&self, a: char, b: char) -> impl Iterator<Item = &Ngram<3>> {
        touching(&self.trigram_refs, &self.trigrams, a, b)
    }
}

fn sum_counts<const N: usize>(grams: &[Ngram<N>]) -> Count {
    grams.iter().map(|g| Count::from(g.count)).sum()
}

fn build_refs<const N: usize>(grams: &[Ngram<N>]) -> HashMap<char, Vec<usize>> {
    let mut refs: HashMap<char, Vec<usize>> = HashMap::new();
    for (i, g) in grams.iter().enumerate() {
        for (k, &c) in g.keys.iter().enumerate() {
            // "aba" is listed once under 'a'
            if g.keys[..k].contains(&c) {
                continue;
            }
            refs.entry(c).or_default().push(i);
        }
    }
    refs
}

fn touching<'a, const N: usize>(
    refs: &'a HashMap<char, Vec<usize>>,
    grams: &'a [Ngram<N>],
    a: char,
    b: char,
) -> impl Iterator<Item = &'a Ngram<N>> + 'a {
    let of = move |c: char| refs.get(&c).map(Vec::as_slice).unwrap_or(&[]);
    let from_a = of(a).iter().map(move |&i| &grams[i]);
    // Anything holding `a` was already visited.
    let from_b = of(b)
        .iter()
        .map(move |&i| &grams[i])
        .filter(move |g| !g.contains(a));
    from_a.chain(from_b)
}
