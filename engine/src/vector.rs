use crate::tokenizer::max_frequency;
use std::collections::BTreeMap;

/// Sparse TF-IDF weight vector with its Euclidean magnitude cached.
///
/// Only terms with a nonzero term frequency are stored. Terms absent from the
/// source text weigh `0 * idf = 0` in the dense form, so the cached magnitude
/// equals the magnitude over the whole vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    weights: BTreeMap<String, f64>,
    magnitude: f64,
}

impl TermVector {
    pub fn from_weights(weights: BTreeMap<String, f64>) -> Self {
        let magnitude = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        Self { weights, magnitude }
    }

    /// Weight every counted term as `tf / maxFreq * idf`. Terms for which `idf`
    /// returns `None` are left out.
    pub fn weighted<F>(tf: &BTreeMap<String, u32>, idf: F) -> Self
    where
        F: Fn(&str) -> Option<f64>,
    {
        let max_freq = f64::from(max_frequency(tf));
        let weights = tf
            .iter()
            .filter_map(|(term, &count)| {
                idf(term).map(|idf| (term.clone(), f64::from(count) / max_freq * idf))
            })
            .collect();
        Self::from_weights(weights)
    }

    pub fn get(&self, term: &str) -> Option<f64> { self.weights.get(term).copied() }

    pub fn magnitude(&self) -> f64 { self.magnitude }

    pub fn len(&self) -> usize { self.weights.len() }

    pub fn is_empty(&self) -> bool { self.weights.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.weights.iter().map(|(t, &w)| (t.as_str(), w))
    }
}

/// Cosine of the angle between two vectors.
///
/// The dot product runs over shared terms; each magnitude covers all of that
/// vector's entries. Returns 0.0 when either magnitude is zero. Scores are not
/// renormalized.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    if a.magnitude == 0.0 || b.magnitude == 0.0 {
        return 0.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .weights
        .iter()
        .filter_map(|(term, w)| large.weights.get(term).map(|v| w * v))
        .sum();
    dot / (a.magnitude * b.magnitude)
}
