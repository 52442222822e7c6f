//! Per-class scores returned by a classifier.

/// One score per class, indexed by label.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoricalResults {
    probs: Vec<f64>,
}

impl CategoricalResults {
    /// All-zero results for `n_classes` classes.
    pub fn new(n_classes: usize) -> Self {
        Self {
            probs: vec![0.0; n_classes],
        }
    }

    pub fn from_probs(probs: Vec<f64>) -> Self {
        Self { probs }
    }

    /// Number of classes.
    pub fn size(&self) -> usize {
        self.probs.len()
    }

    /// Score of class `index`, `0.0` outside the known classes.
    pub fn prob(&self, index: usize) -> f64 {
        self.probs.get(index).copied().unwrap_or(0.0)
    }

    pub fn set_prob(&mut self, index: usize, prob: f64) {
        self.probs[index] = prob;
    }

    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    /// Class with the highest score; ties go to the lowest index.
    ///
    /// `None` when there are no classes.
    pub fn most_likely(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &p) in self.probs.iter().enumerate() {
            if best.map_or(true, |(_, b)| p > b) {
                best = Some((i, p));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Scale scores to sum to one. All-zero results are left unchanged.
    pub fn normalize(&mut self) {
        let total: f64 = self.probs.iter().sum();
        if total > 0.0 {
            self.probs.iter_mut().for_each(|p| *p /= total);
        }
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.probs
    }
}
