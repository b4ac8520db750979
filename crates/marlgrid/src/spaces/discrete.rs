//! Finite choice space, optionally labelled

use super::Space;
use rand::Rng;

/// One of `n` choices `{0, 1, ..., n-1}`.
///
/// A labelled space names every choice, so action indices can be shown and
/// parsed by name (`"forward"` rather than `2`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Discrete {
    /// Number of choices
    pub n: usize,
    labels: Vec<&'static str>,
    shape: Vec<usize>,
}

impl Discrete {
    /// Unlabelled space of `n` choices
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "Discrete space must have at least 1 element");
        Self {
            n,
            labels: Vec::new(),
            shape: vec![1],
        }
    }

    /// One choice per label, in order
    pub fn labelled(labels: &[&'static str]) -> Self {
        Self {
            labels: labels.to_vec(),
            ..Self::new(labels.len())
        }
    }

    /// Name of choice `index`. Unlabelled spaces have none.
    pub fn label(&self, index: usize) -> Option<&'static str> {
        self.labels.get(index).copied()
    }

    /// Index of the choice called `label`
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| *l == label)
    }

    /// Display form of a choice: its label, or the bare index
    pub fn describe(&self, index: usize) -> String {
        match self.label(index) {
            Some(label) => label.to_string(),
            None => index.to_string(),
        }
    }
}

impl Space for Discrete {
    type Sample = usize;

    fn sample<R: Rng>(&self, rng: &mut R) -> Self::Sample {
        rng.gen_range(0..self.n)
    }

    fn contains(&self, value: &Self::Sample) -> bool {
        *value < self.n
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn num_elements(&self) -> usize {
        1
    }
}
