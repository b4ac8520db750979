//! Text space: bounded-length strings over a finite character set

use super::Space;
use rand::Rng;

/// Characters a `Text` vocabulary is drawn from, in order.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Strings of at most `max_length` characters, each taken from `charset`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text {
    /// Maximum number of characters
    pub max_length: usize,
    /// Allowed characters
    pub charset: Vec<char>,
    shape: Vec<usize>,
}

impl Text {
    /// Create a text space using the first `vocab_size` letters of [`ALPHABET`].
    ///
    /// Panics when `vocab_size` is zero or exceeds the alphabet; callers that
    /// take the size from configuration validate it first.
    pub fn new(max_length: usize, vocab_size: usize) -> Self {
        assert!(
            (1..=ALPHABET.len()).contains(&vocab_size),
            "Text vocabulary must hold between 1 and {} characters",
            ALPHABET.len()
        );
        Self::with_charset(max_length, ALPHABET.chars().take(vocab_size).collect())
    }

    /// Create a text space from an explicit character set
    pub fn with_charset(max_length: usize, charset: Vec<char>) -> Self {
        Self {
            max_length,
            charset,
            shape: vec![max_length],
        }
    }
}

impl Space for Text {
    type Sample = String;

    fn sample<R: Rng>(&self, rng: &mut R) -> Self::Sample {
        let len = rng.gen_range(0..=self.max_length);
        (0..len)
            .map(|_| self.charset[rng.gen_range(0..self.charset.len())])
            .collect()
    }

    fn contains(&self, value: &Self::Sample) -> bool {
        value.chars().count() <= self.max_length && value.chars().all(|c| self.charset.contains(&c))
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_text_sample() {
        let space = Text::new(5, 3);
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);

        for _ in 0..100 {
            let sample = space.sample(&mut rng);
            assert!(sample.chars().count() <= 5);
            assert!(sample.chars().all(|c| matches!(c, 'a' | 'b' | 'c')));
        }
    }

    #[test]
    fn test_text_contains() {
        let space = Text::new(3, 2);
        assert!(space.contains(&String::new()));
        assert!(space.contains(&"aba".to_string()));
        assert!(!space.contains(&"abab".to_string()));
        assert!(!space.contains(&"c".to_string()));
    }

    #[test]
    #[should_panic]
    fn test_text_rejects_oversized_vocab() {
        Text::new(3, 27);
    }
}
