//! Dict (dictionary) observation/action space

use super::{DynSpace, Space};
use crate::env::Action;
use rand::Rng;
use std::collections::BTreeMap;

/// Dictionary space containing named sub-spaces.
///
/// Keys are kept ordered so seeded sampling is reproducible.
#[derive(Clone, Debug)]
pub struct Dict {
    /// Named sub-spaces
    pub spaces: BTreeMap<String, DynSpace>,
    /// Cached total shape (sum of all sub-space shapes)
    shape: Vec<usize>,
}

impl Dict {
    /// Create a new dict space
    pub fn new(spaces: BTreeMap<String, DynSpace>) -> Self {
        let total: usize = spaces.values().map(|s| s.shape().iter().product::<usize>()).sum();
        Self {
            spaces,
            shape: vec![total],
        }
    }

    /// Create from a list of (name, space) pairs
    pub fn from_pairs(pairs: Vec<(&str, DynSpace)>) -> Self {
        let spaces = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Self::new(spaces)
    }

    /// Return a copy of this space with one more entry
    pub fn with(&self, name: &str, space: DynSpace) -> Self {
        let mut spaces = self.spaces.clone();
        spaces.insert(name.to_string(), space);
        Self::new(spaces)
    }

    /// Get a sub-space by name
    pub fn get(&self, name: &str) -> Option<&DynSpace> {
        self.spaces.get(name)
    }

    /// Get all space names
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.spaces.keys()
    }
}

impl Space for Dict {
    type Sample = BTreeMap<String, Action>;

    fn sample<R: Rng>(&self, rng: &mut R) -> Self::Sample {
        self.spaces
            .iter()
            .map(|(k, v)| (k.clone(), v.sample(rng)))
            .collect()
    }

    fn contains(&self, value: &Self::Sample) -> bool {
        value.len() == self.spaces.len()
            && self
                .spaces
                .iter()
                .all(|(k, s)| value.get(k).is_some_and(|a| s.contains_action(a)))
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spaces::{Box as BoxSpace, Discrete, Text};

    #[test]
    fn test_dict_creation() {
        let dict = Dict::from_pairs(vec![
            ("pov", DynSpace::Box(BoxSpace::uniform(&[3, 3, 3], 0.0, 10.0))),
            ("action", DynSpace::Discrete(Discrete::new(4))),
        ]);

        assert!(dict.get("pov").is_some());
        assert!(dict.get("action").is_some());
        assert!(dict.get("unknown").is_none());
        assert_eq!(dict.shape(), &[28]);
    }

    #[test]
    fn test_dict_with_adds_entry() {
        let dict = Dict::from_pairs(vec![("pov", DynSpace::Discrete(Discrete::new(2)))]);
        let extended = dict.with("messages", DynSpace::Text(Text::new(8, 4)));

        assert_eq!(extended.keys().count(), 2);
        assert!(dict.get("messages").is_none());
        assert_eq!(extended.shape(), &[9]);
    }
}
