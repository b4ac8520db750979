//! Bounded array space for egocentric grid images

use super::Space;
use ndarray::{ArrayD, IxDyn};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Arrays of a fixed shape whose elements all lie in `[low, high]`.
///
/// Grid views hold small integer codes, so a space built with
/// [`Box::codes`] only contains whole-numbered arrays and samples them.
#[derive(Clone, Debug, PartialEq)]
pub struct Box {
    pub low: f32,
    pub high: f32,
    /// Elements must be whole numbers
    pub integral: bool,
    shape: Vec<usize>,
}

impl Box {
    /// Real-valued arrays with every element in `[low, high]`
    pub fn uniform(shape: &[usize], low: f32, high: f32) -> Self {
        assert!(low <= high, "Box bounds out of order: {low} > {high}");
        Self {
            low,
            high,
            integral: false,
            shape: shape.to_vec(),
        }
    }

    /// Arrays of integer codes `0..=max`, e.g. a `[view, view, 3]` grid image
    pub fn codes(shape: &[usize], max: u8) -> Self {
        Self {
            integral: true,
            ..Self::uniform(shape, 0.0, f32::from(max))
        }
    }
}

impl Space for Box {
    type Sample = ArrayD<f32>;

    fn sample<R: Rng>(&self, rng: &mut R) -> Self::Sample {
        let shape = IxDyn(&self.shape);
        if self.integral {
            let (low, high) = (self.low as i32, self.high as i32);
            ArrayD::from_shape_simple_fn(shape, || rng.gen_range(low..=high) as f32)
        } else {
            let dist = Uniform::new_inclusive(self.low, self.high);
            ArrayD::from_shape_simple_fn(shape, || dist.sample(&mut *rng))
        }
    }

    fn contains(&self, value: &Self::Sample) -> bool {
        value.shape() == self.shape.as_slice()
            && value.iter().all(|&v| {
                v >= self.low && v <= self.high && (!self.integral || v.fract() == 0.0)
            })
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }
}
