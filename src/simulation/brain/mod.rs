//! Feed-forward network usable as an agent policy.
//!
//! The network's outputs are scores, one per action; the policy picks the
//! highest. Training the weights happens outside this crate.

use ndarray::Array1;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::policy::Policy;

pub mod mlp;

pub use mlp::Mlp;

/// Multi-layer perceptron with tanh activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brain {
    /// Ordered layers from input to output.
    pub layers: Vec<Mlp>,
}

impl Brain {
    /// Creates a new brain with random weights.
    ///
    /// `layer_sizes` lists the input size, hidden sizes and output size.
    pub fn new(layer_sizes: &[usize], scale: f32) -> Self {
        let layers = layer_sizes
            .windows(2)
            .map(|pair| Mlp::new_random(pair[0], pair[1], scale))
            .collect();

        Self { layers }
    }

    /// Creates a brain whose weights are fully determined by `seed`.
    pub fn seeded(layer_sizes: &[usize], scale: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let layers = layer_sizes
            .windows(2)
            .map(|pair| Mlp::new_using(pair[0], pair[1], scale, &mut rng))
            .collect();

        Self { layers }
    }

    /// Runs a forward pass through the brain.
    #[inline]
    pub fn think(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = inputs.clone();
        for layer in &self.layers {
            output = layer.forward(&output);
        }
        output
    }
}

/// Index of the largest value; the first one wins ties. 0 for empty input.
pub fn argmax(values: &Array1<f32>) -> usize {
    let mut best = 0;
    for (i, value) in values.iter().enumerate() {
        if *value > values[best] {
            best = i;
        }
    }
    best
}

impl Policy for Brain {
    fn decide(&self, observation: &Array1<f32>) -> usize {
        argmax(&self.think(observation))
    }
}
