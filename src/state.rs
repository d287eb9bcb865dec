//! Scratch buffers for a single forward pass.

use crate::config::ModelConfig;

/// Preallocated buffers for one prediction, sized from the config.
#[derive(Debug, Clone)]
pub struct ModelState {
    /// Concatenated window embeddings, seq_len * embed_dim
    pub x: Vec<f32>,
    /// Hidden activations, hidden_dim
    pub hb: Vec<f32>,
    /// Output probability distribution over the vocabulary
    pub probs: Vec<f32>,
}

impl ModelState {
    /// Allocate buffers based on config.
    pub fn new(config: &ModelConfig) -> Self {
        ModelState {
            x: vec![0.0; config.input_dim()],
            hb: vec![0.0; config.hidden_dim as usize],
            probs: vec![0.0; config.vocab_size as usize],
        }
    }
}
