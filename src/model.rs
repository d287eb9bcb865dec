//! Predictor loading and forward pass.

use crate::config::ModelConfig;
use crate::error::{CaptionError, Result};
use crate::ops::{accum, matmul, matmul_par, softmax, tanh_inplace};
use crate::state::ModelState;
use crate::weights::ModelWeights;
use byteorder::{LittleEndian, ReadBytesExt};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Maps a fixed-length encoded window to a probability distribution over the
/// vocabulary. The decoding loop talks to the model only through this trait.
pub trait Predictor {
    /// Size of the output distribution, including the padding slot.
    fn vocab_size(&self) -> usize;

    /// Predict next-word probabilities for a window of token indices.
    fn predict(&self, window: &[i32]) -> Result<Vec<f32>>;
}

/// Load config and weights from a binary checkpoint file.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<(ModelConfig, ModelWeights)> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let config = ModelConfig {
        embed_dim: reader.read_i32::<LittleEndian>()?,
        hidden_dim: reader.read_i32::<LittleEndian>()?,
        vocab_size: reader.read_i32::<LittleEndian>()?,
        seq_len: reader.read_i32::<LittleEndian>()?,
    };
    if config.validate().is_err() {
        return Err(CaptionError::InvalidModel(format!(
            "implausible checkpoint header: {:?}",
            config
        )));
    }

    let weights = ModelWeights::load(&mut reader, &config)?;

    Ok((config, weights))
}

/// Fill `state.probs` with next-word probabilities for one window.
///
/// Precondition: `window.len() == config.window()` and every index is a valid
/// row of the embedding table.
pub fn forward(window: &[i32], config: &ModelConfig, state: &mut ModelState, weights: &ModelWeights) {
    let embed_dim = config.embed_dim as usize;

    // Gather and concatenate window embeddings
    for (slot, &id) in window.iter().enumerate() {
        let off = (id as usize) * embed_dim;
        state.x[slot * embed_dim..(slot + 1) * embed_dim]
            .copy_from_slice(&weights.embed[off..off + embed_dim]);
    }

    // Hidden layer
    matmul(&mut state.hb, &state.x, &weights.w1);
    accum(&mut state.hb, &weights.b1);
    tanh_inplace(&mut state.hb);

    // Vocabulary logits
    matmul_par(&mut state.probs, &state.hb, &weights.w2);
    accum(&mut state.probs, &weights.b2);

    softmax(&mut state.probs);
}

/// A loaded checkpoint: config plus weights, usable as a [`Predictor`].
#[derive(Debug, Clone)]
pub struct CaptionModel {
    config: ModelConfig,
    weights: ModelWeights,
}

impl CaptionModel {
    /// Wrap a config/weights pair, checking that the buffers match the
    /// dimensions the header claims.
    pub fn new(config: ModelConfig, weights: ModelWeights) -> Result<Self> {
        config.validate()?;

        let embed_dim = config.embed_dim as usize;
        let hidden_dim = config.hidden_dim as usize;
        let vocab = config.vocab_size as usize;
        let input_dim = config.input_dim();

        let ok = weights.embed.len() == vocab * embed_dim
            && weights.w1.len() == hidden_dim * input_dim
            && weights.b1.len() == hidden_dim
            && weights.w2.len() == vocab * hidden_dim
            && weights.b2.len() == vocab;
        if !ok {
            return Err(CaptionError::InvalidModel(
                "weight buffer sizes do not match checkpoint header".into(),
            ));
        }

        Ok(CaptionModel { config, weights })
    }

    /// Load a checkpoint from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (config, weights) = load_model(path)?;
        CaptionModel::new(config, weights)
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

impl Predictor for CaptionModel {
    fn vocab_size(&self) -> usize {
        self.config.vocab_size as usize
    }

    fn predict(&self, window: &[i32]) -> Result<Vec<f32>> {
        if window.len() != self.config.window() {
            return Err(CaptionError::InvalidArgument(format!(
                "window has {} entries, model expects {}",
                window.len(),
                self.config.window()
            )));
        }
        if let Some(&id) = window
            .iter()
            .find(|&&id| id < 0 || id >= self.config.vocab_size)
        {
            return Err(CaptionError::InvalidArgument(format!(
                "token index {} outside vocabulary of size {}",
                id, self.config.vocab_size
            )));
        }

        let mut state = ModelState::new(&self.config);
        forward(window, &self.config, &mut state, &self.weights);
        Ok(state.probs)
    }
}
