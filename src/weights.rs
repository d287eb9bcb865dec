//! Model weights for the fixed-window next-word predictor.

use crate::config::ModelConfig;
use crate::error::Result;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

/// All model parameters, stored as flat row-major buffers.
///
/// The predictor embeds each of the window's token slots, concatenates the
/// rows, applies a tanh hidden layer, and projects to vocabulary logits.
#[derive(Debug, Clone)]
pub struct ModelWeights {
    /// Token embedding table, vocab_size x embed_dim. Row 0 is the padding row.
    pub embed: Vec<f32>,
    /// Input projection, hidden_dim x (seq_len * embed_dim)
    pub w1: Vec<f32>,
    /// Input projection bias, hidden_dim
    pub b1: Vec<f32>,
    /// Output projection, vocab_size x hidden_dim
    pub w2: Vec<f32>,
    /// Output projection bias, vocab_size
    pub b2: Vec<f32>,
}

impl ModelWeights {
    /// Load weights from a binary reader, in checkpoint order.
    pub fn load<R: Read>(reader: &mut R, config: &ModelConfig) -> Result<Self> {
        let embed_dim = config.embed_dim as usize;
        let hidden_dim = config.hidden_dim as usize;
        let vocab = config.vocab_size as usize;
        let input_dim = config.input_dim();

        let embed = read_f32_vec(reader, vocab * embed_dim)?;
        let w1 = read_f32_vec(reader, hidden_dim * input_dim)?;
        let b1 = read_f32_vec(reader, hidden_dim)?;
        let w2 = read_f32_vec(reader, vocab * hidden_dim)?;
        let b2 = read_f32_vec(reader, vocab)?;

        Ok(ModelWeights {
            embed,
            w1,
            b1,
            w2,
            b2,
        })
    }
}

/// Read a vector of f32 values from the reader.
fn read_f32_vec<R: Read>(reader: &mut R, count: usize) -> Result<Vec<f32>> {
    let mut buf = vec![0f32; count];
    for v in buf.iter_mut() {
        *v = reader.read_f32::<LittleEndian>()?;
    }
    Ok(buf)
}
