//! Predictor configuration.

use crate::error::{CaptionError, Result};

/// Predictor hyperparameters, read from the checkpoint header.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct ModelConfig {
    /// Token embedding dimension
    pub embed_dim: i32,
    /// Hidden layer dimension
    pub hidden_dim: i32,
    /// Vocabulary size, including the padding slot at index 0
    pub vocab_size: i32,
    /// Input window length: the fixed number of token slots the predictor
    /// consumes at every step
    pub seq_len: i32,
}

impl ModelConfig {
    /// Returns the window length.
    #[inline]
    pub fn window(&self) -> usize {
        self.seq_len as usize
    }

    /// Returns the flattened input width of the first projection.
    #[inline]
    pub fn input_dim(&self) -> usize {
        (self.seq_len * self.embed_dim) as usize
    }

    /// Rejects non-positive dimensions before any buffer is sized from them.
    pub fn validate(&self) -> Result<()> {
        if self.embed_dim <= 0 || self.hidden_dim <= 0 || self.vocab_size <= 0 || self.seq_len <= 0
        {
            return Err(CaptionError::InvalidArgument(format!(
                "non-positive dimension in config: embed={}, hidden={}, vocab={}, window={}",
                self.embed_dim, self.hidden_dim, self.vocab_size, self.seq_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_zero_window() {
        let config = ModelConfig {
            embed_dim: 8,
            hidden_dim: 16,
            vocab_size: 100,
            seq_len: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_positive_dims() {
        let config = ModelConfig {
            embed_dim: 8,
            hidden_dim: 16,
            vocab_size: 100,
            seq_len: 5,
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.window(), 5);
        assert_eq!(config.input_dim(), 40);
    }
}
