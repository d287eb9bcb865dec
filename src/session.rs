//! Loaded-artifact session: the model and vocabulary loaded once and shared
//! read-only across generation calls.

use crate::error::{CaptionError, Result};
use crate::generate::generate;
use crate::model::{CaptionModel, Predictor};
use crate::vocab::{Vocab, load_vocab};
use std::path::Path;

/// Everything a generation call needs, constructed once at startup and passed
/// by reference. Generation takes `&self` only, so a session can be shared
/// across request threads without locking.
#[derive(Debug)]
pub struct Session {
    model: CaptionModel,
    vocab: Vocab,
}

impl Session {
    /// Load the checkpoint and vocabulary table. Fails if either artifact is
    /// missing or corrupt, or if the two disagree on vocabulary size.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(model_path: P, vocab_path: Q) -> Result<Self> {
        let model = CaptionModel::load(model_path)?;
        let vocab = load_vocab(vocab_path)?;

        // The checkpoint's vocab dimension counts the padding slot
        if model.vocab_size() != vocab.len() + 1 {
            return Err(CaptionError::InvalidModel(format!(
                "vocabulary has {} words but checkpoint expects {} entries including padding",
                vocab.len(),
                model.vocab_size()
            )));
        }

        Ok(Session { model, vocab })
    }

    /// The window length the checkpoint was trained with.
    pub fn window(&self) -> usize {
        self.model.config().window()
    }

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    /// Generate a continuation of the seed text using the checkpoint's own
    /// window length.
    pub fn generate(&self, seed_text: &str, n_words: usize) -> Result<String> {
        generate(&self.model, &self.vocab, self.window(), seed_text, n_words)
    }
}
