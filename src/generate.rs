//! Greedy decoding loop.

use crate::error::{CaptionError, Result};
use crate::model::Predictor;
use crate::ops::argmax;
use crate::vocab::{PAD_INDEX, Vocab};

/// Fit an encoded sequence to a fixed window: keep the most recent `window`
/// entries, left-padding with the sentinel when the sequence is shorter.
/// The result always has exactly `window` entries.
pub fn fit_window(ids: &[i32], window: usize) -> Vec<i32> {
    let mut out = vec![PAD_INDEX; window];
    let keep = ids.len().min(window);
    out[window - keep..].copy_from_slice(&ids[ids.len() - keep..]);
    out
}

/// Generate `n_words` continuation words for a seed text.
///
/// Each step re-encodes the whole running buffer (seed plus everything
/// generated so far), fits it to the window, takes the argmax of the
/// predicted distribution, and maps it back through the vocabulary. An index
/// with no word (the padding slot) contributes an empty token rather than an
/// error. Returns the space-joined generated words; the seed is not included.
pub fn generate<P: Predictor>(
    predictor: &P,
    vocab: &Vocab,
    window: usize,
    seed_text: &str,
    n_words: usize,
) -> Result<String> {
    if window == 0 {
        return Err(CaptionError::InvalidArgument(
            "window length must be positive".into(),
        ));
    }

    let mut in_text = seed_text.to_string();
    let mut result = Vec::with_capacity(n_words);

    for _ in 0..n_words {
        let encoded = vocab.encode(&in_text);
        let ids = fit_window(&encoded, window);

        let probs = predictor.predict(&ids)?;
        let next = argmax(&probs) as i32;

        let out_word = vocab.token(next).unwrap_or("").to_string();

        // Append to the running buffer so the next step sees it
        in_text.push(' ');
        in_text.push_str(&out_word);
        result.push(out_word);
    }

    Ok(result.join(" "))
}
