//! Word-level caption generation in Rust
//!
//! A minimal greedy-decoding text generator: a fixed-window next-word
//! predictor plus a word/index vocabulary, loaded once from binary artifacts
//! and driven by a decoding loop that extends a seed text one word at a time.

pub mod config;
pub mod error;
pub mod generate;
pub mod model;
pub mod ops;
pub mod session;
pub mod state;
pub mod vocab;
pub mod weights;

pub use config::ModelConfig;
pub use error::{CaptionError, Result};
pub use generate::{fit_window, generate};
pub use model::{CaptionModel, Predictor, forward, load_model};
pub use session::Session;
pub use state::ModelState;
pub use vocab::{PAD_INDEX, Vocab, load_vocab};
pub use weights::ModelWeights;
