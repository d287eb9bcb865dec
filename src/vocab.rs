//! Vocabulary loading and text encoding.

use crate::error::{CaptionError, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Padding sentinel index. No word maps to it; the embedding table keeps a
/// dedicated row for it.
pub const PAD_INDEX: i32 = 0;

/// Bidirectional word/index mapping. Indices start at 1; slot 0 is reserved
/// for the padding sentinel. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Vocab {
    /// index -> word, with an empty placeholder in the padding slot.
    /// Precomputed so reverse lookup is O(1) per generated word.
    words: Vec<String>,
    /// word -> index
    index: HashMap<String, i32>,
}

impl Vocab {
    /// Build a vocabulary from an ordered word list; word i gets index i + 1.
    pub fn from_words<S: AsRef<str>>(list: &[S]) -> Self {
        let mut words = Vec::with_capacity(list.len() + 1);
        let mut index = HashMap::with_capacity(list.len());
        words.push(String::new());
        for (i, word) in list.iter().enumerate() {
            let word = word.as_ref().to_string();
            index.insert(word.clone(), (i + 1) as i32);
            words.push(word);
        }
        Vocab { words, index }
    }

    /// Encode free text into vocabulary indices. Words without an entry are
    /// dropped silently.
    pub fn encode(&self, text: &str) -> Vec<i32> {
        normalize(text)
            .into_iter()
            .filter_map(|word| self.index.get(&word).copied())
            .collect()
    }

    /// Look up the word for an index. Returns `None` for the padding index
    /// and anything out of range.
    pub fn token(&self, index: i32) -> Option<&str> {
        if index <= PAD_INDEX {
            return None;
        }
        self.words.get(index as usize).map(|s| s.as_str())
    }

    /// Number of real words, excluding the padding slot.
    pub fn len(&self) -> usize {
        self.words.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split text into lowercase words, discarding punctuation.
fn normalize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|p| !p.is_empty())
        .map(|p| p.to_lowercase())
        .collect()
}

/// Load a vocabulary table from a binary file: a u32 word count followed by
/// length-prefixed UTF-8 words in index order.
pub fn load_vocab<P: AsRef<Path>>(path: P) -> Result<Vocab> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let count = reader.read_u32::<LittleEndian>()? as usize;
    if count == 0 {
        return Err(CaptionError::Vocab("vocabulary table is empty".into()));
    }

    let mut words = Vec::with_capacity(count + 1);
    let mut index = HashMap::with_capacity(count);
    words.push(String::new());

    for i in 0..count {
        let len = reader.read_u32::<LittleEndian>()? as usize;
        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf)?;

        let word = String::from_utf8_lossy(&buf).into_owned();
        index.insert(word.clone(), (i + 1) as i32);
        words.push(word);
    }

    Ok(Vocab { words, index })
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::Write;

    fn write_vocab_file(path: &Path, words: &[&str]) {
        let mut f = File::create(path).unwrap();
        f.write_u32::<LittleEndian>(words.len() as u32).unwrap();
        for w in words {
            f.write_u32::<LittleEndian>(w.len() as u32).unwrap();
            f.write_all(w.as_bytes()).unwrap();
        }
    }

    #[test]
    fn encode_drops_unknown_words() {
        let vocab = Vocab::from_words(&["selamat", "pagi", "semua"]);
        assert_eq!(vocab.encode("selamat siang semua"), vec![1, 3]);
        assert_eq!(vocab.encode("tidak ada"), Vec::<i32>::new());
    }

    #[test]
    fn encode_normalizes_case_and_punctuation() {
        let vocab = Vocab::from_words(&["selamat", "pagi"]);
        assert_eq!(vocab.encode("Selamat, PAGI!"), vec![1, 2]);
    }

    #[test]
    fn token_round_trip() {
        let vocab = Vocab::from_words(&["selamat", "pagi", "semua"]);
        for word in ["selamat", "pagi", "semua"] {
            let ids = vocab.encode(word);
            assert_eq!(ids.len(), 1);
            assert_eq!(vocab.token(ids[0]), Some(word));
        }
    }

    #[test]
    fn padding_index_has_no_token() {
        let vocab = Vocab::from_words(&["selamat"]);
        assert_eq!(vocab.token(PAD_INDEX), None);
        assert_eq!(vocab.token(99), None);
        assert_eq!(vocab.token(-1), None);
    }

    #[test]
    fn load_from_binary_table() {
        let path = std::env::temp_dir().join("captiongen_vocab_load_test.bin");
        write_vocab_file(&path, &["selamat", "pagi", "semua"]);

        let vocab = load_vocab(&path).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.encode("selamat pagi"), vec![1, 2]);
        assert_eq!(vocab.token(3), Some("semua"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_rejects_empty_table() {
        let path = std::env::temp_dir().join("captiongen_vocab_empty_test.bin");
        write_vocab_file(&path, &[]);

        assert!(matches!(load_vocab(&path), Err(CaptionError::Vocab(_))));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_vocab("/nonexistent/vocab.bin").unwrap_err();
        assert!(matches!(err, CaptionError::Io(_)));
    }
}
