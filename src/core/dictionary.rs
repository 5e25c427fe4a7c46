use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tokio::fs;

/// Set of guessable words, stored uppercase
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Load a word list from disk
    ///
    /// `.json` files are read as an object keyed by word (values are ignored);
    /// anything else is read as one word per line. Words longer than
    /// `max_word_length` are dropped since no hand could ever spell them.
    pub async fn load<P: AsRef<Path>>(path: P, max_word_length: usize) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read dictionary {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let dictionary = if is_json {
            Self::from_json(&content, max_word_length)
                .with_context(|| format!("failed to parse dictionary {}", path.display()))?
        } else {
            Self::from_lines(&content, max_word_length)
        };

        tracing::info!(
            "Loaded {} words from {}",
            dictionary.len(),
            path.display()
        );

        Ok(dictionary)
    }

    /// Parse a JSON object whose keys are words
    pub fn from_json(content: &str, max_word_length: usize) -> Result<Self> {
        let map: HashMap<String, serde_json::Value> = serde_json::from_str(content)?;
        Ok(Self::from_words(map.into_keys(), max_word_length))
    }

    /// Parse a newline separated word list
    pub fn from_lines(content: &str, max_word_length: usize) -> Self {
        Self::from_words(content.lines(), max_word_length)
    }

    /// Build from any iterator of words
    pub fn from_words<I, S>(words: I, max_word_length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_uppercase())
            .filter(|word| !word.is_empty() && word.chars().count() <= max_word_length)
            .collect();

        Self { words }
    }

    /// Create an empty dictionary
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if a word exists in the dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dictionary() {
        let dict = Dictionary::empty();
        assert!(dict.is_empty());
        assert!(!dict.contains("CAT"));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let dict = Dictionary::from_words(["cat", "Dog"], 7);
        assert!(dict.contains("CAT"));
        assert!(dict.contains("cat"));
        assert!(dict.contains("dOg"));
        assert!(!dict.contains("bird"));
    }

    #[test]
    fn test_from_lines_skips_blank_and_trims() {
        let dict = Dictionary::from_lines("cat\n\n  tree  \r\n", 7);
        assert_eq!(dict.len(), 2);
        assert!(dict.contains("TREE"));
    }

    #[test]
    fn test_long_words_are_dropped() {
        let dict = Dictionary::from_words(["seven77", "eightchr", "ok"], 7);
        assert!(dict.contains("SEVEN77"));
        assert!(!dict.contains("EIGHTCHR"));
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_from_json_uses_keys() {
        let dict = Dictionary::from_json(r#"{"cat": 1, "tree": 1, "aardvarks": 1}"#, 7).unwrap();
        assert_eq!(dict.len(), 2);
        assert!(dict.contains("CAT"));
        assert!(!dict.contains("AARDVARKS"));
    }

    #[test]
    fn test_from_json_rejects_arrays() {
        assert!(Dictionary::from_json(r#"["cat"]"#, 7).is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = Dictionary::load("/definitely/not/here/words.json", 7).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_text_file() {
        let path = std::env::temp_dir().join(format!(
            "speedrabble_dictionary_{}.txt",
            std::process::id()
        ));
        tokio::fs::write(&path, "cat\ndog\n").await.unwrap();

        let dict = Dictionary::load(&path, 7).await.unwrap();
        assert_eq!(dict.len(), 2);
        assert!(dict.contains("dog"));

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
