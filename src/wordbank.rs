use crate::debug_log;
use crate::error::WordBankError;
use std::fs;
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// Category name mapped to its ordered candidate words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    categories: Vec<(String, Vec<String>)>,
}

impl WordBank {
    /// The six built-in categories.
    pub fn embedded() -> Result<Self, WordBankError> {
        load_wordbank_from_str(EMBEDDED_WORDBANK)
    }

    pub fn words_for(&self, category: &str) -> Result<&[String], WordBankError> {
        self.categories
            .iter()
            .find(|(name, _)| same_category(name, category))
            .map(|(_, words)| words.as_slice())
            .ok_or_else(|| WordBankError::UnknownCategory(category.to_string()))
    }

    /// Canonical spelling of `category`, if it exists.
    pub fn resolve(&self, category: &str) -> Option<&str> {
        self.categories
            .iter()
            .map(|(name, _)| name.as_str())
            .find(|name| same_category(name, category))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn default_category(&self) -> &str {
        // Construction guarantees at least one category.
        self.categories
            .first()
            .map_or("", |(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Category names compare case-insensitively, including non-ASCII letters.
fn same_category(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

fn push_category(
    categories: &mut Vec<(String, Vec<String>)>,
    name: String,
    words: Vec<String>,
) -> Result<(), WordBankError> {
    if words.is_empty() {
        return Err(WordBankError::EmptyCategory(name));
    }
    categories.push((name, words));
    Ok(())
}

/// Parse `[Category]` headers followed by one word per line.
pub fn load_wordbank_from_str(data: &str) -> Result<WordBank, WordBankError> {
    let mut categories: Vec<(String, Vec<String>)> = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for (index, raw) in data.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = header.trim().to_string();
            let duplicate = categories
                .iter()
                .map(|(existing, _)| existing)
                .chain(current.as_ref().map(|(existing, _)| existing))
                .any(|existing| same_category(existing, &name));
            if duplicate {
                return Err(WordBankError::DuplicateCategory(name));
            }
            if let Some((prev, words)) = current.take() {
                push_category(&mut categories, prev, words)?;
            }
            current = Some((name, Vec::new()));
            continue;
        }

        let Some((_, words)) = current.as_mut() else {
            return Err(WordBankError::MissingCategory { line: index + 1 });
        };
        let word = line.to_lowercase();
        if is_valid_word(&word) {
            words.push(word);
        } else {
            debug_log!("Skipping invalid word '{}' on line {}", line, index + 1);
        }
    }

    if let Some((name, words)) = current.take() {
        push_category(&mut categories, name, words)?;
    }
    if categories.is_empty() {
        return Err(WordBankError::Empty);
    }
    Ok(WordBank { categories })
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<WordBank, WordBankError> {
    let data = fs::read_to_string(path)?;
    load_wordbank_from_str(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_has_six_categories_in_order() {
        let bank = WordBank::embedded().unwrap();
        let names: Vec<&str> = bank.categories().collect();
        assert_eq!(
            names,
            vec!["Animals", "Programming", "Countries", "Sports", "Foods", "Movies"]
        );
        assert_eq!(bank.default_category(), "Animals");
    }

    #[test]
    fn test_embedded_words_are_lowercase_letters() {
        let bank = WordBank::embedded().unwrap();
        for category in bank.categories() {
            let words = bank.words_for(category).unwrap();
            assert!((5..=6).contains(&words.len()), "{category} has {} words", words.len());
            for word in words {
                assert!(word.chars().all(|c| c.is_ascii_lowercase()), "bad word {word}");
            }
        }
    }

    #[test]
    fn test_words_for_preserves_order() {
        let bank = WordBank::embedded().unwrap();
        let foods = bank.words_for("Foods").unwrap();
        assert_eq!(foods, ["pizza", "lasagna", "burger", "sushi", "biryani"]);
    }

    #[test]
    fn test_words_for_is_case_insensitive() {
        let bank = WordBank::embedded().unwrap();
        assert!(bank.words_for("movies").is_ok());
        assert_eq!(bank.resolve("SPORTS"), Some("Sports"));
    }

    #[test]
    fn test_words_for_folds_non_ascii_case() {
        let bank = load_wordbank_from_str("[Tiere]\nhund\n[Äpfel]\nboskop\n").unwrap();
        assert_eq!(bank.words_for("äpfel").unwrap(), ["boskop"]);
        assert_eq!(bank.resolve("ÄPFEL"), Some("Äpfel"));
    }

    #[test]
    fn test_load_duplicate_category_non_ascii() {
        let result = load_wordbank_from_str("[Äpfel]\nboskop\n[äpfel]\nelstar\n");
        assert!(matches!(result, Err(WordBankError::DuplicateCategory(_))));
    }

    #[test]
    fn test_unknown_category() {
        let bank = WordBank::embedded().unwrap();
        match bank.words_for("Planets") {
            Err(WordBankError::UnknownCategory(name)) => assert_eq!(name, "Planets"),
            other => panic!("Expected UnknownCategory, got {other:?}"),
        }
        assert_eq!(bank.resolve("Planets"), None);
    }

    #[test]
    fn test_load_skips_comments_blanks_and_invalid_words() {
        let data = "# comment\n\n[Fruit]\n  Apple \nkiwi2\npear\n\n[Tools]\nhammer\n";
        let bank = load_wordbank_from_str(data).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.words_for("Fruit").unwrap(), ["apple", "pear"]);
        assert_eq!(bank.words_for("Tools").unwrap(), ["hammer"]);
    }

    #[test]
    fn test_load_word_before_header() {
        let result = load_wordbank_from_str("apple\n[Fruit]\npear\n");
        assert!(matches!(result, Err(WordBankError::MissingCategory { line: 1 })));
    }

    #[test]
    fn test_load_empty_category() {
        let result = load_wordbank_from_str("[Fruit]\n123\n[Tools]\nsaw\n");
        assert!(matches!(result, Err(WordBankError::EmptyCategory(name)) if name == "Fruit"));
    }

    #[test]
    fn test_load_duplicate_category() {
        let result = load_wordbank_from_str("[Fruit]\npear\n[fruit]\nplum\n");
        assert!(matches!(result, Err(WordBankError::DuplicateCategory(_))));
    }

    #[test]
    fn test_load_empty_input() {
        assert!(matches!(load_wordbank_from_str(""), Err(WordBankError::Empty)));
        assert!(matches!(
            load_wordbank_from_str("# nothing here\n"),
            Err(WordBankError::Empty)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("hangman_wordbank_does_not_exist.txt");
        assert!(matches!(
            load_wordbank_from_file(&path),
            Err(WordBankError::Io(_))
        ));
    }
}
