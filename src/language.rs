use crate::error::PromptError;
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_json::from_str;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// A word list compiled into the binary from `src/lang/<name>.json`.
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    pub fn load(file_name: &str) -> Result<Self, PromptError> {
        read_language_from_file(&format!("{file_name}.json"))
    }

    pub fn english() -> Result<Self, PromptError> {
        Self::load("english")
    }

    /// Draw `num` words, with replacement so any count can be satisfied.
    pub fn random_words<R: Rng + ?Sized>(&self, num: usize, rng: &mut R) -> Vec<&str> {
        (0..num)
            .filter_map(|_| self.words.choose(rng).map(String::as_str))
            .collect()
    }
}

fn read_language_from_file(file_name: &str) -> Result<Language, PromptError> {
    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| PromptError::MissingWordList(file_name.to_string()))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| PromptError::NotUtf8(file_name.to_string()))?;

    let lang: Language = from_str(file_as_str)?;
    if lang.words.is_empty() {
        return Err(PromptError::EmptyWordList(lang.name));
    }

    Ok(lang)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_language_english() {
        let lang = Language::english().unwrap();

        assert_eq!(lang.name, "english");
        assert!(!lang.words.is_empty());
        assert_eq!(lang.size as usize, lang.words.len());
    }

    #[test]
    fn test_english_words_are_lowercase_ascii() {
        let lang = Language::english().unwrap();
        for word in &lang.words {
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "unexpected word {word:?}"
            );
        }
    }

    #[test]
    fn test_language_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "size": 3,
            "words": ["hello", "world", "test"]
        }
        "#;

        let lang: Language = from_str(json_data).expect("Failed to deserialize test language");

        assert_eq!(lang.name, "test");
        assert_eq!(lang.size, 3);
        assert!(lang.words.contains(&"world".to_string()));
    }

    #[test]
    fn test_random_words_count() {
        let lang = Language {
            name: "tiny".to_string(),
            size: 2,
            words: vec!["cat".to_string(), "dog".to_string()],
        };
        let mut rng = rand::thread_rng();

        let words = lang.random_words(7, &mut rng);
        assert_eq!(words.len(), 7);
        assert!(words.iter().all(|w| *w == "cat" || *w == "dog"));
    }

    #[test]
    fn test_missing_language_file() {
        assert_matches!(
            Language::load("klingon"),
            Err(PromptError::MissingWordList(name)) if name == "klingon.json"
        );
    }
}
