use crate::{error::PromptError, language::Language};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// The target text of one session. Built once, never edited; a reset
/// replaces it with a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    text: String,
    chars: Vec<char>,
}

impl Prompt {
    /// Rejects empty text and anything outside printable ASCII, since the
    /// classifier can never produce such characters.
    pub fn new(text: impl Into<String>) -> Result<Self, PromptError> {
        let text = text.into();
        if text.is_empty() {
            return Err(PromptError::Empty);
        }
        if let Some(bad) = text.chars().find(|c| !(' '..='~').contains(c)) {
            return Err(PromptError::Untypeable(bad));
        }

        let chars = text.chars().collect();
        Ok(Self { text, chars })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn empty_for_test() -> Self {
        Self {
            text: String::new(),
            chars: Vec::new(),
        }
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Source of fresh prompts. Called once when a session is created and once per reset.
pub trait PromptProvider {
    fn generate(&self, word_count: usize) -> Result<Prompt, PromptError>;
}

/// Space-joined lowercase words drawn at random from a word list.
#[derive(Debug, Clone)]
pub struct WordListProvider {
    language: Language,
}

impl WordListProvider {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn english() -> Result<Self, PromptError> {
        Ok(Self::new(Language::english()?))
    }
}

impl PromptProvider for WordListProvider {
    fn generate(&self, word_count: usize) -> Result<Prompt, PromptError> {
        if word_count == 0 {
            return Err(PromptError::NoWords);
        }

        let mut rng = rand::thread_rng();
        let text = self
            .language
            .random_words(word_count, &mut rng)
            .into_iter()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");

        Prompt::new(text)
    }
}

/// Hands out a fixed list of prompts in order, wrapping around at the end.
/// The word count is ignored.
#[derive(Debug)]
pub struct StaticPromptProvider {
    prompts: Vec<String>,
    next: AtomicUsize,
}

impl StaticPromptProvider {
    pub fn new<I, S>(prompts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompts: prompts.into_iter().map(Into::into).collect(),
            next: AtomicUsize::new(0),
        }
    }
}

impl PromptProvider for StaticPromptProvider {
    fn generate(&self, _word_count: usize) -> Result<Prompt, PromptError> {
        if self.prompts.is_empty() {
            return Err(PromptError::Empty);
        }
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.prompts.len();
        Prompt::new(self.prompts[idx].clone())
    }
}
