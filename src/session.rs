use crate::{
    error::PromptError,
    key::KeyAction,
    prompt::{Prompt, PromptProvider},
};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    InProgress,
    Finished,
}

/// One attempt at a prompt. A session is a value: [`Session::apply`] returns
/// the next one and leaves `self` alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    prompt: Prompt,
    word_count: usize,
    typed: Vec<char>,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl Session {
    pub fn new(prompt: Prompt, word_count: usize) -> Self {
        Self {
            prompt,
            word_count,
            typed: Vec::new(),
            started_at: None,
            ended_at: None,
        }
    }

    /// Fresh session with a prompt from `provider`.
    pub fn generate<P: PromptProvider + ?Sized>(
        provider: &P,
        word_count: usize,
    ) -> Result<Self, PromptError> {
        Ok(Self::new(provider.generate(word_count)?, word_count))
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn target(&self) -> &[char] {
        self.prompt.chars()
    }

    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    pub fn typed_text(&self) -> String {
        self.typed.iter().collect()
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<Instant> {
        self.ended_at
    }

    /// An empty target never counts as finished.
    pub fn is_finished(&self) -> bool {
        !self.prompt.is_empty() && self.typed.len() >= self.prompt.len()
    }

    pub fn phase(&self) -> Phase {
        if self.ended_at.is_some() {
            Phase::Finished
        } else if self.started_at.is_some() {
            Phase::InProgress
        } else {
            Phase::Idle
        }
    }

    /// The transition function. Only `Reset` can fail, and only when the
    /// provider cannot produce a prompt; `self` is untouched either way.
    pub fn apply<P: PromptProvider + ?Sized>(
        &self,
        action: KeyAction,
        now: Instant,
        provider: &P,
    ) -> Result<Session, PromptError> {
        let mut next = match action {
            KeyAction::Reset => return Self::generate(provider, self.word_count),
            _ => self.clone(),
        };

        match action {
            KeyAction::Backspace => next.pop(),
            KeyAction::Printable(c) => next.push(c, now),
            KeyAction::Reset | KeyAction::Ignore => {}
        }

        Ok(next)
    }

    fn pop(&mut self) {
        if self.is_finished() {
            return;
        }
        self.typed.pop();
    }

    fn push(&mut self, c: char, now: Instant) {
        if self.ended_at.is_some() {
            return;
        }

        // the clock starts on the first printable even when the cap rejects it
        self.started_at.get_or_insert(now);

        // never grow past the target, even if an event is delivered twice
        if self.typed.len() >= self.prompt.len() {
            return;
        }
        self.typed.push(c);

        if self.typed.len() == self.prompt.len() {
            self.ended_at = Some(now);
        }
    }
}
