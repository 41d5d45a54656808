use crate::{
    config::Config,
    error::Result,
    key::{classify, is_interrupt, KeyAction, KeyInput},
    metrics::Metrics,
    prompt::PromptProvider,
    runtime::AppEvent,
    session::{Phase, Session},
    view::SessionView,
};
use crossterm::event::{KeyEvent, KeyEventKind};
use std::time::Instant;
use tracing::{debug, info, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Owns the one live session and everything needed to advance it.
pub struct App {
    session: Session,
    provider: Box<dyn PromptProvider>,
    config: Config,
    ready_at: Instant,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("config", &self.config)
            .field("ready_at", &self.ready_at)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Generates the first prompt; fails if the provider cannot.
    pub fn new(provider: Box<dyn PromptProvider>, config: Config, now: Instant) -> Result<Self> {
        let session = Session::generate(provider.as_ref(), config.word_count)?;
        info!(
            word_count = config.word_count,
            chars = session.target().len(),
            "session created"
        );

        Ok(Self {
            session,
            provider,
            config,
            ready_at: now + config.input_grace,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn view(&self, now: Instant) -> SessionView {
        SessionView::capture(&self.session, now)
    }

    pub fn on_event(&mut self, event: AppEvent, now: Instant) -> Result<Control> {
        match event {
            AppEvent::Key(key) => self.handle_key(key, now),
            AppEvent::Tick | AppEvent::Resize => Ok(Control::Continue),
            AppEvent::InputClosed => {
                warn!("input closed, shutting down");
                Ok(Control::Quit)
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<Control> {
        if key.kind != KeyEventKind::Press {
            return Ok(Control::Continue);
        }

        if is_interrupt(&key) {
            info!("interrupt received");
            return Ok(Control::Quit);
        }

        if now < self.ready_at {
            debug!(?key, "dropping key inside input grace period");
            return Ok(Control::Continue);
        }

        let input = KeyInput::from(&key);
        let action = classify(&input, self.config.classifier);
        if action == KeyAction::Ignore {
            debug!(?input, "ignored key input");
        } else {
            trace!(?input, ?action, "classified key");
        }

        self.dispatch(action, now)?;
        Ok(Control::Continue)
    }

    /// Applies one classified action. On a failed reset the current session
    /// is kept and the error is returned.
    pub fn dispatch(&mut self, action: KeyAction, now: Instant) -> Result<()> {
        let before = self.session.phase();
        let next = self.session.apply(action, now, self.provider.as_ref())?;
        self.session = next;

        if action == KeyAction::Reset {
            info!(
                from = %before,
                chars = self.session.target().len(),
                "session reset with new prompt"
            );
            return Ok(());
        }

        match (before, self.session.phase()) {
            (Phase::Idle, Phase::InProgress) => info!("session started"),
            (previous, Phase::Finished) if previous != Phase::Finished => {
                let metrics = Metrics::compute(&self.session, now);
                info!(
                    elapsed_ms = metrics.elapsed.as_millis() as u64,
                    wpm = metrics.wpm,
                    accuracy = metrics.accuracy,
                    chars = metrics.total,
                    "session finished"
                );
            }
            _ => {}
        }

        Ok(())
    }
}
