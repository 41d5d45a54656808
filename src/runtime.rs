use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, info, warn};

use crate::{
    app::{App, Control},
    error::Result,
    session::Phase,
    ui,
};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    /// The terminal input stream failed; nothing more will arrive.
    InputClosed,
}

/// Forwards crossterm key and resize events into `tx` from a background thread.
pub fn spawn_terminal_reader(tx: Sender<AppEvent>) -> JoinHandle<()> {
    thread::spawn(move || loop {
        let evt = match event::read() {
            Ok(CtEvent::Key(key)) => AppEvent::Key(key),
            Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
            Ok(_) => continue,
            Err(err) => {
                warn!(%err, "terminal input failed");
                let _ = tx.send(AppEvent::InputClosed);
                break;
            }
        };

        if tx.send(evt).is_err() {
            break;
        }
    })
}

/// Sends `AppEvent::Tick` every interval until dropped. Dropping wakes and
/// joins the thread, so no tick is produced after the timer is gone.
#[derive(Debug)]
pub struct RefreshTimer {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTimer {
    pub fn start(tx: Sender<AppEvent>, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    if tx.send(AppEvent::Tick).is_err() {
                        break;
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// The single serialized event queue. Input threads and the refresh timer
/// produce into it; only the owner of the runner consumes.
pub struct Runner {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
    tick_interval: Duration,
    timer: Option<RefreshTimer>,
}

impl Runner {
    pub fn new(tick_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            tick_interval,
            timer: None,
        }
    }

    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }

    /// Blocks until the next event. The runner holds a sender of its own, so
    /// this never reports a disconnect; a dead input source shows up as
    /// [`AppEvent::InputClosed`] instead.
    pub fn step(&self) -> Option<AppEvent> {
        self.rx.recv().ok()
    }

    /// Like [`Runner::step`] but gives up after `timeout`.
    pub fn step_timeout(&self, timeout: Duration) -> Option<AppEvent> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Holds a refresh timer exactly while the session is in progress.
    pub fn sync_timer(&mut self, phase: Phase) {
        match (phase, self.timer.is_some()) {
            (Phase::InProgress, false) => {
                debug!(
                    interval_ms = self.tick_interval.as_millis() as u64,
                    "starting refresh timer"
                );
                self.timer = Some(RefreshTimer::start(
                    self.tx.clone(),
                    self.tick_interval,
                ));
            }
            (Phase::Idle | Phase::Finished, true) => {
                debug!(%phase, "stopping refresh timer");
                self.timer = None;
            }
            _ => {}
        }
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_some()
    }
}

/// Render, wait for an event, apply it; until the app asks to quit.
pub fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner,
) -> Result<()> {
    loop {
        let view = app.view(Instant::now());
        terminal.draw(|f| ui::draw(f, &view))?;

        // shutdown arrives as Quit from Ctrl+C or InputClosed, not as `None`
        let Some(event) = runner.step() else {
            break;
        };

        let control = app.on_event(event, Instant::now())?;
        runner.sync_timer(app.phase());

        if control == Control::Quit {
            info!("quit requested");
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn step_passes_through_events() {
        let runner = Runner::new(Duration::from_millis(10));
        runner.sender().send(AppEvent::Resize).unwrap();

        assert_matches!(runner.step(), Some(AppEvent::Resize));
    }

    #[test]
    fn step_waits_when_every_producer_is_gone() {
        let runner = Runner::new(Duration::from_millis(10));
        {
            let tx = runner.sender();
            tx.send(AppEvent::InputClosed).unwrap();
        }

        assert_matches!(runner.step(), Some(AppEvent::InputClosed));
        // the runner's own sender keeps the queue open
        assert!(runner.step_timeout(Duration::from_millis(5)).is_none());
    }

    #[test]
    fn step_timeout_returns_none_when_quiet() {
        let runner = Runner::new(Duration::from_millis(10));
        assert!(runner.step_timeout(Duration::from_millis(5)).is_none());
    }

    #[test]
    fn refresh_timer_ticks_until_dropped() {
        let (tx, rx) = mpsc::channel();
        let timer = RefreshTimer::start(tx, Duration::from_millis(2));

        assert_matches!(rx.recv_timeout(Duration::from_secs(1)), Ok(AppEvent::Tick));

        drop(timer);
        // drain whatever was sent before the drop
        while rx.try_recv().is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(30)).is_err());
    }

    #[test]
    fn sync_timer_follows_phase() {
        let mut runner = Runner::new(Duration::from_millis(5));
        assert!(!runner.is_ticking());

        runner.sync_timer(Phase::Idle);
        assert!(!runner.is_ticking());

        runner.sync_timer(Phase::InProgress);
        assert!(runner.is_ticking());
        assert_matches!(runner.step_timeout(Duration::from_secs(1)), Some(AppEvent::Tick));

        runner.sync_timer(Phase::InProgress);
        assert!(runner.is_ticking());

        runner.sync_timer(Phase::Finished);
        assert!(!runner.is_ticking());

        runner.sync_timer(Phase::InProgress);
        runner.sync_timer(Phase::Idle);
        assert!(!runner.is_ticking());
    }
}
