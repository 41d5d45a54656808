use crate::{
    metrics::Metrics,
    session::{Phase, Session},
};
use itertools::{EitherOrBoth, Itertools};
use std::time::{Duration, Instant};

pub const HELP_TEXT: &str = "Backspace fixes mistakes • Ctrl+R refreshes • Ctrl+C exits";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Correct,
    Incorrect,
    Current,
    Untyped,
}

/// One prompt character and how it should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub state: CellState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
}

/// Everything the renderer needs, captured at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub cells: Vec<Cell>,
    pub phase: Phase,
    pub metrics: Metrics,
    pub status: String,
    pub stats: Vec<Stat>,
}

impl SessionView {
    pub fn capture(session: &Session, now: Instant) -> Self {
        let metrics = Metrics::compute(session, now);
        let timer = format_seconds(metrics.elapsed);
        let status = status_message(session.phase(), &timer);

        let stats = vec![
            Stat {
                label: "Timer",
                value: format!("{timer}s"),
            },
            Stat {
                label: "Speed",
                value: format_wpm(metrics.wpm),
            },
            Stat {
                label: "Accuracy",
                value: format_accuracy(metrics.accuracy),
            },
            Stat {
                label: "Position",
                value: format!("{} / {}", metrics.position, metrics.total),
            },
            Stat {
                label: "Current",
                value: describe_char(session.target().get(session.typed().len()).copied()),
            },
        ];

        Self {
            cells: cells(session),
            phase: session.phase(),
            metrics,
            status,
            stats,
        }
    }

    pub fn stat(&self, label: &str) -> Option<&str> {
        self.stats
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.value.as_str())
    }
}

pub fn cells(session: &Session) -> Vec<Cell> {
    let cursor = session.typed().len();
    let finished = session.is_finished();

    session
        .target()
        .iter()
        .zip_longest(session.typed())
        .enumerate()
        .filter_map(|(idx, pair)| match pair {
            EitherOrBoth::Both(&expected, &actual) => Some(Cell {
                ch: expected,
                state: if expected == actual {
                    CellState::Correct
                } else {
                    CellState::Incorrect
                },
            }),
            EitherOrBoth::Left(&expected) => Some(Cell {
                ch: expected,
                state: if idx == cursor && !finished {
                    CellState::Current
                } else {
                    CellState::Untyped
                },
            }),
            // typed never outruns the target
            EitherOrBoth::Right(_) => None,
        })
        .collect()
}

pub fn status_message(phase: Phase, timer: &str) -> String {
    match phase {
        Phase::Idle => "Start typing to kick off the timer.".to_string(),
        Phase::InProgress => "Keep going — accuracy matters more than speed.".to_string(),
        Phase::Finished => format!("All done in {timer}s. Press Ctrl+R for a new prompt."),
    }
}

pub fn describe_char(c: Option<char>) -> String {
    match c {
        None => "done".to_string(),
        Some(' ') => "space".to_string(),
        Some('\n') => "line break".to_string(),
        Some(c) => c.to_string(),
    }
}

/// Seconds with one decimal, e.g. `12.3`. Halves round up.
pub fn format_seconds(elapsed: Duration) -> String {
    let tenths = (elapsed.as_millis() + 50) / 100;
    format!("{}.{}", tenths / 10, tenths % 10)
}

pub fn format_wpm(wpm: f64) -> String {
    format!("{:.1} WPM", round_half_up(wpm, 1))
}

pub fn format_accuracy(accuracy: f64) -> String {
    format!("{:.0}%", round_half_up(accuracy, 0))
}

// `{:.N}` alone rounds exact ties to even, so 62.5 would print as 62
fn round_half_up(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        key::KeyAction,
        prompt::{Prompt, StaticPromptProvider},
    };

    fn typed_session(target: &str, keys: &str, now: Instant) -> Session {
        let provider = StaticPromptProvider::new(["unused"]);
        keys.chars().fold(
            Session::new(Prompt::new(target).unwrap(), 1),
            |session, c| {
                session
                    .apply(KeyAction::Printable(c), now, &provider)
                    .unwrap()
            },
        )
    }

    fn states(view: &SessionView) -> Vec<CellState> {
        view.cells.iter().map(|c| c.state).collect()
    }

    #[test]
    fn test_cells_mark_cursor_and_mistakes() {
        let session = typed_session("abcd", "ax", Instant::now());
        let view = SessionView::capture(&session, Instant::now());

        assert_eq!(
            states(&view),
            vec![
                CellState::Correct,
                CellState::Incorrect,
                CellState::Current,
                CellState::Untyped
            ]
        );
        assert_eq!(view.cells[1].ch, 'b');
    }

    #[test]
    fn test_no_cursor_when_finished() {
        let session = typed_session("ab", "ab", Instant::now());
        let view = SessionView::capture(&session, Instant::now());

        assert!(view.cells.iter().all(|c| c.state == CellState::Correct));
        assert_eq!(view.stat("Current"), Some("done"));
    }

    #[test]
    fn test_idle_view_strings() {
        let session = typed_session("cat dog", "", Instant::now());
        let view = SessionView::capture(&session, Instant::now());

        assert_eq!(view.phase, Phase::Idle);
        assert_eq!(view.status, "Start typing to kick off the timer.");
        assert_eq!(view.stat("Timer"), Some("0.0s"));
        assert_eq!(view.stat("Speed"), Some("0.0 WPM"));
        assert_eq!(view.stat("Accuracy"), Some("100%"));
        assert_eq!(view.stat("Position"), Some("1 / 7"));
        assert_eq!(view.stat("Current"), Some("c"));
    }

    #[test]
    fn test_in_progress_view_strings() {
        let t0 = Instant::now();
        let session = typed_session("cat dog", "cat", t0);
        let view = SessionView::capture(&session, t0 + Duration::from_millis(1500));

        assert_eq!(view.status, "Keep going — accuracy matters more than speed.");
        assert_eq!(view.stat("Timer"), Some("1.5s"));
        assert_eq!(view.stat("Position"), Some("4 / 7"));
        assert_eq!(view.stat("Current"), Some("space"));
    }

    #[test]
    fn test_finished_status_mentions_time() {
        let t0 = Instant::now();
        let provider = StaticPromptProvider::new(["unused"]);
        let session = Session::new(Prompt::new("hi").unwrap(), 1)
            .apply(KeyAction::Printable('h'), t0, &provider)
            .unwrap()
            .apply(KeyAction::Printable('i'), t0 + Duration::from_millis(2000), &provider)
            .unwrap();
        let view = SessionView::capture(&session, t0 + Duration::from_secs(60));

        assert_eq!(view.status, "All done in 2.0s. Press Ctrl+R for a new prompt.");
        assert_eq!(view.stat("Speed"), Some("12.0 WPM"));
    }

    #[test]
    fn test_describe_char() {
        assert_eq!(describe_char(None), "done");
        assert_eq!(describe_char(Some(' ')), "space");
        assert_eq!(describe_char(Some('\n')), "line break");
        assert_eq!(describe_char(Some('q')), "q");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(Duration::ZERO), "0.0");
        assert_eq!(format_seconds(Duration::from_millis(12_340)), "12.3");
        assert_eq!(format_seconds(Duration::from_millis(1250)), "1.3");
        assert_eq!(format_seconds(Duration::from_millis(2050)), "2.1");
    }

    #[test]
    fn test_halves_round_up() {
        assert_eq!(format_accuracy(62.5), "63%");
        assert_eq!(format_accuracy(100.0), "100%");
        assert_eq!(format_wpm(0.25), "0.3 WPM");
        assert_eq!(format_wpm(12.0), "12.0 WPM");
    }

    #[test]
    fn test_tied_stats_round_up_in_view() {
        let t0 = Instant::now();
        let session = typed_session("abcdefgh", "abcdexxx", t0);
        let view = SessionView::capture(&session, t0);
        assert_eq!(view.stat("Accuracy"), Some("63%"));

        let running = typed_session("abcdefgh", "ab", t0);
        let view = SessionView::capture(&running, t0 + Duration::from_millis(1250));
        assert_eq!(view.stat("Timer"), Some("1.3s"));
        assert_eq!(view.status, "Keep going — accuracy matters more than speed.");
    }
}
