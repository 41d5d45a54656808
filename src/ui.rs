pub mod theme;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::view::{Cell, CellState, SessionView, Stat, HELP_TEXT};

const HEADLINE: &str = "Your clanker is slow. You don't need to be.";
const MAX_WIDTH: u16 = 110;
const MARGIN: u16 = 2;
const STAT_COLUMNS: usize = 2;
// blank line, label, value
const STAT_ROW_HEIGHT: u16 = 3;

pub fn draw(f: &mut Frame, view: &SessionView) {
    f.render_widget(view, f.area());
}

impl Widget for &SessionView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .style(Style::default().bg(theme::BACKGROUND))
            .render(area, buf);

        let column = centered_column(area);

        let prompt_block = panel(theme::PANEL);
        // margins on both sides, then borders and padding
        let prompt_inner_width = column.width.saturating_sub(2 * MARGIN + 4).max(1);
        let prompt_height = prompt_lines(self, prompt_inner_width) + 1 + 2;

        let stat_rows = self.stats.len().div_ceil(STAT_COLUMNS) as u16;
        // status, grid, blank, help, borders
        let stats_height = 1 + stat_rows * STAT_ROW_HEIGHT + 2 + 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(MARGIN)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(prompt_height),
                Constraint::Length(1),
                Constraint::Length(stats_height),
                Constraint::Min(0),
            ])
            .split(column);

        Paragraph::new(Span::styled(
            HEADLINE,
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        render_prompt(self, prompt_block, chunks[2], buf);
        render_stats(self, stat_rows, chunks[4], buf);
    }
}

fn centered_column(area: Rect) -> Rect {
    let width = area.width.min(MAX_WIDTH);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}

fn panel(bg: ratatui::style::Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .style(Style::default().bg(bg))
        .padding(Padding::horizontal(1))
}

fn dim() -> Style {
    Style::default()
        .fg(theme::TEXT_DIM)
        .add_modifier(Modifier::DIM)
}

fn prompt_lines(view: &SessionView, width: u16) -> u16 {
    let text: String = view.cells.iter().map(|c| c.ch).collect();
    let lines = (text.width() as f64 / width as f64).ceil() as u16;
    // word wrapping can spill onto one more line
    lines.max(1) + 1
}

fn cell_span(cell: &Cell) -> Span<'static> {
    match cell.state {
        CellState::Correct => {
            Span::styled(cell.ch.to_string(), Style::default().fg(theme::SUCCESS))
        }
        CellState::Incorrect => Span::styled(
            match cell.ch {
                ' ' => "·".to_owned(),
                c => c.to_string(),
            },
            Style::default().fg(theme::ERROR),
        ),
        CellState::Current => Span::styled(
            cell.ch.to_string(),
            Style::default()
                .fg(theme::CURSOR_TEXT)
                .bg(theme::ACCENT)
                .add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
        ),
        CellState::Untyped => {
            Span::styled(cell.ch.to_string(), Style::default().fg(theme::TEXT_DIM))
        }
    }
}

fn render_prompt(view: &SessionView, block: Block<'static>, area: Rect, buf: &mut Buffer) {
    let spans: Vec<Span> = view.cells.iter().map(cell_span).collect();
    let text = Text::from(vec![
        Line::from(Span::styled("Prompt", dim())),
        Line::from(spans),
    ]);

    Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .render(area, buf);
}

fn render_stats(view: &SessionView, stat_rows: u16, area: Rect, buf: &mut Buffer) {
    let block = panel(theme::PANEL_MUTED);
    let inner = block.inner(area);
    block.render(area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(stat_rows * STAT_ROW_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    Paragraph::new(Span::styled(view.status.as_str(), dim()))
        .wrap(Wrap { trim: true })
        .render(chunks[0], buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(STAT_ROW_HEIGHT); stat_rows as usize])
        .split(chunks[1]);

    for (row, stats) in rows.iter().zip(view.stats.chunks(STAT_COLUMNS)) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);

        for (column, stat) in columns.iter().zip(stats) {
            render_stat(stat, *column, buf);
        }
    }

    Paragraph::new(Span::styled(HELP_TEXT, dim())).render(chunks[3], buf);
}

fn render_stat(stat: &Stat, area: Rect, buf: &mut Buffer) {
    let value_color = if stat.label == "Speed" {
        theme::ACCENT
    } else {
        theme::TEXT
    };

    Paragraph::new(Text::from(vec![
        Line::default(),
        Line::from(Span::styled(stat.label, dim())),
        Line::from(Span::styled(
            stat.value.as_str(),
            Style::default().fg(value_color),
        )),
    ]))
    .render(area, buf);
}
