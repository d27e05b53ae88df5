use std::io::stdout;

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
};
use scaled_core::WindowMetrics;

use crate::app::{Action, PreviewState};

/// Widest bar drawn for a font size, in cells.
const MAX_BAR: usize = 48;
/// Font size that fills `MAX_BAR`.
const BAR_FULL_SIZE: f64 = 60.0;

fn key_to_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab | KeyCode::Char('n') => Some(Action::NextPreset),
        KeyCode::BackTab | KeyCode::Char('p') => Some(Action::PrevPreset),
        KeyCode::Right => Some(Action::Wider),
        KeyCode::Left => Some(Action::Narrower),
        KeyCode::Down => Some(Action::Taller),
        KeyCode::Up => Some(Action::Shorter),
        KeyCode::Char('r') => Some(Action::Rotate),
        KeyCode::Char('t') => Some(Action::UseTerminal),
        KeyCode::Char('a') => Some(Action::ToggleScaling),
        KeyCode::Char('m') => Some(Action::ToggleMinimum),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::CustomUp),
        KeyCode::Char('-') => Some(Action::CustomDown),
        _ => None,
    }
}

/// Runs its closure on drop, so early returns and panics still undo setup.
struct RestoreOnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        (self.0)();
    }
}

fn restore_terminal() {
    if let Err(err) = disable_raw_mode() {
        tracing::warn!(%err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(stdout(), LeaveAlternateScreen, Show) {
        tracing::warn!(%err, "failed to leave alternate screen");
    }
}

pub fn run_preview<W: WindowMetrics>(mut state: PreviewState, host: &W) -> Result<()> {
    enable_raw_mode()?;
    let _restore = RestoreOnDrop(restore_terminal);
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|frame| draw(frame, &state))?;

        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(action) = key_to_action(key.code)
            && !state.apply(action, host)
        {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, state: &PreviewState) {
    let area = frame.area();
    let [header_area, factors_area, table_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .areas(area);

    let viewport = state.scaler.viewport();
    let header = Block::default()
        .title(format!(
            " scaled preview | {} {}x{} ",
            state.device, viewport.width, viewport.height
        ))
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));
    frame.render_widget(header, header_area);

    frame.render_widget(factors_panel(state), factors_area);
    frame.render_widget(samples_table(state, table_area), table_area);

    let help = Paragraph::new(
        " tab/p device | arrows resize | r rotate | t terminal | a scaling | m minimum | +/- custom | q quit",
    )
    .style(Style::default().fg(Color::Gray));
    frame.render_widget(help, help_area);
}

fn factors_panel(state: &PreviewState) -> Paragraph<'static> {
    let f = state.scaler.factors();
    let config = state.scaler.config();
    let design = match config.design_height {
        Some(h) => format!("{}x{} (diagonal)", config.design_width, h),
        None => format!("{} (short side)", config.design_width),
    };
    let on_off = |b: bool| if b { "on" } else { "off" };

    let lines = vec![
        Line::from(vec![
            Span::styled("design ", Style::default().fg(Color::Gray)),
            Span::raw(design),
            Span::styled("   ratio ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{:.3}", f.dimen_ratio)),
        ]),
        Line::from(vec![
            Span::styled("dimen  ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.3}", f.dimen_scale),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled("   font ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.3}", f.font_scale),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::styled("scaling ", Style::default().fg(Color::Gray)),
            Span::raw(on_off(state.allow_font_scaling)),
            Span::styled("   custom ", Style::default().fg(Color::Gray)),
            Span::raw(
                state
                    .custom_font_scale
                    .map_or_else(|| "-".to_string(), |s| format!("{s:.1}")),
            ),
            Span::styled("   minimum ", Style::default().fg(Color::Gray)),
            Span::raw(
                state
                    .minimum_font_size
                    .map_or_else(|| "-".to_string(), |s| format!("{s}")),
            ),
        ]),
    ];

    Paragraph::new(lines).block(Block::default().borders(Borders::BOTTOM))
}

fn samples_table(state: &PreviewState, area: Rect) -> Table<'static> {
    let bar_room = usize::from(area.width.saturating_sub(40)).min(MAX_BAR);

    let rows = state.samples().into_iter().map(|row| {
        let size = row.element.effective_font_size().unwrap_or(row.base);
        let cells = ((size / BAR_FULL_SIZE) * bar_room as f64).round() as usize;
        let color = if size > row.base {
            Color::Green
        } else if size < row.base {
            Color::Red
        } else {
            Color::White
        };
        Row::new(vec![
            Span::raw(row.label.to_string()),
            Span::raw(format!("{}", row.base)),
            Span::styled(format!("{size}"), Style::default().fg(color)),
            Span::styled("█".repeat(cells.min(bar_room)), Style::default().fg(color)),
        ])
    });

    Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Min(0),
        ],
    )
    .header(
        Row::new(vec!["role", "base", "size", ""])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().title(" text "))
}
