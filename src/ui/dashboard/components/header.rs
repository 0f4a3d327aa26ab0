//! Dashboard header component
//!
//! Renders the title and refresh gauge

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and refresh progress.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!(
        "GITHUB COMMIT TRACKER v{}  ·  AI-Powered Commit Analysis",
        version
    ))
    .alignment(Alignment::Center)
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick),
    );
    f.render_widget(title, header_chunks[0]);

    let (progress_text, gauge_color, progress_percent) = refresh_progress(state);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}

/// Loading takes priority over the countdown to the next automatic refresh.
fn refresh_progress(state: &DashboardState) -> (String, Color, u16) {
    if state.loading() {
        // Loops every 20 ticks
        let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
        return (
            "FETCHING - Requesting commits".to_string(),
            Color::LightGreen,
            progress,
        );
    }

    let period = state.refresh_interval.as_secs_f64().max(f64::EPSILON);
    let remaining = state.next_refresh_in();
    let elapsed = (period - remaining.as_secs_f64()).max(0.0);
    let progress = ((elapsed / period) * 100.0) as u16;
    (
        format!("WAITING - Next refresh in {}s", remaining.as_secs().max(1)),
        Color::LightBlue,
        progress.min(100),
    )
}
