//! Activity log pane
//!
//! Newest entry first, one line per fetch, ingest or timer event.

use super::super::state::DashboardState;
use super::super::utils::{clean_http_error_message, format_compact_timestamp, get_worker_color};
use crate::events::{Event, EventType, Worker};
use crate::logging::LogLevel;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

const EMPTY_LOG: &str = "No activity yet. Press [T] to load commits.";

fn status_icon(event: &Event) -> &'static str {
    match (event.event_type, event.log_level) {
        (EventType::Success, _) => "✓",
        (EventType::Error, LogLevel::Warn) => "!",
        (EventType::Error, _) => "✗",
        (EventType::Refresh, _) => "↻",
        (EventType::Waiting, _) => "…",
    }
}

fn worker_tag(worker: Worker) -> &'static str {
    match worker {
        Worker::Fetcher => "track ",
        Worker::Ingester => "ingest",
        Worker::Scheduler => "timer ",
    }
}

fn icon_color(event: &Event) -> Color {
    match (event.event_type, event.log_level) {
        (EventType::Success, _) => Color::Green,
        (EventType::Error, LogLevel::Warn) => Color::Yellow,
        (EventType::Error, _) => Color::Red,
        _ => Color::Gray,
    }
}

/// One activity entry: `<icon> <MM-DD HH:MM:SS> <worker> <message>`.
pub fn activity_line(event: &Event) -> Line<'static> {
    let worker_style = Style::default().fg(get_worker_color(&event.worker));
    Line::from(vec![
        Span::styled(
            format!("{} ", status_icon(event)),
            Style::default()
                .fg(icon_color(event))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", format_compact_timestamp(&event.timestamp)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{} ", worker_tag(event.worker)),
            worker_style.add_modifier(Modifier::DIM),
        ),
        Span::styled(clean_http_error_message(&event.msg), worker_style),
    ])
}

pub fn render_logs_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    // Borders take two rows.
    let capacity = area.height.saturating_sub(2).max(1) as usize;

    let visible: Vec<&Event> = state
        .activity_logs
        .iter()
        .filter(|event| event.should_display())
        .collect();

    let lines: Vec<Line> = if visible.is_empty() {
        vec![Line::styled(EMPTY_LOG, Style::default().fg(Color::DarkGray))]
    } else {
        visible
            .iter()
            .rev()
            .take(capacity)
            .map(|event| activity_line(event))
            .collect()
    };

    let block = Block::default()
        .title(format!(" Activity ({}) ", visible.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_activity_line_layout() {
        let mut event = Event::fetcher_with_level(
            "Loaded 3 commits".to_string(),
            EventType::Success,
            LogLevel::Info,
        );
        event.timestamp = "2024-01-15 10:30:05".to_string();

        assert_eq!(
            text(&activity_line(&event)),
            "✓ 01-15 10:30:05 track  Loaded 3 commits"
        );
    }

    #[test]
    fn test_warnings_and_errors_get_distinct_icons() {
        let warn = Event::fetcher_with_level(
            "Error connecting to server".to_string(),
            EventType::Error,
            LogLevel::Warn,
        );
        let error = Event::ingester_with_level(
            "Error fetching commits".to_string(),
            EventType::Error,
            LogLevel::Error,
        );

        assert_eq!(status_icon(&warn), "!");
        assert_eq!(status_icon(&error), "✗");
        assert!(text(&activity_line(&error)).contains("ingest Error fetching commits"));
    }
}
