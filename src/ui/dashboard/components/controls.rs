//! Dashboard controls component
//!
//! Renders the action keys and the error banner

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

/// Key hints for the actions. Track and fetch are dimmed while a request is running.
pub fn control_line(state: &DashboardState) -> Line<'static> {
    let loading = state.loading();
    let action_style = |color: Color| {
        if loading {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        }
    };

    let track_label = if loading {
        "[T] Fetching..."
    } else {
        "[T] Track Now"
    };
    let json_label = if state.show_json {
        "[J] Hide JSON"
    } else {
        "[J] Show JSON"
    };

    Line::from(vec![
        Span::styled(track_label, action_style(Color::LightGreen)),
        Span::raw("   "),
        Span::styled("[F] Fetch New Commits", action_style(Color::LightYellow)),
        Span::raw("   "),
        Span::styled(
            json_label,
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

pub fn render_controls(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut lines = vec![control_line(state)];

    if let Some(error) = &state.error {
        lines.push(Line::from(vec![Span::styled(
            format!("❌ {}", error),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )]));
    }

    let border_color = if state.error.is_some() {
        Color::Red
    } else {
        Color::Cyan
    };

    let controls = Paragraph::new(lines)
        .block(
            Block::default()
                .title("CONTROLS")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(controls, area);
}
