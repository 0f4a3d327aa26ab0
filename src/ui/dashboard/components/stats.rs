//! Dashboard stats panel component
//!
//! Renders commit counts, the data source and connection information

use crate::environment::Environment;

use super::super::state::DashboardState;
use super::super::utils::{data_source_color, format_date_time, hex_to_color};
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn stat_line(label: &str, value: String, value_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
        Span::styled(value, value_style),
    ])
}

/// Render stats panel.
pub fn render_stats_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let count_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let data_source = if state.data_source.is_empty() {
        "Unknown".to_string()
    } else {
        state.data_source.clone()
    };

    let mut info_lines = vec![
        stat_line(
            "Total Commits",
            state.stats.total_commits.to_string(),
            count_style,
        ),
        stat_line(
            "AI Processed",
            state.stats.ai_processed().to_string(),
            count_style,
        ),
        stat_line(
            "Data Source",
            data_source,
            Style::default().fg(hex_to_color(data_source_color(&state.data_source))),
        ),
        Line::from(""),
    ];

    // Environment with color coding
    let env_color = match state.environment {
        Environment::Production => Color::Green,
        Environment::Development => Color::Yellow,
    };
    info_lines.push(stat_line(
        "Env",
        state.environment.to_string(),
        Style::default().fg(env_color),
    ));
    info_lines.push(stat_line(
        "API",
        state.base_url.clone(),
        Style::default().fg(Color::LightBlue),
    ));
    info_lines.push(stat_line(
        "Zone",
        state.time_zone.clone(),
        Style::default().fg(Color::Cyan),
    ));
    if let Some(updated) = &state.last_updated {
        info_lines.push(stat_line(
            "Updated",
            format_date_time(Some(updated)),
            Style::default().fg(Color::Cyan),
        ));
    }

    let uptime = state.start_time.elapsed().as_secs();
    let uptime_string = if uptime >= 3600 {
        format!("{}h {}m {}s", uptime / 3600, (uptime % 3600) / 60, uptime % 60)
    } else {
        format!("{}m {}s", uptime / 60, uptime % 60)
    };
    info_lines.push(stat_line(
        "Uptime",
        uptime_string,
        Style::default().fg(Color::LightGreen),
    ));

    if let Some(message) = &state.backend_message {
        info_lines.push(Line::from(""));
        info_lines.push(Line::from(vec![Span::styled(
            message.clone(),
            Style::default().fg(Color::DarkGray),
        )]));
    }

    let info_block = Block::default()
        .title("STATISTICS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let info_paragraph = Paragraph::new(info_lines)
        .block(info_block)
        .wrap(Wrap { trim: true });

    f.render_widget(info_paragraph, area);
}
