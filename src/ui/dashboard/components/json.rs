//! Dashboard JSON inspector component

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

/// Pretty-printed payload with two-space indentation.
pub fn pretty_json(state: &DashboardState) -> String {
    serde_json::to_string_pretty(&state.json_data).unwrap_or_default()
}

pub fn render_json_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let json_block = Block::default()
        .title("JSON DATA")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightBlue))
        .padding(Padding::horizontal(1));

    let json = Paragraph::new(pretty_json(state))
        .style(Style::default().fg(Color::Gray))
        .block(json_block)
        .scroll((state.json_scroll, 0));

    f.render_widget(json, area);
}
