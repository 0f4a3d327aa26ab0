//! Dashboard main renderer

use super::components::{commits, controls, footer, header, json, logs, stats};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let controls_height = if state.error.is_some() { 4 } else { 3 };
    let bottom_height = if state.show_json { 45 } else { 25 };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(controls_height),
            Constraint::Fill(1),
            Constraint::Percentage(bottom_height),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    controls::render_controls(f, main_chunks[1], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(main_chunks[2]);

    stats::render_stats_panel(f, content_chunks[0], state);
    commits::render_commits_panel(f, content_chunks[1], state);

    if state.show_json {
        let bottom_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[3]);
        json::render_json_panel(f, bottom_chunks[0], state);
        logs::render_logs_panel(f, bottom_chunks[1], state);
    } else {
        logs::render_logs_panel(f, main_chunks[3], state);
    }

    footer::render_footer(f, main_chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::fetcher::FetchUpdate;
    use crate::ui::app::UIConfig;
    use crate::ui::dashboard::components::json::pretty_json;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;
    use std::time::{Duration, Instant};

    fn state() -> DashboardState {
        DashboardState::new(
            Environment::Production,
            "http://localhost/api".to_string(),
            Instant::now(),
            UIConfig::new(true, Duration::from_secs(30)),
        )
    }

    fn screen_text(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 48)).unwrap();
        terminal.draw(|f| render_dashboard(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_empty_dashboard_renders_stats_and_hint() {
        let text = screen_text(&state());
        assert!(text.contains("Total Commits"));
        assert!(text.contains("AI Processed"));
        assert!(text.contains("[T] Track Now"));
        assert!(text.contains("No commits found."));
        assert!(!text.contains("JSON DATA"));
    }

    #[test]
    fn test_loading_and_error_are_visible() {
        let mut state = state();
        state.apply_update(FetchUpdate::Started { seq: 1 });
        let text = screen_text(&state);
        assert!(text.contains("[T] Fetching..."));

        state.apply_update(FetchUpdate::Failed {
            seq: 1,
            message: "Error connecting to server",
        });
        let text = screen_text(&state);
        assert!(text.contains("Error connecting to server"));
        assert!(text.contains("[T] Track Now"));
    }

    #[test]
    fn test_json_pane_follows_toggle() {
        let mut state = state();
        state.json_data = json!({"commits": [1]});
        state.toggle_json();

        let text = screen_text(&state);
        assert!(text.contains("JSON DATA"));
        assert!(text.contains("[J] Hide JSON"));
        assert_eq!(pretty_json(&state), "{\n  \"commits\": [\n    1\n  ]\n}");
    }
}
