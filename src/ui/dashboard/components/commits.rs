//! Dashboard commits component
//!
//! Renders the commit list and the card of the selected commit

use super::super::state::DashboardState;
use super::super::utils::{format_date_time_in, hex_to_color, priority_color, sentiment_color};
use crate::commit::{Commit, truncate_chars};
use crate::consts::cli_consts::display::{HASH_KEY_PREFIX_LEN, MAX_VISIBLE_FILES, SHA_PREFIX_LEN};
use chrono::{Local, TimeZone};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};
use std::fmt::Display;

const EMPTY_MESSAGE: &str = "No commits found. Press [T] \"Track Now\" to fetch data.";

fn label(text: &str) -> Span<'static> {
    Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD),
    )
}

fn section_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )])
}

/// Lines of a commit card with dates rendered in `tz`.
pub fn commit_card_lines<Tz>(commit: &Commit, tz: &Tz) -> Vec<Line<'static>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut lines = Vec::new();

    let mut message_lines = commit.message.lines();
    lines.push(Line::from(vec![Span::styled(
        message_lines.next().unwrap_or("").to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )]));
    for rest in message_lines {
        lines.push(Line::from(rest.to_string()));
    }
    lines.push(Line::from(""));

    let sha = commit.commit_sha.as_deref().unwrap_or("");
    let hash_key = commit.hash_key.as_deref().unwrap_or("");
    lines.push(Line::from(vec![
        Span::styled(
            format!("SHA: {}", truncate_chars(sha, SHA_PREFIX_LEN)),
            Style::default().fg(Color::LightYellow),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Hash: {}...", truncate_chars(hash_key, HASH_KEY_PREFIX_LEN)),
            Style::default().fg(Color::LightMagenta),
        ),
    ]));

    lines.push(Line::from(vec![
        label("Author: "),
        Span::raw(commit.author.clone()),
    ]));
    lines.push(Line::from(vec![
        label("Repository: "),
        Span::raw(commit.repository.clone()),
    ]));
    if let Some(branch) = &commit.branch {
        lines.push(Line::from(vec![label("Branch: "), Span::raw(branch.clone())]));
    }
    lines.push(Line::from(vec![
        label("Date: "),
        Span::raw(format_date_time_in(commit.committed_at.as_deref(), tz)),
    ]));
    lines.push(Line::from(vec![
        label("Unique Hash: "),
        Span::styled(hash_key.to_string(), Style::default().fg(Color::DarkGray)),
    ]));

    if let Some(analysis) = &commit.ai_analysis {
        lines.push(Line::from(""));
        lines.push(section_title("🤖 AI Analysis"));

        let sentiment = analysis.sentiment_label.as_ref();
        let priority = analysis.priority.as_ref();
        lines.push(Line::from(vec![
            label("Sentiment: "),
            Span::styled(
                sentiment.map(|s| s.as_str().to_string()).unwrap_or_default(),
                Style::default().fg(hex_to_color(sentiment_color(sentiment))),
            ),
            Span::raw("   "),
            label("Priority: "),
            Span::styled(
                priority.map(|p| p.as_str().to_string()).unwrap_or_default(),
                Style::default().fg(hex_to_color(priority_color(priority))),
            ),
            Span::raw("   "),
            label("Confidence: "),
            Span::raw(format!("{}%", analysis.confidence_percent())),
        ]));

        if !analysis.categories.is_empty() {
            let mut spans = vec![label("Categories:")];
            for category in &analysis.categories {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    format!("[{}]", category),
                    Style::default().fg(Color::LightBlue),
                ));
            }
            lines.push(Line::from(spans));
        }

        if !analysis.insights.is_empty() {
            lines.push(Line::from(vec![label("Insights:")]));
            for insight in &analysis.insights {
                lines.push(Line::from(format!("  • {}", insight)));
            }
        }
    }

    if !commit.files.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_title(&format!(
            "📁 Files Changed ({})",
            commit.files.len()
        )));

        for file in commit.files.iter().take(MAX_VISIBLE_FILES) {
            let mut spans = vec![
                Span::raw(format!("  {} ", file.path)),
                Span::styled(
                    format!("[{}]", file.change_type),
                    Style::default().fg(change_type_color(&file.change_type)),
                ),
            ];
            if file.has_line_stats() {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    format!("+{}", file.additions.unwrap_or(0)),
                    Style::default().fg(Color::Green),
                ));
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    format!("-{}", file.deletions.unwrap_or(0)),
                    Style::default().fg(Color::Red),
                ));
            }
            lines.push(Line::from(spans));
        }

        if commit.files.len() > MAX_VISIBLE_FILES {
            lines.push(Line::from(vec![Span::styled(
                format!("  +{} more files", commit.files.len() - MAX_VISIBLE_FILES),
                Style::default().fg(Color::DarkGray),
            )]));
        }
    }

    lines
}

fn change_type_color(change_type: &str) -> Color {
    match change_type {
        "added" => Color::Green,
        "removed" | "deleted" => Color::Red,
        "modified" => Color::Yellow,
        "renamed" => Color::Blue,
        _ => Color::Gray,
    }
}

/// One row per commit, keeping the selected row in view.
fn commit_list_lines(state: &DashboardState, visible_rows: usize) -> Vec<Line<'static>> {
    let visible_rows = visible_rows.max(1);
    let offset = state.selected.saturating_sub(visible_rows - 1);

    state
        .commits
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(idx, commit)| {
            let selected = idx == state.selected;
            let marker = if selected { "▶ " } else { "  " };
            let sha = commit.commit_sha.as_deref().unwrap_or("");
            let style = if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(marker.to_string(), style),
                Span::styled(
                    format!("{:<8} ", truncate_chars(sha, SHA_PREFIX_LEN)),
                    style.fg(if selected { Color::Black } else { Color::LightYellow }),
                ),
                Span::styled(commit.summary().to_string(), style),
            ])
        })
        .collect()
}

pub fn render_commits_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = |title: String| {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1))
    };

    if state.commits.is_empty() {
        let empty = Paragraph::new(EMPTY_MESSAGE)
            .style(Style::default().fg(Color::DarkGray))
            .block(block("RECENT COMMITS".to_string()))
            .wrap(Wrap { trim: true });
        f.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let visible_rows = chunks[0].height.saturating_sub(2) as usize;
    let list = Paragraph::new(commit_list_lines(state, visible_rows)).block(block(format!(
        "RECENT COMMITS ({}/{})",
        state.selected + 1,
        state.commits.len()
    )));
    f.render_widget(list, chunks[0]);

    if let Some(commit) = state.selected_commit() {
        let card = Paragraph::new(commit_card_lines(commit, &Local))
            .block(block("COMMIT".to_string()))
            .wrap(Wrap { trim: false });
        f.render_widget(card, chunks[1]);
    }
}
