//! One-shot commands
//!
//! Run a single backend operation through the same fetcher and state
//! transitions the dashboard uses, then print the result.

use super::SessionData;
use crate::ui::UIConfig;
use crate::ui::dashboard::DashboardState;
use crate::ui::dashboard::utils::format_date_time;
use crate::{print_cmd_info, print_cmd_success};
use std::error::Error;
use std::time::Instant;

/// Applies everything the fetcher has queued so far to a fresh state.
fn drain(session: &mut SessionData) -> DashboardState {
    let mut state = DashboardState::new(
        session.environment,
        session.fetcher.base_url(),
        Instant::now(),
        UIConfig::new(false, session.refresh_interval),
    );

    while let Ok(event) = session.event_receiver.try_recv() {
        if event.should_display() {
            println!("{}", event);
        }
    }
    while let Ok(update) = session.update_receiver.try_recv() {
        state.apply_update(update);
    }
    state
}

fn print_summary(state: &DashboardState) {
    print_cmd_success!(
        "Commits loaded",
        "Total Commits: {} | AI Processed: {} | Data Source: {}",
        state.stats.total_commits,
        state.stats.ai_processed(),
        if state.data_source.is_empty() {
            "Unknown"
        } else {
            state.data_source.as_str()
        }
    );
    if let Some(updated) = &state.last_updated {
        print_cmd_info!("Last updated", "{}", format_date_time(Some(updated)));
    }
    if state.commits.is_empty() {
        println!("No commits found.");
    }
    for commit in &state.commits {
        println!("  {}", commit);
    }
}

/// Reads the commit list once.
///
/// With `json` set, prints the raw `json_data` payload instead of the summary.
pub async fn run_track_now(mut session: SessionData, json: bool) -> Result<(), Box<dyn Error>> {
    session.fetcher.track_now().await;
    let state = drain(&mut session);

    if let Some(error) = &state.error {
        return Err(error.clone().into());
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&state.json_data)?);
    } else {
        print_summary(&state);
    }
    Ok(())
}

/// Asks the backend to ingest new commits, then reads the list once.
pub async fn run_fetch_commits(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    session.fetcher.fetch_commits().await;
    let state = drain(&mut session);

    if let Some(error) = &state.error {
        return Err(error.clone().into());
    }
    if state.last_applied_seq() == 0 {
        print_cmd_info!("Nothing to refresh", "The backend did not ingest new commits");
        return Ok(());
    }
    print_summary(&state);
    Ok(())
}
