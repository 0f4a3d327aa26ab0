//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::print_cmd_warn;
use crate::scheduler::RefreshScheduler;
use crate::ui::UIConfig;
use crate::ui::dashboard::DashboardState;
use std::error::Error;
use std::time::Instant;

/// Runs the auto-refresh loop without a terminal UI
///
/// This function handles:
/// 1. Console event logging
/// 2. Ctrl+C shutdown handling
/// 3. Printing each newly applied commit list
///
/// # Arguments
/// * `session` - Session data from setup
/// * `track_on_start` - Whether to load commits immediately instead of after one period
pub async fn run_headless_mode(
    mut session: SessionData,
    track_on_start: bool,
) -> Result<(), Box<dyn Error>> {
    let base_url = session.fetcher.base_url();
    print_session_starting("headless", session.environment, &base_url);

    let mut state = DashboardState::new(
        session.environment,
        base_url,
        Instant::now(),
        UIConfig::new(false, session.refresh_interval),
    );

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });
    let mut shutdown_receiver = session.shutdown_sender.subscribe();

    let fetcher = session.fetcher.clone();
    let scheduler = RefreshScheduler::start(session.refresh_interval, move || {
        let fetcher = fetcher.clone();
        tokio::spawn(async move { fetcher.auto_refresh().await });
    });

    if track_on_start {
        let fetcher = session.fetcher.clone();
        tokio::spawn(async move { fetcher.track_now().await });
    }

    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
            }
            Some(update) = session.update_receiver.recv() => {
                let applied_before = state.last_applied_seq();
                let is_terminal = update.is_terminal();
                state.apply_update(update);

                if let Some(error) = &state.error {
                    if !is_terminal || state.last_applied_seq() != applied_before {
                        print_cmd_warn!("Refresh failed", "{}", error);
                    }
                } else if state.last_applied_seq() != applied_before {
                    println!(
                        "Total Commits: {} | Data Source: {}",
                        state.stats.total_commits, state.data_source
                    );
                    for commit in &state.commits {
                        println!("  {}", commit);
                    }
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    drop(scheduler);
    print_session_shutdown();
    print_session_exit_success();

    Ok(())
}
