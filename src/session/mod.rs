pub mod headless_mode;
pub mod messages;
pub mod oneshot;
pub mod setup;
pub mod tui_mode;

pub use headless_mode::run_headless_mode;
pub use oneshot::{run_fetch_commits, run_track_now};
pub use setup::{SessionData, setup_session};
pub use tui_mode::run_tui_mode;
