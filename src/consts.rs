pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Buffer size for the event and fetch-update channels.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // REFRESH CONFIGURATION
    // =============================================================================

    pub mod refresh {
        use std::time::Duration;

        /// Interval between automatic track-now calls (milliseconds)
        pub const REFRESH_INTERVAL_MS: u64 = 30_000;

        pub const fn refresh_interval() -> Duration {
            Duration::from_millis(REFRESH_INTERVAL_MS)
        }

        /// Longest configurable refresh period (one day)
        pub const MAX_REFRESH_INTERVAL_SECS: u64 = 86_400;
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod http {
        use std::time::Duration;

        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// The backend runs GitHub fetch and AI analysis inline on track-now.
        pub const REQUEST_TIMEOUT_SECS: u64 = 60;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // DISPLAY CONFIGURATION
    // =============================================================================

    pub mod display {
        /// Characters of the commit SHA shown on a card.
        pub const SHA_PREFIX_LEN: usize = 8;
        /// Characters of the hash key shown on a card header.
        pub const HASH_KEY_PREFIX_LEN: usize = 16;
        /// File rows shown per commit before collapsing into an overflow line.
        pub const MAX_VISIBLE_FILES: usize = 5;
    }

    // =============================================================================
    // USER-FACING MESSAGES
    // =============================================================================

    pub mod messages {
        /// Backend answered with `success: false` on track-now.
        pub const TRACK_FAILED: &str = "Failed to retrieve data";
        /// Track-now request did not produce a usable response.
        pub const CONNECT_FAILED: &str = "Error connecting to server";
        /// Fetch-commits request did not produce a usable response.
        pub const INGEST_FAILED: &str = "Error fetching commits";
    }
}
