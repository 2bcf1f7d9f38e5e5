/// Server configuration constants.
/// 
/// This module defines the bind address and leaderboard defaults.
pub const BIND_HOST: &str = "127.0.0.1";

/// Port the HTTP/WebSocket server listens on.
pub const BIND_PORT: u16 = 8080;

/// Number of entries returned by the leaderboard when no limit is given.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Hard cap on leaderboard entries per request.
pub const MAX_LEADERBOARD_LIMIT: usize = 100;

/// A session with no connected viewer is stopped after this many seconds
/// without activity.
pub const SESSION_IDLE_TIMEOUT_SECS: u64 = 300;
