/// Configuration for anti-spam and anti-flood protection.
/// All budgets are counts per one-second window.
pub const MAX_FRAMES_PER_SECOND: u32 = 30; // Any text frame; exceeding it bans.

/// Move commands accepted per second. Extra moves are dropped, not banned,
/// so a held arrow key only loses repeats.
pub const MAX_MOVES_PER_SECOND: u32 = 15;

/// Error replies per second before the connection is banned.
pub const MAX_ERRORS_PER_SECOND: u32 = 20;

pub const BAN_DURATION_SECONDS: u64 = 300;
