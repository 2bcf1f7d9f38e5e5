use std::time::{Instant, Duration};
use log::warn;

use crate::config::anti_spam::{
    BAN_DURATION_SECONDS, MAX_ERRORS_PER_SECOND, MAX_FRAMES_PER_SECOND, MAX_MOVES_PER_SECOND,
};

/// What to do with an incoming frame or an outgoing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    /// Drop it silently.
    Throttle,
    /// Ban the connection and close it.
    Ban,
}

/// Counter over a fixed one-second window.
#[derive(Debug)]
struct Budget {
    limit: u32,
    used: u32,
    window_start: Instant,
}

impl Budget {
    fn new(limit: u32, now: Instant) -> Self {
        Self { limit, used: 0, window_start: now }
    }

    /// Spend one unit. Returns false once the window's budget is exhausted.
    fn spend(&mut self, now: Instant) -> bool {
        if now.duration_since(self.window_start) >= Duration::from_secs(1) {
            self.window_start = now;
            self.used = 0;
        }
        self.used += 1;
        self.used <= self.limit
    }
}

/// Per-connection flood control for a game WebSocket.
///
/// Raw frames and error replies have hard budgets that ban the connection.
/// Moves have a softer budget: excess moves are throttled.
pub struct AntiSpamState {
    frames: Budget,
    moves: Budget,
    errors: Budget,
    last_error_code: Option<String>,
    banned_until: Option<Instant>,
}

impl AntiSpamState {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frames: Budget::new(MAX_FRAMES_PER_SECOND, now),
            moves: Budget::new(MAX_MOVES_PER_SECOND, now),
            errors: Budget::new(MAX_ERRORS_PER_SECOND, now),
            last_error_code: None,
            banned_until: None,
        }
    }

    /// Account for one incoming text frame.
    pub fn check_frame(&mut self, player: &str) -> Verdict {
        if self.is_banned() {
            return Verdict::Ban;
        }
        if !self.frames.spend(Instant::now()) {
            self.ban(player, "too many frames per second");
            return Verdict::Ban;
        }
        Verdict::Allow
    }

    /// Account for one move command.
    pub fn check_move(&mut self) -> Verdict {
        if self.moves.spend(Instant::now()) {
            Verdict::Allow
        } else {
            Verdict::Throttle
        }
    }

    /// Account for one outgoing error. Repeats of the previous error code
    /// are throttled until a command succeeds.
    pub fn check_error(&mut self, code: &str, player: &str) -> Verdict {
        if self.last_error_code.as_deref() == Some(code) {
            return Verdict::Throttle;
        }
        self.last_error_code = Some(code.to_string());
        if !self.errors.spend(Instant::now()) {
            self.ban(player, "too many error replies per second");
            return Verdict::Ban;
        }
        Verdict::Allow
    }

    /// A command went through: the next error is reported again.
    pub fn command_succeeded(&mut self) {
        self.last_error_code = None;
    }

    pub fn is_banned(&self) -> bool {
        self.banned_until.is_some_and(|until| Instant::now() < until)
    }

    pub fn ban_remaining_secs(&self) -> u64 {
        self.banned_until
            .map(|until| until.saturating_duration_since(Instant::now()).as_secs())
            .unwrap_or(0)
    }

    fn ban(&mut self, player: &str, reason: &str) {
        self.banned_until = Some(Instant::now() + Duration::from_secs(BAN_DURATION_SECONDS));
        warn!("[AntiSpam] Banned player={} for {}s: {}", player, BAN_DURATION_SECONDS, reason);
    }
}
