//! Session controller.
//!
//! Owns one playthrough: the current grid, cumulative score, elapsed time and
//! the Active/Terminal status. The grid engine itself stays stateless.

use serde::{Serialize, Deserialize};
use rand::Rng;

use crate::game::error::SessionError;
use crate::game::grid::Grid;
use crate::game::systems::{is_terminal, move_grid, seed_grid, spawn_random_tile};
use crate::game::types::{Direction, GameMode, MergeMask};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionState {
    NotSubmitted,
    Pending,
    Submitted,
}

/// What a single move did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub changed: bool,
    pub gained_score: u64,
    pub game_over: bool,
}

/// Score and duration of a completed session, handed to the ledger.
/// `run` is the playthrough number within the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedRun {
    pub run: u64,
    pub score: u64,
    pub elapsed_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    pub grid: Grid,
    pub merged: MergeMask,
    pub score: u64,
    pub best_score: u64,
    pub elapsed_secs: u64,
    pub time_limit: Option<u64>,
    pub timer_active: bool,
    pub status: GameStatus,
    pub moves: u32,
    pub run: u64,
    pub submission: SubmissionState,
}

impl GameState {
    /// Start a session for `mode`, seeding the grid with the initial tiles.
    /// `best_score` is the best score known from the ledger.
    pub fn new<R: Rng + ?Sized>(mode: GameMode, best_score: u64, rng: &mut R) -> Self {
        Self::with_time_limit(mode, mode.time_limit(), best_score, rng)
    }

    pub fn with_time_limit<R: Rng + ?Sized>(
        mode: GameMode,
        time_limit: Option<u64>,
        best_score: u64,
        rng: &mut R,
    ) -> Self {
        let size = mode.grid_size();
        GameState {
            mode,
            grid: seed_grid(size, rng),
            merged: MergeMask::clear(size),
            score: 0,
            best_score,
            elapsed_secs: 0,
            time_limit,
            timer_active: false,
            status: GameStatus::Active,
            moves: 0,
            run: 0,
            submission: SubmissionState::NotSubmitted,
        }
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Terminal
    }

    /// Apply a move, spawning a tile only if the grid changed.
    pub fn apply_move<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> Result<MoveOutcome, SessionError> {
        if self.is_over() {
            return Err(SessionError::GameOver);
        }
        self.timer_active = true;

        let result = move_grid(&self.grid, direction);
        if !result.changed(&self.grid) {
            self.merged = MergeMask::clear(self.grid.size());
            return Ok(MoveOutcome { changed: false, gained_score: 0, game_over: false });
        }

        self.grid = spawn_random_tile(&result.grid, rng);
        self.merged = result.merged;
        self.score = self.score.saturating_add(result.gained_score);
        self.best_score = self.best_score.max(self.score);
        self.moves += 1;

        if is_terminal(&self.grid) {
            self.finish();
        }

        Ok(MoveOutcome {
            changed: true,
            gained_score: result.gained_score,
            game_over: self.is_over(),
        })
    }

    /// Advance the session clock by one second. Returns true if the state changed.
    pub fn tick(&mut self) -> bool {
        if self.is_over() || !self.timer_active {
            return false;
        }
        self.elapsed_secs += 1;
        if let Some(limit) = self.time_limit {
            if self.elapsed_secs >= limit {
                self.finish();
            }
        }
        true
    }

    fn finish(&mut self) {
        self.status = GameStatus::Terminal;
        self.timer_active = false;
    }

    pub fn finished_run(&self) -> Option<FinishedRun> {
        if self.is_over() {
            Some(FinishedRun { run: self.run, score: self.score, elapsed_secs: self.elapsed_secs })
        } else {
            None
        }
    }

    /// Mark the run as being submitted. Fails if the game is still running
    /// or the run was already submitted (or is being submitted).
    pub fn begin_submission(&mut self) -> Result<FinishedRun, SessionError> {
        let run = self.finished_run().ok_or(SessionError::NotFinished)?;
        match self.submission {
            SubmissionState::NotSubmitted => {
                self.submission = SubmissionState::Pending;
                Ok(run)
            }
            SubmissionState::Pending | SubmissionState::Submitted => Err(SessionError::AlreadySubmitted),
        }
    }

    /// Record the ledger's answer for `run`. A failed submission may be retried.
    ///
    /// Returns false when the answer belongs to a run that has since been
    /// restarted, in which case the state is left untouched.
    pub fn complete_submission(&mut self, run: u64, success: bool) -> bool {
        if run != self.run || self.submission != SubmissionState::Pending {
            return false;
        }
        self.submission = if success {
            SubmissionState::Submitted
        } else {
            SubmissionState::NotSubmitted
        };
        true
    }

    /// Discard the current run and start over in the same mode.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let best_score = self.best_score.max(self.score);
        let run = self.run + 1;
        *self = GameState::with_time_limit(self.mode, self.time_limit, best_score, rng);
        self.run = run;
    }
}
