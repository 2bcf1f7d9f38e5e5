use actix::prelude::*;
use std::collections::HashMap;
use actix::MessageResult;
use uuid::Uuid;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

use crate::config::game::TIMER_TICK_SECS;
use crate::config::server::SESSION_IDLE_TIMEOUT_SECS;
use crate::game::error::SessionError;
use crate::game::state::{FinishedRun, GameState};
use crate::game::types::GameMode;
use crate::ledger::SharedLedger;
use crate::server::game_session::session::GameSessionActor;
use crate::server::game_session::messages::{
    ClientWsMessage, GetState, IsPlayer, ProcessClientMessage, RegisterSession, ServerWsMessage,
    SessionClosed, UnregisterSession,
};

/// One single-player game, with any number of attached WebSocket viewers.
pub struct GameSession {
    pub game_id: Uuid,
    pub player_id: String,
    pub players: HashMap<Uuid, Addr<GameSessionActor>>,
    pub spectators: HashMap<Uuid, Addr<GameSessionActor>>,
    pub game_state: GameState,

    rng: StdRng,
    ledger: SharedLedger,
    last_activity: Instant,
    idle_timeout: Duration,
    manager: Option<Recipient<SessionClosed>>,
}

impl Actor for GameSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        ctx.run_interval(Duration::from_secs(TIMER_TICK_SECS), |act, ctx| {
            act.tick();
            act.stop_if_idle(ctx);
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(manager) = &self.manager {
            manager.do_send(SessionClosed { game_id: self.game_id });
        }
    }
}

impl GameSession {
    pub fn new(
        game_id: Uuid,
        player_id: String,
        game_state: GameState,
        rng: StdRng,
        ledger: SharedLedger,
    ) -> Self {
        Self {
            game_id,
            player_id,
            players: HashMap::new(),
            spectators: HashMap::new(),
            game_state,
            rng,
            ledger,
            last_activity: Instant::now(),
            idle_timeout: Duration::from_secs(SESSION_IDLE_TIMEOUT_SECS),
            manager: None,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Manager to notify when this session stops.
    pub fn with_manager(mut self, manager: Recipient<SessionClosed>) -> Self {
        self.manager = Some(manager);
        self
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    fn stop_if_idle(&mut self, ctx: &mut Context<Self>) {
        let watched = !self.players.is_empty() || !self.spectators.is_empty();
        if watched || self.last_activity.elapsed() < self.idle_timeout {
            return;
        }
        info!(
            "[GameSession] Closing idle game_id={} after {}s",
            self.game_id,
            self.last_activity.elapsed().as_secs()
        );
        ctx.stop();
    }

    fn broadcast(&self, msg: ServerWsMessage) {
        for addr in self.players.values().chain(self.spectators.values()) {
            addr.do_send(msg.clone());
        }
    }

    pub fn send_state(&self) {
        debug!(
            "[GameSession] Broadcast GameState: game_id={} score={} elapsed={} status={:?}",
            self.game_id,
            self.game_state.score,
            self.game_state.elapsed_secs,
            self.game_state.status,
        );
        self.broadcast(ServerWsMessage::state(self.game_id, self.game_state.clone()));
    }

    fn tick(&mut self) {
        if !self.game_state.tick() {
            return;
        }
        if self.game_state.is_over() {
            info!(
                "[GameSession] Time is up: game_id={} score={} elapsed={}",
                self.game_id, self.game_state.score, self.game_state.elapsed_secs
            );
        }
        self.send_state();
    }

    fn submit_score(&mut self, ctx: &mut Context<Self>) -> Result<(), SessionError> {
        let run = self.game_state.begin_submission()?;
        info!(
            "[GameSession] Submitting score: game_id={} player={} score={} time={}",
            self.game_id, self.player_id, run.score, run.elapsed_secs
        );

        let ledger = self.ledger.clone();
        let player_id = self.player_id.clone();
        let fut = async move {
            let saved = ledger.write().await.save_score(&player_id, run.score, run.elapsed_secs);
            (run, saved)
        };
        ctx.spawn(fut.into_actor(self).map(|(run, saved), act, _ctx| {
            act.on_submission(run, saved.map_err(|e| e.to_string()));
        }));

        self.send_state();
        Ok(())
    }

    fn on_submission(&mut self, run: FinishedRun, result: Result<(), String>) {
        if !self.game_state.complete_submission(run.run, result.is_ok()) {
            debug!(
                "[GameSession] Ignoring submission answer for restarted run {} on game_id={}",
                run.run, self.game_id
            );
            return;
        }
        match result {
            Ok(()) => {
                info!("[GameSession] Score saved: game_id={} player={}", self.game_id, self.player_id);
                self.broadcast(ServerWsMessage::ScoreSaved(run));
            }
            Err(e) => {
                warn!("[GameSession] Score submission failed: game_id={} error={}", self.game_id, e);
                self.broadcast(ServerWsMessage::error(
                    "SUBMISSION_FAILED",
                    "Your score could not be saved. Please try again.",
                    Some(serde_json::json!({ "game_id": self.game_id, "reason": e })),
                ));
            }
        }
        self.send_state();
    }
}

impl Handler<ProcessClientMessage> for GameSession {
    type Result = Result<(), SessionError>;

    fn handle(&mut self, msg: ProcessClientMessage, ctx: &mut Context<Self>) -> Self::Result {
        if msg.player_id != self.player_id {
            warn!("[GameSession] Command from non-player {} ignored", msg.player_id);
            return Ok(());
        }
        self.touch();

        match msg.msg {
            ClientWsMessage::Move(direction) => {
                let outcome = self.game_state.apply_move(direction, &mut self.rng)?;
                if !outcome.changed {
                    return Ok(());
                }
                debug!(
                    "[GameSession] Move {} on game_id={} gained={} merges={}",
                    direction, self.game_id, outcome.gained_score, self.game_state.merged.count()
                );
                if outcome.game_over {
                    info!(
                        "[GameSession] Game over: game_id={} score={} max_tile={} elapsed={}",
                        self.game_id,
                        self.game_state.score,
                        self.game_state.grid.max_tile(),
                        self.game_state.elapsed_secs
                    );
                }
                self.send_state();
                Ok(())
            }
            ClientWsMessage::Restart => {
                self.game_state.reset(&mut self.rng);
                info!("[GameSession] Restarted game_id={}", self.game_id);
                self.send_state();
                Ok(())
            }
            ClientWsMessage::SubmitScore => self.submit_score(ctx),
            ClientWsMessage::Ping => Ok(()),
        }
    }
}

impl Handler<RegisterSession> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: RegisterSession, _: &mut Context<Self>) -> Self::Result {
        self.touch();
        if msg.is_player {
            self.players.insert(msg.connection_id, msg.addr.clone());
        } else {
            self.spectators.insert(msg.connection_id, msg.addr.clone());
        }
        msg.addr.do_send(ServerWsMessage::state(self.game_id, self.game_state.clone()));
    }
}

impl Handler<UnregisterSession> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: UnregisterSession, _: &mut Context<Self>) -> Self::Result {
        self.touch();
        self.players.remove(&msg.connection_id);
        self.spectators.remove(&msg.connection_id);
    }
}

impl Handler<GetState> for GameSession {
    type Result = MessageResult<GetState>;

    fn handle(&mut self, _: GetState, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.game_state.clone())
    }
}

impl Handler<IsPlayer> for GameSession {
    type Result = bool;

    fn handle(&mut self, msg: IsPlayer, _: &mut Context<Self>) -> Self::Result {
        self.player_id == msg.0
    }
}

pub struct GameSessionManager {
    sessions: HashMap<Uuid, Addr<GameSession>>,
    ledger: SharedLedger,
    idle_timeout: Duration,
}

#[derive(Message)]
#[rtype(result = "(Uuid, Addr<GameSession>)")]
pub struct CreateGame {
    pub player_id: String,
    pub mode: GameMode,
    pub best_score: u64,
}

impl GameSessionManager {
    pub fn new(ledger: SharedLedger) -> Self {
        Self {
            sessions: HashMap::new(),
            ledger,
            idle_timeout: Duration::from_secs(SESSION_IDLE_TIMEOUT_SECS),
        }
    }

    /// Idle timeout handed to every session created from now on.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn create_game(
        &mut self,
        player_id: String,
        mode: GameMode,
        best_score: u64,
        manager: Recipient<SessionClosed>,
    ) -> (Uuid, Addr<GameSession>) {
        let game_id = Uuid::new_v4();
        let mut rng = StdRng::seed_from_u64(rand::rng().random());
        let game_state = GameState::new(mode, best_score, &mut rng);

        info!("[GameSessionManager] Created game_id={} mode={:?} player={}", game_id, mode, player_id);
        let session = GameSession::new(game_id, player_id, game_state, rng, self.ledger.clone())
            .with_idle_timeout(self.idle_timeout)
            .with_manager(manager)
            .start();

        self.sessions.insert(game_id, session.clone());
        (game_id, session)
    }
}

impl Actor for GameSessionManager {
    type Context = Context<Self>;
}

impl Handler<CreateGame> for GameSessionManager {
    type Result = MessageResult<CreateGame>;

    fn handle(&mut self, msg: CreateGame, ctx: &mut Context<Self>) -> Self::Result {
        let manager = ctx.address().recipient();
        MessageResult(self.create_game(msg.player_id, msg.mode, msg.best_score, manager))
    }
}

impl Handler<SessionClosed> for GameSessionManager {
    type Result = ();

    fn handle(&mut self, msg: SessionClosed, _: &mut Context<Self>) -> Self::Result {
        if self.sessions.remove(&msg.game_id).is_some() {
            info!("[GameSessionManager] Removed game_id={} ({} left)", msg.game_id, self.sessions.len());
        }
    }
}

#[derive(Message)]
#[rtype(result = "Result<Addr<GameSession>, String>")]
pub struct GetGameSession {
    pub game_id: Uuid,
}

impl Handler<GetGameSession> for GameSessionManager {
    type Result = Result<Addr<GameSession>, String>;

    fn handle(&mut self, msg: GetGameSession, _: &mut Context<Self>) -> Self::Result {
        self.sessions.get(&msg.game_id)
            .cloned()
            .ok_or_else(|| "Game session not found".to_string())
    }
}
