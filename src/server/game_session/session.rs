//! WebSocket session handler for a single game.
//!
//! One actor per connection. The session's player may send commands; any
//! other connection is a read-only spectator receiving state updates.

use actix::prelude::*;
use actix_web::{HttpRequest, HttpResponse, web, Error, error};
use actix_web_actors::ws;
use log::{debug, info};
use std::borrow::Cow;
use uuid::Uuid;

use crate::server::anti_spam::{AntiSpamState, Verdict};
use crate::server::game_session::server::{GameSession, GetGameSession};
use crate::server::game_session::messages::{
    ClientWsMessage, IsPlayer, ProcessClientMessage, RegisterSession, ServerWsMessage, UnregisterSession,
};
use crate::server::ws_actor_utils::WsActorUtils;

pub struct GameSessionActor {
    pub game_id: Uuid,
    pub connection_id: Uuid,
    pub player_id: String,
    pub is_player: bool,
    pub session_addr: Addr<GameSession>,
    pub anti_spam: AntiSpamState,
}

impl WsActorUtils for GameSessionActor {
    fn anti_spam(&mut self) -> &mut AntiSpamState {
        &mut self.anti_spam
    }

    fn player_id(&self) -> &str {
        &self.player_id
    }
}

impl Actor for GameSessionActor {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.session_addr.do_send(RegisterSession {
            connection_id: self.connection_id,
            addr: ctx.address(),
            is_player: self.is_player,
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        debug!("[GameSessionActor] Disconnected game_id={} player={}", self.game_id, self.player_id);
        self.session_addr.do_send(UnregisterSession {
            connection_id: self.connection_id,
        });
    }
}

impl GameSessionActor {
    fn handle_client_message(&mut self, msg: ClientWsMessage, ctx: &mut ws::WebsocketContext<Self>) {
        if msg == ClientWsMessage::Ping {
            return;
        }
        if !self.is_player {
            self.reject(ctx, "SPECTATOR", "Spectators cannot send commands", None);
            return;
        }
        if matches!(msg, ClientWsMessage::Move(_)) && self.anti_spam.check_move() != Verdict::Allow {
            self.reject(ctx, "THROTTLED", "Too many moves, slow down", None);
            return;
        }

        let request = self.session_addr.send(ProcessClientMessage {
            msg,
            player_id: self.player_id.clone(),
        });
        ctx.spawn(request.into_actor(self).map(|result, act, ctx| match result {
            Ok(Ok(())) => act.anti_spam.command_succeeded(),
            Ok(Err(e)) => act.reject(ctx, e.code(), &e.to_string(), None),
            Err(_) => act.reject(ctx, "INTERNAL_ERROR", "Game session unavailable", None),
        }));
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for GameSessionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                if !self.admit_frame(ctx) {
                    return;
                }
                match serde_json::from_str::<ClientWsMessage>(&text) {
                    Ok(msg) => self.handle_client_message(msg, ctx),
                    Err(e) => {
                        debug!("[GameSessionActor] Invalid command from {}: {}", self.player_id, e);
                        self.reject(ctx, "INVALID_COMMAND", "Invalid command", None);
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(_)) => ctx.stop(),
            _ => (),
        }
    }
}

// State pushes bypass the error budget.
impl Handler<ServerWsMessage> for GameSessionActor {
    type Result = ();

    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) -> Self::Result {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(_) => ctx.text(r#"{"action":"Error","data":{"code":"INTERNAL_ERROR","message":"Failed to serialize game state","context":null}}"#),
        }
    }
}

/// Extract the `player` query parameter, if any.
fn player_from_query(query: &str) -> Option<String> {
    query.split('&')
        .filter_map(|kv| kv.split_once('='))
        .find(|(key, _)| *key == "player")
        .map(|(_, value)| urlencoding::decode(value).unwrap_or(Cow::Borrowed("")).into_owned())
        .filter(|player| !player.is_empty())
}

/// WebSocket endpoint for a game session.
///
/// Expects the game id in the path and an optional `player` query parameter.
/// Connections without the session's player id join as spectators.
pub async fn ws_game(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<Uuid>,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let game_id = path.into_inner();

    let session_addr = data.game_session_manager
        .send(GetGameSession { game_id })
        .await
        .map_err(error::ErrorInternalServerError)?
        .map_err(error::ErrorNotFound)?;

    let connection_id = Uuid::new_v4();
    let player_id = player_from_query(req.query_string())
        .unwrap_or_else(|| format!("spectator-{}", connection_id));

    let is_player = session_addr
        .send(IsPlayer(player_id.clone()))
        .await
        .map_err(error::ErrorInternalServerError)?;

    info!("[GameSessionActor] Connection game_id={} player={} is_player={}", game_id, player_id, is_player);

    ws::start(
        GameSessionActor {
            game_id,
            connection_id,
            player_id,
            is_player,
            session_addr,
            anti_spam: AntiSpamState::new(),
        },
        &req,
        stream,
    )
}
