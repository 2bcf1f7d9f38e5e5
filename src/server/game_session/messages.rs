use actix::prelude::*;
use serde::{Serialize, Deserialize};
use serde_json::Value;
use uuid::Uuid;

use super::session::GameSessionActor;
use crate::game::error::SessionError;
use crate::game::state::{FinishedRun, GameState};
use crate::game::types::Direction;

/// Commands a player sends over the WebSocket.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    Move(Direction),
    Restart,
    SubmitScore,
    Ping,
}

/// Updates pushed to every viewer of a session.
#[derive(Message, Serialize, Deserialize, Clone, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    State {
        game_id: Uuid,
        state: GameState,
    },
    ScoreSaved(FinishedRun),
    Error {
        code: String,
        message: String,
        context: Option<Value>,
    },
}

impl ServerWsMessage {
    pub fn state(game_id: Uuid, state: GameState) -> Self {
        Self::State { game_id, state }
    }
    pub fn error(code: &str, message: &str, context: Option<Value>) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.to_string(),
            context,
        }
    }
}

/// A command from the session's player, forwarded by its WebSocket actor.
#[derive(Message)]
#[rtype(result = "Result<(), SessionError>")]
pub struct ProcessClientMessage {
    pub msg: ClientWsMessage,
    pub player_id: String,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct RegisterSession {
    pub connection_id: Uuid,
    pub addr: Addr<GameSessionActor>,
    pub is_player: bool,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct UnregisterSession {
    pub connection_id: Uuid,
}

#[derive(Message)]
#[rtype(result = "GameState")]
pub struct GetState;

#[derive(Message)]
#[rtype(result = "bool")]
pub struct IsPlayer(pub String);

/// Sent by a session to the manager once it has stopped.
#[derive(Message)]
#[rtype(result = "()")]
pub struct SessionClosed {
    pub game_id: Uuid,
}
