use actix_web_actors::ws;
use serde_json::Value;
use actix::ActorContext;

use crate::server::ws_error::ws_error_message;
use crate::server::anti_spam::{AntiSpamState, Verdict};

/// Flood-guarded replies for WebSocket actors that own an [`AntiSpamState`].
pub trait WsActorUtils {
    fn anti_spam(&mut self) -> &mut AntiSpamState;
    fn player_id(&self) -> &str;

    /// Account for an incoming frame. Returns false if the connection was
    /// banned and is closing.
    fn admit_frame<A>(&mut self, ctx: &mut ws::WebsocketContext<A>) -> bool
    where
        A: actix::Actor<Context = ws::WebsocketContext<A>>,
    {
        let player_id = self.player_id().to_string();
        let verdict = self.anti_spam().check_frame(&player_id);
        match verdict {
            Verdict::Ban => {
                self.ban_and_close(ctx);
                false
            }
            _ => true,
        }
    }

    fn ban_and_close<A>(&mut self, ctx: &mut ws::WebsocketContext<A>)
    where
        A: actix::Actor<Context = ws::WebsocketContext<A>>,
    {
        let ban_remaining_secs = self.anti_spam().ban_remaining_secs();
        let context = serde_json::json!({
            "player": self.player_id(),
            "ban_remaining_secs": ban_remaining_secs,
        });
        ctx.text(ws_error_message(
            "BANNED",
            "You have been banned for spamming. Please try again later.",
            Some(context),
        ));
        ctx.close(Some(ws::CloseReason {
            code: ws::CloseCode::Policy,
            description: Some("Banned for spam".into()),
        }));
        ctx.stop();
    }

    /// Send an error reply unless it repeats the previous one; too many
    /// replies in a second ban the connection.
    fn reject<A>(
        &mut self,
        ctx: &mut ws::WebsocketContext<A>,
        code: &str,
        message: &str,
        context: Option<Value>,
    )
    where
        A: actix::Actor<Context = ws::WebsocketContext<A>>,
    {
        let player_id = self.player_id().to_string();
        let verdict = self.anti_spam().check_error(code, &player_id);
        match verdict {
            Verdict::Allow => ctx.text(ws_error_message(code, message, context)),
            Verdict::Throttle => {}
            Verdict::Ban => self.ban_and_close(ctx),
        }
    }
}
