use super::*;
use arb_auth::Identity;
use arb_core::ID;
use arb_session::ErrorCode;
use arb_session::Link;
use arb_session::Protocol;
use arb_session::ServerMessage;
use futures::StreamExt;
use tokio::sync::mpsc::unbounded_channel;

/// Pumps one authenticated socket in and out of the lobby.
pub struct Bridge;

impl Bridge {
    /// Registers the connection under a fresh link id and spawns the pump.
    /// The link id lets the lobby tell this socket's disconnect apart from
    /// a newer one the same member opened afterwards.
    pub fn spawn(
        lobby: &LobbyHandle,
        identity: Identity,
        mut session: actix_ws::Session,
        mut stream: actix_ws::MessageStream,
    ) -> anyhow::Result<()> {
        let link: ID<Link> = ID::default();
        let (outbox, mut inbox) = unbounded_channel::<ServerMessage>();
        lobby.connect(identity.clone(), link, outbox)?;
        log::debug!("[bridge {}] {} connected", link, identity);
        let lobby = lobby.clone();
        actix_web::rt::spawn(async move {
            'sesh: loop {
                tokio::select! {
                    biased;
                    message = inbox.recv() => match message {
                        Some(message) => if session.text(message.to_json()).await.is_err() { break 'sesh },
                        None => break 'sesh,
                    },
                    frame = stream.next() => match frame {
                        Some(Ok(actix_ws::Message::Text(text))) => match Protocol::decode(&text) {
                            Ok(message) => if lobby.client(identity.clone(), message).is_err() { break 'sesh },
                            Err(e) => {
                                let rejection = ServerMessage::error(ErrorCode::Validation, &e.to_string());
                                if session.text(rejection.to_json()).await.is_err() { break 'sesh }
                            }
                        },
                        Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                        Some(Err(_)) => break 'sesh,
                        None => break 'sesh,
                        _ => continue 'sesh,
                    },
                }
            }
            let _ = lobby.disconnect(identity.id, link);
            log::debug!("[bridge {}] {} disconnected", link, identity);
        });
        Ok(())
    }
}
