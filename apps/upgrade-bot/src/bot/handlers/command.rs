use crate::bot::handlers::payment::successful_payment_handler;
use crate::bot::messages::{APOLOGY, UPGRADE_PROMPT, WELCOME};
use crate::AppState;
use teloxide::prelude::*;
use tracing::{debug, error};

/// Extracts the command word, dropping arguments and a `@botname` suffix.
pub fn parse_command(text: &str) -> Option<&str> {
    let word = text.split_whitespace().next()?;
    if !word.starts_with('/') {
        return None;
    }
    word.split('@').next()
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: AppState,
) -> Result<(), teloxide::RequestError> {
    if let Some(payment) = msg.successful_payment() {
        successful_payment_handler(&msg, payment, &state).await;
        return Ok(());
    }

    let Some(command) = msg.text().and_then(parse_command) else {
        return Ok(());
    };
    debug!("Received command {} in chat {}", command, msg.chat.id);

    let chat_id = msg.chat.id.0;
    let result = match command {
        "/start" => state.flow.show_menu(chat_id, WELCOME).await.map(|_| ()),
        "/upgrade" => state.flow.show_menu(chat_id, UPGRADE_PROMPT).await.map(|_| ()),
        "/stats" => {
            let requester = msg.from.as_ref().map(|u| u.id.0 as i64).unwrap_or(chat_id);
            state.flow.report_stats(chat_id, requester).await.map(|_| ())
        }
        _ => Ok(()),
    };

    if let Err(e) = result {
        error!("Failed to handle {} in chat {}: {}", command, chat_id, e);
        let _ = bot.send_message(msg.chat.id, APOLOGY).await;
    }
    Ok(())
}
