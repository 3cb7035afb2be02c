use anyhow::{Context, Result};
use teloxide::{dptree, prelude::*, types::Update};
use tracing::{error, info};

pub mod handlers;
pub mod keyboards;
pub mod messages;
pub mod telegram;

pub async fn run_bot(bot: Bot, state: crate::AppState) -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        error!("BOT PANIC: {}", info);
    }));

    // An invalid token is the one failure that stops the process.
    let me = bot
        .get_me()
        .await
        .context("failed to authenticate with Telegram")?;
    info!(
        "Bot connected as: @{}",
        me.username.clone().unwrap_or_else(|| "unknown".into())
    );

    let message_handler = Update::filter_message().endpoint(handlers::command::message_handler);
    let callback_handler =
        Update::filter_callback_query().endpoint(handlers::callback::callback_handler);
    let pre_checkout_handler =
        Update::filter_pre_checkout_query().endpoint(handlers::payment::pre_checkout_handler);

    let mut dispatcher = Dispatcher::builder(
        bot,
        dptree::entry()
            .branch(message_handler)
            .branch(callback_handler)
            .branch(pre_checkout_handler),
    )
    .dependencies(dptree::deps![state])
    .default_handler(|upd: std::sync::Arc<Update>| async move {
        info!("Unhandled update: {:?}", upd.kind);
    })
    .build();

    tokio::select! {
        _ = dispatcher.dispatch() => {
            info!("Bot dispatcher exited naturally");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Bot received shutdown signal, stopping...");
        }
    }
    Ok(())
}
