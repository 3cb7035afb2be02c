use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use upgrade_catalog::Catalog;

mod bot;
mod config;
mod error;
mod flow;
mod health;
mod services;
mod state;

use crate::bot::telegram::TelegramMessenger;
use crate::config::BotConfig;
use crate::flow::PurchaseFlow;
use crate::services::ledger_service::InMemoryLedger;
use crate::services::notification_service::NotificationService;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "upgrade_bot=info,teloxide=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Upgrade Bot...");

    let config = BotConfig::load()?;
    let catalog = Arc::new(Catalog::standard()?);
    tracing::info!("Catalog loaded with {} items", catalog.len());
    tracing::info!("{} admin(s) will be notified of purchases", config.admin_chat_ids.len());

    let bot = Bot::new(config.bot_token.clone());
    let messenger = TelegramMessenger::new(bot.clone(), config.provider_token().map(str::to_string));

    let state = AppState {
        flow: PurchaseFlow::new(
            catalog,
            Arc::new(InMemoryLedger::new()),
            NotificationService::new(config.admin_chat_ids.clone()),
            Arc::new(messenger),
        ),
    };

    let port = config.listen_port;
    tokio::spawn(async move {
        if let Err(e) = health::serve(port).await {
            tracing::error!("Liveness endpoint stopped: {}", e);
        }
    });

    bot::run_bot(bot, state).await
}
