use crate::bot::keyboards::upgrade_keyboard;
use crate::error::DeliveryError;
use crate::flow::messenger::{InvoiceRequest, Menu, Messenger, TextFormat};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{LabeledPrice, ParseMode};

/// `Messenger` backed by the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
    provider_token: Option<String>,
}

impl TelegramMessenger {
    pub fn new(bot: Bot, provider_token: Option<String>) -> Self {
        Self { bot, provider_token }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, chat_id: i64, text: &str, format: TextFormat) -> Result<(), DeliveryError> {
        let request = self.bot.send_message(ChatId(chat_id), text);
        match format {
            TextFormat::Html => request.parse_mode(ParseMode::Html).await?,
            TextFormat::Plain => request.await?,
        };
        Ok(())
    }

    async fn send_menu(&self, chat_id: i64, menu: &Menu) -> Result<(), DeliveryError> {
        self.bot
            .send_message(ChatId(chat_id), menu.prompt.clone())
            .reply_markup(upgrade_keyboard(menu))
            .await?;
        Ok(())
    }

    async fn send_invoice(&self, chat_id: i64, invoice: &InvoiceRequest) -> Result<(), DeliveryError> {
        let prices: Vec<LabeledPrice> = invoice
            .prices
            .iter()
            .map(|line| LabeledPrice {
                label: line.label.clone(),
                amount: line.amount,
            })
            .collect();
        if prices.is_empty() {
            return Err(DeliveryError::Rejected(format!(
                "invoice {} has no price lines",
                invoice.payload
            )));
        }

        let mut request = self.bot.send_invoice(
            ChatId(chat_id),
            invoice.title.clone(),
            invoice.description.clone(),
            invoice.payload.clone(),
            invoice.currency.clone(),
            prices,
        );
        if let Some(token) = &self.provider_token {
            request = request.provider_token(token.clone());
        }
        request.await?;
        Ok(())
    }
}
