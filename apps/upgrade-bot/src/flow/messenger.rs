use crate::error::DeliveryError;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub item_id: String,
}

/// A text prompt with one selectable entry per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub prompt: String,
    pub entries: Vec<MenuEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLine {
    pub label: String,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRequest {
    pub title: String,
    pub description: String,
    pub payload: String,
    pub currency: String,
    pub prices: Vec<PriceLine>,
}

/// Outbound side of the messaging platform.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str, format: TextFormat) -> Result<(), DeliveryError>;
    async fn send_menu(&self, chat_id: i64, menu: &Menu) -> Result<(), DeliveryError>;
    async fn send_invoice(&self, chat_id: i64, invoice: &InvoiceRequest) -> Result<(), DeliveryError>;
}
