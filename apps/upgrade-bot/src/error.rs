use thiserror::Error;
use upgrade_catalog::CatalogError;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
    #[error("delivery rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    UnknownItem(#[from] CatalogError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
