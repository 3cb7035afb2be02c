//! Purchase flow: menu -> invoice -> pre-checkout -> confirmation.
//!
//! The flow keeps no per-attempt state. The invoice payload is the item id and
//! is echoed back by the payment provider on pre-checkout and on confirmation.

pub mod messenger;

use crate::bot::messages::{self, Buyer};
use crate::error::FlowError;
use crate::services::ledger_service::PurchaseAccounting;
use crate::services::notification_service::{NotificationService, NotifyReport};
use messenger::{InvoiceRequest, Menu, MenuEntry, Messenger, PriceLine, TextFormat};
use std::sync::Arc;
use tracing::{error, info, warn};
use upgrade_catalog::{Catalog, POINT_CURRENCY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseStage {
    Idle,
    MenuShown,
    InvoiceSent,
    PreCheckoutValidated,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreCheckoutVerdict {
    Accept,
    Reject { reason: String },
}

impl PreCheckoutVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, PreCheckoutVerdict::Accept)
    }

    pub fn stage(&self) -> PurchaseStage {
        match self {
            PreCheckoutVerdict::Accept => PurchaseStage::PreCheckoutValidated,
            PreCheckoutVerdict::Reject { .. } => PurchaseStage::Idle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub stage: PurchaseStage,
    pub item_id: String,
    pub user_purchases: u64,
    pub buyer_notified: bool,
    pub admins: NotifyReport,
}

#[derive(Clone)]
pub struct PurchaseFlow {
    catalog: Arc<Catalog>,
    ledger: Arc<dyn PurchaseAccounting>,
    notifier: NotificationService,
    messenger: Arc<dyn Messenger>,
}

impl PurchaseFlow {
    pub fn new(
        catalog: Arc<Catalog>,
        ledger: Arc<dyn PurchaseAccounting>,
        notifier: NotificationService,
        messenger: Arc<dyn Messenger>,
    ) -> Self {
        Self {
            catalog,
            ledger,
            notifier,
            messenger,
        }
    }

    pub fn menu(&self, prompt: &str) -> Menu {
        Menu {
            prompt: prompt.to_string(),
            entries: self
                .catalog
                .list()
                .iter()
                .map(|item| MenuEntry {
                    label: item.display_name.clone(),
                    item_id: item.id.clone(),
                })
                .collect(),
        }
    }

    pub async fn show_menu(&self, chat_id: i64, prompt: &str) -> Result<PurchaseStage, FlowError> {
        self.messenger.send_menu(chat_id, &self.menu(prompt)).await?;
        Ok(PurchaseStage::MenuShown)
    }

    pub fn invoice_for(&self, item_id: &str) -> Result<InvoiceRequest, FlowError> {
        let item = self.catalog.get(item_id)?;
        Ok(InvoiceRequest {
            title: item.display_name.clone(),
            description: item.description.clone(),
            payload: item.id.clone(),
            currency: POINT_CURRENCY.to_string(),
            prices: vec![PriceLine {
                label: item.display_name.clone(),
                amount: item.price,
            }],
        })
    }

    pub async fn select_item(&self, chat_id: i64, item_id: &str) -> Result<PurchaseStage, FlowError> {
        let invoice = self.invoice_for(item_id)?;
        self.messenger.send_invoice(chat_id, &invoice).await?;
        info!("Invoice for {} sent to chat {}", item_id, chat_id);
        Ok(PurchaseStage::InvoiceSent)
    }

    /// Selection with the failure boundary applied: any error is logged and
    /// answered with a single apology, and no invoice goes out.
    pub async fn handle_selection(&self, chat_id: i64, item_id: &str) -> PurchaseStage {
        match self.select_item(chat_id, item_id).await {
            Ok(stage) => stage,
            Err(e) => {
                error!("Selection of {:?} in chat {} failed: {}", item_id, chat_id, e);
                if let Err(e) = self
                    .messenger
                    .send_text(chat_id, messages::APOLOGY, TextFormat::Plain)
                    .await
                {
                    error!("Failed to send apology to chat {}: {}", chat_id, e);
                }
                PurchaseStage::Idle
            }
        }
    }

    /// Fails closed: only payloads naming a catalog item are accepted.
    pub fn validate_precheckout(&self, payload: &str) -> PreCheckoutVerdict {
        if self.catalog.contains(payload) {
            PreCheckoutVerdict::Accept
        } else {
            warn!("Rejecting pre-checkout for unknown payload {:?}", payload);
            PreCheckoutVerdict::Reject {
                reason: messages::UNKNOWN_ITEM_REASON.to_string(),
            }
        }
    }

    /// Records a settled payment. The tally is incremented before any message
    /// goes out and is never rolled back by a failed delivery.
    pub async fn confirm_payment(
        &self,
        chat_id: i64,
        buyer: &Buyer,
        payload: &str,
        charge_id: &str,
    ) -> Result<PurchaseReceipt, FlowError> {
        let item = self.catalog.get(payload)?;
        let user_purchases = self.ledger.record_purchase(&buyer.id.to_string()).await;

        info!(
            "Successful payment from user {} for item {} (charge_id: {}, purchases: {})",
            buyer.id, item.id, charge_id, user_purchases
        );

        let buyer_notified = match self
            .messenger
            .send_text(chat_id, messages::PURCHASE_SUCCESS, TextFormat::Plain)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to confirm purchase to user {}: {}", buyer.id, e);
                false
            }
        };

        let notice = messages::admin_purchase_notice(buyer, item, charge_id);
        let admins = self.notifier.notify_admins(self.messenger.as_ref(), &notice).await;

        Ok(PurchaseReceipt {
            stage: PurchaseStage::Completed,
            item_id: item.id.clone(),
            user_purchases,
            buyer_notified,
            admins,
        })
    }

    /// Sends the purchase tally to `requester_id` if they are an administrator.
    /// Returns whether a report was sent.
    pub async fn report_stats(&self, chat_id: i64, requester_id: i64) -> Result<bool, FlowError> {
        if !self.notifier.is_admin(requester_id) {
            return Ok(false);
        }
        let counts = self.ledger.snapshot().await;
        self.messenger
            .send_text(chat_id, &messages::stats_report(&counts), TextFormat::Html)
            .await?;
        Ok(true)
    }
}
